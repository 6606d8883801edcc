//! Authentication and session management for the Questrade API.
//!
//! Questrade uses OAuth refresh tokens that are valid for a single use:
//! every exchange returns a new access token *and* a new refresh token, and
//! the old refresh token stops working. The session therefore writes each
//! newly issued refresh token back to a [`TokenFile`] so the next run can
//! pick up where this one left off.
//!
//! # Bootstrapping
//!
//! Generate a manual refresh token in the Questrade App Hub and write it to
//! the token file (by default `refreshToken` in the working directory).
//!
//! ```no_run
//! use questrade_rs::{ClientConfig, Environment, Session, TokenFile};
//!
//! # async fn example() -> questrade_rs::Result<()> {
//! let session = Session::new(
//!     TokenFile::new("refreshToken"),
//!     Environment::Production,
//!     &ClientConfig::default(),
//! )?;
//! session.connect().await?;
//! println!("token valid until {:?}", session.expires_at().await);
//! # Ok(())
//! # }
//! ```

mod session;
mod token_file;

pub(crate) use session::Bearer;
pub use session::Session;
pub use token_file::{TokenFile, DEFAULT_TOKEN_FILE};
