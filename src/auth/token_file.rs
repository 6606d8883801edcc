//! Durable storage for the current refresh token.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Default file name, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "refreshToken";

/// A plain-text file holding exactly one refresh token.
///
/// The file is read once when the session connects and overwritten after
/// every successful token exchange. Writes go to a sibling temporary file
/// that is then renamed over the target, so a reader never sees a partial
/// token.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Use the token file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored refresh token, trimming surrounding whitespace.
    pub fn load(&self) -> Result<SecretString> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.store_error(e))?;
        let token = contents.trim();
        if token.is_empty() {
            return Err(self.store_error(io::Error::new(
                io::ErrorKind::InvalidData,
                "token file is empty",
            )));
        }
        Ok(SecretString::from(token.to_string()))
    }

    /// Replace the stored refresh token.
    pub fn save(&self, token: &SecretString) -> Result<()> {
        let tmp = self.tmp_path();
        fs::write(&tmp, token.expose_secret().as_bytes()).map_err(|e| self.store_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.store_error(e)
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_TOKEN_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn store_error(&self, source: io::Error) -> Error {
        Error::TokenStore {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for TokenFile {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refreshToken");
        fs::write(&path, "  aSBe7wAAdx88QTbwut0tiu3SYic3ox8F\n").unwrap();

        let token = TokenFile::new(&path).load().unwrap();
        assert_eq!(token.expose_secret(), "aSBe7wAAdx88QTbwut0tiu3SYic3ox8F");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refreshToken");
        fs::write(&path, "a-much-longer-previous-token-value").unwrap();

        let file = TokenFile::new(&path);
        file.save(&SecretString::from("short".to_string())).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
        assert!(!dir.path().join("refreshToken.tmp").exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenFile::new(dir.path().join("nope")).load().unwrap_err();
        assert!(matches!(err, Error::TokenStore { .. }));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refreshToken");
        fs::write(&path, "\n").unwrap();
        assert!(TokenFile::new(&path).load().is_err());
    }
}
