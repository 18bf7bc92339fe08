use std::fmt;
use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

/// Opaque per-device identity; the key of the user's sprint document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Accepts ASCII letters, digits, `-` and `_` (identities name files)
    pub fn new(value: impl Into<String>) -> Result<Self, AuthError> {
        let value = value.into();
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Identity(value))
        } else {
            Err(AuthError::Invalid(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for sign-in
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("could not read identity at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not store identity at {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid identity {0:?}")]
    Invalid(String),
}

/// Something that can hand out an identity for this device
pub trait IdentityProvider {
    fn sign_in(&self) -> Result<Identity, AuthError>;
}

/// Anonymous sign-in: a random id generated on first use and remembered in
/// a file. No credentials are involved.
#[derive(Debug, Clone)]
pub struct AnonymousIdentity {
    path: PathBuf,
}

impl AnonymousIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AnonymousIdentity { path: path.into() }
    }
}

impl IdentityProvider for AnonymousIdentity {
    fn sign_in(&self) -> Result<Identity, AuthError> {
        if self.path.exists() {
            let text = fs::read_to_string(&self.path).map_err(|e| AuthError::ReadError {
                path: self.path.clone(),
                source: e,
            })?;
            return Identity::new(text.trim());
        }

        let identity = Identity::new(Uuid::new_v4().to_string())?;
        let write_err = |e| AuthError::WriteError {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, format!("{identity}\n")).map_err(write_err)?;
        tracing::info!(%identity, "created anonymous identity");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_sign_in_creates_identity() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/identity");
        let provider = AnonymousIdentity::new(&path);

        let first = provider.sign_in().unwrap();
        assert!(path.exists());
        assert_eq!(first.as_str().len(), 36);

        let second = provider.sign_in().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reads_existing_identity() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("identity");
        fs::write(&path, "device-42\n").unwrap();
        let identity = AnonymousIdentity::new(&path).sign_in().unwrap();
        assert_eq!(identity.as_str(), "device-42");
    }

    #[test]
    fn rejects_path_like_identity() {
        assert!(matches!(Identity::new("../etc"), Err(AuthError::Invalid(_))));
        assert!(matches!(Identity::new(""), Err(AuthError::Invalid(_))));
    }

    #[test]
    fn corrupted_identity_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("identity");
        fs::write(&path, "not valid/at all").unwrap();
        assert!(AnonymousIdentity::new(&path).sign_in().is_err());
    }
}
