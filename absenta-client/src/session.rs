//! Credential storage - JSON file persistence for the login session

use crate::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use std::fs;
use std::path::{Path, PathBuf};

/// Stored login session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub token: String,
    pub role: Role,
    /// Unix seconds; `None` means no client-side expiry
    pub expires_at: Option<u64>,
}

impl Credential {
    pub fn new(username: String, token: String, role: Role, expires_at: Option<u64>) -> Self {
        Self {
            username,
            token,
            role,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            return now > expires_at;
        }
        false
    }
}

/// Credential storage
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Create a credential storage rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save a credential
    pub fn save(&self, credential: &Credential) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)
    }

    /// Load the stored credential, if any
    pub fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// A usable credential is a fatal precondition for any data
    /// operation; missing or expired routes the user back to login.
    pub fn require(&self) -> ClientResult<Credential> {
        match self.load() {
            Some(credential) if !credential.is_expired() => Ok(credential),
            _ => Err(ClientError::MissingCredential),
        }
    }

    /// Check whether a credential file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the stored credential
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Path of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
