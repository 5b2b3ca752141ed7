//! Authentication session backed by a small JSON key-value file.
//!
//! There is no real authentication: a successful login writes a sentinel
//! token under [`AUTH_TOKEN_KEY`] and logout removes it. The file lives in the
//! configured state directory so the TUI and the `logout` subcommand agree.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::flows::Deferred;

pub const SESSION_FILE: &str = "session.json";
pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const MOCK_TOKEN: &str = "mock_token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session store at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session store at {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value pairs persisted as a flat JSON object
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl SessionStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| SessionError::Io {
                path: path.clone(),
                source,
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|source| SessionError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            SessionError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, contents).map_err(io_err)
    }
}

/// Login methods offered on the sign-in screen
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Email { email: String, password: String },
    Node { node_id: String },
    Wallet { private_key: String },
}

impl Credentials {
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::Email { .. } => "email",
            Credentials::Node { .. } => "node",
            Credentials::Wallet { .. } => "wallet",
        }
    }

    /// The non-secret part, safe to log
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Credentials::Email { email, .. } => Some(email),
            Credentials::Node { node_id } => Some(node_id),
            Credentials::Wallet { .. } => None,
        }
    }
}

// Secrets never reach log output, even through `{:?}`
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Email { email, .. } => f
                .debug_struct("Email")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Node { node_id } => {
                f.debug_struct("Node").field("node_id", node_id).finish()
            }
            Credentials::Wallet { .. } => f
                .debug_struct("Wallet")
                .field("private_key", &"<redacted>")
                .finish(),
        }
    }
}

/// The user's session, owned by the application root
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    authenticated: bool,
}

impl Session {
    /// Open the session stored in `state_dir`
    pub fn open(state_dir: &Path) -> Result<Self, SessionError> {
        let store = SessionStore::load(state_dir.join(SESSION_FILE))?;
        let authenticated = store.get(AUTH_TOKEN_KEY).is_some();
        tracing::debug!(path = %store.path().display(), authenticated, "session opened");
        Ok(Self {
            store,
            authenticated,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Start a simulated login; the credentials come back after `delay`
    pub fn begin_login(&self, credentials: Credentials, delay: Duration) -> Deferred<Credentials> {
        tracing::info!(
            kind = credentials.kind(),
            identifier = credentials.identifier().unwrap_or("unknown"),
            "logging in"
        );
        Deferred::new(credentials, delay)
    }

    /// Finish a login started with [`Session::begin_login`]
    pub fn complete_login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        self.store.set(AUTH_TOKEN_KEY, MOCK_TOKEN)?;
        self.authenticated = true;
        tracing::info!(kind = credentials.kind(), "logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.authenticated = false;
        tracing::info!("logged out");
        Ok(())
    }
}
