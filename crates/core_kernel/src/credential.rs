//! Completion service credential
//!
//! The credential is read once at startup and threaded explicitly into the
//! pipeline and the HTTP adapter. It is never logged: `Debug` redacts it.

use std::fmt;

/// Values shipped in sample `.env` files that must not be sent upstream
pub const PLACEHOLDER_KEYS: &[&str] = &["your_openai_api_key_here", "sk-your-actual-api-key-here"];

/// An API key for the completion service, possibly absent
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    /// Wraps a configured key
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    /// A credential that was never configured
    pub fn missing() -> Self {
        Self(None)
    }

    /// Builds a credential from an optional configuration value
    pub fn from_option(key: Option<String>) -> Self {
        Self(key)
    }

    /// Returns the key if it can be sent upstream
    ///
    /// Blank keys and known placeholders are treated as missing.
    pub fn usable_key(&self) -> Option<&str> {
        self.0
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !PLACEHOLDER_KEYS.contains(key))
    }

    pub fn is_usable(&self) -> bool {
        self.usable_key().is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (&self.0, self.is_usable()) {
            (None, _) => "missing",
            (Some(_), false) => "placeholder",
            (Some(_), true) => "[redacted]",
        };
        f.debug_tuple("Credential").field(&state).finish()
    }
}
