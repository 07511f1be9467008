//! Secure credential handling using the secrecy crate
//!
//! The PostgreSQL connection string carries a password, so it is kept in a
//! [`SecretString`]: memory is zeroed on drop, `Debug` output is redacted, and
//! reading the value requires an explicit `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use filmo_batch::config::{secret_string, redact_connection_string};
//! use secrecy::ExposeSecret;
//!
//! let url = secret_string("postgresql://filmo:pw@db:5432/filmo".to_string());
//! assert_eq!(
//!     redact_connection_string(url.expose_secret().as_ref()),
//!     "postgresql://***@db:5432/filmo"
//! );
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Parse the secret value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Strip credentials from a connection string for display
///
/// Everything between the scheme and the last `@` is replaced with `***`.
/// A string without credentials is returned unchanged.
pub fn redact_connection_string(connection_string: &str) -> String {
    let scheme = connection_string
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .unwrap_or("postgresql");

    match connection_string.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => connection_string.to_string(),
    }
}
