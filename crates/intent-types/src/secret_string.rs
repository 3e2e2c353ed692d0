//! Private key holder.
//!
//! The owner key of the smart account is read from configuration and handed
//! to the signer. It is wiped from memory when dropped and never shows up in
//! formatted output.

use serde::{Deserialize, Deserializer};
use std::fmt;
use zeroize::Zeroizing;

/// Zeroed-on-drop string whose formatted forms are redacted.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self(Zeroizing::new(secret))
	}

	/// Borrows the raw secret. Never log or persist the result.
	pub fn expose_secret(&self) -> &str {
		self.0.as_str()
	}

	/// Runs `f` against the raw secret without letting the borrow escape.
	pub fn with_exposed<R>(&self, f: impl FnOnce(&str) -> R) -> R {
		f(self.0.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.0.trim().is_empty()
	}
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_owned())
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::new)
	}
}
