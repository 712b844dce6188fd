// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for locale configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for locale configuration operations.
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Errors that can occur while loading or validating locale configuration.
#[derive(Debug, Error)]
pub enum LocaleError {
	/// I/O error reading a configuration file.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// TOML parsing error with file context.
	#[error("TOML parse error in {}: {source}", .path.display())]
	Parse {
		/// Path to the file that failed to parse.
		path: PathBuf,
		/// The underlying TOML error.
		#[source]
		source: toml::de::Error,
	},

	/// A configured value does not look like a locale code.
	#[error("invalid locale code for {field}: {code:?}")]
	InvalidLocale {
		/// Which configuration field held the bad code.
		field: String,
		/// The offending value.
		code: String,
	},

	/// A fallback type other than `redirect` or `rewrite`.
	#[error("unknown fallback type: {0:?} (expected \"redirect\" or \"rewrite\")")]
	UnknownFallbackType(String),
}

impl LocaleError {
	/// Create an invalid-locale error.
	pub fn invalid_locale(field: impl Into<String>, code: impl Into<String>) -> Self {
		Self::InvalidLocale {
			field: field.into(),
			code: code.into(),
		}
	}
}
