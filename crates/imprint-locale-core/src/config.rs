// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deployment-wide locale configuration.
//!
//! [`LocaleConfig`] is loaded once at startup and passed by reference (or
//! `Arc`) into everything that needs it; nothing in this crate reads
//! global state. Configuration layers in a fixed order: built-in
//! defaults, then an optional TOML file, then `IMPRINT_*` environment
//! variables.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::code::is_valid_locale;
use crate::error::{LocaleError, Result};

/// Environment variable overriding [`LocaleConfig::default_locale`].
pub const DEFAULT_LOCALE_ENV: &str = "IMPRINT_DEFAULT_LOCALE";

/// Environment variable overriding [`LocaleConfig::enable_fallback`].
pub const ENABLE_FALLBACK_ENV: &str = "IMPRINT_ENABLE_FALLBACK";

/// Environment variable overriding [`LocaleConfig::generic_fallback`].
pub const GENERIC_FALLBACK_ENV: &str = "IMPRINT_GENERIC_FALLBACK";

/// Environment variable overriding [`LocaleConfig::fallback_type`].
pub const FALLBACK_TYPE_ENV: &str = "IMPRINT_FALLBACK_TYPE";

/// Environment variable overriding [`LocaleConfig::prefix_default_locale`].
pub const PREFIX_DEFAULT_LOCALE_ENV: &str = "IMPRINT_PREFIX_DEFAULT_LOCALE";

/// How a resolved fallback is surfaced to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackType {
	/// Issue an HTTP redirect to the fallback locale's own URL.
	Redirect,
	/// Serve the fallback locale's content at the requested URL.
	#[default]
	Rewrite,
}

impl fmt::Display for FallbackType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FallbackType::Redirect => write!(f, "redirect"),
			FallbackType::Rewrite => write!(f, "rewrite"),
		}
	}
}

impl FromStr for FallbackType {
	type Err = LocaleError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"redirect" => Ok(FallbackType::Redirect),
			"rewrite" => Ok(FallbackType::Rewrite),
			other => Err(LocaleError::UnknownFallbackType(other.to_string())),
		}
	}
}

/// Explicit per-locale fallback overrides.
///
/// A finite map from a locale to the single locale tried in its place,
/// e.g. `fr-CA -> fr`. A locale absent from the map falls through to the
/// generic fallback or the default locale; that ordering lives in
/// [`fallback_locale`](crate::chain::fallback_locale).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackMap(HashMap<String, String>);

impl FallbackMap {
	/// Build a map from `(locale, fallback)` pairs.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self(
			pairs
				.into_iter()
				.map(|(locale, fallback)| (locale.into(), fallback.into()))
				.collect(),
		)
	}

	/// The explicit override for `locale`, when one is configured.
	pub fn override_for(&self, locale: &str) -> Option<&str> {
		self.0.get(locale).map(String::as_str)
	}

	/// Whether any overrides are configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of configured overrides.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterate over `(locale, fallback)` pairs in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(locale, fallback)| (locale.as_str(), fallback.as_str()))
	}
}

/// Locale behavior for a whole deployment.
///
/// Every field has a serde default, so a TOML file only needs to name
/// what it changes:
///
/// ```toml
/// default_locale = "en"
/// fallback_type = "rewrite"
///
/// [fallback]
/// "fr-CA" = "fr"
/// "nl-BE" = "nl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
	/// Canonical locale served when a URL carries no locale segment.
	pub default_locale: String,
	/// Master switch; when false every fallback chain is empty.
	pub enable_fallback: bool,
	/// Explicit per-locale overrides, consulted before the generic fallback.
	pub fallback: FallbackMap,
	/// Catch-all locale for locales without an explicit override.
	pub generic_fallback: String,
	/// Whether fallbacks redirect or rewrite.
	pub fallback_type: FallbackType,
	/// Whether default-locale URLs carry a locale prefix segment.
	pub prefix_default_locale: bool,
}

impl Default for LocaleConfig {
	fn default() -> Self {
		Self {
			default_locale: "en".to_string(),
			enable_fallback: true,
			fallback: FallbackMap::default(),
			generic_fallback: "en".to_string(),
			fallback_type: FallbackType::Rewrite,
			prefix_default_locale: false,
		}
	}
}

impl LocaleConfig {
	/// Parse and validate a TOML configuration file.
	///
	/// Strict: any read, parse, or validation problem is an error. Use
	/// [`LocaleConfig::load`] for the lenient startup path.
	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)?;
		let config: Self = toml::from_str(&raw).map_err(|source| LocaleError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration without failing.
	///
	/// Layers built-in defaults, then `path` when given, then the
	/// `IMPRINT_*` environment overrides. A file that cannot be read or
	/// parsed is logged and skipped; a configuration left invalid after
	/// overrides is logged and replaced with the defaults. Locale
	/// handling must never stop a deployment from booting.
	pub fn load(path: Option<&Path>) -> Self {
		let mut config = match path {
			Some(path) => match Self::from_file(path) {
				Ok(config) => config,
				Err(error) => {
					warn!(
						path = %path.display(),
						error = %error,
						"could not load locale config, using defaults"
					);
					Self::default()
				}
			},
			None => Self::default(),
		};
		config.apply_env_overrides();
		if let Err(error) = config.validate() {
			warn!(error = %error, "locale config invalid after overrides, using defaults");
			return Self::default();
		}
		config
	}

	/// Apply `IMPRINT_*` environment overrides in place.
	///
	/// Only scalar fields can be overridden; the fallback map stays as
	/// loaded. Unparseable values are logged and ignored.
	fn apply_env_overrides(&mut self) {
		if let Ok(value) = std::env::var(DEFAULT_LOCALE_ENV) {
			self.default_locale = value;
		}
		if let Ok(value) = std::env::var(GENERIC_FALLBACK_ENV) {
			self.generic_fallback = value;
		}
		if let Ok(value) = std::env::var(ENABLE_FALLBACK_ENV) {
			match parse_bool(&value) {
				Some(flag) => self.enable_fallback = flag,
				None => warn!(
					var = ENABLE_FALLBACK_ENV,
					value = %value,
					"ignoring unparseable boolean override"
				),
			}
		}
		if let Ok(value) = std::env::var(PREFIX_DEFAULT_LOCALE_ENV) {
			match parse_bool(&value) {
				Some(flag) => self.prefix_default_locale = flag,
				None => warn!(
					var = PREFIX_DEFAULT_LOCALE_ENV,
					value = %value,
					"ignoring unparseable boolean override"
				),
			}
		}
		if let Ok(value) = std::env::var(FALLBACK_TYPE_ENV) {
			match value.parse() {
				Ok(fallback_type) => self.fallback_type = fallback_type,
				Err(error) => warn!(
					var = FALLBACK_TYPE_ENV,
					error = %error,
					"ignoring fallback type override"
				),
			}
		}
	}

	/// Check that every configured locale code is well-formed.
	///
	/// Override cycles are not rejected here; the chain walk guards
	/// against them at lookup time.
	pub fn validate(&self) -> Result<()> {
		if !is_valid_locale(&self.default_locale) {
			return Err(LocaleError::invalid_locale(
				"default_locale",
				&self.default_locale,
			));
		}
		if !is_valid_locale(&self.generic_fallback) {
			return Err(LocaleError::invalid_locale(
				"generic_fallback",
				&self.generic_fallback,
			));
		}
		for (locale, fallback) in self.fallback.iter() {
			if !is_valid_locale(locale) {
				return Err(LocaleError::invalid_locale("fallback key", locale));
			}
			if !is_valid_locale(fallback) {
				return Err(LocaleError::invalid_locale("fallback value", fallback));
			}
		}
		Ok(())
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	if value == "1" || value.eq_ignore_ascii_case("true") {
		Some(true)
	} else if value == "0" || value.eq_ignore_ascii_case("false") {
		Some(false)
	} else {
		None
	}
}
