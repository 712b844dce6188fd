// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fallback presentation strategy.
//!
//! Once a page handler knows whether the requested locale has content,
//! it needs a decision: serve, redirect, or 404. The decision is pure;
//! resolving content is `imprint-resolver`'s job.

use crate::chain::fallback_locale;
use crate::config::{FallbackType, LocaleConfig};
use crate::path::{relative_locale_url, strip_locale};

/// What the page handler should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackDirective {
	/// Render content for this locale at the requested URL.
	Serve {
		/// Locale whose content should be rendered, URL form.
		locale: String,
	},
	/// Issue an HTTP 302 to `location`.
	Redirect {
		/// Locale-prefixed URL of the fallback page.
		location: String,
	},
	/// Nothing suitable exists; answer 404.
	NotFound,
}

/// Single-hop fallback summary for a locale.
///
/// `needs_fallback` is false when the locale falls back to itself or
/// straight to the default locale, which the unprefixed route already
/// serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackStrategy {
	/// Where the locale falls back to, URL form.
	pub fallback_locale: String,
	/// Configured presentation for fallbacks.
	pub fallback_type: FallbackType,
	/// Whether the fallback is worth acting on at all.
	pub needs_fallback: bool,
}

/// Summarize how `locale` would fall back, without touching content.
pub fn fallback_strategy(config: &LocaleConfig, locale: &str) -> FallbackStrategy {
	let fallback = fallback_locale(config, locale);
	FallbackStrategy {
		fallback_locale: fallback.to_string(),
		fallback_type: config.fallback_type,
		needs_fallback: locale != fallback && fallback != config.default_locale,
	}
}

/// Decide how to answer a request once content presence is known.
///
/// With content in hand the requested locale is served as-is. Without
/// it, a locale whose fallback is itself has nowhere to go and 404s;
/// otherwise the configured [`FallbackType`] either redirects to the
/// fallback locale's URL for the same page or serves the fallback
/// locale's content at the requested URL.
///
/// # Example
///
/// ```
/// use imprint_locale_core::{apply_fallback_strategy, FallbackDirective, FallbackMap, LocaleConfig};
///
/// let mut config = LocaleConfig::default();
/// config.fallback = FallbackMap::from_pairs([("fr-CA", "fr")]);
///
/// let directive = apply_fallback_strategy(&config, "fr-CA", "/fr-CA/produits/", false);
/// assert_eq!(directive, FallbackDirective::Serve { locale: "fr".to_string() });
/// ```
pub fn apply_fallback_strategy(
	config: &LocaleConfig,
	requested_locale: &str,
	current_path: &str,
	has_content: bool,
) -> FallbackDirective {
	if has_content {
		return FallbackDirective::Serve {
			locale: requested_locale.to_string(),
		};
	}

	let fallback = fallback_locale(config, requested_locale);
	if fallback == requested_locale {
		return FallbackDirective::NotFound;
	}

	match config.fallback_type {
		FallbackType::Redirect => FallbackDirective::Redirect {
			location: relative_locale_url(config, fallback, &strip_locale(current_path)),
		},
		FallbackType::Rewrite => FallbackDirective::Serve {
			locale: fallback.to_string(),
		},
	}
}
