// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fallback-chain computation.
//!
//! When content is missing in the requested locale, candidates are tried
//! in a strict priority order: explicit overrides first, transitively,
//! then the generic fallback. Editorial intent (`fr-CA -> fr`) always
//! outranks the least-specific catch-all.

use std::collections::HashSet;

use crate::config::LocaleConfig;

/// The single-hop fallback for `locale`.
///
/// Priority: the explicit override when one is configured, the locale
/// itself when it is the default (the default has nowhere further to
/// go), the generic fallback otherwise.
///
/// # Example
///
/// ```
/// use imprint_locale_core::{fallback_locale, FallbackMap, LocaleConfig};
///
/// let mut config = LocaleConfig::default();
/// config.fallback = FallbackMap::from_pairs([("fr-CA", "fr")]);
///
/// assert_eq!(fallback_locale(&config, "fr-CA"), "fr");
/// assert_eq!(fallback_locale(&config, "de"), "en");
/// assert_eq!(fallback_locale(&config, "en"), "en");
/// ```
pub fn fallback_locale<'a>(config: &'a LocaleConfig, locale: &'a str) -> &'a str {
	if let Some(fallback) = config.fallback.override_for(locale) {
		return fallback;
	}
	if locale == config.default_locale {
		return locale;
	}
	&config.generic_fallback
}

/// The ordered locales to try after `locale` itself.
///
/// Explicit overrides are followed transitively; a locale with no
/// override contributes the generic fallback instead, unless it is the
/// generic fallback or the default locale. No locale appears twice, and
/// override cycles end the walk instead of looping; the requested locale
/// itself only enters the chain when an override cycle leads back to it.
///
/// # Example
///
/// ```
/// use imprint_locale_core::{fallback_chain, FallbackMap, LocaleConfig};
///
/// let mut config = LocaleConfig::default();
/// config.fallback = FallbackMap::from_pairs([("fr-CA", "fr"), ("nl-BE", "nl")]);
///
/// assert_eq!(fallback_chain(&config, "fr-CA"), vec!["fr", "en"]);
/// assert_eq!(fallback_chain(&config, "de"), vec!["en"]);
/// assert!(fallback_chain(&config, "en").is_empty());
/// ```
pub fn fallback_chain(config: &LocaleConfig, locale: &str) -> Vec<String> {
	if !config.enable_fallback {
		return Vec::new();
	}

	let mut chain: Vec<String> = Vec::new();
	let mut visited: HashSet<String> = HashSet::new();
	visited.insert(locale.to_string());
	let mut current = locale.to_string();

	loop {
		match config.fallback.override_for(&current) {
			Some(next) => {
				// Never queue the same candidate twice.
				if chain.iter().any(|tried| tried == next) {
					break;
				}
				chain.push(next.to_string());
				// Cycle guard: revisiting a locale ends the walk.
				if !visited.insert(next.to_string()) {
					break;
				}
				current = next.to_string();
			}
			None => {
				if current != config.generic_fallback
					&& current != config.default_locale
					&& !chain.iter().any(|tried| tried == &config.generic_fallback)
				{
					chain.push(config.generic_fallback.clone());
				}
				break;
			}
		}
	}

	chain
}
