// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale code surface forms.
//!
//! Locale codes travel in two interchangeable spellings: the URL form
//! used in request paths (`pt-BR`) and the content-API form used in
//! delivery queries (`pt_BR`). Conversion between the two is total; no
//! lookup table is consulted and unknown codes pass through unchanged.

/// Convert a content-API locale code to its URL form.
///
/// Replaces underscores with hyphens and leaves everything else alone.
///
/// # Example
///
/// ```
/// use imprint_locale_core::normalize_locale;
///
/// assert_eq!(normalize_locale("pt_BR"), "pt-BR");
/// assert_eq!(normalize_locale("en"), "en");
/// ```
pub fn normalize_locale(code: &str) -> String {
	code.replace('_', "-")
}

/// Convert a URL-form locale code to its content-API form.
///
/// Hyphens become underscores. When the result has exactly a language and
/// a region, the language is lowercased and the region uppercased;
/// anything else is lowercased wholesale.
///
/// # Example
///
/// ```
/// use imprint_locale_core::denormalize_locale;
///
/// assert_eq!(denormalize_locale("pt-br"), "pt_BR");
/// assert_eq!(denormalize_locale("nb-NO"), "nb_NO");
/// assert_eq!(denormalize_locale("EN"), "en");
/// ```
pub fn denormalize_locale(code: &str) -> String {
	let result = code.replace('-', "_");
	let parts: Vec<&str> = result.split('_').collect();
	if parts.len() == 2 {
		format!("{}_{}", parts[0].to_lowercase(), parts[1].to_uppercase())
	} else {
		result.to_lowercase()
	}
}

/// Check whether a string is a well-formed URL-form locale code.
///
/// Accepts a 2-3 letter language, optionally followed by a hyphen and a
/// 2-3 character alphanumeric region, case-insensitively: `en`, `fil`,
/// `pt-BR`, `es-419`. Underscored API forms do not pass; normalize them
/// first.
pub fn is_valid_locale(code: &str) -> bool {
	let (language, region) = match code.split_once('-') {
		Some((language, region)) => (language, Some(region)),
		None => (code, None),
	};
	if language.len() < 2 || language.len() > 3 {
		return false;
	}
	if !language.chars().all(|c| c.is_ascii_alphabetic()) {
		return false;
	}
	match region {
		Some(region) => {
			region.len() >= 2
				&& region.len() <= 3
				&& region.chars().all(|c| c.is_ascii_alphanumeric())
		}
		None => true,
	}
}
