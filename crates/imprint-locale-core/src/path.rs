// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! URL path handling for locale-prefixed routes.
//!
//! Site routes carry the locale as their first path segment
//! (`/fr/produits/`), except for the default locale, which is unprefixed
//! unless the deployment opts in. External-preview routes push the locale
//! one segment deeper (`/externalpreview/de/about/`). Everything here is
//! string work on path segments; no URL parsing library is involved and
//! none of it can fail.

use crate::code::{is_valid_locale, normalize_locale};
use crate::config::LocaleConfig;

/// First path segment of an external-preview request.
pub const PREVIEW_PATH_SEGMENT: &str = "externalpreview";

/// Extract the locale from a URL path.
///
/// Takes the first segment, or the second on an external-preview path,
/// when it is a well-formed locale code. Anything else, the empty path
/// included, yields the configured default.
///
/// # Example
///
/// ```
/// use imprint_locale_core::{locale_from_path, LocaleConfig};
///
/// let config = LocaleConfig::default();
/// assert_eq!(locale_from_path(&config, "/fr/produits/"), "fr");
/// assert_eq!(locale_from_path(&config, "/externalpreview/de/about/"), "de");
/// assert_eq!(locale_from_path(&config, "/about/"), "en");
/// ```
pub fn locale_from_path<'a>(config: &'a LocaleConfig, path: &'a str) -> &'a str {
	let mut segments = path.split('/').filter(|segment| !segment.is_empty());
	let candidate = match segments.next() {
		Some(PREVIEW_PATH_SEGMENT) => segments.next(),
		first => first,
	};
	match candidate {
		Some(candidate) if is_valid_locale(candidate) => candidate,
		_ => &config.default_locale,
	}
}

/// Strip one leading locale segment from a path.
///
/// A path that does not start with a well-formed locale comes back
/// unchanged; a path that is nothing but a locale collapses to `/`. When
/// a segment is stripped, the remainder carries no trailing slash.
///
/// # Example
///
/// ```
/// use imprint_locale_core::strip_locale;
///
/// assert_eq!(strip_locale("/fr/produits/"), "/produits");
/// assert_eq!(strip_locale("/about/"), "/about/");
/// assert_eq!(strip_locale("/fr/"), "/");
/// ```
pub fn strip_locale(path: &str) -> String {
	let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
	let Some((first, rest)) = segments.split_first() else {
		return "/".to_string();
	};
	if !is_valid_locale(first) {
		return path.to_string();
	}
	if rest.is_empty() {
		"/".to_string()
	} else {
		format!("/{}", rest.join("/"))
	}
}

/// Build the locale-prefixed URL for `path`.
///
/// The locale is normalized to URL form and the path to a leading and a
/// trailing slash; the content store addresses items with trailing
/// slashes. The default locale is only prefixed when
/// [`prefix_default_locale`](LocaleConfig::prefix_default_locale) is set.
///
/// # Example
///
/// ```
/// use imprint_locale_core::{relative_locale_url, LocaleConfig};
///
/// let config = LocaleConfig::default();
/// assert_eq!(relative_locale_url(&config, "fr", "/produits"), "/fr/produits/");
/// assert_eq!(relative_locale_url(&config, "en", "/produits"), "/produits/");
/// ```
pub fn relative_locale_url(config: &LocaleConfig, locale: &str, path: &str) -> String {
	let normalized = normalize_locale(locale);
	let mut clean = if path.starts_with('/') {
		path.to_string()
	} else {
		format!("/{path}")
	};
	if !clean.ends_with('/') {
		clean.push('/');
	}
	if normalized == config.default_locale && !config.prefix_default_locale {
		return clean;
	}
	format!("/{normalized}{clean}")
}

/// A locale paired with the URL serving the current page in that locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleUrl {
	/// Locale in URL form.
	pub locale: String,
	/// Locale-prefixed URL for the page.
	pub url: String,
}

/// URLs for switching the current page between locales.
///
/// The current path is stripped of its locale segment and re-prefixed
/// for each entry of `available`, so per-locale prefix rules apply.
/// Feeds language-switcher menus and `hreflang` alternates.
pub fn alternative_locale_urls(
	config: &LocaleConfig,
	current_path: &str,
	available: &[String],
) -> Vec<LocaleUrl> {
	let base = strip_locale(current_path);
	available
		.iter()
		.map(|locale| LocaleUrl {
			locale: locale.clone(),
			url: relative_locale_url(config, locale, &base),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn prefixed_config() -> LocaleConfig {
		let mut config = LocaleConfig::default();
		config.prefix_default_locale = true;
		config
	}

	#[test]
	fn locale_comes_from_the_first_segment() {
		let config = LocaleConfig::default();
		assert_eq!(locale_from_path(&config, "/fr/produits/"), "fr");
		assert_eq!(locale_from_path(&config, "/nl-BE/over-ons/"), "nl-BE");
		assert_eq!(locale_from_path(&config, "fr/produits"), "fr");
	}

	#[test]
	fn non_locale_first_segment_yields_the_default() {
		let config = LocaleConfig::default();
		assert_eq!(locale_from_path(&config, "/about/"), "en");
		assert_eq!(locale_from_path(&config, "/products/fr/"), "en");
		assert_eq!(locale_from_path(&config, "/"), "en");
		assert_eq!(locale_from_path(&config, ""), "en");
	}

	#[test]
	fn preview_paths_carry_the_locale_one_segment_deeper() {
		let config = LocaleConfig::default();
		assert_eq!(locale_from_path(&config, "/externalpreview/de/about/"), "de");
		assert_eq!(locale_from_path(&config, "/externalpreview/about/"), "en");
		assert_eq!(locale_from_path(&config, "/externalpreview/"), "en");
	}

	#[test]
	fn strip_removes_exactly_one_locale_segment() {
		assert_eq!(strip_locale("/fr/produits/"), "/produits");
		assert_eq!(strip_locale("/fr/produits/page/"), "/produits/page");
		assert_eq!(strip_locale("/nl-BE/over-ons/"), "/over-ons");
	}

	#[test]
	fn strip_leaves_unprefixed_paths_alone() {
		assert_eq!(strip_locale("/about/"), "/about/");
		assert_eq!(strip_locale("/products"), "/products");
	}

	#[test]
	fn strip_collapses_bare_locales_to_root() {
		assert_eq!(strip_locale("/fr/"), "/");
		assert_eq!(strip_locale("/fr"), "/");
		assert_eq!(strip_locale("/"), "/");
		assert_eq!(strip_locale(""), "/");
	}

	#[test]
	fn relative_url_prefixes_non_default_locales() {
		let config = LocaleConfig::default();
		assert_eq!(relative_locale_url(&config, "fr", "/produits"), "/fr/produits/");
		assert_eq!(relative_locale_url(&config, "fr", "produits"), "/fr/produits/");
		assert_eq!(relative_locale_url(&config, "fr", "/produits/"), "/fr/produits/");
	}

	#[test]
	fn relative_url_skips_the_default_prefix_unless_opted_in() {
		let config = LocaleConfig::default();
		assert_eq!(relative_locale_url(&config, "en", "/about"), "/about/");
		assert_eq!(relative_locale_url(&prefixed_config(), "en", "/about"), "/en/about/");
	}

	#[test]
	fn relative_url_normalizes_api_form_locales() {
		let config = LocaleConfig::default();
		assert_eq!(relative_locale_url(&config, "fr_CA", "/produits"), "/fr-CA/produits/");
	}

	#[test]
	fn relative_url_handles_the_root_path() {
		let config = LocaleConfig::default();
		assert_eq!(relative_locale_url(&config, "fr", "/"), "/fr/");
		assert_eq!(relative_locale_url(&config, "fr", ""), "/fr/");
		assert_eq!(relative_locale_url(&config, "en", ""), "/");
	}

	#[test]
	fn alternatives_reprefix_the_current_page() {
		let config = LocaleConfig::default();
		let available = vec!["en".to_string(), "fr".to_string(), "nl-BE".to_string()];
		let urls = alternative_locale_urls(&config, "/fr/produits/", &available);
		assert_eq!(
			urls,
			vec![
				LocaleUrl { locale: "en".to_string(), url: "/produits/".to_string() },
				LocaleUrl { locale: "fr".to_string(), url: "/fr/produits/".to_string() },
				LocaleUrl { locale: "nl-BE".to_string(), url: "/nl-BE/produits/".to_string() },
			]
		);
	}

	#[test]
	fn round_trip_through_strip_and_reprefix() {
		let config = LocaleConfig::default();
		let url = relative_locale_url(&config, "fr", "/produits");
		assert_eq!(relative_locale_url(&config, "fr", &strip_locale(&url)), url);
	}
}
