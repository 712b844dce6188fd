// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end locale fallback tests.
//!
//! **Purpose**: Validates the whole path a page request takes through the
//! SDK: configuration loaded from a TOML file, locale extracted from the
//! URL, the fallback walk against a content source, and the final
//! serve/redirect/404 decision.
//!
//! These tests drive the public API only, the way a hosting web frontend
//! would.

use std::sync::Arc;

use imprint_resolver::{
	alternative_locale_urls, denormalize_locale, fallback_chain, locale_from_path,
	ContentPayload, FallbackDirective, FallbackType, LocaleConfig, LocaleUrl, Resolution,
	ResolutionRequest, Resolver, StaticContentSource,
};

/// A marketing-site deployment: English default, Canadian French and
/// Flemish pinned to their parent languages.
fn site_config(fallback_type: &str) -> LocaleConfig {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("locales.toml");
	std::fs::write(
		&path,
		format!(
			concat!(
				"default_locale = \"en\"\n",
				"enable_fallback = true\n",
				"generic_fallback = \"en\"\n",
				"fallback_type = \"{}\"\n",
				"prefix_default_locale = false\n",
				"\n",
				"[fallback]\n",
				"\"fr-CA\" = \"fr\"\n",
				"\"nl-BE\" = \"nl\"\n",
			),
			fallback_type
		),
	)
	.unwrap();
	LocaleConfig::from_file(&path).unwrap()
}

/// Content for a site where only en, fr, nl, and de are translated.
fn site_content() -> StaticContentSource {
	let mut source = StaticContentSource::new();
	source.insert("en", "/produits/", "produits-en");
	source.insert("fr", "/fr/produits/", "produits-fr");
	source.insert("nl", "/nl/produits/", "produits-nl");
	source.insert("de", "/de/uber-uns/", "uber-uns-de");
	source.insert("en", "/", "home-en");
	source
}

fn site_resolver(fallback_type: &str) -> Resolver<StaticContentSource> {
	Resolver::new(Arc::new(site_config(fallback_type)), site_content())
}

/// Resolve `path` the way a page handler would: extract the locale from
/// the URL, scope the payload to it, and walk the fallback chain.
async fn resolve_path(resolver: &Resolver<StaticContentSource>, path: &str) -> Resolution {
	let locale = locale_from_path(resolver.config(), path).to_string();
	resolver
		.resolve(
			&ContentPayload::new(denormalize_locale(&locale)),
			ResolutionRequest {
				base: "https://example.com",
				path,
				locale: &locale,
				variation: None,
			},
		)
		.await
}

// ============================================================================
// Rewrite Flow Tests
// ============================================================================

/// A rewrite deployment serves the fallback locale's content at the URL
/// the client asked for; the address bar never changes.
#[tokio::test]
async fn test_rewrite_deployment_serves_fallback_content_in_place() {
	let resolver = site_resolver("rewrite");

	let resolution = resolve_path(&resolver, "/nl-BE/produits/").await;
	assert_eq!(resolution.locale_used, "nl");
	assert_eq!(resolution.content_key(), Some("produits-nl"));
	assert!(!resolution.not_found);

	let resolution = resolve_path(&resolver, "/fr-CA/produits/").await;
	assert_eq!(resolution.locale_used, "fr");
	assert_eq!(resolution.content_key(), Some("produits-fr"));
}

#[tokio::test]
async fn test_translated_pages_never_fall_back() {
	let resolver = site_resolver("rewrite");

	let resolution = resolve_path(&resolver, "/fr/produits/").await;
	assert_eq!(resolution.locale_used, "fr");

	let resolution = resolve_path(&resolver, "/produits/").await;
	assert_eq!(resolution.locale_used, "en");

	let resolution = resolve_path(&resolver, "/").await;
	assert_eq!(resolution.locale_used, "en");
	assert_eq!(resolution.content_key(), Some("home-en"));
}

/// An unmapped locale falls through to the generic fallback, whose
/// content lives at the unprefixed default-locale URL.
#[tokio::test]
async fn test_unmapped_locale_falls_back_to_the_generic_default() {
	let resolver = site_resolver("rewrite");

	let resolution = resolve_path(&resolver, "/ja/produits/").await;
	assert_eq!(resolution.locale_used, "en");
	assert_eq!(resolution.content_key(), Some("produits-en"));
	assert!(!resolution.not_found);
}

// ============================================================================
// Redirect Flow Tests
// ============================================================================

/// A redirect deployment sends the client to the fallback locale's own
/// URL instead of answering in place.
#[tokio::test]
async fn test_redirect_deployment_sends_the_client_to_the_fallback_url() {
	let resolver = site_resolver("redirect");
	assert_eq!(resolver.config().fallback_type, FallbackType::Redirect);

	// The fr-CA page does not exist, so the handler asks for a directive.
	let directive = resolver.directive_for("fr-CA", "/fr-CA/produits/", false);
	let location = match directive {
		FallbackDirective::Redirect { location } => location,
		other => panic!("expected a redirect, got {other:?}"),
	};
	assert_eq!(location, "/fr/produits/");

	// Following the redirect lands on real content, first try.
	let resolution = resolve_path(&resolver, &location).await;
	assert_eq!(resolution.locale_used, "fr");
	assert!(!resolution.not_found);
}

#[tokio::test]
async fn test_redirect_deployment_serves_existing_translations_directly() {
	let resolver = site_resolver("redirect");
	let directive = resolver.directive_for("nl", "/nl/produits/", true);
	assert_eq!(
		directive,
		FallbackDirective::Serve {
			locale: "nl".to_string()
		}
	);
}

// ============================================================================
// Preview Flow Tests
// ============================================================================

/// External-preview URLs nest the locale one segment deeper; the preview
/// handler extracts it, then resolves the underlying page in preview
/// mode.
#[tokio::test]
async fn test_preview_path_locale_resolves_the_underlying_page() {
	let resolver = site_resolver("rewrite");
	let preview_path = "/externalpreview/de/uber-uns/";

	let locale = locale_from_path(resolver.config(), preview_path).to_string();
	assert_eq!(locale, "de");

	let page_path = preview_path.strip_prefix("/externalpreview").unwrap();
	let resolution = resolver
		.resolve(
			&ContentPayload::new(denormalize_locale(&locale)).with_preview(true),
			ResolutionRequest {
				base: "https://example.com",
				path: page_path,
				locale: &locale,
				variation: None,
			},
		)
		.await;

	assert_eq!(resolution.locale_used, "de");
	assert_eq!(resolution.content_key(), Some("uber-uns-de"));
}

// ============================================================================
// Not Found Tests
// ============================================================================

/// A page missing in every chain locale is a 404, not an error.
#[tokio::test]
async fn test_page_missing_everywhere_reports_not_found() {
	let resolver = site_resolver("rewrite");

	let resolution = resolve_path(&resolver, "/fr-CA/carrieres/").await;
	assert!(resolution.not_found);
	assert_eq!(resolution.locale_used, "fr-CA");
	assert!(resolution.content.is_none());

	// The default locale has no further fallback to offer.
	assert_eq!(
		resolver.directive_for("en", "/carrieres/", false),
		FallbackDirective::NotFound
	);
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// The TOML file is the single source of truth for chain shapes.
#[test]
fn test_config_file_drives_chain_computation() {
	let config = site_config("rewrite");

	assert_eq!(fallback_chain(&config, "fr-CA"), vec!["fr", "en"]);
	assert_eq!(fallback_chain(&config, "nl-BE"), vec!["nl", "en"]);
	assert_eq!(fallback_chain(&config, "de"), vec!["en"]);
	assert!(fallback_chain(&config, "en").is_empty());
}

#[test]
fn test_locale_extraction_matches_routing() {
	let config = site_config("rewrite");

	assert_eq!(locale_from_path(&config, "/fr-CA/produits/"), "fr-CA");
	assert_eq!(locale_from_path(&config, "/produits/"), "en");
	assert_eq!(locale_from_path(&config, "/externalpreview/de/uber-uns/"), "de");
}

// ============================================================================
// Language Switcher Tests
// ============================================================================

/// Alternate URLs re-prefix the current page for every offered locale,
/// with the default locale left unprefixed.
#[test]
fn test_language_switcher_urls_cover_all_locales() {
	let config = site_config("rewrite");
	let available = vec![
		"en".to_string(),
		"fr".to_string(),
		"fr-CA".to_string(),
		"nl".to_string(),
	];

	let urls = alternative_locale_urls(&config, "/fr/produits/", &available);
	assert_eq!(
		urls,
		vec![
			LocaleUrl {
				locale: "en".to_string(),
				url: "/produits/".to_string()
			},
			LocaleUrl {
				locale: "fr".to_string(),
				url: "/fr/produits/".to_string()
			},
			LocaleUrl {
				locale: "fr-CA".to_string(),
				url: "/fr-CA/produits/".to_string()
			},
			LocaleUrl {
				locale: "nl".to_string(),
				url: "/nl/produits/".to_string()
			},
		]
	);
}
