// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale fallback resolution SDK for Imprint.
//!
//! This crate decides which locale's content a page request actually
//! gets. A CMS-backed site addresses content by `(locale, path)`, and
//! not every page is translated into every locale; the resolver queries
//! a [`ContentSource`] for the requested locale, then walks the
//! configured fallback chain until something answers, and tells the
//! caller whether to serve, rewrite, redirect, or 404.
//!
//! # Features
//!
//! - **Pluggable transport**: bind [`ContentSource`] to any delivery
//!   API client; an in-memory [`StaticContentSource`] ships for tests
//!   and fixtures
//! - **Sequential walk**: one query per candidate, first hit wins, no
//!   speculative fetches
//! - **Failure containment**: source errors are logged and treated as
//!   misses, so a flaky upstream costs a fallback or a 404, never an
//!   error page
//! - **Experiment variants**: variant content is attempted with the
//!   same fallback walk and falls back to the default content
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use imprint_resolver::{
//!     ContentPayload, FallbackMap, LocaleConfig, ResolutionRequest, Resolver,
//!     StaticContentSource,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut config = LocaleConfig::default();
//! config.fallback = FallbackMap::from_pairs([("fr-CA", "fr")]);
//!
//! let mut source = StaticContentSource::new();
//! source.insert("fr", "/fr/produits/", "produits");
//!
//! let resolver = Resolver::new(Arc::new(config), source);
//! let resolution = resolver
//!     .resolve(
//!         &ContentPayload::new("fr_CA"),
//!         ResolutionRequest {
//!             base: "https://example.com",
//!             path: "/fr-CA/produits/",
//!             locale: "fr-CA",
//!             variation: None,
//!         },
//!     )
//!     .await;
//!
//! // No fr-CA translation exists, so the fr page answers.
//! assert_eq!(resolution.locale_used, "fr");
//! assert_eq!(resolution.content_key(), Some("produits"));
//! # }
//! ```

mod error;
mod resolve;
mod source;

pub use error::{Result, SourceError};
pub use resolve::{Resolution, ResolutionRequest, Resolver, VariantResolution};
pub use source::{
	ContentEnvelope, ContentItem, ContentMetadata, ContentPayload, ContentResponse,
	ContentSource, PathQuery, SharedContentSource, StaticContentSource,
};

// Re-export core types for convenience
pub use imprint_locale_core::{
	alternative_locale_urls, apply_fallback_strategy, denormalize_locale, fallback_chain,
	fallback_locale, is_valid_locale, locale_from_path, normalize_locale, relative_locale_url,
	strip_locale, FallbackDirective, FallbackMap, FallbackType, LocaleConfig, LocaleUrl,
};
