// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fallback-aware content resolution.
//!
//! One resolution answers one page request: try the requested locale at
//! the path exactly as received, then walk the fallback chain, querying
//! each candidate at the path re-prefixed for that candidate, until
//! something answers. Queries run strictly sequentially; the first hit
//! wins, and source errors count as misses so a flaky upstream can cost
//! at worst a fallback or a 404.

use std::sync::Arc;

use imprint_locale_core::{
	apply_fallback_strategy, denormalize_locale, fallback_chain, relative_locale_url,
	strip_locale, FallbackDirective, LocaleConfig,
};
use tracing::{debug, instrument, warn};

use crate::source::{ContentPayload, ContentResponse, ContentSource, PathQuery};

/// One page request's input to the resolver.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
	/// Site base URL, forwarded to the source.
	pub base: &'a str,
	/// Request path as received, locale prefix and all.
	pub path: &'a str,
	/// Locale the client asked for, URL form.
	pub locale: &'a str,
	/// Experimentation variation key, when one was decided upstream.
	pub variation: Option<&'a str>,
}

/// Outcome of a fallback-aware resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	/// The raw response that satisfied the request, when any did.
	pub content: Option<ContentResponse>,
	/// Locale that actually produced the content, URL form. The
	/// requested locale when nothing was found.
	pub locale_used: String,
	/// The chain is exhausted; the caller should answer 404.
	pub not_found: bool,
}

impl Resolution {
	/// Whether a content item with a non-empty key was found.
	pub fn has_content(&self) -> bool {
		self.content
			.as_ref()
			.is_some_and(ContentResponse::has_content)
	}

	/// The winning item's identity key.
	pub fn content_key(&self) -> Option<&str> {
		self.content.as_ref().and_then(ContentResponse::content_key)
	}

	/// Whether the winning item is experiment-variant content.
	pub fn is_variant_content(&self) -> bool {
		self.content
			.as_ref()
			.and_then(ContentResponse::variation)
			.is_some()
	}
}

/// Outcome of an experiment-variant resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantResolution {
	/// The resolution actually served: the variant attempt when it had
	/// content, the supplied default otherwise.
	pub resolution: Resolution,
	/// Variation key that was attempted.
	pub variant_key: String,
	/// Whether variant content is what ended up being served.
	pub is_variant_content: bool,
}

/// Fallback-aware resolver over a content source.
///
/// Holds the deployment's immutable [`LocaleConfig`] and a
/// [`ContentSource`]. Every resolution is request-scoped; the resolver
/// keeps no per-request state and can be shared freely.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
	config: Arc<LocaleConfig>,
	source: S,
}

impl<S: ContentSource> Resolver<S> {
	/// Create a resolver from a shared config and a content source.
	pub fn new(config: Arc<LocaleConfig>, source: S) -> Self {
		Self { config, source }
	}

	/// The configuration this resolver was built with.
	pub fn config(&self) -> &LocaleConfig {
		&self.config
	}

	/// Resolve content for a request, walking the fallback chain.
	///
	/// The requested locale is tried first, at the path exactly as
	/// received. On a miss, each chain candidate is tried at the path
	/// re-prefixed for that candidate, stopping at the first response
	/// that carries content. An exhausted chain yields
	/// [`Resolution::not_found`]; resolution itself never fails.
	#[instrument(skip(self, payload, request), fields(locale = %request.locale, path = %request.path))]
	pub async fn resolve(
		&self,
		payload: &ContentPayload,
		request: ResolutionRequest<'_>,
	) -> Resolution {
		let query = Self::query_for(request.base, request.path, request.variation);
		if let Some(response) = self.try_query(payload, &query).await {
			if response.has_content() {
				debug!(key = ?response.content_key(), "content found in requested locale");
				return Resolution {
					content: Some(response),
					locale_used: request.locale.to_string(),
					not_found: false,
				};
			}
		}

		let chain = fallback_chain(&self.config, request.locale);
		let base_path = strip_locale(request.path);
		debug!(chain = ?chain, "requested locale has no content, walking fallback chain");

		for candidate in chain {
			let candidate_path = relative_locale_url(&self.config, &candidate, &base_path);
			let candidate_payload = ContentPayload {
				locale: denormalize_locale(&candidate),
				..payload.clone()
			};
			let query = Self::query_for(request.base, &candidate_path, request.variation);

			if let Some(response) = self.try_query(&candidate_payload, &query).await {
				if response.has_content() {
					debug!(
						fallback = %candidate,
						key = ?response.content_key(),
						"fallback candidate satisfied the request"
					);
					return Resolution {
						content: Some(response),
						locale_used: candidate,
						not_found: false,
					};
				}
			}
		}

		debug!("fallback chain exhausted");
		Resolution {
			content: None,
			locale_used: request.locale.to_string(),
			not_found: true,
		}
	}

	/// Try experiment-variant content, keeping `default` when the
	/// variant has nothing to show.
	///
	/// `variant_key` comes from the host's experimentation layer, and
	/// `default` is expected to be the plain resolution of the same
	/// request. The variant attempt runs the same fallback walk as
	/// [`resolve`](Resolver::resolve) with the variation key attached to
	/// every query.
	pub async fn resolve_variant(
		&self,
		payload: &ContentPayload,
		request: ResolutionRequest<'_>,
		variant_key: &str,
		default: Resolution,
	) -> VariantResolution {
		let variant_request = ResolutionRequest {
			variation: Some(variant_key),
			..request
		};
		let attempt = self.resolve(payload, variant_request).await;

		if attempt.has_content() {
			let is_variant_content = attempt.is_variant_content();
			VariantResolution {
				resolution: attempt,
				variant_key: variant_key.to_string(),
				is_variant_content,
			}
		} else {
			debug!(variant = %variant_key, "no variant content, keeping the default resolution");
			VariantResolution {
				resolution: default,
				variant_key: variant_key.to_string(),
				is_variant_content: false,
			}
		}
	}

	/// Decide redirect, rewrite, or 404 for a request under the
	/// configured presentation strategy.
	pub fn directive_for(
		&self,
		requested_locale: &str,
		path: &str,
		has_content: bool,
	) -> FallbackDirective {
		apply_fallback_strategy(&self.config, requested_locale, path, has_content)
	}

	/// One source call; errors are logged and become "no content".
	async fn try_query(
		&self,
		payload: &ContentPayload,
		query: &PathQuery,
	) -> Option<ContentResponse> {
		match self.source.content_by_path(payload, query).await {
			Ok(response) => Some(response),
			Err(error) => {
				warn!(
					locale = %payload.locale,
					url = %query.url,
					error = %error,
					"content query failed, treating as not found"
				);
				None
			}
		}
	}

	fn query_for(base: &str, path: &str, variation: Option<&str>) -> PathQuery {
		let mut query = PathQuery::new(base, path);
		if let Some(variation) = variation {
			query = query.with_variation(variation);
		}
		query
	}
}


#[cfg(test)]
mod proptests {
	use super::tests::{test_config, RecordingSource};
	use super::*;
	use crate::source::StaticContentSource;
	use imprint_locale_core::FallbackMap;
	use proptest::prelude::*;

	proptest! {
		// One query for the requested locale plus one per chain
		// candidate, no matter how the override map is shaped.
		#[test]
		fn query_count_is_one_plus_chain_length(
			overrides in prop::collection::hash_map("[a-z]{2}", "[a-z]{2}", 0..5),
			locale in "[a-z]{2}",
		) {
			let mut config = test_config();
			config.fallback = FallbackMap::from_pairs(overrides);
			let chain_length = fallback_chain(&config, &locale).len();

			let source = Arc::new(RecordingSource::new(StaticContentSource::new()));
			let resolver = Resolver::new(Arc::new(config), Arc::clone(&source));
			let path = format!("/{locale}/page/");
			let resolution = tokio_test::block_on(resolver.resolve(
				&ContentPayload::new(denormalize_locale(&locale)),
				ResolutionRequest {
					base: "https://example.com",
					path: &path,
					locale: &locale,
					variation: None,
				},
			));

			assert!(resolution.not_found);
			assert_eq!(source.queries().len(), 1 + chain_length);
		}

		// Wherever the walk ends up, the answer is coherent: either
		// content with the locale that produced it, or a clean 404.
		#[test]
		fn resolution_outcomes_are_coherent(
			content_locales in prop::collection::vec("[a-z]{2}", 0..4),
			locale in "[a-z]{2}",
		) {
			let config = test_config();
			let mut content = StaticContentSource::new();
			for content_locale in &content_locales {
				let path = relative_locale_url(&config, content_locale, "/page");
				content.insert(denormalize_locale(content_locale), path, format!("page-{content_locale}"));
			}

			let resolver = Resolver::new(Arc::new(config), content);
			let path = format!("/{locale}/page/");
			let resolution = tokio_test::block_on(resolver.resolve(
				&ContentPayload::new(denormalize_locale(&locale)),
				ResolutionRequest {
					base: "https://example.com",
					path: &path,
					locale: &locale,
					variation: None,
				},
			));

			if resolution.not_found {
				assert!(resolution.content.is_none());
				assert_eq!(resolution.locale_used, locale);
			} else {
				assert!(resolution.has_content());
			}
		}
	}
}
