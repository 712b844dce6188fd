// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The content-source seam.
//!
//! The resolver talks to the CMS delivery API through [`ContentSource`],
//! an async interface the hosting application binds to its own transport.
//! The types here mirror the delivery API's wire shapes: queries address
//! content by `(locale, path)`, and responses wrap an optional item whose
//! `_metadata.key` decides whether anything was actually found.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Locale-scoped query payload.
///
/// Travels with every query of one resolution attempt. The resolver
/// clones it per fallback candidate with the candidate's API-form locale
/// swapped in; everything else is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPayload {
	/// Locale the query is scoped to, content-API form (`fr_CA`).
	pub locale: String,
	/// Ask the source for draft content where it supports preview.
	pub preview: bool,
}

impl ContentPayload {
	/// Payload for published content in `locale` (API form).
	pub fn new(locale: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
			preview: false,
		}
	}

	/// Toggle preview mode.
	pub fn with_preview(mut self, preview: bool) -> Self {
		self.preview = preview;
		self
	}
}

/// Per-query path variables.
///
/// The delivery API tolerates both trailing-slash spellings of a path,
/// so each query carries the path with and without its trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathQuery {
	/// Site base URL.
	pub base: String,
	/// Request path, trailing slash included.
	pub url: String,
	/// The same path without its trailing slash.
	pub url_no_slash: String,
	/// Experimentation variation key, when one applies.
	pub variation: Option<String>,
}

impl PathQuery {
	/// Build the query variables for `path`, deriving the no-slash form.
	pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
		let url: String = path.into();
		let url_no_slash = url.strip_suffix('/').unwrap_or(&url).to_string();
		Self {
			base: base.into(),
			url,
			url_no_slash,
			variation: None,
		}
	}

	/// Attach an experimentation variation key.
	pub fn with_variation(mut self, variation: impl Into<String>) -> Self {
		self.variation = Some(variation.into());
		self
	}
}

/// Identity metadata the CMS attaches to a content item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
	/// Content identity key; empty or missing means nothing was found.
	#[serde(default)]
	pub key: Option<String>,
	/// Content version identifier.
	#[serde(default)]
	pub version: Option<String>,
	/// Variation that produced this item, set on experiment variants.
	#[serde(default)]
	pub variation: Option<String>,
	/// Locale the item is actually stored under, API form.
	#[serde(default)]
	pub locale: Option<String>,
}

/// A single content item.
///
/// Only `_metadata` is modeled; the rest of the item is kept verbatim
/// for the host to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
	/// Identity metadata.
	#[serde(rename = "_metadata", default)]
	pub metadata: Option<ContentMetadata>,
	/// Remaining item fields, untouched.
	#[serde(flatten)]
	pub fields: serde_json::Map<String, serde_json::Value>,
}

/// The `_Content` envelope of a delivery-API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentEnvelope {
	/// The item matching the query, when one exists.
	#[serde(default)]
	pub item: Option<ContentItem>,
}

/// A raw delivery-API response.
///
/// Presence of content is a three-level affair on the wire: the envelope
/// can be null, the item can be missing, and the metadata key can be
/// empty. [`ContentResponse::has_content`] collapses all of that into
/// one answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
	/// The content envelope; `None` models an explicit `"_Content": null`.
	#[serde(rename = "_Content", default)]
	pub content: Option<ContentEnvelope>,
}

impl ContentResponse {
	/// A response carrying no content at all.
	pub fn empty() -> Self {
		Self::default()
	}

	/// The item's identity key, when present and non-empty.
	pub fn content_key(&self) -> Option<&str> {
		self.content
			.as_ref()?
			.item
			.as_ref()?
			.metadata
			.as_ref()?
			.key
			.as_deref()
			.filter(|key| !key.is_empty())
	}

	/// Whether this response carries an actual content item.
	pub fn has_content(&self) -> bool {
		self.content_key().is_some()
	}

	/// The variation recorded on the item, when present and non-empty.
	pub fn variation(&self) -> Option<&str> {
		self.content
			.as_ref()?
			.item
			.as_ref()?
			.metadata
			.as_ref()?
			.variation
			.as_deref()
			.filter(|variation| !variation.is_empty())
	}
}

/// Asynchronous interface to the CMS delivery API.
///
/// Implementations run one `(locale, path)` lookup per call. The
/// resolver issues calls strictly sequentially and treats every error as
/// "no content for this candidate", so implementations should surface
/// real failures as [`SourceError`](crate::SourceError) values and own
/// their own timeout and retry policy.
#[async_trait]
pub trait ContentSource: Send + Sync {
	/// Look up the content item addressed by `query` in the locale
	/// carried by `payload`.
	async fn content_by_path(
		&self,
		payload: &ContentPayload,
		query: &PathQuery,
	) -> Result<ContentResponse>;
}

/// Type alias for a shared content source.
pub type SharedContentSource = Arc<dyn ContentSource>;

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Arc<S> {
	async fn content_by_path(
		&self,
		payload: &ContentPayload,
		query: &PathQuery,
	) -> Result<ContentResponse> {
		(**self).content_by_path(payload, query).await
	}
}

/// In-memory content source.
///
/// Maps `(API-form locale, path, variation)` to canned responses, with
/// trailing slashes on paths ignored. Useful for tests and for sites
/// whose content is fixed at build time.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
	entries: HashMap<(String, String, Option<String>), ContentResponse>,
}

impl StaticContentSource {
	/// An empty source; every query answers "no content".
	pub fn new() -> Self {
		Self::default()
	}

	/// Register published content for `(locale, path)`.
	///
	/// `locale` is the API form (`fr_CA`); `key` becomes the item's
	/// metadata key.
	pub fn insert(
		&mut self,
		locale: impl Into<String>,
		path: impl Into<String>,
		key: impl Into<String>,
	) {
		let locale = locale.into();
		let response = canned_response(key.into(), locale.clone(), None);
		self.entries
			.insert((locale, normalize_path(path.into()), None), response);
	}

	/// Register experiment-variant content for `(locale, path, variation)`.
	pub fn insert_variant(
		&mut self,
		locale: impl Into<String>,
		path: impl Into<String>,
		variation: impl Into<String>,
		key: impl Into<String>,
	) {
		let locale = locale.into();
		let variation = variation.into();
		let response = canned_response(key.into(), locale.clone(), Some(variation.clone()));
		self.entries
			.insert((locale, normalize_path(path.into()), Some(variation)), response);
	}
}

fn normalize_path(path: String) -> String {
	path.strip_suffix('/').unwrap_or(&path).to_string()
}

fn canned_response(key: String, locale: String, variation: Option<String>) -> ContentResponse {
	ContentResponse {
		content: Some(ContentEnvelope {
			item: Some(ContentItem {
				metadata: Some(ContentMetadata {
					key: Some(key),
					version: None,
					variation,
					locale: Some(locale),
				}),
				fields: serde_json::Map::new(),
			}),
		}),
	}
}

#[async_trait]
impl ContentSource for StaticContentSource {
	async fn content_by_path(
		&self,
		payload: &ContentPayload,
		query: &PathQuery,
	) -> Result<ContentResponse> {
		let key = (
			payload.locale.clone(),
			query.url_no_slash.clone(),
			query.variation.clone(),
		);
		Ok(self.entries.get(&key).cloned().unwrap_or_default())
	}
}
