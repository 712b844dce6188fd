// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core locale types for the Imprint content delivery toolkit.
//!
//! This crate provides the pure pieces of locale handling for a
//! CMS-backed, multi-locale site: locale code surface forms, URL path
//! handling, the deployment-wide [`LocaleConfig`], fallback-chain
//! computation, and the fallback presentation decision. The asynchronous
//! resolution loop that drives a content source with these rules lives
//! in the `imprint-resolver` SDK.
//!
//! # Overview
//!
//! Content is addressed by `(locale, path)` and not every page exists in
//! every locale. When a page is missing in the requested locale the site
//! should serve a sensible substitute instead of a 404:
//! - An explicitly configured stand-in first (`fr-CA -> fr`)
//! - The generic fallback after that (`de -> en`)
//! - Nothing at all for the default locale, which has nowhere left to go
//!
//! Everything here is synchronous, allocation-light string work; nothing
//! performs I/O except [`LocaleConfig::from_file`] and
//! [`LocaleConfig::load`].
//!
//! # Example
//!
//! ```
//! use imprint_locale_core::{fallback_chain, locale_from_path, FallbackMap, LocaleConfig};
//!
//! let mut config = LocaleConfig::default();
//! config.fallback = FallbackMap::from_pairs([("fr-CA", "fr"), ("nl-BE", "nl")]);
//!
//! assert_eq!(locale_from_path(&config, "/fr-CA/produits/"), "fr-CA");
//! assert_eq!(fallback_chain(&config, "fr-CA"), vec!["fr", "en"]);
//! assert_eq!(fallback_chain(&config, "de"), vec!["en"]);
//! ```

pub mod chain;
pub mod code;
pub mod config;
pub mod error;
pub mod path;
pub mod strategy;

pub use chain::{fallback_chain, fallback_locale};
pub use code::{denormalize_locale, is_valid_locale, normalize_locale};
pub use config::{
	FallbackMap, FallbackType, LocaleConfig, DEFAULT_LOCALE_ENV, ENABLE_FALLBACK_ENV,
	FALLBACK_TYPE_ENV, GENERIC_FALLBACK_ENV, PREFIX_DEFAULT_LOCALE_ENV,
};
pub use error::{LocaleError, Result};
pub use path::{
	alternative_locale_urls, locale_from_path, relative_locale_url, strip_locale, LocaleUrl,
	PREVIEW_PATH_SEGMENT,
};
pub use strategy::{
	apply_fallback_strategy, fallback_strategy, FallbackDirective, FallbackStrategy,
};
