// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for content sources.

use thiserror::Error;

/// Result type for content-source calls.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors a content source can report for a single query.
///
/// The resolver never propagates these. Every variant is logged and then
/// treated as "no content for this candidate", so a flaky upstream
/// degrades a page to its fallback or a 404 rather than an error page.
#[derive(Debug, Error)]
pub enum SourceError {
	/// Network-level failure reaching the content API.
	#[error("transport error: {0}")]
	Transport(String),

	/// The query ran out of time.
	#[error("content query timed out")]
	Timeout,

	/// The content API answered with a non-success status.
	#[error("content API error: {status} - {message}")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Response body or status text.
		message: String,
	},

	/// The response body could not be understood.
	#[error("invalid response from content API: {0}")]
	InvalidResponse(String),
}
