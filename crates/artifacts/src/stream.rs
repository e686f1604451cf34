// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Common artifact stream contract

use thiserror::Error;

/// One extracted blob: content plus whatever name the archive carried for it.
///
/// Transient: produced and consumed within one extraction pass, never
/// persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub content: Vec<u8>,
    pub name: Option<String>,
}

/// Errors reading an uploaded artifact stream.
///
/// Fatal to this one artifact's extraction only; the caller decides
/// whether to skip the artifact or fail the pipeline. No retries happen
/// at this layer.
#[derive(Debug, Error)]
pub enum StreamError {
    /// No stream handle was supplied.
    #[error("invalid stream: stream is required")]
    Missing,
    #[error("invalid stream: {0}")]
    Io(#[from] std::io::Error),
    /// The archive structure could not be decoded.
    #[error("invalid stream: {0}")]
    Corrupt(String),
}

pub(crate) fn require<R>(stream: Option<R>) -> Result<R, StreamError> {
    stream.ok_or(StreamError::Missing)
}
