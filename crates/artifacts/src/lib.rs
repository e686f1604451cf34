// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gantry-artifacts: adapters that turn uploaded build-output streams
//! (raw bytes, gzip, zip) into lazy sequences of extracted blobs.
//!
//! Artifacts come from untrusted runners, so the zip adapter enforces its
//! own entry-count and decompressed-size guards independent of the
//! underlying archive library.

pub mod gzip_stream;
pub mod limits;
pub mod raw_stream;
pub mod stream;
pub mod zip_stream;

pub use gzip_stream::GzipStream;
pub use limits::{Limits, MAX_DECOMPRESSED_SIZE, MAX_FILES_PROCESSED};
pub use raw_stream::RawStream;
pub use stream::{ArtifactEntry, StreamError};
pub use zip_stream::ZipStream;
