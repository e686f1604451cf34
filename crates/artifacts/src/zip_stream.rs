// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Zip artifact streams with decompression-bomb guards

use crate::limits::Limits;
use crate::stream::{require, ArtifactEntry, StreamError};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Adapter for zip artifacts.
///
/// Iterates central-directory entries in archive order, skipping
/// directory markers and entries declared larger than the size limit, and
/// stops once the file budget is spent. Both guards are enforced here
/// regardless of what the archive library itself would allow.
pub struct ZipStream<R> {
    archive: ZipArchive<R>,
    limits: Limits,
    next_index: usize,
    yielded: usize,
}

impl<R: Read + Seek> ZipStream<R> {
    /// Wrap an opened stream with the default limits. Fails immediately
    /// if the handle is absent or the central directory cannot be read.
    pub fn new(stream: Option<R>) -> Result<Self, StreamError> {
        Self::with_limits(stream, Limits::default())
    }

    pub fn with_limits(stream: Option<R>, limits: Limits) -> Result<Self, StreamError> {
        let stream = require(stream)?;
        let archive = ZipArchive::new(stream).map_err(|e| StreamError::Corrupt(e.to_string()))?;
        Ok(Self {
            archive,
            limits,
            next_index: 0,
            yielded: 0,
        })
    }
}

impl<R: Read + Seek> Iterator for ZipStream<R> {
    type Item = Result<ArtifactEntry, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.archive.len() {
            if self.yielded >= self.limits.max_files_processed {
                tracing::warn!(
                    limit = self.limits.max_files_processed,
                    remaining = self.archive.len() - self.next_index,
                    "zip file budget spent; remaining entries ignored"
                );
                return None;
            }

            let index = self.next_index;
            self.next_index += 1;

            let mut entry = match self.archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => return Some(Err(StreamError::Corrupt(e.to_string()))),
            };

            // trailing slash, not the entry's type flag: type detection is
            // unreliable across zip writers
            if entry.name().ends_with('/') {
                continue;
            }
            if entry.size() > self.limits.max_decompressed_size {
                tracing::warn!(
                    entry = %entry.name(),
                    declared_size = entry.size(),
                    "skipping zip entry over the decompressed size limit"
                );
                continue;
            }

            let mut content = Vec::new();
            return match entry.read_to_end(&mut content) {
                Ok(_) => {
                    self.yielded += 1;
                    Some(Ok(ArtifactEntry {
                        content,
                        name: None,
                    }))
                }
                Err(e) => Some(Err(e.into())),
            };
        }
        None
    }
}

#[cfg(test)]
#[path = "zip_stream_tests.rs"]
mod tests;
