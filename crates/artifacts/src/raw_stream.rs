// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw (uncompressed) artifact streams

use crate::stream::{require, ArtifactEntry, StreamError};
use std::io::{Read, Seek, SeekFrom};

/// Adapter for artifacts uploaded as plain bytes: the whole stream is one
/// blob, named `"raw"`.
pub struct RawStream<R> {
    stream: R,
    consumed: bool,
}

impl<R: Read + Seek> RawStream<R> {
    /// Wrap an opened stream, rewound to the start. Fails immediately if
    /// the handle is absent.
    pub fn new(stream: Option<R>) -> Result<Self, StreamError> {
        let mut stream = require(stream)?;
        stream.seek(SeekFrom::Start(0))?;
        Ok(Self {
            stream,
            consumed: false,
        })
    }
}

impl<R: Read + Seek> Iterator for RawStream<R> {
    type Item = Result<ArtifactEntry, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.consumed {
            return None;
        }
        self.consumed = true;

        let mut content = Vec::new();
        match self.stream.read_to_end(&mut content) {
            // an empty stream has no blob at all
            Ok(0) => None,
            Ok(_) => Some(Ok(ArtifactEntry {
                content,
                name: Some("raw".to_string()),
            })),
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
#[path = "raw_stream_tests.rs"]
mod tests;
