// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gzip artifact streams, including multi-member concatenations

use crate::stream::{require, ArtifactEntry, StreamError};
use flate2::bufread::GzDecoder;
use std::io::{Read, Seek, SeekFrom};

/// Adapter for gzip artifacts.
///
/// Yields one blob per gzip member, so concatenated uploads extract as
/// separate files. Each entry carries the original filename embedded in
/// its member header, when the writer recorded one.
pub struct GzipStream {
    buffer: Vec<u8>,
    cursor: usize,
}

impl GzipStream {
    /// Wrap an opened stream, rewound to the start. Fails immediately if
    /// the handle is absent.
    pub fn new<R: Read + Seek>(stream: Option<R>) -> Result<Self, StreamError> {
        let mut stream = require(stream)?;
        stream.seek(SeekFrom::Start(0))?;
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer)?;
        Ok(Self { buffer, cursor: 0 })
    }
}

impl Iterator for GzipStream {
    type Item = Result<ArtifactEntry, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.buffer.len() {
            return None;
        }

        // the decoder is scoped to this member and dropped on every exit path
        let mut decoder = GzDecoder::new(&self.buffer[self.cursor..]);
        let mut content = Vec::new();
        if let Err(e) = decoder.read_to_end(&mut content) {
            // no way to find the next member boundary in a broken stream
            self.cursor = self.buffer.len();
            return Some(Err(StreamError::Corrupt(e.to_string())));
        }

        let name = decoder
            .header()
            .and_then(|header| header.filename())
            .map(|raw| String::from_utf8_lossy(raw).into_owned());

        // whatever the decoder left unread is the start of the next member
        let unread = decoder.into_inner().len();
        self.cursor = self.buffer.len() - unread;

        Some(Ok(ArtifactEntry { content, name }))
    }
}

#[cfg(test)]
#[path = "gzip_stream_tests.rs"]
mod tests;
