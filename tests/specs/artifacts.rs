// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact extraction across the three upload formats, the way a
//! pipeline service drives it: pick the adapter for the declared format,
//! drain the blobs, keep going when one artifact is broken.

use gantry_artifacts::{ArtifactEntry, GzipStream, RawStream, StreamError, ZipStream};
use flate2::{Compression, GzBuilder};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

type Stream = Cursor<Vec<u8>>;

fn gzip_member(name: &str, payload: &[u8]) -> Vec<u8> {
    let mut encoder = GzBuilder::new()
        .filename(name)
        .write(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap()
}

fn extract(format: &str, stream: Option<Stream>) -> Result<Vec<ArtifactEntry>, StreamError> {
    match format {
        "gzip" => GzipStream::new(stream)?.collect(),
        "zip" => ZipStream::new(stream)?.collect(),
        _ => RawStream::new(stream)?.collect(),
    }
}

#[test]
fn raw_upload_extracts_as_one_blob() {
    let entries = extract("raw", Some(Cursor::new(b"JUnit XML".to_vec()))).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, b"JUnit XML");
    assert_eq!(entries[0].name.as_deref(), Some("raw"));
}

#[test]
fn concatenated_gzip_upload_extracts_member_by_member() {
    let mut bytes = gzip_member("coverage.json", b"{\"lines\": 93}");
    bytes.extend(gzip_member("summary.txt", b"all green"));

    let entries = extract("gzip", Some(Cursor::new(bytes))).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name.as_deref(), Some("coverage.json"));
    assert_eq!(entries[1].content, b"all green");
}

#[test]
fn zip_upload_extracts_files_and_ignores_directories() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .add_directory("reports", SimpleFileOptions::default())
        .unwrap();
    writer
        .start_file("reports/junit.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"<testsuite/>").unwrap();
    let stream = writer.finish().unwrap();

    let entries = extract("zip", Some(stream)).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, b"<testsuite/>");
}

#[test]
fn one_broken_artifact_does_not_poison_the_next() {
    let broken = extract("gzip", Some(Cursor::new(b"corrupt".to_vec())));
    assert!(broken.is_err());

    let intact = extract("gzip", Some(Cursor::new(gzip_member("log", b"fine"))));
    assert_eq!(intact.unwrap().len(), 1);
}

#[test]
fn missing_upload_is_reported_per_format() {
    for format in ["raw", "gzip", "zip"] {
        assert!(matches!(
            extract(format, None),
            Err(StreamError::Missing)
        ));
    }
}
