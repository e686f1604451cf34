// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cache key resolution
//!
//! A literal key passes through verbatim. A file-hash key derives a
//! deterministic digest from the latest revisions touching the declared
//! paths, so two pipelines over the same history agree on the key no
//! matter what order the lookups ran in.

use crate::spec::{CacheKey, CacheSpec};
use serde_json::Value;
use sha1::{Digest, Sha1};

/// Digest segment used when no declared path resolves to a revision.
const DEFAULT_DIGEST: &str = "default";

/// Latest-revision lookup for version-controlled paths.
///
/// Must be a read-only, side-effect-free query; the resolver may call it
/// once per declared path.
pub trait PathHistory {
    /// Most recent revision id that touched `path`, if the path is tracked.
    fn last_commit_for_path(&self, path: &str) -> Option<String>;
}

/// Cache attributes with the key resolved to its final string form.
///
/// Everything except `key` is copied verbatim from the declared spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCache {
    /// `None` when the cache is anonymous (no key declared).
    pub key: Option<String>,
    pub paths: Option<Value>,
    pub policy: Option<Value>,
    pub untracked: Option<Value>,
    pub when: Option<Value>,
    pub unprotect: Option<Value>,
    pub fallback_keys: Option<Value>,
}

/// Resolve every cache entry a job declares.
pub fn resolve_all(specs: &[CacheSpec], history: &impl PathHistory) -> Vec<ResolvedCache> {
    specs.iter().map(|spec| resolve(spec, history)).collect()
}

/// Resolve one cache entry.
pub fn resolve(spec: &CacheSpec, history: &impl PathHistory) -> ResolvedCache {
    ResolvedCache {
        key: spec.key.as_ref().map(|key| resolve_key(key, history)),
        paths: spec.paths.clone(),
        policy: spec.policy.clone(),
        untracked: spec.untracked.clone(),
        when: spec.when.clone(),
        unprotect: spec.unprotect.clone(),
        fallback_keys: spec.fallback_keys.clone(),
    }
}

/// Resolve a declared cache key to its final string.
pub fn resolve_key(key: &CacheKey, history: &impl PathHistory) -> String {
    match key {
        CacheKey::Literal(value) => value.clone(),
        CacheKey::FileHash { prefix, files } => {
            let digest = files_digest(files, history);
            // join only the present segments; a missing prefix must not
            // leave a leading dash
            match prefix.as_deref().filter(|p| !p.is_empty()) {
                Some(prefix) => format!("{prefix}-{digest}"),
                None => digest,
            }
        }
    }
}

/// SHA-1 hex digest over the sorted revision ids of the declared paths,
/// or `"default"` when nothing resolves.
fn files_digest(files: &[String], history: &impl PathHistory) -> String {
    let mut paths: Vec<&str> = files
        .iter()
        .map(String::as_str)
        .filter(|path| !path.is_empty())
        .collect();
    paths.sort_unstable();
    paths.dedup();

    let mut ids: Vec<String> = paths
        .iter()
        .filter_map(|path| history.last_commit_for_path(path))
        .collect();
    // sorted before hashing so the key is independent of lookup order
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return DEFAULT_DIGEST.to_string();
    }
    hex::encode(Sha1::digest(ids.join("-").as_bytes()))
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
