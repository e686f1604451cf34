// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource group binding at seed time
//!
//! A job may name a resource group (a mutual-exclusion bucket) by key
//! template. Binding expands the template against the job's variables and
//! asks the registry for the row, creating it if needed. Failure to bind
//! is soft: the job seeds without a resource group.

use crate::template;
use gantry_core::flags::FeatureFlags;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Feature toggle gating resource-group binding.
pub const RESOURCE_GROUPS_FLAG: &str = "resource_groups";

/// Handle to a persisted resource group row.
///
/// A shared, durable registry entry: instances across many pipelines may
/// hold handles to the same row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroupHandle {
    pub key: String,
}

/// Named mutual-exclusion registry.
///
/// `find_or_create` must be atomic and idempotent by key — repeated calls
/// with one key refer to one row. How that is guaranteed (unique
/// constraint plus retry, a lock) is the implementor's concern. `None`
/// means creation was refused, a soft failure.
pub trait ResourceGroupRegistry {
    fn find_or_create(&self, key: &str) -> Option<ResourceGroupHandle>;
}

/// Resolve a job's resource-group key template to a registry handle.
///
/// Returns `None` when the template is empty or absent, the feature is
/// off, or the registry refuses the key. The variable map is only built
/// when the template actually contains a placeholder.
pub fn bind<V>(
    key_template: Option<&str>,
    variables: V,
    registry: &impl ResourceGroupRegistry,
    flags: &impl FeatureFlags,
) -> Option<ResourceGroupHandle>
where
    V: FnOnce() -> HashMap<String, String>,
{
    let template = key_template.filter(|t| !t.is_empty())?;
    if !flags.enabled(RESOURCE_GROUPS_FLAG) {
        return None;
    }

    let key = if template.contains('$') {
        template::interpolate(template, &variables())
    } else {
        template.to_string()
    };

    let handle = registry.find_or_create(&key);
    if handle.is_none() {
        tracing::warn!(key = %key, "resource group creation refused; seeding without one");
    }
    handle
}

/// In-memory registry for tests and single-process embedding.
///
/// Find-or-create runs under one lock, which is the whole atomicity story
/// at this scale.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    keys: Mutex<HashSet<String>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct groups created so far.
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

impl ResourceGroupRegistry for InMemoryRegistry {
    fn find_or_create(&self, key: &str) -> Option<ResourceGroupHandle> {
        let mut keys = self.keys.lock();
        keys.insert(key.to_string());
        Some(ResourceGroupHandle {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "resource_group_tests.rs"]
mod tests;
