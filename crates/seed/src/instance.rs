// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized job instances

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One concrete job produced by expansion.
///
/// Created once per expansion call and never mutated after; the pipeline
/// compiler that requested the expansion owns the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedInstance {
    /// Derived display name (`"job 2/4"`, `"job: [a, b]"`).
    pub name: String,
    /// 1-based position within the expansion.
    pub instance_index: u32,
    /// Number of sibling instances, including this one.
    pub parallel_total: u32,
    /// Matrix variable assignment; empty for counted expansion.
    pub instance_variables: IndexMap<String, Value>,
}
