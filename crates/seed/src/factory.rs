// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job expansion: one declared job into concrete, addressable instances.
//!
//! Expansion is pure: the same input always yields the byte-identical
//! instance sequence, because downstream systems key off instance names
//! and ordering in pipeline graphs.

use crate::cartesian::product;
use crate::instance::ExpandedInstance;
use crate::spec::Expansion;
use indexmap::IndexMap;
use serde_json::Value;

/// Expand a job's `parallel` config into concrete instances.
///
/// Unrecognized shapes yield no instances — most jobs have no expansion
/// and that is not an error.
pub fn expand(job_name: &str, raw_config: &Value) -> Vec<ExpandedInstance> {
    match Expansion::from_config(raw_config) {
        Some(expansion) => expand_spec(job_name, &expansion),
        None => Vec::new(),
    }
}

/// Expand an already-recognized expansion spec.
pub fn expand_spec(job_name: &str, expansion: &Expansion) -> Vec<ExpandedInstance> {
    let instances = match expansion {
        Expansion::Count(total) => expand_count(job_name, *total),
        Expansion::Matrix(sets) => expand_matrix(job_name, sets),
    };
    tracing::debug!(
        job = job_name,
        kind = %expansion,
        instances = instances.len(),
        "expanded job"
    );
    instances
}

fn expand_count(job_name: &str, total: i64) -> Vec<ExpandedInstance> {
    // a zero-width (or negative) axis is valid and means "no instances"
    let Ok(total) = u32::try_from(total) else {
        return Vec::new();
    };
    (1..=total)
        .map(|index| ExpandedInstance {
            name: format!("{job_name} {index}/{total}"),
            instance_index: index,
            parallel_total: total,
            instance_variables: IndexMap::new(),
        })
        .collect()
}

fn expand_matrix(
    job_name: &str,
    sets: &[IndexMap<String, Vec<Value>>],
) -> Vec<ExpandedInstance> {
    let combinations: Vec<IndexMap<String, Value>> = sets
        .iter()
        .flat_map(|set| {
            let names: Vec<String> = set.keys().cloned().collect();
            let lists: Vec<Vec<Value>> = set.values().cloned().collect();
            product(&lists).into_iter().map(move |combo| {
                names.iter().cloned().zip(combo).collect::<IndexMap<_, _>>()
            })
        })
        .collect();

    let total = combinations.len() as u32;
    combinations
        .into_iter()
        .zip(1..)
        .map(|(variables, index)| ExpandedInstance {
            name: matrix_name(job_name, &variables),
            instance_index: index,
            parallel_total: total,
            instance_variables: variables,
        })
        .collect()
}

/// `"job: [a, b]"` with values in the variable set's key order.
///
/// Null and empty-string values are dropped from the label but stay in
/// the instance's variable map.
fn matrix_name(job_name: &str, variables: &IndexMap<String, Value>) -> String {
    let shown: Vec<String> = variables.values().filter_map(display_value).collect();
    format!("{job_name}: [{}]", shown.join(", "))
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
