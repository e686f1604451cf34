// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end job materialization: one declared job expanded into
//! instances, each with its cache key resolved and its resource group
//! bound.

use gantry_core::flags::AllEnabled;
use gantry_seed::{cache, factory, resource_group, InMemoryRegistry, JobSpec, PathHistory};
use serde_json::json;
use std::collections::HashMap;

/// Repository history pinned to fixed revisions.
struct PinnedHistory;

impl PathHistory for PinnedHistory {
    fn last_commit_for_path(&self, path: &str) -> Option<String> {
        match path {
            "Gemfile.lock" => Some("abc".to_string()),
            "yarn.lock" => Some("def".to_string()),
            _ => None,
        }
    }
}

// sha1("abc-def")
const DEPS_DIGEST: &str = "e2a41f90b2e59f1b35df9f6f500188988639f8de";

fn instance_vars(instance: &gantry_seed::ExpandedInstance) -> HashMap<String, String> {
    instance
        .instance_variables
        .iter()
        .filter_map(|(name, value)| {
            value.as_str().map(|v| (name.clone(), v.to_string()))
        })
        .collect()
}

#[test]
fn materializes_a_matrix_job_with_cache_and_resource_groups() {
    let config = json!({
        "script": ["./deploy.sh"],
        "parallel": { "matrix": [{ "PROVIDER": ["aws", "gcp"], "STACK": ["app1", "app2"] }] },
        "cache": {
            "key": { "files": ["Gemfile.lock", "yarn.lock"], "prefix": "deps" },
            "paths": ["vendor/"],
        },
        "resource_group": "$PROVIDER-$STACK",
    });

    let spec = JobSpec::from_config("deploy", &config).unwrap();
    let expansion = spec.expansion.as_ref().unwrap();
    let instances = factory::expand_spec(&spec.name, expansion);

    assert_eq!(instances.len(), 4);
    assert_eq!(instances[0].name, "deploy: [aws, app1]");
    assert_eq!(instances[3].name, "deploy: [gcp, app2]");

    let registry = InMemoryRegistry::new();
    for instance in &instances {
        let resolved = cache::resolve_all(&spec.cache, &PinnedHistory);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].key.as_deref(), Some(format!("deps-{DEPS_DIGEST}").as_str()));
        assert_eq!(resolved[0].paths, Some(json!(["vendor/"])));

        let vars = instance_vars(instance);
        let handle = resource_group::bind(
            spec.resource_group.as_deref(),
            || vars.clone(),
            &registry,
            &AllEnabled,
        );
        assert!(handle.is_some());
    }

    // one group per provider/stack combination
    assert_eq!(registry.len(), 4);
}

#[test]
fn rebinding_a_second_pipeline_reuses_the_same_groups() {
    let registry = InMemoryRegistry::new();
    for _pipeline in 0..2 {
        for stack in ["app1", "app2"] {
            let vars = HashMap::from([("STACK".to_string(), stack.to_string())]);
            let handle = resource_group::bind(
                Some("deploy-$STACK"),
                || vars.clone(),
                &registry,
                &AllEnabled,
            );
            assert!(handle.is_some());
        }
    }
    assert_eq!(registry.len(), 2);
}

#[test]
fn materializes_a_counted_job_with_a_literal_cache_key() {
    let config = json!({
        "script": ["bundle exec rspec"],
        "parallel": 3,
        "cache": [{ "key": "gems", "paths": ["vendor/ruby"] }],
    });

    let spec = JobSpec::from_config("rspec", &config).unwrap();
    let instances = factory::expand_spec(&spec.name, spec.expansion.as_ref().unwrap());

    assert_eq!(
        instances.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        vec!["rspec 1/3", "rspec 2/3", "rspec 3/3"]
    );

    let resolved = cache::resolve_all(&spec.cache, &PinnedHistory);
    assert_eq!(resolved[0].key.as_deref(), Some("gems"));
}

#[test]
fn a_job_with_no_materialization_keys_seeds_untouched() {
    let spec = JobSpec::from_config("lint", &json!({ "script": ["cargo clippy"] })).unwrap();
    assert!(spec.expansion.is_none());
    assert!(factory::expand(&spec.name, &json!(null)).is_empty());
    assert!(cache::resolve_all(&spec.cache, &PinnedHistory).is_empty());
}

#[test]
fn a_malformed_cache_entry_fails_only_that_job() {
    let bad = json!({ "cache": { "key": "a", "pathz": [] } });
    let good = json!({ "cache": { "key": "b" } });

    assert!(JobSpec::from_config("bad", &bad).is_err());
    // sibling jobs decode independently of the failure
    assert!(JobSpec::from_config("good", &good).is_ok());
}
