// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative job configuration relevant to materialization.
//!
//! The pipeline document is assumed to be decoded already; this module
//! reads the materialization keys (`parallel`, `cache`, `resource_group`)
//! out of a job's mapping. Job-level keys outside that set belong to other
//! subsystems and are ignored here.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors decoding the materialization slice of a job definition.
///
/// Fatal to that one job's seeding only; sibling jobs expand normally.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid cache entry: {0}")]
    Cache(#[from] serde_json::Error),
}

/// The declarative unit read from one job's configuration.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub name: String,
    pub expansion: Option<Expansion>,
    /// A job may declare several caches; a single mapping normalizes to one.
    pub cache: Vec<CacheSpec>,
    /// Resource-group key, possibly with variable placeholders.
    pub resource_group: Option<String>,
}

impl JobSpec {
    pub fn from_config(name: &str, config: &Value) -> Result<Self, ConfigError> {
        let obj = config.as_object();
        let expansion = obj
            .and_then(|o| o.get("parallel"))
            .and_then(Expansion::from_config);
        let cache = match obj.and_then(|o| o.get("cache")) {
            Some(raw) => CacheSpec::from_config(raw)?,
            None => Vec::new(),
        };
        let resource_group = obj
            .and_then(|o| o.get("resource_group"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self {
            name: name.to_string(),
            expansion,
            cache,
            resource_group,
        })
    }
}

/// How a job definition fans out into concrete instances.
///
/// A closed variant: a config is counted or a matrix, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion {
    /// N numbered copies with no variable differentiation.
    Count(i64),
    /// One copy per Cartesian-product combination of each variable set.
    Matrix(Vec<IndexMap<String, Vec<Value>>>),
}

gantry_core::simple_display! {
    Expansion {
        Count(..) => "parallel",
        Matrix(..) => "matrix",
    }
}

impl Expansion {
    /// Recognize an expansion spec.
    ///
    /// Count is checked before Matrix; the two shapes do not overlap and
    /// anything else is `None` — most jobs declare no expansion.
    pub fn from_config(raw: &Value) -> Option<Self> {
        Self::count_from(raw).or_else(|| Self::matrix_from(raw))
    }

    fn count_from(raw: &Value) -> Option<Self> {
        // the presence of `number` claims the config for Count even when
        // the total is unusable; an unusable total expands to nothing
        match raw {
            Value::Number(n) => Some(Self::Count(n.as_i64().unwrap_or(0))),
            Value::Object(obj) => {
                let number = obj.get("number")?;
                Some(Self::Count(number.as_i64().unwrap_or(0)))
            }
            _ => None,
        }
    }

    fn matrix_from(raw: &Value) -> Option<Self> {
        let sets = raw.as_object()?.get("matrix")?.as_array()?;
        let variable_sets = sets
            .iter()
            .filter_map(|set| {
                let obj = set.as_object()?;
                let lists = obj
                    .iter()
                    .map(|(name, values)| (name.clone(), as_value_list(values)))
                    .collect::<IndexMap<_, _>>();
                Some(lists)
            })
            .collect();
        Some(Self::Matrix(variable_sets))
    }
}

/// Matrix values may be written as a list or a bare scalar; a scalar is a
/// one-element axis.
fn as_value_list(values: &Value) -> Vec<Value> {
    match values {
        Value::Array(items) => items.clone(),
        scalar => vec![scalar.clone()],
    }
}

/// One cache declaration. The `key` is resolved by [`crate::cache`]; the
/// remaining fields are opaque to this core and pass through verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSpec {
    #[serde(default)]
    pub key: Option<CacheKey>,
    #[serde(default)]
    pub paths: Option<Value>,
    #[serde(default)]
    pub policy: Option<Value>,
    #[serde(default)]
    pub untracked: Option<Value>,
    #[serde(default)]
    pub when: Option<Value>,
    #[serde(default)]
    pub unprotect: Option<Value>,
    #[serde(default)]
    pub fallback_keys: Option<Value>,
}

impl CacheSpec {
    /// Decode a job's `cache` config. A single mapping normalizes to a
    /// one-entry list. Unknown keys inside an entry are an error.
    pub fn from_config(raw: &Value) -> Result<Vec<Self>, ConfigError> {
        match raw {
            Value::Null => Ok(Vec::new()),
            Value::Array(entries) => entries.iter().map(Self::entry_from).collect(),
            single => Ok(vec![Self::entry_from(single)?]),
        }
    }

    fn entry_from(raw: &Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(raw.clone())?)
    }
}

/// A declared cache key: a literal string, or derived from the hash of
/// tracked files' latest revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey {
    Literal(String),
    FileHash {
        prefix: Option<String>,
        files: Vec<String>,
    },
}

impl CacheKey {
    fn from_value(raw: &Value) -> Result<Self, String> {
        match raw {
            Value::String(key) => Ok(Self::Literal(key.clone())),
            // scalar keys are coerced to their string form
            Value::Number(key) => Ok(Self::Literal(key.to_string())),
            Value::Object(map) => {
                let mut prefix = None;
                let mut files = Vec::new();
                for (attr, value) in map {
                    match attr.as_str() {
                        "prefix" => prefix = value.as_str().map(str::to_string),
                        "files" => files = string_list(value)?,
                        other => return Err(format!("unknown cache key attribute `{other}`")),
                    }
                }
                Ok(Self::FileHash { prefix, files })
            }
            _ => Err("cache key must be a string or a files/prefix mapping".to_string()),
        }
    }
}

fn string_list(raw: &Value) -> Result<Vec<String>, String> {
    let items = raw
        .as_array()
        .ok_or_else(|| "cache key files must be a list".to_string())?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| "cache key files must be strings".to_string())
        })
        .collect()
}

impl<'de> Deserialize<'de> for CacheKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
