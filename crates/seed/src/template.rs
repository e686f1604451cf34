// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline variable interpolation
//!
//! Expands the `$VAR` and `${VAR}` placeholder forms used across pipeline
//! configuration. Unknown placeholders are left as-is so a later layer
//! (or the runner environment) can still resolve them.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for `${variable_name}` or `$variable_name`
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)\}|\$([a-zA-Z_][a-zA-Z0-9_]*)")
        .expect("constant regex pattern is valid")
});

/// Interpolate `$name` / `${name}` placeholders with values from the vars map.
///
/// Unknown variables are left as-is.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    VAR_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match vars.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
