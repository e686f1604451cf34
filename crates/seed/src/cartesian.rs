// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cartesian product over matrix variable lists

/// Compute the Cartesian product of `lists`.
///
/// Nested-loop order: the first list's index varies slowest. The product
/// of no lists is a single empty combination (the identity), and any empty
/// list collapses the whole product to nothing.
pub fn product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    lists.iter().fold(vec![Vec::new()], |combos, list| {
        combos
            .iter()
            .flat_map(|combo| {
                list.iter().map(move |item| {
                    let mut next = combo.clone();
                    next.push(item.clone());
                    next
                })
            })
            .collect()
    })
}

#[cfg(test)]
#[path = "cartesian_tests.rs"]
mod tests;
