//! Dispatch resolution.
//!
//! Selects the handler for a dispatch value from a table's
//! registrations.
//!
//! # Algorithm Overview
//!
//! 1. **Cache check**: a hit at the current generation short-circuits
//! 2. **Filter applicable**: keep every registered key the value matches
//! 3. **Fall back**: an empty candidate set routes to the default
//!    handler, or fails with `NoMatch`
//! 4. **Find maximal**: drop every candidate dominated by another
//! 5. **Select**: a unique survivor wins; anything else is `Ambiguous`
//!
//! Only successful resolutions are cached; a failed resolution never
//! mutates the cache.

use tracing::trace;

use crate::error::{DispatchError, DispatchResult};
use crate::handler::Handler;
use crate::key::Key;
use crate::table::{CacheEntry, DispatchTable};
use crate::value::Value;

pub(crate) fn resolve(table: &DispatchTable, value: &Value) -> DispatchResult<Handler> {
    let generation = table.generation;

    if let Some(entry) = table.cache.lock().get(value) {
        if entry.generation == generation {
            trace!(table = %table.name(), value = %value, "cache hit");
            return Ok(entry.handler.clone());
        }
    }

    // Step 1: filter to applicable registrations.
    let applicable: Vec<(&Key, &Handler)> = table
        .handlers
        .iter()
        .filter(|(key, _)| table.isa().matches(value, key))
        .collect();
    trace!(
        table = %table.name(),
        value = %value,
        applicable = applicable.len(),
        "candidates filtered"
    );

    // Step 2: empty candidate set routes to the default handler.
    if applicable.is_empty() {
        return match &table.default {
            Some(handler) => {
                store(table, value, generation, handler);
                Ok(handler.clone())
            }
            None => Err(DispatchError::NoMatch {
                table: table.name().to_string(),
                value: value.to_string(),
            }),
        };
    }

    // Step 3: find the maximal candidates under dominance.
    let maximal = find_maximal(table, &applicable);

    // Step 4: unique winner.
    if let [(key, handler)] = maximal.as_slice() {
        trace!(table = %table.name(), value = %value, key = %key, "resolved");
        store(table, value, generation, handler);
        return Ok((*handler).clone());
    }

    // Step 5: ambiguity. Reciprocal preferences can empty the maximal
    // set; report the full applicable set in that case.
    let listed = if maximal.is_empty() {
        &applicable
    } else {
        &maximal
    };
    Err(DispatchError::Ambiguous {
        table: table.name().to_string(),
        value: value.to_string(),
        candidates: listed.iter().map(|(key, _)| key.to_string()).collect(),
    })
}

fn store(table: &DispatchTable, value: &Value, generation: u64, handler: &Handler) {
    table.cache.lock().insert(
        value.clone(),
        CacheEntry {
            generation,
            handler: handler.clone(),
        },
    );
}

/// Finds the candidates no other candidate dominates.
fn find_maximal<'a>(
    table: &DispatchTable,
    applicable: &[(&'a Key, &'a Handler)],
) -> Vec<(&'a Key, &'a Handler)> {
    let mut maximal = Vec::new();

    for (key, handler) in applicable {
        let dominated = applicable.iter().any(|(other, _)| {
            !std::ptr::eq::<Key>(*key, *other) && dominates(table, other, key)
        });

        if !dominated {
            maximal.push((*key, *handler));
        }
    }

    maximal
}

/// Whether candidate `a` dominates candidate `b`.
///
/// Strict is-a ordering decides first; a preference edge is consulted
/// only when the two are equally specific or incomparable.
fn dominates(table: &DispatchTable, a: &Key, b: &Key) -> bool {
    let a_subsumes = table.isa().key_isa(a, b);
    let b_subsumes = table.isa().key_isa(b, a);
    if a_subsumes != b_subsumes {
        return a_subsumes;
    }
    table.preferences.prefers(a, b)
}
