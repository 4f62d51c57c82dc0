//! Live State Reflector - Pretty-printed snapshots of the full value tree.
//!
//! A read-only subscriber to the form's values: every change produces a
//! pretty-printed JSON snapshot (2-space indent, declared key order),
//! synchronously with the triggering write and without debouncing. The
//! reflector never mutates the state it reads.
//!
//! Mirrors the crate's derived/effect pipeline idiom: `snapshot` is the pure
//! read, `create_snapshot_derived` wraps it in a `Derived` for pull-based
//! consumers, and `subscribe` wires an `effect` for push-based ones.

use spark_signals::{derived, effect, Derived};

use crate::form::Form;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// The current tree as pretty-printed JSON.
///
/// Reactive when called inside an effect or derived.
pub fn snapshot(form: &Form) -> String {
    // Serializing a Value has no failure mode: keys are always strings.
    serde_json::to_string_pretty(&form.watch()).unwrap_or_default()
}

/// A derived that recomputes the snapshot on every tree change.
pub fn create_snapshot_derived(form: &Form) -> Derived<String> {
    let form = form.clone();
    derived(move || snapshot(&form))
}

/// Subscribe to snapshots: `callback` runs once immediately and then
/// synchronously after every tree change. Returns a stop function.
pub fn subscribe(form: &Form, callback: impl Fn(&str) + 'static) -> impl FnOnce() {
    let form = form.clone();
    effect(move || {
        let text = snapshot(&form);
        callback(&text);
    })
}

// =============================================================================
// TESTS
// =============================================================================
