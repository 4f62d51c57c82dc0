//! Field Array - Identity-keyed list of structured sub-records.
//!
//! A `FieldArray` manages one list-valued path as an arena: the ordered
//! values live in the form tree, and a parallel list of generated `ItemId`s
//! gives every record a stable synthetic identity. Index-based operations
//! (remove, overwrite) therefore never misassign bindings after the list
//! shifts - rules and errors registered under a removed index are pruned and
//! the entries behind it slide down in lockstep with the tree.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spark_forms::form::Form;
//!
//! let form = Form::new(json!({ "addresses": [{ "city": "Lisbon" }] }));
//! let addresses = form.array("addresses").unwrap();
//!
//! let id = addresses.append(json!({ "city": "Porto" }));
//! assert_eq!(addresses.len(), 2);
//! assert_eq!(addresses.index_of(id), Some(1));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::error::FormError;
use crate::form::Form;
use crate::path::FieldPath;
use crate::value::{get_path, remove_path};

// =============================================================================
// ITEM ID
// =============================================================================

/// Stable synthetic identifier for one array record.
///
/// Ids are unique within one `FieldArray` and never reused, so a record keeps
/// its identity across removals and reorders of its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

// =============================================================================
// FIELD ARRAY
// =============================================================================

/// Handle over one list-valued path in a form.
#[derive(Clone)]
pub struct FieldArray {
    form: Form,
    path: FieldPath,
    ids: Rc<RefCell<Vec<ItemId>>>,
    next_id: Rc<Cell<u64>>,
}

impl Form {
    /// Create a field array handle over `path`.
    ///
    /// Existing records in the defaults each receive a fresh id.
    pub fn array(&self, path: &str) -> Result<FieldArray, FormError> {
        let path = FieldPath::parse(path)?;
        let len = get_path(&self.watch(), &path)
            .and_then(|value| value.as_array().map(|items| items.len()))
            .unwrap_or(0);

        let ids: Vec<ItemId> = (0..len as u64).map(ItemId).collect();
        Ok(FieldArray {
            form: self.clone(),
            path,
            next_id: Rc::new(Cell::new(len as u64)),
            ids: Rc::new(RefCell::new(ids)),
        })
    }
}

impl FieldArray {
    /// The array's path in the form tree.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    /// True when the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Records as `(id, value)` pairs in list order.
    pub fn items(&self) -> Vec<(ItemId, Value)> {
        let values = match get_path(&self.form.watch(), &self.path) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        self.ids.borrow().iter().copied().zip(values).collect()
    }

    /// The id of the record at `index`.
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.ids.borrow().get(index).copied()
    }

    /// The current index of `id`.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.ids.borrow().iter().position(|&candidate| candidate == id)
    }

    /// The record value at `index`.
    pub fn item(&self, index: usize) -> Option<Value> {
        get_path(&self.form.watch(), &self.path)
            .and_then(|value| value.as_array())
            .and_then(|items| items.get(index))
            .cloned()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a record at the end with a fresh stable id. No upper bound.
    pub fn append(&self, record: Value) -> ItemId {
        let id = ItemId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let index = self.ids.borrow().len();
        self.ids.borrow_mut().push(id);

        let element = self.path.push_index(index);
        // The element path is index-shaped and the target is a list, so the
        // write cannot contradict the tree's structure.
        if let Err(error) = self.form.set_value(&element, record) {
            tracing::debug!(array = %self.path, %error, "append write failed");
        }
        tracing::debug!(array = %self.path, %id, index, "record appended");
        id
    }

    /// Overwrite the record at `index` in place, keeping its identity.
    pub fn set_item(&self, index: usize, record: Value) -> Result<(), FormError> {
        let len = self.len();
        if index >= len {
            return Err(FormError::IndexOutOfBounds {
                path: self.path.to_string(),
                index,
                len,
            });
        }
        self.form.set_value(&self.path.push_index(index), record)
    }

    /// Remove the record at `index`.
    ///
    /// Prunes rules and errors registered under the removed index and shifts
    /// the entries behind it down by one. Returns false for an out-of-range
    /// index.
    pub fn remove(&self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }

        let mut tree = self.form.watch();
        if remove_path(&mut tree, &self.path.push_index(index)).is_err() {
            return false;
        }
        self.form.replace_tree(tree);
        self.ids.borrow_mut().remove(index);
        self.form.prune_array_index(&self.path, index);
        tracing::debug!(array = %self.path, index, "record removed");
        true
    }

    /// Remove the record at `index` unless that would drop the list below
    /// `min_len`.
    ///
    /// The guard is a deliberate design choice (the list always retains its
    /// minimum), surfaced as a `false` return rather than an error.
    pub fn remove_guarded(&self, index: usize, min_len: usize) -> bool {
        if self.len() <= min_len {
            tracing::debug!(
                array = %self.path,
                index,
                min_len,
                "removal skipped to keep minimum record count"
            );
            return false;
        }
        self.remove(index)
    }
}

impl Form {
    /// Swap in a whole new tree without per-path validation.
    ///
    /// Array removals already re-shape the tree; validation state is adjusted
    /// separately by `prune_array_index`.
    pub(crate) fn replace_tree(&self, tree: Value) {
        self.inner.values.set(tree);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use serde_json::json;

    fn address(city: &str) -> Value {
        json!({ "type": "shipping", "city": city })
    }

    fn form_with_addresses() -> (Form, FieldArray) {
        let form = Form::new(json!({ "addresses": [address("Lisbon")] }));
        let array = form.array("addresses").unwrap();
        (form, array)
    }

    #[test]
    fn test_defaults_get_ids() {
        let (_form, array) = form_with_addresses();
        assert_eq!(array.len(), 1);
        assert!(array.id_at(0).is_some());
    }

    #[test]
    fn test_append_assigns_fresh_ids() {
        let (_form, array) = form_with_addresses();
        let first = array.id_at(0).unwrap();
        let second = array.append(address("Porto"));

        assert_eq!(array.len(), 2);
        assert_ne!(first, second);
        assert_eq!(array.index_of(second), Some(1));
        assert_eq!(array.item(1), Some(address("Porto")));
    }

    #[test]
    fn test_ids_stable_across_removal() {
        let (_form, array) = form_with_addresses();
        let porto = array.append(address("Porto"));
        let faro = array.append(address("Faro"));

        assert!(array.remove(1));

        // Faro kept its identity and slid down one slot.
        assert_eq!(array.index_of(faro), Some(1));
        assert_eq!(array.index_of(porto), None);
        assert_eq!(array.item(1), Some(address("Faro")));
    }

    #[test]
    fn test_remove_out_of_range() {
        let (_form, array) = form_with_addresses();
        assert!(!array.remove(5));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_remove_guarded_keeps_minimum() {
        let (_form, array) = form_with_addresses();
        assert_eq!(array.len(), 1);

        // Length invariant: the last record can never be removed.
        assert!(!array.remove_guarded(0, 1));
        assert_eq!(array.len(), 1);

        array.append(address("Porto"));
        assert!(array.remove_guarded(1, 1));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_remove_prunes_and_shifts_validation_state() {
        let (form, array) = form_with_addresses();
        array.append(json!({ "type": "shipping", "city": "" }));
        array.append(json!({ "type": "shipping", "city": "" }));

        form.bind("addresses[1].city", vec![Rule::required("city 1")]).unwrap();
        form.bind("addresses[2].city", vec![Rule::required("city 2")]).unwrap();
        form.trigger(None);
        assert_eq!(form.error_count(), 2);

        assert!(array.remove(1));

        let remaining = FieldPath::parse("addresses[1].city").unwrap();
        assert_eq!(form.error_count(), 1);
        assert_eq!(form.error(&remaining), Some("city 2".to_string()));
    }

    #[test]
    fn test_set_item_overwrites_in_place() {
        let (_form, array) = form_with_addresses();
        let id = array.id_at(0).unwrap();

        array.set_item(0, address("Braga")).unwrap();
        assert_eq!(array.item(0), Some(address("Braga")));
        assert_eq!(array.id_at(0), Some(id));

        assert!(matches!(
            array.set_item(7, address("x")),
            Err(FormError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_items_zips_ids_with_values() {
        let (_form, array) = form_with_addresses();
        array.append(address("Porto"));

        let items = array.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].1, address("Lisbon"));
        assert_eq!(items[1].1, address("Porto"));
        assert_ne!(items[0].0, items[1].0);
    }
}
