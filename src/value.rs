//! Value Tree Access - Path-addressed reads and writes.
//!
//! The form value tree is a `serde_json::Value` (with insertion-ordered maps,
//! via the `preserve_order` feature). These helpers resolve a `FieldPath`
//! against a tree:
//!
//! - `get_path` - borrow the value at a path
//! - `set_path` - write a value, creating missing intermediates
//! - `remove_path` - remove an array element or object key
//!
//! Writes create missing objects for key segments and extend arrays with
//! `Null` up to an index, so a form can grow nested state on first write.
//! Structural contradictions (keying into an array, indexing into an object)
//! are errors.

use serde_json::Value;

use crate::error::FormError;
use crate::path::{FieldPath, Segment};

// =============================================================================
// READ
// =============================================================================

/// Borrow the value at `path`, if present.
pub fn get_path<'tree>(tree: &'tree Value, path: &FieldPath) -> Option<&'tree Value> {
    let mut current = tree;
    for segment in path.segments() {
        current = match segment {
            Segment::Key(key) => current.as_object()?.get(key)?,
            Segment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

// =============================================================================
// WRITE
// =============================================================================

/// Write `value` at `path`, creating missing intermediate containers.
pub fn set_path(tree: &mut Value, path: &FieldPath, value: Value) -> Result<(), FormError> {
    let mut current = tree;

    for (position, segment) in path.segments().iter().enumerate() {
        let last = position == path.segments().len() - 1;

        match segment {
            Segment::Key(key) => {
                if current.is_null() {
                    *current = Value::Object(serde_json::Map::new());
                }
                let object = current.as_object_mut().ok_or_else(|| FormError::ExpectedObject {
                    path: path.to_string(),
                    segment: key.clone(),
                })?;
                if last {
                    object.insert(key.clone(), value);
                    return Ok(());
                }
                current = object.entry(key.clone()).or_insert(Value::Null);
            }
            Segment::Index(index) => {
                if current.is_null() {
                    *current = Value::Array(Vec::new());
                }
                let array = current.as_array_mut().ok_or_else(|| FormError::ExpectedArray {
                    path: path.to_string(),
                    index: *index,
                })?;
                if array.len() <= *index {
                    array.resize(*index + 1, Value::Null);
                }
                if last {
                    array[*index] = value;
                    return Ok(());
                }
                current = &mut array[*index];
            }
        }
    }

    // Unreachable for non-empty paths; FieldPath::parse rejects empty ones.
    Ok(())
}

// =============================================================================
// REMOVE
// =============================================================================

/// Remove the value at `path`, returning it.
///
/// For array elements the remaining elements shift down. Caller is
/// responsible for keeping any indexed bookkeeping in sync.
pub fn remove_path(tree: &mut Value, path: &FieldPath) -> Result<Value, FormError> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(crate::path::PathError::Empty.into());
    };

    let mut current = tree;
    for segment in parents {
        current = match segment {
            Segment::Key(key) => current
                .as_object_mut()
                .and_then(|object| object.get_mut(key))
                .ok_or_else(|| FormError::ExpectedObject {
                    path: path.to_string(),
                    segment: key.clone(),
                })?,
            Segment::Index(index) => {
                let array = current.as_array_mut().ok_or_else(|| FormError::ExpectedArray {
                    path: path.to_string(),
                    index: *index,
                })?;
                let len = array.len();
                array.get_mut(*index).ok_or(FormError::IndexOutOfBounds {
                    path: path.to_string(),
                    index: *index,
                    len,
                })?
            }
        };
    }

    match last {
        Segment::Key(key) => current
            .as_object_mut()
            .and_then(|object| object.shift_remove(key))
            .ok_or_else(|| FormError::ExpectedObject {
                path: path.to_string(),
                segment: key.clone(),
            }),
        Segment::Index(index) => {
            let array = current.as_array_mut().ok_or_else(|| FormError::ExpectedArray {
                path: path.to_string(),
                index: *index,
            })?;
            if *index >= array.len() {
                return Err(FormError::IndexOutOfBounds {
                    path: path.to_string(),
                    index: *index,
                    len: array.len(),
                });
            }
            Ok(array.remove(*index))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn test_get_nested() {
        let tree = json!({
            "contactPerson": { "email": "a@b.co" },
            "addresses": [{ "city": "Berlin" }],
        });

        assert_eq!(
            get_path(&tree, &path("contactPerson.email")),
            Some(&json!("a@b.co"))
        );
        assert_eq!(
            get_path(&tree, &path("addresses[0].city")),
            Some(&json!("Berlin"))
        );
        assert_eq!(get_path(&tree, &path("addresses[1].city")), None);
        assert_eq!(get_path(&tree, &path("missing")), None);
    }

    #[test]
    fn test_set_overwrites_scalar() {
        let mut tree = json!({ "firstName": "" });
        set_path(&mut tree, &path("firstName"), json!("Ada")).unwrap();
        assert_eq!(tree, json!({ "firstName": "Ada" }));
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut tree = json!({});
        set_path(&mut tree, &path("preferences.language"), json!("en")).unwrap();
        assert_eq!(tree, json!({ "preferences": { "language": "en" } }));
    }

    #[test]
    fn test_set_extends_array_with_nulls() {
        let mut tree = json!({ "addresses": [] });
        set_path(&mut tree, &path("addresses[2]"), json!({ "city": "Oslo" })).unwrap();
        assert_eq!(
            tree,
            json!({ "addresses": [null, null, { "city": "Oslo" }] })
        );
    }

    #[test]
    fn test_set_type_mismatch() {
        let mut tree = json!({ "terms": false });
        let err = set_path(&mut tree, &path("terms.nested"), json!(1)).unwrap_err();
        assert!(matches!(err, FormError::ExpectedObject { .. }));

        let mut tree = json!({ "email": "x" });
        let err = set_path(&mut tree, &path("email[0]"), json!(1)).unwrap_err();
        assert!(matches!(err, FormError::ExpectedArray { .. }));
    }

    #[test]
    fn test_set_preserves_declared_key_order() {
        let mut tree = json!({ "firstName": "", "lastName": "", "email": "" });
        set_path(&mut tree, &path("lastName"), json!("Lovelace")).unwrap();

        let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["firstName", "lastName", "email"]);
    }

    #[test]
    fn test_remove_array_element_shifts() {
        let mut tree = json!({ "addresses": [{ "city": "A" }, { "city": "B" }] });
        let removed = remove_path(&mut tree, &path("addresses[0]")).unwrap();
        assert_eq!(removed, json!({ "city": "A" }));
        assert_eq!(tree, json!({ "addresses": [{ "city": "B" }] }));
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut tree = json!({ "addresses": [{ "city": "A" }] });
        let err = remove_path(&mut tree, &path("addresses[4]")).unwrap_err();
        assert!(matches!(err, FormError::IndexOutOfBounds { len: 1, .. }));
    }

    #[test]
    fn test_remove_object_key() {
        let mut tree = json!({ "a": 1, "b": 2 });
        let removed = remove_path(&mut tree, &path("a")).unwrap();
        assert_eq!(removed, json!(1));
        assert_eq!(tree, json!({ "b": 2 }));
    }
}
