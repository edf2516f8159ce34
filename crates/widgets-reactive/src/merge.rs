//! Recursive merging of JSON objects.

use std::{error::Error, fmt};

use serde_json::{Map, Value};

/// Error of [`deep_merge`] when a source object can't be merged because the
/// destination has no object under the same key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeError {
    /// Keys leading from the merge root to the mismatched value.
    pub path: Vec<String>,
}

impl MergeError {
    fn at(key: String) -> Self {
        Self { path: vec![key] }
    }

    fn nested_in(mut self, key: String) -> Self {
        self.path.insert(0, key);
        self
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot merge object into `{}`: destination is not an object",
            self.path.join("."),
        )
    }
}

impl Error for MergeError {}

/// Merges `src` into `dest` in place.
///
/// Objects are merged key by key recursively. Any other value (including
/// arrays) replaces the destination value as a whole. Keys of `dest` missing
/// in `src` are left untouched.
///
/// # Errors
///
/// With [`MergeError`] if `src` has an object under some key, while `dest`
/// has no value or a non-object value there. Keys merged before the mismatch
/// was met stay merged.
///
/// # Example
///
/// ```
/// use medea_widgets_reactive::deep_merge;
/// use serde_json::json;
///
/// let mut dest = json!({"a": 1, "b": {"c": 2}});
/// let src = json!({"b": {"d": 3}, "e": 4});
///
/// deep_merge(
///     dest.as_object_mut().unwrap(),
///     src.as_object().unwrap().clone(),
/// )
/// .unwrap();
/// assert_eq!(dest, json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4}));
/// ```
pub fn deep_merge(
    dest: &mut Map<String, Value>,
    src: Map<String, Value>,
) -> Result<(), MergeError> {
    for (key, val) in src {
        match val {
            Value::Object(nested) => match dest.get_mut(&key) {
                Some(Value::Object(dest_nested)) => {
                    deep_merge(dest_nested, nested)
                        .map_err(|e| e.nested_in(key))?;
                }
                _ => return Err(MergeError::at(key)),
            },
            val => {
                drop(dest.insert(key, val));
            }
        }
    }
    Ok(())
}
