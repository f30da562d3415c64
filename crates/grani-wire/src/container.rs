//! Presence container for upsertable fields.

use serde::{Deserialize, Serialize};

/// Wrapper for a field that supports upsert semantics under the v2 config
/// shape.
///
/// The container being absent means "field not touched"; the container
/// being present carries the raw value in its `value` slot, even when that
/// value is itself "empty" (an explicit zero, an empty list, `None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueContainer<T> {
    pub value: T,
}

impl<T> ValueContainer<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> From<T> for ValueContainer<T> {
    fn from(value: T) -> Self {
        Self { value }
    }
}
