//! Positional lookup of generator field values

use crate::schema::Padding;
use serde_json::Value;

impl Padding {
    /// Item of `items` shown at output `index`, or `None` past the end for `Empty`
    pub fn pick(self, items: &[Value], index: usize) -> Option<&Value> {
        let len = items.len();
        if len == 0 {
            return None;
        }

        match self {
            Padding::Empty => items.get(index),
            Padding::Edge => items.get(index.min(len - 1)),
            Padding::Wrap => items.get(index % len),
            Padding::Reflect => {
                let offset = index % len;
                if (index / len) % 2 == 0 {
                    items.get(offset)
                } else {
                    items.get(len - 1 - offset)
                }
            }
        }
    }
}

/// Value of one generator field at output `index`
///
/// Arrays are indexed through the padding (default `Empty`). A scalar is
/// repeated at every index unless the padding is explicitly `Empty`, in which
/// case it only appears at index 0.
pub(super) fn field_value(padding: Option<Padding>, value: Option<&Value>, index: usize) -> Option<&Value> {
    match value? {
        Value::Array(items) => padding.unwrap_or(Padding::Empty).pick(items, index),
        _ if padding == Some(Padding::Empty) && index > 0 => None,
        scalar => Some(scalar),
    }
}
