use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::SortError;
use crate::field::Field;
use crate::field_type::FieldType;

/// A parsed key value. All keys of one run share the variant selected by the
/// sort field's [FieldType].
#[derive(Debug)]
pub(crate) enum Key {
    String {
        s: String
    },
    Integer {
        i: i64
    },
    Number {
        n: f64
    },
}

impl Key {
    pub(crate) fn new(value: &str, field: &Field, position: usize) -> Result<Key, SortError> {
        match field.field_type() {
            FieldType::String => {
                let mut key = value.to_string();
                if field.ignore_blanks() {
                    key = key.trim().to_string();
                }

                if field.ignore_case() {
                    key = key.to_uppercase()
                }

                Ok(
                    Key::String {
                        s: key
                    }
                )
            }
            FieldType::Integer => {
                let key = i64::from_str(value.trim())
                    .map_err(|e| Self::invalid_value(value, field, position, e.to_string()))?;
                Ok(
                    Key::Integer {
                        i: key
                    }
                )
            }
            FieldType::Number => {
                let key = f64::from_str(value.trim())
                    .map_err(|e| Self::invalid_value(value, field, position, e.to_string()))?;
                Ok(
                    Key::Number {
                        n: key
                    }
                )
            }
        }
    }

    fn invalid_value(value: &str, field: &Field, position: usize, reason: String) -> SortError {
        SortError::InvalidKeyValue {
            field: field.name().clone(),
            value: value.to_string(),
            position,
            reason,
        }
    }
}

impl Eq for Key {}

impl PartialEq<Self> for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::String { s }, Key::String { s: other }) => s.cmp(other),
            (Key::Integer { i }, Key::Integer { i: other }) => i.cmp(other),
            (Key::Number { n }, Key::Number { n: other }) => number_order(*n, *other),
            _ => unreachable!("keys of one run share a single field type"),
        }
    }
}

// NaN compares equal to NaN and before any number so that f64 keys have a
// total order.
fn number_order(left: f64, right: f64) -> Ordering {
    if left.is_nan() && right.is_nan() {
        Ordering::Equal
    } else if left.is_nan() {
        Ordering::Less
    } else if right.is_nan() {
        Ordering::Greater
    } else {
        left.partial_cmp(&right).unwrap()
    }
}
