use std::cmp::Ordering;

use crate::dataset::Row;
use crate::error::SortError;
use crate::key::Key;
use crate::order::Order;
use crate::protocol::SortParams;

/// A row paired with its parsed sort key.
///
/// The requested order applies to the key comparison only. Rows with equal
/// keys compare by original position, ascending, in both directions - equal
/// keys keep their input order and every comparison is deterministic.
#[derive(Debug)]
pub(crate) struct RowRecord {
    row: Row,
    key: Key,
    order: Order,
}

impl RowRecord {
    pub(crate) fn new(row: Row, params: &SortParams) -> Result<RowRecord, SortError> {
        let key = Key::new(row.value(params.key_index()), params.field(), row.position())?;
        Ok(
            RowRecord {
                row,
                key,
                order: params.order().clone(),
            }
        )
    }

    pub(crate) fn position(&self) -> usize {
        self.row.position()
    }

    pub(crate) fn into_row(self) -> Row {
        self.row
    }
}

impl Eq for RowRecord {}

impl PartialEq<Self> for RowRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for RowRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RowRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.key.cmp(&other.key) {
            Ordering::Equal => {
                self.row.position().cmp(&other.row.position())
            }
            ordering => {
                match &self.order {
                    Order::Asc => {
                        ordering
                    }
                    Order::Desc => {
                        ordering.reverse()
                    }
                }
            }
        }
    }
}
