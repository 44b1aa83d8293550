use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::dataset::Row;
use crate::error::SortError;
use crate::partition::SortedPartition;
use crate::row_record::RowRecord;

/// Cursor over one sorted partition, holding the current head record. Heap
/// ordering is reversed so that the cursor with the smallest head pops
/// first from the max heap, and exhausted cursors pop before anything else.
struct PartitionCursor {
    head: Option<RowRecord>,
    rest: std::vec::IntoIter<RowRecord>,
}

impl PartitionCursor {
    fn new(partition: SortedPartition) -> PartitionCursor {
        let mut rest = partition.into_records().into_iter();
        let head = rest.next();
        PartitionCursor {
            head,
            rest,
        }
    }

    fn take_head(&mut self) -> Option<RowRecord> {
        let next = self.rest.next();
        std::mem::replace(&mut self.head, next)
    }
}

impl Eq for PartitionCursor {}

impl PartialEq<Self> for PartitionCursor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for PartitionCursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PartitionCursor {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.head, &other.head) {
            (None, None) => Ordering::Equal,
            // none > some so exhausted cursors pop from the BinaryHeap first
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(head), Some(other_head)) => other_head.cmp(head),
        }
    }
}

/// K-way merge of locally sorted partitions into one globally ordered row
/// sequence. Records compare with the same direction and position tie break
/// used by the local sort, so the merge preserves stability and descending
/// output is produced directly, never by reversing an ascending result.
///
/// Every partition must carry the dataset schema; a disagreement is a
/// broken pipeline invariant and fails with [SortError::SchemaMismatch].
pub(crate) fn merge(
    partitions: Vec<SortedPartition>,
    schema: &Vec<String>,
) -> Result<Vec<Row>, SortError> {
    for partition in &partitions {
        if partition.schema() != schema {
            return Err(SortError::SchemaMismatch {
                rank: partition.rank(),
            });
        }
    }

    let total: usize = partitions.iter().map(|partition| partition.len()).sum();
    let mut rows = Vec::with_capacity(total);
    let mut cursors: BinaryHeap<PartitionCursor> =
        partitions.into_iter().map(PartitionCursor::new).collect();

    while cursors.len() > 1 {
        let mut current = cursors.pop().unwrap();
        let next_best = cursors.peek().unwrap();

        let mut exhausted = false;
        // comparison operators are flipped to work with BinaryHeap (Max Heap)
        while &current >= next_best {
            match current.take_head() {
                Some(record) => rows.push(record.into_row()),
                None => {
                    exhausted = true;
                    break;
                }
            }
        }
        if !exhausted {
            cursors.push(current);
        }
    }

    if let Some(mut last) = cursors.pop() {
        while let Some(record) = last.take_head() {
            rows.push(record.into_row());
        }
    }

    Ok(rows)
}
