use std::cmp::min;

use crate::error::SortError;
use crate::partition::{Partition, SortedPartition};
use crate::protocol::SortParams;
use crate::row_record::RowRecord;

/// Sort one partition by the broadcast parameters. Parses each row's key
/// once, then runs a stable merge sort over the keyed records. An empty
/// partition comes back unchanged.
pub(crate) fn sort_partition(
    partition: Partition,
    params: &SortParams,
) -> Result<SortedPartition, SortError> {
    let (rank, schema, rows) = partition.into_parts();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(RowRecord::new(row, params)?);
    }
    let records = sort_records(records);
    Ok(SortedPartition::new(rank, schema, records))
}

/// Bottom-up merge sort: merge runs of doubling width between two buffers
/// with index cursors, O(n log n) time and O(n) auxiliary space. Record
/// comparison resolves equal keys by original position, so the result is
/// stable in both directions.
pub(crate) fn sort_records(records: Vec<RowRecord>) -> Vec<RowRecord> {
    let len = records.len();
    if len <= 1 {
        return records;
    }

    let mut source: Vec<Option<RowRecord>> = records.into_iter().map(Some).collect();
    let mut target: Vec<Option<RowRecord>> = std::iter::repeat_with(|| None).take(len).collect();

    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let middle = min(start + width, len);
            let end = min(start + 2 * width, len);
            merge_runs(&mut source, &mut target, start, middle, end);
            start = end;
        }
        std::mem::swap(&mut source, &mut target);
        width *= 2;
    }

    source.into_iter().map(|record| record.unwrap()).collect()
}

// Merge source[start..middle] and source[middle..end] into
// target[start..end]. The left run wins ties.
fn merge_runs(
    source: &mut [Option<RowRecord>],
    target: &mut [Option<RowRecord>],
    start: usize,
    middle: usize,
    end: usize,
) {
    let mut left = start;
    let mut right = middle;
    for slot in target.iter_mut().take(end).skip(start) {
        let take_left = if left == middle {
            false
        } else if right == end {
            true
        } else {
            source[left].as_ref().unwrap() <= source[right].as_ref().unwrap()
        };
        if take_left {
            *slot = source[left].take();
            left += 1;
        } else {
            *slot = source[right].take();
            right += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::Row;
    use crate::error::SortError;
    use crate::field::Field;
    use crate::field_type::FieldType;
    use crate::local_sort::{sort_partition, sort_records};
    use crate::order::Order;
    use crate::partition::Partition;
    use crate::protocol::SortParams;
    use crate::row_record::RowRecord;

    fn age_params(order: Order) -> SortParams {
        SortParams::new(Field::new("age", FieldType::Integer), 1, order)
    }

    fn records(ages: &[&str], order: Order) -> Vec<RowRecord> {
        let params = age_params(order);
        ages.iter()
            .enumerate()
            .map(|(position, age)| {
                let row = Row::new(vec![position.to_string(), age.to_string()], position);
                RowRecord::new(row, &params).unwrap()
            })
            .collect()
    }

    fn positions(records: &[RowRecord]) -> Vec<usize> {
        records.iter().map(|record| record.position()).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let sorted = sort_records(records(&["5", "3", "3", "1"], Order::Asc));
        assert_eq!(positions(&sorted), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_sort_descending() {
        let sorted = sort_records(records(&["5", "3", "3", "1"], Order::Desc));
        assert_eq!(positions(&sorted), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_stability_in_both_directions() {
        // equal keys keep their input order; a reversed ascending result
        // would yield [2, 1] for the descending case
        let sorted = sort_records(records(&["3", "3"], Order::Asc));
        assert_eq!(positions(&sorted), vec![0, 1]);
        let sorted = sort_records(records(&["3", "3"], Order::Desc));
        assert_eq!(positions(&sorted), vec![0, 1]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(sort_records(records(&[], Order::Asc)).is_empty());
        let sorted = sort_records(records(&["7"], Order::Asc));
        assert_eq!(positions(&sorted), vec![0]);
    }

    #[test]
    fn test_larger_input_matches_std_sort() {
        let ages: Vec<String> = (0..257).map(|i| ((i * 31 + 7) % 101).to_string()).collect();
        let age_refs: Vec<&str> = ages.iter().map(|age| age.as_str()).collect();
        let sorted = sort_records(records(&age_refs, Order::Asc));

        let mut expected: Vec<(i64, usize)> = ages
            .iter()
            .enumerate()
            .map(|(position, age)| (age.parse().unwrap(), position))
            .collect();
        expected.sort();
        let expected: Vec<usize> = expected.into_iter().map(|(_, position)| position).collect();
        assert_eq!(positions(&sorted), expected);
    }

    #[test]
    fn test_sort_partition_empty() {
        let partition = Partition::new(0, vec!["id".to_string(), "age".to_string()], vec![]);
        let sorted = sort_partition(partition, &age_params(Order::Asc)).unwrap();
        assert_eq!(sorted.len(), 0);
    }

    #[test]
    fn test_sort_partition_invalid_value() {
        let rows = vec![Row::new(vec!["1".to_string(), "young".to_string()], 0)];
        let partition = Partition::new(0, vec!["id".to_string(), "age".to_string()], rows);
        let result = sort_partition(partition, &age_params(Order::Asc));
        assert!(matches!(result, Err(SortError::InvalidKeyValue { .. })));
    }
}
