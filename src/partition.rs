use crate::dataset::Row;
use crate::row_record::RowRecord;

/// Compute the contiguous block assignment for `workers` ranks over a
/// dataset of `dataset_size` rows. Returns one `(start, length)` pair per
/// rank. The first `dataset_size % workers` ranks receive one extra row, so
/// partition sizes differ by at most one. Ranks beyond the dataset size
/// receive empty partitions. Never fails for `workers >= 1`.
pub(crate) fn partition(dataset_size: usize, workers: usize) -> Vec<(usize, usize)> {
    let base = dataset_size / workers;
    let extra = dataset_size % workers;
    let mut bounds = Vec::with_capacity(workers);
    let mut start = 0;
    for rank in 0..workers {
        let length = if rank < extra { base + 1 } else { base };
        bounds.push((start, length));
        start += length;
    }
    bounds
}

/// A contiguous block of rows assigned to one worker rank. Owned
/// exclusively by that worker for the duration of the run.
#[derive(Debug)]
pub(crate) struct Partition {
    rank: usize,
    schema: Vec<String>,
    rows: Vec<Row>,
}

impl Partition {
    pub(crate) fn new(rank: usize, schema: Vec<String>, rows: Vec<Row>) -> Partition {
        Partition {
            rank,
            schema,
            rows,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn into_parts(self) -> (usize, Vec<String>, Vec<Row>) {
        (self.rank, self.schema, self.rows)
    }
}

/// A partition after local sorting, carrying its schema so the gather side
/// can verify it against the dataset schema.
#[derive(Debug)]
pub(crate) struct SortedPartition {
    rank: usize,
    schema: Vec<String>,
    records: Vec<RowRecord>,
}

impl SortedPartition {
    pub(crate) fn new(rank: usize, schema: Vec<String>, records: Vec<RowRecord>) -> SortedPartition {
        SortedPartition {
            rank,
            schema,
            records,
        }
    }

    pub(crate) fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn schema(&self) -> &Vec<String> {
        &self.schema
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn into_records(self) -> Vec<RowRecord> {
        self.records
    }
}
