use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use regex::Regex;

use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::dataset::Dataset;
use crate::error::SortError;
use crate::field::Field;
use crate::field_type::FieldType;
use crate::order::Order;
use crate::protocol::SortParams;
use crate::row_record::RowRecord;

/// Advisory worker count for a dataset of `rows` rows. Follows the size
/// bands that worked well in practice; callers remain free to configure
/// any worker count, this is never applied implicitly.
pub fn suggested_workers(rows: usize) -> usize {
    if rows < 1_000 {
        2
    } else if rows < 10_000 {
        4
    } else if rows < 100_000 {
        8
    } else {
        16
    }
}

/// Sort a delimiter separated dataset file by an arbitrary column.
///
/// The first retained line of the input is the header and supplies the
/// schema; every following line is a row. The work is split across a fixed
/// set of worker threads, each partition is sorted locally and the sorted
/// partitions are merged into one globally ordered output file. Rows keep
/// all of their fields in the output.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use dataset_sort::field::Field;
/// use dataset_sort::field_type::FieldType;
/// use dataset_sort::order::Order;
/// use dataset_sort::sort::Sort;
///
/// // parallel dataset sort
/// fn sort_dataset(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
///     let mut dataset_sort = Sort::new(input, output);
///     // set the number of workers the sort will distribute partitions to.
///     // The default is one worker per available CPU core.
///     dataset_sort.with_workers(2);
///     // sort by the 'age' column, largest first
///     dataset_sort.with_field(Field::new("age", FieldType::Integer));
///     dataset_sort.with_order(Order::Desc);
///     dataset_sort.sort()
/// }
/// ```
pub struct Sort {
    input: PathBuf,
    output: PathBuf,
    workers: usize,
    field_separator: char,
    ignore_empty: bool,
    ignore_lines: Option<Regex>,
    field: Option<Field>,
    order: Order,
    timeout: Option<Duration>,
}

impl Sort {
    /// Create a default Sort definition.
    ///
    /// * the default field separator is a comma
    /// * the first schema field is the sort key until a field is configured
    /// * the default order is ascending
    /// * lines starting with '#' are ignored
    /// * the default worker count is the number of available CPU cores
    /// * there is no gather timeout - the run blocks until every worker
    ///   reports
    pub fn new(input: PathBuf, output: PathBuf) -> Sort {
        Sort {
            input,
            output,
            workers: 0,
            field_separator: ',',
            ignore_empty: false,
            ignore_lines: Some(Regex::new("^#").unwrap()),
            field: None,
            order: Order::Asc,
            timeout: None,
        }
    }

    /// Set the number of workers. The default is zero which will result in
    /// using all system cores. See [suggested_workers] for an advisory
    /// count based on dataset size.
    pub fn with_workers(&mut self, workers: usize) {
        self.workers = workers;
    }

    /// Set the field separator. The default is ','
    pub fn with_field_separator(&mut self, field_separator: char) {
        self.field_separator = field_separator;
    }

    /// Direct the sort to ignore empty lines. The default is false
    pub fn with_ignore_empty(&mut self) {
        self.ignore_empty = true;
    }

    /// Specify which lines to ignore. Each line matching the regex will be
    /// skipped on load and will not appear in the output.
    pub fn with_ignore_lines(&mut self, r: Regex) {
        self.ignore_lines = Some(r);
    }

    /// Set the sort field. The default is to sort by the first schema field
    /// as a String
    pub fn with_field(&mut self, field: Field) {
        self.field = Some(field);
    }

    /// Set [Order]
    pub fn with_order(&mut self, order: Order) {
        self.order = order;
    }

    /// Set a gather timeout per worker. The default is to block until every
    /// worker reports.
    pub fn with_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Sort the input file into the output file. On failure no output file
    /// is produced.
    pub fn sort(&self) -> Result<(), anyhow::Error> {
        let config = self.create_config();
        Self::internal_sort(&self.input, &config, &self.output)
    }

    /// Check that the input file is already sorted by the configured field
    /// and order.
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        let config = self.create_config();
        Self::internal_check(&self.input, &config)
    }

    fn create_config(&self) -> Config {
        Config::new(
            self.workers,
            self.field_separator,
            self.ignore_empty,
            self.ignore_lines.clone(),
            self.field.clone(),
            self.order.clone(),
            self.timeout,
        )
    }

    fn effective_field(config: &Config, dataset: &Dataset) -> Field {
        match config.field() {
            Some(field) => field.clone(),
            None => Field::new(dataset.schema()[0].as_str(), FieldType::String),
        }
    }

    fn internal_sort(input: &PathBuf, config: &Config, output: &PathBuf) -> Result<(), anyhow::Error> {
        log::info!("Start parallel dataset sort");
        let dataset = Dataset::load(
            input,
            config.field_separator(),
            config.ignore_empty(),
            config.ignore_lines(),
        )?;
        log::info!(
            "For {} rows, {} workers are suggested",
            dataset.len(),
            suggested_workers(dataset.len())
        );

        let field = Self::effective_field(config, &dataset);
        let mut coordinator = Coordinator::new(config.workers());
        if let Some(timeout) = config.timeout() {
            coordinator.with_timeout(timeout);
        }
        let sorted = coordinator.run(dataset, &field, config.order())?;

        sorted
            .persist(output, config.field_separator())
            .with_context(|| anyhow!("path: {}", output.display()))?;
        log::info!("Finish parallel dataset sort");
        Ok(())
    }

    fn internal_check(path: &PathBuf, config: &Config) -> Result<bool, anyhow::Error> {
        let dataset = Dataset::load(
            path,
            config.field_separator(),
            config.ignore_empty(),
            config.ignore_lines(),
        )?;
        let field = Self::effective_field(config, &dataset);
        let key_index = dataset
            .field_index(field.name())
            .ok_or_else(|| SortError::InvalidSortKey {
                field: field.name().clone(),
                schema: dataset.schema().clone(),
            })?;
        let params = SortParams::new(field, key_index, config.order().clone());

        let mut result = true;
        let mut previous: Option<RowRecord> = None;
        for row in dataset.rows() {
            let current = RowRecord::new(row.clone(), &params)?;
            match previous {
                None => {
                    previous = Some(current);
                }
                Some(previous_record) => {
                    if previous_record <= current {
                        previous = Some(current);
                    } else {
                        log::debug!("Order violation at row {}", current.position());
                        result = false;
                        break;
                    }
                }
            }
        }
        Ok(result)
    }
}
