//! This crate implements a parallel sort for tabular datasets - delimiter
//! separated files with a header row, such as CSV or TSV exports.
//!
//! The dataset is split into contiguous partitions, one per worker. A
//! coordinator broadcasts the sort parameters to a fixed set of worker
//! threads, scatters exactly one partition to each of them, waits for the
//! parallel local sorts, gathers the results in rank order and merges them
//! into one globally ordered dataset. Rows with equal key values keep their
//! input order in both directions, and every row keeps all of its fields in
//! the output.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use dataset_sort::field::Field;
//! use dataset_sort::field_type::FieldType;
//! use dataset_sort::order::Order;
//! use dataset_sort::sort::Sort;
//!
//! // optimized for use with Jemalloc
//! use tikv_jemallocator::Jemalloc;
//! #[global_allocator]
//! static GLOBAL: Jemalloc = Jemalloc;
//!
//! // parallel dataset sort
//! fn sort_dataset(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut dataset_sort = Sort::new(input, output);
//!
//!     // set the number of workers the partitions will be distributed to.
//!     // When given a number that exceeds the number of available CPU cores
//!     // the work will still be split that many ways with somewhat degraded
//!     // performance. The default is one worker per available core.
//!     dataset_sort.with_workers(4);
//!
//!     // sort by the 'age' column as an integer, largest value first
//!     dataset_sort.with_field(Field::new("age", FieldType::Integer));
//!     dataset_sort.with_order(Order::Desc);
//!
//!     dataset_sort.sort()
//! }
//! ```
//!

pub(crate) mod config;
pub(crate) mod context;
pub(crate) mod key;
pub(crate) mod local_sort;
pub(crate) mod merge;
pub(crate) mod partition;
pub(crate) mod protocol;
pub(crate) mod row_record;
pub(crate) mod worker;

pub mod coordinator;
pub mod dataset;
pub mod error;
pub mod field;
pub mod field_type;
pub mod order;
pub mod sort;
