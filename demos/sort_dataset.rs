use std::path::{Path, PathBuf};

use anyhow::Error;
use simple_logger::SimpleLogger;

use dataset_sort::field::Field;
use dataset_sort::field_type::FieldType;
use dataset_sort::order::Order;
use dataset_sort::sort::Sort;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn sort_by_first_column(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    // the first schema column, ascending, is the default
    let dataset_sort = Sort::new(input_path.to_path_buf(), output_path.to_path_buf());
    dataset_sort.sort()?;
    Ok(())
}

fn sort_by_score(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    let mut dataset_sort = Sort::new(input_path.to_path_buf(), output_path.to_path_buf());
    dataset_sort.with_workers(4);
    dataset_sort.with_field(Field::new("score", FieldType::Number));
    dataset_sort.sort()?;
    Ok(())
}

fn sort_by_age_descending(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    let mut dataset_sort = Sort::new(input_path.to_path_buf(), output_path.to_path_buf());
    dataset_sort.with_workers(4);
    dataset_sort.with_field(Field::new("age", FieldType::Integer));
    // direction values from configuration parse leniently - anything
    // unrecognized falls back to ascending
    dataset_sort.with_order(Order::parse_lenient("descending"));
    dataset_sort.sort()?;
    Ok(())
}

// cargo run -r --example sort_dataset
pub fn main() -> Result<(), Error> {
    SimpleLogger::new().init().unwrap();

    let input_path = PathBuf::from("./tests/fixtures/records-1000.csv");
    let by_id_path = PathBuf::from("./target/records-by-id.csv");
    let by_score_path = PathBuf::from("./target/records-by-score.csv");
    let by_age_path = PathBuf::from("./target/records-by-age.csv");

    sort_by_first_column(&input_path, &by_id_path)?;
    sort_by_score(&input_path, &by_score_path)?;
    sort_by_age_descending(&input_path, &by_age_path)?;

    Ok(())
}
