use std::fs;
use std::path::PathBuf;

use dataset_sort::field::Field;
use dataset_sort::field_type::FieldType;
use dataset_sort::order::Order;
use dataset_sort::sort::Sort;

mod common;

#[test]
fn test_parallel_sort() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/records-1000.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path.clone(), output_path.clone());
    dataset_sort.with_workers(8);
    dataset_sort.with_field(Field::new("score", FieldType::Number));
    dataset_sort.sort()?;

    let input = common::read_lines(input_path)?;
    let output = common::read_lines(output_path.clone())?;
    assert_eq!(output[0], input[0]);
    assert_eq!(output.len(), input.len());

    // every input row appears unmodified in the output
    assert_eq!(common::sorted_copy(&input), common::sorted_copy(&output));

    let scores: Vec<f64> = common::column_values(&output, 2)
        .iter()
        .map(|score| score.parse().unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_parallel_sort_desc() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/records-1000.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path.clone(), output_path.clone());
    dataset_sort.with_workers(4);
    dataset_sort.with_field(Field::new("age", FieldType::Integer));
    dataset_sort.with_order(Order::Desc);
    dataset_sort.sort()?;

    let input = common::read_lines(input_path)?;
    let output = common::read_lines(output_path.clone())?;
    assert_eq!(common::sorted_copy(&input), common::sorted_copy(&output));

    let ages: Vec<i64> = common::column_values(&output, 3)
        .iter()
        .map(|age| age.parse().unwrap())
        .collect();
    assert!(ages.windows(2).all(|pair| pair[0] >= pair[1]));
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_sort_is_idempotent() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/records-1000.csv");
    let once_path = common::temp_file_name("./target/results/");
    let twice_path = common::temp_file_name("./target/results/");

    let mut first = Sort::new(input_path, once_path.clone());
    first.with_workers(3);
    first.with_field(Field::new("name", FieldType::String));
    first.sort()?;

    let mut second = Sort::new(once_path.clone(), twice_path.clone());
    second.with_workers(5);
    second.with_field(Field::new("name", FieldType::String));
    second.sort()?;

    let once = fs::read_to_string(once_path.clone())?;
    let twice = fs::read_to_string(twice_path.clone())?;
    assert_eq!(once, twice);
    fs::remove_file(once_path)?;
    fs::remove_file(twice_path)?;
    Ok(())
}

#[test]
fn test_stable_ascending_with_two_workers() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/people.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path, output_path.clone());
    dataset_sort.with_workers(2);
    dataset_sort.with_field(Field::new("age", FieldType::Integer));
    dataset_sort.sort()?;

    let output = common::read_lines(output_path.clone())?;
    assert_eq!(output, vec!["id,age", "4,1", "2,3", "3,3", "1,5"]);
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_stable_descending_with_two_workers() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/people.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path, output_path.clone());
    dataset_sort.with_workers(2);
    dataset_sort.with_field(Field::new("age", FieldType::Integer));
    dataset_sort.with_order(Order::Desc);
    dataset_sort.sort()?;

    // id 2 stays before id 3 - equal keys keep their input order, a
    // reversed ascending result would swap them
    let output = common::read_lines(output_path.clone())?;
    assert_eq!(output, vec!["id,age", "1,5", "2,3", "3,3", "4,1"]);
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_more_workers_than_rows() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/people.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path, output_path.clone());
    dataset_sort.with_workers(16);
    dataset_sort.with_field(Field::new("age", FieldType::Integer));
    dataset_sort.sort()?;

    let output = common::read_lines(output_path.clone())?;
    assert_eq!(output, vec!["id,age", "4,1", "2,3", "3,3", "1,5"]);
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_empty_dataset() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/empty.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path, output_path.clone());
    dataset_sort.with_workers(4);
    dataset_sort.with_field(Field::new("age", FieldType::Integer));
    dataset_sort.sort()?;

    let output = common::read_lines(output_path.clone())?;
    assert_eq!(output, vec!["id,age"]);
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_invalid_sort_key_produces_no_output() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/people.csv");
    let output_path = common::temp_file_name("./target/results/");

    let mut dataset_sort = Sort::new(input_path, output_path.clone());
    dataset_sort.with_workers(2);
    dataset_sort.with_field(Field::new("height", FieldType::Integer));

    let result = dataset_sort.sort();
    assert!(result.is_err());
    assert!(!output_path.exists());
    Ok(())
}

#[test]
fn test_unavailable_dataset() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/does-not-exist.csv");
    let output_path = common::temp_file_name("./target/results/");

    let dataset_sort = Sort::new(input_path, output_path.clone());
    let result = dataset_sort.sort();
    assert!(result.is_err());
    assert!(!output_path.exists());
    Ok(())
}

#[test]
fn test_missing_header_is_unavailable() -> Result<(), anyhow::Error> {
    common::setup();
    let input_path = PathBuf::from("./tests/fixtures/no-header.csv");
    let output_path = common::temp_file_name("./target/results/");

    let dataset_sort = Sort::new(input_path, output_path.clone());
    let result = dataset_sort.sort();
    assert!(result.is_err());
    assert!(!output_path.exists());
    Ok(())
}
