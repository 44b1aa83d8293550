use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use regex::Regex;
use tempfile::Builder;

use crate::error::SortError;

/// A single row: one value per schema field, plus the position the row
/// occupied in the source dataset. The position never changes once the row
/// is read and is the tie break for equal sort keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
    position: usize,
}

impl Row {
    pub(crate) fn new(values: Vec<String>, position: usize) -> Row {
        Row {
            values,
            position,
        }
    }

    /// Get the field values of this row, in schema order.
    pub fn values(&self) -> &Vec<String> {
        &self.values
    }

    /// Get the position this row occupied in the source dataset.
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn value(&self, index: usize) -> &str {
        self.values[index].as_str()
    }

    pub(crate) fn into_values(self) -> Vec<String> {
        self.values
    }
}

/// An ordered sequence of rows sharing one schema.
///
/// The schema is the ordered list of field names taken from the header row
/// of the source file. Every row holds exactly one value per schema field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    schema: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from a schema and plain value rows. Row positions
    /// are assigned from the input order.
    pub fn from_values(schema: Vec<String>, values: Vec<Vec<String>>) -> Dataset {
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(position, row)| Row::new(row, position))
            .collect();
        Dataset {
            schema,
            rows,
        }
    }

    pub(crate) fn assemble(schema: Vec<String>, rows: Vec<Row>) -> Dataset {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| Row::new(row.into_values(), position))
            .collect();
        Dataset {
            schema,
            rows,
        }
    }

    /// Get the schema of this dataset.
    pub fn schema(&self) -> &Vec<String> {
        &self.schema
    }

    /// Get the rows of this dataset.
    pub fn rows(&self) -> &Vec<Row> {
        &self.rows
    }

    /// Get the number of rows in this dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when this dataset has no rows. An empty dataset is valid and
    /// already sorted by any key.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|field| field == name)
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.schema, self.rows)
    }

    /// Load a dataset from a delimiter separated file. The first retained
    /// line is the header and supplies the schema.
    pub fn load(
        path: &Path,
        field_separator: char,
        ignore_empty: bool,
        ignore_lines: &Option<Regex>,
    ) -> Result<Dataset, SortError> {
        let file = File::open(path).map_err(|e| unavailable(path, e.to_string()))?;
        let mut reader = BufReader::new(file);

        let mut schema: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        let mut line = String::new();
        let mut line_number = 0;
        loop {
            line.clear();
            let bytes = reader
                .read_line(&mut line)
                .map_err(|e| unavailable(path, format!("line {}: {}", line_number + 1, e)))?;
            if bytes == 0 {
                break;
            }
            line_number += 1;

            if ignore_empty && line.trim().is_empty() {
                continue;
            }

            if let Some(r) = ignore_lines {
                if r.is_match(line.trim()) {
                    continue;
                }
            }

            let values: Vec<String> = line
                .trim_end_matches(|c| c == '\r' || c == '\n')
                .split(field_separator)
                .map(|value| value.to_string())
                .collect();

            match &schema {
                None => {
                    schema = Some(values);
                }
                Some(header) => {
                    if values.len() != header.len() {
                        return Err(unavailable(
                            path,
                            format!(
                                "line {}: expected {} fields, found {}",
                                line_number,
                                header.len(),
                                values.len()
                            ),
                        ));
                    }
                    rows.push(Row::new(values, rows.len()));
                }
            }
        }

        match schema {
            None => Err(unavailable(path, "no header line".to_string())),
            Some(schema) => {
                log::info!(
                    "Loaded {} rows from {}, fields: {:?}",
                    rows.len(),
                    path.display(),
                    schema
                );
                Ok(
                    Dataset {
                        schema,
                        rows,
                    }
                )
            }
        }
    }

    /// Persist this dataset to `path`. The content is written to a temp file
    /// in the destination directory and renamed into place, so a failed
    /// write never leaves a partial output behind.
    pub fn persist(&self, path: &Path, field_separator: char) -> Result<(), anyhow::Error> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp_file = Builder::new()
            .prefix("dataset-")
            .suffix(".partial")
            .tempfile_in(dir)
            .with_context(|| anyhow!("Failed to create temp file in {}", dir.display()))?;
        let (file, tmp_path) = tmp_file.keep()?;

        let separator = field_separator.to_string();
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", self.schema.join(&separator))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.values().join(&separator))?;
        }
        writer.flush()?;
        drop(writer);

        std::fs::rename(&tmp_path, path).with_context(|| {
            anyhow!("Rename {} to {}", tmp_path.display(), path.display())
        })?;
        Ok(())
    }
}

fn unavailable(path: &Path, reason: String) -> SortError {
    SortError::DatasetUnavailable {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::dataset::Dataset;
    use crate::error::SortError;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load() {
        let file = write_tmp("id,age\n1,5\n2,3\n");
        let dataset = Dataset::load(file.path(), ',', false, &None).unwrap();
        assert_eq!(dataset.schema(), &vec!["id".to_string(), "age".to_string()]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].values(), &vec!["2".to_string(), "3".to_string()]);
        assert_eq!(dataset.rows()[1].position(), 1);
    }

    #[test]
    fn test_load_header_only() {
        let file = write_tmp("id,age\n");
        let dataset = Dataset::load(file.path(), ',', false, &None).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load(std::path::Path::new("./no-such-file.csv"), ',', false, &None);
        assert!(matches!(result, Err(SortError::DatasetUnavailable { .. })));
    }

    #[test]
    fn test_load_empty_file_has_no_header() {
        let file = write_tmp("");
        let result = Dataset::load(file.path(), ',', false, &None);
        assert!(matches!(result, Err(SortError::DatasetUnavailable { .. })));
    }

    #[test]
    fn test_load_ragged_row() {
        let file = write_tmp("id,age\n1,5\n2\n");
        let result = Dataset::load(file.path(), ',', false, &None);
        assert!(matches!(result, Err(SortError::DatasetUnavailable { .. })));
    }

    #[test]
    fn test_load_ignores_comments_and_empty_lines() {
        let comments = regex::Regex::new("^#").unwrap();
        let file = write_tmp("# generated\nid,age\n\n1,5\n# trailer\n");
        let dataset = Dataset::load(file.path(), ',', true, &Some(comments)).unwrap();
        assert_eq!(dataset.schema(), &vec!["id".to_string(), "age".to_string()]);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let dataset = Dataset::from_values(
            vec!["id".to_string(), "age".to_string()],
            vec![
                vec!["1".to_string(), "5".to_string()],
                vec!["2".to_string(), "3".to_string()],
            ],
        );
        dataset.persist(&path, ',').unwrap();
        let reloaded = Dataset::load(&path, ',', false, &None).unwrap();
        assert_eq!(reloaded, dataset);
    }
}
