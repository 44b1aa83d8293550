use crate::field_type::FieldType;

/// Defines the dataset column used as the sort key.
///
/// A field is addressed by its schema name, taken from the header row of the
/// dataset. The field definition is eventually used in comparison.
///
/// # Examples
/// ```
/// // sort by the 'name' column, stripping blanks and ignoring case
/// use dataset_sort::field::Field;
/// use dataset_sort::field_type::FieldType;
/// let field = Field::new("name", FieldType::String)
///     .with_ignore_blanks(true)
///     .with_ignore_case(true);
/// ```
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    field_type: FieldType,
    ignore_blanks: bool,
    ignore_case: bool,
}

impl Field {
    /// Create a new [Field]
    ///
    /// # Arguments
    /// * `name` - the schema name of the field. Must match one of the header
    ///   fields of the dataset the sort runs on.
    /// * `field_type` - the type of the field. See [FieldType] for supported
    ///   types
    ///
    /// # Examples
    /// ```
    /// use dataset_sort::field::Field;
    /// use dataset_sort::field_type::FieldType;
    /// let field = Field::new("age", FieldType::Integer);
    /// ```
    pub fn new(name: &str, field_type: FieldType) -> Field {
        Field {
            name: name.to_string(),
            field_type,
            ignore_blanks: false,
            ignore_case: false,
        }
    }

    /// Get the name for this field.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// Get the [FieldType] for this field.
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Get the ignore blanks setting for this field.
    pub fn ignore_blanks(&self) -> bool {
        self.ignore_blanks
    }

    /// Get the ignore case setting for this field.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Specify whether to ignore blanks for comparison. When true the key
    /// value will be trimmed before comparison.
    pub fn with_ignore_blanks(mut self, ignore_blanks: bool) -> Field {
        self.ignore_blanks = ignore_blanks;
        self
    }

    /// Specify whether to ignore case for comparison.
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Field {
        self.ignore_case = ignore_case;
        self
    }
}
