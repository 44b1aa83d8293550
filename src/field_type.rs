/// Type of a sort field. Determines how key values are parsed and compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// String, compared lexicographically
    String,
    /// Signed 64 bit integer
    Integer,
    /// 64 bit floating point number
    Number,
}
