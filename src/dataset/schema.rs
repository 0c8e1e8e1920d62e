//! Column schema recorded from a CSV header.

use crate::dataset::DatasetError;

/// The fixed, ordered list of named columns of a loaded table.
///
/// Built once from the header row at load time. Every column access goes
/// through [`Schema::check_offset`], so a selection that points outside the
/// table fails up front instead of producing a silent misread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Creates a schema from header column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Number of columns in the schema.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Name of the column at `offset`, if within the schema.
    pub fn name(&self, offset: usize) -> Option<&str> {
        self.columns.get(offset).map(String::as_str)
    }

    /// Offset of the column with the given name, if present.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Validates that `offset` addresses a column of this schema.
    pub fn check_offset(&self, offset: usize) -> Result<usize, DatasetError> {
        if offset < self.columns.len() {
            Ok(offset)
        } else {
            Err(DatasetError::ColumnOutOfRange {
                offset,
                width: self.columns.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new(vec![
            "id".to_string(),
            "irradiance".to_string(),
            "temperature".to_string(),
            "output".to_string(),
        ])
    }

    #[test]
    fn test_width_and_names() {
        let s = schema();
        assert_eq!(s.width(), 4);
        assert_eq!(s.name(1), Some("irradiance"));
        assert_eq!(s.name(4), None);
    }

    #[test]
    fn test_offset_of() {
        let s = schema();
        assert_eq!(s.offset_of("output"), Some(3));
        assert_eq!(s.offset_of("missing"), None);
    }

    #[test]
    fn test_check_offset() {
        let s = schema();
        assert_eq!(s.check_offset(3).unwrap(), 3);
        let err = s.check_offset(7).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ColumnOutOfRange { offset: 7, width: 4 }
        ));
    }
}
