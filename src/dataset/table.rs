//! CSV table loading and in-memory `(X, y)` datasets.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::dataset::schema::Schema;
use crate::dataset::{Dataset, DatasetError};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::ops::Range;
use std::path::Path;

/// A CSV file loaded into memory with its header schema.
///
/// Cells are kept as raw strings; numeric parsing happens when columns are
/// selected, so only the columns a pipeline actually uses must be numeric.
/// Row width is validated against the header during load.
#[derive(Debug, Clone)]
pub struct CsvTable {
    schema: Schema,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Loads a CSV file with a header row.
    ///
    /// # Errors
    /// - [`DatasetError::Io`] if the file cannot be opened.
    /// - [`DatasetError::Csv`] if the reader rejects the contents.
    /// - [`DatasetError::RowWidth`] if a data row does not match the header.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut rdr = ReaderBuilder::new().from_reader(reader);

        let schema = Schema::new(
            rdr.headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect(),
        );

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() != schema.width() {
                return Err(DatasetError::RowWidth {
                    row: i,
                    expected: schema.width(),
                    found: record.len(),
                });
            }
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(Self { schema, rows })
    }

    /// The header schema of this table.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of data rows (header excluded).
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Selects feature and target columns into a numeric [`TableDataset`].
    ///
    /// Offsets are checked against the schema before any parsing. Every cell
    /// of a selected column must parse as a float; the first offending cell
    /// fails the whole selection with its row and column name.
    pub fn select(
        &self,
        feature_offsets: &[usize],
        target_offset: usize,
    ) -> Result<TableDataset, DatasetError> {
        for &offset in feature_offsets {
            self.schema.check_offset(offset)?;
        }
        self.schema.check_offset(target_offset)?;

        let parse = |row: usize, offset: usize| -> Result<f64, DatasetError> {
            let cell = &self.rows[row][offset];
            cell.trim()
                .parse::<f64>()
                .map_err(|_| DatasetError::NonNumeric {
                    row,
                    column: self
                        .schema
                        .name(offset)
                        .unwrap_or_default()
                        .to_string(),
                    value: cell.clone(),
                })
        };

        let mut x = Vec::with_capacity(self.rows.len());
        let mut y = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let mut features = Vec::with_capacity(feature_offsets.len());
            for &offset in feature_offsets {
                features.push(parse(row, offset)?);
            }
            x.push(features);
            y.push(parse(row, target_offset)?);
        }

        TableDataset::new(x, y)
    }
}

/// An in-memory `(X, y)` dataset with positional row access.
#[derive(Debug)]
pub struct TableDataset {
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
}

impl TableDataset {
    /// Creates a dataset from feature rows and aligned target values.
    ///
    /// # Errors
    /// [`DatasetError::Inconsistent`] if lengths differ or rows are ragged.
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::Inconsistent(format!(
                "{} feature rows vs {} targets",
                x.len(),
                y.len()
            )));
        }
        if let Some(first) = x.first() {
            let n_features = first.len();
            if !x.iter().all(|row| row.len() == n_features) {
                return Err(DatasetError::Inconsistent(
                    "feature rows have varying widths".to_string(),
                ));
            }
        }
        Ok(Self { x, y })
    }

    /// Number of features per row (zero for an empty dataset).
    pub fn n_features(&self) -> usize {
        self.x.first().map_or(0, Vec::len)
    }
}

impl Dataset for TableDataset {
    type Error = DatasetError;

    fn len(&self) -> Option<usize> {
        Some(self.x.len())
    }

    fn get_batch<B: Backend>(
        &self,
        range: Range<usize>,
    ) -> Result<(Tensor2D<B>, Tensor1D<B>), Self::Error> {
        if range.start > range.end || range.end > self.x.len() {
            return Err(DatasetError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.x.len(),
            });
        }

        let batch_x = &self.x[range.clone()];
        let batch_y = &self.y[range];

        let n_rows = batch_x.len();
        let n_features = self.n_features();
        let data: Vec<f64> = batch_x.iter().flat_map(|row| row.iter()).copied().collect();

        Ok((
            Tensor2D::<B>::new(data, n_rows, n_features),
            Tensor1D::<B>::new(batch_y.to_vec()),
        ))
    }
}
