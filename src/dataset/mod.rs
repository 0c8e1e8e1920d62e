//! Dataset abstractions for the regression pipeline.
//!
//! This module provides a generic [`Dataset`] trait for uniform `(X, y)`
//! access by row range, a schema-validated CSV loader ([`CsvTable`]) and the
//! in-memory [`TableDataset`] produced by selecting feature and target
//! columns from a loaded table.
//!
//! # Core Concepts
//!
//! - **Schema** — the ordered list of named columns read from the CSV header,
//!   against which every column selection is checked.
//! - **Dataset** — a source of `(X, y)` pairs where `X` is a feature matrix
//!   of shape `(n_samples, n_features)` and `y` a target vector of shape
//!   `(n_samples,)`.
//! - **Positional access** — `get_batch(range)` returns contiguous rows in
//!   order, which is how the pipeline realizes its train/test split.
//!
//! # Example
//!
//! ```
//! use solar_ann::backend::NdarrayBackend;
//! use solar_ann::dataset::{Dataset, TableDataset};
//!
//! let x = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
//! let y = vec![10.0, 20.0, 30.0];
//! let ds = TableDataset::new(x, y).unwrap();
//!
//! let (x_head, y_head) = ds.get_batch::<NdarrayBackend>(0..2).unwrap();
//! assert_eq!(x_head.shape(), (2, 2));
//! assert_eq!(y_head.to_vec(), vec![10.0, 20.0]);
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use std::fmt::Debug;
use std::ops::Range;

pub mod schema;
pub mod table;

pub use schema::Schema;
pub use table::{CsvTable, TableDataset};

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or accessing tabular data.
///
/// Every variant is fatal for the pipeline; there is no recovery path.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The input file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file contents.
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    /// A data row does not match the header width.
    #[error("row {row}: expected {expected} columns per the header, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A selected cell does not parse as a number.
    #[error("row {row}, column {column:?}: non-numeric value {value:?}")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    /// A column offset lies outside the schema.
    #[error("column offset {offset} out of range for schema with {width} columns")]
    ColumnOutOfRange { offset: usize, width: usize },

    /// Feature rows and target values have different lengths, or rows are ragged.
    #[error("inconsistent dataset: {0}")]
    Inconsistent(String),

    /// A requested row range lies outside the dataset.
    #[error("row range {start}..{end} out of bounds for {len} rows")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Abstract interface for a machine learning dataset.
///
/// Defines a contract for loading data in `(X, y)` format where `X` is a
/// feature matrix with shape `(n_samples, n_features)` and `y` a target
/// vector with shape `(n_samples,)`. Rows are returned in stored order, so
/// two calls with adjacent ranges partition the data without overlap.
pub trait Dataset {
    /// Error type returned when accessing data.
    type Error: Debug + 'static;

    /// Returns the total number of samples in the dataset, if known.
    ///
    /// `None` means the size is unknown (e.g., streaming sources).
    fn len(&self) -> Option<usize>;

    /// Checks whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Loads a subset of rows as tensors for the given index range.
    ///
    /// # Returns
    /// `(X, y)` with `X` of shape `(range.len(), n_features)` and `y` of
    /// length `range.len()`, both in stored row order.
    fn get_batch<B: Backend>(
        &self,
        range: Range<usize>,
    ) -> Result<(Tensor2D<B>, Tensor1D<B>), Self::Error>;
}
