//! End-to-end regression pipeline over a solar measurement table.
//!
//! [`run`] wires the crate's pieces together: load a CSV table, split it
//! into train and test halves at a fixed row, standardize the feature
//! columns with statistics from the training half only, fit the network,
//! and return predictions for the held-out rows.
//!
//! All state lives in locals inside [`run`]; callers configure a run
//! through [`PipelineConfig`] and get the predictions back as a plain
//! `Vec<f64>`.

use crate::{
    backend::{Backend, NdarrayBackend},
    dataset::{CsvTable, Dataset, DatasetError},
    loss::SquaredLoss,
    model::{InferenceModel, MlpRegressor},
    preprocessing::{FittedTransformer, PreprocessingError, StandardScaler, Transformer},
    trainer::{TrainError, Trainer},
};
use std::path::PathBuf;
use tracing::info;

/// Configuration for one pipeline run.
///
/// The defaults reproduce the original solar study: features are the two
/// columns after the timestamp, the target is the column after them, the
/// first 8000 rows train and the rest are held out.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Path to the CSV file with a header row.
    pub data_path: PathBuf,
    /// Column offsets used as model inputs.
    pub feature_offsets: Vec<usize>,
    /// Column offset holding the regression target.
    pub target_offset: usize,
    /// Rows before this index train the model; rows from it on are scored.
    pub split_row: usize,
    /// Hidden layer widths of the network.
    pub hidden_layer_sizes: Vec<usize>,
    /// L2 penalty strength.
    pub alpha: f64,
    /// Seed for weight initialization.
    pub seed: u64,
    /// Iteration cap for the solver.
    pub max_iter: usize,
    /// Gradient tolerance for early stopping.
    pub tol: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("../data/solar.csv"),
            feature_offsets: vec![1, 2],
            target_offset: 3,
            split_row: 8000,
            hidden_layer_sizes: vec![5, 2],
            alpha: 1e-5,
            seed: 1,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Errors from a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("preprocessing failed: {0}")]
    Preprocessing(#[from] PreprocessingError),
    #[error(transparent)]
    Train(#[from] TrainError),
    #[error("split row {split} leaves no test rows in a table of {rows} rows")]
    DegenerateSplit { rows: usize, split: usize },
}

/// Runs the full pipeline with the default [`NdarrayBackend`].
///
/// Returns one prediction per held-out row, in table order.
pub fn run(config: &PipelineConfig) -> Result<Vec<f64>, PipelineError> {
    run_with_backend::<NdarrayBackend>(config)
}

/// Runs the full pipeline on an explicit backend.
pub fn run_with_backend<B: Backend>(config: &PipelineConfig) -> Result<Vec<f64>, PipelineError> {
    let table = CsvTable::load(&config.data_path)?;
    let n_rows = table.n_rows();
    info!(
        path = %config.data_path.display(),
        rows = n_rows,
        columns = table.schema().width(),
        "loaded table"
    );

    if config.split_row == 0 || config.split_row >= n_rows {
        return Err(PipelineError::DegenerateSplit {
            rows: n_rows,
            split: config.split_row,
        });
    }

    let dataset = table.select(&config.feature_offsets, config.target_offset)?;
    let (x_train, y_train) = dataset.get_batch::<B>(0..config.split_row)?;
    let (x_test, _y_test) = dataset.get_batch::<B>(config.split_row..n_rows)?;
    info!(
        train_rows = config.split_row,
        test_rows = n_rows - config.split_row,
        "split table"
    );

    // Standardization statistics come from the training half only; the test
    // half is transformed with the same mean and scale.
    let scaler = StandardScaler::<B>::new().fit(&x_train)?;
    let x_train = scaler.transform(&x_train)?;
    let x_test = scaler.transform(&x_test)?;

    let model = MlpRegressor::<B>::new(
        config.feature_offsets.len(),
        &config.hidden_layer_sizes,
        config.seed,
    );
    let trainer = Trainer::builder(SquaredLoss)
        .alpha(config.alpha)
        .max_iter(config.max_iter)
        .tol(config.tol)
        .build();
    let fitted = trainer.fit(model, &x_train, &y_train)?;

    Ok(fitted.predict_batch(&x_test).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(rows: &[(f64, f64, f64)]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "time,irradiance,temperature,power").unwrap();
        for (i, (a, b, t)) in rows.iter().enumerate() {
            writeln!(file, "2016-01-01T{:02}:00,{},{},{}", i % 24, a, b, t).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn linear_rows(n: usize) -> Vec<(f64, f64, f64)> {
        (0..n)
            .map(|i| {
                let a = (i % 13) as f64 / 13.0;
                let b = (i % 7) as f64 / 7.0;
                (a, b, 3.0 * a - 2.0 * b + 0.5)
            })
            .collect()
    }

    fn small_config(path: PathBuf, split_row: usize) -> PipelineConfig {
        PipelineConfig {
            data_path: path,
            split_row,
            max_iter: 300,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_prediction_count_matches_test_rows() {
        let rows = linear_rows(120);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 100);

        let preds = run(&config).unwrap();
        assert_eq!(preds.len(), 20);
    }

    #[test]
    fn test_single_test_row() {
        let rows = linear_rows(101);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 100);

        let preds = run(&config).unwrap();
        assert_eq!(preds.len(), 1);
    }

    #[test]
    fn test_learns_linear_relation() {
        let rows = linear_rows(150);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 120);

        let preds = run(&config).unwrap();
        let mse: f64 = preds
            .iter()
            .zip(rows[120..].iter())
            .map(|(p, (_, _, t))| (p - t).powi(2))
            .sum::<f64>()
            / preds.len() as f64;
        assert!(mse < 0.1, "mse = {}", mse);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let rows = linear_rows(80);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 60);

        assert_eq!(run(&config).unwrap(), run(&config).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let config = PipelineConfig {
            data_path: PathBuf::from("/no/such/file.csv"),
            ..PipelineConfig::default()
        };
        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Dataset(DatasetError::Io { .. })));
    }

    #[test]
    fn test_split_beyond_table() {
        let rows = linear_rows(50);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 50);

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::DegenerateSplit { rows: 50, split: 50 }
        ));
    }

    #[test]
    fn test_split_at_zero() {
        let rows = linear_rows(50);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 0);

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateSplit { split: 0, .. }));
    }

    #[test]
    fn test_non_numeric_feature_cell() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "time,irradiance,temperature,power").unwrap();
        writeln!(file, "t0,1.0,2.0,3.0").unwrap();
        writeln!(file, "t1,bad,2.0,3.0").unwrap();
        writeln!(file, "t2,1.5,2.5,3.5").unwrap();
        file.flush().unwrap();

        let config = small_config(file.path().to_path_buf(), 2);
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Dataset(DatasetError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_non_numeric_timestamp_is_ignored() {
        // Column 0 is never selected, so its text content must not matter.
        let rows = linear_rows(40);
        let file = write_csv(&rows);
        let config = small_config(file.path().to_path_buf(), 30);

        assert!(run(&config).is_ok());
    }
}
