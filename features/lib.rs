/*!
This crate prepares raw feature matrices and class labels for the linear classifiers in `linsep_linear`. It standardizes features to zero mean and unit variance, prepends the bias column that turns a feature matrix into a design matrix, maps class tokens to integer labels, and builds the label encodings each classifier expects: one-vs-rest labels, one-hot target matrices, and class-negated perceptron batches.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod design;
mod labels;
mod normalized;

pub use self::design::{augment_bias, class_negated_batch, select_columns};
pub use self::labels::{one_hot, one_vs_rest, ClassMapping};
pub use self::normalized::{NormalizedFeatureGroup, Standardizer};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("unknown class \"{0}\"")]
	UnknownClass(String),
	#[error("duplicate class \"{0}\"")]
	DuplicateClass(String),
	#[error("label {label} is out of range for {n_classes} classes")]
	LabelOutOfRange { label: usize, n_classes: usize },
	#[error("feature index {index} is out of range for {n_features} features")]
	FeatureIndexOutOfRange { index: usize, n_features: usize },
	#[error("the features have {n_rows} rows but there are {n_labels} labels")]
	LabelCountMismatch { n_rows: usize, n_labels: usize },
	#[error("the standardizer was fit on {expected} columns but the features have {actual}")]
	ColumnCountMismatch { expected: usize, actual: usize },
}
