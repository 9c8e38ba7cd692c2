/*!
This crate computes linear classification boundaries. There are three model types:

- [`LeastSquaresClassifier`](struct.LeastSquaresClassifier.html) separates two classes labeled 0 and 1 with the minimum-norm least squares solution `W = pinv(X) t`.
- [`LeastSquaresMulticlassClassifier`](struct.LeastSquaresMulticlassClassifier.html) fits one least squares column per class against a one-hot target matrix and predicts the class whose column scores highest.
- [`BatchPerceptron`](struct.BatchPerceptron.html) iteratively corrects a weight vector with the sum of all misclassified rows of a class-negated batch until every row scores positive or the epoch budget runs out.

Every model works on design matrices, which are feature matrices whose column 0 is a constant bias term of 1. Use `linsep_features::augment_bias` to build one. Each model's `evaluate` reports the number of misclassified examples and the accuracy as a percentage.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod batch_perceptron;
mod decision_boundary;
mod least_squares;
mod least_squares_multiclass;
mod pseudo_inverse;

pub use self::batch_perceptron::{BatchPerceptron, TrainOptions, TrainProgress};
pub use self::decision_boundary::{decision_boundaries, decision_boundary, ClassBoundary, Line};
pub use self::least_squares::LeastSquaresClassifier;
pub use self::least_squares_multiclass::LeastSquaresMulticlassClassifier;
pub use self::pseudo_inverse::pseudo_inverse;
pub use linsep_metrics::MisclassificationsOutput;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("shape mismatch: expected {expected} {what}, got {actual}")]
	ShapeMismatch {
		what: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("failed to compute the pseudo-inverse: {0}")]
	PseudoInverse(&'static str),
}

/// Return a `ShapeMismatch` error unless `actual == expected`.
fn check_shape(what: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
	if expected == actual {
		Ok(())
	} else {
		Err(Error::ShapeMismatch {
			what,
			expected,
			actual,
		})
	}
}
