use super::{check_shape, decision_boundary, pseudo_inverse, Error, Line};
use itertools::izip;
use linsep_metrics::{Misclassifications, MisclassificationsOutput, StreamingMetric};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/**
A `LeastSquaresClassifier` separates two classes, labeled 0 and 1, with the weights that minimize the squared error between `X w` and the labels.

```
use linsep_linear::LeastSquaresClassifier;
use ndarray::prelude::*;

let features = arr2(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
let labels = arr1(&[0, 0, 1, 1]);
let model = LeastSquaresClassifier::train(features.view(), labels.view()).unwrap();
let output = model.evaluate(features.view(), labels.view()).unwrap();
assert_eq!(output.n_misclassified, 0);
assert_eq!(output.accuracy, Some(100.0));
```
*/
#[derive(Clone, Debug, PartialEq)]
pub struct LeastSquaresClassifier {
	/// One weight per column of the design matrix, starting with the bias weight.
	pub weights: Array1<f64>,
}

impl LeastSquaresClassifier {
	/// Compute `pinv(features) labels`, the minimum-norm least squares solution.
	pub fn train(
		features: ArrayView2<f64>,
		labels: ArrayView1<usize>,
	) -> Result<LeastSquaresClassifier, Error> {
		check_shape("labels", features.nrows(), labels.len())?;
		let targets = labels.mapv(|label| label.to_f64().unwrap());
		let weights = pseudo_inverse(features)?.dot(&targets);
		Ok(LeastSquaresClassifier { weights })
	}

	/// Compute the raw output `features w` for each example.
	pub fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
		check_shape("feature columns", self.weights.len(), features.ncols())?;
		Ok(features.dot(&self.weights))
	}

	/**
	Round each raw output to the nearest integer, with ties going to the even integer, and count the examples where the rounded output does not equal the label.

	Outputs far from both classes round to values like -1 or 2. These never equal a label and are counted as misclassified.
	*/
	pub fn evaluate(
		&self,
		features: ArrayView2<f64>,
		labels: ArrayView1<usize>,
	) -> Result<MisclassificationsOutput, Error> {
		check_shape("labels", features.nrows(), labels.len())?;
		let predictions = self.predict(features)?;
		let mut metric = Misclassifications::new();
		for (prediction, label) in izip!(predictions.iter(), labels.iter()) {
			metric.update(prediction.round_ties_even() == label.to_f64().unwrap());
		}
		Ok(metric.finalize())
	}

	/// The line where `w . x = 0`, if the model was trained on exactly two features.
	pub fn decision_boundary(&self) -> Option<Line> {
		decision_boundary(self.weights.view())
	}
}

#[test]
fn test_separable() {
	let features = arr2(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
	let labels = arr1(&[0, 0, 1, 1]);
	let model = LeastSquaresClassifier::train(features.view(), labels.view()).unwrap();
	assert!((model.weights[0] - -0.1).abs() < 1e-9);
	assert!((model.weights[1] - 0.4).abs() < 1e-9);
	let output = model.evaluate(features.view(), labels.view()).unwrap();
	insta::assert_debug_snapshot!(output, @r###"
 MisclassificationsOutput {
     n_misclassified: 0,
     n_examples: 4,
     accuracy: Some(
         100.0,
     ),
 }
 "###);
}

#[test]
fn test_training_weights_beat_a_perturbation() {
	let features = arr2(&[
		[1.0, -1.2, 0.3],
		[1.0, -0.8, -0.5],
		[1.0, -0.3, 0.9],
		[1.0, 0.4, -0.2],
		[1.0, 0.9, 0.6],
		[1.0, 1.5, -0.7],
	]);
	let labels = arr1(&[0, 0, 0, 1, 1, 1]);
	let model = LeastSquaresClassifier::train(features.view(), labels.view()).unwrap();
	let trained = model.evaluate(features.view(), labels.view()).unwrap();
	let perturbed = LeastSquaresClassifier {
		weights: &model.weights + &arr1(&[1.0, 0.0, 0.0]),
	};
	let perturbed = perturbed.evaluate(features.view(), labels.view()).unwrap();
	assert!(trained.accuracy.unwrap() >= perturbed.accuracy.unwrap());
	assert!(trained.n_misclassified < perturbed.n_misclassified);
}

#[test]
fn test_train_is_deterministic() {
	let features = arr2(&[[1.0, 0.3, 2.0], [1.0, -1.0, 0.5], [1.0, 2.5, -1.0], [1.0, 0.0, 0.0]]);
	let labels = arr1(&[1, 0, 1, 0]);
	let a = LeastSquaresClassifier::train(features.view(), labels.view()).unwrap();
	let b = LeastSquaresClassifier::train(features.view(), labels.view()).unwrap();
	assert_eq!(a, b);
}

#[test]
fn test_out_of_range_predictions_are_misclassified() {
	let features = arr2(&[[1.0, 0.0], [1.0, 1.0], [1.0, 5.0], [1.0, -4.0]]);
	let labels = arr1(&[0, 1, 1, 0]);
	let model = LeastSquaresClassifier {
		weights: arr1(&[0.0, 1.0]),
	};
	// The raw outputs are 0, 1, 5 and -4. Only the first two round to a label.
	let output = model.evaluate(features.view(), labels.view()).unwrap();
	assert_eq!(output.n_misclassified, 2);
	assert_eq!(output.accuracy, Some(50.0));
}

#[test]
fn test_rounding_ties_go_to_even() {
	let features = arr2(&[[1.0], [1.0]]);
	let model = LeastSquaresClassifier {
		weights: arr1(&[0.5]),
	};
	// 0.5 rounds to 0, not 1.
	let output = model
		.evaluate(features.view(), arr1(&[0, 1]).view())
		.unwrap();
	assert_eq!(output.n_misclassified, 1);
	let model = LeastSquaresClassifier {
		weights: arr1(&[1.5]),
	};
	// 1.5 rounds to 2, which is never a label.
	let output = model
		.evaluate(features.view(), arr1(&[0, 1]).view())
		.unwrap();
	assert_eq!(output.n_misclassified, 2);
}

#[test]
fn test_shape_mismatch() {
	let model = LeastSquaresClassifier {
		weights: arr1(&[0.0, 1.0, 2.0]),
	};
	let features = arr2(&[[1.0, 0.0], [1.0, 1.0]]);
	assert_eq!(
		model.evaluate(features.view(), arr1(&[0, 1]).view()),
		Err(Error::ShapeMismatch {
			what: "feature columns",
			expected: 3,
			actual: 2,
		})
	);
	assert_eq!(
		LeastSquaresClassifier::train(features.view(), arr1(&[0]).view()),
		Err(Error::ShapeMismatch {
			what: "labels",
			expected: 2,
			actual: 1,
		})
	);
}

#[test]
fn test_no_examples() {
	let model = LeastSquaresClassifier {
		weights: arr1(&[0.0, 1.0]),
	};
	let features = Array2::<f64>::zeros((0, 2));
	let labels = Array1::<usize>::zeros(0);
	let output = model.evaluate(features.view(), labels.view()).unwrap();
	assert_eq!(output.n_misclassified, 0);
	assert_eq!(output.accuracy, None);
}
