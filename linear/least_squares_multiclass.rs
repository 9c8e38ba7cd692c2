use super::{check_shape, decision_boundaries, pseudo_inverse, ClassBoundary, Error};
use itertools::izip;
use linsep_metrics::{Misclassifications, MisclassificationsOutput, StreamingMetric};
use ndarray::prelude::*;

/**
A `LeastSquaresMulticlassClassifier` fits one least squares discriminant per class against a one-hot target matrix. The predicted class of an example is the column with the highest output.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct LeastSquaresMulticlassClassifier {
	/// The shape is (n_features + 1, n_classes). Column `j` is the discriminant for class `j`.
	pub weights: Array2<f64>,
}

impl LeastSquaresMulticlassClassifier {
	/// Compute `pinv(features) targets`, where `targets` is the `(n_examples, n_classes)` one-hot encoding of the labels.
	pub fn train(
		features: ArrayView2<f64>,
		targets: ArrayView2<f64>,
	) -> Result<LeastSquaresMulticlassClassifier, Error> {
		check_shape("target rows", features.nrows(), targets.nrows())?;
		let weights = pseudo_inverse(features)?.dot(&targets);
		Ok(LeastSquaresMulticlassClassifier { weights })
	}

	pub fn n_classes(&self) -> usize {
		self.weights.ncols()
	}

	/// Compute the `(n_examples, n_classes)` matrix of raw outputs.
	pub fn predict(&self, features: ArrayView2<f64>) -> Result<Array2<f64>, Error> {
		check_shape("feature columns", self.weights.nrows(), features.ncols())?;
		Ok(features.dot(&self.weights))
	}

	/// Compute the predicted class of each example. Ties go to the lowest class index.
	pub fn predict_classes(&self, features: ArrayView2<f64>) -> Result<Array1<usize>, Error> {
		let outputs = self.predict(features)?;
		Ok(outputs
			.axis_iter(Axis(0))
			.map(|row| argmax(row).unwrap_or(0))
			.collect())
	}

	/**
	Turn each row of outputs into a one-hot row at its highest column and count the rows that differ from the corresponding row of `targets` in any entry.
	*/
	pub fn evaluate(
		&self,
		features: ArrayView2<f64>,
		targets: ArrayView2<f64>,
	) -> Result<MisclassificationsOutput, Error> {
		check_shape("target rows", features.nrows(), targets.nrows())?;
		check_shape("target columns", self.n_classes(), targets.ncols())?;
		let outputs = self.predict(features)?;
		let mut metric = Misclassifications::new();
		for (outputs, targets) in izip!(outputs.axis_iter(Axis(0)), targets.axis_iter(Axis(0))) {
			let prediction = argmax(outputs);
			let matched = targets.iter().enumerate().all(|(class_index, target)| {
				let predicted = if prediction == Some(class_index) {
					1.0
				} else {
					0.0
				};
				*target == predicted
			});
			metric.update(matched);
		}
		Ok(metric.finalize())
	}

	/// The boundary between every pair of classes, if the model was trained on exactly two features.
	pub fn decision_boundaries(&self) -> Vec<ClassBoundary> {
		decision_boundaries(self.weights.view())
	}
}

/// The index of the first maximum value, or `None` if `values` is empty. A NaN counts as the maximum, so if there is one the index of the first NaN is returned.
fn argmax(values: ArrayView1<f64>) -> Option<usize> {
	let mut max: Option<(usize, f64)> = None;
	for (index, value) in values.iter().enumerate() {
		if value.is_nan() {
			return Some(index);
		}
		match max {
			Some((_, max_value)) if *value <= max_value => {}
			_ => max = Some((index, *value)),
		}
	}
	max.map(|(index, _)| index)
}

#[cfg(test)]
fn three_clusters() -> (Array2<f64>, Array1<usize>) {
	let features = arr2(&[
		[1.0, 10.0, 0.0],
		[1.0, 11.0, 1.0],
		[1.0, 9.0, 0.0],
		[1.0, 0.0, 10.0],
		[1.0, 1.0, 11.0],
		[1.0, 0.0, 9.0],
		[1.0, 0.0, 0.0],
		[1.0, 1.0, 0.0],
		[1.0, 0.0, 1.0],
	]);
	let labels = arr1(&[0, 0, 0, 1, 1, 1, 2, 2, 2]);
	(features, labels)
}

#[cfg(test)]
fn one_hot(labels: ArrayView1<usize>, n_classes: usize) -> Array2<f64> {
	let mut targets = Array2::zeros((labels.len(), n_classes));
	for (index, label) in labels.iter().enumerate() {
		targets[(index, *label)] = 1.0;
	}
	targets
}

#[test]
fn test_separable_clusters() {
	let (features, labels) = three_clusters();
	let targets = one_hot(labels.view(), 3);
	let model = LeastSquaresMulticlassClassifier::train(features.view(), targets.view()).unwrap();
	assert_eq!(model.weights.dim(), (3, 3));
	let output = model.evaluate(features.view(), targets.view()).unwrap();
	assert_eq!(output.n_misclassified, 0);
	assert_eq!(output.accuracy, Some(100.0));
	assert_eq!(model.predict_classes(features.view()).unwrap(), labels);
}

#[test]
fn test_count_matches_argmax_disagreements() {
	let (features, labels) = three_clusters();
	let targets = one_hot(labels.view(), 3);
	// Discriminants that only look at the first feature cannot tell classes 1 and 2 apart.
	let model = LeastSquaresMulticlassClassifier {
		weights: arr2(&[[-5.0, 0.0, 0.1], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]),
	};
	let predicted = model.predict_classes(features.view()).unwrap();
	let n_disagreements = izip!(predicted.iter(), labels.iter())
		.filter(|(predicted, label)| predicted != label)
		.count();
	let output = model.evaluate(features.view(), targets.view()).unwrap();
	assert_eq!(output.n_misclassified, n_disagreements);
	assert_eq!(output.n_misclassified, 3);
}

#[test]
fn test_ties_go_to_the_lowest_index() {
	let features = arr2(&[[1.0, 0.0], [1.0, 1.0]]);
	let targets = arr2(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
	let model = LeastSquaresMulticlassClassifier {
		weights: Array2::zeros((2, 3)),
	};
	assert_eq!(
		model.predict_classes(features.view()).unwrap(),
		arr1(&[0, 0])
	);
	let output = model.evaluate(features.view(), targets.view()).unwrap();
	assert_eq!(output.n_misclassified, 1);
	assert_eq!(output.accuracy, Some(50.0));
}

#[test]
fn test_argmax() {
	assert_eq!(argmax(arr1(&[0.1, 0.7, 0.7, 0.2]).view()), Some(1));
	assert_eq!(argmax(arr1(&[-3.0, -1.0, -2.0]).view()), Some(1));
	assert_eq!(argmax(arr1(&[]).view()), None);
	assert_eq!(argmax(arr1(&[1.0, f64::NAN]).view()), Some(1));
	assert_eq!(argmax(arr1(&[f64::NAN, 2.0, f64::NAN]).view()), Some(0));
}

#[test]
fn test_target_shape_mismatch() {
	let (features, labels) = three_clusters();
	let targets = one_hot(labels.view(), 3);
	let model = LeastSquaresMulticlassClassifier {
		weights: Array2::zeros((3, 2)),
	};
	assert_eq!(
		model.evaluate(features.view(), targets.view()),
		Err(Error::ShapeMismatch {
			what: "target columns",
			expected: 2,
			actual: 3,
		})
	);
}

#[test]
fn test_no_examples() {
	let model = LeastSquaresMulticlassClassifier {
		weights: Array2::zeros((2, 3)),
	};
	let features = Array2::<f64>::zeros((0, 2));
	let targets = Array2::<f64>::zeros((0, 3));
	let output = model.evaluate(features.view(), targets.view()).unwrap();
	assert_eq!(output.n_misclassified, 0);
	assert_eq!(output.accuracy, None);
}
