use super::Error;
use ndarray::prelude::*;

/// Prepend a column of ones to `features`, producing a design matrix whose column 0 is the bias term.
pub fn augment_bias(features: ArrayView2<f64>) -> Array2<f64> {
	let mut design = Array2::ones((features.nrows(), features.ncols() + 1));
	design.slice_mut(s![.., 1..]).assign(&features);
	design
}

/**
Select a subset of features from a design matrix, keeping the bias column.

`feature_indices` refer to the columns of the feature matrix before augmentation, so feature `i` lives in design column `i + 1`. The returned matrix has the bias in column 0 followed by the selected features in the order given.
*/
pub fn select_columns(
	design: ArrayView2<f64>,
	feature_indices: &[usize],
) -> Result<Array2<f64>, Error> {
	let n_features = design.ncols().saturating_sub(1);
	let mut columns = Vec::with_capacity(feature_indices.len() + 1);
	columns.push(0);
	for index in feature_indices.iter() {
		if *index >= n_features {
			return Err(Error::FeatureIndexOutOfRange {
				index: *index,
				n_features,
			});
		}
		columns.push(index + 1);
	}
	Ok(design.select(Axis(1), &columns))
}

/**
Build the training batch for a two class batch perceptron.

The rows of `design` labeled 0 are copied unchanged, followed by every other row multiplied by -1. With the second class negated, a separating weight vector is one where every row of the batch has a strictly positive dot product with it.
*/
pub fn class_negated_batch(
	design: ArrayView2<f64>,
	labels: ArrayView1<usize>,
) -> Result<Array2<f64>, Error> {
	if design.nrows() != labels.len() {
		return Err(Error::LabelCountMismatch {
			n_rows: design.nrows(),
			n_labels: labels.len(),
		});
	}
	let positive = labels
		.iter()
		.enumerate()
		.filter(|(_, label)| **label == 0)
		.map(|(index, _)| index);
	let negative = labels
		.iter()
		.enumerate()
		.filter(|(_, label)| **label != 0)
		.map(|(index, _)| index);
	let order: Vec<usize> = positive.chain(negative).collect();
	let n_positive = labels.iter().filter(|label| **label == 0).count();
	let mut batch = design.select(Axis(0), &order);
	batch
		.slice_mut(s![n_positive.., ..])
		.mapv_inplace(|value| -value);
	Ok(batch)
}

#[test]
fn test_augment_bias() {
	let features = arr2(&[[0.5, 2.0], [-1.0, 3.0]]);
	let design = augment_bias(features.view());
	assert_eq!(design, arr2(&[[1.0, 0.5, 2.0], [1.0, -1.0, 3.0]]));
}

#[test]
fn test_augment_bias_no_rows() {
	let features = Array2::<f64>::zeros((0, 3));
	let design = augment_bias(features.view());
	assert_eq!(design.dim(), (0, 4));
}

#[test]
fn test_select_columns() {
	let design = arr2(&[[1.0, 5.0, 6.0, 7.0, 8.0], [1.0, 9.0, 10.0, 11.0, 12.0]]);
	let selected = select_columns(design.view(), &[2, 3]).unwrap();
	assert_eq!(selected, arr2(&[[1.0, 7.0, 8.0], [1.0, 11.0, 12.0]]));
	assert_eq!(
		select_columns(design.view(), &[4]).unwrap_err(),
		Error::FeatureIndexOutOfRange {
			index: 4,
			n_features: 4
		}
	);
}

#[test]
fn test_class_negated_batch() {
	let design = arr2(&[[1.0, 3.0], [1.0, 1.0], [1.0, 4.0], [1.0, 2.0]]);
	let labels = arr1(&[1, 0, 1, 0]);
	let batch = class_negated_batch(design.view(), labels.view()).unwrap();
	assert_eq!(
		batch,
		arr2(&[[1.0, 1.0], [1.0, 2.0], [-1.0, -3.0], [-1.0, -4.0]])
	);
}

#[test]
fn test_class_negated_batch_label_count_mismatch() {
	let design = arr2(&[[1.0, 3.0], [1.0, 1.0]]);
	let labels = arr1(&[1]);
	assert_eq!(
		class_negated_batch(design.view(), labels.view()).unwrap_err(),
		Error::LabelCountMismatch {
			n_rows: 2,
			n_labels: 1
		}
	);
}
