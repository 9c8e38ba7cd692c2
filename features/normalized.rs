use super::Error;
use itertools::izip;
use linsep_metrics::{MeanVariance, StreamingMetric};
use ndarray::prelude::*;
use rayon::prelude::*;

/**
A `NormalizedFeatureGroup` transforms a number column to zero mean and unit variance. [Learn more](https://en.wikipedia.org/wiki/Feature_scaling#Standardization_(Z-score_Normalization).

# Example

For the column `[0.0, 5.2, 1.3, 10.0]`:

Mean: 4.125

Standard Deviation: 3.89447

`feature_value =  (value - mean) / std`

| column value | feature value                        |
|--------------|--------------------------------------|
| 0.0          | (0.0 - 4.125) / 3.89447  = -1.05919  |
| 5.2          | (5.2 - 4.125) / 3.89447  = 0.27603   |
| 1.3          | (1.3 - 4.125) / 3.89447  = -0.72539  |
| 10.0         | (10.0 - 4.125) / 3.89447 = 1.50855   |

A column with zero variance has no spread to scale, so every value maps to 0.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedFeatureGroup {
	pub mean: f64,
	pub variance: f64,
}

impl NormalizedFeatureGroup {
	pub fn fit(column: ArrayView1<f64>) -> NormalizedFeatureGroup {
		let mut mean_variance = MeanVariance::default();
		for value in column.iter() {
			mean_variance.update(*value);
		}
		let variance = mean_variance.variance().unwrap_or(0.0);
		Self {
			mean: mean_variance.mean,
			variance,
		}
	}

	pub fn compute(&self, value: f64) -> f64 {
		if self.variance == 0.0 {
			0.0
		} else {
			(value - self.mean) / f64::sqrt(self.variance)
		}
	}
}

/// A `Standardizer` holds one `NormalizedFeatureGroup` per column of the feature matrix it was fit on.
#[derive(Clone, Debug, PartialEq)]
pub struct Standardizer {
	pub feature_groups: Vec<NormalizedFeatureGroup>,
}

impl Standardizer {
	pub fn fit(features: ArrayView2<f64>) -> Standardizer {
		let mut feature_groups = Vec::with_capacity(features.ncols());
		features
			.axis_iter(Axis(1))
			.into_par_iter()
			.map(NormalizedFeatureGroup::fit)
			.collect_into_vec(&mut feature_groups);
		Standardizer { feature_groups }
	}

	pub fn transform(&self, features: ArrayView2<f64>) -> Result<Array2<f64>, Error> {
		if features.ncols() != self.feature_groups.len() {
			return Err(Error::ColumnCountMismatch {
				expected: self.feature_groups.len(),
				actual: features.ncols(),
			});
		}
		Ok(self.apply(features))
	}

	pub fn fit_transform(features: ArrayView2<f64>) -> (Standardizer, Array2<f64>) {
		let standardizer = Standardizer::fit(features);
		let standardized = standardizer.apply(features);
		(standardizer, standardized)
	}

	fn apply(&self, features: ArrayView2<f64>) -> Array2<f64> {
		let mut standardized = features.to_owned();
		for (mut column, feature_group) in izip!(
			standardized.axis_iter_mut(Axis(1)),
			self.feature_groups.iter()
		) {
			column.mapv_inplace(|value| feature_group.compute(value));
		}
		standardized
	}
}

#[test]
fn test_normalized_feature_group() {
	let column = arr1(&[0.0, 5.2, 1.3, 10.0]);
	let feature_group = NormalizedFeatureGroup::fit(column.view());
	assert!((feature_group.mean - 4.125).abs() < 1e-12);
	assert!((feature_group.compute(0.0) - -1.05919).abs() < 1e-4);
	assert!((feature_group.compute(10.0) - 1.50855).abs() < 1e-4);
}

#[test]
fn test_standardized_columns_have_zero_mean_and_unit_variance() {
	let features = arr2(&[[1.0, 10.0], [2.0, 30.0], [3.0, 20.0], [6.0, 40.0]]);
	let (_, standardized) = Standardizer::fit_transform(features.view());
	for column in standardized.axis_iter(Axis(1)) {
		let mean = column.sum() / 4.0;
		let variance = column.mapv(|value| (value - mean).powi(2)).sum() / 4.0;
		assert!(mean.abs() < 1e-12);
		assert!((variance - 1.0).abs() < 1e-12);
	}
}

#[test]
fn test_constant_column() {
	let features = arr2(&[[3.0, 1.0], [3.0, 2.0]]);
	let standardizer = Standardizer::fit(features.view());
	let standardized = standardizer.transform(features.view()).unwrap();
	assert_eq!(standardized.column(0), arr1(&[0.0, 0.0]));
	assert_eq!(standardized.column(1), arr1(&[-1.0, 1.0]));
}

#[test]
fn test_transform_column_count_mismatch() {
	let standardizer = Standardizer::fit(arr2(&[[1.0, 2.0], [3.0, 4.0]]).view());
	let result = standardizer.transform(arr2(&[[1.0], [2.0]]).view());
	assert_eq!(
		result.unwrap_err(),
		Error::ColumnCountMismatch {
			expected: 2,
			actual: 1
		}
	);
}
