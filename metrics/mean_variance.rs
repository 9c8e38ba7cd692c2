//! https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Parallel_algorithm

use super::{Metric, StreamingMetric};
use num_traits::ToPrimitive;

/// The population mean and variance of a sequence of values. This is the variance with `n` in the denominator, the same convention as scikit-learn's `StandardScaler`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeanVariance {
	pub n: u64,
	pub mean: f64,
	pub m2: f64,
}

impl MeanVariance {
	/// Returns `None` if no values were seen.
	pub fn variance(&self) -> Option<f64> {
		if self.n == 0 {
			None
		} else {
			Some(m2_to_variance(self.m2, self.n))
		}
	}
}

impl<'a> Metric<'a> for MeanVariance {
	type Input = &'a [f64];
	type Output = MeanVariance;

	fn compute(input: Self::Input) -> Self::Output {
		let mut metric = MeanVariance::default();
		for value in input.iter() {
			metric.update(*value);
		}
		metric
	}
}

impl StreamingMetric<'_> for MeanVariance {
	type Input = f64;
	type Output = MeanVariance;

	fn update(&mut self, value: f64) {
		let (mean, m2) = merge_mean_m2(self.n, self.mean, self.m2, 1, value, 0.0);
		self.n += 1;
		self.mean = mean;
		self.m2 = m2;
	}

	fn merge(&mut self, other: Self) {
		if other.n == 0 {
			return;
		}
		let (mean, m2) = merge_mean_m2(self.n, self.mean, self.m2, other.n, other.mean, other.m2);
		self.n += other.n;
		self.mean = mean;
		self.m2 = m2;
	}

	fn finalize(self) -> Self::Output {
		self
	}
}

/// combine two separate means and variances into a single mean and variance
/// useful in parallel algorithms
pub fn merge_mean_m2(
	n_a: u64,
	mean_a: f64,
	m2_a: f64,
	n_b: u64,
	mean_b: f64,
	m2_b: f64,
) -> (f64, f64) {
	let n_a = n_a.to_f64().unwrap();
	let n_b = n_b.to_f64().unwrap();
	(
		(((n_a * mean_a) + (n_b * mean_b)) / (n_a + n_b)),
		m2_a + m2_b + (mean_b - mean_a) * (mean_b - mean_a) * (n_a * n_b / (n_a + n_b)),
	)
}

pub fn m2_to_variance(m2: f64, n: u64) -> f64 {
	m2 / n.to_f64().unwrap()
}

#[test]
fn test_mean_variance() {
	let metric = MeanVariance::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
	assert_eq!(metric.n, 8);
	assert!((metric.mean - 5.0).abs() < 1e-12);
	assert!((metric.variance().unwrap() - 4.0).abs() < 1e-12);
}

#[test]
fn test_merge_matches_single_pass() {
	let values = [0.0, 5.2, 1.3, 10.0, -3.5];
	let whole = MeanVariance::compute(&values);
	let mut left = MeanVariance::compute(&values[..2]);
	let right = MeanVariance::compute(&values[2..]);
	left.merge(right);
	assert_eq!(left.n, whole.n);
	assert!((left.mean - whole.mean).abs() < 1e-12);
	assert!((left.m2 - whole.m2).abs() < 1e-9);
}

#[test]
fn test_empty() {
	let metric = MeanVariance::compute(&[]);
	assert_eq!(metric.variance(), None);
}
