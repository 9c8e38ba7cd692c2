use ndarray::prelude::*;

/// A `Dataset` is a numeric feature matrix with one class token per row. `classes` lists every class in the order their integer labels are assigned.
#[derive(Clone, Debug)]
pub struct Dataset {
	pub features: Array2<f64>,
	pub labels: Vec<String>,
	pub classes: Vec<String>,
}

impl Dataset {
	pub fn n_examples(&self) -> usize {
		self.features.nrows()
	}

	pub fn n_features(&self) -> usize {
		self.features.ncols()
	}
}
