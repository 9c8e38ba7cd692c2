/*!
This module generates a seeded stand-in for the iris flower dataset: three classes of fifty examples by default, four features each, drawn from independent normal distributions with the per-class means and standard deviations of the real measurements (sepal length, sepal width, petal length, petal width). As in the real data, the first class separates cleanly from the other two, which overlap.
*/

use super::Dataset;
use ndarray::prelude::*;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256Plus;

pub const CLASSES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// (mean, standard deviation) of each feature, per class.
const DISTRIBUTIONS: [[(f64, f64); 4]; 3] = [
	[(5.006, 0.352), (3.428, 0.379), (1.462, 0.174), (0.246, 0.105)],
	[(5.936, 0.516), (2.770, 0.314), (4.260, 0.470), (1.326, 0.198)],
	[(6.588, 0.636), (2.974, 0.322), (5.552, 0.552), (2.026, 0.275)],
];

/// Generate `n_examples_per_class` examples of each class, grouped by class.
pub fn iris_like(n_examples_per_class: usize, seed: u64) -> Dataset {
	let mut rng = Xoshiro256Plus::seed_from_u64(seed);
	let n_features = DISTRIBUTIONS[0].len();
	let n_examples = n_examples_per_class * CLASSES.len();
	let mut features = Array2::zeros((n_examples, n_features));
	let mut labels = Vec::with_capacity(n_examples);
	for (class_index, (class, distributions)) in
		CLASSES.iter().zip(DISTRIBUTIONS.iter()).enumerate()
	{
		for example_index in 0..n_examples_per_class {
			let row = class_index * n_examples_per_class + example_index;
			for (feature_index, (mean, standard_deviation)) in distributions.iter().enumerate() {
				let z: f64 = rng.sample(StandardNormal);
				features[(row, feature_index)] = mean + standard_deviation * z;
			}
			labels.push((*class).to_owned());
		}
	}
	Dataset {
		features,
		labels,
		classes: CLASSES.iter().map(|class| (*class).to_owned()).collect(),
	}
}

#[test]
fn test_iris_like() {
	let dataset = iris_like(50, 0);
	assert_eq!(dataset.features.dim(), (150, 4));
	assert_eq!(dataset.labels.len(), 150);
	assert_eq!(dataset.labels[0], "setosa");
	assert_eq!(dataset.labels[50], "versicolor");
	assert_eq!(dataset.labels[149], "virginica");
	// Petal length is the clearest separator between the first class and the others.
	let setosa_petal_length = dataset.features.slice(s![..50, 2]).mean().unwrap();
	let virginica_petal_length = dataset.features.slice(s![100.., 2]).mean().unwrap();
	assert!(setosa_petal_length < 2.0);
	assert!(virginica_petal_length > 5.0);
}

#[test]
fn test_iris_like_is_seeded() {
	assert_eq!(iris_like(10, 3).features, iris_like(10, 3).features);
	assert_ne!(iris_like(10, 3).features, iris_like(10, 4).features);
}
