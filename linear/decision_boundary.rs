use itertools::Itertools;
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// A line `x2 = slope * x1 + intercept` in the plane of two features.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
	pub slope: f64,
	pub intercept: f64,
}

impl Line {
	pub fn at(&self, x: f64) -> f64 {
		self.slope * x + self.intercept
	}

	/// Sample `n` evenly spaced points from `x_min` to `x_max`, inclusive. The last point is exactly at `x_max`.
	pub fn sample(&self, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
		match n {
			0 => Vec::new(),
			1 => vec![(x_min, self.at(x_min))],
			_ => {
				let step = (x_max - x_min) / (n - 1).to_f64().unwrap();
				(0..n)
					.map(|i| {
						let x = if i == n - 1 {
							x_max
						} else {
							x_min + step * i.to_f64().unwrap()
						};
						(x, self.at(x))
					})
					.collect()
			}
		}
	}
}

/**
Compute the decision boundary of a model with weights `[w0, w1, w2]` trained on two features with a bias column. Solving `w0 + w1 x1 + w2 x2 = 0` for `x2` gives

`x2 = -(w0 + w1 x1) / w2`

This returns `None` if there are not exactly three weights or if `w2` is zero, in which case the boundary is not a function of `x1`.
*/
pub fn decision_boundary(weights: ArrayView1<f64>) -> Option<Line> {
	if weights.len() != 3 || weights[2] == 0.0 {
		return None;
	}
	Some(Line {
		slope: -weights[1] / weights[2],
		intercept: -weights[0] / weights[2],
	})
}

/// The boundary between two classes of a multiclass model, where their discriminants are equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassBoundary {
	/// The pair of class indices `(i, j)` with `i < j`.
	pub classes: (usize, usize),
	pub line: Option<Line>,
}

/**
Compute the boundary between every pair of classes of a `(3, n_classes)` weight matrix whose column `j` is the discriminant for class `j`.

Classes `i` and `j` score equally where `(w_i - w_j) . x = 0`, so each boundary is the decision boundary of the difference of the two columns. The pairs are ordered `(0, 1), (0, 2), ..., (1, 2), ...`.
*/
pub fn decision_boundaries(weights: ArrayView2<f64>) -> Vec<ClassBoundary> {
	let n_classes = weights.ncols();
	(0..n_classes)
		.tuple_combinations()
		.map(|(i, j)| {
			let difference = &weights.column(i) - &weights.column(j);
			ClassBoundary {
				classes: (i, j),
				line: decision_boundary(difference.view()),
			}
		})
		.collect()
}

#[test]
fn test_decision_boundary() {
	let line = decision_boundary(arr1(&[1.0, 2.0, -4.0]).view()).unwrap();
	assert_eq!(
		line,
		Line {
			slope: 0.5,
			intercept: 0.25
		}
	);
	assert_eq!(line.at(2.0), 1.25);
	assert_eq!(decision_boundary(arr1(&[1.0, 2.0, 0.0]).view()), None);
	assert_eq!(decision_boundary(arr1(&[1.0, 2.0]).view()), None);
}

#[test]
fn test_decision_boundaries() {
	let weights = arr2(&[[1.0, 1.0, 1.0], [2.0, -1.0, 1.0], [3.0, 0.5, -1.0]]);
	let boundaries = decision_boundaries(weights.view());
	let pairs: Vec<(usize, usize)> = boundaries.iter().map(|boundary| boundary.classes).collect();
	assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
	for boundary in boundaries.iter() {
		let (i, j) = boundary.classes;
		let line = boundary.line.unwrap();
		for x1 in [-1.5, 0.0, 0.7, 2.0].iter() {
			let point = arr1(&[1.0, *x1, line.at(*x1)]);
			let scores = point.dot(&weights);
			assert!((scores[i] - scores[j]).abs() < 1e-9);
		}
	}
}

#[test]
fn test_decision_boundaries_parallel_to_x2() {
	// The first two discriminants have the same x2 weight, so their difference never depends on x2.
	let weights = arr2(&[[0.0, 1.0], [1.0, 0.0], [2.0, 2.0]]);
	let boundaries = decision_boundaries(weights.view());
	assert_eq!(
		boundaries,
		vec![ClassBoundary {
			classes: (0, 1),
			line: None,
		}]
	);
}

#[test]
fn test_sample() {
	let line = Line {
		slope: 1.0,
		intercept: 0.0,
	};
	let points = line.sample(-2.0, 2.0, 5);
	assert_eq!(
		points,
		vec![(-2.0, -2.0), (-1.0, -1.0), (0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]
	);
	assert!(line.sample(0.0, 1.0, 0).is_empty());
	let points = line.sample(-1.0, 3.0, 50);
	assert_eq!(points.len(), 50);
	assert_eq!(points[49], (3.0, 3.0));
}
