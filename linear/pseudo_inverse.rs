use super::Error;
use nalgebra::DMatrix;
use ndarray::prelude::*;

/// Singular values below this fraction of the largest singular value are treated as zero.
const RCOND: f64 = 1e-15;
const MAX_SVD_ITERATIONS: usize = 10_000;

/**
Compute the Moore-Penrose pseudo-inverse of `matrix` from its singular value decomposition.

For an `(n, m)` matrix the result is `(m, n)`. Rank deficient matrices do not fail, their negligible singular values are dropped and the result yields the minimum-norm least squares solution. An error is returned only if the decomposition itself does not converge, which happens for matrices containing non-finite values.
*/
pub fn pseudo_inverse(matrix: ArrayView2<f64>) -> Result<Array2<f64>, Error> {
	let (n_rows, n_cols) = matrix.dim();
	if n_rows == 0 || n_cols == 0 {
		return Ok(Array2::zeros((n_cols, n_rows)));
	}
	let svd = DMatrix::from_fn(n_rows, n_cols, |i, j| matrix[(i, j)])
		.try_svd(true, true, f64::EPSILON, MAX_SVD_ITERATIONS)
		.ok_or(Error::PseudoInverse("the singular value decomposition did not converge"))?;
	let max_singular_value = svd
		.singular_values
		.iter()
		.cloned()
		.fold(0.0, f64::max);
	let pseudo_inverse = svd
		.pseudo_inverse(RCOND * max_singular_value)
		.map_err(Error::PseudoInverse)?;
	Ok(Array2::from_shape_fn(
		(pseudo_inverse.nrows(), pseudo_inverse.ncols()),
		|(i, j)| pseudo_inverse[(i, j)],
	))
}

#[cfg(test)]
fn assert_close(a: ArrayView2<f64>, b: ArrayView2<f64>) {
	assert_eq!(a.dim(), b.dim());
	for (a, b) in a.iter().zip(b.iter()) {
		assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
	}
}

#[test]
fn test_invertible() {
	let matrix = arr2(&[[4.0, 7.0], [2.0, 6.0]]);
	let inverse = pseudo_inverse(matrix.view()).unwrap();
	assert_close(inverse.view(), arr2(&[[0.6, -0.7], [-0.2, 0.4]]).view());
}

#[test]
fn test_tall() {
	let matrix = arr2(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
	let inverse = pseudo_inverse(matrix.view()).unwrap();
	assert_eq!(inverse.dim(), (2, 4));
	// A tall matrix with full column rank has a left inverse.
	assert_close(inverse.dot(&matrix).view(), Array2::<f64>::eye(2).view());
}

#[test]
fn test_rank_deficient() {
	// The second column repeats the first, so the minimum-norm solution splits the weight evenly.
	let matrix = arr2(&[[1.0, 1.0], [2.0, 2.0]]);
	let inverse = pseudo_inverse(matrix.view()).unwrap();
	assert_close(inverse.view(), arr2(&[[0.1, 0.2], [0.1, 0.2]]).view());
}

#[test]
fn test_zero_matrix() {
	let matrix = Array2::<f64>::zeros((3, 2));
	let inverse = pseudo_inverse(matrix.view()).unwrap();
	assert_eq!(inverse, Array2::<f64>::zeros((2, 3)));
}

#[test]
fn test_empty() {
	let matrix = Array2::<f64>::zeros((0, 3));
	let inverse = pseudo_inverse(matrix.view()).unwrap();
	assert_eq!(inverse.dim(), (3, 0));
}
