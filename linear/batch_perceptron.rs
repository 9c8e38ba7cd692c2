use super::{check_shape, decision_boundary, Error, Line};
use itertools::izip;
use linsep_metrics::{Misclassifications, MisclassificationsOutput, StreamingMetric};
use linsep_progress::ProgressCounter;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use rand::Rng;
use rand_distr::StandardNormal;

/// These are the options passed to `BatchPerceptron::train`.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainOptions {
	/// This is the maximum number of epochs to train. Training that has not converged after this many epochs stops anyway.
	pub max_epochs: usize,
	/// This is the learning rate for the first epoch.
	pub learning_rate: f64,
	/// The learning rate is multiplied by this factor every `learning_rate_decay_interval` epochs.
	pub learning_rate_decay: f64,
	/// The learning rate decays after every epoch whose number is a multiple of this value. A value of 0 disables decay.
	pub learning_rate_decay_interval: usize,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			max_epochs: 1000,
			learning_rate: 0.1,
			learning_rate_decay: 0.9,
			learning_rate_decay_interval: 10,
		}
	}
}

/// This is the training progress, which tracks the current epoch.
#[derive(Clone, Debug)]
pub struct TrainProgress(pub ProgressCounter);

/**
A `BatchPerceptron` is a two class linear classifier trained with the batch perceptron rule.

Training does not see class labels. It sees a batch in which the rows of class 0 are left as they are and the rows of class 1 are negated, see `linsep_features::class_negated_batch`. With that transformation a separating weight vector is one that gives every row of the batch a strictly positive dot product.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct BatchPerceptron {
	/// One weight per column of the design matrix, starting with the bias weight.
	pub weights: Array1<f64>,
	/// The number of epochs that ran. This is the epoch on which convergence was detected, or `max_epochs` if training did not converge.
	pub n_epochs: usize,
	/// True if every row of the training batch scored positive with `weights`.
	pub converged: bool,
}

impl BatchPerceptron {
	/**
	Train on a class-negated `batch`.

	The weights start from a standard normal draw from `rng`. Each epoch computes `batch w` over the whole batch. Rows scoring zero or below are misclassified. If there are none, training has converged and stops. Otherwise the sum of the misclassified rows, scaled by the learning rate, is added to the weights. After every `learning_rate_decay_interval`-th epoch the learning rate is multiplied by `learning_rate_decay`.

	Running out of epochs is not an error. The returned model has `converged == false`, `n_epochs == max_epochs`, and the last weights computed.
	*/
	pub fn train<R: Rng>(
		batch: ArrayView2<f64>,
		options: &TrainOptions,
		rng: &mut R,
		update_progress: &mut dyn FnMut(TrainProgress),
	) -> Result<BatchPerceptron, Error> {
		let initial_weights =
			Array1::from_shape_fn(batch.ncols(), |_| rng.sample::<f64, _>(StandardNormal));
		Self::train_from(batch, initial_weights, options, update_progress)
	}

	/// Train starting from `initial_weights` instead of a random draw. There must be one initial weight per column of `batch`.
	pub fn train_from(
		batch: ArrayView2<f64>,
		initial_weights: Array1<f64>,
		options: &TrainOptions,
		update_progress: &mut dyn FnMut(TrainProgress),
	) -> Result<BatchPerceptron, Error> {
		check_shape("initial weights", batch.ncols(), initial_weights.len())?;
		let n_features = batch.ncols();
		let mut weights = initial_weights;
		let mut learning_rate = options.learning_rate;
		let progress_counter = ProgressCounter::new(options.max_epochs.to_u64().unwrap());
		update_progress(TrainProgress(progress_counter.clone()));
		for epoch in 1..=options.max_epochs {
			progress_counter.inc(1);
			let predictions = batch.dot(&weights);
			let mut correction = Array1::<f64>::zeros(n_features);
			let mut n_misclassified = 0;
			for (row, prediction) in izip!(batch.axis_iter(Axis(0)), predictions.iter()) {
				if *prediction <= 0.0 {
					correction += &row;
					n_misclassified += 1;
				}
			}
			if n_misclassified == 0 {
				return Ok(BatchPerceptron {
					weights,
					n_epochs: epoch,
					converged: true,
				});
			}
			weights.scaled_add(learning_rate, &correction);
			if options.learning_rate_decay_interval != 0
				&& epoch % options.learning_rate_decay_interval == 0
			{
				learning_rate *= options.learning_rate_decay;
			}
		}
		Ok(BatchPerceptron {
			weights,
			n_epochs: options.max_epochs,
			converged: false,
		})
	}

	/// Compute the raw output `features w` for each example.
	pub fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
		check_shape("feature columns", self.weights.len(), features.ncols())?;
		Ok(features.dot(&self.weights))
	}

	/// Compute the predicted class of each example in an un-negated design matrix. A positive output means class 0, anything else means class 1.
	pub fn predict_classes(&self, features: ArrayView2<f64>) -> Result<Array1<usize>, Error> {
		let outputs = self.predict(features)?;
		Ok(outputs.mapv(|output| if output > 0.0 { 0 } else { 1 }))
	}

	/**
	Count the examples of `features` whose predicted class differs from `labels`.

	`features` must be the original design matrix, not the negated training batch. The class 0 rows were the ones left positive during training, so a positive output predicts class 0.
	*/
	pub fn evaluate(
		&self,
		features: ArrayView2<f64>,
		labels: ArrayView1<usize>,
	) -> Result<MisclassificationsOutput, Error> {
		check_shape("labels", features.nrows(), labels.len())?;
		let predictions = self.predict_classes(features)?;
		let mut metric = Misclassifications::new();
		for (prediction, label) in izip!(predictions.iter(), labels.iter()) {
			metric.update(prediction == label);
		}
		Ok(metric.finalize())
	}

	/// The line where `w . x = 0`, if the model was trained on exactly two features.
	pub fn decision_boundary(&self) -> Option<Line> {
		decision_boundary(self.weights.view())
	}
}

#[cfg(test)]
use rand::SeedableRng;
#[cfg(test)]
use rand_xoshiro::Xoshiro256Plus;

#[test]
fn test_converges_on_separable_batch() {
	let batch = arr2(&[[1.0, 1.0], [1.0, 2.0], [-1.0, -3.0], [-1.0, -4.0]]);
	let mut rng = Xoshiro256Plus::seed_from_u64(0);
	let model =
		BatchPerceptron::train(batch.view(), &TrainOptions::default(), &mut rng, &mut |_| {})
			.unwrap();
	assert!(model.converged);
	assert!(model.n_epochs < 200);
	for output in batch.dot(&model.weights).iter() {
		assert!(*output > 0.0);
	}
}

#[test]
fn test_does_not_converge_on_non_separable_batch() {
	// A row and its negation can never both score positive.
	let batch = arr2(&[[1.0, 1.0], [-1.0, -1.0]]);
	let options = TrainOptions {
		max_epochs: 5,
		..Default::default()
	};
	let mut rng = Xoshiro256Plus::seed_from_u64(0);
	let model = BatchPerceptron::train(batch.view(), &options, &mut rng, &mut |_| {}).unwrap();
	assert!(!model.converged);
	assert_eq!(model.n_epochs, 5);
	assert_eq!(model.weights.len(), 2);
}

#[test]
fn test_training_is_deterministic_for_a_seed() {
	let batch = arr2(&[
		[1.0, 2.0, 2.0],
		[1.0, 3.0, 1.0],
		[1.0, 2.5, 3.0],
		[-1.0, 2.0, 1.0],
		[-1.0, 3.0, 2.0],
		[-1.0, 1.0, 3.0],
	]);
	let options = TrainOptions::default();
	let a = BatchPerceptron::train(
		batch.view(),
		&options,
		&mut Xoshiro256Plus::seed_from_u64(42),
		&mut |_| {},
	)
	.unwrap();
	let b = BatchPerceptron::train(
		batch.view(),
		&options,
		&mut Xoshiro256Plus::seed_from_u64(42),
		&mut |_| {},
	)
	.unwrap();
	assert_eq!(a, b);
	assert!(a.converged);
}

#[test]
fn test_update_rule() {
	// With one misclassified row, each epoch adds learning_rate * row until the row scores positive.
	let batch = arr2(&[[1.0]]);
	let options = TrainOptions {
		max_epochs: 1000,
		learning_rate: 1.0,
		learning_rate_decay: 0.5,
		learning_rate_decay_interval: 2,
	};
	// The rates are 1, 1, 0.5, 0.5, so the weight goes from -2.6 to 0.4 in four updates
	// and convergence is detected on epoch 5.
	let model =
		BatchPerceptron::train_from(batch.view(), arr1(&[-2.6]), &options, &mut |_| {})
			.unwrap();
	assert!(model.converged);
	assert_eq!(model.n_epochs, 5);
	assert!((model.weights[0] - 0.4).abs() < 1e-12);
}

#[test]
fn test_zero_output_is_misclassified() {
	let batch = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
	let options = TrainOptions::default();
	// The second row scores exactly zero, so it is corrected once.
	let model =
		BatchPerceptron::train_from(batch.view(), arr1(&[1.0, 0.0]), &options, &mut |_| {})
			.unwrap();
	assert!(model.converged);
	assert_eq!(model.n_epochs, 2);
	assert_eq!(model.weights, arr1(&[1.0, 0.1]));
}

#[test]
fn test_no_epochs() {
	let batch = arr2(&[[1.0, 1.0], [-1.0, -1.0]]);
	let options = TrainOptions {
		max_epochs: 0,
		..Default::default()
	};
	let model =
		BatchPerceptron::train_from(batch.view(), arr1(&[0.5, 0.5]), &options, &mut |_| {})
			.unwrap();
	assert!(!model.converged);
	assert_eq!(model.n_epochs, 0);
	assert_eq!(model.weights, arr1(&[0.5, 0.5]));
}

#[test]
fn test_initial_weights_shape_mismatch() {
	let batch = arr2(&[[1.0, 1.0], [1.0, 2.0]]);
	let result = BatchPerceptron::train_from(
		batch.view(),
		arr1(&[0.5, 0.5, 0.5]),
		&TrainOptions::default(),
		&mut |_| {},
	);
	assert_eq!(
		result,
		Err(Error::ShapeMismatch {
			what: "initial weights",
			expected: 2,
			actual: 3,
		})
	);
}

#[test]
fn test_progress() {
	let batch = arr2(&[[1.0, 1.0], [-1.0, -1.0]]);
	let options = TrainOptions {
		max_epochs: 7,
		..Default::default()
	};
	let mut progress_counter = None;
	BatchPerceptron::train(
		batch.view(),
		&options,
		&mut Xoshiro256Plus::seed_from_u64(0),
		&mut |TrainProgress(counter)| progress_counter = Some(counter),
	)
	.unwrap();
	let progress_counter = progress_counter.unwrap();
	assert_eq!(progress_counter.total(), 7);
	assert_eq!(progress_counter.get(), 7);
}

#[test]
fn test_evaluate_polarity() {
	let model = BatchPerceptron {
		weights: arr1(&[0.0, 1.0]),
		n_epochs: 1,
		converged: true,
	};
	let features = arr2(&[[1.0, 2.0], [1.0, -2.0], [1.0, 0.0], [1.0, 3.0]]);
	// Positive outputs are class 0, zero and negative outputs are class 1.
	assert_eq!(
		model.predict_classes(features.view()).unwrap(),
		arr1(&[0, 1, 1, 0])
	);
	let output = model
		.evaluate(features.view(), arr1(&[0, 1, 1, 1]).view())
		.unwrap();
	assert_eq!(output.n_misclassified, 1);
	assert_eq!(output.accuracy, Some(75.0));
}

#[test]
fn test_train_then_evaluate_on_design_matrix() {
	let design = arr2(&[
		[1.0, 2.0, 2.0],
		[1.0, -2.0, -1.0],
		[1.0, 3.0, 1.0],
		[1.0, -3.0, -2.0],
		[1.0, 2.5, 3.0],
		[1.0, -1.0, -3.0],
	]);
	let labels = arr1(&[0, 1, 0, 1, 0, 1]);
	let mut batch = design.clone();
	for (mut row, label) in izip!(batch.axis_iter_mut(Axis(0)), labels.iter()) {
		if *label != 0 {
			row.mapv_inplace(|value| -value);
		}
	}
	let mut rng = Xoshiro256Plus::seed_from_u64(3);
	let model =
		BatchPerceptron::train(batch.view(), &TrainOptions::default(), &mut rng, &mut |_| {})
			.unwrap();
	assert!(model.converged);
	let output = model.evaluate(design.view(), labels.view()).unwrap();
	assert_eq!(output.n_misclassified, 0);
	assert_eq!(output.accuracy, Some(100.0));
}

#[test]
fn test_no_examples() {
	let model = BatchPerceptron {
		weights: arr1(&[0.0, 1.0]),
		n_epochs: 1,
		converged: true,
	};
	let features = Array2::<f64>::zeros((0, 2));
	let labels = Array1::<usize>::zeros(0);
	let output = model.evaluate(features.view(), labels.view()).unwrap();
	assert_eq!(output.accuracy, None);
}
