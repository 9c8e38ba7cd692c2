use super::{
	config::{Config, ExperimentConfig},
	progress::{ExperimentProgress, Progress},
	report::*,
	Dataset,
};
use anyhow::{format_err, Context, Result};
use itertools::Itertools;
use linsep_features::{
	augment_bias, class_negated_batch, one_hot, one_vs_rest, select_columns, ClassMapping,
	Standardizer,
};
use linsep_linear::{
	BatchPerceptron, LeastSquaresClassifier, LeastSquaresMulticlassClassifier, TrainOptions,
};
use ndarray::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/**
Run every experiment in the config's plan on `dataset`.

The features are standardized to zero mean and unit variance and augmented with a bias column once, up front. Each experiment then selects its feature columns from that design matrix. The batch perceptrons draw their initial weights from a single generator seeded with the config's seed, consumed in plan order, so a run is reproducible.
*/
pub fn run(
	dataset: &Dataset,
	config: &Config,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<Report> {
	if dataset.features.nrows() != dataset.labels.len() {
		return Err(format_err!(
			"the dataset has {} rows of features but {} labels",
			dataset.features.nrows(),
			dataset.labels.len()
		));
	}
	let class_mapping = ClassMapping::new(dataset.classes.as_slice())?;
	let labels = class_mapping.map_labels(dataset.labels.as_slice())?;

	// standardize and augment the features
	update_progress(Progress::Standardizing);
	let (_, standardized) = Standardizer::fit_transform(dataset.features.view());
	let design = augment_bias(standardized.view());

	let train_options = config.train_options();
	let mut rng = Xoshiro256Plus::seed_from_u64(config.seed());
	let plan = config.experiments(class_mapping.classes(), dataset.n_features());
	let mut experiments = Vec::with_capacity(plan.len());
	for (index, experiment) in plan.iter().enumerate() {
		let report = match experiment {
			ExperimentConfig::OneVsRest {
				name,
				positive_class,
				feature_indices,
			} => {
				let feature_indices = resolve_feature_indices(feature_indices, dataset.n_features());
				let name = name.clone().unwrap_or_else(|| {
					format!(
						"{} vs rest, {}",
						positive_class,
						describe_features(&feature_indices)
					)
				});
				let report = run_one_vs_rest(
					OneVsRestInput {
						index,
						name: &name,
						positive_class,
						feature_indices: &feature_indices,
						design: design.view(),
						labels: labels.view(),
						class_mapping: &class_mapping,
						train_options: &train_options,
					},
					&mut rng,
					update_progress,
				)
				.with_context(|| format!("experiment \"{}\" failed", name))?;
				ExperimentReport::OneVsRest(report)
			}
			ExperimentConfig::Multiclass {
				name,
				feature_indices,
			} => {
				let feature_indices = resolve_feature_indices(feature_indices, dataset.n_features());
				let name = name.clone().unwrap_or_else(|| {
					format!("multiclass, {}", describe_features(&feature_indices))
				});
				let report = run_multiclass(
					index,
					&name,
					&feature_indices,
					design.view(),
					labels.view(),
					class_mapping.n_classes(),
					update_progress,
				)
				.with_context(|| format!("experiment \"{}\" failed", name))?;
				ExperimentReport::Multiclass(report)
			}
		};
		experiments.push(report);
	}

	Ok(Report {
		n_examples: dataset.n_examples(),
		classes: class_mapping.classes().to_vec(),
		experiments,
	})
}

struct OneVsRestInput<'a> {
	index: usize,
	name: &'a str,
	positive_class: &'a str,
	feature_indices: &'a [usize],
	design: ArrayView2<'a, f64>,
	labels: ArrayView1<'a, usize>,
	class_mapping: &'a ClassMapping,
	train_options: &'a TrainOptions,
}

fn run_one_vs_rest(
	input: OneVsRestInput,
	rng: &mut Xoshiro256Plus,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<OneVsRestReport> {
	let OneVsRestInput {
		index,
		name,
		positive_class,
		feature_indices,
		design,
		labels,
		class_mapping,
		train_options,
	} = input;
	let positive_class_index = class_mapping
		.index(positive_class)
		.ok_or_else(|| format_err!("unknown positive class \"{}\"", positive_class))?;
	let labels = one_vs_rest(labels, positive_class_index);
	let design = select_columns(design, feature_indices)?;

	// least squares
	update_progress(Progress::Experiment(
		index,
		name.to_owned(),
		ExperimentProgress::LeastSquares,
	));
	let least_squares = LeastSquaresClassifier::train(design.view(), labels.view())?;
	let least_squares_evaluation = least_squares.evaluate(design.view(), labels.view())?;

	// batch perceptron
	let batch = class_negated_batch(design.view(), labels.view())?;
	let batch_perceptron = BatchPerceptron::train(
		batch.view(),
		train_options,
		rng,
		&mut |progress| {
			update_progress(Progress::Experiment(
				index,
				name.to_owned(),
				ExperimentProgress::BatchPerceptron(progress),
			))
		},
	)?;
	let batch_perceptron_evaluation = batch_perceptron.evaluate(design.view(), labels.view())?;

	Ok(OneVsRestReport {
		name: name.to_owned(),
		positive_class: positive_class.to_owned(),
		feature_indices: feature_indices.to_vec(),
		least_squares: LeastSquaresReport {
			weights: least_squares.weights.to_vec(),
			evaluation: least_squares_evaluation.into(),
			decision_boundary: least_squares
				.decision_boundary()
				.map(|line| LineReport::new(line, design.column(1))),
		},
		batch_perceptron: BatchPerceptronReport {
			weights: batch_perceptron.weights.to_vec(),
			n_epochs: batch_perceptron.n_epochs,
			converged: batch_perceptron.converged,
			evaluation: batch_perceptron_evaluation.into(),
			decision_boundary: batch_perceptron
				.decision_boundary()
				.map(|line| LineReport::new(line, design.column(1))),
		},
	})
}

fn run_multiclass(
	index: usize,
	name: &str,
	feature_indices: &[usize],
	design: ArrayView2<f64>,
	labels: ArrayView1<usize>,
	n_classes: usize,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<MulticlassReport> {
	let design = select_columns(design, feature_indices)?;
	let targets = one_hot(labels, n_classes)?;
	update_progress(Progress::Experiment(
		index,
		name.to_owned(),
		ExperimentProgress::MulticlassLeastSquares,
	));
	let model = LeastSquaresMulticlassClassifier::train(design.view(), targets.view())?;
	let evaluation = model.evaluate(design.view(), targets.view())?;
	let decision_boundaries = if feature_indices.len() == 2 {
		model
			.decision_boundaries()
			.into_iter()
			.map(|boundary| ClassBoundaryReport {
				classes: boundary.classes,
				line: boundary
					.line
					.map(|line| LineReport::new(line, design.column(1))),
			})
			.collect()
	} else {
		Vec::new()
	};
	Ok(MulticlassReport {
		name: name.to_owned(),
		feature_indices: feature_indices.to_vec(),
		weights: model
			.weights
			.axis_iter(Axis(0))
			.map(|row| row.to_vec())
			.collect(),
		evaluation: evaluation.into(),
		decision_boundaries,
	})
}

fn resolve_feature_indices(feature_indices: &Option<Vec<usize>>, n_features: usize) -> Vec<usize> {
	match feature_indices {
		Some(feature_indices) => feature_indices.clone(),
		None => (0..n_features).collect(),
	}
}

fn describe_features(feature_indices: &[usize]) -> String {
	format!("features {}", feature_indices.iter().join(", "))
}

#[cfg(test)]
use crate::synthetic;

#[test]
fn test_default_plan_on_iris_like_data() {
	let dataset = synthetic::iris_like(50, 0);
	let report = run(&dataset, &Config::default(), &mut |_| {}).unwrap();
	assert_eq!(report.n_examples, 150);
	assert_eq!(report.experiments.len(), 5);
	let names: Vec<&str> = report
		.experiments
		.iter()
		.map(|experiment| match experiment {
			ExperimentReport::OneVsRest(report) => report.name.as_str(),
			ExperimentReport::Multiclass(report) => report.name.as_str(),
		})
		.collect();
	assert_eq!(
		names,
		vec![
			"setosa vs rest, features 0, 1, 2, 3",
			"setosa vs rest, features 2, 3",
			"virginica vs rest, features 0, 1, 2, 3",
			"virginica vs rest, features 2, 3",
			"multiclass, features 2, 3",
		]
	);
	let setosa = match &report.experiments[0] {
		ExperimentReport::OneVsRest(report) => report,
		_ => unreachable!(),
	};
	assert_eq!(setosa.least_squares.weights.len(), 5);
	assert_eq!(setosa.least_squares.evaluation.n_examples, 150);
	assert!(setosa.least_squares.evaluation.accuracy.unwrap() > 90.0);
	assert!(setosa.batch_perceptron.evaluation.accuracy.unwrap() > 90.0);
	assert!(setosa.least_squares.decision_boundary.is_none());
	let setosa_two_features = match &report.experiments[1] {
		ExperimentReport::OneVsRest(report) => report,
		_ => unreachable!(),
	};
	let line = setosa_two_features
		.least_squares
		.decision_boundary
		.as_ref()
		.unwrap();
	assert_eq!(line.points.len(), 50);
	let multiclass = match &report.experiments[4] {
		ExperimentReport::Multiclass(report) => report,
		_ => unreachable!(),
	};
	assert_eq!(multiclass.weights.len(), 3);
	assert_eq!(multiclass.weights[0].len(), 3);
	let pairs: Vec<(usize, usize)> = multiclass
		.decision_boundaries
		.iter()
		.map(|boundary| boundary.classes)
		.collect();
	assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn test_dataset_row_mismatch() {
	let mut dataset = synthetic::iris_like(2, 0);
	dataset.labels.pop();
	let error = run(&dataset, &Config::default(), &mut |_| {}).unwrap_err();
	assert_eq!(
		error.to_string(),
		"the dataset has 6 rows of features but 5 labels"
	);
}

#[test]
fn test_run_is_reproducible() {
	let dataset = synthetic::iris_like(20, 1);
	let config = Config {
		seed: Some(7),
		..Default::default()
	};
	let a = run(&dataset, &config, &mut |_| {}).unwrap();
	let b = run(&dataset, &config, &mut |_| {}).unwrap();
	assert_eq!(
		serde_json::to_string(&a).unwrap(),
		serde_json::to_string(&b).unwrap()
	);
}

#[test]
fn test_progress_events() {
	let dataset = synthetic::iris_like(10, 0);
	let config = Config {
		experiments: Some(vec![
			ExperimentConfig::OneVsRest {
				name: Some("first".to_owned()),
				positive_class: "setosa".to_owned(),
				feature_indices: None,
			},
			ExperimentConfig::Multiclass {
				name: Some("second".to_owned()),
				feature_indices: None,
			},
		]),
		..Default::default()
	};
	let mut events = Vec::new();
	run(&dataset, &config, &mut |progress| {
		events.push(match progress {
			Progress::Standardizing => "standardizing".to_owned(),
			Progress::Experiment(index, name, ExperimentProgress::LeastSquares) => {
				format!("{} {} least squares", index, name)
			}
			Progress::Experiment(index, name, ExperimentProgress::BatchPerceptron(_)) => {
				format!("{} {} batch perceptron", index, name)
			}
			Progress::Experiment(index, name, ExperimentProgress::MulticlassLeastSquares) => {
				format!("{} {} multiclass least squares", index, name)
			}
		})
	})
	.unwrap();
	assert_eq!(
		events,
		vec![
			"standardizing",
			"0 first least squares",
			"0 first batch perceptron",
			"1 second multiclass least squares",
		]
	);
}

#[test]
fn test_unknown_positive_class() {
	let dataset = synthetic::iris_like(5, 0);
	let config = Config {
		experiments: Some(vec![ExperimentConfig::OneVsRest {
			name: Some("daisies".to_owned()),
			positive_class: "daisy".to_owned(),
			feature_indices: None,
		}]),
		..Default::default()
	};
	let error = run(&dataset, &config, &mut |_| {}).unwrap_err();
	assert_eq!(error.to_string(), "experiment \"daisies\" failed");
	assert_eq!(
		error.root_cause().to_string(),
		"unknown positive class \"daisy\""
	);
}

#[test]
fn test_feature_index_out_of_range() {
	let dataset = synthetic::iris_like(5, 0);
	let config = Config {
		experiments: Some(vec![ExperimentConfig::Multiclass {
			name: None,
			feature_indices: Some(vec![1, 4]),
		}]),
		..Default::default()
	};
	let error = run(&dataset, &config, &mut |_| {}).unwrap_err();
	assert_eq!(
		error.root_cause().to_string(),
		"feature index 4 is out of range for 4 features"
	);
}
