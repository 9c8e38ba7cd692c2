//! This module contains the main entrypoint to the linsep cli.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use linsep_core::{
	load_config, run, synthetic, BatchPerceptronReport, EvaluationReport, ExperimentProgress,
	ExperimentReport, LineReport, MulticlassReport, OneVsRestReport, Progress, Report,
};
use linsep_linear::TrainProgress;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(about = "Compute linear classification boundaries with least squares and the batch perceptron.")]
enum Options {
	#[clap(name = "run")]
	Run(RunOptions),
}

#[derive(Parser, Debug)]
#[clap(about = "run the experiment plan")]
#[clap(
	long_about = "run the experiment plan on a seeded iris-like dataset and print the weights, misclassification counts, and accuracies of each model"
)]
struct RunOptions {
	#[clap(short, long, help = "the path to a .json config file")]
	config: Option<PathBuf>,
	#[clap(long, help = "the seed for the initial batch perceptron weights, overriding the config")]
	seed: Option<u64>,
	#[clap(long, default_value = "0", help = "the seed for generating the dataset")]
	data_seed: u64,
	#[clap(long, default_value = "50", help = "the number of examples to generate per class")]
	n_examples_per_class: usize,
	#[clap(long, help = "print the report as json")]
	json: bool,
	#[clap(long = "no-progress", help = "do not print progress to stderr", parse(from_flag = std::ops::Not::not))]
	progress: bool,
}

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::Run(options) => cli_run(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_run(options: RunOptions) -> Result<()> {
	let mut config = load_config(options.config.as_deref())?.unwrap_or_default();
	if let Some(seed) = options.seed {
		config.seed = Some(seed);
	}
	let dataset = synthetic::iris_like(options.n_examples_per_class, options.data_seed);
	let show_progress = options.progress;
	let report = run(&dataset, &config, &mut |progress| {
		if show_progress {
			eprintln!("{}", format_progress(progress));
		}
	})?;
	if options.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		print_report(&report);
	}
	Ok(())
}

fn format_progress(progress: Progress) -> String {
	let message = match progress {
		Progress::Standardizing => "standardizing features".to_owned(),
		Progress::Experiment(index, name, ExperimentProgress::LeastSquares) => {
			format!("[{}] {}: fitting least squares", index + 1, name)
		}
		Progress::Experiment(
			index,
			name,
			ExperimentProgress::BatchPerceptron(TrainProgress(progress_counter)),
		) => format!(
			"[{}] {}: training batch perceptron for up to {} epochs",
			index + 1,
			name,
			progress_counter.total()
		),
		Progress::Experiment(index, name, ExperimentProgress::MulticlassLeastSquares) => {
			format!("[{}] {}: fitting multiclass least squares", index + 1, name)
		}
	};
	format!("{} {}", "info".blue().bold(), message)
}

fn print_report(report: &Report) {
	println!(
		"{} examples, classes: {}",
		report.n_examples,
		report.classes.join(", ")
	);
	for experiment in report.experiments.iter() {
		println!();
		match experiment {
			ExperimentReport::OneVsRest(report) => print_one_vs_rest(report),
			ExperimentReport::Multiclass(report) => print_multiclass(report),
		}
	}
}

fn print_one_vs_rest(report: &OneVsRestReport) {
	println!("{}", report.name.bold());
	let least_squares = &report.least_squares;
	println!(
		"least squares weights: {}",
		format_weights(&least_squares.weights)
	);
	println!(
		"{} from least squares",
		format_evaluation(&least_squares.evaluation)
	);
	if let Some(line) = least_squares.decision_boundary.as_ref() {
		println!("least squares boundary: {}", format_line(line));
	}
	print_batch_perceptron(&report.batch_perceptron);
}

fn print_batch_perceptron(report: &BatchPerceptronReport) {
	println!(
		"batch perceptron weights: {}",
		format_weights(&report.weights)
	);
	if report.converged {
		println!("{}", format!("converged at {} epochs", report.n_epochs).green());
	} else {
		println!(
			"{}",
			format!("failed to converge in {} epochs", report.n_epochs).yellow()
		);
	}
	println!(
		"{} from batch perceptron",
		format_evaluation(&report.evaluation)
	);
	if let Some(line) = report.decision_boundary.as_ref() {
		println!("batch perceptron boundary: {}", format_line(line));
	}
}

fn print_multiclass(report: &MulticlassReport) {
	println!("{}", report.name.bold());
	println!("multiclass least squares weights:");
	for row in report.weights.iter() {
		println!("  {}", format_weights(row));
	}
	println!(
		"{} from multiclass least squares",
		format_evaluation(&report.evaluation)
	);
	for boundary in report.decision_boundaries.iter() {
		if let Some(line) = boundary.line.as_ref() {
			let (first, second) = boundary.classes;
			println!(
				"class {} / class {} boundary: {}",
				first,
				second,
				format_line(line)
			);
		}
	}
}

fn format_weights(weights: &[f64]) -> String {
	let weights: Vec<String> = weights
		.iter()
		.map(|weight| format!("{:.4}", weight))
		.collect();
	format!("[{}]", weights.join(", "))
}

fn format_evaluation(evaluation: &EvaluationReport) -> String {
	let accuracy = match evaluation.accuracy {
		Some(accuracy) => format!("{:.2}%", accuracy),
		None => "undefined".to_owned(),
	};
	format!(
		"{} of {} misclassified, accuracy {}",
		evaluation.n_misclassified, evaluation.n_examples, accuracy
	)
}

fn format_line(line: &LineReport) -> String {
	format!("x2 = {:.4} * x1 + {:.4}", line.slope, line.intercept)
}

#[test]
fn test_format_evaluation() {
	let evaluation = EvaluationReport {
		n_misclassified: 2,
		n_examples: 150,
		accuracy: Some(98.66666666666667),
	};
	assert_eq!(
		format_evaluation(&evaluation),
		"2 of 150 misclassified, accuracy 98.67%"
	);
	let evaluation = EvaluationReport {
		n_misclassified: 0,
		n_examples: 0,
		accuracy: None,
	};
	assert_eq!(
		format_evaluation(&evaluation),
		"0 of 0 misclassified, accuracy undefined"
	);
}

#[test]
fn test_format_weights() {
	assert_eq!(format_weights(&[0.5, -1.25]), "[0.5000, -1.2500]");
	assert_eq!(format_weights(&[]), "[]");
}

#[test]
fn test_format_line() {
	let line = LineReport {
		slope: 0.5,
		intercept: -2.0,
		points: Vec::new(),
	};
	assert_eq!(format_line(&line), "x2 = 0.5000 * x1 + -2.0000");
}
