use linsep_linear::{Line, MisclassificationsOutput};
use ndarray::prelude::*;

/// The number of points sampled along each decision line for plotting.
const N_LINE_POINTS: usize = 50;

/// The results of every experiment in a run, in plan order.
#[derive(Debug, serde::Serialize)]
pub struct Report {
	pub n_examples: usize,
	pub classes: Vec<String>,
	pub experiments: Vec<ExperimentReport>,
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "type")]
pub enum ExperimentReport {
	#[serde(rename = "one_vs_rest")]
	OneVsRest(OneVsRestReport),
	#[serde(rename = "multiclass")]
	Multiclass(MulticlassReport),
}

#[derive(Debug, serde::Serialize)]
pub struct OneVsRestReport {
	pub name: String,
	pub positive_class: String,
	pub feature_indices: Vec<usize>,
	pub least_squares: LeastSquaresReport,
	pub batch_perceptron: BatchPerceptronReport,
}

#[derive(Debug, serde::Serialize)]
pub struct LeastSquaresReport {
	pub weights: Vec<f64>,
	pub evaluation: EvaluationReport,
	/// Present when the experiment used exactly two features.
	pub decision_boundary: Option<LineReport>,
}

#[derive(Debug, serde::Serialize)]
pub struct BatchPerceptronReport {
	pub weights: Vec<f64>,
	pub n_epochs: usize,
	pub converged: bool,
	pub evaluation: EvaluationReport,
	pub decision_boundary: Option<LineReport>,
}

#[derive(Debug, serde::Serialize)]
pub struct MulticlassReport {
	pub name: String,
	pub feature_indices: Vec<usize>,
	/// One row per design matrix column, one entry per class.
	pub weights: Vec<Vec<f64>>,
	pub evaluation: EvaluationReport,
	/// One entry per pair of classes when the experiment used exactly two features, otherwise empty.
	pub decision_boundaries: Vec<ClassBoundaryReport>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClassBoundaryReport {
	/// The class indices `(i, j)`, `i < j`, whose discriminants are equal along `line`.
	pub classes: (usize, usize),
	pub line: Option<LineReport>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluationReport {
	pub n_misclassified: usize,
	pub n_examples: usize,
	/// The accuracy as a percentage, absent when there were no examples.
	pub accuracy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineReport {
	pub slope: f64,
	pub intercept: f64,
	/// Evenly spaced `(x1, x2)` points on the line spanning the range of the first feature.
	pub points: Vec<(f64, f64)>,
}

impl From<MisclassificationsOutput> for EvaluationReport {
	fn from(value: MisclassificationsOutput) -> EvaluationReport {
		EvaluationReport {
			n_misclassified: value.n_misclassified,
			n_examples: value.n_examples,
			accuracy: value.accuracy,
		}
	}
}

impl LineReport {
	/// Describe `line`, sampled over the range of the values `x1` takes in the data.
	pub fn new(line: Line, x1: ArrayView1<f64>) -> LineReport {
		let x_min = x1.iter().cloned().fold(f64::INFINITY, f64::min);
		let x_max = x1.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
		let points = if x_min <= x_max {
			line.sample(x_min, x_max, N_LINE_POINTS)
		} else {
			Vec::new()
		};
		LineReport {
			slope: line.slope,
			intercept: line.intercept,
			points,
		}
	}
}

#[test]
fn test_serialize_evaluation() {
	let report: EvaluationReport = MisclassificationsOutput {
		n_misclassified: 3,
		n_examples: 150,
		accuracy: Some(98.0),
	}
	.into();
	assert_eq!(
		serde_json::to_string(&report).unwrap(),
		r#"{"n_misclassified":3,"n_examples":150,"accuracy":98.0}"#
	);
}

#[test]
fn test_line_report_spans_the_data() {
	let line = Line {
		slope: 2.0,
		intercept: 1.0,
	};
	let x1 = arr1(&[0.5, -1.0, 3.0]);
	let report = LineReport::new(line, x1.view());
	assert_eq!(report.points.len(), 50);
	assert_eq!(report.points[0], (-1.0, -1.0));
	assert_eq!(report.points[49], (3.0, 7.0));
	let report = LineReport::new(line, Array1::<f64>::zeros(0).view());
	assert!(report.points.is_empty());
}
