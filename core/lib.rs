/*!
This crate runs linear classification experiments on a labeled dataset. Given a feature matrix, a label per row, and a [`Config`](struct.Config.html), [`run`](fn.run.html) standardizes the features, adds the bias column, and for every experiment in the plan fits and evaluates the models from `linsep_linear`, collecting the weights, misclassification counts, accuracies, and decision lines into a serializable [`Report`](struct.Report.html).
*/

#![allow(clippy::tabs_in_doc_comments)]

mod config;
mod dataset;
mod experiment;
mod progress;
mod report;

pub mod synthetic;

pub use self::config::{load_config, Config, ExperimentConfig, PerceptronConfig};
pub use self::dataset::Dataset;
pub use self::experiment::run;
pub use self::progress::{ExperimentProgress, Progress};
pub use self::report::{
	BatchPerceptronReport, ClassBoundaryReport, EvaluationReport, ExperimentReport,
	LeastSquaresReport, LineReport, MulticlassReport, OneVsRestReport, Report,
};
