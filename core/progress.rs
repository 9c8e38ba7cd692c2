use linsep_linear::TrainProgress;

#[derive(Debug)]
pub enum Progress {
	Standardizing,
	/// The index and name of the experiment, and what it is doing.
	Experiment(usize, String, ExperimentProgress),
}

#[derive(Debug)]
pub enum ExperimentProgress {
	LeastSquares,
	BatchPerceptron(TrainProgress),
	MulticlassLeastSquares,
}
