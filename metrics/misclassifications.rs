use super::StreamingMetric;
use num_traits::ToPrimitive;

/**
`Misclassifications` counts the examples whose prediction did not match the label. Its output pairs that count with the accuracy expressed as a percentage, `100 * (1 - n_misclassified / n_examples)`.

The input is whether the prediction for one example matched its label. Callers decide what "matched" means: the least squares evaluators compare rounded predictions to labels with strict equality, so a prediction that is not a valid class is always a miss.
*/
#[derive(Clone, Debug, Default)]
pub struct Misclassifications {
	n_misclassified: u64,
	n_examples: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MisclassificationsOutput {
	/// The number of examples whose prediction did not match the label.
	pub n_misclassified: usize,
	/// The number of examples seen.
	pub n_examples: usize,
	/// The accuracy as a percentage. This is `None` when there were no examples.
	pub accuracy: Option<f64>,
}

impl Misclassifications {
	pub fn new() -> Self {
		Self::default()
	}
}

impl StreamingMetric<'_> for Misclassifications {
	type Input = bool;
	type Output = MisclassificationsOutput;

	fn update(&mut self, matched: bool) {
		self.n_examples += 1;
		if !matched {
			self.n_misclassified += 1;
		}
	}

	fn merge(&mut self, other: Self) {
		self.n_misclassified += other.n_misclassified;
		self.n_examples += other.n_examples;
	}

	fn finalize(self) -> MisclassificationsOutput {
		let accuracy = if self.n_examples == 0 {
			None
		} else {
			let n_misclassified = self.n_misclassified.to_f64().unwrap();
			let n_examples = self.n_examples.to_f64().unwrap();
			Some((1.0 - n_misclassified / n_examples) * 100.0)
		};
		MisclassificationsOutput {
			n_misclassified: self.n_misclassified.to_usize().unwrap(),
			n_examples: self.n_examples.to_usize().unwrap(),
			accuracy,
		}
	}
}

#[test]
fn test_misclassifications() {
	let mut metric = Misclassifications::new();
	for matched in [true, true, false, true].iter() {
		metric.update(*matched);
	}
	let output = metric.finalize();
	insta::assert_debug_snapshot!(output, @r###"
 MisclassificationsOutput {
     n_misclassified: 1,
     n_examples: 4,
     accuracy: Some(
         75.0,
     ),
 }
 "###);
}

#[test]
fn test_no_examples() {
	let output = Misclassifications::new().finalize();
	assert_eq!(output.n_misclassified, 0);
	assert_eq!(output.n_examples, 0);
	assert_eq!(output.accuracy, None);
}

#[test]
fn test_merge() {
	let mut a = Misclassifications::new();
	a.update(false);
	let mut b = Misclassifications::new();
	b.update(true);
	b.update(false);
	b.update(true);
	b.update(true);
	a.merge(b);
	let output = a.finalize();
	assert_eq!(output.n_misclassified, 2);
	assert_eq!(output.accuracy, Some(60.0));
}
