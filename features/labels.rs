use super::Error;
use fnv::FnvHashMap;
use ndarray::prelude::*;

/**
A `ClassMapping` assigns each class token an integer label, in the order the classes were given.

```
use linsep_features::ClassMapping;

let mapping = ClassMapping::new(&["setosa", "versicolor", "virginica"]).unwrap();
assert_eq!(mapping.index("virginica"), Some(2));
let labels = mapping.map_labels(&["versicolor", "setosa"]).unwrap();
assert_eq!(labels.to_vec(), vec![1, 0]);
```
*/
#[derive(Clone, Debug)]
pub struct ClassMapping {
	classes: Vec<String>,
	indexes: FnvHashMap<String, usize>,
}

impl ClassMapping {
	pub fn new<S: AsRef<str>>(classes: &[S]) -> Result<ClassMapping, Error> {
		let mut indexes = FnvHashMap::default();
		for (index, class) in classes.iter().enumerate() {
			let class = class.as_ref().to_owned();
			if indexes.insert(class.clone(), index).is_some() {
				return Err(Error::DuplicateClass(class));
			}
		}
		let classes = classes.iter().map(|class| class.as_ref().to_owned()).collect();
		Ok(ClassMapping { classes, indexes })
	}

	pub fn classes(&self) -> &[String] {
		&self.classes
	}

	pub fn n_classes(&self) -> usize {
		self.classes.len()
	}

	pub fn index(&self, class: &str) -> Option<usize> {
		self.indexes.get(class).copied()
	}

	pub fn map_labels<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Array1<usize>, Error> {
		tokens
			.iter()
			.map(|token| {
				let token = token.as_ref();
				self.index(token)
					.ok_or_else(|| Error::UnknownClass(token.to_owned()))
			})
			.collect()
	}
}

/// Relabel a multiclass problem as a two class problem. Examples of `positive_class` get the label 0 and all other examples get the label 1.
pub fn one_vs_rest(labels: ArrayView1<usize>, positive_class: usize) -> Array1<usize> {
	labels.mapv(|label| if label == positive_class { 0 } else { 1 })
}

/// Encode `labels` as an `(n_examples, n_classes)` matrix where row `i` is 1 in column `labels[i]` and 0 elsewhere.
pub fn one_hot(labels: ArrayView1<usize>, n_classes: usize) -> Result<Array2<f64>, Error> {
	let mut targets = Array2::zeros((labels.len(), n_classes));
	for (mut row, label) in targets.axis_iter_mut(Axis(0)).zip(labels.iter()) {
		if *label >= n_classes {
			return Err(Error::LabelOutOfRange {
				label: *label,
				n_classes,
			});
		}
		row[*label] = 1.0;
	}
	Ok(targets)
}

#[test]
fn test_class_mapping() {
	let mapping = ClassMapping::new(&["setosa", "versicolor", "virginica"]).unwrap();
	assert_eq!(mapping.n_classes(), 3);
	let labels = mapping
		.map_labels(&["virginica", "setosa", "setosa", "versicolor"])
		.unwrap();
	assert_eq!(labels, arr1(&[2, 0, 0, 1]));
	assert_eq!(
		mapping.map_labels(&["setosa", "daisy"]).unwrap_err(),
		Error::UnknownClass("daisy".to_owned())
	);
}

#[test]
fn test_class_mapping_duplicate() {
	assert_eq!(
		ClassMapping::new(&["a", "b", "a"]).unwrap_err(),
		Error::DuplicateClass("a".to_owned())
	);
}

#[test]
fn test_one_vs_rest() {
	let labels = arr1(&[0, 1, 2, 2, 0]);
	assert_eq!(one_vs_rest(labels.view(), 0), arr1(&[0, 1, 1, 1, 0]));
	assert_eq!(one_vs_rest(labels.view(), 2), arr1(&[1, 1, 0, 0, 1]));
}

#[test]
fn test_one_hot() {
	let labels = arr1(&[2, 0, 1]);
	let targets = one_hot(labels.view(), 3).unwrap();
	assert_eq!(
		targets,
		arr2(&[[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
	);
	for row in targets.axis_iter(Axis(0)) {
		assert_eq!(row.sum(), 1.0);
	}
	assert_eq!(
		one_hot(labels.view(), 2).unwrap_err(),
		Error::LabelOutOfRange {
			label: 2,
			n_classes: 2
		}
	);
}
