/*!
This module defines the `Config` struct, which is used to configure an experiment run with [`run`](../fn.run.html). Configs are read from JSON files. Every field is optional.

```json
{
	"seed": 42,
	"perceptron": { "max_epochs": 500, "learning_rate": 0.2 },
	"experiments": [
		{ "type": "one_vs_rest", "positive_class": "setosa", "feature_indices": [2, 3] },
		{ "type": "multiclass" }
	]
}
```
*/

use anyhow::{Context, Result};
use linsep_linear::TrainOptions;
use std::path::Path;

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
	/// The seed for the generator that draws the initial batch perceptron weights.
	pub seed: Option<u64>,
	pub perceptron: Option<PerceptronConfig>,
	/// The experiments to run, in order. If absent, the default plan is used, see `Config::experiments`.
	pub experiments: Option<Vec<ExperimentConfig>>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct PerceptronConfig {
	pub max_epochs: Option<usize>,
	pub learning_rate: Option<f64>,
	pub learning_rate_decay: Option<f64>,
	pub learning_rate_decay_interval: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ExperimentConfig {
	/// Separate `positive_class` from all other classes with both least squares and the batch perceptron.
	#[serde(rename = "one_vs_rest")]
	OneVsRest {
		name: Option<String>,
		positive_class: String,
		/// The indexes of the features to use. If absent, all features are used.
		feature_indices: Option<Vec<usize>>,
	},
	/// Separate all classes at once with multiclass least squares.
	#[serde(rename = "multiclass")]
	Multiclass {
		name: Option<String>,
		feature_indices: Option<Vec<usize>>,
	},
}

impl Config {
	pub fn seed(&self) -> u64 {
		self.seed.unwrap_or(0)
	}

	pub fn train_options(&self) -> TrainOptions {
		let default = TrainOptions::default();
		let perceptron = match self.perceptron.as_ref() {
			Some(perceptron) => perceptron,
			None => return default,
		};
		TrainOptions {
			max_epochs: perceptron.max_epochs.unwrap_or(default.max_epochs),
			learning_rate: perceptron.learning_rate.unwrap_or(default.learning_rate),
			learning_rate_decay: perceptron
				.learning_rate_decay
				.unwrap_or(default.learning_rate_decay),
			learning_rate_decay_interval: perceptron
				.learning_rate_decay_interval
				.unwrap_or(default.learning_rate_decay_interval),
		}
	}

	/**
	Return the configured experiments, or the default plan if there are none.

	The default plan separates the first class from the rest and then the last class from the rest, each once with all features and once with only the last two features. It finishes with a multiclass experiment on the last two features. With fewer than three features, the reduced feature experiments are skipped and the multiclass experiment uses all features.
	*/
	pub fn experiments(&self, classes: &[String], n_features: usize) -> Vec<ExperimentConfig> {
		if let Some(experiments) = self.experiments.as_ref() {
			return experiments.clone();
		}
		let last_two_features = if n_features > 2 {
			Some(vec![n_features - 2, n_features - 1])
		} else {
			None
		};
		let mut positive_classes: Vec<&String> = classes.first().into_iter().collect();
		if let Some(last) = classes.last() {
			if classes.len() > 1 {
				positive_classes.push(last);
			}
		}
		let mut experiments = Vec::new();
		for positive_class in positive_classes {
			experiments.push(ExperimentConfig::OneVsRest {
				name: None,
				positive_class: positive_class.clone(),
				feature_indices: None,
			});
			if let Some(last_two_features) = last_two_features.as_ref() {
				experiments.push(ExperimentConfig::OneVsRest {
					name: None,
					positive_class: positive_class.clone(),
					feature_indices: Some(last_two_features.clone()),
				});
			}
		}
		experiments.push(ExperimentConfig::Multiclass {
			name: None,
			feature_indices: last_two_features,
		});
		experiments
	}
}

/// Load the config from the JSON file at `config_path`, if provided.
pub fn load_config(config_path: Option<&Path>) -> Result<Option<Config>> {
	if let Some(config_path) = config_path {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		let config = serde_json::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))?;
		Ok(Some(config))
	} else {
		Ok(None)
	}
}

#[test]
fn test_parse_config() {
	let config: Config = serde_json::from_str(
		r#"{
			"seed": 42,
			"perceptron": { "max_epochs": 500, "learning_rate": 0.2 },
			"experiments": [
				{ "type": "one_vs_rest", "positive_class": "setosa", "feature_indices": [2, 3] },
				{ "type": "multiclass", "name": "all" }
			]
		}"#,
	)
	.unwrap();
	assert_eq!(config.seed(), 42);
	assert_eq!(
		config.train_options(),
		TrainOptions {
			max_epochs: 500,
			learning_rate: 0.2,
			learning_rate_decay: 0.9,
			learning_rate_decay_interval: 10,
		}
	);
	let classes = vec!["setosa".to_owned()];
	assert_eq!(
		config.experiments(&classes, 4),
		vec![
			ExperimentConfig::OneVsRest {
				name: None,
				positive_class: "setosa".to_owned(),
				feature_indices: Some(vec![2, 3]),
			},
			ExperimentConfig::Multiclass {
				name: Some("all".to_owned()),
				feature_indices: None,
			},
		]
	);
}

#[test]
fn test_empty_config() {
	let config: Config = serde_json::from_str("{}").unwrap();
	assert_eq!(config.seed(), 0);
	assert_eq!(config.train_options(), TrainOptions::default());
}

#[test]
fn test_default_plan() {
	let config = Config::default();
	let classes: Vec<String> = vec!["setosa", "versicolor", "virginica"]
		.into_iter()
		.map(String::from)
		.collect();
	let one_vs_rest = |positive_class: &str, feature_indices: Option<Vec<usize>>| {
		ExperimentConfig::OneVsRest {
			name: None,
			positive_class: positive_class.to_owned(),
			feature_indices,
		}
	};
	assert_eq!(
		config.experiments(&classes, 4),
		vec![
			one_vs_rest("setosa", None),
			one_vs_rest("setosa", Some(vec![2, 3])),
			one_vs_rest("virginica", None),
			one_vs_rest("virginica", Some(vec![2, 3])),
			ExperimentConfig::Multiclass {
				name: None,
				feature_indices: Some(vec![2, 3]),
			},
		]
	);
	assert_eq!(config.experiments(&classes, 2).len(), 3);
}

#[test]
fn test_load_config_without_path() {
	assert!(load_config(None).unwrap().is_none());
}
