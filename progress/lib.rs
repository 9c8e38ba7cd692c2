#![allow(clippy::tabs_in_doc_comments)]

use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

/**
A `ProgressCounter` tracks how far along a long running task is, such as the epochs of a batch perceptron training run.

Clones share the same underlying atomic, so a caller can hold on to the counter handed out in a progress callback and read it while training continues:

```
use linsep_progress::ProgressCounter;

let progress_counter = ProgressCounter::new(1000);
let observer = progress_counter.clone();
for _ in 0..10 {
	progress_counter.inc(1);
}
assert_eq!(observer.get(), 10);
assert_eq!(observer.total(), 1000);
```
*/
#[derive(Clone, Debug)]
pub struct ProgressCounter {
	current: Arc<AtomicU64>,
	total: u64,
}

impl ProgressCounter {
	/// Create a new `ProgressCounter` that will count from 0 up to the specified `total`.
	pub fn new(total: u64) -> Self {
		Self {
			current: Arc::new(AtomicU64::new(0)),
			total,
		}
	}
	/// Retrieve the total value this `ProgressCounter` counts up to.
	pub fn total(&self) -> u64 {
		self.total
	}
	/// Retrieve the current progress value.
	pub fn get(&self) -> u64 {
		self.current.load(Ordering::Relaxed)
	}
	/// Increment the progress value by `amount`.
	pub fn inc(&self, amount: u64) {
		self.current.fetch_add(amount, Ordering::Relaxed);
	}
}

#[test]
fn test_clones_share_progress() {
	let progress_counter = ProgressCounter::new(3);
	let observer = progress_counter.clone();
	progress_counter.inc(2);
	assert_eq!(observer.get(), 2);
	observer.inc(1);
	assert_eq!(progress_counter.get(), 3);
}
