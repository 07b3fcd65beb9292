//! Online, adaptive k-nearest neighbor classification.
//!
//! This crate classifies short feature vectors (handwriting strokes,
//! gestures) against a training set that keeps learning: every new input is
//! staged, committed on the next classification, and each label's bucket is
//! kept at a bounded size by evicting the sample that has most often voted
//! against the outcome.
//!
//! | Stage | What happens |
//! |-------|--------------|
//! | Commit | Staged sample enters the set; overflowing labels lose their least reliable sample |
//! | Standardize | Per-dimension population variance over the committed set |
//! | Search | Linear scan, bounded top-k with first-seen tie order |
//! | Vote | Plurality; ties drop the farthest neighbor and retry |
//! | Adapt | Agreeing neighbors −1, disagreeing +1 |
//!
//! # Quick start
//!
//! ```
//! use glyph_knn::{Classifier, ClassifierConfig};
//!
//! let mut knn = Classifier::new(ClassifierConfig::new().with_capacity(5)).unwrap();
//! knn.add_training_items(vec![
//!     ("a", vec![0.0, 0.0]),
//!     ("a", vec![0.1, 0.2]),
//!     ("b", vec![5.0, 5.0]),
//!     ("b", vec![5.2, 4.9]),
//! ])
//! .unwrap();
//!
//! let label = knn.classify(&[0.05, 0.1], 3).unwrap();
//! assert_eq!(label, "a");
//!
//! // The user confirms: keep the input as a new training sample.
//! knn.add_to_stage(label, vec![0.05, 0.1]).unwrap();
//! assert_eq!(knn.hints(1).unwrap(), vec!["b"]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! Classifier::classify()
//!   ├─ TrainingStore::commit()        (store.rs)
//!   ├─ VarianceProfile::from_samples() (distance.rs)
//!   ├─ select_k_nearest()             (select.rs)
//!   ├─ resolve_vote()                 (vote.rs)
//!   └─ reliability updates            (classifier.rs)
//! ```

pub mod classifier;
pub mod config;
pub mod distance;
pub mod error;
pub mod result;
pub mod sample;
pub mod store;

pub(crate) mod select;
pub(crate) mod vote;

pub use classifier::Classifier;
pub use config::{ClassifierConfig, ZeroVariance};
pub use distance::VarianceProfile;
pub use error::KnnError;
pub use result::{Neighbor, Ranked};
pub use sample::{Sample, SampleId, distinct_labels};
pub use store::{CommitReport, TrainingStore};
