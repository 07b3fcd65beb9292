//! # glyph-io
//!
//! Plain-text persistence for [`glyph_knn::Classifier`] training sets.
//!
//! One committed sample per line, `label:f1,f2,...,fn`, in store order.
//! Reliability scores and sample ids are not persisted; loaded samples
//! start at a neutral score.
//!
//! ```
//! use glyph_knn::{Classifier, ClassifierConfig};
//!
//! let (label, features) = glyph_io::parse_line("a: 0.5,1,-2\r", 1).unwrap();
//! assert_eq!(label, "a");
//! assert_eq!(glyph_io::format_line(&label, &features).unwrap(), "a:0.5,1,-2");
//!
//! let knn = Classifier::new(ClassifierConfig::new()).unwrap();
//! let dir = std::env::temp_dir().join("glyph-io-doctest");
//! let path = dir.join("set.txt");
//! knn.add_training_item("a", features).unwrap();
//! glyph_io::save(&path, &knn).unwrap();
//! knn.clear();
//! assert_eq!(glyph_io::load(&path, &knn).unwrap(), 1);
//! # std::fs::remove_dir_all(&dir).ok();
//! ```

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{load, parse_line};
pub use writer::{format_line, save};
