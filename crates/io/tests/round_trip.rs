//! Integration test: save and load training sets through text files.

use glyph_io::{IoError, load, save};
use glyph_knn::{Classifier, ClassifierConfig, KnnError};

fn knn() -> Classifier {
    Classifier::new(ClassifierConfig::new()).expect("valid config")
}

fn sorted_pairs(knn: &Classifier) -> Vec<(String, Vec<u64>)> {
    let mut pairs: Vec<(String, Vec<u64>)> = knn
        .samples()
        .iter()
        .map(|s| {
            (
                s.label().to_string(),
                s.features().iter().map(|v| v.to_bits()).collect(),
            )
        })
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn round_trip_after_clear() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");

    let knn = knn();
    knn.add_training_items(vec![
        ("a", vec![0.1, 0.2, 1.0 / 3.0]),
        ("b", vec![-1e-12, 123456.789, 0.0]),
        ("big o", vec![f64::MAX, f64::MIN_POSITIVE, -0.0]),
    ])
    .expect("add samples");
    let before = sorted_pairs(&knn);

    save(&path, &knn).expect("save succeeds");
    knn.clear();
    assert_eq!(load(&path, &knn).expect("load succeeds"), 3);
    assert_eq!(sorted_pairs(&knn), before);
}

#[test]
fn save_writes_store_order() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");

    let knn = knn();
    knn.add_training_item("z", vec![1.0, 2.0]).unwrap();
    knn.add_training_item("a", vec![3.5, -4.0]).unwrap();
    save(&path, &knn).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "z:1,2\na:3.5,-4\n");
}

#[test]
fn save_truncates_existing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");
    std::fs::write(&path, "old:1,2,3\nold:4,5,6\nold:7,8,9\n").unwrap();

    let knn = knn();
    knn.add_training_item("new", vec![1.0]).unwrap();
    save(&path, &knn).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new:1\n");
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("deeper").join("set.txt");

    let knn = knn();
    knn.add_training_item("a", vec![1.0]).unwrap();
    save(&path, &knn).expect("save succeeds");
    assert!(path.exists());
}

#[test]
fn unsaveable_label_never_enters_store() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");

    let knn = knn();
    knn.add_training_item("ok", vec![1.0]).unwrap();
    assert!(matches!(
        knn.add_training_item("a:b", vec![2.0]),
        Err(KnnError::InvalidLabel { .. })
    ));
    save(&path, &knn).expect("save succeeds");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok:1\n");
}

#[test]
fn empty_and_padded_labels_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");

    let knn = knn();
    knn.add_training_items(vec![("", vec![1.0]), (" a ", vec![2.0]), ("\tb", vec![3.0])])
        .expect("add samples");
    save(&path, &knn).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        ":1\n a :2\n\tb:3\n"
    );

    knn.clear();
    assert_eq!(load(&path, &knn).unwrap(), 3);
    assert_eq!(knn.labels(), vec!["", " a ", "\tb"]);
}

#[test]
fn crlf_line_endings_are_accepted() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");
    std::fs::write(&path, "a:1,2\r\nb:3,4\r\n").unwrap();

    let knn = knn();
    assert_eq!(load(&path, &knn).unwrap(), 2);
    assert_eq!(knn.labels(), vec!["a", "b"]);
}

#[test]
fn load_is_additive_and_skips_blank_lines() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");
    std::fs::write(&path, "\na:1,2  \n\nb: 3,4\n   \n").unwrap();

    let knn = knn();
    knn.add_training_item("c", vec![5.0, 6.0]).unwrap();
    assert_eq!(load(&path, &knn).unwrap(), 2);
    assert_eq!(knn.labels(), vec!["c", "a", "b"]);
}

#[test]
fn malformed_line_loads_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");
    std::fs::write(&path, "a:1,2\nb:3,4\nc:5,oops\nd:7,8\n").unwrap();

    let knn = knn();
    let err = load(&path, &knn).unwrap_err();
    assert!(matches!(err, IoError::Format { line: 3, .. }));
    assert!(knn.is_empty());
}

#[test]
fn mixed_dimensions_load_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");
    std::fs::write(&path, "a:1,2\nb:3\n").unwrap();

    let knn = knn();
    let err = load(&path, &knn).unwrap_err();
    assert!(matches!(
        err,
        IoError::Knn(KnnError::DimensionMismatch {
            expected: 2,
            got: 1
        })
    ));
    assert!(knn.is_empty());
}

#[test]
fn dimension_must_match_existing_samples() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");
    std::fs::write(&path, "a:1,2,3\n").unwrap();

    let knn = knn();
    knn.add_training_item("c", vec![5.0, 6.0]).unwrap();
    assert!(matches!(
        load(&path, &knn),
        Err(IoError::Knn(KnnError::DimensionMismatch { .. }))
    ));
    assert_eq!(knn.len(), 1);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.txt");

    let knn = knn();
    let err = load(&path, &knn).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
    assert!(knn.is_empty());
}

#[test]
fn empty_store_saves_empty_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("set.txt");

    let knn = knn();
    save(&path, &knn).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert_eq!(load(&path, &knn).unwrap(), 0);
}
