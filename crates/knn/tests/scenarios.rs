//! End-to-end scenarios for the stage / classify / adapt cycle.

use glyph_knn::{Classifier, ClassifierConfig, Sample};

fn two_blobs() -> Classifier {
    let knn = Classifier::new(ClassifierConfig::new().with_capacity(5)).unwrap();
    for _ in 0..5 {
        knn.add_training_item("A", vec![0.0, 0.0]).unwrap();
    }
    for _ in 0..5 {
        knn.add_training_item("B", vec![10.0, 10.0]).unwrap();
    }
    knn
}

fn count(knn: &Classifier, label: &str) -> usize {
    knn.label_counts().get(label).copied().unwrap_or(0)
}

/// Two well-separated blobs: the query sits on A, the sixth A evicts one.
#[test]
fn blobs_classify_then_overflow() {
    let mut knn = two_blobs();

    assert_eq!(knn.classify(&[0.0, 0.0], 3).unwrap(), "A");
    let top = knn.closest_list();
    assert_eq!(top.len(), 3);
    assert!(top.iter().all(|s| s.label() == "A"));

    // all five A samples sit at distance 0: the first three seeded the top-k
    let a_ids: Vec<_> = knn
        .samples()
        .iter()
        .filter(|s| s.label() == "A")
        .map(Sample::id)
        .collect();
    let top_ids: Vec<_> = top.iter().map(Sample::id).collect();
    assert_eq!(top_ids, a_ids[..3]);

    // the two A samples outside the top-k kept score 0 and are least reliable
    let incoming = knn.add_to_stage("A", vec![0.5, 0.5]).unwrap();
    let report = knn.commit().unwrap();
    assert_eq!(report.committed, Some(incoming));
    assert_eq!(report.evicted.len(), 1);
    assert_eq!(report.evicted[0].id(), a_ids[3]);
    assert_eq!(report.evicted[0].reliability(), 0);
    assert_eq!(count(&knn, "A"), 5);
    assert_eq!(count(&knn, "B"), 5);
}

/// All-distinct top-3 falls back to the nearest neighbor.
#[test]
fn three_way_tie_resolves_to_nearest() {
    let mut knn = Classifier::new(ClassifierConfig::new()).unwrap();
    knn.add_training_items(vec![
        ("C", vec![3.0]),
        ("A", vec![1.0]),
        ("D", vec![50.0]),
        ("B", vec![2.0]),
    ])
    .unwrap();

    assert_eq!(knn.classify(&[0.0], 3).unwrap(), "A");
    let labels: Vec<String> = knn
        .closest_list()
        .iter()
        .map(|s| s.label().to_string())
        .collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

/// Two-against-two drops the farthest vote.
#[test]
fn even_split_drops_farthest() {
    let mut knn = Classifier::new(ClassifierConfig::new()).unwrap();
    knn.add_training_items(vec![
        ("x", vec![1.0]),
        ("y", vec![2.0]),
        ("y", vec![3.0]),
        ("x", vec![4.0]),
    ])
    .unwrap();

    // [x, y, y, x] ties, [x, y, y] -> y
    assert_eq!(knn.classify(&[0.0], 4).unwrap(), "y");
}

/// Hints walk the ranking and skip the predicted label.
#[test]
fn hints_after_prediction() {
    let mut knn = Classifier::new(ClassifierConfig::new()).unwrap();
    knn.add_training_items(vec![
        ("A", vec![0.0]),
        ("B", vec![1.0]),
        ("B", vec![2.0]),
        ("C", vec![3.0]),
    ])
    .unwrap();

    assert_eq!(knn.classify(&[0.0], 1).unwrap(), "A");
    assert_eq!(knn.hints(2).unwrap(), vec!["B", "C"]);
}

/// A wrong guess is corrected before the next input arrives.
#[test]
fn correction_cycle_relabels_and_reweights() {
    let mut knn = Classifier::new(ClassifierConfig::new().with_capacity(3)).unwrap();
    knn.add_training_items(vec![
        ("o", vec![0.0, 0.0]),
        ("o", vec![0.2, 0.1]),
        ("c", vec![0.4, 0.3]),
        ("c", vec![5.0, 5.0]),
    ])
    .unwrap();

    let guess = knn.classify(&[0.35, 0.25], 3).unwrap();
    assert_eq!(guess, "o");
    knn.add_to_stage(guess.clone(), vec![0.35, 0.25]).unwrap();
    knn.correct_wrong_detection("c", &guess).unwrap();
    assert_eq!(knn.staged().unwrap().label(), "c");

    // o voted for the wrong answer twice over: -1 then +2
    for s in knn.closest_list() {
        match s.label() {
            "o" => assert_eq!(s.reliability(), 1),
            "c" => assert_eq!(s.reliability(), -1),
            other => panic!("unexpected label {other}"),
        }
    }

    // the corrected sample enters the set at the next classification
    knn.classify(&[0.35, 0.25], 1).unwrap();
    assert_eq!(knn.last_prediction(), Some("c"));
    assert_eq!(knn.label_counts().get("c"), Some(&3));
}

/// Staging twice keeps only the last sample; dropping discards it.
#[test]
fn staging_lifecycle() {
    let mut knn = two_blobs();
    knn.add_to_stage("A", vec![1.0, 1.0]).unwrap();
    knn.add_to_stage("B", vec![9.0, 9.0]).unwrap();
    assert!(knn.drop_stage());
    assert!(!knn.drop_stage());

    knn.add_to_stage("B", vec![9.0, 9.0]).unwrap();
    knn.classify(&[9.0, 9.0], 1).unwrap();
    assert_eq!(knn.len(), 10);
    assert_eq!(count(&knn, "B"), 5);
}

/// Undo the last input, remove a neighbor, wipe everything.
#[test]
fn removal_operations() {
    let mut knn = two_blobs();
    knn.add_to_stage("A", vec![0.1, 0.1]).unwrap();
    knn.classify(&[10.0, 10.0], 2).unwrap();
    assert_eq!(knn.len(), 10);

    let latest = knn.remove_latest_input().unwrap();
    assert_eq!(latest.features(), &[0.1, 0.1]);

    let snapshot = knn.closest_list();
    assert!(knn.remove_item_in_closest_list(&snapshot, 1).unwrap());
    assert_eq!(count(&knn, "B"), 4);

    knn.clear();
    assert!(knn.is_empty());
}

/// Features near the top of the f64 range still rank by distance.
#[test]
fn huge_features_rank_by_distance() {
    let mut knn = Classifier::new(ClassifierConfig::new()).unwrap();
    knn.add_training_items(vec![
        ("far", vec![1e200]),
        ("near", vec![-1e200]),
        ("near", vec![-1e200 + 1e190]),
    ])
    .unwrap();

    assert_eq!(knn.classify(&[-1e200], 2).unwrap(), "near");
    let ranking = knn.ranking();
    let labels: Vec<&str> = ranking.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["near", "near", "far"]);
    assert!(ranking.iter().all(|r| r.distance.is_finite()));
}
