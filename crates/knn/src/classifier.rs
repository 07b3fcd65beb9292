//! Classification orchestration: commit, standardize, search, vote, adapt.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ClassifierConfig;
use crate::distance::VarianceProfile;
use crate::error::KnnError;
use crate::result::{Neighbor, Ranked};
use crate::sample::{Sample, SampleId};
use crate::select::select_k_nearest;
use crate::store::{CommitReport, TrainingStore, check_features};
use crate::vote::resolve_vote;

/// State captured by the most recent [`Classifier::classify`] call.
#[derive(Debug, Clone)]
struct LastClassification {
    /// k nearest neighbors, ascending distance.
    neighbors: Vec<Neighbor>,
    /// Every committed sample's `(distance, label)`, ascending distance.
    ranking: Vec<Ranked>,
    predicted: String,
}

/// Online kNN classifier over a bounded, self-pruning training set.
///
/// # Example
///
/// ```
/// use glyph_knn::{Classifier, ClassifierConfig};
///
/// let mut knn = Classifier::new(ClassifierConfig::new()).unwrap();
/// knn.add_training_item("a", vec![0.0, 0.0]).unwrap();
/// knn.add_training_item("a", vec![0.0, 1.0]).unwrap();
/// knn.add_training_item("b", vec![9.0, 9.0]).unwrap();
///
/// let label = knn.classify(&[0.0, 0.5], 1).unwrap();
/// assert_eq!(label, "a");
/// ```
#[derive(Debug)]
pub struct Classifier {
    config: ClassifierConfig,
    store: TrainingStore,
    last: Option<LastClassification>,
}

impl Classifier {
    /// Creates an empty classifier.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidCapacity`] if the configuration is invalid.
    pub fn new(config: ClassifierConfig) -> Result<Self, KnnError> {
        config.validate()?;
        let store = TrainingStore::new(config.capacity())?;
        Ok(Self {
            config,
            store,
            last: None,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Sets how many samples are kept per label.
    pub fn set_training_size(&mut self, n: usize) -> Result<(), KnnError> {
        self.store.set_capacity(n)?;
        self.config = self.config.clone().with_capacity(n);
        Ok(())
    }

    /// Returns how many samples are kept per label.
    pub fn training_size(&self) -> usize {
        self.store.capacity()
    }

    /// Adds a committed sample directly, bypassing staging.
    pub fn add_training_item(
        &self,
        label: impl Into<String>,
        features: Vec<f64>,
    ) -> Result<SampleId, KnnError> {
        self.store.insert(label, features)
    }

    /// Adds many committed samples directly; all or nothing.
    pub fn add_training_items<L, I>(&self, items: I) -> Result<Vec<SampleId>, KnnError>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Vec<f64>)>,
    {
        self.store.insert_many(items)
    }

    /// Classifies `query` by majority vote of its `k` nearest neighbors.
    ///
    /// Commits the staged sample first, rebuilds the variance profile, then
    /// rewards neighbors that agreed with the outcome (score − 1) and
    /// penalises the rest (score + 1).
    ///
    /// # Errors
    ///
    /// - [`KnnError::EmptyFeatures`] / [`KnnError::NonFiniteInput`] /
    ///   [`KnnError::DimensionMismatch`] for a bad query (nothing changes).
    /// - [`KnnError::EmptyTrainingSet`] if nothing is committed.
    /// - [`KnnError::InvalidK`] if `k` is outside `[1, committed]`.
    #[tracing::instrument(level = "debug", skip(self, query), fields(dim = query.len()))]
    pub fn classify(&mut self, query: &[f64], k: usize) -> Result<String, KnnError> {
        let expected = self
            .store
            .dim()
            .or_else(|| self.store.staged().map(Sample::dim));
        check_features(query, expected, "query")?;

        self.store.commit()?;

        let policy = self.config.zero_variance();
        let committed = self.store.committed_mut();
        let profile = VarianceProfile::from_samples(committed, policy)?;
        if k < 1 || k > committed.len() {
            return Err(KnnError::InvalidK {
                k,
                available: committed.len(),
            });
        }

        let distances: Vec<f64> = committed
            .iter()
            .map(|s| profile.distance_unchecked(query, s.features()))
            .collect();

        let mut ranking: Vec<Ranked> = distances
            .iter()
            .zip(committed.iter())
            .map(|(&distance, s)| Ranked {
                distance,
                label: s.label().to_string(),
            })
            .collect();
        // stable: equal distances keep store order
        ranking.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let top = select_k_nearest(&distances, k);
        let labels: Vec<&str> = top.iter().map(|&(_, i)| committed[i].label()).collect();
        let predicted = resolve_vote(&labels)?;

        let mut neighbors = Vec::with_capacity(top.len());
        for &(distance, i) in &top {
            let s = &mut committed[i];
            let delta = if s.label() == predicted { -1 } else { 1 };
            s.adjust_reliability(delta);
            neighbors.push(Neighbor::new(s.clone(), distance));
        }

        debug!(
            k,
            n_candidates = committed.len(),
            predicted = %predicted,
            nearest = top.first().map(|&(d, _)| d),
            "classified"
        );

        self.last = Some(LastClassification {
            neighbors,
            ranking,
            predicted: predicted.clone(),
        });
        Ok(predicted)
    }

    /// Copies of the k nearest neighbors of the last classification,
    /// ascending distance. Empty before the first classification.
    pub fn closest_list(&self) -> Vec<Sample> {
        self.neighbors().iter().map(|n| n.sample().clone()).collect()
    }

    /// Neighbors of the last classification with their distances.
    pub fn neighbors(&self) -> &[Neighbor] {
        self.last
            .as_ref()
            .map(|l| l.neighbors.as_slice())
            .unwrap_or_default()
    }

    /// Full `(distance, label)` ranking of the last classification.
    pub fn ranking(&self) -> &[Ranked] {
        self.last
            .as_ref()
            .map(|l| l.ranking.as_slice())
            .unwrap_or_default()
    }

    /// Label returned by the last classification.
    pub fn last_prediction(&self) -> Option<&str> {
        self.last.as_ref().map(|l| l.predicted.as_str())
    }

    /// Removes `snapshot[index]` from the committed set by identity.
    ///
    /// Returns `Ok(false)` if that sample is no longer committed.
    pub fn remove_item_in_closest_list(
        &self,
        snapshot: &[Sample],
        index: usize,
    ) -> Result<bool, KnnError> {
        let target = snapshot.get(index).ok_or(KnnError::IndexOutOfRange {
            index,
            len: snapshot.len(),
        })?;
        Ok(self.store.remove(target.id()).is_some())
    }

    /// Removes the most recently committed sample ("undo last input").
    pub fn remove_latest_input(&self) -> Option<Sample> {
        self.store.remove_latest()
    }

    /// Removes every committed sample; the staged sample is kept.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Stages a sample for the next commit, replacing any staged one.
    pub fn add_to_stage(
        &mut self,
        label: impl Into<String>,
        features: Vec<f64>,
    ) -> Result<SampleId, KnnError> {
        self.store.stage(label, features)
    }

    /// Discards the staged sample. Returns whether one was present.
    pub fn drop_stage(&mut self) -> bool {
        self.store.drop_stage()
    }

    /// The staged sample, if any.
    pub fn staged(&self) -> Option<&Sample> {
        self.store.staged()
    }

    /// Commits the staged sample and enforces per-label capacity.
    pub fn commit(&mut self) -> Result<CommitReport, KnnError> {
        self.store.commit()
    }

    /// Records that the last prediction `wrong_label` should have been
    /// `correct_label`.
    ///
    /// Relabels the staged sample, then adjusts the last neighbors: −2 for
    /// those labelled `correct_label`, +2 for those labelled `wrong_label`,
    /// +1 for everything else.
    ///
    /// # Errors
    ///
    /// [`KnnError::NothingStaged`] or [`KnnError::NoClassification`]; no
    /// state changes in either case.
    pub fn correct_wrong_detection(
        &mut self,
        correct_label: &str,
        wrong_label: &str,
    ) -> Result<(), KnnError> {
        if self.store.staged().is_none() {
            return Err(KnnError::NothingStaged);
        }
        let Some(last) = self.last.as_mut() else {
            return Err(KnnError::NoClassification);
        };
        self.store.relabel_staged(correct_label)?;

        let committed = self.store.committed_mut();
        for n in &mut last.neighbors {
            let delta = if n.sample().label() == correct_label {
                -2
            } else if n.sample().label() == wrong_label {
                2
            } else {
                1
            };
            n.sample_mut().adjust_reliability(delta);
            if let Some(s) = committed.iter_mut().find(|s| s.id() == n.sample().id()) {
                s.adjust_reliability(delta);
            }
        }
        debug!(correct_label, wrong_label, "corrected wrong detection");
        Ok(())
    }

    /// Up to `n` alternative labels from the last ranking, nearest first,
    /// excluding the predicted label.
    ///
    /// # Errors
    ///
    /// [`KnnError::NoClassification`] before the first classification.
    pub fn hints(&self, n: usize) -> Result<Vec<String>, KnnError> {
        let last = self.last.as_ref().ok_or(KnnError::NoClassification)?;
        let mut hints: Vec<String> = Vec::new();
        for r in &last.ranking {
            if hints.len() >= n {
                break;
            }
            if r.label != last.predicted && !hints.contains(&r.label) {
                hints.push(r.label.clone());
            }
        }
        Ok(hints)
    }

    /// Copies of all committed samples in store order.
    pub fn samples(&self) -> Vec<Sample> {
        self.store.snapshot()
    }

    /// Labels of all committed samples in store order.
    pub fn labels(&self) -> Vec<String> {
        self.store
            .snapshot()
            .into_iter()
            .map(|s| s.label().to_string())
            .collect()
    }

    /// Number of committed samples per label.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for s in self.store.snapshot() {
            *counts.entry(s.label().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of committed samples.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` when nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Feature dimensionality of the committed samples.
    pub fn dim(&self) -> Option<usize> {
        self.store.dim()
    }
}
