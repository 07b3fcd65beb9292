//! Committed training samples, the staging slot, and capacity-bounded commit.
//!
//! The committed collection sits behind a single coarse lock so that
//! `&self` operations (bulk loading, removal, snapshots) may be called from
//! several threads. The staging slot and the commit step need `&mut self`,
//! which serializes them with everything else at compile time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::KnnError;
use crate::sample::{Sample, SampleId, first_non_finite};

/// Outcome of a [`TrainingStore::commit`].
#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    /// Id of the staged sample that entered the committed set, if any.
    pub committed: Option<SampleId>,
    /// Samples evicted to restore per-label capacity, in store order.
    pub evicted: Vec<Sample>,
}

/// Bounded per-label training set plus a one-sample staging slot.
#[derive(Debug)]
pub struct TrainingStore {
    committed: Mutex<Vec<Sample>>,
    staged: Option<Sample>,
    capacity: usize,
    next_id: AtomicU64,
}

impl TrainingStore {
    /// Creates an empty store keeping at most `capacity` samples per label.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, KnnError> {
        if capacity < 1 {
            return Err(KnnError::InvalidCapacity { capacity });
        }
        Ok(Self {
            committed: Mutex::new(Vec::new()),
            staged: None,
            capacity,
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the per-label capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the per-label capacity. Takes effect at the next commit,
    /// which evicts at most one sample per overflowing label.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), KnnError> {
        if capacity < 1 {
            return Err(KnnError::InvalidCapacity { capacity });
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Number of committed samples.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Feature dimensionality of the committed samples, `None` when empty.
    pub fn dim(&self) -> Option<usize> {
        self.lock().first().map(Sample::dim)
    }

    /// Copies of every committed sample in store order.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.lock().clone()
    }

    /// Returns a copy of the committed sample with the given id.
    pub fn get(&self, id: SampleId) -> Option<Sample> {
        self.lock().iter().find(|s| s.id() == id).cloned()
    }

    /// Adds one sample directly to the committed set, bypassing staging and
    /// eviction.
    pub fn insert(&self, label: impl Into<String>, features: Vec<f64>) -> Result<SampleId, KnnError> {
        let label = label.into();
        check_label(&label)?;
        let mut committed = self.lock();
        let expected = committed.first().map(Sample::dim);
        check_features(&features, expected, "training sample")?;
        let id = self.allocate_id();
        committed.push(Sample::new(id, label, features));
        Ok(id)
    }

    /// Adds several samples directly to the committed set.
    ///
    /// Either every item is added or none is: the batch is validated against
    /// the store (and against itself) before anything is pushed.
    pub fn insert_many<L, I>(&self, items: I) -> Result<Vec<SampleId>, KnnError>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Vec<f64>)>,
    {
        let items: Vec<(String, Vec<f64>)> =
            items.into_iter().map(|(l, f)| (l.into(), f)).collect();
        let mut committed = self.lock();
        let mut expected = committed.first().map(Sample::dim);
        for (label, features) in &items {
            check_label(label)?;
            check_features(features, expected, "training sample")?;
            expected = Some(features.len());
        }
        let mut ids = Vec::with_capacity(items.len());
        for (label, features) in items {
            let id = self.allocate_id();
            committed.push(Sample::new(id, label, features));
            ids.push(id);
        }
        Ok(ids)
    }

    /// Puts a sample in the staging slot, discarding any previous one.
    pub fn stage(&mut self, label: impl Into<String>, features: Vec<f64>) -> Result<SampleId, KnnError> {
        let label = label.into();
        check_label(&label)?;
        let expected = self.dim();
        check_features(&features, expected, "staged sample")?;
        let id = self.allocate_id();
        if let Some(old) = self.staged.replace(Sample::new(id, label, features)) {
            debug!(replaced = %old.id(), "staged sample replaced");
        }
        Ok(id)
    }

    /// Discards the staged sample. Returns whether one was present.
    pub fn drop_stage(&mut self) -> bool {
        self.staged.take().is_some()
    }

    /// Returns the staged sample, if any.
    pub fn staged(&self) -> Option<&Sample> {
        self.staged.as_ref()
    }

    /// Changes the label of the staged sample.
    pub(crate) fn relabel_staged(&mut self, label: &str) -> Result<(), KnnError> {
        let staged = self.staged.as_mut().ok_or(KnnError::NothingStaged)?;
        check_label(label)?;
        staged.set_label(label);
        Ok(())
    }

    /// Moves the staged sample (if any) into the committed set and evicts,
    /// for every label over capacity, the one sample with the highest
    /// reliability score. The incoming sample is never the one evicted.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::DimensionMismatch`] if the staged sample no longer
    /// matches the committed dimensionality; the sample stays staged.
    pub fn commit(&mut self) -> Result<CommitReport, KnnError> {
        let capacity = self.capacity;
        let staged = self.staged.take();
        let committed = self
            .committed
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);

        let mut incoming = None;
        if let Some(mut sample) = staged {
            if let Some(expected) = committed.first().map(Sample::dim)
                && expected != sample.dim()
            {
                let got = sample.dim();
                self.staged = Some(sample);
                return Err(KnnError::DimensionMismatch { expected, got });
            }
            sample.set_protected(true);
            incoming = Some(sample.id());
            committed.push(sample);
        }

        let victims = select_evictions(committed, capacity);
        let mut evicted = Vec::with_capacity(victims.len());
        if !victims.is_empty() {
            let mut kept = Vec::with_capacity(committed.len() - victims.len());
            for s in committed.drain(..) {
                if victims.contains(&s.id()) {
                    evicted.push(s);
                } else {
                    kept.push(s);
                }
            }
            *committed = kept;
        }

        if let Some(id) = incoming
            && let Some(s) = committed.iter_mut().find(|s| s.id() == id)
        {
            s.set_protected(false);
            s.set_reliability(0);
        }

        for s in &evicted {
            debug!(
                id = %s.id(),
                label = s.label(),
                reliability = s.reliability(),
                "evicted sample"
            );
        }
        debug!(
            committed = ?incoming,
            n_evicted = evicted.len(),
            len = committed.len(),
            "commit complete"
        );

        Ok(CommitReport {
            committed: incoming,
            evicted,
        })
    }

    /// Removes the committed sample with the given id.
    pub fn remove(&self, id: SampleId) -> Option<Sample> {
        let mut committed = self.lock();
        let pos = committed.iter().position(|s| s.id() == id)?;
        Some(committed.remove(pos))
    }

    /// Removes the most recently committed sample.
    pub fn remove_latest(&self) -> Option<Sample> {
        self.lock().pop()
    }

    /// Removes every committed sample. The staging slot is left alone.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Exclusive access to the committed samples for the classification pass.
    pub(crate) fn committed_mut(&mut self) -> &mut Vec<Sample> {
        self.committed
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sample>> {
        self.committed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate_id(&self) -> SampleId {
        SampleId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

/// Picks, for every label bucket larger than `capacity`, the unprotected
/// sample with the numerically largest reliability score. Ties go to the
/// sample met first in store order.
fn select_evictions(samples: &[Sample], capacity: usize) -> Vec<SampleId> {
    let mut buckets: Vec<(&str, Vec<&Sample>)> = Vec::new();
    for s in samples {
        match buckets.iter_mut().find(|(label, _)| *label == s.label()) {
            Some((_, members)) => members.push(s),
            None => buckets.push((s.label(), vec![s])),
        }
    }

    let mut victims = Vec::new();
    for (_, members) in buckets {
        if members.len() <= capacity {
            continue;
        }
        let mut worst: Option<&Sample> = None;
        for &s in &members {
            if s.is_protected() {
                continue;
            }
            if worst.is_none_or(|w| s.reliability() > w.reliability()) {
                worst = Some(s);
            }
        }
        if let Some(w) = worst {
            victims.push(w.id());
        }
    }
    victims
}

/// Rejects labels containing `:` or a line break. Anything else, including
/// the empty string, is a valid label.
pub(crate) fn check_label(label: &str) -> Result<(), KnnError> {
    if label.contains([':', '\n', '\r']) {
        return Err(KnnError::InvalidLabel {
            label: label.to_string(),
        });
    }
    Ok(())
}

/// Rejects empty, non-finite, or wrongly sized feature vectors.
pub(crate) fn check_features(
    features: &[f64],
    expected: Option<usize>,
    input: &'static str,
) -> Result<(), KnnError> {
    if features.is_empty() {
        return Err(KnnError::EmptyFeatures { input });
    }
    if first_non_finite(features).is_some() {
        return Err(KnnError::NonFiniteInput { input });
    }
    if let Some(expected) = expected
        && expected != features.len()
    {
        return Err(KnnError::DimensionMismatch {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}
