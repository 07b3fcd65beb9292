//! Bounded top-k nearest neighbor tracking.

/// Fixed-capacity list of the k closest candidates seen so far, ordered by
/// ascending distance.
///
/// Entries are `(distance, candidate_index)`. Equal distances keep their
/// arrival order, so the first-seen candidate takes the earlier slot.
#[derive(Debug, Clone)]
pub(crate) struct TopK {
    k: usize,
    slots: Vec<(f64, usize)>,
}

impl TopK {
    pub(crate) fn new(k: usize) -> Self {
        debug_assert!(k >= 1);
        Self {
            k,
            slots: Vec::with_capacity(k),
        }
    }

    /// Inserts a candidate in distance order, dropping the worst entry once
    /// full, and returns the loose bound: the distance of the last occupied
    /// slot.
    pub(crate) fn offer(&mut self, distance: f64, index: usize) -> f64 {
        let pos = self
            .slots
            .iter()
            .position(|&(d, _)| distance < d)
            .unwrap_or(self.slots.len());
        if pos < self.k {
            self.slots.insert(pos, (distance, index));
            self.slots.truncate(self.k);
        }
        self.bound()
    }

    /// Distance of the current worst entry, `+inf` while empty.
    pub(crate) fn bound(&self) -> f64 {
        self.slots.last().map_or(f64::INFINITY, |&(d, _)| d)
    }

    pub(crate) fn into_vec(self) -> Vec<(f64, usize)> {
        self.slots
    }
}

/// Selects the `k` nearest candidates from precomputed distances.
///
/// The first `k` candidates seed the tracker unconditionally; every later
/// candidate is offered only when strictly closer than the current bound.
/// Returns `(distance, index)` pairs in ascending distance.
///
/// # Panics
///
/// Debug-asserts that `1 <= k <= distances.len()`.
pub(crate) fn select_k_nearest(distances: &[f64], k: usize) -> Vec<(f64, usize)> {
    debug_assert!(k >= 1);
    debug_assert!(k <= distances.len());

    let mut top = TopK::new(k);
    let mut bound = f64::INFINITY;
    for (i, &d) in distances.iter().enumerate() {
        if i < k || d < bound {
            bound = top.offer(d, i);
        }
    }
    top.into_vec()
}
