//! Majority vote over the nearest neighbors with farthest-first tie elimination.

use crate::error::KnnError;

/// Returns the plurality label among `labels`, which must be ordered by
/// ascending distance.
///
/// When two or more labels share the top count, the farthest entry is
/// dropped and the vote is retried on the shorter prefix. A prefix of one
/// always has a unique winner, so the loop terminates after at most
/// `labels.len()` rounds.
///
/// # Errors
///
/// Returns [`KnnError::UnresolvableTie`] when `labels` is empty.
pub(crate) fn resolve_vote<S: AsRef<str>>(labels: &[S]) -> Result<String, KnnError> {
    for valid_len in (1..=labels.len()).rev() {
        if let Some(winner) = unique_plurality(&labels[..valid_len]) {
            return Ok(winner.to_string());
        }
    }
    Err(KnnError::UnresolvableTie)
}

/// Tallies labels in first-seen order and returns the label with a strict
/// maximum count, or `None` on a tie.
fn unique_plurality<S: AsRef<str>>(labels: &[S]) -> Option<&str> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        match tally.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let max = tally.iter().map(|&(_, c)| c).max()?;
    let mut leaders = tally.iter().filter(|&&(_, c)| c == max);
    let first = leaders.next()?;
    match leaders.next() {
        Some(_) => None,
        None => Some(first.0),
    }
}
