use std::cmp::Ordering;
use std::collections::BTreeMap;

use lotto_types::{Candidate, Zone};
use serde::{Deserialize, Serialize};

use crate::weights::WeightTable;

/// Accumulated weighted votes per number for one zone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally {
    votes: BTreeMap<u32, f64>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `number`'s entry, creating it at zero if absent.
    pub fn add(&mut self, number: u32, weight: f64) {
        *self.votes.entry(number).or_insert(0.0) += weight;
    }

    pub fn get(&self, number: u32) -> Option<f64> {
        self.votes.get(&number).copied()
    }

    /// Number of distinct numbers that received a vote.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Entries ordered by descending votes, ties by ascending number.
    pub fn ranked(&self) -> Vec<(u32, f64)> {
        let mut entries: Vec<(u32, f64)> = self.votes.iter().map(|(n, v)| (*n, *v)).collect();
        entries.sort_by(|a, b| rank_order(*a, *b));
        entries
    }

    /// Up to `n` numbers in rank order.
    pub fn top(&self, n: usize) -> Vec<u32> {
        self.ranked().into_iter().take(n).map(|(number, _)| number).collect()
    }
}

fn rank_order(a: (u32, f64), b: (u32, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Build one zone's tally: each candidate adds its source's weight to
/// every number it proposed in that zone.
pub fn tally_votes(candidates: &[&Candidate], weights: &WeightTable, zone: Zone) -> VoteTally {
    let mut tally = VoteTally::new();
    for candidate in candidates {
        let weight = weights.get(&candidate.source_id);
        for &number in candidate.numbers(zone) {
            tally.add(number, weight);
        }
    }
    tally
}
