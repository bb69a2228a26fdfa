use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use lotto_types::{GameConfig, TypeError, Zone};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::source::draw_zone;

/// Draws counted toward hot and cold numbers.
pub const RECENT_WINDOW: usize = 30;

/// Bounds of the simulated history length.
pub const MIN_HISTORY: u32 = 800;
pub const MAX_HISTORY: u32 = 1200;

/// Frequency statistics for one zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStats {
    /// Appearances per number over the whole history, every number present.
    pub frequencies: BTreeMap<u32, u32>,
    /// Most frequent numbers in the recent window.
    pub hot: Vec<u32>,
    /// Least frequent numbers in the recent window.
    pub cold: Vec<u32>,
    /// Most frequent numbers over the whole history.
    pub most_frequent: Vec<u32>,
    /// Least frequent numbers over the whole history.
    pub least_frequent: Vec<u32>,
}

/// Statistics over a simulated draw history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAnalysis {
    pub total_draws: u32,
    pub recent_window: usize,
    pub last_update: NaiveDateTime,
    pub primary: ZoneStats,
    pub secondary: ZoneStats,
}

impl DataAnalysis {
    /// Simulate a history of 800 to 1200 draws and summarize it.
    ///
    /// Each list holds as many numbers as the zone picks, so every number
    /// stays within `1..=max` of `game`.
    pub fn simulate<R: Rng + ?Sized>(
        game: &GameConfig,
        last_update: NaiveDateTime,
        rng: &mut R,
    ) -> Result<Self, TypeError> {
        game.validate()?;
        let total_draws = rng.gen_range(MIN_HISTORY..=MAX_HISTORY);

        let mut history: Vec<(Vec<u32>, Vec<u32>)> = Vec::with_capacity(total_draws as usize);
        for _ in 0..total_draws {
            history.push((
                draw_zone(game, Zone::Primary, rng),
                draw_zone(game, Zone::Secondary, rng),
            ));
        }

        let primary = zone_stats(game, Zone::Primary, history.iter().map(|(p, _)| p));
        let secondary = zone_stats(game, Zone::Secondary, history.iter().map(|(_, s)| s));
        tracing::debug!(total_draws, "simulated draw history");

        Ok(Self {
            total_draws,
            recent_window: RECENT_WINDOW,
            last_update,
            primary,
            secondary,
        })
    }

    pub fn zone(&self, zone: Zone) -> &ZoneStats {
        match zone {
            Zone::Primary => &self.primary,
            Zone::Secondary => &self.secondary,
        }
    }
}

fn zone_stats<'a, I>(game: &GameConfig, zone: Zone, draws: I) -> ZoneStats
where
    I: DoubleEndedIterator<Item = &'a Vec<u32>> + Clone,
{
    let (count, max) = game.zone(zone);
    let frequencies = count_numbers(max, draws.clone());
    let recent = count_numbers(max, draws.rev().take(RECENT_WINDOW));

    ZoneStats {
        hot: extreme(&recent, count, true),
        cold: extreme(&recent, count, false),
        most_frequent: extreme(&frequencies, count, true),
        least_frequent: extreme(&frequencies, count, false),
        frequencies,
    }
}

fn count_numbers<'a>(
    max: u32,
    draws: impl Iterator<Item = &'a Vec<u32>>,
) -> BTreeMap<u32, u32> {
    let mut counts: BTreeMap<u32, u32> = (1..=max).map(|n| (n, 0)).collect();
    for n in draws.flatten() {
        *counts.entry(*n).or_default() += 1;
    }
    counts
}

/// The `n` numbers with the highest (or lowest) count, ties to the lower
/// number, returned sorted.
fn extreme(counts: &BTreeMap<u32, u32>, n: usize, highest: bool) -> Vec<u32> {
    let mut ranked: Vec<(u32, u32)> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    ranked.sort_by(|a, b| {
        let by_count = if highest { b.1.cmp(&a.1) } else { a.1.cmp(&b.1) };
        by_count.then(a.0.cmp(&b.0))
    });
    let mut picked: Vec<u32> = ranked.into_iter().take(n).map(|(k, _)| k).collect();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn simulate(seed: u64) -> DataAnalysis {
        let mut rng = StdRng::seed_from_u64(seed);
        DataAnalysis::simulate(&GameConfig::default(), at(), &mut rng).unwrap()
    }

    #[test]
    fn lists_fit_the_game() {
        let game = GameConfig::default();
        let analysis = simulate(1);
        assert!((MIN_HISTORY..=MAX_HISTORY).contains(&analysis.total_draws));

        for zone in Zone::ALL {
            let (count, max) = game.zone(zone);
            let stats = analysis.zone(zone);
            for list in [&stats.hot, &stats.cold, &stats.most_frequent, &stats.least_frequent] {
                assert_eq!(list.len(), count);
                assert!(list.windows(2).all(|w| w[0] < w[1]));
                assert!(list.iter().all(|n| (1..=max).contains(n)));
            }
            assert_eq!(stats.frequencies.len(), max as usize);
            let total: u32 = stats.frequencies.values().sum();
            assert_eq!(total, analysis.total_draws * count as u32);
        }
    }

    #[test]
    fn most_frequent_outrank_least_frequent() {
        let analysis = simulate(8);
        let f = &analysis.primary.frequencies;
        let lowest_top = analysis.primary.most_frequent.iter().map(|n| f[n]).min().unwrap();
        let highest_bottom = analysis.primary.least_frequent.iter().map(|n| f[n]).max().unwrap();
        assert!(lowest_top >= highest_bottom);
    }

    #[test]
    fn hot_and_cold_are_disjoint() {
        let analysis = simulate(3);
        for zone in Zone::ALL {
            let stats = analysis.zone(zone);
            assert!(stats.hot.iter().all(|n| !stats.cold.contains(n)));
        }
    }

    #[test]
    fn extreme_breaks_ties_by_number() {
        let counts = BTreeMap::from([(1, 2), (2, 5), (3, 5), (4, 2), (5, 0)]);
        assert_eq!(extreme(&counts, 2, true), vec![2, 3]);
        assert_eq!(extreme(&counts, 2, false), vec![1, 5]);
    }

    #[test]
    fn seeded_analysis_is_reproducible() {
        assert_eq!(simulate(6), simulate(6));
    }

    #[test]
    fn invalid_game_is_rejected() {
        let game = GameConfig {
            secondary_count: 13,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = DataAnalysis::simulate(&game, at(), &mut rng).unwrap_err();
        assert!(matches!(err, TypeError::InvalidGame(_)));
    }
}
