use rand::Rng;

use crate::error::{EnsembleError, EnsembleResult};
use crate::vote::VoteTally;

/// Pick `count` numbers for a zone: the top of the tally first, random
/// fill for any shortfall. Returns the sorted pick and the filled numbers.
pub fn select_numbers<R: Rng + ?Sized>(
    tally: &VoteTally,
    count: usize,
    max: u32,
    rng: &mut R,
) -> EnsembleResult<(Vec<u32>, Vec<u32>)> {
    let mut picked = tally.top(count);
    let filled = fill_gaps(&mut picked, count, max, rng)?;
    picked.sort_unstable();
    Ok((picked, filled))
}

/// Top up `selected` to `target` unique numbers from `1..=max`.
///
/// Missing slots are drawn uniformly, without replacement, from the numbers
/// not already selected. Returns the numbers that were drawn, in draw order.
/// The random source is touched only when a gap exists.
pub fn fill_gaps<R: Rng + ?Sized>(
    selected: &mut Vec<u32>,
    target: usize,
    max: u32,
    rng: &mut R,
) -> EnsembleResult<Vec<u32>> {
    if target > max as usize {
        return Err(EnsembleError::Configuration(format!(
            "cannot pick {target} unique numbers from 1..={max}"
        )));
    }
    if selected.len() >= target {
        return Ok(Vec::new());
    }

    let mut pool: Vec<u32> = (1..=max).filter(|n| !selected.contains(n)).collect();
    let needed = target - selected.len();
    let mut drawn = Vec::with_capacity(needed);
    for _ in 0..needed {
        let number = pool.swap_remove(rng.gen_range(0..pool.len()));
        selected.push(number);
        drawn.push(number);
    }

    tracing::debug!(?drawn, target, max, "gap-filled selection");
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn no_gap_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut selected = vec![1, 2];
        let drawn = fill_gaps(&mut selected, 2, 12, &mut rng).unwrap();
        assert!(drawn.is_empty());
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn fills_to_target_without_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut selected = vec![4, 9];
        let drawn = fill_gaps(&mut selected, 5, 35, &mut rng).unwrap();
        assert_eq!(drawn.len(), 3);
        assert_eq!(selected.len(), 5);
        let mut sorted = selected.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
        assert!(selected.iter().all(|n| (1..=35).contains(n)));
        assert!(drawn.iter().all(|n| *n != 4 && *n != 9));
    }

    #[test]
    fn exhausting_the_range_takes_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut selected = vec![2];
        fill_gaps(&mut selected, 3, 3, &mut rng).unwrap();
        selected.sort_unstable();
        assert_eq!(selected, vec![1, 2, 3]);
    }

    #[test]
    fn same_seed_same_draw() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut selected = Vec::new();
            fill_gaps(&mut selected, 5, 35, &mut rng).unwrap()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn two_voted_numbers_topped_up_to_five() {
        // A valid candidate always supplies P numbers, so combine never reaches this path.
        let mut tally = VoteTally::new();
        tally.add(17, 0.6);
        tally.add(17, 0.4);
        tally.add(3, 0.6);

        let mut rng = StdRng::seed_from_u64(11);
        let (picked, filled) = select_numbers(&tally, 5, 35, &mut rng).unwrap();
        assert_eq!(picked.len(), 5);
        assert_eq!(filled.len(), 3);
        assert!(picked.contains(&3) && picked.contains(&17));
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert!(filled.iter().all(|n| tally.get(*n).is_none()));

        let again = select_numbers(&tally, 5, 35, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(again, (picked, filled));
    }

    #[test]
    fn full_tally_needs_no_randomness() {
        let mut tally = VoteTally::new();
        for n in 1..=6 {
            tally.add(n, n as f64);
        }
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let (picked, filled) = select_numbers(&tally, 2, 12, &mut rng).unwrap();
        assert_eq!(picked, vec![5, 6]);
        assert!(filled.is_empty());
    }

    #[test]
    fn target_beyond_range_is_configuration_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut selected = Vec::new();
        let err = fill_gaps(&mut selected, 40, 35, &mut rng).unwrap_err();
        assert!(matches!(err, EnsembleError::Configuration(_)));
        assert!(selected.is_empty());
    }
}
