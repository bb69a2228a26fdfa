use chrono::{Days, NaiveDate};
use lotto_types::{GameConfig, Zone};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::source::draw_zone;

/// Fixed evening draw time.
pub const DRAW_TIME: &str = "21:15:00";

/// Days between consecutive draws.
pub const DRAW_INTERVAL_DAYS: u64 = 7;

/// `"07 12 23 28 35 + 03 07"`.
pub fn format_pick(primary: &[u32], secondary: &[u32]) -> String {
    format!("{} + {}", pad_numbers(primary), pad_numbers(secondary))
}

/// Two-digit, space-separated numbers.
pub fn pad_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| format!("{n:02}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningNumbers {
    pub primary: Vec<u32>,
    pub secondary: Vec<u32>,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTier {
    pub level: u8,
    pub condition: String,
    pub winners: u32,
    /// Prize per winner, in units of 10 000.
    pub prize_per_winner: u32,
    pub total_amount: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotInfo {
    pub current_pool: u32,
    pub is_rollover: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextDraw {
    pub date: NaiveDate,
    pub estimated_jackpot: u32,
    pub days_until: u64,
}

/// A synthetic "latest draw" record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestDraw {
    pub period: String,
    pub draw_date: NaiveDate,
    pub draw_time: String,
    pub winning_numbers: WinningNumbers,
    pub prize_breakdown: Vec<PrizeTier>,
    pub jackpot: JackpotInfo,
    pub next_draw: NextDraw,
}

impl LatestDraw {
    pub fn total_winners(&self) -> u32 {
        self.prize_breakdown.iter().map(|t| t.winners).sum()
    }
}

/// Produces plausible recent draws for a game shape.
#[derive(Clone, Copy, Debug)]
pub struct DrawSimulator {
    game: GameConfig,
}

impl DrawSimulator {
    pub fn new(game: GameConfig) -> Self {
        Self { game }
    }

    /// A draw held one to three days before `today`.
    pub fn latest<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> LatestDraw {
        let days_ago: u64 = rng.gen_range(1..=3);
        let draw_date = today - Days::new(days_ago);
        let period = format!("{}{:03}", today.format("%y"), rng.gen_range(100..=150));

        let primary = draw_zone(&self.game, Zone::Primary, rng);
        let secondary = draw_zone(&self.game, Zone::Secondary, rng);
        let display_text = format_pick(&primary, &secondary);

        let first_winners = rng.gen_range(0..=3);
        let first_prize = rng.gen_range(500..=1500);
        let second_winners = rng.gen_range(5..=25);
        let second_prize = rng.gen_range(15..=50);
        let prize_breakdown = vec![
            PrizeTier {
                level: 1,
                condition: format!(
                    "{} primary + {} secondary",
                    self.game.primary_count, self.game.secondary_count
                ),
                winners: first_winners,
                prize_per_winner: first_prize,
                total_amount: first_winners * first_prize,
            },
            PrizeTier {
                level: 2,
                condition: format!(
                    "{} primary + {} secondary",
                    self.game.primary_count,
                    self.game.secondary_count.saturating_sub(1)
                ),
                winners: second_winners,
                prize_per_winner: second_prize,
                total_amount: second_winners * second_prize,
            },
        ];

        let jackpot = JackpotInfo {
            current_pool: rng.gen_range(800..=2000),
            is_rollover: rng.gen_bool(0.5),
        };
        let next_draw = NextDraw {
            date: draw_date + Days::new(DRAW_INTERVAL_DAYS),
            estimated_jackpot: rng.gen_range(800..=2000),
            days_until: DRAW_INTERVAL_DAYS - days_ago,
        };

        tracing::debug!(%period, %draw_date, winning = %display_text, "simulated draw");
        LatestDraw {
            period,
            draw_date,
            draw_time: DRAW_TIME.to_string(),
            winning_numbers: WinningNumbers {
                primary,
                secondary,
                display: display_text,
            },
            prize_breakdown,
            jackpot,
            next_draw,
        }
    }
}

impl Default for DrawSimulator {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(format_pick(&[7, 12, 23, 28, 35], &[3, 7]), "07 12 23 28 35 + 03 07");
        assert_eq!(pad_numbers(&[]), "");
    }

    #[test]
    fn draw_dates_are_consistent() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..30 {
            let draw = DrawSimulator::default().latest(today(), &mut rng);
            let age = (today() - draw.draw_date).num_days();
            assert!((1..=3).contains(&age));
            assert_eq!((draw.next_draw.date - draw.draw_date).num_days(), 7);
            assert_eq!(draw.next_draw.days_until, 7 - age as u64);
            assert!(draw.period.starts_with("24"));
            assert_eq!(draw.period.len(), 5);
        }
    }

    #[test]
    fn winning_numbers_fit_the_game() {
        let game = GameConfig::default();
        let draw = DrawSimulator::new(game).latest(today(), &mut StdRng::seed_from_u64(1));
        let w = &draw.winning_numbers;
        assert!(game.validate_numbers(Zone::Primary, &w.primary).is_ok());
        assert!(game.validate_numbers(Zone::Secondary, &w.secondary).is_ok());
        assert_eq!(w.display, format_pick(&w.primary, &w.secondary));
    }

    #[test]
    fn prize_breakdown_has_two_tiers() {
        let draw = DrawSimulator::default().latest(today(), &mut StdRng::seed_from_u64(9));
        assert_eq!(draw.prize_breakdown.len(), 2);
        assert_eq!(draw.prize_breakdown[0].condition, "5 primary + 2 secondary");
        assert_eq!(draw.prize_breakdown[1].condition, "5 primary + 1 secondary");
        for tier in &draw.prize_breakdown {
            assert_eq!(tier.total_amount, tier.winners * tier.prize_per_winner);
        }
        assert!(draw.total_winners() >= 5);
    }

    #[test]
    fn logs_winning_numbers_at_debug() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let draw = tracing::subscriber::with_default(subscriber, || {
            DrawSimulator::default().latest(today(), &mut StdRng::seed_from_u64(4))
        });
        assert_eq!(draw.winning_numbers.display.len(), "07 12 23 28 35 + 03 07".len());
    }

    #[test]
    fn serializes_dates_as_iso() {
        let draw = DrawSimulator::default().latest(today(), &mut StdRng::seed_from_u64(0));
        let json = serde_json::to_value(&draw).unwrap();
        let date = json["draw_date"].as_str().unwrap();
        assert!(date.starts_with("2024-03-1"));
        assert_eq!(json["draw_time"], DRAW_TIME);
    }
}
