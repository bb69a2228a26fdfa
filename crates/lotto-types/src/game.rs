use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One of the two number zones of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// The front zone (5 of 1..=35 in the standard game).
    Primary,
    /// The back zone (2 of 1..=12 in the standard game).
    Secondary,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Primary, Zone::Secondary];
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// Shape of the draw game: how many numbers are picked per zone and from
/// which range.
///
/// Every candidate and every combined result is measured against the same
/// `GameConfig`; it is built once and shared by reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Numbers picked in the primary zone (P).
    pub primary_count: usize,
    /// Upper bound of the primary zone, inclusive (A).
    pub primary_max: u32,
    /// Numbers picked in the secondary zone (S).
    pub secondary_count: usize,
    /// Upper bound of the secondary zone, inclusive (B).
    pub secondary_max: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::super_lotto()
    }
}

impl GameConfig {
    /// The 5-of-35 plus 2-of-12 game.
    pub fn super_lotto() -> Self {
        Self {
            primary_count: 5,
            primary_max: 35,
            secondary_count: 2,
            secondary_max: 12,
        }
    }

    /// `(count, max)` for a zone.
    pub fn zone(&self, zone: Zone) -> (usize, u32) {
        match zone {
            Zone::Primary => (self.primary_count, self.primary_max),
            Zone::Secondary => (self.secondary_count, self.secondary_max),
        }
    }

    /// Check that both zones can be filled with unique numbers.
    pub fn validate(&self) -> Result<(), TypeError> {
        for zone in Zone::ALL {
            let (count, max) = self.zone(zone);
            if count == 0 {
                return Err(TypeError::InvalidGame(format!(
                    "{zone} zone must pick at least one number"
                )));
            }
            if max == 0 {
                return Err(TypeError::InvalidGame(format!(
                    "{zone} zone upper bound must be at least 1"
                )));
            }
            if count > max as usize {
                return Err(TypeError::InvalidGame(format!(
                    "{zone} zone picks {count} unique numbers but only 1..={max} exist"
                )));
            }
        }
        Ok(())
    }

    /// Check a zone's numbers: exact count, in range, no repeats.
    pub fn validate_numbers(&self, zone: Zone, numbers: &[u32]) -> Result<(), TypeError> {
        let (count, max) = self.zone(zone);
        if numbers.len() != count {
            return Err(TypeError::WrongCount {
                zone,
                expected: count,
                actual: numbers.len(),
            });
        }
        let mut seen = Vec::with_capacity(numbers.len());
        for &number in numbers {
            if number == 0 || number > max {
                return Err(TypeError::OutOfRange { zone, number, max });
            }
            if seen.contains(&number) {
                return Err(TypeError::Duplicate { zone, number });
            }
            seen.push(number);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_lotto_shape() {
        let game = GameConfig::default();
        assert_eq!(game.zone(Zone::Primary), (5, 35));
        assert_eq!(game.zone(Zone::Secondary), (2, 12));
        assert!(game.validate().is_ok());
    }

    #[test]
    fn rejects_more_picks_than_numbers() {
        let game = GameConfig {
            primary_count: 40,
            primary_max: 35,
            ..GameConfig::default()
        };
        let err = game.validate().unwrap_err();
        assert!(matches!(err, TypeError::InvalidGame(ref m) if m.contains("primary")));
    }

    #[test]
    fn rejects_empty_zone() {
        let game = GameConfig {
            secondary_count: 0,
            ..GameConfig::default()
        };
        assert!(game.validate().is_err());
    }

    #[test]
    fn full_range_pick_is_valid() {
        let game = GameConfig {
            secondary_count: 12,
            ..GameConfig::default()
        };
        assert!(game.validate().is_ok());
    }

    #[test]
    fn validate_numbers_cases() {
        let game = GameConfig::default();
        assert!(game.validate_numbers(Zone::Primary, &[1, 2, 3, 4, 35]).is_ok());
        assert_eq!(
            game.validate_numbers(Zone::Primary, &[1, 2, 3]),
            Err(TypeError::WrongCount {
                zone: Zone::Primary,
                expected: 5,
                actual: 3
            })
        );
        assert_eq!(
            game.validate_numbers(Zone::Secondary, &[0, 5]),
            Err(TypeError::OutOfRange {
                zone: Zone::Secondary,
                number: 0,
                max: 12
            })
        );
        assert_eq!(
            game.validate_numbers(Zone::Secondary, &[13, 5]),
            Err(TypeError::OutOfRange {
                zone: Zone::Secondary,
                number: 13,
                max: 12
            })
        );
        assert_eq!(
            game.validate_numbers(Zone::Secondary, &[5, 5]),
            Err(TypeError::Duplicate {
                zone: Zone::Secondary,
                number: 5
            })
        );
    }

    #[test]
    fn zone_display() {
        assert_eq!(Zone::Primary.to_string(), "primary");
        assert_eq!(Zone::Secondary.to_string(), "secondary");
    }
}
