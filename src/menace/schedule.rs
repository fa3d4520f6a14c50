//! Initial seed counts for freshly built matchboxes

use std::{fmt, str::FromStr};

use serde::Serialize;

/// Initial seeds per empty cell, bucketed by the rank of the matchbox board.
///
/// Ranks are grouped in pairs (0-1, 2-3, 4-5, 6+) so that an agent moving
/// first or second sees the same schedule for its 1st, 2nd, 3rd and later
/// decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitialSeedSchedule {
    pub per_decision: [u32; 4],
}

impl InitialSeedSchedule {
    /// Creates a new schedule. Values are raised to at least one seed so no
    /// legal move starts out unselectable.
    pub fn new(per_decision: [u32; 4]) -> Self {
        Self {
            per_decision: per_decision.map(|value| value.max(1)),
        }
    }

    /// Same seed count for every cell at every rank.
    pub fn uniform(seeds: u32) -> Self {
        Self::new([seeds; 4])
    }

    /// Michie's schedule: 4/3/2/1 seeds for successive decisions.
    pub fn menace() -> Self {
        Self::new([4, 3, 2, 1])
    }

    pub fn seeds_for_rank(&self, rank: usize) -> u32 {
        self.per_decision[(rank / 2).min(3)]
    }
}

impl Default for InitialSeedSchedule {
    fn default() -> Self {
        InitialSeedSchedule::uniform(4)
    }
}

impl fmt::Display for InitialSeedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.per_decision;
        write!(f, "{a},{b},{c},{d}")
    }
}

impl FromStr for InitialSeedSchedule {
    type Err = crate::Error;

    /// Accepts either a single count (`4`) or four counts (`4,3,2,1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::new();
        for part in s
            .split([',', ';', ' ', '\t'])
            .filter(|token| !token.is_empty())
        {
            let value: u32 = part
                .parse()
                .map_err(|_| crate::Error::InvalidConfiguration {
                    message: format!("invalid seed count '{part}' in schedule '{s}'"),
                })?;
            if value == 0 {
                return Err(crate::Error::InvalidConfiguration {
                    message: format!("seed counts must be at least 1 in schedule '{s}'"),
                });
            }
            values.push(value);
        }

        match values.as_slice() {
            [seeds] => Ok(Self::uniform(*seeds)),
            [a, b, c, d] => Ok(Self::new([*a, *b, *c, *d])),
            _ => Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "expected one or four seed counts, got {} in '{s}'",
                    values.len()
                ),
            }),
        }
    }
}
