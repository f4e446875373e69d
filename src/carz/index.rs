//! # Positions
//!
//! Users address cars by their 1-based position in the stored collection, the
//! number printed next to each card. The core works with 0-based indexes; this
//! module converts between the two and expands ranges.
//!
//! Positions are not identities: after a delete every car behind the removed
//! one moves up by one. A position typed by the user is resolved against the
//! collection as it is at that moment.

use std::fmt;
use std::str::FromStr;

/// Widest range a single argument may expand to.
pub const MAX_RANGE_LEN: usize = 10_000;

/// A 1-based position as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(usize);

impl Position {
    pub fn from_index(index: usize) -> Self {
        Position(index + 1)
    }

    /// The 0-based index into the collection.
    pub fn index(&self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("Positions start at 1".to_string()),
            Ok(n) => Ok(Position(n)),
            Err(_) => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// Parses a single position or an inclusive range such as `2-4`.
///
/// Start must be <= end. Whether the positions exist is checked later, against
/// the collection.
pub fn parse_position_or_range(s: &str) -> Result<Vec<Position>, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = Position::from_str(&s[..dash_pos])?;
            let end = Position::from_str(&s[dash_pos + 1..])?;
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            if end.0 - start.0 >= MAX_RANGE_LEN {
                return Err(format!(
                    "Range {} spans more than {} positions",
                    s, MAX_RANGE_LEN
                ));
            }
            return Ok((start.0..=end.0).map(Position).collect());
        }
    }

    Position::from_str(s).map(|p| vec![p])
}

/// Parses every input, expanding ranges, and returns 0-based indexes.
pub fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<usize>, String> {
    let mut indexes = Vec::new();
    for input in inputs {
        for position in parse_position_or_range(input.as_ref())? {
            indexes.push(position.index());
        }
    }
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_position_maps_to_zero_based() {
        assert_eq!(parse_indexes(&["1"]).unwrap(), vec![0]);
        assert_eq!(Position::from_index(4).to_string(), "5");
    }

    #[test]
    fn ranges_expand_inclusively() {
        assert_eq!(parse_indexes(&["2-4", "7"]).unwrap(), vec![1, 2, 3, 6]);
        assert_eq!(parse_indexes(&["3-3"]).unwrap(), vec![2]);
    }

    #[test]
    fn rejects_zero_reversed_and_garbage() {
        assert!(parse_indexes(&["0"]).is_err());
        assert!(parse_indexes(&["4-2"]).is_err());
        assert!(parse_indexes(&["p1"]).is_err());
        assert!(parse_indexes(&["-1"]).is_err());
    }

    #[test]
    fn oversized_ranges_are_rejected() {
        let widest = format!("1-{}", MAX_RANGE_LEN);
        assert_eq!(parse_indexes(&[widest]).unwrap().len(), MAX_RANGE_LEN);

        let too_wide = format!("1-{}", MAX_RANGE_LEN + 1);
        assert!(parse_indexes(&[too_wide]).is_err());
        assert!(parse_indexes(&["1-18446744073709551615"]).is_err());
    }
}
