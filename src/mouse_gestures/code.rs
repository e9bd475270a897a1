use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest code a stroke may produce; extra direction changes are dropped.
pub const MAX_GESTURE_SEGMENTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn token(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }

    pub fn from_token(token: char) -> Option<Self> {
        match token {
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Left => '⬅',
            Direction::Right => '➡',
            Direction::Up => '⬆',
            Direction::Down => '⬇',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureCodeError {
    Empty,
    TooLong { len: usize },
    InvalidToken { index: usize, token: char },
    RepeatedToken { index: usize },
}

impl fmt::Display for GestureCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureCodeError::Empty => write!(f, "gesture code is empty"),
            GestureCodeError::TooLong { len } => write!(
                f,
                "gesture code has {len} segments, at most {MAX_GESTURE_SEGMENTS} allowed"
            ),
            GestureCodeError::InvalidToken { index, token } => {
                write!(f, "invalid direction '{token}' at position {index}")
            }
            GestureCodeError::RepeatedToken { index } => {
                write!(f, "direction repeats at position {index}")
            }
        }
    }
}

impl std::error::Error for GestureCodeError {}

/// Collapsed direction sequence such as `"LRU"`.
///
/// A code produced by the recognizer may be empty, which means the stroke was
/// not a gesture. [`GestureCode::parse`] only accepts valid codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureCode(String);

impl GestureCode {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn parse(input: &str) -> Result<Self, GestureCodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GestureCodeError::Empty);
        }
        let mut prev = None;
        let mut len = 0;
        for (index, token) in trimmed.chars().enumerate() {
            if Direction::from_token(token).is_none() {
                return Err(GestureCodeError::InvalidToken { index, token });
            }
            if prev == Some(token) {
                return Err(GestureCodeError::RepeatedToken { index });
            }
            prev = Some(token);
            len += 1;
        }
        if len > MAX_GESTURE_SEGMENTS {
            return Err(GestureCodeError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds a code from an already collapsed direction run.
    pub(crate) fn from_directions(directions: &[Direction]) -> Self {
        Self(directions.iter().map(|dir| dir.token()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_GESTURE_SEGMENTS).contains(&self.len())
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.chars().filter_map(Direction::from_token)
    }

    pub fn to_arrows(&self) -> String {
        self.directions().map(Direction::arrow).collect()
    }
}

impl fmt::Display for GestureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for GestureCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for GestureCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_collapsed_codes() {
        let code = GestureCode::parse("LRU").unwrap();
        assert_eq!(code, "LRU");
        assert!(code.is_valid());
        assert_eq!(code.to_arrows(), "⬅➡⬆");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(GestureCode::parse(" "), Err(GestureCodeError::Empty));
        assert_eq!(
            GestureCode::parse("LX"),
            Err(GestureCodeError::InvalidToken { index: 1, token: 'X' })
        );
        assert_eq!(
            GestureCode::parse("RR"),
            Err(GestureCodeError::RepeatedToken { index: 1 })
        );
        assert_eq!(
            GestureCode::parse("LRLRLRLRL"),
            Err(GestureCodeError::TooLong { len: 9 })
        );
    }

    #[test]
    fn empty_code_is_never_valid() {
        assert!(!GestureCode::empty().is_valid());
    }
}
