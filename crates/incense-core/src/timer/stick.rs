//! Selectable stick lengths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A session duration on the selectable grid: 5 to 60 minutes in steps of 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StickLength(u32);

impl StickLength {
    pub const MIN_MINUTES: u32 = 5;
    pub const MAX_MINUTES: u32 = 60;
    pub const STEP_MINUTES: u32 = 5;
    pub const DEFAULT_MINUTES: u32 = 20;

    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            return Err(ValidationError::DurationOutOfRange {
                minutes,
                min: Self::MIN_MINUTES,
                max: Self::MAX_MINUTES,
            });
        }
        if minutes % Self::STEP_MINUTES != 0 {
            return Err(ValidationError::DurationNotMultiple {
                minutes,
                step: Self::STEP_MINUTES,
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn secs(self) -> u32 {
        self.0 * 60
    }

    /// Every selectable length, shortest first.
    pub fn all() -> impl Iterator<Item = StickLength> {
        (Self::MIN_MINUTES..=Self::MAX_MINUTES)
            .step_by(Self::STEP_MINUTES as usize)
            .map(StickLength)
    }
}

impl Default for StickLength {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

impl TryFrom<u32> for StickLength {
    type Error = ValidationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<StickLength> for u32 {
    fn from(len: StickLength) -> u32 {
        len.0
    }
}

impl fmt::Display for StickLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_twelve_lengths() {
        let all: Vec<u32> = StickLength::all().map(StickLength::minutes).collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all.first(), Some(&5));
        assert_eq!(all.last(), Some(&60));
    }

    #[test]
    fn converts_minutes_to_seconds() {
        assert_eq!(StickLength::from_minutes(5).unwrap().secs(), 300);
        assert_eq!(StickLength::from_minutes(60).unwrap().secs(), 3600);
    }

    #[test]
    fn rejects_values_off_the_grid() {
        assert_eq!(
            StickLength::from_minutes(0),
            Err(ValidationError::DurationOutOfRange { minutes: 0, min: 5, max: 60 })
        );
        assert_eq!(
            StickLength::from_minutes(65),
            Err(ValidationError::DurationOutOfRange { minutes: 65, min: 5, max: 60 })
        );
        assert_eq!(
            StickLength::from_minutes(12),
            Err(ValidationError::DurationNotMultiple { minutes: 12, step: 5 })
        );
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<StickLength>("25").is_ok());
        assert!(serde_json::from_str::<StickLength>("26").is_err());
    }
}
