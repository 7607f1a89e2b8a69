//! Validated Project Gutenberg catalog ids

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{IntErrorKind, NonZeroU32};
use std::str::FromStr;

/// A positive catalog id
///
/// Free-form input only becomes a `BookId` through [`FromStr`], so cache
/// keys and URLs are always built from a valid number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(NonZeroU32);

impl BookId {
    /// Returns `None` for zero
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl FromStr for BookId {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::NotANumber(trimmed.to_string()));
        }

        match trimmed.parse::<NonZeroU32>() {
            Ok(id) => Ok(Self(id)),
            Err(e) => match e.kind() {
                IntErrorKind::Zero | IntErrorKind::PosOverflow => {
                    Err(InputError::OutOfRange(trimmed.to_string()))
                }
                _ => Err(InputError::NotANumber(trimmed.to_string())),
            },
        }
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
