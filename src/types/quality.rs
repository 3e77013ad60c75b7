// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::Fallible;
use crate::error::fail;

/// The threshold below which an answer counts as a lapse.
const SUCCESS_THRESHOLD: u8 = 3;

/// An answer grade on the 0..=5 SM-2 scale. Out-of-range values are rejected
/// at construction: silently clamping would corrupt scheduling invariants.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Fallible<Self> {
        if value > 5 {
            return fail(format!("quality must be between 0 and 5, got {}", value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// A grade below 3 resets the card's progress.
    pub fn is_lapse(self) -> bool {
        self.0 < SUCCESS_THRESHOLD
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() -> Fallible<()> {
        for value in 0..=5 {
            let quality = Quality::new(value)?;
            assert_eq!(quality.value(), value);
        }
        Ok(())
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Quality::new(6).is_err());
        assert!(Quality::new(255).is_err());
    }

    #[test]
    fn test_lapse_threshold() -> Fallible<()> {
        assert!(Quality::new(0)?.is_lapse());
        assert!(Quality::new(1)?.is_lapse());
        assert!(Quality::new(2)?.is_lapse());
        assert!(!Quality::new(3)?.is_lapse());
        assert!(!Quality::new(4)?.is_lapse());
        assert!(!Quality::new(5)?.is_lapse());
        Ok(())
    }
}
