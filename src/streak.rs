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

use crate::types::card::Card;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// Failures in a row after which a card is implicitly problematic. The
/// classifier surfaces this without setting the card's pin.
pub const PROBLEMATIC_FAILURE_STREAK: u32 = 3;

/// The failure-counter fields produced by a review, merged into the card
/// alongside the scheduling update.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub consecutive_failures: u32,
    pub total_failures: u32,
    pub last_failure_date: Option<Timestamp>,
    pub is_problematic: bool,
}

/// Update the failure counters for one review. A success resets the
/// consecutive count; nothing here clears a manual problematic pin.
pub fn record_outcome(card: &Card, quality: Quality, now: Timestamp) -> Outcome {
    if quality.is_lapse() {
        Outcome {
            consecutive_failures: card.consecutive_failures + 1,
            total_failures: card.total_failures + 1,
            last_failure_date: Some(now),
            is_problematic: card.is_problematic,
        }
    } else {
        Outcome {
            consecutive_failures: 0,
            total_failures: card.total_failures,
            last_failure_date: card.last_failure_date,
            is_problematic: card.is_problematic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::types::id::DeckId;

    fn now() -> Timestamp {
        Timestamp::from_ymd_hms(2025, 3, 1, 9, 0, 0)
    }

    fn card() -> Card {
        Card::new(DeckId::of("Spanish"), "perro", "dog", now())
    }

    #[test]
    fn test_failure_increments_both_counters() -> Fallible<()> {
        let mut card = card();
        card.consecutive_failures = 1;
        card.total_failures = 4;
        let outcome = record_outcome(&card, Quality::new(2)?, now());
        assert_eq!(outcome.consecutive_failures, 2);
        assert_eq!(outcome.total_failures, 5);
        assert_eq!(outcome.last_failure_date, Some(now()));
        Ok(())
    }

    #[test]
    fn test_success_resets_consecutive_only() -> Fallible<()> {
        let mut card = card();
        card.consecutive_failures = 2;
        card.total_failures = 4;
        card.last_failure_date = Some(now());
        let outcome = record_outcome(&card, Quality::new(4)?, now());
        assert_eq!(outcome.consecutive_failures, 0);
        assert_eq!(outcome.total_failures, 4);
        assert_eq!(outcome.last_failure_date, Some(now()));
        Ok(())
    }

    #[test]
    fn test_manual_pin_survives_success() -> Fallible<()> {
        let mut card = card();
        card.is_problematic = true;
        let outcome = record_outcome(&card, Quality::new(5)?, now());
        assert!(outcome.is_problematic);
        Ok(())
    }

    #[test]
    fn test_failure_does_not_set_pin() -> Fallible<()> {
        let mut card = card();
        card.consecutive_failures = 5;
        let outcome = record_outcome(&card, Quality::new(0)?, now());
        assert!(!outcome.is_problematic);
        Ok(())
    }
}
