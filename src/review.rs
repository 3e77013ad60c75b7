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

use crate::sm2::apply_review;
use crate::streak::record_outcome;
use crate::types::card::Card;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// Apply one review to a card: the SM-2 scheduling update and the failure
/// tracker run together. Returns the updated card; persisting it is the
/// caller's responsibility, and nothing is mutated until the caller does.
///
/// Not commutative: interval growth depends on the card's current state, so
/// reviews of one card must be applied in order.
pub fn review_card(card: &Card, quality: Quality, now: Timestamp) -> Card {
    let sched = apply_review(card, quality, now);
    let outcome = record_outcome(card, quality, now);
    let mut updated = card.clone();
    updated.ease_factor = sched.ease_factor;
    updated.interval = sched.interval;
    updated.repetitions = sched.repetitions;
    updated.next_review = sched.next_review;
    updated.last_review = sched.last_review;
    updated.consecutive_failures = outcome.consecutive_failures;
    updated.total_failures = outcome.total_failures;
    updated.last_failure_date = outcome.last_failure_date;
    updated.is_problematic = outcome.is_problematic;
    log::debug!(
        "{} q={} ef={:.2} ivl={}d reps={} fails={}/{}",
        &updated.id.to_hex()[..8],
        quality,
        updated.ease_factor,
        updated.interval,
        updated.repetitions,
        updated.consecutive_failures,
        updated.total_failures,
    );
    updated
}
