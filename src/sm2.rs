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
use crate::types::card::MIN_EASE_FACTOR;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// Interval after the first successful review, in days.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second successful review, in days.
const SECOND_INTERVAL: u32 = 6;

/// The scheduling fields produced by a review. The caller merges these into
/// the card and persists the result.
#[derive(Clone, Debug)]
pub struct Scheduling {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review: Timestamp,
    pub last_review: Option<Timestamp>,
}

/// The SM-2 update. Pure: the same card, quality, and clock value always
/// produce the same scheduling.
///
/// A lapse (quality below 3) resets repetitions and interval but leaves the
/// ease factor untouched. Canonical SM-2 also penalizes ease on failure;
/// keeping it unchanged is intentional here, and pinned by tests.
pub fn apply_review(card: &Card, quality: Quality, now: Timestamp) -> Scheduling {
    let (ease_factor, interval, repetitions) = if quality.is_lapse() {
        (card.ease_factor, 0, 0)
    } else {
        let repetitions = card.repetitions + 1;
        let interval = match repetitions {
            1 => FIRST_INTERVAL,
            2 => SECOND_INTERVAL,
            _ => grown_interval(card.interval, card.ease_factor),
        };
        let ease_factor = next_ease_factor(card.ease_factor, quality);
        (ease_factor, interval, repetitions)
    };
    Scheduling {
        ease_factor,
        interval,
        repetitions,
        next_review: now.add_days(interval as i64),
        last_review: Some(now),
    }
}

/// Multiply the previous interval by the ease factor, rounding half away
/// from zero.
fn grown_interval(previous: u32, ease_factor: f64) -> u32 {
    (previous as f64 * ease_factor).round() as u32
}

/// `EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`, floored at 1.3,
/// no ceiling.
fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let q = quality.value() as f64;
    let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    (ease_factor + delta).max(MIN_EASE_FACTOR)
}
