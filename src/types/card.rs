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

use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::level::Level;
use crate::types::timestamp::Timestamp;

/// The ease factor a card starts with.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// The floor of the ease factor. Invariant: `ease_factor >= 1.3` always.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval at or above which a card counts as mature, in days.
const MATURE_INTERVAL: u32 = 21;

/// Interval at or above which a card counts as young rather than learning.
const YOUNG_INTERVAL: u32 = 7;

/// A vocabulary flashcard with its scheduling state. The engine mutates only
/// the scheduling fields and flags; content is passthrough.
#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    /// The word being learned.
    pub word: String,
    /// The word's definition or translation.
    pub definition: String,
    /// Multiplier controlling interval growth. `>= 1.3`, no upper bound.
    pub ease_factor: f64,
    /// Days until the next review. `0` means due today / never scheduled.
    pub interval: u32,
    /// Consecutive successful reviews since the last lapse.
    pub repetitions: u32,
    /// The card is due when `next_review <= now`.
    pub next_review: Timestamp,
    /// Absent only before the first review.
    pub last_review: Option<Timestamp>,
    /// Failed reviews in a row; reset on any success.
    pub consecutive_failures: u32,
    /// Failed reviews over the card's lifetime; never reset.
    pub total_failures: u32,
    pub last_failure_date: Option<Timestamp>,
    pub is_favorite: bool,
    pub is_discarded: bool,
    pub needs_review: bool,
    /// May be pinned manually by the user; automatic logic must not silently
    /// overwrite the pin.
    pub is_problematic: bool,
    /// Set and cleared atomically with `is_discarded`.
    pub discarded_at: Option<Timestamp>,
    /// Proficiency metadata, unrelated to scheduling.
    pub level: Option<Level>,
}

/// Display-only scheduling status, recomputed from `repetitions` and
/// `interval`, never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Maturity {
    New,
    Learning,
    Young,
    Mature,
}

impl Maturity {
    pub fn label(self) -> &'static str {
        match self {
            Maturity::New => "new",
            Maturity::Learning => "learning",
            Maturity::Young => "young",
            Maturity::Mature => "mature",
        }
    }
}

impl Card {
    /// Create a card with default scheduling state: due immediately, never
    /// reviewed.
    pub fn new(
        deck_id: DeckId,
        word: impl Into<String>,
        definition: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        let word = word.into().trim().to_string();
        let definition = definition.into().trim().to_string();
        let id = CardId::of(deck_id, &word, &definition);
        Self {
            id,
            deck_id,
            word,
            definition,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review: now,
            last_review: None,
            consecutive_failures: 0,
            total_failures: 0,
            last_failure_date: None,
            is_favorite: false,
            is_discarded: false,
            needs_review: false,
            is_problematic: false,
            discarded_at: None,
            level: None,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }

    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    /// Repair invariant breaches in records read from older data, rather
    /// than failing the read path. The fix is persisted on the next write.
    pub fn normalize(&mut self) {
        if self.ease_factor < MIN_EASE_FACTOR {
            log::debug!(
                "Card {} has ease factor {:.2}, clamping to {MIN_EASE_FACTOR}",
                &self.id.to_hex()[..8],
                self.ease_factor
            );
            self.ease_factor = MIN_EASE_FACTOR;
        }
        if self.is_discarded != self.discarded_at.is_some() {
            self.discarded_at = if self.is_discarded {
                self.last_review
            } else {
                None
            };
        }
    }

    pub fn maturity(&self) -> Maturity {
        if self.repetitions == 0 {
            Maturity::New
        } else if self.interval < YOUNG_INTERVAL {
            Maturity::Learning
        } else if self.interval < MATURE_INTERVAL {
            Maturity::Young
        } else {
            Maturity::Mature
        }
    }
}
