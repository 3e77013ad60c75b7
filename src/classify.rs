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

use std::collections::BTreeMap;

use crate::streak::PROBLEMATIC_FAILURE_STREAK;
use crate::types::card::Card;
use crate::types::tag::WordTag;

/// Ease factor at or below which a card needs practice.
const NEEDS_PRACTICE_EASE: f64 = 1.8;

/// Repetitions required before a card can count as mastered.
const MASTERED_REPETITIONS: u32 = 5;

/// Ease factor required for a card to count as mastered.
const MASTERED_EASE: f64 = 2.5;

/// The classification rules, in priority order. The first matching rule
/// wins.
const RULES: [(fn(&Card) -> bool, WordTag); 5] = [
    (is_problematic, WordTag::Problematic),
    (is_struggling, WordTag::Struggling),
    (needs_practice, WordTag::NeedsPractice),
    (is_improving, WordTag::Improving),
    (is_mastered, WordTag::Mastered),
];

/// Classify a card into a difficulty tag. Returns `None` for cards with no
/// review history and no flags: a new, untouched card is intentionally
/// unclassified rather than defaulting to mastered.
pub fn classify(card: &Card) -> Option<WordTag> {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(card))
        .map(|(_, tag)| *tag)
}

/// Pinned manually, or failed too many times in a row.
fn is_problematic(card: &Card) -> bool {
    card.is_problematic || card.consecutive_failures >= PROBLEMATIC_FAILURE_STREAK
}

fn is_struggling(card: &Card) -> bool {
    card.total_failures >= 3
}

fn needs_practice(card: &Card) -> bool {
    card.ease_factor <= NEEDS_PRACTICE_EASE
        || (card.repetitions <= 2 && card.total_failures >= 1)
}

/// Has had trouble before but is currently on a success streak.
fn is_improving(card: &Card) -> bool {
    (1..=4).contains(&card.repetitions)
        && card.consecutive_failures == 0
        && card.total_failures >= 1
}

fn is_mastered(card: &Card) -> bool {
    card.repetitions >= MASTERED_REPETITIONS
        && card.ease_factor >= MASTERED_EASE
        && card.consecutive_failures == 0
}

/// Histogram of classifications over a card set, keyed by tag id. Tags with
/// no cards are included with a zero count.
pub fn tag_stats(cards: &[Card]) -> BTreeMap<&'static str, usize> {
    let mut stats: BTreeMap<&'static str, usize> = BTreeMap::new();
    for tag in WordTag::all() {
        stats.insert(tag.id(), 0);
    }
    for card in cards {
        if let Some(tag) = classify(card) {
            *stats.entry(tag.id()).or_insert(0) += 1;
        }
    }
    stats
}
