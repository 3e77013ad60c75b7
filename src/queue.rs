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

use std::collections::HashSet;

use crate::classify::classify;
use crate::types::card::Card;
use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::settings::Settings;
use crate::types::tag::WordTag;
use crate::types::timestamp::Timestamp;

/// Ease factor below which a reviewed card counts as difficult.
pub const DIFFICULT_EASE_CEILING: f64 = 2.0;

/// Cards in scope for a query: optionally restricted to one deck, and
/// excluding discarded cards unless `include_discarded` asks for them.
pub fn cards_in_scope<'a>(
    cards: &'a [Card],
    deck_id: Option<DeckId>,
    include_discarded: bool,
) -> impl Iterator<Item = &'a Card> {
    cards.iter().filter(move |card| {
        (include_discarded || !card.is_discarded)
            && deck_id.is_none_or(|deck_id| card.deck_id == deck_id)
    })
}

/// Cards whose next review has come around. New cards are due by
/// construction, so they appear here too.
pub fn due_cards<'a>(
    cards: &'a [Card],
    now: Timestamp,
    deck_id: Option<DeckId>,
) -> Vec<&'a Card> {
    cards_in_scope(cards, deck_id, false)
        .filter(|card| card.is_due(now))
        .collect()
}

/// Cards that have never been successfully reviewed, regardless of due date.
pub fn new_cards<'a>(cards: &'a [Card], deck_id: Option<DeckId>) -> Vec<&'a Card> {
    cards_in_scope(cards, deck_id, false)
        .filter(|card| card.is_new())
        .collect()
}

/// Reviewed cards with a low ease factor, hardest first. Ties are broken by
/// id so the order is deterministic.
pub fn difficult_cards<'a>(cards: &'a [Card], deck_id: Option<DeckId>) -> Vec<&'a Card> {
    let mut difficult: Vec<&Card> = cards_in_scope(cards, deck_id, false)
        .filter(|card| card.repetitions >= 1 && card.ease_factor < DIFFICULT_EASE_CEILING)
        .collect();
    difficult.sort_by(|a, b| {
        a.ease_factor
            .total_cmp(&b.ease_factor)
            .then_with(|| a.id.cmp(&b.id))
    });
    difficult
}

/// Cards worth revisiting: flagged for review, or difficult. The union is
/// de-duplicated by id; order is not significant.
pub fn review_words<'a>(cards: &'a [Card], deck_id: Option<DeckId>) -> Vec<&'a Card> {
    let mut seen: HashSet<CardId> = HashSet::new();
    let mut words: Vec<&Card> = Vec::new();
    let flagged = cards_in_scope(cards, deck_id, false).filter(|card| card.needs_review);
    for card in flagged.chain(difficult_cards(cards, deck_id)) {
        if seen.insert(card.id) {
            words.push(card);
        }
    }
    words
}

/// Cards the classifier puts in the problematic tier, whether pinned or
/// implied by the failure streak.
pub fn problematic_words<'a>(cards: &'a [Card], deck_id: Option<DeckId>) -> Vec<&'a Card> {
    cards_in_scope(cards, deck_id, false)
        .filter(|card| classify(card) == Some(WordTag::Problematic))
        .collect()
}

/// Discarded cards, for restore and list screens.
pub fn discarded_cards<'a>(cards: &'a [Card], deck_id: Option<DeckId>) -> Vec<&'a Card> {
    cards_in_scope(cards, deck_id, true)
        .filter(|card| card.is_discarded)
        .collect()
}

/// The day's study set: due reviews capped by `reviews_per_day` plus new
/// cards capped by `new_cards_per_day`, preserving input order. The uncapped
/// pending counts are kept so a UI can show "N of M".
pub struct DailyQueue<'a> {
    pub review_cards: Vec<&'a Card>,
    pub new_cards: Vec<&'a Card>,
    pub pending_review_count: usize,
    pub pending_new_count: usize,
}

impl<'a> DailyQueue<'a> {
    /// Reviews first, then new cards.
    pub fn cards(&self) -> Vec<&'a Card> {
        let mut cards = self.review_cards.clone();
        cards.extend(&self.new_cards);
        cards
    }

    /// Size of the capped session.
    pub fn today_count(&self) -> usize {
        self.review_cards.len() + self.new_cards.len()
    }

    /// Total cards waiting, ignoring the daily caps.
    pub fn pending_count(&self) -> usize {
        self.pending_review_count + self.pending_new_count
    }

    pub fn is_empty(&self) -> bool {
        self.today_count() == 0
    }
}

/// Compose the daily session. Short supply just yields fewer cards.
pub fn todays_session<'a>(
    cards: &'a [Card],
    settings: &Settings,
    now: Timestamp,
    deck_id: Option<DeckId>,
) -> DailyQueue<'a> {
    let due: Vec<&Card> = due_cards(cards, now, deck_id)
        .into_iter()
        .filter(|card| !card.is_new())
        .collect();
    let new = new_cards(cards, deck_id);
    let pending_review_count = due.len();
    let pending_new_count = new.len();
    let review_cards: Vec<&Card> = due
        .into_iter()
        .take(settings.reviews_per_day as usize)
        .collect();
    let new_cards: Vec<&Card> = new
        .into_iter()
        .take(settings.new_cards_per_day as usize)
        .collect();
    DailyQueue {
        review_cards,
        new_cards,
        pending_review_count,
        pending_new_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::DeckId;

    fn now() -> Timestamp {
        Timestamp::from_ymd_hms(2025, 3, 10, 9, 0, 0)
    }

    fn card(deck: &str, word: &str) -> Card {
        Card::new(DeckId::of(deck), word, "definition", now())
    }

    fn reviewed(deck: &str, word: &str, ease_factor: f64) -> Card {
        let mut card = card(deck, word);
        card.repetitions = 3;
        card.interval = 10;
        card.ease_factor = ease_factor;
        card.next_review = now().add_days(10);
        card
    }

    #[test]
    fn test_due_cards_filters_by_date_and_deck() {
        let mut scheduled = reviewed("Spanish", "gato", 2.5);
        scheduled.next_review = now().add_days(-1);
        let cards = vec![
            card("Spanish", "perro"),
            scheduled,
            reviewed("Spanish", "vaca", 2.5),
            card("French", "chien"),
        ];
        let due = due_cards(&cards, now(), Some(DeckId::of("Spanish")));
        let words: Vec<&str> = due.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["perro", "gato"]);
        assert_eq!(due_cards(&cards, now(), None).len(), 3);
    }

    #[test]
    fn test_due_cards_excludes_discarded() {
        let mut discarded = card("Spanish", "perro");
        discarded.is_discarded = true;
        let cards = vec![discarded, card("Spanish", "gato")];
        assert_eq!(due_cards(&cards, now(), None).len(), 1);
    }

    #[test]
    fn test_new_cards_ignore_due_date() {
        let mut postponed = card("Spanish", "perro");
        postponed.next_review = now().add_days(5);
        let cards = vec![postponed, reviewed("Spanish", "gato", 2.5)];
        let new = new_cards(&cards, None);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].word, "perro");
    }

    #[test]
    fn test_difficult_cards_sorted_hardest_first() {
        let cards = vec![
            reviewed("Spanish", "uno", 1.9),
            reviewed("Spanish", "dos", 1.4),
            reviewed("Spanish", "tres", 2.5),
            card("Spanish", "cuatro"),
        ];
        let difficult = difficult_cards(&cards, None);
        let words: Vec<&str> = difficult.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["dos", "uno"]);
    }

    #[test]
    fn test_difficult_cards_tie_break_by_id() {
        let mut a = reviewed("Spanish", "uno", 1.5);
        let mut b = reviewed("Spanish", "dos", 1.5);
        if b.id < a.id {
            std::mem::swap(&mut a, &mut b);
        }
        let expected = vec![a.id, b.id];
        let cards = vec![b, a];
        let difficult = difficult_cards(&cards, None);
        let ids: Vec<CardId> = difficult.iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_review_words_deduplicates() {
        // Difficult and flagged for review at once.
        let mut both = reviewed("Spanish", "uno", 1.5);
        both.needs_review = true;
        let mut flagged = reviewed("Spanish", "dos", 2.5);
        flagged.needs_review = true;
        let cards = vec![both, flagged, reviewed("Spanish", "tres", 2.5)];
        let words = review_words(&cards, None);
        assert_eq!(words.len(), 2);
        let mut seen: Vec<&str> = words.iter().map(|c| c.word.as_str()).collect();
        seen.sort();
        assert_eq!(seen, vec!["dos", "uno"]);
    }

    #[test]
    fn test_problematic_words_include_pinned_and_streaks() {
        let mut pinned = reviewed("Spanish", "uno", 2.5);
        pinned.is_problematic = true;
        let mut streak = reviewed("Spanish", "dos", 2.5);
        streak.consecutive_failures = 3;
        streak.total_failures = 3;
        let cards = vec![pinned, streak, reviewed("Spanish", "tres", 2.5)];
        assert_eq!(problematic_words(&cards, None).len(), 2);
    }

    #[test]
    fn test_session_respects_caps() {
        let mut cards = Vec::new();
        for i in 0..50 {
            let mut card = reviewed("Spanish", &format!("review-{i}"), 2.5);
            card.next_review = now().add_days(-1);
            cards.push(card);
        }
        for i in 0..30 {
            cards.push(card("Spanish", &format!("new-{i}")));
        }
        let settings = Settings {
            new_cards_per_day: 5,
            reviews_per_day: 10,
        };
        let queue = todays_session(&cards, &settings, now(), None);
        assert_eq!(queue.review_cards.len(), 10);
        assert_eq!(queue.new_cards.len(), 5);
        assert_eq!(queue.today_count(), 15);
        assert_eq!(queue.pending_review_count, 50);
        assert_eq!(queue.pending_new_count, 30);
        assert_eq!(queue.pending_count(), 80);
    }

    #[test]
    fn test_session_with_short_supply() {
        let cards = vec![card("Spanish", "perro")];
        let settings = Settings::default();
        let queue = todays_session(&cards, &settings, now(), None);
        assert!(queue.review_cards.is_empty());
        assert_eq!(queue.new_cards.len(), 1);
        assert!(!queue.is_empty());
    }

    #[test]
    fn test_session_preserves_input_order() {
        let mut cards = Vec::new();
        for i in 0..5 {
            let mut card = reviewed("Spanish", &format!("word-{i}"), 2.5);
            card.next_review = now().add_days(-1);
            cards.push(card);
        }
        let settings = Settings {
            new_cards_per_day: 20,
            reviews_per_day: 3,
        };
        let queue = todays_session(&cards, &settings, now(), None);
        let words: Vec<&str> = queue.review_cards.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["word-0", "word-1", "word-2"]);
    }

    #[test]
    fn test_discarded_cards_are_only_visible_on_request() {
        let mut discarded = card("Spanish", "perro");
        discarded.is_discarded = true;
        let cards = vec![discarded, card("Spanish", "gato")];
        assert_eq!(discarded_cards(&cards, None).len(), 1);
        assert_eq!(cards_in_scope(&cards, None, false).count(), 1);
        assert_eq!(cards_in_scope(&cards, None, true).count(), 2);
    }
}
