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

use std::collections::HashMap;

use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::session::StudySession;

/// The storage collaborator. The engine reads cards from it and writes
/// updated cards back; it never creates or deletes through the scheduling
/// path. Lookup misses are `Ok(None)`, not errors.
pub trait CardStore {
    fn get_card(&self, id: CardId) -> Fallible<Option<Card>>;
    fn put_card(&mut self, card: &Card) -> Fallible<()>;
    /// Write a batch of cards with no partial-write states visible
    /// afterwards: either every card is written or none are.
    fn put_cards(&mut self, cards: &[Card]) -> Fallible<()>;
    fn delete_card(&mut self, id: CardId) -> Fallible<()>;
    fn cards(&self) -> Fallible<Vec<Card>>;
    fn get_deck(&self, id: DeckId) -> Fallible<Option<Deck>>;
    fn put_deck(&mut self, deck: &Deck) -> Fallible<()>;
    fn decks(&self) -> Fallible<Vec<Deck>>;
    fn save_session(&mut self, session: &StudySession) -> Fallible<()>;
    fn sessions(&self) -> Fallible<Vec<StudySession>>;
}

/// An in-memory store, used in tests and wherever persistence is somebody
/// else's problem.
pub struct MemoryStore {
    cards: HashMap<CardId, Card>,
    decks: HashMap<DeckId, Deck>,
    sessions: Vec<StudySession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            cards: HashMap::new(),
            decks: HashMap::new(),
            sessions: Vec::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore for MemoryStore {
    fn get_card(&self, id: CardId) -> Fallible<Option<Card>> {
        Ok(self.cards.get(&id).cloned())
    }

    fn put_card(&mut self, card: &Card) -> Fallible<()> {
        self.cards.insert(card.id, card.clone());
        Ok(())
    }

    fn put_cards(&mut self, cards: &[Card]) -> Fallible<()> {
        for card in cards {
            self.cards.insert(card.id, card.clone());
        }
        Ok(())
    }

    fn delete_card(&mut self, id: CardId) -> Fallible<()> {
        self.cards.remove(&id);
        Ok(())
    }

    fn cards(&self) -> Fallible<Vec<Card>> {
        let mut cards: Vec<Card> = self.cards.values().cloned().collect();
        cards.sort_by_key(|card| card.id);
        Ok(cards)
    }

    fn get_deck(&self, id: DeckId) -> Fallible<Option<Deck>> {
        let deck = self.decks.get(&id).cloned().map(|mut deck| {
            deck.card_count = self
                .cards
                .values()
                .filter(|card| card.deck_id == id)
                .count();
            deck
        });
        Ok(deck)
    }

    fn put_deck(&mut self, deck: &Deck) -> Fallible<()> {
        self.decks.insert(deck.id, deck.clone());
        Ok(())
    }

    fn decks(&self) -> Fallible<Vec<Deck>> {
        let mut decks: Vec<Deck> = self.decks.values().cloned().collect();
        for deck in decks.iter_mut() {
            deck.card_count = self
                .cards
                .values()
                .filter(|card| card.deck_id == deck.id)
                .count();
        }
        decks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(decks)
    }

    fn save_session(&mut self, session: &StudySession) -> Fallible<()> {
        self.sessions.push(session.clone());
        Ok(())
    }

    fn sessions(&self) -> Fallible<Vec<StudySession>> {
        Ok(self.sessions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::Timestamp;

    fn now() -> Timestamp {
        Timestamp::from_ymd_hms(2025, 3, 1, 9, 0, 0)
    }

    #[test]
    fn test_card_round_trip() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let card = Card::new(DeckId::of("Spanish"), "perro", "dog", now());
        store.put_card(&card)?;
        let loaded = store.get_card(card.id)?.expect("card exists");
        assert_eq!(loaded.word, "perro");
        Ok(())
    }

    #[test]
    fn test_missing_card_is_none() -> Fallible<()> {
        let store = MemoryStore::new();
        let id = CardId::of(DeckId::of("Spanish"), "perro", "dog");
        assert!(store.get_card(id)?.is_none());
        Ok(())
    }

    #[test]
    fn test_deck_card_count_is_derived() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let deck = Deck::new("Spanish");
        store.put_deck(&deck)?;
        store.put_card(&Card::new(deck.id, "perro", "dog", now()))?;
        store.put_card(&Card::new(deck.id, "gato", "cat", now()))?;
        let loaded = store.get_deck(deck.id)?.expect("deck exists");
        assert_eq!(loaded.card_count, 2);
        Ok(())
    }

    #[test]
    fn test_cards_are_sorted_by_id() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let deck_id = DeckId::of("Spanish");
        store.put_card(&Card::new(deck_id, "perro", "dog", now()))?;
        store.put_card(&Card::new(deck_id, "gato", "cat", now()))?;
        store.put_card(&Card::new(deck_id, "vaca", "cow", now()))?;
        let cards = store.cards()?;
        let mut ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();
        ids.sort();
        assert_eq!(ids, cards.iter().map(|c| c.id).collect::<Vec<CardId>>());
        Ok(())
    }
}
