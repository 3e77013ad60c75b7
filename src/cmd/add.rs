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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

/// Create a card with default scheduling state. This is the only place cards
/// are born; the scheduler itself never creates them.
pub fn add_card(
    directory: Option<String>,
    deck_name: &str,
    word: &str,
    definition: &str,
) -> Fallible<()> {
    let mut collection = Collection::open(directory)?;
    let decks = collection.db.decks()?;
    let deck = match decks.into_iter().find(|deck| deck.name == deck_name) {
        Some(deck) => deck,
        None => {
            let deck = Deck::new(deck_name);
            collection.db.put_deck(&deck)?;
            log::debug!("Created deck {:?}.", deck.name);
            deck
        }
    };
    let card = Card::new(deck.id, word, definition, Timestamp::now());
    if collection.db.get_card(card.id)?.is_some() {
        return fail(format!("card {:?} already exists in deck {:?}.", word, deck.name));
    }
    collection.db.put_card(&card)?;
    println!("Added {:?} to deck {:?}.", card.word, deck.name);
    Ok(())
}
