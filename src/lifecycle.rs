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

use crate::error::Fallible;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::timestamp::Timestamp;

/// Discard a card or bring it back. `discarded_at` is set and cleared in the
/// same write as the flag. A discarded card stays in the store; only the
/// queries stop seeing it.
pub fn toggle_discarded<S: CardStore>(
    store: &mut S,
    id: CardId,
    now: Timestamp,
) -> Fallible<Option<Card>> {
    let Some(mut card) = store.get_card(id)? else {
        return Ok(None);
    };
    card.is_discarded = !card.is_discarded;
    card.discarded_at = if card.is_discarded { Some(now) } else { None };
    store.put_card(&card)?;
    Ok(Some(card))
}

pub fn toggle_favorite<S: CardStore>(store: &mut S, id: CardId) -> Fallible<Option<Card>> {
    let Some(mut card) = store.get_card(id)? else {
        return Ok(None);
    };
    card.is_favorite = !card.is_favorite;
    store.put_card(&card)?;
    Ok(Some(card))
}

pub fn toggle_needs_review<S: CardStore>(store: &mut S, id: CardId) -> Fallible<Option<Card>> {
    let Some(mut card) = store.get_card(id)? else {
        return Ok(None);
    };
    card.needs_review = !card.needs_review;
    store.put_card(&card)?;
    Ok(Some(card))
}

/// Set or clear the manual problematic pin. Independent of the automatic
/// classifier rule: clearing the pin does not touch the failure counters, so
/// a card with a live failure streak stays classified problematic.
pub fn mark_problematic<S: CardStore>(
    store: &mut S,
    id: CardId,
    value: bool,
) -> Fallible<Option<Card>> {
    let Some(mut card) = store.get_card(id)? else {
        return Ok(None);
    };
    card.is_problematic = value;
    store.put_card(&card)?;
    Ok(Some(card))
}

/// Restore every discarded card, optionally within one deck. The target set
/// is computed up front and written as one batch, so the UI never observes a
/// partial restore. Returns the ids of the restored cards; an empty set is a
/// successful no-op.
pub fn restore_all_discarded<S: CardStore>(
    store: &mut S,
    deck_id: Option<DeckId>,
) -> Fallible<Vec<CardId>> {
    let mut restored: Vec<Card> = store
        .cards()?
        .into_iter()
        .filter(|card| {
            card.is_discarded && deck_id.is_none_or(|deck_id| card.deck_id == deck_id)
        })
        .collect();
    for card in restored.iter_mut() {
        card.is_discarded = false;
        card.discarded_at = None;
    }
    if !restored.is_empty() {
        store.put_cards(&restored)?;
    }
    log::debug!("Restored {} discarded cards.", restored.len());
    Ok(restored.into_iter().map(|card| card.id).collect())
}
