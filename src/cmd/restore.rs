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
use crate::lifecycle::restore_all_discarded;
use crate::store::CardStore;

pub fn restore(directory: Option<String>, deck: Option<String>) -> Fallible<()> {
    let mut collection = Collection::open(directory)?;
    let deck_id = match deck {
        Some(name) => {
            let decks = collection.db.decks()?;
            match decks.iter().find(|deck| deck.name == name) {
                Some(deck) => Some(deck.id),
                None => return fail(format!("no deck named {name:?}.")),
            }
        }
        None => None,
    };
    let restored = restore_all_discarded(&mut collection.db, deck_id)?;
    println!("Restored {} cards.", restored.len());
    Ok(())
}
