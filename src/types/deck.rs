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

use crate::types::id::DeckId;

/// A named collection of cards.
#[derive(Clone, Debug)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    /// Denormalized count, maintained by the store on read. The scheduling
    /// engine never touches it.
    pub card_count: usize,
    pub color: String,
    pub icon: String,
    pub is_default: bool,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id: DeckId::of(&name),
            name,
            card_count: 0,
            color: "#95a5a6".to_string(),
            icon: "book".to_string(),
            is_default: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_follows_name() {
        let deck = Deck::new("Spanish");
        assert_eq!(deck.id, DeckId::of("Spanish"));
    }
}
