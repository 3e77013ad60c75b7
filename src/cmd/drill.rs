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
use std::io::Read;
use std::time::Instant;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::queue::todays_session;
use crate::review::review_card;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::id::DeckId;
use crate::types::quality::Quality;
use crate::types::session::StudySession;
use crate::types::timestamp::Timestamp;

pub fn drill(directory: Option<String>, deck: Option<String>) -> Fallible<()> {
    let mut collection = Collection::open(directory)?;
    let deck_id = match deck {
        Some(name) => Some(resolve_deck(&collection, &name)?),
        None => None,
    };

    let now = Timestamp::now();
    let cards = collection.db.cards()?;
    let queue = todays_session(&cards, &collection.settings, now, deck_id);
    if queue.is_empty() {
        println!("No cards due today.");
        return Ok(());
    }
    println!(
        "Studying {} of {} pending cards.",
        queue.today_count(),
        queue.pending_count()
    );

    let started = Instant::now();
    let session_cards: Vec<Card> = queue.cards().into_iter().cloned().collect();
    let mut tallies: HashMap<DeckId, (u32, u32)> = HashMap::new();
    for card in &session_cards {
        println!();
        println!("Q: {}", card.word);
        println!("[press space to reveal]");
        wait_for_space();
        println!("A: {}", card.definition);
        let quality = read_quality();
        let updated = review_card(card, quality, Timestamp::now());
        collection.db.put_card(&updated)?;
        let tally = tallies.entry(card.deck_id).or_insert((0, 0));
        if quality.is_lapse() {
            tally.1 += 1;
        } else {
            tally.0 += 1;
        }
    }

    let time_minutes = started.elapsed().as_secs().div_ceil(60) as u32;
    let date = Timestamp::now().local_date();
    let mut correct = 0;
    let mut incorrect = 0;
    for (deck_id, (right, wrong)) in tallies {
        collection.db.save_session(&StudySession {
            deck_id,
            cards_studied: right + wrong,
            correct: right,
            incorrect: wrong,
            time_minutes,
            date,
        })?;
        correct += right;
        incorrect += wrong;
    }
    println!();
    println!(
        "Session completed: {} correct, {} incorrect.",
        correct, incorrect
    );
    Ok(())
}

fn resolve_deck(collection: &Collection, name: &str) -> Fallible<DeckId> {
    let decks = collection.db.decks()?;
    match decks.iter().find(|deck| deck.name == name) {
        Some(deck) => Ok(deck.id),
        None => fail(format!("no deck named {name:?}.")),
    }
}

fn wait_for_space() {
    loop {
        let ch = std::io::stdin().bytes().next();
        if let Some(Ok(b' ')) = ch {
            break;
        }
    }
}

fn read_quality() -> Quality {
    loop {
        println!("Grade: (0-2 = forgot, 3 = hard, 4 = good, 5 = easy)");
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            continue;
        }
        if let Ok(value) = input.trim().parse::<u8>() {
            if let Ok(quality) = Quality::new(value) {
                return quality;
            }
        }
        println!("Invalid input. Please enter a number between 0 and 5.");
    }
}
