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
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::classify::tag_stats;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::queue::due_cards;
use crate::queue::new_cards;
use crate::queue::todays_session;
use crate::store::CardStore;
use crate::types::session::StudyStats;
use crate::types::tag::WordTag;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    deck_count: usize,
    card_count: usize,
    new_count: usize,
    /// Total cards whose review has come around, uncapped.
    due_count: usize,
    /// Size of today's capped session.
    today_count: usize,
    tag_counts: BTreeMap<&'static str, usize>,
    study: StudyStats,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let collection = Collection::open(directory)?;
    let now = Timestamp::now();
    let cards = collection.db.cards()?;
    let decks = collection.db.decks()?;
    let sessions = collection.db.sessions()?;

    let queue = todays_session(&cards, &collection.settings, now, None);
    let stats = Stats {
        deck_count: decks.len(),
        card_count: cards.len(),
        new_count: new_cards(&cards, None).len(),
        due_count: due_cards(&cards, now, None).len(),
        today_count: queue.today_count(),
        tag_counts: tag_stats(&cards),
        study: StudyStats::from_sessions(&sessions),
    };

    match format {
        StatsFormat::Text => {
            println!("Decks: {}", stats.deck_count);
            for deck in &decks {
                println!("  {}: {} cards", deck.name, deck.card_count);
            }
            println!(
                "Cards: {} ({} new, {} due, {} in today's queue)",
                stats.card_count, stats.new_count, stats.due_count, stats.today_count
            );
            println!("Tags:");
            for tag in WordTag::all() {
                println!("  {}: {}", tag.label(), stats.tag_counts[tag.id()]);
            }
            println!(
                "Streak: {} days (longest {}).",
                stats.study.current_streak, stats.study.longest_streak
            );
            println!("Sessions: {}", stats.study.total_sessions);
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}
