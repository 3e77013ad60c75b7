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

use clap::Parser;

use crate::cmd::add::add_card;
use crate::cmd::drill::drill;
use crate::cmd::restore::restore;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study today's queue of cards.
    Drill {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// Restrict the session to one deck.
        #[arg(long)]
        deck: Option<String>,
    },
    /// Add a card to a deck, creating the deck if needed.
    Add {
        /// The deck to add the card to.
        deck: String,
        /// The word to learn.
        word: String,
        /// The word's definition.
        definition: String,
        /// Optional path to the collection directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Restore discarded cards.
    Restore {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// Restrict the restore to one deck.
        #[arg(long)]
        deck: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill { directory, deck } => drill(directory, deck),
        Command::Add {
            deck,
            word,
            definition,
            directory,
        } => add_card(directory, &deck, &word, &definition),
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Restore { directory, deck } => restore(directory, deck),
    }
}
