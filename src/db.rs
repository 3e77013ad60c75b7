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

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;
use rusqlite::params;

use crate::error::Fallible;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::session::StudySession;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }
}

impl CardStore for Database {
    fn get_card(&self, id: CardId) -> Fallible<Option<Card>> {
        let sql = format!("select {CARD_COLUMNS} from cards where card_id = ?;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(card_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn put_card(&mut self, card: &Card) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        upsert_card(&tx, card)?;
        tx.commit()?;
        Ok(())
    }

    fn put_cards(&mut self, cards: &[Card]) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        for card in cards {
            upsert_card(&tx, card)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_card(&mut self, id: CardId) -> Fallible<()> {
        self.conn
            .execute("delete from cards where card_id = ?;", [id])?;
        Ok(())
    }

    fn cards(&self) -> Fallible<Vec<Card>> {
        let sql = format!("select {CARD_COLUMNS} from cards order by card_id;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(card_from_row(row)?);
        }
        Ok(cards)
    }

    fn get_deck(&self, id: DeckId) -> Fallible<Option<Deck>> {
        let sql = "select deck_id, name, color, icon, is_default from decks where deck_id = ?;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => {
                let mut deck = deck_from_row(row)?;
                deck.card_count = self.deck_card_count(id)?;
                Ok(Some(deck))
            }
            None => Ok(None),
        }
    }

    fn put_deck(&mut self, deck: &Deck) -> Fallible<()> {
        let sql = "insert into decks (deck_id, name, color, icon, is_default) values (?, ?, ?, ?, ?) on conflict (deck_id) do update set name = excluded.name, color = excluded.color, icon = excluded.icon, is_default = excluded.is_default;";
        self.conn.execute(
            sql,
            (deck.id, &deck.name, &deck.color, &deck.icon, deck.is_default),
        )?;
        Ok(())
    }

    fn decks(&self) -> Fallible<Vec<Deck>> {
        let sql = "select deck_id, name, color, icon, is_default from decks order by name;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut decks = Vec::new();
        while let Some(row) = rows.next()? {
            decks.push(deck_from_row(row)?);
        }
        for deck in decks.iter_mut() {
            deck.card_count = self.deck_card_count(deck.id)?;
        }
        Ok(decks)
    }

    fn save_session(&mut self, session: &StudySession) -> Fallible<()> {
        let sql = "insert into sessions (deck_id, cards_studied, correct, incorrect, time_minutes, session_date) values (?, ?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                session.deck_id,
                session.cards_studied,
                session.correct,
                session.incorrect,
                session.time_minutes,
                session.date,
            ),
        )?;
        Ok(())
    }

    fn sessions(&self) -> Fallible<Vec<StudySession>> {
        let sql = "select deck_id, cards_studied, correct, incorrect, time_minutes, session_date from sessions order by session_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(StudySession {
                deck_id: row.get(0)?,
                cards_studied: row.get(1)?,
                correct: row.get(2)?,
                incorrect: row.get(3)?,
                time_minutes: row.get(4)?,
                date: row.get(5)?,
            });
        }
        Ok(sessions)
    }
}

impl Database {
    fn deck_card_count(&self, id: DeckId) -> Fallible<usize> {
        let sql = "select count(*) from cards where deck_id = ?;";
        let count: i64 = self.conn.query_row(sql, [id], |row| row.get(0))?;
        Ok(count as usize)
    }
}

const CARD_COLUMNS: &str = "card_id, deck_id, word, definition, level, ease_factor, interval, repetitions, next_review, last_review, consecutive_failures, total_failures, last_failure_date, is_favorite, is_discarded, needs_review, is_problematic, discarded_at";

fn card_from_row(row: &Row) -> Fallible<Card> {
    let mut card = Card {
        id: row.get(0)?,
        deck_id: row.get(1)?,
        word: row.get(2)?,
        definition: row.get(3)?,
        level: row.get(4)?,
        ease_factor: row.get(5)?,
        interval: row.get(6)?,
        repetitions: row.get(7)?,
        next_review: row.get(8)?,
        last_review: row.get(9)?,
        consecutive_failures: row.get(10)?,
        total_failures: row.get(11)?,
        last_failure_date: row.get(12)?,
        is_favorite: row.get(13)?,
        is_discarded: row.get(14)?,
        needs_review: row.get(15)?,
        is_problematic: row.get(16)?,
        discarded_at: row.get(17)?,
    };
    // Values written by older schema versions may break invariants; repair
    // them here rather than failing the read.
    card.normalize();
    Ok(card)
}

fn deck_from_row(row: &Row) -> Fallible<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        name: row.get(1)?,
        card_count: 0,
        color: row.get(2)?,
        icon: row.get(3)?,
        is_default: row.get(4)?,
    })
}

fn upsert_card(tx: &Transaction, card: &Card) -> Fallible<()> {
    let sql = format!(
        "insert into cards ({CARD_COLUMNS}) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) on conflict (card_id) do update set deck_id = excluded.deck_id, word = excluded.word, definition = excluded.definition, level = excluded.level, ease_factor = excluded.ease_factor, interval = excluded.interval, repetitions = excluded.repetitions, next_review = excluded.next_review, last_review = excluded.last_review, consecutive_failures = excluded.consecutive_failures, total_failures = excluded.total_failures, last_failure_date = excluded.last_failure_date, is_favorite = excluded.is_favorite, is_discarded = excluded.is_discarded, needs_review = excluded.needs_review, is_problematic = excluded.is_problematic, discarded_at = excluded.discarded_at;"
    );
    tx.execute(
        &sql,
        params![
            card.id,
            card.deck_id,
            card.word,
            card.definition,
            card.level,
            card.ease_factor,
            card.interval,
            card.repetitions,
            card.next_review,
            card.last_review,
            card.consecutive_failures,
            card.total_failures,
            card.last_failure_date,
            card.is_favorite,
            card.is_discarded,
            card.needs_review,
            card.is_problematic,
            card.discarded_at,
        ],
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::date::Date;
    use crate::types::level::Level;
    use crate::types::timestamp::Timestamp;

    fn now() -> Timestamp {
        Timestamp::from_ymd_hms(2025, 3, 1, 9, 0, 0)
    }

    fn open_db() -> Fallible<(tempfile::TempDir, Database)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("db.sqlite3");
        let db = Database::new(path.to_str().expect("valid path"))?;
        Ok((dir, db))
    }

    #[test]
    fn test_card_round_trip() -> Fallible<()> {
        let (_dir, mut db) = open_db()?;
        let deck = Deck::new("Spanish");
        db.put_deck(&deck)?;
        let mut card = Card::new(deck.id, "perro", "dog", now());
        card.level = Some(Level::Beginner);
        card.last_review = Some(now());
        card.total_failures = 2;
        db.put_card(&card)?;
        let loaded = db.get_card(card.id)?.expect("card exists");
        assert_eq!(loaded.word, "perro");
        assert_eq!(loaded.definition, "dog");
        assert_eq!(loaded.level, Some(Level::Beginner));
        assert_eq!(loaded.next_review, card.next_review);
        assert_eq!(loaded.last_review, Some(now()));
        assert_eq!(loaded.total_failures, 2);
        assert!(loaded.last_failure_date.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_card_is_none() -> Fallible<()> {
        let (_dir, db) = open_db()?;
        let id = CardId::of(DeckId::of("Spanish"), "perro", "dog");
        assert!(db.get_card(id)?.is_none());
        Ok(())
    }

    #[test]
    fn test_upsert_overwrites() -> Fallible<()> {
        let (_dir, mut db) = open_db()?;
        let deck = Deck::new("Spanish");
        db.put_deck(&deck)?;
        let mut card = Card::new(deck.id, "perro", "dog", now());
        db.put_card(&card)?;
        card.repetitions = 3;
        card.interval = 15;
        db.put_card(&card)?;
        let loaded = db.get_card(card.id)?.expect("card exists");
        assert_eq!(loaded.repetitions, 3);
        assert_eq!(loaded.interval, 15);
        assert_eq!(db.cards()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_out_of_range_ease_factor_is_reclamped_on_read() -> Fallible<()> {
        let (_dir, mut db) = open_db()?;
        let deck = Deck::new("Spanish");
        db.put_deck(&deck)?;
        let card = Card::new(deck.id, "perro", "dog", now());
        db.put_card(&card)?;
        db.conn.execute(
            "update cards set ease_factor = 0.9 where card_id = ?;",
            [card.id],
        )?;
        let loaded = db.get_card(card.id)?.expect("card exists");
        assert_eq!(loaded.ease_factor, 1.3);
        Ok(())
    }

    #[test]
    fn test_deck_card_count() -> Fallible<()> {
        let (_dir, mut db) = open_db()?;
        let deck = Deck::new("Spanish");
        db.put_deck(&deck)?;
        db.put_card(&Card::new(deck.id, "perro", "dog", now()))?;
        db.put_card(&Card::new(deck.id, "gato", "cat", now()))?;
        let loaded = db.get_deck(deck.id)?.expect("deck exists");
        assert_eq!(loaded.card_count, 2);
        Ok(())
    }

    #[test]
    fn test_session_round_trip() -> Fallible<()> {
        let (_dir, mut db) = open_db()?;
        let session = StudySession {
            deck_id: DeckId::of("Spanish"),
            cards_studied: 10,
            correct: 8,
            incorrect: 2,
            time_minutes: 5,
            date: Date::from_ymd(2025, 3, 1).expect("valid date"),
        };
        db.save_session(&session)?;
        let sessions = db.sessions()?;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].correct, 8);
        assert_eq!(sessions[0].date, session.date);
        Ok(())
    }

    #[test]
    fn test_schema_survives_reopen() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("db.sqlite3");
        let path = path.to_str().expect("valid path");
        {
            let mut db = Database::new(path)?;
            let deck = Deck::new("Spanish");
            db.put_deck(&deck)?;
            db.put_card(&Card::new(deck.id, "perro", "dog", now()))?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.cards()?.len(), 1);
        Ok(())
    }
}
