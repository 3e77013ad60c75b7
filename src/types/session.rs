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

use serde::Serialize;

use crate::types::date::Date;
use crate::types::id::DeckId;

/// A write-once record of one study session.
#[derive(Clone, Debug)]
pub struct StudySession {
    pub deck_id: DeckId,
    pub cards_studied: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub time_minutes: u32,
    pub date: Date,
}

/// Running aggregate over study sessions. Streaks advance by day-boundary
/// comparison with the previous study date.
#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub total_sessions: u32,
    pub total_cards_studied: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(skip)]
    pub last_study_date: Option<Date>,
}

impl StudyStats {
    pub fn new() -> Self {
        Self {
            total_sessions: 0,
            total_cards_studied: 0,
            total_correct: 0,
            total_incorrect: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
        }
    }

    /// Fold sessions in chronological order into an aggregate.
    pub fn from_sessions(sessions: &[StudySession]) -> Self {
        let mut sorted: Vec<&StudySession> = sessions.iter().collect();
        sorted.sort_by_key(|s| s.date);
        let mut stats = Self::new();
        for session in sorted {
            stats.record(session);
        }
        stats
    }

    /// Record a session. Studying twice on one day leaves the streak
    /// unchanged; studying on the next day extends it; a gap resets it to 1.
    pub fn record(&mut self, session: &StudySession) {
        self.total_sessions += 1;
        self.total_cards_studied += session.cards_studied;
        self.total_correct += session.correct;
        self.total_incorrect += session.incorrect;
        match self.last_study_date {
            None => {
                self.current_streak = 1;
            }
            Some(last) => match session.date.days_since(last) {
                // Same day, or an out-of-order record: streak unchanged.
                d if d <= 0 => {}
                1 => {
                    self.current_streak += 1;
                }
                _ => {
                    self.current_streak = 1;
                }
            },
        }
        if self.current_streak > self.longest_streak {
            self.longest_streak = self.current_streak;
        }
        if self.last_study_date.is_none_or(|last| session.date > last) {
            self.last_study_date = Some(session.date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(date: Date) -> StudySession {
        StudySession {
            deck_id: DeckId::of("Spanish"),
            cards_studied: 10,
            correct: 8,
            incorrect: 2,
            time_minutes: 5,
            date,
        }
    }

    #[test]
    fn test_first_session_starts_streak() {
        let mut stats = StudyStats::new();
        stats.record(&session(Date::from_ymd(2025, 3, 1).unwrap()));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.total_cards_studied, 10);
    }

    #[test]
    fn test_same_day_does_not_extend_streak() {
        let mut stats = StudyStats::new();
        let date = Date::from_ymd(2025, 3, 1).unwrap();
        stats.record(&session(date));
        stats.record(&session(date));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.total_sessions, 2);
    }

    #[test]
    fn test_next_day_extends_streak() {
        let mut stats = StudyStats::new();
        stats.record(&session(Date::from_ymd(2025, 3, 1).unwrap()));
        stats.record(&session(Date::from_ymd(2025, 3, 2).unwrap()));
        stats.record(&session(Date::from_ymd(2025, 3, 3).unwrap()));
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_longest() {
        let mut stats = StudyStats::new();
        stats.record(&session(Date::from_ymd(2025, 3, 1).unwrap()));
        stats.record(&session(Date::from_ymd(2025, 3, 2).unwrap()));
        stats.record(&session(Date::from_ymd(2025, 3, 10).unwrap()));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_from_sessions_sorts_by_date() {
        let sessions = vec![
            session(Date::from_ymd(2025, 3, 2).unwrap()),
            session(Date::from_ymd(2025, 3, 1).unwrap()),
        ];
        let stats = StudyStats::from_sessions(&sessions);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.last_study_date, Date::from_ymd(2025, 3, 2));
    }
}
