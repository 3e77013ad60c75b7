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

use std::fmt::Display;
use std::fmt::Formatter;

/// Difficulty classification of a word, from failure counters and ease
/// factor. A closed enumeration so the classifier is exhaustiveness-checked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WordTag {
    Problematic,
    Struggling,
    NeedsPractice,
    Improving,
    Mastered,
}

impl WordTag {
    pub fn all() -> [WordTag; 5] {
        [
            WordTag::Problematic,
            WordTag::Struggling,
            WordTag::NeedsPractice,
            WordTag::Improving,
            WordTag::Mastered,
        ]
    }

    pub fn id(self) -> &'static str {
        match self {
            WordTag::Problematic => "problematic",
            WordTag::Struggling => "struggling",
            WordTag::NeedsPractice => "needs_practice",
            WordTag::Improving => "improving",
            WordTag::Mastered => "mastered",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WordTag::Problematic => "Problematic",
            WordTag::Struggling => "Struggling",
            WordTag::NeedsPractice => "Needs Practice",
            WordTag::Improving => "Improving",
            WordTag::Mastered => "Mastered",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            WordTag::Problematic => "#e74c3c",
            WordTag::Struggling => "#e67e22",
            WordTag::NeedsPractice => "#f1c40f",
            WordTag::Improving => "#3498db",
            WordTag::Mastered => "#2ecc71",
        }
    }

    /// Lower priority number means more urgent; the classifier evaluates
    /// rules in this order and the first match wins.
    pub fn priority(self) -> u8 {
        match self {
            WordTag::Problematic => 1,
            WordTag::Struggling => 2,
            WordTag::NeedsPractice => 3,
            WordTag::Improving => 4,
            WordTag::Mastered => 5,
        }
    }
}

impl Display for WordTag {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_are_distinct_and_ordered() {
        let tags = WordTag::all();
        for pair in tags.windows(2) {
            assert!(pair[0].priority() < pair[1].priority());
        }
    }

    #[test]
    fn test_ids_are_distinct() {
        let tags = WordTag::all();
        for (i, a) in tags.iter().enumerate() {
            for b in tags.iter().skip(i + 1) {
                assert_ne!(a.id(), b.id());
            }
        }
    }
}
