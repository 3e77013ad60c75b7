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

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

const MAX_NEW_CARDS_PER_DAY: u32 = 200;
const MAX_REVIEWS_PER_DAY: u32 = 500;

/// User-configurable caps bounding the daily queue size.
#[derive(Clone, Copy, Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub new_cards_per_day: u32,
    pub reviews_per_day: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            new_cards_per_day: 20,
            reviews_per_day: 100,
        }
    }
}

impl Settings {
    /// Parse settings from TOML and validate the ranges. Out-of-range values
    /// are rejected, not clamped.
    pub fn from_toml(content: &str) -> Fallible<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Fallible<()> {
        if self.new_cards_per_day < 1 || self.new_cards_per_day > MAX_NEW_CARDS_PER_DAY {
            return fail(format!(
                "new_cards_per_day must be between 1 and {}, got {}",
                MAX_NEW_CARDS_PER_DAY, self.new_cards_per_day
            ));
        }
        if self.reviews_per_day < 1 || self.reviews_per_day > MAX_REVIEWS_PER_DAY {
            return fail(format!(
                "reviews_per_day must be between 1 and {}, got {}",
                MAX_REVIEWS_PER_DAY, self.reviews_per_day
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() -> Fallible<()> {
        Settings::default().validate()
    }

    #[test]
    fn test_parse() -> Fallible<()> {
        let settings = Settings::from_toml("new_cards_per_day = 5\nreviews_per_day = 50\n")?;
        assert_eq!(settings.new_cards_per_day, 5);
        assert_eq!(settings.reviews_per_day, 50);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Fallible<()> {
        let settings = Settings::from_toml("reviews_per_day = 50\n")?;
        assert_eq!(settings.new_cards_per_day, 20);
        assert_eq!(settings.reviews_per_day, 50);
        Ok(())
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Settings::from_toml("new_cards_per_day = 0\n").is_err());
        assert!(Settings::from_toml("new_cards_per_day = 201\n").is_err());
        assert!(Settings::from_toml("reviews_per_day = 501\n").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Settings::from_toml("cards_per_day = 10\n").is_err());
    }
}
