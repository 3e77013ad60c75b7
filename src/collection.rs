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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::PathBuf;

use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::settings::Settings;

/// A collection directory: the card database plus optional settings.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub settings: Settings,
}

impl Collection {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let db_path: PathBuf = directory.join("wordcards.db");
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;

        let settings = {
            let settings_path = directory.join("settings.toml");
            if settings_path.exists() {
                let content = read_to_string(settings_path)?;
                Settings::from_toml(&content)?
            } else {
                log::debug!("No settings.toml, using defaults.");
                Settings::default()
            }
        };

        Ok(Self {
            directory,
            db,
            settings,
        })
    }
}
