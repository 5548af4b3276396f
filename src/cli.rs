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

use std::path::PathBuf;

use clap::Parser;

use crate::config::EngineConfig;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::RemoteStore;
use crate::store::file::FileStore;
use crate::types::document::RemoteDocument;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Write the built-in seed document into a file-backed store.
    Seed {
        /// Optional path to the deployment directory.
        directory: Option<String>,
    },
    /// Print the roster held in a file-backed store.
    Show {
        /// Optional path to the deployment directory.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Seed { directory } => {
            let store = open_store(directory)?;
            if store.exists() {
                return fail("store document already exists.");
            }
            store.write(&RemoteDocument::seed())?;
            println!("Seeded {}.", store.path().display());
            Ok(())
        }
        Command::Show { directory } => {
            let store = open_store(directory)?;
            let Some(doc) = store.read()? else {
                return fail("store document does not exist yet.");
            };
            print_document(&doc);
            Ok(())
        }
    }
}

fn open_store(directory: Option<String>) -> Fallible<FileStore> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let config = EngineConfig::load(&directory)?;
    Ok(FileStore::in_dir(&directory, &config.app_id))
}

fn print_document(doc: &RemoteDocument) {
    for designer in &doc.designers {
        println!("{} ({})", designer.name, designer.location);
        for schedule in &designer.schedules {
            let label = if schedule.date.is_empty() {
                "(no date)".to_string()
            } else {
                format!("{} (週{})", schedule.date, schedule.day)
            };
            let times: Vec<String> = schedule
                .times
                .iter()
                .map(|t| {
                    if t.is_full {
                        format!("{} (已滿)", t.val)
                    } else {
                        t.val.clone()
                    }
                })
                .collect();
            println!("  {label}: {}", times.join(", "));
        }
    }
    if !doc.line_official_id.is_empty() {
        println!("LINE: {}", doc.line_official_id);
    }
}
