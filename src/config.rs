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

use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Fallible;
use crate::store::document_path;

/// Name of the optional per-deployment configuration file.
pub const CONFIG_FILE: &str = "salonsync.toml";

/// Deployment configuration. Everything has a default; a missing file
/// means a default deployment.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Deployment identifier the document path is derived from.
    pub app_id: String,
    /// Override for the write-coalescing quiet period.
    pub quiet_period_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_id: "default-app-id".to_string(),
            quiet_period_ms: 1500,
        }
    }
}

impl EngineConfig {
    /// Load the configuration from `dir`, falling back to defaults when
    /// the file does not exist.
    pub fn load(dir: &Path) -> Fallible<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn document_path(&self) -> String {
        document_path(&self.app_id)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.app_id, "default-app-id");
        assert_eq!(config.quiet_period(), Duration::from_millis(1500));
        assert_eq!(
            config.document_path(),
            "artifacts/default-app-id/public/data/store_data/main_config"
        );
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = EngineConfig::load(dir.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempdir().unwrap();
        let content = "app_id = \"salon-taipei\"\nquiet_period_ms = 500\n";
        std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
        let config = EngineConfig::load(dir.path()).unwrap();
        assert_eq!(config.app_id, "salon-taipei");
        assert_eq!(config.quiet_period(), Duration::from_millis(500));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "app_idd = \"x\"\n").unwrap();
        assert!(EngineConfig::load(dir.path()).is_err());
    }
}
