//! Source datasets and the dataset-priority configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a source checklist, already column-mapped by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    pub lsid: String,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    /// A pre-merged complete name, when the source supplies one.
    #[serde(default)]
    pub name_complete: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub accepted_lsid: Option<String>,
    #[serde(default)]
    pub kingdom: Option<String>,
    #[serde(default)]
    pub phylum: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub vernacular_names: Vec<String>,
}

/// A checklist with its identifier; rows are kept in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDataset {
    pub id: String,
    pub rows: Vec<SourceRow>,
}

/// Dataset priorities, loadable from a JSON map of dataset id to priority.
/// Unlisted datasets get priority 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityConfig(HashMap<String, i32>);

impl PriorityConfig {
    pub fn new(priorities: HashMap<String, i32>) -> PriorityConfig {
        PriorityConfig(priorities)
    }

    pub fn from_json(json: &str) -> Result<PriorityConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn priority_for(&self, dataset_id: &str) -> i32 {
        self.0.get(dataset_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_load_from_json() {
        let config = PriorityConfig::from_json(r#"{"dr5214": 20, "dr2699": 10}"#).unwrap();
        assert_eq!(config.priority_for("dr5214"), 20);
        assert_eq!(config.priority_for("unknown"), 0);
    }
}
