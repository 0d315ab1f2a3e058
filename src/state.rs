//! Desired-state input file handling.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Load the desired principal-id set from a state file.
///
/// The desired group ids are the keys of `aad_state.value.groups_by_id`;
/// the values are ignored. Read and parsed before any remote call is made.
pub fn load_desired_groups(path: &Path) -> Result<HashSet<String>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::StateFileRead {
        path: path.display().to_string(),
        source,
    })?;

    let groups = parse_desired_groups(&raw, path)?;
    debug!(
        "Loaded {} desired group ids from {}",
        groups.len(),
        path.display()
    );
    Ok(groups)
}

fn parse_desired_groups(raw: &str, path: &Path) -> Result<HashSet<String>, ConfigError> {
    let state: StateFile =
        serde_json::from_str(raw).map_err(|source| ConfigError::StateFileParse {
            path: path.display().to_string(),
            source,
        })?;

    Ok(state.aad_state.value.groups_by_id.into_keys().collect())
}

#[derive(Debug, Deserialize)]
struct StateFile {
    aad_state: AadState,
}

#[derive(Debug, Deserialize)]
struct AadState {
    value: AadStateValue,
}

#[derive(Debug, Deserialize)]
struct AadStateValue {
    groups_by_id: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(raw: &str) -> Result<HashSet<String>, ConfigError> {
        parse_desired_groups(raw, &PathBuf::from(".aad_state.json"))
    }

    #[test]
    fn test_group_ids_are_the_keys() {
        let raw = r#"{
            "aad_state": {
                "value": {
                    "groups_by_id": {
                        "g1": { "display_name": "platform" },
                        "g2": { "display_name": "data" }
                    }
                }
            }
        }"#;

        let groups = parse(raw).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.contains("g1"));
        assert!(groups.contains("g2"));
    }

    #[test]
    fn test_empty_groups() {
        let raw = r#"{ "aad_state": { "value": { "groups_by_id": {} } } }"#;
        assert!(parse(raw).unwrap().is_empty());
    }

    #[test]
    fn test_group_values_are_ignored() {
        let raw = r#"{
            "aad_state": {
                "value": {
                    "groups_by_id": { "g1": null, "g2": 42, "g3": ["anything"] }
                }
            }
        }"#;

        let groups = parse(raw).unwrap();
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let err = parse("not json").unwrap_err();
        assert!(matches!(err, ConfigError::StateFileParse { .. }));
    }

    #[test]
    fn test_missing_structure_is_a_config_error() {
        let err = parse(r#"{ "groups_by_id": { "g1": {} } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::StateFileParse { .. }));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = load_desired_groups(Path::new("/nonexistent/.aad_state.json")).unwrap_err();
        assert!(matches!(err, ConfigError::StateFileRead { .. }));
    }
}
