//! Census tract label bundle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State FIPS assumed when the source carries neither STATEFP spelling
/// (the source data is Washington State TIGER extracts).
const DEFAULT_STATE_FIPS: &str = "53";

/// Identifying fields for one census tract, as carried in the region
/// source's properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TractLabel {
    /// Full tract GEOID (state + county + tract)
    pub geoid: String,
    /// Human-readable tract name
    pub name: String,
    /// County FIPS code
    pub county_fips: String,
    /// Tract code within the county
    pub tract_code: String,
    /// State FIPS code
    pub state_fips: String,
}

impl TractLabel {
    /// Resolve label fields from a GeoJSON properties object.
    ///
    /// Each field tries the current-schema name first, then the
    /// year-suffixed legacy name, then falls back to an empty string
    /// (the state FIPS falls back to a fixed default instead).
    pub fn from_properties(props: &Map<String, Value>) -> Self {
        Self {
            geoid: resolve(props, &["GEOID", "GEOID20"], ""),
            name: resolve(props, &["NAME", "NAMELSAD", "NAMELSAD20"], ""),
            county_fips: resolve(props, &["COUNTYFP", "COUNTYFP20"], ""),
            tract_code: resolve(props, &["TRACTCE", "TRACTCE20"], ""),
            state_fips: resolve(props, &["STATEFP", "STATEFP20"], DEFAULT_STATE_FIPS),
        }
    }
}

fn resolve(props: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    keys.iter()
        .find_map(|k| props.get(*k).and_then(Value::as_str))
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_current_schema() {
        let label = TractLabel::from_properties(&props(json!({
            "GEOID": "53033000100",
            "NAME": "1",
            "COUNTYFP": "033",
            "TRACTCE": "000100",
            "STATEFP": "53"
        })));
        assert_eq!(label.geoid, "53033000100");
        assert_eq!(label.name, "1");
        assert_eq!(label.county_fips, "033");
        assert_eq!(label.tract_code, "000100");
        assert_eq!(label.state_fips, "53");
    }

    #[test]
    fn test_legacy_schema_resolves_identically() {
        let current = TractLabel::from_properties(&props(json!({
            "GEOID": "53033000100",
            "NAME": "Census Tract 1",
            "COUNTYFP": "033",
            "TRACTCE": "000100"
        })));
        let legacy = TractLabel::from_properties(&props(json!({
            "GEOID20": "53033000100",
            "NAMELSAD20": "Census Tract 1",
            "COUNTYFP20": "033",
            "TRACTCE20": "000100"
        })));
        assert_eq!(current, legacy);
    }

    #[test]
    fn test_primary_wins_over_legacy() {
        let label = TractLabel::from_properties(&props(json!({
            "NAME": "current",
            "NAMELSAD": "legacy",
            "NAMELSAD20": "older"
        })));
        assert_eq!(label.name, "current");
    }

    #[test]
    fn test_missing_fields_default() {
        let label = TractLabel::from_properties(&Map::new());
        assert_eq!(label.geoid, "");
        assert_eq!(label.name, "");
        assert_eq!(label.county_fips, "");
        assert_eq!(label.tract_code, "");
        assert_eq!(label.state_fips, "53");
    }
}
