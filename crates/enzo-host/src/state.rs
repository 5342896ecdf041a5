//! State persistence for the shared parameter store.
//!
//! State format: JSON object mapping stable ParamId to value in host units.
//!
//! ```json
//! {"100": 1.0, "101": 0.0, "102": 1.0, "103": 0.0, "104": 0.0, "105": 3.0, "106": 1.0, "107": 50.0}
//! ```
//!
//! Using stable IDs (not indices) ensures state survives parameter reordering
//! across versions. Parameters missing from a document keep their current
//! value.

use crate::error::StateError;
use crate::shared::SharedParams;

/// How to treat entries that do not match a known parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Skip unknown or malformed entries with a warning.
    #[default]
    Lenient,
    /// Reject the whole document on the first unknown or malformed entry.
    Strict,
}

/// Serialize every parameter in `params`.
pub fn save(params: &SharedParams) -> Result<Vec<u8>, StateError> {
    let mut state = serde_json::Map::new();

    for (i, desc) in params.descriptors().iter().enumerate() {
        if let Some(val) = params.get_value(i) {
            state.insert(desc.id.0.to_string(), serde_json::Value::from(f64::from(val)));
        }
    }

    let json = serde_json::to_vec(&serde_json::Value::Object(state))?;
    tracing::debug!(bytes = json.len(), "state saved");
    Ok(json)
}

/// Restore parameters from a JSON state document.
///
/// The document is validated completely before any value is written, so a
/// failed load leaves `params` untouched. Returns the number of parameters
/// restored.
pub fn load(params: &SharedParams, bytes: &[u8], mode: LoadMode) -> Result<usize, StateError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    let Some(obj) = value.as_object() else {
        return Err(StateError::NotAnObject);
    };

    let mut updates = Vec::with_capacity(obj.len());
    for (key, val) in obj {
        let Some(index) = key.parse::<u32>().ok().and_then(|id| params.index_by_id(id)) else {
            if mode == LoadMode::Strict {
                return Err(StateError::unknown_id(key.as_str()));
            }
            tracing::warn!(key = %key, "skipping unknown parameter in state");
            continue;
        };
        let Some(v) = val.as_f64() else {
            if mode == LoadMode::Strict {
                return Err(StateError::non_numeric(key.as_str()));
            }
            tracing::warn!(key = %key, "skipping non-numeric parameter in state");
            continue;
        };
        updates.push((index, v as f32));
    }

    for &(index, v) in &updates {
        params.set_value(index, v);
    }

    tracing::debug!(restored = updates.len(), ?mode, "state loaded");
    Ok(updates.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enzo_core::snapshot::{GAIN, PAN, SAT_DRIVE, SAT_MODE};

    #[test]
    fn roundtrip_json() {
        let params = SharedParams::new();
        params.set_value(GAIN, 0.6);
        params.set_value(SAT_MODE, 2.0);
        params.set_value(SAT_DRIVE, 42.5);

        let json = save(&params).unwrap();

        let restored = SharedParams::new();
        assert_eq!(load(&restored, &json, LoadMode::Strict).unwrap(), 8);
        for i in 0..params.param_count() {
            assert_eq!(
                params.get_value(i).unwrap(),
                restored.get_value(i).unwrap(),
                "param {i} value mismatch after roundtrip"
            );
        }
    }

    #[test]
    fn saved_keys_are_stable_ids() {
        let json = save(&SharedParams::new()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        for id in 100..=107 {
            assert!(obj.contains_key(&id.to_string()), "missing id {id}");
        }
        assert_eq!(obj["100"].as_f64(), Some(1.0));
    }

    #[test]
    fn lenient_skips_unknown_and_non_numeric() {
        let params = SharedParams::new();
        let json = br#"{"104": -40.0, "999": 1.0, "gain": 0.5, "107": "loud"}"#;
        assert_eq!(load(&params, json, LoadMode::Lenient).unwrap(), 1);
        assert_eq!(params.get_value(PAN), Some(-40.0));
        assert_eq!(params.get_value(GAIN), Some(1.0));
        assert_eq!(params.get_value(SAT_DRIVE), Some(0.0));
    }

    #[test]
    fn strict_rejects_without_partial_writes() {
        let params = SharedParams::new();

        let err = load(&params, br#"{"104": -40.0, "999": 1.0}"#, LoadMode::Strict).unwrap_err();
        assert!(matches!(err, StateError::UnknownId { ref key } if key == "999"));
        assert_eq!(params.get_value(PAN), Some(0.0));

        let err = load(&params, br#"{"107": true}"#, LoadMode::Strict).unwrap_err();
        assert!(matches!(err, StateError::NonNumeric { ref key } if key == "107"));
    }

    #[test]
    fn malformed_documents() {
        let params = SharedParams::new();
        assert!(matches!(
            load(&params, b"not json", LoadMode::Lenient),
            Err(StateError::Json(_))
        ));
        assert!(matches!(
            load(&params, b"[1, 2, 3]", LoadMode::Lenient),
            Err(StateError::NotAnObject)
        ));
    }

    #[test]
    fn loaded_values_are_clamped() {
        let params = SharedParams::new();
        load(&params, br#"{"100": 9.0, "105": 12.0}"#, LoadMode::Lenient).unwrap();
        assert_eq!(params.get_value(GAIN), Some(1.5));
        assert_eq!(params.get_value(SAT_MODE), Some(4.0));
    }
}
