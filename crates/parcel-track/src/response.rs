use serde::Deserialize;

use crate::gateway::Outcome;
use crate::package::TrackingRecord;

/// Body value the backend uses to signal a failed modal action.
pub const SENTINEL_FAILURE: &str = "0";

/// Ways a response can fail to be a success.
///
/// All three are handled the same way at the UI boundary: an inline
/// message. The distinction exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("transport error (status {status})")]
    Transport { status: u16 },

    #[error("backend reported failure")]
    Sentinel,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Decode a rename/delete response. Success carries the body.
pub fn interpret_modal(outcome: &Outcome) -> Result<&str, ResponseError> {
    if !outcome.is_ok_status() {
        return Err(ResponseError::Transport {
            status: outcome.status,
        });
    }
    if outcome.body == SENTINEL_FAILURE {
        return Err(ResponseError::Sentinel);
    }
    Ok(&outcome.body)
}

/// Tracking history ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingData {
    /// The backend has no entries for this package yet.
    Empty,
    Records(Vec<TrackingRecord>),
}

#[derive(Debug, Deserialize)]
struct TrackingEnvelope {
    #[serde(default)]
    success: serde_json::Value,
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// Decode a tracking-data response.
///
/// The first element of `data` is a metadata marker and is dropped.
/// Records keep the order the backend sent them in.
pub fn interpret_tracking(outcome: &Outcome) -> Result<TrackingData, ResponseError> {
    if !outcome.is_ok_status() {
        return Err(ResponseError::Transport {
            status: outcome.status,
        });
    }

    let envelope: TrackingEnvelope = serde_json::from_str(&outcome.body)
        .map_err(|e| ResponseError::Malformed(e.to_string()))?;

    if envelope.success != serde_json::Value::Bool(true) {
        return Err(ResponseError::Sentinel);
    }

    let data = envelope
        .data
        .ok_or_else(|| ResponseError::Malformed("missing data sequence".into()))?;

    let records = data
        .into_iter()
        .skip(1)
        .map(serde_json::from_value::<TrackingRecord>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ResponseError::Malformed(e.to_string()))?;

    if records.is_empty() {
        Ok(TrackingData::Empty)
    } else {
        Ok(TrackingData::Records(records))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn modal_success_returns_body() {
        let outcome = Outcome::ok("New Name");
        assert_eq!(interpret_modal(&outcome), Ok("New Name"));
    }

    #[test]
    fn modal_sentinel_is_failure() {
        let outcome = Outcome::ok("0");
        assert_eq!(interpret_modal(&outcome), Err(ResponseError::Sentinel));
    }

    #[test]
    fn modal_non_200_is_transport_failure() {
        let outcome = Outcome::new(500, "boom");
        assert_eq!(
            interpret_modal(&outcome),
            Err(ResponseError::Transport { status: 500 })
        );
    }

    #[test]
    fn tracking_drops_metadata_element() {
        let body = json!({
            "success": true,
            "data": ["meta", {"date": "d1", "time": "t1", "data": "x"}]
        });
        let outcome = Outcome::ok(body.to_string());
        let parsed = interpret_tracking(&outcome).unwrap();
        assert_eq!(
            parsed,
            TrackingData::Records(vec![TrackingRecord {
                date: "d1".into(),
                time: "t1".into(),
                data: "x".into(),
            }])
        );
    }

    #[test]
    fn tracking_metadata_only_is_empty() {
        let body = json!({"success": true, "data": ["meta"]});
        let parsed = interpret_tracking(&Outcome::ok(body.to_string())).unwrap();
        assert_eq!(parsed, TrackingData::Empty);
    }

    #[test]
    fn tracking_empty_sequence_is_empty() {
        let body = json!({"success": true, "data": []});
        let parsed = interpret_tracking(&Outcome::ok(body.to_string())).unwrap();
        assert_eq!(parsed, TrackingData::Empty);
    }

    #[test]
    fn tracking_preserves_backend_order() {
        let body = json!({
            "success": true,
            "data": [
                {"meta": 1},
                {"date": "2024-02-02", "time": "10:00", "data": "Delivered"},
                {"date": "2024-02-01", "time": "08:00", "data": "Out for delivery"}
            ]
        });
        let TrackingData::Records(records) =
            interpret_tracking(&Outcome::ok(body.to_string())).unwrap()
        else {
            panic!("expected records");
        };
        assert_eq!(records[0].data, "Delivered");
        assert_eq!(records[1].data, "Out for delivery");
    }

    #[test]
    fn tracking_success_must_be_literal_true() {
        for success in [json!(false), json!("true"), json!(1), json!(null)] {
            let body = json!({"success": success, "data": ["meta"]});
            let result = interpret_tracking(&Outcome::ok(body.to_string()));
            assert_eq!(result, Err(ResponseError::Sentinel), "success = {success}");
        }
    }

    #[test]
    fn tracking_missing_success_is_failure() {
        let body = json!({"data": ["meta"]});
        let result = interpret_tracking(&Outcome::ok(body.to_string()));
        assert_eq!(result, Err(ResponseError::Sentinel));
    }

    #[test]
    fn tracking_unparsable_body_is_malformed() {
        let result = interpret_tracking(&Outcome::ok("<html>oops</html>"));
        assert!(matches!(result, Err(ResponseError::Malformed(_))));
    }

    #[test]
    fn tracking_missing_data_is_malformed() {
        let body = json!({"success": true});
        let result = interpret_tracking(&Outcome::ok(body.to_string()));
        assert!(matches!(result, Err(ResponseError::Malformed(_))));
    }

    #[test]
    fn tracking_bad_record_shape_is_malformed() {
        let body = json!({"success": true, "data": ["meta", {"date": "d1"}]});
        let result = interpret_tracking(&Outcome::ok(body.to_string()));
        assert!(matches!(result, Err(ResponseError::Malformed(_))));
    }

    #[test]
    fn tracking_non_200_is_transport_failure() {
        let result = interpret_tracking(&Outcome::new(404, ""));
        assert_eq!(result, Err(ResponseError::Transport { status: 404 }));
    }
}
