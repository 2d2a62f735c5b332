use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::FetchError;

/// One (retention time, intensity) pair of a sample's peak list.
///
/// Retention times are in minutes, as served by the peak list API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakPoint {
    #[serde(rename = "rt")]
    pub retention_time: f64,
    pub intensity: f64,
}

impl PeakPoint {
    pub fn try_new(retention_time: f64, intensity: f64) -> Result<Self, FetchError> {
        if !retention_time.is_finite() || retention_time < 0.0 {
            return Err(FetchError::MalformedResponse(format!(
                "retention time must be finite and non-negative, got {}",
                retention_time
            )));
        }
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(FetchError::MalformedResponse(format!(
                "intensity must be finite and non-negative, got {}",
                intensity
            )));
        }
        Ok(Self {
            retention_time,
            intensity,
        })
    }
}

/// Parses a peak list response body.
///
/// The body must be a JSON array of objects carrying numeric `rt` and
/// `intensity` fields. Any other fields are ignored.
pub fn parse_peak_list(body: &str) -> Result<Vec<PeakPoint>, FetchError> {
    let records: Vec<PeakPoint> = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    records
        .into_iter()
        .map(|p| PeakPoint::try_new(p.retention_time, p.intensity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = r#"[
            {"rt": 1.5, "intensity": 100.0, "mz": 123.45, "formula": "C6H12O6"},
            {"rt": 2, "intensity": 50}
        ]"#;
        let peaks = parse_peak_list(body).unwrap();
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].retention_time, 1.5);
        assert_eq!(peaks[1].intensity, 50.0);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_peak_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_field_is_malformed() {
        let res = parse_peak_list(r#"[{"rt": 1.0}]"#);
        assert!(matches!(res, Err(FetchError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_non_numeric_is_malformed() {
        let res = parse_peak_list(r#"[{"rt": "early", "intensity": 3.0}]"#);
        assert!(matches!(res, Err(FetchError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_not_a_list_is_malformed() {
        let res = parse_peak_list(r#"{"detail": "Not found"}"#);
        assert!(matches!(res, Err(FetchError::MalformedResponse(_))));
    }

    #[test]
    fn test_negative_values_rejected() {
        let res = parse_peak_list(r#"[{"rt": -1.0, "intensity": 3.0}]"#);
        assert!(matches!(res, Err(FetchError::MalformedResponse(_))));
        let res = parse_peak_list(r#"[{"rt": 1.0, "intensity": -3.0}]"#);
        assert!(matches!(res, Err(FetchError::MalformedResponse(_))));
    }
}
