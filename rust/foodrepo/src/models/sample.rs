use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;
use std::str::FromStr;

/// A row of the sample catalog.
///
/// Headers are matched by name, both the generic ones (`id`, `displayName`,
/// `category`) and the food repository export ones (`fid`, `nameJa`, `catJa`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(alias = "fid")]
    pub id: String,
    #[serde(rename = "displayName", alias = "nameJa")]
    pub display_name: String,
    #[serde(alias = "catJa")]
    pub category: String,
}

impl Sample {
    /// Label used for chart series and pie titles.
    pub fn series_label(&self) -> String {
        format!("{} (ID: {})", self.display_name, self.id)
    }
}

/// Ionization polarity the peak list was acquired in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    #[default]
    Pos,
    Neg,
}

impl DetectionMode {
    pub const ALL: [DetectionMode; 2] = [DetectionMode::Pos, DetectionMode::Neg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Neg => "neg",
        }
    }
}

impl Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pos" => Ok(Self::Pos),
            "neg" => Ok(Self::Neg),
            other => Err(format!("Unknown detection mode '{}', expected pos or neg", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_mode_round_trips_through_str() {
        for mode in DetectionMode::ALL {
            assert_eq!(mode.to_string().parse::<DetectionMode>(), Ok(mode));
        }
        assert_eq!(" NEG ".parse::<DetectionMode>(), Ok(DetectionMode::Neg));
        assert!("both".parse::<DetectionMode>().is_err());
    }

    #[test]
    fn test_series_label() {
        let sample = Sample {
            id: "F0001".into(),
            display_name: "Soy sauce".into(),
            category: "Seasoning".into(),
        };
        assert_eq!(sample.series_label(), "Soy sauce (ID: F0001)");
    }
}
