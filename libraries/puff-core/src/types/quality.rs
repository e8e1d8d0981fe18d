/// Video quality tiers offered by the conversion API
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested video quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityTier {
    /// 1080p (Full HD)
    #[serde(rename = "1080p")]
    FullHd,
    /// 720p (HD)
    #[default]
    #[serde(rename = "720p")]
    Hd,
    /// 480p (SD)
    #[serde(rename = "480p")]
    Sd,
    /// 360p
    #[serde(rename = "360p")]
    Low,
}

impl QualityTier {
    /// All tiers, best first
    pub fn available() -> [QualityTier; 4] {
        [Self::FullHd, Self::Hd, Self::Sd, Self::Low]
    }

    /// Value sent to the conversion API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullHd => "1080p",
            Self::Hd => "720p",
            Self::Sd => "480p",
            Self::Low => "360p",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::FullHd => "1080p (Full HD)",
            Self::Hd => "720p (HD)",
            Self::Sd => "480p (SD)",
            Self::Low => "360p (Low)",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = crate::PuffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::available()
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::PuffError::invalid_input(format!("unknown quality tier: {s}")))
    }
}
