use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of entries in a channel location vector.
pub const LOC_LEN: usize = 12;

// ---------------------------------------------------------------------------
// ChannelKind – the channel type tag
// ---------------------------------------------------------------------------

/// Channel type tag as written by the host toolkit.
///
/// Unknown tags are preserved verbatim in [`ChannelKind::Other`] so that a
/// layout mixing fNIRS with EEG, stimulus or auxiliary channels loads fine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelKind {
    /// Continuous-wave raw light intensity.
    FnirsCwAmplitude,
    /// Optical density.
    FnirsOd,
    /// Oxygenated haemoglobin concentration.
    Hbo,
    /// Deoxygenated haemoglobin concentration.
    Hbr,
    Other(String),
}

impl ChannelKind {
    /// Amplitude or optical density: data still indexed by light wavelength.
    pub fn is_wavelength(&self) -> bool {
        matches!(self, ChannelKind::FnirsCwAmplitude | ChannelKind::FnirsOd)
    }

    /// Haemoglobin concentration data.
    pub fn is_chromophore(&self) -> bool {
        matches!(self, ChannelKind::Hbo | ChannelKind::Hbr)
    }

    pub fn is_fnirs(&self) -> bool {
        self.is_wavelength() || self.is_chromophore()
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChannelKind::FnirsCwAmplitude => "fnirs_cw_amplitude",
            ChannelKind::FnirsOd => "fnirs_od",
            ChannelKind::Hbo => "hbo",
            ChannelKind::Hbr => "hbr",
            ChannelKind::Other(s) => s,
        }
    }
}

impl From<&str> for ChannelKind {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "fnirs_cw_amplitude" => ChannelKind::FnirsCwAmplitude,
            "fnirs_od" => ChannelKind::FnirsOd,
            "hbo" => ChannelKind::Hbo,
            "hbr" => ChannelKind::Hbr,
            other => ChannelKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ChannelKind {
    fn from(s: String) -> Self {
        ChannelKind::from(s.as_str())
    }
}

impl From<ChannelKind> for String {
    fn from(kind: ChannelKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for ChannelKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ChannelKind::from(s))
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChannelInfo – one channel descriptor
// ---------------------------------------------------------------------------

/// A single channel descriptor.
///
/// Location layout (host toolkit convention):
/// * `loc[0..3]` – channel midpoint xyz
/// * `loc[3..6]` – source xyz
/// * `loc[6..9]` – detector xyz
/// * `loc[9]`    – actual light wavelength in nm, NaN when unknown
/// * `loc[10..12]` – auxiliary
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub name: String,
    pub kind: ChannelKind,
    pub loc: [f64; LOC_LEN],
}

impl ChannelInfo {
    /// Build a channel from a possibly short location slice, padding with NaN.
    /// Entries beyond [`LOC_LEN`] are ignored.
    pub fn new(name: impl Into<String>, kind: ChannelKind, loc: &[f64]) -> Self {
        let mut full = [f64::NAN; LOC_LEN];
        for (slot, v) in full.iter_mut().zip(loc) {
            *slot = *v;
        }
        ChannelInfo {
            name: name.into(),
            kind,
            loc: full,
        }
    }

    pub fn source_pos(&self) -> [f64; 3] {
        [self.loc[3], self.loc[4], self.loc[5]]
    }

    pub fn detector_pos(&self) -> [f64; 3] {
        [self.loc[6], self.loc[7], self.loc[8]]
    }

    /// Wavelength recorded by the acquisition system, if any.
    pub fn wavelength(&self) -> Option<f64> {
        let wl = self.loc[9];
        (!wl.is_nan()).then_some(wl)
    }
}

// ---------------------------------------------------------------------------
// MeasInfo – the complete channel-metadata record
// ---------------------------------------------------------------------------

/// Ordered channel descriptors plus the names of channels flagged unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasInfo {
    pub chs: Vec<ChannelInfo>,
    pub bads: Vec<String>,
}

impl MeasInfo {
    pub fn new(chs: Vec<ChannelInfo>) -> Self {
        MeasInfo {
            chs,
            bads: Vec::new(),
        }
    }

    /// Channel names in channel order.
    pub fn ch_names(&self) -> Vec<String> {
        self.chs.iter().map(|ch| ch.name.clone()).collect()
    }

    pub fn channel(&self, idx: usize) -> Option<&ChannelInfo> {
        self.chs.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.chs.iter().position(|ch| ch.name == name)
    }

    pub fn is_bad(&self, name: &str) -> bool {
        self.bads.iter().any(|b| b == name)
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.chs.len()
    }

    /// Whether the record holds no channels.
    pub fn is_empty(&self) -> bool {
        self.chs.is_empty()
    }
}
