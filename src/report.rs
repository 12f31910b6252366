use log::warn;
use serde::Serialize;

use crate::info::picks::{picks_chromophore, picks_wavelength};
use crate::info::MeasInfo;
use crate::nirs::{
    channel_distance, fnirs_optode_names, optode_position, short_channels, validate_nirs_info,
};

// ---------------------------------------------------------------------------
// Layout report
// ---------------------------------------------------------------------------

/// Processing stage of the fNIRS channels in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FnirsStage {
    /// Amplitude or optical density.
    Wavelength,
    /// hbo / hbr.
    Chromophore,
    /// Both present (invalid).
    Mixed,
    None,
}

impl FnirsStage {
    pub fn of(info: &MeasInfo) -> Self {
        match (
            picks_wavelength(info).is_empty(),
            picks_chromophore(info).is_empty(),
        ) {
            (false, true) => FnirsStage::Wavelength,
            (true, false) => FnirsStage::Chromophore,
            (false, false) => FnirsStage::Mixed,
            (true, true) => FnirsStage::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub name: String,
    pub kind: String,
    pub distance: f64,
    pub short: bool,
    pub bad: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptodeSummary {
    pub name: String,
    pub position: [f64; 3],
}

/// Validation outcome: either the valid picks or the reason they are invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Validation {
    Valid { picks: Vec<usize> },
    Invalid { error: String },
}

/// Everything this crate can say about one layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub n_channels: usize,
    pub stage: FnirsStage,
    pub validation: Validation,
    pub bads: Vec<String>,
    pub channels: Vec<ChannelSummary>,
    pub sources: Vec<OptodeSummary>,
    pub detectors: Vec<OptodeSummary>,
    /// Why `sources` and `detectors` are empty, when the names could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optode_error: Option<String>,
}

impl LayoutReport {
    /// Build the report. Nothing here fails: validation and optode lookup
    /// errors are recorded in the report, and optodes that cannot be read
    /// are left out.
    pub fn build(info: &MeasInfo, short_threshold: f64) -> Self {
        let validation = match validate_nirs_info(info, true) {
            Ok(picks) => Validation::Valid { picks },
            Err(err) => Validation::Invalid {
                error: err.to_string(),
            },
        };

        let short = short_channels(info, short_threshold);
        let channels = info
            .chs
            .iter()
            .zip(short)
            .map(|(ch, short)| ChannelSummary {
                name: ch.name.clone(),
                kind: ch.kind.to_string(),
                distance: channel_distance(ch),
                short,
                bad: info.is_bad(&ch.name),
            })
            .collect();

        let (source_names, detector_names, optode_error) = match fnirs_optode_names(info) {
            Ok((sources, detectors)) => (sources, detectors, None),
            Err(err) => {
                warn!("optodes left out of report: {err}");
                (Vec::new(), Vec::new(), Some(err.to_string()))
            }
        };
        let locate = |names: Vec<String>| -> Vec<OptodeSummary> {
            names
                .into_iter()
                .filter_map(|name| match optode_position(info, &name) {
                    Ok(position) => Some(OptodeSummary { name, position }),
                    Err(err) => {
                        warn!("{err}");
                        None
                    }
                })
                .collect()
        };

        LayoutReport {
            n_channels: info.len(),
            stage: FnirsStage::of(info),
            validation,
            bads: info.bads.clone(),
            channels,
            sources: locate(source_names),
            detectors: locate(detector_names),
            optode_error,
        }
    }
}
