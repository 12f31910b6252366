use std::collections::BTreeSet;

use crate::error::{NirsError, Result};
use crate::info::picks::{picks_chromophore, picks_fnirs, picks_wavelength};
use crate::info::MeasInfo;

use super::names::{parse_label, parse_wavelength, ChannelName, Optode, SourceDetector};

/// Unique source and detector labels (`S1`, `S2`, ... / `D1`, ...) in numeric order.
///
/// Names are read with the wavelength convention when the layout holds
/// amplitude or optical-density channels and with the chromophore convention
/// otherwise. Returns two empty lists when there are no fNIRS channels.
pub fn fnirs_optode_names(info: &MeasInfo) -> Result<(Vec<String>, Vec<String>)> {
    let parse: fn(&str) -> Option<SourceDetector> = if !picks_wavelength(info).is_empty() {
        |name| parse_wavelength(name).map(|(pair, _)| pair)
    } else if !picks_chromophore(info).is_empty() {
        |name| parse_label(name).map(|(pair, _)| pair)
    } else {
        return Ok((Vec::new(), Vec::new()));
    };

    let mut sources = BTreeSet::new();
    let mut detectors = BTreeSet::new();
    for i in picks_fnirs(info) {
        let name = &info.chs[i].name;
        let pair = parse(name).ok_or_else(|| NirsError::UnparseableNames {
            names: vec![name.clone()],
        })?;
        sources.insert(pair.source);
        detectors.insert(pair.detector);
    }

    Ok((
        sources.into_iter().map(|s| Optode::Source(s).to_string()).collect(),
        detectors.into_iter().map(|d| Optode::Detector(d).to_string()).collect(),
    ))
}

/// Position of an optode, taken from the first fNIRS channel that uses it.
///
/// `S<n>` reads the source slot of that channel's location, `D<n>` the
/// detector slot.
pub fn optode_position(info: &MeasInfo, optode: &str) -> Result<[f64; 3]> {
    let target = Optode::parse(optode)?;
    let ch = picks_fnirs(info)
        .into_iter()
        .map(|i| &info.chs[i])
        .find(|ch| {
            ChannelName::parse(&ch.name)
                .pair()
                .is_some_and(|pair| target.is_part_of(pair))
        })
        .ok_or_else(|| NirsError::OptodeNotFound(optode.to_string()))?;

    Ok(match target {
        Optode::Source(_) => ch.source_pos(),
        Optode::Detector(_) => ch.detector_pos(),
    })
}
