//! Bad-channel labelling across fNIRS pairs.
//!
//! Both members of a source-detector pair (the two wavelengths, or hbo and
//! hbr) describe the same optical path, so a pair is either entirely bad or
//! entirely good.

use log::debug;

use crate::error::{NirsError, Result};
use crate::info::picks::picks_fnirs;
use crate::info::MeasInfo;

/// Names of every other fNIRS channel and the channel right after it.
///
/// Pairs are neighbouring channels, so a channel placed between two
/// members of a pair becomes that pair's partner.
fn channel_pairs(info: &MeasInfo) -> Vec<Vec<String>> {
    picks_fnirs(info)
        .into_iter()
        .step_by(2)
        .map(|i| {
            info.chs[i..(i + 2).min(info.len())]
                .iter()
                .map(|ch| ch.name.clone())
                .collect()
        })
        .collect()
}

/// Fail when exactly one member of an fNIRS pair is marked bad.
pub fn fnirs_check_bads(info: &MeasInfo) -> Result<()> {
    for want in channel_pairs(info) {
        let got: Vec<String> = want.iter().filter(|n| info.is_bad(n)).cloned().collect();
        if got.len() == 1 && want.len() == 2 {
            return Err(NirsError::InconsistentBads { got, want });
        }
    }
    Ok(())
}

/// Mark both members of every fNIRS pair bad when either of them is.
///
/// Existing bads are kept in place and missing partners are appended.
/// Applying this twice is the same as applying it once.
pub fn fnirs_spread_bads(info: &mut MeasInfo) {
    let mut new_bads = info.bads.clone();

    for names in channel_pairs(info) {
        if names.iter().any(|n| info.is_bad(n)) {
            for name in names {
                if !new_bads.contains(&name) {
                    new_bads.push(name);
                }
            }
        }
    }

    if new_bads.len() != info.bads.len() {
        debug!("spread bads: {} -> {} channels", info.bads.len(), new_bads.len());
    }
    info.bads = new_bads;
}
