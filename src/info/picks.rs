use super::model::{ChannelKind, MeasInfo};
use crate::error::{NirsError, Result};

// ---------------------------------------------------------------------------
// Pick predicate: which channels an operation applies to
// ---------------------------------------------------------------------------

/// A channel type selector. `Fnirs` covers every wavelength and chromophore kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindGroup {
    Kind(ChannelKind),
    Fnirs,
}

impl KindGroup {
    fn matches(&self, kind: &ChannelKind) -> bool {
        match self {
            KindGroup::Kind(k) => k == kind,
            KindGroup::Fnirs => kind.is_fnirs(),
        }
    }
}

/// Channel selection handed to the query functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Picks {
    /// Every channel.
    #[default]
    All,
    Indices(Vec<usize>),
    Names(Vec<String>),
    Kinds(Vec<KindGroup>),
}

/// Resolve a [`Picks`] selection into channel indices.
///
/// * `All` / `Kinds` → ascending channel order
/// * `Indices` / `Names` → caller order, duplicates kept, one entry per pick
/// * Indices beyond the channel list → [`NirsError::PickOutOfRange`]
/// * Names that are not channels → [`NirsError::UnknownChannel`]
/// * A kind selection matching nothing → empty list
pub fn pick_indices(info: &MeasInfo, picks: &Picks) -> Result<Vec<usize>> {
    let count = info.len();
    match picks {
        Picks::All => Ok((0..count).collect()),
        Picks::Indices(idx) => {
            if let Some(&index) = idx.iter().find(|&&i| i >= count) {
                return Err(NirsError::PickOutOfRange { index, count });
            }
            Ok(idx.clone())
        }
        Picks::Names(names) => names
            .iter()
            .map(|n| {
                info.index_of(n)
                    .ok_or_else(|| NirsError::UnknownChannel(n.clone()))
            })
            .collect(),
        Picks::Kinds(groups) => Ok(info
            .chs
            .iter()
            .enumerate()
            .filter(|(_, ch)| groups.iter().any(|g| g.matches(&ch.kind)))
            .map(|(i, _)| i)
            .collect()),
    }
}

fn indices_where(info: &MeasInfo, pred: impl Fn(&ChannelKind) -> bool) -> Vec<usize> {
    info.chs
        .iter()
        .enumerate()
        .filter(|(_, ch)| pred(&ch.kind))
        .map(|(i, _)| i)
        .collect()
}

/// Amplitude and optical-density channels.
pub fn picks_wavelength(info: &MeasInfo) -> Vec<usize> {
    indices_where(info, ChannelKind::is_wavelength)
}

/// hbo and hbr channels.
pub fn picks_chromophore(info: &MeasInfo) -> Vec<usize> {
    indices_where(info, ChannelKind::is_chromophore)
}

/// Every fNIRS channel regardless of processing stage.
pub fn picks_fnirs(info: &MeasInfo) -> Vec<usize> {
    indices_where(info, ChannelKind::is_fnirs)
}
