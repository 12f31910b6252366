use std::fmt;

use log::{debug, warn};

use crate::error::{NirsError, Result};
use crate::info::picks::{picks_chromophore, picks_wavelength};
use crate::info::MeasInfo;

use super::bads::fnirs_check_bads;
use super::channels::{channel_chromophores, channel_frequencies};
use super::names::{parse_label, parse_wavelength};

const CHROMOPHORES: [&str; 2] = ["hbo", "hbr"];

/// The two values every fNIRS pair must carry, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PairValues {
    Wavelengths([f64; 2]),
    Chromophores([String; 2]),
}

impl PairValues {
    /// The usual haemoglobin pair, `hbo` then `hbr`.
    pub fn haemoglobin() -> Self {
        PairValues::Chromophores(CHROMOPHORES.map(String::from))
    }
}

impl fmt::Display for PairValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairValues::Wavelengths([a, b]) => write!(f, "{a} & {b}"),
            PairValues::Chromophores([a, b]) => write!(f, "{a} & {b}"),
        }
    }
}

/// Channel-type checks shared by every layout: returns the fNIRS picks
/// (chromophore channels first, then wavelength channels).
fn checked_picks(info: &MeasInfo) -> Result<Vec<usize>> {
    let picks_wave = picks_wavelength(info);
    let picks_chroma = picks_chromophore(info);

    if !picks_wave.is_empty() && !picks_chroma.is_empty() {
        return Err(NirsError::MixedChannelTypes);
    }

    let picks: Vec<usize> = picks_chroma.into_iter().chain(picks_wave.iter().copied()).collect();

    if picks.len() % 2 != 0 {
        return Err(NirsError::OddChannelCount {
            count: info.len(),
            names: info.ch_names(),
        });
    }

    let wavelengths: Vec<f64> = picks_wave.iter().map(|&i| info.chs[i].loc[9]).collect();
    if wavelengths.iter().any(|wl| wl.is_nan()) {
        return Err(NirsError::MissingWavelength { wavelengths });
    }

    Ok(picks)
}

/// Check one consecutive pair of channels against the expected values.
fn check_pair(info: &MeasInfo, first: usize, second: usize, pair_vals: &PairValues) -> Result<()> {
    let n1 = &info.chs[first].name;
    let n2 = &info.chs[second].name;

    let (same_optodes, expected, what) =
        if let (Some((p1, f1)), Some((p2, f2))) = (parse_wavelength(n1), parse_wavelength(n2)) {
            let expected = matches!(
                pair_vals,
                PairValues::Wavelengths([e1, e2]) if f1 == *e1 && f2 == *e2
            );
            (p1 == p2, expected, "frequencies")
        } else if let (Some((p1, l1)), Some((p2, l2))) = (parse_label(n1), parse_label(n2)) {
            if !CHROMOPHORES.contains(&l1.as_str()) || !CHROMOPHORES.contains(&l2.as_str()) {
                return Err(NirsError::InvalidChromophore {
                    first: n1.clone(),
                    second: n2.clone(),
                });
            }
            let expected = matches!(
                pair_vals,
                PairValues::Chromophores([e1, e2]) if l1 == *e1 && l2 == *e2
            );
            (p1 == p2, expected, "chromophore")
        } else {
            return Err(NirsError::UnparseableNames {
                names: info.ch_names(),
            });
        };

    if !same_optodes || !expected {
        return Err(NirsError::PairOrder {
            what,
            expected: pair_vals.to_string(),
            first: n1.clone(),
            second: n2.clone(),
        });
    }
    Ok(())
}

fn ordered_picks(info: &MeasInfo, pair_vals: &PairValues) -> Result<Vec<usize>> {
    let picks = checked_picks(info)?;
    for pair in picks.chunks_exact(2) {
        // Pair members must be neighbouring channels, not just neighbouring picks.
        if pair[1] != pair[0] + 1 {
            return Err(NirsError::SplitPair {
                first: info.chs[pair[0]].name.clone(),
                second: info.chs[pair[1]].name.clone(),
                between: info.chs[pair[0] + 1].name.clone(),
            });
        }
        check_pair(info, pair[0], pair[1], pair_vals)?;
    }
    Ok(picks)
}

/// Turn a validation failure into an empty pick list when errors are suppressed.
/// Bad labelling is checked in both modes and is never suppressed.
fn finish(info: &MeasInfo, outcome: Result<Vec<usize>>, throw_errors: bool) -> Result<Vec<usize>> {
    let picks = match outcome {
        Ok(picks) => picks,
        Err(err) if !throw_errors => {
            warn!("fNIRS layout rejected: {err}");
            Vec::new()
        }
        Err(err) => return Err(err),
    };
    fnirs_check_bads(info)?;
    Ok(picks)
}

/// Check that fNIRS channels come in consecutive source-detector pairs
/// alternating between the two `pair_vals`.
///
/// Returns the fNIRS channel indices when the layout is valid. When
/// `throw_errors` is false an invalid layout yields an empty list instead of
/// an error. Inconsistent bad labelling is an error in both modes.
pub fn check_channels_ordered(
    info: &MeasInfo,
    pair_vals: &PairValues,
    throw_errors: bool,
) -> Result<Vec<usize>> {
    let outcome = ordered_picks(info, pair_vals);
    if let Ok(picks) = &outcome {
        debug!("{} fNIRS channels ordered as {pair_vals}", picks.len());
    }
    finish(info, outcome, throw_errors)
}

fn sorted_unique_wavelengths(mut freqs: Vec<f64>) -> Vec<f64> {
    freqs.sort_by(f64::total_cmp);
    freqs.dedup();
    freqs
}

/// Derive the expected pair values from the layout itself.
///
/// `Ok(None)` means the layout holds no fNIRS channels.
fn infer_pair_values(info: &MeasInfo) -> Result<Option<PairValues>> {
    let freqs = sorted_unique_wavelengths(channel_frequencies(info, true)?);
    if !freqs.is_empty() {
        return match freqs.as_slice() {
            [a, b] => Ok(Some(PairValues::Wavelengths([*a, *b]))),
            other => Err(NirsError::PairValueCount {
                what: "wavelengths",
                found: other.iter().map(f64::to_string).collect(),
            }),
        };
    }

    let mut chroma = channel_chromophores(info)?;
    chroma.sort();
    chroma.dedup();
    match chroma.as_slice() {
        [] => Ok(None),
        [a, b] => Ok(Some(PairValues::Chromophores([a.clone(), b.clone()]))),
        _ => Err(NirsError::PairValueCount {
            what: "chromophores",
            found: chroma,
        }),
    }
}

/// Apply every fNIRS layout check. Works on amplitude, optical density and
/// haemoglobin layouts; the expected pair is read from the channel names.
pub fn validate_nirs_info(info: &MeasInfo, throw_errors: bool) -> Result<Vec<usize>> {
    let pair_vals = checked_picks(info).and_then(|_| infer_pair_values(info));
    match pair_vals {
        Ok(Some(pair_vals)) => check_channels_ordered(info, &pair_vals, throw_errors),
        Ok(None) => finish(info, Ok(Vec::new()), throw_errors),
        Err(err) => finish(info, Err(err), throw_errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{ChannelInfo, ChannelKind};
    use crate::test_utils::{amplitude_layout, haemo_layout};

    fn wl_pair() -> PairValues {
        PairValues::Wavelengths([760.0, 850.0])
    }

    #[test]
    fn test_ordered_amplitude_layout() {
        let info = amplitude_layout(&[(1, 1), (1, 2), (2, 1)]);
        let picks = check_channels_ordered(&info, &wl_pair(), true).unwrap();
        assert_eq!(picks, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_ordered_haemo_layout() {
        let info = haemo_layout(&[(1, 1), (2, 2)]);
        let picks = check_channels_ordered(&info, &PairValues::haemoglobin(), true).unwrap();
        assert_eq!(picks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_optical_density_layout() {
        let mut info = amplitude_layout(&[(1, 1)]);
        for ch in &mut info.chs {
            ch.kind = ChannelKind::FnirsOd;
        }
        assert_eq!(validate_nirs_info(&info, true).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_non_fnirs_channels_are_ignored() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs.push(ChannelInfo::new("Trigger", ChannelKind::Other("stim".into()), &[]));
        assert_eq!(check_channels_ordered(&info, &wl_pair(), true).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_interleaved_channel_splits_pair() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs.insert(1, ChannelInfo::new("Fz", ChannelKind::Other("eeg".into()), &[]));
        let err = validate_nirs_info(&info, true).unwrap_err();
        assert_eq!(
            err,
            NirsError::SplitPair {
                first: "S1_D1 760".into(),
                second: "S1_D1 850".into(),
                between: "Fz".into(),
            }
        );
        assert!(matches!(
            check_channels_ordered(&info, &wl_pair(), true),
            Err(NirsError::SplitPair { .. })
        ));
        assert_eq!(validate_nirs_info(&info, false), Ok(vec![]));
    }

    #[test]
    fn test_fnirs_named_auxiliary_channel_splits_pair() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs.insert(
            1,
            ChannelInfo::new("S1_D1 850", ChannelKind::Other("misc".into()), &[]),
        );
        assert!(matches!(
            check_channels_ordered(&info, &wl_pair(), true),
            Err(NirsError::SplitPair { .. })
        ));
    }

    #[test]
    fn test_mixed_types_raise() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs.extend(haemo_layout(&[(1, 1)]).chs);
        assert_eq!(
            check_channels_ordered(&info, &wl_pair(), true),
            Err(NirsError::MixedChannelTypes)
        );
        assert_eq!(validate_nirs_info(&info, true), Err(NirsError::MixedChannelTypes));
        assert_eq!(check_channels_ordered(&info, &wl_pair(), false), Ok(vec![]));
    }

    #[test]
    fn test_odd_count_raises() {
        let mut info = amplitude_layout(&[(1, 1), (1, 2)]);
        info.chs.pop();
        assert!(matches!(
            check_channels_ordered(&info, &wl_pair(), true),
            Err(NirsError::OddChannelCount { count: 3, .. })
        ));
        assert!(matches!(
            validate_nirs_info(&info, true),
            Err(NirsError::OddChannelCount { .. })
        ));

        let mut single = haemo_layout(&[(1, 1)]);
        single.chs.pop();
        assert!(matches!(
            validate_nirs_info(&single, true),
            Err(NirsError::OddChannelCount { count: 1, .. })
        ));
    }

    #[test]
    fn test_missing_wavelength_raises() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs[1].loc[9] = f64::NAN;
        assert!(matches!(
            check_channels_ordered(&info, &wl_pair(), true),
            Err(NirsError::MissingWavelength { .. })
        ));
    }

    #[test]
    fn test_swapped_wavelengths_raise() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs.swap(0, 1);
        let err = check_channels_ordered(&info, &wl_pair(), true).unwrap_err();
        assert!(matches!(err, NirsError::PairOrder { what: "frequencies", .. }));
        assert!(err.to_string().contains("760 & 850"));
    }

    #[test]
    fn test_mismatched_optodes_raise() {
        let mut info = amplitude_layout(&[(1, 1), (1, 2)]);
        info.chs.swap(1, 3);
        assert!(matches!(
            check_channels_ordered(&info, &wl_pair(), true),
            Err(NirsError::PairOrder { .. })
        ));
    }

    #[test]
    fn test_unknown_chromophore_raises() {
        let mut info = haemo_layout(&[(1, 1)]);
        info.chs[1].name = "S1_D1 hbt".into();
        assert!(matches!(
            check_channels_ordered(&info, &PairValues::haemoglobin(), true),
            Err(NirsError::InvalidChromophore { .. })
        ));
    }

    #[test]
    fn test_unparseable_names_raise() {
        let mut info = haemo_layout(&[(1, 1)]);
        info.chs[0].name = "ch1 hbo".into();
        assert!(matches!(
            check_channels_ordered(&info, &PairValues::haemoglobin(), true),
            Err(NirsError::UnparseableNames { .. })
        ));
        assert_eq!(
            check_channels_ordered(&info, &PairValues::haemoglobin(), false),
            Ok(vec![])
        );
    }

    #[test]
    fn test_wavelength_names_against_chromophore_pair() {
        let info = amplitude_layout(&[(1, 1)]);
        assert!(matches!(
            check_channels_ordered(&info, &PairValues::haemoglobin(), true),
            Err(NirsError::PairOrder { .. })
        ));
    }

    #[test]
    fn test_validate_infers_wavelengths() {
        let info = amplitude_layout(&[(1, 1), (2, 2)]);
        assert_eq!(validate_nirs_info(&info, true).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(
            infer_pair_values(&info).unwrap(),
            Some(PairValues::Wavelengths([760.0, 850.0]))
        );
    }

    #[test]
    fn test_validate_rejects_three_wavelengths() {
        let mut info = amplitude_layout(&[(1, 1), (2, 2)]);
        info.chs[3].name = "S2_D2 920".into();
        assert!(matches!(
            validate_nirs_info(&info, true),
            Err(NirsError::PairValueCount { what: "wavelengths", .. })
        ));
        assert_eq!(validate_nirs_info(&info, false), Ok(vec![]));
    }

    #[test]
    fn test_validate_without_fnirs_channels() {
        let info = MeasInfo::new(vec![ChannelInfo::new("Fz", ChannelKind::Other("eeg".into()), &[])]);
        assert_eq!(validate_nirs_info(&info, true), Ok(vec![]));
    }

    #[test]
    fn test_inconsistent_bads_raise_even_when_suppressed() {
        let mut info = haemo_layout(&[(1, 1)]);
        info.bads.push("S1_D1 hbo".into());
        for throw_errors in [true, false] {
            assert!(matches!(
                validate_nirs_info(&info, throw_errors),
                Err(NirsError::InconsistentBads { .. })
            ));
        }
    }
}
