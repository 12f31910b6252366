use crate::error::{NirsError, Result};
use crate::info::picks::{picks_chromophore, picks_wavelength};
use crate::info::MeasInfo;

use super::names::parse_wavelength;

/// Light wavelength of each amplitude / optical-density channel, in channel order.
///
/// With `nominal` the value is read from the channel name (`S1_D1 760` → 760),
/// otherwise from the wavelength slot of the location vector, which may be NaN.
/// Haemoglobin channels are skipped, so converted data yields an empty list.
pub fn channel_frequencies(info: &MeasInfo, nominal: bool) -> Result<Vec<f64>> {
    picks_wavelength(info)
        .into_iter()
        .map(|i| {
            let ch = &info.chs[i];
            if nominal {
                parse_wavelength(&ch.name)
                    .map(|(_, nm)| nm)
                    .ok_or_else(|| NirsError::UnparseableNames {
                        names: vec![ch.name.clone()],
                    })
            } else {
                Ok(ch.loc[9])
            }
        })
        .collect()
}

/// Chromophore label (the text after the first space) of each hbo/hbr channel.
pub fn channel_chromophores(info: &MeasInfo) -> Result<Vec<String>> {
    picks_chromophore(info)
        .into_iter()
        .map(|i| {
            let name = &info.chs[i].name;
            name.split(' ')
                .nth(1)
                .map(str::to_string)
                .ok_or_else(|| NirsError::UnparseableNames {
                    names: vec![name.clone()],
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{ChannelInfo, ChannelKind};
    use crate::test_utils::{amplitude_layout, haemo_layout};

    #[test]
    fn test_nominal_frequencies_from_names() {
        let info = amplitude_layout(&[(1, 1), (2, 1)]);
        assert_eq!(
            channel_frequencies(&info, true).unwrap(),
            vec![760.0, 850.0, 760.0, 850.0]
        );
    }

    #[test]
    fn test_actual_frequencies_from_locations() {
        let mut info = amplitude_layout(&[(1, 1)]);
        info.chs[1].loc[9] = 852.5;
        assert_eq!(channel_frequencies(&info, false).unwrap(), vec![760.0, 852.5]);
    }

    #[test]
    fn test_frequencies_skip_haemoglobin() {
        let info = haemo_layout(&[(1, 1)]);
        assert!(channel_frequencies(&info, true).unwrap().is_empty());
        assert!(channel_frequencies(&info, false).unwrap().is_empty());
    }

    #[test]
    fn test_nominal_frequency_needs_parseable_name() {
        let info = crate::info::MeasInfo::new(vec![ChannelInfo::new(
            "channel-1",
            ChannelKind::FnirsOd,
            &[],
        )]);
        assert!(matches!(
            channel_frequencies(&info, true),
            Err(NirsError::UnparseableNames { .. })
        ));
    }

    #[test]
    fn test_chromophores() {
        let info = haemo_layout(&[(1, 1), (1, 2)]);
        assert_eq!(
            channel_chromophores(&info).unwrap(),
            vec!["hbo", "hbr", "hbo", "hbr"]
        );
        assert!(channel_chromophores(&amplitude_layout(&[(1, 1)]))
            .unwrap()
            .is_empty());
    }
}
