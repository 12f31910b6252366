//! Layout fixtures shared by the unit tests.

use crate::info::{ChannelInfo, ChannelKind, MeasInfo};

/// Location vector with the given source/detector positions and wavelength.
pub fn loc(source: [f64; 3], detector: [f64; 3], wavelength: f64) -> Vec<f64> {
    let mid = [
        (source[0] + detector[0]) / 2.0,
        (source[1] + detector[1]) / 2.0,
        (source[2] + detector[2]) / 2.0,
    ];
    let mut v = Vec::with_capacity(10);
    v.extend_from_slice(&mid);
    v.extend_from_slice(&source);
    v.extend_from_slice(&detector);
    v.push(wavelength);
    v
}

fn source_xyz(s: u32) -> [f64; 3] {
    [f64::from(s) / 100.0, 0.0, 0.0]
}

fn detector_xyz(d: u32) -> [f64; 3] {
    [f64::from(d) / 100.0, 0.03, 0.0]
}

/// Amplitude channels `S<s>_D<d> 760/850` for each pair, positions 3 cm apart
/// along y.
pub fn amplitude_layout(pairs: &[(u32, u32)]) -> MeasInfo {
    let mut chs = Vec::new();
    for &(s, d) in pairs {
        for wl in [760.0, 850.0] {
            chs.push(ChannelInfo::new(
                format!("S{s}_D{d} {wl}"),
                ChannelKind::FnirsCwAmplitude,
                &loc(source_xyz(s), detector_xyz(d), wl),
            ));
        }
    }
    MeasInfo::new(chs)
}

/// hbo/hbr channels for each pair, same geometry as [`amplitude_layout`].
pub fn haemo_layout(pairs: &[(u32, u32)]) -> MeasInfo {
    let mut chs = Vec::new();
    for &(s, d) in pairs {
        for (label, kind) in [("hbo", ChannelKind::Hbo), ("hbr", ChannelKind::Hbr)] {
            chs.push(ChannelInfo::new(
                format!("S{s}_D{d} {label}"),
                kind,
                &loc(source_xyz(s), detector_xyz(d), f64::NAN),
            ));
        }
    }
    MeasInfo::new(chs)
}
