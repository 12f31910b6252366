//! Validation and derived metadata for fNIRS channel layouts.
//!
//! A layout is a [`MeasInfo`]: ordered channel descriptors (name, type tag,
//! location vector) plus the list of bad channels. fNIRS channels are named
//! `S<i>_D<j> <suffix>` and must come in consecutive pairs over the same
//! source and detector, alternating between two wavelengths (`760`, `850`)
//! or between `hbo` and `hbr`.
//!
//! # Example
//!
//! ```rust
//! use nirs_layout::info::{ChannelInfo, ChannelKind, MeasInfo};
//! use nirs_layout::nirs::{validate_nirs_info, short_channels, DEFAULT_SHORT_THRESHOLD};
//!
//! let loc = |wl: f64| vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.03, 0.0, 0.0, wl];
//! let info = MeasInfo::new(vec![
//!     ChannelInfo::new("S1_D1 760", ChannelKind::FnirsCwAmplitude, &loc(760.0)),
//!     ChannelInfo::new("S1_D1 850", ChannelKind::FnirsCwAmplitude, &loc(850.0)),
//! ]);
//!
//! assert_eq!(validate_nirs_info(&info, true).unwrap(), vec![0, 1]);
//! assert_eq!(short_channels(&info, DEFAULT_SHORT_THRESHOLD), vec![false, false]);
//! ```

pub mod error;
pub mod info;
pub mod nirs;
pub mod report;

#[cfg(test)]
mod test_utils;

pub use error::NirsError;
pub use info::{ChannelInfo, ChannelKind, MeasInfo, Picks};
pub use report::LayoutReport;
