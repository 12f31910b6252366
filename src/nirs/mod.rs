//! fNIRS layout checks and derived quantities.
//!
//! Every function reads a [`MeasInfo`](crate::info::MeasInfo) supplied by the
//! caller; only [`fnirs_spread_bads`] writes to it (the bad list).
//!
//! * `names`     – `S<i>_D<j> <suffix>` parsing, optode labels
//! * `distances` – source-detector distances, short channels
//! * `channels`  – wavelengths and chromophores per channel
//! * `ordering`  – pairing / alternation validation
//! * `bads`      – bad labelling across pairs
//! * `optodes`   – optode names and positions

pub mod bads;
pub mod channels;
pub mod distances;
pub mod names;
pub mod optodes;
pub mod ordering;

pub use bads::{fnirs_check_bads, fnirs_spread_bads};
pub use channels::{channel_chromophores, channel_frequencies};
pub use distances::{
    channel_distance, short_channels, source_detector_distances, DEFAULT_SHORT_THRESHOLD,
};
pub use names::{ChannelName, Optode, SourceDetector};
pub use optodes::{fnirs_optode_names, optode_position};
pub use ordering::{check_channels_ordered, validate_nirs_info, PairValues};
