use log::debug;

use crate::error::Result;
use crate::info::{pick_indices, ChannelInfo, MeasInfo, Picks};

/// Source-detector separation below which a channel counts as short (metres).
pub const DEFAULT_SHORT_THRESHOLD: f64 = 0.01;

fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Distance between the source and detector of one channel.
pub fn channel_distance(ch: &ChannelInfo) -> f64 {
    euclidean(ch.source_pos(), ch.detector_pos())
}

/// Source-detector distance for each picked channel, in location units
/// (metres for layouts written by the host toolkit).
///
/// Channels without optode positions yield NaN.
pub fn source_detector_distances(info: &MeasInfo, picks: &Picks) -> Result<Vec<f64>> {
    let idx = pick_indices(info, picks)?;
    Ok(idx.into_iter().map(|i| channel_distance(&info.chs[i])).collect())
}

/// Flag every channel whose source-detector distance is below `threshold`.
///
/// One entry per channel. NaN distances are never short.
pub fn short_channels(info: &MeasInfo, threshold: f64) -> Vec<bool> {
    let short: Vec<bool> = info
        .chs
        .iter()
        .map(|ch| channel_distance(ch) < threshold)
        .collect();
    debug!(
        "{} of {} channels shorter than {threshold}",
        short.iter().filter(|s| **s).count(),
        short.len()
    );
    short
}
