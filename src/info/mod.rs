//! Channel-metadata layer: record types, loading, and channel picks.
//!
//! Architecture:
//! ```text
//!  .parquet / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → MeasInfo
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ MeasInfo  │  Vec<ChannelInfo>, bads
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  picks    │  channel selection → indices
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod picks;

pub use model::{ChannelInfo, ChannelKind, MeasInfo, LOC_LEN};
pub use picks::{pick_indices, KindGroup, Picks};
