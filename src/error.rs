use thiserror::Error;

// ---------------------------------------------------------------------------
// NirsError – everything the validation and lookup layer can report
// ---------------------------------------------------------------------------

/// Errors raised while validating or querying an fNIRS channel layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NirsError {
    /// Wavelength-based and chromophore channels in one recording.
    #[error(
        "a combination of amplitude, optical density, and haemoglobin data \
         in the same recording is not supported"
    )]
    MixedChannelTypes,

    /// The fNIRS channels cannot be split into pairs.
    #[error(
        "NIRS channels not ordered correctly. An even number of NIRS channels \
         is required. {count} channels were provided: {names:?}"
    )]
    OddChannelCount { count: usize, names: Vec<String> },

    /// At least one wavelength channel has no wavelength in its location vector.
    #[error(
        "NIRS channels are missing wavelength information in the channel \
         locations. The encoded wavelengths are {wavelengths:?}"
    )]
    MissingWavelength { wavelengths: Vec<f64> },

    /// A channel name does not follow `S<i>_D<j> <suffix>`.
    #[error(
        "NIRS channels have specified naming conventions. The provided \
         channel names can not be parsed. Channels are {names:?}"
    )]
    UnparseableNames { names: Vec<String> },

    /// Chromophore suffix other than hbo/hbr.
    #[error(
        "NIRS channels have specified naming conventions. Chromophore data \
         must be labeled either hbo or hbr. Failing channels are {first}, {second}"
    )]
    InvalidChromophore { first: String, second: String },

    /// A pair does not share optodes or does not carry the expected values.
    #[error(
        "NIRS channels not ordered correctly. Channels must be ordered as \
         source detector pairs with alternating {what}: {expected}. \
         Failing channels are {first}, {second}"
    )]
    PairOrder {
        what: &'static str,
        expected: String,
        first: String,
        second: String,
    },

    /// Another channel sits between the two members of a pair.
    #[error(
        "NIRS channels not ordered correctly. {first} and {second} must be \
         consecutive channels, found {between} between them"
    )]
    SplitPair {
        first: String,
        second: String,
        between: String,
    },

    /// The layout does not name exactly two wavelengths or chromophores.
    #[error("NIRS channels must alternate between exactly two {what}, found {found:?}")]
    PairValueCount { what: &'static str, found: Vec<String> },

    /// Only one member of a pair is marked bad.
    #[error("NIRS bad labelling is not consistent, found {got:?} but needed {want:?}")]
    InconsistentBads { got: Vec<String>, want: Vec<String> },

    /// The optode label is neither `S<n>` nor `D<n>`.
    #[error("invalid optode name '{0}', expected S<n> or D<n>")]
    InvalidOptode(String),

    /// No fNIRS channel references the optode.
    #[error("optode '{0}' is not used by any NIRS channel")]
    OptodeNotFound(String),

    /// A pick index beyond the channel list.
    #[error("pick index {index} out of range for {count} channels")]
    PickOutOfRange { index: usize, count: usize },

    /// A pick name that is not a channel.
    #[error("channel '{0}' not found")]
    UnknownChannel(String),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, NirsError>;
