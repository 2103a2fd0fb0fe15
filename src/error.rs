//! Error types for CBF reading and writing

/// Names used to report which structural marker was absent.
///
/// These are the payloads carried by [`Error::MissingMarker`]; callers can
/// match on them to tell exactly which element the scanner failed to find.
pub mod markers {
    /// The `data_` identifier line near the top of the file
    pub const DATA_SECTION: &str = "data_ section";
    /// Line terminator of the `data_` identifier line
    pub const DATA_LINE_END: &str = "end of data_ line";
    /// The `_array_data.data` tag
    pub const ARRAY_DATA_SECTION: &str = "_array_data.data section";
    /// The `--CIF-BINARY-FORMAT-SECTION--` start marker
    pub const SECTION_START: &str = "--CIF-BINARY-FORMAT-SECTION-- marker";
    /// The `--CIF-BINARY-FORMAT-SECTION----` end marker
    pub const SECTION_END: &str = "--CIF-BINARY-FORMAT-SECTION---- end marker";
    /// The 4-byte binary magic after the binary section header
    pub const MAGIC: &str = "CBF magic number";
}

/// Errors that can occur while reading or writing a CBF byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A required structural marker is absent from the input
    MissingMarker(&'static str),
    /// A required numeric field is absent or non-numeric in the header text
    MissingField(&'static str),
    /// The declared payload size exceeds the bytes remaining in the input
    TruncatedData,
    /// Write attempted on a frame with no pixels, a zero dimension, or a
    /// pixel count that does not match `width * height`
    InvalidFrame,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::MissingMarker(_) => "required structural marker not found",
            Error::MissingField(_) => "required header field not found",
            Error::TruncatedData => "file truncated, not enough binary data",
            Error::InvalidFrame => "frame has no pixels or a zero dimension",
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingMarker(marker) => write!(f, "could not find {marker}"),
            Error::MissingField(field) => write!(f, "could not find {field} in header"),
            _ => write!(f, "{}", self.description()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for nanocbf operations
pub type Result<T> = core::result::Result<T, Error>;
