/////////////////////////////////////////// GenerateError //////////////////////////////////////////

/// Errors that can occur when generating a random string.
///
/// Generation itself cannot fail; every variant here is an input that is rejected before any
/// random bits are drawn or any buffer is allocated.  Callers only ever see
/// [GenerateError::InvalidLength]: masks are not caller-definable, and the mask variants guard
/// the construction of the built-in masks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum GenerateError {
    /// The requested length is negative, or does not fit in `usize` on this target.
    InvalidLength {
        /// The length as requested.
        length: i64,
    },
    /// A character mask has no symbols to sample from.
    ///
    /// Only raised while building the crate's own masks; the built-in masks never trigger it.
    EmptyMask,
    /// A character mask has more symbols than one index chunk can address.
    ///
    /// Only raised while building the crate's own masks; the built-in masks never trigger it.
    MaskTooLarge {
        /// The number of symbols offered.
        size: usize,
        /// The most symbols a mask may hold.
        limit: usize,
    },
    /// A character mask contains a byte outside the ASCII range.
    ///
    /// Only raised while building the crate's own masks; the built-in masks never trigger it.
    NonAsciiSymbol {
        /// Position of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
}

impl GenerateError {
    /// Create an InvalidLength error for the requested length.
    pub const fn invalid_length(length: i64) -> Self {
        Self::InvalidLength { length }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidLength { length } => {
                write!(f, "Invalid length {length}: expected a non-negative integer\nSuggestion: Request zero or more characters")
            }
            GenerateError::EmptyMask => {
                write!(f, "Character mask is empty: there is nothing to sample from\nSuggestion: Use one of the built-in masks")
            }
            GenerateError::MaskTooLarge { size, limit } => {
                write!(f, "Character mask has {size} symbols but at most {limit} are addressable\nSuggestion: Split the alphabet or widen the index chunk")
            }
            GenerateError::NonAsciiSymbol { index, byte } => {
                write!(f, "Character mask holds non-ASCII byte {byte:#04x} at index {index}\nSuggestion: Restrict masks to ASCII symbols")
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
