//! Character masks: the alphabets a generated string is drawn from.
//!
//! Every mask is a fixed, ordered run of ASCII symbols.  Three base masks exist (uppercase
//! letters, lowercase letters and digits) and the composite masks are their concatenations.  A
//! mask never holds more symbols than one index chunk of the sampler can address, so rejection
//! sampling over it always terminates.

use crate::sampler::IDX_BITS;
use crate::GenerateError;

/// The largest number of symbols a mask may hold.
pub const MAX_MASK_LEN: usize = 1 << IDX_BITS;

/////////////////////////////////////////// CharacterMask //////////////////////////////////////////

/// An ordered, non-empty set of ASCII symbols to sample from.
///
/// # Examples
///
/// ```
/// use randtext::DIGITS;
///
/// assert_eq!(DIGITS.len(), 10);
/// assert!(DIGITS.contains('7'));
/// assert_eq!(DIGITS.symbol(0), Some('0'));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CharacterMask {
    symbols: &'static [u8],
}

impl CharacterMask {
    /// Create a mask, panicking if it violates the mask invariants.
    ///
    /// Intended for constants, where the panic surfaces at compile time.
    pub(crate) const fn new(symbols: &'static [u8]) -> Self {
        match Self::try_new(symbols) {
            Ok(mask) => mask,
            Err(_) => panic!("character masks must be non-empty, ASCII, and at most 64 symbols"),
        }
    }

    /// Create a mask, reporting which invariant `symbols` violates.
    pub(crate) const fn try_new(symbols: &'static [u8]) -> Result<Self, GenerateError> {
        if symbols.is_empty() {
            return Err(GenerateError::EmptyMask);
        }
        if symbols.len() > MAX_MASK_LEN {
            return Err(GenerateError::MaskTooLarge {
                size: symbols.len(),
                limit: MAX_MASK_LEN,
            });
        }
        let mut index = 0;
        while index < symbols.len() {
            if !symbols[index].is_ascii() {
                return Err(GenerateError::NonAsciiSymbol {
                    index,
                    byte: symbols[index],
                });
            }
            index += 1;
        }
        Ok(Self { symbols })
    }

    /// The number of symbols in the mask.
    pub const fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; a constructed mask has at least one symbol.
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbols of the mask, in order.
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.symbols
    }

    /// The symbol at `index`, if there is one.
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied().map(char::from)
    }

    /// True iff `c` is one of the mask's symbols.
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.symbols.contains(&(c as u8))
    }
}

/// Uppercase letters A through Z.
pub const UPPERCASE: CharacterMask = CharacterMask::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");
/// Lowercase letters a through z.
pub const LOWERCASE: CharacterMask = CharacterMask::new(b"abcdefghijklmnopqrstuvwxyz");
/// The ten decimal digits.
pub const DIGITS: CharacterMask = CharacterMask::new(b"0123456789");

/// Lowercase letters, then uppercase letters, then digits.
pub const FULL: CharacterMask = CharacterMask::new(
    b"abcdefghijklmnopqrstuvwxyz\
      ABCDEFGHIJKLMNOPQRSTUVWXYZ\
      0123456789",
);
/// Lowercase letters, then uppercase letters.
pub const TEXT: CharacterMask = CharacterMask::new(
    b"abcdefghijklmnopqrstuvwxyz\
      ABCDEFGHIJKLMNOPQRSTUVWXYZ",
);
/// Digits only.
pub const SERIES: CharacterMask = DIGITS;

////////////////////////////////////////////// Variant /////////////////////////////////////////////

/// The four preset character classes a caller may ask for.
///
/// # Examples
///
/// ```
/// use randtext::{Variant, LOWERCASE};
///
/// let variant: Variant = "lower".parse().unwrap();
/// assert_eq!(Variant::Alpha { lower: true }, variant);
/// assert_eq!(LOWERCASE, variant.mask());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Mixed-case letters and digits.
    #[default]
    Full,
    /// Mixed-case letters.
    Text,
    /// Digits.
    Series,
    /// Letters of a single case.
    Alpha {
        /// Lowercase when true, uppercase otherwise.
        lower: bool,
    },
}

impl Variant {
    /// The mask this variant samples from.
    pub const fn mask(self) -> CharacterMask {
        match self {
            Variant::Full => FULL,
            Variant::Text => TEXT,
            Variant::Series => SERIES,
            Variant::Alpha { lower: true } => LOWERCASE,
            Variant::Alpha { lower: false } => UPPERCASE,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variant::Full => "full",
            Variant::Text => "text",
            Variant::Series => "series",
            Variant::Alpha { lower: true } => "lower",
            Variant::Alpha { lower: false } => "upper",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Variant::Full),
            "text" => Ok(Variant::Text),
            "series" => Ok(Variant::Series),
            "alpha" | "upper" => Ok(Variant::Alpha { lower: false }),
            "lower" => Ok(Variant::Alpha { lower: true }),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// The name given was not one of the preset character classes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownVariant(pub String);

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown character class {:?}\nSuggestion: Use one of full, text, series, alpha, upper, or lower", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
