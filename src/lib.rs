#![deny(missing_docs)]

//! randtext: quick random tokens drawn uniformly from a fixed alphabet.
//!
//! randtext produces strings of a requested length over one of four preset character classes:
//! mixed-case letters with digits, mixed-case letters, digits, or letters of a single case.  It
//! is meant for test fixtures and identifiers, not for secrets; nothing here is
//! cryptographically secure.
//!
//! # Core Concepts
//!
//! - **CharacterMask**: The ordered alphabet a string is drawn from
//! - **Variant**: One of the four preset character classes
//! - **RandomSource**: Anything that hands out 63 random bits at a time
//! - **Sampler**: Owns a source and turns requests into strings
//!
//! Each 63-bit draw is cut into ten 6-bit candidate indices.  Candidates that fall past the end
//! of the mask are discarded, so every symbol is equally likely while one draw serves up to ten
//! characters.
//!
//! # Example
//!
//! ```
//! let token = randtext::generate_alpha(5, false).unwrap();
//! assert_eq!(5, token.len());
//! assert!(token.chars().all(|c| c.is_ascii_uppercase()));
//!
//! assert!(randtext::generate_series(-1).is_err());
//! ```

mod errors;
mod mask;
mod sampler;
mod source;

pub use errors::GenerateError;
pub use mask::{
    CharacterMask, UnknownVariant, Variant, DIGITS, FULL, LOWERCASE, MAX_MASK_LEN, SERIES, TEXT,
    UPPERCASE,
};
pub use sampler::{sample, GenerationRequest, Sampler, IDX_BITS, IDX_MASK, IDX_MAX};
pub use source::{global, RandomSource, SharedSource};

/////////////////////////////////////////// Entry Points ///////////////////////////////////////////

/// Produce the string described by `request` from the process-wide source.
pub fn generate(request: &GenerationRequest) -> String {
    global().with(|rng| sample(rng, request.length(), &request.mask()))
}

/// A string of `length` lowercase letters, uppercase letters, and digits.
///
/// Fails with [GenerateError::InvalidLength] when `length` is negative.
pub fn generate_full(length: i64) -> Result<String, GenerateError> {
    Ok(generate(&GenerationRequest::new(length, Variant::Full)?))
}

/// A string of `length` lowercase and uppercase letters.
///
/// Fails with [GenerateError::InvalidLength] when `length` is negative.
pub fn generate_text(length: i64) -> Result<String, GenerateError> {
    Ok(generate(&GenerationRequest::new(length, Variant::Text)?))
}

/// A string of `length` digits.
///
/// Fails with [GenerateError::InvalidLength] when `length` is negative.
pub fn generate_series(length: i64) -> Result<String, GenerateError> {
    Ok(generate(&GenerationRequest::new(length, Variant::Series)?))
}

/// A string of `length` letters, lowercase if `lower` and uppercase otherwise.
///
/// Fails with [GenerateError::InvalidLength] when `length` is negative.
pub fn generate_alpha(length: i64, lower: bool) -> Result<String, GenerateError> {
    Ok(generate(&GenerationRequest::new(
        length,
        Variant::Alpha { lower },
    )?))
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
