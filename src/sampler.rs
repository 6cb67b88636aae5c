//! Bit-packed rejection sampling of random strings.
//!
//! A single 63-bit draw is sliced into [IDX_MAX] chunks of [IDX_BITS] bits.  Each chunk is a
//! candidate index into the mask; chunks that land past the end of the mask are thrown away
//! rather than folded back in, which keeps every symbol equally likely no matter the mask size.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::mask::{CharacterMask, Variant, MAX_MASK_LEN};
use crate::source::RandomSource;
use crate::GenerateError;

/// Bits per candidate index.
pub const IDX_BITS: u32 = 6;
/// Selects the low [IDX_BITS] bits of a draw.
pub const IDX_MASK: u64 = (1 << IDX_BITS) - 1;
/// Candidate indices carried by one 63-bit draw.
pub const IDX_MAX: u32 = 63 / IDX_BITS;

const _: () = assert!(IDX_BITS * IDX_MAX <= 63);
const _: () = assert!(MAX_MASK_LEN as u64 == IDX_MASK + 1);

////////////////////////////////////////////// sample //////////////////////////////////////////////

/// Fill a string of exactly `length` symbols drawn uniformly from `mask`.
///
/// Positions are filled from last to first.  A zero length returns without drawing.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use randtext::{sample, UPPERCASE};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let s = sample(&mut rng, 5, &UPPERCASE);
/// assert_eq!(s.len(), 5);
/// assert!(s.chars().all(|c| c.is_ascii_uppercase()));
/// ```
pub fn sample<R: RandomSource + ?Sized>(rng: &mut R, length: usize, mask: &CharacterMask) -> String {
    if length == 0 {
        return String::new();
    }
    let symbols = mask.as_bytes();
    let mut buf = vec![0u8; length];
    let mut cache = rng.next_u63();
    let mut remain = IDX_MAX;
    let mut pos = length;
    while pos > 0 {
        if remain == 0 {
            cache = rng.next_u63();
            remain = IDX_MAX;
        }
        if let Some(&symbol) = symbols.get((cache & IDX_MASK) as usize) {
            pos -= 1;
            buf[pos] = symbol;
        }
        cache >>= IDX_BITS;
        remain -= 1;
    }
    buf.into_iter().map(char::from).collect()
}

///////////////////////////////////////// GenerationRequest ////////////////////////////////////////

/// A validated request for one random string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GenerationRequest {
    length: usize,
    variant: Variant,
}

impl GenerationRequest {
    /// Validate a request.  Negative lengths are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use randtext::{GenerateError, GenerationRequest, Variant};
    ///
    /// assert!(GenerationRequest::new(8, Variant::Series).is_ok());
    /// assert_eq!(
    ///     Err(GenerateError::InvalidLength { length: -1 }),
    ///     GenerationRequest::new(-1, Variant::Series),
    /// );
    /// ```
    pub fn new(length: i64, variant: Variant) -> Result<Self, GenerateError> {
        let length = usize::try_from(length).map_err(|_| GenerateError::invalid_length(length))?;
        Ok(Self { length, variant })
    }

    /// The number of characters requested.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The character class requested.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The mask the string will be drawn from.
    pub fn mask(&self) -> CharacterMask {
        self.variant.mask()
    }
}

////////////////////////////////////////////// Sampler /////////////////////////////////////////////

/// A random string generator that owns its source of randomness.
///
/// Use this over the crate-level functions to control seeding or to avoid contending on the
/// process-wide source.
///
/// # Examples
///
/// ```
/// use randtext::Sampler;
///
/// let mut sampler = Sampler::seeded(42);
/// let token = sampler.full(16).unwrap();
/// assert_eq!(16, token.len());
/// assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[derive(Clone, Debug)]
pub struct Sampler<R> {
    rng: R,
}

impl Sampler<StdRng> {
    /// A sampler over a [StdRng] seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Sampler<R> {
    /// A sampler drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produce the string described by `request`.
    pub fn generate(&mut self, request: &GenerationRequest) -> String {
        sample(&mut self.rng, request.length(), &request.mask())
    }

    /// Mixed-case letters and digits.
    pub fn full(&mut self, length: i64) -> Result<String, GenerateError> {
        self.variant(length, Variant::Full)
    }

    /// Mixed-case letters.
    pub fn text(&mut self, length: i64) -> Result<String, GenerateError> {
        self.variant(length, Variant::Text)
    }

    /// Digits.
    pub fn series(&mut self, length: i64) -> Result<String, GenerateError> {
        self.variant(length, Variant::Series)
    }

    /// Lowercase letters if `lower`, otherwise uppercase letters.
    pub fn alpha(&mut self, length: i64, lower: bool) -> Result<String, GenerateError> {
        self.variant(length, Variant::Alpha { lower })
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.rng
    }

    fn variant(&mut self, length: i64, variant: Variant) -> Result<String, GenerateError> {
        let request = GenerationRequest::new(length, variant)?;
        Ok(self.generate(&request))
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{DIGITS, FULL, LOWERCASE, TEXT, UPPERCASE};

    /// Replays a fixed list of draws and panics if asked for more.
    struct Scripted {
        draws: Vec<u64>,
        used: usize,
    }

    impl Scripted {
        fn new(draws: &[u64]) -> Self {
            Self {
                draws: draws.to_vec(),
                used: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_u63(&mut self) -> u64 {
            let draw = self.draws[self.used];
            self.used += 1;
            draw
        }
    }

    /// Counts draws taken from a seeded generator.
    struct Counting {
        rng: StdRng,
        draws: usize,
    }

    impl RandomSource for Counting {
        fn next_u63(&mut self) -> u64 {
            self.draws += 1;
            self.rng.next_u63()
        }
    }

    /// Pack index chunks into one draw, first chunk in the low bits.
    fn chunks(indices: &[u64]) -> u64 {
        indices
            .iter()
            .rev()
            .fold(0, |draw, index| (draw << IDX_BITS) | index)
    }

    fn chi_square(variant: Variant, samples: usize, seed: u64) -> f64 {
        let mask = variant.mask();
        let request = GenerationRequest::new(1, variant).unwrap();
        let mut sampler = Sampler::seeded(seed);
        let mut counts = vec![0usize; mask.len()];
        for _ in 0..samples {
            let s = sampler.generate(&request);
            let c = s.as_bytes()[0];
            let index = mask.as_bytes().iter().position(|b| *b == c).unwrap();
            counts[index] += 1;
        }
        let expected = samples as f64 / mask.len() as f64;
        counts
            .iter()
            .map(|observed| {
                let delta = *observed as f64 - expected;
                delta * delta / expected
            })
            .sum()
    }

    #[test]
    fn constants() {
        assert_eq!(6, IDX_BITS);
        assert_eq!(63, IDX_MASK);
        assert_eq!(10, IDX_MAX);
    }

    #[test]
    fn fills_last_position_first() {
        let mut rng = Scripted::new(&[chunks(&[2, 5])]);
        assert_eq!("52", sample(&mut rng, 2, &DIGITS));
        assert_eq!(1, rng.used);
    }

    #[test]
    fn out_of_range_chunks_are_rejected() {
        let mut rng = Scripted::new(&[chunks(&[63, 10, 2, 11, 5])]);
        assert_eq!("52", sample(&mut rng, 2, &DIGITS));
    }

    #[test]
    fn budget_refills_after_ten_chunks() {
        // Every chunk of the first draw is out of range; its three spare high bits are never read.
        let mut rng = Scripted::new(&[(1 << 63) - 1, 0]);
        assert_eq!("0", sample(&mut rng, 1, &DIGITS));
        assert_eq!(2, rng.used);
    }

    #[test]
    fn ten_symbols_per_draw() {
        let mut rng = Scripted::new(&[chunks(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]), chunks(&[61])]);
        assert_eq!("9jihgfedcba", sample(&mut rng, 11, &FULL));
        assert_eq!(2, rng.used);
    }

    #[test]
    fn zero_length_draws_nothing() {
        let mut rng = Scripted::new(&[]);
        for mask in [FULL, TEXT, DIGITS, UPPERCASE, LOWERCASE] {
            assert_eq!("", sample(&mut rng, 0, &mask));
        }
        assert_eq!(0, rng.used);
    }

    #[test]
    fn draws_are_amortized() {
        let mut rng = Counting {
            rng: StdRng::seed_from_u64(11),
            draws: 0,
        };
        let s = sample(&mut rng, 1_000, &FULL);
        assert_eq!(1_000, s.len());
        // 62 of 64 chunks are accepted; 1000 symbols need at least 100 draws.
        assert!(rng.draws >= 100);
        assert!(rng.draws < 150, "took {} draws", rng.draws);
    }

    #[test]
    fn length_and_membership() {
        let mut sampler = Sampler::seeded(3);
        for length in [0i64, 1, 2, 9, 10, 11, 63, 64, 257] {
            let expected = length as usize;
            let s = sampler.full(length).unwrap();
            assert_eq!(expected, s.len());
            assert!(s.chars().all(|c| FULL.contains(c)));
            let s = sampler.text(length).unwrap();
            assert_eq!(expected, s.len());
            assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
            let s = sampler.series(length).unwrap();
            assert_eq!(expected, s.len());
            assert!(s.chars().all(|c| c.is_ascii_digit()));
            let s = sampler.alpha(length, true).unwrap();
            assert_eq!(expected, s.len());
            assert!(s.chars().all(|c| c.is_ascii_lowercase()));
            let s = sampler.alpha(length, false).unwrap();
            assert_eq!(expected, s.len());
            assert!(s.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn uppercase_alpha_of_five() {
        let mut sampler = Sampler::seeded(5);
        for _ in 0..1_000 {
            let s = sampler.alpha(5, false).unwrap();
            assert_eq!(5, s.chars().count());
            assert!(s.chars().all(|c| UPPERCASE.contains(c)));
        }
    }

    #[test]
    fn series_of_eight() {
        let mut sampler = Sampler::seeded(8);
        for _ in 0..1_000 {
            let s = sampler.series(8).unwrap();
            assert_eq!(8, s.len());
            assert!(s.chars().all(|c| DIGITS.contains(c)));
        }
    }

    #[test]
    fn every_digit_appears() {
        let mut sampler = Sampler::seeded(4);
        let s = sampler.series(1_000).unwrap();
        for digit in '0'..='9' {
            assert!(s.contains(digit), "missing {digit}");
        }
    }

    #[test]
    fn negative_length_is_an_error() {
        let mut sampler = Sampler::seeded(0);
        let err = GenerateError::InvalidLength { length: -1 };
        assert_eq!(Err(err), sampler.full(-1));
        assert_eq!(Err(err), sampler.text(-1));
        assert_eq!(Err(err), sampler.series(-1));
        assert_eq!(Err(err), sampler.alpha(-1, true));
        assert_eq!(
            Err(GenerateError::InvalidLength { length: i64::MIN }),
            sampler.series(i64::MIN)
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn large_lengths_are_valid_requests() {
        // Only negative lengths are rejected on 64-bit targets; the size is left to the allocator.
        let request = GenerationRequest::new(i64::MAX, Variant::Series).unwrap();
        assert_eq!(i64::MAX as usize, request.length());
    }

    #[test]
    fn negative_length_draws_nothing() {
        let mut sampler = Sampler::new(Scripted::new(&[]));
        assert!(sampler.full(-5).is_err());
        assert_eq!(0, sampler.into_inner().used);
    }

    #[test]
    fn seeded_samplers_agree() {
        let mut a = Sampler::seeded(99);
        let mut b = Sampler::seeded(99);
        for _ in 0..32 {
            assert_eq!(a.full(24).unwrap(), b.full(24).unwrap());
        }
    }

    #[test]
    fn request_accessors() {
        let request = GenerationRequest::new(12, Variant::Alpha { lower: true }).unwrap();
        assert_eq!(12, request.length());
        assert_eq!(Variant::Alpha { lower: true }, request.variant());
        assert_eq!(LOWERCASE, request.mask());
    }

    #[test]
    fn uniform_over_full() {
        // 61 degrees of freedom; the 0.1% critical value is about 100.9.
        let statistic = chi_square(Variant::Full, 100_000, 0x5eed);
        assert!(statistic < 110.0, "chi-square {statistic}");
    }

    #[test]
    fn uniform_over_lowercase() {
        // 25 degrees of freedom; the 0.1% critical value is about 52.6.
        let statistic = chi_square(Variant::Alpha { lower: true }, 100_000, 0x1ce);
        assert!(statistic < 56.0, "chi-square {statistic}");
    }

    #[test]
    fn uniform_over_digits() {
        // 9 degrees of freedom; the 0.1% critical value is about 27.9.
        let statistic = chi_square(Variant::Series, 100_000, 0xd1);
        assert!(statistic < 30.0, "chi-square {statistic}");
    }
}
