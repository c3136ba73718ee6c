use rand::Rng;

/// Modulus shared by every function in the family.
///
/// The smallest prime above 2³². Each 32-bit half of a key word is then a
/// residue strictly below the modulus, and two distinct words differ in at
/// least one half, which makes the two-multiplier form universal over the
/// whole 64-bit word universe: a uniform draw collides on any fixed pair of
/// distinct words with probability at most `1 / (PRIME - 1)`. A modulus
/// below the word range would instead leave word pairs that collide under
/// every member of the family, and the retry loops would never terminate on
/// such a pair.
pub const PRIME: u64 = 4_294_967_311;

/// Integer types addressable by the hash family.
///
/// A key only needs to be a small `Copy` value with a stable mapping into a
/// machine word; the word is what gets hashed, and the original key is what
/// gets compared at query time. Implemented for all primitive integer types.
pub trait Key: Copy + Eq + Ord {
    /// Maps the key to the word fed to the hash function.
    ///
    /// Distinct keys of the same type must map to distinct words; the
    /// sign-extending integer cast satisfies this for every primitive.
    fn to_word(self) -> u64;
}

macro_rules! impl_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Key for $ty {
                #[inline(always)]
                fn to_word(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// One member of the universal family
/// `h(x) = (a₁·lo(x) + a₂·hi(x) + b) mod PRIME`, where `lo` and `hi` are
/// the two 32-bit halves of the key word.
///
/// A `UniversalHash` is a plain triple of parameters; it is pure and
/// deterministic once drawn, and two draws are independent. Equality of two
/// instances is meaningless — only the mapping matters — so none is derived.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// use fks_set::UniversalHash;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let h = UniversalHash::draw(&mut rng);
///
/// // Deterministic once drawn, and always within the table.
/// assert_eq!(h.position(42, 10), h.position(42, 10));
/// assert!(h.position(42, 10) < 10);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct UniversalHash {
    multiplier_lo: u64,
    multiplier_hi: u64,
    adder: u64,
}

impl UniversalHash {
    /// Draws a fresh function from the family.
    ///
    /// Both multipliers are uniform in `1..PRIME` and the adder uniform in
    /// `0..PRIME`, independently of every other draw. All entropy comes
    /// from the caller's generator, so seeded generators give reproducible
    /// draw sequences.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        Self {
            multiplier_lo: rng.random_range(1..PRIME),
            multiplier_hi: rng.random_range(1..PRIME),
            adder: rng.random_range(0..PRIME),
        }
    }

    /// Applies the function to a key word.
    ///
    /// The products are formed in `u128`; `word` may be any 64-bit value
    /// without overflow.
    #[inline(always)]
    pub fn apply(&self, word: u64) -> u64 {
        let lo = (word & 0xFFFF_FFFF) as u128;
        let hi = (word >> 32) as u128;
        let widened =
            lo * self.multiplier_lo as u128 + hi * self.multiplier_hi as u128 + self.adder as u128;
        (widened % PRIME as u128) as u64
    }

    /// Reduces the hash of `word` into a table of `table_size` slots.
    ///
    /// `table_size` must be non-zero; callers handle empty tables before
    /// computing any position.
    #[inline(always)]
    pub fn position(&self, word: u64, table_size: usize) -> usize {
        debug_assert!(table_size != 0);
        (self.apply(word) % table_size as u64) as usize
    }
}
