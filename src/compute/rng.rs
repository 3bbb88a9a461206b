//! Seedable random source shared by every stochastic operation.

use rand::prelude::*;

/// Lowest printable ASCII symbol (space).
pub const PRINTABLE_MIN: u8 = b' ';
/// Highest printable ASCII symbol (tilde).
pub const PRINTABLE_MAX: u8 = b'~';
/// Number of distinct printable symbols.
pub const PRINTABLE_COUNT: usize = (PRINTABLE_MAX - PRINTABLE_MIN) as usize + 1;

/// Number of discrete steps used for the mutation probability test.
pub const MUTATION_GRANULARITY: u32 = 1024;

/// Returns true if `symbol` lies in the printable ASCII range.
#[inline]
pub fn is_printable(symbol: u8) -> bool {
    (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&symbol)
}

/// Random number generator wrapper for symbol operations.
pub struct SymbolRng {
    rng: StdRng,
}

impl SymbolRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniformly drawn printable ASCII symbol.
    #[inline]
    pub fn symbol(&mut self) -> u8 {
        self.rng.gen_range(PRINTABLE_MIN..=PRINTABLE_MAX)
    }

    /// Fair coin flip.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.rng.r#gen()
    }

    /// Uniform integer in `0..MUTATION_GRANULARITY`.
    #[inline]
    pub fn mutation_roll(&mut self) -> u32 {
        self.rng.gen_range(0..MUTATION_GRANULARITY)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
