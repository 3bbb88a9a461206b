//! Candidate solutions: fixed-length symbol sequences with a generation tag.
//!
//! A [`Cell`] never owns its memory. Its symbols live in a
//! [`Population`](super::Population) arena and the cell is a mutable view
//! over one slot of it, so producing a new generation only rewrites
//! existing buffers.

use super::rng::{MUTATION_GRANULARITY, SymbolRng};

/// Per-symbol mutation probability, validated to lie in `[0, 1]`.
///
/// The probability is stored as a threshold out of
/// [`MUTATION_GRANULARITY`] steps, which keeps the rounding error below
/// 0.1%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRate {
    rate: f32,
    threshold: u32,
}

impl MutationRate {
    /// Validate and convert a probability.
    pub fn new(rate: f32) -> Result<Self, CellError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(CellError::InvalidMutationRate(rate));
        }

        // An integer roll r satisfies r < rate * G exactly when r < ceil(rate * G).
        let threshold = (rate * MUTATION_GRANULARITY as f32).ceil() as u32;

        Ok(Self {
            rate,
            threshold: threshold.min(MUTATION_GRANULARITY),
        })
    }

    /// The probability this rate was created from.
    pub fn get(&self) -> f32 {
        self.rate
    }

    /// Probability actually applied after quantization.
    pub fn effective(&self) -> f32 {
        self.threshold as f32 / MUTATION_GRANULARITY as f32
    }

    #[inline]
    fn hit(&self, rng: &mut SymbolRng) -> bool {
        rng.mutation_roll() < self.threshold
    }
}

/// Read-only view of a candidate, used for parents and reporting.
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    symbols: &'a [u8],
    generation: u32,
}

impl<'a> CellView<'a> {
    pub fn new(symbols: &'a [u8], generation: u32) -> Self {
        Self {
            symbols,
            generation,
        }
    }

    pub fn symbols(&self) -> &'a [u8] {
        self.symbols
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A candidate bound to a buffer slot it may write but does not own.
#[derive(Debug)]
pub struct Cell<'a> {
    symbols: &'a mut [u8],
    generation: &'a mut u32,
    mutation_rate: MutationRate,
}

impl<'a> Cell<'a> {
    /// Bind a cell to its symbol buffer and generation slot.
    ///
    /// The slot's current generation value is overwritten with `generation`.
    pub fn assign(
        symbols: &'a mut [u8],
        generation_slot: &'a mut u32,
        generation: u32,
        mutation_rate: MutationRate,
    ) -> Self {
        *generation_slot = generation;
        Self {
            symbols,
            generation: generation_slot,
            mutation_rate,
        }
    }

    pub fn symbols(&self) -> &[u8] {
        &*self.symbols
    }

    pub fn generation(&self) -> u32 {
        *self.generation
    }

    pub fn mutation_rate(&self) -> MutationRate {
        self.mutation_rate
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> CellView<'_> {
        CellView::new(&*self.symbols, *self.generation)
    }

    /// Fill every position with a uniformly drawn printable symbol.
    pub fn randomize(&mut self, rng: &mut SymbolRng) {
        for symbol in self.symbols.iter_mut() {
            *symbol = rng.symbol();
        }
    }

    /// Resample each position independently with the cell's mutation rate.
    pub fn mutate(&mut self, rng: &mut SymbolRng) {
        let rate = self.mutation_rate;
        for symbol in self.symbols.iter_mut() {
            if rate.hit(rng) {
                *symbol = rng.symbol();
            }
        }
    }

    /// Overwrite this cell with a uniform crossover of two parents.
    ///
    /// Each position is taken from either parent with equal probability.
    /// The generation becomes `parent_a.generation() + 1`.
    pub fn crossover(
        &mut self,
        parent_a: CellView<'_>,
        parent_b: CellView<'_>,
        rng: &mut SymbolRng,
    ) -> Result<(), CellError> {
        if parent_a.len() != parent_b.len() || parent_a.len() != self.len() {
            return Err(CellError::LengthMismatch {
                parent_a: parent_a.len(),
                parent_b: parent_b.len(),
                child: self.len(),
            });
        }

        for ((child, &a), &b) in self
            .symbols
            .iter_mut()
            .zip(parent_a.symbols)
            .zip(parent_b.symbols)
        {
            *child = if rng.coin() { a } else { b };
        }

        *self.generation = parent_a.generation + 1;
        Ok(())
    }
}

/// Candidate precondition violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CellError {
    #[error("Mutation rate {0} is outside [0, 1]")]
    InvalidMutationRate(f32),
    #[error("Crossover length mismatch: parents {parent_a} and {parent_b}, child {child}")]
    LengthMismatch {
        parent_a: usize,
        parent_b: usize,
        child: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::rng::is_printable;
    use proptest::prelude::*;

    fn rate(r: f32) -> MutationRate {
        MutationRate::new(r).unwrap()
    }

    #[test]
    fn test_mutation_rate_bounds() {
        assert!(MutationRate::new(0.0).is_ok());
        assert!(MutationRate::new(1.0).is_ok());
        assert_eq!(
            MutationRate::new(1.5),
            Err(CellError::InvalidMutationRate(1.5))
        );
        assert!(MutationRate::new(-0.01).is_err());
        assert!(MutationRate::new(f32::NAN).is_err());
    }

    #[test]
    fn test_mutation_rate_quantization() {
        for r in [0.0, 0.001, 0.01, 0.05, 0.3, 0.5, 0.999, 1.0] {
            assert!((rate(r).effective() - r).abs() <= 1.0 / MUTATION_GRANULARITY as f32);
        }
        assert_eq!(rate(1.0).effective(), 1.0);
        assert_eq!(rate(0.0).effective(), 0.0);
    }

    #[test]
    fn test_assign_sets_generation() {
        let mut symbols = vec![b'a'; 4];
        let mut slot = 0;
        let cell = Cell::assign(&mut symbols, &mut slot, 3, rate(0.1));
        assert_eq!(cell.generation(), 3);
        assert_eq!(cell.len(), 4);
    }

    #[test]
    fn test_randomize_is_printable() {
        let mut rng = SymbolRng::new(1);
        let mut symbols = vec![0u8; 256];
        let mut slot = 0;
        let mut cell = Cell::assign(&mut symbols, &mut slot, 1, rate(0.0));
        cell.randomize(&mut rng);
        assert!(cell.symbols().iter().all(|&s| is_printable(s)));
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = SymbolRng::new(2);
        let mut symbols = b"unchanged".to_vec();
        let mut slot = 0;
        let mut cell = Cell::assign(&mut symbols, &mut slot, 1, rate(0.0));
        for _ in 0..100 {
            cell.mutate(&mut rng);
        }
        assert_eq!(cell.symbols(), b"unchanged");
    }

    #[test]
    fn test_mutation_frequency_matches_rate() {
        // A resampled symbol equals the old one 1 time in 95.
        let keep_same = 1.0 / crate::compute::rng::PRINTABLE_COUNT as f64;
        let mut rng = SymbolRng::new(42);

        for r in [0.01f32, 0.1, 0.5, 0.9] {
            let trials = 200;
            let length = 1000;
            let mut changed = 0usize;

            let mut symbols = vec![0u8; length];
            let mut slot = 0;
            let mut cell = Cell::assign(&mut symbols, &mut slot, 1, rate(r));
            for _ in 0..trials {
                cell.randomize(&mut rng);
                let before = cell.symbols().to_vec();
                cell.mutate(&mut rng);
                changed += before
                    .iter()
                    .zip(cell.symbols())
                    .filter(|(a, b)| a != b)
                    .count();
            }

            let observed = changed as f64 / (trials * length) as f64;
            let expected = r as f64 * (1.0 - keep_same);
            assert!(
                (observed - expected).abs() < 0.01,
                "rate {}: observed {}, expected {}",
                r,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_crossover_generation_follows_parent_a() {
        let mut rng = SymbolRng::new(5);
        let a = b"aaaa";
        let b = b"bbbb";
        let mut child = vec![0u8; 4];
        let mut slot = 0;
        let mut cell = Cell::assign(&mut child, &mut slot, 0, rate(0.0));

        cell.crossover(CellView::new(a, 7), CellView::new(b, 2), &mut rng)
            .unwrap();
        assert_eq!(cell.generation(), 8);

        cell.crossover(CellView::new(b, 2), CellView::new(a, 7), &mut rng)
            .unwrap();
        assert_eq!(cell.generation(), 3);
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let mut rng = SymbolRng::new(5);
        let mut child = vec![0u8; 3];
        let mut slot = 0;
        let mut cell = Cell::assign(&mut child, &mut slot, 0, rate(0.0));

        let err = cell
            .crossover(CellView::new(b"abc", 1), CellView::new(b"ab", 1), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            CellError::LengthMismatch {
                parent_a: 3,
                parent_b: 2,
                child: 3
            }
        );
        assert_eq!(cell.generation(), 0);
    }

    #[test]
    fn test_crossover_side_frequency() {
        let mut rng = SymbolRng::new(9);
        let length = 100_000;
        let a = vec![b'A'; length];
        let b = vec![b'B'; length];
        let mut child = vec![0u8; length];
        let mut slot = 0;
        let mut cell = Cell::assign(&mut child, &mut slot, 0, rate(0.0));

        cell.crossover(CellView::new(&a, 1), CellView::new(&b, 1), &mut rng)
            .unwrap();
        let from_a = cell.symbols().iter().filter(|&&s| s == b'A').count();
        let ratio = from_a as f64 / length as f64;
        assert!((ratio - 0.5).abs() < 0.01, "ratio {}", ratio);
    }

    proptest! {
        #[test]
        fn prop_crossover_picks_from_parents(
            pair in (1usize..64).prop_flat_map(|len| (
                proptest::collection::vec(32u8..=126, len),
                proptest::collection::vec(32u8..=126, len),
            )),
            seed in any::<u64>(),
        ) {
            let (a, b) = pair;
            let mut rng = SymbolRng::new(seed);
            let mut child = vec![0u8; a.len()];
            let mut slot = 0;
            let mut cell = Cell::assign(&mut child, &mut slot, 0, rate(0.0));
            cell.crossover(CellView::new(&a, 4), CellView::new(&b, 9), &mut rng).unwrap();

            for (i, &s) in cell.symbols().iter().enumerate() {
                prop_assert!(s == a[i] || s == b[i]);
            }
            prop_assert_eq!(cell.generation(), 5);
        }

        #[test]
        fn prop_mutation_keeps_printable(
            start in proptest::collection::vec(32u8..=126, 1..64),
            r in 0.0f32..=1.0,
            seed in any::<u64>(),
        ) {
            let mut rng = SymbolRng::new(seed);
            let mut symbols = start.clone();
            let mut slot = 0;
            let mut cell = Cell::assign(&mut symbols, &mut slot, 1, rate(r));
            cell.mutate(&mut rng);
            prop_assert_eq!(cell.len(), start.len());
            prop_assert!(cell.symbols().iter().all(|&s| is_printable(s)));
        }
    }
}
