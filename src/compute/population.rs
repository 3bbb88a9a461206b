//! Fixed-size population arenas.
//!
//! One contiguous symbol buffer holds every candidate of a generation, and
//! a parallel vector holds their generation tags. The engine keeps two of
//! these and exchanges them after reproduction.

use super::cell::{Cell, CellView, MutationRate};
use super::rng::SymbolRng;

/// Arena holding `size` candidates of `cell_length` symbols each.
#[derive(Debug, Clone)]
pub struct Population {
    symbols: Vec<u8>,
    generations: Vec<u32>,
    cell_length: usize,
    mutation_rate: MutationRate,
}

impl Population {
    /// Allocate an arena. Returns `None` if the total size overflows or the
    /// allocation cannot be satisfied.
    pub fn new(
        size: usize,
        cell_length: usize,
        generation: u32,
        mutation_rate: MutationRate,
    ) -> Option<Self> {
        let total = size.checked_mul(cell_length)?;

        let mut symbols = Vec::new();
        symbols.try_reserve_exact(total).ok()?;
        symbols.resize(total, b' ');

        let mut generations = Vec::new();
        generations.try_reserve_exact(size).ok()?;
        generations.resize(size, generation);

        Some(Self {
            symbols,
            generations,
            cell_length,
            mutation_rate,
        })
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Symbols per candidate.
    pub fn cell_length(&self) -> usize {
        self.cell_length
    }

    pub fn mutation_rate(&self) -> MutationRate {
        self.mutation_rate
    }

    fn span(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.cell_length;
        start..start + self.cell_length
    }

    /// Read-only view of candidate `index`.
    pub fn view(&self, index: usize) -> CellView<'_> {
        CellView::new(&self.symbols[self.span(index)], self.generations[index])
    }

    /// Writable cell over slot `index`, keeping its current generation tag.
    pub fn cell_mut(&mut self, index: usize) -> Cell<'_> {
        let span = self.span(index);
        let generation = self.generations[index];
        Cell::assign(
            &mut self.symbols[span],
            &mut self.generations[index],
            generation,
            self.mutation_rate,
        )
    }

    /// Iterate over all candidates in index order.
    pub fn iter(&self) -> impl Iterator<Item = CellView<'_>> {
        self.symbols
            .chunks_exact(self.cell_length.max(1))
            .zip(&self.generations)
            .map(|(symbols, &generation)| CellView::new(symbols, generation))
    }

    /// Re-tag every candidate with `generation` and randomize it.
    pub fn reset(&mut self, generation: u32, rng: &mut SymbolRng) {
        let mutation_rate = self.mutation_rate;
        for (symbols, slot) in self
            .symbols
            .chunks_exact_mut(self.cell_length.max(1))
            .zip(self.generations.iter_mut())
        {
            Cell::assign(symbols, slot, generation, mutation_rate).randomize(rng);
        }
    }

    /// Mutate every candidate in place.
    pub fn mutate_all(&mut self, rng: &mut SymbolRng) {
        for index in 0..self.len() {
            self.cell_mut(index).mutate(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(r: f32) -> MutationRate {
        MutationRate::new(r).unwrap()
    }

    #[test]
    fn test_population_layout() {
        let population = Population::new(4, 3, 1, rate(0.01)).unwrap();
        assert_eq!(population.len(), 4);
        assert_eq!(population.cell_length(), 3);
        assert!(population.iter().all(|c| c.len() == 3 && c.generation() == 1));
        assert_eq!(population.iter().count(), 4);
    }

    #[test]
    fn test_cells_do_not_overlap() {
        let mut population = Population::new(3, 2, 1, rate(0.0)).unwrap();
        population.cell_mut(1).crossover(
            CellView::new(b"xy", 5),
            CellView::new(b"xy", 5),
            &mut SymbolRng::new(0),
        )
        .unwrap();

        assert_eq!(population.view(0).symbols(), b"  ");
        assert_eq!(population.view(1).symbols(), b"xy");
        assert_eq!(population.view(1).generation(), 6);
        assert_eq!(population.view(2).symbols(), b"  ");
        assert_eq!(population.view(2).generation(), 1);
    }

    #[test]
    fn test_randomize_fills_every_cell() {
        let mut rng = SymbolRng::new(17);
        let mut population = Population::new(50, 8, 1, rate(0.0)).unwrap();
        population.reset(1, &mut rng);

        let distinct: std::collections::HashSet<&[u8]> =
            population.iter().map(|c| c.symbols()).collect();
        assert!(distinct.len() > 45);
    }

    #[test]
    fn test_reset_retags_generation() {
        let mut rng = SymbolRng::new(3);
        let mut population = Population::new(5, 4, 9, rate(0.0)).unwrap();
        population.reset(1, &mut rng);
        assert!(population.iter().all(|c| c.generation() == 1));
        assert!(population.iter().any(|c| c.symbols() != b"    "));
    }

    #[test]
    fn test_overflowing_size_is_rejected() {
        assert!(Population::new(usize::MAX, 2, 1, rate(0.0)).is_none());
    }
}
