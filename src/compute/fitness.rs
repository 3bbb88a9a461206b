//! Positional match scoring against the target phrase.

/// Number of positions where `symbols` and `target` agree.
///
/// Scores range over `0..=target.len()` for equal-length inputs.
#[inline]
pub fn score(symbols: &[u8], target: &[u8]) -> usize {
    symbols
        .iter()
        .zip(target)
        .filter(|(s, t)| s == t)
        .count()
}

/// Per-position match flags, for rendering.
pub fn match_mask(symbols: &[u8], target: &[u8]) -> Vec<bool> {
    symbols.iter().zip(target).map(|(s, t)| s == t).collect()
}

/// Mean of a fitness slice, 0 for an empty slice.
pub fn average(fitness: &[usize]) -> f32 {
    if fitness.is_empty() {
        return 0.0;
    }
    fitness.iter().sum::<usize>() as f32 / fitness.len() as f32
}
