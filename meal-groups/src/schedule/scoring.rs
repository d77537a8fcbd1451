/// Weight of the total deviation relative to the spread.
pub const DEVIATION_WEIGHT: usize = 10;

/// Sum of |size - target| over all slots.
pub fn deviation(sizes: &[usize], targets: &[usize]) -> usize {
    sizes
        .iter()
        .zip(targets)
        .map(|(&size, &target)| size.abs_diff(target))
        .sum()
}

/// Largest minus smallest slot size.
pub fn spread(sizes: &[usize]) -> usize {
    match (sizes.iter().max(), sizes.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

/// Lower is better. Deviation dominates; spread breaks ties.
pub fn score(sizes: &[usize], targets: &[usize]) -> usize {
    DEVIATION_WEIGHT * deviation(sizes, targets) + spread(sizes)
}

/// Good enough to stop searching.
pub fn is_balanced(sizes: &[usize], targets: &[usize]) -> bool {
    deviation(sizes, targets) == 0 && spread(sizes) <= 1
}
