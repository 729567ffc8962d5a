/// Demo tab list generation.
///
/// Labels repeat freely; the tab index is the identity, not the label.

use rand::Rng;

/// Upper bound (exclusive) on the number of generated tabs
pub const MAX_DEMO_TABS: usize = 100;

/// Pick a random tab count in `0..MAX_DEMO_TABS`.
pub fn random_tab_count(rng: &mut impl Rng) -> usize {
    rng.random_range(0..MAX_DEMO_TABS)
}

/// Generate `count` labels of the form `"{index}_tab..."` with one to five repeats of `tab`.
pub fn demo_labels(count: usize, rng: &mut impl Rng) -> Vec<String> {
    (0..count)
        .map(|index| format!("{}_{}", index, "tab".repeat(rng.random_range(1..=5))))
        .collect()
}
