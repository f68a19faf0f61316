use std::collections::BTreeSet;

use itertools::Itertools;

/// Indices where `typed` and `target` disagree, scanning only their common length.
pub fn mismatch_positions(typed: &str, target: &str) -> BTreeSet<usize> {
    typed
        .chars()
        .zip(target.chars())
        .positions(|(t, e)| t != e)
        .collect()
}

/// Share of typed characters that match the target at the same index,
/// floored to a whole percent. Nothing typed means zero accuracy.
pub fn accuracy_percent(typed: &str, target: &str) -> u8 {
    let typed_len = typed.chars().count();
    if typed_len == 0 {
        return 0;
    }

    let correct = typed
        .chars()
        .zip(target.chars())
        .filter(|(t, e)| t == e)
        .count();

    ((correct * 100) / typed_len) as u8
}

/// Words in the typed text, split on single spaces after trimming.
/// Empty text still counts as one word.
pub fn word_count(typed: &str) -> usize {
    typed.trim().split(' ').count()
}

/// Rounded words per minute, or zero when no time has passed.
pub fn words_per_minute(words: usize, elapsed_millis: i64) -> u32 {
    if elapsed_millis <= 0 {
        return 0;
    }

    let elapsed_secs = elapsed_millis as f64 / 1000.0;
    ((words as f64 / elapsed_secs) * 60.0).round() as u32
}
