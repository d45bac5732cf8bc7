use std::time::Duration;

/// Standard fixed-width word used for wpm
pub const CHARS_PER_WORD: f64 = 5.0;

/// Percentage of typed chars that match the target at the same index,
/// rounded half away from zero. Empty input counts as 100.
pub fn accuracy_percent(typed: &[char], target: &[char]) -> u32 {
    if typed.is_empty() {
        return 100;
    }

    let correct = typed
        .iter()
        .enumerate()
        .filter(|&(idx, c)| target.get(idx) == Some(c))
        .count();

    ((correct as f64 / typed.len() as f64) * 100.0).round() as u32
}

/// Words per minute for `typed_len` chars over `elapsed`. Anything that
/// would not be a finite number yields 0.
pub fn words_per_minute(typed_len: usize, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= f64::EPSILON {
        return 0;
    }

    let wpm = (typed_len as f64 / CHARS_PER_WORD) / minutes;
    if wpm.is_finite() {
        wpm.round() as u32
    } else {
        0
    }
}

/// Share of the target passed by the matched cursor, 0..=100
pub fn progress_percent(matched: usize, target_len: usize) -> u32 {
    match target_len {
        0 => 0,
        len => ((matched.min(len) as f64 / len as f64) * 100.0).round() as u32,
    }
}
