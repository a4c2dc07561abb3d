/// Standard word length used for WPM
pub const CHARS_PER_WORD: f64 = 5.0;

/// Floor applied to elapsed time so near-instant completion never divides by zero
pub const MIN_SECONDS: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub seconds: f64,
    pub correct_chars: usize,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 0,
            seconds: MIN_SECONDS,
            correct_chars: 0,
        }
    }
}

/// Positional matches over the overlapping prefix of `typed` and `target`
pub fn correct_chars(target: &str, typed: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .filter(|(t, e)| t == e)
        .count()
}

pub fn wpm(correct_chars: usize, seconds: f64) -> u32 {
    let minutes = seconds / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

pub fn accuracy(correct_chars: usize, typed_chars: usize) -> u32 {
    if typed_chars == 0 {
        return 0;
    }
    ((correct_chars as f64 / typed_chars as f64) * 100.0).round() as u32
}

/// Derive WPM and accuracy for a session snapshot.
///
/// Used for both live readouts and final scoring, so it must stay a pure
/// function of its arguments.
pub fn compute(target: &str, typed: &str, elapsed_ms: u64) -> Metrics {
    let correct = correct_chars(target, typed);
    let seconds = (elapsed_ms as f64 / 1000.0).max(MIN_SECONDS);

    Metrics {
        wpm: wpm(correct, seconds),
        accuracy: accuracy(correct, typed.chars().count()),
        seconds,
        correct_chars: correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_copy_of_one_word_in_a_minute() {
        let m = compute("cat", "cat", 60_000);
        assert_eq!(m.correct_chars, 3);
        assert_eq!(m.seconds, 60.0);
        assert_eq!(m.wpm, 1);
        assert_eq!(m.accuracy, 100);
    }

    #[test]
    fn test_single_mismatch_in_the_middle() {
        let m = compute("hello", "helko", 5_000);
        assert_eq!(m.correct_chars, 4);
        assert_eq!(m.accuracy, 80);
        // (4 / 5) / (5 / 60) = 9.6
        assert_eq!(m.wpm, 10);
    }

    #[test]
    fn test_empty_typed_text_scores_zero() {
        let m = compute("hello", "", 12_345);
        assert_eq!(m.wpm, 0);
        assert_eq!(m.accuracy, 0);
        assert_eq!(m.correct_chars, 0);
    }

    #[test]
    fn test_prefix_copy_is_fully_accurate() {
        let target = "The quick brown fox jumps over the lazy dog.";
        for len in 1..target.len() {
            let typed = &target[..len];
            let m = compute(target, typed, 3_000);
            assert_eq!(m.accuracy, 100, "prefix of length {len}");
            assert_eq!(m.correct_chars, typed.chars().count());
        }
    }

    #[test]
    fn test_zero_elapsed_is_floored() {
        let m = compute("ab", "ab", 0);
        assert_eq!(m.seconds, MIN_SECONDS);
        // (2 / 5) / (0.001 / 60) = 24000
        assert_eq!(m.wpm, 24_000);
    }

    #[test]
    fn test_typed_longer_than_target_counts_only_overlap() {
        let m = compute("cat", "catsss", 60_000);
        assert_eq!(m.correct_chars, 3);
        assert_eq!(m.accuracy, 50);
    }

    #[test]
    fn test_insertion_shifts_later_positions() {
        // an extra 'x' makes every following position wrong
        let m = compute("abcd", "axbcd", 1_000);
        assert_eq!(m.correct_chars, 1);
        assert_eq!(m.accuracy, 20);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let a = compute("simplicity", "simplecity", 4_321);
        let b = compute("simplicity", "simplecity", 4_321);
        assert_eq!(a, b);
    }

    #[test]
    fn test_multibyte_chars_are_compared_by_position() {
        let m = compute("café", "cafe", 60_000);
        assert_eq!(m.correct_chars, 3);
        assert_eq!(m.accuracy, 75);
    }

    #[test]
    fn test_wpm_non_positive_minutes() {
        assert_eq!(wpm(10, 0.0), 0);
        assert_eq!(wpm(10, -1.0), 0);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(0, 0), 0);
    }
}
