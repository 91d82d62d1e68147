// 🔢 Reduction Primitives
// Digit-sum reduction and the Pythagorean letter table

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// NUMBER REDUCTION
// ============================================================================

/// Master numbers survive reduction when they are the value being reduced
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

pub fn is_master_number(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

/// Reduce `n` to a single digit by summing its decimal digits.
///
/// - `0` stays `0` (absence of signal, never a chart digit).
/// - With `preserve_masters`, an input of 11, 22 or 33 is returned as-is.
///   The check runs before the single-digit check.
/// - Sums produced along the way are always carried down to one digit:
///   1966 → 22 → 4, even with `preserve_masters`.
/// - Without `preserve_masters`, masters reduce once: 11 → 2.
pub fn reduce_number(n: u32, preserve_masters: bool) -> u32 {
    if n == 0 {
        return 0;
    }

    if preserve_masters && is_master_number(n) {
        return n;
    }

    let mut value = n;
    while value >= 10 {
        value = digit_sum(value);
    }
    value
}

/// `reduce_number` with master numbers preserved (the chart default)
pub fn reduce(n: u32) -> u32 {
    reduce_number(n, true)
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

// ============================================================================
// NAME REDUCTION
// ============================================================================

/// Which letters of a name participate in a sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFilter {
    /// Every letter (expression)
    All,
    /// a, e, i, o, u (motivation)
    Vowels,
    /// Everything else, including y (inner self)
    Consonants,
}

impl NameFilter {
    pub fn accepts(&self, letter: char) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Vowels => is_vowel(letter),
            NameFilter::Consonants => !is_vowel(letter),
        }
    }
}

pub fn is_vowel(letter: char) -> bool {
    matches!(letter, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Pythagorean table: a..z mapped onto 1..9 repeating
pub fn letter_value(letter: char) -> u32 {
    match letter {
        'a' | 'j' | 's' => 1,
        'b' | 'k' | 't' => 2,
        'c' | 'l' | 'u' => 3,
        'd' | 'm' | 'v' => 4,
        'e' | 'n' | 'w' => 5,
        'f' | 'o' | 'x' => 6,
        'g' | 'p' | 'y' => 7,
        'h' | 'q' | 'z' => 8,
        'i' | 'r' => 9,
        _ => 0,
    }
}

/// Lowercase, strip diacritics (NFD + combining-mark removal), keep only a..z
///
/// "José Conceição" → "joseconceicao"
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Raw (unreduced) letter sum of the normalized name
pub fn name_sum(name: &str, filter: NameFilter) -> u32 {
    normalize_name(name)
        .chars()
        .filter(|c| filter.accepts(*c))
        .map(letter_value)
        .sum()
}

/// Reduced letter sum. A name with no matching letters yields 0 ("no signal").
pub fn name_to_number(name: &str, filter: NameFilter) -> u32 {
    reduce(name_sum(name, filter))
}

// ============================================================================
// TESTS
// ============================================================================
