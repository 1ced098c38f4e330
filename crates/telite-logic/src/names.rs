//! Pronounceable names from small integer samples.
//!
//! Each sample picks a two-letter syllable out of a fixed table; `.` marks
//! an empty half-syllable and is dropped from the result.

/// Syllables used for system names.
pub const PLANET_PAIRS: &str = "..LEXEGEZACEBISOUSESARMAINDIREA.ERATENBERALAVETIEDORQUANTEISRION";

/// [`PLANET_PAIRS`] prefixed with short words, for names inside planet prose.
pub const EXTENDED_PAIRS: &str =
    "ABOUSEITILETSTONLONUTHNO..LEXEGEZACEBISOUSESARMAINDIREA.ERATENBERALAVETIEDORQUANTEISRION";

/// Which syllable table a name is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairTable {
    /// System names.
    Planet,
    /// Creature and product names in goat-soup prose.
    Extended,
}

impl PairTable {
    fn pairs(self) -> &'static [u8] {
        match self {
            PairTable::Planet => PLANET_PAIRS.as_bytes(),
            PairTable::Extended => EXTENDED_PAIRS.as_bytes(),
        }
    }
}

/// Build a name from a sequence of samples.
///
/// Samples are masked to an even offset in `0..=62`, so callers may pass raw
/// bytes. Separator dots are stripped from the result.
pub fn make_name<I>(samples: I, table: PairTable) -> String
where
    I: IntoIterator<Item = u8>,
{
    let bytes = table.pairs();
    let mut name = String::new();
    for sample in samples {
        let i = (sample & 0x3E) as usize;
        for &b in &bytes[i..i + 2] {
            if b != b'.' {
                name.push(b as char);
            }
        }
    }
    name
}

/// Uppercase the first letter and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_table_pairs() {
        assert_eq!(make_name([2, 4], PairTable::Planet), "LEXE");
        // Offset 0 is the empty syllable.
        assert_eq!(make_name([0, 2], PairTable::Planet), "LE");
    }

    #[test]
    fn test_samples_are_masked_to_even_offsets() {
        assert_eq!(
            make_name([3, 0x42], PairTable::Planet),
            make_name([2, 2], PairTable::Planet)
        );
    }

    #[test]
    fn test_dots_dropped_mid_table() {
        // "A." sits at offset 30 of the planet table.
        assert_eq!(make_name([30], PairTable::Planet), "A");
    }

    #[test]
    fn test_extended_table_prefix() {
        assert_eq!(make_name([0, 2], PairTable::Extended), "ABOU");
        // Offset 24 of the extended table is the start of the planet table.
        assert_eq!(make_name([24, 26], PairTable::Extended), "LE");
    }

    #[test]
    fn test_extended_table_ends_with_planet_table() {
        assert!(EXTENDED_PAIRS.ends_with(PLANET_PAIRS));
    }

    #[test]
    fn test_empty_sample_gives_empty_name() {
        assert_eq!(make_name(std::iter::empty(), PairTable::Extended), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("LAVE"), "Lave");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }
}
