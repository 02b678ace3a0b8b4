use ta_core::error::CoreError;

use crate::palette::CharacterPalette;

/// Character whose normalized brightness is closest to `target`.
///
/// The palette is scanned in ascending code-point order and the best
/// candidate is only replaced on a strictly smaller distance, so among
/// equally close characters the smallest code point wins.
///
/// # Errors
/// [`CoreError::EmptyPalette`] if the palette has no characters.
///
/// # Example
/// ```
/// use ta_ascii::matcher::closest;
/// use ta_ascii::palette::CharacterPalette;
///
/// let mut palette = CharacterPalette::new();
/// palette.insert_raw('b', 0.3);
/// palette.insert_raw('a', 0.3);
/// assert_eq!(closest(0.3, &palette).unwrap(), 'a');
/// ```
pub fn closest(target: f64, palette: &CharacterPalette) -> Result<char, CoreError> {
    let mut entries = palette.entries();
    let (mut best, brightness) = entries.next().ok_or(CoreError::EmptyPalette)?;
    let mut best_distance = (brightness - target).abs();

    for (ch, brightness) in entries {
        let distance = (brightness - target).abs();
        if distance < best_distance {
            best = ch;
            best_distance = distance;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(entries: &[(char, f64)]) -> CharacterPalette {
        let mut p = CharacterPalette::new();
        for &(ch, raw) in entries {
            p.insert_raw(ch, raw);
        }
        p
    }

    #[test]
    fn empty_palette_fails() {
        assert_eq!(closest(0.5, &CharacterPalette::new()), Err(CoreError::EmptyPalette));
    }

    #[test]
    fn picks_nearest() {
        let p = palette(&[('#', 0.0), ('+', 0.5), (' ', 1.0)]);
        assert_eq!(closest(0.1, &p).unwrap(), '#');
        assert_eq!(closest(0.45, &p).unwrap(), '+');
        assert_eq!(closest(0.9, &p).unwrap(), ' ');
    }

    #[test]
    fn out_of_range_targets_clamp_to_extremes() {
        let p = palette(&[('a', 0.0), ('z', 1.0)]);
        assert_eq!(closest(-3.0, &p).unwrap(), 'a');
        assert_eq!(closest(7.0, &p).unwrap(), 'z');
    }

    #[test]
    fn ties_go_to_smallest_code_point() {
        let p = palette(&[('b', 0.3), ('a', 0.3)]);
        assert_eq!(closest(0.3, &p).unwrap(), 'a');

        // Équidistants de 0.5 : '0' (0.0) et '~' (1.0).
        let p = palette(&[('~', 1.0), ('0', 0.0)]);
        assert_eq!(closest(0.5, &p).unwrap(), '0');
    }

    #[test]
    fn single_entry_always_wins() {
        let p = palette(&[('x', 0.42)]);
        for target in [0.0, 0.42, 1.0] {
            assert_eq!(closest(target, &p).unwrap(), 'x');
        }
    }
}
