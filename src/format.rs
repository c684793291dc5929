//! Display helpers for pitch-class sets.

use crate::pitch::{pitch_class_name, PitchClass};

/// Joins note names in lists.
const NOTE_SEPARATOR: &str = "–";

/// Naming callback for [`ChordDetector::detect`](crate::ChordDetector::detect).
///
/// ```
/// use chord_namer::{detect_chord, root_namer, PitchClass};
///
/// let pcs = [PitchClass::new(10), PitchClass::new(2), PitchClass::new(5)];
/// let top = &detect_chord(&pcs, root_namer(true))[0];
/// assert_eq!(top.name, "Bb");
/// ```
pub fn root_namer(prefer_flats: bool) -> impl Fn(PitchClass) -> String {
    move |pc| pitch_class_name(pc, prefer_flats).to_string()
}

/// Reduce integers to pitch classes, drop duplicates and sort ascending.
///
/// ```
/// use chord_namer::{normalize_pitch_classes, notes_list};
///
/// let pcs = normalize_pitch_classes(&[7, 16, 0, -5, 12]);
/// assert_eq!(notes_list(&pcs, false), "C–E–G");
/// ```
pub fn normalize_pitch_classes(values: &[i32]) -> Vec<PitchClass> {
    let mut pcs: Vec<PitchClass> = values.iter().map(|&v| PitchClass::new(v)).collect();
    pcs.sort_unstable();
    pcs.dedup();
    pcs
}

/// Name each pitch class, joined with an en dash (`"C–E–G"`).
pub fn notes_list(pitch_classes: &[PitchClass], prefer_flats: bool) -> String {
    pitch_classes
        .iter()
        .map(|&pc| pitch_class_name(pc, prefer_flats))
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

/// Name the tones `intervals` above `root`, joined with an en dash.
///
/// Unlike [`spell_chord_tones`](crate::spell_chord_tones) this uses the fixed
/// sharp or flat table, so a minor third above D♭ reads `E` rather than `F♭`.
pub fn chord_tones_from_root(root: PitchClass, intervals: &[u8], prefer_flats: bool) -> String {
    intervals
        .iter()
        .map(|&i| pitch_class_name(root.transpose(i), prefer_flats))
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizing_wraps_dedups_and_sorts() {
        let pcs = normalize_pitch_classes(&[11, -1, 23, 4, 0, 16]);
        assert_eq!(
            pcs,
            vec![PitchClass::new(0), PitchClass::new(4), PitchClass::new(11)]
        );
        assert!(normalize_pitch_classes(&[]).is_empty());
    }

    #[test]
    fn lists_use_the_requested_table() {
        let pcs = [PitchClass::new(1), PitchClass::new(8)];
        assert_eq!(notes_list(&pcs, false), "C#–G#");
        assert_eq!(notes_list(&pcs, true), "Db–Ab");
    }

    #[test]
    fn chord_tones_wrap_the_octave() {
        let a = PitchClass::new(9);
        assert_eq!(chord_tones_from_root(a, &[0, 3, 7, 14], false), "A–C–E–B");
    }
}
