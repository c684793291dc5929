//! Enharmonic Speller
//!
//! Writes an interval formula out as letter names, choosing each letter by counting
//! scale steps from the root letter so that a third always lands on a third
//! (`Gb Bbb Db`, not `Gb A Db`).
//!
//! The step table reads 6 as a raised fourth and 10 as a raised sixth, so those
//! tones come out as `F#` and `A#` above C.

use crate::pitch::{Letter, PitchClass};

const LOG_TARGET: &str = "chord_namer::spelling";

/// Spell a chord as space-separated note names, one per distinct interval, ascending.
///
/// `root` is a letter with up to two accidentals (`"F#"`, `"bb"`, `"Cbb"`); the
/// returned string is empty when it cannot be read.
///
/// ```
/// assert_eq!(chord_namer::spell_chord_tones("Gb", &[0, 3, 7]), "Gb Bbb Db");
/// ```
pub fn spell_chord_tones(root: &str, intervals: &[u8]) -> String {
    let Some((letter, root_pc)) = parse_root_spelling(root) else {
        log::debug!(target: LOG_TARGET, "unreadable root spelling {root:?}");
        return String::new();
    };

    let mut ordered = intervals.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    ordered
        .into_iter()
        .map(|interval| {
            let target = root_pc.transpose(interval);
            let letter = letter.advance(degree_steps(interval));
            spell(letter, target)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Letter plus up to two accidentals, surrounding whitespace ignored.
fn parse_root_spelling(root: &str) -> Option<(Letter, PitchClass)> {
    let mut chars = root.trim().chars();
    let letter = chars.next().and_then(Letter::from_char)?;

    let mut shift = 0i32;
    let mut count = 0;
    for c in chars {
        shift += match c {
            '#' => 1,
            'b' => -1,
            _ => return None,
        };
        count += 1;
    }
    if count > 2 {
        return None;
    }
    Some((letter, PitchClass::new(letter.natural_pitch() as i32 + shift)))
}

/// Scale steps from the root letter for an interval, compound intervals up to a
/// thirteenth included.
fn degree_steps(interval: u8) -> usize {
    match interval % 24 {
        0 => 0,
        1 | 2 => 1,
        3 | 4 => 2,
        5 | 6 => 3,
        7 | 8 => 4,
        9 | 10 => 5,
        11 => 6,
        13 | 14 => 1,
        15 | 16 => 2,
        17 | 18 => 3,
        20 | 21 => 5,
        _ => 0,
    }
}

fn spell(letter: Letter, target: PitchClass) -> String {
    let mut delta = target.interval_above(PitchClass::new(letter.natural_pitch() as i32)) as i32;
    if delta > 6 {
        delta -= 12;
    }
    format!("{letter}{}", accidental_text(delta.clamp(-2, 2)))
}

fn accidental_text(delta: i32) -> String {
    match delta {
        -2 => "bb".to_string(),
        -1 => "b".to_string(),
        0 => String::new(),
        1 => "#".to_string(),
        2 => "##".to_string(),
        d if d > 0 => "#".repeat(d as usize),
        d => "b".repeat(d.unsigned_abs() as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_intervals_map_to_simple_degrees() {
        assert_eq!(degree_steps(14), degree_steps(2));
        assert_eq!(degree_steps(17), degree_steps(5));
        assert_eq!(degree_steps(21), degree_steps(9));
        assert_eq!(degree_steps(12), 0);
    }

    #[test]
    fn accidentals_beyond_double_repeat() {
        assert_eq!(accidental_text(3), "###");
        assert_eq!(accidental_text(-3), "bbb");
    }

    #[test]
    fn root_spelling_allows_two_accidentals() {
        assert_eq!(parse_root_spelling("c##"), Some((Letter::C, PitchClass::new(2))));
        assert_eq!(parse_root_spelling(" Bb "), Some((Letter::B, PitchClass::new(10))));
        assert_eq!(parse_root_spelling("Cbbb"), None);
        assert_eq!(parse_root_spelling("C7"), None);
        assert_eq!(parse_root_spelling(""), None);
    }

    #[test]
    fn tritone_resolves_upward_then_clamps() {
        // C up to F# spelled on F: +1
        assert_eq!(spell(Letter::F, PitchClass::new(6)), "F#");
        // six semitones away stays positive before clamping
        assert_eq!(spell(Letter::C, PitchClass::new(6)), "C##");
    }
}
