//! Pitch classes and note letters.
//!
//! Everything here is octave-free 12-TET: a note name reduces to one of twelve
//! pitch classes, and the same pitch class may be written several ways.

use std::fmt::Display;

/// Number of pitch classes in an octave
pub const SEMITONES: u8 = 12;

/// A pitch class in 12-TET, always in `0..=11` (0 = C).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PitchClass(u8);

impl PitchClass {
    /// Reduce any semitone count into a pitch class.
    pub const fn new(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(SEMITONES as i32) as u8)
    }

    /// The pitch class as an integer in `0..=11`.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Distance in semitones from `root` up to `self`, in `0..=11`.
    pub const fn interval_above(self, root: PitchClass) -> u8 {
        (self.0 + SEMITONES - root.0) % SEMITONES
    }

    /// The pitch class `interval` semitones above `self`.
    pub const fn transpose(self, interval: u8) -> PitchClass {
        PitchClass::new(self.0 as i32 + interval as i32)
    }
}

/// The seven letters of the musical alphabet, in scale order from C.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Letter {
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
    /// A
    A,
    /// B
    B,
}

const LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

impl Letter {
    /// Parse a single letter, either case.
    pub const fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' | 'c' => Some(Letter::C),
            'D' | 'd' => Some(Letter::D),
            'E' | 'e' => Some(Letter::E),
            'F' | 'f' => Some(Letter::F),
            'G' | 'g' => Some(Letter::G),
            'A' | 'a' => Some(Letter::A),
            'B' | 'b' => Some(Letter::B),
            _ => None,
        }
    }

    /// Uppercase character for this letter.
    pub const fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Semitone value of the natural (unaltered) letter.
    pub const fn natural_pitch(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// The letter `steps` places further along the alphabet, wrapping B → C.
    pub fn advance(self, steps: usize) -> Letter {
        LETTERS[(self as usize + steps) % LETTERS.len()]
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Look up a letter plus accidental text (`""`, `"#"`, `"b"`, ...) in the fixed
/// table of note names the parsers accept.
///
/// Only single accidentals are defined, including the enharmonic edge spellings
/// `Fb`, `E#`, `Cb` and `B#`. Double accidentals and mixed spellings return `None`.
pub const fn note_pitch_class(letter: Letter, accidental: &str) -> Option<PitchClass> {
    let semitones = match (letter, accidental.as_bytes()) {
        (Letter::C, b"") => 0,
        (Letter::C, b"#") => 1,
        (Letter::D, b"b") => 1,
        (Letter::D, b"") => 2,
        (Letter::D, b"#") => 3,
        (Letter::E, b"b") => 3,
        (Letter::E, b"") => 4,
        (Letter::F, b"b") => 4,
        (Letter::E, b"#") => 5,
        (Letter::F, b"") => 5,
        (Letter::F, b"#") => 6,
        (Letter::G, b"b") => 6,
        (Letter::G, b"") => 7,
        (Letter::G, b"#") => 8,
        (Letter::A, b"b") => 8,
        (Letter::A, b"") => 9,
        (Letter::A, b"#") => 10,
        (Letter::B, b"b") => 10,
        (Letter::B, b"") => 11,
        (Letter::C, b"b") => 11,
        (Letter::B, b"#") => 0,
        _ => return None,
    };
    Some(PitchClass(semitones))
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Name a pitch class with sharps or flats for the black keys.
pub fn pitch_class_name(pc: PitchClass, prefer_flats: bool) -> &'static str {
    if prefer_flats {
        FLAT_NAMES[pc.value() as usize]
    } else {
        SHARP_NAMES[pc.value() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reduces_negative_and_large_values() {
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(14).value(), 2);
        assert_eq!(PitchClass::new(-24).value(), 0);
    }

    #[test]
    fn interval_above_wraps() {
        let c = PitchClass::new(0);
        let a = PitchClass::new(9);
        assert_eq!(c.interval_above(a), 3);
        assert_eq!(a.interval_above(c), 9);
    }

    #[test]
    fn edge_spellings_are_defined() {
        assert_eq!(note_pitch_class(Letter::F, "b"), Some(PitchClass::new(4)));
        assert_eq!(note_pitch_class(Letter::E, "#"), Some(PitchClass::new(5)));
        assert_eq!(note_pitch_class(Letter::C, "b"), Some(PitchClass::new(11)));
        assert_eq!(note_pitch_class(Letter::B, "#"), Some(PitchClass::new(0)));
        assert_eq!(note_pitch_class(Letter::C, "bb"), None);
        assert_eq!(note_pitch_class(Letter::C, "#b"), None);
    }

    #[test]
    fn letters_wrap_around_the_alphabet() {
        assert_eq!(Letter::A.advance(2), Letter::C);
        assert_eq!(Letter::B.advance(7), Letter::B);
    }
}
