//! Chord Templates
//!
//! The fixed catalogue of chord qualities the detector matches against, and the
//! labels used to decorate a match with tones the template does not cover.

/// A named chord quality as a set of semitone offsets from the root.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChordTemplate {
    /// Stable identifier (e.g. `"maj7"`, `"mMaj7"`).
    pub id: &'static str,
    /// Suffix appended to the root name (e.g. `"m7♭5"`).
    pub label: &'static str,
    /// Offsets from the root, ascending, reduced to one octave.
    pub intervals: &'static [u8],
    /// Offsets whose absence weighs more heavily against this reading.
    pub important: &'static [u8],
}

impl ChordTemplate {
    /// Templates that imply a dominant seventh underneath their extensions.
    pub fn is_extended_dominant(&self) -> bool {
        matches!(self.id, "9" | "11" | "13")
    }

    /// Whether `interval` is weighted as important for this template.
    pub fn is_important(&self, interval: u8) -> bool {
        self.important.contains(&interval)
    }
}

/// Supported chord templates, in the order candidates are generated
pub const TEMPLATES: &[ChordTemplate] = &[
    // triads
    ChordTemplate { id: "maj",   label: "",        intervals: &[0, 4, 7],  important: &[4, 7] },
    ChordTemplate { id: "min",   label: "m",       intervals: &[0, 3, 7],  important: &[3, 7] },
    ChordTemplate { id: "dim",   label: "dim",     intervals: &[0, 3, 6],  important: &[3, 6] },
    ChordTemplate { id: "aug",   label: "aug",     intervals: &[0, 4, 8],  important: &[4, 8] },
    ChordTemplate { id: "sus2",  label: "sus2",    intervals: &[0, 2, 7],  important: &[2, 7] },
    ChordTemplate { id: "sus4",  label: "sus4",    intervals: &[0, 5, 7],  important: &[5, 7] },
    // sixths
    ChordTemplate { id: "6",     label: "6",       intervals: &[0, 4, 7, 9],  important: &[4, 9] },
    ChordTemplate { id: "m6",    label: "m6",      intervals: &[0, 3, 7, 9],  important: &[3, 9] },
    // sevenths
    ChordTemplate { id: "7",     label: "7",       intervals: &[0, 4, 7, 10], important: &[4, 10] },
    ChordTemplate { id: "maj7",  label: "maj7",    intervals: &[0, 4, 7, 11], important: &[4, 11] },
    ChordTemplate { id: "m7",    label: "m7",      intervals: &[0, 3, 7, 10], important: &[3, 10] },
    ChordTemplate { id: "mMaj7", label: "m(maj7)", intervals: &[0, 3, 7, 11], important: &[3, 11] },
    ChordTemplate { id: "m7b5",  label: "m7♭5",    intervals: &[0, 3, 6, 10], important: &[3, 6, 10] },
    ChordTemplate { id: "dim7",  label: "dim7",    intervals: &[0, 3, 6, 9],  important: &[3, 6, 9] },
    // dominant stack
    ChordTemplate { id: "9",     label: "9",       intervals: &[0, 2, 4, 7, 10],       important: &[2, 4, 10] },
    ChordTemplate { id: "11",    label: "11",      intervals: &[0, 2, 4, 5, 7, 10],    important: &[4, 5, 10] },
    ChordTemplate { id: "13",    label: "13",      intervals: &[0, 2, 4, 5, 7, 9, 10], important: &[4, 9, 10] },
];

/// Decoration for a leftover tone when the chord already has a seventh.
pub const fn extension_label(interval: u8) -> Option<&'static str> {
    match interval {
        1 => Some("♭9"),
        2 => Some("9"),
        3 => Some("♯9"),
        5 => Some("11"),
        6 => Some("♯11"),
        8 => Some("♭13"),
        9 => Some("13"),
        _ => None,
    }
}

/// Decoration for a leftover tone on a chord without a seventh.
pub const fn add_label(interval: u8) -> Option<&'static str> {
    match interval {
        2 => Some("add9"),
        5 => Some("add11"),
        9 => Some("add13"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn important_tones_belong_to_their_template() {
        for t in TEMPLATES {
            for i in t.important {
                assert!(t.intervals.contains(i), "{} lists {i} as important", t.id);
            }
            assert!(t.intervals.windows(2).all(|w| w[0] < w[1]), "{} unsorted", t.id);
            assert_eq!(t.intervals.first(), Some(&0));
        }
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in TEMPLATES.iter().enumerate() {
            assert!(TEMPLATES[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn only_the_dominant_stack_is_extended() {
        let extended: Vec<_> = TEMPLATES
            .iter()
            .filter(|t| t.is_extended_dominant())
            .map(|t| t.id)
            .collect();
        assert_eq!(extended, ["9", "11", "13"]);
    }
}
