//! # chord_namer
//!
//! Symbolic chord naming for Western tonal harmony: read a free-text list of notes
//! and name the chord it most likely is, or read a chord symbol and spell its notes.
//!
//! ## Example
//! ```rust
//! use chord_namer::{
//!     parse_chord_symbol, parse_notes, prefer_flats, root_namer, spell_chord_tones,
//!     ChordDetector,
//! };
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Notes -> chord names
//!     let input = "C, E, G, B-flat";
//!     let notes = parse_notes(input)?;
//!     let detector = ChordDetector::builder().max_candidates(3).build()?;
//!     let candidates = detector.detect(&notes.pitch_classes, root_namer(prefer_flats(input)));
//!     assert_eq!(candidates[0].name, "C7");
//!
//!     // 2) Chord symbol -> spelled notes
//!     let chord = parse_chord_symbol("Ebmaj7")?;
//!     let spelled = spell_chord_tones(&chord.root_spelling, chord.intervals.as_slice());
//!     assert_eq!(spelled, "Eb G Bb D");
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! ## Features
//! - `serde`: derives `Serialize` for the parse and detection results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Template-matching chord detector.
pub use chord_detector::{
    detect_chord, Candidate, ChordDetector, ChordDetectorBuilder, ChordError, ScoreWeights,
};

/// Display helpers.
pub use format::{chord_tones_from_root, normalize_pitch_classes, notes_list, root_namer};

/// Free-text note list parsing.
pub use notes::{parse_notes, prefer_flats, NoteParseError, NoteWarning, ParsedNotes};

/// Pitch classes and note letters.
pub use pitch::{pitch_class_name, Letter, PitchClass};

/// Enharmonic spelling.
pub use spelling::spell_chord_tones;

/// Chord symbol parsing.
pub use symbol::{parse_chord_symbol, ChordSymbolError, IntervalFormula, ParsedChordSymbol};

/// Chord template catalogue.
pub use templates::{ChordTemplate, TEMPLATES};

/// Chord detection module.
pub mod chord_detector;

/// Display helpers module.
pub mod format;

/// Note input parsing module.
pub mod notes;

/// Pitch class module.
pub mod pitch;

/// Enharmonic spelling module.
pub mod spelling;

/// Chord symbol parsing module.
pub mod symbol;

/// Chord template module.
pub mod templates;
