//! Integration tests for reading free-text note lists.

use chord_namer::{parse_notes, prefer_flats, NoteParseError, NoteWarning, PitchClass};
use pretty_assertions::assert_eq;

fn values(input: &str) -> Vec<u8> {
    parse_notes(input)
        .unwrap_or_else(|e| panic!("{input:?} failed: {e}"))
        .pitch_classes
        .iter()
        .map(|pc| pc.value())
        .collect()
}

#[test]
fn accidental_notation_does_not_matter() {
    for spelling in ["B-flat", "B flat", "Bb", "bb", "B♭", "bflat"] {
        let input = format!("C {spelling}");
        assert_eq!(values(&input), vec![0, 10], "{spelling}");
    }
    for spelling in ["F#", "F sharp", "f-sharp", "F♯", "f#"] {
        let input = format!("{spelling} A");
        assert_eq!(values(&input), vec![6, 9], "{spelling}");
    }
}

#[test]
fn order_is_first_occurrence_not_numeric() {
    let parsed = parse_notes("G, E, C").unwrap();
    assert_eq!(
        parsed.pitch_classes,
        vec![PitchClass::new(7), PitchClass::new(4), PitchClass::new(0)]
    );
    assert_eq!(parsed.normalized_input, "7,4,0");
}

#[test]
fn octaves_and_enharmonic_repeats_collapse() {
    let parsed = parse_notes("C4 E4 G4 C5 B#3 Fb").unwrap();
    assert_eq!(parsed.normalized_input, "0,4,7");
    assert!(parsed.warnings.is_empty());
}

#[test]
fn separators_and_stray_punctuation() {
    assert_eq!(values("C,,E ,  G;"), vec![0, 4, 7]);
    assert_eq!(values("(Db) [F] {Ab}"), vec![1, 5, 8]);
}

#[test]
fn bad_tokens_become_warnings() {
    let parsed = parse_notes("C E G Cbb C#b7 H").unwrap();
    assert_eq!(parsed.normalized_input, "0,4,7");
    // "H" cleans down to nothing and is dropped without a warning
    assert_eq!(
        parsed.warnings,
        vec![
            NoteWarning::UnknownNote("Cbb".to_string()),
            NoteWarning::UnknownNote("C#b7".to_string()),
        ]
    );
}

#[test]
fn malformed_tokens_are_reported_by_their_cleaned_text() {
    let parsed = parse_notes("C E 7G Cb#b").unwrap();
    assert_eq!(
        parsed.warnings,
        vec![
            NoteWarning::MalformedToken("7G".to_string()),
            NoteWarning::MalformedToken("Cb#b".to_string()),
        ]
    );
    assert_eq!(parsed.warnings[0].to_string(), "Ignored \"7G\"");
}

#[test]
fn unknown_note_message() {
    let parsed = parse_notes("C E Dbb").unwrap();
    assert_eq!(parsed.warnings[0].to_string(), "Unknown note \"Dbb\"");
}

#[test]
fn a_single_note_is_not_enough() {
    let err = parse_notes("C").unwrap_err();
    assert_eq!(err, NoteParseError::InsufficientDistinctNotes { warnings: vec![] });
    assert!(err.to_string().contains("at least two distinct notes"));
}

#[test]
fn repeated_note_is_not_enough_and_keeps_warnings() {
    let err = parse_notes("C C4 C5 X7 Ebb").unwrap_err();
    assert_eq!(
        err.warnings(),
        &[
            NoteWarning::MalformedToken("7".to_string()),
            NoteWarning::UnknownNote("Ebb".to_string()),
        ]
    );
}

#[test]
fn empty_and_noteless_input() {
    assert_eq!(parse_notes("   ").unwrap_err(), NoteParseError::EmptyInput);
    assert_eq!(parse_notes("xyz, ?!").unwrap_err(), NoteParseError::NoNotes);
    assert!(NoteParseError::EmptyInput.warnings().is_empty());
}

#[test]
fn flats_must_strictly_outnumber_sharps() {
    assert!(prefer_flats("Bb Eb G"));
    assert!(!prefer_flats("C E G"));
    assert!(!prefer_flats("Bb F#"));
    assert!(!prefer_flats("C# F# Bb"));
}
