//! Note Input Parser
//!
//! Turns free text such as `"C E G Bb"`, `"c, e-flat, g4"` or `"F♯ A C♯"` into an
//! ordered, deduplicated list of pitch classes.
//!
//! Tokens that cannot be read are skipped and reported as [`NoteWarning`]s; they
//! never abort the parse on their own.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::pitch::{note_pitch_class, Letter, PitchClass};

const LOG_TARGET: &str = "chord_namer::notes";

lazy_static! {
    static ref WORD_FLAT: Regex = Regex::new(r"(?i)\b([a-g])(?:\s|-)*flat\b").unwrap();
    static ref WORD_SHARP: Regex = Regex::new(r"(?i)\b([a-g])(?:\s|-)*sharp\b").unwrap();
    static ref LOWERCASE_NOTE: Regex = Regex::new(r"\b([a-g])([b#])(\s|,|$)").unwrap();
    static ref TOKEN: Regex = Regex::new(r"^([A-Ga-g])([#b]{0,2})(\d+)?$").unwrap();
}

/// A non-fatal problem with one input token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NoteWarning {
    /// The token is not shaped like a note name.
    MalformedToken(String),
    /// The token is shaped like a note but names no pitch (e.g. `Cbb`).
    UnknownNote(String),
}

impl Display for NoteWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteWarning::MalformedToken(tok) => write!(f, "Ignored \"{tok}\""),
            NoteWarning::UnknownNote(tok) => write!(f, "Unknown note \"{tok}\""),
        }
    }
}

/// Errors when parsing a note list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteParseError {
    /// Nothing but whitespace was given.
    #[error("Type some notes (e.g., C E G Bb).")]
    EmptyInput,

    /// Every token was empty once non-note characters were stripped.
    #[error("I couldn't find any notes in that input.")]
    NoNotes,

    /// Fewer than two different pitch classes survived parsing.
    #[error("Please enter at least two distinct notes.")]
    InsufficientDistinctNotes {
        /// Warnings gathered before the parse gave up.
        warnings: Vec<NoteWarning>,
    },
}

impl NoteParseError {
    /// Warnings accumulated before the failure.
    pub fn warnings(&self) -> &[NoteWarning] {
        match self {
            NoteParseError::InsufficientDistinctNotes { warnings } => warnings,
            NoteParseError::EmptyInput | NoteParseError::NoNotes => &[],
        }
    }
}

/// A successfully parsed note list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedNotes {
    /// Distinct pitch classes in first-occurrence order.
    pub pitch_classes: Vec<PitchClass>,
    /// Comma-joined pitch-class numbers, e.g. `"0,4,7"`.
    pub normalized_input: String,
    /// Tokens that were skipped.
    pub warnings: Vec<NoteWarning>,
}

/// Parse free text into at least two distinct pitch classes.
pub fn parse_notes(input: &str) -> Result<ParsedNotes, NoteParseError> {
    let text = normalize(input);
    if text.is_empty() {
        return Err(NoteParseError::EmptyInput);
    }

    let tokens: Vec<String> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(NoteParseError::NoNotes);
    }

    let mut warnings = Vec::new();
    let mut pitch_classes: Vec<PitchClass> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let Some(pc) = read_token(&token, &mut warnings) else {
            continue;
        };
        if !pitch_classes.contains(&pc) {
            pitch_classes.push(pc);
        }
    }

    if pitch_classes.len() < 2 {
        log::debug!(
            target: LOG_TARGET,
            "{:?}: only {} distinct pitch class(es)",
            input,
            pitch_classes.len()
        );
        return Err(NoteParseError::InsufficientDistinctNotes { warnings });
    }

    let normalized_input = pitch_classes
        .iter()
        .map(|pc| pc.value().to_string())
        .collect::<Vec<_>>()
        .join(",");
    log::debug!(
        target: LOG_TARGET,
        "{:?} -> [{}] with {} warning(s)",
        input,
        normalized_input,
        warnings.len()
    );

    Ok(ParsedNotes {
        pitch_classes,
        normalized_input,
        warnings,
    })
}

/// Whether flats outnumber sharps in the raw input.
///
/// Ties, including input with no accidentals at all, favour sharps.
pub fn prefer_flats(input: &str) -> bool {
    let flats = input.matches('b').count();
    let sharps = input.matches('#').count();
    flats > sharps
}

/// Rewrite accidentals into the ASCII `b`/`#` forms the token grammar reads.
fn normalize(input: &str) -> String {
    let text = input.trim().replace('♭', "b").replace('♯', "#");
    let text = WORD_FLAT.replace_all(&text, "${1}b");
    let text = WORD_SHARP.replace_all(&text, "${1}#");
    LOWERCASE_NOTE
        .replace_all(&text, |caps: &Captures<'_>| {
            format!("{}{}{}", caps[1].to_ascii_uppercase(), &caps[2], &caps[3])
        })
        .into_owned()
}

fn clean_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| matches!(c, 'A'..='G' | 'a'..='g' | '#' | '0'..='9'))
        .collect()
}

/// Read one cleaned token; octave digits are accepted and dropped.
fn read_token(token: &str, warnings: &mut Vec<NoteWarning>) -> Option<PitchClass> {
    let Some(caps) = TOKEN.captures(token) else {
        warnings.push(NoteWarning::MalformedToken(token.to_string()));
        return None;
    };
    let letter = caps[1].chars().next().and_then(Letter::from_char)?;
    let accidental = caps.get(2).map_or("", |m| m.as_str());

    let pc = note_pitch_class(letter, accidental);
    if pc.is_none() {
        warnings.push(NoteWarning::UnknownNote(token.to_string()));
    }
    pc
}
