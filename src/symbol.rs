//! Chord Symbol Parser
//!
//! Reads conventional chord symbols (`C7`, `F#m7b5`, `Bbmaj7`, `Gø7`, `E7(#9)`) into a
//! root pitch class and an interval formula.
//!
//! The grammar is a fixed sequence of greedy prefix rules rather than a general
//! grammar. Rule order decides ambiguous prefixes (`maj` is tried before `m`), so the
//! tables below are ordered and must stay that way.

use thiserror::Error;

use crate::pitch::{note_pitch_class, Letter, PitchClass};

const LOG_TARGET: &str = "chord_namer::symbol";

/// Ordered, deduplicated semitone offsets from a root, always starting at 0.
///
/// Offsets above 11 are compound intervals (14 is a ninth, 21 a thirteenth).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct IntervalFormula(Vec<u8>);

impl IntervalFormula {
    /// Sort, deduplicate and make sure the root (0) is present.
    pub fn new(mut intervals: Vec<u8>) -> Self {
        intervals.push(0);
        intervals.sort_unstable();
        intervals.dedup();
        IntervalFormula(intervals)
    }

    /// The offsets, ascending.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Whether the formula contains `interval` exactly (no octave reduction).
    pub fn contains(&self, interval: u8) -> bool {
        self.0.contains(&interval)
    }
}

/// Errors when parsing a chord symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordSymbolError {
    /// Nothing but whitespace was given.
    #[error("Type a chord symbol (e.g., C7, F#m7b5).")]
    EmptyInput,

    /// The symbol does not start with a note letter.
    #[error("Couldn't read the root note.")]
    UnparsableRoot,

    /// The root letter and accidental name no pitch.
    #[error("Unknown root note \"{root}\".")]
    UnknownRoot {
        /// The root as written, letter uppercased.
        root: String,
    },
}

/// A successfully parsed chord symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedChordSymbol {
    /// Root pitch class.
    pub root: PitchClass,
    /// Root as written with its letter uppercased (e.g. `"F#"`); feed this to
    /// [`spell_chord_tones`](crate::spell_chord_tones).
    pub root_spelling: String,
    /// Offsets from the root.
    pub intervals: IntervalFormula,
    /// Canonical rewrite of the symbol, e.g. `"Cm7b5"` for `"Cø7"`.
    pub normalized_symbol: String,
    /// Non-fatal notes about the input. The grammar is lenient and unreadable
    /// trailing text is dropped silently, so this is currently always empty.
    pub warnings: Vec<String>,
}

/// Triad qualities a symbol can name
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    SuspendedSecond,
    SuspendedFourth,
}

impl Quality {
    /// Root, third (or suspension) and fifth.
    const fn triad(self) -> [u8; 3] {
        match self {
            Quality::Major => [0, 4, 7],
            Quality::Minor => [0, 3, 7],
            Quality::Diminished => [0, 3, 6],
            Quality::Augmented => [0, 4, 8],
            Quality::SuspendedSecond => [0, 2, 7],
            Quality::SuspendedFourth => [0, 5, 7],
        }
    }

    /// Text this quality contributes to a normalized symbol.
    const fn symbol_text(self) -> &'static str {
        match self {
            Quality::Major => "",
            Quality::Minor => "m",
            Quality::Diminished => "dim",
            Quality::Augmented => "aug",
            Quality::SuspendedSecond => "sus2",
            Quality::SuspendedFourth => "sus4",
        }
    }
}

/// One quality keyword rule: when `matches` accepts the remaining text, the quality
/// is set and `consumes` bytes are removed.
struct QualityRule {
    matches: fn(&str) -> bool,
    quality: Quality,
    consumes: usize,
}

/// Quality keywords, most specific first. The leading `maj7` rule leaves its text in
/// place so the extension step reads it as a major seventh.
const QUALITY_RULES: &[QualityRule] = &[
    QualityRule { matches: |r| starts_with_ci(r, "maj7"), quality: Quality::Major,           consumes: 0 },
    QualityRule { matches: |r| starts_with_ci(r, "maj"),  quality: Quality::Major,           consumes: 3 },
    QualityRule { matches: |r| starts_with_ci(r, "min"),  quality: Quality::Minor,           consumes: 3 },
    QualityRule { matches: |r| r.starts_with('m'),        quality: Quality::Minor,           consumes: 1 },
    QualityRule { matches: |r| starts_with_ci(r, "dim"),  quality: Quality::Diminished,      consumes: 3 },
    QualityRule { matches: |r| r.starts_with('o'),        quality: Quality::Diminished,      consumes: 1 },
    QualityRule { matches: |r| starts_with_ci(r, "aug"),  quality: Quality::Augmented,       consumes: 3 },
    QualityRule { matches: |r| r.starts_with('+'),        quality: Quality::Augmented,       consumes: 1 },
    QualityRule { matches: |r| starts_with_ci(r, "sus2"), quality: Quality::SuspendedSecond, consumes: 4 },
    QualityRule { matches: |r| starts_with_ci(r, "sus4"), quality: Quality::SuspendedFourth, consumes: 4 },
    QualityRule { matches: |r| starts_with_ci(r, "sus"),  quality: Quality::SuspendedFourth, consumes: 3 },
];

/// Numeric extensions and the tones each one stacks on the triad.
const EXTENSIONS: &[(&str, &[u8])] = &[
    ("6", &[9]),
    ("7", &[10]),
    ("9", &[10, 14]),
    ("11", &[10, 14, 17]),
    ("13", &[10, 14, 17, 21]),
];

/// Alterable degrees, in the order the scanner tries them, with their unaltered
/// semitone offsets.
const ALTERABLE_DEGREES: &[(&str, u8)] = &[("5", 7), ("9", 14), ("11", 17), ("13", 21)];

const HALF_DIMINISHED: [u8; 4] = [0, 3, 6, 10];

const HALF_DIM_GLYPH: char = 'ø';

/// Parse a chord symbol into its root and interval formula.
pub fn parse_chord_symbol(input: &str) -> Result<ParsedChordSymbol, ChordSymbolError> {
    let s = normalize(input);
    if s.is_empty() {
        return Err(ChordSymbolError::EmptyInput);
    }

    // ---- root ----
    let mut chars = s.chars();
    let Some(letter) = chars.next().and_then(Letter::from_char) else {
        log::debug!(target: LOG_TARGET, "{input:?}: no root letter");
        return Err(ChordSymbolError::UnparsableRoot);
    };
    let mut r = chars.as_str();
    let accidental = match r.chars().next() {
        Some(c @ ('#' | 'b')) => {
            r = &r[1..];
            Some(c)
        }
        _ => None,
    };
    let root_spelling = match accidental {
        Some(acc) => format!("{letter}{acc}"),
        None => letter.to_string(),
    };
    let root = note_pitch_class(letter, &root_spelling[1..]).ok_or_else(|| {
        ChordSymbolError::UnknownRoot {
            root: root_spelling.clone(),
        }
    })?;

    // ---- quality ----
    let had_glyph = match r.strip_prefix(HALF_DIM_GLYPH) {
        Some(rest) => {
            r = rest;
            true
        }
        None => false,
    };

    let mut quality = Quality::Major;
    if let Some(rule) = QUALITY_RULES.iter().find(|rule| (rule.matches)(r)) {
        quality = rule.quality;
        r = &r[rule.consumes..];
    }
    let mut intervals: Vec<u8> = quality.triad().to_vec();

    // ---- half-diminished ----
    let half_dim = had_glyph || (quality == Quality::Minor && starts_with_ci(r, "7b5"));
    if half_dim {
        intervals = HALF_DIMINISHED.to_vec();
        if starts_with_ci(r, "7b5") {
            r = &r[3..];
        } else if r.starts_with('7') {
            r = &r[1..];
        }
        if starts_with_ci(r, "b5") {
            r = &r[2..];
        }
    }

    // ---- extension ----
    if !half_dim {
        if starts_with_ci(r, "maj7") {
            add(&mut intervals, 11);
            r = &r[4..];
        } else if let Some((token, tones)) = leading_extension(r) {
            for &t in tones {
                add(&mut intervals, t);
            }
            r = &r[token.len()..];
        }
    }

    // ---- alterations ----
    if r.len() >= 2 && r.starts_with('(') && r.ends_with(')') {
        r = &r[1..r.len() - 1];
    }
    let mut alterations: Vec<String> = Vec::new();
    for (sign, degree, base) in scan_alterations(r) {
        let shifted = if sign == '#' { base + 1 } else { base - 1 };
        replace_or_add(&mut intervals, base, shifted);
        alterations.push(format!("{sign}{degree}"));
    }

    let intervals = IntervalFormula::new(intervals);

    let quality_text = if half_dim { "m7b5" } else { quality.symbol_text() };
    let extension_text = if half_dim {
        ""
    } else {
        extension_from_intervals(&intervals)
    };
    let mut seen: Vec<&str> = Vec::with_capacity(alterations.len());
    for alt in &alterations {
        if !seen.contains(&alt.as_str()) {
            seen.push(alt);
        }
    }
    let alteration_text = if seen.is_empty() {
        String::new()
    } else {
        format!("({})", seen.concat())
    };
    let normalized_symbol =
        format!("{root_spelling}{quality_text}{extension_text}{alteration_text}");

    log::debug!(
        target: LOG_TARGET,
        "{:?} -> {} {:?}",
        input,
        normalized_symbol,
        intervals.as_slice()
    );

    Ok(ParsedChordSymbol {
        root,
        root_spelling,
        intervals,
        normalized_symbol,
        warnings: Vec::new(),
    })
}

fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '♭' => 'b',
            '♯' => '#',
            'Ø' => HALF_DIM_GLYPH,
            other => other,
        })
        .collect()
}

/// ASCII case-insensitive prefix test.
fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn leading_extension(r: &str) -> Option<(&'static str, &'static [u8])> {
    EXTENSIONS
        .iter()
        .find(|(token, _)| r.starts_with(token))
        .copied()
}

/// Find every `(b|#)(5|9|11|13)` token, left to right, without overlaps.
fn scan_alterations(r: &str) -> Vec<(char, &'static str, u8)> {
    let bytes = r.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let sign = match bytes[i] {
            b'#' => '#',
            b'b' => 'b',
            _ => {
                i += 1;
                continue;
            }
        };
        let rest = &r[i + 1..];
        match ALTERABLE_DEGREES
            .iter()
            .find(|(degree, _)| rest.starts_with(degree))
        {
            Some(&(degree, base)) => {
                found.push((sign, degree, base));
                i += 1 + degree.len();
            }
            None => i += 1,
        }
    }
    found
}

fn add(intervals: &mut Vec<u8>, interval: u8) {
    if !intervals.contains(&interval) {
        intervals.push(interval);
    }
}

fn replace_or_add(intervals: &mut Vec<u8>, target: u8, replacement: u8) {
    if intervals.contains(&target) {
        for i in intervals.iter_mut().filter(|i| **i == target) {
            *i = replacement;
        }
    } else {
        intervals.push(replacement);
    }
}

/// Best-effort extension name for a finished formula.
fn extension_from_intervals(intervals: &IntervalFormula) -> &'static str {
    let has = |i| intervals.contains(i);
    if has(11) {
        "maj7"
    } else if has(10) && has(21) {
        "13"
    } else if has(10) && has(17) {
        "11"
    } else if has(10) && has(14) {
        "9"
    } else if has(10) {
        "7"
    } else if has(9) {
        "6"
    } else {
        ""
    }
}
