//! Chord Detector
//!
//! Names chords from a set of pitch classes by matching every possible root against
//! every template in [`TEMPLATES`] and ranking the readings by score.
//!
//! Missing tones are tolerated (up to a limit), so any set of two or more pitch
//! classes produces at least one reading.

use thiserror::Error;

use crate::pitch::PitchClass;
use crate::templates::{add_label, extension_label, ChordTemplate, TEMPLATES};

const LOG_TARGET: &str = "chord_namer::detector";

/// Default number of candidates returned
const DEFAULT_MAX_CANDIDATES: usize = 6;

/// One reading of a pitch-class set as a named chord.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Candidate {
    /// Root assumed by this reading.
    pub root: PitchClass,
    /// Display name, e.g. `"C7"` or `"Dm(add11)"`.
    pub name: String,
    /// Identifier of the matched template.
    pub template_id: &'static str,
    /// Match score; higher is better.
    pub score: i32,
    /// Template offsets absent from the input.
    pub missing: Vec<u8>,
    /// Input offsets the template does not contain.
    pub extras: Vec<u8>,
    /// Every input pitch class as an offset from the root, ascending.
    pub intervals_from_root: Vec<u8>,
}

/// Errors when configuring a detector
#[derive(Debug, Error)]
pub enum ChordError {
    /// An invalid argument was provided to the builder.
    #[error("invalid argument `{arg}`: {msg}")]
    InvalidArgument {
        /// The name of the invalid argument.
        arg: &'static str,
        /// A description of the invalid argument.
        msg: String,
    },
}

/// Scoring weights. The defaults are the canonical values and should only be changed
/// for experimentation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Reward per template tone present in the input
    pub present: i32,
    /// Penalty per missing important tone
    pub missing_important: i32,
    /// Penalty per missing ordinary tone
    pub missing: i32,
    /// Penalty per input tone outside the template
    pub extra: i32,
    /// Bonus when the input contains a minor or major third above the root
    pub tertian_bonus: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            present: 12,
            missing_important: 18,
            missing: 10,
            extra: 4,
            tertian_bonus: 6,
        }
    }
}

/// Builder for `ChordDetector` to customize ranking
pub struct ChordDetectorBuilder {
    max_candidates: usize,
    weights: ScoreWeights,
}

impl ChordDetectorBuilder {
    /// Create a new builder returning at most 6 candidates with default weights
    pub fn new() -> Self {
        ChordDetectorBuilder {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            weights: ScoreWeights::default(),
        }
    }

    /// Set the maximum number of candidates returned (at least 1)
    pub fn max_candidates(mut self, value: usize) -> Self {
        self.max_candidates = value;
        self
    }

    /// Replace the scoring weights
    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Build the `ChordDetector`
    ///
    /// Returns `Err(ChordError::InvalidArgument)` if `max_candidates == 0`.
    pub fn build(self) -> Result<ChordDetector, ChordError> {
        if self.max_candidates == 0 {
            return Err(ChordError::InvalidArgument {
                arg: "max_candidates",
                msg: "must be >= 1".to_string(),
            });
        }
        Ok(ChordDetector {
            max_candidates: self.max_candidates,
            weights: self.weights,
        })
    }
}

impl Default for ChordDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main chord detector
#[derive(Debug, Clone)]
pub struct ChordDetector {
    max_candidates: usize,
    weights: ScoreWeights,
}

impl ChordDetector {
    /// Return a builder to customize ranking
    pub fn builder() -> ChordDetectorBuilder {
        ChordDetectorBuilder::new()
    }

    /// Create a detector with the default settings
    pub fn new() -> Self {
        ChordDetector {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            weights: ScoreWeights::default(),
        }
    }

    /// Rank chord readings of `pitch_classes`, best first.
    ///
    /// `name_root` spells a root for display (see [`root_namer`](crate::root_namer)).
    /// Roots are tried in the order the pitch classes are given, which decides ties.
    /// Names in the result are unique. An empty input gives an empty result.
    pub fn detect<F>(&self, pitch_classes: &[PitchClass], name_root: F) -> Vec<Candidate>
    where
        F: Fn(PitchClass) -> String,
    {
        let mut pcs: Vec<PitchClass> = Vec::with_capacity(pitch_classes.len());
        for &pc in pitch_classes {
            if !pcs.contains(&pc) {
                pcs.push(pc);
            }
        }

        let mut candidates = Vec::new();
        for &root in &pcs {
            let rel: Vec<u8> = pcs.iter().map(|pc| pc.interval_above(root)).collect();
            let has_seventh = rel.contains(&10) || rel.contains(&11);
            let root_name = name_root(root);

            for tmpl in TEMPLATES {
                if tmpl.is_extended_dominant() && !has_seventh {
                    continue;
                }

                let m = score_template(tmpl, &rel, &self.weights);
                let max_missing = if tmpl.intervals.len() <= 3 { 1 } else { 2 };
                if m.missing.len() > max_missing {
                    continue;
                }

                let name = build_name(&root_name, tmpl, &m.extras, has_seventh);
                log::trace!(target: LOG_TARGET, "{name} ({}) scored {}", tmpl.id, m.score);

                let mut intervals_from_root = rel.clone();
                intervals_from_root.sort_unstable();
                candidates.push(Candidate {
                    root,
                    name,
                    template_id: tmpl.id,
                    score: m.score,
                    missing: m.missing,
                    extras: m.extras,
                    intervals_from_root,
                });
            }
        }

        // stable: equal scores keep root order, then template order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        let mut ranked: Vec<Candidate> = Vec::with_capacity(self.max_candidates);
        for c in candidates {
            if ranked.iter().any(|r| r.name == c.name) {
                continue;
            }
            ranked.push(c);
            if ranked.len() >= self.max_candidates {
                break;
            }
        }

        log::debug!(
            target: LOG_TARGET,
            "{} pitch class(es) -> {:?}",
            pcs.len(),
            ranked.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );
        ranked
    }
}

impl Default for ChordDetector {
    fn default() -> Self {
        ChordDetector::new()
    }
}

/// Rank chord readings with the default detector.
pub fn detect_chord<F>(pitch_classes: &[PitchClass], name_root: F) -> Vec<Candidate>
where
    F: Fn(PitchClass) -> String,
{
    ChordDetector::new().detect(pitch_classes, name_root)
}

struct TemplateMatch {
    score: i32,
    missing: Vec<u8>,
    extras: Vec<u8>,
}

/// Score a single template against offsets from a candidate root
fn score_template(tmpl: &ChordTemplate, rel: &[u8], w: &ScoreWeights) -> TemplateMatch {
    let missing: Vec<u8> = tmpl
        .intervals
        .iter()
        .copied()
        .filter(|i| !rel.contains(i))
        .collect();
    let extras: Vec<u8> = rel
        .iter()
        .copied()
        .filter(|i| !tmpl.intervals.contains(i))
        .collect();

    let present = (tmpl.intervals.len() - missing.len()) as i32;
    let mut score = present * w.present;
    for &m in &missing {
        score -= if tmpl.is_important(m) {
            w.missing_important
        } else {
            w.missing
        };
    }
    score -= extras.len() as i32 * w.extra;
    if rel.contains(&3) || rel.contains(&4) {
        score += w.tertian_bonus;
    }

    TemplateMatch {
        score,
        missing,
        extras,
    }
}

/// Root name + template label + decorations for the leftover tones
fn build_name(root_name: &str, tmpl: &ChordTemplate, extras: &[u8], has_seventh: bool) -> String {
    let label_for: fn(u8) -> Option<&'static str> = if has_seventh {
        extension_label
    } else {
        add_label
    };

    let mut decorations: Vec<&str> = Vec::new();
    for lab in extras.iter().filter_map(|&i| label_for(i)) {
        if !decorations.contains(&lab) {
            decorations.push(lab);
        }
    }

    if decorations.is_empty() {
        format!("{root_name}{}", tmpl.label)
    } else {
        format!("{root_name}{}({})", tmpl.label, decorations.join(","))
    }
}
