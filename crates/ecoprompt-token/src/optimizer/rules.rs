//! Rewrite rule tables.
//!
//! Every rule is compiled once, on first use, into an immutable table per
//! stage. Table order is execution order.

use ecoprompt_core::Strategy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PolitePhrasing,
    FillerWords,
    PassiveVoice,
    PhraseShortening,
    Structure,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Self::PolitePhrasing,
        Self::FillerWords,
        Self::PassiveVoice,
        Self::PhraseShortening,
        Self::Structure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PolitePhrasing => "polite phrasing",
            Self::FillerWords => "filler words",
            Self::PassiveVoice => "passive voice",
            Self::PhraseShortening => "phrase shortening",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a matched span is replaced with.
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// Fixed text. Capitalized when the match starts with an uppercase letter.
    Literal(&'static str),
    /// Capture-group template such as `"$1 exists"`.
    Expand(&'static str),
}

/// Where in a sentence a match may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Anywhere,
    /// Start of the text or after `.`, `!` or `?`.
    SentenceStart,
    /// Sentence start, or after `,`, `;` or `:`.
    ClauseStart,
    /// Anywhere except a sentence start.
    MidSentence,
}

impl Position {
    fn allows(self, preceding: &str) -> bool {
        let preceding = preceding.trim_end();
        let sentence_start = preceding.is_empty() || preceding.ends_with(SENTENCE_END);
        match self {
            Self::Anywhere => true,
            Self::SentenceStart => sentence_start,
            Self::ClauseStart => sentence_start || preceding.ends_with(CLAUSE_END),
            Self::MidSentence => !sentence_start,
        }
    }
}

const SENTENCE_END: [char; 3] = ['.', '!', '?'];
const CLAUSE_END: [char; 3] = [',', ';', ':'];
const SEPARATORS: [char; 2] = [',', ';'];
const PUNCTUATION: [char; 6] = [',', '.', ';', ':', '!', '?'];

/// A single named rewrite rule.
#[derive(Debug)]
pub struct Rule {
    name: String,
    pattern: Regex,
    replacement: Replacement,
    position: Position,
}

impl Rule {
    /// Build a rule. Patterns are always case-insensitive.
    fn new(name: impl Into<String>, pattern: &str, replacement: Replacement) -> Self {
        let pattern = Regex::new(&format!("(?i){}", pattern))
            .unwrap_or_else(|e| panic!("invalid rule pattern {:?}: {}", pattern, e));
        Self {
            name: name.into(),
            pattern,
            replacement,
            position: Position::Anywhere,
        }
    }

    fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace every accepted match in `text`. Returns `None` when nothing
    /// was replaced.
    ///
    /// A match is skipped when it starts in a position the rule does not
    /// allow, or when it touches a hyphen ("Hi-fi"). Where a match is removed
    /// outright, the seam it leaves is tidied: no space before punctuation,
    /// no separator doubled up against other punctuation, and the next word
    /// capitalized if a capitalized sentence opener was removed.
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut out = String::with_capacity(text.len());
        let mut seam = Seam::default();
        let mut last = 0;
        let mut replaced_any = false;

        for caps in self.pattern.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let preceding = &text[..m.start()];
            if !self.position.allows(preceding)
                || preceding.ends_with('-')
                || text[m.end()..].starts_with('-')
            {
                continue;
            }

            seam.push(&mut out, &text[last..m.start()]);

            let replacement = match self.replacement {
                Replacement::Literal(literal) => follow_case(m.as_str(), literal).into_owned(),
                Replacement::Expand(template) => {
                    let mut expanded = String::new();
                    caps.expand(template, &mut expanded);
                    expanded
                }
            };

            if replacement.trim().is_empty() {
                let opener = m.as_str().starts_with(char::is_uppercase)
                    && Position::SentenceStart.allows(preceding);
                seam.open(opener);
            }
            seam.push(&mut out, &replacement);

            last = m.end();
            replaced_any = true;
        }

        if !replaced_any {
            return None;
        }

        seam.finish(&mut out, &text[last..]);
        Some(out)
    }
}

/// Pending tidy-up where a match was removed.
#[derive(Debug, Default)]
struct Seam {
    open: bool,
    capitalize: bool,
}

impl Seam {
    fn open(&mut self, capitalize: bool) {
        self.capitalize |= capitalize;
        self.open = true;
    }

    /// Append `segment`, closing the seam at its first non-blank character.
    fn push(&mut self, out: &mut String, segment: &str) {
        let mut rest = segment.trim_start();
        if !self.open || rest.is_empty() {
            out.push_str(segment);
            return;
        }

        let mut lead = &segment[..segment.len() - rest.len()];
        if rest.starts_with(PUNCTUATION) {
            out.truncate(out.trim_end().len());
            lead = "";
            if out.ends_with(SEPARATORS) {
                out.pop();
            } else if rest.starts_with(SEPARATORS)
                && (out.is_empty() || out.ends_with(SENTENCE_END))
            {
                rest = rest.trim_start_matches(SEPARATORS).trim_start();
                if !out.is_empty() {
                    lead = " ";
                }
            }
        }

        out.push_str(lead);
        if self.capitalize {
            let mut chars = rest.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        } else {
            out.push_str(rest);
        }
        *self = Self::default();
    }

    /// Append the tail of the text. A removal at the very end drops the
    /// separator it leaves dangling.
    fn finish(&mut self, out: &mut String, tail: &str) {
        if self.open && tail.trim().is_empty() {
            out.truncate(out.trim_end().len());
            while out.ends_with(SEPARATORS) {
                out.pop();
            }
            out.truncate(out.trim_end().len());
            return;
        }
        self.push(out, tail);
    }
}

/// Uppercase the first letter of `replacement` if `matched` starts uppercase.
fn follow_case<'a>(matched: &str, replacement: &'a str) -> Cow<'a, str> {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if starts_upper && first.is_lowercase() => {
            Cow::Owned(first.to_uppercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(replacement),
    }
}

/// Turn a plain phrase into a whole-phrase pattern tolerant of runs of whitespace.
fn phrase_pattern(phrase: &str) -> String {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    format!(r"\b{}\b", words.join(r"\s+"))
}

// ── Stage 1: polite phrasing ────────────────────────────────────

const REQUEST_PREFIX: &str = r"(?:(?:could|would|can|will)\s+you\s+)?(?:(?:please|kindly)\s+)?";
const REQUEST_VERB: &str = r"(?:provide|give|write)(?:\s+me)?(?:\s+with)?\s+(?:a|an)\s+";
const REQUEST_ADJECTIVE: &str =
    r"(?:(?:comprehensive|detailed|brief|short|quick|thorough|complete|full|clear|concise)\s+)?";

fn verbose_request(noun: &str) -> String {
    format!(
        r"\b{}{}{}{}\s+of\b",
        REQUEST_PREFIX, REQUEST_VERB, REQUEST_ADJECTIVE, noun
    )
}

/// Verbose request wrappers must come before the bare politeness wrappers,
/// which would otherwise consume their leading words.
static POLITE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "Condensed summary request",
            &verbose_request("summary"),
            Replacement::Literal("summarize"),
        ),
        Rule::new(
            "Condensed explanation request",
            &verbose_request("explanation"),
            Replacement::Literal("explain"),
        ),
        Rule::new(
            "Condensed description request",
            &verbose_request("description"),
            Replacement::Literal("describe"),
        ),
        Rule::new(
            "Condensed overview request",
            &verbose_request("overview"),
            Replacement::Literal("outline"),
        ),
        Rule::new(
            r#"Removed "I was wondering if you could""#,
            r"\bI\s+was\s+wondering\s+if\s+you\s+(?:could|would|can)\b",
            Replacement::Literal(""),
        ),
        Rule::new(
            r#"Removed "I would like you to""#,
            r"\bI\s+would\s+(?:like|love)\s+(?:for\s+)?you\s+to\b",
            Replacement::Literal(""),
        ),
        Rule::new(
            "Removed polite request wrapper",
            r"\b(?:could|would|can|will)\s+you\s+(?:please|kindly)\b",
            Replacement::Literal(""),
        ),
        Rule::new(
            r#"Removed "if you don't mind""#,
            r"\bif\s+you\s+(?:don't|do\s+not)\s+mind\b",
            Replacement::Literal(""),
        ),
        // Only a thanks that stands on its own: "Thanks to caching" stays.
        Rule::new(
            "Removed closing thanks",
            r"\b(?:thank\s+you|thanks)(?:\s+(?:so|very)\s+much|\s+in\s+advance|\s+for\s+your\s+help)?(?:\s*[.!]+|\s*$)",
            Replacement::Literal(""),
        )
        .at(Position::ClauseStart),
    ]
});

// ── Stage 2: filler words ───────────────────────────────────────

/// Low-information words and the weakest strategy that strips them.
pub const FILLER_WORDS: &[(&str, Strategy)] = &[
    ("please", Strategy::Conservative),
    ("kindly", Strategy::Conservative),
    ("hello", Strategy::Conservative),
    ("hi", Strategy::Conservative),
    ("hey", Strategy::Conservative),
    ("greetings", Strategy::Conservative),
    ("very", Strategy::Balanced),
    ("really", Strategy::Balanced),
    ("extremely", Strategy::Balanced),
    ("quite", Strategy::Balanced),
    ("actually", Strategy::Aggressive),
    ("basically", Strategy::Aggressive),
    ("essentially", Strategy::Aggressive),
    ("super", Strategy::Aggressive),
    ("highly", Strategy::Aggressive),
    ("literally", Strategy::Aggressive),
    ("totally", Strategy::Aggressive),
    ("just", Strategy::Aggressive),
];

static FILLER_RULES: LazyLock<Vec<(Strategy, Rule)>> = LazyLock::new(|| {
    FILLER_WORDS
        .iter()
        .map(|&(word, level)| {
            let rule = Rule::new(
                format!("Removed \"{}\"", word),
                &format!("{},?", phrase_pattern(word)),
                Replacement::Literal(""),
            );
            (level, rule)
        })
        .collect()
});

// ── Stage 3: passive and impersonal voice ───────────────────────

static PASSIVE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Sentence-final punctuation goes with the wrapper.
        Rule::new(
            "Converted passive request to direct instruction",
            r"\bit\s+is\s+requested\s+that\s+([^.!?]+)(?:[.!?]\s*$)?",
            Replacement::Expand("$1"),
        ),
        Rule::new(
            r#"Removed "it should be noted that""#,
            r"\bit\s+(?:should|must)\s+be\s+noted\s+that\s+",
            Replacement::Literal(""),
        )
        .at(Position::ClauseStart),
        Rule::new(
            "Removed impersonal emphasis",
            r"\bit\s+is\s+(?:important|necessary|essential)\s+(?:to\s+note\s+)?that\s+",
            Replacement::Literal(""),
        )
        .at(Position::ClauseStart),
        Rule::new(
            "Removed impersonal recommendation",
            r"\bit\s+is\s+(?:recommended|suggested|advised)\s+that\s+",
            Replacement::Literal(""),
        )
        .at(Position::ClauseStart),
        Rule::new(
            r#"Converted "there is" to active form"#,
            r"\bthere\s+is\s+([^.,;:!?]+)",
            Replacement::Expand("$1 exists"),
        ),
        Rule::new(
            r#"Converted "there are" to active form"#,
            r"\bthere\s+are\s+([^.,;:!?]+)",
            Replacement::Expand("$1 exist"),
        ),
    ]
});

// ── Stage 4: phrase shortening ──────────────────────────────────

/// Verbose phrase and its short synonym. Longer phrases first where one
/// contains another.
pub const SHORTER_PHRASES: &[(&str, &str)] = &[
    ("due to the fact that", "because"),
    ("in spite of the fact that", "although"),
    ("at this point in time", "now"),
    ("in the event that", "if"),
    ("in the near future", "soon"),
    ("for the purpose of", "for"),
    ("with respect to", "regarding"),
    ("with regard to", "regarding"),
    ("in relation to", "about"),
    ("prior to", "before"),
    ("subsequent to", "after"),
    ("in order to", "to"),
    ("a large number of", "many"),
    ("a majority of", "most"),
    ("in close proximity to", "near"),
    ("has the ability to", "can"),
    ("is able to", "can"),
    ("take into consideration", "consider"),
    ("make a decision", "decide"),
];

static SHORTENING_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    SHORTER_PHRASES
        .iter()
        .map(|&(verbose, short)| {
            Rule::new(
                format!("Shortened \"{}\" to \"{}\"", verbose, short),
                &phrase_pattern(verbose),
                Replacement::Literal(short),
            )
        })
        .collect()
});

// ── Stage 5: structure ──────────────────────────────────────────

const CONNECTIVES: &[&str] = &["along with", "as well as", "in addition to", "furthermore"];

static STRUCTURE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules: Vec<Rule> = CONNECTIVES
        .iter()
        .map(|connective| {
            Rule::new(
                format!("Replaced \"{}\" with a list separator", connective),
                &format!(r"\s*,?\s*{},?\s*", phrase_pattern(connective)),
                Replacement::Literal("; "),
            )
            .at(Position::MidSentence)
        })
        .collect();

    rules.push(
        Rule::new(
            "Removed sentence-opening connective",
            r"\b(?:furthermore|moreover|additionally)\b,?\s*",
            Replacement::Literal(""),
        )
        .at(Position::SentenceStart),
    );

    // "What can you do" is left alone.
    rules.push(
        Rule::new(
            "Converted question to imperative",
            r"\b(?:can|could|would|will)\s+you\s+",
            Replacement::Literal(""),
        )
        .at(Position::SentenceStart),
    );

    rules
});

/// Rules run by `stage` under `strategy`, in execution order.
pub fn for_stage(stage: Stage, strategy: Strategy) -> Vec<&'static Rule> {
    match stage {
        Stage::PolitePhrasing => POLITE_RULES.iter().collect(),
        Stage::FillerWords => FILLER_RULES
            .iter()
            .filter(|(level, _)| *level <= strategy)
            .map(|(_, rule)| rule)
            .collect(),
        Stage::PassiveVoice => PASSIVE_RULES.iter().collect(),
        Stage::PhraseShortening => SHORTENING_RULES.iter().collect(),
        Stage::Structure => STRUCTURE_RULES.iter().collect(),
    }
}
