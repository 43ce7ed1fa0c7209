use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A demographic attribute that can be pulled out of free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Age,
    Location,
    Occupation,
}

impl Trait {
    /// Every trait, in the order rules are evaluated.
    pub const ALL: [Trait; 3] = [Trait::Age, Trait::Location, Trait::Occupation];

    pub fn label(&self) -> &'static str {
        match self {
            Trait::Age => "Age",
            Trait::Location => "Location",
            Trait::Occupation => "Occupation",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trigger phrase alternation followed by the capture shape for each trait.
///
/// Location and occupation captures are greedy and may run past the
/// phrase a reader would pick ("Denver and I like hiking"). Captures are
/// returned verbatim.
const RULE_TABLE: &[(Trait, &str)] = &[
    (Trait::Age, r"\b(?:I['`]m|I am) (\d{2})\b"),
    (Trait::Location, r"\b(?:I live in|I'm from) ([A-Z][A-Za-z ,]+)"),
    (Trait::Occupation, r"\b(?:I work as|I am a|I'm a) ([A-Za-z ]+)"),
];

/// One compiled extraction rule.
#[derive(Debug)]
pub struct TraitRule {
    pub kind: Trait,
    pattern: Regex,
}

impl TraitRule {
    fn compile(kind: Trait, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// Return the first capture in `text`, if any.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

static RULES: Lazy<Vec<TraitRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|(kind, pattern)| TraitRule::compile(*kind, pattern))
        .collect()
});

/// All extraction rules in evaluation order.
pub fn rules() -> &'static [TraitRule] {
    &RULES
}

/// Run the rule for `kind` against a single fragment.
pub fn extract(kind: Trait, text: &str) -> Option<String> {
    rules()
        .iter()
        .find(|rule| rule.kind == kind)
        .and_then(|rule| rule.apply(text))
}

pub fn extract_age(text: &str) -> Option<String> {
    extract(Trait::Age, text)
}

pub fn extract_location(text: &str) -> Option<String> {
    extract(Trait::Location, text)
}

pub fn extract_occupation(text: &str) -> Option<String> {
    extract(Trait::Occupation, text)
}
