use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Camera letter used in reel codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum ReelLetter {
    A,
    B,
    C,
    D,
}

impl ReelLetter {
    pub fn from_char(value: char) -> Option<Self> {
        match value {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

/// Canonical camera reel + clip identifier, rendered as `A001C006`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReelClipId {
    pub reel_letter: ReelLetter,
    pub reel_number: u16,
    pub clip_number: u16,
}

impl fmt::Display for ReelClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:03}C{:03}",
            self.reel_letter.as_char(),
            self.reel_number,
            self.clip_number
        )
    }
}

/// Which entry of the rule table produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelClipRuleKind {
    /// `A001_10060927_C005`
    ReelUnderscoreClip,
    /// `A_0001C006_250116`
    FourDigitReel,
    /// `A001C003`
    Canonical,
}

impl ReelClipRuleKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::ReelUnderscoreClip => "reel_underscore_clip",
            Self::FourDigitReel => "four_digit_reel",
            Self::Canonical => "canonical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelClipMatch {
    pub id: ReelClipId,
    pub rule: ReelClipRuleKind,
}

struct ReelClipRule {
    kind: ReelClipRuleKind,
    pattern: Regex,
    build: fn(&Captures<'_>) -> Option<ReelClipId>,
}

/// Ordered: the first rule that matches wins. Digits are ASCII only, so a
/// regex match always builds an id.
static REEL_CLIP_RULES: Lazy<Vec<ReelClipRule>> = Lazy::new(|| {
    vec![
        ReelClipRule {
            kind: ReelClipRuleKind::ReelUnderscoreClip,
            pattern: Regex::new(r"([ABCD])([0-9]{3})_.*C([0-9]{3})")
                .expect("reel underscore clip regex should compile"),
            build: build_from_groups,
        },
        ReelClipRule {
            kind: ReelClipRuleKind::FourDigitReel,
            // Leading digit of the 4-digit reel is dropped.
            pattern: Regex::new(r"([ABCD])_[0-9]([0-9]{3})C([0-9]{3})")
                .expect("four digit reel regex should compile"),
            build: build_from_groups,
        },
        ReelClipRule {
            kind: ReelClipRuleKind::Canonical,
            pattern: Regex::new(r"([ABCD])([0-9]{3})C([0-9]{3})")
                .expect("canonical reel clip regex should compile"),
            build: build_from_groups,
        },
    ]
});

fn build_from_groups(captures: &Captures<'_>) -> Option<ReelClipId> {
    let reel_letter = captures.get(1)?.as_str().chars().next()?;
    Some(ReelClipId {
        reel_letter: ReelLetter::from_char(reel_letter)?,
        reel_number: captures.get(2)?.as_str().parse().ok()?,
        clip_number: captures.get(3)?.as_str().parse().ok()?,
    })
}

/// Drop everything from the last `.` onwards.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Run the rule table against `name` (extension removed first).
pub fn parse_reel_clip(name: &str) -> Option<ReelClipMatch> {
    let stem = strip_extension(name);

    for rule in REEL_CLIP_RULES.iter() {
        if let Some(captures) = rule.pattern.captures(stem)
            && let Some(id) = (rule.build)(&captures)
        {
            debug!(
                "Reel/clip rule {} matched {} -> {}",
                rule.kind.name(),
                name,
                id
            );
            return Some(ReelClipMatch {
                id,
                rule: rule.kind,
            });
        }
    }

    debug!("No reel/clip rule matched {}", name);
    None
}

/// Canonical `A001C006` code for `name`, or the extension-stripped name
/// when nothing matches.
pub fn extract_reel_clip(name: &str) -> String {
    match parse_reel_clip(name) {
        Some(found) => found.id.to_string(),
        None => strip_extension(name).to_string(),
    }
}
