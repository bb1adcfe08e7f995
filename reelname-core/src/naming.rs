use crate::error::{PatternError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user template such as `sh####` or `_L#`, split around its first run of
/// `#` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamingPattern {
    pub literal_prefix: String,
    pub number_width: usize,
    pub literal_suffix: String,
}

impl NamingPattern {
    pub fn new(literal_prefix: impl Into<String>, number_width: usize) -> Self {
        Self {
            literal_prefix: literal_prefix.into(),
            number_width: number_width.max(1),
            literal_suffix: String::new(),
        }
    }

    /// Split `template` at its first `#` run. Width is the length of that run.
    pub fn parse(template: &str) -> Result<Self> {
        let start =
            template
                .find('#')
                .ok_or_else(|| PatternError::MissingPlaceholder {
                    template: template.to_string(),
                })?;
        let run = template[start..]
            .bytes()
            .take_while(|byte| *byte == b'#')
            .count();

        Ok(Self {
            literal_prefix: template[..start].to_string(),
            number_width: run,
            literal_suffix: template[start + run..].to_string(),
        })
    }

    /// Zero-pad `number` to the placeholder width. Numbers wider than the
    /// placeholder are rendered in full.
    pub fn render(&self, number: u64) -> String {
        format!(
            "{}{:0width$}{}",
            self.literal_prefix,
            number,
            self.literal_suffix,
            width = self.number_width
        )
    }
}

impl FromStr for NamingPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.literal_prefix,
            "#".repeat(self.number_width),
            self.literal_suffix
        )
    }
}

pub fn render_numbered_name(pattern: &NamingPattern, number: u64) -> String {
    pattern.render(number)
}

/// Render a stacked-layer suffix template (`_L#`). Templates without a
/// placeholder come back unchanged.
pub fn apply_suffix_pattern(pattern: &str, layer_index: u64) -> String {
    match NamingPattern::parse(pattern) {
        Ok(parsed) => parsed.render(layer_index),
        Err(_) => pattern.to_string(),
    }
}

/// Numbers handed out for a batch rename: `start`, `start + step`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSequence {
    pub start: u64,
    pub step: u64,
}

impl Default for NumberSequence {
    fn default() -> Self {
        Self {
            start: 10,
            step: 10,
        }
    }
}

impl NumberSequence {
    pub fn new(start: u64, step: u64) -> Self {
        Self { start, step }
    }

    /// Number for the zero-based `index`, saturating at `u64::MAX`.
    pub fn nth(&self, index: usize) -> u64 {
        let offset = self.step.saturating_mul(index as u64);
        self.start.saturating_add(offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..).map(move |index| self.nth(index))
    }
}
