use crate::loader::error::ConfigLoadError;
use reelname_core::{
    NamingPattern, NumberSequence, ShotTokenRule, ShotTokenRules,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_TEMPLATE: &str = "sh####";
pub const DEFAULT_LAYER_SUFFIX: &str = "_L#";
pub const DEFAULT_FRAME_RATE: u32 = 24;

fn default_shot_rules() -> Vec<ShotRuleSpec> {
    ShotTokenRules::builtin()
        .rules()
        .iter()
        .map(|rule| ShotRuleSpec {
            name: rule.name().to_string(),
            pattern: rule.pattern().to_string(),
        })
        .collect()
}

/// Engine settings as they appear in `reelname.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Template and numbering for sequential shot renames.
    pub naming: NamingConfig,
    /// Suffix template appended to stacked layers 2 and up.
    pub layer_suffix: String,
    /// Integer frame rate used for timecode conversion.
    pub frame_rate: u32,
    /// Ordered shot token rules; the first rule that matches a path wins.
    /// Each pattern must define at least one of the `scene`, `shot` or
    /// `take` named groups.
    #[serde(default = "default_shot_rules")]
    pub shot_rules: Vec<ShotRuleSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            layer_suffix: DEFAULT_LAYER_SUFFIX.to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            shot_rules: default_shot_rules(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingConfig {
    pub template: String,
    pub start: u64,
    pub step: u64,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let sequence = NumberSequence::default();
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            start: sequence.start,
            step: sequence.step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShotRuleSpec {
    pub name: String,
    pub pattern: String,
}

/// Validated settings with templates and rules compiled.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub naming: NamingPattern,
    pub sequence: NumberSequence,
    pub layer_suffix: String,
    pub frame_rate: u32,
    pub shot_rules: ShotTokenRules,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<ResolvedConfig, ConfigLoadError> {
        if self.frame_rate == 0 {
            return Err(ConfigLoadError::ZeroFrameRate);
        }
        if self.naming.step == 0 {
            return Err(ConfigLoadError::ZeroStep);
        }

        let naming = NamingPattern::parse(&self.naming.template)?;
        let rules = self
            .shot_rules
            .iter()
            .map(|spec| ShotTokenRule::new(spec.name.clone(), &spec.pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let shot_rules = ShotTokenRules::new(rules);
        if shot_rules.is_empty() {
            warn!(
                "No shot rules configured; versions will carry no shot tokens"
            );
        }

        Ok(ResolvedConfig {
            naming,
            sequence: NumberSequence::new(self.naming.start, self.naming.step),
            layer_suffix: self.layer_suffix.clone(),
            frame_rate: self.frame_rate,
            shot_rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let resolved = EngineConfig::default().validate().unwrap();
        assert_eq!(resolved.naming.render(10), "sh0010");
        assert_eq!(resolved.sequence, NumberSequence::new(10, 10));
        assert_eq!(resolved.frame_rate, 24);
        assert_eq!(resolved.shot_rules.rules().len(), 2);
        assert_eq!(resolved.shot_rules.rules()[0].name(), "sequence_shot");
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = EngineConfig::default();
        config.frame_rate = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigLoadError::ZeroFrameRate)
        ));

        let mut config = EngineConfig::default();
        config.naming.step = 0;
        assert!(matches!(config.validate(), Err(ConfigLoadError::ZeroStep)));
    }

    #[test]
    fn test_empty_shot_rules_are_allowed() {
        let mut config = EngineConfig::default();
        config.shot_rules.clear();

        let resolved = config.validate().unwrap();
        assert!(resolved.shot_rules.is_empty());
    }

    #[test]
    fn test_bad_template_and_rule_rejected() {
        let mut config = EngineConfig::default();
        config.naming.template = "shot".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigLoadError::Pattern(_))
        ));

        let mut config = EngineConfig::default();
        config.shot_rules.push(ShotRuleSpec {
            name: "broken".to_string(),
            pattern: "(?P<shot>SH".to_string(),
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigLoadError::Pattern(_))
        ));
    }
}
