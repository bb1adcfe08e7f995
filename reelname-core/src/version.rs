use crate::error::{PatternError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highest version that still renders in three digits.
pub const MAX_VERSION: u32 = 999;

static VERSION_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_[vV]([0-9]{3})(?:[./\\]|$)")
        .expect("version marker regex should compile")
});

static BUILTIN_RULES: Lazy<ShotTokenRules> = Lazy::new(|| {
    ShotTokenRules::new(vec![
        ShotTokenRule::new(
            "sequence_shot",
            r"(?P<scene>SEQ\d{2})[_/\\](?P<shot>SH\d{3})(?:_(?P<take>T\d{2,3}))?",
        )
        .expect("builtin sequence_shot rule should compile"),
        ShotTokenRule::new("shot", r"(?P<shot>SH\d{3})(?:_(?P<take>T\d{2,3}))?")
            .expect("builtin shot rule should compile"),
    ])
});

/// Scene/shot/take tokens picked out of a path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTokens {
    pub scene: Option<String>,
    pub shot: Option<String>,
    pub take: Option<String>,
}

impl ShotTokens {
    fn from_captures(captures: &Captures<'_>) -> Self {
        let group = |name: &str| {
            captures.name(name).map(|found| found.as_str().to_string())
        };
        Self {
            scene: group("scene"),
            shot: group("shot"),
            take: group("take"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_none() && self.shot.is_none() && self.take.is_none()
    }
}

/// Named regex whose `scene`, `shot` and `take` groups feed [`ShotTokens`].
#[derive(Debug, Clone)]
pub struct ShotTokenRule {
    name: String,
    pattern: Regex,
}

impl ShotTokenRule {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let pattern =
            Regex::new(pattern).map_err(|source| PatternError::InvalidRule {
                name: name.clone(),
                source,
            })?;

        let has_token_group = pattern
            .capture_names()
            .flatten()
            .any(|group| matches!(group, "scene" | "shot" | "take"));
        if !has_token_group {
            return Err(PatternError::NoTokenGroups { name });
        }

        Ok(Self { name, pattern })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Tokens from the match nearest the end of `text`.
    pub fn find(&self, text: &str) -> Option<ShotTokens> {
        let captures = self.pattern.captures_iter(text).last()?;
        let tokens = ShotTokens::from_captures(&captures);
        (!tokens.is_empty()).then_some(tokens)
    }
}

/// Ordered rule set, first rule with a match wins.
#[derive(Debug, Clone)]
pub struct ShotTokenRules {
    rules: Vec<ShotTokenRule>,
}

impl ShotTokenRules {
    pub fn new(rules: Vec<ShotTokenRule>) -> Self {
        Self { rules }
    }

    /// The conventional `SEQ##_SH###` then `SH###` rules.
    pub fn builtin() -> &'static ShotTokenRules {
        &BUILTIN_RULES
    }

    pub fn rules(&self) -> &[ShotTokenRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn match_tokens(&self, text: &str) -> Option<(&str, ShotTokens)> {
        self.rules
            .iter()
            .find_map(|rule| {
                rule.find(text).map(|tokens| (rule.name(), tokens))
            })
    }
}

impl Default for ShotTokenRules {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// A `<name>_v###.<ext>` asset with whatever shot context its path carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedAssetName {
    pub base_name: String,
    pub scene_name: Option<String>,
    pub shot_id: Option<String>,
    pub take: Option<String>,
    pub version_number: u32,
    pub extension: Option<String>,
}

impl VersionedAssetName {
    pub fn version_tag(&self) -> String {
        format!("v{:03}", self.version_number)
    }

    /// Same asset one version up; `None` once three digits run out.
    pub fn next_version(&self) -> Option<Self> {
        let next = self.version_number.checked_add(1)?;
        if next > MAX_VERSION {
            return None;
        }
        Some(Self {
            version_number: next,
            ..self.clone()
        })
    }

    pub fn file_name(&self) -> String {
        match &self.extension {
            Some(ext) => {
                format!("{}_{}.{}", self.base_name, self.version_tag(), ext)
            }
            None => format!("{}_{}", self.base_name, self.version_tag()),
        }
    }
}

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

/// Find the last `_v###` marker in `path` and attach shot tokens.
///
/// Shot rules run over the directories in front of the version-bearing
/// segment first. Only when none of them match is the segment's own base
/// name tried, which covers flat `SEQ01_SH010_comp_v001.exr` renders.
pub fn detect_version(
    path: &str,
    rules: &ShotTokenRules,
) -> Option<VersionedAssetName> {
    let captures = VERSION_MARKER_PATTERN.captures_iter(path).last()?;
    let marker = captures.get(0)?;
    let digits = captures.get(1)?;
    let version_number: u32 = digits.as_str().parse().ok()?;

    let before = &path[..marker.start()];
    let (directory, base_name) = match before.rfind(is_separator) {
        Some(idx) => (&before[..idx], &before[idx + 1..]),
        None => ("", before),
    };

    let after = &path[digits.end()..];
    let segment_end = after.find(is_separator).unwrap_or(after.len());
    let extension = after[..segment_end]
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string);

    let found = rules
        .match_tokens(directory)
        .or_else(|| rules.match_tokens(base_name));
    let (rule_name, tokens) = match found {
        Some((name, tokens)) => (Some(name), tokens),
        None => (None, ShotTokens::default()),
    };

    debug!(
        "Detected version v{:03} in {} (shot rule: {})",
        version_number,
        path,
        rule_name.unwrap_or("none")
    );

    Some(VersionedAssetName {
        base_name: base_name.to_string(),
        scene_name: tokens.scene,
        shot_id: tokens.shot,
        take: tokens.take,
        version_number,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_version_from_nested_shot_folders() {
        let asset = detect_version(
            "/show/SEQ01/SH010/comp/SH010_comp_v003.exr",
            ShotTokenRules::builtin(),
        )
        .unwrap();

        assert_eq!(asset.base_name, "SH010_comp");
        assert_eq!(asset.scene_name.as_deref(), Some("SEQ01"));
        assert_eq!(asset.shot_id.as_deref(), Some("SH010"));
        assert_eq!(asset.take, None);
        assert_eq!(asset.version_number, 3);
        assert_eq!(asset.extension.as_deref(), Some("exr"));
        assert_eq!(asset.file_name(), "SH010_comp_v003.exr");
    }

    #[test]
    fn test_detect_version_uppercase_marker_and_take() {
        let asset = detect_version(
            "renders/SEQ02_SH040_T03_grade_V012.mov",
            ShotTokenRules::builtin(),
        )
        .unwrap();

        assert_eq!(asset.version_number, 12);
        assert_eq!(asset.scene_name.as_deref(), Some("SEQ02"));
        assert_eq!(asset.shot_id.as_deref(), Some("SH040"));
        assert_eq!(asset.take.as_deref(), Some("T03"));
        assert_eq!(asset.version_tag(), "v012");
    }

    #[test]
    fn test_shot_rule_falls_through_to_bare_shot() {
        let asset = detect_version(
            r"D:\jobs\promo\SH200\plate_v001.dpx",
            ShotTokenRules::builtin(),
        )
        .unwrap();

        assert_eq!(asset.scene_name, None);
        assert_eq!(asset.shot_id.as_deref(), Some("SH200"));
        assert_eq!(asset.base_name, "plate");
    }

    #[test]
    fn test_directory_tokens_win_over_file_name() {
        let asset = detect_version(
            "/show/SH100/SH999_comp_v001.exr",
            ShotTokenRules::builtin(),
        )
        .unwrap();
        assert_eq!(asset.shot_id.as_deref(), Some("SH100"));

        let asset = detect_version(
            "/show/SH100/SEQ01_SH010_v001.exr",
            ShotTokenRules::builtin(),
        )
        .unwrap();
        assert_eq!(asset.scene_name, None);
        assert_eq!(asset.shot_id.as_deref(), Some("SH100"));
    }

    #[test]
    fn test_versioned_directory_segment() {
        let asset = detect_version(
            "/out/SH010_comp_v004/SH010_comp.0001.exr",
            ShotTokenRules::builtin(),
        )
        .unwrap();
        assert_eq!(asset.version_number, 4);
        assert_eq!(asset.base_name, "SH010_comp");
        assert_eq!(asset.extension, None);
    }

    #[test]
    fn test_frame_numbered_file_keeps_final_extension() {
        let rules = ShotTokenRules::builtin();
        let asset = detect_version("SH010_comp_v002.1001.exr", rules).unwrap();
        assert_eq!(asset.version_number, 2);
        assert_eq!(asset.extension.as_deref(), Some("exr"));
    }

    #[test]
    fn test_no_version_marker() {
        let rules = ShotTokenRules::builtin();
        assert!(detect_version("/show/SH010/comp.exr", rules).is_none());
        assert!(detect_version("comp_v12.exr", rules).is_none());
        assert!(detect_version("comp_v0123.exr", rules).is_none());
    }

    #[test]
    fn test_custom_rules_are_ordered() {
        let rules = ShotTokenRules::new(vec![
            ShotTokenRule::new("episode", r"(?P<scene>EP\d{2})").unwrap(),
            ShotTokenRule::new("shot", r"(?P<shot>SH\d{3})").unwrap(),
        ]);

        let asset = detect_version("EP03/SH010/comp_v001.exr", &rules).unwrap();
        assert_eq!(asset.scene_name.as_deref(), Some("EP03"));
        assert_eq!(asset.shot_id, None);
    }

    #[test]
    fn test_rule_without_token_groups_is_rejected() {
        let err = ShotTokenRule::new("bad", r"SH\d{3}").unwrap_err();
        assert!(matches!(err, PatternError::NoTokenGroups { .. }));

        let err =
            ShotTokenRule::new("broken", r"(?P<shot>SH\d{3}").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRule { .. }));
    }

    #[test]
    fn test_next_version_stops_at_three_digits() {
        let asset =
            detect_version("comp_v998.exr", ShotTokenRules::builtin()).unwrap();
        let next = asset.next_version().unwrap();
        assert_eq!(next.file_name(), "comp_v999.exr");
        assert!(next.next_version().is_none());
    }
}
