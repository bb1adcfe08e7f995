//! Rename plans for whole bins of clips.
//!
//! A plan never drops a name: entries that no rule recognised stay in the
//! plan with `matched == false` and their original name, so the caller can
//! report them next to the ones it actually renames.

use crate::frame_range::{has_frame_range, strip_frame_range_and_extension};
use crate::naming::{NamingPattern, NumberSequence, apply_suffix_pattern};
use crate::reel_clip::parse_reel_clip;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub original: String,
    pub proposed: String,
    /// A rule recognised the name.
    pub matched: bool,
    /// `proposed` differs from `original`.
    pub changed: bool,
}

impl RenameEntry {
    fn matched(original: &str, proposed: String) -> Self {
        Self {
            changed: proposed != original,
            original: original.to_string(),
            proposed,
            matched: true,
        }
    }

    fn unmatched(original: &str) -> Self {
        Self {
            original: original.to_string(),
            proposed: original.to_string(),
            matched: false,
            changed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub entries: Vec<RenameEntry>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn changed(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(|entry| entry.changed)
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(|entry| !entry.matched)
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    fn log_summary(&self, kind: &str) {
        for entry in self.unmatched() {
            warn!(
                "{} rename left '{}' unchanged: no pattern matched",
                kind, entry.original
            );
        }
        debug!(
            "{} rename plan: {} entries, {} changed",
            kind,
            self.len(),
            self.changed_count()
        );
    }
}

/// Apply `transform` to every name in parallel. `None` marks a name as
/// unmatched. Plan order follows input order.
pub fn plan_with<S, F>(names: &[S], transform: F) -> RenamePlan
where
    S: AsRef<str> + Sync,
    F: Fn(&str) -> Option<String> + Sync,
{
    let entries = names
        .par_iter()
        .map(|name| {
            let name = name.as_ref();
            match transform(name) {
                Some(proposed) => RenameEntry::matched(name, proposed),
                None => RenameEntry::unmatched(name),
            }
        })
        .collect();

    RenamePlan { entries }
}

/// Rename camera-original clip names to their `A001C006` code.
pub fn plan_reel_clip_renames<S>(names: &[S]) -> RenamePlan
where
    S: AsRef<str> + Sync,
{
    let plan = plan_with(names, |name| {
        parse_reel_clip(name).map(|found| found.id.to_string())
    });
    plan.log_summary("reel/clip");
    plan
}

/// Drop frame-range annotations and extensions. Every name is considered
/// matched; names that had nothing to strip show up as unchanged.
pub fn plan_stripped_renames<S>(names: &[S]) -> RenamePlan
where
    S: AsRef<str> + Sync,
{
    let plan =
        plan_with(names, |name| Some(strip_frame_range_and_extension(name)));
    let ranged = names
        .iter()
        .filter(|name| has_frame_range(name.as_ref()))
        .count();
    debug!("{} of {} names carried a frame range", ranged, names.len());
    plan.log_summary("frame-range");
    plan
}

/// Number names in input order: the first name gets `sequence.start`.
pub fn plan_numbered_renames<S>(
    names: &[S],
    pattern: &NamingPattern,
    sequence: NumberSequence,
) -> RenamePlan
where
    S: AsRef<str>,
{
    let entries = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            RenameEntry::matched(
                name.as_ref(),
                pattern.render(sequence.nth(index)),
            )
        })
        .collect();

    let plan = RenamePlan { entries };
    plan.log_summary("numbered");
    plan
}

/// Name for a clip stacked on `layer_index` above a shot. Layer 1 is the
/// base plate and keeps the shot name.
pub fn stacked_layer_name(
    base: &str,
    suffix_template: &str,
    layer_index: u64,
) -> String {
    if layer_index <= 1 {
        return base.to_string();
    }
    format!("{}{}", base, apply_suffix_pattern(suffix_template, layer_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reel_clip_plan_keeps_order_and_unmatched() {
        let names = vec![
            "A001_10060927_C005.mov",
            "randomfile.txt",
            "A001C003",
            "A_0001C006_250116_101243_p1DTJ.mov",
        ];
        let plan = plan_reel_clip_renames(&names);

        let proposed: Vec<&str> =
            plan.entries.iter().map(|entry| entry.proposed.as_str()).collect();
        assert_eq!(
            proposed,
            vec!["A001C005", "randomfile.txt", "A001C003", "A001C006"]
        );

        assert!(!plan.entries[1].matched);
        assert!(!plan.entries[1].changed);
        // Matched, but already canonical.
        assert!(plan.entries[2].matched);
        assert!(!plan.entries[2].changed);
        assert_eq!(plan.changed_count(), 2);
        assert_eq!(plan.unmatched().count(), 1);
    }

    #[test]
    fn test_numbered_plan_uses_sequence() {
        let names = ["clip_a", "clip_b", "clip_c"];
        let pattern = NamingPattern::parse("sh####").unwrap();
        let plan =
            plan_numbered_renames(&names, &pattern, NumberSequence::default());

        let proposed: Vec<&str> =
            plan.entries.iter().map(|entry| entry.proposed.as_str()).collect();
        assert_eq!(proposed, vec!["sh0010", "sh0020", "sh0030"]);
        assert_eq!(plan.changed_count(), 3);
    }

    #[test]
    fn test_stripped_plan() {
        let names = ["clip_name_[1001-1130].exr", "already_clean"];
        let plan = plan_stripped_renames(&names);

        assert_eq!(plan.entries[0].proposed, "clip_name");
        assert!(plan.entries[0].changed);
        assert!(!plan.entries[1].changed);
    }

    #[test]
    fn test_stacked_layer_name() {
        assert_eq!(stacked_layer_name("sh0010", "_L#", 1), "sh0010");
        assert_eq!(stacked_layer_name("sh0010", "_L#", 2), "sh0010_L2");
        assert_eq!(stacked_layer_name("sh0010", "_L#", 12), "sh0010_L12");
    }

    #[test]
    fn test_empty_plan() {
        let names: Vec<String> = Vec::new();
        let plan = plan_reel_clip_renames(&names);
        assert!(plan.is_empty());
    }
}
