use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

static RESOLUTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,5})\s*[xX]\s*(\d{1,5})\s*$")
        .expect("resolution regex should compile")
});

/// Frame size as reported by a clip's resolution property (`1920x1080`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let captures = RESOLUTION_PATTERN.captures(value)?;
        let width: u32 = captures[1].parse().ok()?;
        let height: u32 = captures[2].parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Largest frames first, then widest, then tallest.
impl Ord for Resolution {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .pixel_count()
            .cmp(&self.pixel_count())
            .then_with(|| other.width.cmp(&self.width))
            .then_with(|| other.height.cmp(&self.height))
    }
}

impl PartialOrd for Resolution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Key for a resolution bucket. `Unknown` sorts after every real size.
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
pub enum ResolutionGroup {
    Known(Resolution),
    Unknown,
}

impl fmt::Display for ResolutionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(resolution) => write!(f, "{resolution}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Bucket `(item, resolution string)` pairs. Items keep their input order
/// inside each bucket.
pub fn group_by_resolution<T, I, S>(
    items: I,
) -> BTreeMap<ResolutionGroup, Vec<T>>
where
    I: IntoIterator<Item = (T, S)>,
    S: AsRef<str>,
{
    let mut groups: BTreeMap<ResolutionGroup, Vec<T>> = BTreeMap::new();
    for (item, raw) in items {
        let key = Resolution::parse(raw.as_ref())
            .map(ResolutionGroup::Known)
            .unwrap_or(ResolutionGroup::Unknown);
        groups.entry(key).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(
            Resolution::parse("1920x1080"),
            Some(Resolution::new(1920, 1080))
        );
        assert_eq!(
            Resolution::parse("3840 X 2160"),
            Some(Resolution::new(3840, 2160))
        );
        assert_eq!(Resolution::parse("1920*1080"), None);
        assert_eq!(Resolution::parse("0x1080"), None);
        assert_eq!(Resolution::parse(""), None);
    }

    #[test]
    fn test_group_by_resolution_orders_largest_first() {
        let clips = vec![
            ("A001C001", "1920x1080"),
            ("A001C002", "3840x2160"),
            ("B001C001", "1920x1080"),
            ("GFX_01", ""),
            ("A001C003", "1080x1920"),
        ];

        let groups = group_by_resolution(clips);
        let labels: Vec<String> =
            groups.keys().map(|key| key.to_string()).collect();
        assert_eq!(
            labels,
            vec!["3840x2160", "1920x1080", "1080x1920", "unknown"]
        );

        let hd = &groups[&ResolutionGroup::Known(Resolution::new(1920, 1080))];
        assert_eq!(hd, &vec!["A001C001", "B001C001"]);
        assert_eq!(groups[&ResolutionGroup::Unknown], vec!["GFX_01"]);
    }
}
