use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FRAME_RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[._]\[\d+-\d+\]").expect("frame range regex should compile")
});
static DANGLING_SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[._]+(\.[A-Za-z0-9]+)$")
        .expect("dangling separator regex should compile")
});
static EXTENSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.[A-Za-z0-9]+$").expect("extension regex should compile")
});

/// True when `name` carries a `_[1001-1130]` style annotation.
pub fn has_frame_range(name: &str) -> bool {
    FRAME_RANGE_PATTERN.is_match(name)
}

/// Remove frame-range annotations, any separator left dangling in front of
/// the extension, and then the extension itself.
///
/// The range has to go first: in `shot_[1001-1100].exr` it sits directly
/// before the extension.
pub fn strip_frame_range_and_extension(name: &str) -> String {
    let without_range = FRAME_RANGE_PATTERN.replace_all(name, "");
    let collapsed = DANGLING_SEPARATOR_PATTERN.replace(&without_range, "$1");
    let stripped = EXTENSION_PATTERN.replace(&collapsed, "").into_owned();

    if stripped != name {
        debug!("Stripped frame range/extension: {} -> {}", name, stripped);
    }
    stripped
}
