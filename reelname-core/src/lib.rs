//! # Reelname Core
//!
//! Pattern engine for editorial clip naming: turns raw camera and VFX file
//! names into the identifiers a conform workflow renames clips to.
//!
//! ## Overview
//!
//! - **Reel/clip codes**: `A001_10060927_C005.mov` → `A001C005`
//! - **Frame ranges**: `clip_name_[1001-1130].exr` → `clip_name`
//! - **Numbered names**: `sh####` + 10 → `sh0010`, layer suffixes `_L#`
//! - **Timecode**: strict `HH:MM:SS:FF` to frame counts and back
//! - **Versions**: `_v###` markers with scene/shot/take tokens from the path
//! - **Resolutions**: `1920x1080` parsing and grouping
//! - **Rename plans**: batch application with unchanged names reported
//!
//! Every operation is a pure function of its input. Unrecognised input is
//! never an error: string functions hand the input back, the typed entry
//! points return `None`, and timecode falls back to frame `0`.
//!
//! ## Examples
//!
//! ```
//! use reelname_core::{extract_reel_clip, parse_timecode_to_frame};
//!
//! assert_eq!(extract_reel_clip("A_0001C006_250116.mov"), "A001C006");
//! assert_eq!(parse_timecode_to_frame("01:00:10:05", 25), 90_255);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Batch rename plans built on the individual rules
pub mod batch;

/// Error types for template and rule configuration
pub mod error;

/// Frame-range annotation and extension stripping
pub mod frame_range;

/// `#` placeholder templates and number sequences
pub mod naming;

/// Camera reel/clip code extraction
pub mod reel_clip;

/// Resolution parsing and grouping
pub mod resolution;

/// Timecode to frame conversion
pub mod timecode;

/// Version marker and shot token detection
pub mod version;

pub use batch::{
    RenameEntry, RenamePlan, plan_numbered_renames, plan_reel_clip_renames,
    plan_stripped_renames, plan_with, stacked_layer_name,
};
pub use error::{PatternError, Result};
pub use frame_range::{has_frame_range, strip_frame_range_and_extension};
pub use naming::{
    NamingPattern, NumberSequence, apply_suffix_pattern, render_numbered_name,
};
pub use reel_clip::{
    ReelClipId, ReelClipMatch, ReelClipRuleKind, ReelLetter,
    extract_reel_clip, parse_reel_clip,
};
pub use resolution::{Resolution, ResolutionGroup, group_by_resolution};
pub use timecode::{Timecode, parse_timecode_to_frame};
pub use version::{
    MAX_VERSION, ShotTokenRule, ShotTokenRules, ShotTokens, VersionedAssetName,
    detect_version,
};
