use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

static TIMECODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}):(\d{2})$")
        .expect("timecode regex should compile")
});

/// Non-drop-frame `HH:MM:SS:FF` timecode. The frame rate is an exact integer
/// multiplier; 29.97/23.976 drop-frame correction is not applied.
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
pub struct Timecode {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl Timecode {
    pub fn parse(value: &str) -> Option<Self> {
        let captures = TIMECODE_PATTERN.captures(value)?;
        Some(Self {
            hours: captures[1].parse().ok()?,
            minutes: captures[2].parse().ok()?,
            seconds: captures[3].parse().ok()?,
            frames: captures[4].parse().ok()?,
        })
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }

    pub fn to_frame(&self, frame_rate: u32) -> u64 {
        self.total_seconds() * u64::from(frame_rate) + u64::from(self.frames)
    }

    /// Inverse of [`Timecode::to_frame`]. `None` for a zero frame rate or
    /// more than 99 hours.
    pub fn from_frame(frame: u64, frame_rate: u32) -> Option<Self> {
        if frame_rate == 0 {
            return None;
        }
        let rate = u64::from(frame_rate);
        let seconds_total = frame / rate;
        let hours = seconds_total / 3600;
        if hours > 99 {
            return None;
        }

        Some(Self {
            hours: hours as u32,
            minutes: ((seconds_total / 60) % 60) as u32,
            seconds: (seconds_total % 60) as u32,
            frames: (frame % rate) as u32,
        })
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

/// Frame count for `timecode`, or `0` when it is not strict `HH:MM:SS:FF`.
pub fn parse_timecode_to_frame(timecode: &str, frame_rate: u32) -> u64 {
    match Timecode::parse(timecode) {
        Some(parsed) => parsed.to_frame(frame_rate),
        None => {
            debug!("Unparseable timecode {:?}, using frame 0", timecode);
            0
        }
    }
}
