use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AdmError;

/// A gain keeps the unit it was written in; conversion to linear is a
/// presentation concern exposed for convenience.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "camelCase")]
pub enum Gain {
    Linear(f64),
    Db(f64),
}

impl Gain {
    pub fn from_linear(value: f64) -> Self {
        Self::Linear(value)
    }

    pub fn from_db(value: f64) -> Self {
        Self::Db(value)
    }

    pub fn as_linear(&self) -> f64 {
        match self {
            Self::Linear(value) => *value,
            Self::Db(value) => 10f64.powf(value / 20.0),
        }
    }
}

/// Timecode value: either plain nanoseconds or an exact sample-locked
/// fraction of a second on top of whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Time {
    Nanoseconds { value: u64 },
    Fractional { numerator: u64, denominator: u64 },
}

impl Time {
    pub fn from_seconds(seconds: u64) -> Self {
        Self::Nanoseconds {
            value: seconds * 1_000_000_000,
        }
    }
}

fn timecode_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})\.(\d+)(?:S(\d+))?$")
            .expect("timecode regex must compile")
    })
}

/// Decodes `hh:mm:ss.fffff` (nanoseconds, up to nine fraction digits) or
/// `hh:mm:ss.<numerator>S<denominator>` (fractional).
pub fn parse_timecode(raw: &str) -> Result<Time, AdmError> {
    let invalid = || {
        AdmError::new(
            "INVALID_VALUE",
            format!("Invalid timecode \"{}\".", raw),
        )
    };

    let caps = timecode_regex().captures(raw.trim()).ok_or_else(invalid)?;
    let hours: u64 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: u64 = caps[2].parse().map_err(|_| invalid())?;
    let seconds: u64 = caps[3].parse().map_err(|_| invalid())?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    let whole_seconds = hours * 3600 + minutes * 60 + seconds;

    if let Some(denominator) = caps.get(5) {
        let numerator: u64 = caps[4].parse().map_err(|_| invalid())?;
        let denominator: u64 = denominator.as_str().parse().map_err(|_| invalid())?;
        if denominator == 0 {
            return Err(invalid());
        }
        return Ok(Time::Fractional {
            numerator: whole_seconds * denominator + numerator,
            denominator,
        });
    }

    let fraction = &caps[4];
    if fraction.len() > 9 {
        return Err(invalid());
    }
    let mut nanos: u64 = fraction.parse().map_err(|_| invalid())?;
    for _ in fraction.len()..9 {
        nanos *= 10;
    }
    Ok(Time::Nanoseconds {
        value: whole_seconds * 1_000_000_000 + nanos,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub value: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoudnessMetadata {
    pub method: Option<String>,
    pub rec_type: Option<String>,
    pub correction_type: Option<String>,
    pub integrated_loudness: Option<f64>,
    pub loudness_range: Option<f64>,
    pub max_true_peak: Option<f64>,
    pub max_momentary: Option<f64>,
    pub max_short_term: Option<f64>,
    pub dialogue_loudness: Option<f64>,
}

/// Dialogue polymorphism: the dialogue element's integer text selects which
/// of three disjoint sub-kind attributes is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ContentKind {
    NonDialogue(u16),
    Dialogue(u16),
    Mixed(u16),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub low_pass: Option<f64>,
    pub high_pass: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalEdge {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalEdge {
    Top,
    Bottom,
}

pub fn parse_horizontal_edge(raw: &str) -> Result<HorizontalEdge, AdmError> {
    match raw.trim() {
        "left" => Ok(HorizontalEdge::Left),
        "right" => Ok(HorizontalEdge::Right),
        _ => Err(AdmError::new(
            "INVALID_VALUE",
            format!("Invalid value \"{}\" for \"screenEdgeLock\".", raw),
        )),
    }
}

pub fn parse_vertical_edge(raw: &str) -> Result<VerticalEdge, AdmError> {
    match raw.trim() {
        "top" => Ok(VerticalEdge::Top),
        "bottom" => Ok(VerticalEdge::Bottom),
        _ => Err(AdmError::new(
            "INVALID_VALUE",
            format!("Invalid value \"{}\" for \"screenEdgeLock\".", raw),
        )),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenEdgeLock {
    pub horizontal: Option<HorizontalEdge>,
    pub vertical: Option<VerticalEdge>,
}

impl ScreenEdgeLock {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadphoneVirtualise {
    pub bypass: Option<bool>,
    pub direct_to_reverberant_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelLock {
    pub flag: bool,
    pub max_distance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectDivergence {
    pub value: f64,
    pub azimuth_range: Option<f64>,
    pub position_range: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpPosition {
    pub flag: bool,
    /// Seconds.
    pub interpolation_length: Option<f64>,
}
