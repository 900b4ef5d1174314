use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::AdmError;

/// IDs follow the fixed hex grammars of the schema, e.g. `AP_00031001` for a
/// pack format whose `yyyy` field (`0003`) encodes the type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioProgrammeId {
    pub value: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioContentId {
    pub value: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioObjectId {
    pub value: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioPackFormatId {
    pub type_descriptor: TypeDescriptor,
    pub value: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioChannelFormatId {
    pub type_descriptor: TypeDescriptor,
    pub value: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioStreamFormatId {
    pub type_descriptor: TypeDescriptor,
    pub value: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioTrackFormatId {
    pub type_descriptor: TypeDescriptor,
    pub value: u16,
    pub counter: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioTrackUidId {
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioBlockFormatId {
    pub type_descriptor: TypeDescriptor,
    pub value: u16,
    pub counter: u32,
}

/// Union over every entity ID kind; the document's duplicate index and the
/// generic `contains` lookup work on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Programme(AudioProgrammeId),
    Content(AudioContentId),
    Object(AudioObjectId),
    PackFormat(AudioPackFormatId),
    ChannelFormat(AudioChannelFormatId),
    StreamFormat(AudioStreamFormatId),
    TrackFormat(AudioTrackFormatId),
    TrackUid(AudioTrackUidId),
}

impl fmt::Display for AudioProgrammeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "APR_{:04x}", self.value)
    }
}

impl fmt::Display for AudioContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACO_{:04x}", self.value)
    }
}

impl fmt::Display for AudioObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AO_{:04x}", self.value)
    }
}

impl fmt::Display for AudioPackFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AP_{:04x}{:04x}", self.type_descriptor.hex(), self.value)
    }
}

impl fmt::Display for AudioChannelFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AC_{:04x}{:04x}", self.type_descriptor.hex(), self.value)
    }
}

impl fmt::Display for AudioStreamFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS_{:04x}{:04x}", self.type_descriptor.hex(), self.value)
    }
}

impl fmt::Display for AudioTrackFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AT_{:04x}{:04x}_{:02x}",
            self.type_descriptor.hex(),
            self.value,
            self.counter
        )
    }
}

impl fmt::Display for AudioTrackUidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ATU_{:08x}", self.value)
    }
}

impl fmt::Display for AudioBlockFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AB_{:04x}{:04x}_{:08x}",
            self.type_descriptor.hex(),
            self.value,
            self.counter
        )
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Programme(id) => id.fmt(f),
            Self::Content(id) => id.fmt(f),
            Self::Object(id) => id.fmt(f),
            Self::PackFormat(id) => id.fmt(f),
            Self::ChannelFormat(id) => id.fmt(f),
            Self::StreamFormat(id) => id.fmt(f),
            Self::TrackFormat(id) => id.fmt(f),
            Self::TrackUid(id) => id.fmt(f),
        }
    }
}

fn invalid_id(field: &str, raw: &str) -> AdmError {
    AdmError::new(
        "INVALID_VALUE",
        format!("Invalid value \"{}\" for \"{}\".", raw, field),
    )
}

fn hex_u16(digits: &str, field: &str, raw: &str) -> Result<u16, AdmError> {
    u16::from_str_radix(digits, 16).map_err(|_| invalid_id(field, raw))
}

fn hex_u32(digits: &str, field: &str, raw: &str) -> Result<u32, AdmError> {
    u32::from_str_radix(digits, 16).map_err(|_| invalid_id(field, raw))
}

fn descriptor_field(digits: &str, field: &str, raw: &str) -> Result<TypeDescriptor, AdmError> {
    let value = hex_u16(digits, field, raw)?;
    TypeDescriptor::from_hex(value).ok_or_else(|| invalid_id(field, raw))
}

fn programme_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^APR_([0-9a-fA-F]{4})$").expect("programme id regex must compile")
    })
}

pub fn parse_audio_programme_id(raw: &str) -> Result<AudioProgrammeId, AdmError> {
    let caps = programme_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioProgrammeID", raw))?;
    Ok(AudioProgrammeId {
        value: hex_u16(&caps[1], "audioProgrammeID", raw)?,
    })
}

fn content_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^ACO_([0-9a-fA-F]{4})$").expect("content id regex must compile")
    })
}

pub fn parse_audio_content_id(raw: &str) -> Result<AudioContentId, AdmError> {
    let caps = content_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioContentID", raw))?;
    Ok(AudioContentId {
        value: hex_u16(&caps[1], "audioContentID", raw)?,
    })
}

fn object_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r"^AO_([0-9a-fA-F]{4})$").expect("object id regex must compile"))
}

pub fn parse_audio_object_id(raw: &str) -> Result<AudioObjectId, AdmError> {
    let caps = object_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioObjectID", raw))?;
    Ok(AudioObjectId {
        value: hex_u16(&caps[1], "audioObjectID", raw)?,
    })
}

fn pack_format_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^AP_([0-9a-fA-F]{4})([0-9a-fA-F]{4})$")
            .expect("pack format id regex must compile")
    })
}

pub fn parse_audio_pack_format_id(raw: &str) -> Result<AudioPackFormatId, AdmError> {
    let caps = pack_format_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioPackFormatID", raw))?;
    Ok(AudioPackFormatId {
        type_descriptor: descriptor_field(&caps[1], "audioPackFormatID", raw)?,
        value: hex_u16(&caps[2], "audioPackFormatID", raw)?,
    })
}

fn channel_format_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^AC_([0-9a-fA-F]{4})([0-9a-fA-F]{4})$")
            .expect("channel format id regex must compile")
    })
}

pub fn parse_audio_channel_format_id(raw: &str) -> Result<AudioChannelFormatId, AdmError> {
    let caps = channel_format_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioChannelFormatID", raw))?;
    Ok(AudioChannelFormatId {
        type_descriptor: descriptor_field(&caps[1], "audioChannelFormatID", raw)?,
        value: hex_u16(&caps[2], "audioChannelFormatID", raw)?,
    })
}

fn stream_format_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^AS_([0-9a-fA-F]{4})([0-9a-fA-F]{4})$")
            .expect("stream format id regex must compile")
    })
}

pub fn parse_audio_stream_format_id(raw: &str) -> Result<AudioStreamFormatId, AdmError> {
    let caps = stream_format_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioStreamFormatID", raw))?;
    Ok(AudioStreamFormatId {
        type_descriptor: descriptor_field(&caps[1], "audioStreamFormatID", raw)?,
        value: hex_u16(&caps[2], "audioStreamFormatID", raw)?,
    })
}

fn track_format_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^AT_([0-9a-fA-F]{4})([0-9a-fA-F]{4})_([0-9a-fA-F]{2})$")
            .expect("track format id regex must compile")
    })
}

pub fn parse_audio_track_format_id(raw: &str) -> Result<AudioTrackFormatId, AdmError> {
    let caps = track_format_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioTrackFormatID", raw))?;
    Ok(AudioTrackFormatId {
        type_descriptor: descriptor_field(&caps[1], "audioTrackFormatID", raw)?,
        value: hex_u16(&caps[2], "audioTrackFormatID", raw)?,
        counter: hex_u16(&caps[3], "audioTrackFormatID", raw)? as u8,
    })
}

fn track_uid_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^ATU_([0-9a-fA-F]{8})$").expect("track uid id regex must compile")
    })
}

pub fn parse_audio_track_uid_id(raw: &str) -> Result<AudioTrackUidId, AdmError> {
    let caps = track_uid_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("UID", raw))?;
    Ok(AudioTrackUidId {
        value: hex_u32(&caps[1], "UID", raw)?,
    })
}

fn block_format_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^AB_([0-9a-fA-F]{4})([0-9a-fA-F]{4})_([0-9a-fA-F]{8})$")
            .expect("block format id regex must compile")
    })
}

pub fn parse_audio_block_format_id(raw: &str) -> Result<AudioBlockFormatId, AdmError> {
    let caps = block_format_id_regex()
        .captures(raw.trim())
        .ok_or_else(|| invalid_id("audioBlockFormatID", raw))?;
    Ok(AudioBlockFormatId {
        type_descriptor: descriptor_field(&caps[1], "audioBlockFormatID", raw)?,
        value: hex_u16(&caps[2], "audioBlockFormatID", raw)?,
        counter: hex_u32(&caps[3], "audioBlockFormatID", raw)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_ids_parse_and_format_back() {
        let id = parse_audio_programme_id("APR_1001").unwrap();
        assert_eq!(id.value, 0x1001);
        assert_eq!(id.to_string(), "APR_1001");

        let id = parse_audio_content_id("ACO_00ff").unwrap();
        assert_eq!(id.value, 0x00ff);

        let id = parse_audio_object_id(" AO_1001 ").unwrap();
        assert_eq!(id.value, 0x1001);

        let id = parse_audio_track_uid_id("ATU_00000001").unwrap();
        assert_eq!(id.value, 1);
        assert_eq!(id.to_string(), "ATU_00000001");
    }

    #[test]
    fn descriptor_carrying_ids_decode_their_type_field() {
        let id = parse_audio_pack_format_id("AP_00031001").unwrap();
        assert_eq!(id.type_descriptor, TypeDescriptor::Objects);
        assert_eq!(id.value, 0x1001);
        assert_eq!(id.to_string(), "AP_00031001");

        let id = parse_audio_channel_format_id("AC_00011002").unwrap();
        assert_eq!(id.type_descriptor, TypeDescriptor::DirectSpeakers);

        let id = parse_audio_stream_format_id("AS_00040001").unwrap();
        assert_eq!(id.type_descriptor, TypeDescriptor::Hoa);

        let id = parse_audio_track_format_id("AT_00011002_01").unwrap();
        assert_eq!(id.counter, 1);
        assert_eq!(id.to_string(), "AT_00011002_01");

        let id = parse_audio_block_format_id("AB_00031001_00000002").unwrap();
        assert_eq!(id.type_descriptor, TypeDescriptor::Objects);
        assert_eq!(id.counter, 2);
        assert_eq!(id.to_string(), "AB_00031001_00000002");
    }

    #[test]
    fn malformed_ids_fail_with_invalid_value() {
        for raw in [
            "APR_10011",
            "APR_100",
            "AO_xyzw",
            "AP_1001",
            "AT_00011002",
            "ATU_0001",
            "AB_00031001",
            "audioProgramme",
        ] {
            let error = match raw.split('_').next().unwrap() {
                "APR" => parse_audio_programme_id(raw).unwrap_err(),
                "AO" => parse_audio_object_id(raw).unwrap_err(),
                "AP" => parse_audio_pack_format_id(raw).unwrap_err(),
                "AT" => parse_audio_track_format_id(raw).unwrap_err(),
                "ATU" => parse_audio_track_uid_id(raw).unwrap_err(),
                "AB" => parse_audio_block_format_id(raw).unwrap_err(),
                _ => parse_audio_programme_id(raw).unwrap_err(),
            };
            assert_eq!(error.code, "INVALID_VALUE", "raw: {}", raw);
        }
    }

    #[test]
    fn pack_format_id_with_unknown_type_field_is_rejected() {
        let error = parse_audio_pack_format_id("AP_00091001").unwrap_err();
        assert_eq!(error.code, "INVALID_VALUE");
    }

    #[test]
    fn element_id_display_delegates_to_the_inner_id() {
        let id = ElementId::PackFormat(parse_audio_pack_format_id("AP_00031001").unwrap());
        assert_eq!(id.to_string(), "AP_00031001");
    }
}
