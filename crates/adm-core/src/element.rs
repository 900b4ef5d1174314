use serde::{Deserialize, Serialize};

use crate::descriptor::{FormatDescriptor, TypeDescriptor};
use crate::id::{
    AudioBlockFormatId, AudioChannelFormatId, AudioContentId, AudioObjectId, AudioPackFormatId,
    AudioProgrammeId, AudioStreamFormatId, AudioTrackFormatId, AudioTrackUidId,
};
use crate::position::{
    GainInteractionRange, Position, PositionInteractionRange, PositionOffset, SpeakerPosition,
};
use crate::value::{
    ChannelLock, ContentKind, Frequency, Gain, HeadphoneVirtualise, JumpPosition, Label,
    LoudnessMetadata, ObjectDivergence, Time,
};

/// Marker for an `audioProgrammeReferenceScreen` child; the schema element
/// carries no decoded payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceScreen;

/// Entities are fully populated when their composite parser returns; the
/// `*_ref`/`*_refs` slots are the only fields touched afterwards, during
/// reference resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioProgramme {
    pub id: AudioProgrammeId,
    pub name: String,
    pub language: Option<String>,
    pub start: Option<Time>,
    pub end: Option<Time>,
    pub max_ducking_depth: Option<f64>,
    pub loudness_metadata: Vec<LoudnessMetadata>,
    pub reference_screen: Option<ReferenceScreen>,
    pub labels: Vec<Label>,
    pub content_refs: Vec<AudioContentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioContent {
    pub id: AudioContentId,
    pub name: String,
    pub language: Option<String>,
    pub loudness_metadata: Vec<LoudnessMetadata>,
    pub dialogue: Option<ContentKind>,
    pub labels: Vec<Label>,
    pub object_refs: Vec<AudioObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioObjectInteraction {
    pub on_off_interact: bool,
    pub gain_interact: Option<bool>,
    pub position_interact: Option<bool>,
    pub gain_interaction_range: Option<GainInteractionRange>,
    pub position_interaction_range: Option<PositionInteractionRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioObject {
    pub id: AudioObjectId,
    pub name: String,
    pub start: Option<Time>,
    pub duration: Option<Time>,
    pub dialogue_id: Option<u16>,
    pub importance: Option<i32>,
    pub interact: Option<bool>,
    pub disable_ducking: Option<bool>,
    pub mute: Option<bool>,
    pub head_locked: Option<bool>,
    pub gain: Option<Gain>,
    pub position_offset: Option<PositionOffset>,
    pub interaction: Option<AudioObjectInteraction>,
    pub labels: Vec<Label>,
    pub complementary_object_group_labels: Vec<Label>,
    pub object_refs: Vec<AudioObjectId>,
    pub pack_format_refs: Vec<AudioPackFormatId>,
    pub track_uid_refs: Vec<AudioTrackUidId>,
}

/// Extra fields only HOA pack formats carry; `Some` exactly when the
/// ID-derived type descriptor is HOA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoaPackFormatData {
    pub normalization: Option<String>,
    pub screen_ref: Option<bool>,
    pub nfc_ref_dist: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioPackFormat {
    pub id: AudioPackFormatId,
    pub name: String,
    pub type_descriptor: TypeDescriptor,
    pub importance: Option<i32>,
    pub absolute_distance: Option<f64>,
    pub hoa: Option<HoaPackFormatData>,
    pub channel_format_refs: Vec<AudioChannelFormatId>,
    pub pack_format_refs: Vec<AudioPackFormatId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBlockFormatDirectSpeakers {
    pub id: Option<AudioBlockFormatId>,
    pub rtime: Option<Time>,
    pub duration: Option<Time>,
    pub position: SpeakerPosition,
    pub speaker_labels: Vec<String>,
    pub head_locked: Option<bool>,
    pub headphone_virtualise: Option<HeadphoneVirtualise>,
    pub gain: Option<Gain>,
    pub importance: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBlockFormatObjects {
    pub id: Option<AudioBlockFormatId>,
    pub rtime: Option<Time>,
    pub duration: Option<Time>,
    pub cartesian: Option<bool>,
    pub position: Position,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub gain: Option<Gain>,
    pub diffuse: Option<f64>,
    pub channel_lock: Option<ChannelLock>,
    pub object_divergence: Option<ObjectDivergence>,
    pub jump_position: Option<JumpPosition>,
    pub screen_ref: Option<bool>,
    pub importance: Option<i32>,
    pub head_locked: Option<bool>,
    pub headphone_virtualise: Option<HeadphoneVirtualise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBlockFormatHoa {
    pub id: Option<AudioBlockFormatId>,
    pub rtime: Option<Time>,
    pub duration: Option<Time>,
    pub order: Option<i32>,
    pub degree: Option<i32>,
    pub nfc_ref_dist: Option<f64>,
    pub screen_ref: Option<bool>,
    pub normalization: Option<String>,
    pub equation: Option<String>,
    pub head_locked: Option<bool>,
    pub headphone_virtualise: Option<HeadphoneVirtualise>,
    pub gain: Option<Gain>,
    pub importance: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBlockFormatBinaural {
    pub id: Option<AudioBlockFormatId>,
    pub rtime: Option<Time>,
    pub duration: Option<Time>,
    pub gain: Option<Gain>,
    pub importance: Option<i32>,
}

/// Block format payload, shaped by the owning channel format's type
/// descriptor. Matrix blocks are recognized but never decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AudioBlockFormat {
    DirectSpeakers(AudioBlockFormatDirectSpeakers),
    Objects(AudioBlockFormatObjects),
    Hoa(AudioBlockFormatHoa),
    Binaural(AudioBlockFormatBinaural),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioChannelFormat {
    pub id: AudioChannelFormatId,
    pub name: String,
    pub type_descriptor: TypeDescriptor,
    pub frequency: Option<Frequency>,
    pub block_formats: Vec<AudioBlockFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStreamFormat {
    pub id: AudioStreamFormatId,
    pub name: String,
    pub format: FormatDescriptor,
    pub channel_format_ref: Option<AudioChannelFormatId>,
    pub pack_format_ref: Option<AudioPackFormatId>,
    pub track_format_refs: Vec<AudioTrackFormatId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrackFormat {
    pub id: AudioTrackFormatId,
    pub name: String,
    pub format: FormatDescriptor,
    pub stream_format_ref: Option<AudioStreamFormatId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrackUid {
    pub id: AudioTrackUidId,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u32>,
    pub channel_format_ref: Option<AudioChannelFormatId>,
    pub track_format_ref: Option<AudioTrackFormatId>,
    pub pack_format_ref: Option<AudioPackFormatId>,
}
