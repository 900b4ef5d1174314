use adm_core::{
    check_channel_type, check_format, parse_audio_channel_format_id, parse_audio_content_id,
    parse_audio_object_id, parse_audio_pack_format_id, parse_audio_programme_id,
    parse_audio_stream_format_id, parse_audio_track_format_id, parse_audio_track_uid_id,
    parse_format_definition, parse_format_label, parse_type_definition, parse_type_label, AdmError,
    AudioContent, AudioObject, AudioObjectInteraction, AudioProgramme, AudioStreamFormat,
    AudioTrackFormat, AudioTrackUid, ContentKind, Gain, GainInteractionRange, HoaPackFormatData,
    Label, LoudnessMetadata, PositionInteractionRange, ReferenceScreen, SphericalInteractionRange,
    CartesianInteractionRange, AudioPackFormat, TypeDescriptor,
};
use adm_xml::XmlElementNode;

use crate::blocks::parse_position_offset;
use crate::collector::ReferenceCollector;
use crate::helpers::{
    decode_f64, decode_u16, f64_content, optional_attr, optional_bool_attr, optional_bool_element,
    optional_f64_attr, optional_f64_element, optional_i32_attr, optional_string_element,
    optional_timecode_attr, optional_u32_attr, required_attr,
};

/// A gain element keeps its text value in the unit named by `gainUnit`;
/// absent means linear.
pub(crate) fn parse_gain(node: &XmlElementNode) -> Result<Gain, AdmError> {
    let value = f64_content(node)?;
    match node.attribute("gainUnit") {
        None | Some("linear") => Ok(Gain::from_linear(value)),
        Some("dB") => Ok(Gain::from_db(value)),
        Some(other) => Err(AdmError::with_span(
            "UNEXPECTED_ATTR_VALUE",
            format!(
                "Unexpected gainUnit \"{}\", expected \"linear\" or \"dB\".",
                other
            ),
            node.location.clone(),
        )),
    }
}

pub(crate) fn parse_label(node: &XmlElementNode) -> Label {
    Label {
        value: node.text_content().trim().to_string(),
        language: optional_attr(node, "language"),
    }
}

pub(crate) fn parse_loudness_metadata(
    node: &XmlElementNode,
) -> Result<LoudnessMetadata, AdmError> {
    Ok(LoudnessMetadata {
        method: optional_attr(node, "loudnessMethod"),
        rec_type: optional_attr(node, "loudnessRecType"),
        correction_type: optional_attr(node, "loudnessCorrectionType"),
        integrated_loudness: optional_f64_element(node, "integratedLoudness")?,
        loudness_range: optional_f64_element(node, "loudnessRange")?,
        max_true_peak: optional_f64_element(node, "maxTruePeak")?,
        max_momentary: optional_f64_element(node, "maxMomentary")?,
        max_short_term: optional_f64_element(node, "maxShortTerm")?,
        dialogue_loudness: optional_f64_element(node, "dialogueLoudness")?,
    })
}

/// The dialogue element's integer text selects which of three disjoint
/// sub-kind attributes is mandatory.
pub(crate) fn parse_content_kind(node: &XmlElementNode) -> Result<ContentKind, AdmError> {
    let dialogue = decode_u16(&node.text_content(), "dialogue", &node.location)?;
    match dialogue {
        0 => {
            let raw = required_attr(node, "nonDialogueContentKind")?;
            Ok(ContentKind::NonDialogue(decode_u16(
                &raw,
                "nonDialogueContentKind",
                &node.location,
            )?))
        }
        1 => {
            let raw = required_attr(node, "dialogueContentKind")?;
            Ok(ContentKind::Dialogue(decode_u16(
                &raw,
                "dialogueContentKind",
                &node.location,
            )?))
        }
        2 => {
            let raw = required_attr(node, "mixedContentKind")?;
            Ok(ContentKind::Mixed(decode_u16(
                &raw,
                "mixedContentKind",
                &node.location,
            )?))
        }
        other => Err(AdmError::with_span(
            "UNKNOWN_DIALOGUE_ID",
            format!("Unknown dialogue value \"{}\", expected 0, 1 or 2.", other),
            node.location.clone(),
        )),
    }
}

pub(crate) fn parse_audio_programme(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioProgramme, AdmError> {
    let id = parse_audio_programme_id(&required_attr(node, "audioProgrammeID")?)
        .map_err(|error| error.at(node.location.clone()))?;

    let mut loudness_metadata = Vec::new();
    for child in node.find_elements("loudnessMetadata") {
        loudness_metadata.push(parse_loudness_metadata(child)?);
    }

    let mut labels = Vec::new();
    for child in node.find_elements("audioProgrammeLabel") {
        labels.push(parse_label(child));
    }

    for child in node.find_elements("audioContentIDRef") {
        let target = parse_audio_content_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.programme_content.push((id, target, child.location.clone()));
    }

    Ok(AudioProgramme {
        id,
        name: required_attr(node, "audioProgrammeName")?,
        language: optional_attr(node, "audioProgrammeLanguage"),
        start: optional_timecode_attr(node, "start")?,
        end: optional_timecode_attr(node, "end")?,
        max_ducking_depth: optional_f64_attr(node, "maxDuckingDepth")?,
        loudness_metadata,
        reference_screen: node
            .find_element("audioProgrammeReferenceScreen")
            .map(|_| ReferenceScreen),
        labels,
        content_refs: Vec::new(),
    })
}

pub(crate) fn parse_audio_content(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioContent, AdmError> {
    let id = parse_audio_content_id(&required_attr(node, "audioContentID")?)
        .map_err(|error| error.at(node.location.clone()))?;

    let mut loudness_metadata = Vec::new();
    for child in node.find_elements("loudnessMetadata") {
        loudness_metadata.push(parse_loudness_metadata(child)?);
    }

    let mut labels = Vec::new();
    for child in node.find_elements("audioContentLabel") {
        labels.push(parse_label(child));
    }

    for child in node.find_elements("audioObjectIDRef") {
        let target = parse_audio_object_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.content_object.push((id, target, child.location.clone()));
    }

    Ok(AudioContent {
        id,
        name: required_attr(node, "audioContentName")?,
        language: optional_attr(node, "audioContentLanguage"),
        loudness_metadata,
        dialogue: node
            .find_element("dialogue")
            .map(parse_content_kind)
            .transpose()?,
        labels,
        object_refs: Vec::new(),
    })
}

pub(crate) fn parse_gain_interaction_range(
    node: &XmlElementNode,
) -> Result<Option<GainInteractionRange>, AdmError> {
    let mut range: Option<GainInteractionRange> = None;
    for child in node.find_elements("gainInteractionRange") {
        let bound = required_attr(child, "bound")?;
        let gain = parse_gain(child)?;
        match bound.as_str() {
            "min" => range.get_or_insert_with(Default::default).min = Some(gain),
            "max" => range.get_or_insert_with(Default::default).max = Some(gain),
            // Unrecognized bounds carry no slot to fill.
            _ => {}
        }
    }
    Ok(range)
}

pub(crate) fn parse_position_interaction_range(
    node: &XmlElementNode,
) -> Result<Option<PositionInteractionRange>, AdmError> {
    let mut range: Option<PositionInteractionRange> = None;
    for child in node.find_elements("positionInteractionRange") {
        let coordinate = required_attr(child, "coordinate")?;
        let bound = required_attr(child, "bound")?;
        let value = decode_f64(&child.text_content(), &coordinate, &child.location)?;
        match coordinate.as_str() {
            "azimuth" | "elevation" | "distance" => {
                let PositionInteractionRange::Spherical(target) = range
                    .get_or_insert_with(|| {
                        PositionInteractionRange::Spherical(SphericalInteractionRange::default())
                    })
                else {
                    continue;
                };
                let slot = match (coordinate.as_str(), bound.as_str()) {
                    ("azimuth", "min") => &mut target.azimuth_min,
                    ("azimuth", "max") => &mut target.azimuth_max,
                    ("elevation", "min") => &mut target.elevation_min,
                    ("elevation", "max") => &mut target.elevation_max,
                    ("distance", "min") => &mut target.distance_min,
                    ("distance", "max") => &mut target.distance_max,
                    _ => continue,
                };
                *slot = Some(value);
            }
            "X" | "Y" | "Z" => {
                let PositionInteractionRange::Cartesian(target) = range
                    .get_or_insert_with(|| {
                        PositionInteractionRange::Cartesian(CartesianInteractionRange::default())
                    })
                else {
                    continue;
                };
                let slot = match (coordinate.as_str(), bound.as_str()) {
                    ("X", "min") => &mut target.x_min,
                    ("X", "max") => &mut target.x_max,
                    ("Y", "min") => &mut target.y_min,
                    ("Y", "max") => &mut target.y_max,
                    ("Z", "min") => &mut target.z_min,
                    ("Z", "max") => &mut target.z_max,
                    _ => continue,
                };
                *slot = Some(value);
            }
            // Unrecognized coordinates carry no slot to fill.
            _ => {}
        }
    }
    Ok(range)
}

pub(crate) fn parse_audio_object_interaction(
    node: &XmlElementNode,
) -> Result<AudioObjectInteraction, AdmError> {
    let raw = required_attr(node, "onOffInteract")?;
    Ok(AudioObjectInteraction {
        on_off_interact: crate::helpers::decode_bool(&raw, "onOffInteract", &node.location)?,
        gain_interact: optional_bool_attr(node, "gainInteract")?,
        position_interact: optional_bool_attr(node, "positionInteract")?,
        gain_interaction_range: parse_gain_interaction_range(node)?,
        position_interaction_range: parse_position_interaction_range(node)?,
    })
}

pub(crate) fn parse_audio_object(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioObject, AdmError> {
    let id = parse_audio_object_id(&required_attr(node, "audioObjectID")?)
        .map_err(|error| error.at(node.location.clone()))?;

    let mut labels = Vec::new();
    for child in node.find_elements("audioObjectLabel") {
        labels.push(parse_label(child));
    }
    let mut complementary_object_group_labels = Vec::new();
    for child in node.find_elements("audioComplementaryObjectGroupLabel") {
        complementary_object_group_labels.push(parse_label(child));
    }

    for child in node.find_elements("audioObjectIDRef") {
        let target = parse_audio_object_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.object_object.push((id, target, child.location.clone()));
    }
    for child in node.find_elements("audioPackFormatIDRef") {
        let target = parse_audio_pack_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.object_pack_format.push((id, target, child.location.clone()));
    }
    for child in node.find_elements("audioTrackUIDRef") {
        let target = parse_audio_track_uid_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.object_track_uid.push((id, target, child.location.clone()));
    }

    Ok(AudioObject {
        id,
        name: required_attr(node, "audioObjectName")?,
        start: optional_timecode_attr(node, "start")?,
        duration: optional_timecode_attr(node, "duration")?,
        dialogue_id: node
            .attribute("dialogue")
            .map(|raw| decode_u16(raw, "dialogue", &node.location))
            .transpose()?,
        importance: optional_i32_attr(node, "importance")?,
        interact: optional_bool_attr(node, "interact")?,
        disable_ducking: optional_bool_attr(node, "disableDucking")?,
        mute: optional_bool_element(node, "mute")?,
        head_locked: optional_bool_element(node, "headLocked")?,
        gain: node.find_element("gain").map(parse_gain).transpose()?,
        position_offset: parse_position_offset(node)?,
        interaction: node
            .find_element("audioObjectInteraction")
            .map(parse_audio_object_interaction)
            .transpose()?,
        labels,
        complementary_object_group_labels,
        object_refs: Vec::new(),
        pack_format_refs: Vec::new(),
        track_uid_refs: Vec::new(),
    })
}

pub(crate) fn parse_audio_pack_format(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioPackFormat, AdmError> {
    let id = parse_audio_pack_format_id(&required_attr(node, "audioPackFormatID")?)
        .map_err(|error| error.at(node.location.clone()))?;

    let type_label = node
        .attribute("typeLabel")
        .map(parse_type_label)
        .transpose()
        .map_err(|error| error.at(node.location.clone()))?;
    let type_definition = node
        .attribute("typeDefinition")
        .map(parse_type_definition)
        .transpose()
        .map_err(|error| error.at(node.location.clone()))?;
    check_channel_type(id.type_descriptor, type_label, type_definition)
        .map_err(|error| error.at(node.location.clone()))?;

    for child in node.find_elements("audioChannelFormatIDRef") {
        let target = parse_audio_channel_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.pack_format_channel_format
            .push((id, target, child.location.clone()));
    }
    for child in node.find_elements("audioPackFormatIDRef") {
        let target = parse_audio_pack_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.pack_format_pack_format
            .push((id, target, child.location.clone()));
    }

    let hoa = if id.type_descriptor == TypeDescriptor::Hoa {
        Some(HoaPackFormatData {
            normalization: optional_string_element(node, "normalization"),
            screen_ref: optional_bool_element(node, "screenRef")?,
            nfc_ref_dist: optional_f64_element(node, "nfcRefDist")?,
        })
    } else {
        None
    };

    Ok(AudioPackFormat {
        id,
        name: required_attr(node, "audioPackFormatName")?,
        type_descriptor: id.type_descriptor,
        importance: optional_i32_attr(node, "importance")?,
        absolute_distance: optional_f64_attr(node, "absoluteDistance")?,
        hoa,
        channel_format_refs: Vec::new(),
        pack_format_refs: Vec::new(),
    })
}

fn declared_format(
    node: &XmlElementNode,
) -> Result<adm_core::FormatDescriptor, AdmError> {
    let format_label = node
        .attribute("formatLabel")
        .map(parse_format_label)
        .transpose()
        .map_err(|error| error.at(node.location.clone()))?;
    let format_definition = node
        .attribute("formatDefinition")
        .map(parse_format_definition)
        .transpose()
        .map_err(|error| error.at(node.location.clone()))?;
    check_format(format_label, format_definition).map_err(|error| error.at(node.location.clone()))
}

pub(crate) fn parse_audio_stream_format(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioStreamFormat, AdmError> {
    let id = parse_audio_stream_format_id(&required_attr(node, "audioStreamFormatID")?)
        .map_err(|error| error.at(node.location.clone()))?;
    let format = declared_format(node)?;

    if let Some(child) = node.find_element("audioChannelFormatIDRef") {
        let target = parse_audio_channel_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.stream_format_channel_format
            .push((id, target, child.location.clone()));
    }
    if let Some(child) = node.find_element("audioPackFormatIDRef") {
        let target = parse_audio_pack_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.stream_format_pack_format
            .push((id, target, child.location.clone()));
    }
    for child in node.find_elements("audioTrackFormatIDRef") {
        let target = parse_audio_track_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.stream_format_track_format
            .push((id, target, child.location.clone()));
    }

    Ok(AudioStreamFormat {
        id,
        name: required_attr(node, "audioStreamFormatName")?,
        format,
        channel_format_ref: None,
        pack_format_ref: None,
        track_format_refs: Vec::new(),
    })
}

pub(crate) fn parse_audio_track_format(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioTrackFormat, AdmError> {
    let id = parse_audio_track_format_id(&required_attr(node, "audioTrackFormatID")?)
        .map_err(|error| error.at(node.location.clone()))?;
    let format = declared_format(node)?;

    if let Some(child) = node.find_element("audioStreamFormatIDRef") {
        let target = parse_audio_stream_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.track_format_stream_format
            .push((id, target, child.location.clone()));
    }

    Ok(AudioTrackFormat {
        id,
        name: required_attr(node, "audioTrackFormatName")?,
        format,
        stream_format_ref: None,
    })
}

pub(crate) fn parse_audio_track_uid(
    node: &XmlElementNode,
    refs: &mut ReferenceCollector,
) -> Result<AudioTrackUid, AdmError> {
    let id = parse_audio_track_uid_id(&required_attr(node, "UID")?)
        .map_err(|error| error.at(node.location.clone()))?;

    if let Some(child) = node.find_element("audioTrackFormatIDRef") {
        let target = parse_audio_track_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.track_uid_track_format
            .push((id, target, child.location.clone()));
    }
    if let Some(child) = node.find_element("audioChannelFormatIDRef") {
        let target = parse_audio_channel_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.track_uid_channel_format
            .push((id, target, child.location.clone()));
    }
    if let Some(child) = node.find_element("audioPackFormatIDRef") {
        let target = parse_audio_pack_format_id(&child.text_content())
            .map_err(|error| error.at(child.location.clone()))?;
        refs.track_uid_pack_format
            .push((id, target, child.location.clone()));
    }

    Ok(AudioTrackUid {
        id,
        sample_rate: optional_u32_attr(node, "sampleRate")?,
        bit_depth: optional_u32_attr(node, "bitDepth")?,
        channel_format_ref: None,
        track_format_ref: None,
        pack_format_ref: None,
    })
}
