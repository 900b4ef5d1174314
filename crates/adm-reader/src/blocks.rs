use adm_core::{
    check_channel_type, invalid_value, parse_audio_block_format_id,
    parse_audio_channel_format_id, parse_horizontal_edge, parse_type_definition, parse_type_label,
    parse_vertical_edge, AdmError, AudioBlockFormat, AudioBlockFormatBinaural,
    AudioBlockFormatDirectSpeakers, AudioBlockFormatHoa, AudioBlockFormatId,
    AudioBlockFormatObjects, AudioChannelFormat, CartesianPosition, CartesianPositionOffset,
    CartesianSpeakerPosition, ChannelLock, Frequency, HeadphoneVirtualise, JumpPosition,
    ObjectDivergence, Position, PositionOffset, ScreenEdgeLock, SourceSpan, SpeakerPosition,
    SphericalPosition, SphericalPositionOffset, SphericalSpeakerPosition, TypeDescriptor,
};
use adm_xml::XmlElementNode;

use crate::elements::parse_gain;
use crate::helpers::{
    decode_f64, f64_content, missing_element, optional_bool_attr, optional_bool_element,
    optional_f64_attr, optional_f64_element, optional_i32_element, optional_string_element,
    optional_timecode_attr, required_attr,
};

fn mixed_coordinates(span: &SourceSpan) -> AdmError {
    AdmError::with_span(
        "MIXED_COORDINATES",
        "Position mixes spherical and Cartesian coordinates.",
        span.clone(),
    )
}

/// Channel frequencies arrive as repeated `frequency` elements whose
/// `typeDefinition` attribute names the filter edge. Unrecognized edge
/// names are skipped.
pub(crate) fn parse_frequency(node: &XmlElementNode) -> Result<Option<Frequency>, AdmError> {
    let mut frequency: Option<Frequency> = None;
    for child in node.find_elements("frequency") {
        let type_definition = required_attr(child, "typeDefinition")?;
        let value = decode_f64(&child.text_content(), "frequency", &child.location)?;
        match type_definition.as_str() {
            "lowPass" => frequency.get_or_insert_with(Default::default).low_pass = Some(value),
            "highpass" => frequency.get_or_insert_with(Default::default).high_pass = Some(value),
            _ => {}
        }
    }
    Ok(frequency)
}

/// The coordinate system is sniffed from the `coordinate` attributes of the
/// `position` children; spherical and Cartesian axes must not be mixed.
pub(crate) fn parse_position(node: &XmlElementNode) -> Result<Position, AdmError> {
    let mut spherical: Option<SphericalPosition> = None;
    let mut cartesian: Option<CartesianPosition> = None;
    let mut edge = ScreenEdgeLock::default();

    for child in node.find_elements("position") {
        let coordinate = required_attr(child, "coordinate")?;
        let value = decode_f64(&child.text_content(), &coordinate, &child.location)?;
        match coordinate.as_str() {
            "azimuth" | "elevation" | "distance" => {
                if cartesian.is_some() {
                    return Err(mixed_coordinates(&child.location));
                }
                let target = spherical.get_or_insert_with(Default::default);
                match coordinate.as_str() {
                    "azimuth" => {
                        target.azimuth = Some(value);
                        if let Some(raw) = child.attribute("screenEdgeLock") {
                            edge.horizontal = Some(
                                parse_horizontal_edge(raw)
                                    .map_err(|error| error.at(child.location.clone()))?,
                            );
                        }
                    }
                    "elevation" => {
                        target.elevation = Some(value);
                        if let Some(raw) = child.attribute("screenEdgeLock") {
                            edge.vertical = Some(
                                parse_vertical_edge(raw)
                                    .map_err(|error| error.at(child.location.clone()))?,
                            );
                        }
                    }
                    _ => target.distance = Some(value),
                }
            }
            "X" | "Y" | "Z" => {
                if spherical.is_some() {
                    return Err(mixed_coordinates(&child.location));
                }
                let target = cartesian.get_or_insert_with(Default::default);
                match coordinate.as_str() {
                    "X" => target.x = Some(value),
                    "Y" => target.y = Some(value),
                    _ => target.z = Some(value),
                }
            }
            other => return Err(invalid_value("coordinate", other, child.location.clone())),
        }
    }

    match (spherical, cartesian) {
        (Some(mut position), None) => {
            if !edge.is_empty() {
                position.screen_edge_lock = Some(edge);
            }
            Ok(Position::Spherical(position))
        }
        (None, Some(position)) => Ok(Position::Cartesian(position)),
        (None, None) => Err(missing_element(node, "position")),
        (Some(_), Some(_)) => Err(mixed_coordinates(&node.location)),
    }
}

pub(crate) fn parse_position_offset(
    node: &XmlElementNode,
) -> Result<Option<PositionOffset>, AdmError> {
    let mut spherical: Option<SphericalPositionOffset> = None;
    let mut cartesian: Option<CartesianPositionOffset> = None;

    for child in node.find_elements("positionOffset") {
        let coordinate = required_attr(child, "coordinate")?;
        let value = decode_f64(&child.text_content(), &coordinate, &child.location)?;
        match coordinate.as_str() {
            "azimuth" | "elevation" | "distance" => {
                if cartesian.is_some() {
                    return Err(mixed_coordinates(&child.location));
                }
                let target = spherical.get_or_insert_with(Default::default);
                match coordinate.as_str() {
                    "azimuth" => target.azimuth = Some(value),
                    "elevation" => target.elevation = Some(value),
                    _ => target.distance = Some(value),
                }
            }
            "X" | "Y" | "Z" => {
                if spherical.is_some() {
                    return Err(mixed_coordinates(&child.location));
                }
                let target = cartesian.get_or_insert_with(Default::default);
                match coordinate.as_str() {
                    "X" => target.x = Some(value),
                    "Y" => target.y = Some(value),
                    _ => target.z = Some(value),
                }
            }
            other => return Err(invalid_value("coordinate", other, child.location.clone())),
        }
    }

    match (spherical, cartesian) {
        (Some(offset), None) => Ok(Some(PositionOffset::Spherical(offset))),
        (None, Some(offset)) => Ok(Some(PositionOffset::Cartesian(offset))),
        (None, None) => Ok(None),
        (Some(_), Some(_)) => Err(mixed_coordinates(&node.location)),
    }
}

/// Speaker positions route every axis through the optional `bound`
/// attribute into base/min/max fields; unrecognized bounds are skipped.
pub(crate) fn parse_speaker_position(node: &XmlElementNode) -> Result<SpeakerPosition, AdmError> {
    let mut spherical: Option<SphericalSpeakerPosition> = None;
    let mut cartesian: Option<CartesianSpeakerPosition> = None;
    let mut edge = ScreenEdgeLock::default();
    let mut seen = false;

    for child in node.find_elements("position") {
        seen = true;
        let coordinate = required_attr(child, "coordinate")?;
        let bound = child.attribute("bound");
        let value = decode_f64(&child.text_content(), &coordinate, &child.location)?;

        if bound.is_none() {
            if let Some(raw) = child.attribute("screenEdgeLock") {
                match coordinate.as_str() {
                    "azimuth" | "X" => {
                        edge.horizontal = Some(
                            parse_horizontal_edge(raw)
                                .map_err(|error| error.at(child.location.clone()))?,
                        );
                    }
                    "elevation" | "Y" => {
                        edge.vertical = Some(
                            parse_vertical_edge(raw)
                                .map_err(|error| error.at(child.location.clone()))?,
                        );
                    }
                    _ => {}
                }
            }
        }

        match coordinate.as_str() {
            "azimuth" | "elevation" | "distance" => {
                if cartesian.is_some() {
                    return Err(mixed_coordinates(&child.location));
                }
                let target = spherical.get_or_insert_with(Default::default);
                let slot = match (coordinate.as_str(), bound) {
                    ("azimuth", None) => &mut target.azimuth,
                    ("azimuth", Some("min")) => &mut target.azimuth_min,
                    ("azimuth", Some("max")) => &mut target.azimuth_max,
                    ("elevation", None) => &mut target.elevation,
                    ("elevation", Some("min")) => &mut target.elevation_min,
                    ("elevation", Some("max")) => &mut target.elevation_max,
                    ("distance", None) => &mut target.distance,
                    ("distance", Some("min")) => &mut target.distance_min,
                    ("distance", Some("max")) => &mut target.distance_max,
                    _ => continue,
                };
                *slot = Some(value);
            }
            "X" | "Y" | "Z" => {
                if spherical.is_some() {
                    return Err(mixed_coordinates(&child.location));
                }
                let target = cartesian.get_or_insert_with(Default::default);
                let slot = match (coordinate.as_str(), bound) {
                    ("X", None) => &mut target.x,
                    ("X", Some("min")) => &mut target.x_min,
                    ("X", Some("max")) => &mut target.x_max,
                    ("Y", None) => &mut target.y,
                    ("Y", Some("min")) => &mut target.y_min,
                    ("Y", Some("max")) => &mut target.y_max,
                    ("Z", None) => &mut target.z,
                    ("Z", Some("min")) => &mut target.z_min,
                    ("Z", Some("max")) => &mut target.z_max,
                    _ => continue,
                };
                *slot = Some(value);
            }
            other => return Err(invalid_value("coordinate", other, child.location.clone())),
        }
    }

    if !seen {
        return Err(missing_element(node, "position"));
    }
    match (spherical, cartesian) {
        (Some(mut position), None) => {
            if !edge.is_empty() {
                position.screen_edge_lock = Some(edge);
            }
            Ok(SpeakerPosition::Spherical(position))
        }
        (None, Some(mut position)) => {
            if !edge.is_empty() {
                position.screen_edge_lock = Some(edge);
            }
            Ok(SpeakerPosition::Cartesian(position))
        }
        (None, None) => Err(missing_element(node, "position")),
        (Some(_), Some(_)) => Err(mixed_coordinates(&node.location)),
    }
}

pub(crate) fn parse_channel_lock(node: &XmlElementNode) -> Result<ChannelLock, AdmError> {
    Ok(ChannelLock {
        flag: crate::helpers::bool_content(node)?,
        max_distance: optional_f64_attr(node, "maxDistance")?,
    })
}

pub(crate) fn parse_object_divergence(node: &XmlElementNode) -> Result<ObjectDivergence, AdmError> {
    Ok(ObjectDivergence {
        value: f64_content(node)?,
        azimuth_range: optional_f64_attr(node, "azimuthRange")?,
        position_range: optional_f64_attr(node, "positionRange")?,
    })
}

pub(crate) fn parse_jump_position(node: &XmlElementNode) -> Result<JumpPosition, AdmError> {
    Ok(JumpPosition {
        flag: crate::helpers::bool_content(node)?,
        interpolation_length: optional_f64_attr(node, "interpolationLength")?,
    })
}

pub(crate) fn parse_headphone_virtualise(
    node: &XmlElementNode,
) -> Result<HeadphoneVirtualise, AdmError> {
    Ok(HeadphoneVirtualise {
        bypass: optional_bool_attr(node, "bypass")?,
        direct_to_reverberant_ratio: optional_f64_attr(node, "DRR")?,
    })
}

fn block_id(node: &XmlElementNode) -> Result<Option<AudioBlockFormatId>, AdmError> {
    node.attribute("audioBlockFormatID")
        .map(|raw| parse_audio_block_format_id(raw).map_err(|error| error.at(node.location.clone())))
        .transpose()
}

pub(crate) fn parse_audio_block_format_direct_speakers(
    node: &XmlElementNode,
) -> Result<AudioBlockFormatDirectSpeakers, AdmError> {
    Ok(AudioBlockFormatDirectSpeakers {
        id: block_id(node)?,
        rtime: optional_timecode_attr(node, "rtime")?,
        duration: optional_timecode_attr(node, "duration")?,
        position: parse_speaker_position(node)?,
        speaker_labels: node
            .find_elements("speakerLabel")
            .map(|child| child.text_content().trim().to_string())
            .collect(),
        head_locked: optional_bool_element(node, "headLocked")?,
        headphone_virtualise: node
            .find_element("headphoneVirtualise")
            .map(parse_headphone_virtualise)
            .transpose()?,
        gain: node.find_element("gain").map(parse_gain).transpose()?,
        importance: optional_i32_element(node, "importance")?,
    })
}

pub(crate) fn parse_audio_block_format_objects(
    node: &XmlElementNode,
) -> Result<AudioBlockFormatObjects, AdmError> {
    if node.find_element("position").is_none() {
        return Err(missing_element(node, "position"));
    }
    let position = parse_position(node)?;
    let flag = optional_bool_element(node, "cartesian")?;
    let guess = matches!(position, Position::Cartesian(_));
    // A flag that disagrees with the coordinate system actually used is
    // corrected to the system's value; an absent flag only materializes
    // when the guess is Cartesian.
    let cartesian = if flag.is_some() || guess {
        Some(guess)
    } else {
        None
    };

    Ok(AudioBlockFormatObjects {
        id: block_id(node)?,
        rtime: optional_timecode_attr(node, "rtime")?,
        duration: optional_timecode_attr(node, "duration")?,
        cartesian,
        position,
        width: optional_f64_element(node, "width")?,
        height: optional_f64_element(node, "height")?,
        depth: optional_f64_element(node, "depth")?,
        gain: node.find_element("gain").map(parse_gain).transpose()?,
        diffuse: optional_f64_element(node, "diffuse")?,
        channel_lock: node
            .find_element("channelLock")
            .map(parse_channel_lock)
            .transpose()?,
        object_divergence: node
            .find_element("objectDivergence")
            .map(parse_object_divergence)
            .transpose()?,
        jump_position: node
            .find_element("jumpPosition")
            .map(parse_jump_position)
            .transpose()?,
        screen_ref: optional_bool_element(node, "screenRef")?,
        importance: optional_i32_element(node, "importance")?,
        head_locked: optional_bool_element(node, "headLocked")?,
        headphone_virtualise: node
            .find_element("headphoneVirtualise")
            .map(parse_headphone_virtualise)
            .transpose()?,
    })
}

pub(crate) fn parse_audio_block_format_hoa(
    node: &XmlElementNode,
) -> Result<AudioBlockFormatHoa, AdmError> {
    Ok(AudioBlockFormatHoa {
        id: block_id(node)?,
        rtime: optional_timecode_attr(node, "rtime")?,
        duration: optional_timecode_attr(node, "duration")?,
        order: optional_i32_element(node, "order")?,
        degree: optional_i32_element(node, "degree")?,
        nfc_ref_dist: optional_f64_element(node, "nfcRefDist")?,
        screen_ref: optional_bool_element(node, "screenRef")?,
        normalization: optional_string_element(node, "normalization"),
        equation: optional_string_element(node, "equation"),
        head_locked: optional_bool_element(node, "headLocked")?,
        headphone_virtualise: node
            .find_element("headphoneVirtualise")
            .map(parse_headphone_virtualise)
            .transpose()?,
        gain: node.find_element("gain").map(parse_gain).transpose()?,
        importance: optional_i32_element(node, "importance")?,
    })
}

pub(crate) fn parse_audio_block_format_binaural(
    node: &XmlElementNode,
) -> Result<AudioBlockFormatBinaural, AdmError> {
    Ok(AudioBlockFormatBinaural {
        id: block_id(node)?,
        rtime: optional_timecode_attr(node, "rtime")?,
        duration: optional_timecode_attr(node, "duration")?,
        gain: node.find_element("gain").map(parse_gain).transpose()?,
        importance: optional_i32_element(node, "importance")?,
    })
}

/// The channel format's ID-derived type descriptor keys how each
/// `audioBlockFormat` body is decoded. Matrix and Undefined blocks are
/// recognized but not decoded.
pub(crate) fn parse_audio_channel_format(
    node: &XmlElementNode,
) -> Result<AudioChannelFormat, AdmError> {
    let id = parse_audio_channel_format_id(&required_attr(node, "audioChannelFormatID")?)
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

    let mut block_formats = Vec::new();
    for child in node.find_elements("audioBlockFormat") {
        let block = match id.type_descriptor {
            TypeDescriptor::DirectSpeakers => Some(AudioBlockFormat::DirectSpeakers(
                parse_audio_block_format_direct_speakers(child)?,
            )),
            TypeDescriptor::Objects => Some(AudioBlockFormat::Objects(
                parse_audio_block_format_objects(child)?,
            )),
            TypeDescriptor::Hoa => {
                Some(AudioBlockFormat::Hoa(parse_audio_block_format_hoa(child)?))
            }
            TypeDescriptor::Binaural => Some(AudioBlockFormat::Binaural(
                parse_audio_block_format_binaural(child)?,
            )),
            TypeDescriptor::Matrix | TypeDescriptor::Undefined => None,
        };
        if let Some(block) = block {
            block_formats.push(block);
        }
    }

    Ok(AudioChannelFormat {
        id,
        name: required_attr(node, "audioChannelFormatName")?,
        type_descriptor: id.type_descriptor,
        frequency: parse_frequency(node)?,
        block_formats,
    })
}
