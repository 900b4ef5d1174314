use serde::{Deserialize, Serialize};

use crate::error::AdmError;

/// Channel semantics encoded in the `yyyy` hex field of pack/channel/stream/
/// track/block format IDs and, redundantly, in `typeLabel`/`typeDefinition`
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Undefined,
    DirectSpeakers,
    Matrix,
    Objects,
    Hoa,
    Binaural,
}

impl TypeDescriptor {
    pub fn from_hex(value: u16) -> Option<Self> {
        match value {
            0x0000 => Some(Self::Undefined),
            0x0001 => Some(Self::DirectSpeakers),
            0x0002 => Some(Self::Matrix),
            0x0003 => Some(Self::Objects),
            0x0004 => Some(Self::Hoa),
            0x0005 => Some(Self::Binaural),
            _ => None,
        }
    }

    pub fn hex(&self) -> u16 {
        match self {
            Self::Undefined => 0x0000,
            Self::DirectSpeakers => 0x0001,
            Self::Matrix => 0x0002,
            Self::Objects => 0x0003,
            Self::Hoa => 0x0004,
            Self::Binaural => 0x0005,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::DirectSpeakers => "DirectSpeakers",
            Self::Matrix => "Matrix",
            Self::Objects => "Objects",
            Self::Hoa => "HOA",
            Self::Binaural => "Binaural",
        }
    }
}

/// `typeLabel` carries the four-digit hex form, e.g. "0003".
pub fn parse_type_label(raw: &str) -> Result<TypeDescriptor, AdmError> {
    let value = u16::from_str_radix(raw.trim(), 16).map_err(|_| {
        AdmError::new(
            "INVALID_VALUE",
            format!("Invalid value \"{}\" for \"typeLabel\".", raw),
        )
    })?;
    TypeDescriptor::from_hex(value).ok_or_else(|| {
        AdmError::new(
            "INVALID_VALUE",
            format!("Unknown typeLabel \"{}\".", raw),
        )
    })
}

/// `typeDefinition` carries the name form, e.g. "Objects".
pub fn parse_type_definition(raw: &str) -> Result<TypeDescriptor, AdmError> {
    match raw.trim() {
        "Undefined" => Ok(TypeDescriptor::Undefined),
        "DirectSpeakers" => Ok(TypeDescriptor::DirectSpeakers),
        "Matrix" => Ok(TypeDescriptor::Matrix),
        "Objects" => Ok(TypeDescriptor::Objects),
        "HOA" => Ok(TypeDescriptor::Hoa),
        "Binaural" => Ok(TypeDescriptor::Binaural),
        _ => Err(AdmError::new(
            "INVALID_VALUE",
            format!("Unknown typeDefinition \"{}\".", raw),
        )),
    }
}

/// The ID-derived descriptor is authoritative; `typeLabel` and
/// `typeDefinition`, when present, must both agree with it.
pub fn check_channel_type(
    id_descriptor: TypeDescriptor,
    type_label: Option<TypeDescriptor>,
    type_definition: Option<TypeDescriptor>,
) -> Result<(), AdmError> {
    for declared in [type_label, type_definition].into_iter().flatten() {
        if declared != id_descriptor {
            return Err(AdmError::new(
                "CHANNEL_TYPE_MISMATCH",
                format!(
                    "Declared channel type \"{}\" does not match the id-derived type \"{}\".",
                    declared.name(),
                    id_descriptor.name()
                ),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormatDescriptor {
    Pcm,
}

impl FormatDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pcm => "PCM",
        }
    }
}

pub fn parse_format_label(raw: &str) -> Result<FormatDescriptor, AdmError> {
    match raw.trim() {
        "0001" => Ok(FormatDescriptor::Pcm),
        _ => Err(AdmError::new(
            "INVALID_VALUE",
            format!("Unknown formatLabel \"{}\".", raw),
        )),
    }
}

pub fn parse_format_definition(raw: &str) -> Result<FormatDescriptor, AdmError> {
    match raw.trim() {
        "PCM" => Ok(FormatDescriptor::Pcm),
        _ => Err(AdmError::new(
            "INVALID_VALUE",
            format!("Unknown formatDefinition \"{}\".", raw),
        )),
    }
}

/// Stream and track formats require a format descriptor; it may come from
/// either attribute, and when both are present they must agree.
pub fn check_format(
    format_label: Option<FormatDescriptor>,
    format_definition: Option<FormatDescriptor>,
) -> Result<FormatDescriptor, AdmError> {
    match (format_label, format_definition) {
        (Some(label), Some(definition)) if label != definition => Err(AdmError::new(
            "FORMAT_MISMATCH",
            format!(
                "formatLabel \"{}\" does not match formatDefinition \"{}\".",
                label.name(),
                definition.name()
            ),
        )),
        (Some(label), _) => Ok(label),
        (None, Some(definition)) => Ok(definition),
        (None, None) => Err(AdmError::new(
            "XML_MISSING_ATTR",
            "Missing required attribute \"formatLabel\" or \"formatDefinition\".",
        )),
    }
}
