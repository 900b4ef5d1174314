//! Reader for the Audio Definition Model (ITU-R BS.2076) metadata carried
//! in broadcast XML. Parsing runs in two passes: pass 1 decodes every
//! element under `audioFormatExtended` into typed entities while buffering
//! raw ID references, pass 2 resolves those references against the
//! populated document.

mod blocks;
mod collector;
mod elements;
mod helpers;
mod root;

pub use adm_core::{
    AdmError, AudioBlockFormat, AudioChannelFormat, AudioContent, AudioObject, AudioPackFormat,
    AudioProgramme, AudioStreamFormat, AudioTrackFormat, AudioTrackUid, Document, ElementId,
    SourceSpan, TypeDescriptor,
};
pub use adm_xml::{parse_xml_document, XmlDocument, XmlElementNode};

use collector::ReferenceCollector;

/// How the `audioFormatExtended` node is located in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootSearch {
    /// Expect the exact EBU-core wrapper chain `ebuCoreMain` >
    /// `coreMetadata` > `format` > `audioFormatExtended`.
    #[default]
    EbuCoreStructure,
    /// Depth-first search for the first `audioFormatExtended` node.
    FullRecursive,
}

#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub root_search: RootSearch,
}

/// Parses an ADM document from XML text.
pub fn parse_document(source: &str, options: &ParserOptions) -> Result<Document, AdmError> {
    let tree = parse_xml_document(source)?;
    let root = match options.root_search {
        RootSearch::EbuCoreStructure => root::find_audio_format_extended_ebu_core(&tree.root),
        RootSearch::FullRecursive => root::find_audio_format_extended_recursive(&tree.root),
    }
    .ok_or_else(|| AdmError::new("ROOT_NOT_FOUND", "audioFormatExtended node not found."))?;
    parse_audio_format_extended(root)
}

/// Parses the children of an already located `audioFormatExtended` node.
/// Unknown child elements are skipped.
pub fn parse_audio_format_extended(root: &XmlElementNode) -> Result<Document, AdmError> {
    let mut document = Document::new();
    let mut refs = ReferenceCollector::default();

    for child in root.element_children() {
        match child.name.as_str() {
            "audioProgramme" => {
                let element = elements::parse_audio_programme(child, &mut refs)?;
                document
                    .add_audio_programme(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioContent" => {
                let element = elements::parse_audio_content(child, &mut refs)?;
                document
                    .add_audio_content(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioObject" => {
                let element = elements::parse_audio_object(child, &mut refs)?;
                document
                    .add_audio_object(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioPackFormat" => {
                let element = elements::parse_audio_pack_format(child, &mut refs)?;
                document
                    .add_audio_pack_format(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioChannelFormat" => {
                let element = blocks::parse_audio_channel_format(child)?;
                document
                    .add_audio_channel_format(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioStreamFormat" => {
                let element = elements::parse_audio_stream_format(child, &mut refs)?;
                document
                    .add_audio_stream_format(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioTrackFormat" => {
                let element = elements::parse_audio_track_format(child, &mut refs)?;
                document
                    .add_audio_track_format(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            "audioTrackUID" => {
                let element = elements::parse_audio_track_uid(child, &mut refs)?;
                document
                    .add_audio_track_uid(element)
                    .map_err(|error| error.at(child.location.clone()))?;
            }
            _ => {}
        }
    }

    refs.resolve(&mut document)?;
    Ok(document)
}
