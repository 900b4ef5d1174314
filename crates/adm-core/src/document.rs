use std::collections::BTreeSet;

use serde::Serialize;

use crate::element::{
    AudioChannelFormat, AudioContent, AudioObject, AudioPackFormat, AudioProgramme,
    AudioStreamFormat, AudioTrackFormat, AudioTrackUid,
};
use crate::error::AdmError;
use crate::id::{
    AudioChannelFormatId, AudioContentId, AudioObjectId, AudioPackFormatId, AudioProgrammeId,
    AudioStreamFormatId, AudioTrackFormatId, AudioTrackUidId, ElementId,
};

fn duplicate_id(id: ElementId) -> AdmError {
    AdmError::new("DUPLICATE_ID", format!("Duplicate id \"{}\".", id))
}

/// The populated graph store. Entities keep document order per kind; a
/// single index over all typed IDs backs duplicate detection and reference
/// resolution.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Document {
    programmes: Vec<AudioProgramme>,
    contents: Vec<AudioContent>,
    objects: Vec<AudioObject>,
    pack_formats: Vec<AudioPackFormat>,
    channel_formats: Vec<AudioChannelFormat>,
    stream_formats: Vec<AudioStreamFormat>,
    track_formats: Vec<AudioTrackFormat>,
    track_uids: Vec<AudioTrackUid>,
    ids: BTreeSet<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    pub fn add_audio_programme(&mut self, element: AudioProgramme) -> Result<(), AdmError> {
        let id = ElementId::Programme(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.programmes.push(element);
        Ok(())
    }

    pub fn add_audio_content(&mut self, element: AudioContent) -> Result<(), AdmError> {
        let id = ElementId::Content(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.contents.push(element);
        Ok(())
    }

    pub fn add_audio_object(&mut self, element: AudioObject) -> Result<(), AdmError> {
        let id = ElementId::Object(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.objects.push(element);
        Ok(())
    }

    pub fn add_audio_pack_format(&mut self, element: AudioPackFormat) -> Result<(), AdmError> {
        let id = ElementId::PackFormat(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.pack_formats.push(element);
        Ok(())
    }

    pub fn add_audio_channel_format(
        &mut self,
        element: AudioChannelFormat,
    ) -> Result<(), AdmError> {
        let id = ElementId::ChannelFormat(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.channel_formats.push(element);
        Ok(())
    }

    pub fn add_audio_stream_format(&mut self, element: AudioStreamFormat) -> Result<(), AdmError> {
        let id = ElementId::StreamFormat(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.stream_formats.push(element);
        Ok(())
    }

    pub fn add_audio_track_format(&mut self, element: AudioTrackFormat) -> Result<(), AdmError> {
        let id = ElementId::TrackFormat(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.track_formats.push(element);
        Ok(())
    }

    pub fn add_audio_track_uid(&mut self, element: AudioTrackUid) -> Result<(), AdmError> {
        let id = ElementId::TrackUid(element.id);
        if !self.ids.insert(id) {
            return Err(duplicate_id(id));
        }
        self.track_uids.push(element);
        Ok(())
    }

    pub fn audio_programmes(&self) -> &[AudioProgramme] {
        &self.programmes
    }

    pub fn audio_contents(&self) -> &[AudioContent] {
        &self.contents
    }

    pub fn audio_objects(&self) -> &[AudioObject] {
        &self.objects
    }

    pub fn audio_pack_formats(&self) -> &[AudioPackFormat] {
        &self.pack_formats
    }

    pub fn audio_channel_formats(&self) -> &[AudioChannelFormat] {
        &self.channel_formats
    }

    pub fn audio_stream_formats(&self) -> &[AudioStreamFormat] {
        &self.stream_formats
    }

    pub fn audio_track_formats(&self) -> &[AudioTrackFormat] {
        &self.track_formats
    }

    pub fn audio_track_uids(&self) -> &[AudioTrackUid] {
        &self.track_uids
    }

    pub fn audio_programme(&self, id: &AudioProgrammeId) -> Option<&AudioProgramme> {
        self.programmes.iter().find(|element| element.id == *id)
    }

    pub fn audio_content(&self, id: &AudioContentId) -> Option<&AudioContent> {
        self.contents.iter().find(|element| element.id == *id)
    }

    pub fn audio_object(&self, id: &AudioObjectId) -> Option<&AudioObject> {
        self.objects.iter().find(|element| element.id == *id)
    }

    pub fn audio_pack_format(&self, id: &AudioPackFormatId) -> Option<&AudioPackFormat> {
        self.pack_formats.iter().find(|element| element.id == *id)
    }

    pub fn audio_channel_format(&self, id: &AudioChannelFormatId) -> Option<&AudioChannelFormat> {
        self.channel_formats.iter().find(|element| element.id == *id)
    }

    pub fn audio_stream_format(&self, id: &AudioStreamFormatId) -> Option<&AudioStreamFormat> {
        self.stream_formats.iter().find(|element| element.id == *id)
    }

    pub fn audio_track_format(&self, id: &AudioTrackFormatId) -> Option<&AudioTrackFormat> {
        self.track_formats.iter().find(|element| element.id == *id)
    }

    pub fn audio_track_uid(&self, id: &AudioTrackUidId) -> Option<&AudioTrackUid> {
        self.track_uids.iter().find(|element| element.id == *id)
    }

    pub fn audio_programme_mut(&mut self, id: &AudioProgrammeId) -> Option<&mut AudioProgramme> {
        self.programmes.iter_mut().find(|element| element.id == *id)
    }

    pub fn audio_content_mut(&mut self, id: &AudioContentId) -> Option<&mut AudioContent> {
        self.contents.iter_mut().find(|element| element.id == *id)
    }

    pub fn audio_object_mut(&mut self, id: &AudioObjectId) -> Option<&mut AudioObject> {
        self.objects.iter_mut().find(|element| element.id == *id)
    }

    pub fn audio_pack_format_mut(&mut self, id: &AudioPackFormatId) -> Option<&mut AudioPackFormat> {
        self.pack_formats
            .iter_mut()
            .find(|element| element.id == *id)
    }

    pub fn audio_stream_format_mut(
        &mut self,
        id: &AudioStreamFormatId,
    ) -> Option<&mut AudioStreamFormat> {
        self.stream_formats
            .iter_mut()
            .find(|element| element.id == *id)
    }

    pub fn audio_track_format_mut(
        &mut self,
        id: &AudioTrackFormatId,
    ) -> Option<&mut AudioTrackFormat> {
        self.track_formats
            .iter_mut()
            .find(|element| element.id == *id)
    }

    pub fn audio_track_uid_mut(&mut self, id: &AudioTrackUidId) -> Option<&mut AudioTrackUid> {
        self.track_uids.iter_mut().find(|element| element.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{parse_audio_object_id, parse_audio_programme_id};

    fn programme(raw_id: &str) -> AudioProgramme {
        AudioProgramme {
            id: parse_audio_programme_id(raw_id).unwrap(),
            name: "prog".to_string(),
            language: None,
            start: None,
            end: None,
            max_ducking_depth: None,
            loudness_metadata: Vec::new(),
            reference_screen: None,
            labels: Vec::new(),
            content_refs: Vec::new(),
        }
    }

    #[test]
    fn add_rejects_a_second_element_with_the_same_id() {
        let mut document = Document::new();
        document.add_audio_programme(programme("APR_1001")).unwrap();
        document.add_audio_programme(programme("APR_1002")).unwrap();

        let error = document
            .add_audio_programme(programme("APR_1001"))
            .unwrap_err();
        assert_eq!(error.code, "DUPLICATE_ID");
        assert!(error.message.contains("APR_1001"));
        assert_eq!(document.audio_programmes().len(), 2);
    }

    #[test]
    fn documents_serialize_with_their_field_names() {
        let mut document = Document::new();
        document.add_audio_programme(programme("APR_1001")).unwrap();
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["programmes"][0]["name"], "prog");
        assert!(json["objects"].as_array().unwrap().is_empty());
    }

    #[test]
    fn lookups_find_elements_by_typed_id() {
        let mut document = Document::new();
        document.add_audio_programme(programme("APR_1001")).unwrap();

        let id = parse_audio_programme_id("APR_1001").unwrap();
        assert!(document.audio_programme(&id).is_some());
        assert!(document.contains(&ElementId::Programme(id)));

        let missing = parse_audio_object_id("AO_1001").unwrap();
        assert!(document.audio_object(&missing).is_none());
        assert!(!document.contains(&ElementId::Object(missing)));
    }
}
