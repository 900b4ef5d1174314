use std::fmt::Display;

use adm_core::{
    AdmError, AudioChannelFormatId, AudioContentId, AudioObjectId, AudioPackFormatId,
    AudioProgrammeId, AudioStreamFormatId, AudioTrackFormatId, AudioTrackUidId, Document,
    ElementId, SourceSpan,
};

/// Buffered raw ID references collected during pass 1. Nothing is resolved
/// here; the buffers are consumed once, by `resolve`, after every entity of
/// the document has been read.
#[derive(Debug, Default)]
pub(crate) struct ReferenceCollector {
    pub(crate) programme_content: Vec<(AudioProgrammeId, AudioContentId, SourceSpan)>,
    pub(crate) content_object: Vec<(AudioContentId, AudioObjectId, SourceSpan)>,
    pub(crate) object_object: Vec<(AudioObjectId, AudioObjectId, SourceSpan)>,
    pub(crate) object_pack_format: Vec<(AudioObjectId, AudioPackFormatId, SourceSpan)>,
    pub(crate) object_track_uid: Vec<(AudioObjectId, AudioTrackUidId, SourceSpan)>,
    pub(crate) track_uid_track_format: Vec<(AudioTrackUidId, AudioTrackFormatId, SourceSpan)>,
    pub(crate) track_uid_channel_format: Vec<(AudioTrackUidId, AudioChannelFormatId, SourceSpan)>,
    pub(crate) track_uid_pack_format: Vec<(AudioTrackUidId, AudioPackFormatId, SourceSpan)>,
    pub(crate) pack_format_channel_format:
        Vec<(AudioPackFormatId, AudioChannelFormatId, SourceSpan)>,
    pub(crate) pack_format_pack_format: Vec<(AudioPackFormatId, AudioPackFormatId, SourceSpan)>,
    pub(crate) track_format_stream_format:
        Vec<(AudioTrackFormatId, AudioStreamFormatId, SourceSpan)>,
    pub(crate) stream_format_channel_format:
        Vec<(AudioStreamFormatId, AudioChannelFormatId, SourceSpan)>,
    pub(crate) stream_format_pack_format: Vec<(AudioStreamFormatId, AudioPackFormatId, SourceSpan)>,
    pub(crate) stream_format_track_format:
        Vec<(AudioStreamFormatId, AudioTrackFormatId, SourceSpan)>,
}

fn unresolved(
    owner_kind: &str,
    owner: impl Display,
    target_kind: &str,
    target: impl Display,
    span: SourceSpan,
) -> AdmError {
    AdmError::with_span(
        "UNRESOLVED_REFERENCE",
        format!(
            "{} \"{}\" references unknown {} \"{}\".",
            owner_kind, owner, target_kind, target
        ),
        span,
    )
}

impl ReferenceCollector {
    /// Pass 2: turn every buffered reference into an edge on its owner, one
    /// reference kind at a time in declared order. Fails fast on the first
    /// ID with no matching entity; edges resolved before the failure stay
    /// materialized.
    pub(crate) fn resolve(self, document: &mut Document) -> Result<(), AdmError> {
        for (owner, target, span) in self.programme_content {
            if !document.contains(&ElementId::Content(target)) {
                return Err(unresolved("audioProgramme", owner, "audioContent", target, span));
            }
            document
                .audio_programme_mut(&owner)
                .expect("referencing audioProgramme was inserted during pass 1")
                .content_refs
                .push(target);
        }

        for (owner, target, span) in self.content_object {
            if !document.contains(&ElementId::Object(target)) {
                return Err(unresolved("audioContent", owner, "audioObject", target, span));
            }
            document
                .audio_content_mut(&owner)
                .expect("referencing audioContent was inserted during pass 1")
                .object_refs
                .push(target);
        }

        for (owner, target, span) in self.object_object {
            if !document.contains(&ElementId::Object(target)) {
                return Err(unresolved("audioObject", owner, "audioObject", target, span));
            }
            document
                .audio_object_mut(&owner)
                .expect("referencing audioObject was inserted during pass 1")
                .object_refs
                .push(target);
        }

        for (owner, target, span) in self.object_pack_format {
            if !document.contains(&ElementId::PackFormat(target)) {
                return Err(unresolved("audioObject", owner, "audioPackFormat", target, span));
            }
            document
                .audio_object_mut(&owner)
                .expect("referencing audioObject was inserted during pass 1")
                .pack_format_refs
                .push(target);
        }

        for (owner, target, span) in self.object_track_uid {
            if !document.contains(&ElementId::TrackUid(target)) {
                return Err(unresolved("audioObject", owner, "audioTrackUID", target, span));
            }
            document
                .audio_object_mut(&owner)
                .expect("referencing audioObject was inserted during pass 1")
                .track_uid_refs
                .push(target);
        }

        for (owner, target, span) in self.track_uid_track_format {
            if !document.contains(&ElementId::TrackFormat(target)) {
                return Err(unresolved("audioTrackUID", owner, "audioTrackFormat", target, span));
            }
            document
                .audio_track_uid_mut(&owner)
                .expect("referencing audioTrackUID was inserted during pass 1")
                .track_format_ref = Some(target);
        }

        for (owner, target, span) in self.track_uid_channel_format {
            if !document.contains(&ElementId::ChannelFormat(target)) {
                return Err(unresolved(
                    "audioTrackUID",
                    owner,
                    "audioChannelFormat",
                    target,
                    span,
                ));
            }
            document
                .audio_track_uid_mut(&owner)
                .expect("referencing audioTrackUID was inserted during pass 1")
                .channel_format_ref = Some(target);
        }

        for (owner, target, span) in self.track_uid_pack_format {
            if !document.contains(&ElementId::PackFormat(target)) {
                return Err(unresolved("audioTrackUID", owner, "audioPackFormat", target, span));
            }
            document
                .audio_track_uid_mut(&owner)
                .expect("referencing audioTrackUID was inserted during pass 1")
                .pack_format_ref = Some(target);
        }

        for (owner, target, span) in self.pack_format_channel_format {
            if !document.contains(&ElementId::ChannelFormat(target)) {
                return Err(unresolved(
                    "audioPackFormat",
                    owner,
                    "audioChannelFormat",
                    target,
                    span,
                ));
            }
            document
                .audio_pack_format_mut(&owner)
                .expect("referencing audioPackFormat was inserted during pass 1")
                .channel_format_refs
                .push(target);
        }

        for (owner, target, span) in self.pack_format_pack_format {
            if !document.contains(&ElementId::PackFormat(target)) {
                return Err(unresolved("audioPackFormat", owner, "audioPackFormat", target, span));
            }
            document
                .audio_pack_format_mut(&owner)
                .expect("referencing audioPackFormat was inserted during pass 1")
                .pack_format_refs
                .push(target);
        }

        for (owner, target, span) in self.track_format_stream_format {
            if !document.contains(&ElementId::StreamFormat(target)) {
                return Err(unresolved(
                    "audioTrackFormat",
                    owner,
                    "audioStreamFormat",
                    target,
                    span,
                ));
            }
            document
                .audio_track_format_mut(&owner)
                .expect("referencing audioTrackFormat was inserted during pass 1")
                .stream_format_ref = Some(target);
        }

        for (owner, target, span) in self.stream_format_channel_format {
            if !document.contains(&ElementId::ChannelFormat(target)) {
                return Err(unresolved(
                    "audioStreamFormat",
                    owner,
                    "audioChannelFormat",
                    target,
                    span,
                ));
            }
            document
                .audio_stream_format_mut(&owner)
                .expect("referencing audioStreamFormat was inserted during pass 1")
                .channel_format_ref = Some(target);
        }

        for (owner, target, span) in self.stream_format_pack_format {
            if !document.contains(&ElementId::PackFormat(target)) {
                return Err(unresolved(
                    "audioStreamFormat",
                    owner,
                    "audioPackFormat",
                    target,
                    span,
                ));
            }
            document
                .audio_stream_format_mut(&owner)
                .expect("referencing audioStreamFormat was inserted during pass 1")
                .pack_format_ref = Some(target);
        }

        for (owner, target, span) in self.stream_format_track_format {
            if !document.contains(&ElementId::TrackFormat(target)) {
                return Err(unresolved(
                    "audioStreamFormat",
                    owner,
                    "audioTrackFormat",
                    target,
                    span,
                ));
            }
            document
                .audio_stream_format_mut(&owner)
                .expect("referencing audioStreamFormat was inserted during pass 1")
                .track_format_refs
                .push(target);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adm_core::{
        parse_audio_channel_format_id, parse_audio_object_id, parse_audio_pack_format_id,
        parse_audio_track_uid_id, AudioObject, AudioPackFormat, AudioTrackUid, SourceSpan,
        TypeDescriptor,
    };

    fn object(raw_id: &str) -> AudioObject {
        AudioObject {
            id: parse_audio_object_id(raw_id).unwrap(),
            name: "obj".to_string(),
            start: None,
            duration: None,
            dialogue_id: None,
            importance: None,
            interact: None,
            disable_ducking: None,
            mute: None,
            head_locked: None,
            gain: None,
            position_offset: None,
            interaction: None,
            labels: Vec::new(),
            complementary_object_group_labels: Vec::new(),
            object_refs: Vec::new(),
            pack_format_refs: Vec::new(),
            track_uid_refs: Vec::new(),
        }
    }

    fn pack_format(raw_id: &str) -> AudioPackFormat {
        let id = parse_audio_pack_format_id(raw_id).unwrap();
        AudioPackFormat {
            id,
            name: "pack".to_string(),
            type_descriptor: id.type_descriptor,
            importance: None,
            absolute_distance: None,
            hoa: None,
            channel_format_refs: Vec::new(),
            pack_format_refs: Vec::new(),
        }
    }

    fn track_uid(raw_id: &str) -> AudioTrackUid {
        AudioTrackUid {
            id: parse_audio_track_uid_id(raw_id).unwrap(),
            sample_rate: None,
            bit_depth: None,
            channel_format_ref: None,
            track_format_ref: None,
            pack_format_ref: None,
        }
    }

    #[test]
    fn failure_keeps_edges_resolved_by_earlier_reference_kinds() {
        let mut document = Document::new();
        document.add_audio_object(object("AO_1001")).unwrap();
        document
            .add_audio_pack_format(pack_format("AP_00011001"))
            .unwrap();
        document.add_audio_track_uid(track_uid("ATU_00000001")).unwrap();

        let mut refs = ReferenceCollector::default();
        refs.object_pack_format.push((
            parse_audio_object_id("AO_1001").unwrap(),
            parse_audio_pack_format_id("AP_00011001").unwrap(),
            SourceSpan::synthetic(),
        ));
        refs.track_uid_channel_format.push((
            parse_audio_track_uid_id("ATU_00000001").unwrap(),
            parse_audio_channel_format_id("AC_00019999").unwrap(),
            SourceSpan::synthetic(),
        ));

        let error = refs.resolve(&mut document).unwrap_err();
        assert_eq!(error.code, "UNRESOLVED_REFERENCE");
        assert!(error.message.contains("AC_00019999"));
        assert!(error.message.contains("ATU_00000001"));

        // The object -> pack edge resolved before the failing kind and
        // stays materialized.
        let owner = parse_audio_object_id("AO_1001").unwrap();
        let resolved = &document.audio_object(&owner).unwrap().pack_format_refs;
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].type_descriptor, TypeDescriptor::DirectSpeakers);
    }

    #[test]
    fn empty_collector_resolves_trivially() {
        let mut document = Document::new();
        ReferenceCollector::default().resolve(&mut document).unwrap();
    }
}
