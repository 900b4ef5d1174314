use adm_reader::{
    parse_document, AudioBlockFormat, ParserOptions, RootSearch, TypeDescriptor,
};

fn ebu_document(body: &str) -> String {
    format!(
        "<ebuCoreMain>\n<coreMetadata>\n<format>\n<audioFormatExtended>\n{}\n</audioFormatExtended>\n</format>\n</coreMetadata>\n</ebuCoreMain>",
        body
    )
}

const FULL_BODY: &str = r#"<audioProgramme audioProgrammeID="APR_1001" audioProgrammeName="Main">
  <audioContentIDRef>ACO_1001</audioContentIDRef>
</audioProgramme>
<audioContent audioContentID="ACO_1001" audioContentName="Music">
  <audioObjectIDRef>AO_1001</audioObjectIDRef>
</audioContent>
<audioObject audioObjectID="AO_1001" audioObjectName="Bed">
  <audioPackFormatIDRef>AP_00011001</audioPackFormatIDRef>
  <audioTrackUIDRef>ATU_00000001</audioTrackUIDRef>
</audioObject>
<audioPackFormat audioPackFormatID="AP_00011001" audioPackFormatName="Mono" typeDefinition="DirectSpeakers">
  <audioChannelFormatIDRef>AC_00011001</audioChannelFormatIDRef>
</audioPackFormat>
<audioChannelFormat audioChannelFormatID="AC_00011001" audioChannelFormatName="FrontLeft" typeDefinition="DirectSpeakers">
  <audioBlockFormat audioBlockFormatID="AB_00011001_00000001">
    <speakerLabel>M+030</speakerLabel>
    <position coordinate="azimuth">30.0</position>
  </audioBlockFormat>
</audioChannelFormat>
<audioStreamFormat audioStreamFormatID="AS_00011001" audioStreamFormatName="PCM_FrontLeft" formatDefinition="PCM">
  <audioChannelFormatIDRef>AC_00011001</audioChannelFormatIDRef>
  <audioTrackFormatIDRef>AT_00011001_01</audioTrackFormatIDRef>
</audioStreamFormat>
<audioTrackFormat audioTrackFormatID="AT_00011001_01" audioTrackFormatName="PCM_FrontLeft" formatLabel="0001">
  <audioStreamFormatIDRef>AS_00011001</audioStreamFormatIDRef>
</audioTrackFormat>
<audioTrackUID UID="ATU_00000001" sampleRate="48000" bitDepth="24">
  <audioTrackFormatIDRef>AT_00011001_01</audioTrackFormatIDRef>
  <audioPackFormatIDRef>AP_00011001</audioPackFormatIDRef>
</audioTrackUID>"#;

#[test]
fn full_document_resolves_every_reference_kind() {
    let source = ebu_document(FULL_BODY);
    let document = parse_document(&source, &ParserOptions::default()).unwrap();

    let programme = &document.audio_programmes()[0];
    assert_eq!(programme.name, "Main");
    assert_eq!(programme.content_refs.len(), 1);
    assert_eq!(programme.content_refs[0].to_string(), "ACO_1001");

    let content = &document.audio_contents()[0];
    assert_eq!(content.object_refs[0].to_string(), "AO_1001");

    let object = &document.audio_objects()[0];
    assert_eq!(object.pack_format_refs[0].to_string(), "AP_00011001");
    assert_eq!(object.track_uid_refs[0].to_string(), "ATU_00000001");

    let pack = &document.audio_pack_formats()[0];
    assert_eq!(pack.type_descriptor, TypeDescriptor::DirectSpeakers);
    assert_eq!(pack.channel_format_refs[0].to_string(), "AC_00011001");

    let channel = &document.audio_channel_formats()[0];
    assert_eq!(channel.block_formats.len(), 1);
    let AudioBlockFormat::DirectSpeakers(block) = &channel.block_formats[0] else {
        panic!("expected a DirectSpeakers block");
    };
    assert_eq!(block.speaker_labels, vec!["M+030".to_string()]);

    let stream = &document.audio_stream_formats()[0];
    assert_eq!(
        stream.channel_format_ref.unwrap().to_string(),
        "AC_00011001"
    );
    assert_eq!(
        stream.track_format_refs[0].to_string(),
        "AT_00011001_01"
    );

    let track = &document.audio_track_formats()[0];
    assert_eq!(track.stream_format_ref.unwrap().to_string(), "AS_00011001");

    let track_uid = &document.audio_track_uids()[0];
    assert_eq!(track_uid.sample_rate, Some(48000));
    assert_eq!(
        track_uid.track_format_ref.unwrap().to_string(),
        "AT_00011001_01"
    );
    assert_eq!(
        track_uid.pack_format_ref.unwrap().to_string(),
        "AP_00011001"
    );
}

#[test]
fn references_resolve_regardless_of_document_order() {
    // Referenced entities declared after the elements that reference them.
    let source = ebu_document(
        r#"<audioContent audioContentID="ACO_1001" audioContentName="Music">
  <audioObjectIDRef>AO_1001</audioObjectIDRef>
</audioContent>
<audioProgramme audioProgrammeID="APR_1001" audioProgrammeName="Main">
  <audioContentIDRef>ACO_1001</audioContentIDRef>
</audioProgramme>
<audioObject audioObjectID="AO_1001" audioObjectName="Bed"/>"#,
    );
    let document = parse_document(&source, &ParserOptions::default()).unwrap();
    assert_eq!(document.audio_programmes()[0].content_refs.len(), 1);
    assert_eq!(document.audio_contents()[0].object_refs.len(), 1);
}

#[test]
fn duplicate_ids_fail_during_pass_one() {
    let source = ebu_document(
        r#"<audioObject audioObjectID="AO_1001" audioObjectName="First"/>
<audioObject audioObjectID="AO_1001" audioObjectName="Second"/>"#,
    );
    let error = parse_document(&source, &ParserOptions::default()).unwrap_err();
    assert_eq!(error.code, "DUPLICATE_ID");
    assert!(error.message.contains("AO_1001"));
    // The span points at the second declaration.
    assert_eq!(error.span.unwrap().start.line, 6);
}

#[test]
fn unresolved_references_fail_during_pass_two() {
    let source = ebu_document(
        r#"<audioObject audioObjectID="AO_1001" audioObjectName="Bed">
  <audioPackFormatIDRef>AP_00011001</audioPackFormatIDRef>
</audioObject>"#,
    );
    let error = parse_document(&source, &ParserOptions::default()).unwrap_err();
    assert_eq!(error.code, "UNRESOLVED_REFERENCE");
    assert!(error.message.contains("AO_1001"));
    assert!(error.message.contains("AP_00011001"));
    assert!(error.span.is_some());
}

#[test]
fn resolution_follows_the_fixed_reference_order() {
    // Both references dangle; the content -> object kind resolves before
    // the object -> trackUID kind, so its failure is reported even though
    // the object is declared first.
    let source = ebu_document(
        r#"<audioObject audioObjectID="AO_1001" audioObjectName="Bed">
  <audioTrackUIDRef>ATU_00000009</audioTrackUIDRef>
</audioObject>
<audioContent audioContentID="ACO_1001" audioContentName="Music">
  <audioObjectIDRef>AO_2001</audioObjectIDRef>
</audioContent>"#,
    );
    let error = parse_document(&source, &ParserOptions::default()).unwrap_err();
    assert_eq!(error.code, "UNRESOLVED_REFERENCE");
    assert!(error.message.contains("audioContent"));
    assert!(error.message.contains("AO_2001"));
}

#[test]
fn strict_root_search_requires_the_ebu_wrapper() {
    let bare = r#"<audioFormatExtended>
<audioObject audioObjectID="AO_1001" audioObjectName="Bed"/>
</audioFormatExtended>"#;

    let error = parse_document(bare, &ParserOptions::default()).unwrap_err();
    assert_eq!(error.code, "ROOT_NOT_FOUND");
    assert_eq!(error.message, "audioFormatExtended node not found.");

    let options = ParserOptions {
        root_search: RootSearch::FullRecursive,
    };
    let document = parse_document(bare, &options).unwrap();
    assert_eq!(document.audio_objects().len(), 1);
}

#[test]
fn recursive_root_search_finds_a_deeply_nested_node() {
    let source = r#"<broadcast>
  <payload>
    <audioFormatExtended>
      <audioProgramme audioProgrammeID="APR_1001" audioProgrammeName="Main"/>
    </audioFormatExtended>
  </payload>
</broadcast>"#;
    let options = ParserOptions {
        root_search: RootSearch::FullRecursive,
    };
    let document = parse_document(source, &options).unwrap();
    assert_eq!(document.audio_programmes().len(), 1);
}

#[test]
fn malformed_xml_fails_with_a_parse_error() {
    let error = parse_document("<ebuCoreMain>", &ParserOptions::default()).unwrap_err();
    assert_eq!(error.code, "XML_PARSE_ERROR");
}

#[test]
fn unknown_top_level_elements_are_skipped() {
    let source = ebu_document(
        r#"<somethingElse/>
<audioObject audioObjectID="AO_1001" audioObjectName="Bed"/>"#,
    );
    let document = parse_document(&source, &ParserOptions::default()).unwrap();
    assert_eq!(document.audio_objects().len(), 1);
}

#[test]
fn documents_serialize_to_json() {
    let source = ebu_document(FULL_BODY);
    let document = parse_document(&source, &ParserOptions::default()).unwrap();
    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["programmes"][0]["name"], "Main");
    assert_eq!(json["objects"][0]["pack_format_refs"][0]["value"], 0x1001);
}

#[test]
fn mixed_coordinates_fail_end_to_end() {
    let source = ebu_document(
        r#"<audioChannelFormat audioChannelFormatID="AC_00031001" audioChannelFormatName="Obj">
  <audioBlockFormat>
    <position coordinate="azimuth">30.0</position>
    <position coordinate="X">0.5</position>
  </audioBlockFormat>
</audioChannelFormat>"#,
    );
    let error = parse_document(&source, &ParserOptions::default()).unwrap_err();
    assert_eq!(error.code, "MIXED_COORDINATES");
}
