use adm_reader::{parse_document, ParserOptions, RootSearch};
use adm_core::{Gain, PositionInteractionRange, PositionOffset, Time};

fn options() -> ParserOptions {
    ParserOptions {
        root_search: RootSearch::FullRecursive,
    }
}

#[test]
fn object_scalars_and_children_are_fully_decoded() {
    let source = r#"<audioFormatExtended>
<audioObject audioObjectID="AO_1001" audioObjectName="Narrator"
    start="00:00:00.00000" duration="00:01:00.00000"
    dialogue="1" importance="8" interact="1" disableDucking="1">
  <mute>0</mute>
  <headLocked>0</headLocked>
  <gain gainUnit="dB">-3.0</gain>
  <positionOffset coordinate="azimuth">15.0</positionOffset>
  <audioObjectLabel language="en">Narrator</audioObjectLabel>
  <audioObjectLabel language="fr">Narrateur</audioObjectLabel>
  <audioComplementaryObjectGroupLabel language="en">Commentary</audioComplementaryObjectGroupLabel>
</audioObject>
</audioFormatExtended>"#;

    let document = parse_document(source, &options()).unwrap();
    let object = &document.audio_objects()[0];

    assert_eq!(object.id.to_string(), "AO_1001");
    assert_eq!(object.name, "Narrator");
    assert_eq!(object.start, Some(Time::from_seconds(0)));
    assert_eq!(object.duration, Some(Time::from_seconds(60)));
    assert_eq!(object.dialogue_id, Some(1));
    assert_eq!(object.importance, Some(8));
    assert_eq!(object.interact, Some(true));
    assert_eq!(object.disable_ducking, Some(true));
    assert_eq!(object.mute, Some(false));
    assert_eq!(object.head_locked, Some(false));
    assert_eq!(object.gain, Some(Gain::from_db(-3.0)));

    let Some(PositionOffset::Spherical(offset)) = &object.position_offset else {
        panic!("expected a spherical position offset");
    };
    assert_eq!(offset.azimuth, Some(15.0));

    assert_eq!(object.labels.len(), 2);
    assert_eq!(object.labels[0].language.as_deref(), Some("en"));
    assert_eq!(object.labels[1].value, "Narrateur");
    assert_eq!(object.complementary_object_group_labels.len(), 1);
}

#[test]
fn object_interaction_is_decoded_with_both_range_kinds() {
    let source = r#"<audioFormatExtended>
<audioObject audioObjectID="AO_1001" audioObjectName="Dialogue">
  <audioObjectInteraction onOffInteract="1" gainInteract="1" positionInteract="1">
    <gainInteractionRange bound="min" gainUnit="dB">-12.0</gainInteractionRange>
    <gainInteractionRange bound="max" gainUnit="dB">3.0</gainInteractionRange>
    <positionInteractionRange coordinate="azimuth" bound="min">-30.0</positionInteractionRange>
    <positionInteractionRange coordinate="azimuth" bound="max">30.0</positionInteractionRange>
    <positionInteractionRange coordinate="elevation" bound="min">-10.0</positionInteractionRange>
    <positionInteractionRange coordinate="elevation" bound="max">10.0</positionInteractionRange>
  </audioObjectInteraction>
</audioObject>
</audioFormatExtended>"#;

    let document = parse_document(source, &options()).unwrap();
    let interaction = document.audio_objects()[0].interaction.clone().unwrap();

    assert!(interaction.on_off_interact);
    assert_eq!(interaction.gain_interact, Some(true));
    assert_eq!(interaction.position_interact, Some(true));

    let gain_range = interaction.gain_interaction_range.unwrap();
    assert_eq!(gain_range.min, Some(Gain::from_db(-12.0)));
    assert_eq!(gain_range.max, Some(Gain::from_db(3.0)));

    let Some(PositionInteractionRange::Spherical(range)) =
        interaction.position_interaction_range
    else {
        panic!("expected a spherical interaction range");
    };
    assert_eq!(range.azimuth_min, Some(-30.0));
    assert_eq!(range.azimuth_max, Some(30.0));
    assert_eq!(range.elevation_min, Some(-10.0));
    assert_eq!(range.elevation_max, Some(10.0));
}

#[test]
fn object_without_an_id_is_rejected() {
    let source = r#"<audioFormatExtended>
<audioObject audioObjectName="Nameless"/>
</audioFormatExtended>"#;
    let error = parse_document(source, &options()).unwrap_err();
    assert_eq!(error.code, "XML_MISSING_ATTR");
    assert!(error.message.contains("audioObjectID"));
}

#[test]
fn object_with_a_malformed_id_is_rejected() {
    let source = r#"<audioFormatExtended>
<audioObject audioObjectID="AO_XYZ" audioObjectName="Broken"/>
</audioFormatExtended>"#;
    let error = parse_document(source, &options()).unwrap_err();
    assert_eq!(error.code, "INVALID_VALUE");
    assert!(error.span.is_some());
}

#[test]
fn nested_object_references_resolve() {
    let source = r#"<audioFormatExtended>
<audioObject audioObjectID="AO_1001" audioObjectName="Group">
  <audioObjectIDRef>AO_1002</audioObjectIDRef>
</audioObject>
<audioObject audioObjectID="AO_1002" audioObjectName="Member"/>
</audioFormatExtended>"#;

    let document = parse_document(source, &options()).unwrap();
    let group = &document.audio_objects()[0];
    assert_eq!(group.object_refs.len(), 1);
    assert_eq!(group.object_refs[0].to_string(), "AO_1002");
    assert!(document.audio_objects()[1].object_refs.is_empty());
}

#[test]
fn fractional_timecodes_survive_into_the_object() {
    let source = r#"<audioFormatExtended>
<audioObject audioObjectID="AO_1001" audioObjectName="Sampled"
    start="00:00:02.24000S48000"/>
</audioFormatExtended>"#;

    let document = parse_document(source, &options()).unwrap();
    assert_eq!(
        document.audio_objects()[0].start,
        Some(Time::Fractional {
            numerator: 2 * 48000 + 24000,
            denominator: 48000
        })
    );
}
