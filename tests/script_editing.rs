//! Script editing and JSON document tests.

use convo_sim::error::Error;
use convo_sim::script::{MessageContent, MessagePatch, Script, Sender};

fn editable_script() -> Script {
    let mut script = Script::default();
    script.add_message(Sender::Party1, "first", Vec::new(), 100);
    script.add_message(Sender::Party2, "second", Vec::new(), 200);
    script.add_message(Sender::Party1, "third", Vec::new(), 300);
    script
}

#[test]
fn add_assigns_unique_ids_in_order() {
    let script = editable_script();
    let ids: Vec<u64> = script.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids[0] < ids[1] && ids[1] < ids[2]);
}

#[test]
fn update_patches_only_given_fields() {
    let mut script = editable_script();
    let id = script.messages[1].id;
    script
        .update_message(
            id,
            MessagePatch {
                text: Some("patched".into()),
                delay_ms: Some(999),
                ..MessagePatch::default()
            },
        )
        .unwrap();

    let message = &script.messages[1];
    assert_eq!(message.id, id);
    assert_eq!(message.text, "patched");
    assert_eq!(message.delay_ms, 999);
    assert_eq!(message.sender, Sender::Party2);
}

#[test]
fn update_unknown_id_is_an_error() {
    let mut script = editable_script();
    let result = script.update_message(u64::MAX, MessagePatch::default());
    assert!(matches!(result, Err(Error::MessageNotFound(_))));
}

#[test]
fn delete_removes_the_message() {
    let mut script = editable_script();
    let id = script.messages[1].id;
    script.delete_message(id).unwrap();
    assert_eq!(script.messages.len(), 2);
    assert!(script.messages.iter().all(|m| m.id != id));

    assert!(matches!(
        script.delete_message(id),
        Err(Error::MessageNotFound(_))
    ));
}

#[test]
fn move_reorders_messages() {
    let mut script = editable_script();
    script.move_message(0, 2).unwrap();
    let texts: Vec<&str> = script.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["second", "third", "first"]);

    script.move_message(2, 0).unwrap();
    let texts: Vec<&str> = script.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[test]
fn move_out_of_range_is_an_error() {
    let mut script = editable_script();
    assert!(matches!(
        script.move_message(5, 0),
        Err(Error::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        script.move_message(0, 3),
        Err(Error::IndexOutOfRange { .. })
    ));
}

#[test]
fn clear_empties_the_script_but_keeps_the_title() {
    let mut script = editable_script();
    script.title = "Keep me".into();
    script.clear_messages();
    assert!(script.messages.is_empty());
    assert_eq!(script.title, "Keep me");
}

#[test]
fn sample_script_has_six_alternating_messages() {
    let script = Script::sample();
    assert_eq!(script.title, "Sample Conversation");
    assert_eq!(script.messages.len(), 6);
    for (i, message) in script.messages.iter().enumerate() {
        let expected = if i % 2 == 0 { Sender::Party1 } else { Sender::Party2 };
        assert_eq!(message.sender, expected);
    }
}

#[test]
fn json_round_trips_the_sample_script() {
    let script = Script::sample();
    let json = script.to_json().unwrap();
    let reloaded = Script::from_json(&json).unwrap();
    assert_eq!(reloaded, script);
}

#[test]
fn rich_content_serializes_with_type_tags() {
    let mut script = Script::default();
    script.add_message(
        Sender::Party1,
        "",
        vec![
            MessageContent::Text { text: "look at".into() },
            MessageContent::Link {
                text: "this".into(),
                url: "https://example.com".into(),
            },
            MessageContent::Image {
                url: "https://example.com/cat.png".into(),
                alt: None,
            },
        ],
        500,
    );

    let json = script.to_json().unwrap();
    assert!(json.contains(r#""type": "text""#));
    assert!(json.contains(r#""type": "link""#));
    assert!(json.contains(r#""type": "image""#));
    // Absent alt is omitted, not serialized as null.
    assert!(!json.contains("alt"));

    let reloaded = Script::from_json(&json).unwrap();
    assert_eq!(reloaded, script);
}

#[test]
fn import_bumps_the_id_counter_past_imported_ids() {
    let json = r#"{
        "title": "Imported",
        "messages": [
            { "id": 900000, "sender": "party1", "text": "hi", "delay_ms": 100 }
        ]
    }"#;
    let mut script = Script::from_json(json).unwrap();
    assert_eq!(script.messages[0].id, 900_000);

    let new_id = script.add_message(Sender::Party2, "fresh", Vec::new(), 100);
    assert!(new_id > 900_000);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let script = Script::from_json("{}").unwrap();
    assert_eq!(script.title, "New Conversation");
    assert!(script.messages.is_empty());
}

#[test]
fn save_then_load_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.json");

    let script = editable_script();
    script.save(&path).unwrap();

    let loaded = Script::load(&path).unwrap();
    assert_eq!(loaded.title, script.title);
    assert_eq!(loaded.messages, script.messages);
}

#[test]
fn load_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(Script::load(missing), Err(Error::Io(_))));
}
