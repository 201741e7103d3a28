// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use vellum::{
    decode_value, tick, Buffer, HandleTable, HitTest, Key, KeyMsg, LifecycleError, MouseButton,
    MouseEvent, MouseMsg, Msg, Textarea, Viewport,
};

#[test]
fn textarea_types_a_multiline_paragraph_and_wraps_it() {
    let ta = Textarea::new();
    ta.focus().unwrap();
    ta.set_width(16).unwrap();

    for word in ["the", " ", "quick", " ", "brown", " ", "fox"] {
        ta.insert_string(word).unwrap();
    }

    assert_eq!(ta.value().unwrap(), "the quick brown fox");
    assert!(ta.visual_line_count().unwrap() >= 2);
}

#[test]
fn textarea_newline_key_creates_a_second_logical_line() {
    let ta = Textarea::new();
    ta.focus().unwrap();
    ta.update(&Msg::Key(KeyMsg { key: "h".into() })).unwrap();
    ta.update(&Msg::Key(KeyMsg { key: "enter".into() })).unwrap();
    ta.update(&Msg::Key(KeyMsg { key: "i".into() })).unwrap();

    assert_eq!(ta.line_count().unwrap(), 2);
    assert_eq!(ta.value().unwrap(), "h\ni");
}

#[test]
fn textarea_arrow_navigation_crosses_line_boundaries() {
    let ta = Textarea::new();
    ta.focus().unwrap();
    ta.set_value("ab\ncd").unwrap();
    ta.set_position(0, 2).unwrap();

    ta.update(&Msg::Key(KeyMsg { key: "right".into() })).unwrap();
    assert_eq!((ta.line().unwrap(), ta.col().unwrap()), (1, 0));

    ta.update(&Msg::Key(KeyMsg { key: "left".into() })).unwrap();
    assert_eq!((ta.line().unwrap(), ta.col().unwrap()), (0, 2));
}

#[test]
fn textarea_click_resolves_through_full_outer_context_chain() {
    let ta = Textarea::new();
    ta.focus().unwrap();
    ta.set_width(20).unwrap();
    ta.set_height(5).unwrap();
    ta.set_value("hello\nworld").unwrap();

    ta.set_viewport_context(0, 0, 0, 10, 0, 0).unwrap();

    let hit = ta.handle_click_at_screen_coords(2, 1).unwrap();
    match hit {
        HitTest::Hit(pos) => assert_eq!(pos.row, 1),
        HitTest::Miss => panic!("expected a hit inside the document"),
    }
}

#[test]
fn textarea_click_outside_outer_viewport_misses() {
    let ta = Textarea::new();
    ta.focus().unwrap();
    ta.set_value("hi").unwrap();
    // Outer context never initialized: every coordinate translation must miss.
    let hit = ta.handle_click_at_screen_coords(0, 0).unwrap();
    assert!(matches!(hit, HitTest::Miss));
}

#[test]
fn textarea_mouse_click_through_update_moves_the_cursor() {
    let ta = Textarea::new();
    ta.focus().unwrap();
    ta.set_value("abcdef").unwrap();
    ta.set_viewport_context(0, 0, 0, 10, 0, 0).unwrap();

    let consumed = ta
        .update(&Msg::Mouse(MouseMsg {
            x: 3,
            y: 0,
            button: MouseButton::Left,
            event: MouseEvent::Press,
            alt: false,
            ctrl: false,
            shift: false,
        }))
        .unwrap();

    assert!(consumed);
    assert_eq!(ta.col().unwrap(), 3);
}

#[test]
fn textarea_dispose_locks_out_every_operation_with_lifecycle_error() {
    let ta = Textarea::new();
    ta.insert_string("data").unwrap();
    ta.dispose();

    assert_eq!(ta.value().unwrap_err(), LifecycleError::Disposed);
    assert_eq!(ta.set_width(10).unwrap_err(), LifecycleError::Disposed);
    assert_eq!(
        ta.handle_click_at_screen_coords(0, 0).unwrap_err(),
        LifecycleError::Disposed
    );
}

#[test]
fn viewport_scrolls_through_a_rendered_page() {
    let vp = Viewport::new(40, 4);
    let lines: Vec<String> = (0..50).map(|i| format!("row {i}")).collect();
    vp.set_content(lines).unwrap();

    vp.page_down().unwrap();
    assert!(vp.y_offset().unwrap() > 0);

    vp.goto_bottom().unwrap();
    assert!(vp.at_bottom().unwrap());

    vp.goto_top().unwrap();
    assert!(vp.at_top().unwrap());
}

#[test]
fn viewport_resize_reclamps_a_scrolled_offset() {
    let vp = Viewport::new(40, 4);
    vp.set_content((0..20).map(|i| format!("row {i}")).collect()).unwrap();
    vp.goto_bottom().unwrap();
    let bottom_offset = vp.y_offset().unwrap();

    vp.set_height(20).unwrap();
    assert!(vp.y_offset().unwrap() <= bottom_offset);
}

#[test]
fn command_descriptor_round_trips_through_json_and_a_handle_table() {
    let table: HandleTable<&'static str> = HandleTable::new();
    let descriptor = tick(250, "cursor-blink").expect("positive duration is valid");

    let encoded = serde_json::to_value(&descriptor).unwrap();
    let decoded = decode_value(&encoded, &table).expect("tick descriptor must decode");

    match decoded {
        vellum::NativeCmd::Tick { duration_ms, id } => {
            assert_eq!(duration_ms, 250);
            assert_eq!(id, "cursor-blink");
        }
        other => panic!("expected Tick, got {other:?}"),
    }
}

#[test]
fn unknown_json_shapes_tolerate_into_no_command() {
    let table: HandleTable<&'static str> = HandleTable::new();
    let malformed = serde_json::json!({ "foo": "bar" });
    assert!(decode_value(&malformed, &table).is_none());
}

#[test]
fn buffer_word_motions_agree_with_the_facade_level_cursor() {
    let mut buffer = Buffer::new();
    buffer.set_total_width(80);
    buffer.set_value("foo bar baz");
    buffer.set_cursor(11);

    buffer.cursor_word_left();
    assert_eq!(buffer.col(), 8);

    buffer.cursor_word_left();
    assert_eq!(buffer.col(), 4);
}

#[test]
fn key_parser_recognizes_ctrl_chords_used_by_the_textarea() {
    assert_eq!(Key::parse("ctrl+w"), Key::Ctrl('w'));
    assert_eq!(Key::parse("backspace"), Key::Backspace);
    assert_eq!(Key::parse("j"), Key::Char('j'));
}
