use super::*;
use crate::config::{Action, Config};
use crate::control::{ControlMessage, InputEvent};
use crate::draw::{BLUE, RED};
use crate::input::{CursorHint, Key, Modifiers, MouseButton, Tool};
use crate::util::Point;
use std::time::{Duration, Instant};

const OPAQUE_RED: u32 = 0xffff0000;

fn create_test_engine() -> Engine {
    Engine::new(200, 150).unwrap()
}

fn armed(tool: Tool) -> Engine {
    let mut engine = create_test_engine();
    engine.set_tool(Some(tool));
    engine
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Presses at the first point, moves through the rest, releases at the last.
fn drag(engine: &mut Engine, points: &[Point]) {
    let (first, rest) = points.split_first().unwrap();
    engine.on_pointer_down(MouseButton::Left, *first);
    for point in rest {
        engine.on_pointer_move(*point);
    }
    engine.on_pointer_up(MouseButton::Left, *points.last().unwrap());
}

fn type_text(engine: &mut Engine, text: &str) {
    for c in text.chars() {
        engine.on_key_press(Key::Char(c), Modifiers::NONE);
    }
}

// ----------------------------------------------------------------------
// Initial state and gating
// ----------------------------------------------------------------------

#[test]
fn starts_idle_with_one_blank_snapshot() {
    let engine = create_test_engine();
    assert_eq!(engine.tool(), None);
    assert!(!engine.is_drawing_enabled());
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.history_len(), 1);
    assert_eq!(engine.history_cursor(), Some(0));
    assert_eq!(engine.color(), RED);
    assert_eq!(engine.stroke_width(), 3);
    assert!(engine.surface().is_blank());
}

#[test]
fn pointer_input_ignored_without_tool() {
    let mut engine = create_test_engine();
    engine.set_drawing_enabled(true);
    drag(&mut engine, &[p(10.0, 10.0), p(50.0, 50.0)]);
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

#[test]
fn pointer_input_ignored_while_disabled() {
    let mut engine = armed(Tool::Pen);
    engine.set_drawing_enabled(false);
    drag(&mut engine, &[p(10.0, 10.0), p(50.0, 50.0)]);
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

#[test]
fn secondary_button_does_not_draw() {
    let mut engine = armed(Tool::Pen);
    engine.on_pointer_down(MouseButton::Right, p(10.0, 10.0));
    engine.on_pointer_move(p(60.0, 10.0));
    engine.on_pointer_up(MouseButton::Right, p(60.0, 10.0));
    assert_eq!(engine.phase(), Phase::Armed);
    assert!(engine.surface().is_blank());
}

#[test]
fn tool_selection_enables_drawing() {
    let mut engine = create_test_engine();
    engine.set_tool(Some(Tool::Arrow));
    assert!(engine.is_drawing_enabled());
    assert_eq!(engine.phase(), Phase::Armed);

    // Deselecting keeps drawing enabled but nothing is armed
    engine.set_tool(None);
    assert!(engine.is_drawing_enabled());
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn move_and_up_without_gesture_are_noops() {
    let mut engine = armed(Tool::Pen);
    engine.on_pointer_move(p(30.0, 30.0));
    engine.on_pointer_up(MouseButton::Left, p(30.0, 30.0));
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

// ----------------------------------------------------------------------
// Freehand
// ----------------------------------------------------------------------

#[test]
fn pen_undo_redo_end_to_end() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(50.0, 10.0), p(50.0, 50.0)]);

    assert_eq!(engine.history_len(), 2);
    assert_eq!(engine.history_cursor(), Some(1));
    assert_eq!(engine.surface().pixel(30, 10), Some(OPAQUE_RED));
    assert_eq!(engine.surface().alpha_at(50, 30), Some(255));
    let drawn = engine.surface().pixels();

    engine.undo();
    assert_eq!(engine.history_cursor(), Some(0));
    assert!(engine.surface().is_blank());

    engine.redo();
    assert_eq!(engine.history_cursor(), Some(1));
    assert_eq!(engine.surface().pixels(), drawn);
}

#[test]
fn pen_click_without_movement_commits_blank_stroke() {
    let mut engine = armed(Tool::Pen);
    engine.on_pointer_down(MouseButton::Left, p(40.0, 40.0));
    engine.on_pointer_up(MouseButton::Left, p(40.0, 40.0));
    assert_eq!(engine.history_len(), 2);
    assert!(engine.surface().is_blank());
}

#[test]
fn eraser_removes_ink_with_wide_stroke() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 50.0), p(190.0, 50.0)]);
    assert_eq!(engine.surface().alpha_at(100, 50), Some(255));

    engine.set_tool(Some(Tool::Eraser));
    drag(&mut engine, &[p(100.0, 0.0), p(100.0, 150.0)]);

    // Eraser is 15px wide at stroke width 3
    assert_eq!(engine.surface().alpha_at(100, 50), Some(0));
    assert_eq!(engine.surface().alpha_at(94, 50), Some(0));
    assert_eq!(engine.surface().alpha_at(30, 50), Some(255));
    assert_eq!(engine.history_len(), 3);

    engine.undo();
    assert_eq!(engine.surface().alpha_at(100, 50), Some(255));
}

#[test]
fn style_is_captured_at_pointer_down() {
    let mut engine = armed(Tool::Pen);
    engine.on_pointer_down(MouseButton::Left, p(10.0, 20.0));
    engine.set_color("#0000ff");
    engine.on_pointer_move(p(80.0, 20.0));
    engine.on_pointer_up(MouseButton::Left, p(80.0, 20.0));

    assert_eq!(engine.surface().pixel(40, 20), Some(OPAQUE_RED));
    assert_eq!(engine.color(), BLUE);
}

// ----------------------------------------------------------------------
// Bounded shapes
// ----------------------------------------------------------------------

#[test]
fn shape_preview_is_translucent_and_final_is_opaque() {
    let mut engine = armed(Tool::Rectangle);
    engine.on_pointer_down(MouseButton::Left, p(20.0, 20.0));
    engine.on_pointer_move(p(120.0, 100.0));

    assert_eq!(engine.phase(), Phase::ActiveGesture);
    let preview_alpha = engine.surface().alpha_at(20, 60).unwrap();
    assert!((126..=129).contains(&preview_alpha), "alpha {preview_alpha}");
    assert_eq!(engine.history_len(), 1);

    engine.on_pointer_up(MouseButton::Left, p(120.0, 100.0));
    assert_eq!(engine.surface().alpha_at(20, 60), Some(255));
    assert_eq!(engine.history_len(), 2);
    assert_eq!(engine.phase(), Phase::Armed);
}

#[test]
fn shape_preview_does_not_accumulate() {
    let mut engine = armed(Tool::Rectangle);
    engine.on_pointer_down(MouseButton::Left, p(20.0, 20.0));
    engine.on_pointer_move(p(120.0, 100.0));
    engine.on_pointer_move(p(60.0, 60.0));

    // The first preview's right edge is gone
    assert_eq!(engine.surface().alpha_at(120, 80), Some(0));
    assert!(engine.surface().alpha_at(60, 40).unwrap() > 0);
}

#[test]
fn reversed_rectangle_drag_is_identical() {
    let mut forward = armed(Tool::Rectangle);
    drag(&mut forward, &[p(0.0, 0.0), p(100.0, 50.0)]);

    let mut reversed = armed(Tool::Rectangle);
    drag(&mut reversed, &[p(100.0, 50.0), p(0.0, 0.0)]);

    assert_eq!(forward.surface().pixels(), reversed.surface().pixels());
}

#[test]
fn every_bounded_tool_commits_one_snapshot() {
    for tool in [Tool::Rectangle, Tool::Ellipse, Tool::Line, Tool::Arrow] {
        let mut engine = armed(tool);
        drag(
            &mut engine,
            &[p(30.0, 30.0), p(90.0, 70.0), p(150.0, 110.0)],
        );
        assert_eq!(engine.history_len(), 2, "{tool}");
        assert!(!engine.surface().is_blank(), "{tool}");
    }
}

#[test]
fn flat_ellipse_drag_leaves_a_mark() {
    let mut engine = armed(Tool::Ellipse);
    drag(&mut engine, &[p(10.0, 50.0), p(100.0, 50.0)]);

    assert_eq!(engine.history_len(), 2);
    assert!(!engine.surface().is_blank());
    assert_eq!(engine.surface().alpha_at(55, 50), Some(255));
}

#[test]
fn pointer_leave_finishes_at_last_point() {
    let mut engine = armed(Tool::Line);
    engine.on_pointer_down(MouseButton::Left, p(10.0, 75.0));
    engine.on_pointer_move(p(150.0, 75.0));
    engine.on_pointer_leave();

    assert_eq!(engine.state(), &DrawingState::Idle);
    assert_eq!(engine.history_len(), 2);
    assert_eq!(engine.surface().alpha_at(100, 75), Some(255));
    assert_eq!(engine.surface().alpha_at(170, 75), Some(0));
}

#[test]
fn touch_end_uses_last_sampled_point() {
    let mut engine = armed(Tool::Rectangle);
    engine.on_touch_start(p(20.0, 20.0));
    engine.on_touch_move(p(80.0, 60.0));
    engine.on_touch_end();

    assert_eq!(engine.history_len(), 2);
    assert_eq!(engine.surface().alpha_at(80, 40), Some(255));
    // Nothing was drawn towards the origin
    assert_eq!(engine.surface().alpha_at(20, 10), Some(0));
}

#[test]
fn touch_cancel_commits_freehand() {
    let mut engine = armed(Tool::Pen);
    engine.on_touch_start(p(20.0, 20.0));
    engine.on_touch_move(p(60.0, 20.0));
    engine.on_touch_cancel();
    assert_eq!(engine.history_len(), 2);
    assert_eq!(engine.phase(), Phase::Armed);
}

// ----------------------------------------------------------------------
// History
// ----------------------------------------------------------------------

#[test]
fn undo_then_redo_restores_pixels_exactly() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(100.0, 10.0)]);
    engine.set_tool(Some(Tool::Ellipse));
    drag(&mut engine, &[p(20.0, 30.0), p(150.0, 120.0)]);
    let before = engine.surface().pixels();

    engine.undo();
    assert_ne!(engine.surface().pixels(), before);
    engine.redo();
    assert_eq!(engine.surface().pixels(), before);
}

#[test]
fn undo_past_first_snapshot_clears() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(100.0, 10.0)]);

    engine.undo();
    engine.undo();
    assert_eq!(engine.history_cursor(), None);
    assert!(engine.surface().is_blank());

    // Already at the start: stays put
    engine.undo();
    assert_eq!(engine.history_cursor(), None);

    engine.redo();
    assert_eq!(engine.history_cursor(), Some(0));
    assert!(engine.surface().is_blank());
    engine.redo();
    assert_eq!(engine.surface().alpha_at(50, 10), Some(255));
}

#[test]
fn new_edit_after_undo_truncates_redo() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(100.0, 10.0)]);
    drag(&mut engine, &[p(10.0, 40.0), p(100.0, 40.0)]);
    engine.undo();
    assert!(engine.can_redo());

    drag(&mut engine, &[p(10.0, 80.0), p(100.0, 80.0)]);
    assert_eq!(engine.history_len(), 3);
    assert!(!engine.can_redo());

    engine.redo();
    assert_eq!(engine.surface().alpha_at(50, 40), Some(0));
    assert_eq!(engine.surface().alpha_at(50, 80), Some(255));
}

#[test]
fn history_is_bounded_by_config() {
    let mut config = Config::default();
    config.history.max_history = 5;
    let mut engine = Engine::with_config(120, 120, &config).unwrap();
    engine.set_tool(Some(Tool::Pen));

    for i in 0..20 {
        let y = 5.0 + i as f64 * 5.0;
        drag(&mut engine, &[p(10.0, y), p(100.0, y)]);
        assert!(engine.history_len() <= 5);
    }
    assert_eq!(engine.history_len(), 5);
    // Eviction leaves the cursor on the last index
    assert_eq!(engine.history_cursor(), Some(4));

    for _ in 0..10 {
        engine.undo();
    }
    assert_eq!(engine.history_cursor(), None);
    assert!(engine.surface().is_blank());
}

#[test]
fn bounded_history_keeps_most_recent_snapshots_intact() {
    let mut config = Config::default();
    config.history.max_history = 3;
    let mut engine = Engine::with_config(120, 120, &config).unwrap();
    engine.set_tool(Some(Tool::Pen));

    let mut after_each = Vec::new();
    for i in 0..6 {
        let y = 10.0 + i as f64 * 15.0;
        drag(&mut engine, &[p(10.0, y), p(100.0, y)]);
        after_each.push(engine.surface().pixels());
    }
    assert_eq!(engine.history_len(), 3);
    assert_eq!(engine.surface().pixels(), after_each[5]);

    engine.undo();
    assert_eq!(engine.surface().pixels(), after_each[4]);
    engine.undo();
    assert_eq!(engine.surface().pixels(), after_each[3]);

    // Older drags were evicted: the next step back is the empty surface
    engine.undo();
    assert_eq!(engine.history_cursor(), None);
    assert!(engine.surface().is_blank());

    engine.redo();
    assert_eq!(engine.surface().pixels(), after_each[3]);
}

#[test]
fn clear_is_undoable() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(100.0, 10.0)]);
    engine.clear();

    assert!(engine.surface().is_blank());
    assert_eq!(engine.history_len(), 3);

    engine.undo();
    assert_eq!(engine.surface().alpha_at(50, 10), Some(255));
}

#[test]
fn undo_during_gesture_abandons_it() {
    let mut engine = armed(Tool::Rectangle);
    drag(&mut engine, &[p(10.0, 10.0), p(60.0, 60.0)]);
    engine.on_pointer_down(MouseButton::Left, p(100.0, 100.0));
    engine.on_pointer_move(p(180.0, 140.0));

    engine.undo();
    assert_eq!(engine.state(), &DrawingState::Idle);
    assert!(engine.surface().is_blank());

    // The release of the abandoned gesture is a no-op
    engine.on_pointer_up(MouseButton::Left, p(180.0, 140.0));
    assert_eq!(engine.history_len(), 2);
    assert!(engine.surface().is_blank());
}

// ----------------------------------------------------------------------
// Pointer tool
// ----------------------------------------------------------------------

#[test]
fn laser_tracks_only_while_held() {
    let mut engine = armed(Tool::Pointer);
    assert_eq!(engine.cursor_hint(), CursorHint::Pointer);

    engine.on_pointer_move(p(5.0, 5.0));
    assert!(!engine.laser().is_active());

    engine.on_pointer_down(MouseButton::Left, p(40.0, 40.0));
    assert_eq!(engine.laser().visible_at(), Some(p(40.0, 40.0)));
    engine.on_pointer_move(p(60.0, 45.0));
    assert_eq!(engine.laser().visible_at(), Some(p(60.0, 45.0)));

    engine.on_pointer_up(MouseButton::Left, p(60.0, 45.0));
    assert!(!engine.laser().is_active());
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

#[test]
fn switching_tool_hides_laser() {
    let mut engine = armed(Tool::Pointer);
    engine.on_pointer_down(MouseButton::Left, p(40.0, 40.0));
    engine.set_tool(Some(Tool::Pen));
    assert!(!engine.laser().is_active());
    assert_eq!(engine.state(), &DrawingState::Idle);
}

#[test]
fn disabling_drawing_hides_laser() {
    let mut engine = armed(Tool::Pointer);
    engine.on_pointer_down(MouseButton::Left, p(40.0, 40.0));
    engine.set_drawing_enabled(false);
    assert!(!engine.laser().is_active());
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.cursor_hint(), CursorHint::Default);
}

#[test]
fn laser_renders_on_overlay_not_surface() {
    let mut engine = armed(Tool::Pointer);
    engine.on_pointer_down(MouseButton::Left, p(40.0, 40.0));

    let overlay = crate::draw::Surface::new(200, 150).unwrap();
    overlay.draw(|ctx| engine.render_overlay(ctx));
    assert_eq!(overlay.alpha_at(40, 40).map(|a| a > 0), Some(true));
    assert!(engine.surface().is_blank());
}

// ----------------------------------------------------------------------
// Text
// ----------------------------------------------------------------------

#[test]
fn text_field_commits_on_return() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(50.0, 60.0));
    engine.on_pointer_up(MouseButton::Left, p(50.0, 60.0));
    assert_eq!(engine.phase(), Phase::ActiveGesture);

    type_text(&mut engine, "Hix");
    engine.on_key_press(Key::Backspace, Modifiers::NONE);
    let pending = engine.pending_text().unwrap();
    assert_eq!(pending.buffer, "Hi");
    assert_eq!(pending.font_size, 18.0);
    assert!(!pending.highlight);
    assert_eq!(pending.anchor, p(50.0, 60.0));

    engine.on_key_press(Key::Return, Modifiers::NONE);
    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 2);
    assert_eq!(engine.phase(), Phase::Armed);
}

#[test]
fn escape_discards_text() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(50.0, 60.0));
    type_text(&mut engine, "draft");
    engine.on_key_press(Key::Escape, Modifiers::NONE);

    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

#[test]
fn whitespace_only_text_is_discarded_on_commit() {
    let mut engine = armed(Tool::TextHighlight);
    engine.on_pointer_down(MouseButton::Left, p(50.0, 60.0));
    type_text(&mut engine, "   ");
    engine.on_key_press(Key::Return, Modifiers::NONE);

    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

#[test]
fn focus_loss_inside_settle_delay_is_ignored() {
    let t0 = Instant::now();
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down_at(MouseButton::Left, p(50.0, 60.0), t0);
    type_text(&mut engine, "note");

    engine.on_focus_lost_at(t0 + Duration::from_millis(50));
    assert!(engine.pending_text().is_some());

    engine.on_focus_lost_at(t0 + Duration::from_millis(200));
    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 2);
}

#[test]
fn focus_loss_on_blank_field_discards() {
    let t0 = Instant::now();
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down_at(MouseButton::Left, p(50.0, 60.0), t0);

    engine.on_focus_lost_at(t0 + Duration::from_secs(1));
    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn clicking_elsewhere_commits_previous_field() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(20.0, 20.0));
    type_text(&mut engine, "first");
    engine.on_pointer_down(MouseButton::Left, p(100.0, 100.0));

    assert_eq!(engine.history_len(), 2);
    let pending = engine.pending_text().unwrap();
    assert_eq!(pending.anchor, p(100.0, 100.0));
    assert!(pending.buffer.is_empty());
}

#[test]
fn switching_tool_commits_pending_text() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(20.0, 20.0));
    type_text(&mut engine, "label");

    engine.set_tool(Some(Tool::Pen));
    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 2);
}

#[test]
fn reselecting_same_text_tool_keeps_field() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(20.0, 20.0));
    type_text(&mut engine, "keep");

    engine.set_tool(Some(Tool::TextStandard));
    assert_eq!(engine.pending_text().unwrap().buffer, "keep");
}

#[test]
fn disabling_drawing_discards_pending_text() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(20.0, 20.0));
    type_text(&mut engine, "gone");

    engine.set_drawing_enabled(false);
    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 1);
    assert!(engine.surface().is_blank());
}

#[test]
fn highlight_text_paints_background_in_color() {
    let mut engine = armed(Tool::TextHighlight);
    engine.on_pointer_down(MouseButton::Left, p(100.0, 75.0));
    type_text(&mut engine, "A");
    engine.commit_text();

    assert_eq!(engine.history_len(), 2);
    // Inside the left padding strip, clear of any glyph
    assert_eq!(engine.surface().pixel(97, 75), Some(OPAQUE_RED));
}

#[test]
fn font_size_follows_stroke_width() {
    let mut engine = armed(Tool::TextStandard);
    engine.set_stroke_width(5.0);
    engine.on_pointer_down(MouseButton::Left, p(10.0, 10.0));
    assert_eq!(engine.pending_text().unwrap().font_size, 30.0);
}

#[test]
fn pending_text_preview_uses_contrast_color() {
    let mut engine = armed(Tool::TextHighlight);
    engine.set_color("#ffffff");
    engine.on_pointer_down(MouseButton::Left, p(10.0, 10.0));
    let pending = engine.pending_text().unwrap();
    assert_eq!(pending.text_color(), crate::draw::BLACK);
}

// ----------------------------------------------------------------------
// Style values
// ----------------------------------------------------------------------

#[test]
fn malformed_style_values_fall_back() {
    let mut engine = create_test_engine();
    engine.set_color("#00ff00");
    assert_eq!(engine.color().to_hex(), "#00ff00");

    engine.set_color("chartreuse");
    assert_eq!(engine.color(), RED);

    engine.set_stroke_width(0.0);
    assert_eq!(engine.stroke_width(), 1);
    engine.set_stroke_width(-4.0);
    assert_eq!(engine.stroke_width(), 1);
    engine.set_stroke_width(f64::NAN);
    assert_eq!(engine.stroke_width(), 1);
    engine.set_stroke_width(7.4);
    assert_eq!(engine.stroke_width(), 7);
}

#[test]
fn invalid_color_falls_back_to_configured_default() {
    let mut config = Config::default();
    config.drawing.default_color = crate::config::ColorSpec::Name("blue".into());
    let mut engine = Engine::with_config(50, 50, &config).unwrap();
    engine.set_color("#zzzzzz");
    assert_eq!(engine.color(), BLUE);
}

// ----------------------------------------------------------------------
// Control messages, input events and shortcuts
// ----------------------------------------------------------------------

#[test]
fn control_messages_drive_the_engine() {
    let mut engine = create_test_engine();
    let messages = [
        ControlMessage::ToolChanged {
            tool: Some(Tool::Line),
        },
        ControlMessage::ColorChanged {
            color: "#0000ff".into(),
        },
        ControlMessage::StrokeWidthChanged { width: 6.0 },
    ];
    for message in &messages {
        engine.apply_control(message);
    }
    assert_eq!(engine.tool(), Some(Tool::Line));
    assert_eq!(engine.color(), BLUE);
    assert_eq!(engine.stroke_width(), 6);

    engine.apply_input(&InputEvent::PointerDown {
        x: 10.0,
        y: 70.0,
        button: MouseButton::Left,
    });
    engine.apply_input(&InputEvent::PointerUp {
        x: 190.0,
        y: 70.0,
        button: MouseButton::Left,
    });
    assert_eq!(engine.history_len(), 2);

    engine.apply_control(&ControlMessage::Undo);
    assert!(engine.surface().is_blank());
    engine.apply_control(&ControlMessage::Redo);
    assert!(!engine.surface().is_blank());
    engine.apply_control(&ControlMessage::DrawingModeChanged { enabled: false });
    assert!(!engine.is_drawing_enabled());
}

#[test]
fn resize_event_preserves_content() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(40.0, 10.0)]);
    engine.apply_input(&InputEvent::Resize {
        width: 300,
        height: 40,
    });

    assert_eq!(engine.surface().width(), 300);
    assert_eq!(engine.surface().height(), 40);
    assert_eq!(engine.surface().alpha_at(20, 10), Some(255));
    assert_eq!(engine.surface().alpha_at(250, 10), Some(0));

    // Bogus sizes are ignored
    engine.resize(0, -5);
    assert_eq!(engine.surface().width(), 300);
}

#[test]
fn shortcut_selects_tool_and_enables_drawing() {
    let mut engine = create_test_engine();
    engine.on_key_press(Key::Char('P'), Modifiers::ctrl_shift());
    assert_eq!(engine.tool(), Some(Tool::Pen));
    assert!(engine.is_drawing_enabled());

    engine.on_key_press(Key::Char('o'), Modifiers::ctrl_shift());
    assert_eq!(engine.tool(), Some(Tool::Ellipse));
}

#[test]
fn undo_shortcut_ignored_while_disabled() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(100.0, 10.0)]);

    engine.apply_action(Action::ToggleDrawing);
    assert!(!engine.is_drawing_enabled());
    engine.on_key_press(Key::Char('z'), Modifiers::ctrl());
    assert_eq!(engine.history_cursor(), Some(1));

    engine.on_key_press(Key::Char('d'), Modifiers::ctrl_shift());
    assert!(engine.is_drawing_enabled());
    engine.on_key_press(Key::Char('z'), Modifiers::ctrl());
    assert_eq!(engine.history_cursor(), Some(0));
    engine.on_key_press(Key::Char('Z'), Modifiers::ctrl_shift());
    assert_eq!(engine.history_cursor(), Some(1));
}

#[test]
fn clear_shortcut_works_while_disabled() {
    let mut engine = armed(Tool::Pen);
    drag(&mut engine, &[p(10.0, 10.0), p(100.0, 10.0)]);
    engine.set_drawing_enabled(false);

    engine.on_key_press(Key::Char('c'), Modifiers::ctrl_shift());
    assert!(engine.surface().is_blank());
    assert_eq!(engine.history_len(), 3);
}

#[test]
fn plain_keys_go_to_text_field_not_shortcuts() {
    let mut config = Config::default();
    config.keybindings.select_pen = vec!["P".to_string()];
    let mut engine = Engine::with_config(100, 100, &config).unwrap();
    engine.set_tool(Some(Tool::TextStandard));
    engine.on_pointer_down(MouseButton::Left, p(10.0, 50.0));

    engine.on_key_press(Key::Char('P'), Modifiers::NONE);
    assert_eq!(engine.tool(), Some(Tool::TextStandard));
    assert_eq!(engine.pending_text().unwrap().buffer, "P");

    // With the field closed, the same key is a shortcut
    engine.on_key_press(Key::Escape, Modifiers::NONE);
    engine.on_key_press(Key::Char('P'), Modifiers::NONE);
    assert_eq!(engine.tool(), Some(Tool::Pen));
}

#[test]
fn command_shortcut_while_typing_commits_text() {
    let mut engine = armed(Tool::TextStandard);
    engine.on_pointer_down(MouseButton::Left, p(10.0, 50.0));
    type_text(&mut engine, "ok");

    engine.on_key_press(Key::Char('r'), Modifiers::ctrl_shift());
    assert_eq!(engine.tool(), Some(Tool::Rectangle));
    assert!(engine.pending_text().is_none());
    assert_eq!(engine.history_len(), 2);
}

#[test]
fn invalid_keybindings_fail_construction() {
    let mut config = Config::default();
    config.keybindings.redo = vec!["Ctrl+Z".to_string()];
    assert!(matches!(
        Engine::with_config(10, 10, &config),
        Err(EngineError::Keybindings(_))
    ));
}

#[test]
fn zero_sized_surface_fails_construction() {
    assert!(matches!(
        Engine::new(0, 100),
        Err(EngineError::Surface(_))
    ));
}

#[test]
fn cursor_hint_follows_tool() {
    let mut engine = create_test_engine();
    assert_eq!(engine.cursor_hint(), CursorHint::Default);
    engine.set_tool(Some(Tool::Eraser));
    assert_eq!(engine.cursor_hint(), CursorHint::Eraser);
    engine.set_tool(Some(Tool::TextHighlight));
    assert_eq!(engine.cursor_hint(), CursorHint::Text);
    engine.set_tool(Some(Tool::Arrow));
    assert_eq!(engine.cursor_hint(), CursorHint::Crosshair);
}
