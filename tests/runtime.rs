mod common;

use common::{client, FakeTransport};
use octopanel::app::{ExitReason, InputEvent, MenuState, Panel};
use octopanel::domain::Command;
use octopanel::ui::{DrawCall, Point, RecordingSurface, Theme};
use octopanel::Config;
use serde_json::json;
use std::sync::mpsc;
use std::sync::Arc;

fn panel(fake: &FakeTransport) -> Panel {
    let client = Arc::new(client(fake));
    let mut config = Config::default();
    config.frame_rate = 200;
    Panel::from_config(&config, client).unwrap()
}

fn tap(panel: &mut Panel, x: i32, y: i32) -> Option<ExitReason> {
    panel
        .dispatch(&InputEvent::PointerDown { x, y })
        .or_else(|| panel.dispatch(&InputEvent::PointerUp { x, y }))
}

#[test]
fn status_bar_shows_temperatures_and_completion() {
    let fake = FakeTransport::healthy();
    let mut panel = panel(&fake);
    let mut surface = RecordingSurface::new(320, 240);

    panel.render_frame(&mut surface);
    assert!(surface.has_text("Hot end: 0.0\u{b0}C (0.0\u{b0}C)"));
    assert!(surface.has_text("0.0%"));

    let shared = Arc::new(client(&fake));
    shared.poll_status().unwrap();
    let mut panel = Panel::from_config(&Config::default(), Arc::clone(&shared)).unwrap();
    surface.clear();
    panel.render_frame(&mut surface);

    assert!(surface.has_text("Hot end: 201.3\u{b0}C (210.0\u{b0}C)"));
    assert!(surface.has_text("Bed: 60.0\u{b0}C (60.0\u{b0}C)"));
    assert!(surface.has_text("42.5%"));
    assert!(surface.has_text("Dashboard"));
    assert!(surface.has_text("0:10:00"));
}

#[test]
fn completion_shade_tracks_progress() {
    let fake = FakeTransport::healthy();
    let shared = Arc::new(client(&fake));
    shared.poll_status().unwrap();
    let mut panel = Panel::from_config(&Config::default(), shared).unwrap();
    let mut surface = RecordingSurface::new(320, 240);

    panel.render_frame(&mut surface);

    // 42.5% of 320 px, full height.
    let shade = surface.calls.iter().any(|call| {
        matches!(call, DrawCall::FillRect { rect, .. } if rect.x == 0 && rect.w == 136 && rect.h == 240)
    });
    assert!(shade);
}

#[test]
fn run_returns_quit_when_input_closes() {
    let fake = FakeTransport::healthy();
    let mut panel = panel(&fake);
    let mut surface = RecordingSurface::new(320, 240);
    let (tx, rx) = mpsc::channel::<InputEvent>();
    drop(tx);

    assert_eq!(panel.run(&mut surface, &rx), ExitReason::Quit);
}

#[test]
fn run_renders_frames_until_quit() {
    let fake = FakeTransport::healthy();
    let mut panel = panel(&fake);
    let mut surface = RecordingSurface::new(320, 240);
    let (tx, rx) = mpsc::channel();

    let sender = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(50));
        tx.send(InputEvent::Quit).unwrap();
        // Keep the channel open until the panel has seen the event.
        std::thread::sleep(std::time::Duration::from_millis(200));
    });

    assert_eq!(panel.run(&mut surface, &rx), ExitReason::Quit);
    assert!(surface.frames_presented >= 1);
    assert!(panel.state().done);
    sender.join().unwrap();
}

#[test]
fn start_button_sends_start_command() {
    let fake = FakeTransport::healthy();
    let shared = Arc::new(client(&fake));
    shared.poll_status().unwrap();
    let mut panel = Panel::from_config(&Config::default(), shared).unwrap();

    assert_eq!(tap(&mut panel, 80, 160), None);

    let posts = fake.posts();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].url.ends_with(&Command::StartJob.endpoint()));
    assert_eq!(posts[0].body, Some(json!({"command": "start"})));
}

#[test]
fn release_over_menu_button_drops_view_press() {
    let fake = FakeTransport::healthy();
    let shared = Arc::new(client(&fake));
    shared.poll_status().unwrap();
    let mut panel = Panel::from_config(&Config::default(), shared).unwrap();
    let mut surface = RecordingSurface::new(320, 240);
    let pressed = Theme::rgb(&Theme::default().colors.button_pressed_bg);
    let start_held = |surface: &RecordingSurface| {
        surface.calls.iter().any(|call| {
            matches!(call, DrawCall::FillRect { rect, color } if *color == pressed && rect.contains(Point::new(80, 160)))
        })
    };

    assert_eq!(panel.dispatch(&InputEvent::PointerDown { x: 80, y: 160 }), None);
    panel.render_frame(&mut surface);
    assert!(start_held(&surface));

    assert_eq!(panel.dispatch(&InputEvent::PointerUp { x: 280, y: 20 }), None);
    surface.clear();
    panel.render_frame(&mut surface);
    assert!(!start_held(&surface));
    assert!(fake.posts().is_empty());
    assert_eq!(panel.state().menu_state, MenuState::MenuClosed);
}

#[test]
fn failed_command_keeps_loop_alive() {
    let fake = FakeTransport::healthy();
    let shared = Arc::new(client(&fake));
    shared.poll_status().unwrap();
    let mut panel = Panel::from_config(&Config::default(), shared).unwrap();

    fake.clear_routes();
    assert_eq!(tap(&mut panel, 80, 160), None);
    assert_eq!(fake.posts().len(), 1);
    assert!(!panel.state().done);
}

#[test]
fn settings_buttons_request_reboot_and_shutdown() {
    let fake = FakeTransport::healthy();
    let mut panel = panel(&fake);
    assert!(panel.state_mut().select_view("settings"));

    assert_eq!(tap(&mut panel, 265, 60), Some(ExitReason::Reboot));
    assert_eq!(tap(&mut panel, 265, 95), Some(ExitReason::Shutdown));
    assert!(fake.posts().is_empty());
}

#[test]
fn escape_exits_with_quit() {
    let fake = FakeTransport::healthy();
    let mut panel = panel(&fake);

    let reason = panel.dispatch(&InputEvent::KeyDown(octopanel::Key::Escape));
    assert_eq!(reason, Some(ExitReason::Quit));
}

#[test]
fn files_view_fetches_list_on_each_activation() {
    let fake = FakeTransport::healthy();
    fake.route(
        "/api/files",
        200,
        r#"{"files": [{"name": "benchy.gcode", "path": "benchy.gcode", "type": "machinecode", "origin": "local", "size": 2500000, "date": 1700000000}]}"#,
    );
    let mut panel = panel(&fake);
    let mut surface = RecordingSurface::new(320, 240);
    let file_gets = |fake: &FakeTransport| {
        fake.requests().iter().filter(|r| r.url.ends_with("/api/files")).count()
    };

    assert!(panel.state_mut().select_view("files"));
    panel.render_frame(&mut surface);
    panel.render_frame(&mut surface);
    assert_eq!(file_gets(&fake), 1);
    assert!(surface.has_text("benchy"));

    assert!(panel.state_mut().select_view("files"));
    panel.render_frame(&mut surface);
    assert_eq!(file_gets(&fake), 2);
}

#[test]
fn files_view_shows_error_state_when_fetch_fails() {
    let fake = FakeTransport::new();
    let mut panel = panel(&fake);
    let mut surface = RecordingSurface::new(320, 240);

    assert!(panel.state_mut().select_view("files"));
    panel.render_frame(&mut surface);
    assert!(surface.has_text("Could not load files"));

    let error_fg = Theme::rgb(&Theme::default().colors.error_fg);
    let colored = surface.calls.iter().any(|call| {
        matches!(call, DrawCall::Text { text, color, .. } if text.contains("Could not load files") && *color == error_fg)
    });
    assert!(colored);
}
