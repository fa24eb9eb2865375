//! Line-oriented input source.
//!
//! Without a touchscreen driver the panel reads events from a text stream,
//! one command per line:
//!
//! ```text
//! tap 280 20        # press and release at (280, 20)
//! down 100 120
//! move 102 121
//! up 102 121
//! key esc | enter | up | down | left | right | <char>
//! quit
//! ```
//!
//! Blank lines and `#` comments are ignored.

use super::handler::{InputEvent, Key};
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

fn parse_point<'a>(mut args: impl Iterator<Item = &'a str>) -> Option<(i32, i32)> {
    let x = args.next()?.parse().ok()?;
    let y = args.next()?.parse().ok()?;
    Some((x, y))
}

fn parse_key(name: &str) -> Option<Key> {
    Some(match name.to_ascii_lowercase().as_str() {
        "esc" | "escape" => Key::Escape,
        "enter" | "return" => Key::Enter,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Key::Char(c)
        }
    })
}

/// Parses one input line. Returns `None` for lines that are not commands.
///
/// # Example
///
/// ```
/// use octopanel::app::input::parse_line;
/// use octopanel::InputEvent;
///
/// let events = parse_line("tap 280 20").unwrap();
/// assert_eq!(events, vec![
///     InputEvent::PointerDown { x: 280, y: 20 },
///     InputEvent::PointerUp { x: 280, y: 20 },
/// ]);
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<Vec<InputEvent>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let command = words.next()?;

    let events = match command.to_ascii_lowercase().as_str() {
        "tap" | "click" => {
            let (x, y) = parse_point(words)?;
            vec![InputEvent::PointerDown { x, y }, InputEvent::PointerUp { x, y }]
        }
        "down" => {
            let (x, y) = parse_point(words)?;
            vec![InputEvent::PointerDown { x, y }]
        }
        "up" => {
            let (x, y) = parse_point(words)?;
            vec![InputEvent::PointerUp { x, y }]
        }
        "move" => {
            let (x, y) = parse_point(words)?;
            vec![InputEvent::PointerMove { x, y }]
        }
        "key" => vec![InputEvent::KeyDown(parse_key(words.next()?)?)],
        "quit" | "exit" => vec![InputEvent::Quit],
        _ => return None,
    };
    Some(events)
}

/// Forwards events parsed from `reader` to `events` on a background thread.
///
/// Sends [`InputEvent::Quit`] at end of input. The thread exits once the
/// receiver is gone.
///
/// # Errors
///
/// Returns an error if the OS refuses to spawn the thread.
pub fn spawn_reader<R>(reader: R, events: Sender<InputEvent>) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new().name("input-reader".to_string()).spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                }
            };
            let Some(parsed) = parse_line(&line) else {
                if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
                    tracing::debug!(line = %line, "ignoring unrecognised input");
                }
                continue;
            };
            for event in parsed {
                if events.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = events.send(InputEvent::Quit);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn parses_pointer_commands() {
        assert_eq!(parse_line("down 1 2"), Some(vec![InputEvent::PointerDown { x: 1, y: 2 }]));
        assert_eq!(parse_line("  MOVE 3 4 "), Some(vec![InputEvent::PointerMove { x: 3, y: 4 }]));
        assert_eq!(parse_line("up 5 6 # release"), Some(vec![InputEvent::PointerUp { x: 5, y: 6 }]));
        assert_eq!(parse_line("tap 5"), None);
        assert_eq!(parse_line("tap a b"), None);
    }

    #[test]
    fn parses_keys() {
        assert_eq!(parse_line("key esc"), Some(vec![InputEvent::KeyDown(Key::Escape)]));
        assert_eq!(parse_line("key Enter"), Some(vec![InputEvent::KeyDown(Key::Enter)]));
        assert_eq!(parse_line("key q"), Some(vec![InputEvent::KeyDown(Key::Char('q'))]));
        assert_eq!(parse_line("key qq"), None);
        assert_eq!(parse_line("key"), None);
    }

    #[test]
    fn ignores_blank_and_comment_lines() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   # nothing"), None);
        assert_eq!(parse_line("dance 1 2"), None);
    }

    #[test]
    fn reader_ends_with_quit() {
        let (tx, rx) = mpsc::channel();
        let input = Cursor::new("tap 10 10\nbogus\nkey down\n");
        spawn_reader(input, tx).unwrap().join().unwrap();

        let events: Vec<InputEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { x: 10, y: 10 },
                InputEvent::PointerUp { x: 10, y: 10 },
                InputEvent::KeyDown(Key::Down),
                InputEvent::Quit,
            ]
        );
    }
}
