use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::movement::Direction;
use crate::tick::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Up,
    Down,
    Left,
    Right,
    Quit,
    Other,
}

impl KeyEvent {
    fn command(self) -> Option<Command> {
        match self {
            KeyEvent::Up => Some(Command::Move(Direction::Up)),
            KeyEvent::Down => Some(Command::Move(Direction::Down)),
            KeyEvent::Left => Some(Command::Move(Direction::Left)),
            KeyEvent::Right => Some(Command::Move(Direction::Right)),
            KeyEvent::Quit => Some(Command::Quit),
            KeyEvent::Other => None,
        }
    }
}

/// Non-blocking key source. `Ok(None)` means nothing is buffered right now.
pub trait KeySource {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Empties `keys` and returns the last key that means something. Earlier
/// presses in the same tick are dropped on purpose.
pub fn drain_latest<K: KeySource + ?Sized>(keys: &mut K) -> io::Result<Option<Command>> {
    let mut latest = None;
    while let Some(key) = keys.poll_key()? {
        if let Some(command) = key.command() {
            latest = Some(command);
        }
    }
    Ok(latest)
}

/// Keyboard input from the crossterm event queue. Expects raw mode.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(None);
        }
        let key = match event::read()? {
            Event::Key(key) => match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => map_key(key.code, key.modifiers),
                _ => KeyEvent::Other,
            },
            _ => KeyEvent::Other,
        };
        Ok(Some(key))
    }
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    match code {
        KeyCode::Up | KeyCode::Char('k') => KeyEvent::Up,
        KeyCode::Down | KeyCode::Char('j') => KeyEvent::Down,
        KeyCode::Left | KeyCode::Char('h') => KeyEvent::Left,
        KeyCode::Right | KeyCode::Char('l') => KeyEvent::Right,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyEvent::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyEvent::Quit,
        _ => KeyEvent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Queue(VecDeque<KeyEvent>);

    impl KeySource for Queue {
        fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
            Ok(self.0.pop_front())
        }
    }

    fn queue(keys: &[KeyEvent]) -> Queue {
        Queue(keys.iter().copied().collect())
    }

    #[test]
    fn quit_wins_when_last() {
        let mut keys = queue(&[KeyEvent::Up, KeyEvent::Up, KeyEvent::Right, KeyEvent::Quit]);
        assert_eq!(drain_latest(&mut keys).unwrap(), Some(Command::Quit));
        assert!(keys.0.is_empty());
    }

    #[test]
    fn last_direction_wins() {
        let mut keys = queue(&[KeyEvent::Quit, KeyEvent::Left, KeyEvent::Down]);
        assert_eq!(
            drain_latest(&mut keys).unwrap(),
            Some(Command::Move(Direction::Down))
        );
    }

    #[test]
    fn other_keys_do_not_override() {
        let mut keys = queue(&[KeyEvent::Left, KeyEvent::Other, KeyEvent::Other]);
        assert_eq!(
            drain_latest(&mut keys).unwrap(),
            Some(Command::Move(Direction::Left))
        );
        let mut keys = queue(&[KeyEvent::Other]);
        assert_eq!(drain_latest(&mut keys).unwrap(), None);
    }

    #[test]
    fn empty_queue_is_no_command() {
        assert_eq!(drain_latest(&mut queue(&[])).unwrap(), None);
    }

    #[test]
    fn maps_arrows_vim_keys_and_quit() {
        let none = KeyModifiers::NONE;
        assert_eq!(map_key(KeyCode::Up, none), KeyEvent::Up);
        assert_eq!(map_key(KeyCode::Char('h'), none), KeyEvent::Left);
        assert_eq!(map_key(KeyCode::Char('l'), none), KeyEvent::Right);
        assert_eq!(map_key(KeyCode::Char('j'), none), KeyEvent::Down);
        assert_eq!(map_key(KeyCode::Char('q'), none), KeyEvent::Quit);
        assert_eq!(map_key(KeyCode::Esc, none), KeyEvent::Quit);
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyEvent::Quit
        );
        assert_eq!(map_key(KeyCode::Char('c'), none), KeyEvent::Other);
        assert_eq!(map_key(KeyCode::Enter, none), KeyEvent::Other);
    }
}
