//! Input events and the per-tick queue

use std::collections::VecDeque;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Backspace,
    /// Restart after game over
    R,
    /// Switch player after game over
    T,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            " " => Key::Space,
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "r" | "R" => Key::R,
            "t" | "T" => Key::T,
            _ => Key::Other,
        }
    }
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window/page is going away
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Click position in logical screen pixels
    MouseDown { x: f32, y: f32 },
    /// Printable character typed
    Text(char),
}

impl InputEvent {
    /// Events produced by a DOM `keydown`: the key itself plus, for a single
    /// printable character, a `Text` event
    pub fn from_dom_keydown(key: &str) -> Vec<InputEvent> {
        let mut events = vec![InputEvent::KeyDown(Key::from_dom_key(key))];
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if !c.is_control() {
                events.push(InputEvent::Text(c));
            }
        }
        events
    }
}

/// FIFO of pending events, drained once per tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.events.extend(events);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key("Backspace"), Key::Backspace);
        assert_eq!(Key::from_dom_key("R"), Key::R);
        assert_eq!(Key::from_dom_key("t"), Key::T);
        assert_eq!(Key::from_dom_key("ArrowUp"), Key::Other);
    }

    #[test]
    fn test_keydown_emits_text_for_printables() {
        assert_eq!(
            InputEvent::from_dom_keydown("a"),
            vec![InputEvent::KeyDown(Key::Other), InputEvent::Text('a')]
        );
        assert_eq!(
            InputEvent::from_dom_keydown(" "),
            vec![InputEvent::KeyDown(Key::Space), InputEvent::Text(' ')]
        );
        assert_eq!(
            InputEvent::from_dom_keydown("Enter"),
            vec![InputEvent::KeyDown(Key::Enter)]
        );
        assert_eq!(
            InputEvent::from_dom_keydown("é"),
            vec![InputEvent::KeyDown(Key::Other), InputEvent::Text('é')]
        );
    }

    #[test]
    fn test_queue_drains_in_order_once() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown(Key::Space));
        queue.push(InputEvent::MouseDown { x: 1.0, y: 2.0 });
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                InputEvent::KeyDown(Key::Space),
                InputEvent::MouseDown { x: 1.0, y: 2.0 }
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
