//! Observer
//! Example: Drag and Drop UI
//!
//! A `MouseEventManager` fans each mouse event out to every subscribed
//! listener. Real mouse input is out of scope; events are fed in by hand.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Down,
    Up,
    Move,
}

pub trait MouseEventListener {
    /// `x` and `y` are the pointer position in pixels.
    fn notify(&mut self, event: MouseEvent, x: i32, y: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct MouseEventManager {
    listeners: Vec<(SubscriptionId, Rc<RefCell<dyn MouseEventListener>>)>,
    next_id: u64,
}

impl MouseEventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        listener: Rc<RefCell<dyn MouseEventListener>>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn notify(&self, event: MouseEvent, x: i32, y: i32) {
        debug!(?event, x, y, listeners = self.listeners.len(), "mouse event");
        for (_, listener) in &self.listeners {
            listener.borrow_mut().notify(event, x, y);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

// =============================================================================
// A concrete listener
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// A rectangle centred on `(x, y)` that follows the mouse while held.
#[derive(Debug, Clone, PartialEq)]
pub struct Draggable {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    state: DragState,
    history: Vec<String>,
}

impl Draggable {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Draggable {
            x,
            y,
            width,
            height,
            state: DragState::Idle,
            history: Vec::new(),
        }
    }

    pub fn shared(x: i32, y: i32, width: u32, height: u32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(x, y, width, height)))
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Human-readable log of what this draggable reacted to.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        // compare doubled distances to stay in integers
        let dx = (2 * (i64::from(x) - i64::from(self.x))).abs();
        let dy = (2 * (i64::from(y) - i64::from(self.y))).abs();
        dx <= i64::from(self.width) && dy <= i64::from(self.height)
    }
}

impl MouseEventListener for Draggable {
    fn notify(&mut self, event: MouseEvent, x: i32, y: i32) {
        match (event, self.state) {
            (MouseEvent::Move, DragState::Dragging) => {
                self.x = x;
                self.y = y;
                self.history.push(format!("Dragging to {x} {y}"));
            }
            (MouseEvent::Down, DragState::Idle) if self.contains(x, y) => {
                self.state = DragState::Dragging;
                self.history.push("Dragging started".to_string());
            }
            (MouseEvent::Up, DragState::Dragging) => {
                self.state = DragState::Idle;
                self.history.push("Dragging stopped".to_string());
            }
            _ => {}
        }
    }
}

impl fmt::Display for Draggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Draggable(x: {}, y: {}, width: {}, height: {})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_without_press_do_nothing() {
        let mut manager = MouseEventManager::new();
        let item = Draggable::shared(10, 10, 30, 30);
        manager.subscribe(item.clone());

        manager.notify(MouseEvent::Move, 10, 10);
        manager.notify(MouseEvent::Move, 120, 120);

        assert_eq!((item.borrow().x, item.borrow().y), (10, 10));
        assert!(item.borrow().history().is_empty());
    }

    #[test]
    fn test_drag_only_moves_the_grabbed_item() {
        let mut manager = MouseEventManager::new();
        let first = Draggable::shared(10, 10, 30, 30);
        let second = Draggable::shared(120, 120, 10, 10);
        manager.subscribe(first.clone());
        manager.subscribe(second.clone());

        manager.notify(MouseEvent::Down, 15, 5);
        manager.notify(MouseEvent::Move, 100, 100);
        manager.notify(MouseEvent::Up, 100, 100);

        assert_eq!(
            first.borrow().to_string(),
            "Draggable(x: 100, y: 100, width: 30, height: 30)"
        );
        assert_eq!(first.borrow().state(), DragState::Idle);
        assert_eq!(
            first.borrow().history(),
            ["Dragging started", "Dragging to 100 100", "Dragging stopped"]
        );
        assert_eq!((second.borrow().x, second.borrow().y), (120, 120));
    }

    #[test]
    fn test_hit_box_edges() {
        let item = Draggable::new(120, 120, 10, 10);
        assert!(item.contains(125, 115));
        assert!(!item.contains(126, 120));
    }

    #[test]
    fn test_unsubscribed_listener_is_not_notified() {
        let mut manager = MouseEventManager::new();
        let item = Draggable::shared(0, 0, 10, 10);
        let id = manager.subscribe(item.clone());

        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        assert!(manager.is_empty());

        manager.notify(MouseEvent::Down, 0, 0);
        assert_eq!(item.borrow().state(), DragState::Idle);
    }
}
