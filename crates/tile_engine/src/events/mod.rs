//! Gameplay events for the audio collaborator
//!
//! The simulation's only side channel. Gameplay code queues discrete cues
//! during fixed steps; the host dispatches them once per rendered frame.
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)

use std::collections::HashMap;

/// Discrete cues raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// The player left the ground
    Jump,
    /// An item was collected
    Pickup,
    /// Flavor text appeared (plays once per contact)
    AmbientCue,
    /// A level finished loading
    LevelStarted {
        /// Index of the stage that started
        stage: usize,
    },
    /// All levels were torn down (victory or game over)
    LevelEnded,
}

/// Event type identification, used for handler registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// [`GameEvent::Jump`]
    Jump,
    /// [`GameEvent::Pickup`]
    Pickup,
    /// [`GameEvent::AmbientCue`]
    AmbientCue,
    /// [`GameEvent::LevelStarted`]
    LevelStarted,
    /// [`GameEvent::LevelEnded`]
    LevelEnded,
}

impl GameEvent {
    /// The registration key of this event
    pub fn event_type(&self) -> EventType {
        match self {
            GameEvent::Jump => EventType::Jump,
            GameEvent::Pickup => EventType::Pickup,
            GameEvent::AmbientCue => EventType::AmbientCue,
            GameEvent::LevelStarted { .. } => EventType::LevelStarted,
            GameEvent::LevelEnded => EventType::LevelEnded,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &GameEvent) -> bool;
}

/// Queue of pending events plus registered handlers
#[derive(Default)]
pub struct EventQueue {
    queue: Vec<GameEvent>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
}

impl EventQueue {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event type
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, event: GameEvent) {
        log::debug!("Event queued: {:?}", event);
        self.queue.push(event);
    }

    /// Events waiting for dispatch
    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }

    /// Take every pending event without notifying handlers
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Deliver all pending events to registered handlers
    ///
    /// Returns the delivered events in the order they were sent.
    pub fn dispatch(&mut self) -> Vec<GameEvent> {
        let events = std::mem::take(&mut self.queue);
        for event in &events {
            if let Some(handlers) = self.handlers.get_mut(&event.event_type()) {
                for handler in handlers.iter_mut() {
                    if handler.on_event(event) {
                        break;
                    }
                }
            }
        }
        events
    }

    /// Clear all queued events (state transitions)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        seen: Rc<RefCell<Vec<GameEvent>>>,
        consume: bool,
    }

    impl EventHandler for Recorder {
        fn on_event(&mut self, event: &GameEvent) -> bool {
            self.seen.borrow_mut().push(*event);
            self.consume
        }
    }

    #[test]
    fn test_dispatch_reaches_registered_handler_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut system = EventQueue::new();
        system.register_handler(EventType::Jump, Box::new(Recorder { seen: seen.clone(), consume: false }));

        system.send(GameEvent::Jump);
        system.send(GameEvent::Pickup);
        let delivered = system.dispatch();

        assert_eq!(delivered, vec![GameEvent::Jump, GameEvent::Pickup]);
        assert_eq!(*seen.borrow(), vec![GameEvent::Jump]);
        assert!(system.pending().is_empty());
    }

    #[test]
    fn test_event_consumption() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let mut system = EventQueue::new();
        system.register_handler(EventType::Pickup, Box::new(Recorder { seen: first.clone(), consume: true }));
        system.register_handler(EventType::Pickup, Box::new(Recorder { seen: second.clone(), consume: false }));

        system.send(GameEvent::Pickup);
        system.dispatch();

        assert_eq!(first.borrow().len(), 1);
        assert!(second.borrow().is_empty());
    }

    #[test]
    fn test_drain_skips_handlers() {
        let mut system = EventQueue::new();
        system.send(GameEvent::LevelStarted { stage: 2 });
        assert_eq!(system.drain(), vec![GameEvent::LevelStarted { stage: 2 }]);
        assert!(system.drain().is_empty());
    }
}
