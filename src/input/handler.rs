use crate::input::events::{MapEvent, MapEventKind};
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Queues map notifications and dispatches them to listeners.
///
/// The map view emits while it mutates state and processes the queue once
/// the mutation is committed, so listeners never observe a half-applied
/// change.
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: FxHashMap<MapEventKind, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(callback));
    }

    /// Removes every listener registered for `kind`
    pub fn off(&mut self, kind: MapEventKind) {
        self.listeners.remove(&kind);
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Dispatches all queued events in order and returns them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(&event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    pub fn listener_count(&self, kind: MapEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.event_queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_events_dispatch_by_kind_in_order() {
        let mut manager = EventManager::new();
        let zooms = Arc::new(Mutex::new(Vec::new()));
        let sink = zooms.clone();
        manager.on(MapEventKind::Zoom, move |event| {
            if let MapEvent::Zoom { zoom } = event {
                sink.lock().unwrap().push(*zoom);
            }
        });

        manager.emit(MapEvent::Zoom { zoom: 4.0 });
        manager.emit(MapEvent::Scroll {
            x: 0.0,
            y: 0.0,
            dx: 1.0,
            dy: 1.0,
        });
        manager.emit(MapEvent::Zoom { zoom: 5.0 });
        assert_eq!(manager.pending_events(), 3);
        assert!(zooms.lock().unwrap().is_empty());

        let processed = manager.process_events();
        assert_eq!(processed.len(), 3);
        assert_eq!(*zooms.lock().unwrap(), vec![4.0, 5.0]);
        assert_eq!(manager.pending_events(), 0);
    }

    #[test]
    fn test_off_removes_listeners() {
        let mut manager = EventManager::new();
        manager.on(MapEventKind::Scroll, |_| {});
        manager.on(MapEventKind::Scroll, |_| {});
        assert_eq!(manager.listener_count(MapEventKind::Scroll), 2);
        manager.off(MapEventKind::Scroll);
        assert_eq!(manager.listener_count(MapEventKind::Scroll), 0);
    }
}
