use crate::core::geo::LatLng;
use crate::prelude::HashMap;
use std::collections::VecDeque;

/// Changes a map reports to its front end
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map view has changed (center or zoom)
    ViewChanged { center: LatLng, zoom: f64 },
    /// Layer was added to the map
    LayerAdd { layer_id: String },
    /// Layer was removed from the map
    LayerRemove { layer_id: String },
    /// A marker was repositioned
    MarkerMoved { layer_id: String, position: LatLng },
    /// The map was torn down
    Removed,
}

impl MapEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::LayerAdd { .. } => "layeradd",
            MapEvent::LayerRemove { .. } => "layerremove",
            MapEvent::MarkerMoved { .. } => "move",
            MapEvent::Removed => "unload",
        }
    }
}

type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Undrained events kept per map; older ones are dropped first
pub const MAX_QUEUED_EVENTS: usize = 1024;

/// Queues map events and dispatches them to listeners on demand
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        if self.event_queue.len() == MAX_QUEUED_EVENTS {
            if let Some(dropped) = self.event_queue.pop_front() {
                log::trace!("event queue full, dropping '{}'", dropped.event_type());
            }
        }
        self.event_queue.push_back(event);
    }

    /// Events waiting for `process_events`
    pub fn queued(&self) -> usize {
        self.event_queue.len()
    }

    /// Drains the queue, notifying listeners in emission order
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }
}
