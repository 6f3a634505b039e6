use crate::{
    core::{
        events::{EventManager, MapEvent},
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::{
        base::{LayerTrait, LayerType},
        manager::LayerManager,
        marker::Marker,
        tile::TileLayer,
    },
    MapError, Result,
};

/// A map instance bound to one host container.
///
/// Owns the view and every layer placed on it. Once [`Map::remove`] has
/// run the instance is inert: layers are gone and mutations fail with
/// [`MapError::MapRemoved`].
pub struct Map {
    container_id: String,
    viewport: Viewport,
    layer_manager: LayerManager,
    event_manager: EventManager,
    removed: bool,
}

impl Map {
    pub fn new(container_id: impl Into<String>, center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            container_id: container_id.into(),
            viewport: Viewport::new(center, zoom, size),
            layer_manager: LayerManager::new(),
            event_manager: EventManager::new(),
            removed: false,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        self.ensure_live()?;
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "cannot center on ({}, {})",
                center.lat, center.lng
            )));
        }

        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;
        self.viewport.set_view(center, zoom);

        if self.viewport.center != old_center || self.viewport.zoom != old_zoom {
            self.event_manager.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
        Ok(())
    }

    /// Adds a layer. Tile layers also cap the view's zoom at their `max_zoom`.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.ensure_live()?;
        let layer_id = layer.id().to_string();

        if let Some(tiles) = layer.as_any().downcast_ref::<TileLayer>() {
            let min_zoom = self.viewport.min_zoom;
            self.viewport
                .set_zoom_limits(min_zoom, tiles.max_zoom() as f64);
        }

        self.layer_manager.add_layer(layer)?;
        log::debug!("map '{}': added layer '{}'", self.container_id, layer_id);
        self.event_manager.emit(MapEvent::LayerAdd { layer_id });
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        self.ensure_live()?;
        if self.layer_manager.remove_layer(layer_id).is_some() {
            self.event_manager.emit(MapEvent::LayerRemove {
                layer_id: layer_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layer_manager.list_layers()
    }

    /// Layers in render order (background first)
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.layer_manager.layers()
    }

    pub fn marker(&self, layer_id: &str) -> Option<&Marker> {
        self.get_layer(layer_id)
            .and_then(|layer| layer.as_any().downcast_ref::<Marker>())
    }

    pub fn marker_position(&self, layer_id: &str) -> Option<LatLng> {
        self.marker(layer_id).map(Marker::position)
    }

    /// Moves a marker layer to `position`
    pub fn set_marker_position(&mut self, layer_id: &str, position: LatLng) -> Result<()> {
        self.ensure_live()?;
        let moved = self.layer_manager.with_layer_mut(layer_id, |layer| {
            layer
                .as_any_mut()
                .downcast_mut::<Marker>()
                .map(|marker| marker.set_position(position))
                .is_some()
        });

        match moved {
            Some(true) => {
                self.event_manager.emit(MapEvent::MarkerMoved {
                    layer_id: layer_id.to_string(),
                    position,
                });
                Ok(())
            }
            Some(false) => Err(MapError::Layer(format!("layer '{layer_id}' is not a marker"))),
            None => Err(MapError::Layer(format!("no layer '{layer_id}'"))),
        }
    }

    /// Distance in meters between two points (haversine)
    pub fn distance(&self, a: LatLng, b: LatLng) -> f64 {
        a.distance_to(&b)
    }

    /// Attribution of every visible tile layer, joined for display
    pub fn attribution(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .layer_manager
            .layers()
            .into_iter()
            .filter(|layer| layer.layer_type() == LayerType::Tile && layer.is_visible())
            .filter_map(|layer| layer.as_any().downcast_ref::<TileLayer>())
            .map(TileLayer::attribution)
            .filter(|text| !text.is_empty())
            .collect();

        (!parts.is_empty()).then(|| parts.join(" | "))
    }

    /// Tears the map down, dropping every layer. Repeated calls are no-ops.
    pub fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.layer_manager.clear();
        self.removed = true;
        log::debug!("map '{}' removed", self.container_id);
        self.event_manager.emit(MapEvent::Removed);
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    pub fn queued_events(&self) -> usize {
        self.event_manager.queued()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn ensure_live(&self) -> Result<()> {
        if self.removed {
            Err(MapError::MapRemoved(self.container_id.clone()))
        } else {
            Ok(())
        }
    }
}
