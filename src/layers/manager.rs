use crate::{layers::base::LayerTrait, prelude::HashMap, MapError, Result};

/// Manages layers for the map, handling ordering and lookup
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for rendering (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer to the manager. Ids are unique per map.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("layer '{layer_id}' already exists")));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index; equal z keeps insertion order
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Lists all layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
        self.render_order.clear();
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::layers::{marker::Marker, tile::TileLayer};

    #[test]
    fn test_render_order_follows_z_index() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("start".to_string(), LatLng::new(1.0, 1.0))))
            .unwrap();
        manager
            .add_layer(Box::new(TileLayer::new("tiles".to_string(), "OSM".to_string())))
            .unwrap();
        manager
            .add_layer(Box::new(Marker::new("end".to_string(), LatLng::new(2.0, 2.0))))
            .unwrap();

        assert_eq!(manager.list_layers(), vec!["tiles", "start", "end"]);
        assert_eq!(manager.layers().len(), 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut manager = LayerManager::new();
        let marker = || Box::new(Marker::new("rocket".to_string(), LatLng::default()));
        manager.add_layer(marker()).unwrap();
        assert!(matches!(manager.add_layer(marker()), Err(MapError::Layer(_))));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("a".to_string(), LatLng::default())))
            .unwrap();
        manager
            .add_layer(Box::new(Marker::new("b".to_string(), LatLng::default())))
            .unwrap();

        assert!(manager.remove_layer("a").is_some());
        assert!(manager.remove_layer("a").is_none());
        assert_eq!(manager.list_layers(), vec!["b"]);

        manager.clear();
        assert!(manager.is_empty());
        assert!(manager.get_layer("b").is_none());
    }
}
