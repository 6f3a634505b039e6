//! Host surface that maps are bound to
//!
//! A [`Document`] stands in for the page a map lives on: it owns named
//! container elements, hands out at most one [`Map`] per container and keeps
//! count of how many maps were acquired and released.

use crate::{
    core::{
        geo::{LatLng, Point},
        map::Map,
    },
    prelude::HashMap,
    MapError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Element {
    size: Point,
    bound: bool,
}

#[derive(Debug, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
    acquired: usize,
    released: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: impl Into<String>, size: Point) -> Self {
        self.add_element(id, size);
        self
    }

    pub fn add_element(&mut self, id: impl Into<String>, size: Point) {
        self.elements.insert(id.into(), Element { size, bound: false });
    }

    /// Updates a container's size; returns false for unknown ids
    pub fn resize_element(&mut self, id: &str, size: Point) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.size = size;
                true
            }
            None => false,
        }
    }

    pub fn element_size(&self, id: &str) -> Option<Point> {
        self.elements.get(id).map(|element| element.size)
    }

    /// Creates a map bound to container `id`
    pub fn bind_map(&mut self, id: &str, center: LatLng, zoom: f64) -> Result<Map> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| MapError::ContainerNotFound(id.to_string()))?;
        if element.bound {
            return Err(MapError::ContainerInUse(id.to_string()));
        }

        element.bound = true;
        self.acquired += 1;
        log::debug!("bound map to container '{id}'");
        Ok(Map::new(id, center, zoom, element.size))
    }

    /// Tears `map` down and frees its container
    pub fn release_map(&mut self, map: &mut Map) {
        if map.is_removed() {
            return;
        }
        map.remove();
        if let Some(element) = self.elements.get_mut(map.container_id()) {
            element.bound = false;
        }
        self.released += 1;
        log::debug!("released container '{}'", map.container_id());
    }

    /// Maps acquired and not yet released
    pub fn live_maps(&self) -> usize {
        self.acquired - self.released
    }

    pub fn acquisitions(&self) -> usize {
        self.acquired
    }

    pub fn releases(&self) -> usize {
        self.released
    }
}
