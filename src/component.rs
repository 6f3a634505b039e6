//! The route map: a map with start/end pins, a travelling rocket, and the
//! info panel that goes beside it.

use crate::{
    animation::{MotionPlan, MotionState, RocketController, TickSource},
    core::{
        config::RouteConfig,
        constants::{END_MARKER_ID, ROCKET_MARKER_ID, START_MARKER_ID, TILE_LAYER_ID},
        events::MapEvent,
        geo::Point,
        map::Map,
    },
    layers::{
        marker::{Icon, Marker},
        tile::TileLayer,
    },
    ui::{document::Document, info_panel::InfoPanel},
    Result,
};

/// Owns the map handle and the rocket controller for one mounted instance.
///
/// `mount` binds a map exactly once; calling it again while mounted does
/// nothing. Failures while mounting are logged and leave the component
/// unmounted. `unmount` cancels the pending tick and releases the map.
pub struct RouteMapComponent<T: TickSource> {
    config: RouteConfig,
    panel: InfoPanel,
    map: Option<Map>,
    rocket: RocketController<T>,
}

impl<T: TickSource> RouteMapComponent<T> {
    pub fn new(config: RouteConfig, ticks: T) -> Self {
        Self {
            panel: InfoPanel::from_config(&config),
            config,
            map: None,
            rocket: RocketController::new(ROCKET_MARKER_ID, ticks),
        }
    }

    pub fn mount(&mut self, document: &mut Document) {
        if self.map.is_some() {
            log::debug!("route map already mounted, skipping bootstrap");
            return;
        }
        if let Err(e) = self.try_mount(document) {
            log::warn!("route map not mounted: {e}");
        }
    }

    fn try_mount(&mut self, document: &mut Document) -> Result<()> {
        self.config.validate()?;
        let mut map = document.bind_map(
            &self.config.map.container,
            self.config.start,
            self.config.map.zoom,
        )?;

        if let Err(e) = self.populate(&mut map) {
            self.rocket.stop();
            document.release_map(&mut map);
            return Err(e);
        }
        self.map = Some(map);
        Ok(())
    }

    fn populate(&mut self, map: &mut Map) -> Result<()> {
        let config = &self.config;
        let icons = &config.icons;

        map.add_layer(Box::new(TileLayer::with_options(
            TILE_LAYER_ID.to_string(),
            "Background".to_string(),
            config.map.tile.clone(),
        )))?;
        map.add_layer(Box::new(
            Marker::new(START_MARKER_ID.to_string(), config.start)
                .with_icon(Icon::image(icons.start.as_str(), icons.endpoint_size))
                .with_name("Start"),
        ))?;
        map.add_layer(Box::new(
            Marker::new(END_MARKER_ID.to_string(), config.end)
                .with_icon(Icon::image(icons.end.as_str(), icons.endpoint_size))
                .with_name("End"),
        ))?;

        let plan = MotionPlan::from_config(config, map.distance(config.start, config.end));
        log::debug!(
            "route {:.0} m, {:.1} s at {} km/h",
            plan.distance_m,
            plan.total_time_s,
            config.speed_kmh
        );
        self.rocket.start(map, plan, icons)
    }

    /// Runs the rocket's tick if one is due. Returns whether it moved.
    pub fn update(&mut self) -> bool {
        let Some(map) = self.map.as_mut() else {
            return false;
        };

        match self.rocket.poll(map) {
            Ok(ticked) => ticked,
            Err(e) => {
                log::warn!("rocket animation halted: {e}");
                self.rocket.stop();
                false
            }
        }
    }

    /// Drains the map's queued events, notifying its listeners. Front ends
    /// call this once per frame.
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.map
            .as_mut()
            .map(Map::process_events)
            .unwrap_or_default()
    }

    /// Resizes the host container and the mounted map's view with it
    pub fn resize(&mut self, document: &mut Document, size: Point) {
        document.resize_element(&self.config.map.container, size);
        if let Some(map) = self.map.as_mut() {
            map.viewport_mut().set_size(size);
        }
    }

    pub fn unmount(&mut self, document: &mut Document) {
        self.rocket.stop();
        if let Some(mut map) = self.map.take() {
            document.release_map(&mut map);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut Map> {
        self.map.as_mut()
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    pub fn rocket(&self) -> &RocketController<T> {
        &self.rocket
    }

    pub fn motion_state(&self) -> Option<MotionState> {
        self.rocket.state()
    }

    pub fn ticks(&self) -> &T {
        self.rocket.ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualTicks;

    fn document() -> Document {
        Document::new().with_element("map", Point::new(800.0, 600.0))
    }

    #[test]
    fn test_mount_builds_layers() {
        let mut doc = document();
        let mut component = RouteMapComponent::new(RouteConfig::default(), ManualTicks::new());
        component.mount(&mut doc);

        let map = component.map().unwrap();
        assert_eq!(map.list_layers(), vec!["tiles", "start", "end", "rocket"]);
        assert_eq!(map.viewport().zoom, 11.0);
        assert_eq!(map.viewport().center, component.config().start);

        let start = map.marker("start").unwrap();
        assert_eq!(start.icon(), &Icon::image("assets/point2.png", (40, 40)));
        let end = map.marker("end").unwrap();
        assert_eq!(end.icon(), &Icon::image("assets/point.png", (40, 40)));
        assert_eq!(end.position(), component.config().end);
    }

    #[test]
    fn test_invalid_config_stays_unmounted() {
        let mut doc = document();
        let config = RouteConfig {
            speed_kmh: 0,
            ..Default::default()
        };
        let mut component = RouteMapComponent::new(config, ManualTicks::new());
        component.mount(&mut doc);

        assert!(!component.is_mounted());
        assert_eq!(doc.acquisitions(), 0);
        assert!(!component.update());
    }

    #[test]
    fn test_update_without_mount() {
        let mut component = RouteMapComponent::new(RouteConfig::default(), ManualTicks::new());
        assert!(!component.update());
        assert_eq!(component.motion_state(), None);
    }

    #[test]
    fn test_resize_reaches_map_view() {
        let mut doc = document();
        let mut component = RouteMapComponent::new(RouteConfig::default(), ManualTicks::new());
        component.mount(&mut doc);

        component.resize(&mut doc, Point::new(1024.0, 700.0));

        assert_eq!(doc.element_size("map"), Some(Point::new(1024.0, 700.0)));
        assert_eq!(
            component.map().unwrap().viewport().size,
            Point::new(1024.0, 700.0)
        );
    }

    #[test]
    fn test_resize_while_unmounted_only_touches_document() {
        let mut doc = document();
        let mut component = RouteMapComponent::new(RouteConfig::default(), ManualTicks::new());
        component.resize(&mut doc, Point::new(320.0, 240.0));
        assert_eq!(doc.element_size("map"), Some(Point::new(320.0, 240.0)));

        component.mount(&mut doc);
        assert_eq!(
            component.map().unwrap().viewport().size,
            Point::new(320.0, 240.0)
        );
    }
}
