use crate::{
    animation::{
        motion::{LinearMotion, MotionPlan, MotionState, Step},
        ticker::TickSource,
    },
    core::{config::IconSet, constants::ROCKET_ICON_CLASS, map::Map},
    layers::marker::{Icon, Marker},
    Result,
};

/// Drives the rotated rocket marker along its [`MotionPlan`].
///
/// `Running` re-arms the tick source after every move; `Arrived` is
/// terminal. [`RocketController::stop`] disarms the source and forgets the
/// motion, so a tick delivered afterwards does nothing.
pub struct RocketController<T: TickSource> {
    marker_id: String,
    motion: Option<LinearMotion>,
    ticks: T,
}

impl<T: TickSource> RocketController<T> {
    pub fn new(marker_id: impl Into<String>, ticks: T) -> Self {
        Self {
            marker_id: marker_id.into(),
            motion: None,
            ticks,
        }
    }

    /// Places the rocket at the plan's start, rotated to its bearing, and
    /// runs the first evaluation right away.
    pub fn start(&mut self, map: &mut Map, plan: MotionPlan, icons: &IconSet) -> Result<()> {
        self.stop();

        let icon = Icon::rotated(icons.rocket.as_str(), icons.rocket_size, plan.bearing)
            .with_class(ROCKET_ICON_CLASS);
        map.add_layer(Box::new(
            Marker::new(self.marker_id.clone(), plan.start)
                .with_icon(icon)
                .with_name("Rocket"),
        ))?;

        log::debug!(
            "rocket launched: heading {:.2}deg, step ({:.6}, {:.6}) every {:?}",
            plan.bearing,
            plan.lat_step,
            plan.lng_step,
            plan.step_interval
        );
        self.motion = Some(LinearMotion::new(plan));
        self.evaluate(map)
    }

    /// Consumes a due tick, if any, and evaluates. Returns whether a tick ran.
    pub fn poll(&mut self, map: &mut Map) -> Result<bool> {
        if !self.ticks.take_due() {
            return Ok(false);
        }
        self.on_tick(map)?;
        Ok(true)
    }

    /// One tick's worth of work. No-op unless running.
    pub fn on_tick(&mut self, map: &mut Map) -> Result<()> {
        if self.state() != Some(MotionState::Running) {
            log::debug!("ignoring tick for idle rocket '{}'", self.marker_id);
            return Ok(());
        }
        self.evaluate(map)
    }

    /// Cancels any pending tick and drops the motion state
    pub fn stop(&mut self) {
        self.ticks.cancel();
        if self.motion.take().is_some() {
            log::debug!("rocket '{}' stopped", self.marker_id);
        }
    }

    pub fn state(&self) -> Option<MotionState> {
        self.motion.as_ref().map(LinearMotion::state)
    }

    pub fn position(&self) -> Option<crate::core::geo::LatLng> {
        self.motion.as_ref().map(LinearMotion::position)
    }

    pub fn plan(&self) -> Option<&MotionPlan> {
        self.motion.as_ref().map(LinearMotion::plan)
    }

    pub fn marker_id(&self) -> &str {
        &self.marker_id
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    fn evaluate(&mut self, map: &mut Map) -> Result<()> {
        let Some(motion) = self.motion.as_mut() else {
            return Ok(());
        };

        match motion.advance() {
            Step::Moved(position) => {
                map.set_marker_position(&self.marker_id, position)?;
                log::trace!("rocket at ({:.6}, {:.6})", position.lat, position.lng);
                self.ticks.schedule(motion.plan().step_interval);
            }
            Step::Arrived(position) => {
                map.set_marker_position(&self.marker_id, position)?;
                log::info!(
                    "rocket arrived at ({:.4}, {:.4}) after {} steps",
                    position.lat,
                    position.lng,
                    motion.steps_taken()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ticker::ManualTicks;
    use crate::core::{
        config::{PacingMode, RouteConfig},
        events::MapEvent,
        geo::{LatLng, Point},
    };
    use crate::MapError;

    fn setup(config: &RouteConfig) -> (Map, MotionPlan) {
        let map = Map::new("map", config.start, 11.0, Point::new(800.0, 600.0));
        let plan = MotionPlan::from_config(config, map.distance(config.start, config.end));
        (map, plan)
    }

    #[test]
    fn test_start_places_rotated_marker_and_takes_first_step() {
        let config = RouteConfig::default();
        let (mut map, plan) = setup(&config);
        let mut controller = RocketController::new("rocket", ManualTicks::new());

        controller.start(&mut map, plan, &config.icons).unwrap();

        let marker = map.marker("rocket").unwrap();
        assert_eq!(marker.icon().size(), (50, 50));
        assert_eq!(marker.icon().rotation_deg(), plan.bearing);
        assert_eq!(marker.icon().url(), "assets/rocket.png");
        assert_eq!(
            marker.position(),
            LatLng::new(
                plan.start.lat + plan.lat_step,
                plan.start.lng + plan.lng_step
            )
        );
        assert_eq!(controller.state(), Some(MotionState::Running));
        assert_eq!(controller.ticks().scheduled(), 1);
        assert_eq!(
            controller.ticks().pending_delay(),
            Some(std::time::Duration::from_millis(500))
        );
    }

    #[test]
    fn test_runs_to_arrival() {
        let config = RouteConfig::default();
        let (mut map, plan) = setup(&config);
        let mut controller = RocketController::new("rocket", ManualTicks::new());
        controller.start(&mut map, plan, &config.icons).unwrap();

        while controller.poll(&mut map).unwrap() {}

        assert_eq!(controller.state(), Some(MotionState::Arrived));
        assert_eq!(map.marker_position("rocket"), Some(config.end));
        assert!(!controller.ticks().is_armed());
        // the arrival tick schedules nothing
        assert_eq!(controller.ticks().scheduled(), controller.ticks().fired());

        let moves: Vec<LatLng> = map
            .process_events()
            .into_iter()
            .filter_map(|event| match event {
                MapEvent::MarkerMoved { position, .. } => Some(position),
                _ => None,
            })
            .collect();
        assert_eq!(moves.last(), Some(&config.end));
        assert_eq!(moves.len(), 9);
    }

    #[test]
    fn test_zero_distance_never_schedules() {
        let config = RouteConfig {
            end: RouteConfig::default().start,
            ..Default::default()
        };
        let (mut map, plan) = setup(&config);
        let mut controller = RocketController::new("rocket", ManualTicks::new());
        controller.start(&mut map, plan, &config.icons).unwrap();

        assert_eq!(controller.state(), Some(MotionState::Arrived));
        assert_eq!(controller.ticks().scheduled(), 0);
        assert_eq!(map.marker_position("rocket"), Some(config.start));
    }

    #[test]
    fn test_tick_after_stop_is_noop() {
        let config = RouteConfig::default();
        let (mut map, plan) = setup(&config);
        let mut controller = RocketController::new("rocket", ManualTicks::new());
        controller.start(&mut map, plan, &config.icons).unwrap();
        let parked = map.marker_position("rocket");

        controller.stop();
        assert!(!controller.ticks().is_armed());
        assert!(!controller.poll(&mut map).unwrap());
        controller.on_tick(&mut map).unwrap();

        assert_eq!(controller.state(), None);
        assert_eq!(map.marker_position("rocket"), parked);
    }

    #[test]
    fn test_removed_map_surfaces_error() {
        let config = RouteConfig {
            pacing: PacingMode::Literal,
            ..Default::default()
        };
        let (mut map, plan) = setup(&config);
        let mut controller = RocketController::new("rocket", ManualTicks::new());
        controller.start(&mut map, plan, &config.icons).unwrap();

        map.remove();
        assert!(matches!(
            controller.poll(&mut map),
            Err(MapError::MapRemoved(_))
        ));
    }
}
