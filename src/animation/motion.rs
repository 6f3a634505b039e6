//! Straight-line stepping from one coordinate to another
//!
//! The path is a linear interpolation in degrees, not a great circle: each
//! tick adds a fixed latitude and longitude delta until the marker is within
//! one step of the destination on both axes, then it lands exactly on it.

use crate::core::{
    config::{PacingMode, RouteConfig},
    geo::{initial_bearing, LatLng},
};
use std::time::Duration;

/// Everything derived once from the route before the first tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlan {
    pub start: LatLng,
    pub end: LatLng,
    /// Route length in meters
    pub distance_m: f64,
    /// Travel time at the configured speed, in seconds
    pub total_time_s: f64,
    /// Delay between ticks
    pub step_interval: Duration,
    pub lat_step: f64,
    pub lng_step: f64,
    /// Initial heading in degrees, clockwise from north
    pub bearing: f64,
}

impl MotionPlan {
    /// Builds a plan from a route length already measured by the map
    pub fn new(
        start: LatLng,
        end: LatLng,
        distance_m: f64,
        speed_kmh: u32,
        refresh_rate: u32,
        pacing: PacingMode,
    ) -> Self {
        let total_time_s = distance_m / (speed_kmh as f64 * 1000.0) * 3600.0;
        let step_interval = Duration::from_secs_f64(1.0 / refresh_rate.max(1) as f64);
        let ticks = pacing.tick_count(total_time_s, refresh_rate);

        Self {
            start,
            end,
            distance_m,
            total_time_s,
            step_interval,
            lat_step: axis_step(end.lat - start.lat, ticks),
            lng_step: axis_step(end.lng - start.lng, ticks),
            bearing: initial_bearing(start, end),
        }
    }

    pub fn from_config(config: &RouteConfig, distance_m: f64) -> Self {
        Self::new(
            config.start,
            config.end,
            distance_m,
            config.speed_kmh,
            config.refresh_rate,
            config.pacing,
        )
    }
}

/// Zero or non-finite tick counts (coincident endpoints, unusable speeds)
/// produce a zero step instead of NaN or infinity.
fn axis_step(delta: f64, ticks: f64) -> f64 {
    if ticks > 0.0 && ticks.is_finite() {
        let step = delta / ticks;
        if step.is_finite() {
            return step;
        }
    }
    0.0
}

/// Within one step of the target on this axis. A zero step cannot make
/// progress, so it counts as already there.
fn close_enough(current: f64, target: f64, step: f64) -> bool {
    step == 0.0 || (current - target).abs() < step.abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Running,
    Arrived,
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Advanced by one step; another evaluation is due
    Moved(LatLng),
    /// Snapped onto the destination; no further evaluations
    Arrived(LatLng),
}

/// Position state of a marker travelling along a [`MotionPlan`]
#[derive(Debug, Clone)]
pub struct LinearMotion {
    plan: MotionPlan,
    current: LatLng,
    state: MotionState,
    steps_taken: u64,
}

impl LinearMotion {
    pub fn new(plan: MotionPlan) -> Self {
        Self {
            current: plan.start,
            plan,
            state: MotionState::Running,
            steps_taken: 0,
        }
    }

    /// Runs one evaluation: arrive if close enough on both axes, otherwise
    /// advance. Once arrived, every call keeps returning the destination.
    pub fn advance(&mut self) -> Step {
        if self.state == MotionState::Arrived {
            return Step::Arrived(self.plan.end);
        }

        let plan = &self.plan;
        if close_enough(self.current.lat, plan.end.lat, plan.lat_step)
            && close_enough(self.current.lng, plan.end.lng, plan.lng_step)
        {
            self.current = plan.end;
            self.state = MotionState::Arrived;
            return Step::Arrived(self.current);
        }

        self.current.lat += plan.lat_step;
        self.current.lng += plan.lng_step;
        self.steps_taken += 1;
        Step::Moved(self.current)
    }

    pub fn position(&self) -> LatLng {
        self.current
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn plan(&self) -> &MotionPlan {
        &self.plan
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_plan(pacing: PacingMode) -> MotionPlan {
        let config = RouteConfig {
            pacing,
            ..Default::default()
        };
        MotionPlan::from_config(&config, config.start.distance_to(&config.end))
    }

    fn run_to_end(motion: &mut LinearMotion, limit: usize) -> Vec<LatLng> {
        let mut moves = Vec::new();
        for _ in 0..limit {
            match motion.advance() {
                Step::Moved(p) => moves.push(p),
                Step::Arrived(_) => return moves,
            }
        }
        panic!("no arrival within {limit} evaluations");
    }

    #[test]
    fn test_plan_derivation() {
        let plan = demo_plan(PacingMode::Literal);
        let expected_time = plan.distance_m / 20_000.0 * 3600.0;
        let ticks = expected_time * 2.0 / 1000.0;

        assert_eq!(plan.total_time_s, expected_time);
        assert_eq!(plan.step_interval, Duration::from_millis(500));
        assert_eq!(plan.lat_step, (22.2637 - 22.1696) / ticks);
        assert_eq!(plan.lng_step, (91.7159 - 91.4996) / ticks);
        assert!(plan.bearing > 60.0 && plan.bearing < 70.0);
    }

    #[test]
    fn test_arrives_exactly_on_destination() {
        let plan = demo_plan(PacingMode::Literal);
        let mut motion = LinearMotion::new(plan);
        let moves = run_to_end(&mut motion, 100);

        // ~8.86 ticks worth of distance: eight full steps, then the snap
        assert_eq!(moves.len(), 8);
        assert_eq!(motion.state(), MotionState::Arrived);
        assert_eq!(motion.position().lat.to_bits(), plan.end.lat.to_bits());
        assert_eq!(motion.position().lng.to_bits(), plan.end.lng.to_bits());
        assert_eq!(motion.advance(), Step::Arrived(plan.end));
        assert_eq!(motion.steps_taken(), 8);
    }

    #[test]
    fn test_monotonic_approach() {
        let plan = demo_plan(PacingMode::Literal);
        let mut motion = LinearMotion::new(plan);
        let moves = run_to_end(&mut motion, 100);

        let mut prev = plan.start;
        for p in moves {
            assert!((p.lat - plan.end.lat).abs() < (prev.lat - plan.end.lat).abs());
            assert!((p.lng - plan.end.lng).abs() < (prev.lng - plan.end.lng).abs());
            // never past the destination before the snap
            assert!(p.lat < plan.end.lat && p.lng < plan.end.lng);
            prev = p;
        }
    }

    #[test]
    fn test_physical_pacing_takes_1000x_more_ticks() {
        let plan = demo_plan(PacingMode::Physical);
        let mut motion = LinearMotion::new(plan);
        let moves = run_to_end(&mut motion, 20_000);

        let expected = (plan.total_time_s * 2.0).floor() as usize;
        assert!(moves.len().abs_diff(expected) <= 1, "{} vs {expected}", moves.len());
        assert_eq!(motion.position(), plan.end);
    }

    #[test]
    fn test_zero_distance_arrives_immediately() {
        let p = LatLng::new(22.1696, 91.4996);
        let plan = MotionPlan::new(p, p, 0.0, 20, 2, PacingMode::Literal);

        assert_eq!(plan.lat_step, 0.0);
        assert_eq!(plan.lng_step, 0.0);
        assert_eq!(plan.bearing, 0.0);

        let mut motion = LinearMotion::new(plan);
        assert_eq!(motion.advance(), Step::Arrived(p));
        assert_eq!(motion.steps_taken(), 0);
    }

    #[test]
    fn test_due_east_route_ignores_flat_axis() {
        let start = LatLng::new(10.0, 20.0);
        let end = LatLng::new(10.0, 20.5);
        let plan = MotionPlan::new(start, end, start.distance_to(&end), 20, 2, PacingMode::Literal);
        assert_eq!(plan.lat_step, 0.0);

        let mut motion = LinearMotion::new(plan);
        let moves = run_to_end(&mut motion, 100);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|p| p.lat == 10.0));
        assert_eq!(motion.position(), end);
    }

    #[test]
    fn test_southwest_route() {
        let start = LatLng::new(22.2637, 91.7159);
        let end = LatLng::new(22.1696, 91.4996);
        let plan = MotionPlan::new(start, end, start.distance_to(&end), 20, 2, PacingMode::Literal);
        assert!(plan.lat_step < 0.0 && plan.lng_step < 0.0);
        assert!(plan.bearing > 240.0 && plan.bearing < 250.0);

        let mut motion = LinearMotion::new(plan);
        run_to_end(&mut motion, 100);
        assert_eq!(motion.position(), end);
    }
}
