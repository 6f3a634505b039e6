use geo::HaversineBearing;
use rocketmap::{
    animation::{LinearMotion, Step},
    initial_bearing, LatLng, MotionPlan, MotionState, PacingMode, RouteConfig,
};

fn demo_plan() -> MotionPlan {
    let config = RouteConfig::default();
    MotionPlan::from_config(&config, config.start.distance_to(&config.end))
}

fn run(plan: MotionPlan) -> Vec<Step> {
    let mut motion = LinearMotion::new(plan);
    let mut steps = Vec::new();
    loop {
        let step = motion.advance();
        steps.push(step);
        if let Step::Arrived(_) = step {
            return steps;
        }
        assert!(steps.len() < 1_000_000, "motion never arrived");
    }
}

#[test]
fn bearing_agrees_with_geo() {
    let routes = [
        ((22.1696, 91.4996), (22.2637, 91.7159)),
        ((51.5074, -0.1278), (40.7128, -74.0060)),
        ((-33.8688, 151.2093), (35.6762, 139.6503)),
        ((0.0, 0.0), (0.0, 10.0)),
        ((10.0, 10.0), (-10.0, 10.0)),
        ((0.0, 179.5), (0.0, -179.5)),
    ];

    for (a, b) in routes {
        let (start, end) = (LatLng::from(a), LatLng::from(b));
        let ours = initial_bearing(start, end);
        let reference = geo::Point::from(start).haversine_bearing(geo::Point::from(end));
        let reference = (reference + 360.0) % 360.0;

        assert!((0.0..360.0).contains(&ours), "{ours} out of range");
        assert!(
            (ours - reference).abs() < 1e-6,
            "{a:?} -> {b:?}: {ours} vs {reference}"
        );
    }
}

#[test]
fn demo_route_lands_exactly_on_destination() {
    let plan = demo_plan();
    let steps = run(plan);

    assert_eq!(steps.last(), Some(&Step::Arrived(plan.end)));
    let moves = steps.len() - 1;
    assert_eq!(moves, 8);
    assert!((plan.bearing - 64.9).abs() < 0.5);
}

#[test]
fn each_move_gets_closer() {
    let plan = demo_plan();
    let mut previous = plan.start.distance_to(&plan.end);

    for step in run(plan) {
        let position = match step {
            Step::Moved(p) | Step::Arrived(p) => p,
        };
        let remaining = position.distance_to(&plan.end);
        assert!(remaining < previous, "{remaining} >= {previous}");
        previous = remaining;
    }
    assert_eq!(previous, 0.0);
}

#[test]
fn coincident_endpoints_arrive_on_first_evaluation() {
    let here = LatLng::new(22.1696, 91.4996);
    let plan = MotionPlan::new(here, here, 0.0, 20, 2, PacingMode::Literal);

    assert_eq!(plan.lat_step, 0.0);
    assert_eq!(plan.lng_step, 0.0);
    assert_eq!(plan.bearing, 0.0);

    let mut motion = LinearMotion::new(plan);
    assert_eq!(motion.advance(), Step::Arrived(here));
    assert_eq!(motion.state(), MotionState::Arrived);
    assert_eq!(motion.steps_taken(), 0);
}

#[test]
fn physical_pacing_runs_at_the_configured_speed() {
    let config = RouteConfig {
        pacing: PacingMode::Physical,
        speed_kmh: 2000,
        ..Default::default()
    };
    let distance = config.start.distance_to(&config.end);
    let plan = MotionPlan::from_config(&config, distance);

    let moves = run(plan).len() as f64 - 1.0;
    let expected = plan.total_time_s * config.refresh_rate as f64;
    assert!((moves - expected).abs() <= 1.0, "{moves} vs {expected}");
}
