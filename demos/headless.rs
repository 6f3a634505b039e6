//! Runs the route animation without a window, logging each rocket move.
//!
//! `RUST_LOG=debug cargo run --example headless [config.json]`

use rocketmap::{
    animation::TokioTicks, core::events::MapEvent, Document, Point, RouteConfig,
    RouteMapComponent,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RouteConfig::from_file(path)?,
        None => RouteConfig::default(),
    };

    let mut document =
        Document::new().with_element(config.map.container.clone(), Point::new(800.0, 600.0));
    let mut component = RouteMapComponent::new(config, TokioTicks::new());
    component.mount(&mut document);
    if !component.is_mounted() {
        anyhow::bail!("route map failed to mount");
    }

    print!("{}", component.panel());
    if let Some(plan) = component.rocket().plan() {
        log::info!(
            "{:.0} m at heading {:.1}deg, one step every {:?}",
            plan.distance_m,
            plan.bearing,
            plan.step_interval
        );
    }

    loop {
        for event in component.process_events() {
            if let MapEvent::MarkerMoved { layer_id, position } = event {
                log::info!("{layer_id} -> ({:.6}, {:.6})", position.lat, position.lng);
            }
        }
        if !component.ticks().wait().await {
            break;
        }
        component.update();
    }

    log::info!("rocket state: {:?}", component.motion_state());
    component.unmount(&mut document);
    log::info!("live maps after unmount: {}", document.live_maps());
    Ok(())
}
