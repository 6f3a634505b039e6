use anyhow::Context;
use rocketmap::{
    animation::WallClockTicks,
    core::events::MapEvent,
    ui::{MapImagery, UiMapExt},
    Document, MotionState, Point, RouteConfig, RouteMapComponent,
};

/// Route viewer: the info panel on the left, the map filling the rest.
///
/// Usage: `rocketmap-app [config.json]`
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RouteConfig::from_file(&path)
            .with_context(|| format!("failed to load route config from {path}"))?,
        None => RouteConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Rocket Map"),
        ..Default::default()
    };

    eframe::run_native(
        "rocketmap-app",
        options,
        Box::new(move |_cc| Box::new(RocketMapApp::new(config))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited: {e}"))?;

    Ok(())
}

struct RocketMapApp {
    document: Document,
    component: RouteMapComponent<WallClockTicks>,
    imagery: MapImagery,
}

impl RocketMapApp {
    fn new(config: RouteConfig) -> Self {
        let container = config.map.container.clone();
        let mut document = Document::new().with_element(container, Point::new(1200.0, 800.0));
        let mut component = RouteMapComponent::new(config, WallClockTicks::new());
        component.mount(&mut document);

        Self {
            document,
            component,
            imagery: MapImagery::new(),
        }
    }
}

impl eframe::App for RocketMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.component.update();
        for event in self.component.process_events() {
            if let MapEvent::MarkerMoved { .. } = event {
                ctx.request_repaint();
            }
        }

        egui::SidePanel::left("info_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Route");
                ui.separator();
                self.component.panel().show(ui);

                if self.component.motion_state() == Some(MotionState::Arrived) {
                    ui.separator();
                    ui.label("Arrived");
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let size = ui.available_size();
                self.component
                    .resize(&mut self.document, Point::new(size.x as f64, size.y as f64));

                match self.component.map() {
                    Some(map) => {
                        ui.route_map_with(map, &mut self.imagery);
                    }
                    None => {
                        ui.centered_and_justified(|ui| ui.label("Map unavailable"));
                    }
                }
            });

        if let Some(wait) = self.component.ticks().time_until_due() {
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.component.unmount(&mut self.document);
        log::info!("released {} map(s)", self.document.releases());
    }
}
