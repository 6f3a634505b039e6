use crate::{
    core::{geo::Point, map::Map, viewport::Viewport},
    layers::{
        base::LayerType,
        marker::{Icon, Marker},
        tile::TileLayer,
    },
    tiles::visible_tiles,
    ui::imagery::MapImagery,
};
use egui::{
    emath::Rot2, epaint::Mesh, Align2, Color32, FontId, Pos2, Rect, Response, Sense, Shape,
    Stroke, TextureId, Ui, Vec2,
};
use std::time::Duration;

const FULL_UV: Rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
const LOADING_REPAINT: Duration = Duration::from_millis(100);

/// Colors and fonts used by [`RouteMapWidget`]
#[derive(Debug, Clone)]
pub struct RouteMapStyle {
    pub background_color: Color32,
    pub pin_color: Color32,
    pub rocket_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub attribution_color: Color32,
    pub attribution_font: FontId,
    pub attribution_margin: f32,
}

impl Default for RouteMapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(170, 211, 223),
            pin_color: Color32::from_rgb(220, 40, 40),
            rocket_color: Color32::from_rgb(60, 60, 70),
            border_color: Color32::WHITE,
            border_width: 2.0,
            attribution_color: Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            attribution_font: FontId::proportional(10.0),
            attribution_margin: 10.0,
        }
    }
}

/// Draws a [`Map`] model: tile imagery, marker icons projected through the
/// view, the rocket turned to its heading, and the tile attribution.
///
/// Without [`MapImagery`] (or while textures are missing) tiles are left as
/// the background color and markers are drawn as glyphs.
pub struct RouteMapWidget<'a> {
    map: &'a Map,
    imagery: Option<&'a mut MapImagery>,
    style: RouteMapStyle,
}

impl<'a> RouteMapWidget<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self {
            map,
            imagery: None,
            style: RouteMapStyle::default(),
        }
    }

    pub fn imagery(mut self, imagery: &'a mut MapImagery) -> Self {
        self.imagery = Some(imagery);
        self
    }

    pub fn style(mut self, style: RouteMapStyle) -> Self {
        self.style = style;
        self
    }

    fn paint_tiles(&mut self, painter: &egui::Painter, rect: Rect, viewport: &Viewport) {
        let map = self.map;
        let Some(imagery) = self.imagery.as_deref_mut() else {
            return;
        };
        for layer in map.layers() {
            if !layer.is_visible() || layer.layer_type() != LayerType::Tile {
                continue;
            }
            let Some(tiles) = layer.as_any().downcast_ref::<TileLayer>() else {
                continue;
            };
            let options = tiles.tile_options();
            let tint = Color32::from_white_alpha((layer.opacity() * 255.0) as u8);

            for placement in visible_tiles(viewport, options.min_zoom, options.max_zoom) {
                if let Some(texture) = imagery.tile(tiles, placement.coord) {
                    let min = to_screen(rect, placement.min);
                    let tile_rect = Rect::from_min_size(min, Vec2::splat(placement.size as f32));
                    painter.image(texture.id(), tile_rect, FULL_UV, tint);
                }
            }
        }
    }

    fn paint_marker(&mut self, painter: &egui::Painter, rect: Rect, marker: &Marker, pos: Pos2) {
        let (w, h) = marker.icon().size();
        let size = Vec2::new(w as f32, h as f32);
        if !rect.expand2(size / 2.0).contains(pos) {
            return;
        }
        let texture = self
            .imagery
            .as_deref_mut()
            .and_then(|imagery| imagery.icon(painter.ctx(), marker.icon().url()))
            .map(|texture| texture.id());
        let icon_rect = Rect::from_center_size(pos, size);

        match (marker.icon(), texture) {
            (Icon::Image { .. }, Some(texture)) => {
                painter.image(texture, icon_rect, FULL_UV, Color32::WHITE);
            }
            (Icon::Div { rotation_deg, .. }, Some(texture)) => {
                painter.add(rotated_image(texture, icon_rect, *rotation_deg));
            }
            (Icon::Image { .. }, None) => {
                let stroke = Stroke::new(self.style.border_width, self.style.border_color);
                painter.circle(pos, size.min_elem() / 4.0, self.style.pin_color, stroke);
            }
            (Icon::Div { rotation_deg, .. }, None) => {
                let stroke = Stroke::new(self.style.border_width, self.style.border_color);
                let points = rocket_outline(pos, size.y / 2.0, *rotation_deg);
                painter.add(Shape::convex_polygon(
                    points.to_vec(),
                    self.style.rocket_color,
                    stroke,
                ));
            }
        }
    }
}

impl egui::Widget for RouteMapWidget<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, self.style.background_color);

        let mut viewport = self.map.viewport().clone();
        viewport.set_size(Point::new(rect.width() as f64, rect.height() as f64));

        if let Some(imagery) = self.imagery.as_deref_mut() {
            imagery.receive(ui.ctx());
        }
        self.paint_tiles(&painter, rect, &viewport);

        let map = self.map;
        for layer in map.layers() {
            if !layer.is_visible() || layer.layer_type() != LayerType::Marker {
                continue;
            }
            if let Some(marker) = layer.as_any().downcast_ref::<Marker>() {
                let pos = to_screen(rect, viewport.lat_lng_to_pixel(&marker.position()));
                self.paint_marker(&painter, rect, marker, pos);
            }
        }

        if let Some(attribution) = map.attribution() {
            painter.text(
                rect.left_bottom()
                    + Vec2::new(self.style.attribution_margin, -self.style.attribution_margin),
                Align2::LEFT_BOTTOM,
                decode_entities(&attribution),
                self.style.attribution_font.clone(),
                self.style.attribution_color,
            );
        }

        if self.imagery.as_deref().is_some_and(MapImagery::is_loading) {
            ui.ctx().request_repaint_after(LOADING_REPAINT);
        }
        response
    }
}

fn to_screen(rect: Rect, pixel: Point) -> Pos2 {
    rect.min + Vec2::new(pixel.x as f32, pixel.y as f32)
}

/// Textured quad turned clockwise by `rotation_deg` around its center
fn rotated_image(texture: TextureId, rect: Rect, rotation_deg: f64) -> Shape {
    let mut mesh = Mesh::with_texture(texture);
    mesh.add_rect_with_uv(rect, FULL_UV, Color32::WHITE);
    mesh.rotate(Rot2::from_angle(rotation_deg.to_radians() as f32), rect.center());
    Shape::mesh(mesh)
}

/// Arrow-head outline pointing along `heading_deg` (clockwise from north,
/// screen y grows downwards)
fn rocket_outline(center: Pos2, radius: f32, heading_deg: f64) -> [Pos2; 4] {
    let heading = heading_deg.to_radians() as f32;
    let forward = Vec2::new(heading.sin(), -heading.cos());
    let side = Vec2::new(-forward.y, forward.x);

    [
        center + forward * radius,
        center - forward * radius * 0.6 + side * radius * 0.6,
        center - forward * radius * 0.3,
        center - forward * radius * 0.6 - side * radius * 0.6,
    ]
}

/// Attribution strings are written for HTML; egui needs plain text
fn decode_entities(text: &str) -> String {
    text.replace("&copy;", "©").replace("&amp;", "&")
}
