use crate::{
    core::{constants::MARKER_ICON_SIZE, geo::LatLng},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Visual content of a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Icon {
    /// Plain image pin
    Image { url: String, size: (u32, u32) },
    /// Custom-markup marker; the image is drawn rotated clockwise by
    /// `rotation_deg` around its centre.
    Div {
        url: String,
        size: (u32, u32),
        rotation_deg: f64,
        class_name: String,
    },
}

impl Icon {
    pub fn image(url: impl Into<String>, size: (u32, u32)) -> Self {
        Self::Image {
            url: url.into(),
            size,
        }
    }

    pub fn rotated(url: impl Into<String>, size: (u32, u32), rotation_deg: f64) -> Self {
        Self::Div {
            url: url.into(),
            size,
            rotation_deg,
            class_name: String::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let Self::Div { class_name, .. } = &mut self {
            *class_name = class.into();
        }
        self
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Image { url, .. } | Self::Div { url, .. } => url,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Image { size, .. } | Self::Div { size, .. } => *size,
        }
    }

    /// Clockwise rotation in degrees; plain image pins are never rotated
    pub fn rotation_deg(&self) -> f64 {
        match self {
            Self::Image { .. } => 0.0,
            Self::Div { rotation_deg, .. } => *rotation_deg,
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::image("marker-icon.png", MARKER_ICON_SIZE)
    }
}

pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    icon: Icon,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            icon: Icon::default(),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = name.into();
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "icon": self.icon
        })
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        if let Some(position) = options.get("position") {
            let position: LatLng = serde_json::from_value(position.clone())?;
            if !position.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "marker '{}' cannot move to ({}, {})",
                    self.properties.id, position.lat, position.lng
                )));
            }
            self.position = position;
        }
        if let Some(icon) = options.get("icon") {
            self.icon = serde_json::from_value(icon.clone())?;
        }
        Ok(())
    }
}
