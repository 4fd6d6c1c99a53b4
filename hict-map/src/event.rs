//! Map browser events as seen by interactions

use crate::geometry::{Coordinate, Pixel};
use crate::timer::Millis;
use serde::{Deserialize, Serialize};

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelData {
    pub delta_y: f64,
    #[serde(default)]
    pub delta_mode: DeltaMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEventKind {
    Wheel(WheelData),
    PointerMove,
    PointerDrag,
    SingleClick,
    DoubleClick,
}

/// A pointer event already resolved against the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapEvent {
    pub kind: MapEventKind,
    /// Pointer position in viewport pixels
    pub pixel: Pixel,
    /// Pointer position in view projection coordinates
    pub coordinate: Coordinate,
    pub time: Millis,
}

impl MapEvent {
    pub fn wheel(pixel: Pixel, coordinate: Coordinate, time: Millis, wheel: WheelData) -> Self {
        Self {
            kind: MapEventKind::Wheel(wheel),
            pixel,
            coordinate,
            time,
        }
    }

    pub fn wheel_data(&self) -> Option<&WheelData> {
        match &self.kind {
            MapEventKind::Wheel(data) => Some(data),
            _ => None,
        }
    }
}

/// Whether an event should continue to other handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Propagate,
    Consumed,
}

fn default_device_pixel_ratio() -> f64 { 1.0 }

/// Host engine quirks that affect delta normalisation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Engine reports pixel-mode deltas scaled by the device pixel ratio
    #[serde(default)]
    pub firefox: bool,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            firefox: false,
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}
