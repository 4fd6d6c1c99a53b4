/*!
# Map View

The view owns the visible center and resolution (map units per pixel) of the
contact map. Interactions never move it directly: they ask for animations,
continuous zoom adjustments, and bracket gestures with begin/end interaction.
*/

use crate::geometry::{Coordinate, Extent, Pixel, Projection};
use crate::timer::Millis;
use hict_core::ResolutionTable;
use serde::{Deserialize, Serialize};

/// Where an animated zoom should pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationTarget {
    /// Move the view center to this coordinate
    Center(Coordinate),
    /// Keep this coordinate at the same pixel while the resolution changes
    Anchor(Coordinate),
}

/// An interpolated view transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub duration_ms: Millis,
    pub resolution: f64,
    pub target: AnimationTarget,
}

/// The view operations a zoom interaction relies on
pub trait ViewAnimator {
    fn animate(&mut self, request: AnimationRequest);
    fn cancel_animations(&mut self);
    fn is_animating(&self) -> bool;

    fn begin_interaction(&mut self);
    /// `direction` is the sign of the last zoom delta
    fn end_interaction(&mut self, direction: f64, anchor: Option<Coordinate>);

    /// Current zoom level, `None` until the view has a resolution
    fn zoom(&self) -> Option<f64>;
    fn resolution(&self) -> Option<f64>;
    fn resolution_for_zoom(&self, zoom: f64) -> f64;
    fn constrained_zoom(&self, zoom: f64) -> f64;
    /// Whether the view only allows whole zoom levels
    fn constrain_resolution(&self) -> bool;
    /// Continuous zoom by `delta` levels around `anchor` (view center when `None`)
    fn adjust_zoom(&mut self, delta: f64, anchor: Option<Coordinate>);

    /// Viewport size in pixels
    fn size(&self) -> [f64; 2];
    fn projection(&self) -> &Projection;
}

fn default_zoom_factor() -> f64 { 2.0 }

/// Zoom pyramid of a view: `resolution = max_resolution / zoom_factor^(zoom - min_zoom)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    pub max_resolution: f64,
    #[serde(default)]
    pub min_zoom: f64,
    pub max_zoom: f64,
    #[serde(default)]
    pub constrain_resolution: bool,
}

impl ViewOptions {
    /// Zoom range spanning every level of `table`
    pub fn for_table(table: &ResolutionTable, zoom_factor: f64) -> Self {
        let px = table.pixel_resolutions();
        let coarsest = px[0];
        let finest = px[px.len() - 1];
        let max_zoom = (coarsest / finest).ln() / zoom_factor.ln();
        // Snap away log round-off so the finest level stays reachable exactly
        let max_zoom = if (max_zoom - max_zoom.round()).abs() < 1e-9 { max_zoom.round() } else { max_zoom };
        Self {
            zoom_factor,
            max_resolution: coarsest,
            min_zoom: 0.0,
            max_zoom,
            constrain_resolution: false,
        }
    }
}

/// In-process view over a contact map.
///
/// Animations with a duration stay in flight until [`complete_animations`](Self::complete_animations)
/// is called, so callers can observe cancellation; zero-length ones apply at once.
#[derive(Debug, Clone)]
pub struct ContactMapView {
    projection: Projection,
    size: [f64; 2],
    options: ViewOptions,
    center: Coordinate,
    resolution: Option<f64>,
    in_flight: Option<AnimationRequest>,
    interaction_hints: u32,
    history: Vec<AnimationRequest>,
}

impl ContactMapView {
    pub fn new(projection: Projection, size: [f64; 2], options: ViewOptions) -> Self {
        Self {
            projection,
            size,
            options,
            center: [0.0, 0.0],
            resolution: None,
            in_flight: None,
            interaction_hints: 0,
            history: Vec::new(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    pub fn set_resolution(&mut self, resolution: f64) {
        self.resolution = Some(self.clamp_resolution(resolution));
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        let zoom = self.constrained_zoom(zoom);
        self.resolution = Some(self.resolution_for_zoom(zoom));
    }

    pub fn set_size(&mut self, size: [f64; 2]) {
        self.size = size;
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction_hints > 0
    }

    /// Every animation requested so far, oldest first
    pub fn history(&self) -> &[AnimationRequest] {
        &self.history
    }

    pub fn in_flight(&self) -> Option<&AnimationRequest> {
        self.in_flight.as_ref()
    }

    /// Jump to the end state of the pending animation
    pub fn complete_animations(&mut self) {
        if let Some(request) = self.in_flight.take() {
            self.apply(request.resolution, request.target);
        }
    }

    pub fn pixel_to_coordinate(&self, pixel: Pixel) -> Option<Coordinate> {
        let r = self.resolution?;
        Some([
            self.center[0] + (pixel[0] - self.size[0] / 2.0) * r,
            self.center[1] - (pixel[1] - self.size[1] / 2.0) * r,
        ])
    }

    pub fn coordinate_to_pixel(&self, coordinate: Coordinate) -> Option<Pixel> {
        let r = self.resolution?;
        Some([
            self.size[0] / 2.0 + (coordinate[0] - self.center[0]) / r,
            self.size[1] / 2.0 - (coordinate[1] - self.center[1]) / r,
        ])
    }

    /// Visible map extent
    pub fn extent(&self) -> Option<Extent> {
        let r = self.resolution?;
        let half_w = self.size[0] / 2.0 * r;
        let half_h = self.size[1] / 2.0 * r;
        Some(Extent::new(
            self.center[0] - half_w,
            self.center[1] - half_h,
            self.center[0] + half_w,
            self.center[1] + half_h,
        ))
    }

    fn min_resolution(&self) -> f64 {
        self.resolution_for_zoom(self.options.max_zoom)
    }

    fn clamp_resolution(&self, resolution: f64) -> f64 {
        resolution.clamp(self.min_resolution(), self.options.max_resolution)
    }

    fn apply(&mut self, resolution: f64, target: AnimationTarget) {
        let resolution = self.clamp_resolution(resolution);
        match target {
            AnimationTarget::Center(center) => self.center = center,
            AnimationTarget::Anchor(anchor) => {
                if let Some(old) = self.resolution {
                    let k = resolution / old;
                    self.center = [
                        anchor[0] - (anchor[0] - self.center[0]) * k,
                        anchor[1] - (anchor[1] - self.center[1]) * k,
                    ];
                }
            }
        }
        self.resolution = Some(resolution);
    }
}

impl ViewAnimator for ContactMapView {
    fn animate(&mut self, request: AnimationRequest) {
        self.history.push(request);
        if request.duration_ms == 0 {
            self.in_flight = None;
            self.apply(request.resolution, request.target);
        } else {
            self.in_flight = Some(request);
        }
    }

    fn cancel_animations(&mut self) {
        self.in_flight = None;
    }

    fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    fn begin_interaction(&mut self) {
        self.interaction_hints += 1;
    }

    fn end_interaction(&mut self, _direction: f64, anchor: Option<Coordinate>) {
        self.interaction_hints = self.interaction_hints.saturating_sub(1);
        if self.interaction_hints == 0 && self.options.constrain_resolution {
            if let Some(zoom) = self.zoom() {
                let snapped = self.resolution_for_zoom(self.constrained_zoom(zoom));
                let target = match anchor {
                    Some(a) => AnimationTarget::Anchor(a),
                    None => AnimationTarget::Center(self.center),
                };
                self.apply(snapped, target);
            }
        }
    }

    fn zoom(&self) -> Option<f64> {
        let r = self.resolution?;
        Some(self.options.min_zoom + (self.options.max_resolution / r).ln() / self.options.zoom_factor.ln())
    }

    fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    fn resolution_for_zoom(&self, zoom: f64) -> f64 {
        let steps = zoom - self.options.min_zoom;
        let divisor = if steps.fract() == 0.0 && steps.abs() < i32::MAX as f64 {
            self.options.zoom_factor.powi(steps as i32)
        } else {
            self.options.zoom_factor.powf(steps)
        };
        self.options.max_resolution / divisor
    }

    fn constrained_zoom(&self, zoom: f64) -> f64 {
        let zoom = zoom.clamp(self.options.min_zoom, self.options.max_zoom);
        if self.options.constrain_resolution {
            zoom.round()
        } else {
            zoom
        }
    }

    fn constrain_resolution(&self) -> bool {
        self.options.constrain_resolution
    }

    fn adjust_zoom(&mut self, delta: f64, anchor: Option<Coordinate>) {
        let Some(current) = self.resolution else {
            return;
        };
        let target = current / self.options.zoom_factor.powf(delta);
        let pivot = match anchor {
            Some(a) => AnimationTarget::Anchor(a),
            None => AnimationTarget::Center(self.center),
        };
        self.apply(target, pivot);
    }

    fn size(&self) -> [f64; 2] {
        self.size
    }

    fn projection(&self) -> &Projection {
        &self.projection
    }
}
