/*!
# Resolution-aware wheel zoom

Wheel and trackpad zoom over a multi-resolution contact map.

Mouse wheels are debounced: deltas are summed until `timeout_ms` passes without
a new event, then a single transition is animated. When that transition crosses
into another pyramid level the view is recentred through genomic coordinates,
so the base pair under the pointer stays under the pointer even though the
bp-per-pixel scale jumps. Trackpads bypass debouncing and zoom continuously.
*/

use crate::event::{DeltaMode, EventDisposition, MapEvent, Platform};
use crate::geometry::{Coordinate, Projection};
use crate::gesture::{AnchorState, DeviceClass, GestureState};
use crate::layer::TileLayer;
use crate::timer::Millis;
use crate::view::{AnimationRequest, AnimationTarget, ViewAnimator};
use hict_core::{BinResolution, DimensionHolder, LevelIndex, ResolutionKey, ResolutionTable};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pixels per line for line-mode wheel deltas
const LINE_DELTA_PX: f64 = 40.0;

/// Deltas below this magnitude at the start of a gesture come from a trackpad
const TRACKPAD_DELTA_THRESHOLD: f64 = 4.0;

fn default_delta_per_zoom() -> f64 { 300.0 }
fn default_max_delta() -> f64 { 1.0 }
fn default_duration_ms() -> Millis { 250 }
fn default_timeout_ms() -> Millis { 80 }
fn default_trackpad_event_gap_ms() -> Millis { 400 }
fn default_use_anchor() -> bool { true }

/// Tuning of the wheel zoom interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelZoomOptions {
    /// Accumulated delta equivalent to one zoom level
    #[serde(default = "default_delta_per_zoom")]
    pub delta_per_zoom: f64,
    /// Cap on zoom levels per settled gesture
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: Millis,
    /// Inactivity before a wheel gesture settles
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Millis,
    /// Pause after which the device is classified again
    #[serde(default = "default_trackpad_event_gap_ms")]
    pub trackpad_event_gap_ms: Millis,
    #[serde(default)]
    pub constrain_resolution: bool,
    #[serde(default = "default_use_anchor")]
    pub use_anchor: bool,
}

impl Default for WheelZoomOptions {
    fn default() -> Self {
        Self {
            delta_per_zoom: default_delta_per_zoom(),
            max_delta: default_max_delta(),
            duration_ms: default_duration_ms(),
            timeout_ms: default_timeout_ms(),
            trackpad_event_gap_ms: default_trackpad_event_gap_ms(),
            constrain_resolution: false,
            use_anchor: default_use_anchor(),
        }
    }
}

/// What a settle did to the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleOutcome {
    /// The view had no zoom yet
    NotReady,
    /// No data layer was hovered during the gesture
    NoAnchor,
    /// Zoomed within one pyramid level, anchored on the pointer coordinate
    SameLevel { level: LevelIndex, resolution: f64 },
    /// Crossed pyramid levels; recentred through the anchored base pairs
    LevelChanged {
        from: LevelIndex,
        to: LevelIndex,
        resolution: f64,
        center: Coordinate,
    },
    /// The anchored base pairs could not be mapped at the new level
    Unresolvable,
}

/// Wheel/trackpad zoom interaction over the Hi-C layer pyramid
pub struct WheelZoomController {
    holder: Arc<dyn DimensionHolder>,
    table: Arc<ResolutionTable>,
    global_projection: Projection,
    layers: Vec<Arc<dyn TileLayer>>,
    options: WheelZoomOptions,
    platform: Platform,
    condition: Box<dyn Fn(&MapEvent) -> bool>,
}

impl WheelZoomController {
    pub fn new(
        holder: Arc<dyn DimensionHolder>,
        table: Arc<ResolutionTable>,
        global_projection: Projection,
        layers: Vec<Arc<dyn TileLayer>>,
        options: WheelZoomOptions,
        platform: Platform,
    ) -> Self {
        Self {
            holder,
            table,
            global_projection,
            layers,
            options,
            platform,
            condition: Box::new(|_| true),
        }
    }

    /// Only handle events accepted by `condition`
    pub fn with_condition(mut self, condition: impl Fn(&MapEvent) -> bool + 'static) -> Self {
        self.condition = Box::new(condition);
        self
    }

    pub fn options(&self) -> &WheelZoomOptions {
        &self.options
    }

    pub fn table(&self) -> &ResolutionTable {
        &self.table
    }

    fn constrained<V: ViewAnimator + ?Sized>(&self, view: &V) -> bool {
        view.constrain_resolution() || self.options.constrain_resolution
    }

    /// Feed one map event at host time `now`
    pub fn handle_event<V: ViewAnimator + ?Sized>(
        &self,
        mut state: GestureState,
        event: &MapEvent,
        view: &mut V,
        now: Millis,
    ) -> (GestureState, EventDisposition) {
        if !(self.condition)(event) {
            return (state, EventDisposition::Propagate);
        }
        let Some(wheel) = event.wheel_data() else {
            return (state, EventDisposition::Propagate);
        };

        let mut delta = wheel.delta_y;
        if self.platform.firefox && wheel.delta_mode == DeltaMode::Pixel {
            delta /= self.platform.device_pixel_ratio;
        }
        if wheel.delta_mode == DeltaMode::Line {
            delta *= LINE_DELTA_PX;
        }
        if delta == 0.0 {
            return (state, EventDisposition::Consumed);
        }

        if self.options.use_anchor {
            if let Some(anchor) = self.capture_anchor(event, &*view) {
                state.anchor = Some(anchor);
            }
        }
        state.last_delta = delta;

        let start_time = *state.start_time.get_or_insert(now);
        let elapsed = now.saturating_sub(start_time);
        let gap = state.last_event.map_or(0, |last| now.saturating_sub(last));
        state.last_event = Some(now);
        if state.device == DeviceClass::Unknown || gap > self.options.trackpad_event_gap_ms {
            state.device = if delta.abs() < TRACKPAD_DELTA_THRESHOLD {
                DeviceClass::Trackpad
            } else {
                DeviceClass::Wheel
            };
            debug!("wheel device classified as {:?} (delta {})", state.device, delta);
        }

        if state.device == DeviceClass::Trackpad && !self.constrained(&*view) {
            if !state.trackpad_end.cancel() {
                if view.is_animating() {
                    view.cancel_animations();
                }
                view.begin_interaction();
            }
            state.trackpad_end.arm(now, self.options.timeout_ms);
            let anchor = state.anchor.map(|a| a.coordinate);
            view.adjust_zoom(-delta / self.options.delta_per_zoom, anchor);
            state.start_time = Some(now);
            return (state, EventDisposition::Consumed);
        }

        state.total_delta += delta;
        let time_left = self.options.timeout_ms.saturating_sub(elapsed);
        state.settle.cancel();
        state.settle.arm(now, time_left);
        debug!("wheel delta {} accumulated to {}, settling in {}ms", delta, state.total_delta, time_left);

        (state, EventDisposition::Consumed)
    }

    /// Fire whichever slots are due at `now`
    pub fn poll<V: ViewAnimator + ?Sized>(
        &self,
        mut state: GestureState,
        view: &mut V,
        now: Millis,
    ) -> (GestureState, Option<SettleOutcome>) {
        if state.trackpad_end.is_due(now) {
            state.trackpad_end.cancel();
            let direction = if state.last_delta > 0.0 {
                1.0
            } else if state.last_delta < 0.0 {
                -1.0
            } else {
                0.0
            };
            view.end_interaction(direction, state.anchor.map(|a| a.coordinate));
            debug!("trackpad interaction ended");
        }

        let outcome = if state.settle.is_due(now) {
            Some(self.resolve_zoom(&mut state, view))
        } else {
            None
        };
        (state, outcome)
    }

    /// Settle the accumulated wheel delta into one view transition
    pub fn resolve_zoom<V: ViewAnimator + ?Sized>(&self, state: &mut GestureState, view: &mut V) -> SettleOutcome {
        if view.is_animating() {
            view.cancel_animations();
        }
        let outcome = self.settle_transition(state, view);
        state.reset_accumulator();
        outcome
    }

    fn settle_transition<V: ViewAnimator + ?Sized>(&self, state: &GestureState, view: &mut V) -> SettleOutcome {
        let limit = self.options.max_delta * self.options.delta_per_zoom;
        let mut delta = -state.total_delta.clamp(-limit, limit) / self.options.delta_per_zoom;
        if self.constrained(&*view) {
            delta = if delta > 0.0 {
                1.0
            } else if delta < 0.0 {
                -1.0
            } else {
                0.0
            };
        }

        let (Some(current_zoom), Some(current_resolution)) = (view.zoom(), view.resolution()) else {
            debug!("settle skipped: view has no resolution");
            return SettleOutcome::NotReady;
        };
        let Some(anchor) = state.anchor.filter(|a| !a.coordinate[0].is_nan()) else {
            debug!("settle skipped: no anchor");
            return SettleOutcome::NoAnchor;
        };

        let new_zoom = view.constrained_zoom(current_zoom + delta);
        let new_resolution = view.resolution_for_zoom(new_zoom);
        let old_level = self.table.level_of(current_resolution);
        let new_level = self.table.level_of(new_resolution);

        if new_level == old_level {
            view.animate(AnimationRequest {
                duration_ms: self.options.duration_ms,
                resolution: new_resolution,
                target: AnimationTarget::Anchor(anchor.coordinate),
            });
            info!("zoom to resolution {} within level {}", new_resolution, new_level);
            return SettleOutcome::SameLevel {
                level: new_level,
                resolution: new_resolution,
            };
        }

        let Some(focus) = self.anchor_at_level(&anchor, new_level, view.projection()) else {
            return SettleOutcome::Unresolvable;
        };
        let dx = anchor.center_pixel[0] - anchor.pixel[0];
        let dy = anchor.center_pixel[1] - anchor.pixel[1];
        let center = [focus[0] + dx * new_resolution, focus[1] - dy * new_resolution];

        view.animate(AnimationRequest {
            duration_ms: self.options.duration_ms,
            resolution: new_resolution,
            target: AnimationTarget::Center(center),
        });
        info!(
            "zoom from level {} to level {} at resolution {}, center [{:.3}, {:.3}]",
            old_level, new_level, new_resolution, center[0], center[1]
        );
        SettleOutcome::LevelChanged {
            from: old_level,
            to: new_level,
            resolution: new_resolution,
            center,
        }
    }

    /// Map coordinate of the anchored bins at `level`, in the view projection
    fn anchor_at_level(&self, anchor: &AnchorState, level: LevelIndex, view_projection: &Projection) -> Option<Coordinate> {
        let level = level.min(self.table.len().saturating_sub(1));
        let bin_resolution: BinResolution = self.table.bin_resolution(level)?;
        let pixel_resolution = self.table.pixel_resolution(level)?;

        let mut bins = [0u64; 2];
        for (bin, &bp) in bins.iter_mut().zip(anchor.bps.iter()) {
            *bin = match self.holder.bin_containing_bp(bp, bin_resolution) {
                Ok(b) => b,
                Err(e) => {
                    warn!("cannot map anchor bp {} at resolution {}: {}", bp, bin_resolution, e);
                    return None;
                }
            };
        }

        let global = [
            bins[0] as f64 * pixel_resolution,
            -(bins[1] as f64 * pixel_resolution),
        ];
        Some(Projection::transform(global, &self.global_projection, view_projection))
    }

    /// Topmost-first data layer under the pointer (lowest z-index wins)
    fn hovered_layer(&self, coordinate: Coordinate, view_projection: &Projection, view_resolution: f64) -> Option<&Arc<dyn TileLayer>> {
        self.layers
            .iter()
            .filter(|layer| layer.has_data_at(coordinate, view_projection, view_resolution))
            .min_by_key(|layer| layer.z_index())
    }

    fn capture_anchor<V: ViewAnimator + ?Sized>(&self, event: &MapEvent, view: &V) -> Option<AnchorState> {
        let view_resolution = view.resolution()?;
        let layer = self.hovered_layer(event.coordinate, view.projection(), view_resolution)?;

        let key: ResolutionKey = match layer.bp_resolution().parse() {
            Ok(key) => key,
            Err(e) => {
                warn!("ignoring hovered layer: {}", e);
                return None;
            }
        };

        let local = Projection::transform(event.coordinate, view.projection(), layer.projection());
        let fixed = [local[0] / layer.pixel_resolution(), local[1] / layer.pixel_resolution()];
        let raw_bins = [fixed[0].floor() as i64, -(fixed[1].floor() as i64)];

        let bps = self
            .holder
            .clamp_bin_coordinates_at_resolution(raw_bins, key)
            .and_then(|bins| {
                Ok([
                    self.holder.start_bp_of_bin(bins[0], key.resolution())?,
                    self.holder.start_bp_of_bin(bins[1], key.resolution())?,
                ])
            });
        let bps = match bps {
            Ok(bps) => bps,
            Err(e) => {
                warn!("cannot anchor pointer at resolution {}: {}", key, e);
                return None;
            }
        };

        let size = view.size();
        let anchor = AnchorState {
            bps,
            coordinate: event.coordinate,
            pixel: event.pixel,
            center_pixel: [(size[0] / 2.0).round(), (size[1] / 2.0).round()],
        };
        debug!("anchored pointer at bp [{}, {}] on layer {}", bps[0], bps[1], key);
        Some(anchor)
    }
}
