//! Replay command - drive the wheel zoom controller with a recorded trace
//!
//! Time comes from the trace: pending timers fire at their own deadlines between
//! records, and an animation is considered finished `duration_ms` after it starts.

use anyhow::{anyhow, Result};
use hict_map::{
    Coordinate, ContactMapView, EventDisposition, Extent, GestureState, MapEvent, Millis, SettleOutcome, TileLayer,
    ViewAnimator, WheelData, WheelZoomController,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::session::Session;
use crate::trace::{load_trace, TraceRecord};

#[derive(Debug, Default, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub consumed: usize,
    pub settles: usize,
    pub level_changes: usize,
    pub final_level: usize,
    pub final_resolution: Option<f64>,
    pub final_zoom: Option<f64>,
    pub final_center: Coordinate,
    pub final_extent: Option<Extent>,
}

/// Host-side clock bookkeeping for one replay
struct Replayer<'a> {
    controller: &'a WheelZoomController,
    view: &'a mut ContactMapView,
    state: GestureState,
    animation_end: Option<Millis>,
    report: ReplayReport,
}

impl<'a> Replayer<'a> {
    fn new(controller: &'a WheelZoomController, view: &'a mut ContactMapView) -> Self {
        Self {
            controller,
            view,
            state: GestureState::new(),
            animation_end: None,
            report: ReplayReport::default(),
        }
    }

    fn finish_animation_by(&mut self, now: Millis) {
        if matches!(self.animation_end, Some(end) if end <= now) {
            self.view.complete_animations();
            self.animation_end = None;
        }
    }

    /// Fire every timer due at or before `now`, in deadline order
    fn advance(&mut self, now: Millis) {
        while let Some(deadline) = self.state.next_deadline().filter(|&d| d <= now) {
            self.finish_animation_by(deadline);
            let (state, outcome) = self.controller.poll(self.state, &mut *self.view, deadline);
            self.state = state;
            if let Some(outcome) = outcome {
                self.record(deadline, outcome);
            }
        }
        self.finish_animation_by(now);
    }

    fn record(&mut self, time: Millis, outcome: SettleOutcome) {
        self.report.settles += 1;
        match outcome {
            SettleOutcome::LevelChanged { from, to, resolution, center } => {
                self.report.level_changes += 1;
                log::info!(
                    "t={}ms level {} -> {} at resolution {} centred on [{:.2}, {:.2}]",
                    time, from, to, resolution, center[0], center[1]
                );
            }
            SettleOutcome::SameLevel { level, resolution } => {
                log::info!("t={}ms zoom within level {} to resolution {}", time, level, resolution);
            }
            other => log::info!("t={}ms settle left the view unchanged: {:?}", time, other),
        }
        if self.view.is_animating() {
            self.animation_end = Some(time + self.controller.options().duration_ms);
        }
    }

    fn feed(&mut self, record: &TraceRecord) {
        let now = record.time();
        self.advance(now);

        let TraceRecord::Wheel { pixel, delta_y, delta_mode, .. } = *record else {
            return;
        };
        let Some(coordinate) = self.view.pixel_to_coordinate(pixel) else {
            log::warn!("t={}ms view has no resolution, dropping wheel event", now);
            return;
        };
        let event = MapEvent::wheel(pixel, coordinate, now, WheelData { delta_y, delta_mode });
        let (state, disposition) = self.controller.handle_event(self.state, &event, &mut *self.view, now);
        self.state = state;
        self.report.events += 1;
        if disposition == EventDisposition::Consumed {
            self.report.consumed += 1;
        }
        log::debug!("t={}ms wheel {} -> {:?}", now, delta_y, self.state.phase());
    }

    fn drain(mut self) -> ReplayReport {
        while let Some(deadline) = self.state.next_deadline() {
            self.advance(deadline);
        }
        self.view.complete_animations();

        let resolution = self.view.resolution();
        self.report.final_resolution = resolution;
        self.report.final_zoom = self.view.zoom();
        self.report.final_level = resolution
            .map(|r| self.controller.table().clamped_level_of(r))
            .unwrap_or(0);
        self.report.final_center = self.view.center();
        self.report.final_extent = self.view.extent();
        self.report
    }
}

/// Feed `records` through `controller` against `view`
pub fn replay(controller: &WheelZoomController, view: &mut ContactMapView, records: &[TraceRecord]) -> ReplayReport {
    let mut replayer = Replayer::new(controller, view);
    for record in records {
        replayer.feed(record);
    }
    replayer.drain()
}

/// Controller and starting view for a session
pub fn setup(config: &Config, session: &Session, level: usize, center: Option<Coordinate>) -> Result<(WheelZoomController, ContactMapView)> {
    let pixel_resolution = session
        .table
        .pixel_resolution(level)
        .ok_or_else(|| anyhow!("level {} out of range, the session has {} levels", level, session.table.len()))?;

    let global = session.global_projection();
    let mut view = ContactMapView::new(global.clone(), config.view.size(), config.view.view_options(&session.table));
    view.set_resolution(pixel_resolution);
    let extent = global.extent;
    view.set_center(center.unwrap_or([
        (extent.min_x + extent.max_x) / 2.0,
        (extent.min_y + extent.max_y) / 2.0,
    ]));

    let layers: Vec<Arc<dyn TileLayer>> = session
        .layers()?
        .into_iter()
        .map(|layer| Arc::new(layer) as Arc<dyn TileLayer>)
        .collect();
    let controller = WheelZoomController::new(
        session.holder.clone(),
        session.table.clone(),
        global,
        layers,
        config.zoom,
        config.platform,
    );
    Ok((controller, view))
}

pub fn execute(config: &Config, session: &Path, trace: &Path, level: usize, center: Option<Vec<f64>>, json: bool) -> Result<()> {
    let session = Session::load(session)?;
    let records = load_trace(trace)?;
    log::info!("Replaying {} trace records from {}", records.len(), trace.display());

    let center = match center.as_deref() {
        None => None,
        Some([x, y]) => Some([*x, *y]),
        Some(other) => return Err(anyhow!("--center takes two values, got {}", other.len())),
    };
    let (controller, mut view) = setup(config, &session, level, center)?;
    let report = replay(&controller, &mut view, &records);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Events: {} ({} consumed)", report.events, report.consumed);
    println!("Settles: {} ({} level changes)", report.settles, report.level_changes);
    match (report.final_resolution, report.final_zoom) {
        (Some(resolution), Some(zoom)) => {
            println!("Final level: {}", report.final_level);
            println!("Final resolution: {} (zoom {:.3})", resolution, zoom);
        }
        _ => println!("Final resolution: unset"),
    }
    println!("Final center: [{:.3}, {:.3}]", report.final_center[0], report.final_center[1]);
    if let Some(extent) = report.final_extent {
        println!(
            "Visible extent: [{:.3}, {:.3}, {:.3}, {:.3}]",
            extent.min_x, extent.min_y, extent.max_x, extent.max_y
        );
    }
    Ok(())
}
