use hict_core::{ContigDescriptor, ContigDimensionHolder, DimensionHolder, ResolutionTable};
use hict_map::{
    build_hic_layers, ContactMapView, DeltaMode, DeviceClass, EventDisposition, Extent, GesturePhase,
    GestureState, MapEvent, Platform, Projection, SettleOutcome, TileLayer, ViewAnimator, ViewOptions,
    WheelData, WheelZoomController, WheelZoomOptions,
};
use proptest::prelude::*;
use std::sync::Arc;

const PIXEL_RESOLUTIONS: [f64; 4] = [64.0, 16.0, 4.0, 1.0];
const BIN_RESOLUTIONS: [u64; 4] = [1000, 250, 50, 10];

struct Fixture {
    controller: WheelZoomController,
    holder: Arc<ContigDimensionHolder>,
    table: Arc<ResolutionTable>,
    view: ContactMapView,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture(options: WheelZoomOptions) -> Fixture {
    init_logging();
    let table = Arc::new(ResolutionTable::new(PIXEL_RESOLUTIONS.to_vec(), BIN_RESOLUTIONS.to_vec()).expect("table"));
    let contigs = [
        ContigDescriptor::new(0, "chr1", 60_000),
        ContigDescriptor::new(1, "chr2", 25_555),
        ContigDescriptor::new(2, "chr3", 14_445),
    ];
    let holder = Arc::new(ContigDimensionHolder::new(&contigs, &BIN_RESOLUTIONS).expect("holder"));
    let sizes: Vec<u64> = BIN_RESOLUTIONS
        .iter()
        .map(|&r| holder.total_bins_at(r).expect("known resolution"))
        .collect();
    let layers: Vec<Arc<dyn TileLayer>> = build_hic_layers(&table, &sizes)
        .expect("layers")
        .into_iter()
        .map(|layer| Arc::new(layer) as Arc<dyn TileLayer>)
        .collect();

    let global = Projection::new("hict-global", Extent::square_below_origin(sizes[0] as f64 * 64.0));
    let mut view = ContactMapView::new(global.clone(), [800.0, 600.0], ViewOptions::for_table(&table, 4.0));
    view.set_resolution(16.0);
    view.set_center([1000.0, -1000.0]);

    let controller = WheelZoomController::new(
        holder.clone(),
        table.clone(),
        global,
        layers,
        options,
        Platform::default(),
    );
    Fixture {
        controller,
        holder,
        table,
        view,
    }
}

fn wheel(view: &ContactMapView, pixel: [f64; 2], delta_y: f64, time: u64) -> MapEvent {
    let coordinate = view.pixel_to_coordinate(pixel).expect("view has a resolution");
    MapEvent::wheel(
        pixel,
        coordinate,
        time,
        WheelData {
            delta_y,
            delta_mode: DeltaMode::Pixel,
        },
    )
}

fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
    assert!(
        (actual[0] - expected[0]).abs() < 1e-6 && (actual[1] - expected[1]).abs() < 1e-6,
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn two_notches_cross_two_levels_and_keep_pointer_bp() {
    let options = WheelZoomOptions {
        delta_per_zoom: 120.0,
        max_delta: 2.0,
        ..WheelZoomOptions::default()
    };
    let mut fx = fixture(options);
    let pointer = [410.0, 290.0];

    let mut state = GestureState::new();
    for (time, delta) in [(0, -120.0), (20, -120.0)] {
        let event = wheel(&fx.view, pointer, delta, time);
        let (next, disposition) = fx.controller.handle_event(state, &event, &mut fx.view, time);
        assert_eq!(disposition, EventDisposition::Consumed);
        state = next;
    }
    assert_eq!(state.device, DeviceClass::Wheel);
    assert_eq!(state.total_delta, -240.0);
    assert_eq!(state.settle.deadline(), Some(80));

    // (1160, -840) at level 1 is bin (72, 53) -> bp (18000, 13250) -> level 3 bins (1800, 1325)
    let anchor = state.anchor.expect("pointer over data");
    assert_eq!(anchor.bps, [18_000, 13_250]);

    let (state, outcome) = fx.controller.poll(state, &mut fx.view, 79);
    assert_eq!(outcome, None);
    let (state, outcome) = fx.controller.poll(state, &mut fx.view, 80);
    assert_eq!(
        outcome,
        Some(SettleOutcome::LevelChanged {
            from: 1,
            to: 3,
            resolution: 1.0,
            center: [1790.0, -1335.0],
        })
    );
    assert_eq!(state.phase(), GesturePhase::Idle);
    assert!(state.anchor.is_none());

    assert!(fx.view.is_animating());
    fx.view.complete_animations();
    assert_eq!(fx.view.resolution(), Some(1.0));
    assert_close(fx.view.coordinate_to_pixel([1800.0, -1325.0]).unwrap(), pointer);
}

#[test]
fn bursts_within_timeout_settle_once() {
    let mut fx = fixture(WheelZoomOptions::default());
    let mut state = GestureState::new();
    for time in [0, 10, 20, 30, 40] {
        let event = wheel(&fx.view, [400.0, 300.0], -30.0, time);
        state = fx.controller.handle_event(state, &event, &mut fx.view, time).0;
        assert_eq!(state.settle.deadline(), Some(80));
    }
    assert_eq!(state.phase(), GesturePhase::Accumulating);
    assert_eq!(state.total_delta, -150.0);

    let (state, outcome) = fx.controller.poll(state, &mut fx.view, 80);
    assert!(matches!(outcome, Some(SettleOutcome::LevelChanged { from: 1, to: 2, .. })));
    let (_, outcome) = fx.controller.poll(state, &mut fx.view, 500);
    assert_eq!(outcome, None);
    assert_eq!(fx.view.history().len(), 1);
}

#[test]
fn zero_delta_changes_nothing() {
    let mut fx = fixture(WheelZoomOptions::default());
    let before = fx.view.clone();

    let event = wheel(&fx.view, [410.0, 290.0], 0.0, 5);
    let (state, disposition) = fx.controller.handle_event(GestureState::new(), &event, &mut fx.view, 5);
    assert_eq!(disposition, EventDisposition::Consumed);
    assert_eq!(state, GestureState::new());

    // Mid-gesture as well
    let event = wheel(&fx.view, [410.0, 290.0], 50.0, 10);
    let (pending, _) = fx.controller.handle_event(state, &event, &mut fx.view, 10);
    let event = wheel(&fx.view, [100.0, 100.0], 0.0, 30);
    let (after, _) = fx.controller.handle_event(pending, &event, &mut fx.view, 30);
    assert_eq!(after, pending);

    assert_eq!(fx.view.resolution(), before.resolution());
    assert_eq!(fx.view.center(), before.center());
    assert!(fx.view.history().is_empty());
}

#[test]
fn small_deltas_zoom_live_as_trackpad() {
    let mut fx = fixture(WheelZoomOptions::default());
    let event = wheel(&fx.view, [400.0, 300.0], -2.0, 0);
    let (state, _) = fx.controller.handle_event(GestureState::new(), &event, &mut fx.view, 0);

    assert_eq!(state.device, DeviceClass::Trackpad);
    assert_eq!(state.phase(), GesturePhase::Trackpad);
    assert_eq!(state.total_delta, 0.0);
    assert!(fx.view.is_interacting());
    assert!(fx.view.history().is_empty());
    let zoomed = fx.view.resolution().unwrap();
    assert!(zoomed < 16.0);

    // Larger deltas inside the gap keep the trackpad classification
    let event = wheel(&fx.view, [400.0, 300.0], -50.0, 60);
    let (state, _) = fx.controller.handle_event(state, &event, &mut fx.view, 60);
    assert_eq!(state.device, DeviceClass::Trackpad);
    assert_eq!(state.trackpad_end.deadline(), Some(140));
    assert!(fx.view.resolution().unwrap() < zoomed);

    let (state, outcome) = fx.controller.poll(state, &mut fx.view, 140);
    assert_eq!(outcome, None);
    assert_eq!(state.phase(), GesturePhase::Idle);
    assert!(!fx.view.is_interacting());
}

#[test]
fn pause_longer_than_gap_reclassifies_device() {
    let mut fx = fixture(WheelZoomOptions::default());
    let event = wheel(&fx.view, [400.0, 300.0], -2.0, 0);
    let (state, _) = fx.controller.handle_event(GestureState::new(), &event, &mut fx.view, 0);
    let (state, _) = fx.controller.poll(state, &mut fx.view, 80);
    assert_eq!(state.device, DeviceClass::Trackpad);

    let event = wheel(&fx.view, [400.0, 300.0], 100.0, 500);
    let (state, _) = fx.controller.handle_event(state, &event, &mut fx.view, 500);
    assert_eq!(state.device, DeviceClass::Wheel);
    assert_eq!(state.total_delta, 100.0);
    assert_eq!(state.phase(), GesturePhase::Accumulating);
}

#[test]
fn pause_after_wheel_settle_reclassifies_device() {
    let mut fx = fixture(WheelZoomOptions::default());
    let event = wheel(&fx.view, [400.0, 300.0], 100.0, 0);
    let (state, _) = fx.controller.handle_event(GestureState::new(), &event, &mut fx.view, 0);
    assert_eq!(state.device, DeviceClass::Wheel);
    let (state, outcome) = fx.controller.poll(state, &mut fx.view, 80);
    assert!(outcome.is_some());
    assert_eq!(state.phase(), GesturePhase::Idle);

    // Inside the gap the wheel classification sticks
    let event = wheel(&fx.view, [400.0, 300.0], -2.0, 200);
    let (quick, _) = fx.controller.handle_event(state, &event, &mut fx.view, 200);
    assert_eq!(quick.device, DeviceClass::Wheel);
    assert_eq!(quick.total_delta, -2.0);

    let event = wheel(&fx.view, [400.0, 300.0], -2.0, 2000);
    let (state, _) = fx.controller.handle_event(state, &event, &mut fx.view, 2000);
    assert_eq!(state.device, DeviceClass::Trackpad);
    assert_eq!(state.phase(), GesturePhase::Trackpad);
    assert_eq!(state.total_delta, 0.0);
    assert!(fx.view.is_interacting());
}

#[test]
fn constrained_view_disables_trackpad_path() {
    let mut fx = fixture(WheelZoomOptions {
        constrain_resolution: true,
        ..WheelZoomOptions::default()
    });
    let event = wheel(&fx.view, [400.0, 300.0], -2.0, 0);
    let (state, _) = fx.controller.handle_event(GestureState::new(), &event, &mut fx.view, 0);
    assert_eq!(state.device, DeviceClass::Trackpad);
    assert_eq!(state.phase(), GesturePhase::Accumulating);
    assert_eq!(fx.view.resolution(), Some(16.0));
}

#[test]
fn no_hovered_layer_leaves_view_alone() {
    let mut fx = fixture(WheelZoomOptions::default());
    // Far outside the matrix
    let event = wheel(&fx.view, [5.0, 5.0], -300.0, 0);
    let (state, disposition) = fx.controller.handle_event(GestureState::new(), &event, &mut fx.view, 0);
    assert_eq!(disposition, EventDisposition::Consumed);
    assert!(state.anchor.is_none());

    let (state, outcome) = fx.controller.poll(state, &mut fx.view, 80);
    assert_eq!(outcome, Some(SettleOutcome::NoAnchor));
    assert_eq!(state.total_delta, 0.0);
    assert_eq!(state.phase(), GesturePhase::Idle);
    assert!(fx.view.history().is_empty());
    assert_eq!(fx.view.resolution(), Some(16.0));
}

proptest! {
    #[test]
    fn settled_zoom_keeps_anchor_under_pointer(
        px in 340.0f64..460.0,
        py in 240.0f64..360.0,
        deltas in prop::collection::vec(prop_oneof![-600.0f64..-5.0, 5.0f64..600.0], 1..6),
    ) {
        let options = WheelZoomOptions { delta_per_zoom: 120.0, max_delta: 3.0, ..WheelZoomOptions::default() };
        let mut fx = fixture(options);
        let pointer = [px.round(), py.round()];

        let mut state = GestureState::new();
        for (i, &delta) in deltas.iter().enumerate() {
            let time = i as u64 * 10;
            let event = wheel(&fx.view, pointer, delta, time);
            state = fx.controller.handle_event(state, &event, &mut fx.view, time).0;
        }
        let anchor = state.anchor.expect("pointer over data");
        let (_, outcome) = fx.controller.poll(state, &mut fx.view, 1_000);
        fx.view.complete_animations();

        match outcome {
            Some(SettleOutcome::SameLevel { .. }) => {
                let at = fx.view.coordinate_to_pixel(anchor.coordinate).unwrap();
                prop_assert!((at[0] - pointer[0]).abs() < 1e-6 && (at[1] - pointer[1]).abs() < 1e-6);
            }
            Some(SettleOutcome::LevelChanged { to, .. }) => {
                let level = to.min(fx.table.len() - 1);
                let bin_resolution = fx.table.bin_resolution(level).unwrap();
                let pixel_resolution = fx.table.pixel_resolution(level).unwrap();
                let bx = fx.holder.bin_containing_bp(anchor.bps[0], bin_resolution).unwrap();
                let by = fx.holder.bin_containing_bp(anchor.bps[1], bin_resolution).unwrap();
                let focus = [bx as f64 * pixel_resolution, -(by as f64 * pixel_resolution)];
                let at = fx.view.coordinate_to_pixel(focus).unwrap();
                prop_assert!((at[0] - pointer[0]).abs() < 1e-6 && (at[1] - pointer[1]).abs() < 1e-6);
            }
            other => prop_assert!(false, "unexpected outcome {:?}", other),
        }
    }
}
