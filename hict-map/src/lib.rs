/*!
# HiCT Map Interactions

Map-side half of the HiCT viewer core: the view a contact map is shown in, the
per-level Hi-C tile layers, and the resolution-aware wheel zoom controller that
keeps the genomic position under the pointer fixed across pyramid levels.

## Driving the controller

The controller is a pure function of its inputs. The host owns a
[`GestureState`], feeds each [`MapEvent`] through
[`WheelZoomController::handle_event`] and calls [`WheelZoomController::poll`]
with the current time so pending timers can fire. Rendering, event dispatch and
the real clock stay with the host.
*/

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod layer;
pub mod timer;
pub mod view;
pub mod wheel;

pub use event::{DeltaMode, EventDisposition, MapEvent, MapEventKind, Platform, WheelData};
pub use geometry::{Coordinate, Extent, Pixel, Projection};
pub use gesture::{AnchorState, DeviceClass, GesturePhase, GestureState};
pub use layer::{build_hic_layers, HicTileLayer, TileLayer};
pub use timer::{Millis, TimerSlot};
pub use view::{AnimationRequest, AnimationTarget, ContactMapView, ViewAnimator, ViewOptions};
pub use wheel::{SettleOutcome, WheelZoomController, WheelZoomOptions};

/// Version information for the HiCT map library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
