//! Waypoint trail engine.
//!
//! A trail is a composite cubic Bezier path. Users pan and pinch-zoom a
//! viewport over it, tap the path to drop waypoints, drag waypoints along it,
//! and tap a waypoint to travel there with an eased camera animation. The host
//! screen owns an [`engine::EngineCore`], feeds it pointer events and frame
//! ticks, and renders from [`engine::EngineCore::snapshot`]. The core does no
//! drawing, timing, or I/O of its own.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`] context object and emitted [`engine::Action`]s |
//! | [`curve`] | Cubic segments and the composite trail curve |
//! | [`projector`] | Nearest-point projection onto the curve |
//! | [`viewport`] | Pan/zoom transform with scale and pan limits |
//! | [`waypoints`] | Waypoint model and store |
//! | [`hit`] | Waypoint hit-testing |
//! | [`animator`] | Travel animation state machine and framing policy |
//! | [`input`] | Pointer events and the gesture state |
//! | [`config`] | Engine configuration |
//! | [`geom`] | Points and bounds |
//! | [`consts`] | Shared numeric defaults |

pub mod animator;
pub mod config;
pub mod consts;
pub mod curve;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod projector;
pub mod viewport;
pub mod waypoints;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Action, EngineCore, FrameSnapshot};
pub use geom::Point;
