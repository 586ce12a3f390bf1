//! Input plumbing for chopchop: action routing and menu focus arbitration.
//!
//! Engine-agnostic. The client feeds platform callbacks in and wires UI
//! state through [`FocusSurface`]; nothing here knows about windows,
//! entities, or frames.
//!
//! # Architecture
//!
//! ```text
//! platform bindings ──▶ ActionContext ──▶ ActionRouter ──▶ Channel<T> ──▶ listeners
//!                                              │
//!                                   gameplay ◀─┴─▶ menus   (exactly one enabled)
//!
//! hover / navigate ──▶ FocusArbitrator ──▶ FocusSurface (focus slot, cursor)
//! ```
//!
//! # Control sets
//!
//! Actions are grouped into a gameplay set and a menu set. Switching one on
//! switches the other off; contexts for a disabled set are dropped.
//!
//! # Focus
//!
//! The arbitrator tracks which modality (pointer or directional) owns focus.
//! Cursor visibility always matches that authority, and navigating never
//! leaves the focus slot empty while a directional selection exists.

pub mod action;
pub mod channel;
pub mod config;
pub mod context;
pub mod focus;
pub mod router;

pub use action::{ActionName, ControlSet};
pub use channel::{Channel, Subscription};
pub use config::{ConfigError, InputConfig};
pub use context::{ActionContext, Phase};
pub use focus::{Authority, FocusArbitrator, FocusSurface, MirrorSurface};
pub use router::{ActionRouter, CameraMove, ControlState, GameplayChannels, MenuChannels};
