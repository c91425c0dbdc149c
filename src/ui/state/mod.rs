// SPDX-License-Identifier: MPL-2.0
//! UI value objects shared by the viewer sub-components.
//!
//! Each type clamps or normalizes its value on construction so the viewer
//! state can never hold an out-of-range zoom, angle, volume or timeout.

pub mod drag;
pub mod overlay_timeout;
pub mod rotation;
pub mod volume;
pub mod zoom;

pub use drag::DragState;
pub use overlay_timeout::OverlayTimeout;
pub use rotation::RotationAngle;
pub use volume::Volume;
pub use zoom::ZoomFactor;
