//! Input mapping: raw device state turned into camera-facing values.
//!
//! # Invariants
//! - This crate never polls devices; the host feeds it key names, cursor
//!   positions and scroll deltas.
//! - The first cursor sample after construction or [`MouseLook::reset`]
//!   yields a zero delta.

pub mod action;
pub mod mouse;

pub use action::{Action, ActionMap, HeldMovement};
pub use mouse::{MouseLook, PIXELS_PER_LINE, pixel_scroll_to_lines};
