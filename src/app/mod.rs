// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Application layer: session state, input adaption and view.

pub mod input;
pub mod message;
pub mod session;
pub mod view;

pub use input::PointerAdapter;
pub use message::{CropMessage, CursorHint, PointerEvent, PointerKind, PointerOutcome, Repaint};
pub use session::{LoadTicket, Session};
