//! Month-view calendar layout.
//!
//! Given a visible month and a collection of date-ranged events, the
//! [`layout`] module decides which week rows each event occupies, how much of
//! each row its bar takes up, where its label is drawn, and whether that
//! label must be truncated.  Rendering is left to the caller; the bundled
//! `barcal` binary draws the result in a terminal.
pub mod layout;
