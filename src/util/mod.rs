//! Utility helpers shared across the widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from controller and
//! component logic so both stay testable off the browser.

pub mod tab_storage;
pub mod time_label;
