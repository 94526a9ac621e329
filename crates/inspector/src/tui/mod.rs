//! Terminal User Interface
//!
//! Interactive browser over the classified devices and cables.

pub mod app;
pub mod events;
pub mod ui;
