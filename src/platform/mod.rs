//! Platform abstraction layer
//!
//! Input arrives as discrete events from the browser listeners (or from the
//! headless native driver) and is queued until the next tick drains it.

pub mod input;

pub use input::{InputEvent, InputQueue, Key};
