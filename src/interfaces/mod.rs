//! Views driving the flow controller from the outside.

pub mod console;
pub mod headless;
