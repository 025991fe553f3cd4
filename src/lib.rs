// TiltFace - Gesture Face Library
//
// Hardware-independent half of the firmware: gesture classification, the
// animated face and the per-cycle driver that ties them together.  The
// firmware binary supplies the MPU6050, SSD1306 and serial console through
// the traits in `hal`.

pub mod app;
pub mod config;
pub mod events;
pub mod face;
pub mod gesture;
pub mod hal;
pub mod render;

#[cfg(test)]
mod testing;

pub use app::{App, Cycle};
pub use events::{Command, Sample};
