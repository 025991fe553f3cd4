// TiltFace - Hardware Capabilities
//
// The face and gesture logic only ever sees these traits.  The firmware binds
// them to the MPU6050, the SSD1306 and the serial console; tests bind them to
// in-memory fakes.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

use crate::events::{Command, Sample};

/// Source of one acceleration sample per loop cycle.
pub trait Sensor {
    fn read_sample(&mut self) -> anyhow::Result<Sample>;
}

/// Buffered monochrome panel.  Drawing only touches the framebuffer;
/// `flush` pushes it to the glass.
pub trait Panel: DrawTarget<Color = BinaryColor, Error = Infallible> {
    fn flush(&mut self) -> anyhow::Result<()>;
}

/// Outgoing side of the serial line.
pub trait CommandLink {
    fn send(&mut self, command: Command) -> anyhow::Result<()>;
}

/// Millisecond time base.  `now_ms` wraps like a 32-bit tick counter; callers
/// compare with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
    fn sleep_ms(&mut self, ms: u32);
}
