// In-memory stand-ins for the hardware capabilities.

use core::convert::Infallible;
use std::collections::VecDeque;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::events::{Command, Sample};
use crate::hal::{Clock, CommandLink, Panel, Sensor};

/// Framebuffer panel that counts every pixel write and flush.
pub struct FakePanel {
    pixels: Vec<bool>,
    pub pixel_writes: usize,
    pub clears: usize,
    pub flushes: usize,
}

impl FakePanel {
    pub fn new() -> Self {
        Self {
            pixels: vec![false; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            pixel_writes: 0,
            clears: 0,
            flushes: 0,
        }
    }

    pub fn is_on(&self, x: i32, y: i32) -> bool {
        self.index(Point::new(x, y)).map_or(false, |i| self.pixels[i])
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    fn index(&self, p: Point) -> Option<usize> {
        let (w, h) = (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);
        (p.x >= 0 && p.y >= 0 && p.x < w && p.y < h).then(|| (p.y * w + p.x) as usize)
    }
}

impl OriginDimensions for FakePanel {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FakePanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.pixel_writes += 1;
            if let Some(i) = self.index(point) {
                self.pixels[i] = color.is_on();
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clears += 1;
        self.pixels.fill(color.is_on());
        Ok(())
    }
}

impl Panel for FakePanel {
    fn flush(&mut self) -> anyhow::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Clock that only moves when slept on (or nudged by the test).
pub struct FakeClock {
    pub now: u32,
    pub sleeps: Vec<u32>,
}

impl FakeClock {
    pub fn at(now: u32) -> Self {
        Self { now, sleeps: Vec::new() }
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
        self.now = self.now.wrapping_add(ms);
    }
}

#[derive(Default)]
pub struct RecordingLink {
    pub sent: Vec<Command>,
    pub fail: bool,
}

impl CommandLink for RecordingLink {
    fn send(&mut self, command: Command) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("link down");
        }
        self.sent.push(command);
        Ok(())
    }
}

/// Replays queued samples; an empty queue reads as a sensor fault.
#[derive(Default)]
pub struct ScriptedSensor {
    pub samples: VecDeque<Sample>,
}

impl ScriptedSensor {
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
    }
}

impl Sensor for ScriptedSensor {
    fn read_sample(&mut self) -> anyhow::Result<Sample> {
        self.samples
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no sample queued"))
    }
}
