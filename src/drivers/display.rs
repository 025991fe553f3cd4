// TiltFace - SSD1306 OLED Driver
//
// 128x64 monochrome framebuffer over the shared I2C bus.  embedded-graphics
// draws into RAM; `flush` pushes the whole frame in one horizontal-addressing
// burst.

use core::convert::Infallible;

use anyhow::Context;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};

use tiltface::config::*;
use tiltface::hal::Panel;

use super::{lock, SharedBus};

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_NOP: u8 = 0xE3;

const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF,
    0xD5, 0x80, // clock divide / oscillator
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // display offset
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // resume from RAM
    0xA6,       // normal (not inverted)
    CMD_DISPLAY_ON,
];

const FULL_WINDOW: &[u8] = &[
    0x21, 0x00, (SCREEN_WIDTH - 1) as u8,       // columns
    0x22, 0x00, (SCREEN_HEIGHT / 8 - 1) as u8,  // pages
];

pub struct OledDisplay {
    bus: SharedBus,
    buffer: [u8; DISPLAY_BUFFER_SIZE],
}

impl OledDisplay {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            buffer: [0; DISPLAY_BUFFER_SIZE],
        }
    }

    /// Probe the controller with a NOP.
    pub fn is_connected(&self) -> bool {
        self.command(&[CMD_NOP]).is_ok()
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        self.command(INIT_SEQUENCE).context("SSD1306 init")?;
        self.buffer.fill(0);
        self.flush()?;
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    /// Clear the screen and show one line of text in the middle.
    pub fn show_centered_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.clear(BinaryColor::Off)?;
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let center = Point::new(SCREEN_WIDTH as i32 / 2, SCREEN_HEIGHT as i32 / 2);
        Text::with_alignment(text, center, style, Alignment::Center).draw(self)?;
        self.flush()
    }

    /// Boot self-test result, one line per component.
    pub fn show_boot_status(&mut self, oled_ok: bool, imu_ok: bool) -> anyhow::Result<()> {
        self.clear(BinaryColor::Off)?;
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let verdict = |ok: bool| if ok { "OK" } else { "FAIL" };
        let lines = [
            format!("OLED    {}", verdict(oled_ok)),
            format!("MPU6050 {}", verdict(imu_ok)),
        ];
        for (row, line) in lines.iter().enumerate() {
            Text::new(line, Point::new(16, 24 + row as i32 * 14), style).draw(self)?;
        }
        self.flush()
    }

    fn command(&self, bytes: &[u8]) -> anyhow::Result<()> {
        let mut frame = Vec::with_capacity(bytes.len() + 1);
        frame.push(CONTROL_COMMAND);
        frame.extend_from_slice(bytes);
        lock(self.bus)?.write(I2C_ADDR_OLED, &frame, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }
}

impl OriginDimensions for OledDisplay {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for OledDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Clip: eyes slide partly off-screen at full offset.
            if point.x < 0
                || point.y < 0
                || point.x >= SCREEN_WIDTH as i32
                || point.y >= SCREEN_HEIGHT as i32
            {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            let index = x + (y / 8) * SCREEN_WIDTH as usize;
            let mask = 1u8 << (y % 8);
            if color.is_on() {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl Panel for OledDisplay {
    fn flush(&mut self) -> anyhow::Result<()> {
        self.command(FULL_WINDOW)?;

        let mut frame = [0u8; DISPLAY_BUFFER_SIZE + 1];
        frame[0] = CONTROL_DATA;
        frame[1..].copy_from_slice(&self.buffer);
        lock(self.bus)?
            .write(I2C_ADDR_OLED, &frame, I2C_TIMEOUT_TICKS)
            .context("SSD1306 frame write")?;
        Ok(())
    }
}
