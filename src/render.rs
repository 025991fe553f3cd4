// TiltFace - Face Renderer
//
// Two eyes and a mouth on the OLED.  A frame is only redrawn when something
// visible changed; the previous frame is wiped by painting its bounding
// boxes in the background colour before the new shapes go down.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};

use crate::config::*;
use crate::face::{BlinkState, Expression, FaceGeometry, FaceTargets};
use crate::hal::{Clock, Panel};

const FG: BinaryColor = BinaryColor::On;
const BG: BinaryColor = BinaryColor::Off;

/// What was on the glass after the last redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    offset_x: i32,
    eye_width: i32,
    eye_height: i32,
    eye_open: bool,
    expression: Expression,
}

pub struct FaceRenderer {
    geometry: FaceGeometry,
    blink: BlinkState,
    previous: Snapshot,
    stale: bool,
}

impl FaceRenderer {
    /// Start resting at `targets`.  The first `render` always draws.
    pub fn new(targets: &FaceTargets, now_ms: u32) -> Self {
        let geometry = FaceGeometry::at(targets);
        let blink = BlinkState::new(now_ms);
        Self {
            geometry,
            blink,
            previous: Snapshot {
                offset_x: geometry.offset_x,
                eye_width: geometry.eye_width,
                eye_height: geometry.eye_height,
                eye_open: blink.open,
                expression: targets.expression,
            },
            stale: true,
        }
    }

    pub fn geometry(&self) -> FaceGeometry {
        self.geometry
    }

    pub fn eyes_open(&self) -> bool {
        self.blink.open
    }

    /// Force the next `render` to redraw even if nothing moved.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Step the interpolated geometry toward `targets`.
    pub fn advance(&mut self, targets: &FaceTargets) {
        self.geometry.advance(targets);
    }

    // Eye height is deliberately absent: a pure height change waits for the
    // next width/offset/blink/expression change to show up.
    fn is_dirty(&self, expression: Expression) -> bool {
        self.stale
            || self.geometry.offset_x != self.previous.offset_x
            || self.blink.open != self.previous.eye_open
            || expression != self.previous.expression
            || self.geometry.eye_width != self.previous.eye_width
    }

    /// Tick the blink and redraw if anything visible changed.  Returns
    /// whether a frame went out.
    pub fn render<D: Panel>(
        &mut self,
        display: &mut D,
        targets: &FaceTargets,
        now_ms: u32,
    ) -> anyhow::Result<bool> {
        self.blink.update(now_ms);
        if !self.is_dirty(targets.expression) {
            return Ok(false);
        }

        // Erase pass.
        let prev = self.previous;
        for eye_x in [LEFT_EYE_X, RIGHT_EYE_X] {
            let center = Point::new(eye_x + prev.offset_x, EYE_Y);
            eye_box(center, prev.eye_width, prev.eye_height, prev.eye_open)
                .into_styled(PrimitiveStyle::with_fill(BG))
                .draw(display)?;
        }
        Rectangle::with_center(
            Point::new(MOUTH_X + prev.offset_x, MOUTH_Y),
            Size::new(MOUTH_BOX_WIDTH, MOUTH_BOX_HEIGHT),
        )
        .into_styled(PrimitiveStyle::with_fill(BG))
        .draw(display)?;

        // Draw pass.
        let geo = self.geometry;
        for eye_x in [LEFT_EYE_X, RIGHT_EYE_X] {
            let center = Point::new(eye_x + geo.offset_x, EYE_Y);
            draw_eye(display, center, geo.eye_width, geo.eye_height, self.blink.open)?;
        }
        draw_mouth(
            display,
            Point::new(MOUTH_X + geo.offset_x, MOUTH_Y),
            targets.expression,
        )?;

        self.previous = Snapshot {
            offset_x: geo.offset_x,
            eye_width: geo.eye_width,
            eye_height: geo.eye_height,
            eye_open: self.blink.open,
            expression: targets.expression,
        };
        self.stale = false;

        display.flush()?;
        Ok(true)
    }

    /// Blocking play/pause feedback: flash the icon `FLASH_COUNT` times on a
    /// blank screen, then leave the screen blank with the eyes open and the
    /// face marked stale.
    pub fn play_pause_flash<D: Panel, C: Clock>(
        &mut self,
        display: &mut D,
        clock: &mut C,
    ) -> anyhow::Result<()> {
        display.clear(BG)?;
        display.flush()?;

        for _ in 0..FLASH_COUNT {
            draw_play_pause_icon(display)?;
            display.flush()?;
            clock.sleep_ms(FLASH_ON_MS);

            display.clear(BG)?;
            display.flush()?;
            clock.sleep_ms(FLASH_OFF_MS);
        }

        self.blink.reset(clock.now_ms());
        self.stale = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

fn px(v: i32) -> u32 {
    v.max(0) as u32
}

/// Bounding box of one eye: the full box when open, the slit when closed.
fn eye_box(center: Point, width: i32, height: i32, open: bool) -> Rectangle {
    let height = if open { px(height) } else { EYE_SLIT_HEIGHT };
    Rectangle::with_center(center, Size::new(px(width), height))
}

fn draw_eye<D: Panel>(
    display: &mut D,
    center: Point,
    width: i32,
    height: i32,
    open: bool,
) -> anyhow::Result<()> {
    let bounds = eye_box(center, width, height, open);
    let fill = PrimitiveStyle::with_fill(FG);
    if open {
        let r = px(height) / 4;
        RoundedRectangle::with_equal_corners(bounds, Size::new(r, r))
            .into_styled(fill)
            .draw(display)?;
    } else {
        bounds.into_styled(fill).draw(display)?;
    }
    Ok(())
}

fn rounded(center: Point, size: Size, radius: u32) -> RoundedRectangle {
    RoundedRectangle::with_equal_corners(
        Rectangle::with_center(center, size),
        Size::new(radius, radius),
    )
}

fn draw_mouth<D: Panel>(display: &mut D, center: Point, expression: Expression) -> anyhow::Result<()> {
    let fg = PrimitiveStyle::with_fill(FG);
    let bg = PrimitiveStyle::with_fill(BG);
    let crescent = Size::new(28, 12);

    match expression {
        Expression::Normal => {
            rounded(center + Point::new(0, 2), Size::new(20, 6), 3)
                .into_styled(fg)
                .draw(display)?;
        }
        Expression::Smile => {
            rounded(center, crescent, 6).into_styled(fg).draw(display)?;
            rounded(center - Point::new(0, 4), crescent, 6)
                .into_styled(bg)
                .draw(display)?;
        }
        // Foreground first, then the background bite below: a frown.
        Expression::Sad => {
            rounded(center, crescent, 6).into_styled(fg).draw(display)?;
            rounded(center + Point::new(0, 4), crescent, 6)
                .into_styled(bg)
                .draw(display)?;
        }
        Expression::Kawaii => {
            for (dx, dy) in [(-9, 1), (0, -3), (9, 1)] {
                Circle::with_center(center + Point::new(dx, dy), 9)
                    .into_styled(fg)
                    .draw(display)?;
            }
        }
    }
    Ok(())
}

fn draw_play_pause_icon<D: Panel>(display: &mut D) -> anyhow::Result<()> {
    let fill = PrimitiveStyle::with_fill(FG);
    let cx = SCREEN_WIDTH as i32 / 2;
    let cy = SCREEN_HEIGHT as i32 / 2;

    Triangle::new(
        Point::new(cx - 22, cy - 14),
        Point::new(cx - 22, cy + 14),
        Point::new(cx, cy),
    )
    .into_styled(fill)
    .draw(display)?;
    for x in [cx + 6, cx + 16] {
        Rectangle::new(Point::new(x, cy - 14), Size::new(6, 29))
            .into_styled(fill)
            .draw(display)?;
    }
    Ok(())
}
