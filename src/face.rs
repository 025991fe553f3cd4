// TiltFace - Face Animation State
//
// Goal values (`FaceTargets`) jump instantly when a gesture fires; the
// rendered geometry (`FaceGeometry`) creeps toward them one integer step per
// cycle.  The blink runs on its own timer.

use crate::config::*;

// ---------------------------------------------------------------------------
// Expression
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    #[default]
    Normal,
    Smile,
    Sad,
    Kawaii,
}

// ---------------------------------------------------------------------------
// Targets - written by the gesture classifier
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTargets {
    pub expression: Expression,
    pub offset_x: i32,
    pub eye_width: i32,
    pub eye_height: i32,
}

impl FaceTargets {
    pub const BASE: Self = Self {
        expression: Expression::Normal,
        offset_x: BASE_OFFSET_X,
        eye_width: BASE_EYE_WIDTH,
        eye_height: BASE_EYE_HEIGHT,
    };

    /// Back to the resting face.
    pub fn reset(&mut self) {
        *self = Self::BASE;
    }

    /// Grow (positive) or shrink (negative) both eye dimensions, clamped so
    /// the eyes stay drawable.
    pub fn resize_eyes(&mut self, delta: i32) {
        self.eye_width = (self.eye_width + delta).clamp(EYE_SIZE_MIN, EYE_SIZE_MAX);
        self.eye_height = (self.eye_height + delta).clamp(EYE_SIZE_MIN, EYE_SIZE_MAX);
    }
}

impl Default for FaceTargets {
    fn default() -> Self {
        Self::BASE
    }
}

// ---------------------------------------------------------------------------
// Interpolated geometry - owned by the renderer
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGeometry {
    pub offset_x: i32,
    pub eye_width: i32,
    pub eye_height: i32,
}

impl FaceGeometry {
    pub fn at(targets: &FaceTargets) -> Self {
        Self {
            offset_x: targets.offset_x,
            eye_width: targets.eye_width,
            eye_height: targets.eye_height,
        }
    }

    /// One interpolation step toward `targets`.
    pub fn advance(&mut self, targets: &FaceTargets) {
        self.offset_x = approach(self.offset_x, targets.offset_x, OFFSET_SPEED);
        self.eye_width = approach(self.eye_width, targets.eye_width, SIZE_SPEED);
        self.eye_height = approach(self.eye_height, targets.eye_height, SIZE_SPEED);
    }
}

/// `current + (target - current) / speed`, truncating toward zero.
///
/// Once the gap is smaller than `speed` the step is zero, so the value parks
/// short of the target instead of overshooting.
pub fn approach(current: i32, target: i32, speed: i32) -> i32 {
    current + (target - current) / speed
}

// ---------------------------------------------------------------------------
// Blink
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkState {
    pub open: bool,
    last_toggle_ms: u32,
}

impl BlinkState {
    pub fn new(now_ms: u32) -> Self {
        Self {
            open: true,
            last_toggle_ms: now_ms,
        }
    }

    /// Toggle when the current phase has run its dwell.  Returns `true` on a
    /// toggle.
    pub fn update(&mut self, now_ms: u32) -> bool {
        let dwell = if self.open { BLINK_OPEN_MS } else { BLINK_CLOSED_MS };
        if now_ms.wrapping_sub(self.last_toggle_ms) < dwell {
            return false;
        }
        self.open = !self.open;
        self.last_toggle_ms = now_ms;
        true
    }

    /// Restart the open phase from `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.open = true;
        self.last_toggle_ms = now_ms;
    }
}
