// TiltFace - Gesture Classifier
//
// Fixed-threshold classification of one accelerometer sample per cycle.
// Checks run in priority order: flat reset, volume tilt, lift, track tilt.
// At most one command leaves per cycle.

use crate::config::*;
use crate::events::{Command, Sample};
use crate::face::{Expression, FaceTargets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    /// Set by NEXT / PREV / PLAY_PAUSE, cleared only by a flat sample.
    pub track_latched: bool,
    /// Tick of the last VOL_* emission.
    pub last_vol_ms: u32,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    fn volume_ready(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_vol_ms) > VOLUME_COOLDOWN_MS
    }
}

/// Device lying flat: both tilt axes quiet and gravity on Z.
pub fn is_neutral(sample: &Sample) -> bool {
    sample.ax.abs() < NEUTRAL_AXIS_LIMIT
        && sample.ay.abs() < NEUTRAL_AXIS_LIMIT
        && sample.az > NEUTRAL_Z_MIN
        && sample.az < NEUTRAL_Z_MAX
}

/// Run one classification step, updating the latch, the volume cooldown and
/// the face targets.  Returns the command to send, if any.
pub fn classify(
    state: &mut GestureState,
    targets: &mut FaceTargets,
    sample: &Sample,
    now_ms: u32,
) -> Option<Command> {
    if is_neutral(sample) {
        if state.track_latched {
            log::debug!("Flat - latch released");
        }
        state.track_latched = false;
        targets.reset();
    }

    if state.volume_ready(now_ms) {
        if sample.ay > VOLUME_TILT {
            state.last_vol_ms = now_ms;
            targets.expression = Expression::Smile;
            targets.resize_eyes(-EYE_SIZE_STEP);
            return Some(Command::VolUp);
        }
        if sample.ay < -VOLUME_TILT {
            state.last_vol_ms = now_ms;
            targets.expression = Expression::Sad;
            targets.resize_eyes(EYE_SIZE_STEP);
            return Some(Command::VolDown);
        }
    }

    if state.track_latched {
        return None;
    }

    if sample.az > LIFT_Z {
        state.track_latched = true;
        return Some(Command::PlayPause);
    }

    if sample.ax > TRACK_TILT {
        state.track_latched = true;
        targets.offset_x = TRACK_OFFSET;
        return Some(Command::Next);
    }
    if sample.ax < -TRACK_TILT {
        state.track_latched = true;
        targets.offset_x = -TRACK_OFFSET;
        return Some(Command::Prev);
    }

    None
}
