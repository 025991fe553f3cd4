// TiltFace - Sensor Samples & Serial Commands

// ---------------------------------------------------------------------------
// Sensor Data (one MPU6050 burst, physical units)
// ---------------------------------------------------------------------------

/// Acceleration in m/s², angular rate in rad/s, die temperature in °C.
/// Only the acceleration axes feed the gesture logic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
    pub temp_c: f32,
}

impl Sample {
    /// Acceleration-only sample; gyro and temperature read as zero.
    pub const fn accel(ax: f32, ay: f32, az: f32) -> Self {
        Self {
            ax,
            ay,
            az,
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
            temp_c: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Serial Commands - one newline-terminated token per line
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Next,
    Prev,
    VolUp,
    VolDown,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Self::PlayPause,
        Self::Next,
        Self::Prev,
        Self::VolUp,
        Self::VolDown,
    ];

    /// Wire token, without the trailing newline.
    pub fn token(&self) -> &'static str {
        match self {
            Self::PlayPause => "PLAY_PAUSE",
            Self::Next      => "NEXT",
            Self::Prev      => "PREV",
            Self::VolUp     => "VOL_UP",
            Self::VolDown   => "VOL_DOWN",
        }
    }

    /// Parse one received line. Surrounding whitespace (including the line
    /// terminator) and letter case are ignored; anything else is `None`.
    pub fn from_token(line: &str) -> Option<Self> {
        let line = line.trim();
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.token().eq_ignore_ascii_case(line))
    }

    /// Track and play/pause commands end the cycle and arm the latch.
    pub fn is_latching(&self) -> bool {
        matches!(self, Self::PlayPause | Self::Next | Self::Prev)
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_the_wire_names() {
        let tokens: Vec<&str> = Command::ALL.iter().map(Command::token).collect();
        assert_eq!(tokens, ["PLAY_PAUSE", "NEXT", "PREV", "VOL_UP", "VOL_DOWN"]);
    }

    #[test]
    fn parses_terminated_and_lowercase_lines() {
        assert_eq!(Command::from_token("NEXT\n"), Some(Command::Next));
        assert_eq!(Command::from_token("  vol_down\r\n"), Some(Command::VolDown));
        assert_eq!(Command::from_token("Play_Pause"), Some(Command::PlayPause));
    }

    #[test]
    fn unknown_lines_are_ignored() {
        assert_eq!(Command::from_token(""), None);
        assert_eq!(Command::from_token("VOL_SET:40"), None);
        assert_eq!(Command::from_token("I (312) tiltface: boot"), None);
    }

    #[test]
    fn only_track_and_play_pause_latch() {
        assert!(Command::PlayPause.is_latching());
        assert!(Command::Next.is_latching());
        assert!(Command::Prev.is_latching());
        assert!(!Command::VolUp.is_latching());
        assert!(!Command::VolDown.is_latching());
    }
}
