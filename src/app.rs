// TiltFace - One Loop Cycle
//
// read sample → classify → send command → advance + redraw face.
// Track and play/pause gestures end the cycle before the face is touched;
// play/pause first runs the blocking icon flash.

use crate::events::Command;
use crate::face::FaceTargets;
use crate::gesture::{self, GestureState};
use crate::hal::{Clock, CommandLink, Panel, Sensor};
use crate::render::FaceRenderer;

/// What happened during one `App::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub command: Option<Command>,
    pub redrawn: bool,
}

pub struct App {
    gesture: GestureState,
    targets: FaceTargets,
    renderer: FaceRenderer,
}

impl App {
    pub fn new(now_ms: u32) -> Self {
        let targets = FaceTargets::BASE;
        Self {
            gesture: GestureState::new(),
            renderer: FaceRenderer::new(&targets, now_ms),
            targets,
        }
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn targets(&self) -> &FaceTargets {
        &self.targets
    }

    pub fn renderer(&self) -> &FaceRenderer {
        &self.renderer
    }

    /// Redraw everything next cycle, e.g. after the panel lost a frame.
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }

    pub fn step<S, D, L, C>(
        &mut self,
        sensor: &mut S,
        display: &mut D,
        link: &mut L,
        clock: &mut C,
    ) -> anyhow::Result<Cycle>
    where
        S: Sensor,
        D: Panel,
        L: CommandLink,
        C: Clock,
    {
        let sample = sensor.read_sample()?;
        log::trace!(
            "a=({:.2}, {:.2}, {:.2}) g=({:.2}, {:.2}, {:.2}) t={:.1}",
            sample.ax, sample.ay, sample.az, sample.gx, sample.gy, sample.gz, sample.temp_c
        );

        let command = gesture::classify(
            &mut self.gesture,
            &mut self.targets,
            &sample,
            clock.now_ms(),
        );

        if let Some(cmd) = command {
            log::debug!("Gesture → {}", cmd);
            // Commands are fire-and-forget; a lost line is not retried.
            if let Err(e) = link.send(cmd) {
                log::warn!("Serial write of {} failed: {:#}", cmd, e);
            }

            if cmd == Command::PlayPause {
                self.renderer.play_pause_flash(display, clock)?;
            }
            if cmd.is_latching() {
                return Ok(Cycle {
                    command,
                    redrawn: false,
                });
            }
        }

        self.renderer.advance(&self.targets);
        let redrawn = self.renderer.render(display, &self.targets, clock.now_ms())?;
        Ok(Cycle { command, redrawn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;
    use crate::events::Sample;
    use crate::face::Expression;
    use crate::testing::{FakeClock, FakePanel, RecordingLink, ScriptedSensor};

    struct Rig {
        app: App,
        sensor: ScriptedSensor,
        panel: FakePanel,
        link: RecordingLink,
        clock: FakeClock,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                app: App::new(1000),
                sensor: ScriptedSensor::default(),
                panel: FakePanel::new(),
                link: RecordingLink::default(),
                clock: FakeClock::at(1000),
            }
        }

        fn cycle(&mut self, sample: Sample) -> Cycle {
            self.sensor.push(sample);
            let cycle = self
                .app
                .step(&mut self.sensor, &mut self.panel, &mut self.link, &mut self.clock)
                .unwrap();
            self.clock.now += CYCLE_DELAY_MS;
            cycle
        }
    }

    const FLAT: Sample = Sample::accel(0.0, 0.0, 9.8);

    #[test]
    fn flat_device_draws_once_then_idles() {
        let mut rig = Rig::new();
        assert_eq!(
            rig.cycle(FLAT),
            Cycle {
                command: None,
                redrawn: true
            }
        );
        let writes = rig.panel.pixel_writes;
        for _ in 0..10 {
            assert!(!rig.cycle(FLAT).redrawn);
        }
        assert_eq!(rig.panel.pixel_writes, writes);
        assert!(rig.link.sent.is_empty());
    }

    #[test]
    fn vol_up_sends_and_animates_smile() {
        let mut rig = Rig::new();
        let cycle = rig.cycle(Sample::accel(0.0, 12.0, 9.8));
        assert_eq!(cycle.command, Some(Command::VolUp));
        assert!(cycle.redrawn);
        assert_eq!(rig.link.sent, [Command::VolUp]);
        assert_eq!(rig.app.targets().expression, Expression::Smile);
        assert_eq!(rig.app.targets().eye_width, BASE_EYE_WIDTH - 15);
        assert_eq!(rig.app.renderer().geometry().eye_width, BASE_EYE_WIDTH - 5);
    }

    #[test]
    fn next_latches_and_skips_render_that_cycle() {
        let mut rig = Rig::new();
        rig.cycle(FLAT);
        let flushes = rig.panel.flushes;

        let right = Sample::accel(6.0, 0.0, 9.8);
        let cycle = rig.cycle(right);
        assert_eq!(cycle.command, Some(Command::Next));
        assert!(!cycle.redrawn);
        assert_eq!(rig.panel.flushes, flushes);
        assert_eq!(rig.app.targets().offset_x, 40);
        assert!(rig.app.gesture().track_latched);

        // Latched: no command, face glides toward the new offset.
        let cycle = rig.cycle(right);
        assert_eq!(cycle.command, None);
        assert!(cycle.redrawn);
        assert_eq!(rig.app.renderer().geometry().offset_x, 10);

        rig.cycle(FLAT);
        assert!(!rig.app.gesture().track_latched);
        assert_eq!(rig.cycle(right).command, Some(Command::Next));
        assert_eq!(rig.link.sent, [Command::Next, Command::Next]);
    }

    #[test]
    fn lift_flashes_and_forces_full_redraw() {
        let mut rig = Rig::new();
        rig.cycle(FLAT);
        let before = rig.clock.now;

        let lift = Sample::accel(0.0, 0.0, 11.0);
        let cycle = rig.cycle(lift);
        assert_eq!(cycle.command, Some(Command::PlayPause));
        assert!(!cycle.redrawn);
        assert!(rig.app.gesture().track_latched);
        assert_eq!(rig.clock.sleeps.len(), 2 * FLASH_COUNT as usize);
        assert_eq!(
            rig.clock.now - before,
            FLASH_COUNT * (FLASH_ON_MS + FLASH_OFF_MS) + CYCLE_DELAY_MS
        );
        assert_eq!(rig.panel.lit_count(), 0);

        // Nothing moved, but the screen was wiped: the face comes back.
        let cycle = rig.cycle(lift);
        assert_eq!(cycle.command, None);
        assert!(cycle.redrawn);
        assert!(rig.panel.is_on(LEFT_EYE_X, EYE_Y));
        assert!(!rig.cycle(lift).redrawn);
    }

    #[test]
    fn link_failure_does_not_stall_the_face() {
        let mut rig = Rig::new();
        rig.link.fail = true;
        let cycle = rig.cycle(Sample::accel(0.0, -12.0, 9.8));
        assert_eq!(cycle.command, Some(Command::VolDown));
        assert!(cycle.redrawn);
        assert_eq!(rig.app.targets().expression, Expression::Sad);
    }

    #[test]
    fn sensor_fault_propagates_without_touching_state() {
        let mut rig = Rig::new();
        let err = rig
            .app
            .step(&mut rig.sensor, &mut rig.panel, &mut rig.link, &mut rig.clock)
            .unwrap_err();
        assert!(err.to_string().contains("no sample"));
        assert_eq!(rig.panel.flushes, 0);
        assert_eq!(*rig.app.gesture(), GestureState::new());
    }

    #[test]
    fn invalidate_forces_redraw() {
        let mut rig = Rig::new();
        rig.cycle(FLAT);
        assert!(!rig.cycle(FLAT).redrawn);
        rig.app.invalidate();
        assert!(rig.cycle(FLAT).redrawn);
    }
}
