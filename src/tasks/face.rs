// TiltFace - Face Task
//
// The whole firmware loop: one sensor read, gesture classification and face
// redraw per cycle, paced by a fixed trailing delay.

use tiltface::config::*;
use tiltface::hal::Clock;
use tiltface::App;

use crate::drivers::display::OledDisplay;
use crate::drivers::imu::Mpu6050;
use crate::drivers::serial::ConsoleLink;
use crate::SystemClock;

pub fn face_task(mut imu: Mpu6050, mut display: OledDisplay) {
    log::info!("Face task started");

    let mut link = ConsoleLink::new();
    let mut clock = SystemClock;
    let mut app = App::new(clock.now_ms());

    loop {
        match app.step(&mut imu, &mut display, &mut link, &mut clock) {
            Ok(cycle) => {
                if let Some(cmd) = cycle.command {
                    log::info!("Sent {}", cmd);
                }
            }
            Err(e) => {
                // The frame may not have reached the panel; repaint next time.
                log::warn!("Cycle failed: {:#}", e);
                app.invalidate();
            }
        }

        clock.sleep_ms(CYCLE_DELAY_MS);
    }
}
