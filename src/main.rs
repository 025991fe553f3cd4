// TiltFace - Firmware Entry Point
//
// Boot sequence:
//   1. Bring up the shared I2C bus and the SSD1306 OLED.
//   2. Run component self-test (OLED + MPU6050) and show the result.
//   3. If the MPU6050 is missing, report it and halt for good.
//   4. Spawn the face task: sensor → gesture → serial command → face redraw.

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

#[cfg(target_os = "espidf")]
use firmware::SystemClock;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("tiltface is ESP-IDF firmware; build it for riscv32imc-esp-espidf");
}

#[cfg(target_os = "espidf")]
mod firmware {
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use tiltface::config::*;
    use tiltface::hal::Clock;

    use crate::drivers::display::OledDisplay;
    use crate::drivers::imu::Mpu6050;
    use crate::drivers::SharedBus;
    use crate::tasks;

    // -----------------------------------------------------------------------
    // Utility: milliseconds since boot (wraps at ~49 days - fine for timeouts)
    // -----------------------------------------------------------------------
    pub fn now_ms() -> u32 {
        unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
    }

    /// ESP timer + FreeRTOS sleep.
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now_ms(&self) -> u32 {
            now_ms()
        }

        fn sleep_ms(&mut self, ms: u32) {
            thread::sleep(Duration::from_millis(ms as u64));
        }
    }

    // -----------------------------------------------------------------------
    // Main
    // -----------------------------------------------------------------------
    pub fn run() -> anyhow::Result<()> {
        // Link esp-idf-sys runtime patches and initialise logging.
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        log::info!("TiltFace firmware starting…");

        // ---- Peripherals --------------------------------------------------
        let peripherals = Peripherals::take()?;

        // ---- I2C bus (shared between OLED and MPU6050) --------------------
        let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
        let i2c: I2cDriver<'static> = I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio6, // SDA (D4)
            peripherals.pins.gpio7, // SCL (D5)
            &i2c_config,
        )?;
        // The bus lives for the whole programme (embedded firmware never exits).
        let i2c_bus: SharedBus = Box::leak(Box::new(Mutex::new(i2c)));

        // ---- Display ------------------------------------------------------
        let mut display = OledDisplay::new(i2c_bus);
        if let Err(e) = display.init() {
            log::error!("Display init failed: {:#}", e);
        }

        // ---- Component self-test ------------------------------------------
        let oled_ok = display.is_connected();
        let imu = Mpu6050::new(i2c_bus);
        let imu_ok = imu.is_connected();

        let _ = display.show_boot_status(oled_ok, imu_ok);
        thread::sleep(Duration::from_millis(BOOT_STATUS_DISPLAY_MS));

        if !imu_ok {
            halt(&mut display, "MPU6050 not found");
        }
        if let Err(e) = imu.init() {
            log::error!("MPU6050 init failed: {:#}", e);
            halt(&mut display, "MPU6050 init failed");
        }
        if !oled_ok {
            log::warn!("OLED not responding - commands still go out over serial");
        }

        log::info!("Boot complete - entering face loop");

        // ---- Face task ----------------------------------------------------
        thread::Builder::new()
            .name("face".into())
            .stack_size(STACK_FACE)
            .spawn(move || {
                tasks::face::face_task(imu, display);
            })?;

        // Main thread has nothing left to do - park it forever.
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }

    /// Sensor failure at boot is fatal: say so on serial and on screen, then
    /// stop.  Nothing is retried.
    fn halt(display: &mut OledDisplay, reason: &str) -> ! {
        log::error!("{} - halting", reason);
        let _ = display.show_centered_text(reason);
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }
}
