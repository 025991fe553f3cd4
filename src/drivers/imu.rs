// TiltFace - MPU6050 IMU Driver
//
// Custom register-level driver over shared I2C bus.
// Avoids external crate version conflicts with esp-idf-hal.

use anyhow::Context;

use tiltface::config::*;
use tiltface::hal::Sensor;
use tiltface::Sample;

use super::{lock, SharedBus};

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 14-byte sensor burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

pub struct Mpu6050 {
    bus: SharedBus,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let Ok(mut bus) = lock(self.bus) else {
            return false;
        };
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Wake the sensor and configure accel (±8 g), gyro (±500 °/s), DLPF 21 Hz.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = lock(self.bus)?;

        // Wake up (clear SLEEP bit)
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)
            .context("MPU6050 wake")?;

        // DLPF bandwidth 21 Hz
        bus.write(I2C_ADDR_MPU6050, &[REG_CONFIG, 0x04], I2C_TIMEOUT_TICKS)?;

        // Gyroscope: ±500 °/s
        bus.write(I2C_ADDR_MPU6050, &[REG_GYRO_CONFIG, 0x08], I2C_TIMEOUT_TICKS)?;

        // Accelerometer: ±8 g
        bus.write(I2C_ADDR_MPU6050, &[REG_ACCEL_CONFIG, 0x10], I2C_TIMEOUT_TICKS)?;

        log::info!("MPU6050 initialised (±8g, ±500°/s, DLPF 21Hz)");
        Ok(())
    }

    /// Burst-read accel, temperature and gyro and convert to physical units.
    pub fn read_data(&self) -> anyhow::Result<Sample> {
        let mut bus = lock(self.bus)?;
        let mut raw = [0u8; 14];
        bus.write_read(
            I2C_ADDR_MPU6050,
            &[REG_ACCEL_XOUT_H],
            &mut raw,
            I2C_TIMEOUT_TICKS,
        )
        .context("MPU6050 burst read")?;
        drop(bus);

        Ok(decode_burst(&raw))
    }
}

impl Sensor for Mpu6050 {
    fn read_sample(&mut self) -> anyhow::Result<Sample> {
        self.read_data()
    }
}

fn word(raw: &[u8; 14], at: usize) -> f32 {
    i16::from_be_bytes([raw[at], raw[at + 1]]) as f32
}

/// 14-byte burst: accel XYZ, temperature, gyro XYZ, big-endian words.
fn decode_burst(raw: &[u8; 14]) -> Sample {
    let accel = |at| word(raw, at) / ACCEL_SCALE_8G * STANDARD_GRAVITY;
    let gyro = |at| (word(raw, at) / GYRO_SCALE_500).to_radians();
    Sample {
        ax: accel(0),
        ay: accel(2),
        az: accel(4),
        temp_c: word(raw, 6) / TEMP_SCALE + TEMP_OFFSET_C,
        gx: gyro(8),
        gy: gyro(10),
        gz: gyro(12),
    }
}
