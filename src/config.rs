// TiltFace - Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)
// I2C: SDA = GPIO6 (D4), SCL = GPIO7 (D5).  Console baud rate lives in
// sdkconfig.defaults.

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_BAUDRATE_KHZ: u32 = 400;
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_FACE: usize = 8192;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const CYCLE_DELAY_MS: u32 = 20;                    // trailing loop delay (~50 Hz)
pub const BOOT_STATUS_DISPLAY_MS: u64 = 1000;          // self-test screen duration
pub const VOLUME_COOLDOWN_MS: u32 = 800;               // min gap between VOL_* commands
pub const BLINK_OPEN_MS: u32 = 3000;                   // eyes open dwell
pub const BLINK_CLOSED_MS: u32 = 150;                  // eyes closed dwell
pub const FLASH_COUNT: u32 = 3;                        // play/pause icon flashes
pub const FLASH_ON_MS: u32 = 120;
pub const FLASH_OFF_MS: u32 = 80;

// ---------------------------------------------------------------------------
// Gesture thresholds (m/s²)
// ---------------------------------------------------------------------------
pub const NEUTRAL_AXIS_LIMIT: f32 = 2.0;  // |ax|, |ay| below this → flat
pub const NEUTRAL_Z_MIN: f32 = 8.8;       // flat az band, exclusive
pub const NEUTRAL_Z_MAX: f32 = 10.8;
pub const VOLUME_TILT: f32 = 7.0;         // ±ay
pub const LIFT_Z: f32 = 10.8;             // az above this → lift
pub const TRACK_TILT: f32 = 5.0;          // ±ax

// ---------------------------------------------------------------------------
// Face geometry (pixels)
// ---------------------------------------------------------------------------
pub const BASE_OFFSET_X: i32 = 0;
pub const TRACK_OFFSET: i32 = 40;
pub const BASE_EYE_WIDTH: i32 = 28;
pub const BASE_EYE_HEIGHT: i32 = 28;
pub const EYE_SIZE_STEP: i32 = 15;
pub const EYE_SIZE_MIN: i32 = 10;
pub const EYE_SIZE_MAX: i32 = 43;           // base + one step; spans y 1..43, clear of the mouth
pub const LEFT_EYE_X: i32 = 40;           // eye centres
pub const RIGHT_EYE_X: i32 = 88;
pub const EYE_Y: i32 = 22;
pub const EYE_SLIT_HEIGHT: u32 = 4;
pub const MOUTH_X: i32 = 64;              // mouth centre
pub const MOUTH_Y: i32 = 54;
pub const MOUTH_BOX_WIDTH: u32 = 40;      // covers every mouth shape
pub const MOUTH_BOX_HEIGHT: u32 = 20;

// ---------------------------------------------------------------------------
// Interpolation divisors
// ---------------------------------------------------------------------------
pub const OFFSET_SPEED: i32 = 4;
pub const SIZE_SPEED: i32 = 3;

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_8G: f32 = 4096.0;   // LSB/g  at ±8 g
pub const GYRO_SCALE_500: f32 = 65.5;     // LSB/°/s at ±500 °/s
pub const STANDARD_GRAVITY: f32 = 9.80665;
pub const TEMP_SCALE: f32 = 340.0;        // LSB/°C
pub const TEMP_OFFSET_C: f32 = 36.53;
