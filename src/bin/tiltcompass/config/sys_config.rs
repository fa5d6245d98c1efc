use tiltcompass::drivers::imu::icm20948::{
    AccelDLPFSel, AccelFullScaleSel, GyroDLPFSel, GyroFullScaleSel, ImuConfig, MagMode,
};

// The poll task consumes at most one frame per run. The IMU outputs 1125 / (1 + 10) = 102.3 Hz,
// slightly faster than the poll, so every run finds a frame and every 100 Hz magnetometer
// sample is mirrored before the next poll.
// These rates are not critical to get exactly right but they shift the filter cutoffs.
pub const POLL_PERIOD_MS: u64 = 10;
pub const IMU_SAMPLE_RATE_DIV: u8 = 10;
pub const IMU_SAMPLE_RATE_HZ: f32 = 100.0;
pub const MAG_SAMPLE_RATE_HZ: f32 = 100.0;

// A passband above ~3.5 Hz gives a noisy heading, very low passbands respond slowly.
pub const PASSBAND_HZ: f32 = 2.0;

// Local magnetic declination in degrees.
// See: https://www.ngdc.noaa.gov/geomag/calculators/magcalc.shtml#declination
pub const HEADING_DECLINATION_DEG: f32 = 8.0 + 9.0 / 60.0;

// Calibration offsets are measured per board by fitting a sphere to raw readings.
// Offsets are the fitted centre, the scale maps the sphere to radius 1.
pub const ACCEL_OFFSET: (f32, f32, f32) = (0.025065, 0.012438, 0.018101);
pub const ACCEL_SCALE: f32 = 0.997446;
pub const MAG_OFFSET: (f32, f32, f32) = (29.363654, 7.947678, 84.274158);
pub const MAG_SCALE: f32 = 0.027106;
// set when the board mounts the sensor with a reversed magnetometer x axis
pub const MAG_INVERT_X: bool = false;

pub const IMU_CONFIG: ImuConfig = ImuConfig {
    accel_fss: AccelFullScaleSel::Gpm2,
    accel_dlpf: AccelDLPFSel::Bw24,
    gyro_fss: GyroFullScaleSel::Dps250,
    gyro_dlpf: GyroDLPFSel::Bw51,
    mag_mode: MagMode::Continuous100Hz,
    sample_rate_div: IMU_SAMPLE_RATE_DIV,
};

pub const SERIAL_BAUD: u32 = 500_000;
pub const SYSCLK_HZ: u32 = 48_000_000;
