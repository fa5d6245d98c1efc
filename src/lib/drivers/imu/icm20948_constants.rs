// ICM-20948 registers, bit masks and configuration selectors.
// Only the registers the compass needs are listed.

pub const REG_BANK_SEL: u8 = 0x7F;

pub mod bank0 {
    pub const WHO_AM_I: u8 = 0x00;
    pub const USER_CTRL: u8 = 0x03;
    pub const PWR_MGMT_1: u8 = 0x06;
    pub const INT_PIN_CFG: u8 = 0x0F;
    pub const INT_ENABLE_1: u8 = 0x11;
    pub const I2C_MST_STATUS: u8 = 0x17;
    pub const INT_STATUS_1: u8 = 0x1A;
    pub const ACCEL_XOUT_H: u8 = 0x2D;
}

pub mod bank2 {
    pub const GYRO_SMPLRT_DIV: u8 = 0x00;
    pub const GYRO_CONFIG_1: u8 = 0x01;
    pub const ACCEL_SMPLRT_DIV_1: u8 = 0x10;
    pub const ACCEL_SMPLRT_DIV_2: u8 = 0x11;
    pub const ACCEL_CONFIG: u8 = 0x14;
}

pub mod bank3 {
    pub const I2C_MST_CTRL: u8 = 0x01;
    pub const I2C_PERIPH0_ADDR: u8 = 0x03;
    pub const I2C_PERIPH0_REG: u8 = 0x04;
    pub const I2C_PERIPH0_CTRL: u8 = 0x05;
    pub const I2C_PERIPH4_ADDR: u8 = 0x13;
    pub const I2C_PERIPH4_REG: u8 = 0x14;
    pub const I2C_PERIPH4_CTRL: u8 = 0x15;
    pub const I2C_PERIPH4_DO: u8 = 0x16;
    pub const I2C_PERIPH4_DI: u8 = 0x17;
}

// AK09916 magnetometer, reached through the auxiliary I2C master
pub mod mag {
    pub const WIA1: u8 = 0x00;
    pub const WIA2: u8 = 0x01;
    pub const ST1: u8 = 0x10;
    pub const CNTL2: u8 = 0x31;
    pub const CNTL3: u8 = 0x32;

    pub const ST1_DRDY: u8 = 0x01;
    pub const ST2_HOFL: u8 = 0x08;
    pub const CNTL3_SRST: u8 = 0x01;
}

// PWR_MGMT_1: | DEVICE_RESET | SLEEP | LP_EN | - | TEMP_DIS | CLKSEL[2:0] |
pub const PWR_MGMT_1_DEVICE_RESET: u8 = 1 << 7;
pub const PWR_MGMT_1_SLEEP: u8 = 1 << 6;
pub const PWR_MGMT_1_LP_EN: u8 = 1 << 5;

// ACCEL_CONFIG / GYRO_CONFIG_1: | - | - | DLPFCFG[2:0] | FS_SEL[1:0] | FCHOICE |
pub const CONFIG_FCHOICE: u8 = 1 << 0;
pub const CONFIG_FS_SEL: u8 = 0x03 << 1;
pub const CONFIG_DLPFCFG: u8 = 0x07 << 3;

// INT_PIN_CFG: | INT1_ACTL | INT1_OPEN | INT1_LATCH_EN | INT_ANYRD_2CLEAR | ACTL_FSYNC | FSYNC_INT_MODE_EN | BYPASS_EN | - |
pub const INT_PIN_CFG_BYPASS_EN: u8 = 1 << 1;
pub const INT_PIN_CFG_ANYRD_2CLEAR: u8 = 1 << 4;
pub const INT_PIN_CFG_INT1_LATCH_EN: u8 = 1 << 5;
pub const INT_PIN_CFG_INT1_OPEN: u8 = 1 << 6;
pub const INT_PIN_CFG_INT1_ACTL: u8 = 1 << 7;

pub const INT_ENABLE_1_RAW_DATA_0_RDY: u8 = 1 << 0;
pub const INT_STATUS_1_RAW_DATA_0_RDY: u8 = 1 << 0;

// USER_CTRL: | DMP_EN | FIFO_EN | I2C_MST_EN | I2C_IF_DIS | DMP_RST | SRAM_RST | I2C_MST_RST | - |
pub const USER_CTRL_I2C_MST_RST: u8 = 1 << 1;
pub const USER_CTRL_I2C_MST_EN: u8 = 1 << 5;

// I2C_MST_CTRL: | MULT_MST_EN | - | - | I2C_MST_P_NSR | I2C_MST_CLK[3:0] |
pub const I2C_MST_CTRL_P_NSR: u8 = 1 << 4;
pub const I2C_MST_CLK_345KHZ: u8 = 0x07;

pub const PERIPH_CTRL_EN: u8 = 1 << 7;
pub const PERIPH_ADDR_READ: u8 = 1 << 7;

pub const I2C_MST_STATUS_PERIPH4_NACK: u8 = 1 << 4;
pub const I2C_MST_STATUS_PERIPH4_DONE: u8 = 1 << 6;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MagMode {
    PowerDown = 0x00,
    Single = 0x01,
    Continuous10Hz = 0x02,
    Continuous20Hz = 0x04,
    Continuous50Hz = 0x06,
    Continuous100Hz = 0x08,
    SelfTest = 0x10,
}

// Gyro full scale range in degrees per second
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GyroFullScaleSel {
    Dps250 = 0x00,
    Dps500 = 0x01,
    Dps1000 = 0x02,
    Dps2000 = 0x03,
}

// Gyro digital low pass filter, named by 3dB bandwidth in Hz
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GyroDLPFSel {
    Bw196 = 0x00,
    Bw152 = 0x01,
    Bw120 = 0x02,
    Bw51 = 0x03,
    Bw24 = 0x04,
    Bw12 = 0x05,
    Bw6 = 0x06,
    Bw361 = 0x07,
    Disable = 0xFF,
}

// Accel full scale range in G's (plus or minus)
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccelFullScaleSel {
    Gpm2 = 0x00,
    Gpm4 = 0x01,
    Gpm8 = 0x02,
    Gpm16 = 0x03,
}

// Accel digital low pass filter, named by 3dB bandwidth in Hz
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccelDLPFSel {
    Bw246 = 0x01,
    Bw111 = 0x02,
    Bw50 = 0x03,
    Bw24 = 0x04,
    Bw12 = 0x05,
    Bw6 = 0x06,
    Bw473 = 0x07,
    Disable = 0xFF,
}

impl AccelFullScaleSel {
    // LSB per g
    pub fn sensitivity(self) -> f32 {
        match self {
            AccelFullScaleSel::Gpm2 => 16_384.0,
            AccelFullScaleSel::Gpm4 => 8_192.0,
            AccelFullScaleSel::Gpm8 => 4_096.0,
            AccelFullScaleSel::Gpm16 => 2_048.0,
        }
    }
}

impl GyroFullScaleSel {
    // LSB per degree per second
    pub fn sensitivity(self) -> f32 {
        match self {
            GyroFullScaleSel::Dps250 => 131.0,
            GyroFullScaleSel::Dps500 => 65.5,
            GyroFullScaleSel::Dps1000 => 32.8,
            GyroFullScaleSel::Dps2000 => 16.4,
        }
    }
}

pub const ICM_20948_WHO_AM_I: u8 = 0xEA;
pub const MAG_I2C_ADDR: u8 = 0x0C;
pub const MAG_WHO_AM_I: u16 = 0x4809;
// internal sample rate of accel and gyro with their DLPF enabled, divided by 1 + SMPLRT_DIV
pub const BASE_SAMPLE_RATE_HZ: f32 = 1125.0;

pub const MAG_SCALE_UT: f32 = 0.15; // micro Teslas per LSB
pub const MAX_MAGNETOMETER_STARTS: u32 = 10;
pub const MAX_PERIPH4_POLLS: u32 = 1000;

// accel (6) + gyro (6) + temp (2) + mag ST1..ST2 (9)
pub const RAW_DATA_NUM_BYTES: usize = 23;
