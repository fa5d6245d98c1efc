// ICM-20948 IMU driver (SPI)
// Datasheet: https://invensense.tdk.com/wp-content/uploads/2021/10/DS-000189-ICM-20948-v1.5.pdf
//
// The AK09916 magnetometer is read by the ICM-20948 auxiliary I2C master: peripheral 0
// copies ST1..ST2 into the external sensor data registers after every accel/gyro sample, so
// a single burst read from ACCEL_XOUT_H returns accel, gyro and mag together.
//
// Reading ST2 clears DRDY, so the mirrored ST1 only shows DRDY on the first I2C master cycle
// after a new magnetometer sample. The sample rate divider keeps that cycle close to the
// magnetometer rate, and a frame whose mirrored field differs from the previous one is
// treated as a new sample too.

pub use crate::drivers::imu::icm20948_constants::*;

use crate::drivers::imu::motion_sensor::MotionSensor;
use crate::heading::vector::Vector3;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;

const READ_FLAG: u8 = 0x80;
const RESET_DELAY_US: u32 = 2_000;
const MAG_READ_LENGTH: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParamError,
    SpiError,
    WrongID,
    MagError,
    MagWrongID,
    CSError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImuConfig {
    pub accel_fss: AccelFullScaleSel,
    pub accel_dlpf: AccelDLPFSel,
    pub gyro_fss: GyroFullScaleSel,
    pub gyro_dlpf: GyroDLPFSel,
    pub mag_mode: MagMode,
    // output data rate is BASE_SAMPLE_RATE_HZ / (1 + sample_rate_div), needs the DLPFs enabled
    pub sample_rate_div: u8,
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            accel_fss: AccelFullScaleSel::Gpm2,
            accel_dlpf: AccelDLPFSel::Disable,
            gyro_fss: GyroFullScaleSel::Dps250,
            gyro_dlpf: GyroDLPFSel::Disable,
            mag_mode: MagMode::Continuous100Hz,
            sample_rate_div: 0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RawAxes {
    x: i16,
    y: i16,
    z: i16,
}

impl RawAxes {
    fn big_endian(buf: &[u8]) -> Self {
        Self {
            x: i16::from_be_bytes([buf[0], buf[1]]),
            y: i16::from_be_bytes([buf[2], buf[3]]),
            z: i16::from_be_bytes([buf[4], buf[5]]),
        }
    }

    fn little_endian(buf: &[u8]) -> Self {
        Self {
            x: i16::from_le_bytes([buf[0], buf[1]]),
            y: i16::from_le_bytes([buf[2], buf[3]]),
            z: i16::from_le_bytes([buf[4], buf[5]]),
        }
    }

    fn scaled(&self, divisor: f32) -> Vector3<f32> {
        (
            self.x as f32 / divisor,
            self.y as f32 / divisor,
            self.z as f32 / divisor,
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RawFrame {
    accel: RawAxes,
    gyro: RawAxes,
    mag: RawAxes,
    mag_stat1: u8,
    mag_stat2: u8,
}

struct SpiDevice<SPI, CS> {
    bus: SPI,
    cs: CS,
}

impl<SPI, CS> SpiDevice<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    // full duplex, `data` is overwritten with what the sensor clocked out
    fn transfer(&mut self, data: &mut [u8]) -> Result<(), ErrorCode> {
        self.cs.set_low().map_err(|_| ErrorCode::CSError)?;
        let res = self.bus.transfer(data).map(|_| ());
        self.cs.set_high().map_err(|_| ErrorCode::CSError)?;
        res.map_err(|_| ErrorCode::SpiError)
    }
}

pub struct ICM20948<SPI, CS> {
    spi: SpiDevice<SPI, CS>,
    curr_bank: u8,
    raw: RawFrame,
    config: ImuConfig,
    mag_fresh: bool,
}

impl<SPI, CS> ICM20948<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    pub fn new(spi_bus: SPI, cs: CS) -> Self {
        Self {
            spi: SpiDevice { bus: spi_bus, cs },
            curr_bank: u8::MAX,
            raw: RawFrame::default(),
            config: ImuConfig::default(),
            mag_fresh: false,
        }
    }

    pub fn release(self) -> (SPI, CS) {
        (self.spi.bus, self.spi.cs)
    }

    pub fn init<D: DelayUs<u32>>(&mut self, delay: &mut D, config: ImuConfig) -> Result<(), ErrorCode> {
        self.check_id()?;
        self.sw_reset()?;
        delay.delay_us(RESET_DELAY_US);
        self.sleep(false)?;
        self.set_low_power(false)?;

        let mut mag_result = Err(ErrorCode::MagError);
        for _ in 0..MAX_MAGNETOMETER_STARTS {
            mag_result = self.init_mag(delay, config.mag_mode);
            if mag_result.is_ok() {
                break;
            }
            delay.delay_us(RESET_DELAY_US);
        }
        mag_result?;

        self.config_accel(config.accel_fss, config.accel_dlpf)?;
        self.config_gyro(config.gyro_fss, config.gyro_dlpf)?;
        self.config_sample_rate(config.sample_rate_div)?;
        self.init_interrupt()?;
        self.config = config;
        Ok(())
    }

    pub fn data_ready(&mut self) -> Result<bool, ErrorCode> {
        self.set_bank(0)?;
        let status = self.read_byte(bank0::INT_STATUS_1)?;
        Ok(status & INT_STATUS_1_RAW_DATA_0_RDY != 0)
    }

    // Burst reads accel, gyro and the magnetometer registers mirrored by peripheral 0.
    pub fn read_data(&mut self) -> Result<(), ErrorCode> {
        self.set_bank(0)?;
        let mut bytes = [0u8; RAW_DATA_NUM_BYTES + 1];
        bytes[0] = bank0::ACCEL_XOUT_H | READ_FLAG;
        self.spi.transfer(&mut bytes)?;

        let buf = &bytes[1..];
        let frame = RawFrame {
            accel: RawAxes::big_endian(&buf[0..6]),
            gyro: RawAxes::big_endian(&buf[6..12]),
            // buf[12..14] is the die temperature
            mag_stat1: buf[14],
            mag: RawAxes::little_endian(&buf[15..21]),
            mag_stat2: buf[22],
        };
        let new_sample = frame.mag_stat1 & mag::ST1_DRDY != 0 || frame.mag != self.raw.mag;
        let overflow = frame.mag_stat2 & mag::ST2_HOFL != 0;
        self.mag_fresh = (self.mag_fresh || new_sample) && !overflow;
        self.raw = frame;
        Ok(())
    }

    // acceleration of the last frame in g
    pub fn accel(&self) -> Vector3<f32> {
        self.raw.accel.scaled(self.config.accel_fss.sensitivity())
    }

    // angular velocity of the last frame in degrees per second
    pub fn gyro(&self) -> Vector3<f32> {
        self.raw.gyro.scaled(self.config.gyro_fss.sensitivity())
    }

    // magnetic field of the last frame in micro Teslas, rotated into the accel/gyro frame
    pub fn mag(&self) -> Vector3<f32> {
        // AK09916 y and z point opposite to the ICM-20948 axes
        let (x, y, z) = self.raw.mag.scaled(1.0 / MAG_SCALE_UT);
        (x, -y, -z)
    }

    // true when a magnetometer sample arrived since the last read_mag(), cleared by a
    // frame flagged with magnetic overflow
    pub fn mag_data_ready(&self) -> bool {
        self.mag_fresh
    }

    fn check_id(&mut self) -> Result<(), ErrorCode> {
        self.set_bank(0)?;
        let whoami = self.read_byte(bank0::WHO_AM_I)?;
        if whoami != ICM_20948_WHO_AM_I {
            Err(ErrorCode::WrongID)
        } else {
            Ok(())
        }
    }

    fn sw_reset(&mut self) -> Result<(), ErrorCode> {
        self.modify(0, bank0::PWR_MGMT_1, |reg| reg | PWR_MGMT_1_DEVICE_RESET)?;
        // the reset puts the device back on bank 0 behind our back
        self.curr_bank = u8::MAX;
        Ok(())
    }

    fn sleep(&mut self, sleep: bool) -> Result<(), ErrorCode> {
        self.modify(0, bank0::PWR_MGMT_1, |reg| with_bits(reg, PWR_MGMT_1_SLEEP, sleep))
    }

    fn set_low_power(&mut self, enable: bool) -> Result<(), ErrorCode> {
        self.modify(0, bank0::PWR_MGMT_1, |reg| with_bits(reg, PWR_MGMT_1_LP_EN, enable))
    }

    fn config_accel(&mut self, fss: AccelFullScaleSel, dlpf: AccelDLPFSel) -> Result<(), ErrorCode> {
        let bypass = dlpf == AccelDLPFSel::Disable;
        self.modify(2, bank2::ACCEL_CONFIG, |reg| {
            sensor_config(reg, fss as u8, dlpf as u8, bypass)
        })?;
        self.config.accel_fss = fss;
        Ok(())
    }

    fn config_gyro(&mut self, fss: GyroFullScaleSel, dlpf: GyroDLPFSel) -> Result<(), ErrorCode> {
        let bypass = dlpf == GyroDLPFSel::Disable;
        self.modify(2, bank2::GYRO_CONFIG_1, |reg| {
            sensor_config(reg, fss as u8, dlpf as u8, bypass)
        })?;
        self.config.gyro_fss = fss;
        Ok(())
    }

    fn config_sample_rate(&mut self, div: u8) -> Result<(), ErrorCode> {
        self.set_bank(2)?;
        self.write_byte(bank2::GYRO_SMPLRT_DIV, div)?;
        // 12 bit accel divider, the upper nibble lives in DIV_1
        self.write_byte(bank2::ACCEL_SMPLRT_DIV_1, 0)?;
        self.write_byte(bank2::ACCEL_SMPLRT_DIV_2, div)?;
        self.config.sample_rate_div = div;
        Ok(())
    }

    // INT1: active low, open drain, 50us pulse, cleared by any read; fires on raw data ready
    fn init_interrupt(&mut self) -> Result<(), ErrorCode> {
        self.modify(0, bank0::INT_PIN_CFG, |reg| {
            (reg | INT_PIN_CFG_INT1_ACTL | INT_PIN_CFG_INT1_OPEN | INT_PIN_CFG_ANYRD_2CLEAR)
                & !INT_PIN_CFG_INT1_LATCH_EN
        })?;
        self.modify(0, bank0::INT_ENABLE_1, |reg| reg | INT_ENABLE_1_RAW_DATA_0_RDY)
    }

    fn init_mag<D: DelayUs<u32>>(&mut self, delay: &mut D, mode: MagMode) -> Result<(), ErrorCode> {
        self.i2c_master_enable(true)?;
        self.write_mag(mag::CNTL3, mag::CNTL3_SRST)?;

        // reset the I2C master until the magnetometer answers
        let mut responding = false;
        for _ in 0..MAX_MAGNETOMETER_STARTS {
            match self.mag_check_id() {
                Ok(()) => {
                    responding = true;
                    break;
                }
                Err(ErrorCode::MagWrongID) => return Err(ErrorCode::MagWrongID),
                Err(_) => {
                    self.i2c_master_reset()?;
                    delay.delay_us(RESET_DELAY_US);
                }
            }
        }
        if !responding {
            return Err(ErrorCode::MagError);
        }

        self.write_mag(mag::CNTL2, mode as u8)?;

        // peripheral 0 mirrors ST1..ST2 after every sample
        self.set_bank(3)?;
        self.write_byte(bank3::I2C_PERIPH0_ADDR, PERIPH_ADDR_READ | MAG_I2C_ADDR)?;
        self.write_byte(bank3::I2C_PERIPH0_REG, mag::ST1)?;
        self.write_byte(bank3::I2C_PERIPH0_CTRL, PERIPH_CTRL_EN | MAG_READ_LENGTH)
    }

    fn mag_check_id(&mut self) -> Result<(), ErrorCode> {
        let whoami1 = self.read_mag(mag::WIA1)?;
        let whoami2 = self.read_mag(mag::WIA2)?;
        if [whoami1, whoami2] != MAG_WHO_AM_I.to_be_bytes() {
            return Err(ErrorCode::MagWrongID);
        }
        Ok(())
    }

    fn i2c_master_enable(&mut self, enable: bool) -> Result<(), ErrorCode> {
        // keep SDA/SCL away from AUX_DA/AUX_CL
        self.modify(0, bank0::INT_PIN_CFG, |reg| reg & !INT_PIN_CFG_BYPASS_EN)?;
        self.modify(3, bank3::I2C_MST_CTRL, |reg| {
            reg | I2C_MST_CLK_345KHZ | I2C_MST_CTRL_P_NSR
        })?;
        self.modify(0, bank0::USER_CTRL, |reg| with_bits(reg, USER_CTRL_I2C_MST_EN, enable))
    }

    fn i2c_master_reset(&mut self) -> Result<(), ErrorCode> {
        self.modify(0, bank0::USER_CTRL, |reg| reg | USER_CTRL_I2C_MST_RST)
    }

    fn write_mag(&mut self, reg: u8, data: u8) -> Result<(), ErrorCode> {
        self.set_bank(3)?;
        self.write_byte(bank3::I2C_PERIPH4_ADDR, MAG_I2C_ADDR)?;
        self.write_byte(bank3::I2C_PERIPH4_REG, reg)?;
        self.write_byte(bank3::I2C_PERIPH4_DO, data)?;
        self.write_byte(bank3::I2C_PERIPH4_CTRL, PERIPH_CTRL_EN)?;
        self.wait_periph4()
    }

    fn read_mag(&mut self, reg: u8) -> Result<u8, ErrorCode> {
        self.set_bank(3)?;
        self.write_byte(bank3::I2C_PERIPH4_ADDR, PERIPH_ADDR_READ | MAG_I2C_ADDR)?;
        self.write_byte(bank3::I2C_PERIPH4_REG, reg)?;
        self.write_byte(bank3::I2C_PERIPH4_CTRL, PERIPH_CTRL_EN)?;
        self.wait_periph4()?;

        self.set_bank(3)?;
        self.read_byte(bank3::I2C_PERIPH4_DI)
    }

    // TODO: bound this by time instead of a poll count once a monotonic clock is passed in
    fn wait_periph4(&mut self) -> Result<(), ErrorCode> {
        for _ in 0..MAX_PERIPH4_POLLS {
            self.set_bank(0)?;
            let status = self.read_byte(bank0::I2C_MST_STATUS)?;
            if status & I2C_MST_STATUS_PERIPH4_NACK != 0 {
                return Err(ErrorCode::MagError);
            }
            if status & I2C_MST_STATUS_PERIPH4_DONE != 0 {
                return Ok(());
            }
        }
        Err(ErrorCode::MagError)
    }

    fn set_bank(&mut self, bank: u8) -> Result<(), ErrorCode> {
        if bank > 3 {
            Err(ErrorCode::ParamError)
        } else if self.curr_bank == bank {
            Ok(())
        } else {
            self.write_byte(REG_BANK_SEL, (bank << 4) & 0x30)?;
            self.curr_bank = bank;
            Ok(())
        }
    }

    // read-modify-write of a register in `bank`
    fn modify<F>(&mut self, bank: u8, reg: u8, f: F) -> Result<(), ErrorCode>
    where
        F: FnOnce(u8) -> u8,
    {
        self.set_bank(bank)?;
        let value = self.read_byte(reg)?;
        self.write_byte(reg, f(value))
    }

    fn write_byte(&mut self, reg: u8, data: u8) -> Result<(), ErrorCode> {
        let mut bytes = [reg & !READ_FLAG, data];
        self.spi.transfer(&mut bytes)
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, ErrorCode> {
        let mut bytes = [reg | READ_FLAG, 0];
        self.spi.transfer(&mut bytes)?;
        Ok(bytes[1])
    }
}

impl<SPI, CS> MotionSensor for ICM20948<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    type Error = ErrorCode;

    fn read_accel(&mut self) -> nb::Result<Vector3<f32>, ErrorCode> {
        if !self.data_ready()? {
            return Err(nb::Error::WouldBlock);
        }
        self.read_data()?;
        Ok(self.accel())
    }

    // served from the frame fetched by read_accel()
    fn read_mag(&mut self) -> nb::Result<Vector3<f32>, ErrorCode> {
        if !self.mag_fresh {
            return Err(nb::Error::WouldBlock);
        }
        self.mag_fresh = false;
        Ok(self.mag())
    }
}

fn with_bits(reg: u8, mask: u8, set: bool) -> u8 {
    if set {
        reg | mask
    } else {
        reg & !mask
    }
}

// Shared layout of ACCEL_CONFIG and GYRO_CONFIG_1.
fn sensor_config(reg: u8, fss: u8, dlpf: u8, bypass_dlpf: bool) -> u8 {
    let mut config = reg;
    if bypass_dlpf {
        config &= !CONFIG_FCHOICE;
    } else {
        config &= !CONFIG_DLPFCFG;
        config |= ((dlpf << 3) & CONFIG_DLPFCFG) | CONFIG_FCHOICE;
    }
    config &= !CONFIG_FS_SEL;
    config | ((fss << 1) & CONFIG_FS_SEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use embedded_hal_mock::eh0::delay::NoopDelay as MockNoop;
    use embedded_hal_mock::eh0::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
    use embedded_hal_mock::eh0::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn cs_for(transfers: usize) -> PinMock {
        let mut expectations = Vec::new();
        for _ in 0..transfers {
            expectations.push(PinTransaction::set(PinState::Low));
            expectations.push(PinTransaction::set(PinState::High));
        }
        PinMock::new(&expectations)
    }

    fn select_bank0() -> SpiTransaction {
        SpiTransaction::transfer(vec![REG_BANK_SEL, 0x00], vec![0x00, 0x00])
    }

    #[test]
    fn init_rejects_unknown_device() {
        let spi = SpiMock::new(&[
            select_bank0(),
            SpiTransaction::transfer(vec![bank0::WHO_AM_I | READ_FLAG, 0x00], vec![0x00, 0x12]),
        ]);
        let mut imu = ICM20948::new(spi, cs_for(2));
        assert_eq!(imu.init(&mut MockNoop::new(), ImuConfig::default()), Err(ErrorCode::WrongID));

        let (mut spi, mut cs) = imu.release();
        spi.done();
        cs.done();
    }

    #[test]
    fn read_accel_would_block_without_new_data() {
        let spi = SpiMock::new(&[
            select_bank0(),
            SpiTransaction::transfer(vec![bank0::INT_STATUS_1 | READ_FLAG, 0x00], vec![0x00, 0x00]),
        ]);
        let mut imu = ICM20948::new(spi, cs_for(2));
        assert_eq!(imu.read_accel(), Err(nb::Error::WouldBlock));
        assert_eq!(MotionSensor::read_mag(&mut imu), Err(nb::Error::WouldBlock));

        let (mut spi, mut cs) = imu.release();
        spi.done();
        cs.done();
    }

    #[test]
    fn read_accel_decodes_burst_frame() {
        let mut request = vec![0x00; RAW_DATA_NUM_BYTES + 1];
        request[0] = bank0::ACCEL_XOUT_H | READ_FLAG;

        let mut frame = vec![0x00; RAW_DATA_NUM_BYTES + 1];
        // accel x = +1g, y = -0.5g at +-2g, z = 0
        frame[1..3].copy_from_slice(&16_384_i16.to_be_bytes());
        frame[3..5].copy_from_slice(&(-8_192_i16).to_be_bytes());
        // gyro z = 131 LSB = 1 dps at 250 dps
        frame[11..13].copy_from_slice(&131_i16.to_be_bytes());
        // mag ST1 data ready, x = 100 LSB, y = -20 LSB (little endian)
        frame[15] = mag::ST1_DRDY;
        frame[16..18].copy_from_slice(&100_i16.to_le_bytes());
        frame[18..20].copy_from_slice(&(-20_i16).to_le_bytes());

        let spi = SpiMock::new(&[
            select_bank0(),
            SpiTransaction::transfer(vec![bank0::INT_STATUS_1 | READ_FLAG, 0x00], vec![0x00, 0x01]),
            SpiTransaction::transfer(request, frame),
        ]);
        let mut imu = ICM20948::new(spi, cs_for(3));

        let accel = imu.read_accel().unwrap();
        assert_relative_eq!(accel.0, 1.0);
        assert_relative_eq!(accel.1, -0.5);
        assert_relative_eq!(accel.2, 0.0);
        assert_relative_eq!(imu.gyro().2, 1.0);

        assert!(imu.mag_data_ready());
        let mag = MotionSensor::read_mag(&mut imu).unwrap();
        assert_relative_eq!(mag.0, 15.0, max_relative = 1e-6);
        assert_relative_eq!(mag.1, 3.0, max_relative = 1e-6);
        assert_eq!(MotionSensor::read_mag(&mut imu), Err(nb::Error::WouldBlock));

        let (mut spi, mut cs) = imu.release();
        spi.done();
        cs.done();
    }

    fn burst_request() -> Vec<u8> {
        let mut request = vec![0x00; RAW_DATA_NUM_BYTES + 1];
        request[0] = bank0::ACCEL_XOUT_H | READ_FLAG;
        request
    }

    // frame with only the mirrored magnetometer registers filled in
    fn mag_frame(stat1: u8, mag_x: i16, stat2: u8) -> Vec<u8> {
        let mut frame = vec![0x00; RAW_DATA_NUM_BYTES + 1];
        frame[15] = stat1;
        frame[16..18].copy_from_slice(&mag_x.to_le_bytes());
        frame[23] = stat2;
        frame
    }

    #[test]
    fn mag_sample_tracked_across_mirror_cycles() {
        let frames = [
            // DRDY already cleared by a later mirror cycle, new field value
            mag_frame(0x00, 100, 0x00),
            // same sample mirrored again
            mag_frame(0x00, 100, 0x00),
            // new sample that happens to repeat the previous value
            mag_frame(mag::ST1_DRDY, 100, 0x00),
            // saturated sensor
            mag_frame(mag::ST1_DRDY, 200, mag::ST2_HOFL),
        ];
        let mut expectations = vec![select_bank0()];
        for frame in frames.iter() {
            expectations.push(SpiTransaction::transfer(
                vec![bank0::INT_STATUS_1 | READ_FLAG, 0x00],
                vec![0x00, 0x01],
            ));
            expectations.push(SpiTransaction::transfer(burst_request(), frame.clone()));
        }
        let spi = SpiMock::new(&expectations);
        let mut imu = ICM20948::new(spi, cs_for(1 + 2 * frames.len()));

        imu.read_accel().unwrap();
        assert_relative_eq!(MotionSensor::read_mag(&mut imu).unwrap().0, 15.0, max_relative = 1e-6);

        imu.read_accel().unwrap();
        assert_eq!(MotionSensor::read_mag(&mut imu), Err(nb::Error::WouldBlock));

        imu.read_accel().unwrap();
        assert!(MotionSensor::read_mag(&mut imu).is_ok());

        imu.read_accel().unwrap();
        assert!(!imu.mag_data_ready());
        assert_eq!(MotionSensor::read_mag(&mut imu), Err(nb::Error::WouldBlock));

        let (mut spi, mut cs) = imu.release();
        spi.done();
        cs.done();
    }

    #[test]
    fn sample_rate_divider_written_to_accel_and_gyro() {
        let spi = SpiMock::new(&[
            SpiTransaction::transfer(vec![REG_BANK_SEL, 0x20], vec![0x00, 0x00]),
            SpiTransaction::transfer(vec![bank2::GYRO_SMPLRT_DIV, 10], vec![0x00, 0x00]),
            SpiTransaction::transfer(vec![bank2::ACCEL_SMPLRT_DIV_1, 0], vec![0x00, 0x00]),
            SpiTransaction::transfer(vec![bank2::ACCEL_SMPLRT_DIV_2, 10], vec![0x00, 0x00]),
        ]);
        let mut imu = ICM20948::new(spi, cs_for(4));
        imu.config_sample_rate(10).unwrap();
        assert_eq!(imu.config.sample_rate_div, 10);

        let (mut spi, mut cs) = imu.release();
        spi.done();
        cs.done();
    }

    #[test]
    fn sensor_config_packs_fields() {
        assert_eq!(sensor_config(0xFF, 0x01, 0xFF, true), (0xFF & !CONFIG_FCHOICE & !CONFIG_FS_SEL) | 0x02);
        assert_eq!(sensor_config(0x00, 0x03, 0x05, false), (0x05 << 3) | (0x03 << 1) | CONFIG_FCHOICE);
    }
}
