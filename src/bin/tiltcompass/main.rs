// Tilt-compensated compass firmware
//
// Polls the ICM-20948 at the IMU rate. Every accelerometer frame updates the accel filters
// (and the mag filters when the frame carries a fresh magnetometer sample), then the heading
// is recomputed from the filtered vectors. Every step is reported on USART2, see
// tiltcompass::report for the line format.

#![no_main]
#![no_std]

mod config {
    pub mod sys_config;
}

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI2])]
mod app {
    use crate::config::sys_config;
    use core::fmt::Write;
    use cortex_m::asm;
    use panic_write::PanicHandler;
    use stm32f4xx_hal::{
        gpio::{Alternate, Output, Pin, PushPull, PB3, PB4, PB5},
        pac::{SPI1, USART2},
        prelude::*,
        serial::{Config, Serial, Tx},
        spi::{Mode, Phase, Polarity, Spi},
    };
    use systick_monotonic::{ExtU64, Systick};
    use tiltcompass::drivers::imu::icm20948;
    use tiltcompass::drivers::imu::motion_sensor::MotionSensor;
    use tiltcompass::heading::calibration::AxisCalibration;
    use tiltcompass::heading::compass::{CompassConfig, TiltCompass};
    use tiltcompass::report::{Channel, Measurement};

    type Imu = icm20948::ICM20948<
        Spi<SPI1, (PB3<Alternate<5>>, PB4<Alternate<5>>, PB5<Alternate<5>>)>,
        Pin<'A', 4, Output<PushPull>>,
    >;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        tx: core::pin::Pin<panic_write::PanicHandler<Tx<USART2>>>,
        imu: Imu,
        compass: TiltCompass<f32>,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        // configure clocks
        let rcc = ctx.device.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, sys_config::SYSCLK_HZ);
        let clocks = rcc.cfgr.sysclk(sys_config::SYSCLK_HZ.Hz()).freeze();

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();

        // set up uart tx, panics are written here too
        let tx_pin = gpioa.pa2.into_alternate();
        let serial = Serial::tx(
            ctx.device.USART2,
            tx_pin,
            Config::default()
                .baudrate(sys_config::SERIAL_BAUD.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        let mut tx = PanicHandler::new(serial);

        // set up imu spi and cs
        let imu_cs = gpioa.pa4.into_push_pull_output();
        let imu_sclk = gpiob.pb3.into_alternate();
        let imu_mosi = gpiob.pb5.into_alternate();
        let imu_miso = gpiob.pb4.into_alternate();
        let imu_spi = Spi::new(
            ctx.device.SPI1,
            (imu_sclk, imu_miso, imu_mosi),
            Mode {
                polarity: Polarity::IdleLow,
                phase: Phase::CaptureOnFirstTransition,
            },
            1.MHz(),
            &clocks,
        );

        writeln!(tx, "Initializing IMU...\r").ok();
        let mut delay = ctx.device.TIM5.delay_us(&clocks);
        let mut imu = icm20948::ICM20948::new(imu_spi, imu_cs);
        match imu.init(&mut delay, sys_config::IMU_CONFIG) {
            Ok(_) => writeln!(tx, "IMU initialized\r").ok(),
            Err(e) => {
                match e {
                    icm20948::ErrorCode::ParamError => writeln!(tx, "param error\r").ok(),
                    icm20948::ErrorCode::SpiError => writeln!(tx, "SPI error\r").ok(),
                    icm20948::ErrorCode::WrongID => writeln!(tx, "wrong ID\r").ok(),
                    icm20948::ErrorCode::MagError => writeln!(tx, "magnetometer error\r").ok(),
                    icm20948::ErrorCode::MagWrongID => {
                        writeln!(tx, "magnetometer wrong ID\r").ok()
                    }
                    icm20948::ErrorCode::CSError => writeln!(tx, "CS error\r").ok(),
                };
                panic!("imu initialization failed");
            }
        };

        let mut mag_calibration = AxisCalibration::new(sys_config::MAG_OFFSET, sys_config::MAG_SCALE);
        mag_calibration.invert_x = sys_config::MAG_INVERT_X;
        let compass = TiltCompass::new(CompassConfig {
            imu_sample_rate: sys_config::IMU_SAMPLE_RATE_HZ,
            mag_sample_rate: sys_config::MAG_SAMPLE_RATE_HZ,
            passband: sys_config::PASSBAND_HZ,
            declination: sys_config::HEADING_DECLINATION_DEG,
            accel: AxisCalibration::new(sys_config::ACCEL_OFFSET, sys_config::ACCEL_SCALE),
            mag: mag_calibration,
        });

        writeln!(tx, "system initialized\r").ok();

        imu_poll::spawn_after(ExtU64::millis(sys_config::POLL_PERIOD_MS)).unwrap();

        (Shared {}, Local { tx, imu, compass }, init::Monotonics(mono))
    }

    #[task(local = [tx, imu, compass])]
    fn imu_poll(cx: imu_poll::Context) {
        let tx = cx.local.tx;
        let imu = cx.local.imu;
        let compass = cx.local.compass;

        match imu.read_accel() {
            Ok(raw_accel) => {
                let accel = compass.update_accel(raw_accel);
                writeln!(tx, "{}\r", Measurement::new(Channel::Accel, accel)).ok();

                if let Ok(raw_mag) = imu.read_mag() {
                    let mag = compass.update_mag(raw_mag);
                    writeln!(tx, "{}\r", Measurement::new(Channel::Mag, mag)).ok();
                }
                writeln!(tx, "{}\r", Measurement::new(Channel::Gyro, imu.gyro())).ok();

                let heading = compass.update_heading();
                writeln!(tx, "{}\r", Measurement::from(&heading)).ok();
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => {
                writeln!(tx, "IMU error\r").ok();
            }
        }

        imu_poll::spawn_after(ExtU64::millis(sys_config::POLL_PERIOD_MS)).unwrap();
    }

    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }
}
