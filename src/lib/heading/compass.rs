// Tilt-compensated compass
//
// Raw accelerometer and magnetometer readings are calibrated and low-pass filtered per axis.
// Magnetic west is accel x mag, magnetic north is west x accel, so the heading only depends
// on the x components of both. Those two components are filtered once more before atan2.

use crate::filtering::biquad::{FilterDesign, StreamingBiquad};
use crate::heading::calibration::AxisCalibration;
use crate::heading::vector::{cross, wrap_degrees, Vector3};
use num_traits::{Float, FloatConst};

#[derive(Debug, Clone, Copy)]
pub struct CompassConfig<ItemT> {
    // rate at which accelerometer samples are fed, in Hz
    pub imu_sample_rate: ItemT,
    // rate at which magnetometer samples are fed, in Hz
    pub mag_sample_rate: ItemT,
    // low-pass cutoff shared by every filter, in Hz
    pub passband: ItemT,
    // local magnetic declination in degrees, added to the heading
    pub declination: ItemT,
    pub accel: AxisCalibration<ItemT>,
    pub mag: AxisCalibration<ItemT>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading<ItemT> {
    pub degrees: ItemT, // [0, 360)
    pub west_x: ItemT,
    pub north_x: ItemT,
}

struct AxisFilters<ItemT> {
    x: StreamingBiquad<ItemT>,
    y: StreamingBiquad<ItemT>,
    z: StreamingBiquad<ItemT>,
}

impl<ItemT> AxisFilters<ItemT>
where
    ItemT: Float + FloatConst,
{
    fn new(design: FilterDesign<ItemT>) -> Self {
        Self {
            x: StreamingBiquad::new(design, ItemT::zero()),
            y: StreamingBiquad::new(design, ItemT::zero()),
            z: StreamingBiquad::new(design, ItemT::zero()),
        }
    }

    fn update(&mut self, sample: Vector3<ItemT>) -> Vector3<ItemT> {
        (
            self.x.update(sample.0),
            self.y.update(sample.1),
            self.z.update(sample.2),
        )
    }

    fn value(&self) -> Vector3<ItemT> {
        (self.x.value(), self.y.value(), self.z.value())
    }

    fn reconfigure(&mut self, design: FilterDesign<ItemT>) {
        self.x.reconfigure(design);
        self.y.reconfigure(design);
        self.z.reconfigure(design);
    }

    fn reset(&mut self) {
        self.x.reset(ItemT::zero());
        self.y.reset(ItemT::zero());
        self.z.reset(ItemT::zero());
    }
}

pub struct TiltCompass<ItemT> {
    config: CompassConfig<ItemT>,
    accel: AxisFilters<ItemT>,
    mag: AxisFilters<ItemT>,
    west_x: StreamingBiquad<ItemT>,
    north_x: StreamingBiquad<ItemT>,
}

impl<ItemT> TiltCompass<ItemT>
where
    ItemT: Float + FloatConst,
{
    pub fn new(config: CompassConfig<ItemT>) -> Self {
        let imu_design = FilterDesign::new(config.passband, config.imu_sample_rate);
        let mag_design = FilterDesign::new(config.passband, config.mag_sample_rate);
        Self {
            config,
            accel: AxisFilters::new(imu_design),
            mag: AxisFilters::new(mag_design),
            west_x: StreamingBiquad::new(imu_design, ItemT::zero()),
            north_x: StreamingBiquad::new(imu_design, ItemT::zero()),
        }
    }

    pub fn config(&self) -> &CompassConfig<ItemT> {
        &self.config
    }

    // returns the filtered, calibrated acceleration
    pub fn update_accel(&mut self, raw: Vector3<ItemT>) -> Vector3<ItemT> {
        let calibrated = self.config.accel.apply(raw);
        self.accel.update(calibrated)
    }

    // returns the filtered, calibrated magnetic field
    pub fn update_mag(&mut self, raw: Vector3<ItemT>) -> Vector3<ItemT> {
        let calibrated = self.config.mag.apply(raw);
        self.mag.update(calibrated)
    }

    pub fn accel(&self) -> Vector3<ItemT> {
        self.accel.value()
    }

    pub fn mag(&self) -> Vector3<ItemT> {
        self.mag.value()
    }

    // Call once per accelerometer sample, the heading filters run at the IMU rate.
    pub fn update_heading(&mut self) -> Heading<ItemT> {
        let accel = self.accel.value();
        let west = cross(accel, self.mag.value());
        let north = cross(west, accel);

        self.west_x.update(west.0);
        self.north_x.update(north.0);
        self.heading()
    }

    pub fn heading(&self) -> Heading<ItemT> {
        let west_x = self.west_x.value();
        let north_x = self.north_x.value();
        let degrees = wrap_degrees(west_x.atan2(north_x).to_degrees() + self.config.declination);
        Heading {
            degrees,
            west_x,
            north_x,
        }
    }

    /// Changes the cutoff of every filter without restarting them.
    pub fn set_passband(&mut self, passband: ItemT) {
        self.config.passband = passband;
        let imu_design = FilterDesign::new(passband, self.config.imu_sample_rate);
        let mag_design = FilterDesign::new(passband, self.config.mag_sample_rate);
        self.accel.reconfigure(imu_design);
        self.mag.reconfigure(mag_design);
        self.west_x.reconfigure(imu_design);
        self.north_x.reconfigure(imu_design);
    }

    pub fn reset(&mut self) {
        self.accel.reset();
        self.mag.reset();
        self.west_x.reset(ItemT::zero());
        self.north_x.reset(ItemT::zero());
    }
}
