use crate::heading::vector::Vector3;

pub trait MotionSensor {
    type Error;

    // acceleration in g, WouldBlock until a new sample is available
    fn read_accel(&mut self) -> nb::Result<Vector3<f32>, Self::Error>;

    // magnetic field in micro Teslas, WouldBlock until a new sample is available
    fn read_mag(&mut self) -> nb::Result<Vector3<f32>, Self::Error>;
}
