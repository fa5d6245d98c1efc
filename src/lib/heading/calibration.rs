// Hard-iron style calibration for a 3-axis sensor.
// Offsets are the centre of a sphere fitted to raw readings, the scale maps that sphere to
// radius 1. All axes are assumed to share a similar gain, so one scale is used.

use crate::heading::vector::Vector3;
use num_traits::Float;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCalibration<ItemT> {
    pub offset: Vector3<ItemT>,
    pub scale: ItemT,
    // some boards mount the magnetometer with a reversed x axis
    pub invert_x: bool,
}

impl<ItemT: Float> AxisCalibration<ItemT> {
    pub fn new(offset: Vector3<ItemT>, scale: ItemT) -> Self {
        Self {
            offset,
            scale,
            invert_x: false,
        }
    }

    pub fn identity() -> Self {
        Self::new((ItemT::zero(), ItemT::zero(), ItemT::zero()), ItemT::one())
    }

    pub fn with_inverted_x(mut self) -> Self {
        self.invert_x = true;
        self
    }

    pub fn apply(&self, raw: Vector3<ItemT>) -> Vector3<ItemT> {
        let x = if self.invert_x { -raw.0 } else { raw.0 };
        (
            (x + self.offset.0) * self.scale,
            (raw.1 + self.offset.1) * self.scale,
            (raw.2 + self.offset.2) * self.scale,
        )
    }
}

impl<ItemT: Float> Default for AxisCalibration<ItemT> {
    fn default() -> Self {
        Self::identity()
    }
}
