#![cfg_attr(not(test), no_std)]

pub mod filtering {
    pub mod biquad;
    pub mod butterworth;
    pub mod strict;
}

pub mod heading {
    pub mod calibration;
    pub mod compass;
    pub mod vector;
}

pub mod drivers {
    pub mod imu {
        pub mod icm20948;
        pub mod icm20948_constants;
        pub mod motion_sensor;
    }
}

pub mod report;
