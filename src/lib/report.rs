// Tab separated measurement lines for the serial console
//
//   acc\t<x>\t<y>\t<z>
//   mag\t<x>\t<y>\t<z>
//   gyr\t<x>\t<y>\t<z>
//   hdg\t<0.0 - 360.0 deg>\t<west_x>\t<north_x>
//
// Usage: writeln!(tx, "{}\r", Measurement::new(Channel::Accel, accel))

use crate::heading::compass::Heading;
use crate::heading::vector::Vector3;
use core::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Accel,
    Mag,
    Gyro,
    Heading,
}

impl Channel {
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Accel => "acc",
            Channel::Mag => "mag",
            Channel::Gyro => "gyr",
            Channel::Heading => "hdg",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Measurement<ItemT> {
    channel: Channel,
    values: Vector3<ItemT>,
}

impl<ItemT> Measurement<ItemT> {
    pub fn new(channel: Channel, values: Vector3<ItemT>) -> Self {
        Self { channel, values }
    }
}

impl<ItemT: Copy> From<&Heading<ItemT>> for Measurement<ItemT> {
    fn from(heading: &Heading<ItemT>) -> Self {
        Self::new(Channel::Heading, (heading.degrees, heading.west_x, heading.north_x))
    }
}

impl<ItemT: Display> Display for Measurement<ItemT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.channel.tag(),
            self.values.0,
            self.values.1,
            self.values.2
        )
    }
}
