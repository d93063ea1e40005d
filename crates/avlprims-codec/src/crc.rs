//! CRC-16/IBM over the frame body.
//!
//! Devices send the checksum in the last 4 bytes of the frame, with the
//! upper two bytes zero. It covers the codec id through the trailing record count.

use crc::{Crc, CRC_16_ARC};

const CRC16_IBM: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// Compute the CRC-16/IBM of `data`.
pub fn crc16_ibm(data: &[u8]) -> u16 {
    CRC16_IBM.checksum(data)
}
