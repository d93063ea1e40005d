use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::Result;

/// Coordinates are transmitted as degrees multiplied by 10^7.
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

/// Wire size of the GPS element.
pub const GPS_ELEMENT_SIZE: usize = 15;

/// Position and motion reported with a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsFix {
    /// Degrees east (negative west).
    pub longitude: f64,
    /// Degrees north (negative south).
    pub latitude: f64,
    /// Meters above sea level.
    pub altitude: i16,
    /// Heading in degrees from north.
    pub angle: u16,
    /// Satellites in use.
    pub satellites: u8,
    /// Ground speed in km/h.
    pub speed: u16,
}

/// Decode one fixed-point coordinate field.
pub fn decode_coordinate(cur: &mut Cursor<'_>) -> Result<f64> {
    let raw = cur.read_i32()?;
    Ok(coordinate_from_raw(raw))
}

/// Convert a raw fixed-point coordinate into degrees.
///
/// A raw zero is returned as exactly `0.0`; devices send it when they have no fix.
pub fn coordinate_from_raw(raw: i32) -> f64 {
    if raw == 0 {
        return 0.0;
    }
    f64::from(raw) / COORDINATE_SCALE
}

/// Decode the 15-byte GPS element.
pub fn decode_gps(cur: &mut Cursor<'_>) -> Result<GpsFix> {
    Ok(GpsFix {
        longitude: decode_coordinate(cur)?,
        latitude: decode_coordinate(cur)?,
        altitude: cur.read_i16()?,
        angle: cur.read_u16()?,
        satellites: cur.read_u8()?,
        speed: cur.read_u16()?,
    })
}
