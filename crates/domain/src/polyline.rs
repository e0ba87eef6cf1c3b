//! Encoded polyline codec
//!
//! Implements the encoded polyline algorithm format used by map providers:
//! each coordinate is stored as a latitude and longitude delta from the previous
//! point, scaled by 1e5, zig-zag signed and split into 5-bit groups offset by 63.
//! The running origin starts at (0, 0).

use thiserror::Error;

use crate::value_objects::Coordinate;

/// Scaling factor between degrees and encoded integers
const PRECISION: f64 = 1e5;

/// ASCII offset applied to every 5-bit group
const CHAR_OFFSET: u8 = 63;

/// Continuation flag of a 5-bit group
const CONTINUATION_BIT: i64 = 0x20;

/// Largest shift that still fits into an `i64` accumulator
const MAX_SHIFT: u32 = 60;

/// Errors raised while decoding a malformed polyline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The string ended in the middle of a value or a coordinate pair
    #[error("Polyline truncated at byte {position}")]
    Truncated {
        /// Byte offset where more input was expected
        position: usize,
    },

    /// A byte outside the encoding alphabet (`?`..=`~`)
    #[error("Invalid polyline byte 0x{byte:02x} at {position}")]
    InvalidCharacter {
        /// Byte offset of the offending byte
        position: usize,
        /// The offending byte
        byte: u8,
    },

    /// A value spans more groups than an `i64` can hold
    #[error("Polyline value starting at byte {position} overflows")]
    Overflow {
        /// Byte offset where the value starts
        position: usize,
    },
}

/// Decode an encoded polyline into coordinates, in encoded order
///
/// Every call starts from a fresh cursor and a (0, 0) origin. The whole string
/// must be consumed: a trailing partial value or an unpaired latitude is
/// reported as [`PolylineError::Truncated`] instead of being dropped.
///
/// # Errors
///
/// Returns a [`PolylineError`] if the input is truncated, contains bytes
/// outside the encoding alphabet, or encodes values that overflow.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut cursor = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::with_capacity(bytes.len() / 4);

    while cursor < bytes.len() {
        let start = cursor;
        let dlat = next_value(bytes, &mut cursor)?;
        let dlng = next_value(bytes, &mut cursor)?;

        lat = lat
            .checked_add(dlat)
            .ok_or(PolylineError::Overflow { position: start })?;
        lng = lng
            .checked_add(dlng)
            .ok_or(PolylineError::Overflow { position: start })?;

        points.push(Coordinate::new_unchecked(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(points)
}

/// Read one zig-zag encoded signed value, advancing the cursor past it
fn next_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let start = *cursor;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*cursor) else {
            return Err(PolylineError::Truncated { position: *cursor });
        };
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *cursor,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: start });
        }
        *cursor += 1;

        let group = i64::from(byte - CHAR_OFFSET);
        result |= (group & 0x1f) << shift;
        shift += 5;

        if group < CONTINUATION_BIT {
            break;
        }
    }

    Ok(if result & 1 == 0 {
        result >> 1
    } else {
        !(result >> 1)
    })
}

/// Encode coordinates into the polyline format
///
/// Coordinates are rounded to 5 decimal places, so `decode(&encode(points))`
/// reproduces the input up to that precision.
#[must_use]
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.latitude() * PRECISION).round() as i64;
        let lng = (point.longitude() * PRECISION).round() as i64;
        push_value(lat - prev_lat, &mut out);
        push_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn push_value(value: i64, out: &mut String) {
    let mut rest = ((value << 1) ^ (value >> 63)) as u64;
    while rest >= 0x20 {
        out.push(char::from((0x20 | (rest & 0x1f)) as u8 + CHAR_OFFSET));
        rest >>= 5;
    }
    out.push(char::from(rest as u8 + CHAR_OFFSET));
}
