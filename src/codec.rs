//! Wire format helpers.
//!
//! Every value exchanged with the controller is a big-endian unsigned integer.
//! Physical quantities are carried in hundredths, so `12.81 V` travels as `1281`.

use crate::{Error, Result};

/// Divisor applied to every raw telemetry integer.
pub const SCALE: f64 = 100.0;

/// Big-endian unsigned decode.
///
/// Buffers longer than eight bytes are accepted only when the extra leading
/// bytes are zero.
pub fn bytes_to_int(buffer: &[u8]) -> Result<u64> {
    let excess = buffer.len().saturating_sub(8);
    if buffer[..excess].iter().any(|&byte| byte != 0) {
        return Err(Error::DecodingRange {
            width: buffer.len(),
        });
    }

    Ok(buffer[excess..]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
}

/// Big-endian unsigned encode into exactly `N` bytes.
///
/// Values that need more than `N` bytes are rejected rather than truncated.
pub fn int_to_bytes<const N: usize>(value: u64) -> Result<[u8; N]> {
    if N < 8 && value >> (8 * N) != 0 {
        return Err(Error::EncodingRange {
            value: value.to_string(),
            width: N,
        });
    }

    let wide = value.to_be_bytes();
    let mut out = [0u8; N];
    let take = N.min(wide.len());
    out[N - take..].copy_from_slice(&wide[wide.len() - take..]);
    Ok(out)
}

pub fn decode_scaled(buffer: &[u8]) -> Result<f64> {
    Ok(bytes_to_int(buffer)? as f64 / SCALE)
}

/// Scale a physical value into `N` bytes. The scaled value is truncated
/// toward zero, never rounded: `12.347` encodes as `1234`.
pub fn encode_scaled<const N: usize>(value: f64) -> Result<[u8; N]> {
    let raw = (value * SCALE).trunc();
    if !raw.is_finite() || raw < 0.0 || raw >= u64::MAX as f64 {
        return Err(Error::EncodingRange {
            value: value.to_string(),
            width: N,
        });
    }

    int_to_bytes::<N>(raw as u64).map_err(|_| Error::EncodingRange {
        value: value.to_string(),
        width: N,
    })
}

pub fn encode_scaled_voltage(volts: f64) -> Result<[u8; 2]> {
    encode_scaled::<2>(volts)
}
