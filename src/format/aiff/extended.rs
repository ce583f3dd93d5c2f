//! IEEE 754 80-bit extended precision, as used for the AIFF sample rate
//!
//! Layout: sign (1 bit) | biased exponent (15 bits) | significand (64 bits,
//! explicit integer bit). value = significand × 2^(exponent − 16383 − 63)

const EXPONENT_BIAS: i32 = 16383;

/// Decode an 80-bit extended float
pub fn decode(bytes: &[u8; 10]) -> f64 {
    let sign = bytes[0] & 0x80 != 0;
    let exponent = (((bytes[0] & 0x7F) as u16) << 8) | bytes[1] as u16;

    let mut mantissa: u64 = 0;
    for &b in &bytes[2..] {
        mantissa = (mantissa << 8) | b as u64;
    }

    if exponent == 0 && mantissa == 0 {
        return 0.0;
    }

    if exponent == 0x7FFF {
        return match (mantissa, sign) {
            (0, false) => f64::INFINITY,
            (0, true) => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
    }

    let e = exponent as i32 - EXPONENT_BIAS - 63;
    let value = mantissa as f64 * 2f64.powi(e);
    if sign {
        -value
    } else {
        value
    }
}

/// Encode a non-negative integer exactly as an 80-bit extended float
pub fn encode(value: u32) -> [u8; 10] {
    let mut bytes = [0u8; 10];
    if value == 0 {
        return bytes;
    }

    let leading = value.leading_zeros();
    let exponent = (EXPONENT_BIAS + 31 - leading as i32) as u16;
    let mantissa = (value as u64) << (32 + leading);

    bytes[0..2].copy_from_slice(&exponent.to_be_bytes());
    bytes[2..10].copy_from_slice(&mantissa.to_be_bytes());
    bytes
}
