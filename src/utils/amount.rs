//! Decimal amount <-> smallest-unit conversion.

/// Converts a user-entered decimal amount to the token's smallest unit by
/// multiplying by `10^decimals` and truncating toward zero.
pub fn to_base_units(amount: f64, decimals: u8) -> u64 {
    let scaled = amount * 10f64.powi(decimals as i32);
    if scaled.is_nan() || scaled <= 0.0 {
        return 0;
    }
    scaled.floor() as u64
}

/// Converts a smallest-unit amount back to a decimal amount.
pub fn from_base_units(units: u64, decimals: u8) -> f64 {
    units as f64 / 10f64.powi(decimals as i32)
}
