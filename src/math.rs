/// Returns the integer division and remainder with `numer` being an `i32` and `denom` being an `u32`.
///
/// The resulting remainder is a *positive* number between 0 and `denom-1` with `result.0 * denom + result.1 = numer`.
///
/// # Panics
///
/// Panics if `denom == 0`.
///
/// # Examples
///
/// ```
/// # use edo31::math;
/// // numer is positive
/// assert_eq!(math::div_mod_i32(1, 31), (0, 1));
/// assert_eq!(math::div_mod_i32(30, 31), (0, 30));
/// assert_eq!(math::div_mod_i32(31, 31), (1, 0));
/// assert_eq!(math::div_mod_i32(141, 31), (4, 17));
///
/// // numer is negative
/// assert_eq!(math::div_mod_i32(-1, 31), (-1, 30));
/// assert_eq!(math::div_mod_i32(-31, 31), (-1, 0));
/// assert_eq!(math::div_mod_i32(-32, 31), (-2, 30));
///
/// // numer is zero
/// assert_eq!(math::div_mod_i32(0, 31), (0, 0));
///
/// // numer is extreme
/// assert_eq!(math::div_mod_i32(i32::MIN, 31), (-69273667, 29));
/// assert_eq!(math::div_mod_i32(i32::MAX, 31), (69273666, 1));
/// assert_eq!(math::div_mod_i32(i32::MIN, u32::MAX), (-1, 2147483647));
/// ```
pub fn div_mod_i32(numer: i32, denom: u32) -> (i32, u32) {
    let numer = i64::from(numer);
    let denom = i64::from(denom);
    (numer.div_euclid(denom) as i32, numer.rem_euclid(denom) as u32)
}

/// Reduces `numer` into the range `[0, denom)`.
///
/// ```
/// # use edo31::math;
/// assert_eq!(math::i32_rem_u(15, 31), 15);
/// assert_eq!(math::i32_rem_u(-2, 31), 29);
/// assert_eq!(math::i32_rem_u(34, 31), 3);
/// ```
pub fn i32_rem_u(numer: i32, denom: u16) -> u16 {
    div_mod_i32(numer, u32::from(denom)).1 as u16
}
