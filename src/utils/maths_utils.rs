/// Nearest integer, halves rounding up toward +inf (so -2.5 -> -2, 2.5 -> 3).
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
