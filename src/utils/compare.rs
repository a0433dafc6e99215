/// Timing-safe byte comparison.
///
/// Compares every byte pair regardless of where the first mismatch occurs,
/// so the comparison duration does not leak the position of a mismatch.
pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.iter().zip(b.iter()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}
