//! Occupancy variants of a relevant mask.
//!
//! A mask with `k` set bits has `2^k` subsets. Variant `idx` is the subset
//! where bit `j` of `idx` selects the `j`-th set bit of the mask, counting
//! from the least significant end. [`crate::compress`] inverts exactly this
//! mapping, so table slots and lookups agree.

/// Number of occupancy variants of `mask`.
#[inline(always)]
pub const fn variant_count(mask: u64) -> usize {
    1usize << mask.count_ones()
}

/// Scatter the low bits of `idx` onto the set bits of `mask`, low to high.
///
/// Bits of `idx` beyond the popcount of `mask` are ignored.
pub fn occupancy_variant(mut idx: usize, mask: u64) -> u64 {
    let mut remaining = mask;
    let mut occupancy = 0u64;

    while idx != 0 && remaining != 0 {
        let lsb = remaining & remaining.wrapping_neg();
        if idx & 1 != 0 {
            occupancy |= lsb;
        }
        remaining &= !lsb;
        idx >>= 1;
    }
    occupancy
}

/// All `2^popcount(mask)` variants, in index order.
pub fn occupancy_variants(mask: u64) -> Vec<u64> {
    (0..variant_count(mask))
        .map(|idx| occupancy_variant(idx, mask))
        .collect()
}
