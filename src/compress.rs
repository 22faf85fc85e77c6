//! Compression index: turn a board occupancy into the occupancy-variant index
//! of a relevant mask.
//!
//! The relevant bits of the occupancy are gathered and packed into the low
//! bits of the result, keeping their order: the lowest mask bit becomes bit 0.
//! This is the inverse of [`crate::variants::occupancy_variant`].
//!
//! Two strategies produce the same index:
//! * [`Compression::Pext`]: the BMI2 `pext` instruction, one cycle on most
//!   x86_64 CPUs made after 2013 (slow microcode on AMD before Zen 3).
//! * [`Compression::Portable`]: branch-free shift-and-mask compaction that
//!   runs anywhere.

use log::warn;
use once_cell::sync::Lazy;
use std::fmt;

static BMI2: Lazy<bool> = Lazy::new(detect_bmi2);
static DETECTED: Lazy<Compression> = Lazy::new(Compression::detect);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    Pext,
    Portable,
}

impl Compression {
    pub const ALL: [Compression; 2] = [Compression::Pext, Compression::Portable];

    /// Fastest strategy the running CPU supports
    pub fn detect() -> Compression {
        if *BMI2 {
            Compression::Pext
        } else {
            Compression::Portable
        }
    }

    /// Strategy picked once for this process
    #[inline(always)]
    pub fn current() -> Compression {
        *DETECTED
    }

    pub fn is_available(self) -> bool {
        match self {
            Compression::Pext => *BMI2,
            Compression::Portable => true,
        }
    }

    /// The strategy itself, or [`Compression::Portable`] when it is not
    /// supported here.
    pub fn resolve(self) -> Compression {
        if self.is_available() {
            self
        } else {
            warn!("{self} compression is not supported by this CPU, using portable");
            Compression::Portable
        }
    }

    /// Index of the variant of `mask` that `occupancy` matches.
    ///
    /// Always in `0..2^popcount(mask)`. `Pext` on a CPU without BMI2 quietly
    /// computes the portable result.
    #[inline(always)]
    pub fn variant_index(self, occupancy: u64, mask: u64) -> usize {
        let packed = match self {
            Compression::Pext if *BMI2 => pext(occupancy, mask),
            _ => compress_portable(occupancy, mask),
        };
        packed as usize
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::Pext => write!(f, "pext"),
            Compression::Portable => write!(f, "portable"),
        }
    }
}

/// [`Compression::variant_index`] with the process-wide strategy.
#[inline(always)]
pub fn variant_index(occupancy: u64, mask: u64) -> usize {
    Compression::current().variant_index(occupancy, mask)
}

fn detect_bmi2() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        std::arch::is_x86_feature_detected!("bmi2")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn pext(value: u64, mask: u64) -> u64 {
    #[target_feature(enable = "bmi2")]
    unsafe fn pext_bmi2(value: u64, mask: u64) -> u64 {
        std::arch::x86_64::_pext_u64(value, mask)
    }

    // SAFETY: only reached once BMI2 support has been detected
    unsafe { pext_bmi2(value, mask) }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
fn pext(value: u64, mask: u64) -> u64 {
    compress_portable(value, mask)
}

/// Gather the bits of `value` selected by `mask` into the low bits.
///
/// Parallel-suffix compaction: at step `i` every selected bit moves right by
/// `2^i` when the count of unselected bits below it has that bit set. Six
/// steps cover 64 bits.
#[inline]
pub const fn compress_portable(value: u64, mask: u64) -> u64 {
    let mut x = value & mask;
    let mut m = mask;
    // counts zeros of the mask to the right of each bit
    let mut mk = !m << 1;

    let mut i = 0;
    while i < 6 {
        let mut mp = mk ^ (mk << 1);
        mp ^= mp << 2;
        mp ^= mp << 4;
        mp ^= mp << 8;
        mp ^= mp << 16;
        mp ^= mp << 32;

        let mv = mp & m;
        m = (m ^ mv) | (mv >> (1 << i));
        let t = x & mv;
        x = (x ^ t) | (t >> (1 << i));
        mk &= !mp;
        i += 1;
    }
    x
}
