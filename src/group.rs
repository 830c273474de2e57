/// Number of control bytes compared at once.
///
/// Matches the SSE2 register width. Capacities are always a multiple of this.
pub const GROUP_WIDTH: usize = 16;

/// A 16-byte window of control bytes.
pub type Group = [u8; GROUP_WIDTH];

/// Counts trailing zero bits of a group mask.
///
/// An empty mask yields `16`, the group width, so callers can treat "no
/// match" as a position one past the last lane.
///
/// # Examples
///
/// ```rust
/// use flat_hash::group::trailing_zeros;
///
/// assert_eq!(trailing_zeros(0b1000), 3);
/// assert_eq!(trailing_zeros(0), 16);
/// ```
#[inline(always)]
pub fn trailing_zeros(mask: u16) -> usize {
    mask.trailing_zeros() as usize
}

/// Pops the lowest set bit of `mask`.
///
/// Returns the position of that bit and the mask with it cleared. A zero
/// mask returns `(16, 0)`.
///
/// # Examples
///
/// ```rust
/// use flat_hash::group::next_match;
///
/// assert_eq!(next_match(0b1010), (1, 0b1000));
/// assert_eq!(next_match(0b1000), (3, 0));
/// assert_eq!(next_match(0), (16, 0));
/// ```
#[inline(always)]
pub fn next_match(mask: u16) -> (usize, u16) {
    (trailing_zeros(mask), mask & mask.wrapping_sub(1))
}

cfg_if::cfg_if! {
    if #[cfg(all(
        target_arch = "x86_64",
        target_feature = "sse2",
        not(feature = "scalar-match")
    ))] {
        /// Returns a mask with bit `k` set iff `group[k] == target`.
        ///
        /// Compiled to an SSE2 compare and `movemask` on x86_64, and to the
        /// portable loop elsewhere or with the `scalar-match` feature. Both
        /// produce identical masks.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use flat_hash::group::match_byte;
        ///
        /// let mut group = [0x80u8; 16];
        /// group[2] = 0x11;
        /// group[9] = 0x11;
        /// assert_eq!(match_byte(0x11, &group), (1 << 2) | (1 << 9));
        /// ```
        #[inline(always)]
        pub fn match_byte(target: u8, group: &Group) -> u16 {
            match_byte_sse2(target, group)
        }
    } else {
        /// Returns a mask with bit `k` set iff `group[k] == target`.
        ///
        /// Compiled to an SSE2 compare and `movemask` on x86_64, and to the
        /// portable loop elsewhere or with the `scalar-match` feature. Both
        /// produce identical masks.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use flat_hash::group::match_byte;
        ///
        /// let mut group = [0x80u8; 16];
        /// group[2] = 0x11;
        /// group[9] = 0x11;
        /// assert_eq!(match_byte(0x11, &group), (1 << 2) | (1 << 9));
        /// ```
        #[inline(always)]
        pub fn match_byte(target: u8, group: &Group) -> u16 {
            match_byte_portable(target, group)
        }
    }
}

/// Portable implementation of [`match_byte`].
#[inline(always)]
pub fn match_byte_portable(target: u8, group: &Group) -> u16 {
    let mut bits: u16 = 0;
    for (i, &byte) in group.iter().enumerate() {
        if byte == target {
            bits |= 1 << i;
        }
    }
    bits
}

/// SSE2 implementation of [`match_byte`].
#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline(always)]
pub fn match_byte_sse2(target: u8, group: &Group) -> u16 {
    use core::arch::x86_64::*;
    // SAFETY: `group` is exactly 16 readable bytes and `_mm_loadu_si128` has
    // no alignment requirement. SSE2 is statically enabled for this target.
    unsafe {
        let data = _mm_loadu_si128(group.as_ptr() as *const __m128i);
        let cmp = _mm_cmpeq_epi8(data, _mm_set1_epi8(target as i8));
        _mm_movemask_epi8(cmp) as u16
    }
}

/// Iterator over the set bit positions of a group mask, lowest first.
///
/// # Examples
///
/// ```rust
/// use flat_hash::group::BitMaskIter;
///
/// let positions: Vec<usize> = BitMaskIter::new(0b1000_0100_0000_0001).collect();
/// assert_eq!(positions, [0, 10, 15]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BitMaskIter(u16);

impl BitMaskIter {
    /// Wraps `mask` for iteration.
    #[inline(always)]
    pub fn new(mask: u16) -> Self {
        BitMaskIter(mask)
    }
}

impl Iterator for BitMaskIter {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let (position, rest) = next_match(self.0);
        self.0 = rest;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitMaskIter {}
