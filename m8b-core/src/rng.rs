//! Small pseudo-random generator for answer selection
//!
//! xorshift32: plenty for picking one of a dozen answers, and it keeps
//! the core free of an RNG dependency.

#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator; a zero seed is replaced since it is a fixed point
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Mix extra entropy (e.g. a timestamp) into the state
    pub fn reseed(&mut self, entropy: u32) {
        let mixed = self.state ^ entropy.wrapping_mul(0x9E37_79B9);
        *self = Self::new(mixed);
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish index in `0..len`; `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_u32() as usize) % len
    }
}
