use rand_core::{impls, Error, RngCore, SeedableRng};

const INCREMENT: u32 = 0x6D2B79F5;
const TWO_POW_32: f64 = 4294967296.0;

/// Mulberry32: a 32-bit state generator producing the same sequence on every
/// platform for a given seed.
///
/// One instance belongs to one sampling run. Nothing is shared.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    fn mix(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

// Signed seeds keep their bit pattern.
impl From<i32> for Mulberry32 {
    fn from(seed: i32) -> Self {
        Self::new(seed as u32)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.mix()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Uniform `[0, 1)` draw from any generator, built from one 32-bit word
/// so that a [`Mulberry32`] yields exactly [`Mulberry32::next_f64`].
pub fn unit_f64<R: RngCore>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / TWO_POW_32
}
