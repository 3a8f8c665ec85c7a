use rand::{rngs::StdRng, Rng, SeedableRng};

/// Chooses one of `count` candidate menus.
///
/// Implementations must return an index below `count`; callers never ask
/// with `count == 0`.
pub trait MenuPicker: Send {
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform choice over the candidates.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl MenuPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

#[cfg(test)]
pub(crate) struct FixedPicker(pub usize);

#[cfg(test)]
impl MenuPicker for FixedPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.0.min(count - 1)
    }
}
