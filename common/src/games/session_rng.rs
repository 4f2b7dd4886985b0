use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable source for every random decision a session makes: the first
/// mover of a new game and the heuristic fallback of the AI.
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derives an independent generator, e.g. for a task that runs off the
    /// session's thread.
    pub fn fork(&mut self) -> Self {
        Self::new(self.rng.random())
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_bool(&mut self) -> bool {
        self.rng.random()
    }

    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        Some(items[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        let left: Vec<u32> = (0..16).map(|_| a.random_range(0..1000)).collect();
        let right: Vec<u32> = (0..16).map(|_| b.random_range(0..1000)).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let mut rng = SessionRng::new(42);
        let empty: [usize; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[5usize]), Some(5));
    }
}
