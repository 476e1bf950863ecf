use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// A finite space `{0, 1, ..., n - 1}`.
#[derive(Debug, Clone)]
pub struct DiscreteSpace {
    pub n: usize,
    dist: Uniform<usize>,
}

impl DiscreteSpace {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "a discrete space needs at least one element");
        Self {
            n,
            dist: Uniform::from(0..n),
        }
    }

    pub fn contains(&self, value: usize) -> bool {
        value < self.n
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.dist.sample(rng)
    }
}

impl PartialEq for DiscreteSpace {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
    }
}

impl Eq for DiscreteSpace {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn contains_only_values_below_n() {
        let space = DiscreteSpace::new(4);
        assert!(space.contains(0));
        assert!(space.contains(3));
        assert!(!space.contains(4));
    }

    #[test]
    fn samples_stay_inside_the_space() {
        let space = DiscreteSpace::new(11);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(space.contains(space.sample(&mut rng)));
        }
    }
}
