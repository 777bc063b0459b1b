//! Traveling salesman over a permutation genotype.
//!
//! A genotype is a visiting order of all cities. Fitness is the inverse of
//! the closed tour length, so shorter tours score higher.

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::ConfigError;
use crate::ga::{FitnessFunction, Permutation, Problem};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An immutable set of cities with pairwise-distinct coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspInstance {
    cities: Vec<City>,
}

impl TspInstance {
    /// Creates an instance from explicit coordinates.
    ///
    /// Fails on an empty list, a NaN or infinite coordinate, or two cities
    /// sharing coordinates.
    pub fn new(cities: Vec<City>) -> Result<Self, ConfigError> {
        if cities.is_empty() {
            return Err(ConfigError::GenotypeLength);
        }
        if let Some(index) = cities
            .iter()
            .position(|c| !(c.x.is_finite() && c.y.is_finite()))
        {
            return Err(ConfigError::NonFiniteCity { index });
        }
        for (i, a) in cities.iter().enumerate() {
            if let Some(j) = cities[i + 1..].iter().position(|b| b == a) {
                return Err(ConfigError::DuplicateCity {
                    first: i,
                    second: i + 1 + j,
                });
            }
        }
        Ok(Self { cities })
    }

    /// `n` cities evenly spaced on the unit circle, city 0 at angle zero.
    ///
    /// The optimal tour visits them in angular order.
    pub fn on_unit_circle(n: usize) -> Result<Self, ConfigError> {
        let step = TAU / n as f64;
        let cities = (0..n)
            .map(|i| {
                let angle = i as f64 * step;
                City::new(angle.cos(), angle.sin())
            })
            .collect();
        Self::new(cities)
    }

    /// `n` distinct cities drawn uniformly from the unit square.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Result<Self, ConfigError> {
        let mut cities: Vec<City> = Vec::with_capacity(n);
        while cities.len() < n {
            let c = City::new(rng.random::<f64>(), rng.random::<f64>());
            if !cities.contains(&c) {
                cities.push(c);
            }
        }
        Self::new(cities)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; instances have at least one city.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City coordinates, indexed by city id.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Distance between cities `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.cities[a].distance(&self.cities[b])
    }

    /// Length of the closed tour, including the edge back to the start.
    ///
    /// A single-city tour has length zero.
    pub fn tour_length(&self, tour: &Permutation) -> f64 {
        let order = tour.order();
        let Some((&first, &last)) = order.first().zip(order.last()) else {
            return 0.0;
        };
        let open: f64 = order.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(last, first)
    }
}

impl FitnessFunction for TspInstance {
    type Genotype = Permutation;

    /// `1 / tour_length`; a zero-length (single-city) tour scores infinity.
    fn evaluate(&self, genotype: &Permutation) -> f64 {
        1.0 / self.tour_length(genotype)
    }
}

impl Problem for TspInstance {
    fn genotype_len(&self) -> usize {
        self.cities.len()
    }

    fn random_genotype<R: Rng>(&self, rng: &mut R) -> Permutation {
        Permutation::random(self.cities.len(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Genotype;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_square() -> TspInstance {
        TspInstance::new(vec![
            (0.0, 0.0).into(),
            (1.0, 0.0).into(),
            (1.0, 1.0).into(),
            (0.0, 1.0).into(),
        ])
        .unwrap()
    }

    fn tour(order: &[usize]) -> Permutation {
        Permutation::new(order.to_vec()).unwrap()
    }

    #[test]
    fn test_perimeter_tour() {
        let t = unit_square();
        assert!((t.tour_length(&tour(&[0, 1, 2, 3])) - 4.0).abs() < 1e-12);
        assert!((t.evaluate(&tour(&[3, 2, 1, 0])) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_crossing_tour_is_longer() {
        let t = unit_square();
        let crossing = t.tour_length(&tour(&[0, 2, 1, 3]));
        assert!((crossing - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
        assert!(t.evaluate(&tour(&[0, 2, 1, 3])) < t.evaluate(&tour(&[0, 1, 2, 3])));
    }

    #[test]
    fn test_length_is_rotation_invariant() {
        let mut rng = StdRng::seed_from_u64(17);
        let t = TspInstance::random(9, &mut rng).unwrap();
        let p = t.random_genotype(&mut rng);
        let mut rotated = p.order().to_vec();
        rotated.rotate_left(4);
        assert!((t.tour_length(&p) - t.tour_length(&tour(&rotated))).abs() < 1e-9);
    }

    #[test]
    fn test_single_city() {
        let t = TspInstance::new(vec![City::new(0.3, 0.7)]).unwrap();
        let p = Permutation::identity(1);
        assert_eq!(t.tour_length(&p), 0.0);
        assert!(t.evaluate(&p).is_infinite());
    }

    #[test]
    fn test_two_cities_round_trip() {
        let t = TspInstance::new(vec![City::new(0.0, 0.0), City::new(3.0, 4.0)]).unwrap();
        assert!((t.tour_length(&Permutation::identity(2)) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_circle_layout() {
        let t = TspInstance::on_unit_circle(6).unwrap();
        assert_eq!(t.len(), 6);
        assert!((t.cities()[0].x - 1.0).abs() < 1e-12);
        // Adjacent cities on a hexagon are one radius apart.
        assert!((t.tour_length(&Permutation::identity(6)) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert_eq!(TspInstance::new(vec![]), Err(ConfigError::GenotypeLength));
        assert_eq!(TspInstance::on_unit_circle(0), Err(ConfigError::GenotypeLength));
        assert_eq!(
            TspInstance::new(vec![
                City::new(0.0, 0.0),
                City::new(1.0, 1.0),
                City::new(0.0, 0.0)
            ]),
            Err(ConfigError::DuplicateCity {
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        assert_eq!(
            TspInstance::new(vec![
                City::new(f64::NAN, 0.0),
                City::new(1.0, 0.0),
                City::new(0.0, 1.0)
            ]),
            Err(ConfigError::NonFiniteCity { index: 0 })
        );
        assert_eq!(
            TspInstance::new(vec![City::new(0.0, 0.0), City::new(1.0, f64::INFINITY)]),
            Err(ConfigError::NonFiniteCity { index: 1 })
        );
        // Two NaN cities would otherwise slip past the duplicate check.
        assert_eq!(
            TspInstance::new(vec![
                City::new(0.5, 0.5),
                City::new(f64::NAN, f64::NAN),
                City::new(f64::NAN, f64::NAN)
            ]),
            Err(ConfigError::NonFiniteCity { index: 1 })
        );
    }

    #[test]
    fn test_random_genotype_is_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let t = TspInstance::random(15, &mut rng).unwrap();
        for _ in 0..20 {
            assert!(t.random_genotype(&mut rng).is_valid(15));
        }
    }
}
