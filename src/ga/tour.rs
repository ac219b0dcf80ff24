//! Tour individuals over a completed distance matrix.

use super::operators::{adjacent_swap_mutation, edge_crossover, random_permutation};
use super::types::{GaProblem, Individual};
use crate::error::{GenerationError, RouteError, RouteResult};
use crate::graph::DistanceMatrix;
use crate::report::format_minutes;
use rand::Rng;
use std::fmt;

/// Total cost of the closed tour visiting `order`.
///
/// Sums `M[order[i-1]][order[i]]` and the closing edge back to
/// `order[0]`. Empty and single-stop tours cost 0.
pub fn tour_cost(matrix: &DistanceMatrix, order: &[usize]) -> u64 {
    let Some((&first, &last)) = order.first().zip(order.last()) else {
        return 0;
    };
    let open: u64 = order
        .windows(2)
        .map(|w| matrix.get(w[0], w[1]))
        .fold(0, u64::saturating_add);
    open.saturating_add(matrix.get(last, first))
}

/// A visiting order (chromosome) and its cached cycle cost.
///
/// The chromosome is always a permutation of `0..n`; the fitness always
/// matches it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TourRepr"))]
pub struct Tour {
    chromosome: Vec<usize>,
    fitness: u64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TourRepr {
    chromosome: Vec<usize>,
    fitness: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<TourRepr> for Tour {
    type Error = RouteError;

    fn try_from(repr: TourRepr) -> RouteResult<Self> {
        check_permutation(&repr.chromosome)?;
        Ok(Self {
            chromosome: repr.chromosome,
            fitness: repr.fitness,
        })
    }
}

/// Fails on the first gene that repeats or lies outside `0..order.len()`.
fn check_permutation(order: &[usize]) -> RouteResult<()> {
    let mut seen = vec![false; order.len()];
    for &gene in order {
        if gene >= order.len() || std::mem::replace(&mut seen[gene], true) {
            return Err(RouteError::NotAPermutation { gene });
        }
    }
    Ok(())
}

impl Tour {
    /// Wraps an explicit visiting order.
    ///
    /// # Errors
    /// - [`RouteError::DimensionMismatch`] if the length differs from the
    ///   matrix size.
    /// - [`RouteError::NotAPermutation`] if a node repeats or is out of range.
    pub fn from_order(matrix: &DistanceMatrix, order: Vec<usize>) -> RouteResult<Self> {
        let n = matrix.size();
        if order.len() != n {
            return Err(RouteError::DimensionMismatch {
                expected: n,
                actual: order.len(),
            });
        }
        check_permutation(&order)?;
        Ok(Self::evaluated(matrix, order))
    }

    /// A uniformly random tour.
    pub fn random<R: Rng>(matrix: &DistanceMatrix, rng: &mut R) -> Self {
        Self::evaluated(matrix, random_permutation(matrix.size(), rng))
    }

    /// Edge-crosses `self` with `other` into a new tour. Neither parent
    /// changes.
    ///
    /// # Errors
    /// [`RouteError::DimensionMismatch`] if either parent was built for a
    /// matrix of a different size.
    pub fn cross<R: Rng>(
        &self,
        other: &Tour,
        matrix: &DistanceMatrix,
        rng: &mut R,
    ) -> RouteResult<Self> {
        for parent in [self, other] {
            if parent.chromosome.len() != matrix.size() {
                return Err(RouteError::DimensionMismatch {
                    expected: matrix.size(),
                    actual: parent.chromosome.len(),
                });
            }
        }
        Ok(Self::evaluated(
            matrix,
            edge_crossover(&self.chromosome, &other.chromosome, rng),
        ))
    }

    /// Applies adjacent-swap mutation and refreshes the fitness.
    pub fn mutate<R: Rng>(&mut self, matrix: &DistanceMatrix, rate: f64, rng: &mut R) {
        if adjacent_swap_mutation(&mut self.chromosome, rate, rng) > 0 {
            self.fitness = tour_cost(matrix, &self.chromosome);
        }
    }

    pub fn chromosome(&self) -> &[usize] {
        &self.chromosome
    }

    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    fn evaluated(matrix: &DistanceMatrix, chromosome: Vec<usize>) -> Self {
        let fitness = tour_cost(matrix, &chromosome);
        Self {
            chromosome,
            fitness,
        }
    }
}

impl Individual for Tour {
    type Fitness = u64;

    fn fitness(&self) -> u64 {
        self.fitness
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.chromosome {
            write!(f, "{gene}->")?;
        }
        write!(f, "(path length: {})", format_minutes(self.fitness))
    }
}

/// TSP over a completed [`DistanceMatrix`], solved with edge crossover and
/// adjacent-swap mutation.
#[derive(Debug, Clone, Copy)]
pub struct TourProblem<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> TourProblem<'a> {
    /// # Errors
    /// [`RouteError::IncompleteMatrix`] if any entry is still unknown.
    pub fn new(matrix: &'a DistanceMatrix) -> RouteResult<Self> {
        matrix.ensure_complete()?;
        Ok(Self { matrix })
    }
}

impl GaProblem for TourProblem<'_> {
    type Individual = Tour;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Tour {
        Tour::random(self.matrix, rng)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Tour,
        parent2: &Tour,
        rng: &mut R,
    ) -> Result<Tour, GenerationError> {
        parent1
            .cross(parent2, self.matrix, rng)
            .map_err(|err| GenerationError::operator(err.to_string()))
    }

    fn mutate<R: Rng>(&self, individual: &mut Tour, rate: f64, rng: &mut R) {
        individual.mutate(self.matrix, rate, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_numflow::random::create_rng;

    fn classic4() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap()
    }

    fn asymmetric3() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![vec![0, 1, 10], vec![10, 0, 1], vec![1, 10, 0]]).unwrap()
    }

    #[test]
    fn test_tour_cost() {
        let m = classic4();
        assert_eq!(tour_cost(&m, &[0, 1, 3, 2]), 10 + 25 + 30 + 15);
        assert_eq!(tour_cost(&m, &[0, 1, 2, 3]), 10 + 35 + 30 + 20);
        assert_eq!(tour_cost(&m, &[2]), 0);
        assert_eq!(tour_cost(&m, &[]), 0);
    }

    #[test]
    fn test_cost_rotation_invariant() {
        let m = asymmetric3();
        let base = tour_cost(&m, &[0, 1, 2]);
        assert_eq!(base, 3);
        assert_eq!(tour_cost(&m, &[1, 2, 0]), base);
        assert_eq!(tour_cost(&m, &[2, 0, 1]), base);
        // Reversal differs on an asymmetric matrix.
        assert_eq!(tour_cost(&m, &[2, 1, 0]), 30);
    }

    #[test]
    fn test_from_order_validates() {
        let m = classic4();
        let t = Tour::from_order(&m, vec![0, 1, 3, 2]).unwrap();
        assert_eq!(t.fitness(), 80);

        assert_eq!(
            Tour::from_order(&m, vec![0, 1, 2]),
            Err(RouteError::DimensionMismatch { expected: 4, actual: 3 })
        );
        assert_eq!(
            Tour::from_order(&m, vec![0, 1, 1, 2]),
            Err(RouteError::NotAPermutation { gene: 1 })
        );
        assert_eq!(
            Tour::from_order(&m, vec![0, 1, 2, 4]),
            Err(RouteError::NotAPermutation { gene: 4 })
        );
    }

    #[test]
    fn test_random_tour_fitness_is_current() {
        let m = classic4();
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let t = Tour::random(&m, &mut rng);
            assert_eq!(t.fitness(), tour_cost(&m, t.chromosome()));
        }
    }

    #[test]
    fn test_cross_and_mutate_keep_fitness_current() {
        let m = classic4();
        let mut rng = create_rng(3);
        let a = Tour::from_order(&m, vec![0, 1, 2, 3]).unwrap();
        let b = Tour::from_order(&m, vec![3, 1, 0, 2]).unwrap();
        for _ in 0..50 {
            let mut child = a.cross(&b, &m, &mut rng).unwrap();
            assert_eq!(child.fitness(), tour_cost(&m, child.chromosome()));
            child.mutate(&m, 0.5, &mut rng);
            assert_eq!(child.fitness(), tour_cost(&m, child.chromosome()));
        }
        assert_eq!(a.chromosome(), &[0, 1, 2, 3]);
        assert_eq!(b.chromosome(), &[3, 1, 0, 2]);
    }

    #[test]
    fn test_cross_rejects_foreign_parent() {
        let m = classic4();
        let small = asymmetric3();
        let mut rng = create_rng(8);
        let a = Tour::from_order(&m, vec![0, 1, 2, 3]).unwrap();
        let b = Tour::from_order(&small, vec![2, 0, 1]).unwrap();
        assert_eq!(
            a.cross(&b, &m, &mut rng),
            Err(RouteError::DimensionMismatch { expected: 4, actual: 3 })
        );

        let problem = TourProblem::new(&m).unwrap();
        assert!(matches!(
            problem.crossover(&a, &b, &mut rng),
            Err(GenerationError::Operator { .. })
        ));
    }

    #[test]
    fn test_problem_requires_complete_matrix() {
        let m = DistanceMatrix::new(3);
        assert!(matches!(
            TourProblem::new(&m),
            Err(RouteError::IncompleteMatrix { .. })
        ));
        assert!(TourProblem::new(&classic4()).is_ok());
    }

    #[test]
    fn test_display() {
        let m = classic4();
        let t = Tour::from_order(&m, vec![0, 1, 3, 2]).unwrap();
        assert_eq!(t.to_string(), "0->1->3->2->(path length: 1 h 20 min)");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_requires_permutation() {
        let ok: Tour = serde_json::from_str(r#"{"chromosome":[2,0,1],"fitness":9}"#).unwrap();
        assert_eq!(ok.chromosome(), &[2, 0, 1]);

        for json in [
            r#"{"chromosome":[0,0,1],"fitness":9}"#,
            r#"{"chromosome":[0,3,1],"fitness":9}"#,
        ] {
            assert!(serde_json::from_str::<Tour>(json).is_err(), "{json}");
        }
    }
}
