//! Dense all-pairs cost matrix.

use super::model::Graph;
use crate::error::{RouteError, RouteResult};

/// Square `n × n` matrix of path costs.
///
/// `get(i, i)` is always 0. Entries with no known cost hold
/// [`DistanceMatrix::UNKNOWN`] until matrix completion fills them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatrixRepr"))]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<u64>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MatrixRepr {
    size: usize,
    data: Vec<u64>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixRepr> for DistanceMatrix {
    type Error = RouteError;

    fn try_from(repr: MatrixRepr) -> RouteResult<Self> {
        let expected = repr.size.checked_mul(repr.size).unwrap_or(usize::MAX);
        if repr.data.len() != expected {
            return Err(RouteError::DimensionMismatch {
                expected,
                actual: repr.data.len(),
            });
        }
        Ok(Self {
            size: repr.size,
            data: repr.data,
        })
    }
}

impl DistanceMatrix {
    /// Sentinel for a pair whose cost is not known yet.
    pub const UNKNOWN: u64 = u64::MAX;

    /// Creates a matrix with zeros on the diagonal and every other entry unknown.
    pub fn new(size: usize) -> Self {
        let mut data = vec![Self::UNKNOWN; size * size];
        for i in 0..size {
            data[i * size + i] = 0;
        }
        Self { size, data }
    }

    /// Seeds a matrix from the graph's direct edges.
    ///
    /// Self-loops are ignored; the diagonal stays 0.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut m = Self::new(graph.len());
        for edge in graph.edges() {
            if edge.from != edge.to {
                m.data[edge.from * m.size + edge.to] = edge.weight;
            }
        }
        m
    }

    /// Builds a matrix from rows. Every row must have `rows.len()` entries.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> RouteResult<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(RouteError::DimensionMismatch {
                    expected: size,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { size, data })
    }

    /// Matrix dimension `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of `from → to`, or [`UNKNOWN`](Self::UNKNOWN).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.size + to]
    }

    #[inline]
    pub fn is_known(&self, from: usize, to: usize) -> bool {
        self.get(from, to) != Self::UNKNOWN
    }

    /// Sets the cost of `from → to`.
    pub fn set(&mut self, from: usize, to: usize, cost: u64) -> RouteResult<()> {
        for id in [from, to] {
            if id >= self.size {
                return Err(RouteError::UnknownNode {
                    id,
                    node_count: self.size,
                });
            }
        }
        self.data[from * self.size + to] = cost;
        Ok(())
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        // Chunk width must be nonzero; empty data yields no rows anyway.
        self.data.chunks(self.size.max(1))
    }

    /// Pairs `(i, j)` with `i != j` whose cost is still unknown, row-major.
    pub fn unknown_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n)
            .flat_map(move |i| (0..n).map(move |j| (i, j)))
            .filter(move |&(i, j)| !self.is_known(i, j))
    }

    /// Fails with the first unknown entry, if any.
    pub fn ensure_complete(&self) -> RouteResult<()> {
        match self.unknown_pairs().next() {
            Some((from, to)) => Err(RouteError::IncompleteMatrix { from, to }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    #[test]
    fn test_new_matrix() {
        let m = DistanceMatrix::new(3);
        assert_eq!(m.size(), 3);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    assert_eq!(m.get(i, j), 0);
                } else {
                    assert!(!m.is_known(i, j));
                }
            }
        }
        assert_eq!(m.unknown_pairs().count(), 6);
    }

    #[test]
    fn test_from_graph_ignores_self_loops() {
        let g = Graph::from_parts(
            vec![(0, "A", 0.0, 0.0), (1, "B", 1.0, 0.0)],
            vec![Edge::new(0, 1, 4), Edge::new(1, 1, 9)],
        )
        .unwrap();
        let m = DistanceMatrix::from_graph(&g);
        assert_eq!(m.get(0, 1), 4);
        assert_eq!(m.get(1, 1), 0);
        assert_eq!(m.get(1, 0), DistanceMatrix::UNKNOWN);
        assert_eq!(
            m.ensure_complete(),
            Err(RouteError::IncompleteMatrix { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_from_rows() {
        let m = DistanceMatrix::from_rows(vec![vec![0, 2], vec![3, 0]]).unwrap();
        assert_eq!(m.get(1, 0), 3);
        assert_eq!(m.rows().next(), Some(&[0, 2][..]));
        assert!(m.ensure_complete().is_ok());

        let err = DistanceMatrix::from_rows(vec![vec![0, 2], vec![3]]).unwrap_err();
        assert_eq!(err, RouteError::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_set_bounds() {
        let mut m = DistanceMatrix::new(2);
        m.set(0, 1, 5).unwrap();
        assert_eq!(m.get(0, 1), 5);
        assert!(m.set(0, 2, 1).is_err());
    }

    #[test]
    fn test_rows_of_empty_matrix() {
        let m = DistanceMatrix::new(0);
        assert_eq!(m.rows().count(), 0);
        assert!(m.ensure_complete().is_ok());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_checks_dimension() {
        let m = DistanceMatrix::from_rows(vec![vec![0, 2], vec![3, 0]]).unwrap();
        let back: DistanceMatrix =
            serde_json::from_str(&serde_json::to_string(&m).unwrap()).unwrap();
        assert_eq!(back, m);

        let short = r#"{"size":3,"data":[0,1,2,3]}"#;
        assert!(serde_json::from_str::<DistanceMatrix>(short).is_err());
    }
}
