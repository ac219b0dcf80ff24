//! Permutation operators for tour chromosomes.
//!
//! These operate on `&[usize]` index vectors and know nothing about
//! distances; [`Tour`](super::Tour) wraps them and keeps fitness current.
//!
//! # Crossover Operators
//!
//! - [`edge_crossover`] (EX / Edge-3): Whitley (2000), preserves edges,
//!   preferring those shared by both parents
//!
//! # Mutation Operators
//!
//! - [`adjacent_swap_mutation`]: per-gene swap with the predecessor, O(n)
//!
//! # References
//!
//! - Whitley, Starkweather & Fuquay (1989), "Scheduling Problems and
//!   Traveling Salesmen: The Genetic Edge Recombination Operator"
//! - Whitley (2000), "Permutations", in *Evolutionary Computation 1*

use rand::Rng;

// ============================================================================
// Construction
// ============================================================================

/// A uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    u_numflow::random::shuffle(&mut perm, rng);
    perm
}

// ============================================================================
// Edge table
// ============================================================================

/// How a neighbor relation appears across the two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Adjacent in only one parent.
    Single,
    /// Adjacent in both parents.
    Common,
}

/// Per-gene neighbor lists built from two parent tours.
///
/// Each gene has at most four entries (predecessor and successor in each
/// parent, cyclically); a relation seen twice is upgraded to
/// [`EdgeKind::Common`] in place. The relation is symmetric, so a gene
/// only has to be removed from the lists of its own neighbors.
#[derive(Debug, Clone)]
pub struct EdgeTable {
    neighbors: Vec<Vec<(usize, EdgeKind)>>,
}

impl EdgeTable {
    /// Builds the table for two permutations of the same length.
    ///
    /// # Panics
    /// Panics if parents have different lengths.
    pub fn new(parent1: &[usize], parent2: &[usize]) -> Self {
        let n = parent1.len();
        assert_eq!(n, parent2.len(), "parents must have equal length");

        let mut table = Self {
            neighbors: vec![Vec::with_capacity(4); n],
        };
        for parent in [parent1, parent2] {
            for i in 0..n {
                let gene = parent[i];
                table.record(gene, parent[(i + n - 1) % n]);
                table.record(gene, parent[(i + 1) % n]);
            }
        }
        table
    }

    fn record(&mut self, gene: usize, neighbor: usize) {
        let list = &mut self.neighbors[gene];
        match list.iter_mut().find(|(g, _)| *g == neighbor) {
            Some(entry) => entry.1 = EdgeKind::Common,
            None => list.push((neighbor, EdgeKind::Single)),
        }
    }

    /// Remaining neighbors of `gene`, in insertion order.
    pub fn neighbors(&self, gene: usize) -> &[(usize, EdgeKind)] {
        &self.neighbors[gene]
    }

    /// Removes `gene` from every other gene's list.
    pub fn remove(&mut self, gene: usize) {
        let adjacent: Vec<usize> = self.neighbors[gene].iter().map(|&(g, _)| g).collect();
        for other in adjacent {
            self.neighbors[other].retain(|&(g, _)| g != gene);
        }
    }

    /// Picks the successor of `current` from the table, if the table can
    /// decide one.
    ///
    /// 1. The last [`EdgeKind::Common`] neighbor in insertion order.
    /// 2. Otherwise the first neighbor with the fewest remaining entries,
    ///    ignoring neighbors with none left.
    fn next_gene(&self, current: usize) -> Option<usize> {
        let candidates = &self.neighbors[current];
        if let Some(&(gene, _)) = candidates
            .iter()
            .rev()
            .find(|(_, kind)| *kind == EdgeKind::Common)
        {
            return Some(gene);
        }

        let mut best: Option<(usize, usize)> = None;
        for &(gene, _) in candidates {
            let remaining = self.neighbors[gene].len();
            if remaining > 0 && best.map_or(true, |(_, fewest)| remaining < fewest) {
                best = Some((gene, remaining));
            }
        }
        best.map(|(gene, _)| gene)
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Edge crossover (EX, "Edge-3") for permutations.
///
/// # Algorithm (Whitley, 2000)
///
/// 1. Build an [`EdgeTable`] from both parents
/// 2. Start from a uniformly random gene
/// 3. Remove the current gene from the table, then continue with a common
///    neighbor, else the neighbor with the fewest remaining edges, else a
///    uniformly random unplaced gene
/// 4. Repeat until every gene is placed
///
/// The child is always a permutation of the same genes as the parents;
/// parents are left untouched.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn edge_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let mut table = EdgeTable::new(parent1, parent2);
    let mut pool = UnplacedPool::new(n);
    let mut child = Vec::with_capacity(n);

    let mut current = pool.take_random(rng);
    loop {
        child.push(current);
        table.remove(current);
        if pool.is_empty() {
            break;
        }
        current = match table.next_gene(current) {
            Some(gene) => {
                pool.take(gene);
                gene
            }
            None => pool.take_random(rng),
        };
    }

    child
}

/// Genes not yet placed in the child, with O(1) removal.
struct UnplacedPool {
    genes: Vec<usize>,
    slot: Vec<usize>,
}

impl UnplacedPool {
    fn new(n: usize) -> Self {
        Self {
            genes: (0..n).collect(),
            slot: (0..n).collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    fn take(&mut self, gene: usize) {
        let at = self.slot[gene];
        self.genes.swap_remove(at);
        if let Some(&moved) = self.genes.get(at) {
            self.slot[moved] = at;
        }
    }

    fn take_random<R: Rng>(&mut self, rng: &mut R) -> usize {
        let gene = self.genes[rng.random_range(0..self.genes.len())];
        self.take(gene);
        gene
    }
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Adjacent swap mutation.
///
/// For each position `i >= 1`, independently with probability `rate`,
/// swaps `perm[i]` with `perm[i - 1]`. Returns the number of swaps made.
///
/// # Complexity
/// O(n)
pub fn adjacent_swap_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) -> usize {
    let mut swaps = 0;
    for i in 1..perm.len() {
        if rng.random_range(0.0..1.0) < rate {
            perm.swap(i, i - 1);
            swaps += 1;
        }
    }
    swaps
}

// ============================================================================
// Tests
// ============================================================================
