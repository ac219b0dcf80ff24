//! End-to-end route planning.
//!
//! Completes the distance matrix, evolves a tour over it, and expands the
//! winning tour into the real node sequence.

use crate::error::{RouteError, RouteResult};
use crate::ga::{GaConfig, GaRunner, Tour, TourProblem};
use crate::graph::{DistanceMatrix, Graph};
use crate::path::{complete_matrix, PathTable};
use crate::report::{format_matrix, format_route};
use log::info;

/// Everything produced by [`plan_route`].
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// The input graph plus the shortcut edges added during completion.
    pub graph: Graph,
    pub matrix: DistanceMatrix,
    pub paths: PathTable,
    /// Best visiting order found.
    pub tour: Tour,
    /// Cycle cost of `tour`.
    pub cost: u64,
    /// Generation in which `tour` was first found.
    pub best_generation: usize,
    /// Generations produced after the initial population.
    pub generations: usize,
    /// Closed node sequence realizing `tour` on the original edges.
    pub route: Vec<usize>,
}

impl RoutePlan {
    /// Multi-line text summary: the matrix, the tour, and the named route.
    pub fn report(&self) -> RouteResult<String> {
        Ok(format!(
            "{}\n\nBest tour (generation {}): {}\n{}",
            format_matrix(&self.matrix),
            self.best_generation,
            self.tour,
            format_route(&self.graph, &self.route, self.cost)?
        ))
    }
}

/// Plans the cheapest closed route through every node of `graph`.
///
/// # Errors
/// - [`RouteError::EmptyGraph`] for a graph without nodes.
/// - [`RouteError::Unreachable`] if some pair has no path.
/// - [`RouteError::Config`] if `config` is invalid.
pub fn plan_route(mut graph: Graph, config: &GaConfig) -> RouteResult<RoutePlan> {
    if graph.is_empty() {
        return Err(RouteError::EmptyGraph);
    }
    config.validate()?;

    let completion = complete_matrix(&mut graph)?;
    let matrix = completion.matrix;

    let (tour, best_generation, generations) = if matrix.size() == 1 {
        (Tour::from_order(&matrix, vec![0])?, 0, 0)
    } else {
        let problem = TourProblem::new(&matrix)?;
        let result = GaRunner::run(&problem, config)?;
        (result.best, result.best_generation, result.generations)
    };

    let route = completion.paths.expand_tour(tour.chromosome())?;
    let cost = tour.fitness();
    info!(
        "route planned: {} stops, cost {cost}, best found in generation {best_generation}",
        matrix.size()
    );

    Ok(RoutePlan {
        graph,
        matrix,
        paths: completion.paths,
        tour,
        cost,
        best_generation,
        generations,
        route,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Graph {
        Graph::from_parts(
            vec![
                (0, "A", 0.0, 0.0),
                (1, "B", 10.0, 0.0),
                (2, "C", 10.0, 10.0),
                (3, "D", 0.0, 10.0),
            ],
            vec![(0, 1, 11), (1, 2, 11), (2, 3, 11), (3, 0, 11)],
        )
        .unwrap()
    }

    #[test]
    fn test_plan_ring() {
        let config = GaConfig::default().with_max_generations(100).with_seed(7);
        let plan = plan_route(ring(), &config).unwrap();

        assert_eq!(plan.cost, 44);
        assert_eq!(plan.route.len(), 5);
        assert_eq!(plan.route.first(), plan.route.last());
        for hop in plan.route.windows(2) {
            assert!(plan.graph.edge_weight(hop[0], hop[1]).is_some());
        }
        assert!(plan.matrix.ensure_complete().is_ok());
        assert!(plan.best_generation <= plan.generations);
    }

    #[test]
    fn test_plan_single_node() {
        let g = Graph::from_parts(vec![(0, "Solo", 1.0, 1.0)], Vec::<(usize, usize, u64)>::new())
            .unwrap();
        let plan = plan_route(g, &GaConfig::default()).unwrap();
        assert_eq!(plan.tour.chromosome(), &[0]);
        assert_eq!(plan.cost, 0);
        assert_eq!(plan.route, vec![0]);
        assert_eq!(plan.generations, 0);
    }

    #[test]
    fn test_plan_errors() {
        let empty = Graph::new(Vec::new()).unwrap();
        assert_eq!(
            plan_route(empty, &GaConfig::default()).unwrap_err(),
            RouteError::EmptyGraph
        );

        let split = Graph::from_parts(
            vec![(0, "A", 0.0, 0.0), (1, "B", 1.0, 0.0)],
            vec![(0, 1, 1)],
        )
        .unwrap();
        assert_eq!(
            plan_route(split, &GaConfig::default().with_max_generations(1)).unwrap_err(),
            RouteError::Unreachable { start: 1, goal: 0 }
        );

        let bad = GaConfig::default().with_mutation_rate(2.0);
        assert!(matches!(
            plan_route(ring(), &bad),
            Err(RouteError::Config { .. })
        ));
    }

    #[test]
    fn test_report() {
        let config = GaConfig::default().with_max_generations(50).with_seed(1);
        let plan = plan_route(ring(), &config).unwrap();
        let text = plan.report().unwrap();
        assert!(text.starts_with("\t0\t1\t2\t3\t"));
        assert!(text.ends_with("Path length = 0 h 44 min"));
    }
}
