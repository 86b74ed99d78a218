//! Reduction rules for the vertex cover problem.
//! These rules include:
//! * `SimpleRules` that remove isolated nodes, and nodes of degree 1 while adding their neighbor
//! to the solution.
//! * `Persistency` which fixes all nodes that take an integral value in an optimal solution of
//! the relaxation: nodes at one enter the solution, nodes at zero are excluded.

use crate::vc_instance::VCInstance;
use crate::lp::LpSolution;
use itertools::Itertools;

impl VCInstance {

    /// Applies some simple reduction rules. The rules are applied for each node in ascending id
    /// order until no more rules can be applied.
    /// Returns true if at least one reduction has been applied.
    ///
    /// The rules are:
    /// Rule 1: Remove isolated nodes.
    /// Rule 2: Remove nodes with degree 1 and adds their neighbor to the solution.
    pub fn simple_rules(&mut self) -> bool {
        let mut applied = false;
        let mut changed = true;
        while changed {
            changed = false;
            let nodes: Vec<_> = self.graph.nodes().collect();
            for node in nodes {
                // `node` could have been removed by now.
                if let Some(neighbors) = self.graph.neighbors(node).clone() {
                    if neighbors.is_empty() {
                        self.delete_node(node);
                        applied = true;
                    } else if neighbors.len() == 1 {
                        self.add_to_solution(*neighbors.iter().next().expect("`node`s degree is 1"));
                        self.delete_node(node);
                        applied = true;
                        changed = true;
                    }
                }
            }
        }
        applied
    }

    /// Fixes every node that takes an integral value in the given optimal relaxation of the
    /// remaining graph: one nodes enter the solution, zero nodes are excluded. Excluding is
    /// sound since every neighbor of a zero node is a one node, so zero nodes are isolated once
    /// the one nodes left the graph.
    /// Returns how many nodes were covered and how many were excluded.
    pub fn apply_persistency(&mut self, relax: &LpSolution) -> (usize, usize) {
        let ones = relax.integral_ones();
        let zeros = relax.integral_zeros();
        if ones.is_empty() && zeros.is_empty() {
            return (0, 0)
        }
        self.add_all_to_solution(&ones).expect("all one nodes are in `self.graph`");
        for node in zeros.iter().sorted() {
            debug_assert_eq!(self.graph.degree(*node), Some(0));
            self.delete_node(*node);
        }
        (ones.len(), zeros.len())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::UGraph;
    use fxhash::FxHashMap;

    #[test]
    fn simple_rules_path_test() {
        let graph = UGraph::from_edge_list(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let mut ins = VCInstance::new(graph);
        assert!(ins.simple_rules());
        assert_eq!(ins.graph.num_nodes(), 0);
        assert_eq!(ins.solution, vec![1, 3].into_iter().collect());
    }

    #[test]
    fn simple_rules_star_test() {
        let graph = UGraph::from_edge_list(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        let mut ins = VCInstance::new(graph);
        assert!(ins.simple_rules());
        assert_eq!(ins.graph.num_nodes(), 0);
        assert_eq!(ins.solution, vec![0].into_iter().collect());
    }

    #[test]
    fn simple_rules_isolated_test() {
        let graph = UGraph::from_edge_list(3, &[]).unwrap();
        let mut ins = VCInstance::new(graph);
        assert!(ins.simple_rules());
        assert_eq!(ins.graph.num_nodes(), 0);
        assert!(ins.solution.is_empty());
    }

    #[test]
    fn simple_rules_fixed_point_test() {
        // a triangle admits no simple rule
        let graph = UGraph::from_edge_list(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        let mut ins = VCInstance::new(graph);
        let check_ins = ins.clone();
        assert!(!ins.simple_rules());
        assert_eq!(ins, check_ins);
    }

    #[test]
    fn simple_rules_rebuild_test() {
        let graph = UGraph::from_edge_list(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let mut ins = VCInstance::new(graph);
        let check_ins = ins.clone();
        ins.put_register();
        assert!(ins.simple_rules());
        assert_eq!(ins.solution, vec![1, 3, 5].into_iter().collect());
        ins.rebuild_section();
        assert_eq!(ins, check_ins);
    }

    #[test]
    fn persistency_star_test() {
        let graph = UGraph::from_edge_list(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        let mut ins = VCInstance::new(graph);
        let mut values = FxHashMap::default();
        values.insert(0, 1.0);
        for leaf in 1..5 {
            values.insert(leaf, 0.0);
        }
        let relax = LpSolution { objective: 1.0, values };
        assert_eq!(ins.apply_persistency(&relax), (1, 4));
        assert_eq!(ins.graph.num_nodes(), 0);
        assert_eq!(ins.solution, vec![0].into_iter().collect());
    }

    #[test]
    fn persistency_all_half_test() {
        let graph = UGraph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let mut ins = VCInstance::new(graph);
        let values = (0..4).map(|node| (node, 0.5)).collect();
        let relax = LpSolution { objective: 2.0, values };
        assert_eq!(ins.apply_persistency(&relax), (0, 0));
        assert_eq!(ins.graph.num_nodes(), 4);
    }

}
