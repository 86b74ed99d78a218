//! The interchangeable branching strategies of the search.
//! All three are deterministic: node candidates are ranked by degree with ties broken towards
//! the smallest id, and strong branching keeps the first candidate among equal scores.

use crate::vc_instance::VCInstance;
use crate::lp::{RelaxAdapter, Relaxation, INT_EPS};
use crate::cust_error::ProcessingError;

/// Selects how the search picks its branch node and which branch it explores first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Branch on the max degree node, explore the include branch first.
    IncludeMaxDegree,
    /// Branch on the max degree node, explore the exclude branch first.
    ExcludeMaxDegree,
    /// Score the top degree candidates by relaxation probes of both branches, branch on the
    /// best scoring one.
    FullStrong,
}

impl Strategy {

    /// Maps the numeric strategy ids `1`, `2` and `3`.
    pub fn from_id(id: u8) -> Result<Self, ProcessingError> {
        match id {
            1 => Ok(Strategy::IncludeMaxDegree),
            2 => Ok(Strategy::ExcludeMaxDegree),
            3 => Ok(Strategy::FullStrong),
            _ => Err(ProcessingError::InvalidParameter(
                format!("{} is not a strategy id, expected 1, 2 or 3", id))),
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Strategy::IncludeMaxDegree => 1,
            Strategy::ExcludeMaxDegree => 2,
            Strategy::FullStrong => 3,
        }
    }

    /// The stable name used in records.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::IncludeMaxDegree => "include_max_degree",
            Strategy::ExcludeMaxDegree => "exclude_max_degree",
            Strategy::FullStrong => "full_strong",
        }
    }

    /// All strategies in ascending id order.
    pub fn all() -> [Strategy; 3] {
        [Strategy::IncludeMaxDegree, Strategy::ExcludeMaxDegree, Strategy::FullStrong]
    }

}

/// A branching decision: the node to branch on, and whether the include branch is explored
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchDecision {
    pub node: usize,
    pub include_first: bool,
}

impl VCInstance {

    /// Picks the branch node for the current graph. The graph holds at least one edge here.
    /// `base_objective` is the relaxation optimum of the current graph and is only read by
    /// `Strategy::FullStrong`.
    pub(crate) fn select_branch<R: Relaxation>(
        &mut self,
        strategy: Strategy,
        adapter: &mut RelaxAdapter<R>,
        base_objective: f64,
        max_candidates: Option<usize>,
    ) -> BranchDecision {
        match strategy {
            Strategy::IncludeMaxDegree => BranchDecision {
                node: self.graph.max_degree_node().expect("the graph has edges"),
                include_first: true,
            },
            Strategy::ExcludeMaxDegree => BranchDecision {
                node: self.graph.max_degree_node().expect("the graph has edges"),
                include_first: false,
            },
            Strategy::FullStrong => self.full_strong_branch(adapter, base_objective, max_candidates),
        }
    }

    /// Scores every candidate by how far either tentative branch lifts the relaxation optimum
    /// above `base_objective` and branches on the best one. Candidates with equal scores keep
    /// the earlier one, so the degree ranking decides.
    fn full_strong_branch<R: Relaxation>(
        &mut self,
        adapter: &mut RelaxAdapter<R>,
        base_objective: f64,
        max_candidates: Option<usize>,
    ) -> BranchDecision {
        let cap = max_candidates.unwrap_or(usize::MAX).max(1);
        let candidates = self.graph.top_degree_nodes(cap);
        let mut best: Option<(BranchDecision, f64)> = None;
        for node in candidates {
            let lp_include = self.probe_include(node, adapter);
            let lp_exclude = self.probe_exclude(node, adapter);
            let score = (lp_include - base_objective)
                .max(lp_exclude - base_objective)
                .max(INT_EPS);
            if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
                let decision = BranchDecision { node, include_first: lp_include >= lp_exclude };
                best = Some((decision, score));
            }
        }
        best.expect("the graph has nodes to branch on").0
    }

    /// Tentatively covers `node` and returns the relaxation optimum of the remainder. Edgeless
    /// remainders score zero without an oracle call.
    fn probe_include<R: Relaxation>(&mut self, node: usize, adapter: &mut RelaxAdapter<R>) -> f64 {
        self.put_register();
        self.add_to_solution(node);
        let objective = self.probe_objective(adapter);
        self.rebuild_section();
        objective
    }

    /// Tentatively excludes `node`, covering all its neighbors, and returns the relaxation
    /// optimum of the remainder.
    fn probe_exclude<R: Relaxation>(&mut self, node: usize, adapter: &mut RelaxAdapter<R>) -> f64 {
        self.put_register();
        let neighbors = self.graph.neighbors(node).clone().expect("`node` exists");
        self.add_all_to_solution(&neighbors).expect("all neighbors are in the graph");
        self.delete_node(node);
        let objective = self.probe_objective(adapter);
        self.rebuild_section();
        objective
    }

    fn probe_objective<R: Relaxation>(&mut self, adapter: &mut RelaxAdapter<R>) -> f64 {
        if self.graph.num_edges() == 0 {
            0.0
        } else {
            adapter.objective(&self.graph)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::graph::UGraph;
    use crate::lp::FlowRelaxation;

    #[test]
    fn strategy_id_test() {
        assert_eq!(Strategy::from_id(1).unwrap(), Strategy::IncludeMaxDegree);
        assert_eq!(Strategy::from_id(2).unwrap(), Strategy::ExcludeMaxDegree);
        assert_eq!(Strategy::from_id(3).unwrap(), Strategy::FullStrong);
        assert!(Strategy::from_id(0).is_err());
        assert!(Strategy::from_id(4).is_err());
        for strategy in Strategy::all() {
            assert_eq!(Strategy::from_id(strategy.id()).unwrap(), strategy);
        }
        assert_eq!(Strategy::FullStrong.name(), "full_strong");
    }

    #[test]
    fn max_degree_selection_test() {
        let gr = Cursor::new("p td 7 9\n1 2\n1 3\n2 3\n4 5\n4 6\n4 7\n5 6\n5 7\n6 7\n");
        let mut ins = VCInstance::new(UGraph::read_gr(gr).unwrap());
        let mut adapter = RelaxAdapter::new(FlowRelaxation);
        let first = ins.select_branch(Strategy::IncludeMaxDegree, &mut adapter, 0.0, None);
        assert_eq!(first, BranchDecision { node: 3, include_first: true });
        let second = ins.select_branch(Strategy::ExcludeMaxDegree, &mut adapter, 0.0, None);
        assert_eq!(second, BranchDecision { node: 3, include_first: false });
        // the degree strategies never touch the oracle
        assert_eq!(adapter.calls(), 0);
    }

    #[test]
    fn full_strong_cycle_test() {
        let graph = UGraph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let mut ins = VCInstance::new(graph);
        let check_ins = ins.clone();
        let mut adapter = RelaxAdapter::new(FlowRelaxation);
        let decision = ins.select_branch(Strategy::FullStrong, &mut adapter, 2.0, Some(5));
        // all scores tie, the smallest id among the top degrees wins
        assert_eq!(decision, BranchDecision { node: 0, include_first: true });
        // one include probe per candidate, the exclude remainders are edgeless
        assert_eq!(adapter.calls(), 4);
        // probing must not leave a trace
        assert_eq!(ins, check_ins);
    }

    #[test]
    fn full_strong_candidate_cap_test() {
        let gr = Cursor::new("p td 7 9\n1 2\n1 3\n2 3\n4 5\n4 6\n4 7\n5 6\n5 7\n6 7\n");
        let mut ins = VCInstance::new(UGraph::read_gr(gr).unwrap());
        let mut adapter = RelaxAdapter::new(FlowRelaxation);
        let decision = ins.select_branch(Strategy::FullStrong, &mut adapter, 3.0, Some(1));
        assert_eq!(decision.node, 3);
        assert_eq!(adapter.calls(), 2);
    }

}
