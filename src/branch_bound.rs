//! Branch and bound search for a minimum vertex cover.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use fxhash::FxHashSet;

use crate::graph::UGraph;
use crate::limits::Interrupter;
use crate::lp::{FlowRelaxation, RelaxAdapter, Relaxation};
use crate::strategies::Strategy;
use crate::vc_instance::VCInstance;

/// Budgets and knobs of a single solve. The default configuration imposes no budgets and
/// probes five strong branching candidates.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Stop the search after this many entered nodes.
    pub max_nodes: Option<u64>,
    /// Stop the search after this much wall clock time.
    pub max_seconds: Option<f64>,
    /// How many candidates `Strategy::FullStrong` probes, `None` probes every node.
    pub strong_candidates: Option<usize>,
    /// External stop request, checked on every node.
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SolveConfig {

    fn default() -> Self {
        SolveConfig {
            max_nodes: None,
            max_seconds: None,
            strong_candidates: Some(5),
            stop_flag: None,
        }
    }

}

/// The outcome of a solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The best cover found. A minimum vertex cover unless `timed_out` is set.
    pub cover: FxHashSet<usize>,
    /// The number of entered search nodes.
    pub nodes: u64,
    /// The number of calls to the relaxation oracle.
    pub lp_calls: u64,
    /// Wall clock time spent in the search.
    pub elapsed: Duration,
    /// Set if a budget ran out before the search was exhausted.
    pub timed_out: bool,
}

impl SolveResult {

    /// The size of the found cover.
    pub fn cover_size(&self) -> usize {
        self.cover.len()
    }

}

/// A branching move, applied when the node it created is entered.
#[derive(Debug, Clone, Copy)]
enum Move {
    /// The root of the search tree, alters nothing.
    Root,
    /// Takes the node into the cover.
    Include(usize),
    /// Discards the node and takes all of its neighbors into the cover.
    Exclude(usize),
}

/// A frame of the explicit search stack.
#[derive(Debug, Clone, Copy)]
enum Frame {
    /// Enter a search node by applying the move.
    Explore(Move),
    /// Pop the register of the branching node that pushed this frame, undoing its
    /// alterations once both of its children were explored.
    Undo,
}

impl VCInstance {

    /// Finds a minimum vertex cover of this instance by branch and bound.
    ///
    /// The search walks an explicit stack of frames instead of recursing. In every entered
    /// node the algorithm does the following:
    /// 1. Checks the budgets in `config` and aborts the whole search if one is exhausted.
    /// 2. Applies the branching move that created the node and exhaustively applies the
    ///    simple reduction rules.
    /// 3. If the graph ran out of edges, keeps the current solution if it beats the best
    ///    known cover.
    /// 4. Prunes if the current solution plus a greedy matching bound cannot beat the best
    ///    known cover.
    /// 5. Under `Strategy::FullStrong`, computes the relaxation of the remaining graph,
    ///    prunes with its rounded bound and fixes all of its integral values.
    /// 6. Branches on the node `strategy` selects, exploring the preferred side first.
    /// Each branching step is undone once both of its sides were explored, so the instance
    /// is unaltered when this returns.
    ///
    /// The best known cover starts out as all nodes of the remaining graph. On an abort the
    /// best known cover so far is returned with `SolveResult::timed_out` set, the returned
    /// cover is therefore valid in every case.
    pub fn branch_and_bound<R: Relaxation>(&mut self, strategy: Strategy, config: &SolveConfig, oracle: R) -> SolveResult {
        let interrupter = Interrupter::new(config.max_seconds, config.max_nodes, config.stop_flag.clone());
        let mut adapter = RelaxAdapter::new(oracle);
        let mut best: FxHashSet<usize> = self.graph.nodes().collect();
        let mut nodes = 0u64;
        let mut timed_out = false;
        let mut stack = vec![Frame::Explore(Move::Root)];
        while let Some(frame) = stack.pop() {
            let branch_move = match frame {
                Frame::Explore(branch_move) => branch_move,
                Frame::Undo => {
                    self.rebuild_section();
                    continue
                },
            };
            if interrupter.check_interrupt(nodes) {
                timed_out = true;
                // Unwind the open branching steps, the instance stays usable.
                while let Some(frame) = stack.pop() {
                    if let Frame::Undo = frame {
                        self.rebuild_section();
                    }
                }
                break
            }
            nodes += 1;
            self.put_register();
            self.apply_branch_move(branch_move);
            // Reduce instance
            self.simple_rules();
            if self.graph.num_edges() == 0 {
                if self.solution.len() < best.len() {
                    best = self.solution.clone();
                }
                self.rebuild_section();
                continue
            }
            // Compare a cheap matching bound with the current best.
            if self.solution.len() + self.graph.greedy_matching_bound() >= best.len() {
                self.rebuild_section();
                continue
            }
            // Under full strong branching also compare the relaxation bound and fix all
            // integral relaxation values.
            let mut base_objective = 0f64;
            if strategy == Strategy::FullStrong {
                let (bound, relax) = adapter.node_bound(&self.graph);
                if self.solution.len() + bound >= best.len() {
                    self.rebuild_section();
                    continue
                }
                match relax {
                    Some(relax) => {
                        let (covered, _) = self.apply_persistency(&relax);
                        base_objective = relax.objective - covered as f64;
                        if self.graph.num_edges() == 0 {
                            if self.solution.len() < best.len() {
                                best = self.solution.clone();
                            }
                            self.rebuild_section();
                            continue
                        }
                    },
                    None => base_objective = self.graph.greedy_matching_bound() as f64,
                }
            }
            // Branch
            let decision = self.select_branch(strategy, &mut adapter, base_objective, config.strong_candidates);
            let include = Frame::Explore(Move::Include(decision.node));
            let exclude = Frame::Explore(Move::Exclude(decision.node));
            stack.push(Frame::Undo);
            if decision.include_first {
                stack.push(exclude);
                stack.push(include);
            } else {
                stack.push(include);
                stack.push(exclude);
            }
        }
        SolveResult {
            cover: best,
            nodes,
            lp_calls: adapter.calls(),
            elapsed: interrupter.elapsed(),
            timed_out,
        }
    }

    /// Applies the alterations of a branching move.
    fn apply_branch_move(&mut self, branch_move: Move) {
        match branch_move {
            Move::Root => (),
            Move::Include(node) => {
                let added = self.add_to_solution(node);
                debug_assert!(added);
            },
            Move::Exclude(node) => {
                let neighbors = self.graph.neighbors(node).as_ref().expect("`node` exists").clone();
                self.add_all_to_solution(&neighbors).expect("`neighbors` are in `self.graph`");
                self.delete_node(node);
            },
        }
    }

}

/// Finds a minimum vertex cover of `graph` with the built in flow relaxation as oracle.
pub fn solve(graph: &UGraph, strategy: Strategy, config: &SolveConfig) -> SolveResult {
    solve_with_oracle(graph, strategy, config, FlowRelaxation)
}

/// Finds a minimum vertex cover of `graph`, probing bounds with `oracle` wherever
/// `strategy` asks for them.
pub fn solve_with_oracle<R: Relaxation>(graph: &UGraph, strategy: Strategy, config: &SolveConfig, oracle: R) -> SolveResult {
    VCInstance::new(graph.clone()).branch_and_bound(strategy, config, oracle)
}
