//! Solves the linear relaxation of vertex cover: minimize the sum of node values such that both
//! endpoint values of every edge sum to at least one, all values between zero and one.
//!
//! The relaxation always has a half-integral optimal solution, which can be computed without an
//! LP solver on the bipartite representation `B(V_b, E_b)` of a graph `G(V, E)`: for each node
//! `v` in `V` there are two representatives `v'` and `v''` in `V_b`, and for each edge `(v, w)`
//! in `E` there are the edges `(v', w'')` and `(w', v'')` in `E_b`. A maximum matching of `B`,
//! here found by dinic's algorithm on the matching flow network, has exactly twice the size of
//! the relaxation optimum. A minimum vertex cover of `B` derived from the matching gives the
//! node values: `v` takes 1 if both `v'` and `v''` are in the cover of `B`, 0 if neither is,
//! and 1/2 otherwise.

use crate::graph::UGraph;
use crate::cust_error::OracleError;
use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use std::collections::VecDeque;
use std::cmp::min;

/// Tolerance under which relaxation values count as integral.
pub const INT_EPS: f64 = 1e-6;

/// An optimal solution of the relaxation on the undeleted part of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// The relaxation optimum.
    pub objective: f64,
    /// The value of each undeleted node, in `[0, 1]`.
    pub values: FxHashMap<usize, f64>,
}

impl LpSolution {

    /// Returns all nodes that take the value one.
    pub fn integral_ones(&self) -> FxHashSet<usize> {
        self.values.iter()
            .filter(|(_, value)| **value > 1.0 - INT_EPS)
            .map(|(node, _)| *node)
            .collect()
    }

    /// Returns all nodes that take the value zero.
    pub fn integral_zeros(&self) -> FxHashSet<usize> {
        self.values.iter()
            .filter(|(_, value)| **value < INT_EPS)
            .map(|(node, _)| *node)
            .collect()
    }

    /// Rounds the objective up to an integer lower bound on the cover size. The small slack
    /// keeps a noisy objective just above an integer from producing a bound that is too high.
    pub fn integer_bound(&self) -> usize {
        (self.objective - INT_EPS).ceil().max(0.0) as usize
    }

}

/// The seam towards relaxation solvers.
///
/// Implementations have to be deterministic: the same undeleted subgraph yields the same
/// objective and values. The objective must never exceed the true relaxation optimum, a failed
/// solve is reported as an error and never aborts the search.
pub trait Relaxation {
    /// Computes an optimal solution of the vertex cover relaxation on the undeleted part of
    /// `graph`.
    fn relax(&mut self, graph: &UGraph) -> Result<LpSolution, OracleError>;
}

/// The built-in relaxation solver, combinatorial and exact. See the module documentation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlowRelaxation;

impl Relaxation for FlowRelaxation {

    fn relax(&mut self, graph: &UGraph) -> Result<LpSolution, OracleError> {
        if graph.num_edges() == 0 {
            let values = graph.nodes().map(|node| (node, 0.0)).collect();
            return Ok(LpSolution { objective: 0.0, values })
        }
        let mut net = FlowNet::new(graph);
        let matching = net.max_matching();
        let (match_of_left, match_of_right) = net.matched_partners();
        let k = net.num_left;
        // König: collect `Z`, the unmatched left nodes closed under alternating paths. The
        // matching based cover of `B` consists of the left nodes outside of `Z` and the right
        // nodes inside.
        let mut left_in_z = vec![false; k];
        let mut right_in_z = vec![false; k];
        let mut queue: VecDeque<usize> = VecDeque::new();
        for i in 0..k {
            if match_of_left[i].is_none() {
                left_in_z[i] = true;
                queue.push_back(i);
            }
        }
        while let Some(i) = queue.pop_front() {
            for idx in 0..net.adj[1 + i].len() {
                let eid = net.adj[1 + i][idx];
                let trg = net.to[eid];
                if trg < k + 1 || trg > 2 * k {
                    continue
                }
                let j = trg - k - 1;
                // left to right only over non-matching edges
                if match_of_left[i] == Some(j) || right_in_z[j] {
                    continue
                }
                right_in_z[j] = true;
                // right to left only over the matching edge
                if let Some(partner) = match_of_right[j] {
                    if !left_in_z[partner] {
                        left_in_z[partner] = true;
                        queue.push_back(partner);
                    }
                }
            }
        }
        let values = (0..k).map(|i| {
            let in_cover = !left_in_z[i] as usize + right_in_z[i] as usize;
            (net.names[i], 0.5 * in_cover as f64)
        }).collect();
        Ok(LpSolution { objective: matching as f64 / 2.0, values })
    }

}

/// The matching flow network of the bipartite representation: a source feeding every left
/// representative, a sink fed by every right representative, unit capacities throughout.
/// Node ids: source 0, left `1..=k`, right `k+1..=2k`, sink `2k+1`.
struct FlowNet {
    num_left: usize,
    /// Graph node id of each left index; right indexes mirror the left ones.
    names: Vec<usize>,
    /// Outgoing edge ids per network node.
    adj: Vec<Vec<usize>>,
    /// Target node per edge id. Edges come in pairs, `eid ^ 1` is the reverse of `eid`.
    to: Vec<usize>,
    /// Remaining capacity per edge id.
    cap: Vec<i8>,
    /// Distance from the source per node, 0 marks unreached.
    level: Vec<u32>,
    /// Next edge to try per node within one phase.
    iter: Vec<usize>,
}

impl FlowNet {

    fn new(graph: &UGraph) -> Self {
        let names: Vec<usize> = graph.nodes().collect();
        let index_of: FxHashMap<usize, usize> = names.iter()
            .enumerate()
            .map(|(new, old)| (*old, new))
            .collect();
        let k = names.len();
        let mut net = FlowNet {
            num_left: k,
            names,
            adj: vec![Vec::new(); 2 * k + 2],
            to: Vec::new(),
            cap: Vec::new(),
            level: vec![0; 2 * k + 2],
            iter: vec![0; 2 * k + 2],
        };
        for i in 0..k {
            net.add_edge(0, 1 + i);
            net.add_edge(k + 1 + i, 2 * k + 1);
        }
        for i in 0..k {
            let node = net.names[i];
            let neighbors: Vec<usize> = graph.neighbors(node)
                .as_ref()
                .expect("`node` exists")
                .iter()
                .copied()
                .sorted()
                .collect();
            for neigh in neighbors {
                let j = *index_of.get(&neigh).expect("`neigh` is an undeleted node");
                net.add_edge(1 + i, k + 1 + j);
            }
        }
        net
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.adj[from].push(self.to.len());
        self.to.push(to);
        self.cap.push(1);
        self.adj[to].push(self.to.len());
        self.to.push(from);
        self.cap.push(0);
    }

    /// Layers the residual network by breadth first search.
    /// Returns true while the sink is still reachable.
    fn bfs(&mut self) -> bool {
        let n = self.adj.len();
        self.level = vec![0; n];
        self.level[0] = 1;
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(0);
        while let Some(node) = queue.pop_front() {
            for idx in 0..self.adj[node].len() {
                let eid = self.adj[node][idx];
                let trg = self.to[eid];
                if self.cap[eid] > 0 && self.level[trg] == 0 {
                    self.level[trg] = self.level[node] + 1;
                    queue.push_back(trg);
                }
            }
        }
        self.level[n - 1] > 0
    }

    /// Pushes one augmenting unit along the layered residual network.
    fn dfs(&mut self, node: usize, pushed: i8) -> i8 {
        if node == self.adj.len() - 1 {
            return pushed
        }
        while self.iter[node] < self.adj[node].len() {
            let eid = self.adj[node][self.iter[node]];
            let trg = self.to[eid];
            if self.cap[eid] > 0 && self.level[trg] == self.level[node] + 1 {
                let flow = self.dfs(trg, min(pushed, self.cap[eid]));
                if flow > 0 {
                    self.cap[eid] -= flow;
                    self.cap[eid ^ 1] += flow;
                    return flow
                }
            }
            self.iter[node] += 1;
        }
        0
    }

    /// Computes a maximum matching of the bipartite representation by dinic's algorithm.
    /// Returns its size.
    fn max_matching(&mut self) -> usize {
        let mut matching = 0;
        while self.bfs() {
            self.iter = vec![0; self.adj.len()];
            loop {
                let flow = self.dfs(0, 1);
                if flow == 0 {
                    break
                }
                matching += flow as usize;
            }
        }
        matching
    }

    /// Reads the matching off the saturated left to right edges.
    /// Returns the partner of every left and of every right index.
    fn matched_partners(&self) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
        let k = self.num_left;
        let mut match_of_left = vec![None; k];
        let mut match_of_right = vec![None; k];
        for i in 0..k {
            for eid in &self.adj[1 + i] {
                let trg = self.to[*eid];
                if trg >= k + 1 && trg <= 2 * k && self.cap[*eid] == 0 {
                    let j = trg - k - 1;
                    match_of_left[i] = Some(j);
                    match_of_right[j] = Some(i);
                }
            }
        }
        (match_of_left, match_of_right)
    }

}

/// Wraps a relaxation solver for the search: counts every call and converts failures into the
/// deterministic greedy matching bound, so a failing oracle degrades pruning quality instead of
/// aborting a solve.
pub struct RelaxAdapter<R> {
    oracle: R,
    calls: u64,
}

impl<R: Relaxation> RelaxAdapter<R> {

    pub fn new(oracle: R) -> Self {
        RelaxAdapter {
            oracle,
            calls: 0,
        }
    }

    /// Bounds a search node: the integer lower bound on the remaining cover, plus the solution
    /// values when the oracle produced them.
    pub fn node_bound(&mut self, graph: &UGraph) -> (usize, Option<LpSolution>) {
        self.calls += 1;
        match self.oracle.relax(graph) {
            Ok(relax) => (relax.integer_bound(), Some(relax)),
            Err(_) => (graph.greedy_matching_bound(), None),
        }
    }

    /// The bare objective, used to score tentative branches.
    pub fn objective(&mut self, graph: &UGraph) -> f64 {
        self.calls += 1;
        match self.oracle.relax(graph) {
            Ok(relax) => relax.objective,
            Err(_) => graph.greedy_matching_bound() as f64,
        }
    }

    /// The number of oracle calls so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

}
