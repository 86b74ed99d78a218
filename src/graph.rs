//! Implementation of a simple, undirected graph data structure with basic static and dynamic
//! functions. Node and edge counts of the undeleted part are maintained incrementally, and all
//! queries that pick among several nodes break ties towards the smallest node id.

use fxhash::FxHashSet;
use std::io::BufRead;
use std::cmp::Reverse;
use crate::cust_error::ImportError;

/// A simple undirected graph datastructure that supports dynamic behaviour.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UGraph {
    adj_list: Vec<Option<FxHashSet<usize>>>,
    active_nodes: usize,
    active_edges: usize,
}

// Static functions
impl UGraph {

    /// Returns an `Iterator` in ascending id order over all nodes that have not yet been deleted.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter_map(|(i,adj)| {
                if adj.is_some() {
                    Some(i)
                } else {
                    None
                }
            })
    }

    /// Returns the number of undeleted nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.active_nodes
    }

    /// Returns the number of edges between undeleted nodes of `self`.
    pub fn num_edges(&self) -> usize {
        self.active_edges
    }

    /// Returns the amount of reserved nodes of `self`. Deleted or not.
    pub fn num_reserved(&self) -> usize {
        self.adj_list.len()
    }

    /// Returns the neighborhood of `node`, or `None` if `node` was deleted.
    pub fn neighbors(&self, node: usize) -> &Option<FxHashSet<usize>> {
        &self.adj_list[node]
    }

    /// Returns the degree of `node`, or `None` if `node` was deleted.
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.adj_list[node].as_ref().map(|neighbors| neighbors.len())
    }

    /// Returns the node with the highest degree, ties broken towards the smallest id, or `None`
    /// if no node remains.
    pub fn max_degree_node(&self) -> Option<usize> {
        self.nodes().max_by_key(|node| (self.degree(*node).expect("`node` exists"), Reverse(*node)))
    }

    /// Returns the `x` nodes with the highest degree, ordered by degree descending and id
    /// ascending among equal degrees. If fewer than `x` nodes remain, returns all of them.
    pub fn top_degree_nodes(&self, x: usize) -> Vec<usize> {
        let mut nodes: Vec<usize> = self.nodes().collect();
        nodes.sort_unstable_by_key(|node| (Reverse(self.degree(*node).expect("`node` exists")), *node));
        nodes.truncate(x);
        nodes
    }

    /// Returns an iterator over all edges `(src, trg)` with `src` < `trg`.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter(|(_,adj)| adj.is_some())
            .flat_map(|(i,adj)| {
                adj.as_ref().expect("`adj` is some")
                    .iter()
                    .filter_map(|neigh| {
                    if i < *neigh {
                        Some((i, *neigh))
                    } else {
                        None
                    }
                }).collect::<Vec<(usize, usize)>>()
            })
    }

    /// Checks if `edge` exists.
    pub fn edge_exists(&self, edge: (usize, usize)) -> bool {
        if let Some(neighs) = &self.adj_list[edge.0] {
            return neighs.contains(&edge.1)
        }
        false
    }

    /// Returns the size of a maximal matching, built by scanning nodes in ascending id order and
    /// matching each still free node to its smallest free neighbor. The size of any maximal
    /// matching is a valid lower bound on the size of a vertex cover.
    pub fn greedy_matching_bound(&self) -> usize {
        let mut matched: FxHashSet<usize> = FxHashSet::default();
        let mut bound = 0;
        for node in self.nodes() {
            if matched.contains(&node) {
                continue
            }
            let partner = self.neighbors(node)
                .as_ref()
                .expect("`node` exists")
                .iter()
                .filter(|neigh| !matched.contains(*neigh))
                .min()
                .copied();
            if let Some(partner) = partner {
                matched.insert(node);
                matched.insert(partner);
                bound += 1;
            }
        }
        bound
    }

}

// Dynamic functions
impl UGraph {

    /// Tries to delete `node`.
    /// Returns the old neighborhood of `node` or `None` if nothing was deleted.
    pub fn delete_node(&mut self, node: usize) -> Option<FxHashSet<usize>> {
        let opt_neighbors = self.adj_list[node].take();
        if let Some(neighborhood) = opt_neighbors.as_ref() {
            for neighbor in neighborhood.iter() {
                if let Some(ref mut nn) = self.adj_list[*neighbor] {
                    nn.remove(&node);
                }
            }
            self.active_nodes -= 1;
            self.active_edges -= neighborhood.len();
        }
        opt_neighbors
    }

    /// Reinserts `node` and an edge to each former neighbor given as `neighbors`.
    ///
    /// Deletions have to be undone in strict reverse order, so that every node in `neighbors` is
    /// undeleted at this point. Violations are programming errors and are asserted in debug
    /// builds.
    pub fn reinsert_node(&mut self, node: usize, neighbors: &FxHashSet<usize>) {
        debug_assert!(self.adj_list[node].is_none(), "reinserting an undeleted node");
        debug_assert!(neighbors.iter().all(|neigh| self.adj_list[*neigh].is_some()),
            "reinsertion out of order: a former neighbor is still deleted");
        self.adj_list[node] = Some(neighbors.clone());
        for neigh in neighbors {
            if let Some(ref mut nn) = self.adj_list[*neigh] {
                nn.insert(node);
            }
        }
        self.active_nodes += 1;
        self.active_edges += neighbors.len();
    }

}

impl UGraph {

    fn with_capacity(n: usize) -> Self {
        UGraph {
            adj_list: vec![Some(FxHashSet::default()); n],
            active_nodes: n,
            active_edges: 0,
        }
    }

    /// Inserts the 0-indexed edge `(src, trg)` while constructing a graph. Rejects self loops
    /// and endpoints outside of `0..n`, ignores duplicates.
    fn insert_checked_edge(&mut self, src: usize, trg: usize) -> Result<(), ImportError> {
        if src == trg {
            return Err(ImportError::InvalidGraphError(format!("self loop at node {}", src)))
        }
        let n = self.adj_list.len();
        if src >= n || trg >= n {
            return Err(ImportError::InvalidGraphError(
                format!("edge ({}, {}) out of range for {} nodes", src, trg, n)))
        }
        if self.adj_list[src].as_mut().expect("`src` is in range").insert(trg) {
            self.adj_list[trg].as_mut().expect("`trg` is in range").insert(src);
            self.active_edges += 1;
        }
        Ok(())
    }

    /// Creates a `UGraph` with nodes `0..n` and the given 0-indexed edges.
    /// Fails on self loops and out of range endpoints, duplicate edges are ignored.
    pub fn from_edge_list(n: usize, edges: &[(usize, usize)]) -> Result<Self, ImportError> {
        let mut graph = UGraph::with_capacity(n);
        for (src, trg) in edges {
            graph.insert_checked_edge(*src, *trg)?;
        }
        Ok(graph)
    }

    /// Reads a `.gr` input (`p td <n> <m>` header, 1-indexed edge lines, `c ` comments) and
    /// creates a `UGraph`.
    pub fn read_gr<R: BufRead>(gr: R) -> Result<Self, ImportError> {
        let (lines, _): (Vec<_>, Vec<_>) = gr.lines()
            .partition(|l| {
                if let Ok(line) = l {
                    // ignore empty lines and comment lines
                    !line.starts_with("c ") && !line.is_empty()
                } else {
                    true
                }
            });
        let mut lines = lines.into_iter();
        // p td <n> <m>
        let (n, m) = {
            let line = lines.next().ok_or(ImportError::InputMalformedError)??;
            let mut s = line.split(' ');
            if let Some("p") = s.next() {} else { return Err(ImportError::InputMalformedError); }
            if let Some("td") = s.next() {} else { return Err(ImportError::InputMalformedError); }
            let n: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let m: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if s.next().is_some() { return Err(ImportError::InputMalformedError); }
            (n, m)
        };
        let mut graph = UGraph::with_capacity(n);
        let mut num_lines = 0;
        for line in lines {
            // <src> <trg>
            let line = line?;
            let mut s = line.split(' ');
            let src: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let trg: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if s.next().is_some() { return Err(ImportError::InputMalformedError); }
            if src == 0 || trg == 0 {
                return Err(ImportError::InvalidGraphError("node ids are 1-indexed".to_string()))
            }
            graph.insert_checked_edge(src - 1, trg - 1)?;
            num_lines += 1;
        }
        if num_lines != m { return Err(ImportError::InputMalformedError); }
        Ok(graph)
    }

    /// Reads a `.vc` input and creates a `UGraph`.
    ///
    /// The format is a `<n> <m>` header, a line of `n` node weights and `m` 1-indexed edge
    /// lines. The weights are only checked for well-formedness, covers are unweighted here.
    pub fn read_vc<R: BufRead>(vc: R) -> Result<Self, ImportError> {
        let mut lines = vc.lines()
            .filter(|l| l.as_ref().map_or(true, |line| !line.is_empty()));
        // <n> <m>
        let (n, m) = {
            let line = lines.next().ok_or(ImportError::InputMalformedError)??;
            let mut s = line.split_whitespace();
            let n: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let m: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if s.next().is_some() { return Err(ImportError::InputMalformedError); }
            (n, m)
        };
        let weights = lines.next().ok_or(ImportError::InputMalformedError)??;
        if weights.split_whitespace().count() != n {
            return Err(ImportError::InputMalformedError)
        }
        for weight in weights.split_whitespace() {
            let _: f64 = weight.parse()?;
        }
        let mut graph = UGraph::with_capacity(n);
        let mut num_lines = 0;
        for line in lines {
            // <src> <trg>
            let line = line?;
            let mut s = line.split_whitespace();
            let src: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let trg: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if s.next().is_some() { return Err(ImportError::InputMalformedError); }
            if src == 0 || trg == 0 {
                return Err(ImportError::InvalidGraphError("node ids are 1-indexed".to_string()))
            }
            graph.insert_checked_edge(src - 1, trg - 1)?;
            num_lines += 1;
        }
        if num_lines != m { return Err(ImportError::InputMalformedError); }
        Ok(graph)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_gr_test() {
        let gr = Cursor::new("p td 7 9\n1 2\n1 3\n2 3\n4 5\n4 6\n4 7\n5 6\n5 7\n6 7\n");
        let graph = UGraph::read_gr(gr);
        assert!(graph.is_ok());
        let graph = graph.unwrap();
        assert_eq!(graph.num_nodes(), 7);
        assert_eq!(graph.num_edges(), 9);
        assert_eq!(graph.edges().count(), 9);
    }

    #[test]
    fn read_gr_rejects_self_loop_test() {
        let gr = Cursor::new("p td 3 2\n1 2\n3 3\n");
        assert!(matches!(UGraph::read_gr(gr), Err(ImportError::InvalidGraphError(_))));
    }

    #[test]
    fn read_gr_rejects_out_of_range_test() {
        let gr = Cursor::new("p td 3 2\n1 2\n2 4\n");
        assert!(matches!(UGraph::read_gr(gr), Err(ImportError::InvalidGraphError(_))));
    }

    #[test]
    fn read_vc_test() {
        let vc = Cursor::new("4 4\n1 1 1 1\n1 2\n2 3\n3 4\n4 1\n");
        let graph = UGraph::read_vc(vc);
        assert!(graph.is_ok());
        let graph = graph.unwrap();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 4);
        assert!(graph.edge_exists((0, 3)));
    }

    #[test]
    fn from_edge_list_test() {
        let graph = UGraph::from_edge_list(4, &[(0, 1), (1, 2), (1, 2), (2, 3)]);
        assert!(graph.is_ok());
        // the duplicate edge is dropped
        assert_eq!(graph.unwrap().num_edges(), 3);
        assert!(UGraph::from_edge_list(3, &[(0, 0)]).is_err());
        assert!(UGraph::from_edge_list(3, &[(0, 3)]).is_err());
    }

    #[test]
    fn max_degree_tie_test() {
        let gr = Cursor::new("p td 7 9\n1 2\n1 3\n2 3\n4 5\n4 6\n4 7\n5 6\n5 7\n6 7\n");
        let graph = UGraph::read_gr(gr).unwrap();
        // nodes 3..=6 all have degree 3, the smallest id wins
        assert_eq!(graph.max_degree_node(), Some(3));
        assert_eq!(graph.top_degree_nodes(2), vec![3, 4]);
        assert_eq!(graph.top_degree_nodes(10).len(), 7);
    }

    #[test]
    fn delete_reinsert_roundtrip_test() {
        let gr = Cursor::new("p td 7 9\n1 2\n1 3\n2 3\n4 5\n4 6\n4 7\n5 6\n5 7\n6 7\n");
        let graph = UGraph::read_gr(gr).unwrap();
        let mut altered = graph.clone();
        let degrees: Vec<Option<usize>> = (0..7).map(|node| graph.degree(node)).collect();
        let nbs3 = altered.delete_node(3).unwrap();
        let nbs5 = altered.delete_node(5).unwrap();
        assert_eq!(altered.num_nodes(), 5);
        assert_eq!(altered.num_edges(), 4);
        assert_eq!(altered.degree(6), Some(1));
        // strict reverse order
        altered.reinsert_node(5, &nbs5);
        altered.reinsert_node(3, &nbs3);
        assert_eq!(altered, graph);
        let restored: Vec<Option<usize>> = (0..7).map(|node| altered.degree(node)).collect();
        assert_eq!(restored, degrees);
    }

    #[test]
    fn matching_bound_test() {
        // path on 4 nodes
        let path = UGraph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(path.greedy_matching_bound(), 2);
        // triangle
        let triangle = UGraph::from_edge_list(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        assert_eq!(triangle.greedy_matching_bound(), 1);
        // star
        let star = UGraph::read_gr(Cursor::new("p td 4 3\n1 2\n1 3\n1 4\n")).unwrap();
        assert_eq!(star.greedy_matching_bound(), 1);
        // edgeless
        let lone = UGraph::from_edge_list(3, &[]).unwrap();
        assert_eq!(lone.greedy_matching_bound(), 0);
    }

}
