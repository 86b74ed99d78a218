use crate::graph::UGraph;
use fxhash::FxHashSet;
use itertools::Itertools;
use crate::cust_error::ProcessingError;
use std::io::{Write};
use std::io;

/// A vertex cover instance: the graph, the nodes committed to the cover on the active search
/// path and a journal of all graph alterations so that search decisions can be undone.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VCInstance {
    pub graph: UGraph,
    pub solution: FxHashSet<usize>,
    /// Records changes to the adjacency list.
    alterations: Vec<Alteration>,
    /// An id register, that helps to control how much of the graph is rebuild.
    register: Vec<usize>,
}

#[derive(Debug, Eq, PartialEq, Clone)]
enum Alteration {
    /// `node` was put into the solution, deleting it from the graph.
    Covered(usize, FxHashSet<usize>),
    /// `node` was deleted from the graph without covering it.
    Excluded(usize, FxHashSet<usize>),
}

impl VCInstance {

    pub fn new(graph: UGraph) -> Self {
        VCInstance {
            graph,
            solution: FxHashSet::default(),
            alterations: Vec::new(),
            register: vec![0],
        }
    }

    /// Adds `node` to `self.solution` and removes it from `self.graph`.
    /// Returns `true` and records the alteration if a node was added, returns `false` otherwise.
    pub fn add_to_solution(&mut self, node: usize) -> bool {
        if let Some(old_neighbors) = self.graph.delete_node(node) {
            self.alterations.push(Alteration::Covered(node, old_neighbors));
            self.solution.insert(node);
            return true
        }
        false
    }

    /// Adds all nodes in `node_set` to `self.solution` and removes them from `self.graph`, in
    /// ascending id order.
    /// Returns `Ok` and records the alterations if all nodes were added, returns a
    /// `ProcessingError` otherwise.
    pub fn add_all_to_solution(&mut self, node_set: &FxHashSet<usize>) -> Result<(), ProcessingError> {
        for node in node_set.iter().sorted() {
            if !self.add_to_solution(*node) {
                return Err(ProcessingError::InvalidParameter("Given node set was not completely contained in the graph.".to_owned()))
            }
        }
        Ok(())
    }

    /// Removes `node` from `self.graph` without covering it.
    /// Returns `true` and records the alteration if a node was removed, returns `false` otherwise.
    pub fn delete_node(&mut self, node: usize) -> bool {
        if let Some(old_neighbors) = self.graph.delete_node(node) {
            self.alterations.push(Alteration::Excluded(node, old_neighbors));
            return true
        }
        false
    }

    /// Redoes the alterations up to the next register in `self.register` in exact reverse order.
    /// Pops that register, if the instance was rebuild completely, pushes `0` to the register.
    pub fn rebuild_section(&mut self) {
        let up_to = self.register.pop().expect("`self.register` should never be empty");
        while self.alterations.len() > up_to {
            match self.alterations.pop().expect("`self.alteration` > 0") {
                Alteration::Covered(node, neigh) => {
                    self.solution.remove(&node);
                    self.graph.reinsert_node(node, &neigh);
                },
                Alteration::Excluded(node, neigh) => {
                    self.graph.reinsert_node(node, &neigh);
                },
            }
        }
        if self.register.is_empty() {
            self.register.push(0);
        }
    }

    /// Puts a register in `self.register` to denote the current state of the graph.
    pub fn put_register(&mut self) {
        self.register.push(self.alterations.len());
    }

    /// Checks if `sol` covers every edge of the current graph.
    pub fn validate_solution(&self, sol: &FxHashSet<usize>) -> bool {
        let mut graph = self.graph.clone();
        for node in sol {
            if *node >= graph.num_reserved() {
                return false
            }
            graph.delete_node(*node);
        }
        graph.num_edges() == 0
    }

}

impl VCInstance {

    /// Writes a solution to a `Write` type, 1-indexed, one node per line in ascending order.
    pub fn write_solution<W: Write>(solution: &FxHashSet<usize>, mut out: W) -> Result<(), io::Error> {
        for elem in solution.iter().sorted() {
            writeln!(out, "{}", elem + 1)?;
        }
        Ok(())
    }

}
