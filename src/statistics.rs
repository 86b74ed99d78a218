//! Records of solver runs, written as CSV for benchmark evaluation.

use std::io::{self, Write};

use crate::branch_bound::SolveResult;
use crate::graph::UGraph;
use crate::strategies::Strategy;

/// The header line of a statistics CSV file.
pub const CSV_HEADER: &str = "instance,|V|,|E|,strategy,opt_VC,BnB_nodes,LP_calls,runtime_sec";

/// One line of a statistics CSV file, describing a single solver run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub instance: String,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub strategy: &'static str,
    pub opt_vc: usize,
    pub bnb_nodes: u64,
    pub lp_calls: u64,
    pub runtime_sec: f64,
}

impl RunRecord {

    /// Collects the record of a finished run of `strategy` on `graph`.
    pub fn new(instance: &str, graph: &UGraph, strategy: Strategy, result: &SolveResult) -> Self {
        RunRecord {
            instance: instance.to_string(),
            num_nodes: graph.num_nodes(),
            num_edges: graph.num_edges(),
            strategy: strategy.name(),
            opt_vc: result.cover_size(),
            bnb_nodes: result.nodes,
            lp_calls: result.lp_calls,
            runtime_sec: result.elapsed.as_secs_f64(),
        }
    }

    /// Writes `self` as one CSV line. The runtime is written with two decimals.
    pub fn write_csv_row<W: Write>(&self, out: &mut W) -> Result<(), io::Error> {
        writeln!(out, "{},{},{},{},{},{},{},{:.2}", self.instance, self.num_nodes, self.num_edges,
            self.strategy, self.opt_vc, self.bnb_nodes, self.lp_calls, self.runtime_sec)
    }

}

/// Writes the CSV header line.
pub fn write_csv_header<W: Write>(out: &mut W) -> Result<(), io::Error> {
    writeln!(out, "{}", CSV_HEADER)
}

#[cfg(test)]
mod tests {
    use crate::branch_bound::{solve, SolveConfig};
    use crate::graph::UGraph;
    use crate::statistics::{write_csv_header, RunRecord};
    use crate::strategies::Strategy;

    #[test]
    fn csv_header_test() {
        let mut out = Vec::new();
        write_csv_header(&mut out).unwrap();
        assert_eq!(out, b"instance,|V|,|E|,strategy,opt_VC,BnB_nodes,LP_calls,runtime_sec\n");
    }

    #[test]
    fn csv_row_test() {
        let record = RunRecord {
            instance: "c4.gr".to_string(),
            num_nodes: 4,
            num_edges: 4,
            strategy: "full_strong",
            opt_vc: 2,
            bnb_nodes: 3,
            lp_calls: 5,
            runtime_sec: 1.234,
        };
        let mut out = Vec::new();
        record.write_csv_row(&mut out).unwrap();
        assert_eq!(out, b"c4.gr,4,4,full_strong,2,3,5,1.23\n");
    }

    #[test]
    fn record_from_result_test() {
        let graph = UGraph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let res = solve(&graph, Strategy::IncludeMaxDegree, &SolveConfig::default());
        let record = RunRecord::new("c4", &graph, Strategy::IncludeMaxDegree, &res);
        assert_eq!(record.instance, "c4");
        assert_eq!(record.num_nodes, 4);
        assert_eq!(record.num_edges, 4);
        assert_eq!(record.strategy, "include_max_degree");
        assert_eq!(record.opt_vc, 2);
        assert_eq!(record.bnb_nodes, 3);
        assert_eq!(record.lp_calls, 0);
    }

}
