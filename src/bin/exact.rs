//! Binary that takes as standart in a graph in .gr format, computes a minimum vertex cover and
//! writes the solution to standart out.

use std::error;
use std::io::{self, Write};

use branch_and_cover::branch_bound::{solve, SolveConfig};
use branch_and_cover::cust_error::ProcessingError;
use branch_and_cover::graph::UGraph;
use branch_and_cover::strategies::Strategy;
use branch_and_cover::vc_instance::VCInstance;

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let graph = UGraph::read_gr(stdin)?;
    let n = graph.num_nodes();
    let resu = solve(&graph, Strategy::FullStrong, &SolveConfig::default());

    // Validate
    if !VCInstance::new(graph).validate_solution(&resu.cover) {
        return Err(Box::new(ProcessingError::InvalidSolution("the found cover misses an edge".to_string())));
    }

    eprintln!("nodes: {}, lp calls: {}, time: {:.2}s", resu.nodes, resu.lp_calls, resu.elapsed.as_secs_f64());
    writeln!(stdout, "s vc {} {}", n, resu.cover_size())?;
    VCInstance::write_solution(&resu.cover, &mut stdout)?;
    Ok(())
}
