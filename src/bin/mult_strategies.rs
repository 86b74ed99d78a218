//! Binary that runs the solver on a set of instances with one or all branching strategies and
//! records one csv line per run.
//!
//! A SIGINT finishes the current run early and skips the remaining runs. Rows of finished and
//! interrupted runs are kept in the csv file.

use std::error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{App, Arg};

use branch_and_cover::branch_bound::{solve, SolveConfig};
use branch_and_cover::cust_error::ProcessingError;
use branch_and_cover::graph::UGraph;
use branch_and_cover::statistics::{write_csv_header, RunRecord};
use branch_and_cover::strategies::Strategy;
use branch_and_cover::vc_instance::VCInstance;

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let m = App::new("strategy_statistics")
        .arg(Arg::new("files")
             .takes_value(true)
             .multiple_values(true)
             .required(true)
             .short('f'))
        .arg(Arg::new("csv")
             .required(true)
             .takes_value(true)
             .short('c'))
        .arg(Arg::new("strategy")
             .takes_value(true)
             .short('s'))
        .arg(Arg::new("time_out")
             .takes_value(true)
             .short('t'))
        .arg(Arg::new("max_nodes")
             .takes_value(true)
             .long("max-nodes"))
        .get_matches();
    let files: Vec<PathBuf> = m.values_of("files").unwrap().map(PathBuf::from).collect();
    let csv: &str = m.value_of("csv").unwrap();
    let max_seconds: Option<f64> = m.value_of("time_out").map(|val| val.parse()).transpose()?;
    let max_nodes: Option<u64> = m.value_of("max_nodes").map(|val| val.parse()).transpose()?;
    let strategies: Vec<Strategy> = match m.value_of("strategy") {
        Some(id) => vec![Strategy::from_id(id.parse()?)?],
        None => Strategy::all().to_vec(),
    };
    let stop_flag = Arc::new(AtomicBool::new(false));
    let handler_flag = stop_flag.clone();
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;
    let mut graphs = Vec::new();
    for file in files {
        let graph = match file.extension().and_then(|ext| ext.to_str()) {
            Some("gr") => UGraph::read_gr(BufReader::new(File::open(&file)?))?,
            _ => UGraph::read_vc(BufReader::new(File::open(&file)?))?,
        };
        let name = file.file_stem().expect("Not a file.").to_string_lossy().into_owned();
        graphs.push((graph, name));
    }
    let config = SolveConfig {
        max_nodes,
        max_seconds,
        stop_flag: Some(stop_flag.clone()),
        ..SolveConfig::default()
    };
    let mut out_file = File::create(csv)?;
    write_csv_header(&mut out_file)?;
    'files: for (graph, name) in &graphs {
        for strategy in &strategies {
            let resu = solve(graph, *strategy, &config);
            if !VCInstance::new(graph.clone()).validate_solution(&resu.cover) {
                return Err(Box::new(ProcessingError::InvalidSolution(format!("the cover found for {} misses an edge", name))));
            }
            RunRecord::new(name, graph, *strategy, &resu).write_csv_row(&mut out_file)?;
            if resu.timed_out {
                eprintln!("{} with {}: interrupted after {} nodes, best cover {}", name, strategy.name(), resu.nodes, resu.cover_size());
            } else {
                eprintln!("{} with {}: opt {} in {:.2}s ({} nodes, {} lp calls)", name, strategy.name(), resu.cover_size(), resu.elapsed.as_secs_f64(), resu.nodes, resu.lp_calls);
            }
            if stop_flag.load(Ordering::SeqCst) {
                eprintln!("skipping the remaining runs");
                break 'files
            }
        }
    }
    Ok(())
}
