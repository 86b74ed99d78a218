pub mod graph;
pub mod cust_error;
pub mod vc_instance;
pub mod reductions;
pub mod lp;
pub mod strategies;
pub mod limits;
pub mod branch_bound;
pub mod statistics;
