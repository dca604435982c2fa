use crate::error::SolverError;
use crate::problem::cvrp::CvrpInstance;

pub mod input;
pub mod output;

pub fn load_instance(path: impl Into<String>) -> Result<CvrpInstance, SolverError> {
    input::load_instance(&path.into())
}
