use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;

use serde::Deserialize;

use crate::error::SolverError;
use crate::problem::cost_matrix::CostMatrix;
use crate::problem::cvrp::{create_instance_with, Coordinates, CvrpInstance, Job, Vehicle};
use crate::problem::{Amount, Cost, JobId, Skill, VehicleId};

/// Raw instance document: ordered jobs and vehicles plus a custom cost
/// matrix over location indices.
#[derive(Deserialize)]
struct RawInput {
    #[serde(default)]
    jobs: Vec<RawJob>,
    #[serde(default)]
    vehicles: Vec<RawVehicle>,
    matrix: Vec<Vec<Cost>>,
}

#[derive(Deserialize)]
struct RawJob {
    id: JobId,
    location_index: usize,
    amount: Amount,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    location: Option<Coordinates>,
}

#[derive(Deserialize)]
struct RawVehicle {
    id: VehicleId,
    #[serde(default)]
    start_index: Option<usize>,
    #[serde(default)]
    end_index: Option<usize>,
    capacity: Amount,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    start: Option<Coordinates>,
    #[serde(default)]
    end: Option<Coordinates>,
}

pub fn load_instance(path: &str) -> Result<CvrpInstance, SolverError> {
    let file = File::open(path)
        .map_err(|e| SolverError::invalid_input(format!("cannot open {}: {}", path, e)))?;
    let raw: RawInput = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SolverError::invalid_input(format!("cannot parse {}: {}", path, e)))?;
    instance_from_raw(raw)
}

fn instance_from_raw(raw: RawInput) -> Result<CvrpInstance, SolverError> {
    let matrix = CostMatrix::from_rows(raw.matrix)?;

    let jobs = raw
        .jobs
        .into_iter()
        .map(|j| Job {
            id: j.id,
            index: j.location_index,
            amount: j.amount,
            skills: HashSet::from_iter(j.skills),
            location: j.location,
        })
        .collect();

    let vehicles = raw
        .vehicles
        .into_iter()
        .map(|v| Vehicle {
            id: v.id,
            start: v.start_index,
            end: v.end_index,
            capacity: v.capacity,
            skills: HashSet::from_iter(v.skills),
            start_location: v.start,
            end_location: v.end,
        })
        .collect();

    create_instance_with(jobs, vehicles, matrix)
}
