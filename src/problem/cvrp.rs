use std::collections::HashSet;

use crate::error::SolverError;
use crate::problem::compatibility::CompatibilityMatrix;
use crate::problem::cost_matrix::CostMatrix;
use crate::problem::{Amount, JobId, Skill, VehicleId};

/// `[lon, lat]`, carried through to the output envelope when present.
pub type Coordinates = [f64; 2];

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    /// Location index into the cost matrix.
    pub index: usize,
    pub amount: Amount,
    pub skills: HashSet<Skill>,
    pub location: Option<Coordinates>,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    /// At least one of `start`/`end` is present (preflight).
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub capacity: Amount,
    pub skills: HashSet<Skill>,
    pub start_location: Option<Coordinates>,
    pub end_location: Option<Coordinates>,
}

impl Vehicle {
    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }
    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }
    pub fn check_capacity(&self, demand: &Amount) -> bool {
        demand.fits_within(&self.capacity)
    }
}

#[derive(Debug)]
pub struct CvrpInstance {
    pub jobs: Vec<Job>,
    pub vehicles: Vec<Vehicle>,
    matrix: CostMatrix,
    compatibility: CompatibilityMatrix,
}

impl CvrpInstance {
    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }
    #[inline(always)]
    pub fn compatible(&self, vehicle_rank: usize, job_rank: usize) -> bool {
        self.compatibility.compatible(vehicle_rank, job_rank)
    }
}

/// Preflight: validates the instance and builds the compatibility oracle.
/// Any violation fails before clustering state exists.
pub fn create_instance_with(
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    matrix: CostMatrix,
) -> Result<CvrpInstance, SolverError> {
    let amount_len = jobs
        .first()
        .map(|j| j.amount.len())
        .or_else(|| vehicles.first().map(|v| v.capacity.len()));

    for job in &jobs {
        if job.index >= matrix.dimension() {
            return Err(SolverError::invalid_input(format!(
                "job {}: location index {} outside the {}x{} matrix",
                job.id,
                job.index,
                matrix.dimension(),
                matrix.dimension()
            )));
        }
        if job.amount.has_negative_component() {
            return Err(SolverError::invalid_input(format!(
                "job {}: negative demand component",
                job.id
            )));
        }
        if Some(job.amount.len()) != amount_len {
            return Err(SolverError::invalid_input(format!(
                "job {}: demand has {} components, expected {}",
                job.id,
                job.amount.len(),
                amount_len.unwrap_or(0)
            )));
        }
    }

    for vehicle in &vehicles {
        if !vehicle.has_start() && !vehicle.has_end() {
            return Err(SolverError::invalid_input(format!(
                "vehicle {}: neither start nor end location",
                vehicle.id
            )));
        }
        for index in vehicle.start.iter().chain(vehicle.end.iter()) {
            if *index >= matrix.dimension() {
                return Err(SolverError::invalid_input(format!(
                    "vehicle {}: location index {} outside the {}x{} matrix",
                    vehicle.id,
                    index,
                    matrix.dimension(),
                    matrix.dimension()
                )));
            }
        }
        if Some(vehicle.capacity.len()) != amount_len {
            return Err(SolverError::invalid_input(format!(
                "vehicle {}: capacity has {} components, expected {}",
                vehicle.id,
                vehicle.capacity.len(),
                amount_len.unwrap_or(0)
            )));
        }
    }

    let compatibility = CompatibilityMatrix::from_skills(&vehicles, &jobs);

    Ok(CvrpInstance {
        jobs,
        vehicles,
        matrix,
        compatibility,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix2() -> CostMatrix {
        CostMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap()
    }

    fn job(index: usize, amount: Vec<i64>) -> Job {
        Job {
            id: 1,
            index,
            amount: Amount::new(amount),
            skills: HashSet::new(),
            location: None,
        }
    }

    fn vehicle(start: Option<usize>, end: Option<usize>, capacity: Vec<i64>) -> Vehicle {
        Vehicle {
            id: 0,
            start,
            end,
            capacity: Amount::new(capacity),
            skills: HashSet::new(),
            start_location: None,
            end_location: None,
        }
    }

    #[test]
    fn accepts_a_well_formed_instance() {
        let instance = create_instance_with(
            vec![job(1, vec![1])],
            vec![vehicle(Some(0), None, vec![4])],
            matrix2(),
        )
        .unwrap();
        assert_eq!(instance.num_jobs(), 1);
        assert!(instance.compatible(0, 0));
    }

    #[test]
    fn rejects_vehicle_without_endpoints() {
        let err = create_instance_with(vec![], vec![vehicle(None, None, vec![4])], matrix2())
            .unwrap_err();
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn rejects_out_of_matrix_indices() {
        let err = create_instance_with(
            vec![job(2, vec![1])],
            vec![vehicle(Some(0), None, vec![4])],
            matrix2(),
        )
        .unwrap_err();
        assert_eq!(err.code(), 2);

        let err = create_instance_with(vec![], vec![vehicle(Some(5), None, vec![4])], matrix2())
            .unwrap_err();
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn rejects_negative_demand() {
        let err = create_instance_with(
            vec![job(1, vec![-1])],
            vec![vehicle(Some(0), None, vec![4])],
            matrix2(),
        )
        .unwrap_err();
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn rejects_mismatched_amount_shapes() {
        let err = create_instance_with(
            vec![job(1, vec![1, 1])],
            vec![vehicle(Some(0), None, vec![4])],
            matrix2(),
        )
        .unwrap_err();
        assert_eq!(err.code(), 2);
    }
}
