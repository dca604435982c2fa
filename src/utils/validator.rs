use fixedbitset::FixedBitSet;

use crate::clustering::Clustering;
use crate::problem::cvrp::CvrpInstance;
use crate::problem::Cost;

#[derive(Debug)]
pub enum Violation {
    /// A job is missing, duplicated, or both assigned and unassigned.
    Partition { job_rank: usize },
    Capacity { vehicle_rank: usize, job_rank: usize },
    Compatibility { vehicle_rank: usize, job_rank: usize },
    /// `edges_cost` disagrees with the recorded assignments.
    CostMismatch { recomputed: Cost },
    /// An assignment's parent was not bound to the vehicle at that time.
    Parent { vehicle_rank: usize, parent: usize },
}

#[derive(Debug)]
pub enum ValidatorResult {
    Valid(Cost),
    ConstraintViolation(Violation),
}

impl ValidatorResult {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Valid(_) => true,
            _ => false,
        }
    }

    pub fn assert_valid(&self) {
        match self {
            Self::Valid(_) => {}
            Self::ConstraintViolation(violation) => {
                panic!("{:?}", violation)
            }
        }
    }
}

/// Recomputes every clustering invariant from scratch: partition of the
/// job set, capacity, compatibility, cost bookkeeping, and parent
/// consistency of the recorded assignment order.
pub fn validate_clustering(instance: &CvrpInstance, clustering: &Clustering) -> ValidatorResult {
    use ValidatorResult::*;
    use Violation::*;

    let mut seen = FixedBitSet::with_capacity(instance.num_jobs());
    for (vehicle_rank, cluster) in clustering.clusters.iter().enumerate() {
        let mut capacity_left = instance.vehicles[vehicle_rank].capacity.clone();
        for &job_rank in cluster {
            if seen.contains(job_rank) || clustering.unassigned.contains(job_rank) {
                return ConstraintViolation(Partition { job_rank });
            }
            seen.insert(job_rank);

            if !instance.compatible(vehicle_rank, job_rank) {
                return ConstraintViolation(Compatibility {
                    vehicle_rank,
                    job_rank,
                });
            }

            let amount = &instance.jobs[job_rank].amount;
            if !amount.fits_within(&capacity_left) {
                return ConstraintViolation(Capacity {
                    vehicle_rank,
                    job_rank,
                });
            }
            capacity_left -= amount;
        }
    }
    for job_rank in 0..instance.num_jobs() {
        if !seen.contains(job_rank) && !clustering.unassigned.contains(job_rank) {
            return ConstraintViolation(Partition { job_rank });
        }
    }

    let mut recomputed: Cost = 0;
    let mut bound: Vec<Vec<usize>> = instance
        .vehicles
        .iter()
        .map(|v| v.start.iter().chain(v.end.iter()).copied().collect())
        .collect();
    for assignment in &clustering.assignments {
        if !bound[assignment.vehicle_rank].contains(&assignment.parent) {
            return ConstraintViolation(Parent {
                vehicle_rank: assignment.vehicle_rank,
                parent: assignment.parent,
            });
        }
        bound[assignment.vehicle_rank].push(instance.jobs[assignment.job_rank].index);
        recomputed = recomputed.saturating_add(assignment.cost);
    }
    if recomputed != clustering.edges_cost {
        return ConstraintViolation(CostMismatch { recomputed });
    }

    Valid(recomputed)
}

pub fn assert_valid_clustering(instance: &CvrpInstance, clustering: &Clustering) {
    validate_clustering(instance, clustering).assert_valid()
}
