use fixedbitset::FixedBitSet;

use crate::problem::cvrp::{Job, Vehicle};

/// Precomputed `V×J` admissibility bitmap: one row per vehicle, one bit per
/// job. Immutable after construction.
#[derive(Debug)]
pub struct CompatibilityMatrix {
    rows: Vec<FixedBitSet>,
}

impl CompatibilityMatrix {
    /// A vehicle can serve a job iff the job's skill tags are a subset of
    /// the vehicle's skill set.
    pub fn from_skills(vehicles: &[Vehicle], jobs: &[Job]) -> Self {
        let rows = vehicles
            .iter()
            .map(|vehicle| {
                let mut row = FixedBitSet::with_capacity(jobs.len());
                for (j, job) in jobs.iter().enumerate() {
                    if job.skills.is_subset(&vehicle.skills) {
                        row.insert(j);
                    }
                }
                row
            })
            .collect();
        Self { rows }
    }

    #[inline(always)]
    pub fn compatible(&self, vehicle_rank: usize, job_rank: usize) -> bool {
        self.rows[vehicle_rank].contains(job_rank)
    }
}
