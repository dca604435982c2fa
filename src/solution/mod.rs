use serde::Serialize;

use crate::clustering::Clustering;
use crate::error::SolverError;
use crate::problem::cvrp::{Coordinates, CvrpInstance};
use crate::problem::{Cost, JobId, VehicleId};

/// Output envelope. On success `code` is 0 and `summary`/`unassigned`/
/// `routes` are present; on failure only `code` and `error` are emitted.
#[derive(Serialize)]
pub struct Solution {
    pub code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned: Option<Vec<UnassignedJob>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Route>>,
}

#[derive(Serialize)]
pub struct Summary {
    pub cost: Cost,
    pub unassigned: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Cost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Cost>,
    pub computing_times: ComputingTimes,
}

/// Wall-clock phase durations in milliseconds.
#[derive(Serialize, Clone, Copy, Default)]
pub struct ComputingTimes {
    pub loading: u64,
    pub solving: u64,
}

#[derive(Serialize)]
pub struct UnassignedJob {
    pub id: JobId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}

#[derive(Serialize)]
pub struct Route {
    pub vehicle: VehicleId,
    pub cost: Cost,
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Cost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Cost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
}

#[derive(Serialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobId>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Start,
    Job,
    End,
}

impl Solution {
    pub fn from_error(error: &SolverError) -> Self {
        Self {
            code: error.code(),
            error: Some(error.to_string()),
            summary: None,
            unassigned: None,
            routes: None,
        }
    }

    /// Per-vehicle steps follow assignment order; routing proper happens
    /// downstream, this only reports the build history of each cluster.
    pub fn from_clustering(
        instance: &CvrpInstance,
        clustering: &Clustering,
        computing_times: ComputingTimes,
    ) -> Self {
        let unassigned: Vec<UnassignedJob> = clustering
            .unassigned
            .ones()
            .map(|job_rank| UnassignedJob {
                id: instance.jobs[job_rank].id,
                location: instance.jobs[job_rank].location,
            })
            .collect();

        let routes = (0..instance.num_vehicles())
            .map(|vehicle_rank| {
                let vehicle = &instance.vehicles[vehicle_rank];
                let cluster = &clustering.clusters[vehicle_rank];

                let mut steps = Vec::with_capacity(cluster.len() + 2);
                if vehicle.has_start() {
                    steps.push(Step {
                        step_type: StepType::Start,
                        location: vehicle.start_location,
                        job: None,
                    });
                }
                for &job_rank in cluster {
                    steps.push(Step {
                        step_type: StepType::Job,
                        location: instance.jobs[job_rank].location,
                        job: Some(instance.jobs[job_rank].id),
                    });
                }
                if vehicle.has_end() {
                    steps.push(Step {
                        step_type: StepType::End,
                        location: vehicle.end_location,
                        job: None,
                    });
                }

                Route {
                    vehicle: vehicle.id,
                    cost: clustering.cluster_cost(vehicle_rank),
                    steps,
                    distance: None,
                    duration: None,
                    geometry: None,
                }
            })
            .collect();

        Self {
            code: 0,
            error: None,
            summary: Some(Summary {
                cost: clustering.edges_cost,
                unassigned: unassigned.len(),
                distance: None,
                duration: None,
                computing_times,
            }),
            unassigned: Some(unassigned),
            routes: Some(routes),
        }
    }
}
