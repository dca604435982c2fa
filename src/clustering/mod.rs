use fixedbitset::FixedBitSet;
use log::trace;

use crate::error::SolverError;
use crate::problem::cost_matrix::CostMatrix;
use crate::problem::cvrp::{CvrpInstance, Job};
use crate::problem::{Amount, Cost};

mod parallel;
mod sequential;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Parallel,
    Sequential,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Sequential => "sequential",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStrategy {
    None,
    HigherAmount,
    Nearest,
}

impl InitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HigherAmount => "higher_amount",
            Self::Nearest => "nearest",
        }
    }
}

/// One job placement, in the order it happened. `parent` is the location
/// index of the node that realised the insertion cost at that moment.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub vehicle_rank: usize,
    pub job_rank: usize,
    pub parent: usize,
    pub cost: Cost,
}

/// Result of a clustering run: one cluster per vehicle in assignment
/// order, the jobs nobody took, and the accumulated insertion cost.
#[derive(Debug)]
pub struct Clustering {
    pub clusters: Vec<Vec<usize>>,
    pub unassigned: FixedBitSet,
    pub edges_cost: Cost,
    pub assignments: Vec<Assignment>,
}

impl Clustering {
    pub fn run(
        instance: &CvrpInstance,
        strategy: Strategy,
        init: InitStrategy,
        regret_coeff: f64,
    ) -> Result<Self, SolverError> {
        let mut unassigned = FixedBitSet::with_capacity(instance.num_jobs());
        unassigned.insert_range(..);

        let mut clustering = Self {
            clusters: vec![Vec::new(); instance.num_vehicles()],
            unassigned,
            edges_cost: 0,
            assignments: Vec::with_capacity(instance.num_jobs()),
        };

        match strategy {
            Strategy::Parallel => parallel::cluster(instance, init, regret_coeff, &mut clustering)?,
            Strategy::Sequential => {
                sequential::cluster(instance, init, regret_coeff, &mut clustering)?
            }
        }

        trace!(
            "clustering:{};{};{};{};{}",
            strategy.as_str(),
            init.as_str(),
            regret_coeff,
            clustering.unassigned.count_ones(..),
            clustering.edges_cost
        );

        Ok(clustering)
    }

    pub fn num_assigned(&self) -> usize {
        self.assignments.len()
    }

    /// Insertion costs attributed to one cluster.
    pub fn cluster_cost(&self, vehicle_rank: usize) -> Cost {
        self.assignments
            .iter()
            .filter(|a| a.vehicle_rank == vehicle_rank)
            .map(|a| a.cost)
            .sum()
    }

    /// Bookkeeping shared by seeding and the main loops: cluster append,
    /// unassigned removal, checked edge-cost accumulation, trace record.
    fn record(
        &mut self,
        instance: &CvrpInstance,
        vehicle_rank: usize,
        job_rank: usize,
        parent: usize,
        cost: Cost,
    ) -> Result<(), SolverError> {
        self.clusters[vehicle_rank].push(job_rank);
        self.unassigned.set(job_rank, false);
        self.edges_cost = self
            .edges_cost
            .checked_add(cost)
            .ok_or_else(|| SolverError::internal("edge cost accumulation overflowed"))?;
        trace!(
            "{};{}->{}",
            instance.vehicles[vehicle_rank].id,
            parent,
            instance.jobs[job_rank].index
        );
        self.assignments.push(Assignment {
            vehicle_rank,
            job_rank,
            parent,
            cost,
        });
        Ok(())
    }
}

/// Sole mutator of the cost/parent arrays: folds the node at `from` (a
/// start, end, or freshly assigned job location) into the best known
/// insertion cost of every candidate.
fn update_cost(
    from: usize,
    costs: &mut [Cost],
    parents: &mut [usize],
    candidates: &[usize],
    jobs: &[Job],
    matrix: &CostMatrix,
) {
    for &j in candidates {
        let current_cost = matrix.between(from, jobs[j].index);
        if current_cost < costs[j] {
            costs[j] = current_cost;
            parents[j] = from;
        }
    }
}

fn score(regret_coeff: f64, regret: Cost, cost: Cost) -> f64 {
    regret_coeff * regret as f64 - cost as f64
}

/// Position of the first score-maximal candidate in list order; the linear
/// equivalent of re-heapifying before every peek.
fn best_candidate(
    candidates: &[usize],
    costs: &[Cost],
    regrets: &[Cost],
    regret_coeff: f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (pos, &j) in candidates.iter().enumerate() {
        let candidate_score = score(regret_coeff, regrets[j], costs[j]);
        match best {
            Some((_, best_score)) if candidate_score <= best_score => {}
            _ => best = Some((pos, candidate_score)),
        }
    }
    best.map(|(pos, _)| pos)
}

/// Seed selection for the higher-amount and nearest policies. Strict
/// comparisons keep the first extremal candidate in list order; candidates
/// whose demand does not fit the remaining capacity are never seeded.
fn select_seed(
    init: InitStrategy,
    candidates: &[usize],
    jobs: &[Job],
    costs: &[Cost],
    capacity_left: &Amount,
) -> Option<usize> {
    if init == InitStrategy::None {
        return None;
    }
    let mut selected: Option<usize> = None;
    for (pos, &j) in candidates.iter().enumerate() {
        if !jobs[j].amount.fits_within(capacity_left) {
            continue;
        }
        let better = match selected {
            None => true,
            Some(best_pos) => {
                let b = candidates[best_pos];
                match init {
                    InitStrategy::None => unreachable!(),
                    InitStrategy::HigherAmount => {
                        let (amount_j, amount_b) = (jobs[j].amount.total(), jobs[b].amount.total());
                        amount_j > amount_b || (amount_j == amount_b && costs[j] > costs[b])
                    }
                    InitStrategy::Nearest => costs[j] < costs[b],
                }
            }
        };
        if better {
            selected = Some(pos);
        }
    }
    selected
}
