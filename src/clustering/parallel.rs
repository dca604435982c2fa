use crate::clustering::{best_candidate, select_seed, update_cost, Clustering, InitStrategy};
use crate::error::SolverError;
use crate::problem::{Amount, Cost};
use crate::problem::cvrp::CvrpInstance;

/// Grows all clusters simultaneously: every round picks one
/// (vehicle, job) pair across the whole fleet.
pub(super) fn cluster(
    instance: &CvrpInstance,
    init: InitStrategy,
    regret_coeff: f64,
    clustering: &mut Clustering,
) -> Result<(), SolverError> {
    let num_vehicles = instance.num_vehicles();
    let num_jobs = instance.num_jobs();
    let jobs = &instance.jobs;
    let vehicles = &instance.vehicles;
    let matrix = instance.matrix();

    // Best known insertion cost per (cluster, job), and the bound node
    // realising it.
    let mut costs = vec![vec![Cost::MAX; num_jobs]; num_vehicles];
    let mut parents = vec![vec![0usize; num_jobs]; num_vehicles];

    // Candidate lists start from the compatibility oracle; folding in each
    // vehicle's start/end locations seeds the cost arrays.
    let mut candidates: Vec<Vec<usize>> = Vec::with_capacity(num_vehicles);
    for v in 0..num_vehicles {
        let list: Vec<usize> = (0..num_jobs).filter(|&j| instance.compatible(v, j)).collect();

        if let Some(start) = vehicles[v].start {
            update_cost(start, &mut costs[v], &mut parents[v], &list, jobs, matrix);
            if let Some(end) = vehicles[v].end {
                if start != end {
                    update_cost(end, &mut costs[v], &mut parents[v], &list, jobs, matrix);
                }
            }
        } else if let Some(end) = vehicles[v].end {
            update_cost(end, &mut costs[v], &mut parents[v], &list, jobs, matrix);
        }

        candidates.push(list);
    }

    let mut capacities: Vec<Amount> = vehicles.iter().map(|v| v.capacity.clone()).collect();

    // regrets[v][j]: the cheapest reach from another cluster that could
    // still take j, i.e. what skipping j here is expected to cost. Zero
    // when no other cluster can reach j, and kept at zero thereafter.
    let mut regrets = vec![vec![0 as Cost; num_jobs]; num_vehicles];
    for v in 0..num_vehicles {
        for &j in &candidates[v] {
            let mut current_regret = Cost::MAX;
            for other_v in 0..num_vehicles {
                if other_v == v || costs[other_v][j] == Cost::MAX {
                    continue;
                }
                current_regret = current_regret.min(costs[other_v][j]);
            }
            if current_regret != Cost::MAX {
                regrets[v][j] = current_regret;
            }
        }
    }

    if init != InitStrategy::None {
        for v in 0..num_vehicles {
            let seed = select_seed(init, &candidates[v], jobs, &costs[v], &capacities[v]);
            if let Some(pos) = seed {
                let job_rank = candidates[v][pos];
                clustering.record(instance, v, job_rank, parents[v][job_rank], costs[v][job_rank])?;
                capacities[v] -= &jobs[job_rank].amount;
                candidates[v].remove(pos);

                update_cost(
                    jobs[job_rank].index,
                    &mut costs[v],
                    &mut parents[v],
                    &candidates[v],
                    jobs,
                    matrix,
                );
                lower_other_regrets(
                    instance,
                    job_rank,
                    v,
                    &candidates[v],
                    &costs,
                    &mut regrets,
                );

                for other_v in 0..num_vehicles {
                    if other_v != v {
                        remove_candidate(&mut candidates[other_v], job_rank);
                    }
                }
            }
        }
    }

    let mut candidates_remaining = candidates.iter().any(|list| !list.is_empty());

    while candidates_remaining {
        // Every vehicle nominates its score-maximal candidate; among the
        // capacity-feasible nominations the cheapest insertion wins, ties
        // going to the vehicle with most room left.
        let mut best: Option<(usize, usize, Cost)> = None;
        for v in 0..num_vehicles {
            if candidates[v].is_empty() {
                continue;
            }
            let pos = best_candidate(&candidates[v], &costs[v], &regrets[v], regret_coeff)
                .expect("non-empty candidate list");
            let j = candidates[v][pos];
            if !jobs[j].amount.fits_within(&capacities[v]) {
                continue;
            }
            let replace = match best {
                None => true,
                Some((best_v, _, best_cost)) => {
                    costs[v][j] < best_cost
                        || (costs[v][j] == best_cost
                            && capacities[best_v].total() < capacities[v].total())
                }
            };
            if replace {
                best = Some((v, pos, costs[v][j]));
            }
        }

        candidates_remaining = false;

        let (best_v, best_pos, best_cost) = match best {
            Some(found) => found,
            None => {
                // No favourite fits anywhere. Drop every cluster's current
                // top and reconsider the rest against fresh state.
                for v in 0..num_vehicles {
                    if candidates[v].is_empty() {
                        continue;
                    }
                    let pos =
                        best_candidate(&candidates[v], &costs[v], &regrets[v], regret_coeff)
                            .expect("non-empty candidate list");
                    candidates[v].remove(pos);
                    candidates_remaining |= !candidates[v].is_empty();
                }
                continue;
            }
        };

        let best_j = candidates[best_v][best_pos];
        clustering.record(instance, best_v, best_j, parents[best_v][best_j], best_cost)?;
        capacities[best_v] -= &jobs[best_j].amount;
        candidates[best_v].remove(best_pos);

        update_cost(
            jobs[best_j].index,
            &mut costs[best_v],
            &mut parents[best_v],
            &candidates[best_v],
            jobs,
            matrix,
        );
        lower_other_regrets(
            instance,
            best_j,
            best_v,
            &candidates[best_v],
            &costs,
            &mut regrets,
        );

        for v in 0..num_vehicles {
            if v != best_v {
                remove_candidate(&mut candidates[v], best_j);
            }
            candidates_remaining |= !candidates[v].is_empty();
        }
    }

    Ok(())
}

/// The fresh cluster member may offer a cheaper reach to its remaining
/// neighbours, lowering what *other* clusters stand to lose by skipping
/// them. Only clusters that can already reach the neighbour are touched.
fn lower_other_regrets(
    instance: &CvrpInstance,
    assigned_job: usize,
    assigned_v: usize,
    remaining: &[usize],
    costs: &[Vec<Cost>],
    regrets: &mut [Vec<Cost>],
) {
    let jobs = &instance.jobs;
    let matrix = instance.matrix();
    for &j in remaining {
        let new_cost = matrix.between(jobs[assigned_job].index, jobs[j].index);
        for other_v in 0..instance.num_vehicles() {
            if other_v == assigned_v || costs[other_v][j] == Cost::MAX {
                continue;
            }
            regrets[other_v][j] = regrets[other_v][j].min(new_cost);
        }
    }
}

fn remove_candidate(list: &mut Vec<usize>, job_rank: usize) {
    if let Some(pos) = list.iter().position(|&c| c == job_rank) {
        list.remove(pos);
    }
}
