use crate::clustering::{best_candidate, select_seed, update_cost, Clustering, InitStrategy};
use crate::error::SolverError;
use crate::problem::Cost;
use crate::problem::cvrp::CvrpInstance;

/// Fills clusters one vehicle at a time, in input order. Regret is static:
/// the cheapest baseline reach of any *later* vehicle, precomputed
/// backward before any cluster is built.
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

    // Directed start->job / job->end baseline, computed once.
    let mut baseline = vec![vec![Cost::MAX; num_jobs]; num_vehicles];
    for v in 0..num_vehicles {
        for (j, job) in jobs.iter().enumerate() {
            let mut current_cost = Cost::MAX;
            if let Some(start) = vehicles[v].start {
                current_cost = current_cost.min(matrix.cost(start, job.index));
            }
            if let Some(end) = vehicles[v].end {
                current_cost = current_cost.min(matrix.cost(job.index, end));
            }
            baseline[v][j] = current_cost;
        }
    }

    // Backward regrets: the last vehicle has nobody after it, the
    // penultimate sees the last vehicle's baseline, and so on.
    let mut regrets = vec![vec![0 as Cost; num_jobs]; num_vehicles];
    if num_vehicles > 1 {
        for j in 0..num_jobs {
            regrets[num_vehicles - 2][j] = baseline[num_vehicles - 1][j];
        }
        for i in 3..=num_vehicles {
            for j in 0..num_jobs {
                regrets[num_vehicles - i][j] =
                    regrets[num_vehicles - i + 1][j].min(baseline[num_vehicles - i + 1][j]);
            }
        }
    }

    for v in 0..num_vehicles {
        // Local candidates: still unassigned, compatible, and fitting the
        // vehicle's full capacity.
        let mut candidates: Vec<usize> = (0..num_jobs)
            .filter(|&j| {
                clustering.unassigned.contains(j)
                    && instance.compatible(v, j)
                    && vehicles[v].check_capacity(&jobs[j].amount)
            })
            .collect();

        let mut costs = vec![Cost::MAX; num_jobs];
        let mut parents = vec![0usize; num_jobs];

        if let Some(start) = vehicles[v].start {
            update_cost(start, &mut costs, &mut parents, &candidates, jobs, matrix);
            if let Some(end) = vehicles[v].end {
                if start != end {
                    update_cost(end, &mut costs, &mut parents, &candidates, jobs, matrix);
                }
            }
        } else if let Some(end) = vehicles[v].end {
            update_cost(end, &mut costs, &mut parents, &candidates, jobs, matrix);
        }

        let mut capacity = vehicles[v].capacity.clone();

        if let Some(pos) = select_seed(init, &candidates, jobs, &baseline[v], &capacity) {
            let job_rank = candidates[pos];
            // The seed is accounted at its baseline cost.
            clustering.record(instance, v, job_rank, parents[job_rank], baseline[v][job_rank])?;
            capacity -= &jobs[job_rank].amount;
            candidates.remove(pos);
            update_cost(
                jobs[job_rank].index,
                &mut costs,
                &mut parents,
                &candidates,
                jobs,
                matrix,
            );
        }

        while !candidates.is_empty() {
            let pos = best_candidate(&candidates, &costs, &regrets[v], regret_coeff)
                .expect("non-empty candidate list");
            let job_rank = candidates[pos];
            // The favourite is popped either way: capacity only shrinks,
            // so a top that does not fit now never will.
            candidates.remove(pos);

            if jobs[job_rank].amount.fits_within(&capacity) {
                clustering.record(instance, v, job_rank, parents[job_rank], costs[job_rank])?;
                capacity -= &jobs[job_rank].amount;
                update_cost(
                    jobs[job_rank].index,
                    &mut costs,
                    &mut parents,
                    &candidates,
                    jobs,
                    matrix,
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::clustering::{Clustering, InitStrategy, Strategy};
    use crate::utils::testing::{instance, job, vehicle};
    use crate::utils::validator::assert_valid_clustering;

    /// Depot at 0, jobs at 1/2/3 with symmetric distances 10/20/15 from
    /// the depot and short hops d(1,3) = d(3,2) = 5.
    fn star_instance() -> crate::problem::cvrp::CvrpInstance {
        instance(
            vec![job(1, 1, 1), job(2, 2, 1), job(3, 3, 1)],
            vec![vehicle(0, Some(0), Some(0), 1000)],
            vec![
                vec![0, 10, 20, 15],
                vec![10, 0, 12, 5],
                vec![20, 12, 0, 5],
                vec![15, 5, 5, 0],
            ],
        )
    }

    #[test]
    fn nearest_seed_then_cheapest_expansion() {
        let instance = star_instance();
        let clustering =
            Clustering::run(&instance, Strategy::Sequential, InitStrategy::Nearest, 1.0).unwrap();

        // seed job@1 (10), reach job@3 through it (5), then job@2 (5)
        assert_eq!(clustering.clusters[0], vec![0, 2, 1]);
        assert_eq!(clustering.edges_cost, 20);
        assert_eq!(clustering.unassigned.count_ones(..), 0);
        assert_valid_clustering(&instance, &clustering);
    }

    #[test]
    fn zero_regret_coefficient_degenerates_to_nearest_neighbour() {
        // two vehicles; with the coefficient at zero vehicle 0 must grab
        // its locally cheapest feasible jobs first until capacity runs out
        let instance = instance(
            vec![job(1, 1, 1), job(2, 2, 1), job(3, 3, 1)],
            vec![
                vehicle(0, Some(0), None, 2),
                vehicle(1, Some(0), None, 2),
            ],
            vec![
                vec![0, 3, 9, 7],
                vec![3, 0, 9, 8],
                vec![9, 9, 0, 1],
                vec![7, 8, 1, 0],
            ],
        );
        let clustering =
            Clustering::run(&instance, Strategy::Sequential, InitStrategy::None, 0.0).unwrap();

        // vehicle 0: job@1 (3), then job@3 (7 via depot) beats job@2 (9);
        // capacity is then spent, vehicle 1 takes the leftover
        assert_eq!(clustering.clusters[0], vec![0, 2]);
        assert_eq!(clustering.clusters[1], vec![1]);
        assert_eq!(clustering.edges_cost, 3 + 7 + 9);
        assert_valid_clustering(&instance, &clustering);
    }

    #[test]
    fn later_vehicle_regret_defers_shared_jobs() {
        // job@2 is cheap for the later vehicle; a high regret coefficient
        // makes vehicle 0 prioritise the job only it can serve cheaply
        let instance = instance(
            vec![job(1, 1, 1), job(2, 2, 1)],
            vec![
                vehicle(0, Some(0), None, 1),
                vehicle(1, Some(3), None, 1),
            ],
            vec![
                vec![0, 4, 5, 50],
                vec![4, 0, 50, 50],
                vec![5, 50, 0, 2],
                vec![50, 50, 2, 0],
            ],
        );
        let clustering =
            Clustering::run(&instance, Strategy::Sequential, InitStrategy::None, 1.0).unwrap();

        // vehicle 0 scores: 50 - 4 for job@1 beats 2 - 5 for job@2, so the
        // job the later vehicle cannot reach cheaply is taken first
        assert_eq!(clustering.clusters[0], vec![0]);
        assert_eq!(clustering.clusters[1], vec![1]);
        assert_eq!(clustering.edges_cost, 4 + 2);
        assert_valid_clustering(&instance, &clustering);
    }

    #[test]
    fn oversized_jobs_never_enter_the_candidate_list() {
        let instance = instance(
            vec![job(1, 1, 9), job(2, 2, 1)],
            vec![vehicle(0, Some(0), None, 4)],
            vec![vec![0, 1, 2], vec![1, 0, 2], vec![2, 2, 0]],
        );
        for init in [
            InitStrategy::None,
            InitStrategy::HigherAmount,
            InitStrategy::Nearest,
        ] {
            let clustering = Clustering::run(&instance, Strategy::Sequential, init, 1.0).unwrap();
            assert!(clustering.unassigned.contains(0));
            assert_eq!(clustering.clusters[0], vec![1]);
            assert_valid_clustering(&instance, &clustering);
        }
    }

    #[test]
    fn empty_fleet_is_a_no_op() {
        let instance = instance(vec![job(1, 1, 1)], vec![], vec![vec![0, 1], vec![1, 0]]);
        let clustering =
            Clustering::run(&instance, Strategy::Sequential, InitStrategy::Nearest, 1.0).unwrap();
        assert_eq!(clustering.unassigned.count_ones(..), 1);
        assert_eq!(clustering.edges_cost, 0);
    }

    #[test]
    fn end_only_vehicle_uses_the_job_to_end_direction() {
        let instance = instance(
            vec![job(1, 1, 1)],
            vec![vehicle(0, None, Some(0), 10)],
            vec![vec![0, 9], vec![6, 0]],
        );
        let clustering =
            Clustering::run(&instance, Strategy::Sequential, InitStrategy::Nearest, 1.0).unwrap();
        // baseline is M[1][0] = 6, and the seed is accounted at it
        assert_eq!(clustering.edges_cost, 6);
        assert_eq!(clustering.clusters[0], vec![0]);
    }
}
