pub mod validator;

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use crate::problem::cost_matrix::CostMatrix;
    use crate::problem::cvrp::{create_instance_with, CvrpInstance, Job, Vehicle};
    use crate::problem::{Amount, Cost};

    pub fn job(id: u64, index: usize, amount: i64) -> Job {
        job_with_skills(id, index, amount, &[])
    }

    pub fn job_with_skills(id: u64, index: usize, amount: i64, skills: &[u32]) -> Job {
        Job {
            id,
            index,
            amount: Amount::new(vec![amount]),
            skills: HashSet::from_iter(skills.iter().copied()),
            location: None,
        }
    }

    pub fn vehicle(id: u64, start: Option<usize>, end: Option<usize>, capacity: i64) -> Vehicle {
        vehicle_with_skills(id, start, end, capacity, &[])
    }

    pub fn vehicle_with_skills(
        id: u64,
        start: Option<usize>,
        end: Option<usize>,
        capacity: i64,
        skills: &[u32],
    ) -> Vehicle {
        Vehicle {
            id,
            start,
            end,
            capacity: Amount::new(vec![capacity]),
            skills: HashSet::from_iter(skills.iter().copied()),
            start_location: None,
            end_location: None,
        }
    }

    pub fn instance(jobs: Vec<Job>, vehicles: Vec<Vehicle>, rows: Vec<Vec<Cost>>) -> CvrpInstance {
        create_instance_with(jobs, vehicles, CostMatrix::from_rows(rows).unwrap()).unwrap()
    }
}
