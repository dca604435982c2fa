use std::ops::SubAssign;

use serde::{Deserialize, Serialize};

pub mod compatibility;
pub mod cost_matrix;
pub mod cvrp;

/// Edge cost read off the matrix. `Cost::MAX` marks a candidate no bound
/// node has reached yet.
pub type Cost = u64;

pub type JobId = u64;
pub type VehicleId = u64;
pub type Skill = u32;

/// Multi-dimensional demand/capacity, compared componentwise. All amounts
/// of an instance share the same number of components (checked at
/// preflight).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Vec<i64>);

impl Amount {
    pub fn new(components: Vec<i64>) -> Self {
        Self(components)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn has_negative_component(&self) -> bool {
        self.0.iter().any(|&c| c < 0)
    }

    /// Componentwise `self <= other`.
    pub fn fits_within(&self, other: &Amount) -> bool {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// Component sum; the total order used where a single scalar is needed
    /// (higher-amount initialisation, capacity tie-breaking).
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }
}

impl SubAssign<&Amount> for Amount {
    fn sub_assign(&mut self, rhs: &Amount) {
        debug_assert_eq!(self.0.len(), rhs.0.len());
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_within_is_componentwise() {
        let small = Amount::new(vec![1, 5]);
        let large = Amount::new(vec![2, 5]);
        assert!(small.fits_within(&large));
        assert!(!large.fits_within(&small));
        // one component over is enough to reject
        assert!(!Amount::new(vec![3, 0]).fits_within(&large));
    }

    #[test]
    fn sub_assign_decrements_components() {
        let mut capacity = Amount::new(vec![4, 4]);
        capacity -= &Amount::new(vec![1, 3]);
        assert_eq!(capacity, Amount::new(vec![3, 1]));
    }

    #[test]
    fn total_sums_components() {
        assert_eq!(Amount::new(vec![2, 3, 4]).total(), 9);
    }
}
