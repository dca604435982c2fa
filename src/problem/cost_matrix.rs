use crate::error::SolverError;
use crate::problem::Cost;

/// Dense row-major `N×N` cost table over location indices. Entries may be
/// asymmetric; the clustering core only ever reads the bidirectional
/// `between` view.
#[derive(Debug)]
pub struct CostMatrix {
    n: usize,
    data: Vec<Cost>,
}

impl CostMatrix {
    /// Builds a matrix from parsed rows, rejecting non-square input.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, SolverError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(SolverError::invalid_input(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    #[inline(always)]
    fn idx(&self, from: usize, to: usize) -> usize {
        debug_assert!(from < self.n);
        debug_assert!(to < self.n);
        from * self.n + to
    }

    #[inline(always)]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Directed cost. Clustering must not use this except for the
    /// start/end baseline of the sequential variant; use `between`.
    #[inline(always)]
    pub fn cost(&self, from: usize, to: usize) -> Cost {
        self.data[self.idx(from, to)]
    }

    /// The cheaper direction of the link between two locations.
    #[inline(always)]
    pub fn between(&self, a: usize, b: usize) -> Cost {
        self.cost(a, b).min(self.cost(b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_takes_the_cheaper_direction() {
        let m = CostMatrix::from_rows(vec![vec![0, 7], vec![3, 0]]).unwrap();
        assert_eq!(m.cost(0, 1), 7);
        assert_eq!(m.cost(1, 0), 3);
        assert_eq!(m.between(0, 1), 3);
        assert_eq!(m.between(1, 0), 3);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = CostMatrix::from_rows(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(err.code(), 2);
    }
}
