use serde::{Deserialize, Serialize};

/// Dense row-major boolean matrix.
///
/// Serialises as an array of rows so observations read naturally as JSON.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<bool>>", try_from = "Vec<Vec<bool>>")]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::square(n);
        for i in 0..n {
            m.set(i, i, true);
        }
        m
    }

    /// Build from explicit rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, String> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(height * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(format!(
                    "row {i} has {} entries, expected {width}",
                    row.len()
                ));
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        if r >= self.rows || c >= self.cols {
            return false;
        }
        self.cells[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: bool) {
        if r < self.rows && c < self.cols {
            self.cells[r * self.cols + c] = value;
        }
    }

    /// Sets both `(a, b)` and `(b, a)`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, value: bool) {
        self.set(a, b, value);
        self.set(b, a, value);
    }

    pub fn row(&self, r: usize) -> &[bool] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    pub fn same_shape(&self, other: &BoolMatrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }

    pub fn diagonal_is(&self, value: bool) -> bool {
        (0..self.rows.min(self.cols)).all(|i| self.get(i, i) == value)
    }

    /// True when every set cell of `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &BoolMatrix) -> bool {
        self.same_shape(other)
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(&a, &b)| !a || b)
    }

    /// Elementwise XOR. Shapes must match; a mismatched operand is ignored.
    pub fn xor_assign(&mut self, other: &BoolMatrix) {
        if !self.same_shape(other) {
            return;
        }
        for (a, &b) in self.cells.iter_mut().zip(&other.cells) {
            *a ^= b;
        }
    }

    /// Elementwise AND, used to clamp a matrix to a mask.
    pub fn and_assign(&mut self, mask: &BoolMatrix) {
        if !self.same_shape(mask) {
            return;
        }
        for (a, &b) in self.cells.iter_mut().zip(&mask.cells) {
            *a &= b;
        }
    }

    pub fn count_true(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    #[cfg(test)]
    pub(crate) fn from_bits<const C: usize>(rows: &[[u8; C]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|&v| v != 0).collect())
            .collect();
        Self::from_rows(rows).unwrap()
    }
}

impl From<BoolMatrix> for Vec<Vec<bool>> {
    fn from(m: BoolMatrix) -> Self {
        m.to_rows()
    }
}

impl TryFrom<Vec<Vec<bool>>> for BoolMatrix {
    type Error = String;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        BoolMatrix::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let err = BoolMatrix::from_rows(vec![vec![true, false], vec![true]]).unwrap_err();
        assert!(err.contains("row 1"), "{err}");
    }

    #[test]
    fn xor_then_mask_clamps_to_mask() {
        let mut m = BoolMatrix::from_bits(&[[1, 0], [0, 1]]);
        m.xor_assign(&BoolMatrix::from_bits(&[[0, 1], [1, 0]]));
        assert_eq!(m, BoolMatrix::from_bits(&[[1, 1], [1, 1]]));
        m.and_assign(&BoolMatrix::identity(2));
        assert_eq!(m, BoolMatrix::identity(2));
    }

    #[test]
    fn subset_and_symmetry() {
        let a = BoolMatrix::from_bits(&[[1, 1, 0], [1, 1, 0], [0, 0, 1]]);
        let b = BoolMatrix::from_bits(&[[1, 1, 0], [1, 1, 1], [0, 1, 1]]);
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert!(a.is_symmetric());
        assert!(a.diagonal_is(true));
        assert!(!BoolMatrix::from_bits(&[[0, 1], [0, 0]]).is_symmetric());
    }

    #[test]
    fn json_uses_nested_rows() {
        let m = BoolMatrix::from_bits(&[[1, 0], [0, 1]]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[true,false],[false,true]]");
        let back: BoolMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn out_of_range_reads_are_false() {
        let m = BoolMatrix::identity(2);
        assert!(!m.get(5, 5));
        assert_eq!(m.count_true(), 2);
    }
}
