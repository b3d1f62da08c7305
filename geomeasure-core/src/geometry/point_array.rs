//! Fixed-dimension coordinate sequences.

use geo::Coord;

use crate::error::{GeomError, Result};

/// An ordered sequence of XY, XYZ, XYM or XYZM tuples stored flat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointArray {
    has_z: bool,
    has_m: bool,
    ordinates: Vec<f64>,
}

impl PointArray {
    /// An empty array with the given dimensionality.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            ordinates: Vec::new(),
        }
    }

    /// Build an array from flat ordinates; the length must be a multiple of the tuple width.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::PointArray;
    ///
    /// let pa = PointArray::from_ordinates(true, false, vec![0.0, 0.0, 1.0, 2.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(pa.len(), 2);
    /// assert!(PointArray::from_ordinates(false, false, vec![1.0, 2.0, 3.0]).is_err());
    /// ```
    pub fn from_ordinates(has_z: bool, has_m: bool, ordinates: Vec<f64>) -> Result<Self> {
        let dims = dims_for(has_z, has_m);
        if ordinates.len() % dims != 0 {
            return Err(GeomError::InvalidInput(format!(
                "{} ordinates do not form whole {dims}-tuples",
                ordinates.len()
            )));
        }
        Ok(Self {
            has_z,
            has_m,
            ordinates,
        })
    }

    /// Build a 2D array from `(x, y)` pairs.
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        let mut ordinates = Vec::with_capacity(coords.len() * 2);
        for &(x, y) in coords {
            ordinates.push(x);
            ordinates.push(y);
        }
        Self {
            has_z: false,
            has_m: false,
            ordinates,
        }
    }

    pub fn has_z(&self) -> bool {
        self.has_z
    }

    pub fn has_m(&self) -> bool {
        self.has_m
    }

    /// Number of doubles per tuple.
    pub fn dims(&self) -> usize {
        dims_for(self.has_z, self.has_m)
    }

    pub fn len(&self) -> usize {
        self.ordinates.len() / self.dims()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinates.is_empty()
    }

    pub fn ordinates(&self) -> &[f64] {
        &self.ordinates
    }

    /// The full tuple at `index`. Panics when out of range, like slice indexing.
    pub fn tuple(&self, index: usize) -> &[f64] {
        let dims = self.dims();
        &self.ordinates[index * dims..(index + 1) * dims]
    }

    /// XY of the tuple at `index`.
    pub fn coord(&self, index: usize) -> Coord<f64> {
        let dims = self.dims();
        Coord {
            x: self.ordinates[index * dims],
            y: self.ordinates[index * dims + 1],
        }
    }

    /// Z of the tuple at `index`, when the array carries one.
    pub fn z(&self, index: usize) -> Option<f64> {
        self.has_z.then(|| self.ordinates[index * self.dims() + 2])
    }

    /// M of the tuple at `index`, when the array carries one.
    pub fn m(&self, index: usize) -> Option<f64> {
        let dims = self.dims();
        self.has_m.then(|| self.ordinates[index * dims + dims - 1])
    }

    pub fn first(&self) -> Option<Coord<f64>> {
        (!self.is_empty()).then(|| self.coord(0))
    }

    pub fn last(&self) -> Option<Coord<f64>> {
        (!self.is_empty()).then(|| self.coord(self.len() - 1))
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.ordinates
            .chunks_exact(self.dims())
            .map(|t| Coord { x: t[0], y: t[1] })
    }

    /// Append one tuple of exactly [`dims`](Self::dims) doubles.
    pub fn push(&mut self, tuple: &[f64]) -> Result<()> {
        if tuple.len() != self.dims() {
            return Err(GeomError::InvalidInput(format!(
                "expected a {}-tuple, got {} ordinates",
                self.dims(),
                tuple.len()
            )));
        }
        self.ordinates.extend_from_slice(tuple);
        Ok(())
    }

    /// First and last XY are bit-for-bit identical.
    pub fn is_closed_2d(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits(),
            _ => false,
        }
    }

    /// Closed in XY and, when present, in Z.
    pub fn is_closed_3d(&self) -> bool {
        if !self.is_closed_2d() {
            return false;
        }
        match (self.z(0), self.z(self.len() - 1)) {
            (Some(a), Some(b)) => a.to_bits() == b.to_bits(),
            _ => true,
        }
    }

    /// Copy keeping only X and Y.
    pub fn force_2d(&self) -> PointArray {
        self.force_dims(false, false, 0.0, 0.0)
    }

    /// Copy with the requested dimensionality, filling new ordinates with the given values.
    pub fn force_dims(&self, has_z: bool, has_m: bool, zval: f64, mval: f64) -> PointArray {
        let mut out = PointArray::new(has_z, has_m);
        out.ordinates.reserve(self.len() * dims_for(has_z, has_m));
        for i in 0..self.len() {
            let c = self.coord(i);
            out.ordinates.push(c.x);
            out.ordinates.push(c.y);
            if has_z {
                out.ordinates.push(self.z(i).unwrap_or(zval));
            }
            if has_m {
                out.ordinates.push(self.m(i).unwrap_or(mval));
            }
        }
        out
    }
}

pub(crate) fn dims_for(has_z: bool, has_m: bool) -> usize {
    2 + usize::from(has_z) + usize::from(has_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zm_accessors_pick_the_right_ordinates() {
        let pa = PointArray::from_ordinates(true, true, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(pa.coord(0), Coord { x: 1.0, y: 2.0 });
        assert_eq!(pa.z(0), Some(3.0));
        assert_eq!(pa.m(0), Some(4.0));

        let xym = PointArray::from_ordinates(false, true, vec![1.0, 2.0, 9.0]).unwrap();
        assert_eq!(xym.z(0), None);
        assert_eq!(xym.m(0), Some(9.0));
    }

    #[test]
    fn closure_is_bit_exact() {
        let closed = PointArray::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(closed.is_closed_2d());

        let signed_zero = PointArray::from_xy(&[(0.0, 0.0), (1.0, 0.0), (-0.0, 0.0)]);
        assert!(!signed_zero.is_closed_2d());

        assert!(!PointArray::new(false, false).is_closed_2d());
    }

    #[test]
    fn closure_in_z_requires_matching_z() {
        let open_z =
            PointArray::from_ordinates(true, false, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 5.0])
                .unwrap();
        assert!(open_z.is_closed_2d());
        assert!(!open_z.is_closed_3d());
    }

    #[test]
    fn force_dims_fills_missing_values() {
        let pa = PointArray::from_xy(&[(1.0, 2.0)]);
        let zm = pa.force_dims(true, true, 7.0, 8.0);
        assert_eq!(zm.tuple(0), &[1.0, 2.0, 7.0, 8.0]);
        assert_eq!(zm.force_2d(), pa);
    }

    #[test]
    fn push_rejects_wrong_width() {
        let mut pa = PointArray::new(true, false);
        assert!(pa.push(&[1.0, 2.0]).is_err());
        pa.push(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(pa.len(), 1);
    }
}
