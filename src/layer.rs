use crate::error::{Error, Result};

/// One layer of tile indices, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    data: Vec<u32>,
    width: usize,
}

impl TileLayer {
    /// Wrap `data` as a `width` x `height` layer.
    ///
    /// `name` is only used to label the error when the length is wrong.
    pub fn new(name: &str, data: Vec<u32>, width: usize, height: usize) -> Result<Self> {
        let Some(expected) = width.checked_mul(height) else {
            return Err(Error::invalid(
                name,
                format!("layer of {}x{} tiles is too large", width, height),
            ));
        };
        if data.len() != expected {
            return Err(Error::invalid(
                name,
                format!(
                    "layer has {} tiles, expected {}x{}={}",
                    data.len(),
                    width,
                    height,
                    expected
                ),
            ));
        }
        Ok(TileLayer { data, width })
    }

    /// Tile index at `(col, row)`.
    #[inline]
    pub fn tile(&self, col: usize, row: usize) -> u32 {
        self.data[row * self.width + col]
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_length_mismatch() {
        let err = TileLayer::new("ground", vec![1, 2, 3], 2, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidResource { name, .. } if name == "ground"));
    }

    #[test]
    fn rejects_dimensions_that_overflow() {
        let err = TileLayer::new("huge", Vec::new(), usize::MAX, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidResource { name, .. } if name == "huge"));
    }

    #[test]
    fn indexes_row_major() {
        let layer = TileLayer::new("ground", vec![0, 1, 2, 3, 4, 5], 3, 2).unwrap();
        assert_eq!(layer.tile(0, 0), 0);
        assert_eq!(layer.tile(2, 0), 2);
        assert_eq!(layer.tile(0, 1), 3);
        assert_eq!(layer.tile(2, 1), 5);
    }
}
