use cubit_blocks::MaterialId;

use crate::error::StructureError;

/// One horizontal slice of a structure: `rows` along Z, `cols` along X.
/// `None` cells accept any block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    rows: usize,
    cols: usize,
    cells: Vec<Option<MaterialId>>,
}

impl Layer {
    /// Builds a layer from rows that must all be the same width.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, StructureError>
    where
        R: AsRef<[Option<MaterialId>]>,
    {
        let mut cols = None;
        let mut cells = Vec::new();
        let mut n = 0;
        for (row, r) in rows.into_iter().enumerate() {
            n += 1;
            let r = r.as_ref();
            let expected = *cols.get_or_insert(r.len());
            if r.len() != expected {
                return Err(StructureError::RaggedRow {
                    layer: 0,
                    row,
                    expected,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        match cols {
            None => Err(StructureError::EmptyLayer { layer: 0 }),
            Some(cols) => {
                check_dims(n, cols)?;
                Ok(Self {
                    rows: n,
                    cols,
                    cells,
                })
            }
        }
    }

    /// Number of rows (Z extent).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (X extent).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<MaterialId> {
        if col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied().flatten()
    }

    /// Cells with a material requirement as `(row, col, material)`, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, MaterialId)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, m)| m.map(|m| (i / cols, i % cols, m)))
    }
}

// Cells are placed at i32 offsets, so both extents must fit.
fn check_dims(rows: usize, cols: usize) -> Result<(), StructureError> {
    if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
        return Err(StructureError::LayerTooLarge {
            layer: 0,
            rows,
            cols,
        });
    }
    Ok(())
}
