use crate::{error::TrackingError, Float, ROW_CHUNK_SIZE};
use rayon::prelude::*;

pub const X: usize = 0;
pub const PX: usize = 1;
pub const Y: usize = 2;
pub const PY: usize = 3;
pub const DELTA: usize = 4;
pub const CT: usize = 5;
pub const TOF: usize = 6;

pub const MIN_COLUMNS: usize = 6;
pub const MAX_COLUMNS: usize = 7;

/// A particle ensemble stored as a row-major 2D array.
///
/// Each row is one particle. The layout if it were a 2d array:
/// ----------------------------------------------------------
/// |  x  |  px  |  y  |  py  |  delta  |  ct  |  (tof)  |   particle 0
/// ----------------------------------------------------------
/// |  x  |  px  |  y  |  py  |  delta  |  ct  |  (tof)  |   particle 1
/// ----------------------------------------------------------
/// The 7th column is only present when time of flight is tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpace {
    rows: usize,
    cols: usize,
    data: Vec<Float>,
}

fn check_columns(cols: usize) -> Result<(), TrackingError> {
    if cols < MIN_COLUMNS || cols > MAX_COLUMNS {
        return Err(TrackingError::ColumnCount(cols));
    }
    Ok(())
}

impl PhaseSpace {
    pub fn zeros(rows: usize, cols: usize) -> Result<PhaseSpace, TrackingError> {
        check_columns(cols)?;
        Ok(PhaseSpace {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    pub fn from_vec(cols: usize, data: Vec<Float>) -> Result<PhaseSpace, TrackingError> {
        check_columns(cols)?;
        if data.len() % cols != 0 {
            return Err(TrackingError::RaggedBuffer {
                len: data.len(),
                cols,
            });
        }
        Ok(PhaseSpace {
            rows: data.len() / cols,
            cols,
            data,
        })
    }

    pub fn from_rows(rows: &[Vec<Float>]) -> Result<PhaseSpace, TrackingError> {
        let cols = rows.first().map_or(MIN_COLUMNS, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TrackingError::RaggedBuffer {
                    len: row.len(),
                    cols,
                });
            }
            data.extend_from_slice(row);
        }
        PhaseSpace::from_vec(cols, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn time_of_flight(&self) -> bool {
        self.cols == MAX_COLUMNS
    }

    pub fn row(&self, i: usize) -> &[Float] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [Float] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Float] {
        &mut self.data
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = Float> + '_ {
        self.data.iter().skip(col).step_by(self.cols).copied()
    }

    /// Number of particles with at least one non-finite coordinate.
    pub fn count_non_finite(&self) -> usize {
        self.data
            .par_chunks(self.cols)
            .filter(|row| row.iter().any(|v| !v.is_finite()))
            .count()
    }
}

/// The input/output pair a tracking kernel works on.
///
/// `Split` reads from one buffer and writes the other. `Aliased` reads and
/// writes the same storage: each row is copied to the stack before any of
/// it is overwritten, so every output value is computed from pre-update
/// inputs exactly as in the split case.
#[derive(Debug)]
pub enum Buffers<'a> {
    Split {
        input: &'a PhaseSpace,
        output: &'a mut PhaseSpace,
    },
    Aliased(&'a mut PhaseSpace),
}

impl<'a> Buffers<'a> {
    pub fn split(input: &'a PhaseSpace, output: &'a mut PhaseSpace) -> Buffers<'a> {
        Buffers::Split { input, output }
    }

    pub fn aliased(beam: &'a mut PhaseSpace) -> Buffers<'a> {
        Buffers::Aliased(beam)
    }

    pub fn input(&self) -> &PhaseSpace {
        match self {
            Buffers::Split { input, .. } => input,
            Buffers::Aliased(beam) => beam,
        }
    }

    pub fn output(&self) -> &PhaseSpace {
        match self {
            Buffers::Split { output, .. } => output,
            Buffers::Aliased(beam) => beam,
        }
    }

    pub fn rows(&self) -> usize {
        self.input().rows
    }

    pub fn time_of_flight(&self) -> bool {
        self.input().time_of_flight()
    }

    /// Fails unless input and output have the same 6 or 7 column shape.
    pub(crate) fn check_shape(&self) -> Result<(), TrackingError> {
        let input = self.input();
        check_columns(input.cols)?;
        if let Buffers::Split { input, output } = self {
            if input.rows != output.rows || input.cols != output.cols {
                return Err(TrackingError::ShapeMismatch {
                    input_rows: input.rows,
                    input_cols: input.cols,
                    output_rows: output.rows,
                    output_cols: output.cols,
                });
            }
        }
        Ok(())
    }

    /// Run `f(src_row, dst_row)` for every particle in parallel.
    ///
    /// `src_row` always holds the pre-update coordinates. Rows are handed to
    /// rayon in chunks of at least `ROW_CHUNK_SIZE`; no row ever sees
    /// another row's data.
    pub(crate) fn for_each_row<F>(&mut self, f: F)
    where
        F: Fn(&[Float], &mut [Float]) + Sync,
    {
        match self {
            Buffers::Split { input, output } => {
                let cols = input.cols;
                output
                    .data
                    .par_chunks_mut(cols)
                    .zip(input.data.par_chunks(cols))
                    .with_min_len(ROW_CHUNK_SIZE)
                    .for_each(|(dst, src)| f(src, dst));
            }
            Buffers::Aliased(beam) => {
                let cols = beam.cols;
                beam.data
                    .par_chunks_mut(cols)
                    .with_min_len(ROW_CHUNK_SIZE)
                    .for_each(|row| {
                        let mut snapshot: [Float; MAX_COLUMNS] = [0.0; MAX_COLUMNS];
                        snapshot[..cols].copy_from_slice(row);
                        f(&snapshot[..cols], row)
                    });
            }
        }
    }
}

/// Copy the columns a kernel does not touch.
#[inline(always)]
pub(crate) fn pass_through(src: &[Float], dst: &mut [Float], from: usize) {
    dst[from..].copy_from_slice(&src[from..]);
}
