use std::fs::{self, File};
use std::path::{Path, PathBuf};

use common::JobError;

/// The grid of intermediate artifacts exchanged between the two phases.
///
/// Cell (i, j) holds the partial counts produced by mapper `i` for reducer
/// shard `j`. The grid is fully allocated before any mapper runs — mappers
/// open their row's files, they never create them — and it is partitioned
/// by construction: each mapper writes only its own row and each reducer
/// reads only its own column, so no two tasks ever touch the same file.
#[derive(Debug)]
pub struct IntermediateGrid {
    cells: Vec<PathBuf>,
    shards: usize,
}

impl IntermediateGrid {
    /// Number of mapper rows.
    pub fn rows(&self) -> usize {
        if self.shards == 0 {
            0
        } else {
            self.cells.len() / self.shards
        }
    }

    /// The files mapper `row` scatters its counts into.
    pub fn row(&self, row: usize) -> &[PathBuf] {
        &self.cells[row * self.shards..(row + 1) * self.shards]
    }

    /// The files reducer `shard` merges, one from every mapper row.
    pub fn column(&self, shard: usize) -> Vec<PathBuf> {
        self.cells
            .iter()
            .skip(shard)
            .step_by(self.shards)
            .cloned()
            .collect()
    }

    fn paths(&self) -> &[PathBuf] {
        &self.cells
    }
}

/// Create the whole `rows` x `shards` grid of empty intermediate files.
///
/// If any creation fails, the files already created by this call are
/// released best-effort and the creation error is returned.
pub fn allocate_intermediates(
    dir: &Path,
    rows: usize,
    shards: usize,
) -> Result<IntermediateGrid, JobError> {
    let mut cells = Vec::with_capacity(rows * shards);
    for row in 0..rows {
        for shard in 0..shards {
            let path = dir.join(format!("mr-int-{row}-{shard}"));
            if let Err(source) = File::create(&path) {
                let partial = IntermediateGrid { cells, shards };
                let _ = release(&partial);
                return Err(JobError::storage("create", path, source));
            }
            cells.push(path);
        }
    }
    Ok(IntermediateGrid { cells, shards })
}

/// Create the `shards` output files under the configured output directory.
///
/// Output names embed the shard index, so a result path is reproducible
/// from the index alone. Outputs are never deleted by the coordinator;
/// they belong to the caller once the job succeeds.
pub fn allocate_outputs(dir: &Path, shards: usize) -> Result<Vec<PathBuf>, JobError> {
    let mut outputs = Vec::with_capacity(shards);
    for shard in 0..shards {
        let path = dir.join(format!("mr-out-{shard}"));
        File::create(&path).map_err(|e| JobError::storage("create", &path, e))?;
        outputs.push(path);
    }
    Ok(outputs)
}

/// Remove every artifact in the grid.
///
/// Removal keeps going past failures so one stray file cannot strand the
/// rest of the grid; only the first failure is reported.
pub fn release(grid: &IntermediateGrid) -> Result<(), JobError> {
    let mut first_error = None;
    for path in grid.paths() {
        if let Err(source) = fs::remove_file(path) {
            if first_error.is_none() {
                first_error = Some(JobError::storage("remove", path.clone(), source));
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn allocates_every_cell_empty() {
        let dir = tempdir().unwrap();
        let grid = allocate_intermediates(dir.path(), 2, 3).unwrap();

        assert_eq!(grid.rows(), 2);
        for row in 0..2 {
            assert_eq!(grid.row(row).len(), 3);
            for path in grid.row(row) {
                assert_eq!(fs::metadata(path).unwrap().len(), 0);
            }
        }
    }

    #[test]
    fn columns_cross_every_row() {
        let dir = tempdir().unwrap();
        let grid = allocate_intermediates(dir.path(), 3, 2).unwrap();

        let column = grid.column(1);
        assert_eq!(column.len(), 3);
        for (row, path) in column.iter().enumerate() {
            assert_eq!(path, &dir.path().join(format!("mr-int-{row}-1")));
        }
    }

    #[test]
    fn release_removes_the_whole_grid() {
        let dir = tempdir().unwrap();
        let grid = allocate_intermediates(dir.path(), 2, 2).unwrap();

        release(&grid).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn release_reports_first_failure_but_keeps_going() {
        let dir = tempdir().unwrap();
        let grid = allocate_intermediates(dir.path(), 2, 2).unwrap();

        // Sabotage one cell so its removal fails.
        fs::remove_file(&grid.paths()[1]).unwrap();

        let err = release(&grid).unwrap_err();
        assert!(matches!(err, JobError::Storage { op: "remove", .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn outputs_are_named_by_shard_index() {
        let dir = tempdir().unwrap();
        let outputs = allocate_outputs(dir.path(), 2).unwrap();

        assert_eq!(outputs[0], dir.path().join("mr-out-0"));
        assert_eq!(outputs[1], dir.path().join("mr-out-1"));
        for path in &outputs {
            assert!(path.exists());
        }
    }

    #[test]
    fn allocation_in_a_missing_directory_fails_with_storage_error() {
        let dir = tempdir().unwrap();

        let err = allocate_intermediates(&dir.path().join("missing"), 2, 2).unwrap_err();
        assert!(matches!(err, JobError::Storage { op: "create", .. }));
    }
}
