use std::ops::Range;

/// Split `num_files` input files into contiguous, non-overlapping,
/// near-equal ranges, one per active mapper.
///
/// With at least as many files as mappers every mapper is active and range
/// sizes differ by at most one. With fewer files than mappers only the
/// first `num_files` mappers are active, one file each.
pub fn ranges(num_files: usize, num_mappers: usize) -> Vec<Range<usize>> {
    if num_files >= num_mappers {
        (0..num_mappers)
            .map(|i| (i * num_files / num_mappers)..((i + 1) * num_files / num_mappers))
            .collect()
    } else {
        (0..num_files).map(|i| i..i + 1).collect()
    }
}
