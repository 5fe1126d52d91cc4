use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use common::{JobError, WordCount};

/// Merge one reducer shard: sum the partial counts from every mapper's
/// intermediate file for this shard and write the totals to the output
/// file, one `<word> <count>` line per word, in no particular order.
///
/// The output file must already exist; the coordinator creates it before
/// the reduce phase starts.
pub fn run_reduce_task(input_shards: &[PathBuf], output_file: &Path) -> Result<(), JobError> {
    let mut counts = WordCount::new();
    for path in input_shards {
        let file = File::open(path).map_err(|e| JobError::io("open", path, e))?;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| JobError::io("read", path, e))?;
            if let Some((word, count)) = scan_line(&line) {
                *counts.entry(word.to_owned()).or_insert(0) += count;
            }
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .open(output_file)
        .map_err(|e| JobError::io("open", output_file, e))?;
    let mut writer = BufWriter::new(file);
    for (word, count) in &counts {
        writeln!(writer, "{word} {count}").map_err(|e| JobError::io("write", output_file, e))?;
    }
    writer
        .flush()
        .map_err(|e| JobError::io("write", output_file, e))?;
    Ok(())
}

/// Best-effort scan of a `<word> <count>` line.
///
/// A missing or non-numeric count is read as zero instead of failing, so a
/// malformed intermediate line degrades silently. Callers must not rely on
/// this for validation.
fn scan_line(line: &str) -> Option<(&str, u64)> {
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    let count = fields.next().and_then(|field| field.parse().ok()).unwrap_or(0);
    Some((word, count))
}
