use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use common::{shard_for, JobError, WordCount};

/// Count words across the assigned input files and scatter the totals into
/// this mapper's row of intermediate files, one file per reducer shard.
///
/// The shard files must already exist: the coordinator creates the whole
/// grid before any mapper runs, and a mapper only ever opens its own row.
/// On any failure the task aborts as-is; removing half-written shard files
/// is the coordinator's job.
pub fn run_map_task(input_files: &[PathBuf], output_shards: &[PathBuf]) -> Result<(), JobError> {
    let mut counts = WordCount::new();
    for path in input_files {
        let text = fs::read_to_string(path).map_err(|e| JobError::io("read", path, e))?;
        count_words(&text, &mut counts);
    }

    let mut writers = Vec::with_capacity(output_shards.len());
    for path in output_shards {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| JobError::io("open", path, e))?;
        writers.push(BufWriter::new(file));
    }

    // Occurrences are aggregated across all assigned files before anything
    // is written, so a shard file sees one line per distinct word.
    for (word, count) in &counts {
        let shard = shard_for(word, output_shards.len());
        writeln!(writers[shard], "{word} {count}")
            .map_err(|e| JobError::io("write", &output_shards[shard], e))?;
    }
    for (shard, writer) in writers.iter_mut().enumerate() {
        writer
            .flush()
            .map_err(|e| JobError::io("write", &output_shards[shard], e))?;
    }
    Ok(())
}

/// Tokenize `text` and add its word occurrences into `counts`.
///
/// Tokens are whitespace-delimited, lower-cased, then split again on every
/// character that is neither a letter nor a digit. A hyphenated compound
/// like `a-b` therefore counts as two words.
fn count_words(text: &str, counts: &mut WordCount) {
    for token in text.split_whitespace() {
        let token = token.to_lowercase();
        for word in token.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            *counts.entry(word.to_owned()).or_insert(0) += 1;
        }
    }
}
