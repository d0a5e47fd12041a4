use std::{path::Path, time::Instant};

use rayon::prelude::*;
use regex::Regex;

use crate::{autocomplete::normalize_phrase, corpus::Corpus, models::Phrase};

pub const DEFAULT_BATCH_SIZE: usize = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("{0}")]
    Validation(String),
}

/// Raw row: line number and its columns.
type Row = (usize, csv::StringRecord);

/// Load a tab-delimited frequency file into the corpus.
///
/// Each line is `frequency<TAB>word<TAB>word...`. The words are joined with
/// spaces and normalized. Rows are read sequentially, parsed in parallel
/// batches and each batch is inserted in file order under a single corpus
/// write lock.
/// Returns the number of phrases read.
pub fn import_file(
    file_path: &Path,
    corpus: &Corpus,
    batch_size: usize,
) -> Result<usize, ImportError> {
    log::info!("importing phrases from {} ...", file_path.display());

    let start = Instant::now();
    let file = std::fs::File::open(file_path)?;
    let n = import_reader(file, corpus, batch_size)?;

    log::info!(
        "finished. imported {} phrases in {} msec ({} in corpus)",
        n,
        start.elapsed().as_millis(),
        corpus.len()
    );

    Ok(n)
}

pub fn import_reader<R: std::io::Read>(
    reader: R,
    corpus: &Corpus,
    batch_size: usize,
) -> Result<usize, ImportError> {
    let batch_size = if batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        batch_size
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let re_spaces = Regex::new(r"\s+")?;

    let mut rows: Vec<Row> = Vec::with_capacity(batch_size);
    let mut n = 0;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        rows.push((line, record));

        if rows.len().is_multiple_of(batch_size) {
            n += insert_batch(&rows, corpus, &re_spaces)?;
            rows.clear();
        }
    }

    // Flush any remaining rows.
    if !rows.is_empty() {
        n += insert_batch(&rows, corpus, &re_spaces)?;
    }

    Ok(n)
}

/// Parse rows in parallel and insert them into the corpus in file order, so a
/// later row with the same text replaces an earlier one.
fn insert_batch(
    rows: &[Row],
    corpus: &Corpus,
    re_spaces: &Regex,
) -> Result<usize, ImportError> {
    let phrases = rows
        .par_iter()
        .map(|(line, record)| read_phrase(record, *line, re_spaces))
        .collect::<Result<Vec<_>, _>>()?;

    let phrases: Vec<Phrase> = phrases.into_iter().flatten().collect();
    let n = phrases.len();
    corpus.extend(phrases);

    Ok(n)
}

fn read_phrase(
    record: &csv::StringRecord,
    line: usize,
    re_spaces: &Regex,
) -> Result<Option<Phrase>, ImportError> {
    let mut cols = record.iter();

    let freq = cols.next().unwrap_or("").trim();
    let words = cols.collect::<Vec<_>>().join(" ");
    let text = normalize_phrase(&words, re_spaces);

    if text.is_empty() {
        if !freq.is_empty() {
            log::warn!("line {}: empty phrase, skipping", line);
        }
        return Ok(None);
    }

    if freq.is_empty() {
        return Ok(Some(Phrase::unscored(text)));
    }

    let freq: i64 = freq.parse().map_err(|_| {
        ImportError::Validation(format!(
            "line {}: invalid frequency '{}' in column 0",
            line, freq
        ))
    })?;

    Ok(Some(Phrase::new(text, freq)))
}
