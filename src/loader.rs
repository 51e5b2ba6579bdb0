//! Parses the model file format:
//!
//! ```text
//! @ sabir 1
//! > <num_labels> <labels_len> <num_features>
//! <label_1>
//! ...
//! <label_num_labels>
//! <count_1>
//! ...
//! <count_num_features>
//! ```
//!
//! 'labels_len' is the total length of the label names, without line
//! terminators. Each count is turned into the feature score ln(count + 1).

use crate::error::Error;
use crate::label::Label;
use crate::model::Model;
use crate::Config;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// The first line of every model file.
pub const MAGIC: &[u8] = b"@ sabir 1\n";

/// Limits that keep the sizes in a sane range.
pub const MAX_LABELS: usize = 255;
pub const MAX_LABELS_LEN: usize = 2048;
pub const MAX_FEATURES: usize = 400_000;

/// Read one line, up to 'limit' bytes, including the terminator if there is
/// one.
fn read_line<R: BufRead>(reader: &mut R, limit: u64) -> Result<Vec<u8>, Error> {
    let mut line = Vec::new();
    reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut line)
        .map_err(Error::Io)?;
    Ok(line)
}

/// Read one line of any length, including the terminator if there is one.
/// Numbers may carry any number of leading zeros, so their lines have no
/// fixed bound.
fn read_whole_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, Error> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).map_err(Error::Io)?;
    Ok(line)
}

/// Parse a decimal number made only of digits.
fn parse_number(text: &[u8]) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    let mut val: u64 = 0;
    for &c in text {
        if !c.is_ascii_digit() {
            return None;
        }
        val = val.checked_mul(10)?.checked_add((c - b'0') as u64)?;
    }
    Some(val)
}

/// Parse the section sizes: "> num_labels labels_len num_features".
fn parse_header(line: &[u8]) -> Option<(usize, usize, usize)> {
    let body = line.strip_suffix(b"\n")?.strip_prefix(b"> ")?;
    let mut fields = body
        .split(|c| *c == b' ')
        .filter(|f| !f.is_empty())
        .map(parse_number);
    let num_labels = fields.next()??;
    let labels_len = fields.next()??;
    let num_features = fields.next()??;
    if fields.next().is_some() {
        return None;
    }
    Some((
        usize::try_from(num_labels).ok()?,
        usize::try_from(labels_len).ok()?,
        usize::try_from(num_features).ok()?,
    ))
}

/// Read 'num_labels' names, one per line. Their total length must be exactly
/// 'labels_len'.
fn read_labels<R: BufRead>(
    reader: &mut R,
    num_labels: usize,
    labels_len: usize,
) -> Result<Vec<Label>, Error> {
    let mut labels = Vec::new();
    labels
        .try_reserve_exact(num_labels)
        .map_err(|_| Error::OutOfMemory)?;

    let mut remaining = labels_len;
    for _ in 0..num_labels {
        // Allow one more byte than the budget so that we see the terminator.
        let line = read_line(reader, remaining as u64 + 1)?;
        let name = match line.strip_suffix(b"\n") {
            Some(name) if !name.is_empty() => name,
            _ => return Err(Error::BadModel),
        };
        remaining -= name.len();
        labels.push(Label::new(name));
    }

    if remaining != 0 {
        return Err(Error::BadModel);
    }
    Ok(labels)
}

/// Read 'num_features' counts, one per line, and convert them to scores.
fn read_features<R: BufRead>(
    reader: &mut R,
    num_features: usize,
) -> Result<Vec<f64>, Error> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(num_features)
        .map_err(|_| Error::OutOfMemory)?;

    for i in 0..num_features {
        let line = read_whole_line(reader)?;
        let digits = match line.strip_suffix(b"\n") {
            Some(digits) => digits,
            // Only the last line may omit the terminator.
            None if i + 1 == num_features => &line[..],
            None => return Err(Error::BadModel),
        };
        let count = parse_number(digits).ok_or(Error::BadModel)?;
        let count = count.checked_add(1).ok_or(Error::BadModel)?;
        table.push((count as f64).ln());
    }
    Ok(table)
}

/// Parse a model from 'reader'.
pub fn parse<R: BufRead>(
    mut reader: R,
    config: Config,
) -> Result<Model, Error> {
    let magic = read_line(&mut reader, MAGIC.len() as u64)?;
    if magic != MAGIC {
        return Err(Error::BadMagic);
    }

    let header = read_whole_line(&mut reader)?;
    let (num_labels, labels_len, num_features) =
        parse_header(&header).ok_or(Error::BadModel)?;

    if num_labels == 0 || num_labels > MAX_LABELS {
        return Err(Error::BadModel);
    }
    if labels_len == 0 || labels_len > MAX_LABELS_LEN {
        return Err(Error::BadModel);
    }
    if num_features == 0
        || num_features > MAX_FEATURES
        || !num_features.is_power_of_two()
    {
        return Err(Error::BadModel);
    }

    let labels = read_labels(&mut reader, num_labels, labels_len)?;
    let table = read_features(&mut reader, num_features)?;

    // Should have reached the end of the file by now.
    if !reader.fill_buf().map_err(Error::Io)?.is_empty() {
        return Err(Error::BadModel);
    }

    log::debug!(
        "Loaded a model with {} labels and {} features.",
        num_labels,
        num_features
    );
    Ok(Model::new(labels, table, config))
}

/// Load the model stored at 'path'.
pub fn load<P: AsRef<Path>>(path: P, config: Config) -> Result<Model, Error> {
    let file = File::open(path).map_err(Error::Open)?;
    parse(BufReader::new(file), config)
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number(b"0"), Some(0));
    assert_eq!(parse_number(b"0042"), Some(42));
    assert_eq!(parse_number(b"000000000000000000000000001"), Some(1));
    assert_eq!(parse_number(b"18446744073709551615"), Some(u64::MAX));
    assert_eq!(parse_number(b"18446744073709551616"), None);
    assert_eq!(parse_number(b""), None);
    assert_eq!(parse_number(b"-1"), None);
    assert_eq!(parse_number(b"+1"), None);
    assert_eq!(parse_number(b"1 "), None);
}

#[test]
fn test_parse_header() {
    assert_eq!(parse_header(b"> 2 4 8\n"), Some((2, 4, 8)));
    assert_eq!(parse_header(b"> 2  4 8\n"), Some((2, 4, 8)));
    assert_eq!(parse_header(b"> 2 4 8"), None);
    assert_eq!(parse_header(b"> 2 4\n"), None);
    assert_eq!(parse_header(b"> 2 4 8 16\n"), None);
    assert_eq!(parse_header(b"2 4 8\n"), None);
    assert_eq!(parse_header(b"> a 4 8\n"), None);
    let padded = format!("> {:0>40} {:0>40} {:0>40}\n", 2, 4, 8);
    assert_eq!(parse_header(padded.as_bytes()), Some((2, 4, 8)));
}
