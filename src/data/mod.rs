//! Readers for the whitespace-separated input files.

pub use edges::{load_testing_data, load_training_data, LabeledEdges};
pub use features::{load_features, Features};
pub use node_types::{load_node_types, NodeTypes};

mod edges;
mod features;
mod node_types;

use crate::error::{Error, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Calls `f` with the 1-based line number and the fields of every line of `path`.
///
/// Blank lines are malformed.
pub(crate) fn for_each_record<P, F>(path: P, mut f: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(usize, &[&str]) -> Result<()>,
{
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path).map_err(|e| Error::io(path, e))?);
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            return Err(Error::malformed(path, i + 1, "blank line"));
        }
        f(i + 1, &fields)?;
    }
    Ok(())
}

pub(crate) fn expect_fields(path: &Path, line: usize, fields: &[&str], n: usize) -> Result<()> {
    if fields.len() == n {
        Ok(())
    } else {
        Err(Error::malformed(
            path,
            line,
            format!("expected {} fields, found {}", n, fields.len()),
        ))
    }
}

#[cfg(test)]
pub(crate) fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_record_splits_on_any_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "f.txt", "a  b\tc\nd e\n");
        let mut records = Vec::new();
        for_each_record(&path, |line, fields| {
            records.push((line, fields.join(",")));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            records,
            vec![(1, String::from("a,b,c")), (2, String::from("d,e"))]
        );
    }

    #[test]
    fn test_for_each_record_rejects_blank_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "f.txt", "a b\n\nc d\n");
        let err = for_each_record(&path, |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_for_each_record_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = for_each_record(dir.path().join("absent.txt"), |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }
}
