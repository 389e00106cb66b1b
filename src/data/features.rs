use crate::{
    error::{Error, Result},
    types::NodeId,
};
use log::info;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Node identifier to a real-valued vector.
///
/// Used both for node features and for trained embeddings, which share the
/// same text format.
pub type Features = HashMap<NodeId, Vec<f32>>;

/// Reads a feature file.
///
/// The first line is a `<num_nodes> <dimension>` header and is skipped; every
/// other line is `<node_id> <value>...`.
pub fn load_features<P: AsRef<Path>>(path: P) -> Result<Features> {
    let path = path.as_ref();
    info!("loading features from {}", path.display());
    let reader = BufReader::new(File::open(path).map_err(|e| Error::io(path, e))?);
    let mut features = Features::new();
    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line.map_err(|e| Error::io(path, e))?;
        let mut fields = line.split_whitespace();
        let node = fields
            .next()
            .ok_or_else(|| Error::malformed(path, i + 1, "blank line"))?;
        let values = fields
            .map(|x| {
                x.parse::<f32>().map_err(|_| {
                    Error::malformed(path, i + 1, format!("`{}` is not a number", x))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        features.insert(node.to_string(), values);
    }
    Ok(features)
}
