use super::{expect_fields, for_each_record};
use crate::{
    error::{Error, Result},
    graph::Network,
    types::{Edge, EdgeType},
};
use log::info;
use std::{collections::HashMap, path::Path};

/// Reads `<edge_type> <node1> <node2>` lines.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Network> {
    let path = path.as_ref();
    info!("loading edges from {}", path.display());
    let mut network = Network::new();
    for_each_record(path, |line, fields| {
        expect_fields(path, line, fields, 3)?;
        network.add_edge(fields[0], fields[1].to_string(), fields[2].to_string());
        Ok(())
    })?;
    info!(
        "total training nodes: {} ({} edges, {} edge types)",
        network.num_nodes(),
        network.num_edges(),
        network.edge_types().len()
    );
    Ok(network)
}

/// Held-out edges split by label and edge type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledEdges {
    edge_types: Vec<EdgeType>,
    true_edges: HashMap<EdgeType, Vec<Edge>>,
    false_edges: HashMap<EdgeType, Vec<Edge>>,
}

impl LabeledEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, edge_type: &str, edge: Edge, label: bool) {
        if !self.true_edges.contains_key(edge_type) && !self.false_edges.contains_key(edge_type) {
            self.edge_types.push(edge_type.to_string());
        }
        let edges = if label {
            &mut self.true_edges
        } else {
            &mut self.false_edges
        };
        edges.entry(edge_type.to_string()).or_default().push(edge);
    }

    /// Edge types in first-appearance order.
    pub fn edge_types(&self) -> &[EdgeType] {
        &self.edge_types
    }

    pub fn true_edges(&self, edge_type: &str) -> &[Edge] {
        self.true_edges.get(edge_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn false_edges(&self, edge_type: &str) -> &[Edge] {
        self.false_edges.get(edge_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reads `<edge_type> <node1> <node2> <label>` lines, `label` being `0` or `1`.
pub fn load_testing_data<P: AsRef<Path>>(path: P) -> Result<LabeledEdges> {
    let path = path.as_ref();
    info!("loading labeled edges from {}", path.display());
    let mut edges = LabeledEdges::new();
    for_each_record(path, |line, fields| {
        expect_fields(path, line, fields, 4)?;
        let label = match fields[3] {
            "1" => true,
            "0" => false,
            other => {
                return Err(Error::malformed(
                    path,
                    line,
                    format!("label must be 0 or 1, found `{}`", other),
                ))
            }
        };
        edges.add_edge(
            fields[0],
            (fields[1].to_string(), fields[2].to_string()),
            label,
        );
        Ok(())
    })?;
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::write_file;

    #[test]
    fn test_load_training_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "train.txt", "r1 1 2\nr2 2 3\nr1 3 1\n");
        let network = load_training_data(&path).unwrap();
        assert_eq!(network.edge_types(), ["r1", "r2"]);
        assert_eq!(
            network.edges("r1").unwrap(),
            [
                (String::from("1"), String::from("2")),
                (String::from("3"), String::from("1"))
            ]
        );
        assert_eq!(network.num_nodes(), 3);
    }

    #[test]
    fn test_load_training_data_wrong_field_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "train.txt", "r1 1 2\nr1 2\n");
        let err = load_training_data(&path).unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_load_testing_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "test.txt", "r1 1 2 1\nr1 1 3 0\nr2 2 3 0\n");
        let edges = load_testing_data(&path).unwrap();
        assert_eq!(edges.edge_types(), ["r1", "r2"]);
        assert_eq!(edges.true_edges("r1").len(), 1);
        assert_eq!(edges.false_edges("r1").len(), 1);
        assert!(edges.true_edges("r2").is_empty());
        assert_eq!(edges.false_edges("r2").len(), 1);
    }

    #[test]
    fn test_load_testing_data_bad_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "test.txt", "r1 1 2 1\nr1 1 3 yes\n");
        let err = load_testing_data(&path).unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 2, .. }));
        assert!(err.to_string().contains("yes"));
    }
}
