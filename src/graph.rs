//! Typed edge lists and the per-layer undirected adjacency built from them.

use crate::types::{Edge, EdgeType, LayerId, NodeId};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    iter,
};

/// The undirected adjacency of one layer.
///
/// Symmetric: `v` is a neighbor of `u` iff `u` is a neighbor of `v`. Parallel
/// edges collapse into one membership; self-loops are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Adjacency {
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut neighbors: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for (u, v) in edges {
            neighbors.entry(u.clone()).or_default().insert(v.clone());
            neighbors.entry(v.clone()).or_default().insert(u.clone());
        }
        Self { neighbors }
    }

    pub fn neighbors(&self, node: &str) -> Option<&BTreeSet<NodeId>> {
        self.neighbors.get(node)
    }

    /// Nodes in ascending identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.neighbors.keys()
    }

    pub fn num_nodes(&self) -> usize {
        self.neighbors.len()
    }
}

/// Raw edge lists grouped by edge type, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    edge_types: Vec<EdgeType>,
    positions: HashMap<EdgeType, LayerId>,
    edges: Vec<Vec<Edge>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, edge_type: &str, u: NodeId, v: NodeId) {
        let layer = match self.positions.get(edge_type) {
            Some(&layer) => layer,
            None => {
                let layer = self.edge_types.len();
                self.edge_types.push(edge_type.to_string());
                self.positions.insert(edge_type.to_string(), layer);
                self.edges.push(Vec::new());
                layer
            }
        };
        self.edges[layer].push((u, v));
    }

    pub fn edge_types(&self) -> &[EdgeType] {
        &self.edge_types
    }

    pub fn layer(&self, edge_type: &str) -> Option<LayerId> {
        self.positions.get(edge_type).copied()
    }

    pub fn edges(&self, edge_type: &str) -> Option<&[Edge]> {
        self.layer(edge_type).map(|layer| self.edges[layer].as_slice())
    }

    /// Iterates `(edge_type, edges)` in declaration order.
    pub fn layers(&self) -> impl Iterator<Item = (&EdgeType, &[Edge])> {
        self.edge_types
            .iter()
            .zip(self.edges.iter().map(Vec::as_slice))
    }

    pub fn adjacency(&self, edge_type: &str) -> Option<Adjacency> {
        self.edges(edge_type).map(Adjacency::from_edges)
    }

    pub fn num_edges(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn num_nodes(&self) -> usize {
        self.edges
            .iter()
            .flatten()
            .flat_map(|(u, v)| iter::once(u).chain(iter::once(v)))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(u: &str, v: &str) -> Edge {
        (u.to_string(), v.to_string())
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let edges = vec![edge("1", "2"), edge("2", "3"), edge("4", "1")];
        let adj = Adjacency::from_edges(&edges);
        for (u, v) in &edges {
            assert!(adj.neighbors(u).unwrap().contains(v));
            assert!(adj.neighbors(v).unwrap().contains(u));
        }
        assert_eq!(adj.num_nodes(), 4);
        assert_eq!(
            adj.nodes().cloned().collect::<Vec<_>>(),
            vec!["1", "2", "3", "4"]
        );
    }

    #[test]
    fn test_adjacency_collapses_duplicates_and_keeps_self_loops() {
        let edges = vec![edge("a", "b"), edge("b", "a"), edge("a", "b"), edge("c", "c")];
        let adj = Adjacency::from_edges(&edges);
        assert_eq!(adj.neighbors("a").unwrap().len(), 1);
        assert_eq!(adj.neighbors("b").unwrap().len(), 1);
        assert_eq!(
            adj.neighbors("c").unwrap().iter().collect::<Vec<_>>(),
            vec!["c"]
        );
        assert!(adj.neighbors("d").is_none());
    }

    #[test]
    fn test_network_keeps_declaration_order() {
        let mut network = Network::new();
        network.add_edge("2", String::from("a"), String::from("b"));
        network.add_edge("1", String::from("b"), String::from("c"));
        network.add_edge("2", String::from("c"), String::from("a"));
        assert_eq!(network.edge_types(), ["2", "1"]);
        assert_eq!(network.layer("1"), Some(1));
        assert_eq!(network.edges("2").unwrap().len(), 2);
        assert_eq!(network.num_edges(), 3);
        assert_eq!(network.num_nodes(), 3);
        assert!(network.edges("3").is_none());
        let adj = network.adjacency("2").unwrap();
        assert!(adj.neighbors("a").unwrap().contains("c"));
    }
}
