//! Frequency-ranked node vocabulary.

use crate::{
    error::{Error, Result},
    types::{NodeId, NodeIndex},
    walk::WalkCorpus,
};
use itertools::Itertools;
use log::info;
use std::{collections::HashMap, path::Path};

/// Occurrence count and dense index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabEntry {
    pub count: usize,
    pub index: NodeIndex,
}

/// Dense node indices ordered by descending occurrence count.
///
/// Nodes with equal counts are ordered by ascending identifier, so the same
/// corpus always yields the same indices. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: HashMap<NodeId, VocabEntry>,
    index2node: Vec<NodeId>,
}

impl Vocabulary {
    pub fn build(corpus: &WalkCorpus) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (layer, walks) in corpus.layers().iter().enumerate() {
            info!("counting vocab for layer {}", layer);
            for node in walks.iter().flatten() {
                *counts.entry(node.as_str()).or_insert(0) += 1;
            }
        }
        let index2node: Vec<NodeId> = counts
            .iter()
            .sorted_by(|(node1, count1), (node2, count2)| {
                count2.cmp(count1).then_with(|| node1.cmp(node2))
            })
            .map(|(node, _)| node.to_string())
            .collect();
        let entries = index2node
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let count = counts[node.as_str()];
                (node.clone(), VocabEntry { count, index })
            })
            .collect();
        info!("vocabulary size: {}", index2node.len());
        Self {
            entries,
            index2node,
        }
    }

    pub fn get(&self, node: &str) -> Option<&VocabEntry> {
        self.entries.get(node)
    }

    pub fn index(&self, node: &str) -> Option<NodeIndex> {
        self.entries.get(node).map(|entry| entry.index)
    }

    /// Like [`index`](Self::index), failing with the stage that asked.
    pub(crate) fn require(&self, node: &str, stage: &'static str) -> Result<NodeIndex> {
        self.index(node).ok_or_else(|| Error::UnknownNode {
            node: node.to_string(),
            stage,
        })
    }

    pub fn node(&self, index: NodeIndex) -> Option<&NodeId> {
        self.index2node.get(index)
    }

    pub fn index2node(&self) -> &[NodeId] {
        &self.index2node
    }

    pub fn len(&self) -> usize {
        self.index2node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index2node.is_empty()
    }

    /// Writes `<index> <node> <count>` lines in index order.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content: String = self
            .index2node
            .iter()
            .enumerate()
            .map(|(index, node)| format!("{} {} {}\n", index, node, self.entries[node].count))
            .collect();
        std::fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Walk;

    fn corpus(layers: &[&[&[&str]]]) -> WalkCorpus {
        WalkCorpus::new(
            layers
                .iter()
                .map(|walks| {
                    walks
                        .iter()
                        .map(|walk| walk.iter().map(|x| x.to_string()).collect::<Walk>())
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_indices_follow_descending_count() {
        let vocab = Vocabulary::build(&corpus(&[&[&["a", "b", "a"], &["b", "c"]]]));
        assert_eq!(vocab.get("a"), Some(&VocabEntry { count: 2, index: 0 }));
        assert_eq!(vocab.get("b"), Some(&VocabEntry { count: 2, index: 1 }));
        assert_eq!(vocab.get("c"), Some(&VocabEntry { count: 1, index: 2 }));
        assert_eq!(vocab.index2node(), ["a", "b", "c"]);
        assert_eq!(vocab.node(2).map(String::as_str), Some("c"));
        assert_eq!(vocab.index("d"), None);
    }

    #[test]
    fn test_indices_are_dense_and_shared_across_layers() {
        let vocab = Vocabulary::build(&corpus(&[
            &[&["x", "y", "z"], &["z", "w"]],
            &[&["w", "z", "v"]],
        ]));
        let mut indices: Vec<_> = vocab
            .index2node()
            .iter()
            .map(|node| vocab.index(node).unwrap())
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..5).collect::<Vec<_>>());
        assert_eq!(vocab.index("z"), Some(0));
        assert_eq!(vocab.index("w"), Some(1));
        assert_eq!(vocab.get("w").unwrap().count, 2);
        for pair in vocab.index2node().windows(2) {
            assert!(vocab.get(&pair[0]).unwrap().count >= vocab.get(&pair[1]).unwrap().count);
        }
    }

    #[test]
    fn test_tie_break_ignores_traversal_order() {
        let vocab1 = Vocabulary::build(&corpus(&[&[&["q", "p", "r"]], &[&["s"]]]));
        let vocab2 = Vocabulary::build(&corpus(&[&[&["s"]], &[&["r", "q", "p"]]]));
        assert_eq!(vocab1.index2node(), ["p", "q", "r", "s"]);
        assert_eq!(vocab1, vocab2);
    }

    #[test]
    fn test_require_names_the_stage() {
        let vocab = Vocabulary::build(&corpus(&[&[&["a"]]]));
        assert_eq!(vocab.require("a", "pairs").unwrap(), 0);
        let err = vocab.require("b", "neighbors").unwrap_err();
        assert_eq!(err.to_string(), "neighbors: node `b` is not in the vocabulary");
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        Vocabulary::build(&corpus(&[&[&["a", "b", "b"]]]))
            .save(&path)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 b 2\n1 a 1\n");
    }
}
