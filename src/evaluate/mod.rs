//! Link prediction scoring of node embeddings.

pub mod metrics;

use crate::{
    data::LabeledEdges,
    error::{Error, Result},
    types::{Edge, EdgeType, NodeId},
};
use derive_more::Display;
use itertools::Itertools;
use log::{debug, warn};
use std::{collections::HashMap, str::FromStr};

/// Read-only map from node identifier to embedding vector.
pub trait EmbeddingLookup {
    fn vector(&self, node: &str) -> Option<&[f32]>;
}

impl EmbeddingLookup for HashMap<NodeId, Vec<f32>> {
    fn vector(&self, node: &str) -> Option<&[f32]> {
        self.get(node).map(Vec::as_slice)
    }
}

/// Cosine similarity of the embeddings of `node1` and `node2`.
///
/// `None` when either node has no embedding, the dimensions differ, or a
/// vector has zero norm.
pub fn score<L: EmbeddingLookup + ?Sized>(lookup: &L, node1: &str, node2: &str) -> Option<f64> {
    let (v1, v2) = (lookup.vector(node1)?, lookup.vector(node2)?);
    if v1.len() != v2.len() {
        return None;
    }
    let (mut dot, mut norm1, mut norm2) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in v1.iter().zip(v2) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm1 += x * x;
        norm2 += y * y;
    }
    let similarity = dot / (norm1.sqrt() * norm2.sqrt());
    if similarity.is_finite() {
        Some(similarity)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display(fmt = "roc_auc: {:.4} f1: {:.4} pr_auc: {:.4}", roc_auc, f1, pr_auc)]
pub struct LinkMetrics {
    pub roc_auc: f64,
    pub f1: f64,
    pub pr_auc: f64,
    /// Scored true edges.
    pub num_true: usize,
    /// Scored false edges.
    pub num_false: usize,
}

/// Scores held-out edges and classifies them with a rank-matched threshold.
///
/// The threshold is the `k`-th largest score, `k` being the number of scored
/// true edges; scores at or above it are predicted positive. Unscoreable edges
/// are left out.
pub fn evaluate<L: EmbeddingLookup + ?Sized>(
    lookup: &L,
    true_edges: &[Edge],
    false_edges: &[Edge],
) -> Result<LinkMetrics> {
    let mut y_true = Vec::with_capacity(true_edges.len() + false_edges.len());
    let mut y_score = Vec::with_capacity(true_edges.len() + false_edges.len());
    for (edges, label) in [(true_edges, true), (false_edges, false)].iter() {
        for (node1, node2) in edges.iter() {
            if let Some(s) = score(lookup, node1, node2) {
                y_true.push(*label);
                y_score.push(s);
            }
        }
    }
    let total = y_score.len();
    let true_num = y_true.iter().filter(|&&label| label).count();
    let skipped = true_edges.len() + false_edges.len() - total;
    if skipped > 0 {
        warn!("{} edges without embeddings were skipped", skipped);
    }
    if true_num == 0 {
        return Err(Error::NoTrueEdges);
    }
    if true_num > total {
        return Err(Error::TooManyTrueEdges { true_num, total });
    }
    if true_num == total {
        return Err(Error::NoFalseEdges);
    }

    let mut sorted = y_score.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let threshold = sorted[total - true_num];
    let y_pred: Vec<bool> = y_score.iter().map(|&s| s >= threshold).collect();
    debug!("threshold {} over {} scored edges", threshold, total);

    let curve = metrics::precision_recall_curve(&y_true, &y_score);
    Ok(LinkMetrics {
        roc_auc: metrics::roc_auc_score(&y_true, &y_score),
        f1: metrics::f1_score(&y_true, &y_pred),
        pr_auc: metrics::auc(&curve.recall, &curve.precision),
        num_true: true_num,
        num_false: total - true_num,
    })
}

/// Which edge types of a held-out set to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeTypeFilter {
    All,
    Only(Vec<EdgeType>),
}

impl Default for EdgeTypeFilter {
    fn default() -> Self {
        EdgeTypeFilter::All
    }
}

impl FromStr for EdgeTypeFilter {
    type Err = Error;

    /// `all`, or a comma-separated list of edge types.
    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(EdgeTypeFilter::All);
        }
        let edge_types: Vec<EdgeType> = s
            .split(',')
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(String::from)
            .collect();
        if edge_types.is_empty() {
            Err(Error::InvalidParameter {
                name: "eval_type",
                reason: format!("`{}` names no edge type", s),
            })
        } else {
            Ok(EdgeTypeFilter::Only(edge_types))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Metrics per evaluated edge type, in evaluation order.
    pub per_type: Vec<(EdgeType, LinkMetrics)>,
    /// Unweighted mean over edge types; counts are summed.
    pub mean: LinkMetrics,
}

/// Evaluates every selected edge type of `edges` against the embeddings that
/// `lookup_for` returns for it.
pub fn evaluate_edge_types<'a, L, F>(
    lookup_for: F,
    edges: &LabeledEdges,
    filter: &EdgeTypeFilter,
) -> Result<EvaluationReport>
where
    L: EmbeddingLookup + ?Sized + 'a,
    F: Fn(&str) -> Option<&'a L>,
{
    let selected: Vec<EdgeType> = match filter {
        EdgeTypeFilter::All => edges.edge_types().to_vec(),
        EdgeTypeFilter::Only(edge_types) => edge_types.clone(),
    };
    if selected.is_empty() {
        return Err(Error::InvalidParameter {
            name: "eval_type",
            reason: String::from("no edge type to evaluate"),
        });
    }
    let mut per_type = Vec::with_capacity(selected.len());
    for edge_type in selected {
        if !edges.edge_types().contains(&edge_type) {
            return Err(Error::UnknownEdgeType { edge_type });
        }
        let lookup = lookup_for(&edge_type).ok_or_else(|| Error::MissingEmbeddings {
            edge_type: edge_type.clone(),
        })?;
        let metrics = evaluate(
            lookup,
            edges.true_edges(&edge_type),
            edges.false_edges(&edge_type),
        )?;
        debug!("edge type {}: {}", edge_type, metrics);
        per_type.push((edge_type, metrics));
    }
    let n = per_type.len() as f64;
    let mean = LinkMetrics {
        roc_auc: per_type.iter().map(|(_, m)| m.roc_auc).sum::<f64>() / n,
        f1: per_type.iter().map(|(_, m)| m.f1).sum::<f64>() / n,
        pr_auc: per_type.iter().map(|(_, m)| m.pr_auc).sum::<f64>() / n,
        num_true: per_type.iter().map(|(_, m)| m.num_true).sum(),
        num_false: per_type.iter().map(|(_, m)| m.num_false).sum(),
    };
    debug!(
        "evaluated edge types: {}",
        per_type.iter().map(|(edge_type, _)| edge_type).join(", ")
    );
    Ok(EvaluationReport { per_type, mean })
}
