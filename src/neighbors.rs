//! Fixed-size neighbor samples per node and edge type.

use crate::{
    error::{Error, Result},
    graph::Network,
    types::{EdgeType, NodeIndex},
    vocab::Vocabulary,
};
use itertools::Itertools;
use log::info;
use rand::Rng;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// `table[node][edge_type]` holds exactly `neighbor_samples` neighbor indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    neighbor_samples: usize,
    table: Vec<Vec<Vec<NodeIndex>>>,
}

impl NeighborTable {
    /// Samples neighbors of every vocabulary node from the raw edges of each
    /// type in `edge_types`.
    ///
    /// Neighbors come from the observed edges, not from the walks: a duplicated
    /// edge contributes once per occurrence before resampling.
    pub fn build<R: Rng>(
        network: &Network,
        vocab: &Vocabulary,
        edge_types: &[EdgeType],
        neighbor_samples: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if neighbor_samples == 0 {
            return Err(Error::InvalidParameter {
                name: "neighbor_samples",
                reason: String::from("must be positive"),
            });
        }
        let num_nodes = vocab.len();
        let mut table = vec![vec![Vec::new(); edge_types.len()]; num_nodes];
        for (r, edge_type) in edge_types.iter().enumerate() {
            info!("generating neighbors for layer {} ({})", r, edge_type);
            let edges = network
                .edges(edge_type)
                .ok_or_else(|| Error::UnknownEdgeType {
                    edge_type: edge_type.clone(),
                })?;
            for (x, y) in edges {
                let ix = vocab.require(x, "neighbors")?;
                let iy = vocab.require(y, "neighbors")?;
                table[ix][r].push(iy);
                table[iy][r].push(ix);
            }
            for (i, row) in table.iter_mut().enumerate() {
                let observed = std::mem::take(&mut row[r]);
                row[r] = reconcile(observed, i, neighbor_samples, rng);
            }
        }
        Ok(Self {
            neighbor_samples,
            table,
        })
    }

    pub fn neighbor_samples(&self) -> usize {
        self.neighbor_samples
    }

    pub fn num_nodes(&self) -> usize {
        self.table.len()
    }

    pub fn neighbors(&self, node: NodeIndex, edge_type: usize) -> &[NodeIndex] {
        &self.table[node][edge_type]
    }

    pub fn rows(&self) -> &[Vec<Vec<NodeIndex>>] {
        &self.table
    }

    /// Writes `<node> <edge_type> <neighbor>...` lines, node-major.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path).map_err(|e| Error::io(path, e))?);
        for (i, row) in self.table.iter().enumerate() {
            for (r, neighbors) in row.iter().enumerate() {
                writeln!(writer, "{} {} {}", i, r, neighbors.iter().join(" "))
                    .map_err(|e| Error::io(path, e))?;
            }
        }
        writer.flush().map_err(|e| Error::io(path, e))
    }
}

/// Brings `observed` to exactly `k` entries.
///
/// Empty lists become `k` copies of `own`; shorter lists keep every entry and
/// are topped up with draws from themselves; longer lists are replaced by `k`
/// draws. All draws are uniform with replacement.
fn reconcile<R: Rng>(
    mut observed: Vec<NodeIndex>,
    own: NodeIndex,
    k: usize,
    rng: &mut R,
) -> Vec<NodeIndex> {
    let len = observed.len();
    if len == 0 {
        vec![own; k]
    } else if len < k {
        for _ in len..k {
            let x = observed[rng.gen_range(0..len)];
            observed.push(x);
        }
        observed
    } else if len > k {
        (0..k).map(|_| observed[rng.gen_range(0..len)]).collect()
    } else {
        observed
    }
}
