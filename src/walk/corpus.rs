use super::{WalkParams, Walker};
use crate::{
    data::{for_each_record, NodeTypes},
    error::{Error, Result},
    graph::{Adjacency, Network},
    types::Walk,
};
use itertools::Itertools;
use log::{debug, info};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Walks grouped by layer, in edge-type declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkCorpus {
    layers: Vec<Vec<Walk>>,
}

/// Where [`WalkCorpus::acquire`] takes its walks from.
#[derive(Debug, Clone, Copy)]
pub enum CorpusSource<'a> {
    /// Read a previously saved corpus verbatim.
    Load(&'a Path),
    /// Run the walker on every layer and save the result.
    Generate { save_to: &'a Path },
}

impl WalkCorpus {
    pub fn new(layers: Vec<Vec<Walk>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Vec<Walk>] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn num_walks(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn acquire<W: Walker>(
        source: CorpusSource,
        walker: &W,
        network: &Network,
        node_types: Option<&NodeTypes>,
        params: &WalkParams,
    ) -> Result<Self> {
        match source {
            CorpusSource::Load(path) => Self::load(path),
            CorpusSource::Generate { save_to } => {
                let corpus = Self::generate(walker, network, node_types, params)?;
                corpus.save(save_to)?;
                Ok(corpus)
            }
        }
    }

    /// Runs `walker` on every layer of `network`.
    ///
    /// Fails before the first walk if the parameters cannot be honored.
    pub fn generate<W: Walker>(
        walker: &W,
        network: &Network,
        node_types: Option<&NodeTypes>,
        params: &WalkParams,
    ) -> Result<Self> {
        params.validate(node_types)?;
        let mut layers = Vec::with_capacity(network.edge_types().len());
        for (layer, (edge_type, edges)) in network.layers().enumerate() {
            info!("generating random walks for layer {} ({})", layer, edge_type);
            let graph = Adjacency::from_edges(edges);
            let mut walks = walker.simulate_walks(&graph, node_types, params)?;
            let num_walks = walks.len();
            walks.retain(|walk| !walk.is_empty());
            if walks.len() < num_walks {
                debug!("dropped {} empty walks", num_walks - walks.len());
            }
            layers.push(walks);
        }
        info!("finish generating the walks");
        Ok(Self { layers })
    }

    /// Reads `<layer> <node> <node> ...` lines.
    ///
    /// Layers must not decrease from one line to the next; skipped layer
    /// indices become empty layers.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("loading walks from {}", path.display());
        let mut layers: Vec<Vec<Walk>> = Vec::new();
        for_each_record(path, |line, fields| {
            let layer: usize = fields[0].parse().map_err(|_| {
                Error::malformed(
                    path,
                    line,
                    format!("`{}` is not a layer index", fields[0]),
                )
            })?;
            if fields.len() < 2 {
                return Err(Error::malformed(path, line, "walk has no nodes"));
            }
            if layer + 1 < layers.len() {
                return Err(Error::LayerOutOfOrder {
                    path: path.display().to_string(),
                    line,
                    layer,
                    previous: layers.len() - 1,
                });
            }
            if layer >= layers.len() {
                layers.resize_with(layer + 1, Vec::new);
            }
            layers[layer].push(fields[1..].iter().map(|x| x.to_string()).collect());
            Ok(())
        })?;
        Ok(Self { layers })
    }

    /// Writes one `<layer> <node> <node> ...` line per walk, layer by layer.
    ///
    /// An empty last layer has no line to carry it, so it is refused.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(walks) = self.layers.last() {
            if walks.is_empty() {
                return Err(Error::EmptyLastLayer {
                    path: path.display().to_string(),
                    layer: self.layers.len() - 1,
                });
            }
        }
        let mut writer = BufWriter::new(File::create(path).map_err(|e| Error::io(path, e))?);
        for (layer, walks) in self.layers.iter().enumerate() {
            info!("saving walks for layer {}", layer);
            for walk in walks {
                writeln!(writer, "{} {}", layer, walk.iter().join(" "))
                    .map_err(|e| Error::io(path, e))?;
            }
        }
        writer.flush().map_err(|e| Error::io(path, e))
    }
}
