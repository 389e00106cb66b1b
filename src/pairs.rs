//! Skip-gram training pairs.

use crate::{
    error::{Error, Result},
    types::{LayerId, TrainingPair, Walk},
    vocab::Vocabulary,
    walk::WalkCorpus,
};
use log::info;
use rayon::prelude::*;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Emits `(center, context, layer)` for every context within `window_size / 2`
/// positions of a center, on either side, inside one walk.
///
/// The output is the same as a sequential scan of layers, walks and positions.
pub fn generate_pairs(
    corpus: &WalkCorpus,
    vocab: &Vocabulary,
    window_size: usize,
) -> Result<Vec<TrainingPair>> {
    let half = window_size / 2;
    let mut pairs = Vec::new();
    for (layer, walks) in corpus.layers().iter().enumerate() {
        info!("generating training pairs for layer {}", layer);
        let layer_pairs = walks
            .par_iter()
            .map(|walk| walk_pairs(walk, vocab, half, layer))
            .collect::<Result<Vec<_>>>()?;
        pairs.extend(layer_pairs.into_iter().flatten());
    }
    info!("{} training pairs", pairs.len());
    Ok(pairs)
}

fn walk_pairs(
    walk: &Walk,
    vocab: &Vocabulary,
    half: usize,
    layer: LayerId,
) -> Result<Vec<TrainingPair>> {
    let indices = walk
        .iter()
        .map(|node| vocab.require(node, "pairs"))
        .collect::<Result<Vec<_>>>()?;
    let half = half.min(indices.len().saturating_sub(1));
    let mut pairs = Vec::with_capacity(2 * half * indices.len());
    for (i, &center) in indices.iter().enumerate() {
        for j in 1..=half {
            if j <= i {
                pairs.push(TrainingPair::new(center, indices[i - j], layer));
            }
            if i + j < indices.len() {
                pairs.push(TrainingPair::new(center, indices[i + j], layer));
            }
        }
    }
    Ok(pairs)
}

/// Writes `<center> <context> <layer>` lines.
pub fn save_pairs<P: AsRef<Path>>(pairs: &[TrainingPair], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path).map_err(|e| Error::io(path, e))?);
    for pair in pairs {
        writeln!(writer, "{} {} {}", pair.center, pair.context, pair.layer)
            .map_err(|e| Error::io(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))
}
