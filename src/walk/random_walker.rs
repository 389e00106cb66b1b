use super::{WalkParams, Walker};
use crate::{
    data::NodeTypes,
    error::{Error, Result},
    graph::Adjacency,
    types::{NodeId, Walk},
};
use log::debug;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use rayon::prelude::*;
use std::iter;

/// Uniform random walker running on a pool of `num_workers` threads.
///
/// Every walk draws from its own generator seeded from the base seed and the
/// walk's position, so a seeded walker returns the same walks in the same
/// order whatever the number of workers.
#[derive(Debug, Clone)]
pub struct RandomWalker {
    num_workers: usize,
    seed: Option<u64>,
}

impl RandomWalker {
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers,
            seed: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A walk to run: its source node and, under a schema, its metapath.
type WorkItem<'a> = (&'a NodeId, Option<&'a [String]>);

impl Walker for RandomWalker {
    fn simulate_walks(
        &self,
        graph: &Adjacency,
        node_types: Option<&NodeTypes>,
        params: &WalkParams,
    ) -> Result<Vec<Walk>> {
        params.validate(node_types)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_workers)
            .build()
            .map_err(|e| Error::InvalidParameter {
                name: "num_workers",
                reason: e.to_string(),
            })?;
        let base_seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let mut nodes: Vec<&NodeId> = graph.nodes().collect();
        nodes.shuffle(&mut XorShiftRng::seed_from_u64(base_seed));
        let mut items: Vec<WorkItem> = Vec::new();
        match (&params.schema, node_types) {
            (Some(schema), Some(node_types)) => {
                for metapath in schema.metapaths() {
                    for &node in &nodes {
                        if node_types.get(node) == metapath.first() {
                            items.extend(
                                iter::repeat((node, Some(metapath.as_slice())))
                                    .take(params.num_walks),
                            );
                        }
                    }
                }
            }
            _ => {
                for &node in &nodes {
                    items.extend(iter::repeat((node, None)).take(params.num_walks));
                }
            }
        }
        debug!(
            "{} walks over {} nodes on {} workers",
            items.len(),
            nodes.len(),
            self.num_workers
        );
        Ok(pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .map(|(i, &(start, metapath))| {
                    let mut rng =
                        XorShiftRng::seed_from_u64(base_seed.wrapping_add(i as u64 + 1));
                    walk(graph, node_types, start, metapath, params.walk_length, &mut rng)
                })
                .collect()
        }))
    }
}

/// Walks from `start` until `walk_length` nodes are visited or no neighbor qualifies.
///
/// Under a metapath of `m + 1` types, the `k`-th node of the walk must have
/// type `metapath[k % m]`.
fn walk<R: Rng>(
    graph: &Adjacency,
    node_types: Option<&NodeTypes>,
    start: &NodeId,
    metapath: Option<&[String]>,
    walk_length: usize,
    rng: &mut R,
) -> Walk {
    let mut walk = Vec::with_capacity(walk_length);
    walk.push(start.clone());
    while walk.len() < walk_length {
        let candidates: Vec<&NodeId> = match graph.neighbors(&walk[walk.len() - 1]) {
            Some(neighbors) => neighbors
                .iter()
                .filter(|&node| match (metapath, node_types) {
                    (Some(metapath), Some(node_types)) => {
                        node_types.get(node)
                            == Some(&metapath[walk.len() % (metapath.len() - 1)])
                    }
                    _ => true,
                })
                .collect(),
            None => break,
        };
        match candidates.choose(rng) {
            Some(&next) => walk.push(next.clone()),
            None => break,
        }
    }
    walk
}
