//! End-to-end preparation of training data from an input directory.

use crate::{
    data::{load_node_types, load_training_data, NodeTypes},
    error::{Error, Result},
    neighbors::NeighborTable,
    pairs::{generate_pairs, save_pairs},
    types::TrainingPair,
    vocab::Vocabulary,
    walk::{CorpusSource, RandomWalker, Schema, WalkCorpus, WalkParams},
};
use log::info;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::{
    path::PathBuf,
    time::Instant,
};

pub const TRAIN_FILE: &str = "train.txt";
pub const TEST_FILE: &str = "test.txt";
pub const NODE_TYPE_FILE: &str = "node_type.txt";
pub const WALK_FILE: &str = "walks.txt";

/// Everything derived from one input directory.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub corpus: WalkCorpus,
    pub vocab: Vocabulary,
    pub pairs: Vec<TrainingPair>,
    pub neighbors: NeighborTable,
}

/// Reads `<input>/train.txt`, produces walks, vocabulary, training pairs and
/// neighbor samples, and writes them under the output directory.
///
/// ```no_run
/// use mnedata::task::Task;
///
/// let prepared = Task::new("data/amazon", "out")
///     .walk_length(10)
///     .num_walks(20)
///     .seed(1)
///     .run()
///     .unwrap();
/// println!("{} pairs", prepared.pairs.len());
/// ```
#[derive(Debug, Clone)]
pub struct Task {
    input: PathBuf,
    output: PathBuf,
    walk_file: Option<PathBuf>,
    walk_length: usize,
    num_walks: usize,
    window_size: usize,
    neighbor_samples: usize,
    num_workers: usize,
    schema: Option<Schema>,
    seed: Option<u64>,
}

impl Task {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output: Q) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            walk_file: None,
            walk_length: 10,
            num_walks: 20,
            window_size: 5,
            neighbor_samples: 10,
            num_workers: 16,
            schema: None,
            seed: None,
        }
    }

    /// Load walks from `path` instead of generating them.
    pub fn walk_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.walk_file = Some(path.into());
        self
    }

    pub fn walk_length(mut self, walk_length: usize) -> Self {
        self.walk_length = walk_length;
        self
    }

    pub fn num_walks(mut self, num_walks: usize) -> Self {
        self.num_walks = num_walks;
        self
    }

    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn neighbor_samples(mut self, neighbor_samples: usize) -> Self {
        self.neighbor_samples = neighbor_samples;
        self
    }

    pub fn num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Fixes every random choice of the run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn run(&self) -> Result<Prepared> {
        let start_time = Instant::now();
        let network = load_training_data(self.input.join(TRAIN_FILE))?;
        // walks read from a file need no node types
        let node_types = match self.walk_file {
            Some(_) => None,
            None => self.node_types()?,
        };
        let params = WalkParams::new(self.num_walks, self.walk_length, self.schema.clone());
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());

        let time_now = Instant::now();
        let walker = RandomWalker::new(self.num_workers).seed(seed);
        let default_walk_file = self.input.join(WALK_FILE);
        let source = match &self.walk_file {
            Some(path) => CorpusSource::Load(path),
            None => CorpusSource::Generate {
                save_to: &default_walk_file,
            },
        };
        let corpus =
            WalkCorpus::acquire(source, &walker, &network, node_types.as_ref(), &params)?;
        info!("walk_time: {}", time_now.elapsed().as_millis());

        let time_now = Instant::now();
        let vocab = Vocabulary::build(&corpus);
        let pairs = generate_pairs(&corpus, &vocab, self.window_size)?;
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let neighbors = NeighborTable::build(
            &network,
            &vocab,
            network.edge_types(),
            self.neighbor_samples,
            &mut rng,
        )?;
        info!("prepare_time: {}", time_now.elapsed().as_millis());

        std::fs::create_dir_all(&self.output).map_err(|e| Error::io(&self.output, e))?;
        vocab.save(self.output.join("vocab.txt"))?;
        save_pairs(&pairs, self.output.join("pairs.txt"))?;
        neighbors.save(self.output.join("neighbors.txt"))?;
        info!("total_time: {}", start_time.elapsed().as_millis());
        Ok(Prepared {
            corpus,
            vocab,
            pairs,
            neighbors,
        })
    }

    /// The node type table is read only when a schema asks for it.
    fn node_types(&self) -> Result<Option<NodeTypes>> {
        let schema = match &self.schema {
            Some(schema) => schema,
            None => return Ok(None),
        };
        let path = self.input.join(NODE_TYPE_FILE);
        if !path.is_file() {
            return Err(Error::MissingNodeTypes {
                schema: schema.to_string(),
            });
        }
        load_node_types(path).map(Some)
    }
}
