use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use mnedata::{
    data::{load_features, load_testing_data, Features},
    evaluate::{evaluate_edge_types, EdgeTypeFilter},
    task::{Task, TEST_FILE},
    types::EdgeType,
};
use std::{collections::HashMap, error::Error, path::Path, str::FromStr};

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    match matches.value_of(name) {
        Some(value) => Ok(Some(value.parse()?)),
        None => Ok(None),
    }
}

fn handle_prepare(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("output").unwrap();
    let mut task = Task::new(input, output)
        .walk_length(matches.value_of("walk-length").unwrap().parse()?)
        .num_walks(matches.value_of("num-walks").unwrap().parse()?)
        .window_size(matches.value_of("window-size").unwrap().parse()?)
        .neighbor_samples(matches.value_of("neighbor-samples").unwrap().parse()?)
        .num_workers(matches.value_of("workers").unwrap().parse()?);
    if let Some(walk_file) = matches.value_of("walk-file") {
        task = task.walk_file(walk_file);
    }
    if let Some(schema) = parse_arg(matches, "schema")? {
        task = task.schema(schema);
    }
    if let Some(seed) = parse_arg::<u64>(matches, "seed")? {
        task = task.seed(seed);
    }
    let prepared = task.run()?;
    println!("num_nodes: {}", prepared.vocab.len());
    println!("num_walks: {}", prepared.corpus.num_walks());
    println!("num_pairs: {}", prepared.pairs.len());
    Ok(())
}

/// A single embedding file shared by every edge type, or a directory of
/// `<edge_type>.txt` files.
fn load_embeddings(
    path: &Path,
    edge_types: &[EdgeType],
) -> Result<HashMap<EdgeType, Features>, Box<dyn Error>> {
    let mut embeddings = HashMap::new();
    if path.is_dir() {
        for edge_type in edge_types {
            let file = path.join(format!("{}.txt", edge_type));
            if file.is_file() {
                embeddings.insert(edge_type.clone(), load_features(file)?);
            }
        }
    } else {
        let features = load_features(path)?;
        for edge_type in edge_types {
            embeddings.insert(edge_type.clone(), features.clone());
        }
    }
    Ok(embeddings)
}

fn handle_evaluate(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let test_file = match matches.value_of("test") {
        Some(path) => Path::new(path).to_path_buf(),
        None => Path::new(matches.value_of("INPUT").unwrap()).join(TEST_FILE),
    };
    let edges = load_testing_data(&test_file)?;
    let embeddings = load_embeddings(
        Path::new(matches.value_of("embeddings").unwrap()),
        edges.edge_types(),
    )?;
    let filter: EdgeTypeFilter = matches.value_of("eval-type").unwrap().parse()?;
    let report = evaluate_edge_types(|edge_type| embeddings.get(edge_type), &edges, &filter)?;
    for (edge_type, metrics) in &report.per_type {
        println!("{}: {}", edge_type, metrics);
    }
    println!("mean: {}", report.mean);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new("mnedata")
        .about("Training data and link prediction evaluation for multiplex network embedding")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("prepare")
                .about("Generates walks, vocabulary, training pairs and neighbor samples")
                .arg(Arg::with_name("INPUT").required(true))
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("walk-file").long("walk-file").takes_value(true))
                .arg(Arg::with_name("schema").long("schema").takes_value(true))
                .arg(
                    Arg::with_name("walk-length")
                        .long("walk-length")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("num-walks")
                        .long("num-walks")
                        .takes_value(true)
                        .default_value("20"),
                )
                .arg(
                    Arg::with_name("window-size")
                        .long("window-size")
                        .takes_value(true)
                        .default_value("5"),
                )
                .arg(
                    Arg::with_name("neighbor-samples")
                        .long("neighbor-samples")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("workers")
                        .long("workers")
                        .takes_value(true)
                        .default_value("16"),
                )
                .arg(Arg::with_name("seed").long("seed").takes_value(true)),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Scores held-out edges with trained embeddings")
                .arg(Arg::with_name("INPUT").required(true))
                .arg(
                    Arg::with_name("embeddings")
                        .long("embeddings")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("test").long("test").takes_value(true))
                .arg(
                    Arg::with_name("eval-type")
                        .long("eval-type")
                        .takes_value(true)
                        .default_value("all"),
                ),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("prepare") {
        handle_prepare(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("evaluate") {
        handle_evaluate(matches)?;
    }
    Ok(())
}
