use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::path::PathBuf;
use tan_bayes::{report, BayesNet, Dataset, Mode, ReportOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Naive and tree-augmented naive Bayes classifier", long_about = None)]
struct Args {
    /// Training set (CSV, last column is the class)
    train: PathBuf,

    /// Test set with the same header as the training set
    test: PathBuf,

    /// n for naive Bayes, t for tree-augmented naive Bayes
    mode: Mode,

    /// Train on a random subset of this many instances
    #[arg(long)]
    train_size: Option<usize>,

    /// Seed for picking the training subset
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the mutual information table, spanning tree and CPTs
    #[arg(long)]
    debug: bool,

    /// Digits printed for posterior probabilities
    #[arg(long, default_value_t = 16)]
    precision: usize,

    /// Digits printed in the diagnostic tables
    #[arg(long, default_value_t = 6)]
    table_precision: usize,

    /// Separator between prediction columns
    #[arg(long, default_value_t = ' ')]
    delimiter: char,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let dataset = Dataset::load(&args.train, &args.test)?;
    info!(
        "loaded {} training and {} test instances",
        dataset.train.len(),
        dataset.test.len()
    );

    let mut train_set = dataset.train.clone();
    if let Some(size) = args.train_size.filter(|&n| n > 0 && n < train_set.len()) {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        train_set.shuffle(&mut rng);
        train_set.truncate(size);
        info!("training on a random subset of {} instances", size);
    }

    let net = BayesNet::new(&dataset.metadata, &train_set, args.mode)?;
    drop(train_set);

    let options = ReportOptions {
        precision: args.table_precision,
    };
    if args.debug {
        println!("{}", report::mutual_info_table(net.mutual_info(), &options));
        println!("{}", report::spanning_tree(net.spanning_tree()));
        println!("{}", report::probability_tables(net.tables(), &options));
    }
    println!("{}", report::structure(net.structure(), &dataset.metadata));

    let d = args.delimiter;
    println!("<Predictions for Test-set Instances>");
    println!("Predicted class{d}Actual class{d}Posterior probability");

    let mut correct = 0;
    for instance in &dataset.test {
        let prediction = net.predict(instance)?;
        let actual = dataset.class_value(instance);
        if prediction.label == actual {
            correct += 1;
        }
        println!(
            "{}{d}{}{d}{:.*}",
            prediction.label, actual, args.precision, prediction.probability
        );
    }
    println!(
        "{} out of {} test instances were correctly classified",
        correct,
        dataset.test.len()
    );

    Ok(())
}
