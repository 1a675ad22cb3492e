/// Gibberish: Markov chain word generator.
///
/// Usage: gibberish [-n <int>] [-k <int>] [-m <int>] [-s <int>] [-d] [-c <file.ron>] FILE...
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use gibberish::output::format_line;
use gibberish::{GenerationConfig, MarkovTrainer, WordGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "gibberish")]
#[command(about = "Markov chain word generator")]
#[command(version)]
struct Cli {
    /// Training file(s)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Number of words to generate [default: 10]
    #[arg(short = 'n', long, value_name = "int")]
    num_words: Option<usize>,

    /// Kmer size [default: 2]
    #[arg(short = 'k', long, value_name = "int")]
    kmer_size: Option<usize>,

    /// Max word length [default: 12]
    #[arg(short = 'm', long, value_name = "int")]
    max_word: Option<usize>,

    /// Random seed
    #[arg(short = 's', long, value_name = "int")]
    seed: Option<u64>,

    /// Debug to ".log"
    #[arg(short = 'd', long)]
    debug: bool,

    /// Settings file (RON); explicit flags take precedence
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layer explicit flags over the config file (or the defaults).
    fn resolve_config(&self) -> GenerationConfig {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load_from_ron(path).unwrap_or_else(|e| {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }),
            None => GenerationConfig::default(),
        };

        if let Some(n) = self.num_words {
            config.num_words = n;
        }
        if let Some(k) = self.kmer_size {
            config.kmer_size = k;
        }
        if let Some(m) = self.max_word {
            config.max_word = m;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn init_logging(debug: bool) {
    if !debug {
        env_logger::init();
        return;
    }

    let log_file = File::create(".log").unwrap_or_else(|e| {
        eprintln!("Error creating '.log': {}", e);
        process::exit(1);
    });
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = cli.resolve_config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let mut texts = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading training file '{}': {}", path.display(), e);
            process::exit(1);
        });
        texts.push(text);
    }

    let table = MarkovTrainer::train(&texts, config.kmer_size).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let generator = WordGenerator::new(&table, config.max_word).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for i in 0..config.num_words {
        let word = generator.generate_word(&mut rng).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
        println!("{}", format_line(i + 1, &word));
    }
}
