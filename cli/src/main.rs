mod output;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use lsi_core::{Corpus, InvertedIndex, LsiModel, QueryOrchestrator, SearchConfig, StopList, SvdFactorizer};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lsi")]
#[command(about = "Latent semantic indexing search over a directory of text files", long_about = None)]
struct Cli {
    /// Directory whose files form the corpus
    corpus: PathBuf,
    /// Stop-word list, one word per line
    stoplist: PathBuf,
    /// Number of singular values to keep (full rank when omitted)
    k: Option<usize>,
    /// Documents to list per query
    #[arg(long, default_value_t = lsi_core::model::DEFAULT_TOP_N)]
    top: usize,
    /// Words of context shown under each result
    #[arg(long, default_value_t = lsi_core::corpus::DEFAULT_CONTEXT_WORDS)]
    context_words: usize,
    /// Print one JSON object per query
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let stop = StopList::from_file(&cli.stoplist).context("loading stop list")?;
    let corpus = Corpus::load(&cli.corpus).context("loading corpus")?;
    let index = InvertedIndex::build(corpus.pairs(), &stop).context("indexing corpus")?;
    let model = LsiModel::build(index, cli.k, &SvdFactorizer::default()).context("building LSI model")?;

    tracing::info!(k = ?cli.k, rank = model.rank(), top = cli.top, "ready for queries");

    let config = SearchConfig { top_n: cli.top, context_words: cli.context_words };
    let orchestrator = QueryOrchestrator::new(&model, &corpus, config);
    let format = if cli.json { output::Format::Json } else { output::Format::Text };
    session::run(&orchestrator, format, io::stdin().lock(), io::stdout().lock())
}
