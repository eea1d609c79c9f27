use isbn_normalize::{reader::Reader, record::Report, server, NormalizationPipeline, Result};
use std::{path::PathBuf, process};
use stopwatch::Stopwatch;
use structopt::StructOpt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, StructOpt)]
#[structopt(about = "Recover valid ISBNs from noisy OCR text")]
enum Opt {
    /// Normalize each argument and print one JSON report per line
    Check {
        #[structopt(required = true)]
        text: Vec<String>,

        /// Print run statistics after the reports
        #[structopt(long)]
        stats: bool,
    },

    /// Normalize every non-blank line of a file (`-` for stdin)
    Batch {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },

    /// Serve the pipeline over HTTP
    Serve {
        #[structopt(long, env = "ISBN_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Opt::from_args()) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    let pipeline = NormalizationPipeline::new();

    match opt {
        Opt::Check { text, stats } => {
            for raw in &text {
                print_report(&pipeline, raw)?;
            }
            if stats {
                println!("{}", serde_json::to_string(&pipeline.statistics())?);
            }
        }

        Opt::Batch { path } => {
            let watch = Stopwatch::start_new();
            let lines = Reader::open(&path)?.read()?;
            for raw in &lines {
                print_report(&pipeline, raw)?;
            }

            let stats = pipeline.statistics();
            info!(
                path = %path.display(),
                total = stats.total_processed,
                valid = stats.valid,
                corrected = stats.corrected,
                failed = stats.failed,
                elapsed_ms = watch.elapsed_ms(),
                "batch complete"
            );
        }

        Opt::Serve { bind } => server::run(&bind, pipeline)?,
    }

    Ok(())
}

fn print_report(pipeline: &NormalizationPipeline, raw: &str) -> Result<()> {
    let outcome = pipeline.evaluate(raw);
    let report = Report::new(raw, outcome.as_ref());
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
