//! CLI front-end for the predictor generator.
//!
//! Grounded on `examples/original_source/src/features/gen-predictor.c`'s `main`: reads a
//! trace file, counts and indexes histories, and writes the rendered table. Two defects
//! noted in `SPEC_FULL.md` §9 are fixed rather than reproduced: the mismatched format
//! string in the original's `die()` call, and its inverted null-check when opening the
//! output file.
//!
//! Argument handling deliberately does not use `clap`'s `required` positionals: the
//! original's `argc < 3` branch prints a usage line and exits *successfully*, which
//! `clap`'s built-in "missing required argument" handling cannot express (it exits
//! nonzero). Both paths are modeled as `Option<PathBuf>` with the usage line and `exit(0)`
//! written out by hand.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use smite_vm::predictor::PredictorBuilder;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a bytecode-history predictor table from a trace")]
struct Args {
    /// Trace file: a sequence of raw bytes, each a primitive opcode.
    trace_filename: Option<PathBuf>,
    /// Destination for the rendered predictor table.
    predictor_filename: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let (Some(trace_filename), Some(predictor_filename)) = (args.trace_filename, args.predictor_filename) else {
        println!("Usage: gen-predictor TRACE-FILENAME PREDICTOR-FILENAME");
        return ExitCode::SUCCESS;
    };

    if let Err(err) = run(&trace_filename, &predictor_filename) {
        eprintln!("gen-predictor: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(trace_filename: &PathBuf, predictor_filename: &PathBuf) -> anyhow::Result<()> {
    tracing::info!(path = %trace_filename.display(), "reading trace file");
    let trace = fs::read(trace_filename).with_context(|| format!("cannot open file {}", trace_filename.display()))?;

    let mut builder = PredictorBuilder::new();
    builder
        .read_trace(&trace)
        .with_context(|| format!("corrupt trace in {}", trace_filename.display()))?;

    let num_common = builder.num_common_histories();
    println!("There are {num_common} common history values.");

    let rendered = builder.build();
    tracing::info!(path = %predictor_filename.display(), common_histories = num_common, "writing predictor file");
    fs::write(predictor_filename, rendered).with_context(|| format!("cannot open file {}", predictor_filename.display()))?;

    Ok(())
}
