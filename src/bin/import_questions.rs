//! Converts the course's markdown exercise sheet into the JSON question bank
//! the backend serves at `/quiz`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dielectric_graph::quiz::audit::audit;
use dielectric_graph::quiz::import::parse_markdown;

#[derive(Parser)]
#[command(name = "import-questions")]
#[command(about = "Convert a markdown exercise sheet into the quiz bank JSON")]
struct Cli {
	/// Markdown sheet to read
	input: PathBuf,

	/// Where to write the bank (stdout when omitted)
	#[arg(short, long)]
	output: Option<PathBuf>,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	let source = std::fs::read_to_string(&cli.input)
		.with_context(|| format!("reading {}", cli.input.display()))?;

	let bank = parse_markdown(&source);
	for finding in audit(&bank) {
		eprintln!("warning: {finding}");
	}

	let sink: Box<dyn Write> = match &cli.output {
		Some(path) => Box::new(
			File::create(path).with_context(|| format!("creating {}", path.display()))?,
		),
		None => Box::new(io::stdout().lock()),
	};
	let mut sink = BufWriter::new(sink);
	serde_json::to_writer_pretty(&mut sink, &bank).context("writing question bank")?;
	sink.flush()?;

	eprintln!("{} questions written", bank.len());
	Ok(())
}
