// crates.io
use clap::Parser;
// self
use remedy::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	remedy::run(args)
}
