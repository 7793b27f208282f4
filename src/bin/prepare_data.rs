//! Standalone data preparation binary: `prepare_data [raw.csv] [output_dir]`

use std::env;
use std::path::PathBuf;

use medical_kgqa::commands::prepare;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "disease3.csv".to_string()));
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let summary = prepare::run(&input, &output_dir)?;
    println!(
        "Prepared {} diseases into {}",
        summary.diseases,
        summary.output_dir.display()
    );
    Ok(())
}
