use std::path::PathBuf;

use clap::Parser;

use residue_linalg::{ProblemConfig, ResidueError};

/// Gaussian elimination over Z/mZ with a step-by-step trace.
#[derive(Parser, Debug)]
#[command(name = "residue-gauss", version)]
struct Args {
    /// JSON problem description; the built-in 4x4 example over Z_10 is used when omitted.
    config: Option<PathBuf>,

    /// Print only the reduced matrix.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), ResidueError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                ResidueError::InvalidParameters(format!("Cannot read {}: {}", path.display(), e))
            })?;
            ProblemConfig::from_json(&json)?
        }
        None => ProblemConfig::default(),
    };

    let matrix = config.matrix()?;
    log::info!(
        "loaded {}x{} matrix over Z_{}",
        matrix.height(),
        matrix.width(),
        matrix.modulus()
    );

    if config.trace && !args.quiet {
        let result = matrix.gauss_with_steps()?;
        println!("{}", result.steps());
        println!("{}", result.matrix());
    } else {
        println!("{}", matrix.gauss()?);
    }

    Ok(())
}
