//! Run the NetCDF demos, inspect a container or write the sample containers.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ncplot::demos::{self, pres_temp_4d, psi_theta, richards, sfc_pres_temp, swrc, Options};
use ncplot::{fixtures, Container};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory figures are written to.
    #[arg(short, long, global = true, default_value = ".")]
    out: PathBuf,

    /// Compare stored data against the expected arrays.
    #[arg(long, global = true)]
    check_data: bool,

    /// Close the container right after reading.
    #[arg(long, global = true)]
    close: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Soil water retention curve of a hydraulic parameterization.
    Swrc { path: Option<PathBuf> },

    /// Second record of `psi` over depth, reading the four dimensional variables.
    #[command(name = "pres-temp-4d")]
    PresTemp4d { path: Option<PathBuf> },

    /// Profiles of `psi` and `theta` at one record.
    PsiTheta {
        path: Option<PathBuf>,

        #[arg(short, long, default_value_t = psi_theta::TIME_INDEX)]
        time_index: usize,
    },

    /// Check units, then plot surface pressure.
    SfcPresTemp { path: Option<PathBuf> },

    /// Read a Richards 1D grid and write its initial state into `--out`.
    Richards {
        grid: Option<PathBuf>,

        /// Date of the first record, `YYYY-MM-DD HH:MM` (UTC).
        #[arg(short, long, default_value = richards::START_DATE)]
        start: String,
    },

    /// Describe a container and all of its variables.
    Info { path: PathBuf },

    /// Write the sample containers into a directory.
    WriteFixtures {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let opts = Options {
        out_dir: args.out,
        check_data: args.check_data,
        close: args.close,
    };

    let or = |p: Option<PathBuf>, default: &str| p.unwrap_or_else(|| PathBuf::from(default));

    let figures = match args.command {
        Command::Swrc { path } => swrc::run(&or(path, swrc::DEFAULT_PATH), &opts)?,
        Command::PresTemp4d { path } => {
            pres_temp_4d::run(&or(path, pres_temp_4d::DEFAULT_PATH), &opts)?
        }
        Command::PsiTheta { path, time_index } => psi_theta::run(
            &or(path, psi_theta::DEFAULT_PATH),
            time_index,
            &opts,
        )?,
        Command::SfcPresTemp { path } => {
            sfc_pres_temp::run(&or(path, sfc_pres_temp::DEFAULT_PATH), &opts)?
        }
        Command::Richards { grid, start } => {
            richards::run(&or(grid, richards::DEFAULT_GRID), &start, &opts)?
        }
        Command::Info { path } => {
            let c = Container::open(&path)?;
            let names = c.variable_names();
            let names = names.iter().map(String::as_str).collect::<Vec<_>>();
            demos::print_info(&c, &names)?;
            Vec::new()
        }
        Command::WriteFixtures { dir } => {
            for p in fixtures::write_all(&dir)? {
                println!("{}", p.display());
            }
            Vec::new()
        }
    };

    for f in figures {
        println!("wrote {}", f.display());
    }

    Ok(())
}
