use std::error::Error;
use std::path::PathBuf;

use bedwars_core::LifecycleEvent;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Compile a bedwars pack definition into a datapack", long_about = None)]
pub struct Cli {
    /// Enables debug mode (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the datapack for a pack directory
    Build {
        /// Directory holding pack.* and economy.*
        pack_dir: PathBuf,

        /// Output root; the pack is written to <OUT>/<namespace>
        #[arg(short, long, default_value = "build")]
        out: PathBuf,
    },
    /// Print one aggregated lifecycle script without writing anything
    Render {
        pack_dir: PathBuf,

        /// load, unload or tick
        event: LifecycleEvent,
    },
}

fn default_filter(debug: u8) -> &'static str {
    match debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.debug))),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build { pack_dir, out } => {
            let builder = bedwars_data::load_pack(&pack_dir)?.into_builder()?;
            let report = builder.build(&out)?;
            info!(
                pack = %report.pack_dir.display(),
                files = report.files_written.len(),
                plugins = ?report.plugins,
                "datapack ready"
            );
        }
        Command::Render { pack_dir, event } => {
            let builder = bedwars_data::load_pack(&pack_dir)?.into_builder()?;
            println!("{}", builder.lifecycle_scripts().render(event));
        }
    }

    Ok(())
}
