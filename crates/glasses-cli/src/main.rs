use anyhow::Result;
use clap::{Parser, Subcommand};
use glasses_core::ColorChoice;
use glasses_hw::{CapabilityProbe, UNSUPPORTED_ADVISORY};
use glasses_shell::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glasses", about = "Reality Glasses CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the glasses scene for a lens color as JSON
    Compose {
        /// Lens color: red, green or black
        #[arg(short, long, default_value_t = ColorChoice::default())]
        color: ColorChoice,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Check whether this host supports face tracking
    Check {
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// List V4L2 capture devices usable for face tracking
    Devices {
        #[command(flatten)]
        probe: ProbeArgs,
    },
}

// Overrides for the `GLASSES_*` configuration shared with the shell.
#[derive(clap::Args)]
struct ProbeArgs {
    /// sysfs directory listing V4L2 nodes
    #[arg(long)]
    sysfs_root: Option<PathBuf>,
    /// Directory holding the videoN device nodes
    #[arg(long)]
    dev_root: Option<PathBuf>,
}

impl ProbeArgs {
    /// Apply the flags on top of the loaded configuration. Passing a root
    /// asks for a hardware probe, so it clears a forced capability.
    fn apply(self, mut config: Config) -> Config {
        if self.sysfs_root.is_some() || self.dev_root.is_some() {
            config.face_tracking = None;
        }
        if let Some(root) = self.sysfs_root {
            config.video_sysfs_root = root;
        }
        if let Some(root) = self.dev_root {
            config.video_dev_root = root;
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compose { color, pretty } => {
            let scene = glasses_core::compose(color);
            println!("{}", scene.to_json(pretty)?);
        }
        Commands::Check { probe } => {
            let config = probe.apply(Config::from_env()?);
            if config.probe().supports_face_tracking() {
                println!("face tracking: supported");
            } else {
                eprintln!("{UNSUPPORTED_ADVISORY}");
                std::process::exit(1);
            }
        }
        Commands::Devices { probe } => {
            let config = probe.apply(Config::from_env()?);
            let nodes = config.sysfs_probe().capture_nodes();
            tracing::debug!(count = nodes.len(), "capture nodes listed");
            if nodes.is_empty() {
                println!("No capture devices found");
            }
            for node in nodes {
                println!("{}\t{}\t{}\t{}", node.path.display(), node.name, node.driver, node.bus);
            }
        }
    }

    Ok(())
}
