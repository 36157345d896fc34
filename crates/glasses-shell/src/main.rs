use anyhow::Result;
use glasses_core::ColorChoice;
use glasses_hw::SharedPoseSource;
use glasses_shell::{Config, HeadlessSurface, PickerEvent, Presentation, Snapshot};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(initial_color = %config.initial_color, "glasses-shell starting");

    let poses = SharedPoseSource::new(config.face_pose);
    let probe = config.probe();

    let handle = match glasses_shell::start(
        &*probe,
        HeadlessSurface::new(),
        Arc::new(poses),
        &config,
    )? {
        Presentation::Unsupported { advisory } => {
            println!("{advisory}");
            return Ok(());
        }
        Presentation::Interactive(handle) => handle,
    };

    print_snapshot(&handle.snapshot().await?);

    let labels: Vec<&str> = ColorChoice::ALL.iter().map(|c| c.label()).collect();
    eprintln!("select a color ({}), or quit:", labels.join(" / "));

    glasses_shell::run_picker(&handle, BufReader::new(tokio::io::stdin()), |event| match event {
        PickerEvent::Presented(snapshot) => print_snapshot(snapshot),
        PickerEvent::Rejected(e) => eprintln!("{e}"),
    })
    .await?;

    tracing::info!("glasses-shell shutting down");
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize snapshot"),
    }
}
