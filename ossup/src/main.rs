use anyhow::Context;
use clap::Parser;
use ossup::config::Args;
use ossup::{Config, LocalFile, OssClient, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args)?;
    config.validate()?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;

    tracing::debug!("{:?}", args);

    let client = OssClient::from_config(config.presign);

    // One file at a time; the first failure ends the run.
    for path in &args.files {
        let file = LocalFile::new(path)?;

        if args.presign_only {
            let signed_url = client
                .request_signed_url_for(&file)
                .await
                .with_context(|| format!("presigning {}", path.display()))?;
            println!("{signed_url}");
            continue;
        }

        let signed_url = client
            .upload(&file)
            .await
            .with_context(|| format!("uploading {}", path.display()))?;
        println!("{} -> {}", path.display(), signed_url);
    }

    Ok(())
}
