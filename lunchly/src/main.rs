use clap::Parser;
use lunchly::{Application, Config, config::Command, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = lunchly::config::Args::parse();

    // Load configuration
    let mut config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;

    tracing::debug!("{:?}", args);

    let Some(command) = args.command else {
        anyhow::bail!("No command given. Run with --help to see available commands.");
    };

    // `migrate` applies migrations itself; don't run them twice
    if command == Command::Migrate {
        config.run_migrations = false;
    }

    let app = Application::new(config).await?;
    let result = app.run(command).await;
    app.close().await;

    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(status = %e.status_code(), "Command failed");
            Err(anyhow::anyhow!(e.user_message()))
        }
    }
}
