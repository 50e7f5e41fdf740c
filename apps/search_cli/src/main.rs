use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, HttpSearchTransport, RequestCoordinator};
use shared::domain::FormInput;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Run one user search and print the records as JSON")]
struct Args {
    #[arg(long)]
    email: String,
    /// Optional number in DD-DD-DD form.
    #[arg(long)]
    number: Option<String>,
    /// Root URL of the search service; overrides search.toml and environment.
    #[arg(long)]
    service_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let query = match FormInput::new(args.email, args.number).validate() {
        Ok(query) => query,
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            bail!("invalid input: {}", messages.join("; "));
        }
    };

    let mut settings = load_settings().context("failed to load search settings")?;
    if let Some(service_url) = args.service_url.as_deref() {
        settings = settings
            .with_service_url(service_url)
            .context("invalid --service-url")?;
    }

    let coordinator = RequestCoordinator::new(
        HttpSearchTransport::new(&settings).context("failed to build search transport")?,
    );
    let submission = coordinator.submit(query);
    let request_id = submission.id();
    tracing::info!(request_id = request_id.0, "search submitted");
    match submission.settled().await {
        Ok(records) => {
            tracing::info!(
                request_id = request_id.0,
                result_count = records.len(),
                "search settled"
            );
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        Err(err) => {
            tracing::info!(request_id = request_id.0, "search settled with error: {err}");
            bail!(err
                .user_message()
                .unwrap_or_else(|| "search was cancelled".to_string()))
        }
    }
}
