use clap::{Parser, Subcommand};
use std::sync::Arc;

use playgate_core::GateDecision;
use playgate_gate::{ComplianceController, ComplianceGate};
use playgate_geo::{GateConfig, GeoProbe, HttpGeoProbe};
use playgate_store::{ConsentStore, FileConsentStore};

#[derive(Parser)]
#[command(name = "playgate", version, about = "Playgate compliance gate command-line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored consent decision and its validity
    Status,

    /// Record an affirmative consent decision
    Accept,

    /// Decline consent (clears any stored record)
    Decline,

    /// Run a one-shot jurisdiction check against the compliance endpoint
    Check {
        /// Endpoint override, e.g. https://portal.example/api/compliance-check
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Run the full gate lifecycle and print the render decision
    Gate {
        /// Endpoint override for the jurisdiction check
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn probe_for(endpoint: Option<String>) -> HttpGeoProbe {
    match endpoint {
        Some(url) => HttpGeoProbe::new(url),
        None => HttpGeoProbe::from_config(&GateConfig::load()),
    }
}

fn cmd_status(store: &FileConsentStore) {
    match store.load() {
        Some(record) => {
            let days_left = record
                .remaining()
                .map(|d| d.num_days())
                .unwrap_or_default();
            println!("consent: given");
            println!("issued:  {}", record.issued_at.to_rfc3339());
            println!("expires: in {days_left} day(s)");
        }
        None => println!("consent: not given (no valid record)"),
    }
}

async fn cmd_check(endpoint: Option<String>) {
    let probe = probe_for(endpoint);
    println!("checking {}", probe.endpoint());
    match probe.fetch_status().await {
        Ok(status) if status.blocked => println!("verdict: BLOCKED"),
        Ok(_) => println!("verdict: not blocked"),
        Err(err) => println!("check failed ({err}); verdict unchanged (fail-open)"),
    }
}

async fn cmd_gate(endpoint: Option<String>) {
    let store = Arc::new(FileConsentStore::open_default());
    let probe: Arc<dyn GeoProbe> = Arc::new(probe_for(endpoint));
    let controller = ComplianceController::server_default(store, probe);
    let gate = ComplianceGate::new(Arc::clone(&controller));

    // The CLI is a one-shot run, so resolve the check before rendering
    // instead of leaving it in flight.
    controller.hydrate();
    controller.check_compliance().await;

    let rendered = gate.render("<portal content>");
    println!("decision: {}", rendered.decision());
    match rendered.decision() {
        GateDecision::Blocked => {
            if let playgate_core::Rendered::Blocked(notice) = &rendered {
                println!("{}", notice.title);
                println!("{}", notice.body);
                println!("{}", notice.support_hint);
            }
        }
        GateDecision::ConsentPending => {
            if let Some(prompt) = rendered.prompt() {
                println!("content shown with banner: {}", prompt.message);
            }
        }
        GateDecision::Clear => println!("content shown, no banner"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let store = FileConsentStore::open_default();

    match cli.command {
        Commands::Status => cmd_status(&store),
        Commands::Accept => {
            store.save(true);
            println!("consent recorded");
        }
        Commands::Decline => {
            store.save(false);
            println!("consent cleared");
        }
        Commands::Check { endpoint } => cmd_check(endpoint).await,
        Commands::Gate { endpoint } => cmd_gate(endpoint).await,
    }

    Ok(())
}
