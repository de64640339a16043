use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request};
use clap::{Parser, Subcommand};
use serde_json::json;

use api_gateway::authority::{AuthorityClient, TokenValidator};
use api_gateway::config::load_or_default;
use api_gateway::gatekeeper::{Decision, Gatekeeper, RoutePolicy, X_USER_NAME, X_USER_ROLES};
use api_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Dry-run gateway decisions against the configured authority", long_about = None)]
struct Cli {
    /// Gateway configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what the gateway would do with a request
    Check {
        #[arg(short, long)]
        path: String,
        #[arg(short, long, default_value = "GET")]
        method: String,
        /// Bearer token; omit to test the unauthenticated path
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Ask the authority about a token
    Validate {
        #[arg(short, long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    logging::init(&config.observability);

    let authority = AuthorityClient::new(&config.authority)?;

    match cli.command {
        Commands::Check { path, method, token } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let mut builder = Request::builder().method(method).uri(path.as_str());
            if let Some(token) = token {
                builder = builder.header("authorization", format!("Bearer {}", token));
            }
            let request = builder.body(Body::empty())?;

            let gatekeeper = Gatekeeper::new(RoutePolicy::from_config(&config.policy), authority);
            let output = match gatekeeper.decide(request).await {
                Decision::Forward(req) => {
                    let header = |name: axum::http::HeaderName| {
                        req.headers()
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned)
                    };
                    json!({
                        "decision": "forward",
                        "x-user-name": header(X_USER_NAME),
                        "x-user-roles": header(X_USER_ROLES),
                    })
                }
                Decision::Deny(denial) => json!({
                    "decision": "deny",
                    "status": denial.status().as_u16(),
                    "error": denial.message(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Validate { token } => match authority.validate(&token).await {
            Ok(Some(info)) => println!("{}", serde_json::to_string_pretty(&info)?),
            Ok(None) => println!("null"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
