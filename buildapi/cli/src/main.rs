//! buildapi CLI - call the build self-serve API from the shell

use buildapi::{BodyParams, BuildApiClient, BuildApiError, ClientOptions, ErrorKind, Invocation};
use buildapi_definitions::define_self_serve_api;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "buildapi")]
#[command(version, about = "Inspect and control builds through the self-serve API", long_about = None)]
#[command(after_help = "EXIT CODES:
  0  success
  1  client could not be configured
  2  invalid call (arguments, parameters, unknown operation)
  3  transport failure
  4  undecodable response
  5  the API rejected the request")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// URI scheme [default: https]
    #[arg(long, global = true, value_name = "SCHEME")]
    protocol: Option<String>,

    /// API host, optionally with a port [default: secure.pub.build.mozilla.org]
    #[arg(long, global = true)]
    host: Option<String>,

    /// Path prefix for every operation [default: buildapi/self-serve]
    #[arg(long, global = true, value_name = "PATH")]
    root_path: Option<String>,

    /// Basic-auth username (falls back to BUILDAPI_USERNAME)
    ///
    /// The password is only read from BUILDAPI_PASSWORD.
    #[arg(short = 'u', long, global = true)]
    username: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available operations
    List {
        /// Only show operations whose name contains this text
        #[arg(value_name = "FILTER")]
        filter: Option<String>,
    },

    /// Call an operation and print the result as JSON
    Call {
        /// Operation name (see `buildapi list`)
        #[arg(value_name = "OPERATION")]
        operation: String,

        /// Positional path arguments, in template order
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        /// Body parameter as key=value (repeatable)
        ///
        /// Values that parse as JSON are sent as such (`count=2`,
        /// `files=["a","b"]`); anything else is sent as text. Repeating a key
        /// sends it once per value.
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,buildapi=info".to_string(),
            2 => "info,buildapi=debug".to_string(),
            _ => "debug,buildapi=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Maps a call failure to the process exit code.
fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Argument
        | ErrorKind::InvalidPathArgument
        | ErrorKind::MissingParameter
        | ErrorKind::UnknownOperation => 2,
        ErrorKind::Transport => 3,
        ErrorKind::Decode => 4,
        ErrorKind::Api => 5,
    }
}

/// Parses repeated `key=value` flags into body parameters.
fn parse_params(raw: &[String]) -> Result<Option<BodyParams>, String> {
    if raw.is_empty() {
        return Ok(None);
    }

    let mut params = BodyParams::new();
    for item in raw {
        let (key, value) = item
            .split_once('=')
            .ok_or_else(|| format!("invalid parameter `{item}`: expected KEY=VALUE"))?;
        if key.is_empty() {
            return Err(format!("invalid parameter `{item}`: empty key"));
        }

        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        let merged = match params.get(key).cloned() {
            None => value,
            Some(Value::Array(mut items)) => {
                items.push(value);
                Value::Array(items)
            }
            Some(previous) => Value::Array(vec![previous, value]),
        };
        params.insert(key, merged);
    }
    Ok(Some(params))
}

fn client_options(cli: &Cli) -> ClientOptions {
    let mut options = ClientOptions::new();
    if let Some(protocol) = &cli.protocol {
        options = options.protocol(protocol);
    }
    if let Some(host) = &cli.host {
        options = options.host(host);
    }
    if let Some(root_path) = &cli.root_path {
        options = options.root_path(root_path);
    }
    if let Some(username) = &cli.username {
        options = options.username(username);
    }
    options
}

fn list_operations(filter: Option<&str>) {
    let api = define_self_serve_api();
    for op in api
        .operations
        .iter()
        .filter(|op| filter.is_none_or(|f| op.name.contains(f)))
    {
        let mut line = format!("{:<22} {:<6} {}", op.name, op.method, op.path);
        if !op.required.is_empty() {
            line.push_str(&format!("  requires: {}", op.required.join(", ")));
        }
        println!("{line}");
    }
}

async fn call_operation(
    options: ClientOptions,
    operation: &str,
    args: Vec<String>,
    params: Option<BodyParams>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let client = BuildApiClient::self_serve(options)?;

    let mut invocation = Invocation::from(args);
    if let Some(params) = params {
        invocation = invocation.params(params);
    }

    let outcome = client.call(operation, invocation).await?;
    Ok(outcome.to_json())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    tracing::info!("buildapi CLI starting");

    let options = client_options(&cli);
    match cli.command {
        Commands::List { filter } => list_operations(filter.as_deref()),
        Commands::Call {
            operation,
            args,
            params,
        } => {
            let params = match parse_params(&params) {
                Ok(params) => params,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }
            };

            match call_operation(options, &operation, args, params).await {
                Ok(value) => match serde_json::to_string_pretty(&value) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("Error: {e}");
                    let code = match e.downcast_ref::<BuildApiError>() {
                        Some(call_error) => {
                            tracing::debug!(kind = %call_error.kind(), "Call failed");
                            exit_code(call_error.kind())
                        }
                        None => 1,
                    };
                    std::process::exit(code);
                }
            }
        }
    }
}
