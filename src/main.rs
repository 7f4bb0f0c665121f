use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use bankpredict::client::HttpScoringClient;
use bankpredict::config::{Config, ConfigError};
use bankpredict::logging;
use bankpredict::schema::FieldSchema;
use bankpredict::submission::{SubmissionController, SubmissionHandle, SubmissionState};

#[derive(Parser, Debug)]
#[command(
    name = "bankpredict",
    version,
    about = "Score bank marketing customers against a prediction service"
)]
struct Cli {
    /// Config file to load instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the prediction endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edit the customer profile interactively (default)
    Tui,
    /// Submit the default profile once, with optional overrides
    Predict {
        /// Override a field value, e.g. --set age=52 (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the scoring service's health endpoint
    Health,
    /// List the form fields with their kinds and defaults
    Fields,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let command = cli.command.unwrap_or(Command::Tui);
    match command {
        Command::Tui => logging::init_for_tui(),
        _ => logging::init_stderr(),
    }

    let config = load_config(cli.config.as_deref(), cli.endpoint)?;
    let schema = Arc::new(config.schema()?);

    match command {
        Command::Fields => {
            print_fields(&schema);
            Ok(ExitCode::SUCCESS)
        }
        Command::Tui => {
            let runtime = build_runtime()?;
            let _enter = runtime.enter();
            let client = Arc::new(HttpScoringClient::new(&config.endpoint)?);
            let controller = SubmissionController::new(Arc::clone(&schema), client);
            bankpredict::ui::run(
                SubmissionHandle::new(controller),
                schema,
                config.endpoint.url.clone(),
            )
            .context("terminal UI failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Predict { overrides, json } => {
            let client = Arc::new(HttpScoringClient::new(&config.endpoint)?);
            build_runtime()?.block_on(predict(schema, client, &overrides, json))
        }
        Command::Health => {
            let client = HttpScoringClient::new(&config.endpoint)?;
            build_runtime()?.block_on(health(&client))
        }
    }
}

fn load_config(path: Option<&Path>, endpoint: Option<String>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = endpoint {
        tracing::debug!(url = %url, "Endpoint overridden on the command line");
        config.endpoint.url = url;
        config.validate()?;
    }
    Ok(config)
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

fn print_fields(schema: &FieldSchema) {
    let width = schema
        .fields()
        .iter()
        .map(|field| field.name.len())
        .max()
        .unwrap_or(0);
    for field in schema.fields() {
        println!(
            "{:<width$}  {:<7}  {}",
            field.name,
            field.kind.as_str(),
            field.default,
            width = width
        );
    }
}

async fn predict(
    schema: Arc<FieldSchema>,
    client: Arc<HttpScoringClient>,
    overrides: &[String],
    json: bool,
) -> Result<ExitCode> {
    let mut controller = SubmissionController::new(schema, client);
    for item in overrides {
        let (name, value) = item
            .split_once('=')
            .with_context(|| format!("invalid override '{item}', expected NAME=VALUE"))?;
        controller.on_field_change(name.trim(), value)?;
    }

    let state = tokio::select! {
        state = controller.submit() => state.clone(),
        _ = tokio::signal::ctrl_c() => bail!("interrupted"),
    };

    match state {
        SubmissionState::Succeeded(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Outcome: {}", result.prediction.label());
                println!("Probability yes: {:.3}", result.probability_yes);
                println!("Probability no:  {:.3}", result.probability_no);
            }
            if !result.is_consistent() {
                eprintln!("Warning: probabilities do not sum to 1");
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmissionState::Failed(message) => {
            eprintln!("Error: {message}");
            Ok(ExitCode::FAILURE)
        }
        other => bail!("submission ended in unexpected state {other:?}"),
    }
}

async fn health(client: &HttpScoringClient) -> Result<ExitCode> {
    let status = client
        .health()
        .await
        .with_context(|| format!("health check against {} failed", client.endpoint()))?;
    println!("{}", status.status);
    if status.status == "ok" {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["bankpredict"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bankpredict",
            "predict",
            "--set",
            "age=52",
            "--set",
            "job=retired",
            "--endpoint",
            "http://127.0.0.1:9/predict",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9/predict"));
        match cli.command {
            Some(Command::Predict { overrides, json }) => {
                assert_eq!(overrides, vec!["age=52", "job=retired"]);
                assert!(!json);
            }
            other => panic!("Expected predict, got {other:?}"),
        }
    }
}
