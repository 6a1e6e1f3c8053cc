// Entrypoint for the notes tool.
// - Parses flags, loads the settings file and builds one API client.
// - `--action web` serves the form UI; every other action runs once.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use wiki_notes::cli::{self, Args, Command};
use wiki_notes::logging::init_logging;
use wiki_notes::web::{self, AppState};
use wiki_notes::{ApiClient, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let server = args.action == "web";
    init_logging(args.verbose, server);

    let settings = match Settings::load(&args.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let client = ApiClient::new(&settings)?;

    if server {
        let state = AppState::new(Arc::new(client), Arc::new(settings));
        web::serve(&args.listen, state).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let cmd = match Command::from_args(&args.action, &args.title, &args.content, &args.id) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    cli::route_call(&cmd, &client, &settings).await;
    Ok(ExitCode::SUCCESS)
}
