// CLI layer: flag parsing, per-action validation and plain-text output.
// Every action is validated before the transport is touched.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::Transport;
use crate::config::Settings;
use crate::error::NotesError;
use crate::pages::PageService;

/// Version message attached to updates made from the command line.
pub const CLI_UPDATE_MESSAGE: &str = "Updated via Notes App";

pub const USAGE: &str = "Invalid action. Supported actions: list, create, read, update, delete";

#[derive(Parser, Debug)]
#[command(name = "wiki-notes", about = "Manage notes stored as wiki pages", version)]
pub struct Args {
    /// Path to configuration file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Action to perform (list, create, read, update, delete, web)
    #[arg(long, default_value = "list")]
    pub action: String,

    /// Note title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Note content
    #[arg(long, default_value = "")]
    pub content: String,

    /// Note ID for read/update/delete
    #[arg(long, default_value = "")]
    pub id: String,

    /// Address the web server listens on
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// A CLI action with its parameters; see [`Command::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Create { title: String, content: String },
    Read { id: String },
    Update { id: String, title: String, content: String },
    Delete { id: String },
}

impl Command {
    /// Build and validate the command for the raw flag values.
    pub fn from_args(action: &str, title: &str, content: &str, id: &str) -> Result<Self, NotesError> {
        let cmd = match action {
            "list" => Command::List,
            "create" => Command::Create {
                title: title.to_string(),
                content: content.to_string(),
            },
            "read" => Command::Read { id: id.to_string() },
            "update" => Command::Update {
                id: id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
            },
            "delete" => Command::Delete { id: id.to_string() },
            _ => return Err(NotesError::validation(USAGE)),
        };
        cmd.validate()?;
        Ok(cmd)
    }

    /// Check the parameters each action requires.
    pub fn validate(&self) -> Result<(), NotesError> {
        let missing = match self {
            Command::List => None,
            Command::Create { title, content } => (title.is_empty() || content.is_empty())
                .then_some("Title and content are required for create action"),
            Command::Read { id } => id.is_empty().then_some("ID is required for read action"),
            Command::Update { id, title, content } => {
                (id.is_empty() || title.is_empty() || content.is_empty())
                    .then_some("ID, title, and content are required for update action")
            }
            Command::Delete { id } => id.is_empty().then_some("ID is required for delete action"),
        };
        match missing {
            Some(msg) => Err(NotesError::validation(msg)),
            None => Ok(()),
        }
    }

    /// Wording used when reporting a failure of this command.
    pub fn failure_context(&self) -> &'static str {
        match self {
            Command::List => "listing notes",
            Command::Create { .. } => "creating note",
            Command::Read { .. } => "reading note",
            Command::Update { .. } => "updating note",
            Command::Delete { .. } => "deleting note",
        }
    }
}

/// Run `cmd` against the remote API, writing the result to `out`. The
/// command is validated again first; an invalid one makes no request.
pub async fn execute<T, W>(
    cmd: &Command,
    transport: &T,
    settings: &Settings,
    out: &mut W,
) -> Result<(), NotesError>
where
    T: Transport + ?Sized,
    W: Write + Send,
{
    cmd.validate()?;
    let pages = PageService::new(transport, settings);
    match cmd {
        Command::List => {
            let mut endpoint = pages.first_list_endpoint(false);
            loop {
                let list = pages.fetch_batch(&endpoint).await?;
                for page in &list.results {
                    writeln!(out, "ID: {}, Title: {}, Status: {}", page.id, page.title, page.status)?;
                }
                match list.next_endpoint() {
                    Some(next) => endpoint = next.to_string(),
                    None => break,
                }
            }
        }
        Command::Create { title, content } => {
            let page = pages.create(title, content).await?;
            writeln!(out, "Note created successfully. ID: {}, Title: {}", page.id, page.title)?;
        }
        Command::Read { id } => {
            let page = pages.get(id, true).await?;
            writeln!(
                out,
                "ID: {}\nTitle: {}\nStatus: {}\nContent: {}",
                page.id, page.title, page.status, page.body.storage.value
            )?;
        }
        Command::Update { id, title, content } => {
            pages.update(id, title, content, CLI_UPDATE_MESSAGE).await?;
            writeln!(out, "Note updated successfully. ID: {}", id)?;
        }
        Command::Delete { id } => {
            pages.delete(id).await?;
            writeln!(out, "Note deleted successfully. ID: {}", id)?;
        }
    }
    Ok(())
}

/// Run a validated command for the terminal: spinner on stderr while the
/// remote calls are in flight, failures reported on stderr.
pub async fn route_call<T: Transport + ?Sized>(cmd: &Command, transport: &T, settings: &Settings) {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("{}...", cmd.failure_context()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut out = Vec::new();
    let result = execute(cmd, transport, settings, &mut out).await;
    spinner.finish_and_clear();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(&out).and_then(|_| stdout.flush()) {
        tracing::warn!(error = %e, "writing output failed");
    }
    if let Err(e) = result {
        eprintln!("Error {}: {}", cmd.failure_context(), e);
    }
}
