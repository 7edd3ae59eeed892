//! Implements InputPort. Runs one CLI command and prints its rendering to stdout.

use crate::adapters::ui::args::Command;
use crate::adapters::ui::{progress, render};
use crate::domain::{DomainError, Handle};
use crate::ports::InputPort;
use crate::usecases::{FetchService, SwimLogView};
use async_trait::async_trait;
use inquire::Text;
use std::sync::Arc;
use tracing::info;

/// Ask for a handle on the terminal. Used when neither flag, env nor config names one.
pub fn prompt_handle() -> Result<String, DomainError> {
    Text::new("Mastodon handle:")
        .with_help_message("e.g. alice@example.social")
        .with_validator(|input: &str| {
            if crate::domain::is_valid_handle(input.trim()) {
                Ok(inquire::validator::Validation::Valid)
            } else {
                Ok(inquire::validator::Validation::Invalid(
                    "expected user@domain".into(),
                ))
            }
        })
        .prompt()
        .map_err(|e| DomainError::Ui(e.to_string()))
}

/// CLI adapter: one command, one handle, output to stdout.
pub struct CliInputPort {
    command: Command,
    handle: Handle,
    fetch_service: Arc<FetchService>,
    swim_log: Arc<SwimLogView>,
}

impl CliInputPort {
    pub fn new(
        command: Command,
        handle: Handle,
        fetch_service: Arc<FetchService>,
        swim_log: Arc<SwimLogView>,
    ) -> Self {
        Self {
            command,
            handle,
            fetch_service,
            swim_log,
        }
    }

    /// Fetch the snapshot and render the selected command's output.
    pub async fn render(&self) -> Result<String, DomainError> {
        let spinner = progress::spinner(format!("Fetching statuses for {}", self.handle));
        let fetched = self.fetch_service.fetch(&self.handle).await;
        spinner.finish_and_clear();
        let data = fetched?;

        let render_err = |e: serde_json::Error| DomainError::Ui(format!("render JSON: {}", e));
        match self.command {
            Command::Swims { json } => {
                let today = self.swim_log.zone().today();
                let entries = self.swim_log.list_swim_entries(&data.statuses, today)?;
                let stats = self.swim_log.get_statistics(&entries, today);
                info!(swims = entries.len(), total_distance = stats.total_distance, "swim log computed");
                if json {
                    render::swims_json(&entries, &stats).map_err(render_err)
                } else {
                    Ok(render::swims_table(&entries, &stats))
                }
            }
            Command::Statuses { json } => {
                if json {
                    render::statuses_json(&data.statuses).map_err(render_err)
                } else {
                    Ok(render::statuses_table(&data.statuses))
                }
            }
        }
    }
}

#[async_trait]
impl InputPort for CliInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let output = self.render().await?;
        println!("{}", output.trim_end());
        Ok(())
    }
}
