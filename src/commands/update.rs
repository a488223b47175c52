use anyhow::{Context, Result};
use eventlist::api::ApiClient;
use eventlist::core::{EventId, EventPatch};
use eventlist::store::EventStore;
use owo_colors::OwoColorize;

pub async fn run(
    client: ApiClient,
    id: EventId,
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let patch = EventPatch {
        event_name: name,
        start_date: start,
        end_date: end,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one of --name, --start or --end.");
    }

    let mut store = EventStore::new(client);
    let updated = store
        .update_event(id, patch)
        .await
        .with_context(|| format!("Failed to update event {id}"))?;

    println!("{}", format!("Updated #{}: {}", updated.id, updated).yellow());
    println!();

    super::reload_and_show(&mut store).await
}
