use anyhow::{Context, Result};
use eventlist::api::ApiClient;
use eventlist::core::NewEvent;
use eventlist::store::EventStore;
use owo_colors::OwoColorize;

pub async fn run(client: ApiClient, name: String, start: String, end: String) -> Result<()> {
    let mut store = EventStore::new(client);

    let created = store
        .add_event(NewEvent::new(name, start, end))
        .await
        .context("Failed to create event")?;

    println!("{}", format!("Created #{}: {}", created.id, created.event_name).green());
    println!();

    super::reload_and_show(&mut store).await
}
