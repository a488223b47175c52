use anyhow::{Context, Result};
use eventlist::api::{ApiClient, DeleteAck};
use eventlist::core::EventId;
use eventlist::store::EventStore;
use owo_colors::OwoColorize;

pub async fn run(client: ApiClient, id: EventId) -> Result<()> {
    let mut store = EventStore::new(client);

    let ack = store
        .remove_event(id)
        .await
        .with_context(|| format!("Failed to delete event {id}"))?;

    match ack {
        DeleteAck::Deleted(_) => println!("{}", format!("Deleted #{id}").red()),
        DeleteAck::AlreadyAbsent => println!("{}", format!("Event #{id} was already gone").dimmed()),
    }
    println!();

    super::reload_and_show(&mut store).await
}
