//! Terminal session driving the controller, one prompt per user action.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use eventlist::api::{ApiClient, EventApi};
use eventlist::controller::{Controller, Mode, UiAction};
use eventlist::render::{Renderer, TerminalRenderer};
use eventlist::store::EventStore;
use eventlist::view::{Draft, Field};
use owo_colors::OwoColorize;

type Session = Controller<ApiClient, TerminalRenderer<std::io::Stdout>>;

const MENU: &[&str] = &["Add event", "Edit event", "Delete event", "Reload", "Quit"];

pub async fn run(client: ApiClient) -> Result<()> {
    let store = EventStore::new(client);
    let mut controller = Controller::new(store, TerminalRenderer::new(std::io::stdout()));
    controller.init().await?;

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("What next?")
            .items(MENU)
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => add(&mut controller).await,
            1 => edit(&mut controller).await,
            2 => delete(&mut controller).await,
            3 => controller.handle(UiAction::Reload).await.map_err(Into::into),
            _ => break,
        };

        if let Err(e) = outcome {
            eprintln!("  {}", e.to_string().red());
        }
    }

    Ok(())
}

async fn add(controller: &mut Session) -> Result<()> {
    controller.handle(UiAction::AddClicked).await?;
    let filled = fill_form(controller).await;
    close_form(controller, filled).await
}

async fn edit(controller: &mut Session) -> Result<()> {
    let Some(row_id) = pick_event(controller, "Edit which event?")? else {
        return Ok(());
    };
    controller.handle(UiAction::EditClicked { row_id }).await?;
    let filled = fill_form(controller).await;
    close_form(controller, filled).await
}

async fn delete(controller: &mut Session) -> Result<()> {
    let Some(row_id) = pick_event(controller, "Delete which event?")? else {
        return Ok(());
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("  Delete event #{row_id}?"))
        .default(false)
        .interact()?;
    if confirmed {
        controller.handle(UiAction::DeleteClicked { row_id }).await?;
    }
    Ok(())
}

/// Prompt for each input of the open form row, then submit or cancel.
/// A failed submit leaves the form open so it can be retried.
async fn fill_form(controller: &mut Session) -> Result<()> {
    let draft = match controller.mode() {
        Mode::Adding(draft) | Mode::Editing { draft, .. } => draft.clone(),
        Mode::Viewing => return Ok(()),
    };

    for (field, label, value) in fields(&draft) {
        let value: String = Input::new()
            .with_prompt(format!("  {label}"))
            .with_initial_text(value)
            .allow_empty(true)
            .interact_text()?;
        controller.handle(UiAction::Input { field, value }).await?;
    }

    loop {
        let choice = Select::new()
            .items(&["Submit", "Cancel"])
            .default(0)
            .interact()?;
        if choice == 1 {
            controller.handle(UiAction::Cancel).await?;
            return Ok(());
        }

        match controller.handle(UiAction::Submit).await {
            Ok(()) => return Ok(()),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// A prompt that failed mid-form leaves the row open; drop it so the next
/// menu choice starts from the table.
async fn close_form<A: EventApi, R: Renderer>(
    controller: &mut Controller<A, R>,
    filled: Result<()>,
) -> Result<()> {
    if filled.is_err() && !matches!(controller.mode(), Mode::Viewing) {
        controller.handle(UiAction::Cancel).await?;
    }
    filled
}

fn fields(draft: &Draft) -> [(Field, &'static str, String); 3] {
    [
        (Field::EventName, "Event name", draft.get(Field::EventName).to_string()),
        (Field::StartDate, "Start date (YYYY-MM-DD)", draft.get(Field::StartDate).to_string()),
        (Field::EndDate, "End date (YYYY-MM-DD)", draft.get(Field::EndDate).to_string()),
    ]
}

fn pick_event(controller: &Session, prompt: &str) -> Result<Option<String>> {
    let events = controller.store().events();
    if events.is_empty() {
        println!("{}", "  No events".dimmed());
        return Ok(None);
    }

    let labels: Vec<String> = events.iter().map(|e| format!("#{} {}", e.id, e)).collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| events[i].id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventlist::api::DeleteAck;
    use eventlist::core::{Event, EventId, EventListError, EventListResult, EventPatch, NewEvent};
    use eventlist::view::Node;

    struct EmptyApi;

    impl EventApi for EmptyApi {
        async fn get_events(&self) -> EventListResult<Vec<Event>> {
            Ok(Vec::new())
        }

        async fn post_event(&self, event: &NewEvent) -> EventListResult<Event> {
            Ok(Event::from_new("1".parse()?, event.clone()))
        }

        async fn update_event(&self, id: EventId, _patch: &EventPatch) -> EventListResult<Event> {
            Err(EventListError::NotFound(id.to_string()))
        }

        async fn delete_event(&self, _id: EventId) -> EventListResult<DeleteAck> {
            Ok(DeleteAck::AlreadyAbsent)
        }
    }

    struct Discard;

    impl Renderer for Discard {
        fn render(&mut self, _tree: &Node) -> EventListResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_prompt_closes_open_form() {
        let mut controller = Controller::new(EventStore::new(EmptyApi), Discard);
        controller.init().await.unwrap();
        controller.handle(UiAction::AddClicked).await.unwrap();

        let outcome = close_form(&mut controller, Err(anyhow::anyhow!("prompt interrupted"))).await;

        assert!(outcome.is_err());
        assert_eq!(controller.mode(), &Mode::Viewing);
    }

    #[tokio::test]
    async fn test_finished_form_is_left_alone() {
        let mut controller = Controller::new(EventStore::new(EmptyApi), Discard);
        controller.init().await.unwrap();
        controller.handle(UiAction::AddClicked).await.unwrap();

        close_form(&mut controller, Ok(())).await.unwrap();

        assert!(matches!(controller.mode(), Mode::Adding(_)));
    }
}
