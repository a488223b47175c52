pub mod add;
pub mod config;
pub mod delete;
pub mod html;
pub mod interactive;
pub mod list;
pub mod update;

use anyhow::Result;
use eventlist::api::EventApi;
use eventlist::render::{Renderer, TerminalRenderer};
use eventlist::store::EventStore;
use eventlist::view;

use crate::utils::tui::create_spinner;

/// Reload the collection and print it as a table.
async fn reload_and_show<A: EventApi>(store: &mut EventStore<A>) -> Result<()> {
    let spinner = create_spinner("Loading events".to_string());
    let result = store.fetch_events().await.map(|_| ());
    spinner.finish_and_clear();
    result?;

    let mut renderer = TerminalRenderer::new(std::io::stdout());
    renderer.render(&view::app(store.events(), None, None))?;
    Ok(())
}
