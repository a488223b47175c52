//! Maps user actions on the event table to store calls and re-renders.
//!
//! The controller owns one [`EventStore`] and one [`Renderer`], both handed
//! in by the caller. Every successful mutation ends with a full reload from
//! the server followed by a render.

use eventlist_core::{EventId, EventListError, EventListResult};

use crate::api::{DeleteAck, EventApi};
use crate::render::Renderer;
use crate::store::EventStore;
use crate::view::{self, Draft, Field, FormRow, Node, Notice};

/// What the table is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    /// A blank editable row is present.
    Adding(Draft),
    /// The row of `id` has been swapped for inputs.
    Editing { id: EventId, draft: Draft },
}

/// Something the user did. Row ids arrive as the text of the row's id
/// attribute and are parsed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    AddClicked,
    EditClicked { row_id: String },
    DeleteClicked { row_id: String },
    Input { field: Field, value: String },
    Submit,
    Cancel,
    Reload,
}

pub struct Controller<A, R> {
    store: EventStore<A>,
    renderer: R,
    mode: Mode,
    notice: Option<Notice>,
}

impl<A: EventApi, R: Renderer> Controller<A, R> {
    pub fn new(store: EventStore<A>, renderer: R) -> Self {
        Controller {
            store,
            renderer,
            mode: Mode::Viewing,
            notice: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn store(&self) -> &EventStore<A> {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Load the collection and show it.
    pub async fn init(&mut self) -> EventListResult<()> {
        self.render_content().await
    }

    /// The tree for the current state.
    pub fn view(&self) -> Node {
        let form = match &self.mode {
            Mode::Viewing => None,
            Mode::Adding(draft) => Some(FormRow::New(draft)),
            Mode::Editing { id, draft } => Some(FormRow::Edit(*id, draft)),
        };
        view::app(self.store.events(), form, self.notice.as_ref())
    }

    pub async fn handle(&mut self, action: UiAction) -> EventListResult<()> {
        tracing::debug!(?action, mode = ?self.mode, "handling action");

        match action {
            UiAction::AddClicked => {
                if !self.is_viewing() {
                    return self.ignore("add");
                }
                self.mode = Mode::Adding(Draft::default());
                self.render()
            }
            UiAction::EditClicked { row_id } => {
                if !self.is_viewing() {
                    return self.ignore("edit");
                }
                let id: EventId = row_id.parse()?;
                let event = self
                    .store
                    .find(id)
                    .ok_or_else(|| EventListError::NotFound(id.to_string()))?;
                self.mode = Mode::Editing {
                    id,
                    draft: Draft::from(event),
                };
                self.render()
            }
            UiAction::DeleteClicked { row_id } => {
                if !self.is_viewing() {
                    return self.ignore("delete");
                }
                let id: EventId = row_id.parse()?;
                self.delete(id).await
            }
            UiAction::Input { field, value } => {
                if let Mode::Adding(draft) | Mode::Editing { draft, .. } = &mut self.mode {
                    draft.set(field, value);
                    return Ok(());
                }
                self.ignore("input")
            }
            UiAction::Submit => self.submit().await,
            UiAction::Cancel => {
                if self.is_viewing() {
                    return self.ignore("cancel");
                }
                self.mode = Mode::Viewing;
                self.render()
            }
            UiAction::Reload => self.render_content().await,
        }
    }

    async fn submit(&mut self) -> EventListResult<()> {
        match self.mode.clone() {
            Mode::Viewing => return self.ignore("submit"),
            Mode::Adding(draft) => {
                let created = self.store.add_event(draft.into()).await?;
                tracing::info!(id = %created.id, name = %created.event_name, "added event");
            }
            Mode::Editing { id, draft } => {
                let updated = self.store.update_event(id, draft.into()).await?;
                tracing::info!(id = %updated.id, name = %updated.event_name, "updated event");
            }
        }

        self.mode = Mode::Viewing;
        self.notice = None;
        self.render_content().await
    }

    /// Delete failures do not fail the action: they are logged and shown
    /// as a notice above whatever the server still returns.
    async fn delete(&mut self, id: EventId) -> EventListResult<()> {
        match self.store.remove_event(id).await {
            Ok(DeleteAck::Deleted(_)) => {
                tracing::info!(%id, "deleted event");
                self.notice = None;
            }
            Ok(DeleteAck::AlreadyAbsent) => {
                tracing::info!(%id, "event was already deleted");
                self.notice = Some(Notice::info(format!("Event {id} was already deleted")));
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "failed to delete event");
                self.notice = Some(Notice::error(format!("Could not delete event {id}: {e}")));
            }
        }

        if let Err(e) = self.store.fetch_events().await {
            tracing::warn!(error = %e, "failed to reload events after delete");
            if self.notice.is_none() {
                self.notice = Some(Notice::error(format!("Could not reload events: {e}")));
            }
        }
        self.render()
    }

    async fn render_content(&mut self) -> EventListResult<()> {
        self.store.fetch_events().await?;
        self.render()
    }

    fn render(&mut self) -> EventListResult<()> {
        let tree = self.view();
        self.renderer.render(&tree)
    }

    fn is_viewing(&self) -> bool {
        matches!(self.mode, Mode::Viewing)
    }

    fn ignore(&self, action: &str) -> EventListResult<()> {
        tracing::debug!(action, mode = ?self.mode, "ignoring action in current mode");
        Ok(())
    }
}
