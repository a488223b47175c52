//! Declarative view of the event table.
//!
//! Everything here is a pure function from event records (plus the
//! controller's form and notice state) to a [`Node`] tree. Renderers in
//! [`crate::render`] turn the tree into something visible.

use eventlist_core::{Event, EventId, EventPatch, NewEvent};

pub mod ids {
    pub const APP: &str = "event-list-app";
    pub const ADD_BUTTON: &str = "event-list-app__add-button";
    pub const TABLE: &str = "event-list-app__table";
    pub const TABLE_BODY: &str = "event-list-app__table-body";
}

pub mod classes {
    pub const EVENT: &str = "event";
    pub const EVENT_NAME: &str = "event-name";
    pub const EVENT_START: &str = "event-startDate";
    pub const EVENT_END: &str = "event-endDate";
    pub const EVENT_ACTIONS: &str = "event-actions";
    pub const NEW_EVENT_ACTIONS: &str = "new-event-actions";
    pub const EDIT_EVENT_ACTIONS: &str = "edit-event-actions";
    pub const NAME_INPUT: &str = "event-name-input";
    pub const START_INPUT: &str = "event-startDate-input";
    pub const END_INPUT: &str = "event-endDate-input";
    pub const EDIT_BUTTON: &str = "edit-button";
    pub const DELETE_BUTTON: &str = "delete-button";
    pub const POST_BUTTON: &str = "post-button";
    pub const UPDATE_BUTTON: &str = "update-button";
    pub const CANCEL_BUTTON: &str = "cancel-button";
    pub const NOTICE: &str = "notice";
    pub const NOTICE_ERROR: &str = "notice--error";
    pub const NOTICE_INFO: &str = "notice--info";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(&class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for the element with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.id.as_deref() == Some(id) {
            return Some(el);
        }
        el.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// All elements carrying `class`, in document order.
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if el.has_class(class) {
                found.push(el);
            }
            for child in &el.children {
                child.collect_by_class(class, found);
            }
        }
    }
}

/// Values typed into the add or edit row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Which input of a form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    EventName,
    StartDate,
    EndDate,
}

impl Draft {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::EventName => self.event_name = value,
            Field::StartDate => self.start_date = value,
            Field::EndDate => self.end_date = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::EventName => &self.event_name,
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
        }
    }
}

impl From<&Event> for Draft {
    fn from(event: &Event) -> Self {
        Draft {
            event_name: event.event_name.clone(),
            start_date: event.start_date.clone(),
            end_date: event.end_date.clone(),
        }
    }
}

impl From<Draft> for NewEvent {
    fn from(draft: Draft) -> Self {
        NewEvent::new(draft.event_name, draft.start_date, draft.end_date)
    }
}

impl From<Draft> for EventPatch {
    fn from(draft: Draft) -> Self {
        NewEvent::from(draft).into()
    }
}

/// An editable row shown alongside the table.
#[derive(Debug, Clone, Copy)]
pub enum FormRow<'a> {
    /// Blank row for a record that does not exist yet.
    New(&'a Draft),
    /// Replaces the row of an existing record.
    Edit(EventId, &'a Draft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// The whole page: notice, add button and table.
pub fn app(events: &[Event], form: Option<FormRow<'_>>, notice: Option<&Notice>) -> Node {
    let mut root = Element::new("div").id(ids::APP);

    if let Some(notice) = notice {
        let modifier = match notice.kind {
            NoticeKind::Info => classes::NOTICE_INFO,
            NoticeKind::Error => classes::NOTICE_ERROR,
        };
        root = root.child(
            Element::new("div")
                .class(classes::NOTICE)
                .class(modifier)
                .text(&notice.message),
        );
    }

    let add_button = Element::new("button").id(ids::ADD_BUTTON).text("ADD NEW");

    let mut body = table_body();
    for event in events {
        let row = match form {
            Some(FormRow::Edit(id, draft)) if id == event.id => edit_row(id, draft),
            _ => event_row(event),
        };
        body = body.child(row);
    }
    if let Some(FormRow::New(draft)) = form {
        body = body.child(new_row(draft));
    }

    let table = Element::new("table")
        .id(ids::TABLE)
        .child(table_head())
        .child(body);

    root.child(add_button).child(table).into()
}

/// Table body with one row per event, in the given order.
pub fn render_events(events: &[Event]) -> Node {
    events
        .iter()
        .fold(table_body(), |body, event| body.child(event_row(event)))
        .into()
}

/// Read-only row for one event, tagged with the event's id.
pub fn event_row(event: &Event) -> Element {
    let actions = Element::new("div")
        .class(classes::EVENT_ACTIONS)
        .child(Element::new("button").class(classes::EDIT_BUTTON).text("EDIT"))
        .child(Element::new("button").class(classes::DELETE_BUTTON).text("DELETE"));

    Element::new("tr")
        .class(classes::EVENT)
        .id(event.id.to_string())
        .child(Element::new("td").class(classes::EVENT_NAME).text(&event.event_name))
        .child(Element::new("td").class(classes::EVENT_START).text(&event.start_date))
        .child(Element::new("td").class(classes::EVENT_END).text(&event.end_date))
        .child(Element::new("td").child(actions))
}

/// Blank editable row for composing a new event.
pub fn new_event_row() -> Element {
    new_row(&Draft::default())
}

/// Editable row for an existing event, prefilled with its values.
pub fn edit_event_row(event: &Event) -> Element {
    edit_row(event.id, &Draft::from(event))
}

fn new_row(draft: &Draft) -> Element {
    let actions = Element::new("div")
        .class(classes::NEW_EVENT_ACTIONS)
        .child(Element::new("button").class(classes::POST_BUTTON).text("+"))
        .child(Element::new("button").class(classes::CANCEL_BUTTON).text("X"));

    input_cells(Element::new("tr").class(classes::EVENT), draft)
        .child(Element::new("td").child(actions))
}

fn edit_row(id: EventId, draft: &Draft) -> Element {
    let actions = Element::new("div")
        .class(classes::EDIT_EVENT_ACTIONS)
        .child(Element::new("button").class(classes::UPDATE_BUTTON).text("DONE"))
        .child(Element::new("button").class(classes::CANCEL_BUTTON).text("CANCEL"));

    input_cells(Element::new("tr").class(classes::EVENT).id(id.to_string()), draft)
        .child(Element::new("td").child(actions))
}

fn input_cells(row: Element, draft: &Draft) -> Element {
    row.child(
        Element::new("td")
            .class(classes::EVENT_NAME)
            .child(input(classes::NAME_INPUT, "text", &draft.event_name)),
    )
    .child(
        Element::new("td")
            .class(classes::EVENT_START)
            .child(input(classes::START_INPUT, "date", &draft.start_date)),
    )
    .child(
        Element::new("td")
            .class(classes::EVENT_END)
            .child(input(classes::END_INPUT, "date", &draft.end_date)),
    )
}

fn input(class: &'static str, kind: &str, value: &str) -> Element {
    let el = Element::new("input").class(class).attr("type", kind);
    if value.is_empty() {
        el
    } else {
        el.attr("value", value)
    }
}

fn table_head() -> Element {
    let row = ["Event", "Start", "End", "Actions"]
        .into_iter()
        .fold(Element::new("tr"), |row, label| {
            row.child(Element::new("th").text(label))
        });
    Element::new("thead").child(row)
}

fn table_body() -> Element {
    Element::new("tbody").id(ids::TABLE_BODY)
}
