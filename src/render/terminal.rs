use std::io::Write;

use chrono::NaiveDate;
use eventlist_core::EventListResult;
use owo_colors::{OwoColorize, Style};

use super::Renderer;
use crate::view::{Element, Node, classes, ids};

/// Prints the event table as aligned, colored text.
pub struct TerminalRenderer<W> {
    out: W,
    colored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Event,
    Adding,
    Editing,
}

struct Row {
    kind: RowKind,
    id: String,
    cells: [String; 3],
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer { out, colored: true }
    }

    /// Renderer that never emits ANSI escapes.
    pub fn plain(out: W) -> Self {
        TerminalRenderer {
            out,
            colored: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, tree: &Node) -> EventListResult<()> {
        let mut lines = Vec::new();

        for notice in tree.find_all_by_class(classes::NOTICE) {
            let style = if notice.has_class(classes::NOTICE_ERROR) {
                Style::new().red()
            } else {
                Style::new().cyan()
            };
            let text = Node::from(notice.clone()).text_content();
            lines.push(self.paint(&text, style));
        }

        let rows: Vec<Row> = match tree.find_by_id(ids::TABLE_BODY) {
            Some(body) => body.elements().map(read_row).collect(),
            None => tree.find_all_by_class(classes::EVENT).into_iter().map(read_row).collect(),
        };

        if rows.is_empty() {
            lines.push(self.paint("No events", Style::new().dimmed()));
        } else {
            lines.extend(self.table_lines(&rows));
        }

        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    fn table_lines(&self, rows: &[Row]) -> Vec<String> {
        let header = ["#", "Event", "Start", "End"];
        let mut widths = header.map(|h| h.chars().count());
        for row in rows {
            widths[0] = widths[0].max(row.id.chars().count());
            for (i, cell) in row.cells.iter().enumerate() {
                widths[i + 1] = widths[i + 1].max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        let header_line = pad_columns(&header.map(String::from), &widths);
        lines.push(self.paint(header_line.trim_end(), Style::new().bold()));

        for row in rows {
            let columns = [
                row.id.clone(),
                row.cells[0].clone(),
                row.cells[1].clone(),
                row.cells[2].clone(),
            ];
            let line = pad_columns(&columns, &widths);
            let line = line.trim_end();
            lines.push(match row.kind {
                RowKind::Event => line.to_string(),
                RowKind::Adding => format!("{}  {}", self.paint(line, Style::new().green()), self.paint("(new)", Style::new().dimmed())),
                RowKind::Editing => format!("{}  {}", self.paint(line, Style::new().yellow()), self.paint("(editing)", Style::new().dimmed())),
            });
        }

        lines
    }
}

fn pad_columns(columns: &[String; 4], widths: &[usize; 4]) -> String {
    columns
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
}

fn read_row(row: &Element) -> Row {
    let node = Node::from(row.clone());
    let kind = if !node.find_all_by_class(classes::POST_BUTTON).is_empty() {
        RowKind::Adding
    } else if !node.find_all_by_class(classes::UPDATE_BUTTON).is_empty() {
        RowKind::Editing
    } else {
        RowKind::Event
    };

    let cell = |class: &str, input_class: &str, is_date: bool| -> String {
        if let Some(input) = node.find_all_by_class(input_class).first() {
            return format!("[{}]", input.get_attr("value").unwrap_or(""));
        }
        let text = node
            .find_all_by_class(class)
            .first()
            .map(|td| Node::from((*td).clone()).text_content())
            .unwrap_or_default();
        if is_date { format_date(&text) } else { text }
    };

    Row {
        kind,
        id: row.id.clone().unwrap_or_else(|| "+".to_string()),
        cells: [
            cell(classes::EVENT_NAME, classes::NAME_INPUT, false),
            cell(classes::EVENT_START, classes::START_INPUT, true),
            cell(classes::EVENT_END, classes::END_INPUT, true),
        ],
    }
}

/// Show ISO dates as e.g. "Mon Jan 1 2024"; anything else verbatim.
fn format_date(text: &str) -> String {
    match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%a %b %-d %Y").to_string(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::event;
    use crate::view::{self, Draft, FormRow, Notice};
    use pretty_assertions::assert_eq;

    fn render_plain(tree: &Node) -> String {
        let mut renderer = TerminalRenderer::plain(Vec::new());
        renderer.render(tree).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-01"), "Mon Jan 1 2024");
        assert_eq!(format_date("next tuesday"), "next tuesday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_table_is_aligned() {
        let events = vec![
            event(1, "Standup", "2024-01-01", "2024-01-01"),
            event(12, "Quarterly planning", "2024-02-01", "later"),
        ];
        let out = render_plain(&view::app(&events, None, None));

        assert_eq!(
            out,
            "\
#   Event               Start           End
1   Standup             Mon Jan 1 2024  Mon Jan 1 2024
12  Quarterly planning  Thu Feb 1 2024  later
"
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_plain(&view::app(&[], None, None)), "No events\n");
    }

    #[test]
    fn test_form_rows_show_input_values() {
        let events = vec![event(1, "Standup", "2024-01-01", "2024-01-01")];
        let draft = Draft {
            event_name: "Demo".into(),
            ..Default::default()
        };
        let out = render_plain(&view::app(&events, Some(FormRow::New(&draft)), None));

        let last = out.lines().last().unwrap();
        assert!(last.starts_with("+"));
        assert!(last.contains("[Demo]"));
        assert!(last.ends_with("(new)"));

        let out = render_plain(&view::app(&events, Some(FormRow::Edit(events[0].id, &draft)), None));
        assert!(out.lines().nth(1).unwrap().ends_with("(editing)"));
    }

    #[test]
    fn test_notice_printed_first() {
        let out = render_plain(&view::app(&[], None, Some(&Notice::error("Could not delete event 3"))));
        assert_eq!(out, "Could not delete event 3\nNo events\n");
    }

    #[test]
    fn test_colored_output_contains_escapes() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&view::app(&[], None, None)).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains('\u{1b}'));
    }
}
