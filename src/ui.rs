use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::app::{App, FormRow, StatusKind};
use crate::models::FieldRef;

const STATUS_DURATION_MS: u128 = 3000;
const LABEL_WIDTH: usize = 24;
const CURSOR: char = '|';
const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

pub fn render_app(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let content_area = layout[0];
    let status_area = layout[1];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(content_area);

    render_form(frame, app, horizontal[0]);
    render_preview(frame, app, horizontal[1]);
    render_status(frame, app, status_area);
}

fn render_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::bordered().title("Custom Script Creator");
    let inner = inner_rect(area);
    app.rows_area = inner;

    let rows = app.rows();
    let view_height = inner.height as usize;
    app.row_scroll = ensure_visible(app.row_scroll, app.active_row, rows.len(), view_height);

    let start = app.row_scroll;
    let end = (start + view_height).min(rows.len());
    let lines: Vec<Line> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(idx, row)| row_line(app, *row, start + idx == app.active_row))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn row_line(app: &App, row: FormRow, is_active: bool) -> Line<'static> {
    let selection = &app.selection;
    let (label, value, editable) = match row {
        FormRow::Name => {
            let mut value = selection.name().to_string();
            if is_active {
                value.push(CURSOR);
            }
            ("Script Name".to_string(), value, true)
        }
        FormRow::Archetype => (
            "Unity Class Type".to_string(),
            format!("< {} >", selection.archetype().label()),
            true,
        ),
        FormRow::Field(field) => {
            let editable = selection.is_editable(field);
            match field {
                FieldRef::Toggle(toggle_ref) => {
                    let (label, state) = selection
                        .toggle(toggle_ref)
                        .map(|toggle| (toggle.label, toggle.state))
                        .unwrap_or(("?", false));
                    let mark = if state { CHECKED } else { UNCHECKED };
                    (format!("  {label}"), mark.to_string(), editable)
                }
                FieldRef::Text(text_ref) => {
                    let mut value = selection.text(text_ref).to_string();
                    if is_active && editable {
                        value.push(CURSOR);
                    }
                    (format!("  {}", text_ref.label()), value, editable)
                }
            }
        }
    };

    let mut style = if editable {
        Style::new()
    } else {
        Style::new().fg(Color::DarkGray)
    };
    if is_active {
        style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(format!("{label:<LABEL_WIDTH$}"), style),
        Span::styled(value, style),
    ])
}

fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("Preview: {}.cs", app.selection.name());
    let paragraph = Paragraph::new(expand_tabs(app.selection.generated()))
        .block(Block::bordered().title(title))
        .scroll((app.preview_scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut status =
        "Enter create  Esc close  Tab/↑↓ move  ←→ class  Space toggle  Ctrl+C copy".to_string();
    let mut style = Style::new().fg(Color::DarkGray);
    if let Some(message) = app
        .status
        .as_ref()
        .filter(|msg| msg.since.elapsed().as_millis() <= STATUS_DURATION_MS)
    {
        status.push_str("  |  ");
        status.push_str(&message.text);
        style = match message.kind {
            StatusKind::Info => style,
            StatusKind::Warning => Style::new().fg(Color::Yellow),
            StatusKind::Error => Style::new().fg(Color::Red),
        };
    }
    frame.render_widget(Paragraph::new(status).style(style), area);
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', "    ")
}

fn inner_rect(area: Rect) -> Rect {
    let mut inner = area;
    if inner.width >= 2 {
        inner.x += 1;
        inner.width -= 2;
    }
    if inner.height >= 2 {
        inner.y += 1;
        inner.height -= 2;
    }
    inner
}

fn ensure_visible(current_scroll: usize, selected: usize, total: usize, view_height: usize) -> usize {
    if total == 0 || view_height == 0 {
        return 0;
    }
    let mut scroll = current_scroll.min(total.saturating_sub(1));
    if selected < scroll {
        scroll = selected;
    } else if selected >= scroll + view_height {
        scroll = selected + 1 - view_height;
    }
    scroll
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_follows_selection() {
        assert_eq!(ensure_visible(0, 0, 10, 4), 0);
        assert_eq!(ensure_visible(0, 5, 10, 4), 2);
        assert_eq!(ensure_visible(6, 3, 10, 4), 3);
        assert_eq!(ensure_visible(3, 3, 0, 4), 0);
    }

    #[test]
    fn tabs_render_as_spaces() {
        assert_eq!(expand_tabs("\tvoid Start()"), "    void Start()");
    }
}
