use super::navigation::{BuildQueryEditor, SelectAgentsEditor, SELECT_AGENTS_HINT_TEXT};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table};
use ratatui::Frame;

const EXPRESSION_PREVIEW_CHARS: usize = 96;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub field: String,
    pub value: Option<String>,
}

pub fn field_row(field: &str, value: Option<String>) -> FormRow {
    FormRow {
        field: field.to_string(),
        value,
    }
}

pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormViewModel {
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<FormRow>,
    pub selected: usize,
    pub notice: Option<String>,
    pub status_text: String,
    pub hint_text: String,
}

pub fn project_build_query_view_model(editor: &BuildQueryEditor) -> FormViewModel {
    let preview = editor.expression_preview();
    FormViewModel {
        title: "Add Filter Expression > Build Query".to_string(),
        subtitle: if preview.is_empty() {
            "Query: <empty>".to_string()
        } else {
            format!(
                "Query: {}",
                tail_for_display(&preview, EXPRESSION_PREVIEW_CHARS)
            )
        },
        rows: editor.rows(),
        selected: editor.selected(),
        notice: (!editor.has_filters()).then(|| "No available filters!".to_string()),
        status_text: editor.status_text().to_string(),
        hint_text: editor.hint_text().to_string(),
    }
}

pub fn project_select_agents_view_model(editor: &SelectAgentsEditor) -> FormViewModel {
    FormViewModel {
        title: "Add Filter Expression > Select Agents".to_string(),
        subtitle: "Choose the agents that should use this filter.".to_string(),
        rows: editor.rows(),
        selected: editor.selected(),
        notice: (!editor.has_agents()).then(|| "No available agents!".to_string()),
        status_text: editor.status_text().to_string(),
        hint_text: SELECT_AGENTS_HINT_TEXT.to_string(),
    }
}

pub(crate) fn draw_form(frame: &mut Frame<'_>, view_model: &FormViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view_model.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(view_model.subtitle.clone()),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let mut table_rows = Vec::with_capacity(view_model.rows.len() + 1);
    if let Some(notice) = &view_model.notice {
        table_rows.push(
            Row::new(vec![Cell::from(notice.clone()), Cell::from("")])
                .style(Style::default().fg(Color::Red)),
        );
    }
    for (idx, row) in view_model.rows.iter().enumerate() {
        let style = if idx == view_model.selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        table_rows.push(
            Row::new(vec![
                Cell::from(row.field.clone()),
                Cell::from(row.value.clone().unwrap_or_default()),
            ])
            .style(style),
        );
    }
    let table = Table::new(
        table_rows,
        [Constraint::Percentage(40), Constraint::Percentage(60)],
    )
    .column_spacing(2)
    .block(main_panel_block());
    frame.render_widget(table, chunks[1]);

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text.clone()),
        Line::from(Span::styled(
            format!("Status: {}", view_model.status_text),
            Style::default().fg(Color::Red),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(3, 3, 1, 1))
}
