//! Generic managed-table rendering: paged rows, pagination footer, and
//! the three modal overlays (form, detail view, delete confirmation).

use campus_client::{ApiClient, Modal, ResourceManager, refdata::ReferenceData};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

use crate::bind::{FormState, Managed};

/// Render one manager's table plus any open modal into `area`.
pub fn draw<R: Managed>(
  f: &mut Frame,
  area: Rect,
  mgr: &ResourceManager<R, ApiClient>,
  refdata: &ReferenceData,
  form: Option<&FormState>,
) {
  let rows_area = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Min(0),    // table
      Constraint::Length(1), // pagination footer
      Constraint::Length(1), // inline error
    ])
    .split(area);

  draw_rows(f, rows_area[0], mgr, refdata);
  draw_footer(f, rows_area[1], mgr);
  draw_error(f, rows_area[2], mgr);

  match (form, mgr.modal()) {
    (Some(state), _) => draw_form(f, area, state),
    (None, Some(Modal::View { detail })) => draw_detail::<R>(f, area, detail, refdata),
    (None, Some(Modal::ConfirmDelete { label, .. })) => draw_confirm(f, area, label),
    _ => {}
  }
}

fn draw_rows<R: Managed>(
  f: &mut Frame,
  area: Rect,
  mgr: &ResourceManager<R, ApiClient>,
  refdata: &ReferenceData,
) {
  let title = if mgr.busy() {
    format!(" {} (loading…) ", R::TITLE)
  } else {
    format!(" {} ", R::TITLE)
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if mgr.loaded() && mgr.rows().is_empty() {
    let note = Paragraph::new(format!("No {} found.", R::TITLE.to_lowercase())).block(block);
    f.render_widget(note, area);
    return;
  }

  let header = Row::new(
    R::columns()
      .iter()
      .map(|c| Cell::from(Span::styled(*c, Style::default().add_modifier(Modifier::BOLD)))),
  );

  let rows = mgr.rows().iter().enumerate().map(|(i, row)| {
    let style = if i == mgr.cursor() {
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    Row::new(R::cells(row, refdata).into_iter().map(Cell::from)).style(style)
  });

  let widths = vec![Constraint::Ratio(1, R::columns().len() as u32); R::columns().len()];
  f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn draw_footer<R: Managed>(f: &mut Frame, area: Rect, mgr: &ResourceManager<R, ApiClient>) {
  let dim = Style::default().fg(Color::DarkGray);
  let active = Style::default().fg(Color::White);

  let footer = Line::from(vec![
    Span::styled(" [p] prev ", if mgr.can_prev() { active } else { dim }),
    Span::styled(
      format!("page {}/{}", mgr.page() + 1, mgr.total_pages().max(1)),
      dim,
    ),
    Span::styled(" [n] next ", if mgr.can_next() { active } else { dim }),
    Span::styled(
      "· [a]dd [e]dit [v]iew [d]elete [r]efresh [1-4] tab",
      dim,
    ),
  ]);
  f.render_widget(Paragraph::new(footer), area);
}

fn draw_error<R: Managed>(f: &mut Frame, area: Rect, mgr: &ResourceManager<R, ApiClient>) {
  if let Some(error) = mgr.error() {
    f.render_widget(
      Paragraph::new(Span::styled(
        format!(" {error}"),
        Style::default().fg(Color::Red),
      )),
      area,
    );
  }
}

// ─── Modals ───────────────────────────────────────────────────────────────────

fn draw_form(f: &mut Frame, area: Rect, state: &FormState) {
  let height = (state.fields.len() as u16 + 4).min(area.height);
  let rect = super::modal_rect(area, 60, height);
  f.render_widget(Clear, rect);

  let lines: Vec<Line> = state
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let focused = i == state.focus;
      let shown = if field.secret {
        "•".repeat(field.value.chars().count())
      } else {
        field.value.clone()
      };
      let style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      Line::from(vec![
        Span::styled(
          format!("{:>22}: ", field.label),
          Style::default().fg(Color::DarkGray),
        ),
        Span::styled(shown, style),
        Span::styled(if focused { "▌" } else { "" }, style),
      ])
    })
    .chain(std::iter::once(Line::from(Span::styled(
      " [Enter] save  [Esc] cancel  [Tab] next field",
      Style::default().fg(Color::DarkGray),
    ))))
    .collect();

  let block = Block::default()
    .title(format!(" {} ", state.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));
  f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_detail<R: Managed>(
  f: &mut Frame,
  area: Rect,
  detail: &R::Detail,
  refdata: &ReferenceData,
) {
  let lines = R::detail_lines(detail, refdata);
  let height = (lines.len() as u16 + 3).min(area.height);
  let rect = super::modal_rect(area, 64, height);
  f.render_widget(Clear, rect);

  let text: Vec<Line> = lines
    .into_iter()
    .map(|(label, value)| {
      Line::from(vec![
        Span::styled(format!("{label:>14}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
      ])
    })
    .collect();

  let block = Block::default()
    .title(" Details ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));
  f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), rect);
}

fn draw_confirm(f: &mut Frame, area: Rect, label: &str) {
  let rect = super::modal_rect(area, 50, 5);
  f.render_widget(Clear, rect);

  let lines = vec![
    Line::from(format!("Delete {label}?")),
    Line::from(""),
    Line::from(Span::styled(
      "[y] delete  [n] keep",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  let block = Block::default()
    .title(" Confirm ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  f.render_widget(Paragraph::new(lines).block(block), rect);
}
