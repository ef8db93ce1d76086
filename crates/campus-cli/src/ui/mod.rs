//! TUI rendering — orchestrates all panes.

pub mod dashboards;
pub mod login;
pub mod pages;
pub mod table;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::Paragraph,
};

use crate::app::{App, Route};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.route {
    Route::Home | Route::About | Route::Contact | Route::Dashboard => {
      pages::draw(f, area, app);
    }
    Route::Login => login::draw(f, area, app),
    Route::AdminDashboard => dashboards::draw_admin(f, area, app),
    Route::EducatorDashboard => dashboards::draw_educator(f, area, app),
    Route::StudentDashboard => dashboards::draw_student(f, area, app),
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let left = Span::styled(
    format!(" campus — {}", app.route.title()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let badge = match app.client.session().role() {
    Some(role) => format!("{} [x] sign out ", role.label()),
    None => "signed out ".to_string(),
  };
  let right = Span::styled(badge, Style::default().fg(Color::DarkGray));

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = ratatui::text::Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let style = Style::default().fg(Color::DarkGray);
  f.render_widget(Paragraph::new(Span::styled(format!(" {}", app.status), style)), area);
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// A centered modal rectangle within `area`.
pub fn modal_rect(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x:      area.x + (area.width - width) / 2,
    y:      area.y + (area.height - height) / 2,
    width,
    height,
  }
}
