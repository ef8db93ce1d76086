//! Static content routes and the generic dashboard landing page.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Route};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let lines: Vec<Line> = match app.route {
    Route::Home => vec![
      Line::from("Welcome to Campus."),
      Line::from(""),
      Line::from("Browse: [a] about  [c] contact  [l] sign in  [d] dashboard  [q] quit"),
    ],
    Route::About => vec![
      Line::from("Campus is a lightweight management console for students,"),
      Line::from("educators, classes, and subjects."),
      Line::from(""),
      Line::from("[h] home  [q] quit"),
    ],
    Route::Contact => vec![
      Line::from("Questions? Reach the registrar's office at registrar@campus.edu."),
      Line::from(""),
      Line::from("[h] home  [q] quit"),
    ],
    Route::Dashboard => vec![
      Line::from("You are signed in, but this account's role has no"),
      Line::from("dedicated dashboard."),
      Line::from(""),
      Line::from("[x] sign out  [h] home  [q] quit"),
    ],
    _ => Vec::new(),
  };

  let block = Block::default()
    .title(format!(" {} ", app.route.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    area,
  );
}
