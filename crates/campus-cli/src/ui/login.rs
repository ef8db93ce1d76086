//! Login pane: sign-in form plus the forgot-password flow.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, LoginMode};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.login;
  let rect = super::modal_rect(area, 52, 12);

  let field_line = |label: &str, value: &str, focused: bool, secret: bool| {
    let shown = if secret { "•".repeat(value.chars().count()) } else { value.to_owned() };
    let style = if focused {
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    Line::from(vec![
      Span::styled(format!("{label:>14}: "), Style::default().fg(Color::DarkGray)),
      Span::styled(shown, style),
      Span::styled(if focused { "▌" } else { "" }, style),
    ])
  };
  let hint = |text: &str| {
    Line::from(Span::styled(text.to_owned(), Style::default().fg(Color::DarkGray)))
  };

  let (title, mut lines) = match form.mode {
    LoginMode::SignIn => (
      " Sign in ",
      vec![
        field_line("Username", &form.username, form.focus == 0, false),
        field_line("Password", &form.password, form.focus == 1, true),
        Line::from(""),
        hint(if form.busy {
          "Signing in…"
        } else {
          "[Enter] sign in  [Ctrl-R] forgot password  [Esc] back"
        }),
      ],
    ),
    LoginMode::ForgotPassword => (
      " Forgot password ",
      vec![
        field_line("Email", &form.email, true, false),
        Line::from(""),
        hint(if form.busy {
          "Requesting…"
        } else {
          "[Enter] request reset email  [Esc] back to sign in"
        }),
      ],
    ),
    LoginMode::ResetPassword => (
      " Reset password ",
      vec![
        field_line("Reset token", &form.token, form.focus == 0, false),
        field_line("New password", &form.new_password, form.focus == 1, true),
        Line::from(""),
        hint(if form.busy {
          "Resetting…"
        } else {
          "[Enter] reset  [Esc] back to sign in"
        }),
      ],
    ),
  };

  if let Some(notice) = &form.notice
    && form.mode != LoginMode::SignIn
  {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      notice.clone(),
      Style::default().fg(Color::Green),
    )));
  }
  if let Some(error) = &form.error {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      error.clone(),
      Style::default().fg(Color::Red),
    )));
  }

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));
  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    rect,
  );
}
