//! Role dashboards: admin's managed tables, the educator's class/roster
//! view, and the student's read-only overview.

use campus_core::{
  class_room::ClassRoom, educator::Educator, student::Student, subject::Subject,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::table;
use crate::{
  app::App,
  screens::admin::{AdminScreen, AdminTab},
  screens::educator::EducatorScreen,
  screens::student::StudentScreen,
};

// ─── Admin ────────────────────────────────────────────────────────────────────

pub fn draw_admin(f: &mut Frame, area: Rect, app: &App) {
  let Some(screen) = &app.admin else {
    f.render_widget(Paragraph::new("Loading…"), area);
    return;
  };

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(16), Constraint::Min(0)])
    .split(area);

  draw_admin_tabs(f, cols[0], screen);

  let form = screen.form.as_ref();
  match screen.tab {
    AdminTab::Students => {
      table::draw::<Student>(f, cols[1], &screen.students, &screen.refdata, form)
    }
    AdminTab::Educators => {
      table::draw::<Educator>(f, cols[1], &screen.educators, &screen.refdata, form)
    }
    AdminTab::Classes => {
      table::draw::<ClassRoom>(f, cols[1], &screen.classes, &screen.refdata, form)
    }
    AdminTab::Subjects => {
      table::draw::<Subject>(f, cols[1], &screen.subjects, &screen.refdata, form)
    }
  }
}

fn draw_admin_tabs(f: &mut Frame, area: Rect, screen: &AdminScreen) {
  let items: Vec<ListItem> = AdminTab::ALL
    .iter()
    .enumerate()
    .map(|(i, tab)| {
      let style = if *tab == screen.tab {
        Style::default()
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      ListItem::new(Span::styled(format!(" {} {}", i + 1, tab.title()), style))
    })
    .collect();

  let block = Block::default()
    .title(" Manage ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(List::new(items).block(block), area);
}

// ─── Educator ─────────────────────────────────────────────────────────────────

pub fn draw_educator(f: &mut Frame, area: Rect, app: &App) {
  let Some(screen) = &app.educator else {
    f.render_widget(Paragraph::new("Loading…"), area);
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(4), // profile strip
      Constraint::Length(4), // taught classes
      Constraint::Min(0),    // roster
      Constraint::Length(1), // error line
    ])
    .split(area);

  draw_educator_profile(f, rows[0], screen);
  draw_educator_classes(f, rows[1], screen);
  draw_educator_roster(f, rows[2], screen);
  draw_error_line(f, rows[3], screen.error.as_deref());

  if let Some(form) = &screen.feedback {
    draw_feedback_form(f, area, form);
  } else if let Some(detail) = &screen.detail {
    draw_student_detail(f, area, detail);
  }
}

fn draw_educator_profile(f: &mut Frame, area: Rect, screen: &EducatorScreen) {
  let lines = match &screen.profile {
    Some(p) => vec![
      Line::from(Span::styled(
        format!("{} {}", p.first_name, p.last_name),
        Style::default().add_modifier(Modifier::BOLD),
      )),
      Line::from(format!(
        "{} · {}",
        p.email,
        p.qualification.as_deref().unwrap_or("no qualification on file"),
      )),
    ],
    None => vec![Line::from("Profile unavailable.")],
  };
  let block = Block::default()
    .title(" Profile ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_educator_classes(f: &mut Frame, area: Rect, screen: &EducatorScreen) {
  let line = if screen.classes.is_empty() {
    Line::from("No classes assigned.")
  } else {
    let mut spans = Vec::new();
    for (i, class) in screen.classes.iter().enumerate() {
      let style = if i == screen.selected_class {
        Style::default()
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      spans.push(Span::styled(
        format!(" {} ({}) ", class.class_name, class.class_code),
        style,
      ));
    }
    Line::from(spans)
  };

  let block = Block::default()
    .title(" Classes — [Tab] switch ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(Paragraph::new(vec![line]).block(block), area);
}

fn draw_educator_roster(f: &mut Frame, area: Rect, screen: &EducatorScreen) {
  let title = if screen.busy {
    " Roster (loading…) ".to_string()
  } else {
    format!(
      " Roster — page {}/{} · [n/p] page [v]iew [f]eedback ",
      screen.roster_page + 1,
      screen.roster_pages.max(1),
    )
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if screen.roster.is_empty() {
    f.render_widget(Paragraph::new("No students in this class.").block(block), area);
    return;
  }

  let items: Vec<ListItem> = screen
    .roster
    .iter()
    .enumerate()
    .map(|(i, student)| {
      let style = if i == screen.roster_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      ListItem::new(Span::styled(
        format!(
          " {:<16} {} {} · grade {}",
          student.username,
          student.first_name,
          student.last_name,
          student.grade.as_deref().unwrap_or("-"),
        ),
        style,
      ))
    })
    .collect();
  f.render_widget(List::new(items).block(block), area);
}

fn draw_feedback_form(f: &mut Frame, area: Rect, form: &crate::screens::educator::FeedbackForm) {
  let rect = super::modal_rect(area, 60, 12);
  f.render_widget(Clear, rect);

  let stars = match form.rating {
    Some(r) => stars(r),
    None => "unrated (↑/↓ to set)".to_string(),
  };

  let mut lines = vec![
    Line::from(Span::styled(
      format!("For {} {}", form.student.first_name, form.student.last_name),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(vec![
      Span::styled("Rating: ", Style::default().fg(Color::DarkGray)),
      Span::raw(stars),
    ]),
    Line::from(vec![
      Span::styled("Text: ", Style::default().fg(Color::DarkGray)),
      Span::raw(form.text.clone()),
      Span::styled("▌", Style::default().fg(Color::White)),
    ]),
  ];
  if form.existing.len() > 1 {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      format!("{} earlier entries on file", form.existing.len() - 1),
      Style::default().fg(Color::DarkGray),
    )));
  }
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "[Enter] submit  [Esc] cancel",
    Style::default().fg(Color::DarkGray),
  )));

  let block = Block::default()
    .title(" Feedback ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));
  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    rect,
  );
}

fn draw_student_detail(f: &mut Frame, area: Rect, detail: &campus_core::student::StudentDetail) {
  let rect = super::modal_rect(area, 60, 12);
  f.render_widget(Clear, rect);

  let field = |label: &str, value: String| {
    Line::from(vec![
      Span::styled(format!("{label:>12}: "), Style::default().fg(Color::DarkGray)),
      Span::raw(value),
    ])
  };
  let lines = vec![
    field("Name", format!("{} {}", detail.first_name, detail.last_name)),
    field("Username", detail.username.clone()),
    field("Email", detail.email.clone()),
    field("Grade", detail.grade.clone().unwrap_or_default()),
    field("Phone", detail.phone_number.clone().unwrap_or_default()),
    field("Address", detail.address.clone().unwrap_or_default()),
    field(
      "Enrolled",
      detail
        .enrollment_date
        .map(|d| d.to_string())
        .unwrap_or_default(),
    ),
  ];

  let block = Block::default()
    .title(" Student ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));
  f.render_widget(Paragraph::new(lines).block(block), rect);
}

// ─── Student ──────────────────────────────────────────────────────────────────

pub fn draw_student(f: &mut Frame, area: Rect, app: &App) {
  let Some(screen) = &app.student else {
    f.render_widget(Paragraph::new("Loading…"), area);
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(6), // profile
      Constraint::Length(5), // enrolled classes
      Constraint::Min(0),    // feedback
      Constraint::Length(1), // error line
    ])
    .split(area);

  draw_student_profile(f, rows[0], screen);
  draw_student_classes(f, rows[1], screen);
  draw_student_feedback(f, rows[2], screen);
  draw_error_line(f, rows[3], screen.error.as_deref());
}

fn draw_student_profile(f: &mut Frame, area: Rect, screen: &StudentScreen) {
  let lines = match &screen.profile {
    Some(p) => vec![
      Line::from(Span::styled(
        format!("{} {}", p.first_name, p.last_name),
        Style::default().add_modifier(Modifier::BOLD),
      )),
      Line::from(p.email.clone()),
      Line::from(format!("Grade: {}", p.grade.as_deref().unwrap_or("-"))),
      Line::from(format!(
        "Enrolled: {}",
        p.enrollment_date
          .map(|d| d.to_string())
          .unwrap_or_else(|| "-".into()),
      )),
    ],
    None => vec![Line::from("Profile unavailable.")],
  };
  let block = Block::default()
    .title(" Profile ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_student_classes(f: &mut Frame, area: Rect, screen: &StudentScreen) {
  let block = Block::default()
    .title(" Enrolled classes ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if screen.classes.is_empty() {
    f.render_widget(
      Paragraph::new("Not assigned to a class yet.").block(block),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = screen
    .classes
    .iter()
    .map(|class| {
      let educator = match (&class.educator_first_name, &class.educator_last_name) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        _ => "unassigned".into(),
      };
      ListItem::new(format!(
        " {} ({}) · taught by {}",
        class.class_name, class.class_code, educator
      ))
    })
    .collect();
  f.render_widget(List::new(items).block(block), area);
}

fn draw_student_feedback(f: &mut Frame, area: Rect, screen: &StudentScreen) {
  let block = Block::default()
    .title(" Feedback received ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if screen.feedback.is_empty() {
    f.render_widget(Paragraph::new("No feedback yet.").block(block), area);
    return;
  }

  let items: Vec<ListItem> = screen
    .feedback
    .iter()
    .map(|fb| {
      let stars = fb.rating.map(stars).unwrap_or_default();
      let date = fb
        .feedback_date
        .map(|d| d.date().to_string())
        .unwrap_or_default();
      ListItem::new(vec![
        Line::from(vec![
          Span::styled(format!("{date} {stars} "), Style::default().fg(Color::DarkGray)),
          Span::raw(fb.feedback_text.clone()),
        ]),
      ])
    })
    .collect();
  f.render_widget(List::new(items).block(block), area);
}

// ─── Shared ───────────────────────────────────────────────────────────────────

/// Five-star bar for a rating. Ratings arrive from the server unvalidated,
/// so out-of-range values are clamped rather than trusted.
fn stars(rating: u8) -> String {
  let filled = (rating as usize).min(5);
  "★".repeat(filled) + &"☆".repeat(5 - filled)
}

fn draw_error_line(f: &mut Frame, area: Rect, error: Option<&str>) {
  if let Some(error) = error {
    f.render_widget(
      Paragraph::new(Span::styled(
        format!(" {error}"),
        Style::default().fg(Color::Red),
      )),
      area,
    );
  }
}
