//! Form state and per-entity table/form bindings.
//!
//! `ResourceManager` is generic over the entity; this module supplies the
//! remaining per-entity surface the UI needs — column headers, row cells,
//! and the mapping between text form fields and the typed draft — so the
//! admin screen stays one generic implementation instead of four copies.

use campus_client::refdata::ReferenceData;
use campus_core::{
  class_room::ClassRoom,
  educator::Educator,
  patch::{Attachment, ImagePatch, Patch},
  resource::Resource,
  student::Student,
  subject::Subject,
};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

// ─── Form state ───────────────────────────────────────────────────────────────

pub struct Field {
  pub label:  &'static str,
  pub value:  String,
  /// Rendered masked (password input).
  pub secret: bool,
}

/// A flat text form: one focused line per editable field.
pub struct FormState {
  pub title:  String,
  pub fields: Vec<Field>,
  pub focus:  usize,
}

impl FormState {
  pub fn new(title: impl Into<String>) -> Self {
    Self { title: title.into(), fields: Vec::new(), focus: 0 }
  }

  pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
    self.fields.push(Field { label, value: value.into(), secret: false });
    self
  }

  pub fn secret_field(mut self, label: &'static str) -> Self {
    self.fields.push(Field { label, value: String::new(), secret: true });
    self
  }

  pub fn value(&self, label: &str) -> &str {
    self
      .fields
      .iter()
      .find(|f| f.label == label)
      .map(|f| f.value.as_str())
      .unwrap_or_default()
  }

  /// Handle focus movement and text editing. Returns `false` for keys
  /// the form does not consume (Enter, Esc).
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Tab | KeyCode::Down => {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
        true
      }
      KeyCode::BackTab | KeyCode::Up => {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
        true
      }
      KeyCode::Backspace => {
        if let Some(field) = self.fields.get_mut(self.focus) {
          field.value.pop();
        }
        true
      }
      KeyCode::Char(c) => {
        if let Some(field) = self.fields.get_mut(self.focus) {
          field.value.push(c);
        }
        true
      }
      _ => false,
    }
  }
}

// ─── Parse helpers ────────────────────────────────────────────────────────────

fn opt(value: &str) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn parse_date(label: &str, value: &str) -> Result<Option<NaiveDate>, String> {
  match opt(value) {
    None => Ok(None),
    Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
      .map(Some)
      .map_err(|_| format!("{label}: expected YYYY-MM-DD")),
  }
}

fn parse_id(label: &str, value: &str) -> Result<Option<i64>, String> {
  match opt(value) {
    None => Ok(None),
    Some(raw) => raw.parse().map(Some).map_err(|_| format!("{label}: expected a numeric id")),
  }
}

fn parse_ids(label: &str, value: &str) -> Result<Vec<i64>, String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| s.parse().map_err(|_| format!("{label}: expected comma-separated ids")))
    .collect()
}

fn parse_number(label: &str, value: &str) -> Result<Option<u32>, String> {
  match opt(value) {
    None => Ok(None),
    Some(raw) => raw.parse().map(Some).map_err(|_| format!("{label}: expected a number")),
  }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
  date.map(|d| d.to_string()).unwrap_or_default()
}

fn fmt_id(id: Option<i64>) -> String {
  id.map(|i| i.to_string()).unwrap_or_default()
}

fn fmt_ids(ids: &[i64]) -> String {
  ids.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
}

/// Interpret the image field: empty keeps the stored image, `-` clears
/// it, anything else is read as a local file path to upload.
fn parse_image(value: &str) -> Result<ImagePatch, String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(ImagePatch::Keep);
  }
  if trimmed == "-" {
    return Ok(ImagePatch::Clear);
  }

  let bytes = std::fs::read(trimmed).map_err(|e| format!("image {trimmed}: {e}"))?;
  let file_name = std::path::Path::new(trimmed)
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| "profile".to_owned());
  let content_type = match trimmed.rsplit('.').next() {
    Some("png") => "image/png",
    Some("gif") => "image/gif",
    _ => "image/jpeg",
  };
  Ok(ImagePatch::Upload(Attachment {
    file_name,
    content_type: content_type.to_owned(),
    bytes,
  }))
}

fn patch_password(value: &str) -> Patch<String> {
  Patch::from_input(value.trim())
}

// ─── Binding trait ────────────────────────────────────────────────────────────

/// Per-entity presentation: columns, cells, and form ↔ draft mapping.
pub trait Managed: Resource {
  const TITLE: &'static str;

  fn columns() -> &'static [&'static str];
  fn cells(row: &Self, refdata: &ReferenceData) -> Vec<String>;

  fn form(title: &str, draft: &Self::Draft) -> FormState;
  fn apply_form(form: &FormState, draft: &mut Self::Draft) -> Result<(), String>;

  /// Label/value pairs for the read-only detail modal.
  fn detail_lines(detail: &Self::Detail, refdata: &ReferenceData) -> Vec<(String, String)>;
}

// ─── Students ─────────────────────────────────────────────────────────────────

impl Managed for Student {
  const TITLE: &'static str = "Students";

  fn columns() -> &'static [&'static str] {
    &["Id", "Username", "Name", "Email", "Grade", "Image"]
  }

  fn cells(row: &Self, _refdata: &ReferenceData) -> Vec<String> {
    vec![
      row.id.to_string(),
      row.username.clone(),
      format!("{} {}", row.first_name, row.last_name),
      row.email.clone(),
      row.grade.clone().unwrap_or_else(|| "—".into()),
      if row.profile_image_url.is_some() { "yes" } else { "—" }.into(),
    ]
  }

  fn form(title: &str, draft: &Self::Draft) -> FormState {
    FormState::new(title)
      .field("Username", &draft.username)
      .field("Email", &draft.email)
      .secret_field("Password")
      .field("First name", &draft.first_name)
      .field("Last name", &draft.last_name)
      .field("Date of birth", fmt_date(draft.date_of_birth))
      .field("Gender", draft.gender.clone().unwrap_or_default())
      .field("Phone", draft.phone_number.clone().unwrap_or_default())
      .field("Address", draft.address.clone().unwrap_or_default())
      .field("Grade", draft.grade.clone().unwrap_or_default())
      .field("Class id", fmt_id(draft.class_id))
      .field("Subject ids", fmt_ids(&draft.subject_ids))
      .field("Image (path, - clears)", "")
  }

  fn apply_form(form: &FormState, draft: &mut Self::Draft) -> Result<(), String> {
    draft.username = form.value("Username").trim().to_owned();
    draft.email = form.value("Email").trim().to_owned();
    draft.password = patch_password(form.value("Password"));
    draft.first_name = form.value("First name").trim().to_owned();
    draft.last_name = form.value("Last name").trim().to_owned();
    draft.date_of_birth = parse_date("Date of birth", form.value("Date of birth"))?;
    draft.gender = opt(form.value("Gender"));
    draft.phone_number = opt(form.value("Phone"));
    draft.address = opt(form.value("Address"));
    draft.grade = opt(form.value("Grade"));
    draft.class_id = parse_id("Class id", form.value("Class id"))?;
    draft.subject_ids = parse_ids("Subject ids", form.value("Subject ids"))?;
    draft.image = parse_image(form.value("Image (path, - clears)"))?;
    Ok(())
  }

  fn detail_lines(detail: &Self::Detail, refdata: &ReferenceData) -> Vec<(String, String)> {
    vec![
      ("Username".into(), detail.username.clone()),
      ("Name".into(), format!("{} {}", detail.first_name, detail.last_name)),
      ("Email".into(), detail.email.clone()),
      ("Date of birth".into(), fmt_date(detail.date_of_birth)),
      ("Gender".into(), detail.gender.clone().unwrap_or_default()),
      ("Phone".into(), detail.phone_number.clone().unwrap_or_default()),
      ("Address".into(), detail.address.clone().unwrap_or_default()),
      ("Grade".into(), detail.grade.clone().unwrap_or_default()),
      ("Enrolled".into(), fmt_date(detail.enrollment_date)),
      (
        "Class".into(),
        detail
          .class_id
          .and_then(|id| refdata.class_label(id))
          .unwrap_or_else(|| "none".into()),
      ),
      (
        "Subjects".into(),
        detail
          .subject_ids
          .iter()
          .map(|&id| refdata.subject_label(id).unwrap_or_else(|| format!("#{id}")))
          .collect::<Vec<_>>()
          .join(", "),
      ),
      (
        "Image".into(),
        detail.profile_image_url.clone().unwrap_or_else(|| "none".into()),
      ),
    ]
  }
}

// ─── Educators ────────────────────────────────────────────────────────────────

impl Managed for Educator {
  const TITLE: &'static str = "Educators";

  fn columns() -> &'static [&'static str] {
    &["Id", "Username", "Name", "Email", "Qualification", "Image"]
  }

  fn cells(row: &Self, _refdata: &ReferenceData) -> Vec<String> {
    vec![
      row.id.to_string(),
      row.username.clone(),
      format!("{} {}", row.first_name, row.last_name),
      row.email.clone(),
      row.qualification.clone().unwrap_or_else(|| "—".into()),
      if row.profile_image_url.is_some() { "yes" } else { "—" }.into(),
    ]
  }

  fn form(title: &str, draft: &Self::Draft) -> FormState {
    FormState::new(title)
      .field("Username", &draft.username)
      .field("Email", &draft.email)
      .secret_field("Password")
      .field("First name", &draft.first_name)
      .field("Last name", &draft.last_name)
      .field("Date of birth", fmt_date(draft.date_of_birth))
      .field("Gender", draft.gender.clone().unwrap_or_default())
      .field("Phone", draft.phone_number.clone().unwrap_or_default())
      .field("Address", draft.address.clone().unwrap_or_default())
      .field("Hire date", fmt_date(draft.hire_date))
      .field("Qualification", draft.qualification.clone().unwrap_or_default())
      .field(
        "Experience (years)",
        draft.experience_years.map(|y| y.to_string()).unwrap_or_default(),
      )
      .field("Class ids", fmt_ids(&draft.class_ids))
      .field("Subject id", fmt_id(draft.subject_id))
      .field("Image (path, - clears)", "")
  }

  fn apply_form(form: &FormState, draft: &mut Self::Draft) -> Result<(), String> {
    draft.username = form.value("Username").trim().to_owned();
    draft.email = form.value("Email").trim().to_owned();
    draft.password = patch_password(form.value("Password"));
    draft.first_name = form.value("First name").trim().to_owned();
    draft.last_name = form.value("Last name").trim().to_owned();
    draft.date_of_birth = parse_date("Date of birth", form.value("Date of birth"))?;
    draft.gender = opt(form.value("Gender"));
    draft.phone_number = opt(form.value("Phone"));
    draft.address = opt(form.value("Address"));
    draft.hire_date = parse_date("Hire date", form.value("Hire date"))?;
    draft.qualification = opt(form.value("Qualification"));
    draft.experience_years = parse_number("Experience (years)", form.value("Experience (years)"))?;
    draft.class_ids = parse_ids("Class ids", form.value("Class ids"))?;
    draft.subject_id = parse_id("Subject id", form.value("Subject id"))?;
    draft.image = parse_image(form.value("Image (path, - clears)"))?;
    Ok(())
  }

  fn detail_lines(detail: &Self::Detail, refdata: &ReferenceData) -> Vec<(String, String)> {
    vec![
      ("Username".into(), detail.username.clone()),
      ("Name".into(), format!("{} {}", detail.first_name, detail.last_name)),
      ("Email".into(), detail.email.clone()),
      ("Hired".into(), fmt_date(detail.hire_date)),
      ("Qualification".into(), detail.qualification.clone().unwrap_or_default()),
      (
        "Experience".into(),
        detail
          .experience_years
          .map(|y| format!("{y} years"))
          .unwrap_or_default(),
      ),
      (
        "Classes".into(),
        detail
          .class_ids
          .iter()
          .map(|&id| refdata.class_label(id).unwrap_or_else(|| format!("#{id}")))
          .collect::<Vec<_>>()
          .join(", "),
      ),
      (
        "Subject".into(),
        detail
          .subject_id
          .and_then(|id| refdata.subject_label(id))
          .unwrap_or_else(|| "none".into()),
      ),
    ]
  }
}

// ─── Classes ──────────────────────────────────────────────────────────────────

impl Managed for ClassRoom {
  const TITLE: &'static str = "Classes";

  fn columns() -> &'static [&'static str] {
    &["Id", "Name", "Code", "Educator", "Description"]
  }

  fn cells(row: &Self, _refdata: &ReferenceData) -> Vec<String> {
    let educator = match (&row.educator_first_name, &row.educator_last_name) {
      (Some(first), Some(last)) => format!("{first} {last}"),
      _ => "unassigned".into(),
    };
    vec![
      row.id.to_string(),
      row.class_name.clone(),
      row.class_code.clone(),
      educator,
      row.description.clone().unwrap_or_default(),
    ]
  }

  fn form(title: &str, draft: &Self::Draft) -> FormState {
    FormState::new(title)
      .field("Class name", &draft.class_name)
      .field("Class code", &draft.class_code)
      .field("Description", draft.description.clone().unwrap_or_default())
      .field("Educator id", fmt_id(draft.educator_id))
  }

  fn apply_form(form: &FormState, draft: &mut Self::Draft) -> Result<(), String> {
    draft.class_name = form.value("Class name").trim().to_owned();
    draft.class_code = form.value("Class code").trim().to_owned();
    draft.description = opt(form.value("Description"));
    draft.educator_id = parse_id("Educator id", form.value("Educator id"))?;
    Ok(())
  }

  fn detail_lines(detail: &Self::Detail, refdata: &ReferenceData) -> Vec<(String, String)> {
    vec![
      ("Name".into(), detail.class_name.clone()),
      ("Code".into(), detail.class_code.clone()),
      ("Description".into(), detail.description.clone().unwrap_or_default()),
      (
        "Educator".into(),
        detail
          .educator_id
          .and_then(|id| refdata.educator_label(id))
          .unwrap_or_else(|| "unassigned".into()),
      ),
      (
        "Students".into(),
        format!("{} enrolled", detail.student_ids.len()),
      ),
    ]
  }
}

// ─── Subjects ─────────────────────────────────────────────────────────────────

impl Managed for Subject {
  const TITLE: &'static str = "Subjects";

  fn columns() -> &'static [&'static str] {
    &["Id", "Name", "Educators", "Students", "Description"]
  }

  fn cells(row: &Self, _refdata: &ReferenceData) -> Vec<String> {
    vec![
      row.id.to_string(),
      row.subject_name.clone(),
      row.educator_ids.len().to_string(),
      row.student_ids.len().to_string(),
      row.description.clone().unwrap_or_default(),
    ]
  }

  fn form(title: &str, draft: &Self::Draft) -> FormState {
    FormState::new(title)
      .field("Subject name", &draft.subject_name)
      .field("Description", draft.description.clone().unwrap_or_default())
      .field("Educator ids", fmt_ids(&draft.educator_ids))
      .field("Student ids", fmt_ids(&draft.student_ids))
  }

  fn apply_form(form: &FormState, draft: &mut Self::Draft) -> Result<(), String> {
    draft.subject_name = form.value("Subject name").trim().to_owned();
    draft.description = opt(form.value("Description"));
    draft.educator_ids = parse_ids("Educator ids", form.value("Educator ids"))?;
    draft.student_ids = parse_ids("Student ids", form.value("Student ids"))?;
    Ok(())
  }

  fn detail_lines(detail: &Self::Detail, refdata: &ReferenceData) -> Vec<(String, String)> {
    vec![
      ("Name".into(), detail.subject_name.clone()),
      ("Description".into(), detail.description.clone().unwrap_or_default()),
      (
        "Educators".into(),
        detail
          .educator_ids
          .iter()
          .map(|&id| refdata.educator_label(id).unwrap_or_else(|| format!("#{id}")))
          .collect::<Vec<_>>()
          .join(", "),
      ),
      (
        "Students".into(),
        detail
          .student_ids
          .iter()
          .map(|&id| refdata.student_label(id).unwrap_or_else(|| format!("#{id}")))
          .collect::<Vec<_>>()
          .join(", "),
      ),
    ]
  }
}

#[cfg(test)]
mod tests {
  use campus_core::student::StudentDraft;

  use super::*;

  #[test]
  fn student_form_round_trips_through_the_draft() {
    let mut draft = StudentDraft::default();
    let mut form = Student::form("Add student", &draft);
    for (label, value) in [
      ("Username", "jdoe"),
      ("Email", "j@x.edu"),
      ("Password", "pw123"),
      ("First name", "Jane"),
      ("Last name", "Doe"),
      ("Date of birth", "2008-04-12"),
      ("Class id", "3"),
      ("Subject ids", "1, 2, 5"),
    ] {
      let field = form.fields.iter_mut().find(|f| f.label == label).unwrap();
      field.value = value.into();
    }

    Student::apply_form(&form, &mut draft).unwrap();
    assert_eq!(draft.username, "jdoe");
    assert_eq!(draft.password, Patch::Set("pw123".into()));
    assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(2008, 4, 12));
    assert_eq!(draft.class_id, Some(3));
    assert_eq!(draft.subject_ids, vec![1, 2, 5]);
    assert_eq!(draft.image, ImagePatch::Keep);
  }

  #[test]
  fn bad_date_and_id_inputs_are_reported_by_field() {
    let mut draft = StudentDraft::default();
    let mut form = Student::form("Add student", &draft);
    form
      .fields
      .iter_mut()
      .find(|f| f.label == "Date of birth")
      .unwrap()
      .value = "12/04/2008".into();

    let err = Student::apply_form(&form, &mut draft).unwrap_err();
    assert!(err.contains("Date of birth"));
  }

  #[test]
  fn dash_in_image_field_means_clear() {
    assert_eq!(parse_image("-").unwrap(), ImagePatch::Clear);
    assert_eq!(parse_image("").unwrap(), ImagePatch::Keep);
  }

  #[test]
  fn blank_password_field_keeps_stored_password() {
    let mut draft = StudentDraft {
      username: "jdoe".into(),
      email: "j@x.edu".into(),
      first_name: "Jane".into(),
      last_name: "Doe".into(),
      ..Default::default()
    };
    let form = Student::form("Edit student", &draft);
    Student::apply_form(&form, &mut draft).unwrap();
    assert_eq!(draft.password, Patch::Keep);
  }
}
