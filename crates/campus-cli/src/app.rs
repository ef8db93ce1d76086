//! Routes, the session/role gate, and top-level event dispatch.

use campus_client::ApiClient;
use campus_core::role::Role;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::screens::{admin::AdminScreen, educator::EducatorScreen, student::StudentScreen};

// ─── Routes ───────────────────────────────────────────────────────────────────

/// Client-side route surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Home,
  About,
  Contact,
  Login,
  /// Generic landing page for any authenticated role.
  Dashboard,
  AdminDashboard,
  EducatorDashboard,
  StudentDashboard,
}

impl Route {
  /// The role-set required to render this route. `None` means public;
  /// an empty slice means "any authenticated role".
  pub fn required_roles(&self) -> Option<&'static [Role]> {
    match self {
      Route::Home | Route::About | Route::Contact | Route::Login => None,
      Route::Dashboard => Some(&[]),
      Route::AdminDashboard => Some(&[Role::Admin]),
      Route::EducatorDashboard => Some(&[Role::Educator]),
      Route::StudentDashboard => Some(&[Role::Student]),
    }
  }

  /// The dashboard a role lands on after login.
  pub fn home_for(role: Role) -> Route {
    match role {
      Role::Admin => Route::AdminDashboard,
      Role::Educator => Route::EducatorDashboard,
      Role::Student => Route::StudentDashboard,
      Role::Unknown => Route::Dashboard,
    }
  }

  pub fn title(&self) -> &'static str {
    match self {
      Route::Home => "Home",
      Route::About => "About",
      Route::Contact => "Contact",
      Route::Login => "Sign in",
      Route::Dashboard => "Dashboard",
      Route::AdminDashboard => "Admin dashboard",
      Route::EducatorDashboard => "Educator dashboard",
      Route::StudentDashboard => "Student dashboard",
    }
  }
}

// ─── Session/role gate ────────────────────────────────────────────────────────

/// Decide what actually renders for a requested route.
///
/// Pure, synchronous, client-trust check: no network call validates the
/// token here. A forged or expired token passes the gate and is rejected
/// by the backend on the next request instead.
///
/// - no session on a gated route → the login route (replacing the
///   requested one, so "back" cannot loop),
/// - session present but role outside the required set → the generic
///   dashboard fallback,
/// - otherwise → the requested route.
pub fn resolve(requested: Route, session_role: Option<Role>) -> Route {
  let Some(required) = requested.required_roles() else {
    return requested;
  };
  let Some(role) = session_role else {
    return Route::Login;
  };
  if !required.is_empty() && !required.contains(&role) {
    return Route::Dashboard;
  }
  requested
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Which flow the login screen is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
  #[default]
  SignIn,
  /// Requesting a reset email for an address.
  ForgotPassword,
  /// Redeeming an emailed reset token.
  ResetPassword,
}

/// One-line input field state for the login form.
#[derive(Default)]
pub struct LoginForm {
  pub mode:         LoginMode,
  pub username:     String,
  pub password:     String,
  pub email:        String,
  pub token:        String,
  pub new_password: String,
  /// 0 = first field, 1 = second field of the active mode.
  pub focus:        usize,
  pub error:        Option<String>,
  /// Non-error server text, e.g. the reset-request acknowledgement.
  pub notice:       Option<String>,
  pub busy:         bool,
}

/// Top-level application state: the current route plus whichever screen
/// is mounted for it.
pub struct App {
  pub client:   ApiClient,
  pub route:    Route,
  pub login:    LoginForm,
  pub admin:    Option<AdminScreen>,
  pub educator: Option<EducatorScreen>,
  pub student:  Option<StudentScreen>,
  /// One-line status message shown in the status bar.
  pub status:   String,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      client,
      route: Route::Home,
      login: LoginForm::default(),
      admin: None,
      educator: None,
      student: None,
      status: String::new(),
    }
  }

  /// Navigate through the gate, mounting the destination screen if it is
  /// not already mounted.
  pub async fn navigate(&mut self, requested: Route) -> anyhow::Result<()> {
    let destination = resolve(requested, self.client.session().role());
    if destination != requested {
      tracing::debug!(?requested, ?destination, "gate redirect");
    }
    self.route = destination;

    match destination {
      Route::AdminDashboard => {
        if self.admin.is_none() {
          let mut screen = AdminScreen::new(&self.client).await;
          screen.refresh_active().await;
          self.admin = Some(screen);
        }
      }
      Route::EducatorDashboard => {
        if self.educator.is_none() {
          self.educator = Some(EducatorScreen::load(&self.client).await);
        }
      }
      Route::StudentDashboard => {
        if self.student.is_none() {
          self.student = Some(StudentScreen::load(&self.client).await);
        }
      }
      Route::Login => self.login = LoginForm::default(),
      _ => {}
    }
    Ok(())
  }

  /// Clear the session and land on the login route. Safe to trigger when
  /// already logged out.
  pub async fn logout(&mut self) -> anyhow::Result<()> {
    if let Err(e) = self.client.logout() {
      self.status = format!("Logout error: {e}");
    }
    // Unmount everything role-scoped; their state belongs to the session.
    self.admin = None;
    self.educator = None;
    self.student = None;
    self.navigate(Route::Login).await
  }

  // ── Key handling ──────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.route {
      Route::Login => self.handle_login_key(key).await,
      Route::AdminDashboard => self.handle_admin_key(key).await,
      Route::EducatorDashboard => self.handle_educator_key(key).await,
      Route::StudentDashboard => self.handle_student_key(key).await,
      _ => self.handle_public_key(key).await,
    }
  }

  async fn handle_public_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('h') => self.navigate(Route::Home).await?,
      KeyCode::Char('a') => self.navigate(Route::About).await?,
      KeyCode::Char('c') => self.navigate(Route::Contact).await?,
      KeyCode::Char('l') => self.navigate(Route::Login).await?,
      KeyCode::Char('d') => {
        // Through the gate: redirects to login when logged out, or to
        // the role's own dashboard when it has one.
        let target = match self.client.session().role() {
          Some(role) => Route::home_for(role),
          None => Route::Dashboard,
        };
        self.navigate(target).await?;
      }
      KeyCode::Char('x') => self.logout().await?,
      _ => {}
    }
    Ok(true)
  }

  async fn handle_login_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if self.login.busy {
      return Ok(true);
    }

    // Mode switches first: Ctrl-R cycles into the reset flow, Esc backs
    // out of it (and out of the login screen entirely from sign-in).
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
      self.login.mode = match self.login.mode {
        LoginMode::SignIn => LoginMode::ForgotPassword,
        LoginMode::ForgotPassword => LoginMode::ResetPassword,
        LoginMode::ResetPassword => LoginMode::SignIn,
      };
      self.login.focus = 0;
      self.login.error = None;
      return Ok(true);
    }
    if key.code == KeyCode::Esc {
      match self.login.mode {
        LoginMode::SignIn => self.navigate(Route::Home).await?,
        _ => {
          self.login.mode = LoginMode::SignIn;
          self.login.focus = 0;
          self.login.error = None;
        }
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
        // Two fields at most per mode, so forward and backward coincide.
        self.login.focus = (self.login.focus + 1) % 2;
      }
      KeyCode::Backspace => {
        self.login_field_mut().pop();
      }
      KeyCode::Char(c) => {
        self.login_field_mut().push(c);
      }
      KeyCode::Enter => match self.login.mode {
        LoginMode::SignIn => self.submit_login().await?,
        LoginMode::ForgotPassword => self.submit_reset_request().await,
        LoginMode::ResetPassword => self.submit_reset().await,
      },
      _ => {}
    }
    Ok(true)
  }

  /// The text field the cursor is in, given the mode and focus.
  fn login_field_mut(&mut self) -> &mut String {
    let form = &mut self.login;
    match (form.mode, form.focus) {
      (LoginMode::SignIn, 0) => &mut form.username,
      (LoginMode::SignIn, _) => &mut form.password,
      (LoginMode::ForgotPassword, _) => &mut form.email,
      (LoginMode::ResetPassword, 0) => &mut form.token,
      (LoginMode::ResetPassword, _) => &mut form.new_password,
    }
  }

  async fn submit_login(&mut self) -> anyhow::Result<()> {
    self.login.busy = true;
    let result = self
      .client
      .login(&self.login.username, &self.login.password)
      .await;
    self.login.busy = false;
    match result {
      Ok(session) => {
        self.login.error = None;
        self.status = format!("Signed in as {}", session.role.label());
        self.navigate(Route::home_for(session.role)).await?;
      }
      Err(e) => {
        self.login.error = Some(e.to_string());
      }
    }
    Ok(())
  }

  /// Ask the server for a reset email, then move on to token entry. The
  /// acknowledgement text is shown verbatim; it is the same whether or
  /// not the address is registered.
  async fn submit_reset_request(&mut self) {
    self.login.busy = true;
    let result = self.client.request_password_reset(&self.login.email).await;
    self.login.busy = false;
    match result {
      Ok(message) => {
        self.login.error = None;
        self.login.notice = Some(message);
        self.login.mode = LoginMode::ResetPassword;
        self.login.focus = 0;
      }
      Err(e) => {
        self.login.error = Some(e.to_string());
      }
    }
  }

  async fn submit_reset(&mut self) {
    self.login.busy = true;
    let result = self
      .client
      .reset_password(&self.login.token, &self.login.new_password)
      .await;
    self.login.busy = false;
    match result {
      Ok(()) => {
        self.login = LoginForm::default();
        self.status = "Password reset; sign in with the new password".into();
      }
      Err(e) => {
        self.login.error = Some(e.to_string());
      }
    }
  }

  async fn handle_admin_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.code == KeyCode::Char('x')
      && let Some(screen) = &self.admin
      && !screen.input_active()
    {
      self.logout().await?;
      return Ok(true);
    }
    if let Some(screen) = self.admin.as_mut() {
      return screen.handle_key(key).await;
    }
    Ok(true)
  }

  async fn handle_educator_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // The sign-out shortcut must not fire while a text input has focus;
    // an 'x' typed into the feedback form is form content.
    if key.code == KeyCode::Char('x')
      && let Some(screen) = &self.educator
      && !screen.input_active()
    {
      self.logout().await?;
      return Ok(true);
    }
    if let Some(screen) = self.educator.as_mut() {
      return screen.handle_key(key, &self.client).await;
    }
    Ok(true)
  }

  async fn handle_student_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('x') => self.logout().await?,
      _ => {}
    }
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Gate matrix from the route surface: every protected route against
  // every session state.

  #[test]
  fn unauthenticated_gated_routes_redirect_to_login() {
    for route in [
      Route::Dashboard,
      Route::AdminDashboard,
      Route::EducatorDashboard,
      Route::StudentDashboard,
    ] {
      assert_eq!(resolve(route, None), Route::Login);
    }
  }

  #[test]
  fn public_routes_render_regardless_of_session() {
    for route in [Route::Home, Route::About, Route::Contact, Route::Login] {
      assert_eq!(resolve(route, None), route);
      assert_eq!(resolve(route, Some(Role::Student)), route);
    }
  }

  #[test]
  fn wrong_role_falls_back_to_generic_dashboard() {
    // A student at /admin/dashboard lands on /dashboard.
    assert_eq!(resolve(Route::AdminDashboard, Some(Role::Student)), Route::Dashboard);
    assert_eq!(resolve(Route::StudentDashboard, Some(Role::Educator)), Route::Dashboard);
    assert_eq!(resolve(Route::EducatorDashboard, Some(Role::Admin)), Route::Dashboard);
    assert_eq!(resolve(Route::AdminDashboard, Some(Role::Unknown)), Route::Dashboard);
  }

  #[test]
  fn matching_role_renders_the_requested_route() {
    assert_eq!(resolve(Route::AdminDashboard, Some(Role::Admin)), Route::AdminDashboard);
    assert_eq!(
      resolve(Route::EducatorDashboard, Some(Role::Educator)),
      Route::EducatorDashboard
    );
    assert_eq!(
      resolve(Route::StudentDashboard, Some(Role::Student)),
      Route::StudentDashboard
    );
  }

  #[test]
  fn empty_role_set_admits_any_authenticated_role() {
    for role in [Role::Admin, Role::Educator, Role::Student, Role::Unknown] {
      assert_eq!(resolve(Route::Dashboard, Some(role)), Route::Dashboard);
    }
  }

  #[tokio::test]
  async fn logout_is_idempotent_and_lands_on_login() {
    use campus_client::{ApiConfig, SessionHandle};
    use campus_core::session::{Session, SessionStore};

    let session = SessionHandle::new(SessionStore::in_memory());
    session
      .set(Session { token: "tok".into(), role: Role::Admin })
      .unwrap();
    let client = ApiClient::new(
      ApiConfig { base_url: "http://localhost:8080".into() },
      session,
    )
    .unwrap();
    let mut app = App::new(client);

    app.logout().await.unwrap();
    assert_eq!(app.route, Route::Login);
    assert!(app.client.session().session().is_none());

    // Logging out again is a no-op, not an error.
    app.logout().await.unwrap();
    assert_eq!(app.route, Route::Login);
  }

  #[tokio::test]
  async fn typing_x_into_the_feedback_form_does_not_log_out() {
    use campus_client::{ApiConfig, SessionHandle};
    use campus_core::{
      session::{Session, SessionStore},
      student::Student,
    };

    use crate::screens::educator::{EducatorScreen, FeedbackForm};

    let session = SessionHandle::new(SessionStore::in_memory());
    session
      .set(Session { token: "tok".into(), role: Role::Educator })
      .unwrap();
    let client = ApiClient::new(
      ApiConfig { base_url: "http://localhost:8080".into() },
      session,
    )
    .unwrap();
    let mut app = App::new(client);
    app.route = Route::EducatorDashboard;

    let student = Student {
      id:                1,
      username:          "jdoe".into(),
      email:             "j@x.edu".into(),
      first_name:        "Jane".into(),
      last_name:         "Doe".into(),
      grade:             None,
      profile_image_url: None,
    };
    app.educator = Some(EducatorScreen {
      profile:        None,
      classes:        Vec::new(),
      selected_class: 0,
      roster:         Vec::new(),
      roster_page:    0,
      roster_pages:   0,
      roster_cursor:  0,
      detail:         None,
      feedback:       Some(FeedbackForm {
        student,
        text: "ma".into(),
        rating: None,
        existing: Vec::new(),
      }),
      error:          None,
      busy:           false,
    });

    // With the form open, 'x' is text, not the sign-out shortcut.
    app
      .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
      .await
      .unwrap();
    assert!(app.client.session().is_authenticated());
    assert_eq!(app.route, Route::EducatorDashboard);
    let screen = app.educator.as_ref().unwrap();
    assert_eq!(screen.feedback.as_ref().unwrap().text, "max");

    // With no input focused, the shortcut signs out as before.
    app.educator.as_mut().unwrap().feedback = None;
    app
      .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
      .await
      .unwrap();
    assert_eq!(app.route, Route::Login);
    assert!(!app.client.session().is_authenticated());
  }

  #[tokio::test]
  async fn ctrl_r_cycles_reset_modes_and_esc_returns_to_sign_in() {
    use campus_client::{ApiConfig, SessionHandle};
    use campus_core::session::SessionStore;

    let client = ApiClient::new(
      ApiConfig { base_url: "http://localhost:8080".into() },
      SessionHandle::new(SessionStore::in_memory()),
    )
    .unwrap();
    let mut app = App::new(client);
    app.navigate(Route::Login).await.unwrap();

    let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
    app.handle_key(ctrl_r).await.unwrap();
    assert_eq!(app.login.mode, LoginMode::ForgotPassword);
    app.handle_key(ctrl_r).await.unwrap();
    assert_eq!(app.login.mode, LoginMode::ResetPassword);

    app
      .handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
      .await
      .unwrap();
    assert_eq!(app.login.mode, LoginMode::SignIn);
    // Esc from sign-in leaves the login screen entirely.
    app
      .handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
      .await
      .unwrap();
    assert_eq!(app.route, Route::Home);
  }
}
