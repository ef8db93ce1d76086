//! Roles as the backend names them on the wire.

use serde::{Deserialize, Serialize};

/// Authorization role attached to a session.
///
/// The backend emits Spring-style discriminants (`ROLE_ADMIN`, …). Anything
/// it may add later deserializes to [`Role::Unknown`] instead of failing the
/// whole login response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
  #[serde(rename = "ROLE_ADMIN")]
  Admin,
  #[serde(rename = "ROLE_EDUCATOR")]
  Educator,
  #[serde(rename = "ROLE_STUDENT")]
  Student,
  #[serde(other)]
  Unknown,
}

impl Role {
  /// Display label for headers and the role badge.
  pub fn label(&self) -> &'static str {
    match self {
      Role::Admin => "Administrator",
      Role::Educator => "Educator",
      Role::Student => "Student",
      Role::Unknown => "Unknown",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn roles_round_trip_wire_names() {
    for (role, wire) in [
      (Role::Admin, "\"ROLE_ADMIN\""),
      (Role::Educator, "\"ROLE_EDUCATOR\""),
      (Role::Student, "\"ROLE_STUDENT\""),
    ] {
      assert_eq!(serde_json::to_string(&role).unwrap(), wire);
      assert_eq!(serde_json::from_str::<Role>(wire).unwrap(), role);
    }
  }

  #[test]
  fn unrecognised_role_becomes_unknown() {
    let role: Role = serde_json::from_str("\"ROLE_SUPERINTENDENT\"").unwrap();
    assert_eq!(role, Role::Unknown);
  }
}
