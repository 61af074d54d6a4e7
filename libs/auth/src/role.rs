use serde::{Deserialize, Serialize};

/// Closed classification of an account. Assigned at registration and never
/// reassigned afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "PATIENT")]
    Patient,
    #[serde(rename = "DOCTOR")]
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Doctor => "DOCTOR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PATIENT" => Some(Role::Patient),
            "DOCTOR" => Some(Role::Doctor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_round_trips() {
        assert_eq!(Role::parse("PATIENT"), Some(Role::Patient));
        assert_eq!(Role::parse("DOCTOR"), Some(Role::Doctor));
        assert_eq!(Role::parse("ADMIN"), None);
        assert_eq!(Role::Doctor.as_str(), "DOCTOR");
    }
}
