//! Principal roles and their session registry keys.

use std::fmt;

/// The three principal roles, each with an independent session namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Employer,
    Admin,
}

impl Role {
    /// The key namespace segment for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }

    /// Session registry key for a principal of this role.
    pub fn session_key(self, username: &str) -> String {
        format!("{}:token:{}", self.as_str(), username)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_formats() {
        assert_eq!(Role::User.session_key("andi"), "user:token:andi");
        assert_eq!(Role::Employer.session_key("acme"), "employer:token:acme");
        assert_eq!(Role::Admin.session_key("root"), "admin:token:root");
    }
}
