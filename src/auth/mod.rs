use std::collections::HashSet;

/// Read-only catalog paths reachable by non-admin callers.
pub const READ_ONLY_PATHS: [&str; 5] = [
    "/movies",
    "/movies/search",
    "/movies/search_by_actor",
    "/actors",
    "/actors/movies",
];

/// Access level derived from the presented credential on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Unauthorized,
    Forbidden,
}

/// Static-token access policy.
///
/// A pure function of the credential, the requested path, the configured
/// admin token and the allowlist. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    admin_token: String,
    allowlist: HashSet<String>,
}

impl AccessPolicy {
    /// Policy with the catalog's read-only allowlist.
    pub fn new(admin_token: impl Into<String>) -> Self {
        Self::with_allowlist(admin_token, READ_ONLY_PATHS)
    }

    pub fn with_allowlist<I, P>(admin_token: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            admin_token: admin_token.into(),
            allowlist: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve the caller's role; `None` when no credential was presented.
    pub fn role_for(&self, credential: &str) -> Option<Role> {
        if credential.is_empty() {
            return None;
        }
        if credential == self.admin_token {
            Some(Role::Admin)
        } else {
            Some(Role::User)
        }
    }

    pub fn is_allowlisted(&self, path: &str) -> bool {
        self.allowlist.contains(path)
    }

    pub fn authorize(&self, credential: &str, path: &str) -> Decision {
        match self.role_for(credential) {
            None => Decision::Unauthorized,
            Some(Role::Admin) => Decision::Allow,
            Some(Role::User) if self.is_allowlisted(path) => Decision::Allow,
            Some(Role::User) => Decision::Forbidden,
        }
    }
}
