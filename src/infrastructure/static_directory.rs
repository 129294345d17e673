use crate::domain::credentials::{Credential, UserDirectory};

/// Read-only user list loaded once at start-up.
#[derive(Debug, Default, Clone)]
pub struct StaticUserDirectory {
    users: Vec<Credential>,
}

impl StaticUserDirectory {
    pub fn new(users: Vec<Credential>) -> Self { Self { users } }

    pub fn is_empty(&self) -> bool { self.users.is_empty() }
}

impl UserDirectory for StaticUserDirectory {
    fn lookup(&self, username: &str) -> Option<&Credential> { self.users.iter().find(|u| u.username == username) }
}
