//! Customer portal login form state.
//!
//! A placeholder: no credential check, no session, no I/O. `login` only
//! requires both fields to be filled in.

/// Two-field login form plus the resulting signed-in flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portal {
    pub username: String,
    pub password: String,
    logged_in: bool,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Mark the user signed in if both fields are non-empty. Returns the
    /// resulting flag; an incomplete form leaves the state unchanged.
    pub fn login(&mut self) -> bool {
        if !self.username.is_empty() && !self.password.is_empty() {
            self.logged_in = true;
        }
        self.logged_in
    }

    /// Sign out and clear both fields.
    pub fn logout(&mut self) {
        self.logged_in = false;
        self.username.clear();
        self.password.clear();
    }
}
