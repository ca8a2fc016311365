use crate::models::User;

/// Who is signed in, for as long as the application runs.
///
/// Owned by the application root and handed by reference to the screens
/// that need a user; dropping it (sign out, restart) forgets the user.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = %user.id, username = %user.username, "signed in");
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}
