use super::{ServiceError, require_user};
use crate::domain::{Preferences, User, UserId, UserName};
use crate::store::Store;
use std::sync::Arc;

pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Registering a new user", skip(self))]
    pub fn register(&self, username: String) -> Result<User, ServiceError> {
        let username = UserName::parse(username).map_err(ServiceError::ValidationError)?;
        let user = self.store.create_user(&username)?;
        tracing::info!(user_id = user.id, "Registered user");
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> Result<User, ServiceError> {
        require_user(&*self.store, id)
    }

    pub fn find_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.store
            .find_user_by_username(username)?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} does not exist", username)))
    }

    /// Replaces the user's preferences wholesale; the lists behave as sets.
    #[tracing::instrument(
        name = "Updating a user's music preferences",
        skip(self, preferences),
        fields(
            genres = preferences.favorite_genres.len(),
            artists = preferences.favorite_artists.len(),
            moods = preferences.mood_preferences.len()
        )
    )]
    pub fn update_preferences(
        &self,
        id: UserId,
        preferences: Preferences,
    ) -> Result<User, ServiceError> {
        require_user(&*self.store, id)?;
        Ok(self
            .store
            .update_preferences(id, preferences.deduplicated())?)
    }
}
