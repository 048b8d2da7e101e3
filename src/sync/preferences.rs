//! Preferences document, one per user, keyed by user id.

use super::{SyncAdapter, Subscription};
use crate::{
    auth::AuthProvider,
    document::{Document, from_body},
    errors::{Error, Result},
    models::Preferences,
    validation,
};
use tracing::info;

impl<A: AuthProvider> SyncAdapter<A> {
    /// The signed-in user's preferences, or the defaults if none were saved.
    pub async fn get_preferences(&self) -> Result<Preferences> {
        let user = self.auth().current_user().ok_or(Error::NotAuthenticated)?;
        let body = self
            .remote()
            .get(&user.uid, &user.uid, Preferences::COLLECTION, &user.uid)
            .await?;
        match body {
            Some(body) => from_body(user.uid, body),
            None => Ok(Preferences::defaults_for(user.uid)),
        }
    }

    /// Saves preferences for the signed-in user. The document is always keyed by the signed-in
    /// user's id, whatever `preferences.user_id` says.
    pub async fn set_preferences(&self, preferences: &Preferences) -> Result<()> {
        validation::required("colorTheme", &preferences.color_theme)?;
        let user = self.auth().current_user().ok_or(Error::NotAuthenticated)?;
        let record = Preferences {
            user_id: user.uid,
            ..preferences.clone()
        };
        self.set(&record).await?;
        info!(theme = ?record.theme, color = %record.color_theme, "Saved preferences");
        Ok(())
    }

    /// Subscribes to `owner`'s preferences. Delivers `None` until a document exists.
    pub fn subscribe_preferences(
        &self,
        owner: &str,
        mut on_data: impl FnMut(Option<Preferences>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe::<Preferences, _, _>(
            owner,
            move |records| on_data(records.into_iter().next()),
            on_error,
        )
    }
}
