use api::ApiError;
use models::auth::Session;

use crate::client::QueryClient;

pub struct AuthQueries<'a> {
    pub(crate) client: &'a QueryClient,
}

impl AuthQueries<'_> {
    /// Login, then fetch the profile with the freshly issued token, then
    /// establish the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let service = self.client.auth_service.clone();
        let session_store = self.client.session().clone();
        self.client
            .mutate(
                &[],
                "Welcome back!",
                "Invalid email or password",
                async move {
                    let login = service.login(email, password).await?;
                    let user = service
                        .user_profile_with_token(login.user_id, &login.access_token)
                        .await?;
                    let session = Session {
                        token: login.access_token,
                        user,
                    };
                    session_store.set(session.clone());
                    Ok(session)
                },
            )
            .await
    }

    /// Register, login to obtain a token, fetch the profile, establish the
    /// session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, ApiError> {
        let service = self.client.auth_service.clone();
        let session_store = self.client.session().clone();
        self.client
            .mutate(
                &[],
                "Welcome! Your account has been created successfully.",
                "Registration failed. Please try again.",
                async move {
                    service.register(email, password, full_name).await?;
                    let login = service.login(email, password).await?;
                    let user = service
                        .user_profile_with_token(login.user_id, &login.access_token)
                        .await?;
                    let session = Session {
                        token: login.access_token,
                        user,
                    };
                    session_store.set(session.clone());
                    Ok(session)
                },
            )
            .await
    }

    /// The session is torn down even when the server call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.auth_service.logout().await;
        self.client.session().clear();
        if result.is_ok() {
            self.client.notifier().success("Logged out successfully");
        }
        result
    }
}
