use postline_core::{Email, Password, User, UserStore, UserStoreError, Username};

/// What the client identified itself with. At least one identifier is always present.
#[derive(Debug, Clone)]
pub enum LoginIdentifier {
    Email(Email),
    Username(Username),
    Both(Email, Username),
}

impl LoginIdentifier {
    pub fn from_parts(email: Option<Email>, username: Option<Username>) -> Option<Self> {
        match (email, username) {
            (Some(email), Some(username)) => Some(Self::Both(email, username)),
            (Some(email), None) => Some(Self::Email(email)),
            (None, Some(username)) => Some(Self::Username(username)),
            (None, None) => None,
        }
    }
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Login use case - resolves the user by email, then by username, and checks the password
pub struct LoginUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> LoginUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// The authenticated user, `UserNotFound` if no identifier matches, or
    /// `IncorrectPassword` if the password does not match the stored hash
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        identifier: LoginIdentifier,
        password: Password,
    ) -> Result<User, LoginError> {
        let user = self.find_user(identifier).await?;

        self.user_store
            .authenticate_user(&user.id, &password)
            .await?;

        Ok(user)
    }

    async fn find_user(&self, identifier: LoginIdentifier) -> Result<User, UserStoreError> {
        match identifier {
            LoginIdentifier::Email(email) => self.user_store.get_user_by_email(&email).await,
            LoginIdentifier::Username(username) => {
                self.user_store.get_user_by_username(&username).await
            }
            LoginIdentifier::Both(email, username) => {
                match self.user_store.get_user_by_email(&email).await {
                    Err(UserStoreError::UserNotFound) => {
                        self.user_store.get_user_by_username(&username).await
                    }
                    found => found,
                }
            }
        }
    }
}
