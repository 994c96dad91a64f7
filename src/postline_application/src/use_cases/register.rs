use postline_core::{NewUser, User, UserStore, UserStoreError};

/// Register use case - adds a new user to the credential store
pub struct RegisterUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> RegisterUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the register use case
    ///
    /// # Returns
    /// The stored user, or `UserStoreError::UserAlreadyExists` if the email or
    /// the username is already registered
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all, fields(username = %user.username.as_ref()))]
    pub async fn execute(&self, user: NewUser) -> Result<User, UserStoreError> {
        self.user_store.add_user(user).await
    }
}
