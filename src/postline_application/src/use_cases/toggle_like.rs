use postline_core::{LikeStore, LikeStoreError, PostId, UserId};

/// Outcome of a toggle, with the like count after the change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked { count: usize },
    Unliked { count: usize },
}

impl LikeToggle {
    pub fn count(&self) -> usize {
        match self {
            LikeToggle::Liked { count } | LikeToggle::Unliked { count } => *count,
        }
    }
}

/// Error types for toggle like use case
#[derive(Debug, thiserror::Error)]
pub enum ToggleLikeError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Like store error: {0}")]
    LikeStoreError(LikeStoreError),
}

impl From<LikeStoreError> for ToggleLikeError {
    fn from(error: LikeStoreError) -> Self {
        match error {
            LikeStoreError::LikeNotFound => ToggleLikeError::PostNotFound,
            e => ToggleLikeError::LikeStoreError(e),
        }
    }
}

/// Toggle like use case - removes the caller's like if present, otherwise adds it.
///
/// Both branches are single atomic store updates, so concurrent toggles by the
/// same user never leave two entries behind.
pub struct ToggleLikeUseCase<L>
where
    L: LikeStore,
{
    like_store: L,
}

impl<L> ToggleLikeUseCase<L>
where
    L: LikeStore,
{
    pub fn new(like_store: L) -> Self {
        Self { like_store }
    }

    #[tracing::instrument(name = "ToggleLikeUseCase::execute", skip(self))]
    pub async fn execute(&self, post: PostId, user: UserId) -> Result<LikeToggle, ToggleLikeError> {
        self.like_store.get_like(&post).await?;

        if let Some(like) = self.like_store.remove_like(&post, &user).await? {
            return Ok(LikeToggle::Unliked {
                count: like.count(),
            });
        }

        let like = self.like_store.add_like(&post, &user).await?;
        Ok(LikeToggle::Liked {
            count: like.count(),
        })
    }
}
