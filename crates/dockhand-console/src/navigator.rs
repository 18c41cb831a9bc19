use async_trait::async_trait;

/// Navigation collaborator of the save page.
///
/// Exposes the single operation the presenter needs: return the user to
/// the application's starting view.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn to_start(&self);
}
