//! The wishlist page: saved listings grouped by seller, with confirm-gated
//! removal.

use super::backend::MarketBackend;
use super::mutation::{MutationKind, MutationOutcome, MutationState, PendingConfirmation};
use crate::domain::wishlist::Wishlist;
use crate::error::SdkError;
use crate::shared::ListingId;

#[derive(Debug, Default)]
pub struct WishlistController {
    wishlist: Wishlist,
    loading: bool,
    mutation: MutationState,
    pending_removal: PendingConfirmation<ListingId>,
}

impl WishlistController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mutation(&self) -> &MutationState {
        &self.mutation
    }

    /// Fetch the wishlist. On error the previous contents stay.
    pub async fn load<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        self.loading = true;
        let result = backend.wishlist().await;
        self.loading = false;
        self.wishlist = result?;
        Ok(())
    }

    pub fn request_removal(&mut self, id: ListingId) {
        self.pending_removal.request(id);
    }

    pub fn cancel_removal(&mut self) {
        self.pending_removal.cancel();
    }

    pub fn pending_removal(&self) -> Option<&ListingId> {
        self.pending_removal.get()
    }

    /// Remove the pending item, then refetch the wishlist.
    pub async fn confirm_removal<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<MutationOutcome, SdkError> {
        let guard = self.mutation.begin(MutationKind::RemoveFromWishlist)?;
        let id = self.pending_removal.take()?;
        backend.remove_from_wishlist(&id).await?;
        if self.wishlist.remove(&id).is_none() {
            tracing::debug!("Removed listing {} was not in the cached wishlist", id);
        }
        guard.refreshing();
        Ok(MutationOutcome::from(self.load(backend).await))
    }
}
