//! Master registry and registry service traits.
//!
//! The registry is a single keyed store holding every master record type.
//! Implementations live outside the core (DynamoDB in production, the
//! in-memory adapter for local runs and tests).

use async_trait::async_trait;

use super::registry_model::{
    Category, CategoryInput, CategoryMaps, CategoryScope, MasterKind, MasterRecord, Payer,
    PayerInput, Place, PlaceInput,
};
use crate::errors::Result;

/// Trait defining the contract for master registry persistence.
#[async_trait]
pub trait MasterRegistryTrait: Send + Sync {
    /// Returns every record of one kind, in no particular order.
    async fn query_by_kind(&self, kind: MasterKind) -> Result<Vec<MasterRecord>>;

    async fn get(&self, kind: MasterKind, id: &str) -> Result<Option<MasterRecord>>;

    /// Inserts or overwrites a record.
    async fn put(&self, record: MasterRecord) -> Result<()>;

    /// Deletes a record. Deleting a missing record is not an error.
    async fn delete(&self, kind: MasterKind, id: &str) -> Result<()>;

    /// Sets a recurring template's `lastCreatedMonth` to `new_month` only if
    /// its current value equals `expected` (empty for "never created").
    ///
    /// Returns `false` when the stored value differs or the template is gone.
    async fn compare_and_set_last_created_month(
        &self,
        template_id: &str,
        expected: &str,
        new_month: &str,
    ) -> Result<bool>;
}

/// Trait defining the contract for master data operations.
#[async_trait]
pub trait RegistryServiceTrait: Send + Sync {
    /// Active categories visible to `viewer`, sorted by sort order.
    async fn get_categories(&self, viewer: &str) -> Result<Vec<Category>>;

    /// All categories visible to `viewer` including inactive ones.
    async fn get_all_categories(&self, viewer: &str) -> Result<Vec<Category>>;

    async fn create_category(&self, input: CategoryInput, actor: &str) -> Result<Category>;

    /// Fails with a permission error when `id` is another user's personal
    /// category.
    async fn update_category(
        &self,
        id: &str,
        input: CategoryInput,
        actor: &str,
    ) -> Result<Category>;

    async fn delete_category(&self, id: &str, actor: &str) -> Result<()>;

    /// Classification lookups over active categories in `scope`.
    async fn category_maps(&self, scope: CategoryScope<'_>) -> Result<CategoryMaps>;

    async fn get_places(&self) -> Result<Vec<Place>>;
    async fn get_all_places(&self) -> Result<Vec<Place>>;
    async fn create_place(&self, input: PlaceInput) -> Result<Place>;
    async fn update_place(&self, id: &str, input: PlaceInput) -> Result<Place>;
    async fn delete_place(&self, id: &str) -> Result<()>;

    async fn get_payers(&self) -> Result<Vec<Payer>>;
    async fn get_all_payers(&self) -> Result<Vec<Payer>>;
    async fn create_payer(&self, input: PayerInput) -> Result<Payer>;
    async fn update_payer(&self, id: &str, input: PayerInput) -> Result<Payer>;
    async fn delete_payer(&self, id: &str) -> Result<()>;

    async fn is_user_registered(&self, email: &str) -> Result<bool>;

    /// The user's role, `user` when unset or unknown.
    async fn get_user_role(&self, email: &str) -> Result<String>;
}
