use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use uuid::Uuid;

use super::registry_model::{
    Category, CategoryInput, CategoryMaps, CategoryScope, FromMasterRecord, MasterKind, Payer,
    PayerInput, Place, PlaceInput, User,
};
use super::registry_traits::{MasterRegistryTrait, RegistryServiceTrait};
use crate::constants::DEFAULT_USER_ROLE;
use crate::errors::{Error, Result, ValidationError};

/// Service for master data: categories, places, payers and users.
pub struct RegistryService {
    registry: Arc<dyn MasterRegistryTrait>,
}

impl RegistryService {
    pub fn new(registry: Arc<dyn MasterRegistryTrait>) -> Self {
        Self { registry }
    }

    async fn list<T: FromMasterRecord>(&self) -> Result<Vec<T>> {
        self.registry
            .query_by_kind(T::KIND)
            .await?
            .into_iter()
            .map(T::try_from_record)
            .collect()
    }

    async fn find<T: FromMasterRecord>(&self, id: &str) -> Result<T> {
        match self.registry.get(T::KIND, id).await? {
            Some(record) => T::try_from_record(record),
            None => Err(Error::not_found(T::KIND.entity_name(), id)),
        }
    }

    fn require_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }

    fn ensure_category_owner(category: &Category, actor: &str) -> Result<()> {
        if !category.is_visible_to(actor) {
            warn!(
                "User {} attempted to modify personal category {} owned by {}",
                actor, category.id, category.owner
            );
            return Err(Error::Permission(
                "Personal categories can only be changed by their owner".to_string(),
            ));
        }
        Ok(())
    }
}

fn sorted_by_order<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> i32,
{
    items.sort_by_key(|item| key(item));
    items
}

#[async_trait]
impl RegistryServiceTrait for RegistryService {
    async fn get_categories(&self, viewer: &str) -> Result<Vec<Category>> {
        let categories: Vec<Category> = self
            .list::<Category>()
            .await?
            .into_iter()
            .filter(|c| c.is_active && c.is_visible_to(viewer))
            .collect();
        Ok(sorted_by_order(categories, |c| c.sort_order))
    }

    async fn get_all_categories(&self, viewer: &str) -> Result<Vec<Category>> {
        let categories: Vec<Category> = self
            .list::<Category>()
            .await?
            .into_iter()
            .filter(|c| c.is_visible_to(viewer))
            .collect();
        Ok(sorted_by_order(categories, |c| c.sort_order))
    }

    async fn create_category(&self, input: CategoryInput, actor: &str) -> Result<Category> {
        Self::require_name(&input.name)?;
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            sort_order: input.sort_order,
            color: input.color,
            is_active: input.is_active,
            is_expense: input.is_expense,
            exclude_from_breakdown: input.exclude_from_breakdown,
            exclude_from_summary: input.exclude_from_summary,
            owner: if input.personal {
                actor.to_string()
            } else {
                String::new()
            },
        };
        debug!(
            "Creating category {} ({}), personal: {}",
            category.name, category.id, input.personal
        );
        self.registry.put(category.clone().into()).await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        id: &str,
        input: CategoryInput,
        actor: &str,
    ) -> Result<Category> {
        Self::require_name(&input.name)?;
        let existing = self.find::<Category>(id).await?;
        Self::ensure_category_owner(&existing, actor)?;

        let category = Category {
            id: existing.id,
            name: input.name,
            sort_order: input.sort_order,
            color: input.color,
            is_active: input.is_active,
            is_expense: input.is_expense,
            exclude_from_breakdown: input.exclude_from_breakdown,
            exclude_from_summary: input.exclude_from_summary,
            owner: existing.owner,
        };
        self.registry.put(category.clone().into()).await?;
        Ok(category)
    }

    async fn delete_category(&self, id: &str, actor: &str) -> Result<()> {
        let existing = self.find::<Category>(id).await?;
        Self::ensure_category_owner(&existing, actor)?;
        self.registry.delete(MasterKind::Category, id).await
    }

    async fn category_maps(&self, scope: CategoryScope<'_>) -> Result<CategoryMaps> {
        let categories = self
            .list::<Category>()
            .await?
            .into_iter()
            .filter(|c| c.is_active && scope.includes(c));
        Ok(CategoryMaps::from_categories(categories))
    }

    async fn get_places(&self) -> Result<Vec<Place>> {
        let places: Vec<Place> = self
            .list::<Place>()
            .await?
            .into_iter()
            .filter(|p| p.is_active)
            .collect();
        Ok(sorted_by_order(places, |p| p.sort_order))
    }

    async fn get_all_places(&self) -> Result<Vec<Place>> {
        Ok(sorted_by_order(self.list::<Place>().await?, |p| p.sort_order))
    }

    async fn create_place(&self, input: PlaceInput) -> Result<Place> {
        Self::require_name(&input.name)?;
        let place = Place {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            sort_order: input.sort_order,
            is_active: input.is_active,
        };
        self.registry.put(place.clone().into()).await?;
        Ok(place)
    }

    async fn update_place(&self, id: &str, input: PlaceInput) -> Result<Place> {
        Self::require_name(&input.name)?;
        let existing = self.find::<Place>(id).await?;
        let place = Place {
            id: existing.id,
            name: input.name,
            sort_order: input.sort_order,
            is_active: input.is_active,
        };
        self.registry.put(place.clone().into()).await?;
        Ok(place)
    }

    async fn delete_place(&self, id: &str) -> Result<()> {
        self.find::<Place>(id).await?;
        self.registry.delete(MasterKind::Place, id).await
    }

    async fn get_payers(&self) -> Result<Vec<Payer>> {
        let payers: Vec<Payer> = self
            .list::<Payer>()
            .await?
            .into_iter()
            .filter(|p| p.is_active)
            .collect();
        Ok(sorted_by_order(payers, |p| p.sort_order))
    }

    async fn get_all_payers(&self) -> Result<Vec<Payer>> {
        Ok(sorted_by_order(self.list::<Payer>().await?, |p| p.sort_order))
    }

    async fn create_payer(&self, input: PayerInput) -> Result<Payer> {
        Self::require_name(&input.name)?;
        // Payers are keyed by their name; expenses reference them by it.
        let payer = Payer {
            id: input.name.clone(),
            name: input.name,
            sort_order: input.sort_order,
            is_active: input.is_active,
            track_balance: input.track_balance,
        };
        self.registry.put(payer.clone().into()).await?;
        Ok(payer)
    }

    async fn update_payer(&self, id: &str, input: PayerInput) -> Result<Payer> {
        Self::require_name(&input.name)?;
        let existing = self.find::<Payer>(id).await?;
        let payer = Payer {
            id: existing.id,
            name: input.name,
            sort_order: input.sort_order,
            is_active: input.is_active,
            track_balance: input.track_balance,
        };
        self.registry.put(payer.clone().into()).await?;
        Ok(payer)
    }

    async fn delete_payer(&self, id: &str) -> Result<()> {
        self.find::<Payer>(id).await?;
        self.registry.delete(MasterKind::Payer, id).await
    }

    async fn is_user_registered(&self, email: &str) -> Result<bool> {
        Ok(self.registry.get(MasterKind::User, email).await?.is_some())
    }

    async fn get_user_role(&self, email: &str) -> Result<String> {
        let role = match self.registry.get(MasterKind::User, email).await? {
            Some(record) => User::try_from_record(record)?.role,
            None => String::new(),
        };
        if role.is_empty() {
            Ok(DEFAULT_USER_ROLE.to_string())
        } else {
            Ok(role)
        }
    }
}
