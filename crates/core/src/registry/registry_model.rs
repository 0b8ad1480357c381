//! Master data domain models: categories, payers, places, users.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CATEGORY_COLOR, INCOME_CATEGORY_NAME};
use crate::errors::{Error, Result};
use crate::recurring::RecurringExpense;

/// Domain model representing an expense category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub color: String,
    pub is_active: bool,
    /// False for wallet charges and income-like entries.
    pub is_expense: bool,
    /// Counted in the monthly total but hidden from the breakdown list.
    #[serde(default)]
    pub exclude_from_breakdown: bool,
    /// Left out of totals and breakdowns entirely.
    #[serde(default)]
    pub exclude_from_summary: bool,
    /// Empty for shared categories, the owner's email for personal ones.
    #[serde(default)]
    pub owner: String,
}

impl Category {
    pub fn is_shared(&self) -> bool {
        self.owner.is_empty()
    }

    pub fn is_visible_to(&self, viewer: &str) -> bool {
        self.is_shared() || self.owner == viewer
    }
}

/// Input model for creating or updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub sort_order: i32,
    pub color: String,
    pub is_active: bool,
    pub is_expense: bool,
    #[serde(default)]
    pub exclude_from_breakdown: bool,
    #[serde(default)]
    pub exclude_from_summary: bool,
    /// Create the category as personal to the acting user. Ignored on update.
    #[serde(default)]
    pub personal: bool,
}

/// Domain model representing a payer (wallet, card, person)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    #[serde(default)]
    pub track_balance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayerInput {
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    #[serde(default)]
    pub track_balance: bool,
}

/// Domain model representing a place where money was spent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInput {
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}

/// A user allowed to use the diary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: String,
}

/// Record types held in the master registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterKind {
    Category,
    Place,
    Payer,
    User,
    Recurring,
}

impl MasterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MasterKind::Category => "category",
            MasterKind::Place => "place",
            MasterKind::Payer => "payer",
            MasterKind::User => "user",
            MasterKind::Recurring => "recurring",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(&self) -> &'static str {
        match self {
            MasterKind::Category => "Category",
            MasterKind::Place => "Place",
            MasterKind::Payer => "Payer",
            MasterKind::User => "User",
            MasterKind::Recurring => "Recurring expense",
        }
    }
}

/// A single master registry record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MasterRecord {
    Category(Category),
    Place(Place),
    Payer(Payer),
    User(User),
    Recurring(RecurringExpense),
}

impl MasterRecord {
    pub fn kind(&self) -> MasterKind {
        match self {
            MasterRecord::Category(_) => MasterKind::Category,
            MasterRecord::Place(_) => MasterKind::Place,
            MasterRecord::Payer(_) => MasterKind::Payer,
            MasterRecord::User(_) => MasterKind::User,
            MasterRecord::Recurring(_) => MasterKind::Recurring,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            MasterRecord::Category(c) => &c.id,
            MasterRecord::Place(p) => &p.id,
            MasterRecord::Payer(p) => &p.id,
            MasterRecord::User(u) => &u.email,
            MasterRecord::Recurring(r) => &r.id,
        }
    }
}

/// Conversion from a registry record into one concrete record type.
pub trait FromMasterRecord: Sized {
    const KIND: MasterKind;

    fn from_record(record: MasterRecord) -> Option<Self>;

    /// Like `from_record`, but a record of the wrong kind is a store error.
    fn try_from_record(record: MasterRecord) -> Result<Self> {
        let found = record.kind();
        Self::from_record(record).ok_or_else(|| {
            Error::Unexpected(format!(
                "Registry returned a {} record where a {} was expected",
                found.as_str(),
                Self::KIND.as_str()
            ))
        })
    }
}

macro_rules! impl_from_master_record {
    ($ty:ty, $variant:ident) => {
        impl FromMasterRecord for $ty {
            const KIND: MasterKind = MasterKind::$variant;

            fn from_record(record: MasterRecord) -> Option<Self> {
                match record {
                    MasterRecord::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for MasterRecord {
            fn from(value: $ty) -> Self {
                MasterRecord::$variant(value)
            }
        }
    };
}

impl_from_master_record!(Category, Category);
impl_from_master_record!(Place, Place);
impl_from_master_record!(Payer, Payer);
impl_from_master_record!(User, User);
impl_from_master_record!(RecurringExpense, Recurring);

/// Which categories a classification lookup should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope<'a> {
    /// Shared categories only; the canonical view used by the summary cache.
    Shared,
    /// Shared categories plus the viewer's personal ones.
    Viewer(&'a str),
    /// Every category regardless of owner.
    All,
}

impl CategoryScope<'_> {
    pub fn includes(&self, category: &Category) -> bool {
        match self {
            CategoryScope::Shared => category.is_shared(),
            CategoryScope::Viewer(viewer) => category.is_visible_to(viewer),
            CategoryScope::All => true,
        }
    }
}

/// Category classification lookups keyed by category id.
///
/// Every accessor has a defined fallback for ids missing from the registry,
/// so aggregation never fails on stale references.
#[derive(Debug, Clone, Default)]
pub struct CategoryMaps {
    by_id: HashMap<String, Category>,
}

impl CategoryMaps {
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        Self {
            by_id: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Display name, falling back to the id itself.
    pub fn name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |c| c.name.as_str())
    }

    /// Display color, falling back to a neutral gray.
    pub fn color(&self, id: &str) -> &str {
        self.get(id)
            .map(|c| c.color.as_str())
            .filter(|color| !color.is_empty())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }

    pub fn sort_order(&self, id: &str) -> i32 {
        self.get(id).map_or(0, |c| c.sort_order)
    }

    /// Unknown categories count as expenses.
    pub fn is_expense(&self, id: &str) -> bool {
        self.get(id).map_or(true, |c| c.is_expense)
    }

    pub fn excluded_from_breakdown(&self, id: &str) -> bool {
        self.get(id).is_some_and(|c| c.exclude_from_breakdown)
    }

    pub fn excluded_from_summary(&self, id: &str) -> bool {
        self.get(id).is_some_and(|c| c.exclude_from_summary)
    }

    /// Ids of wallet charge categories: non-expense categories other than
    /// the reserved income category.
    pub fn charge_category_ids(&self) -> HashSet<&str> {
        self.by_id
            .values()
            .filter(|c| !c.is_expense && c.name != INCOME_CATEGORY_NAME)
            .map(|c| c.id.as_str())
            .collect()
    }
}
