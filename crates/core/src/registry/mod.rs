//! Master registry module - categories, places, payers and users.

mod registry_model;
mod registry_service;
mod registry_traits;

#[cfg(test)]
mod registry_service_tests;

pub use registry_model::{
    Category, CategoryInput, CategoryMaps, CategoryScope, FromMasterRecord, MasterKind,
    MasterRecord, Payer, PayerInput, Place, PlaceInput, User,
};
pub use registry_service::RegistryService;
pub use registry_traits::{MasterRegistryTrait, RegistryServiceTrait};
