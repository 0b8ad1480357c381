#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::errors::Error;
    use crate::registry::{
        CategoryInput, CategoryScope, MasterKind, PayerInput, PlaceInput, RegistryService,
        RegistryServiceTrait, User,
    };
    use crate::test_utils::{category, MockMasterRegistry};

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    fn setup() -> (Arc<MockMasterRegistry>, RegistryService) {
        let registry = Arc::new(MockMasterRegistry::new());
        let service = RegistryService::new(registry.clone());
        (registry, service)
    }

    fn category_input(name: &str, personal: bool) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            sort_order: 5,
            color: "#123456".to_string(),
            is_active: true,
            is_expense: true,
            personal,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_active_categories_sorted_and_scoped_to_viewer() {
        let (registry, service) = setup();
        registry.insert(category("c3", "Travel", 3).into());
        registry.insert(category("c1", "Food", 1).into());
        let mut inactive = category("c2", "Old", 2);
        inactive.is_active = false;
        registry.insert(inactive.into());
        let mut personal = category("c4", "Hobby", 4);
        personal.owner = BOB.to_string();
        registry.insert(personal.into());

        let names: Vec<String> = service
            .get_categories(ALICE)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "Travel"]);

        let bob_all = service.get_all_categories(BOB).await.unwrap();
        assert_eq!(bob_all.len(), 4);
    }

    #[tokio::test]
    async fn test_create_personal_category_stamps_owner() {
        let (_, service) = setup();
        let shared = service
            .create_category(category_input("Food", false), ALICE)
            .await
            .unwrap();
        assert!(shared.is_shared());

        let personal = service
            .create_category(category_input("Hobby", true), ALICE)
            .await
            .unwrap();
        assert_eq!(personal.owner, ALICE);
        assert!(!personal.id.is_empty());
    }

    #[tokio::test]
    async fn test_category_name_is_required() {
        let (registry, service) = setup();
        let err = service
            .create_category(category_input("  ", false), ALICE)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.count(MasterKind::Category), 0);
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_personal_category() {
        let (registry, service) = setup();
        let mut personal = category("c1", "Hobby", 1);
        personal.owner = ALICE.to_string();
        registry.insert(personal.into());

        let err = service
            .update_category("c1", category_input("Renamed", false), BOB)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Permission(_)));

        let err = service.delete_category("c1", BOB).await.unwrap_err();
        assert!(matches!(err, Error::Permission(_)));
        assert!(registry.record(MasterKind::Category, "c1").is_some());
    }

    #[tokio::test]
    async fn test_owner_update_keeps_owner() {
        let (registry, service) = setup();
        let mut personal = category("c1", "Hobby", 1);
        personal.owner = ALICE.to_string();
        registry.insert(personal.into());

        let updated = service
            .update_category("c1", category_input("Games", false), ALICE)
            .await
            .unwrap();
        assert_eq!(updated.name, "Games");
        assert_eq!(updated.owner, ALICE);

        service.delete_category("c1", ALICE).await.unwrap();
        assert!(registry.record(MasterKind::Category, "c1").is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_category_is_not_found() {
        let (_, service) = setup();
        let err = service
            .update_category("missing", category_input("X", false), ALICE)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_category_maps_respect_scope() {
        let (registry, service) = setup();
        registry.insert(category("shared", "Food", 1).into());
        let mut personal = category("mine", "Hobby", 2);
        personal.owner = ALICE.to_string();
        registry.insert(personal.into());

        let shared = service.category_maps(CategoryScope::Shared).await.unwrap();
        assert_eq!(shared.len(), 1);
        let alice = service
            .category_maps(CategoryScope::Viewer(ALICE))
            .await
            .unwrap();
        assert_eq!(alice.len(), 2);
        let bob = service.category_maps(CategoryScope::Viewer(BOB)).await.unwrap();
        assert!(bob.get("mine").is_none());
        let all = service.category_maps(CategoryScope::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_payer_id_is_its_name() {
        let (_, service) = setup();
        let payer = service
            .create_payer(PayerInput {
                name: "Wallet".to_string(),
                sort_order: 1,
                is_active: true,
                track_balance: true,
            })
            .await
            .unwrap();
        assert_eq!(payer.id, "Wallet");

        let payers = service.get_payers().await.unwrap();
        assert_eq!(payers.len(), 1);
        assert!(payers[0].track_balance);

        let err = service
            .update_payer("Card", PayerInput::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_place_lifecycle() {
        let (_, service) = setup();
        let place = service
            .create_place(PlaceInput {
                name: "Supermarket".to_string(),
                sort_order: 2,
                is_active: true,
            })
            .await
            .unwrap();

        let updated = service
            .update_place(
                &place.id,
                PlaceInput {
                    name: "Supermarket".to_string(),
                    sort_order: 2,
                    is_active: false,
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_active);
        assert!(service.get_places().await.unwrap().is_empty());
        assert_eq!(service.get_all_places().await.unwrap().len(), 1);

        service.delete_place(&place.id).await.unwrap();
        assert!(service.delete_place(&place.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_user_role_defaults_to_user() {
        let (registry, service) = setup();
        registry.insert(
            User {
                email: ALICE.to_string(),
                role: "admin".to_string(),
                created_at: String::new(),
            }
            .into(),
        );
        registry.insert(
            User {
                email: BOB.to_string(),
                role: String::new(),
                created_at: String::new(),
            }
            .into(),
        );

        assert!(service.is_user_registered(ALICE).await.unwrap());
        assert!(!service.is_user_registered("eve@example.com").await.unwrap());
        assert_eq!(service.get_user_role(ALICE).await.unwrap(), "admin");
        assert_eq!(service.get_user_role(BOB).await.unwrap(), "user");
        assert_eq!(
            service.get_user_role("eve@example.com").await.unwrap(),
            "user"
        );
    }
}
