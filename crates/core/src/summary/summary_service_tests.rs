#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::registry::{RegistryService, RegistryServiceTrait};
    use crate::summary::{SummaryService, SummaryServiceTrait};
    use crate::test_utils::{
        category, expense, MockExpenseRepository, MockMasterRegistry, MockSummaryCache,
    };

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    struct Fixture {
        expenses: Arc<MockExpenseRepository>,
        registry: Arc<MockMasterRegistry>,
        cache: Arc<MockSummaryCache>,
        service: SummaryService,
    }

    fn setup() -> Fixture {
        let expenses = Arc::new(MockExpenseRepository::new());
        let registry = Arc::new(MockMasterRegistry::new());
        let cache = Arc::new(MockSummaryCache::new());
        registry.insert(category("food", "Food", 1).into());
        registry.insert(category("rent", "Rent", 2).into());
        let registry_service: Arc<dyn RegistryServiceTrait> =
            Arc::new(RegistryService::new(registry.clone()));
        let service = SummaryService::new(expenses.clone(), registry_service, cache.clone());
        Fixture {
            expenses,
            registry,
            cache,
            service,
        }
    }

    #[tokio::test]
    async fn test_monthly_summary_with_comparisons() {
        let f = setup();
        f.expenses.insert(expense("a", "2024-05-03", "food", 1500, ALICE));
        f.expenses.insert(expense("b", "2024-04-20", "food", 1000, ALICE));
        f.expenses.insert(expense("c", "2023-05-11", "rent", 3000, ALICE));

        let summary = f
            .service
            .get_monthly_summary("2024-05", None, ALICE)
            .await
            .unwrap();
        assert_eq!(summary.month, "2024-05");
        assert_eq!(summary.total, 1500);

        let prev = summary.previous_month.unwrap();
        assert_eq!(prev.total, 1000);
        assert_eq!(prev.diff, 500);
        assert_eq!(prev.diff_percent, 50.0);

        let last_year = summary.previous_year_month.unwrap();
        assert_eq!(last_year.total, 3000);
        assert_eq!(last_year.diff, -1500);
        assert_eq!(last_year.diff_percent, -50.0);
    }

    #[tokio::test]
    async fn test_comparisons_absent_when_both_sides_empty() {
        let f = setup();
        let summary = f
            .service
            .get_monthly_summary("2024-05", None, ALICE)
            .await
            .unwrap();
        assert_eq!(summary.total, 0);
        assert!(summary.by_category.is_empty());
        assert!(summary.previous_month.is_none());
        assert!(summary.previous_year_month.is_none());
    }

    #[tokio::test]
    async fn test_others_private_expenses_do_not_count() {
        let f = setup();
        let mut private = expense("p", "2024-05-02", "food", 900, BOB);
        private.visibility = "private".to_string();
        f.expenses.insert(private);
        let mut summary_tier = expense("s", "2024-05-03", "food", 100, BOB);
        summary_tier.visibility = "summary".to_string();
        f.expenses.insert(summary_tier);

        let for_alice = f
            .service
            .get_monthly_summary("2024-05", None, ALICE)
            .await
            .unwrap();
        assert_eq!(for_alice.total, 100);
        assert_eq!(for_alice.by_category[0].category, "Food");

        let for_bob = f
            .service
            .get_monthly_summary("2024-05", None, BOB)
            .await
            .unwrap();
        assert_eq!(for_bob.total, 1000);
    }

    #[tokio::test]
    async fn test_payer_filter_and_empty_payer() {
        let f = setup();
        let mut card = expense("a", "2024-05-03", "food", 700, ALICE);
        card.payer = "Card".to_string();
        f.expenses.insert(card);
        f.expenses.insert(expense("b", "2024-05-04", "food", 300, ALICE));

        let card_only = f
            .service
            .get_monthly_summary("2024-05", Some("Card"), ALICE)
            .await
            .unwrap();
        assert_eq!(card_only.total, 700);

        let everyone = f
            .service
            .get_monthly_summary("2024-05", Some(""), ALICE)
            .await
            .unwrap();
        assert_eq!(everyone.total, 1000);
    }

    #[tokio::test]
    async fn test_personal_categories_only_resolve_for_owner() {
        let f = setup();
        let mut hobby = category("hobby", "Hobby", 0);
        hobby.owner = ALICE.to_string();
        hobby.exclude_from_summary = true;
        f.registry.insert(hobby.into());
        f.expenses.insert(expense("a", "2024-05-03", "hobby", 400, ALICE));

        // Excluded through Alice's own category definition.
        let mine = f
            .service
            .get_monthly_summary("2024-05", None, ALICE)
            .await
            .unwrap();
        assert_eq!(mine.total, 0);

        // Bob cannot see the definition, so the id counts as an expense.
        let bob = f
            .service
            .get_monthly_summary("2024-05", None, BOB)
            .await
            .unwrap();
        assert_eq!(bob.total, 400);
        assert_eq!(bob.by_category[0].category, "hobby");
    }

    #[tokio::test]
    async fn test_yearly_summary_has_thirteen_zero_filled_months() {
        let f = setup();
        f.expenses.insert(expense("a", "2024-05-03", "food", 100, ALICE));
        f.expenses.insert(expense("b", "2023-05-03", "food", 200, ALICE));
        f.expenses.insert(expense("c", "2023-04-30", "food", 999, ALICE));

        let yearly = f
            .service
            .get_yearly_summary("2024-05", None, ALICE)
            .await
            .unwrap();
        assert_eq!(yearly.year, "2024");
        assert_eq!(yearly.months.len(), 13);
        assert_eq!(yearly.months[0].month, "2023-05");
        assert_eq!(yearly.months[0].total, 200);
        assert_eq!(yearly.months[12].month, "2024-05");
        assert_eq!(yearly.months[12].total, 100);
        assert!(yearly.months[1..12].iter().all(|m| m.total == 0));
    }

    #[tokio::test]
    async fn test_invalid_month_is_validation_error() {
        let f = setup();
        let err = f
            .service
            .get_monthly_summary("2024-5", None, ALICE)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_refresh_uses_shared_categories_without_visibility_filter() {
        let f = setup();
        let mut personal = category("hobby", "Hobby", 0);
        personal.owner = ALICE.to_string();
        personal.exclude_from_summary = true;
        f.registry.insert(personal.into());

        let mut private = expense("p", "2024-05-02", "food", 900, BOB);
        private.visibility = "private".to_string();
        f.expenses.insert(private);
        f.expenses.insert(expense("h", "2024-05-03", "hobby", 400, ALICE));

        let cached = f.service.refresh_monthly_cache("2024-05").await.unwrap();
        assert_eq!(cached.total, 1300);
        assert!(!cached.refreshed_at.is_empty());
        assert_eq!(f.cache.entry("2024-05"), Some(cached.clone()));

        // The cache always equals a fresh recompute.
        let again = f.service.refresh_monthly_cache("2024-05").await.unwrap();
        assert_eq!(again.to_month_data(), cached.to_month_data());
    }

    #[tokio::test]
    async fn test_live_summary_ignores_cache() {
        let f = setup();
        f.expenses.insert(expense("a", "2024-05-03", "food", 100, ALICE));
        f.service.refresh_monthly_cache("2024-05").await.unwrap();
        f.expenses.insert(expense("b", "2024-05-04", "food", 50, ALICE));

        let live = f
            .service
            .get_monthly_summary("2024-05", None, ALICE)
            .await
            .unwrap();
        assert_eq!(live.total, 150);
        assert_eq!(f.cache.entry("2024-05").unwrap().total, 100);
    }

    #[tokio::test]
    async fn test_cached_summaries_batch_read() {
        let f = setup();
        f.expenses.insert(expense("a", "2024-05-03", "food", 100, ALICE));
        f.service.refresh_monthly_cache("2024-05").await.unwrap();

        let months = vec!["2024-04".to_string(), "2024-05".to_string()];
        let cached = f.service.get_cached_summaries(&months).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached["2024-05"].total, 100);

        let bad = vec!["May".to_string()];
        assert!(f.service.get_cached_summaries(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_read_failure_aborts_summary() {
        let f = setup();
        f.expenses.set_fail_reads(true);
        let err = f
            .service
            .get_monthly_summary("2024-05", None, ALICE)
            .await
            .unwrap_err();
        assert!(!err.is_validation());
    }
}
