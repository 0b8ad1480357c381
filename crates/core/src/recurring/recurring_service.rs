use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, error, info, warn};
use uuid::Uuid;

use super::recurring_model::{RecurringExpense, RecurringExpenseInput, RecurringRunError};
use super::recurring_traits::RecurringServiceTrait;
use crate::errors::{Error, Result};
use crate::expenses::{ExpenseInput, ExpenseServiceTrait};
use crate::registry::{FromMasterRecord, MasterKind, MasterRegistryTrait};
use crate::utils::time_utils::{timestamp_now, today_in, YearMonth, DATE_FORMAT};

/// Service for recurring templates and the monthly materializer.
pub struct RecurringService {
    registry: Arc<dyn MasterRegistryTrait>,
    expense_service: Arc<dyn ExpenseServiceTrait>,
    timezone: Tz,
}

impl RecurringService {
    pub fn new(
        registry: Arc<dyn MasterRegistryTrait>,
        expense_service: Arc<dyn ExpenseServiceTrait>,
        timezone: Tz,
    ) -> Self {
        Self {
            registry,
            expense_service,
            timezone,
        }
    }

    async fn load_templates(&self) -> Result<Vec<RecurringExpense>> {
        let mut templates = self
            .registry
            .query_by_kind(MasterKind::Recurring)
            .await?
            .into_iter()
            .map(RecurringExpense::try_from_record)
            .collect::<Result<Vec<_>>>()?;
        templates.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(templates)
    }

    /// Claims `month` for `template` and books its expense.
    ///
    /// Returns `Ok(false)` when another run already holds the claim.
    async fn materialize(
        &self,
        template: &RecurringExpense,
        month: YearMonth,
        acting_user: &str,
    ) -> Result<bool> {
        let month_key = month.to_string();
        let claimed = self
            .registry
            .compare_and_set_last_created_month(
                &template.id,
                &template.last_created_month,
                &month_key,
            )
            .await?;
        if !claimed {
            debug!(
                "Recurring template {} already claimed for {}",
                template.id, month_key
            );
            return Ok(false);
        }

        let input = ExpenseInput {
            date: template.target_date(month).format(DATE_FORMAT).to_string(),
            payer: template.payer.clone(),
            category: template.category.clone(),
            amount: template.amount,
            memo: template.memo.clone(),
            place: template.place.clone(),
            visibility: String::new(),
        };

        if let Err(e) = self.expense_service.create_expense(input, acting_user).await {
            error!(
                "Failed to create expense for recurring template {}: {}",
                template.id, e
            );
            // Best effort: hand the month back so a later run can retry it.
            match self
                .registry
                .compare_and_set_last_created_month(
                    &template.id,
                    &month_key,
                    &template.last_created_month,
                )
                .await
            {
                Ok(true) => {}
                Ok(false) => warn!(
                    "Claim for recurring template {} changed before it could be released",
                    template.id
                ),
                Err(release_err) => warn!(
                    "Failed to release claim for recurring template {}: {}",
                    template.id, release_err
                ),
            }
            return Err(e);
        }
        Ok(true)
    }
}

#[async_trait]
impl RecurringServiceTrait for RecurringService {
    async fn get_recurring_expenses(&self) -> Result<Vec<RecurringExpense>> {
        self.load_templates().await
    }

    async fn create_recurring_expense(
        &self,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense> {
        let frequency = input.validate()?;
        let now = timestamp_now();
        let template = RecurringExpense {
            id: Uuid::new_v4().to_string(),
            category: input.category,
            amount: input.amount,
            payer: input.payer,
            place: input.place,
            memo: input.memo,
            frequency,
            day_of_month: input.day_of_month,
            repeat_month: input.repeat_month,
            start_month: input.start_month,
            end_month: input.end_month,
            is_active: input.is_active,
            last_created_month: String::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.registry.put(template.clone().into()).await?;
        Ok(template)
    }

    async fn update_recurring_expense(
        &self,
        id: &str,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense> {
        let frequency = input.validate()?;
        let existing = match self.registry.get(MasterKind::Recurring, id).await? {
            Some(record) => RecurringExpense::try_from_record(record)?,
            None => return Err(Error::not_found(MasterKind::Recurring.entity_name(), id)),
        };

        let template = RecurringExpense {
            category: input.category,
            amount: input.amount,
            payer: input.payer,
            place: input.place,
            memo: input.memo,
            frequency,
            day_of_month: input.day_of_month,
            repeat_month: input.repeat_month,
            start_month: input.start_month,
            end_month: input.end_month,
            is_active: input.is_active,
            updated_at: timestamp_now(),
            ..existing
        };
        self.registry.put(template.clone().into()).await?;
        Ok(template)
    }

    async fn delete_recurring_expense(&self, id: &str) -> Result<()> {
        self.registry.delete(MasterKind::Recurring, id).await
    }

    async fn process_recurring(
        &self,
        acting_user: &str,
    ) -> std::result::Result<usize, RecurringRunError> {
        let today = today_in(self.timezone);
        self.process_recurring_on(acting_user, today).await
    }

    async fn process_recurring_on(
        &self,
        acting_user: &str,
        today: NaiveDate,
    ) -> std::result::Result<usize, RecurringRunError> {
        let month = YearMonth::from_date(today);
        let templates = self
            .load_templates()
            .await
            .map_err(RecurringRunError::before_start)?;

        let mut created = 0;
        for template in templates.iter().filter(|t| t.is_due_in(month)) {
            match self.materialize(template, month, acting_user).await {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(source) => {
                    return Err(RecurringRunError {
                        created,
                        template_id: template.id.clone(),
                        source,
                    });
                }
            }
        }

        info!(
            "Recurring run for {} created {} expense(s) from {} template(s)",
            month,
            created,
            templates.len()
        );
        Ok(created)
    }
}
