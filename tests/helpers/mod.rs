use chrono::NaiveDate;
use kennel_reminders_api::{execute, GetRemindersUseCase, RemindersView};
use kennel_reminders_domain::{DomainSnapshot, ID};
use kennel_reminders_infra::{KennelContext, MockSys};
use std::sync::Arc;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

pub fn days_ago(days: i64) -> String {
    (today() - chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// In-memory context with the clock fixed at noon of `date`
pub fn context_at(date: NaiveDate) -> KennelContext {
    let mut ctx = KennelContext::create_inmemory();
    ctx.sys = Arc::new(MockSys::at_date(date));
    ctx.config.timezone = chrono_tz::UTC;
    ctx
}

pub async fn get_reminders(
    ctx: &KennelContext,
    user_id: &ID,
    snapshot: &DomainSnapshot,
) -> RemindersView {
    let usecase = GetRemindersUseCase {
        user_id: user_id.clone(),
        snapshot: snapshot.clone(),
    };
    match execute(usecase, ctx).await {
        Ok(view) => view,
        Err(e) => panic!("Pipeline failed: {:?}", e),
    }
}
