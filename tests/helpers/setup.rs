use dospot_api::{execute, LoginUseCase, Session};
use dospot_domain::{Coordinates, ReminderDraft};
use dospot_infra::{DoSpotContext, ISys};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

/// Clock advancing one second every time it is read, so that every write
/// gets a distinct timestamp
pub struct TickingSys {
    now: AtomicI64,
}

impl ISys for TickingSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.fetch_add(1000, Ordering::SeqCst)
    }
}

pub fn spawn_ctx() -> DoSpotContext {
    let mut ctx = DoSpotContext::create_inmemory();
    ctx.sys = Arc::new(TickingSys {
        now: AtomicI64::new(1000),
    });
    ctx
}

pub async fn login(ctx: &DoSpotContext, user_id: &str) -> Session {
    execute(
        LoginUseCase {
            user_id: user_id.into(),
        },
        ctx,
    )
    .await
    .expect("To log in")
}

pub fn draft(title: &str) -> ReminderDraft {
    ReminderDraft {
        title: title.into(),
        description: "desc".into(),
        coordinates: Some(Coordinates::new(-7.79, 110.37)),
        location_name: "Room 3".into(),
    }
}
