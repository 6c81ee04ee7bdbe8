mod helpers;

use dospot_api::{
    execute, CreateReminderUseCase, DeleteReminderUseCase, DoSpotError, GetReminderUseCase,
    ListRemindersUseCase, ObserveRemindersUseCase, UpdateReminderUseCase,
};
use dospot_domain::{diff_reminders, Coordinates, Reminder, ID};
use helpers::setup::{draft, login, spawn_ctx};

#[tokio::test]
async fn test_create_and_list_reminder() {
    let ctx = spawn_ctx();
    let u1 = login(&ctx, "u1").await;
    let u2 = login(&ctx, "u2").await;

    let created = execute(
        CreateReminderUseCase {
            session: u1.clone(),
            draft: draft("Meeting"),
        },
        &ctx,
    )
    .await
    .expect("To create reminder");
    assert!(!created.id.is_unassigned());

    let list = execute(ListRemindersUseCase { session: u1 }, &ctx)
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, created.id);
    assert_eq!(list[0].title, "Meeting");
    assert_eq!(list[0].location_name, "Room 3");

    let list = execute(ListRemindersUseCase { session: u2 }, &ctx)
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_store_keeps_caller_supplied_id() {
    let ctx = spawn_ctx();
    let reminder = Reminder {
        id: ID::new(),
        user_id: "u1".into(),
        title: "Meeting".into(),
        description: "desc".into(),
        latitude: -7.79,
        longitude: 110.37,
        location_name: "Room 3".into(),
        timestamp: 1000,
    };
    let id = ctx.repos.reminders.create(&reminder).await.unwrap();
    assert_eq!(id, reminder.id);

    let mut unassigned = reminder.clone();
    unassigned.id = ID::unassigned();
    let generated = ctx.repos.reminders.create(&unassigned).await.unwrap();
    assert!(!generated.is_unassigned());
    assert_ne!(generated, reminder.id);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let ctx = spawn_ctx();
    let session = login(&ctx, "u1").await;

    for title in ["first", "second", "third"] {
        execute(
            CreateReminderUseCase {
                session: session.clone(),
                draft: draft(title),
            },
            &ctx,
        )
        .await
        .unwrap();
    }

    let list = execute(ListRemindersUseCase { session }, &ctx)
        .await
        .unwrap();
    let titles: Vec<_> = list.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
    assert!(list.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn test_get_missing_reminder_is_not_found() {
    let ctx = spawn_ctx();
    let session = login(&ctx, "u1").await;

    let res = execute(
        GetReminderUseCase {
            session,
            reminder_id: "nonexistent".into(),
        },
        &ctx,
    )
    .await;
    assert!(matches!(res, Err(DoSpotError::NotFound(id)) if id.as_str() == "nonexistent"));
}

#[tokio::test]
async fn test_other_users_reminder_is_not_found() {
    let ctx = spawn_ctx();
    let u1 = login(&ctx, "u1").await;
    let u2 = login(&ctx, "u2").await;

    let created = execute(
        CreateReminderUseCase {
            session: u1,
            draft: draft("Meeting"),
        },
        &ctx,
    )
    .await
    .unwrap();

    let res = execute(
        GetReminderUseCase {
            session: u2,
            reminder_id: created.id,
        },
        &ctx,
    )
    .await;
    assert!(res.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_twice_then_not_found() {
    let ctx = spawn_ctx();
    let session = login(&ctx, "u1").await;

    let created = execute(
        CreateReminderUseCase {
            session: session.clone(),
            draft: draft("Meeting"),
        },
        &ctx,
    )
    .await
    .unwrap();

    let deleted = execute(
        DeleteReminderUseCase {
            session: session.clone(),
            reminder_id: created.id.clone(),
        },
        &ctx,
    )
    .await
    .expect("First delete to succeed");
    assert_eq!(deleted, Some(created.clone()));

    let deleted = execute(
        DeleteReminderUseCase {
            session: session.clone(),
            reminder_id: created.id.clone(),
        },
        &ctx,
    )
    .await
    .expect("Second delete to succeed");
    assert!(deleted.is_none());

    let res = execute(
        GetReminderUseCase {
            session,
            reminder_id: created.id.clone(),
        },
        &ctx,
    )
    .await;
    assert!(res.unwrap_err().is_not_found());
    assert!(ctx
        .repos
        .reminder_cache
        .get_by_id(&created.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_overwrites_reminder() {
    let ctx = spawn_ctx();
    let session = login(&ctx, "u1").await;

    let created = execute(
        CreateReminderUseCase {
            session: session.clone(),
            draft: draft("Meeting"),
        },
        &ctx,
    )
    .await
    .unwrap();

    let mut edit = draft("Lunch");
    edit.description = "with team".into();
    edit.coordinates = Some(Coordinates::new(1.5, 2.5));
    edit.location_name = "Cafe".into();
    let updated = execute(
        UpdateReminderUseCase {
            session: session.clone(),
            reminder_id: created.id.clone(),
            draft: edit,
        },
        &ctx,
    )
    .await
    .expect("To update reminder");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, created.user_id);
    assert!(updated.timestamp > created.timestamp);

    let found = execute(
        GetReminderUseCase {
            session,
            reminder_id: created.id.clone(),
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(found, updated);
    assert_eq!(found.title, "Lunch");
    assert_eq!(found.location_name, "Cafe");

    let cached = ctx.repos.reminder_cache.get_by_id(&created.id).await.unwrap();
    assert_eq!(cached, Some(updated));
}

#[tokio::test]
async fn test_update_missing_reminder_is_not_found() {
    let ctx = spawn_ctx();
    let session = login(&ctx, "u1").await;

    let res = execute(
        UpdateReminderUseCase {
            session: session.clone(),
            reminder_id: "nonexistent".into(),
            draft: draft("Lunch"),
        },
        &ctx,
    )
    .await;
    assert!(res.unwrap_err().is_not_found());

    // Validation runs before any store is touched
    let mut invalid = draft("Lunch");
    invalid.title = "".into();
    let res = execute(
        UpdateReminderUseCase {
            session,
            reminder_id: "nonexistent".into(),
            draft: invalid,
        },
        &ctx,
    )
    .await;
    assert!(matches!(res, Err(DoSpotError::Validation(_))));
}

#[tokio::test]
async fn test_observe_follows_writes_of_own_reminders() {
    let ctx = spawn_ctx();
    let u1 = login(&ctx, "u1").await;
    let u2 = login(&ctx, "u2").await;

    let mut subscription = execute(ObserveRemindersUseCase { session: u1.clone() }, &ctx)
        .await
        .unwrap();
    assert!(subscription.initial().is_empty());

    // A reminder of u2 does not reach the subscription of u1
    execute(
        CreateReminderUseCase {
            session: u2,
            draft: draft("Other"),
        },
        &ctx,
    )
    .await
    .unwrap();

    let created = execute(
        CreateReminderUseCase {
            session: u1,
            draft: draft("Meeting"),
        },
        &ctx,
    )
    .await
    .unwrap();

    let snapshot = subscription
        .next()
        .await
        .expect("Subscription to be active")
        .expect("To load snapshot");
    assert_eq!(snapshot, vec![created.clone()]);

    let diff = diff_reminders(subscription.initial(), &snapshot);
    assert_eq!(diff.inserted, vec![created.id]);
    assert!(diff.removed.is_empty());
}

#[tokio::test]
async fn test_delete_drops_stale_cached_row() {
    let ctx = spawn_ctx();
    let session = login(&ctx, "u1").await;

    // Cached while the remote copy is already gone
    let stale = Reminder {
        id: "stale".into(),
        user_id: "u1".into(),
        title: "Meeting".into(),
        description: "desc".into(),
        latitude: -7.79,
        longitude: 110.37,
        location_name: "Room 3".into(),
        timestamp: 1000,
    };
    ctx.repos.reminder_cache.insert_or_replace(&stale).await.unwrap();

    let deleted = execute(
        DeleteReminderUseCase {
            session,
            reminder_id: stale.id.clone(),
        },
        &ctx,
    )
    .await
    .expect("To delete reminder");
    assert!(deleted.is_none());
    assert!(ctx
        .repos
        .reminder_cache
        .get_by_id(&stale.id)
        .await
        .unwrap()
        .is_none());
}
