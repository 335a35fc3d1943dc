use super::*;
use shared::error::ErrorCode;
use shared::models::RegistrationStatus;

#[tokio::test]
async fn unregister_confirmed_frees_the_slot() {
    let (engine, pool) = test_engine().await;
    seed_user(&pool, "u1").await;
    seed_event(&pool, "e1", 2, false).await;

    engine.register("u1", "e1").await.unwrap();
    engine.unregister("u1", "e1").await.unwrap();

    let event = fetch_event(&pool, "e1").await;
    assert_eq!(event.registered_count, 0);
    assert!(fetch_registration(&pool, "u1", "e1").await.is_none());
}

#[tokio::test]
async fn unregister_without_registration_is_rejected() {
    let (engine, pool) = test_engine().await;
    seed_user(&pool, "u1").await;
    seed_event(&pool, "e1", 1, false).await;

    let err = engine.unregister("u1", "e1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RegistrationNotFound);
}

#[tokio::test]
async fn unregister_is_terminal() {
    let (engine, pool) = test_engine().await;
    seed_user(&pool, "u1").await;
    seed_event(&pool, "e1", 1, false).await;

    engine.register("u1", "e1").await.unwrap();
    engine.unregister("u1", "e1").await.unwrap();

    let err = engine.unregister("u1", "e1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RegistrationNotFound);

    // The pair can register again from scratch
    let created = engine.register("u1", "e1").await.unwrap();
    assert_eq!(created.registration.status, RegistrationStatus::Confirmed);
}

#[tokio::test]
async fn fill_and_promote() {
    let (engine, pool) = test_engine().await;
    for user in ["u1", "u2", "u3"] {
        seed_user(&pool, user).await;
    }
    seed_event(&pool, "e", 2, true).await;

    assert_eq!(
        engine.register("u1", "e").await.unwrap().registration.status,
        RegistrationStatus::Confirmed
    );
    assert_eq!(
        engine.register("u2", "e").await.unwrap().registration.status,
        RegistrationStatus::Confirmed
    );
    let event = fetch_event(&pool, "e").await;
    assert_eq!(event.registered_count, 2);
    assert!(event.waitlist.is_empty());

    assert_eq!(
        engine.register("u3", "e").await.unwrap().registration.status,
        RegistrationStatus::Waitlist
    );
    assert_eq!(fetch_event(&pool, "e").await.waitlist.0, vec!["u3".to_string()]);

    engine.unregister("u1", "e").await.unwrap();

    // Promotion happened in a single observable step: u3 is confirmed, off
    // the waitlist, and the slot count is restored
    let event = fetch_event(&pool, "e").await;
    assert_eq!(event.registered_count, 2);
    assert!(event.waitlist.is_empty());
    let promoted = fetch_registration(&pool, "u3", "e").await.unwrap();
    assert_eq!(promoted.status, RegistrationStatus::Confirmed);
}

#[tokio::test]
async fn waitlist_fifo_promotion_chain() {
    let (engine, pool) = test_engine().await;
    for user in ["u1", "u2", "u3", "u4"] {
        seed_user(&pool, user).await;
    }
    seed_event(&pool, "e4", 1, true).await;

    engine.register("u1", "e4").await.unwrap();
    for user in ["u2", "u3", "u4"] {
        engine.register(user, "e4").await.unwrap();
    }

    engine.unregister("u1", "e4").await.unwrap();
    let event = fetch_event(&pool, "e4").await;
    assert_eq!(event.waitlist.0, vec!["u3".to_string(), "u4".to_string()]);
    assert_eq!(
        fetch_registration(&pool, "u2", "e4").await.unwrap().status,
        RegistrationStatus::Confirmed
    );

    engine.unregister("u2", "e4").await.unwrap();
    let event = fetch_event(&pool, "e4").await;
    assert_eq!(event.waitlist.0, vec!["u4".to_string()]);
    assert_eq!(
        fetch_registration(&pool, "u3", "e4").await.unwrap().status,
        RegistrationStatus::Confirmed
    );
}

#[tokio::test]
async fn waitlist_self_removal_preserves_order_without_promotion() {
    let (engine, pool) = test_engine().await;
    for user in ["u1", "u2", "u3", "u4"] {
        seed_user(&pool, user).await;
    }
    seed_event(&pool, "e4", 1, true).await;

    engine.register("u1", "e4").await.unwrap();
    for user in ["u2", "u3", "u4"] {
        engine.register(user, "e4").await.unwrap();
    }

    // u3 drops out of the middle of the queue
    engine.unregister("u3", "e4").await.unwrap();

    let event = fetch_event(&pool, "e4").await;
    assert_eq!(event.waitlist.0, vec!["u2".to_string(), "u4".to_string()]);
    // No promotion: u1 keeps the slot, the counter is untouched
    assert_eq!(event.registered_count, 1);
    assert_eq!(
        fetch_registration(&pool, "u1", "e4").await.unwrap().status,
        RegistrationStatus::Confirmed
    );
    assert_eq!(
        fetch_registration(&pool, "u2", "e4").await.unwrap().status,
        RegistrationStatus::Waitlist
    );
    assert!(fetch_registration(&pool, "u3", "e4").await.is_none());
}

#[tokio::test]
async fn confirmed_departure_without_waitlist_skips_promotion() {
    let (engine, pool) = test_engine().await;
    seed_user(&pool, "u1").await;
    seed_user(&pool, "u2").await;
    seed_event(&pool, "e1", 2, true).await;

    engine.register("u1", "e1").await.unwrap();
    engine.register("u2", "e1").await.unwrap();
    engine.unregister("u2", "e1").await.unwrap();

    let event = fetch_event(&pool, "e1").await;
    assert_eq!(event.registered_count, 1);
    assert!(event.waitlist.is_empty());
}
