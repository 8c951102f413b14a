use chrono::{TimeZone, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::generation::generate_slots;
use slotbook_core::{
    errors::SlotError,
    models::{auth::AuthContext, time_slot::GenerateSlotsRequest},
};
use uuid::Uuid;

use crate::test_utils::{claims, persisted, service, TestContext};

fn monday_request(service_id: Uuid) -> GenerateSlotsRequest {
    GenerateSlotsRequest {
        service_id,
        start_date: "2024-01-01".to_string(),
        end_date: "2024-01-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "11:00".to_string(),
        interval: 0,
    }
}

fn auth(business_id: Uuid) -> AuthContext {
    AuthContext::from(claims(Some(business_id)))
}

#[tokio::test]
async fn test_generate_slots_persists_synthesized_candidates() {
    let mut ctx = TestContext::new();
    let business_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.slot_repo
        .expect_service_for_business()
        .with(predicate::eq(service_id), predicate::eq(business_id))
        .times(1)
        .returning(move |id, business| Ok(Some(service(id, business, 30))));
    ctx.slot_repo
        .expect_business_timezone()
        .with(predicate::eq(business_id))
        .times(1)
        .returning(|_| Ok(Some("UTC".to_string())));
    ctx.slot_repo
        .expect_persist_slots()
        .withf(|slots| slots.len() == 4)
        .times(1)
        .returning(|slots| Ok(persisted(slots)));

    let slots = generate_slots(&ctx.slot_repo, &auth(business_id), &monday_request(service_id))
        .await
        .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start_time).collect();
    assert_eq!(
        starts,
        vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap(),
        ]
    );
    assert!(slots.iter().all(|s| s.is_available));
    assert!(slots.iter().all(|s| s.service_id == service_id && s.business_id == business_id));
}

#[tokio::test]
async fn test_duration_comes_from_stored_service() {
    let mut ctx = TestContext::new();
    let business_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.slot_repo
        .expect_service_for_business()
        .returning(move |id, business| Ok(Some(service(id, business, 60))));
    ctx.slot_repo
        .expect_business_timezone()
        .returning(|_| Ok(None));
    ctx.slot_repo
        .expect_persist_slots()
        .withf(|slots| {
            slots.len() == 2
                && slots
                    .iter()
                    .all(|s| s.end_time - s.start_time == chrono::Duration::minutes(60))
        })
        .returning(|slots| Ok(persisted(slots)));

    let slots = generate_slots(&ctx.slot_repo, &auth(business_id), &monday_request(service_id))
        .await
        .unwrap();

    assert_eq!(slots.len(), 2);
}

#[tokio::test]
async fn test_business_timezone_is_applied() {
    let mut ctx = TestContext::new();
    let business_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.slot_repo
        .expect_service_for_business()
        .returning(move |id, business| Ok(Some(service(id, business, 120))));
    ctx.slot_repo
        .expect_business_timezone()
        .returning(|_| Ok(Some("America/Chicago".to_string())));
    ctx.slot_repo
        .expect_persist_slots()
        .returning(|slots| Ok(persisted(slots)));

    let slots = generate_slots(&ctx.slot_repo, &auth(business_id), &monday_request(service_id))
        .await
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_time, Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap());
}

#[tokio::test]
async fn test_timezone_lookup_failure_falls_back_to_utc() {
    let mut ctx = TestContext::new();
    let business_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.slot_repo
        .expect_service_for_business()
        .returning(move |id, business| Ok(Some(service(id, business, 120))));
    ctx.slot_repo
        .expect_business_timezone()
        .returning(|_| Err(eyre::eyre!("connection reset")));
    ctx.slot_repo
        .expect_persist_slots()
        .returning(|slots| Ok(persisted(slots)));

    let slots = generate_slots(&ctx.slot_repo, &auth(business_id), &monday_request(service_id))
        .await
        .unwrap();

    assert_eq!(slots[0].start_time, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
}

#[tokio::test]
async fn test_invalid_request_never_reaches_repository() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_service_for_business().times(0);
    ctx.slot_repo.expect_business_timezone().times(0);
    ctx.slot_repo.expect_persist_slots().times(0);

    let mut request = monday_request(Uuid::new_v4());
    request.start_time = "nine".to_string();

    let err = generate_slots(&ctx.slot_repo, &auth(Uuid::new_v4()), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Validation(_)));
}

#[tokio::test]
async fn test_foreign_service_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_service_for_business()
        .times(1)
        .returning(|_, _| Ok(None));
    ctx.slot_repo.expect_business_timezone().times(0);
    ctx.slot_repo.expect_persist_slots().times(0);

    let err = generate_slots(&ctx.slot_repo, &auth(Uuid::new_v4()), &monday_request(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::NotFound(_)));
}

#[tokio::test]
async fn test_principal_without_business_is_forbidden() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_service_for_business().times(0);
    ctx.slot_repo.expect_persist_slots().times(0);

    let principal = AuthContext::from(claims(None));

    let err = generate_slots(&ctx.slot_repo, &principal, &monday_request(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Authorization(_)));
}

#[tokio::test]
async fn test_persistence_failure_is_database_error() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_service_for_business()
        .returning(|id, business| Ok(Some(service(id, business, 30))));
    ctx.slot_repo
        .expect_business_timezone()
        .returning(|_| Ok(None));
    ctx.slot_repo
        .expect_persist_slots()
        .times(1)
        .returning(|_| Err(eyre::eyre!("insert failed")));

    let err = generate_slots(&ctx.slot_repo, &auth(Uuid::new_v4()), &monday_request(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Database(_)));
}

#[tokio::test]
async fn test_empty_generation_still_succeeds() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_service_for_business()
        .returning(|id, business| Ok(Some(service(id, business, 30))));
    ctx.slot_repo
        .expect_business_timezone()
        .returning(|_| Ok(None));
    ctx.slot_repo
        .expect_persist_slots()
        .withf(|slots| slots.is_empty())
        .times(1)
        .returning(|slots| Ok(persisted(slots)));

    let mut request = monday_request(Uuid::new_v4());
    request.start_date = "2024-01-07".to_string();
    request.end_date = "2024-01-07".to_string();

    let slots = generate_slots(&ctx.slot_repo, &auth(Uuid::new_v4()), &request)
        .await
        .unwrap();

    assert!(slots.is_empty());
}
