use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode};
use chrono::{Duration, Utc};
use slotbook_api::middleware::{
    auth::{bearer_token, JwtVerifier},
    error_handling::map_error,
};
use slotbook_core::errors::SlotError;
use uuid::Uuid;

use crate::test_utils::{claims, sign, TEST_SECRET};

#[test]
fn test_error_handling_not_found() {
    let response = map_error(SlotError::NotFound("Service not found".to_string()));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_error_handling_validation() {
    let response = map_error(SlotError::Validation("Invalid input".to_string()));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_error_handling_authentication() {
    let response = map_error(SlotError::Authentication("Invalid token".to_string()));
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_error_handling_authorization() {
    let response = map_error(SlotError::Authorization("Not authorized".to_string()));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_error_handling_database() {
    let response = map_error(SlotError::Database(eyre::eyre!("Database error")));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_handling_internal() {
    let error = SlotError::Internal(Box::new(std::io::Error::other("Internal error")));
    let response = map_error(error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_verifier_accepts_valid_token() {
    let business_id = Uuid::new_v4();
    let expected = claims(Some(business_id));
    let token = sign(&expected, TEST_SECRET);

    let decoded = JwtVerifier::new(TEST_SECRET).verify(&token).unwrap();

    assert_eq!(decoded, expected);
}

#[test]
fn test_verifier_rejects_wrong_secret() {
    let token = sign(&claims(Some(Uuid::new_v4())), "another-secret");

    let err = JwtVerifier::new(TEST_SECRET).verify(&token).unwrap_err();

    assert!(matches!(err, SlotError::Authentication(_)));
}

#[test]
fn test_verifier_rejects_expired_token() {
    let mut expired = claims(Some(Uuid::new_v4()));
    expired.exp = (Utc::now() - Duration::hours(2)).timestamp();
    let token = sign(&expired, TEST_SECRET);

    let err = JwtVerifier::new(TEST_SECRET).verify(&token).unwrap_err();

    assert!(matches!(err, SlotError::Authentication(_)));
}

#[test]
fn test_bearer_token_requires_scheme() {
    let mut headers = HeaderMap::new();
    assert!(matches!(bearer_token(&headers), Err(SlotError::Authentication(_))));

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
    assert!(matches!(bearer_token(&headers), Err(SlotError::Authentication(_))));

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
    assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
}
