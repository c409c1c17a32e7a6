//! Backend API contract tests.
//!
//! These use wiremock for deterministic HTTP mocking: no network
//! dependencies, and the no-call-on-invalid-input properties can be
//! asserted with zero-expectation mocks.

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moddesk::{
    ApiClient, ApiError, ContentType, CoordinatorError, ModerationAction, ModerationCoordinator,
    ModerationState, Session, TokenPair, TransitionError,
};

fn make_client(base_url: &str, token: &str) -> (ApiClient, Arc<Session>) {
    let session = Arc::new(Session::new(
        base_url,
        Some(TokenPair {
            access: token.to_string(),
            refresh: "refresh-token".to_string(),
        }),
    ));
    let api = ApiClient::new(base_url, Arc::clone(&session), 6000, 100).expect("client builds");
    (api, session)
}

fn pending_opportunity(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "contentType": "opportunity",
        "title": "Grant programme",
        "status": "active",
        "isApproved": false,
    })
}

#[tokio::test]
async fn approve_round_trips_and_reports_backend_state() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    // First fetch: still pending. Second fetch (after the write): approved.
    Mock::given(method("GET"))
        .and(path("/api/opportunities/c-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": pending_opportunity("c-1")})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/opportunities/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "c-1",
                "contentType": "opportunity",
                "title": "Grant programme",
                "status": "active",
                "isApproved": true,
                "approvedBy": "admin-1",
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/opportunities/c-1/approve"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "approved"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = ModerationCoordinator::new(api);
    let item = coordinator
        .api()
        .fetch_content(ContentType::Opportunity, "c-1")
        .await
        .unwrap();

    let outcome = coordinator
        .execute(&item, ModerationAction::Approve)
        .await
        .unwrap();

    assert_eq!(outcome.previous_state, ModerationState::PendingReview);
    assert_eq!(outcome.new_state, ModerationState::Live);
    assert!(outcome.item.is_approved);
}

#[tokio::test]
async fn empty_rejection_reason_issues_no_network_call() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    Mock::given(method("POST"))
        .and(path("/api/opportunities/c-2/disapprove"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let item: moddesk::ContentItem =
        serde_json::from_value(pending_opportunity("c-2")).unwrap();
    let coordinator = ModerationCoordinator::new(api);
    let err = coordinator
        .execute(
            &item,
            ModerationAction::Reject {
                reason: "  ".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoordinatorError::Transition(TransitionError::MissingReason)
    ));
    // MockServer verifies expect(0) on drop.
}

#[tokio::test]
async fn zero_payment_amount_issues_no_network_call() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    Mock::given(method("POST"))
        .and(path("/api/payments/job/c-3/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let item: moddesk::ContentItem = serde_json::from_value(json!({
        "id": "c-3",
        "contentType": "job",
        "status": "active",
        "isApproved": true,
        "isPaid": true,
    }))
    .unwrap();

    let coordinator = ModerationCoordinator::new(api);
    let err = coordinator
        .execute(
            &item,
            ModerationAction::RequestPayment {
                amount: 0,
                notes: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoordinatorError::Transition(TransitionError::InvalidAmount { amount: 0 })
    ));
}

#[tokio::test]
async fn expired_token_is_refreshed_once_and_the_request_retried() {
    let server = MockServer::start().await;
    let (api, session) = make_client(&server.uri(), "stale-token");

    Mock::given(method("GET"))
        .and(path("/api/jobs/c-4"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "refresh-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"token": "fresh-token", "refreshToken": "next-refresh"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/c-4"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "c-4",
                "contentType": "job",
                "status": "active",
                "isApproved": false,
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = api.fetch_content(ContentType::Job, "c-4").await.unwrap();
    assert_eq!(item.id, "c-4");
    assert!(session.is_active().await);
}

#[tokio::test]
async fn failed_refresh_tears_the_session_down() {
    let server = MockServer::start().await;
    let (api, session) = make_client(&server.uri(), "stale-token");

    Mock::given(method("GET"))
        .and(path("/api/jobs/c-5"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;

    let err = api.fetch_content(ContentType::Job, "c-5").await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(!session.is_active().await);
}

#[tokio::test]
async fn rate_limiting_maps_to_its_own_error() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    Mock::given(method("POST"))
        .and(path("/api/events/c-6/approve"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"message": "too many requests"})),
        )
        .mount(&server)
        .await;

    let err = api
        .approve_content(ContentType::Event, "c-6")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RateLimited));
}

#[tokio::test]
async fn backend_rejects_verification_without_an_uploaded_receipt() {
    // The client can only forward this when its snapshot is stale; the
    // backend must treat it as an invalid transition.
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    Mock::given(method("POST"))
        .and(path("/api/payments/resource/c-7/verify"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "payment has not been uploaded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api
        .verify_payment(ContentType::Resource, "c-7", true, None)
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "payment has not been uploaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn schedule_review_round_trip_shows_draft_and_the_combined_instant() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    let at = moddesk::moderation::schedule::combine_date_time_at(
        "2027-06-15",
        "08:45",
        chrono::Utc::now(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/events/c-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "c-8",
                "contentType": "event",
                "status": "active",
                "isApproved": true,
            }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/events/c-8"))
        .and(body_json(json!({
            "status": "draft",
            "scheduledReviewAt": at.to_rfc3339(),
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/c-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "c-8",
                "contentType": "event",
                "status": "draft",
                "isApproved": true,
                "scheduledReviewAt": at.to_rfc3339(),
            }
        })))
        .mount(&server)
        .await;

    let coordinator = ModerationCoordinator::new(api);
    let item = coordinator
        .api()
        .fetch_content(ContentType::Event, "c-8")
        .await
        .unwrap();
    let outcome = coordinator
        .execute(&item, ModerationAction::ScheduleReview { at })
        .await
        .unwrap();

    assert_eq!(outcome.item.status, moddesk::ContentStatus::Draft);
    assert_eq!(outcome.item.scheduled_review_at, Some(at));
    assert_eq!(outcome.new_state, ModerationState::Hidden);
}

#[tokio::test]
async fn promotion_admin_actions_hit_the_expected_routes() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    Mock::given(method("POST"))
        .and(path("/api/admin/promotions/p-1/verify-payment"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/promotions/p-1/reject-payment"))
        .and(body_json(json!({"reason": "amount mismatch"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    api.promotion_action("p-1", &moddesk::PromotionAdminAction::VerifyPayment)
        .await
        .unwrap();
    api.promotion_action(
        "p-1",
        &moddesk::PromotionAdminAction::RejectPayment {
            reason: "amount mismatch".to_string(),
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn moderation_list_deserializes_paginated_payload() {
    let server = MockServer::start().await;
    let (api, _session) = make_client(&server.uri(), "admin-token");

    Mock::given(method("GET"))
        .and(path("/api/admin/content/moderation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "items": [
                    pending_opportunity("c-10"),
                    {
                        "id": "c-11",
                        "contentType": "event",
                        "status": "active",
                        "isApproved": true,
                        "paymentStatus": "awaiting_payment",
                        "paymentAmount": 5000,
                    }
                ],
                "page": 1,
                "limit": 20,
                "total": 2
            }
        })))
        .mount(&server)
        .await;

    let page = api
        .list_moderation(&moddesk::ListFilter::default(), 1, 20)
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 2);

    let counts = moddesk::TabCounts::from_items(page.data.iter());
    // Dual membership: the second item counts as approved AND awaiting payment.
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.approved, 1);
    assert_eq!(counts.awaiting_payment, 1);
}
