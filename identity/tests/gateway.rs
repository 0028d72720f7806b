//! Integration tests for the signup gateway against the mock provider.

#![allow(clippy::unwrap_used)] // Test code

use futures::future::join_all;
use rendezvous_core::{Event, Reservation, ReservationId};
use rendezvous_identity::mocks::MockSignupProvider;
use rendezvous_identity::{ProviderResponse, SignupError, SignupGateway, SignupRequest};
use rendezvous_testing::{fixtures, init_test_tracing};
use std::io;
use std::time::Duration;

fn gateway(provider: MockSignupProvider) -> SignupGateway<MockSignupProvider> {
    SignupGateway::new(provider, "client-123".to_string())
}

#[tokio::test]
async fn test_payload_embeds_client_id() {
    let gateway = gateway(MockSignupProvider::new());

    gateway
        .signup(SignupRequest::new("ann@example.com", "pw").with_username("ann"))
        .await
        .unwrap();

    let submitted = gateway.provider().submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].client_id, "client-123");
    assert_eq!(submitted[0].email, "ann@example.com");
    assert_eq!(submitted[0].connection, "Username-Password-Authentication");
    assert_eq!(submitted[0].username.as_deref(), Some("ann"));
}

#[tokio::test]
async fn test_rejection_is_not_retried() {
    init_test_tracing();
    let provider = MockSignupProvider::new().with_response(
        ProviderResponse::new(400, r#"{"code":"password_strength_error"}"#)
            .with_reason("Bad Request"),
    );
    let gateway = gateway(provider);

    let err = gateway
        .signup(SignupRequest::new("ann@example.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SignupError::UpstreamRequestFailed {
            status_code: 400,
            ref reason,
        } if reason == "Bad Request"
    ));
    assert_eq!(gateway.provider().submitted().len(), 1);
}

#[tokio::test]
async fn test_transport_fault_is_propagated_unchanged() {
    init_test_tracing();
    let gateway = gateway(
        MockSignupProvider::new().with_transport_failure(io::ErrorKind::ConnectionReset),
    );

    let err = gateway
        .signup(SignupRequest::new("ann@example.com", "pw"))
        .await
        .unwrap_err();

    let SignupError::Transport(source) = err else {
        panic!("expected Transport");
    };
    let io_err = source.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
    assert_eq!(gateway.provider().submitted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_fails_with_timeout() {
    init_test_tracing();
    let provider = MockSignupProvider::new().with_delay(Duration::from_secs(30));
    let gateway = gateway(provider).with_timeout(Duration::from_secs(5));

    let err = gateway
        .signup(SignupRequest::new("ann@example.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, SignupError::Timeout { after } if after == Duration::from_secs(5)));
    assert!(err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn test_slow_but_within_deadline_succeeds() {
    let provider = MockSignupProvider::new().with_delay(Duration::from_secs(2));
    let gateway = gateway(provider).with_timeout(Duration::from_secs(5));

    let response = gateway
        .signup(SignupRequest::new("ann@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(response.id, "mock|ann@example.com");
}

#[tokio::test]
async fn test_concurrent_signups_do_not_interfere() {
    let gateway = gateway(MockSignupProvider::new());

    let emails: Vec<String> = (0..16).map(|i| format!("user{i}@example.com")).collect();
    let results = join_all(
        emails
            .iter()
            .map(|email| gateway.signup(SignupRequest::new(email.as_str(), "pw"))),
    )
    .await;

    for (email, result) in emails.iter().zip(results) {
        let response = result.unwrap();
        assert_eq!(&response.email, email);
        assert_eq!(response.id, format!("mock|{email}"));
    }
    assert_eq!(gateway.provider().submitted().len(), 16);
}

#[tokio::test]
async fn test_new_account_can_reserve_a_fixed_event() {
    let gateway = gateway(MockSignupProvider::new());

    let user = gateway
        .signup(SignupRequest::new("ann@example.com", "pw").with_nickname("ann"))
        .await
        .unwrap()
        .into_user();

    let mut event: Event = fixtures::draft_event(5);
    event.invite(user.id().clone());
    event.date_mut().set_date(fixtures::date(2025, 12, 6)).unwrap();
    event.fix_date().unwrap();

    let reservation = Reservation::for_event(ReservationId::new(1), &event, &user).unwrap();

    assert_eq!(reservation.user_id(), user.id());
    assert_eq!(reservation.date(), fixtures::date(2025, 12, 6));
}
