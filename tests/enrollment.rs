mod support;

use chrono::Duration;

use tft_tracker::db::PlayerStore;
use tft_tracker::riot::{ProviderError, Region};
use tft_tracker::tracking::{
    Enrollment, EnrollmentError, IdentityError, PlayerSettings, Rank, UntrackTarget,
};

use support::*;

#[tokio::test]
async fn confirm_seeds_the_player_from_the_lookup_snapshot() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot(
        "Alice#VN2",
        Some("VN2_100"),
        Some(Rank::new("GOLD", "II", 34)),
    ));
    let enrollment = enrollment(&store, &provider);

    let session = enrollment
        .lookup_at(" alice#vn2 ", Region::Vn, OWNER, at(0))
        .await
        .unwrap();
    assert_eq!(session.key, "alice#vn2");
    assert_eq!(session.owner_id, OWNER);

    let player = enrollment
        .confirm_at("ALICE#VN2", OWNER, CHANNEL, at(120))
        .await
        .unwrap();

    assert_eq!(player.riot_id.to_string(), "Alice#VN2");
    assert_eq!(player.notify_channel, CHANNEL);
    assert_eq!(player.last_match_id.as_deref(), Some("VN2_100"));
    assert_eq!(player.last_rank, Some(Rank::new("GOLD", "II", 34)));
    assert_eq!(player.settings, PlayerSettings::default());

    assert_eq!(store.get_player("alice#vn2").await.unwrap(), Some(player));
    assert!(store.get_session("alice#vn2").await.unwrap().is_none());
}

#[tokio::test]
async fn session_is_valid_up_to_the_ttl() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot("Alice#VN2", None, None));
    let enrollment = enrollment(&store, &provider);

    enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();

    let confirmed = enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, at(0) + Duration::minutes(30))
        .await;
    assert!(confirmed.is_ok());
}

#[tokio::test]
async fn session_ttl_holds_for_sub_second_lookups() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot("Alice#VN2", None, None));
    provider.profile(snapshot("Bob#VN2", None, None));
    let enrollment = enrollment(&store, &provider);

    let opened = at(0) + Duration::milliseconds(900);
    let session = enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, opened)
        .await
        .unwrap();
    let stored = store.get_session("alice#vn2").await.unwrap().unwrap();
    assert_eq!(stored.created_at, session.created_at);
    assert_eq!(stored.created_at, opened);

    let inside = opened + Duration::minutes(29) + Duration::milliseconds(59_500);
    let player = enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, inside)
        .await
        .unwrap();
    assert_eq!(store.get_player("alice#vn2").await.unwrap(), Some(player));

    // Exactly at the deadline is still accepted.
    let opened = at(10) + Duration::milliseconds(250);
    enrollment
        .lookup_at("Bob#VN2", Region::Vn, OWNER, opened)
        .await
        .unwrap();
    let confirmed = enrollment
        .confirm_at("Bob#VN2", OWNER, CHANNEL, opened + Duration::minutes(30))
        .await;
    assert!(confirmed.is_ok());
}

#[tokio::test]
async fn expired_session_does_not_create_a_player() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot("Alice#VN2", None, None));
    let enrollment = enrollment(&store, &provider);

    enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();

    let late = at(0) + Duration::minutes(30) + Duration::seconds(1);
    let res = enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, late)
        .await;

    assert!(matches!(res, Err(EnrollmentError::SessionExpired(_))));
    assert!(store.get_player("alice#vn2").await.unwrap().is_none());

    // The expired session is gone; a new lookup is required.
    let again = enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, at(1))
        .await;
    assert!(matches!(again, Err(EnrollmentError::NoSession(_))));
}

#[tokio::test]
async fn only_the_session_owner_can_confirm() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot("Alice#VN2", None, None));
    let enrollment = enrollment(&store, &provider);

    enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();

    let res = enrollment
        .confirm_at("Alice#VN2", OTHER_OWNER, CHANNEL, at(10))
        .await;

    assert!(matches!(res, Err(EnrollmentError::OwnerMismatch)));
    assert!(store.get_player("alice#vn2").await.unwrap().is_none());
    assert!(store.get_session("alice#vn2").await.unwrap().is_some());

    enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, at(20))
        .await
        .unwrap();
}

#[tokio::test]
async fn confirm_without_lookup_fails() {
    let store = store().await;
    let provider = FakeProvider::new();
    let enrollment = enrollment(&store, &provider);

    let res = enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, at(0))
        .await;

    assert!(matches!(res, Err(EnrollmentError::NoSession(_))));
}

#[tokio::test]
async fn invalid_identity_never_reaches_the_provider() {
    let store = store().await;
    let provider = FakeProvider::new();
    let enrollment = enrollment(&store, &provider);

    for raw in ["alice", "#VN2", "alice#", "a#b#c"] {
        let res = enrollment.lookup_at(raw, Region::Vn, OWNER, at(0)).await;
        assert!(
            matches!(res, Err(EnrollmentError::InvalidFormat(_))),
            "{raw} should be rejected"
        );
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn provider_failures_map_to_lookup_errors() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.set("Ghost#404", Reply::NotFound);
    provider.set("Busy#429", Reply::RateLimited);
    let enrollment = enrollment(&store, &provider);

    let missing = enrollment
        .lookup_at("Ghost#404", Region::Vn, OWNER, at(0))
        .await;
    assert!(matches!(missing, Err(EnrollmentError::NotFound)));

    let busy = enrollment
        .lookup_at("Busy#429", Region::Vn, OWNER, at(0))
        .await;
    assert!(matches!(
        busy,
        Err(EnrollmentError::ProviderUnavailable(ProviderError::RateLimited))
    ));

    assert!(store.get_session("ghost#404").await.unwrap().is_none());
}

#[tokio::test]
async fn tracked_identities_are_rejected() {
    let store = store().await;
    let provider = FakeProvider::new();
    enroll(
        &store,
        &provider,
        snapshot("Alice#VN2", Some("VN2_1"), None),
        OWNER,
        CHANNEL,
    )
    .await;
    let calls_before = provider.calls().len();

    let res = enrollment(&store, &provider)
        .lookup_at("alice#VN2", Region::Vn, OTHER_OWNER, at(100))
        .await;

    assert!(matches!(res, Err(EnrollmentError::AlreadyTracked(_))));
    assert_eq!(provider.calls().len(), calls_before);
}

#[tokio::test]
async fn a_new_lookup_replaces_the_pending_session() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot("Alice#VN2", Some("VN2_1"), None));
    let enrollment = enrollment(&store, &provider);

    enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();
    enrollment
        .lookup_at("Alice#VN2", Region::Euw, OTHER_OWNER, at(5))
        .await
        .unwrap();

    let res = enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, at(10))
        .await;
    assert!(matches!(res, Err(EnrollmentError::OwnerMismatch)));

    let player = enrollment
        .confirm_at("Alice#VN2", OTHER_OWNER, CHANNEL, at(10))
        .await
        .unwrap();
    assert_eq!(player.region, Region::Euw);
}

#[tokio::test]
async fn cancel_respects_ownership() {
    let store = store().await;
    let provider = FakeProvider::new();
    provider.profile(snapshot("Alice#VN2", None, None));
    provider.profile(snapshot("Bob#VN2", None, None));
    let enrollment = enrollment(&store, &provider);

    enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();
    enrollment
        .lookup_at("Bob#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();

    assert!(!enrollment.cancel("Alice#VN2", OTHER_OWNER).await.unwrap());
    assert!(enrollment.cancel("alice#vn2", OWNER).await.unwrap());
    assert!(!enrollment.cancel("alice#vn2", OWNER).await.unwrap());

    assert_eq!(enrollment.cancel_all(OTHER_OWNER).await.unwrap(), 0);
    assert_eq!(enrollment.cancel_all(OWNER).await.unwrap(), 1);

    let res = enrollment
        .confirm_at("Bob#VN2", OWNER, CHANNEL, at(10))
        .await;
    assert!(matches!(res, Err(EnrollmentError::NoSession(_))));
}

#[tokio::test]
async fn untrack_by_position_or_identity() {
    let store = store().await;
    let provider = FakeProvider::new();
    for name in ["Alice#VN2", "Bob#VN2", "Carol#VN2"] {
        enroll(&store, &provider, snapshot(name, None, None), OWNER, CHANNEL).await;
    }
    enroll(
        &store,
        &provider,
        snapshot("Dave#VN2", None, None),
        OTHER_OWNER,
        CHANNEL,
    )
    .await;
    let enrollment = enrollment(&store, &provider);

    let removed = enrollment
        .untrack(&UntrackTarget::Index(2), OWNER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.key, "bob#vn2");

    let removed = enrollment
        .untrack(&"CAROL#vn2".parse().unwrap(), OWNER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.key, "carol#vn2");

    // Out of range, zero, and someone else's player.
    assert!(
        enrollment
            .untrack(&UntrackTarget::Index(5), OWNER)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        enrollment
            .untrack(&UntrackTarget::Index(0), OWNER)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        enrollment
            .untrack(&"Dave#VN2".parse().unwrap(), OWNER)
            .await
            .unwrap()
            .is_none()
    );

    let owned: Vec<_> = enrollment
        .list_owned(OWNER)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.key)
        .collect();
    assert_eq!(owned, ["alice#vn2"]);
    assert!(store.get_player("dave#vn2").await.unwrap().is_some());
}

#[tokio::test]
async fn roster_is_capped() {
    let store = store().await;
    let provider = FakeProvider::new();
    let enrollment = Enrollment::new(store.clone(), provider.clone(), Duration::minutes(30), 1);

    provider.profile(snapshot("Alice#VN2", None, None));
    provider.profile(snapshot("Bob#VN2", None, None));

    enrollment
        .lookup_at("Alice#VN2", Region::Vn, OWNER, at(0))
        .await
        .unwrap();
    enrollment
        .confirm_at("Alice#VN2", OWNER, CHANNEL, at(1))
        .await
        .unwrap();

    enrollment
        .lookup_at("Bob#VN2", Region::Vn, OWNER, at(2))
        .await
        .unwrap();
    let res = enrollment
        .confirm_at("Bob#VN2", OWNER, CHANNEL, at(3))
        .await;

    assert!(matches!(res, Err(EnrollmentError::RosterFull(1))));
    assert_eq!(store.count_players().await.unwrap(), 1);
}

#[tokio::test]
async fn settings_are_owner_only() {
    let store = store().await;
    let provider = FakeProvider::new();
    enroll(
        &store,
        &provider,
        snapshot("Alice#VN2", None, None),
        OWNER,
        CHANNEL,
    )
    .await;
    let enrollment = enrollment(&store, &provider);

    let settings = enrollment
        .update_settings("Alice#VN2", OWNER, None, Some(true))
        .await
        .unwrap();
    assert_eq!(
        settings,
        PlayerSettings {
            mention_on_notify: true,
            include_extra_analysis: true,
        }
    );

    let res = enrollment
        .update_settings("Alice#VN2", OTHER_OWNER, Some(false), None)
        .await;
    assert!(matches!(res, Err(EnrollmentError::NotTracked(_))));

    let stored = store.get_player("alice#vn2").await.unwrap().unwrap();
    assert_eq!(stored.settings, settings);
}

#[test]
fn untrack_target_parse_errors_are_identity_errors() {
    let err = "nope".parse::<UntrackTarget>().unwrap_err();
    assert!(matches!(err, IdentityError::MissingSeparator(_)));
}
