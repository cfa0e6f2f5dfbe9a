//! End-to-end flows over the in-memory adapters: sign-in to card payload,
//! admin roster and membership mutation, first-sign-in provisioning on a
//! poor client, and discarding a resolution superseded mid-flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use clubcard::adapters::auth::InMemoryAuthGateway;
use clubcard::adapters::store::InMemoryProfileStore;
use clubcard::application::CardService;
use clubcard::domain::foundation::{Session, UserId};
use clubcard::domain::profile::{CardPayload, Profile, Role, Season};
use clubcard::ports::{ProfileQuery, ProfileStore, StoreCapabilities, StoreError};

fn row(id: &str, email: &str, name: &str, role: Role, is_member: bool) -> Profile {
    Profile {
        id: UserId::new(id).unwrap(),
        email: Some(email.to_string()),
        full_name: Some(name.to_string()),
        role: Some(role),
        is_member,
    }
}

fn payload() -> CardPayload {
    CardPayload::new("BDE Valrose", Season::starting(2025))
}

async fn wait_until(service: &CardService, pred: impl Fn(&CardService) -> bool) {
    for _ in 0..100 {
        if pred(service) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 1s");
}

#[tokio::test]
async fn admin_signs_in_sees_card_and_roster_and_grants_membership() {
    let store = Arc::new(InMemoryProfileStore::seeded(vec![
        row("admin-1", "admin@bde.valrose", "Admin BDE", Role::Admin, true),
        row("user-1", "user1@etu.uc", "Alice Martin", Role::User, false),
        row("user-2", "user2@etu.uc", "Léo Durand", Role::User, true),
    ]));
    let auth = Arc::new(
        InMemoryAuthGateway::new().with_account("admin@bde.valrose", UserId::new("admin-1").unwrap()),
    );
    let service = CardService::new(store.clone(), auth.clone(), payload());

    let bridge = {
        let service = service.clone();
        tokio::spawn(async move { service.run().await })
    };

    service.send_sign_in_link("admin@bde.valrose").await.unwrap();
    wait_until(&service, |s| s.profile().is_some()).await;

    let card = service.card_payload().unwrap();
    assert!(card.starts_with("BDE Valrose – Carte 2025/2026\r\n"));
    assert!(card.contains("Nom : Admin BDE"));
    assert!(card.ends_with("Statut : Adhérent validé"));

    wait_until(&service, |s| !s.roster().is_empty()).await;
    let names: Vec<String> = service
        .roster()
        .iter()
        .map(|p| p.display_name().to_string())
        .collect();
    assert_eq!(names, vec!["Admin BDE", "Alice Martin", "Léo Durand"]);

    // Grant membership: remote row and roster projection both flip.
    let target = UserId::new("user-1").unwrap();
    service.set_membership(&target, true).await.unwrap();
    assert!(service.roster().iter().find(|p| p.id == target).unwrap().is_member);
    assert!(store.snapshot().iter().find(|p| p.id == target).unwrap().is_member);

    // A token refresh re-resolves without losing anything.
    auth.refresh_token();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(service.profile().is_some());

    service.sign_out().await.unwrap();
    wait_until(&service, |s| s.profile().is_none()).await;
    assert!(service.session().is_none());
    assert!(service.roster().is_empty());
    assert!(service.card_payload().is_none());

    bridge.abort();
}

#[tokio::test]
async fn first_sign_in_on_a_scan_only_client_provisions_one_row() {
    let caps = StoreCapabilities { insert: true, ..StoreCapabilities::MINIMAL };
    let store = Arc::new(InMemoryProfileStore::new().with_capabilities(caps));
    let auth = Arc::new(InMemoryAuthGateway::new());
    let service = CardService::new(store.clone(), auth, payload());

    let bridge = {
        let service = service.clone();
        tokio::spawn(async move { service.run().await })
    };

    service.send_sign_in_link("newbie@etu.uc").await.unwrap();
    wait_until(&service, |s| s.profile().is_some()).await;

    let profile = service.profile().unwrap();
    assert_eq!(profile.email.as_deref(), Some("newbie@etu.uc"));
    assert_eq!(profile.full_name.as_deref(), Some("newbie@etu.uc"));
    assert_eq!(profile.role, Some(Role::User));
    assert!(!profile.is_member);
    assert_eq!(store.snapshot().len(), 1);

    // Signing in again resolves the same row instead of creating another.
    service.sign_out().await.unwrap();
    wait_until(&service, |s| s.profile().is_none()).await;
    service.send_sign_in_link("newbie@etu.uc").await.unwrap();
    wait_until(&service, |s| s.profile().is_some()).await;
    assert_eq!(store.snapshot().len(), 1);

    bridge.abort();
}

/// Store whose reads block until a permit is released, so a resolution can
/// be held in flight while the session changes underneath it.
struct GatedStore {
    inner: InMemoryProfileStore,
    gate: Arc<Semaphore>,
}

#[async_trait]
impl ProfileStore for GatedStore {
    fn capabilities(&self) -> StoreCapabilities {
        self.inner.capabilities()
    }

    async fn select(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError> {
        self.gate.acquire().await.unwrap().forget();
        self.inner.select(query).await
    }

    async fn select_single(&self, id: &UserId) -> Result<Profile, StoreError> {
        self.gate.acquire().await.unwrap().forget();
        self.inner.select_single(id).await
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        self.inner.insert(profile).await
    }

    async fn update_membership(&self, id: &UserId, is_member: bool) -> Result<(), StoreError> {
        self.inner.update_membership(id, is_member).await
    }
}

#[tokio::test]
async fn superseded_resolution_is_discarded_not_applied() {
    let gate = Arc::new(Semaphore::new(0));
    let store = Arc::new(GatedStore {
        inner: InMemoryProfileStore::seeded(vec![row(
            "user-1",
            "user1@etu.uc",
            "Alice Martin",
            Role::User,
            true,
        )]),
        gate: gate.clone(),
    });
    let auth = Arc::new(InMemoryAuthGateway::new());
    let service = CardService::new(store, auth, payload());

    let session = Session::new(UserId::new("user-1").unwrap(), Some("user1@etu.uc".to_string()));
    let in_flight = {
        let service = service.clone();
        tokio::spawn(async move { service.apply_session(Some(session)).await })
    };
    // Let the spawned resolution reach the gated read.
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The user signs out while the lookup is still in flight.
    service.apply_session(None).await;
    assert!(service.profile().is_none());

    // The stale lookup completes, but its result must be discarded.
    gate.add_permits(1);
    in_flight.await.unwrap();

    assert!(service.session().is_none());
    assert!(service.profile().is_none());
    assert!(service.resolution_error().is_none());
}
