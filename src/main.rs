//! Console host for the clubcard core.
//!
//! Wires adapters from configuration (explicit injection, no ambient
//! client selection) and walks the demo flow: sign in as the seeded
//! admin, print the card payload and roster, grant one membership, sign
//! out. With `CLUBCARD__BACKEND__*` set, profile reads and writes go to
//! the real PostgREST backend instead of the in-memory stand-in.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use clubcard::adapters::auth::InMemoryAuthGateway;
use clubcard::adapters::store::{InMemoryProfileStore, PostgrestStore};
use clubcard::application::CardService;
use clubcard::config::AppConfig;
use clubcard::domain::foundation::UserId;
use clubcard::domain::profile::{CardPayload, Profile, Role};
use clubcard::ports::ProfileStore;

/// The directory the stand-in store starts with.
fn demo_rows() -> anyhow::Result<Vec<Profile>> {
    let row = |id: &str, email: &str, name: &str, role, is_member| -> anyhow::Result<Profile> {
        Ok(Profile {
            id: UserId::new(id)?,
            email: Some(email.to_string()),
            full_name: Some(name.to_string()),
            role: Some(role),
            is_member,
        })
    };
    Ok(vec![
        row("admin-1", "admin@bde.valrose", "Admin BDE", Role::Admin, true)?,
        row("user-1", "user1@etu.uc", "Alice Martin", Role::User, false)?,
        row("user-2", "user2@etu.uc", "Léo Durand", Role::User, true)?,
    ])
}

fn print_roster(service: &CardService) {
    let roster = service.roster();
    println!("Roster ({} entries):", roster.len());
    for entry in roster {
        let mark = if entry.is_member { "x" } else { " " };
        println!("  [{mark}] {}", entry.display_name());
    }
}

/// Give the lifecycle bridge a beat to apply the latest session event.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    let store: Arc<dyn ProfileStore> = match &config.backend {
        Some(backend) => {
            tracing::info!(url = %backend.url, table = %backend.table, "using PostgREST backend");
            Arc::new(PostgrestStore::new(
                &backend.url,
                backend.api_key.clone(),
                &backend.table,
            ))
        }
        None => {
            tracing::info!("no backend configured, using in-memory stand-in");
            Arc::new(InMemoryProfileStore::seeded(demo_rows()?))
        }
    };

    let auth = Arc::new(
        InMemoryAuthGateway::new()
            .with_account("admin@bde.valrose", UserId::new("admin-1")?)
            .with_account("user1@etu.uc", UserId::new("user-1")?)
            .with_account("user2@etu.uc", UserId::new("user-2")?),
    );

    let payload = CardPayload::new(config.card.club_name.clone(), config.card.season());
    let service = CardService::new(store, auth, payload);

    let bridge = {
        let service = service.clone();
        tokio::spawn(async move { service.run().await })
    };

    service.send_sign_in_link("admin@bde.valrose").await?;
    settle().await;

    match service.card_payload() {
        Some(card) => println!("{card}\n"),
        None => println!(
            "no card: {}\n",
            service.resolution_error().unwrap_or_else(|| "not signed in".to_string())
        ),
    }
    print_roster(&service);

    let target = UserId::new("user-1")?;
    service.set_membership(&target, true).await?;
    println!("\nAfter granting membership to user-1:");
    print_roster(&service);

    service.sign_out().await?;
    settle().await;
    bridge.abort();
    Ok(())
}
