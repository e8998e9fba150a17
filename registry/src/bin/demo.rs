//! Event Registry Demo
//!
//! Walks through the registry lifecycle against in-memory stores:
//! - Registering a user
//! - Creating a single-seat event
//! - Booking until the event is full
//! - Deleting the event as its owner
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin demo
//! ```

use anyhow::Context;
use event_registry::payloads::{
    BookEventPayload, DeleteEventPayload, EventsPayload, ModifyEventPayload, ProfilePayload,
    RegisterUserPayload,
};
use event_registry::{Config, Registry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        default_role = %config.default_role,
        rename_policy = %config.rename_policy,
        "Configuration loaded"
    );

    let registry = Registry::in_memory(&config);

    println!("\n=== Event Registry Demo ===\n");

    println!("1. Registering alice...");
    let msg = registry.register_user(RegisterUserPayload {
        username: "alice".to_string(),
    })?;
    println!("   {msg}");

    println!("2. Creating a one-seat event...");
    let msg = registry.create_event(EventsPayload {
        event_poster: "https://example.com/launch.png".to_string(),
        name_of_event: "Launch".to_string(),
        location_of_event: "Main Hall".to_string(),
        requirements: "RSVP".to_string(),
        owner: "alice".to_string(),
        date: "2025-06-01".to_string(),
        capacity: 1,
        is_public: true,
    })?;
    println!("   {msg}");

    println!("3. Booking for bob and carol...");
    for user in ["bob", "carol"] {
        match registry.book_event(BookEventPayload {
            user: user.to_string(),
            event_name: "Launch".to_string(),
        }) {
            Ok(msg) => println!("   {user}: {msg}"),
            Err(err) => println!("   {user}: {err}"),
        }
    }

    println!("4. Moving the event...");
    let msg = registry.modify_event(ModifyEventPayload {
        name_of_event: "Launch".to_string(),
        new_location: Some("Rooftop".to_string()),
        new_date: None,
        new_capacity: None,
    })?;
    println!("   {msg}");

    for event in registry.get_all_events() {
        println!(
            "   {} @ {} (v{}, {}/{} booked)",
            event.name_of_event,
            event.location_of_event,
            event.version,
            event.attendance.len(),
            event.capacity
        );
    }

    println!("5. Deleting the event as alice...");
    let msg = registry
        .delete_event(DeleteEventPayload {
            name_of_event: "Launch".to_string(),
            owner_of_event: "alice".to_string(),
        })
        .context("owner should be able to delete")?;
    println!("   {msg}");

    let remaining = registry.list_created_events(ProfilePayload {
        user: "alice".to_string(),
    })?;
    println!("   alice's events: {remaining:?}");

    let drift = registry.check_consistency();
    println!("   drift findings: {}", drift.len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
