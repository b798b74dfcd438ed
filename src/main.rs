use anyhow::Context;
use housing_connect::config::Settings;
use housing_connect::sources::{fixtures, FilterPatch, MockBackend};
use housing_connect::storage::{FileStorage, KeyValueStorage};
use housing_connect::stores::{
    AuthStore, ChatStore, NotificationsStore, PropertiesStore, ResourcesStore,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env().context("Failed to load settings")?;

    info!("🏠 Housing Connect - mock session");
    info!("==================================");
    info!("Persisting state under {}", settings.storage_dir.display());

    let backend = Arc::new(MockBackend::new(settings.delays));
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(&settings.storage_dir));

    let auth = AuthStore::new(backend.clone(), storage.clone());
    let notifications = NotificationsStore::new(backend.clone(), storage);
    let properties = PropertiesStore::new(backend.clone());
    let chat = ChatStore::new(backend.clone());
    let resources = ResourcesStore::new(backend);

    // Restore persisted state
    if let Err(err) = auth.restore().await {
        warn!("Could not restore session: {}", err);
    }
    if let Err(err) = notifications.restore().await {
        warn!("Could not restore notifications: {}", err);
    }

    if auth.is_authenticated() {
        info!("Session restored from a previous run");
    } else {
        auth.login(fixtures::DEMO_EMAIL, fixtures::DEMO_PASSWORD).await;
        if let Some(error) = auth.state().error.clone() {
            anyhow::bail!("Login failed: {}", error);
        }
    }
    if let Some(user) = auth.state().user.as_ref() {
        info!("Signed in as {} <{}>", user.name, user.email);
    }

    // Browse listings
    properties.fetch().await;
    properties.set_filters(FilterPatch::new().max_price(8000).furnished(true));
    properties.set_search_query("studio");
    let first_match = properties
        .state()
        .filtered_properties
        .first()
        .map(|property| property.id.clone());
    if let Some(property_id) = first_match {
        properties.toggle_favorite(&property_id);
    }

    {
        let state = properties.state();
        info!(
            "\n✅ {} of {} listings match \"{}\"\n",
            state.filtered_properties.len(),
            state.properties.len(),
            state.search_query
        );
        for (i, property) in state.filtered_properties.iter().enumerate() {
            println!(
                "{}. {} ({} {}/month)",
                i + 1,
                property.title,
                property.price,
                property.currency
            );
            println!("   {}, {} {}", property.address, property.postal_code, property.city);
            println!(
                "   {} rooms, {} m², furnished: {}",
                property.rooms, property.size, property.furnished
            );
            if let Some(distance) = property.distance {
                println!("   {:.1} km from campus", distance);
            }
            println!("   Amenities: {}", property.amenities.join(", "));
            println!("   Favorite: {}", property.is_favorite);
            println!();
        }
    }

    // Chat with the landlord
    chat.fetch_chat_rooms().await;
    chat.fetch_messages("4").await;
    chat.set_current_room(Some("4"));
    chat.send_message("4", "Tomorrow at 3 PM works for me, thanks!").await;
    let leading_room = chat.state().chat_rooms.first().cloned();
    if let Some(room) = leading_room {
        info!(
            "💬 {} now leads the inbox with {} messages",
            room.name,
            chat.messages(&room.id).len()
        );
    }

    // Notifications
    if notifications.state().notifications.is_empty() {
        notifications.fetch().await;
    }
    info!("🔔 {} unread notifications", notifications.unread_count());
    notifications.mark_all_as_read().await;
    info!("🔔 {} unread after marking all read", notifications.unread_count());

    // Guides
    resources.fetch_categories().await;
    resources.fetch_resources().await;
    for resource in resources.search_resources("rental") {
        info!("📚 {} ({})", resource.title, resource.category_name);
    }

    info!("💾 Session state saved to {}", settings.storage_dir.display());

    Ok(())
}
