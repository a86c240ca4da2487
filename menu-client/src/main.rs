//! menu-watch: follow a restaurant's live menu from the terminal
//!
//! Usage: `menu-watch [--veg] [search term]`

use anyhow::bail;
use menu_client::{BackendClient, ClientConfig};
use menu_engine::{LiveMenu, MenuFeed, MenuView, setup_environment};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn print_view(view: &MenuView) {
    println!("── revision {} · {} items ──", view.revision, view.item_count());
    for section in &view.sections {
        println!("{}", section.category.name);
        for item in &section.items {
            match item.base_price {
                Some(price) => println!("  {:<40} {:>8.2}", item.name, price),
                None => println!("  {}", item.name),
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, config, logging)
    let config = setup_environment()?;
    if config.restaurant_id.is_empty() {
        bail!("RESTAURANT_ID is not set");
    }

    let mut veg_only = false;
    let mut terms = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--veg" {
            veg_only = true;
        } else {
            terms.push(arg);
        }
    }

    // 2. Backend + menu subscription
    let presets = Arc::new(config.category_presets()?);
    let backend = BackendClient::new(&ClientConfig::from_engine(&config))?;
    let subscription = backend.subscribe_menu_changes(&config.restaurant_id).await?;

    // 3. Live view
    let shutdown = CancellationToken::new();
    let live = LiveMenu::spawn(
        subscription.snapshots(),
        config.restaurant_type,
        presets,
        shutdown.clone(),
    );
    live.set_search(terms.join(" "));
    live.set_veg_only(veg_only);

    let mut views = live.subscribe();
    print_view(&views.borrow_and_update());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print_view(&view);
            }
        }
    }

    shutdown.cancel();
    live.stop().await;
    subscription.unsubscribe().await;
    Ok(())
}
