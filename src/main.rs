mod actor_framework;
mod admin;
mod app_system;
mod cart_store;
mod catalog;
mod checkout;
mod clients;
mod config;
mod dish_actor;
mod domain;
mod history;
mod order_actor;
mod pricing;
mod restaurant_actor;
mod session;
mod user_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use tracing::{error, info, Instrument};

use crate::app_system::{cart_repository, seed, setup_tracing, Storefront, StorefrontSystem};
use crate::checkout::CheckoutRequest;
use crate::config::Config;
use crate::domain::{OrderStatus, PaymentMethod};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = Config::load().context("loading configuration")?;
    info!(?config, "Starting campus storefront");

    let system = StorefrontSystem::start(config.actor_buffer);
    let catalog = seed::seed_demo_catalog(&system)
        .await
        .context("seeding demo catalog")?;

    let storefront = Storefront::from_system(&system, cart_repository(&config));

    let span = tracing::info_span!("browse");
    let menu = async {
        let featured = storefront.featured_restaurants().await?;
        info!(count = featured.len(), "Featured restaurants");
        let indian = storefront.browse_restaurants("spice", Some("Indian")).await?;
        info!(matches = indian.len(), "Search results");
        storefront.restaurant_menu(&catalog.restaurant_ids[0]).await
    }
    .instrument(span)
    .await?;

    info!(
        restaurant = %menu.restaurant.name,
        status = menu.restaurant.availability_label(),
        "Menu loaded"
    );
    for section in &menu.sections {
        let spicy = section.dishes.iter().filter(|d| d.is_spicy()).count();
        info!(category = %section.category, dishes = section.dishes.len(), spicy, "Menu section");
    }

    storefront.sign_in(seed::DEMO_STUDENT_EMAIL).await?;

    let span = tracing::info_span!("cart");
    async {
        let dish_ids = &catalog.dish_ids[0];
        storefront.add_to_cart(&dish_ids[0]).await?;
        storefront.add_to_cart(&dish_ids[0]).await?;
        for _ in 0..3 {
            storefront.add_to_cart(&dish_ids[3]).await?;
        }
        info!(summary = %storefront.cart_summary(), "Cart ready");
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    let request = CheckoutRequest {
        payment_method: PaymentMethod::Wallet,
        special_instructions: Some("Extra mint chutney".to_string()),
    };
    match storefront.checkout(request).await {
        Ok(placed) => {
            info!(order_id = %placed.order_id, summary = %placed.summary, "Order placed");
            system
                .order_client
                .update_status(placed.order_id, OrderStatus::Ready)
                .await?;
        }
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    for order in storefront.order_history().await? {
        info!(
            reference = %order.reference,
            restaurant = order.restaurant_name.as_deref().unwrap_or("unknown"),
            status = %order.status.badge(),
            pickup_code = order.pickup_code.as_deref().unwrap_or("-"),
            "Order"
        );
    }

    if let Err(e) = storefront.admin_dashboard().await {
        info!(error = %e, "Dashboard hidden from students");
    }
    storefront.sign_in(seed::DEMO_ADMIN_EMAIL).await?;
    info!(stats = %storefront.admin_dashboard().await?, "Admin dashboard");

    storefront.sign_out().await;
    drop(storefront);
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(())
}
