//! Terminal entry point.
//!
//! Opens the store database, logs in the default cashier, and runs one
//! scripted transaction end to end so a fresh checkout of the repo has a
//! working register to poke at. Real frontends link `milktea_terminal` as a
//! library instead.

use milktea_core::{LevelOption, Money, PromotionStrategy, SizeOption};
use milktea_db::{Database, DbConfig};
use milktea_terminal::{config, AppConfig, CheckoutService, Session};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    milktea_terminal::init_tracing();

    let app_config = AppConfig::from_env();
    let db_path = config::database_path()?;
    info!(path = %db_path.display(), "Opening store database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    if db.menu().count().await? == 0 {
        warn!("Menu is empty. Run the seed binary first:");
        warn!("    cargo run -p milktea-db --bin seed -- --db {}", db_path.display());
        return Ok(());
    }

    let session = Session::login(&db, "admin", "admin123").await?;
    info!(user = %session.username(), "Logged in");

    let checkout = CheckoutService::new(db, app_config);

    checkout.start_order();
    let summary = checkout
        .add_item(
            "Trà sữa truyền thống",
            &["Trân châu đen".to_string()],
            SizeOption::Large,
            2,
            LevelOption::Half,
            LevelOption::Full,
        )
        .await?;
    info!(subtotal = %Money::from_vnd(summary.subtotal_vnd), "Order built");

    checkout.apply_promotion(PromotionStrategy::AmountOff(Money::from_vnd(20_000)))?;

    let sale = checkout.checkout(&session, None, None).await?;
    info!(transaction = %sale.transaction_id, "Payment approved");

    println!("{}", sale.rendered);
    Ok(())
}
