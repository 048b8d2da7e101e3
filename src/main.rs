use dotenvy::dotenv;
use hisab::{
    auth::{CookieSettings, LocalAuth, MemoryCookieJar, SessionBridge},
    config::{self, database},
    core::{monthly_budget, monthly_category_breakdown, period_summary},
    errors::Result,
    models::MainCategory,
    store::{Fixture, Store},
    sync::{RemoteStore, SyncAdapter, SyncEngine},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;

    // 4. Open the remote store so the schema exists before anyone signs in
    let remote = RemoteStore::connect(database::get_database_url(&app_config))
        .await
        .inspect_err(|e| error!("Failed to open remote store: {}", e))?;

    // 5. Wire the Local Store to the sync engine; with nobody signed in it holds the fixture
    let fixture = match &app_config.fixture_path {
        Some(path) => Fixture::load(path)
            .inspect_err(|e| error!("Failed to load fixture {}: {}", path.display(), e))?,
        None => Fixture::demo()?,
    };
    let auth = LocalAuth::new();
    let adapter = Arc::new(SyncAdapter::new(remote, auth.clone()));
    let store = Store::new();
    let mut engine = SyncEngine::new(adapter, store.clone()).with_fixture(fixture);
    engine.on_auth_change(None).await;

    // 6. Bring the session cookie in line with the (signed-out) auth state
    let cookies = MemoryCookieJar::new(CookieSettings::from_config(&app_config));
    SessionBridge::new(auth, cookies.clone()).sync().await?;
    info!(
        authenticated = cookies.is_authenticated(),
        set_cookie = %cookies.set_cookie_header(),
        "Session cookie synced"
    );

    // 7. Report the most recent month in the data
    let state = store.read().await;
    let ledger = state.ledger();
    let Some((year, month)) = ledger.entries().iter().map(|e| (e.year, e.month)).max() else {
        info!("No entries to report.");
        return Ok(());
    };

    let summary = period_summary(ledger.entries(), year, Some(month));
    info!(
        year,
        month,
        income = %summary.total_income,
        expense = %summary.total_expense,
        balance = %summary.balance,
        transactions = summary.transaction_count,
        "Period summary"
    );

    let breakdown = monthly_category_breakdown(ledger.entries(), &MainCategory::ALL, year, month);
    for row in &breakdown.rows {
        info!(
            category = row.category.id(),
            month_total = %row.monthly_total.unwrap_or_default(),
            all_time = %row.total,
            "Category total"
        );
    }

    let budget = monthly_budget(ledger, year, month);
    info!(
        planned = %budget.planned,
        spent = %budget.spent,
        remaining = %budget.remaining,
        debit = %budget.debit,
        source = ?budget.debit_source,
        "Monthly budget"
    );

    Ok(())
}
