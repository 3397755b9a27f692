//! `stockdesk` command-line console.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use stockdesk_auth::{decode_claims, layout, SIDEBAR};
use stockdesk_client::{
    AppState, ClientConfig, RecordingNavigator, SessionState, SqliteTokenStore,
};
use stockdesk_inventory::{filter_products, StockStatus};

#[derive(Debug, Parser)]
#[command(name = "stockdesk", about = "Inventory console for the StockDesk backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the session.
    Login {
        username: String,
        #[arg(long, env = "STOCKDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List products.
    Products {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// List categories with product counts.
    Categories,
    /// List suppliers.
    Suppliers,
    /// Show the stock movement log.
    Movements,
    /// Show dashboard figures.
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    stockdesk_observability::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("invalid configuration")?;

    let store = SqliteTokenStore::open(&config.store_path)
        .await
        .with_context(|| {
            format!(
                "failed to open session store at {}",
                config.store_path.display()
            )
        })?;
    let navigator = Arc::new(RecordingNavigator::new());
    let state = AppState::new(&config, Arc::new(store), navigator.clone());

    let restored = state.session.rehydrate().await;
    tracing::debug!(?restored, api_url = %config.api_url, "console ready");

    match cli.command {
        Command::Login { username, password } => {
            let identity = state
                .session
                .login(&username, &password)
                .await
                .context("login failed")?;
            println!("Signed in as {} ({})", identity.display_name, identity.role);
            if let Some(view) = navigator.current() {
                println!("Landing on {view}");
            }
        }
        Command::Logout => {
            state
                .session
                .logout()
                .await
                .context("failed to clear stored session")?;
            println!("Signed out");
        }
        Command::Whoami => whoami(&state),
        Command::Products { search, category } => {
            let products = state.products.list().await?;
            for p in filter_products(&products, &search, category.as_deref()) {
                let stock = match p.stock_status() {
                    StockStatus::OutOfStock => "out of stock".to_string(),
                    StockStatus::InStock(n) => format!("{n} in stock"),
                };
                println!(
                    "{:>5}  {:<12} {:<32} {:>10.2}  {:<16} {}",
                    p.id,
                    p.code.as_deref().unwrap_or("-"),
                    p.name,
                    p.price,
                    stock,
                    p.category.as_deref().unwrap_or("-"),
                );
            }
        }
        Command::Categories => {
            for c in state.categories.list_with_counts().await? {
                println!("{:>5}  {:<32} {}", c.id, c.name, c.product_count.unwrap_or(0));
            }
        }
        Command::Suppliers => {
            for s in state.suppliers.list().await? {
                println!(
                    "{:>5}  {:<24} {:<20} {:<28} {:<20} {:?}",
                    s.id, s.name, s.contact, s.email, s.phone, s.status
                );
            }
        }
        Command::Movements => {
            for m in state.movements.list().await? {
                println!(
                    "{:>5}  {}  {:<28} {:>+6}  {}",
                    m.id,
                    m.date.format("%Y-%m-%d %H:%M"),
                    m.product.name,
                    m.signed_quantity(),
                    m.reference.as_deref().unwrap_or("-"),
                );
            }
        }
        Command::Dashboard => {
            if state.session.state() != SessionState::Authenticated {
                bail!("not signed in; run `stockdesk login <username>` first");
            }
            let view = state.dashboard().await?;
            let s = view.summary;
            println!("Products:       {}", s.total_products);
            println!("Out of stock:   {}", s.out_of_stock);
            println!(
                "Units in/out:   {} / {} (net {})",
                s.inbound_units,
                s.outbound_units,
                s.net_units()
            );
            println!("Recent movements:");
            for m in view.recent {
                println!(
                    "  {}  {:<28} {:>+6}",
                    m.date.format("%Y-%m-%d"),
                    m.product.name,
                    m.signed_quantity()
                );
            }
        }
    }

    Ok(())
}

fn whoami(state: &AppState) {
    let (Some(identity), Some(credential)) =
        (state.session.identity(), state.session.credential())
    else {
        println!("Not signed in");
        return;
    };

    println!("{} <{}>", identity.display_name, identity.email);
    println!("id:   {}", identity.id);
    println!("role: {}", identity.role);
    if let Some(exp) = decode_claims(&credential.access_token)
        .ok()
        .and_then(|claims| claims.expires_at())
    {
        let note = if exp <= chrono::Utc::now() { " (expired)" } else { "" };
        println!("access token expires: {}{note}", exp.to_rfc3339());
    }

    let chrome = layout(state.session.is_authenticated(), stockdesk_auth::View::LANDING);
    if chrome.sidebar {
        let menu: Vec<&str> = SIDEBAR.iter().map(|item| item.label).collect();
        println!("menu: {}", menu.join(" | "));
    }
}
