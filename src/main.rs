use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use contact_directory::api::ApiClient;
use contact_directory::app::Settings;
use contact_directory::controller::Page;
use contact_directory::i18n::{Locale, Msg};
use contact_directory::storage::Store;
use contact_directory::ui::{contact_list, shell, toast};
use contact_directory::utils::{normalize_url, telegram_link};
use contact_directory::server;

#[derive(Parser)]
#[command(name = "contact-directory")]
#[command(about = "Contact directory with Telegram links and an editing mode")]
struct Cli {
    /// Settings file (default: <config dir>/contact-directory.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Contacts service URL
    #[arg(long, global = true)]
    contacts_url: Option<String>,

    /// Auth service URL
    #[arg(long, global = true)]
    auth_url: Option<String>,

    #[arg(long, global = true, value_enum)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the contact directory
    List,
    /// Print the Telegram chat link of a contact
    Link { id: i64 },
    /// Interactive page with editing mode
    Shell,
    /// Run the contacts and auth services
    Serve {
        /// Listen address, e.g. 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
        /// SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Write the default settings file if none exists and print its path
    InitConfig,
}

impl Cli {
    fn settings_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Settings::default_path().context("no config directory on this platform"),
        }
    }

    fn settings(&self) -> anyhow::Result<Settings> {
        let path = self.settings_path()?;
        let mut settings = Settings::load_from(&path).with_context(|| format!("reading {}", path.display()))?;
        if let Some(url) = &self.contacts_url {
            settings.contacts_url = normalize_url(url);
        }
        if let Some(url) = &self.auth_url {
            settings.auth_url = normalize_url(url);
        }
        if let Some(locale) = self.locale {
            settings.locale = locale;
        }
        Ok(settings)
    }
}

fn page(settings: &Settings) -> anyhow::Result<Page<ApiClient>> {
    let api = ApiClient::new(&settings.contacts_url, &settings.auth_url, settings.request_timeout())
        .context("building HTTP client")?;
    Ok(Page::new(api, settings.locale))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if matches!(cli.command, Commands::Serve { .. }) { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let settings = cli.settings()?;

    match &cli.command {
        Commands::List => {
            let mut page = page(&settings)?;
            let loaded = page.list_contacts().await;
            toast::show_notices(page.take_notices());
            if !loaded {
                anyhow::bail!("contacts service unavailable");
            }
            let mut out = std::io::stdout().lock();
            contact_list::render_contacts(&mut out, settings.locale, page.contacts(), false)?;
        }
        Commands::Link { id } => {
            let mut page = page(&settings)?;
            let loaded = page.list_contacts().await;
            toast::show_notices(page.take_notices());
            if !loaded {
                anyhow::bail!("contacts service unavailable");
            }
            match page.contact(*id) {
                Some(contact) => println!("{}", telegram_link(&contact.telegram_username)),
                None => anyhow::bail!("{}", Msg::ContactNotFound.text(settings.locale)),
            }
        }
        Commands::Shell => {
            let mut page = page(&settings)?;
            shell::run_shell(&mut page).await?;
        }
        Commands::Serve { bind, database } => {
            let bind = bind.clone().unwrap_or_else(|| settings.server.bind.clone());
            let db_path = match database.clone().or_else(|| settings.server.database.clone()) {
                Some(path) => path,
                None => Store::default_path()?,
            };
            let store = Store::open(&db_path).with_context(|| format!("opening {}", db_path.display()))?;
            log::info!("database at {}", store.path().display());
            store.bootstrap_admin(&settings.server.bootstrap)?;

            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("binding {bind}"))?;
            server::serve(listener, store, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    log::error!("cannot listen for shutdown signal: {e}");
                }
                log::info!("shutting down");
            })
            .await?;
        }
        Commands::InitConfig => {
            let path = cli.settings_path()?;
            if path.exists() {
                log::info!("settings already present");
            } else {
                Settings::default().save_to(&path)?;
                log::info!("wrote default settings");
            }
            println!("{}", path.display());
        }
    }
    Ok(())
}
