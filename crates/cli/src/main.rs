//! Service booking CLI - drive the booking API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in; the session is kept in BOOKING_SESSION_FILE. The password comes
//! # from -p, BOOKING_PASSWORD or the first line of stdin.
//! echo "$PASSWORD" | booking-cli login -e jane@example.com
//!
//! # Browse and book
//! booking-cli services list
//! booking-cli bookings create --service 3 --date 2026-11-02
//!
//! # Admin maintenance
//! booking-cli services create -n "Deep tissue" --price 80
//! booking-cli bookings all
//!
//! # Ask the route guard where a page would lead
//! booking-cli visit /admin/services --admin
//! ```
//!
//! # Commands
//!
//! - `login`, `register`, `logout`, `whoami` - Session management
//! - `services` - List and maintain services
//! - `bookings` - List and create bookings
//! - `visit` - Evaluate the navigation guards for a path

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use service_booking_client::{AppState, ClientConfig, FileStorage, History};
use service_booking_core::{Email, Price, ServiceId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "booking-cli")]
#[command(author, version, about = "Service booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: Email,

        /// Account password (read from stdin when neither flag nor env is set)
        #[arg(short, long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: Email,

        /// Account password (read from stdin when neither flag nor env is set)
        #[arg(short, long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List and maintain services
    Services {
        #[command(subcommand)]
        action: ServicesAction,
    },
    /// List and create bookings
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },
    /// Show where navigating to a path would lead
    Visit {
        /// Target path, e.g. `/bookings`
        path: String,

        /// Also apply the admin page gate
        #[arg(long)]
        admin: bool,
    },
}

#[derive(Subcommand)]
enum ServicesAction {
    /// List services
    List,
    /// Create a service (admin)
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Price, e.g. `49.99`
        #[arg(long)]
        price: Price,

        /// Create the service hidden from customers
        #[arg(long)]
        inactive: bool,

        #[arg(long)]
        featured: bool,
    },
    /// Update fields of a service (admin)
    Update {
        id: ServiceId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<Price>,

        #[arg(long)]
        active: Option<bool>,

        #[arg(long)]
        featured: Option<bool>,
    },
    /// Delete a service (admin)
    Delete { id: ServiceId },
}

#[derive(Subcommand)]
enum BookingsAction {
    /// List your bookings
    List,
    /// Book a service
    Create {
        /// Service to book
        #[arg(short, long)]
        service: ServiceId,

        /// Booking date, e.g. `2026-11-02`
        #[arg(short, long)]
        date: String,
    },
    /// List every user's bookings (admin)
    All,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Both ring and aws-lc may be linked in; pick one before any TLS use.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "service_booking_client=info,service_booking_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Arc::new(FileStorage::new(&config.session_file));
    let history = Arc::new(History::new());
    let state = AppState::new(config, storage, history.clone())?;
    state.initialize().await?;

    match cli.command {
        Commands::Login { email, password } => {
            let password = commands::auth::resolve_password(password, std::io::stdin().lock())?;
            commands::auth::login(&state, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let password = commands::auth::resolve_password(password, std::io::stdin().lock())?;
            commands::auth::register(&state, name, email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&state).await?,
        Commands::Whoami => commands::auth::whoami(&state).await?,
        Commands::Services { action } => match action {
            ServicesAction::List => commands::services::list(&state).await?,
            ServicesAction::Create {
                name,
                description,
                price,
                inactive,
                featured,
            } => {
                let service = service_booking_core::NewService {
                    name,
                    description,
                    price,
                    is_active: !inactive,
                    is_featured: featured,
                };
                commands::services::create(&state, &service).await?;
            }
            ServicesAction::Update {
                id,
                name,
                description,
                price,
                active,
                featured,
            } => {
                let update = service_booking_core::ServiceUpdate {
                    name,
                    description,
                    price,
                    is_active: active,
                    is_featured: featured,
                };
                commands::services::update(&state, id, &update).await?;
            }
            ServicesAction::Delete { id } => commands::services::delete(&state, id).await?,
        },
        Commands::Bookings { action } => match action {
            BookingsAction::List => commands::bookings::list(&state).await?,
            BookingsAction::Create { service, date } => {
                commands::bookings::create(&state, service, date).await?;
            }
            BookingsAction::All => commands::bookings::all(&state).await?,
        },
        Commands::Visit { path, admin } => {
            commands::visit(&state, &history, &path, admin).await;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_password_flag_is_optional() {
        let cli = Cli::try_parse_from(["booking-cli", "login", "-e", "jane@example.com"]).unwrap();
        assert!(matches!(cli.command, Commands::Login { .. }));
    }

    #[test]
    fn test_login_password_flag_still_accepted() {
        let cli = Cli::try_parse_from([
            "booking-cli",
            "login",
            "-e",
            "jane@example.com",
            "-p",
            "pw",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Login { password: Some(ref p), .. } if p == "pw"));
    }
}
