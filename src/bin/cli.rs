//! Bichance CLI
//!
//! Command-line access to the Bichance backend:
//! - Sign in with an emailed OTP
//! - Browse and book dinners
//! - Start and inspect memberships
//! - Edit the profile
//! - Admin dinner scheduling

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use bichance::auth::OtpFlow;
use bichance::booking::{BookingError, BookingService};
use bichance::client::{BichanceClient, ClientError};
use bichance::config::{self, Config};
use bichance::models::{Booking, Dinner, NewDinner, TokenPair, UserProfile};
use bichance::plans::{PlanKey, PLANS};
use bichance::session::FileSessionStore;
use bichance::telemetry;
use bichance::wizard::MealPreference;

#[derive(Parser)]
#[command(name = "bichance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Book social dinners with strangers from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and BICHANCE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with a one-time code sent by email
    Login {
        #[arg(short, long)]
        email: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in profile
    Me,

    /// List upcoming dinners
    Dinners,

    /// Book a dinner (requires an active membership)
    Book {
        dinner_id: String,
        /// veg or non-veg
        #[arg(short, long, default_value = "veg")]
        meal: String,
    },

    /// List your bookings
    Bookings,

    /// Show membership plans
    Plans,

    /// Start a membership checkout and print the payment URL
    Subscribe {
        /// monthly, quarterly or yearly
        #[arg(short, long)]
        plan: String,
        /// Dinner to book once payment completes
        #[arg(short, long)]
        dinner: Option<String>,
    },

    /// Look up a checkout session after payment
    Subscription { session_id: String },

    /// Cancel the current membership
    CancelSubscription,

    /// Profile management
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Admin tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Generate default configuration
    Config {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Update profile fields; only the ones given are changed
    Set {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        relationship_status: Option<String>,
        #[arg(long)]
        profession: Option<String>,
        #[arg(long)]
        children: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Sign in as an administrator
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// List every scheduled dinner
    Dinners,

    /// Schedule a dinner
    CreateDinner {
        /// Date and time, e.g. 2025-07-09T20:00:00
        #[arg(long)]
        date: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_cli(cli.verbose);

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    let mut store = FileSessionStore::open(config.session.resolve_path())
        .context("Cannot open the session file")?;
    let client = BichanceClient::new(&config.api)?
        .with_token(store.token().map(str::to_string));

    let signs_in = matches!(
        cli.command,
        Commands::Login { .. }
            | Commands::Admin {
                action: AdminAction::Login { .. }
            }
    );

    let result = run(cli, config, &mut store, client).await;
    if let Err(e) = &result {
        if let Some(error) = client_error(e).filter(|_| !signs_in) {
            if store.forget_if_rejected(error)? {
                eprintln!("Session expired. Please sign in again with `bichance login`.");
                std::process::exit(1);
            }
        }
    }
    result
}

/// The client error behind a failed command, if there is one
fn client_error(error: &anyhow::Error) -> Option<&ClientError> {
    error.downcast_ref::<ClientError>().or_else(|| {
        match error.downcast_ref::<BookingError>() {
            Some(BookingError::Client(inner)) => Some(inner),
            _ => None,
        }
    })
}

async fn run(
    cli: Cli,
    config: Config,
    store: &mut FileSessionStore,
    client: BichanceClient,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login { email } => {
            let mut flow = OtpFlow::new();
            flow.email = email;

            let Some(request) = flow.begin_send() else {
                bail!(flow.error.unwrap_or_default());
            };
            let reply = client.send_otp(&request).await.map_err(|e| e.to_string());
            flow.finish_send(reply);
            if let Some(error) = flow.error.take() {
                bail!(error);
            }
            println!("{}", flow.success.take().unwrap_or_default());

            print!("Enter the code from your email: ");
            std::io::stdout().flush()?;
            let mut code = String::new();
            std::io::stdin().lock().read_line(&mut code)?;
            flow.otp = code;

            let Some(request) = flow.begin_verify() else {
                bail!(flow.error.unwrap_or_default());
            };
            let reply = client.verify_otp(&request).await.map_err(|e| e.to_string());
            let Some(login) = flow.finish_verify(reply) else {
                bail!(flow.error.unwrap_or_default());
            };

            match login.tokens {
                Some(tokens) => {
                    store.login(tokens, &login.email)?;
                    println!("Signed in as {}", login.email);
                }
                None => {
                    println!("Code accepted, but the backend issued no session token.");
                }
            }
        }

        Commands::Logout => {
            if store.is_authenticated() {
                if let Err(e) = client.logout().await {
                    tracing::warn!("Backend logout failed: {}", e);
                }
            }
            store.logout()?;
            println!("Signed out.");
        }

        Commands::Me => {
            let profile = client.me().await?;
            store.set_profile(profile.clone())?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
        }

        Commands::Dinners => {
            let dinners = client.upcoming_dinners().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&dinners)?),
                "csv" => print_dinners_csv(&dinners)?,
                _ => print_dinners_table(&dinners),
            }
        }

        Commands::Book { dinner_id, meal } => {
            let meal: MealPreference = meal.parse().map_err(anyhow::Error::msg)?;
            let profile = client.me().await?;

            let dinner = client
                .upcoming_dinners()
                .await?
                .into_iter()
                .find(|d| d.id == dinner_id)
                .unwrap_or(Dinner {
                    id: dinner_id,
                    ..Dinner::default()
                });

            let service = BookingService::new(client, config.plans.clone());
            match service
                .book(dinner, meal, profile.has_active_subscription())
                .await
            {
                Ok(report) => {
                    println!("{}", report.feedback.notice.message());
                    if let Some(refreshed) = &report.refreshed {
                        print_bookings_table(&refreshed.bookings);
                    }
                    if !report.succeeded() {
                        std::process::exit(1);
                    }
                }
                Err(BookingError::SubscriptionRequired) => {
                    eprintln!("{}", BookingError::SubscriptionRequired);
                    eprintln!("  bichance subscribe --plan monthly --dinner <id>");
                    std::process::exit(1);
                }
                Err(e) => bail!(e),
            }
        }

        Commands::Bookings => {
            let bookings = client.my_bookings().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&bookings)?),
                "csv" => print_bookings_csv(&bookings)?,
                _ => print_bookings_table(&bookings),
            }
        }

        Commands::Plans => {
            println!("{:<12} {:<12} {:<12} {}", "Key", "Plan", "Price", "Description");
            println!("{}", "-".repeat(70));
            for plan in PLANS.iter() {
                println!(
                    "{:<12} {:<12} {:<12} {}",
                    plan.key.as_str(),
                    plan.name,
                    plan.display_price(),
                    plan.description
                );
            }
        }

        Commands::Subscribe { plan, dinner } => {
            let plan: PlanKey = plan.parse()?;
            let service = BookingService::new(client, config.plans.clone());
            let url = service.start_checkout(plan).await?;

            if dinner.is_some() {
                store.set_pending_dinner(dinner)?;
            }
            println!("Complete your payment at:");
            println!("  {}", url);
        }

        Commands::Subscription { session_id } => {
            let info = client.session_info(&session_id).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Subscription: {}", info.subscription.id);
                println!("Status:       {}", info.subscription.status);
                if let Some(end) = info.period_end() {
                    println!("Renews:       {}", end);
                }
            }

            if info.is_active() {
                if let Some(dinner_id) = store.session().pending_dinner_id.clone() {
                    println!();
                    println!("Membership active. Book your pending dinner with:");
                    println!("  bichance book {}", dinner_id);
                    store.set_pending_dinner(None)?;
                }
            }
        }

        Commands::CancelSubscription => {
            let message = client.cancel_subscription().await?;
            println!("{}", message);
        }

        Commands::Profile { action } => match action {
            ProfileAction::Set {
                city,
                country,
                dob,
                gender,
                relationship_status,
                profession,
                children,
            } => {
                let only_location = dob.is_none()
                    && gender.is_none()
                    && relationship_status.is_none()
                    && profession.is_none()
                    && children.is_none();

                let service = BookingService::new(client, config.plans.clone());
                let notice = match (city, country) {
                    (Some(city), Some(country)) if only_location => {
                        service.update_location(&city, &country).await
                    }
                    (city, country) => {
                        let original = service.api().me().await?;
                        let mut edited = original.clone();
                        edited.city = city.or(edited.city);
                        edited.country = country.or(edited.country);
                        edited.dob = dob.or(edited.dob);
                        edited.gender = gender.or(edited.gender);
                        edited.relationship_status =
                            relationship_status.or(edited.relationship_status);
                        edited.profession = profession.or(edited.profession);
                        edited.children = children.or(edited.children);
                        service.save_profile(&original, &edited).await
                    }
                };

                if notice.is_error() {
                    bail!(notice.message().to_string());
                }
                println!("{}", notice.message());
            }
        },

        Commands::Admin { action } => match action {
            AdminAction::Login { email, password } => {
                let session = client.admin_login(&email, &password).await?;
                match session.access_token.filter(|t| !t.is_empty()) {
                    Some(access_token) => {
                        let tokens = TokenPair {
                            access_token,
                            refresh_token: None,
                        };
                        store.login(tokens, &email)?;
                        println!("Signed in as admin {}", email);
                    }
                    None => {
                        println!(
                            "{}",
                            session
                                .message
                                .unwrap_or_else(|| "No admin token returned.".to_string())
                        );
                    }
                }
            }

            AdminAction::Dinners => {
                let dinners = client.admin_list_dinners().await?;
                match cli.format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&dinners)?),
                    "csv" => print_dinners_csv(&dinners)?,
                    _ => print_dinners_table(&dinners),
                }
            }

            AdminAction::CreateDinner {
                date,
                city,
                country,
            } => {
                let dinner = NewDinner {
                    date,
                    city,
                    country,
                };
                let reply = client.admin_create_dinner(&dinner).await?;
                println!(
                    "{}",
                    reply
                        .message
                        .unwrap_or_else(|| format!("Dinner scheduled in {}", dinner.city))
                );
            }
        },

        Commands::Config { output } => {
            let config = config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("Email:        {}", profile.email);
    if let Some(name) = &profile.name {
        println!("Name:         {}", name);
    }
    println!(
        "Location:     {}",
        bichance::profile::location_label(profile)
    );
    println!(
        "Membership:   {}",
        profile.subscription_status.as_deref().unwrap_or("none")
    );
    if let Some(profession) = &profile.profession {
        println!("Profession:   {}", profession);
    }
}

fn print_dinners_table(dinners: &[Dinner]) {
    if dinners.is_empty() {
        println!("No upcoming dinners.");
        return;
    }

    println!("{:<26} {:<20} {:<10} {}", "ID", "Date", "Time", "City");
    println!("{}", "-".repeat(70));
    for dinner in dinners {
        println!(
            "{:<26} {:<20} {:<10} {}",
            dinner.id,
            dinner.display_date(),
            dinner.display_time(),
            dinner.city.as_deref().unwrap_or("-")
        );
    }
}

fn print_dinners_csv(dinners: &[Dinner]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["id", "date", "time", "city", "country"])?;
    for dinner in dinners {
        writer.write_record([
            dinner.id.as_str(),
            dinner.date.as_deref().unwrap_or(""),
            dinner.display_time(),
            dinner.city.as_deref().unwrap_or(""),
            dinner.country.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_bookings_table(bookings: &[Booking]) {
    if bookings.is_empty() {
        println!("No bookings yet.");
        return;
    }

    println!("{:<26} {:<20} {}", "Booking", "Date", "Status");
    println!("{}", "-".repeat(60));
    for booking in bookings {
        println!(
            "{:<26} {:<20} {}",
            booking.display_id(),
            booking.display_date(),
            booking.display_status()
        );
    }
}

fn print_bookings_csv(bookings: &[Booking]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["id", "date", "status"])?;
    for booking in bookings {
        writer.write_record([
            booking.display_id(),
            booking.date.as_deref().unwrap_or(""),
            booking.display_status(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
