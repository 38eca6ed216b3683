use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};

use crate::clients::arbox::ArboxClient;
use crate::config::BookingConfig;
use crate::runtime;
use crate::service::notifier::WebhookNotifier;
use crate::service::{class_selector, time_service};

#[derive(Parser)]
#[command(name = "gym-booker", about = "Books the recurring gym class a few days ahead")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the booking pipeline once (the default).
    Book,
    /// Print the slot and class ids the next run would target, without
    /// touching the network.
    Plan,
}

pub async fn cli(config: BookingConfig) -> u8 {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Book) {
        Commands::Book => book(&config).await,
        Commands::Plan => plan(&config),
    }
}

async fn book(config: &BookingConfig) -> u8 {
    let provider = match ArboxClient::new(config) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("Failed to build provider client: {}", err);
            return 1;
        }
    };
    let notifier = WebhookNotifier::new(
        config.notify_topic_url.clone(),
        config.notify_token.clone(),
    );

    let outcome = runtime::run_booking(config, &provider, &notifier).await;
    println!("{}", outcome.body);
    if outcome.status_code == 200 { 0 } else { 1 }
}

fn plan(config: &BookingConfig) -> u8 {
    let local_now = time_service::local_now(config.timezone, Utc::now());
    let target = match time_service::target_moment(local_now, &config.day_offsets, config.target_hour)
    {
        Ok(target) => target,
        Err(err) => {
            eprintln!("Failed to compute target slot: {}", err);
            return 1;
        }
    };
    let selection =
        class_selector::select(target.weekday(), &config.schedule_rule, &config.class_table);

    println!("Local time now:  {}", local_now);
    println!("Target slot:     {} ({})", target, target.weekday());
    match selection.class_name {
        Some(name) if !selection.ids.is_empty() => {
            println!("Class:           {} {:?}", name, selection.ids);
            0
        }
        Some(name) => {
            println!("Class:           {} (unknown to the class-type table)", name);
            1
        }
        None => {
            println!("Class:           none configured for {}", target.weekday());
            1
        }
    }
}
