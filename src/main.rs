use barber_booking::config::cli::{Command, SlotsArgs};
use barber_booking::core::{ConfigProvider, SlotRequest};
use barber_booking::utils::error::ErrorSeverity;
use barber_booking::utils::{logger, validation::Validate};
use barber_booking::{BookingEngine, CliConfig, HttpBookingApi, Result, TomlConfig};
use chrono::{Local, TimeZone};
use clap::Parser;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting barber-booking CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let api = HttpBookingApi::new(&config)?;
    match config.utc_offset()? {
        Some(offset) => {
            let engine = BookingEngine::from_config(api, offset, &config);
            execute(&cli.command, &engine, &config).await
        }
        None => {
            let engine = BookingEngine::from_config(api, Local, &config);
            execute(&cli.command, &engine, &config).await
        }
    }
}

async fn execute<Tz: TimeZone>(
    command: &Command,
    engine: &BookingEngine<HttpBookingApi, Tz>,
    config: &TomlConfig,
) -> Result<()> {
    match command {
        Command::Barbers => {
            for barber in engine.barbers().await? {
                println!("{}  {}", barber.id, barber.display_name());
                for hours in &barber.work_hours {
                    let day = WEEKDAYS.get(hours.day as usize).copied().unwrap_or("???");
                    println!(
                        "    {} {:>2}:00-{:>2}:00  lunch {}:00 for {} min",
                        day,
                        hours.start_hour,
                        hours.end_hour,
                        hours.lunch_break.start_hour,
                        hours.lunch_break.duration_minutes
                    );
                }
            }
        }
        Command::Services => {
            for service in engine.services().await? {
                println!(
                    "{}  {} ({} min) - {} $",
                    service.id, service.name, service.duration, service.price
                );
            }
        }
        Command::Slots(args) => {
            let request = SlotRequest {
                barber_id: args.barber.clone(),
                date: args.date,
                service_duration_minutes: slot_step(args, engine, config).await?,
            };

            let slots = engine.available_slots(&request).await?;
            if slots.is_empty() {
                println!("Sorry. No available times.");
            } else {
                for slot in slots {
                    println!("{}", slot);
                }
            }
        }
        Command::Book(args) => {
            let form = args.to_form();
            let appointment = engine.book(&form, engine.today()).await?;
            println!("✅ Appointment booked!");
            if let (Some(date), Some(time)) = (form.date, form.time) {
                println!("📅 {} at {}", date, time);
            }
            tracing::debug!("Submitted appointment: {:?}", appointment);
        }
    }

    Ok(())
}

async fn slot_step<Tz: TimeZone>(
    args: &SlotsArgs,
    engine: &BookingEngine<HttpBookingApi, Tz>,
    config: &TomlConfig,
) -> Result<i64> {
    match (args.duration, &args.service) {
        (Some(minutes), _) => Ok(minutes),
        (None, Some(service_id)) => engine.service_duration(service_id).await,
        (None, None) => Ok(config.default_slot_minutes()),
    }
}
