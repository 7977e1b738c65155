//! workshop-client CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workshop_client::cli::{Cli, Commands, OutputFormat};
use workshop_client::output::{format_output, pretty};
use workshop_client::{ClientError, HttpDataStore, WorkshopClient};
use workshop_core::booking::{
    can_transition_named, validate_repair_job_window, validate_reservation_window, RecordKind,
};
use workshop_core::schedule::{scope_records, SchedulingCoordinator, ViewWindow};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workshop_client=warn,workshop_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let identity = cli.identity();
    let client = WorkshopClient::new(&cli.base_url)
        .with_identity(identity.clone())
        .with_timeout(Duration::from_secs(cli.timeout))?;
    let coordinator = SchedulingCoordinator::new(Arc::new(HttpDataStore::new(client.clone())));

    match cli.command {
        Commands::Schedule(args) => {
            let window = ViewWindow::new(
                args.granularity.into(),
                args.date.unwrap_or_else(|| Utc::now().date_naive()),
            );
            let filter = args.filter();
            let search = args.search.as_deref().unwrap_or_default();
            let view = match args.shift {
                Some(shift) => {
                    coordinator
                        .navigate(&identity, &filter, search, window, shift.into())
                        .await
                }
                None => coordinator.load_view(&identity, &filter, search, window).await,
            };
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&view, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_view(&view)),
            }
        }
        Commands::Reservations(reservations_cmd) => {
            use workshop_client::cli::reservations::ReservationsAction;
            match reservations_cmd.action {
                ReservationsAction::List => {
                    let reservations = scope_records(&identity, client.list_reservations().await?);
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&reservations, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_reservations(&reservations))
                        }
                    }
                }
                ReservationsAction::Get { id } => {
                    let reservation = coordinator
                        .reservation_detail(&identity, id)
                        .await
                        .map_err(ClientError::from)?
                        .ok_or_else(|| ClientError::NotFound {
                            resource: format!("reservation {id}"),
                        })?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&reservation, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_reservation(&reservation))
                        }
                    }
                }
                ReservationsAction::Create(args) => {
                    let reservation = coordinator
                        .create_reservation(&identity, args.into_request()?)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&reservation, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_reservation(&reservation))
                        }
                    }
                }
                ReservationsAction::Update(args) => {
                    let reservation = coordinator
                        .update_reservation(&identity, args.id, args.to_request())
                        .await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&reservation, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_reservation(&reservation))
                        }
                    }
                }
                ReservationsAction::Cancel {
                    id,
                    expected_version,
                } => {
                    let reservation = coordinator
                        .cancel_reservation(&identity, id, expected_version)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&reservation, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("Cancelled:\n{}", pretty::format_reservation(&reservation))
                        }
                    }
                }
                ReservationsAction::Delete { id } => {
                    coordinator.delete_reservation(&identity, id).await?;
                    if !cli.quiet {
                        println!("Deleted reservation {}", id);
                    }
                }
            }
        }
        Commands::RepairJobs(jobs_cmd) => {
            use workshop_client::cli::repair_jobs::RepairJobsAction;
            match jobs_cmd.action {
                RepairJobsAction::List => {
                    let jobs = scope_records(&identity, client.list_repair_jobs().await?);
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&jobs, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_repair_jobs(&jobs)),
                    }
                }
                RepairJobsAction::Get { id } => {
                    let job = coordinator
                        .repair_job_detail(&identity, id)
                        .await
                        .map_err(ClientError::from)?
                        .ok_or_else(|| ClientError::NotFound {
                            resource: format!("repair job {id}"),
                        })?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&job, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_repair_job(&job)),
                    }
                }
                RepairJobsAction::Create(args) => {
                    let job = coordinator
                        .create_repair_job(&identity, args.into_request())
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&job, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_repair_job(&job))
                        }
                    }
                }
                RepairJobsAction::Update(args) => {
                    let job = coordinator
                        .update_repair_job(&identity, args.id, args.to_request())
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&job, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_repair_job(&job))
                        }
                    }
                }
                RepairJobsAction::Cancel {
                    id,
                    expected_version,
                } => {
                    let job = coordinator
                        .cancel_repair_job(&identity, id, expected_version)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&job, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Cancelled:\n{}", pretty::format_repair_job(&job))
                        }
                    }
                }
                RepairJobsAction::Delete { id } => {
                    coordinator.delete_repair_job(&identity, id).await?;
                    if !cli.quiet {
                        println!("Deleted repair job {}", id);
                    }
                }
            }
        }
        Commands::References(references_cmd) => {
            use workshop_client::cli::references::ReferencesAction;
            match references_cmd.action {
                ReferencesAction::Clients => {
                    let clients = client.list_clients().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&clients, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_clients(&clients)),
                    }
                }
                ReferencesAction::Mechanics => {
                    let mechanics = client.list_mechanics().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&mechanics, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_mechanics(&mechanics))
                        }
                    }
                }
                ReferencesAction::Services => {
                    let services = client.list_services().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&services, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_services(&services)),
                    }
                }
                ReferencesAction::Cars => {
                    let cars = client.list_cars().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&cars, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_cars(&cars)),
                    }
                }
            }
        }
        Commands::Rules(rules_cmd) => {
            use workshop_client::cli::rules::RulesAction;
            match rules_cmd.action {
                RulesAction::Validate { kind, start, end } => {
                    let result = match RecordKind::from(kind) {
                        RecordKind::Reservation => validate_reservation_window(Some(start), end),
                        RecordKind::RepairJob => validate_repair_job_window(Some(start), end),
                    };
                    match cli.format {
                        OutputFormat::Json => {
                            let report = match &result {
                                Ok(()) => json!({ "valid": true }),
                                Err(err) => json!({ "valid": false, "error": err.to_string() }),
                            };
                            println!("{}", format_output(&report, cli.format))
                        }
                        OutputFormat::Pretty => match &result {
                            Ok(()) => println!("Valid"),
                            Err(err) => println!("Invalid: {}", err),
                        },
                    }
                    if result.is_err() {
                        std::process::exit(1);
                    }
                }
                RulesAction::CanTransition {
                    kind,
                    as_role,
                    from,
                    to,
                } => {
                    let role = as_role.unwrap_or(identity.role);
                    let allowed = can_transition_named(role, kind.into(), &from, &to);
                    match cli.format {
                        OutputFormat::Json => println!(
                            "{}",
                            format_output(&json!({ "allowed": allowed }), cli.format)
                        ),
                        OutputFormat::Pretty => println!(
                            "{} may {}move {} -> {}",
                            role,
                            if allowed { "" } else { "not " },
                            from,
                            to
                        ),
                    }
                }
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&health, cli.format)),
                OutputFormat::Pretty => println!(
                    "Health: {}\n  Reservations: {}\n  Repair jobs: {}",
                    health.status, health.reservations, health.repair_jobs
                ),
            }
        }
    }

    Ok(())
}
