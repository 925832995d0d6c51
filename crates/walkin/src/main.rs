//! `walkin` - CLI for the walk-in intake desk
//!
//! This binary runs the web application and offers operator commands over the
//! same data files.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use clap::Parser;

use walkin::cli::{Cli, Command, ConfigCommand, CustomersCommand, QueueCommand, ServeCommand};
use walkin::dashboard::{customers, QueueSummary};
use walkin::{init_logging, Config, Store};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, serve_cmd),
        Command::Queue(queue_cmd) => handle_queue(&config, queue_cmd),
        Command::Customers(customers_cmd) => handle_customers(&config, customers_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_serve(mut config: Config, cmd: ServeCommand) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(bind) = cmd.bind {
        config.server.bind = bind;
        config.validate()?;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(walkin::web::serve(config))?;
    Ok(())
}

fn handle_queue(config: &Config, cmd: QueueCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::from_config(config);
    match cmd {
        QueueCommand::List { json } => {
            let summary = QueueSummary::compute(
                store.queue().records(),
                config.queue.total_window,
                chrono::Local::now().date_naive(),
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&summary.waiting)?);
            } else {
                println!("Live Queue");
                println!("----------");
                println!("Waiting:       {}", summary.waiting_count());
                println!("{:<15}{}", format!("{}:", summary.total_label()), summary.total_count);
                println!("Est. wait:     {}", summary.estimated_wait());
                println!();
                for record in &summary.waiting {
                    println!(
                        "#{:<4} {:<24} {:<16} {} {}  added {}",
                        record.id,
                        record.name,
                        record.phone,
                        record.date,
                        record.time,
                        record.timestamp.format("%H:%M")
                    );
                    if !record.notes.is_empty() {
                        println!("      notes: {}", record.notes);
                    }
                }
            }
        }
        QueueCommand::Assign { id } => {
            let removed = store.dequeue(id)?;
            match removed.first() {
                Some(record) => println!("Customer {} has been assigned.", record.name),
                None => println!("No customer with id {id} in the queue."),
            }
        }
        QueueCommand::Clear { yes } => {
            if yes {
                store.clear_queue()?;
                println!("Queue cleared.");
            } else {
                println!("This will remove every customer from the live queue.");
                println!("Use --yes to confirm.");
            }
        }
    }
    Ok(())
}

fn handle_customers(
    config: &Config,
    cmd: CustomersCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::from_config(config);
    match cmd {
        CustomersCommand::List { search, json } => {
            let records = store.customers().records();
            let filtered = customers::filter_customers(&records, search.as_deref().unwrap_or(""));
            if json {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            } else {
                println!("Total Customers: {}", filtered.len());
                for record in filtered {
                    let [name, phone, date, time, notes, added] = customers::row(record);
                    println!("{name:<24} {phone:<16} {date} {time}  added {added}  {notes}");
                }
            }
        }
        CustomersCommand::Export { search, output } => {
            let records = store.customers().records();
            let filtered = customers::filter_customers(&records, search.as_deref().unwrap_or(""));
            let rows = filtered.len();
            let csv = customers::to_csv(filtered);
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("Exported {rows} customers to {}", path.display());
                }
                None => std::io::stdout().write_all(csv.as_bytes())?,
            }
        }
        CustomersCommand::Clear { yes } => {
            if yes {
                store.clear_customers()?;
                println!("All customers cleared.");
            } else {
                println!("This will remove every customer from the customer log.");
                println!("Use --yes to confirm.");
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Bind:               {}", config.server.bind);
                println!();
                println!("[Storage]");
                println!("  Queue file:         {}", config.queue_path().display());
                println!("  Customers file:     {}", config.customers_path().display());
                println!();
                println!("[Auth]");
                println!(
                    "  Password:           {}",
                    if config.uses_default_password() {
                        "default (change it!)"
                    } else {
                        "custom"
                    }
                );
                println!();
                println!("[Branding]");
                println!("  Asset dir:          {}", config.asset_dir().display());
                println!("  Title:              {}", config.branding.title);
                println!();
                println!("[Queue]");
                println!("  Total window:       {:?}", config.queue.total_window);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
