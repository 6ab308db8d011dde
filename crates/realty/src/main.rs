use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use realty::firm::Firm;
use realty::models::{Broker, Client, RealtyConfig};

#[derive(Parser, Debug)]
#[command(name = "realty", about = "Real-estate brokerage record store")]
struct Cli {
    /// Firm to operate on. The store file is derived from this name.
    #[arg(short, long)]
    firm: String,

    /// Path to configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hire a broker
    AddBroker {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0)]
        congestion: u32,
    },
    /// Admit a seller and assign the least busy broker
    AddSeller {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
    /// Admit a buyer and assign the least busy broker
    AddBuyer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
    /// List an apartment for a seller and record the sale negotiation
    ListApartment {
        /// Seller's phone
        #[arg(long)]
        seller: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        area: Decimal,
        #[arg(long)]
        rooms: u32,
        /// Negotiation time
        #[arg(long)]
        time: String,
        /// The seller accepted the deal
        #[arg(long)]
        accept: bool,
    },
    /// Record a buyer's negotiation over a listed apartment
    Buy {
        /// Buyer's phone
        #[arg(long)]
        buyer: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        accept: bool,
    },
    /// Deal statistics per broker
    Stats {
        /// Only this broker
        #[arg(long)]
        broker: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Summary of everything in the store
    Show,
}

fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config: RealtyConfig = match &cli.config {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {path}"))?;
            toml::from_str(&config_str).with_context(|| "Failed to parse config")?
        }
        None => RealtyConfig::default(),
    };

    let mut session = realty::open_file_session(&config, &cli.firm)
        .with_context(|| format!("Failed to open store for firm {:?}", cli.firm))?;
    if !session.skipped().is_empty() {
        eprintln!(
            "warning: {} stored record(s) referenced unknown entities and were dropped",
            session.skipped().len()
        );
    }

    run(session.firm_mut(), cli.command)?;

    session.close().context("Failed to write store")?;
    Ok(())
}

fn run(firm: &mut Firm, command: Command) -> Result<()> {
    match command {
        Command::AddBroker { name, congestion } => {
            firm.add_broker(Broker::new(name.as_str(), congestion)?)?;
            println!("Broker {name} hired");
        }
        Command::AddSeller { name, phone } => admit(firm, Client::seller(name, phone)?)?,
        Command::AddBuyer { name, phone } => admit(firm, Client::buyer(name, phone)?)?,
        Command::ListApartment {
            seller,
            address,
            area,
            rooms,
            time,
            accept,
        } => {
            let Some(owner) = firm.seller_by_phone(&seller) else {
                bail!("No seller with phone {seller}");
            };
            let apartment = firm.list_apartment(owner, address, area, rooms)?;
            let deal = firm.request_sale(apartment, time, accept)?;
            print_deal(firm, deal);
        }
        Command::Buy {
            buyer,
            address,
            time,
            accept,
        } => {
            let Some(client) = firm.client_by_phone(&buyer) else {
                bail!("No buyer with phone {buyer}");
            };
            let Some(apartment) = firm.apartment_by_address(&address) else {
                bail!("No apartment listed at {address}");
            };
            let deal = firm.request_purchase(client, apartment, time, accept)?;
            print_deal(firm, deal);
        }
        Command::Stats { broker, json } => {
            let mut report = firm.broker_report();
            if let Some(name) = &broker {
                report.retain(|row| &row.name == name);
                if report.is_empty() {
                    bail!("No broker named {name}");
                }
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_empty() {
                println!("No brokers!");
            } else {
                for row in report {
                    println!(
                        "{}: {} deal(s), {} successful",
                        row.name, row.deals.total, row.deals.successful
                    );
                }
            }
        }
        Command::Show => show(firm),
    }
    Ok(())
}

fn admit(firm: &mut Firm, client: Client) -> Result<()> {
    let label = client.to_string();
    let broker = firm.assign(client)?;
    if let Some(broker) = firm.broker(broker) {
        println!("{label} assigned to broker {}", broker.name());
    }
    Ok(())
}

fn print_deal(firm: &Firm, deal: realty::models::DealId) {
    let Some(deal) = firm.deal(deal) else {
        return;
    };
    let broker = firm.broker(deal.broker).map(|b| b.name()).unwrap_or("?");
    println!("Deal created: broker {broker}, status {}", deal.status);
}

fn show(firm: &Firm) {
    println!("Firm: {}", firm.name());
    println!("Brokers:");
    for (id, broker) in firm.brokers() {
        println!(
            "  {} (congestion {}, {} client(s))",
            broker.name(),
            broker.congestion(),
            firm.assigned_count(id)
        );
    }
    println!("Clients:");
    for (id, client) in firm.clients() {
        let broker = firm
            .broker_for(id)
            .and_then(|b| firm.broker(b))
            .map(|b| b.name())
            .unwrap_or("?");
        println!("  {} {client} -> {broker}", client.role());
    }
    println!("Apartments:");
    for (_, apartment) in firm.apartments() {
        println!("  {apartment}");
    }
    println!("Deals: {}", firm.deal_count());
}
