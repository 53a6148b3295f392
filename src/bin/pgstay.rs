use clap::{Arg, Command};
use log::error;
use pgstay_client::config::Config;
use pgstay_client::rooms::RoomQuery;
use pgstay_client::PgStay;

fn format_price(price: Option<f64>) -> String {
    price
        .map(|p| format!("{:.0}", p))
        .unwrap_or_else(|| "-".to_string())
}

async fn run(pgstay: PgStay, matches: clap::ArgMatches) -> pgstay_client::error::Result<()> {
    match matches.subcommand() {
        Some(("properties", _)) => {
            for property in pgstay.properties().list().await? {
                println!(
                    "{:>5}  {}  {}",
                    property.id,
                    property.name,
                    property.location.unwrap_or_default()
                );
            }
        }
        Some(("rooms", sub)) => {
            let id: i64 = sub
                .value_of("property_id")
                .unwrap_or_default()
                .parse()
                .map_err(|_| pgstay_client::error::Error::general("property id must be a number"))?;
            let detail = pgstay.properties().detail(id).await?;
            println!("{}", detail.property.name);
            for bucket in &detail.buckets {
                println!(
                    "  {:<24} rooms: {:>3}  available: {:<5}  from: {}",
                    bucket.key,
                    bucket.count,
                    bucket.has_available,
                    format_price(bucket.lowest_price)
                );
            }
            if sub.is_present("available") {
                let query = RoomQuery::new().available_only(true);
                for room in query.apply(&detail.property.rooms) {
                    println!(
                        "  #{} {}  {}",
                        room.id,
                        room.room_no.clone().unwrap_or_default(),
                        format_price(room.base_rent)
                    );
                }
            }
        }
        Some(("tariffs", _)) => {
            for tariff in pgstay.meal_tariffs().list().await? {
                println!(
                    "{:>5}  property {:>5}  {:.0}/{:.0}/{:.0}  {}",
                    tariff.id.unwrap_or_default(),
                    tariff.property_id.unwrap_or_default(),
                    tariff.breakfast_price,
                    tariff.lunch_price,
                    tariff.dinner_price,
                    tariff.status.as_str()
                );
            }
        }
        Some(("dashboard", _)) => {
            let stats = pgstay.dashboard().await?;
            println!(
                "properties: {}  rooms: {}  available: {}  occupied: {}  occupancy: {:.0}%",
                stats.properties,
                stats.rooms,
                stats.available_rooms,
                stats.occupied_rooms,
                stats.occupancy_rate * 100.0
            );
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let matches = Command::new("pgstay")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse the PgStay rental API")
        .subcommand_required(true)
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .value_name("URL")
                .help("API base URL, defaults to PGSTAY_API_URL")
                .takes_value(true),
        )
        .subcommand(Command::new("properties").about("List properties"))
        .subcommand(
            Command::new("rooms")
                .about("Show room buckets of a property")
                .arg(Arg::new("property_id").required(true))
                .arg(
                    Arg::new("available")
                        .long("available")
                        .help("Also list the available rooms"),
                ),
        )
        .subcommand(Command::new("tariffs").about("List meal tariffs"))
        .subcommand(Command::new("dashboard").about("Occupancy summary"))
        .get_matches();

    let config = match matches.value_of("api_url") {
        Some(url) => Config::new(url),
        None => Config::from_env(),
    };

    let result = match config.and_then(PgStay::from_config) {
        Ok(pgstay) => run(pgstay, matches).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        error!("{}", err);
        eprintln!("{}", err.user_message(&err.to_string()));
        std::process::exit(1);
    }
}
