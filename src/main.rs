use chrono::{Local, NaiveDateTime};
use clap::Parser;
use locus_directory::catalog::Catalog;
use locus_directory::cities;
use locus_directory::geo::Coordinate;
use locus_directory::listing::{filter_listings, ListingFilter};
use locus_directory::server;
use std::path::PathBuf;

/// Locus v0.3 — local listings directory, filtered by time and place
///
/// Filters a catalog of businesses and events by open-now status and
/// city proximity, classifies coordinates into city buckets, or serves
/// the same operations over HTTP.
///
/// Examples:
///   locus --file listings.json
///   locus --file listings.json --cities stockholm,malmo --open
///   locus --file listings.json --open --at 2026-08-07T22:30
///   locus --classify --lat 59.3293 --lng 18.0686
///   locus --file listings.json --serve --port 8080
#[derive(Parser)]
#[command(name = "locus", version, about, long_about = None)]
struct Cli {
    /// Listings catalog: a JSON array of tagged business/event records.
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Comma-separated city keys to keep. Empty: no location filter.
    #[arg(long)]
    cities: Option<String>,

    /// Keep only listings open at the evaluation instant.
    #[arg(long)]
    open: bool,

    /// Evaluation instant, local wall clock (YYYY-MM-DDTHH:MM).
    /// Defaults to now.
    #[arg(long)]
    at: Option<String>,

    /// Classify a coordinate into a city bucket instead of filtering.
    #[arg(long)]
    classify: bool,

    /// Latitude for --classify (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude for --classify (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Start the HTTP API instead of printing to stdout.
    #[arg(long)]
    serve: bool,

    /// Bind host for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for --serve.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    if cli.classify {
        run_classify(&cli);
        return;
    }

    // ── Load catalog ────────────────────────────────────────────

    let path = cli.file.clone().unwrap_or_else(|| {
        eprintln!("Error: No catalog specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  locus --file listings.json");
        eprintln!("  locus --file listings.json --cities stockholm --open");
        eprintln!("  locus --classify --lat 59.3293 --lng 18.0686");
        std::process::exit(1);
    });

    let catalog = Catalog::load_from(&path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // ── Serve mode ──────────────────────────────────────────────

    if cli.serve {
        tracing_subscriber::fmt::init();
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(catalog, &cli.host, cli.port));
        return;
    }

    // ── Filter mode ─────────────────────────────────────────────

    let now = resolve_instant(cli.at.as_deref());
    let filter = ListingFilter {
        cities: split_city_keys(cli.cities.as_deref()),
        open_now: cli.open,
    };

    let matched = filter_listings(&catalog.listings, &filter, now);

    eprintln!(
        "  {} of {} listings match at {}",
        matched.len(),
        catalog.len(),
        now.format("%Y-%m-%d %H:%M"),
    );
    println!("{}", serde_json::to_string_pretty(&matched).unwrap());
}

fn run_classify(cli: &Cli) {
    let (lat, lng) = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            eprintln!("Error: --classify requires --lat and --lng.");
            std::process::exit(1);
        }
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        eprintln!("Error: Invalid coordinates. Lat: -90..90, Lng: -180..180");
        std::process::exit(1);
    }

    let city = cities::classify_city(Coordinate::new(lat, lng));
    println!(
        "{}",
        serde_json::json!({ "lat": lat, "lng": lng, "city": city })
    );
}

fn resolve_instant(raw: Option<&str>) -> NaiveDateTime {
    match raw {
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap_or_else(|e| {
            eprintln!("Error: Invalid instant '{}': {}", s, e);
            eprintln!("Expected local wall-clock format: 2026-08-07T22:30");
            std::process::exit(1);
        }),
        None => Local::now().naive_local(),
    }
}

fn split_city_keys(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
