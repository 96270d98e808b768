use std::error::Error;
use std::path::PathBuf;

use bar_locator::config::LocatorConfig;
use bar_locator::geocode::HttpGeocoder;
use bar_locator::location::ClientLocation;
use bar_locator::map::RecordingMap;
use bar_locator::osrm::OsrmClient;
use bar_locator::params::PageParams;
use bar_locator::report::LogReporter;
use bar_locator::session::{Capabilities, PageView, Session};
use bar_locator::site::SiteClient;
use bar_locator::store::FileStore;
use bar_locator::traits::{ErrorReporter, IpLocator, SearchRecorder};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Find smoking-friendly bars near an address
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to search around (e.g. "5113 Leesburg Pike, Falls Church, VA")
    #[arg(short, long)]
    query: Option<String>,

    /// Id of a venue to page to and select
    #[arg(short, long)]
    select: Option<String>,

    /// Search page URL to read `query` and `select` from; the flags above win
    #[arg(long)]
    url: Option<String>,

    /// Number of result pages to print
    #[arg(short, long, default_value_t = 1)]
    pages: usize,

    /// Where the last location is kept between runs
    #[arg(long, default_value = ".bar-locator.json")]
    state: PathBuf,

    /// Log errors and searches locally instead of posting them to the site
    #[arg(long)]
    no_report: bool,
}

/// A command line has no client IP to look up.
struct NoIpLookup;

impl IpLocator for NoIpLookup {
    fn client_location(&self) -> Option<ClientLocation> {
        None
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = LocatorConfig::from_env();
    config.validate()?;

    let site = SiteClient::new(config.site.clone())?;
    let (reporter, recorder): (Box<dyn ErrorReporter>, Box<dyn SearchRecorder>) = if cli.no_report {
        (Box::new(LogReporter), Box::new(LogReporter))
    } else {
        (Box::new(site.clone()), Box::new(site.clone()))
    };
    let caps = Capabilities {
        geocoder: Box::new(HttpGeocoder::new(config.geocoder.clone())?),
        ip_locator: Box::new(NoIpLookup),
        store: Box::new(FileStore::new(&cli.state)),
        venues: Box::new(site),
        directions: Box::new(OsrmClient::new(config.osrm.clone())?),
        reporter,
        recorder,
    };

    let (width, height) = config.viewport;
    let mut session = Session::new(caps, RecordingMap::new(width, height), config.page_size, config.map);

    let mut params = cli.url.as_deref().map(PageParams::from_url).unwrap_or_default();
    if cli.query.is_some() {
        params.query = cli.query;
    }
    if cli.select.is_some() {
        params.select = cli.select;
    }
    session.start(&params);
    let routes = session.run_pending_routes();
    tracing::info!(routes, "route lookups finished");

    print_page(&session);
    for _ in 1..cli.pages {
        if !session.next_page() {
            break;
        }
        session.run_pending_routes();
        print_page(&session);
    }

    Ok(())
}

fn print_page(session: &Session<RecordingMap>) {
    let page: PageView = session.page();
    if let Some(notice) = page.notice {
        println!("{notice}");
    }
    if let Some(place) = &page.location_text {
        println!("Near {place}");
    }
    println!("{}", page.status_text());

    for item in &page.items {
        let marker = if item.selected { '*' } else { ' ' };
        println!("{marker} {:>3}. {} - {}, {}", item.index + 1, item.name, item.street, item.city);
    }

    if let Some((_, popup)) = &session.map().info_window {
        println!("Directions: {}", popup.directions_link);
    }
    if let Some(venue) = session.selection().drawn_route() {
        if let Some(route) = session.selection().cache().get(venue) {
            println!(
                "Route: {:.1} km, {:.0} min, {} points",
                route.distance_m / 1000.0,
                route.duration_s / 60.0,
                route.polyline.points().len()
            );
        }
    }
}
