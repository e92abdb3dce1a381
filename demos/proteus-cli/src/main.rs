//! Sample CLI that loads every subsystem from a data directory and prints a
//! multi-subsystem reading for one query position at the current time.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use proteus::{
    celestial, compass::CompassGrid, geo_info::GeoInfoCache, ocean::OceanGrid, wave::WaveGrid,
    weather, GeoPos,
};

#[derive(Parser, Debug)]
#[command(name = "proteus-cli")]
#[command(about = "Samples every proteus subsystem at a single point in space and time")]
struct Args {
    /// Root of the data directory; see README for the expected subdirectory layout.
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Query latitude, in degrees.
    #[arg(long, allow_hyphen_values = true, default_value_t = 44.5)]
    lat: f64,

    /// Query longitude, in degrees.
    #[arg(long, allow_hyphen_values = true, default_value_t = -62.5)]
    lon: f64,

    /// Log level.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).json().finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(data_dir = %args.data_dir.display(), "initializing proteus subsystems");

    let pos = GeoPos::new(args.lat, args.lon);
    let now = Utc::now();

    let compass = CompassGrid::init(&args.data_dir.join("compass").join("magdec.csv"))?;
    let geo_info = GeoInfoCache::init(args.data_dir.join("geoinfo"))?;
    let wave = WaveGrid::init(
        args.data_dir.join("wave").join("previous.csv"),
        args.data_dir.join("wave").join("current.csv"),
    )
    .await?;
    let ocean = OceanGrid::init(
        args.data_dir.join("ocean").join("previous.csv"),
        args.data_dir.join("ocean").join("current.csv"),
    )
    .await?;
    let wx = weather::WeatherGrid::init(
        weather::Resolution::P0_25,
        args.data_dir.join("weather").join("0p25").join("previous"),
        args.data_dir.join("weather").join("0p25").join("current"),
    )
    .await?;

    info!("subsystems ready, sampling");

    println!("proteus {} -- query at ({:.3}, {:.3}) @ {}", proteus::version().as_string(), pos.lat, pos.lon, now);

    let jd = celestial::julian_day_for_time(now);
    let sun_eq = celestial::equatorial_for_object(jd, celestial::CelestialObject::Sun);
    let sun_horiz = celestial::convert_equatorial_to_horizontal(jd, &pos, &sun_eq, false, 1013.25, 15.0);
    println!("  sun: alt={:.2} deg, az={:.2} deg", sun_horiz.alt, sun_horiz.az);

    println!("  magnetic declination: {:.2} deg", compass.magdec(&pos, now));

    let is_water = geo_info.is_water(&pos);
    println!("  land/water: {}", if is_water { "water" } else { "land" });

    if is_water {
        match wave.get(&pos).await {
            Some(w) => println!("  wave height: {:.2} m", w.wave_height),
            None => println!("  wave height: unavailable"),
        }
        match ocean.get(&pos).await {
            Some(o) => println!(
                "  ocean: sst={:.2} C, salinity={:.2}, ice={:.0}%, current={:.2} m/s @ {:.1} deg",
                o.surface_temp, o.salinity, o.ice, o.current.mag, o.current.angle
            ),
            None => println!("  ocean: unavailable"),
        }
    } else {
        println!("  wave/ocean: skipped (query point is over land)");
    }

    let wx_reading = wx.get(&pos, false).await;
    println!(
        "  weather: temp={:.1} C, wind={:.1} m/s @ {:.0} deg, gust={:.1} m/s, pressure={:.1} hPa",
        wx_reading.temp, wx_reading.wind.mag, wx_reading.wind.angle, wx_reading.wind_gust, wx_reading.pressure
    );

    Ok(())
}
