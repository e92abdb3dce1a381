//! Exercises the public facade across subsystems with small synthetic fixtures,
//! pinning a handful of the literal values the grid math should produce.

use std::io::Write;

use chrono::{TimeZone, Utc};
use proteus::celestial::{
    convert_equatorial_to_horizontal, equatorial_for_object, julian_day_for_time, CelestialObject,
};
use proteus::{ocean::OceanGrid, wave::WaveGrid, weather, GeoPos};
use test_utils::{append_int_csv_rows, append_scalar_csv_rows, fixtures::points};

#[test]
fn sun_is_high_over_london_at_noon_and_low_at_midnight() {
    let jd = 2459306.0;
    let ec = equatorial_for_object(jd, CelestialObject::Sun);
    assert!(ec.dec > -24.0 && ec.dec < 24.0);

    let (lat, lon) = points::LONDON;
    let london = GeoPos::new(lat, lon);
    let noon = convert_equatorial_to_horizontal(jd, &london, &ec, false, 1010.0, 10.0);
    assert!(noon.alt > 0.0);
    assert!(noon.az >= 170.0 && noon.az <= 190.0);

    let jd_plus_12h = jd + 0.5;
    let ec2 = equatorial_for_object(jd_plus_12h, CelestialObject::Sun);
    let midnight = convert_equatorial_to_horizontal(jd_plus_12h, &london, &ec2, false, 1010.0, 10.0);
    assert!(midnight.alt < 0.0);
    assert!(midnight.az >= 350.0 || midnight.az <= 10.0);
}

#[test]
fn julian_day_matches_the_unix_epoch_anchor() {
    let t = Utc.timestamp_opt(0, 0).unwrap();
    assert!((julian_day_for_time(t) - 2440587.5).abs() < 1e-9);
}

#[tokio::test]
async fn ocean_reports_the_expected_surface_state_and_ice() {
    let mut warm = tempfile::NamedTempFile::new().unwrap();
    for (lon, lat) in [(-60.0, 40.0), (-59.6, 40.0), (-60.0, 40.4), (-59.6, 40.4)] {
        writeln!(warm, "{lon},{lat},15.430,0.0,0.0,35.318").unwrap();
    }

    let grid = OceanGrid::init(warm.path().to_path_buf(), warm.path().to_path_buf())
        .await
        .unwrap();
    let (lat, lon) = points::GULF_STREAM;
    let od = grid.get(&GeoPos::new(lat, lon)).await.unwrap();
    assert!((od.surface_temp - 15.430).abs() < 0.01);
    assert!((od.salinity - 35.318).abs() < 0.01);
    assert_eq!(od.ice, 0.0);

    let mut frozen = tempfile::NamedTempFile::new().unwrap();
    for (lon, lat) in [(70.0, -65.2), (70.4, -65.2), (70.0, -64.8), (70.4, -64.8)] {
        writeln!(frozen, "{lon},{lat},-1.809,0.0,0.0,33.661").unwrap();
    }
    let grid = OceanGrid::init(frozen.path().to_path_buf(), frozen.path().to_path_buf())
        .await
        .unwrap();
    let (lat, lon) = points::SOUTHERN_OCEAN;
    let od = grid.get(&GeoPos::new(lat, lon)).await.unwrap();
    assert!((od.surface_temp - (-1.809)).abs() < 0.01);
    assert_eq!(od.ice, 100.0);
}

#[tokio::test]
async fn wave_height_is_continuous_across_the_antimeridian() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let rows: Vec<(f64, f64, f32)> = [-37.0, -36.0, -35.0]
        .into_iter()
        .flat_map(|lat| [178.0, 179.0, -180.0, -179.0].map(|lon| (lon, lat, 2.35)))
        .collect();
    append_scalar_csv_rows(file.path(), &rows);

    let grid = WaveGrid::init(file.path().to_path_buf(), file.path().to_path_buf())
        .await
        .unwrap();

    let (east_lat, east_lon) = points::ANTIMERIDIAN_EAST;
    let (west_lat, west_lon) = points::ANTIMERIDIAN_WEST;
    let east = grid.get(&GeoPos::new(east_lat, east_lon)).await.unwrap();
    let west = grid.get(&GeoPos::new(west_lat, west_lon)).await.unwrap();
    assert!((east.wave_height - 2.35).abs() < 1e-6);
    assert!((east.wave_height - west.wave_height).abs() < 1e-9);
}

#[tokio::test]
async fn weather_gust_never_reported_below_wind_magnitude() {
    let dir = tempfile::tempdir().unwrap();
    let fields: &[(&str, f32)] = &[
        ("ugrd.csv", 5.0),
        ("vgrd.csv", 0.0),
        ("gust.csv", 1.0),
        ("tmp.csv", 293.161),
        ("dpt.csv", 290.822),
        ("pres.csv", 101300.0),
        ("cld.csv", 0.0),
        ("vis.csv", 10000.0),
        ("prate.csv", 0.0),
    ];
    let corners = [(-63.0, 44.0), (-62.0, 44.0), (-63.0, 45.0), (-62.0, 45.0)];
    for (file, value) in fields {
        let rows: Vec<(f64, f64, f32)> = corners.iter().map(|&(lon, lat)| (lon, lat, *value)).collect();
        append_scalar_csv_rows(&dir.path().join(file), &rows);
    }
    for file in ["rain.csv", "snow.csv", "icep.csv", "frzr.csv"] {
        let rows: Vec<(f64, f64, i32)> = corners.iter().map(|&(lon, lat)| (lon, lat, 0)).collect();
        append_int_csv_rows(&dir.path().join(file), &rows);
    }

    let grid = weather::WeatherGrid::init(
        weather::Resolution::P1_00,
        dir.path().to_path_buf(),
        dir.path().to_path_buf(),
    )
    .await
    .unwrap();

    let (lat, lon) = points::HALIFAX;
    let wx = grid.get(&GeoPos::new(lat, lon), false).await;
    assert!(wx.wind_gust >= wx.wind.mag);
    assert!((wx.temp - (293.161 - 273.15)).abs() < 0.01);
}
