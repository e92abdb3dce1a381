use chrono::{DateTime, Utc};
use proteus_math::{deg2rad, rad2deg, GeoPos};

use crate::catalog::{CelestialObject, STAR_EPH_J2000};

/// Right ascension (hours) and declination (degrees) of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoord {
    pub ra: f64,
    pub dec: f64,
}

/// Azimuth (degrees, 0 = north, clockwise) and altitude (degrees above the horizon).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoord {
    pub az: f64,
    pub alt: f64,
}

/// Converts a UTC instant into a Julian Day number.
pub fn julian_day_for_time(t: DateTime<Utc>) -> f64 {
    (t.timestamp() as f64) / 86400.0 + 2440587.5
}

fn obliquity_for_julian_century(t: f64) -> f64 {
    (84381.406 - 46.836769 * t - 0.0001831 * t * t + 0.00200340 * t * t * t
        - 5.76e-7 * t * t * t * t
        - 4.34e-8 * t * t * t * t * t)
        / 3600.0
}

fn sun_equatorial(jd: f64) -> EquatorialCoord {
    let n = jd - 2451545.0;
    let t = n / 36525.0;
    let l = (280.460 + 0.9856474 * n).rem_euclid(360.0);
    let g = (357.528 + 0.9856003 * n).rem_euclid(360.0);

    let la = l + 1.915 * deg2rad(g).sin() + 0.020 * deg2rad(2.0 * g).sin();

    let la_rad = deg2rad(la);
    let e_rad = deg2rad(obliquity_for_julian_century(t));

    let ra_rad = (e_rad.cos() * la_rad.sin()).atan2(la_rad.cos());
    let dec_rad = (e_rad.sin() * la_rad.sin()).asin();

    let mut ra = rad2deg(ra_rad).rem_euclid(360.0) / 15.0;
    while ra < 0.0 {
        ra += 24.0;
    }

    EquatorialCoord {
        ra,
        dec: rad2deg(dec_rad),
    }
}

/// Proper motion plus a simplified precession correction, applied to a star's J2000
/// catalog position to bring it to the equator and equinox of `jd`.
fn star_equatorial(obj: CelestialObject, jd: f64) -> EquatorialCoord {
    let idx = (obj as u8 - 1) as usize;
    let (ra2000_hr0, dec2000_deg0, d_ra, d_dec) = STAR_EPH_J2000[idx];

    let y = (jd - 2451545.0) / 365.25;
    let t = y / 100.0;

    let mut ra2000_hr = ra2000_hr0 + (d_ra * y) / (1000.0 * 3600.0 * 15.0);
    let mut dec2000_deg = dec2000_deg0 + (d_dec * y) / (1000.0 * 3600.0);

    while ra2000_hr < 0.0 {
        ra2000_hr += 24.0;
    }
    while ra2000_hr >= 24.0 {
        ra2000_hr -= 24.0;
    }
    dec2000_deg = dec2000_deg.clamp(-90.0, 90.0);

    let ra2000_rad = deg2rad(ra2000_hr * 15.0);
    let dec2000_rad = deg2rad(dec2000_deg);

    let e_rad = deg2rad(obliquity_for_julian_century(t));
    let p_deg = (5028.796195 * t + 1.1054348 * t * t) / 3600.0;

    let ra_delta_hr =
        (p_deg / 15.0) * (e_rad.cos() + e_rad.sin() * ra2000_rad.sin() * dec2000_rad.tan());
    let dec_delta_deg = p_deg * ra2000_rad.cos() * e_rad.sin();

    let mut ra = ra2000_hr + ra_delta_hr;
    let mut dec = dec2000_deg + dec_delta_deg;

    while ra < 0.0 {
        ra += 24.0;
    }
    while ra >= 24.0 {
        ra -= 24.0;
    }
    dec = dec.clamp(-90.0, 90.0);

    EquatorialCoord { ra, dec }
}

/// Returns the apparent equatorial coordinates of `obj` at Julian Day `jd`.
pub fn equatorial_for_object(jd: f64, obj: CelestialObject) -> EquatorialCoord {
    match obj {
        CelestialObject::Sun => sun_equatorial(jd),
        star => star_equatorial(star, jd),
    }
}

/// Converts equatorial coordinates to horizontal (azimuth/altitude) coordinates for an
/// observer at `pos` and Julian Day `jd`.
///
/// When `atmos_effect` is set, Saemundsson's refraction formula is applied using the
/// supplied air pressure (hPa) and temperature (degrees C); the correction is only ever
/// added to the altitude, never subtracted, since the formula diverges for negative
/// altitudes rather than producing a meaningful negative refraction.
pub fn convert_equatorial_to_horizontal(
    jd: f64,
    pos: &GeoPos,
    ec: &EquatorialCoord,
    atmos_effect: bool,
    air_pressure: f64,
    air_temp: f64,
) -> HorizontalCoord {
    let n = jd - 2451545.0;
    let t = n / 36525.0;

    let era_rad = 2.0 * std::f64::consts::PI * (0.7790572732640 + 1.00273781191135448 * n);

    let e_prec_sec = -0.0104506 - 4612.16534 * t - 1.3915817 * t * t
        + 4.4e-7 * t * t * t
        + 2.9956e-5 * t * t * t * t;

    let gmst_rad = era_rad - (e_prec_sec * std::f64::consts::PI / 3600.0 / 180.0);

    let lat_rad = deg2rad(pos.lat);
    let lon_rad = deg2rad(pos.lon);

    let ra_rad = deg2rad(ec.ra * 15.0);
    let dec_rad = deg2rad(ec.dec);

    let lmst_rad = gmst_rad + lon_rad;
    let lha_rad = lmst_rad - ra_rad;

    let az_y = lha_rad.sin();
    let az_x = lha_rad.cos() * lat_rad.sin() - dec_rad.tan() * lat_rad.cos();
    let az_rad = az_y.atan2(az_x);

    let alt_rad =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * lha_rad.cos();
    let alt_rad = alt_rad.asin();

    let mut hc = HorizontalCoord {
        az: (rad2deg(az_rad) + 180.0).rem_euclid(360.0),
        alt: rad2deg(alt_rad),
    };

    if atmos_effect {
        let tan_arg = deg2rad(hc.alt + (10.3 / (hc.alt + 5.11)));
        let refr_arcmin =
            1.02 * (1.0 / tan_arg.tan()) * (air_pressure / 1010.0) * (283.0 / (273.0 + air_temp));

        if refr_arcmin > 0.0 {
            hc.alt += refr_arcmin / 60.0;
        }
    }

    hc
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn julian_day_at_unix_epoch() {
        let jd = julian_day_for_time(Utc.timestamp_opt(0, 0).unwrap());
        assert!((jd - 2440587.5).abs() < 1e-9);
    }

    #[test]
    fn sun_declination_near_zero_at_equinox() {
        // 2024-03-20 is close to the March equinox; the Sun's declination should be
        // small in magnitude there.
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 3, 0, 0).unwrap();
        let jd = julian_day_for_time(t);
        let ec = equatorial_for_object(jd, CelestialObject::Sun);
        assert!(ec.dec.abs() < 1.0);
    }

    #[test]
    fn refraction_only_ever_raises_altitude() {
        let pos = GeoPos::new(40.0, -70.0);
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let jd = julian_day_for_time(t);
        let ec = equatorial_for_object(jd, CelestialObject::Sun);
        let plain = convert_equatorial_to_horizontal(jd, &pos, &ec, false, 1010.0, 10.0);
        let refracted = convert_equatorial_to_horizontal(jd, &pos, &ec, true, 1010.0, 10.0);
        assert!(refracted.alt >= plain.alt);
    }
}
