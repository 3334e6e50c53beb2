//! Truncated closed-form series for the Sun, Moon, mean planets and angles.
//!
//! All functions take Julian centuries since J2000 (`t`) unless noted and return
//! degrees. Accuracy is a few arcminutes for the Sun, under a degree for the Moon,
//! and the mean planets ignore perturbations entirely.

use crate::ephemeris::time::{DAYS_PER_YEAR, J2000};
use crate::ephemeris::types::Body;
use crate::ephemeris::zodiac::normalize_degrees;

/// True longitude of the Sun, without nutation or aberration.
pub fn sun_true_longitude(t: f64) -> f64 {
    let l0 = 280.466_456_7 + 36_000.769_827_79 * t + 0.000_303_202_8 * t * t;
    let m = solar_mean_anomaly(t).to_radians();

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    normalize_degrees(l0 + c)
}

fn solar_mean_anomaly(t: f64) -> f64 {
    357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub distance_km: f64,
}

/// Geocentric Moon from the six largest periodic terms.
pub fn moon_position(t: f64) -> MoonPosition {
    let l = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t * t;
    let d = (297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t * t).to_radians();
    let mp = (134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t * t).to_radians();
    let m = solar_mean_anomaly(t).to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t * t).to_radians();

    let longitude = l
        + 6.288_774 * mp.sin()
        + 1.274_027 * (2.0 * d - mp).sin()
        + 0.658_314 * (2.0 * d).sin()
        + 0.213_618 * (2.0 * mp).sin()
        - 0.185_116 * m.sin()
        - 0.114_332 * (2.0 * f).sin();

    let latitude = 5.128_122 * f.sin() + 0.280_602 * (mp + f).sin() + 0.277_693 * (mp - f).sin();

    let distance_km = 385_000.56
        - 20_905.355 * mp.cos()
        - 3_699.111 * (2.0 * d - mp).cos()
        - 2_955.968 * (2.0 * d).cos();

    MoonPosition {
        longitude: normalize_degrees(longitude),
        latitude,
        distance_km,
    }
}

/// Linear mean longitude. `None` for bodies that need their own series.
pub fn mean_longitude(body: Body, t: f64) -> Option<f64> {
    let (epoch, rate) = match body {
        Body::Mercury => (252.250_906, 149_472.674_635_8),
        Body::Venus => (181.979_801, 58_517.815_676_0),
        Body::Mars => (355.433_000, 19_140.299_314),
        Body::Jupiter => (34.351_519, 3_034.905_660_6),
        Body::Saturn => (50.077_444, 1_222.113_848_8),
        // Mean node regresses
        Body::Rahu => (125.044_547_9, -1_934.136_289_1),
        _ => return None,
    };
    Some(normalize_degrees(epoch + rate * t))
}

/// Mean obliquity of the ecliptic.
pub fn obliquity(t: f64) -> f64 {
    23.439_291 - 0.013_004_2 * t
}

/// Greenwich mean sidereal time, degrees.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Ecliptic longitude rising on the eastern horizon. `lon` is east-positive.
pub fn ascendant(jd: f64, lat: f64, lon: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    let ramc = normalize_degrees(greenwich_sidereal_time(jd) + lon).to_radians();
    let eps = obliquity(t).to_radians();
    let phi = lat.to_radians();

    let y = ramc.cos();
    let x = -(ramc.sin() * eps.cos() + phi.tan() * eps.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Linear Lahiri ayanamsa.
pub fn lahiri_ayanamsa(jd: f64) -> f64 {
    23.857 + 0.013_969_4 * (jd - J2000) / DAYS_PER_YEAR
}
