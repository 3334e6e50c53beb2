use anyhow::Context;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use clap::Parser;
use sankat_config::SankatConfig;
use sankat_core::{
    ActivePhase, BirthData, ChartReading, CycleVerification, DailyGuidance, Ephemeris, EphemerisSettings,
    GeoLocation, PatternMatch, PeriodEntry, PositionSet, ProfileBuilder, Statement, Zodiac,
};
use sankat_core::patterns::PatternStatistics;
use sankat_core::vedic::nakshatra::NakshatraMetadata;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Birth-chart profile report")]
struct Args {
    /// Birth date (YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,

    /// Birth time, 24-hour (HH:MM or HH:MM:SS).
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// Timezone offset in hours east of UTC (default from config).
    #[arg(long, allow_hyphen_values = true)]
    tz: Option<f64>,

    /// Place name looked up in the config city table.
    #[arg(long, default_value = "")]
    place: String,

    /// Latitude override; requires --lon.
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude override; requires --lat.
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    #[arg(long, default_value = "Native")]
    name: String,

    /// Months of monthly statements (default from config).
    #[arg(long)]
    months: Option<u32>,

    /// Anchor date for the active period, statement dates and daily guidance (default: today).
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Scan this many days of transits from the reference date (0 = skip).
    #[arg(long, default_value_t = 0)]
    transit_days: u32,

    /// Use the sidereal zodiac regardless of config.
    #[arg(long)]
    sidereal: bool,

    /// Explicit config file (otherwise configs/sankat.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| format!("invalid time '{raw}': {e}"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    birth: BirthData,
    positions: PositionSet,
    mansion: NakshatraMetadata,
    reference_date: NaiveDate,
    timeline: Vec<PeriodEntry>,
    active_phase: Option<ActivePhase>,
    active_sub_phase: Option<ActivePhase>,
    verification: CycleVerification,
    matches: Vec<PatternMatch>,
    transit_matches: Vec<PatternMatch>,
    predictions: Vec<Statement>,
    guidance: DailyGuidance,
    reading: ChartReading,
    pattern_statistics: PatternStatistics,
}

/// Last day of a scan of `days` days starting at `start`, held at the calendar limit.
fn transit_end(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_signed(Duration::days(i64::from(days) - 1))
        .unwrap_or(NaiveDate::MAX)
}

fn load_config(args: &Args) -> anyhow::Result<SankatConfig> {
    match &args.config {
        Some(path) => sankat_config::load_from(path),
        None => sankat_config::load(),
    }
}

/// Build the profile and every report section from one anchor date.
fn build_report(args: &Args, config: &SankatConfig, reference_date: NaiveDate) -> anyhow::Result<Report> {
    let months = args.months.unwrap_or(config.months_ahead);
    let tz_hours = args.tz.unwrap_or(config.tz_hours);

    let settings = EphemerisSettings {
        zodiac: if args.sidereal {
            Zodiac::Sidereal
        } else {
            config.ephemeris.zodiac
        },
        ..config.ephemeris.clone()
    };

    let mut builder = ProfileBuilder::new(args.name.clone(), args.date, args.time, tz_hours)
        .place(args.place.clone())
        .ephemeris(Ephemeris::new(settings));
    builder = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => builder.coordinates(GeoLocation { lat, lon }),
        _ => builder.resolver(&config.cities),
    };

    let profile = builder.build(reference_date).context("Failed to build profile")?;

    let transit_matches = if args.transit_days > 0 {
        let end = transit_end(reference_date, args.transit_days);
        profile
            .transit_matches(reference_date, end)
            .context("Failed to scan transits")?
    } else {
        Vec::new()
    };

    Ok(Report {
        active_sub_phase: profile.active_sub_phase()?,
        verification: profile.verify_timeline()?,
        predictions: profile.predictions(months, reference_date),
        guidance: profile.daily_guidance(reference_date),
        reading: profile.reading(),
        pattern_statistics: profile.matcher().statistics(),
        birth: profile.birth.clone(),
        positions: profile.positions.clone(),
        mansion: profile.birth_mansion.clone(),
        reference_date,
        timeline: profile.period_statuses(),
        active_phase: profile.active_phase.clone(),
        matches: profile.matches.clone(),
        transit_matches,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let reference_date = args
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let report = build_report(&args, &config, reference_date)?;

    log::info!(
        "{} statements, {} birth matches, {} transit matches",
        report.predictions.len(),
        report.matches.len(),
        report.transit_matches.len()
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
