//! Weekday rulers and the day-by-day guidance built on them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::Body;

/// Period lord assumed when the date falls outside the timeline.
pub const FALLBACK_LORD: Body = Body::Jupiter;
const CAUTION: &str = "Avoid negative thoughts and maintain positive attitude";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayInfo {
    pub ruler: Body,
    pub activities: &'static str,
    pub lucky_time: &'static str,
    pub mantra: &'static str,
    pub color: &'static str,
}

// (weekday, ruler, activities, lucky time, mantra, colour)
type WeekdayRow = (Weekday, Body, &'static str, &'static str, &'static str, &'static str);

const WEEKDAY_TABLE: [WeekdayRow; 7] = [
    (
        Weekday::Mon,
        Body::Moon,
        "Family time, emotional healing, water-related activities",
        "7:00 PM - 8:30 PM",
        "Om Chandraya Namaha",
        "White",
    ),
    (
        Weekday::Tue,
        Body::Mars,
        "Physical exercise, competitive activities, property matters",
        "12:00 PM - 1:30 PM",
        "Om Mangalaya Namaha",
        "Red",
    ),
    (
        Weekday::Wed,
        Body::Mercury,
        "Communication, business, travel, learning",
        "10:00 AM - 11:30 AM",
        "Om Budhaya Namaha",
        "Green",
    ),
    (
        Weekday::Thu,
        Body::Jupiter,
        "Education, religious activities, financial planning",
        "1:00 PM - 2:30 PM",
        "Om Gurave Namaha",
        "Yellow",
    ),
    (
        Weekday::Fri,
        Body::Venus,
        "Relationships, artistic pursuits, beauty treatments",
        "3:00 PM - 4:30 PM",
        "Om Shukraya Namaha",
        "White/Pink",
    ),
    (
        Weekday::Sat,
        Body::Saturn,
        "Long-term planning, discipline, ancestral work",
        "5:00 AM - 6:30 AM",
        "Om Shanicharaya Namaha",
        "Black/Blue",
    ),
    (
        Weekday::Sun,
        Body::Sun,
        "Leadership activities, government work, spiritual practices",
        "6:00 AM - 7:30 AM",
        "Om Suryaya Namaha",
        "Orange/Red",
    ),
];

pub fn weekday_info(weekday: Weekday) -> WeekdayInfo {
    let (_, ruler, activities, lucky_time, mantra, color) =
        WEEKDAY_TABLE[weekday.num_days_from_monday() as usize];
    WeekdayInfo {
        ruler,
        activities,
        lucky_time,
        mantra,
        color,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGuidance {
    pub date: NaiveDate,
    pub weekday: String,
    pub ruling_planet: Body,
    pub period_lord: Body,
    pub overall_energy: String,
    pub favorable_activities: String,
    pub lucky_time: String,
    pub favorable_color: String,
    pub daily_mantra: String,
    pub spiritual_practice: String,
    pub caution: String,
}

/// Guidance for `date`, mixing the weekday ruler with the running period lord.
pub fn daily_guidance(date: NaiveDate, period_lord: Option<Body>) -> DailyGuidance {
    let weekday = date.weekday();
    let info = weekday_info(weekday);
    let lord = period_lord.unwrap_or(FALLBACK_LORD);

    DailyGuidance {
        date,
        weekday: weekday_name(weekday).to_string(),
        ruling_planet: info.ruler,
        period_lord: lord,
        overall_energy: format!(
            "Today's energy is influenced by {lord} Mahadasha and {} (weekday ruler)",
            info.ruler
        ),
        favorable_activities: info.activities.to_string(),
        lucky_time: info.lucky_time.to_string(),
        favorable_color: info.color.to_string(),
        daily_mantra: info.mantra.to_string(),
        spiritual_practice: format!("Chant mantras for {lord} and practice meditation"),
        caution: CAUTION.to_string(),
    }
}
