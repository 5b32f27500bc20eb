//! Human-friendly terminal output.

use skyview_core::{
    Favorites, HistoryEntry, ReadingDisplay, TemperatureTone,
    display::{self, format_temperature},
};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[90m";

fn tone_color(tone: TemperatureTone) -> &'static str {
    match tone {
        TemperatureTone::Freezing => "\x1b[34m",
        TemperatureTone::Warm => "\x1b[31m",
    }
}

/// Right-aligned to `width` columns; padding goes inside the color codes so
/// the escapes don't count toward the width.
fn colored_temperature(celsius: f64, width: usize) -> String {
    let color = tone_color(TemperatureTone::of(celsius));
    let text = format_temperature(celsius);
    format!("{color}{text:>width$}{RESET}")
}

/// Card for the current reading.
pub fn reading_card(card: &ReadingDisplay) -> String {
    let color = tone_color(card.tone);
    format!(
        "{BOLD}{city}{RESET}\n  {color}{BOLD}{temp}{RESET}  {desc}\n  {DIM}icon {icon} | background {bg}{RESET}",
        city = card.city,
        temp = card.temperature,
        desc = card.description,
        icon = card.icon,
        bg = card.background,
    )
}

pub fn favorites_list(favorites: &Favorites) -> String {
    if favorites.is_empty() {
        return format!("{DIM}No favorite cities yet.{RESET}");
    }

    let mut out = format!("{BOLD}Favorite Cities{RESET}");
    for (i, city) in favorites.iter().enumerate() {
        out.push_str(&format!("\n{:>3}. {city}", i + 1));
    }
    out
}

/// History log, one row per entry with alternating shading.
pub fn history_table(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return format!("{DIM}No weather history.{RESET}");
    }

    let mut out = format!("{BOLD}Weather History{RESET}");
    for (i, entry) in history.iter().enumerate() {
        let shade = if i % 2 == 0 { "" } else { DIM };
        out.push_str(&format!(
            "\n{shade}{:<20}{RESET} {} {shade}{:<20} {}{RESET}",
            entry.city,
            colored_temperature(entry.temperature, 8),
            entry.description,
            entry.local_time_string(),
        ));
    }
    out
}

pub fn background_line(background: &str) -> String {
    if background == display::DEFAULT_BACKGROUND {
        String::new()
    } else {
        format!("{DIM}[background {background}]{RESET}")
    }
}
