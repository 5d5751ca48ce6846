//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::snapshot::display::Tone;
use ratatui::prelude::Color;

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Poller => Color::Cyan,
        Worker::Dashboard => Color::Yellow,
    }
}

/// Terminal color for a display tone
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Green => Color::LightGreen,
        Tone::Red => Color::LightRed,
        Tone::Purple => Color::LightMagenta,
        Tone::Blue => Color::LightBlue,
    }
}

/// Darker variant used behind bucket bars
pub fn tone_background(tone: Tone) -> Color {
    match tone {
        Tone::Green => Color::Green,
        Tone::Red => Color::Red,
        Tone::Purple => Color::Magenta,
        Tone::Blue => Color::Blue,
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // reqwest errors carry the full URL and are noisy in a narrow panel
    if msg.contains("Network error") {
        return "Fetch failed: sentiment API unreachable - retrying on next tick".to_string();
    }
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2025-03-01 12:34:56"), "03-01 12:34");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message(
                "Fetch failed: Network error: error sending request for url (http://127.0.0.1:3000/api/sentiment)"
            ),
            "Fetch failed: sentiment API unreachable - retrying on next tick"
        );
        assert_eq!(
            clean_http_error_message("Fetch failed: HTTP error with status 500: boom"),
            "Fetch failed: HTTP error with status 500: boom"
        );
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(8));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
