//! Utility functions for the rating replay

use crate::rating::storage::RatingEntry;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a replay over `len` contests
pub fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
    {
        bar.set_style(style.progress_chars("##-"));
    }
    bar
}

/// One leaderboard line: position, entity, rating and contest count
pub fn format_leaderboard_line(position: usize, entry: &RatingEntry) -> String {
    format!(
        "{:>4}. {:<40} {:>6} ({} contests)",
        position, entry.entity, entry.rating, entry.contests_played
    )
}
