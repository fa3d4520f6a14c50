//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    menace::{AgentStats, TrainingResults},
    tictactoe::{Board, COLS, Position, ROWS},
};

/// Create a progress bar for training
pub fn create_training_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Create a spinner for longer setup steps
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a ratio as a percentage with one decimal
pub fn format_percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", 100.0 * part as f64 / whole as f64)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn print_agent_stats(stats: &AgentStats) {
    print_kv("Matchboxes", &format_number(stats.matchboxes));
    print_kv("Decision matchboxes", &format_number(stats.decision_matchboxes));
    print_kv("Total seeds", &stats.total_seeds.to_string());
}

pub fn print_training_results(results: &TrainingResults) {
    let games = results.games();
    print_kv("Games", &format_number(games));
    print_kv(
        "Wins",
        &format!("{} ({})", results.wins, format_percent(results.wins, games)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", results.draws, format_percent(results.draws, games)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", results.losses, format_percent(results.losses, games)),
    );
    if results.forfeits > 0 {
        print_kv("Forfeits", &results.forfeits.to_string());
    }
}

/// Render a board with row and column coordinates for interactive play.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   0 1 2\n");
    for row in 0..ROWS {
        out.push_str(&format!("{row} "));
        for col in 0..COLS {
            let cell = Position::new(row, col)
                .map(|pos| board.get(pos).to_char())
                .unwrap_or(' ');
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out
}
