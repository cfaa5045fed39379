//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `scoreboard_core` linkage.
//! - Print the active board's derived view for a store file, if given.

use scoreboard_core::{CoreConfig, MemoryKvStore, RankedPerson, ScoreboardService, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("scoreboard_core ping={}", scoreboard_core::ping());
    println!("scoreboard_core version={}", scoreboard_core::core_version());

    let result = match std::env::args().nth(1) {
        Some(path) => SqliteKvStore::open(&path)
            .map_err(|err| err.to_string())
            .and_then(print_active_board),
        None => print_active_board(MemoryKvStore::new()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_active_board<S: scoreboard_core::KeyValueStore>(store: S) -> Result<(), String> {
    let mut service =
        ScoreboardService::open(store, CoreConfig::default()).map_err(|err| err.to_string())?;
    let state = service.render();
    println!(
        "board={} boards={} people={}",
        state.active_board_name,
        state.boards.len(),
        state.rows.len()
    );
    for row in &state.rows {
        println!("{}", format_row(row, &state.settings.point_label));
    }
    Ok(())
}

fn format_row(row: &RankedPerson, point_label: &str) -> String {
    format!(
        "#{} {} {} {point_label}",
        row.rank, row.person.name, row.person.points
    )
}
