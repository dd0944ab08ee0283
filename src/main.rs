// Entry point and high-level CLI flow.
//
// The binary wraps the cleaning/aggregation pipeline in a small menu:
// - Option [1] loads and cleans a CSV, printing the cleaning summary.
// - Option [2] generates the five aggregate tables with their insights,
//   exports them as CSV plus a single dashboard.json payload, and previews
//   everything on the console.
// - After generating output, the user can choose to go back to the
//   selection menu or exit.
mod error;
mod insights;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{ChartData, CleanRecord, CleaningReport};

const DEFAULT_INPUT: &str = "media_engagements.csv";

// Simple in-memory app state so we only load/clean the CSV once but can
// generate dashboard output multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<(Vec<CleanRecord>, CleaningReport)>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask for the CSV path, falling back to the bundled default on empty input.
fn read_input_path() -> String {
    print!("CSV file path [{}]: ", DEFAULT_INPUT);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    let path = buf.trim();
    if path.is_empty() {
        DEFAULT_INPUT.to_string()
    } else {
        path.to_string()
    }
}

/// Ask the user whether to go back to the selection menu after generating
/// dashboard output.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Selection Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and clean the CSV file.
///
/// On success, we store the cleaned records and the report in `APP_STATE`
/// and print a short textual summary of what happened.
fn handle_load() {
    let path = read_input_path();
    match loader::load_and_clean(&path) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} rows loaded, {} valid after cleaning)",
                util::format_int(report.original_row_count as u64),
                util::format_int(report.cleaned_row_count as u64)
            );
            println!(
                "Note: {} 'Engagements' values missing or invalid, filled with 0.",
                util::format_int(report.missing_or_invalid_engagements_count as u64)
            );
            println!(
                "Note: {} rows skipped due to invalid 'Date'.",
                util::format_int(report.invalid_date_count as u64)
            );
            if report.cleaned_row_count == 0 {
                println!("Warning: no valid data found after cleaning. Check the column headers and date formats.");
            }
            println!("");
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some((data, report));
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: build the five aggregate views with their insight
/// lists, preview them, and export everything for the rendering layer.
fn handle_generate_dashboard() {
    let loaded = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some((data, report)) = loaded else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    println!("Generating dashboard data...\n");
    let dashboard = reports::build_dashboard(&data, report);

    let sections: [(&str, &str, &ChartData); 5] = [
        ("Sentiment Breakdown", "sentiment_breakdown.csv", &dashboard.sentiment_breakdown),
        ("Engagement Trend over Time", "engagement_trend.csv", &dashboard.engagement_trend),
        ("Platform Engagements", "platform_engagements.csv", &dashboard.platform_engagements),
        ("Media Type Mix", "media_type_mix.csv", &dashboard.media_type_mix),
        ("Top 5 Locations by Engagements", "top_locations.csv", &dashboard.top_locations),
    ];
    for (idx, (title, file, chart)) in sections.iter().enumerate() {
        println!("Chart {}: {}\n", idx + 1, title);
        output::preview_table_rows(&chart.rows, 5);
        println!("Top insights:");
        output::print_insights(&chart.insights);
        if let Err(e) = output::write_csv(file, &chart.rows) {
            eprintln!("Write error: {}", e);
        }
        println!("(Full table exported to {})\n", file);
    }

    if let Err(e) = output::write_json("dashboard.json", &dashboard) {
        eprintln!("Write error: {}", e);
    }
    println!("Complete payload (cleaning report, tables, insights) written to dashboard.json\n");
}

fn main() {
    loop {
        println!("Media Intelligence Dashboard");
        println!("[1] Load and clean a CSV file");
        println!("[2] Generate dashboard data\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!("");
                handle_generate_dashboard();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
