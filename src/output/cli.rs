use crate::model::Comparison;
use crate::version::classify_update;
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Latest")]
    latest: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Prints one component result as a colored line.
///
/// Green `name: current -> latest` on match, red on drift, yellow with the
/// failure description when the component could not be scanned. An error
/// never interrupts the rest of the report.
pub fn print_plain_line(result: &Comparison) {
    if let Some(error) = &result.error {
        println!("{}: \x1b[33m{}\x1b[0m", result.name, error);
        return;
    }

    let current = result.current.as_deref().unwrap_or("-");
    let latest = result.latest.as_deref().unwrap_or("-");
    let color = if result.drifted { "\x1b[31m" } else { "\x1b[32m" };

    println!(
        "{}: {}{} -> {}\x1b[0m",
        result.name, color, current, latest
    );
}

pub fn print_table(results: &[Comparison]) -> Result<()> {
    println!();
    println!(
        "Scan completed at: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if results.is_empty() {
        println!("No components scanned.");
        return Ok(());
    }

    let rows: Vec<ComparisonRow> = results
        .iter()
        .map(|r| ComparisonRow {
            name: r.name.clone(),
            current: r.current.clone().unwrap_or_else(|| "-".to_string()),
            latest: r.latest.clone().unwrap_or_else(|| "-".to_string()),
            status: format_status(r),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    println!();
    print_summary(results);

    Ok(())
}

fn format_status(result: &Comparison) -> String {
    if let Some(error) = &result.error {
        return format!("\x1b[33merror: {}\x1b[0m", error);
    }

    if !result.drifted {
        return "\x1b[32mok\x1b[0m".to_string();
    }

    match (&result.current, &result.latest) {
        (Some(current), Some(latest)) => {
            let kind = classify_update(current, latest);
            format!("\x1b[31mdrift ({})\x1b[0m", kind.as_str())
        }
        _ => "\x1b[31mdrift\x1b[0m".to_string(),
    }
}

fn print_summary(results: &[Comparison]) {
    let drifted = results.iter().filter(|r| r.drifted).count();
    let failed = results.iter().filter(|r| !r.is_ok()).count();
    let ok = results.len() - drifted - failed;

    println!("Summary:");
    println!("  Components: {}", results.len());
    println!("  Up to date: {}", ok);
    if drifted > 0 {
        println!("  Drifted: {}", drifted);
    }
    if failed > 0 {
        println!("  Failed: {}", failed);
    }
}
