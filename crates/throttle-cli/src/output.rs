//! Console rendering of run results

use colored::Colorize;
use throttle_core::{RunReport, ThrottleError};

pub fn print_report(report: &RunReport, max_concurrency: usize) {
    let within_limit = report.peak_concurrency <= max_concurrency;
    let peak = format!("{}", report.peak_concurrency);
    let peak = if within_limit { peak.green() } else { peak.yellow() };

    println!("{} {} run", "✓".green().bold(), report.mode);
    println!("  items:            {}", report.dispatched);
    println!("  completed:        {}", report.completed);
    println!("  max concurrency:  {}", max_concurrency);
    println!("  peak concurrency: {}", peak.bold());
    println!("  elapsed:          {:?}", report.elapsed);
}

pub fn print_failure(error: &ThrottleError, peak_concurrency: usize) {
    eprintln!("{} {}", "✗".red().bold(), error.to_string().red());
    for failure in error.failures() {
        eprintln!("  {}", failure);
    }
    eprintln!("  peak concurrency: {}", peak_concurrency);
}

pub fn print_comparison(throttled: &RunReport, unthrottled: &RunReport, max_concurrency: usize) {
    println!("{}", "Peak concurrency comparison".bold());
    println!(
        "  throttled:   {:>4}  (limit {})",
        throttled.peak_concurrency, max_concurrency
    );
    println!("  unthrottled: {:>4}", unthrottled.peak_concurrency);

    if unthrottled.peak_concurrency > max_concurrency {
        println!(
            "  {}",
            "Without the limiter the workload exceeds the configured bound.".yellow()
        );
    } else {
        println!(
            "  {}",
            "The workload never exceeded the bound on its own; try more or slower items.".dimmed()
        );
    }
}
