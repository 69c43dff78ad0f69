//! End-of-run summaries

use console::Style;

use crate::acquisition::{AcquisitionOutcome, AcquisitionReport};
use crate::assets::SyncReport;

/// Print one line per extension followed by the totals
pub fn print_acquisition_summary(report: &AcquisitionReport, verbose: bool) {
    if report.is_empty() {
        println!("No CiviCRM extensions configured.");
        return;
    }

    if verbose {
        for result in &report.results {
            let detail = match &result.outcome {
                AcquisitionOutcome::Linked { target } => format!(" -> {}", target.display()),
                AcquisitionOutcome::Downloaded { patches_applied: 0 } => String::new(),
                AcquisitionOutcome::Downloaded { patches_applied } => {
                    format!(" ({patches_applied} patch(es))")
                }
                AcquisitionOutcome::Skipped { reason } => format!(": {reason}"),
                AcquisitionOutcome::Failed { error } => format!(": {error}"),
            };
            println!("  {} {}{detail}", status_label(&result.outcome), result.name);
        }
    }

    let mut parts = vec![format!("{} downloaded", report.downloaded())];
    if report.linked() > 0 {
        parts.push(format!("{} linked", report.linked()));
    }
    if report.skipped() > 0 {
        parts.push(format!("{} skipped", report.skipped()));
    }
    if report.failed() > 0 {
        parts.push(
            Style::new()
                .red()
                .apply_to(format!("{} failed", report.failed()))
                .to_string(),
        );
    }

    println!(
        "{} {}",
        Style::new()
            .bold()
            .apply_to(format!("Processed {} extension(s):", report.results.len())),
        parts.join(", ")
    );
}

fn status_label(outcome: &AcquisitionOutcome) -> String {
    match outcome {
        AcquisitionOutcome::Linked { .. } => Style::new().cyan().apply_to("linked    ").to_string(),
        AcquisitionOutcome::Downloaded { patches_applied: 0 } => {
            Style::new().green().apply_to("downloaded").to_string()
        }
        AcquisitionOutcome::Downloaded { .. } => {
            Style::new().green().apply_to("patched   ").to_string()
        }
        AcquisitionOutcome::Skipped { .. } => Style::new().yellow().apply_to("skipped   ").to_string(),
        AcquisitionOutcome::Failed { .. } => Style::new().red().apply_to("failed    ").to_string(),
    }
}

pub fn print_sync_summary(report: &SyncReport, verbose: bool) {
    if report.skipped {
        println!("Web asset sync skipped for WordPress.");
        return;
    }

    if verbose {
        for step in &report.not_present {
            println!("  {} {step}", Style::new().dim().apply_to("not present"));
        }
        for failure in &report.failures {
            println!(
                "  {} {}: {}",
                Style::new().red().apply_to("failed     "),
                failure.step,
                failure.error
            );
        }
    }

    if report.is_success() {
        println!(
            "Synced {} web asset step(s).",
            report.completed.len()
        );
    } else {
        println!(
            "Synced {} web asset step(s), {}.",
            report.completed.len(),
            Style::new()
                .red()
                .apply_to(format!("{} failed", report.failures.len()))
        );
    }
}
