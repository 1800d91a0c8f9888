//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `contacts_core` linkage with the bundled snapshot.
//! - Keep output deterministic for quick local sanity checks.

use contacts_core::{ContactController, ControllerConfig, JsonSnapshotSource};
use std::process::ExitCode;

const BUNDLED_SNAPSHOT: &str = include_str!("../data/contacts.json");

fn main() -> ExitCode {
    println!("contacts_core version={}", contacts_core::core_version());

    let source = JsonSnapshotSource::from_json(BUNDLED_SNAPSHOT);
    let controller = match ContactController::new(ControllerConfig::immediate(), &source) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("contacts_cli failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    for contact in controller.visible() {
        println!("{:>3}  {:<28} {:<32} {}", contact.id, contact.name, contact.email, contact.phone);
    }
    println!("{}", controller.summary());

    let insights = controller.insights();
    println!(
        "total={} favorites={} initials={} most_recent={}",
        insights.total,
        insights.favorites,
        insights.unique_initials,
        insights.most_recent.as_deref().unwrap_or("None")
    );
    ExitCode::SUCCESS
}
