//! Print ordinal scales

use anyhow::Result;
use liftlog_core::scale::{self, OrdinalScale};
use liftlog_core::GroupKind;
use owo_colors::OwoColorize;

pub async fn run(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let Some(scale) = scale::by_name(name) else {
                let names: Vec<_> = scale::ALL.iter().map(|s| s.name()).collect();
                anyhow::bail!("Unknown scale: {}. Available: {}", name, names.join(", "));
            };
            print_scale(scale);
        }
        None => {
            for (idx, scale) in scale::ALL.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                print_scale(scale);
            }
        }
    }
    Ok(())
}

fn print_scale(scale: &OrdinalScale) {
    let used_by: Vec<String> = GroupKind::ALL
        .iter()
        .flat_map(|kind| {
            kind.descriptors()
                .iter()
                .filter(|d| d.scale.is_some_and(|s| s.name() == scale.name()))
                .map(move |d| format!("{}.{}", kind, d.key))
        })
        .collect();

    println!(
        "{} {}",
        format!("[{}]", scale.name()).yellow(),
        format!("used by {}", used_by.join(", ")).dimmed()
    );
    for (label, score) in scale.entries() {
        println!("  {} = {}", label.cyan(), score);
    }
}
