//! Dry-run mode reporting

use colored::Colorize;

/// Log the actions a dry run skipped as a numbered list
pub fn log_actions(actions: &[String]) {
    println!(
        "{}",
        "[DRY RUN] Would perform the following actions:"
            .cyan()
            .bold()
    );
    println!();

    for (i, action) in actions.iter().enumerate() {
        println!("  {}. {}", i + 1, action);
    }

    println!();
    println!("{}", "No changes were made (--dry-run mode)".yellow());
}
