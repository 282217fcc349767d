//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use adfeed_core::Ad;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one feed row.
pub fn ad_row(ad: &Ad) {
    println!(
        "{} {} {}",
        ad.id.dimmed(),
        ad.title.bold(),
        format!("{} min, {:.1} km", ad.time, ad.distance).cyan()
    );
}

/// Print every field of an ad.
pub fn ad_detail(ad: &Ad) {
    field("id", &ad.id);
    field("title", &ad.title);
    field("description", &ad.description);
    field("thumbnail", ad.picture_thumb.as_deref().unwrap_or("-"));
    field("picture", ad.picture_large.as_deref().unwrap_or("-"));
    field("travel", &format!("{} min, {:.1} km", ad.time, ad.distance));
}

/// Print the cursor for the next page, if any.
pub fn next_cursor(after: Option<&str>) {
    if let Some(cursor) = after {
        eprintln!();
        eprintln!("{}: {}", "Next cursor".dimmed(), cursor);
    }
}
