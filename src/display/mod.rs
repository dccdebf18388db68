//! Terminal rendering of listings and profiles.

use jiff::Timestamp;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::listing::{FilterState, ListingView, Mode, PageItem, PaginationMeta, page_window};
use crate::types::{Coordinates, User};

/// A row in the user listing table
#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Render records as a table, numbered from 1 in display order.
pub fn format_user_table(records: &[User]) -> String {
    let rows: Vec<UserRow> = records
        .iter()
        .enumerate()
        .map(|(i, user)| UserRow {
            index: i + 1,
            name: user.display_name(),
            gender: user.gender.clone(),
            email: user.email.clone(),
            country: user.location.country.clone(),
            id: user.id().to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Single-line card for the interactive browser.
pub fn format_user_card(index: usize, user: &User) -> String {
    format!(
        "{:>3}. {}  {}  {}",
        index,
        user.display_name().bold(),
        user.email.dimmed(),
        user.location.country
    )
}

/// The page-number strip, current page highlighted.
pub fn format_page_strip(meta: &PaginationMeta) -> String {
    let items: Vec<String> = page_window(meta.page, meta.total_pages)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(p) if p == meta.page => format!("[{p}]").cyan().bold().to_string(),
            PageItem::Page(p) => p.to_string(),
            PageItem::Gap => "…".to_string(),
        })
        .collect();

    let prev = if meta.has_previous_page { "‹ prev" } else { "" };
    let next = if meta.has_next_page { "next ›" } else { "" };
    format!("{prev} {} {next}", items.join(" "))
        .trim()
        .to_string()
}

/// One-line summary of the active filters.
pub fn format_filter_summary(filter: &FilterState, meta: &PaginationMeta) -> String {
    let gender = filter
        .gender
        .map(|g| g.to_string())
        .unwrap_or_else(|| "all".to_string());
    match filter.mode() {
        Mode::Browsing => format!("Browsing, gender: {gender}, page {}", meta.page),
        Mode::Searching => format!(
            "Search \"{}\", gender: {gender}, {} matches, page {} of {}",
            filter.search_text,
            meta.total_matches.unwrap_or(0),
            meta.page,
            meta.total_pages
        ),
    }
}

/// Full listing screen: status line, cards or table, and pagination.
pub fn format_listing(view: &ListingView, filter: &FilterState, as_table: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_filter_summary(filter, &view.pagination).dimmed()
    ));

    if let Some(error) = &view.error {
        out.push_str(&format!(
            "{} {}\n{}\n",
            "Error:".red().bold(),
            error,
            "Type 'retry' to try again.".dimmed()
        ));
        return out;
    }

    if view.is_loading {
        out.push_str("Loading...\n");
        return out;
    }

    if view.records.is_empty() {
        out.push_str("No users found.\n");
    } else if as_table {
        out.push_str(&format_user_table(&view.records));
        out.push('\n');
    } else {
        for (i, user) in view.records.iter().enumerate() {
            out.push_str(&format_user_card(i + 1, user));
            out.push('\n');
        }
    }

    out.push_str(&format_page_strip(&view.pagination));
    out.push('\n');
    out
}

/// External map link for a coordinate pair, if both parts are present.
pub fn map_link(coordinates: &Coordinates) -> Option<String> {
    let lat = coordinates.latitude.trim();
    let lon = coordinates.longitude.trim();
    if lat.is_empty() || lon.is_empty() {
        return None;
    }
    Some(format!("https://www.google.com/maps?q={lat},{lon}"))
}

/// `YYYY-MM-DD` for an RFC 3339 timestamp; the raw text if it does not parse.
pub fn format_date(raw: &str) -> String {
    match raw.parse::<Timestamp>() {
        Ok(ts) => ts.strftime("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("  {:<14} {}\n", format!("{label}:").cyan(), value));
    }
}

/// Profile page for one user.
pub fn format_profile(user: &User) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", user.display_name().bold()));
    out.push_str(&format!("{}\n\n", user.id().dimmed()));

    out.push_str(&format!("{}\n", "Personal".green().bold()));
    field(&mut out, "Gender", &user.gender);
    if !user.dob.date.is_empty() {
        field(
            &mut out,
            "Born",
            &format!("{} (age {})", format_date(&user.dob.date), user.dob.age),
        );
    }
    field(&mut out, "Nationality", &user.nat);
    if let Some(value) = &user.national_id.value {
        field(&mut out, "ID", &format!("{} {}", user.national_id.name, value));
    }

    out.push_str(&format!("\n{}\n", "Contact".green().bold()));
    field(&mut out, "Email", &user.email);
    field(&mut out, "Phone", &user.phone);
    field(&mut out, "Cell", &user.cell);

    out.push_str(&format!("\n{}\n", "Location".green().bold()));
    field(&mut out, "Address", &user.full_address());
    let tz = &user.location.timezone;
    if !tz.offset.is_empty() {
        field(
            &mut out,
            "Timezone",
            &format!("UTC{} {}", tz.offset, tz.description),
        );
    }
    if let Some(link) = map_link(&user.location.coordinates) {
        field(&mut out, "Map", &link);
    }

    out.push_str(&format!("\n{}\n", "Account".green().bold()));
    field(&mut out, "Username", &user.login.username);
    if !user.registered.date.is_empty() {
        field(
            &mut out,
            "Registered",
            &format!(
                "{} ({} years)",
                format_date(&user.registered.date),
                user.registered.age
            ),
        );
    }
    field(&mut out, "Picture", &user.picture.large);

    out
}
