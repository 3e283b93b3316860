use chrono::{DateTime, Utc};
use colored::Colorize;
use dentcrm::api::{CmdMessage, MessageLevel, StoreStatus};
use dentcrm::model::{PatientSummary, ProductSummary, Session};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 6;
const NAME_WIDTH: usize = 32;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_patients(patients: &[PatientSummary]) {
    for p in patients {
        let contact = [p.phone.as_deref(), p.email.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("  ");
        print_row(p.id, &p.name, &contact);
    }
}

pub(super) fn print_patient_detail(p: &PatientSummary) {
    println!("{} {}", format!("#{}", p.id).yellow(), p.name.bold());
    print_field("Email", p.email.as_deref());
    print_field("Phone", p.phone.as_deref());
    print_field("Born", p.birth_date.as_deref());
    print_field("Fiscal code", p.fiscal_code.as_deref());
    print_field("Notes", p.notes.as_deref());
}

pub(super) fn print_products(products: &[ProductSummary]) {
    for p in products {
        let stock = match (p.quantity, p.unit.as_deref()) {
            (Some(q), Some(unit)) => format!("{} {}", q, unit),
            (Some(q), None) => q.to_string(),
            _ => String::new(),
        };
        let mut extra = stock;
        if let Some(udi) = &p.udi {
            if !extra.is_empty() {
                extra.push_str("  ");
            }
            extra.push_str(&format!("UDI {}", udi));
        }
        print_row(p.id, &p.name, &extra);
    }
}

pub(super) fn print_product_detail(p: &ProductSummary) {
    println!("{} {}", format!("#{}", p.id).yellow(), p.name.bold());
    print_field("SKU", p.sku.as_deref());
    print_field("Category", p.category.as_deref());
    let quantity = p.quantity.map(|q| q.to_string());
    print_field("Quantity", quantity.as_deref());
    print_field("Unit", p.unit.as_deref());
    print_field("UDI", p.udi.as_deref());
}

pub(super) fn print_session(session: &Session) {
    let since = session
        .logged_in_at
        .map(|at| format!(" (since {})", format_time_ago(at)))
        .unwrap_or_default();
    println!(
        "{} <{}> as {}{}",
        session.user_id.bold(),
        session.email,
        session.role.to_string().cyan(),
        since.dimmed()
    );
    if session.token.is_some() {
        println!("{}", "token present".dimmed());
    }
}

pub(super) fn print_status(status: &StoreStatus) {
    println!("{} {}", "Store:".bold(), status.location);
    println!("{} {}", "Patients:".bold(), status.patients);
    println!("{} {}", "Products:".bold(), status.products);
    match &status.session {
        Some(session) => {
            print!("{} ", "Session:".bold());
            print_session(session);
        }
        None => println!("{} {}", "Session:".bold(), "none".dimmed()),
    }
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("  {:<12} {}", label.dimmed(), value);
    }
}

fn print_row(id: i64, name: &str, extra: &str) {
    let id_str = format!("{:>width$}. ", id, width = ID_WIDTH - 2);
    let name_display = truncate_to_width(name, NAME_WIDTH);
    let padding = NAME_WIDTH.saturating_sub(name_display.width());
    let available = LINE_WIDTH.saturating_sub(ID_WIDTH + NAME_WIDTH + 2);
    println!(
        "{}{}{}  {}",
        id_str.yellow(),
        name_display,
        " ".repeat(padding),
        truncate_to_width(extra, available).dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(truncate_to_width("Mario Rossi", 32), "Mario Rossi");
    }

    #[test]
    fn long_names_get_ellipsis_within_width() {
        let out = truncate_to_width("Maria Giovanna Ferraris-Castellini di Montebello", 20);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 20);
    }

    #[test]
    fn wide_chars_count_double() {
        let out = truncate_to_width("歯科医院歯科医院", 6);
        assert!(out.width() <= 6);
    }

    #[test]
    fn time_ago_is_readable() {
        let out = format_time_ago(Utc::now() - chrono::Duration::minutes(5));
        assert!(out.contains("minutes ago"), "got {}", out);
    }
}
