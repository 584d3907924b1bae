use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, Utc};
use uuid::Uuid;

use prepdesk::revision::{
    classify_status, CreateItemRequest, RevisionItem, RevisionStatus, StatusGroup,
    UpdateItemRequest,
};

use crate::app::App;
use crate::OutputFormat;

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn status_label(status: RevisionStatus) -> &'static str {
    match status {
        RevisionStatus::Overdue => "overdue",
        RevisionStatus::Today => "today",
        RevisionStatus::Upcoming => "upcoming",
        RevisionStatus::Completed => "completed",
    }
}

fn group_label(group: StatusGroup) -> &'static str {
    match group {
        StatusGroup::Due => "due",
        StatusGroup::Upcoming => "upcoming",
        StatusGroup::Completed => "completed",
        StatusGroup::All => "all",
    }
}

pub fn run_add(app: &App, request: CreateItemRequest, format: &OutputFormat) -> Result<()> {
    let today = Local::now().date_naive();
    let item = app.revision.create_item(request, today, Utc::now())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
        OutputFormat::Plain => {
            println!("Added \"{}\" ({} / {})", item.title, item.subject, item.chapter);
            let schedule = item
                .revision_dates
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  Schedule: {}", schedule);
            println!("  ID: {}", item.id);
        }
    }

    Ok(())
}

pub fn run_list(
    app: &App,
    group: StatusGroup,
    subject: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let today = Local::now().date_naive();
    let mut items = app.revision.list_group(group, today);
    if let Some(subject) = subject {
        items.retain(|item| item.subject.eq_ignore_ascii_case(subject));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = items
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.id.to_string(),
                        "title": item.title,
                        "subject": item.subject,
                        "chapter": item.chapter,
                        "status": status_label(classify_status(item, today)),
                        "nextDate": item.next_pending().map(|d| d.to_string()),
                        "completed": item.completed_count(),
                        "total": item.revision_dates.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("No items in the {} view.", group_label(group));
                return Ok(());
            }

            println!(
                "{:<10} {:<10} {:<12} {:<9} {}",
                "ID", "Status", "Next", "Progress", "Title"
            );
            println!(
                "{} {} {} {} {}",
                "\u{2500}".repeat(10),
                "\u{2500}".repeat(10),
                "\u{2500}".repeat(12),
                "\u{2500}".repeat(9),
                "\u{2500}".repeat(25)
            );

            for item in &items {
                let next = item
                    .next_pending()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10} {:<10} {:<12} {:<9} {} ({} / {})",
                    short_id(item.id),
                    status_label(classify_status(item, today)),
                    next,
                    format!("{}/{}", item.completed_count(), item.revision_dates.len()),
                    item.title,
                    item.subject,
                    item.chapter
                );
            }

            println!("\n{} items ({})", items.len(), group_label(group));
        }
    }

    Ok(())
}

pub fn run_show(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let item = app.find_revision_item(id)?;
    let today = Local::now().date_naive();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
        OutputFormat::Plain => {
            print_item(&item, today);
        }
    }

    Ok(())
}

fn print_item(item: &RevisionItem, today: NaiveDate) {
    println!("\"{}\" ({} / {})", item.title, item.subject, item.chapter);
    println!(
        "  Status: {}   Importance: {:?}   Active: {}",
        status_label(classify_status(item, today)),
        item.importance,
        if item.active { "yes" } else { "no" }
    );
    println!(
        "  Started: {}   Progress: {}/{}",
        item.initial_date,
        item.completed_count(),
        item.revision_dates.len()
    );
    if let Some(notes) = &item.notes {
        println!("  Notes: {}", notes);
    }
    println!("  Schedule:");
    let next = item.next_pending();
    for date in &item.revision_dates {
        let done = item.completed_revisions.contains(date);
        let marker = if done { "[x]" } else { "[ ]" };
        let pointer = if Some(*date) == next { "  <- next" } else { "" };
        println!("    {} {}{}", marker, date, pointer);
    }
    println!("  ID: {}", item.id);
}

pub fn run_done(
    app: &App,
    id: &str,
    date: Option<NaiveDate>,
    format: &OutputFormat,
) -> Result<()> {
    let item = app.find_revision_item(id)?;
    let date = match date.or_else(|| item.next_pending()) {
        Some(date) => date,
        None => bail!("\"{}\" is already fully revised", item.title),
    };

    let updated = app.revision.mark_completed(item.id, date)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => println!(
            "Marked {} done for \"{}\" ({}/{} revised)",
            date,
            updated.title,
            updated.completed_count(),
            updated.revision_dates.len()
        ),
    }

    Ok(())
}

pub fn run_undo(app: &App, id: &str, date: NaiveDate, format: &OutputFormat) -> Result<()> {
    let item = app.find_revision_item(id)?;
    let updated = app.revision.mark_incomplete(item.id, date)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => println!(
            "Unmarked {} for \"{}\" ({}/{} revised)",
            date,
            updated.title,
            updated.completed_count(),
            updated.revision_dates.len()
        ),
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    id: &str,
    request: UpdateItemRequest,
    format: &OutputFormat,
) -> Result<()> {
    let item = app.find_revision_item(id)?;
    let updated = app.revision.update_item(item.id, request)?;
    let today = Local::now().date_naive();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => print_item(&updated, today),
    }

    Ok(())
}

pub fn run_activate(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let item = app.find_revision_item(id)?;
    let request = UpdateItemRequest {
        active: Some(true),
        ..Default::default()
    };
    let updated = app.revision.update_item(item.id, request)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => println!("\"{}\" is back in the planner views", updated.title),
    }

    Ok(())
}

pub fn run_remove(app: &App, id: &str) -> Result<()> {
    let item = app.find_revision_item(id)?;
    app.revision.delete_item(item.id)?;
    println!("Removed \"{}\"", item.title);
    Ok(())
}
