use anyhow::Result;
use uuid::Uuid;

use prepdesk::bookmarks::Bookmark;

use crate::app::App;
use crate::OutputFormat;

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub fn run_add(
    app: &App,
    title: &str,
    url: &str,
    subject: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let bookmark = app.bookmarks.add_bookmark(title, url, subject)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bookmark)?),
        OutputFormat::Plain => {
            println!("Added \"{}\" (id {})", bookmark.title, short_id(bookmark.id));
            println!("  {}", bookmark.url);
        }
    }

    Ok(())
}

pub fn run_list(app: &App, subject: Option<&str>, format: &OutputFormat) -> Result<()> {
    let bookmarks = app.bookmarks.list_bookmarks(subject);
    print_bookmarks(&bookmarks, format)
}

pub fn run_search(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let bookmarks = app.bookmarks.search(query);
    print_bookmarks(&bookmarks, format)
}

fn print_bookmarks(bookmarks: &[Bookmark], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bookmarks)?),
        OutputFormat::Plain => {
            if bookmarks.is_empty() {
                println!("No bookmarks.");
                return Ok(());
            }

            for bookmark in bookmarks {
                let pin = if bookmark.pinned { "*" } else { " " };
                let subject = bookmark
                    .subject
                    .as_deref()
                    .map(|s| format!(" [{}]", s))
                    .unwrap_or_default();
                println!(
                    "{} {:<10} {}{}",
                    pin,
                    short_id(bookmark.id),
                    bookmark.title,
                    subject
                );
                println!("  {}", bookmark.url);
            }
            println!("\n{} bookmarks", bookmarks.len());
        }
    }

    Ok(())
}

pub fn run_pin(app: &App, id: &str) -> Result<()> {
    let bookmark = app.find_bookmark(id)?;
    let updated = app.bookmarks.toggle_pinned(bookmark.id)?;
    if updated.pinned {
        println!("Pinned \"{}\"", updated.title);
    } else {
        println!("Unpinned \"{}\"", updated.title);
    }
    Ok(())
}

pub fn run_remove(app: &App, id: &str) -> Result<()> {
    let bookmark = app.find_bookmark(id)?;
    app.bookmarks.delete_bookmark(bookmark.id)?;
    println!("Removed \"{}\"", bookmark.title);
    Ok(())
}
