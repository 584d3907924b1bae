use std::io::{self, BufRead, Write};

use anyhow::Result;
use uuid::Uuid;

use crate::app::App;
use crate::OutputFormat;

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub fn run_add(
    app: &App,
    subject: &str,
    front: &str,
    back: &str,
    format: &OutputFormat,
) -> Result<()> {
    let card = app.cards.create_card(subject, front, back)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!("Added card under {} (id {})", card.subject, short_id(card.id));
            println!("  Q: {}", card.front);
            println!("  A: {}", card.back);
        }
    }

    Ok(())
}

pub fn run_list(app: &App, subject: Option<&str>, format: &OutputFormat) -> Result<()> {
    let cards = app.cards.list_cards(subject);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards yet. `prepdesk cards add` creates one.");
                return Ok(());
            }

            println!(
                "{:<10} {:<9} {:<8} {:<14} {}",
                "ID", "State", "Reviews", "Subject", "Front"
            );
            for card in &cards {
                println!(
                    "{:<10} {:<9} {:<8} {:<14} {}",
                    short_id(card.id),
                    if card.known { "known" } else { "learning" },
                    card.times_reviewed,
                    card.subject,
                    card.front
                );
            }
            println!("\n{} cards", cards.len());
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    id: &str,
    front: Option<String>,
    back: Option<String>,
    subject: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let card = app.find_card(id)?;
    let card = app.cards.update_card(card.id, front, back, subject)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!("Updated card {} under {}", short_id(card.id), card.subject);
            println!("  Q: {}", card.front);
            println!("  A: {}", card.back);
        }
    }

    Ok(())
}

pub fn run_known(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(id)?;
    let card = app.cards.toggle_known(card.id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            let state = if card.known { "known" } else { "still learning" };
            println!("Marked \"{}\" as {}", card.front, state);
        }
    }

    Ok(())
}

pub fn run_practice(app: &App, subject: Option<&str>) -> Result<()> {
    let queue = app.cards.practice_queue(subject, &mut rand::thread_rng());
    if queue.is_empty() {
        println!("Nothing to practice. Every matching card is marked known.");
        return Ok(());
    }

    println!(
        "{} cards to go. Enter flips the card, y/n records recall, q stops.",
        queue.len()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut reviewed = 0usize;
    let mut knew = 0usize;

    for (i, card) in queue.iter().enumerate() {
        println!();
        println!("[{}/{}] ({}) {}", i + 1, queue.len(), card.subject, card.front);
        print!("flip> ");
        io::stdout().flush()?;

        match read_line(&mut input)? {
            Some(line) if line != "q" => {}
            _ => break,
        }

        println!("  {}", card.back);

        match prompt_recall(&mut input)? {
            Some(knew_it) => {
                app.cards.record_review(card.id, knew_it)?;
                reviewed += 1;
                if knew_it {
                    knew += 1;
                }
            }
            None => break,
        }
    }

    println!();
    println!("Reviewed {} cards, knew {}.", reviewed, knew);
    Ok(())
}

pub fn run_stats(app: &App, subject: Option<&str>, format: &OutputFormat) -> Result<()> {
    let stats = app.cards.stats(subject);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            println!("Total:     {}", stats.total_cards);
            println!("Known:     {}", stats.known_cards);
            println!("Learning:  {}", stats.unknown_cards);
        }
    }

    Ok(())
}

pub fn run_remove(app: &App, id: &str) -> Result<()> {
    let card = app.find_card(id)?;
    app.cards.delete_card(card.id)?;
    println!("Removed \"{}\"", card.front);
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_recall<R: BufRead>(input: &mut R) -> Result<Option<bool>> {
    loop {
        print!("knew it? [y/n/q] ");
        io::stdout().flush()?;
        match read_line(input)? {
            Some(line) => match line.as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                "q" => return Ok(None),
                _ => {}
            },
            None => return Ok(None),
        }
    }
}
