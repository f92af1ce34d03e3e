//! Client commands driving the API: generate, board, move, delete, clear.

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use taskdeck::client::ApiClient;
use taskdeck::client::board::BoardController;
use taskdeck::ticket::{Ticket, TicketStatus};
use taskdeck::ui::{category_badge, column_title, priority_badge};

fn print_ticket_line(ticket: &Ticket) {
    println!(
        "  {}  {} · {} · {}h",
        style(&ticket.title).bold(),
        priority_badge(ticket.priority),
        category_badge(&ticket.category),
        ticket.estimated_hours,
    );
    println!("     {}  {}", style(ticket.id).dim(), style(&ticket.description).dim());
}

/// Render the three columns with per-column counts and a summary line.
pub async fn cmd_board(api_url: &str) -> Result<()> {
    let mut controller = BoardController::new(ApiClient::new(api_url));
    controller
        .load()
        .await
        .context("Failed to load tickets")?;

    let state = controller.state();
    if state.tickets().is_empty() {
        println!("No tickets yet. Run `taskdeck generate \"<project description>\"` to create some.");
        return Ok(());
    }

    for status in TicketStatus::ALL {
        let column = state.by_status(status);
        println!(
            "{} ({})",
            style(column_title(status)).bold().underlined(),
            column.len()
        );
        for ticket in column {
            print_ticket_line(ticket);
        }
        println!();
    }

    println!(
        "{} tickets · {}h estimated · {} in progress · {} done",
        state.tickets().len(),
        state.total_estimated_hours(),
        state.by_status(TicketStatus::InProgress).len(),
        state.by_status(TicketStatus::Done).len(),
    );
    Ok(())
}

/// Generate tickets from a project description and show what was created.
pub async fn cmd_generate(api_url: &str, prompt: &str) -> Result<()> {
    let mut controller = BoardController::new(ApiClient::new(api_url));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    spinner.set_message("Generating tickets...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = controller.generate(prompt).await;
    spinner.finish_and_clear();

    let tickets = result.context("Failed to generate tickets")?;
    println!(
        "{} Created {} tickets:",
        style("✓").green(),
        tickets.len()
    );
    for ticket in &tickets {
        print_ticket_line(ticket);
    }
    Ok(())
}

/// Move a ticket to another column via the status-update endpoint.
pub async fn cmd_move(api_url: &str, id: Uuid, status: &str) -> Result<()> {
    let Ok(status) = status.parse::<TicketStatus>() else {
        bail!("Invalid status '{}'. Valid values: todo, in-progress, done", status);
    };

    let api = ApiClient::new(api_url);
    let ticket = api
        .update_status(id, status)
        .await
        .context("Failed to update ticket status")?;
    println!(
        "{} Moved '{}' to {}",
        style("✓").green(),
        ticket.title,
        column_title(ticket.status)
    );
    Ok(())
}

pub async fn cmd_delete(api_url: &str, id: Uuid) -> Result<()> {
    let api = ApiClient::new(api_url);
    api.delete_ticket(id)
        .await
        .context("Failed to delete ticket")?;
    println!("{} Ticket deleted", style("✓").green());
    Ok(())
}

/// Clear the whole board. Prompts for confirmation unless `--yes`.
pub async fn cmd_clear(api_url: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Delete all tickets?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let api = ApiClient::new(api_url);
    api.clear_all().await.context("Failed to clear tickets")?;
    println!("{} All tickets cleared", style("✓").green());
    Ok(())
}
