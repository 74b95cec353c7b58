//! Terminal rendering
//!
//! Prints views as coloured text. Output is plain text, so no escaping is
//! applied here.

use colored::*;
use postboard_app::create::CreateOutcome;
use postboard_app::poller::PollState;
use postboard_app::view::{CreateFormView, ErrorView, PostDetail, PostRow, StatusLine, View};

/// Print a view to stdout
pub fn print_view(view: &View) {
    match view {
        View::Loading { message } => println!("{}", message.dimmed()),
        View::NoPosts => {
            println!("{}", "Latest Posts".bold());
            println!(
                "{}",
                "No posts yet… create one with `postboard new`.".yellow()
            );
        }
        View::PostList { rows } => print_list(rows),
        View::PostDetail(detail) => print_detail(detail),
        View::Create(form) => print_form(form),
        View::Error(error) => print_error(error),
    }
}

fn print_list(rows: &[PostRow]) {
    println!("{}", "Latest Posts".bold());
    println!();
    for row in rows {
        println!("  {} {}", "▸".cyan(), row.title);
        println!("    Published: {}", row.published.dimmed());
        println!("    Link:      {}", row.link.fragment().dimmed());
    }
}

fn print_detail(detail: &PostDetail) {
    println!("{}", detail.title.bold());
    println!("{}", "─".repeat(80).dimmed());
    if let Some(image) = &detail.image {
        println!("{} {}", "Image:".dimmed(), image.src.dimmed());
        println!();
    }
    println!("{}", detail.body);
    println!("{}", "─".repeat(80).dimmed());
    println!("← Back: {}", detail.back.fragment().dimmed());
}

fn print_form(form: &CreateFormView) {
    println!("{}", "Create New Post".bold());
    println!("  Title:  {}", form.title);
    println!("  Body:   {}", form.body);
    if let Some(name) = &form.image_name {
        println!("  Image:  {}", name);
    }
    if form.effects_visible {
        println!("  Effect: {}", form.effect.label());
    }
    if let Some(status) = &form.status {
        println!();
        println!("{}", colorize_status(status));
    }
}

fn print_error(error: &ErrorView) {
    println!("{}", error.heading.bold());
    println!("{}", "Could not reach the API.".red());
    println!("{}", error.detail);
    println!(
        "Create a post ({}) or try again.",
        error.create_link.fragment().dimmed()
    );
}

/// Summarise how a submission ended
pub fn print_outcome(outcome: &CreateOutcome) {
    println!();
    match outcome {
        CreateOutcome::PostFailed(_) => {}
        CreateOutcome::Navigated { post, image_error } => {
            println!("{} Created post {}", "✓".green(), post.id.cyan());
            if let Some(e) = image_error {
                println!("{} Image upload failed: {}", "⚠".yellow(), e);
            }
        }
        CreateOutcome::JobStartFailed { post, error } => {
            println!("{} Created post {}", "✓".green(), post.id.cyan());
            println!("{} Failed to start job: {}", "✗".red(), error);
        }
        CreateOutcome::JobFinished { post, report } => {
            println!("{} Created post {}", "✓".green(), post.id.cyan());
            let polls = format!("after {} poll(s)", report.polls).dimmed();
            match report.state {
                PollState::Succeeded => {
                    println!("{} Job {} succeeded {}", "✓".green(), report.job.name, polls)
                }
                PollState::Failed => println!(
                    "{} Job {} failed: {} {}",
                    "✗".red(),
                    report.job.name,
                    report.job.reason.as_deref().unwrap_or("unknown error"),
                    polls
                ),
                state => println!(
                    "{} Job {} stopped ({:?}) {}",
                    "⚠".yellow(),
                    report.job.name,
                    state,
                    polls
                ),
            }
        }
    }
}

fn colorize_status(status: &StatusLine) -> ColoredString {
    match status {
        StatusLine::Progress(text) => text.cyan(),
        StatusLine::Success(text) => text.green(),
        StatusLine::Error(text) => text.red(),
    }
}
