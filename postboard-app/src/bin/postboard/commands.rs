//! Command handlers
//!
//! Every command drives the same [`App`] the router would: start at a
//! fragment, let navigation settle, then print whatever is on the surface.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use postboard_app::clock::TokioClock;
use postboard_app::create::CreateOutcome;
use postboard_app::poller::PollState;
use postboard_app::router::Router;
use postboard_app::surface::BufferedSurface;
use postboard_app::view::{View, html};
use postboard_app::{App, AppConfig};
use postboard_client::ApiClient;
use postboard_core::domain::effect::Effect;
use postboard_core::domain::route::Route;
use postboard_core::dto::image::ImageFile;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::terminal;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Render the view for a location fragment (e.g. "#/post/abc")
    Open {
        #[arg(default_value = "#/")]
        fragment: String,
    },
    /// List posts
    List,
    /// Show a single post
    Show {
        /// Post ID
        id: String,
    },
    /// Print the HTML rendering of a fragment's view
    Html {
        #[arg(default_value = "#/")]
        fragment: String,
    },
    /// Create a post, optionally with an image and effect
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,

        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,

        /// Effect to apply to the image (none, grayscale, invert)
        #[arg(long, default_value = "none")]
        effect: Effect,
    },
}

/// How the final view is printed
#[derive(Debug, Clone, Copy)]
enum Output {
    Terminal,
    Html,
}

/// Handle a CLI command
pub async fn handle_command(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Open { fragment } => open(config, &fragment, Output::Terminal).await,
        Commands::List => open(config, &Route::List.fragment(), Output::Terminal).await,
        Commands::Show { id } => open(config, &Route::detail(id).fragment(), Output::Terminal).await,
        Commands::Html { fragment } => open(config, &fragment, Output::Html).await,
        Commands::New {
            title,
            body,
            image,
            effect,
        } => create_post(config, title, body, image, effect).await,
    }
}

fn build_app(config: &AppConfig, fragment: &str) -> (App, Arc<BufferedSurface>) {
    let surface = Arc::new(BufferedSurface::new());
    let app = App::new(
        config.clone(),
        ApiClient::new(&config.api_base),
        Arc::new(Router::new(fragment)),
        surface.clone(),
        Arc::new(TokioClock),
    );
    (app, surface)
}

/// Render a fragment and print the result
async fn open(config: &AppConfig, fragment: &str, output: Output) -> Result<()> {
    let (app, surface) = build_app(config, fragment);

    app.start().await;
    app.settle().await;
    check_image(&app).await;

    print_latest(&surface, output);
    Ok(())
}

/// Run the create workflow
async fn create_post(
    config: &AppConfig,
    title: String,
    body: String,
    image: Option<PathBuf>,
    effect: Effect,
) -> Result<()> {
    let image = match image {
        Some(path) => Some(read_image(&path).await?),
        None => None,
    };

    let (app, surface) = build_app(config, &Route::New.fragment());
    app.start().await;

    app.edit_form(|form| {
        form.title = title;
        form.body = body;
        if let Some(image) = image {
            form.attach_image(image);
        }
        if !form.select_effect(effect) && effect.requires_job() {
            warn!("--effect {} needs --image; ignoring", effect);
        }
    });

    let outcome = app.submit().await;
    app.settle().await;
    check_image(&app).await;

    print_latest(&surface, Output::Terminal);
    terminal::print_outcome(&outcome);

    match outcome {
        CreateOutcome::PostFailed(e) => bail!("Create post failed: {}", e),
        CreateOutcome::JobStartFailed { error, .. } => bail!("Failed to start job: {}", error),
        CreateOutcome::JobFinished { report, .. } if report.state != PollState::Succeeded => {
            bail!("Job {} ended as {:?}", report.job.name, report.state)
        }
        _ => Ok(()),
    }
}

/// Drop the detail image if it cannot be fetched
async fn check_image(app: &App) {
    let post_id = match app.current_view() {
        Some(View::PostDetail(detail)) if detail.image.is_some() => detail.id,
        _ => return,
    };

    if !app.client().image_available(&post_id).await {
        info!("No image available for post {}", post_id);
        app.image_failed();
    }
}

async fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageFile {
        file_name,
        content_type: mime_guess::from_path(path).first().map(|m| m.to_string()),
        bytes,
    })
}

fn print_latest(surface: &BufferedSurface, output: Output) {
    let Some(view) = surface.latest() else {
        return;
    };
    match output {
        Output::Terminal => terminal::print_view(&view),
        Output::Html => println!("{}", html::render(&view)),
    }
}
