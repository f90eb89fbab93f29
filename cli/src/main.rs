mod form_args;
mod terminal;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recipe_box_core::{
    render, App, ClientConfig, DeleteOutcome, HttpApi, HttpApiBuilder, Page, RecipeApi,
    RecipeId, Route, SubmitOutcome,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::form_args::{EditArgs, NewArgs};
use crate::terminal::TerminalInteraction;

#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(about = "Recipe Box terminal front-end", long_about = None)]
struct Cli {
    /// Backend URL (default: http://localhost:3000)
    #[arg(long, global = true, env = "RECIPE_BOX_SERVER")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered by tag name
    List {
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one recipe
    Show { id: RecipeId },
    /// List all tags
    Tags,
    /// Delete a recipe
    Delete {
        id: RecipeId,
        /// Don't ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Create a recipe
    New(NewArgs),
    /// Edit a recipe
    Edit {
        id: RecipeId,
        #[command(flatten)]
        args: EditArgs,
    },
    /// Render a page by its path, e.g. /recipes/3/edit
    Open { route: Route },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(server) = cli.server {
        config = config.with_server(server);
    }
    let api = HttpApiBuilder::from_config(&config)
        .build()
        .with_context(|| format!("Invalid server URL: {}", config.server))?;
    tracing::debug!(server = %api.base_url(), "using backend");

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let mut app = App::new(api, TerminalInteraction::new(assume_yes));

    match cli.command {
        Commands::List { tag } => {
            app.open_list(tag.as_deref()).await;
            println!("{}", app.render());
        }
        Commands::Show { id } => {
            app.open(Route::Recipe(id)).await;
            println!("{}", app.render());
            if let Page::Detail(view) = app.page() {
                if let Some(error) = view.recipe.error() {
                    bail!("Could not load recipe {}: {}", id, error);
                }
            }
        }
        Commands::Tags => {
            let tags = app.api().list_tags().await.context("Failed to list tags")?;
            print!("{}", render::tag_list(&tags));
        }
        Commands::Delete { id, .. } => {
            app.start().await;
            match app.delete_from_list(id).await {
                Some(DeleteOutcome::Deleted) => println!("Deleted recipe {}", id),
                Some(DeleteOutcome::Cancelled) => println!("Cancelled"),
                Some(DeleteOutcome::Failed(message)) => bail!("{}", message),
                None => bail!("Recipe list is not available"),
            }
        }
        Commands::New(args) => {
            app.open(Route::NewRecipe).await;
            if let Some(form) = app.form_mut() {
                args.apply(form);
            }
            submit(&mut app).await?;
        }
        Commands::Edit { id, args } => {
            app.open(Route::EditRecipe(id)).await;
            let form = app.form_mut().context("Edit form is not available")?;
            if let Some(error) = form.error() {
                bail!("Could not load recipe {}: {}", id, error);
            }
            args.apply(form).map_err(anyhow::Error::msg)?;
            submit(&mut app).await?;
        }
        Commands::Open { route } => {
            app.open(route).await;
            println!("{}", app.render());
        }
    }

    Ok(())
}

/// Submit the open form; print the saved recipe, or the form with its error.
async fn submit(app: &mut App<HttpApi, TerminalInteraction>) -> Result<()> {
    match app.submit_form().await {
        Some(SubmitOutcome::Navigate(_)) => {
            println!("{}", app.render());
            Ok(())
        }
        Some(SubmitOutcome::Failed(message)) => {
            println!("{}", app.render());
            bail!("{}", message)
        }
        None => bail!("No form is open"),
    }
}
