//! Topicview CLI application entry point
//!
//! Loads a page model, plays the requested operations against it through an
//! [`IndexController`] and prints what a visitor would see.
//!
//! # Usage
//!
//! ```bash
//! # Filter by query and tags
//! topicview render page.json -q borrow -t rust
//!
//! # Sort by importance (remembered for the next run)
//! topicview render page.json --sort importance --dir asc
//!
//! # Open on a deep link as a phone would
//! topicview render page.json --fragment '#topic-42' --width 375
//!
//! # Show or forget the remembered sort preference
//! topicview prefs
//! topicview prefs --reset
//!
//! # Print the effective configuration, or write it out as a starting point
//! topicview config show
//! topicview config init
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/topicview/config.toml` when present and
//! may be overridden with `TOPICVIEW_*` environment variables.

use std::path::Path;

use colored::Colorize;
use topicview::{
    IndexController, TopicviewError,
    cli::{Cli, Commands, ConfigCommands},
    config::EngineConfig,
    model::{ListOwner, Page, PageFile},
    nav::ScrollTarget,
    sort::{SORT_DIR_KEY, SORT_KEY_KEY, SortPreference, load_preference},
    storage::{KeyValueStore, MemoryStore, SledStore},
    toc::VisibilityChange,
    view::{RecordingView, terminal},
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TopicviewError>;

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Open the durable store, falling back to memory when it cannot be used
fn open_durable_store(config: &EngineConfig, ephemeral: bool) -> Box<dyn KeyValueStore> {
    if ephemeral {
        return Box::new(MemoryStore::new());
    }

    let opened = config
        .storage_dir()
        .map_err(TopicviewError::from)
        .and_then(|dir| SledStore::open(dir).map_err(TopicviewError::from));
    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "preference store unavailable, preferences will not be kept");
            Box::new(MemoryStore::new())
        }
    }
}

/// Category a finished scroll landed in
fn scrolled_category(page: &Page, target: &ScrollTarget) -> Option<String> {
    match target {
        ScrollTarget::Category(id) => Some(id.clone()),
        ScrollTarget::Item(id) => match page.owner_of(*id) {
            ListOwner::Category(index) => Some(page.categories[index].id.clone()),
            ListOwner::TopZone(_) => None,
        },
    }
}

fn handle_render_command(config: EngineConfig, command: Commands) -> Result<()> {
    let tag_mode = command.tag_mode();
    let Commands::Render {
        page,
        query,
        tags,
        sort,
        dir,
        fragment,
        width,
        ephemeral,
        ..
    } = command
    else {
        return Err(TopicviewError::InvalidInput("expected the render command".into()));
    };

    let page = Page::from(PageFile::from_path(&page)?);
    let prefix = config.page_prefix.clone();
    let durable = open_durable_store(&config, ephemeral);

    let mut controller = IndexController::builder()
        .page(page)
        .view(RecordingView::new())
        .config(config)
        .durable_store(durable)
        .session_store(Box::new(MemoryStore::new()))
        .build()?;

    if let Some(width) = width {
        controller.on_resize(width);
    }
    controller.setup(&prefix, fragment.as_deref());

    if sort.is_some() || dir.is_some() {
        let current = controller.sort_preference();
        let pref = SortPreference::new(
            sort.map_or(current.key, Into::into),
            dir.map_or(current.direction, Into::into),
        );
        controller.apply_sort(pref);
    }

    if tag_mode != controller.filter_state().tag_mode {
        controller.set_tag_mode(tag_mode);
    }
    for tag in &tags {
        controller.toggle_tag(tag);
    }
    if let Some(query) = query {
        controller.set_query(&query);
    }

    let landed = controller
        .run_frame()
        .and_then(|request| scrolled_category(controller.page(), &request.target));
    let visible_category = landed.or_else(|| {
        controller
            .page()
            .categories
            .iter()
            .find(|c| !c.collapsed)
            .map(|c| c.id.clone())
    });
    if let Some(category) = visible_category {
        debug!(%category, "simulating section in view");
        controller.on_visibility_change(&[VisibilityChange::entering(&category, 1.0)]);
    }
    controller.teardown();

    let (page, view) = controller.into_parts();
    print!("{}", terminal::render(&page, &view));
    Ok(())
}

fn handle_prefs_command(config: &EngineConfig, reset: bool) -> Result<()> {
    let store = SledStore::open(config.storage_dir()?)?;

    if reset {
        store.remove(SORT_KEY_KEY)?;
        store.remove(SORT_DIR_KEY)?;
        store.flush()?;
        println!("{}", "Sort preference reset".green());
        return Ok(());
    }

    let stored = store.get(SORT_KEY_KEY)?.is_some() || store.get(SORT_DIR_KEY)?.is_some();
    let pref = load_preference(&store);
    if stored {
        println!("sort: {}", pref.to_string().bold());
    } else {
        println!("sort: {} {}", pref.to_string().bold(), "(default)".dimmed());
    }
    Ok(())
}

fn handle_config_command(
    config: &EngineConfig,
    command: &ConfigCommands,
    path: Option<&Path>,
) -> Result<()> {
    match command {
        ConfigCommands::Show => print!("{}", config.to_toml()?),
        ConfigCommands::Init { force } => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => EngineConfig::config_path()?,
            };
            if path.exists() && !force {
                return Err(TopicviewError::InvalidInput(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            config.save_to(&path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };

    match cli.command {
        Commands::Prefs { reset } => handle_prefs_command(&config, reset)?,
        Commands::Config { command } => {
            handle_config_command(&config, &command, cli.config.as_deref())?;
        }
        command @ Commands::Render { .. } => handle_render_command(config, command)?,
    }

    Ok(())
}
