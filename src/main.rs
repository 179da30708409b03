use clap::{Parser, Subcommand};
use folio::app::App;
use folio::card::{RESET_ID, RETRY_ID};
use folio::contact::COPY_EMAIL_ID;
use folio::catalog::{self, CatalogStore};
use folio::config::{self, SiteConfig};
use folio::dom::{ElementId, MemoryDocument, MountPoint};
use folio::filter::{self, ALL_TAGS, Criteria};
use folio::gallery::UiEvent;
use folio::modal::{Key, KeyPress};
use folio::theme::{JsonFileStore, ThemeSwitcher};
use folio::{generate, output};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site builder with a filterable project gallery")]
#[command(long_about = "\
Portfolio site builder with a filterable project gallery

A JSON catalog of projects becomes a card gallery with tag filters, search
and a detail view for each project.

Site structure:

  site/
  ├── config.toml          # Site config (optional)
  ├── projects.json        # Catalog (path or URL set by catalog.source)
  └── .folio-state.json    # Saved theme preference (written by `folio theme toggle`)

Catalog records:

  [{\"title\": \"...\", \"description\": \"...\", \"tags\": [\"web\"],
    \"longDescription\": \"...\", \"thumbnail\": \"...\", \"image\": \"...\",
    \"demoUrl\": \"...\", \"repoUrl\": \"...\"}]

Set FOLIO_LOG (e.g. FOLIO_LOG=debug) for diagnostics on stderr.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the static site: index, tag pages, project pages
    Build,
    /// Load and validate the catalog, print its inventory
    Check,
    /// Print the projects matching a tag and/or search
    List {
        /// Only projects with this tag
        #[arg(long, default_value = ALL_TAGS)]
        tag: String,
        /// Case-insensitive substring of title or description
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Interactive session over the gallery
    Browse,
    /// Show the saved theme, or flip it
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark and save the choice
    Toggle,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.site)?;
            println!("==> Building {}", cli.site.display());
            let report = generate::generate(&config, &cli.site, &cli.output)?;
            output::print_build_output(&report, &cli.output);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.site)?;
            let source = catalog::source_for(&config.catalog.source, &cli.site);
            println!("==> Checking {}", source.location());
            let mut store = CatalogStore::new();
            let catalog = store.load(&*source)?;
            output::print_check_output(catalog, &config.catalog.source);
            println!("==> Catalog is valid");
        }
        Command::List { tag, search } => {
            let config = config::load_config(&cli.site)?;
            let source = catalog::source_for(&config.catalog.source, &cli.site);
            let mut store = CatalogStore::new();
            let catalog = store.load(&*source)?;
            let criteria = Criteria {
                active_tag: tag,
                search_query: search,
            };
            let visible = filter::apply(catalog.projects(), &criteria);
            output::print_list_output(&visible, &criteria);
        }
        Command::Browse => {
            let config = config::load_config(&cli.site)?;
            browse(&config, &cli.site)?;
        }
        Command::Theme { action } => {
            let config = config::load_config(&cli.site)?;
            let path = cli.site.join(&config.theme.state_file);
            let mut switcher = ThemeSwitcher::new(JsonFileStore::open(&path)?, config.theme.default);
            if let Some(ThemeAction::Toggle) = action {
                switcher.toggle(&mut MemoryDocument::with_all_mounts())?;
            }
            println!("{}", output::format_theme(switcher.current(), &path));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics on stderr, filtered by `FOLIO_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Line-driven session: each command becomes a page event, then the page
/// is printed again.
fn browse(config: &SiteConfig, site: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = catalog::source_for(&config.catalog.source, site);
    let store = JsonFileStore::open(site.join(&config.theme.state_file))?;
    let mut app = App::new(source, store, config);
    let mut doc = MemoryDocument::with_all_mounts();

    if let Err(err) = app.start(&mut doc) {
        println!("{}", err);
    }
    output::print_browse_frame(app.gallery(), &doc);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        let event = match command.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                for line in output::format_browse_help() {
                    println!("{}", line);
                }
                continue;
            }
            "tag" => match app.gallery().tag_target(arg.trim()) {
                Some(id) => UiEvent::Click(id.clone()),
                None => {
                    println!("No tag `{}`", arg.trim());
                    continue;
                }
            },
            "search" => UiEvent::Search(arg.to_string()),
            "open" => match open_target(&app, arg) {
                Some(id) => UiEvent::Click(id),
                None => {
                    println!("No project {} in the current list", arg.trim());
                    continue;
                }
            },
            "tab" => UiEvent::Key(KeyPress::new(Key::Tab)),
            "back" => UiEvent::Key(KeyPress::shifted(Key::Tab)),
            "close" | "esc" => UiEvent::Key(KeyPress::new(Key::Escape)),
            "reset" => UiEvent::Click(ElementId::new(RESET_ID)),
            "retry" => UiEvent::Click(ElementId::new(RETRY_ID)),
            "theme" => UiEvent::Click(MountPoint::ThemeToggle.id()),
            "copy" => UiEvent::Click(ElementId::new(COPY_EMAIL_ID)),
            other => {
                println!("Unknown command `{}`; type `help`", other);
                continue;
            }
        };

        if !app.handle(&mut doc, event)? {
            println!("Nothing to do");
            continue;
        }
        output::print_browse_frame(app.gallery(), &doc);
        if let Some(message) = app.toast() {
            println!("{}", output::format_toast(message));
        }
    }
    Ok(())
}

/// View-details id of the `n`th (1-based) visible project.
fn open_target<S, P>(app: &App<S, P>, arg: &str) -> Option<ElementId>
where
    S: catalog::CatalogSource,
    P: folio::theme::PreferenceStore,
{
    let n: usize = arg.trim().parse().ok()?;
    app.gallery().card_target(n.checked_sub(1)?).cloned()
}
