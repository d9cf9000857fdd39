use clap::{Parser, Subcommand};
use photowall::grid::{self, LayoutParams};
use photowall::imaging::{DimensionProbe, ImageProbe};
use photowall::paginate::{Paginator, SliceLoader, page_full, sentinel_in_view};
use photowall::sidebar::{
    JsonFileStore, ModuleKind, ModuleRegistry, SidebarModule, default_render_table,
};
use photowall::{config, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photowall")]
#[command(about = "Brick-laid photo grids, infinite-scroll paging and sidebar modules")]
#[command(long_about = "\
Brick-laid photo grids, infinite-scroll paging and sidebar modules

Photos of mixed aspect ratio are tiled into full-width rows whose overall
shape is as close as possible to a target ratio (4:3 by default).

Aspect ratio resolution (first available wins):
  1. width / height fields
  2. \"W x H\" in the description (sidecar .txt when scanned)
  3. \"WxH\" or ?w=..&h=.. in the path
  4. \"W x H\" in the original filename
  5. 4:3

Typical use:

  photowall scan photos/ --probe --out photos.json
  photowall layout photos.json --width 1200 --width 600
  photowall browse photos.json --viewport 900
  photowall modules list

Run 'photowall gen-config' to generate a documented photowall.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding photowall.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory for photos and write a photo listing
    Scan {
        /// Directory to scan
        dir: PathBuf,
        /// Read pixel sizes from image headers when metadata has none
        #[arg(long)]
        probe: bool,
        /// Write the listing here instead of printing JSON to stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compute grid layouts for a photo listing
    Layout(LayoutArgs),
    /// Page through a photo listing the way an infinite scroll would
    Browse(BrowseArgs),
    /// Inspect and edit sidebar modules
    Modules {
        /// Module store (defaults to sidebar.store_path from config)
        #[arg(long)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        action: Option<ModulesAction>,
    },
    /// Print a stock photowall.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Photo listing (JSON array or {items, total} envelope)
    listing: PathBuf,
    /// Container width; repeat for several widths
    #[arg(long = "width", required = true)]
    widths: Vec<f64>,
    /// Desired grid width / height
    #[arg(long)]
    target_ratio: Option<f64>,
    /// Lowest candidate row height
    #[arg(long)]
    min_height: Option<f64>,
    /// Space between tiles
    #[arg(long)]
    gap: Option<f64>,
    /// Print layouts as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct BrowseArgs {
    /// Photo listing (JSON array or {items, total} envelope)
    listing: PathBuf,
    /// Fetch this many pages, as if scrolling to the end each time
    #[arg(long)]
    pages: Option<u32>,
    /// Items per page (defaults to pagination.page_size from config)
    #[arg(long)]
    page_size: Option<usize>,
    /// Container width used to place the sentinel below the grid
    #[arg(long, default_value_t = 1200.0)]
    width: f64,
    /// Viewport height; without --pages, pages load until it is filled
    #[arg(long, default_value_t = 900.0)]
    viewport: f64,
}

#[derive(Subcommand)]
enum ModulesAction {
    /// List modules
    List {
        /// Only visible modules, in display order
        #[arg(long)]
        visible: bool,
    },
    /// Add a custom module
    AddCustom {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a module
    Remove { id: String },
    /// Show or hide a module
    Toggle { id: String },
    /// Move the module at position FROM to position TO (0-based)
    Move { from: usize, to: usize },
    /// Pin the info module for a group to the top
    GroupInfo { group_id: u64 },
    /// Remove the group info module
    ClearGroupInfo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photowall=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan { dir, probe, out } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let image_probe = ImageProbe::new();
            let probe = probe.then_some(&image_probe as &dyn DimensionProbe);
            let photos = scan::scan(&dir, probe)?;
            match out {
                Some(path) => {
                    scan::save_photos(&path, &photos)?;
                    output::print_scan_output(&photos);
                    println!("==> Wrote {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&photos)?),
            }
        }
        Command::Layout(args) => {
            let config = config::load_config_with(&cli.config, layout_overrides(&args))?;
            init_thread_pool(&config.processing);
            let photos = scan::load_photos(&args.listing)?;
            let params: LayoutParams = config.layout.params();
            let layouts = grid::pack_responsive(&photos, &args.widths, &params);
            if args.json {
                let report: Vec<serde_json::Value> = layouts
                    .iter()
                    .map(|(width, items)| {
                        serde_json::json!({
                            "width": width,
                            "height": grid::layout_height(items),
                            "items": items,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for (width, items) in &layouts {
                    output::print_layout_output(*width, items);
                }
            }
        }
        Command::Browse(args) => {
            let overrides = args.page_size.map(|size| {
                let mut pagination = toml::Table::new();
                pagination.insert("page_size".into(), toml::Value::Integer(size as i64));
                overrides_with("pagination", pagination)
            });
            let config = config::load_config_with(&cli.config, overrides)?;
            browse(&args, &config)?;
        }
        Command::Modules { store, action } => {
            let config = config::load_config(&cli.config)?;
            let store_path = store.unwrap_or_else(|| PathBuf::from(&config.sidebar.store_path));
            run_modules(store_path, action.unwrap_or(ModulesAction::List { visible: false }))?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Page through a listing, printing each fetch.
///
/// With `--pages`, every page counts as scrolled to. Otherwise pages load
/// while the sentinel under the grid sits within the viewport plus the
/// configured threshold.
fn browse(args: &BrowseArgs, config: &config::WallConfig) -> Result<(), Box<dyn std::error::Error>> {
    let photos = scan::load_photos(&args.listing)?;
    let pagination = &config.pagination;
    let params = config.layout.params();
    let mut loader = SliceLoader::new(photos);
    let mut paginator = Paginator::with_predicate(
        pagination.initial_page,
        pagination.page_size,
        page_full(pagination.page_size),
    );

    let mut fetched = 0u32;
    loop {
        if !page_budget_left(args.pages, fetched) {
            break;
        }
        let page = paginator.page();
        let Some(outcome) = paginator.fetch_with(&mut loader) else {
            break;
        };
        output::print_page_output(page, &outcome, &paginator);
        fetched += 1;

        let scrolled_to = match args.pages {
            Some(_) => true,
            None => {
                let items = grid::pack(paginator.items(), args.width, &params);
                sentinel_in_view(grid::layout_height(&items), args.viewport, pagination.threshold)
            }
        };
        if !scrolled_to || !paginator.sentinel_visible() {
            break;
        }
    }
    Ok(())
}

/// Whether another fetch fits under `--pages`; unlimited when absent.
fn page_budget_left(limit: Option<u32>, fetched: u32) -> bool {
    limit.is_none_or(|limit| fetched < limit)
}

fn run_modules(
    store_path: PathBuf,
    action: ModulesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = ModuleRegistry::open(JsonFileStore::new(store_path));
    registry.subscribe(|modules| {
        tracing::debug!(modules = modules.len(), "sidebar modules changed");
    });

    let mut visible_only = false;
    match action {
        ModulesAction::List { visible } => visible_only = visible,
        ModulesAction::AddCustom { title, description } => {
            let id = format!("custom-{}", uuid::Uuid::new_v4());
            registry.add(SidebarModule::new(
                id.clone(),
                title,
                ModuleKind::Custom { description },
                0,
            ))?;
            println!("==> Added {}", id);
        }
        ModulesAction::Remove { id } => registry.remove(&id)?,
        ModulesAction::Toggle { id } => registry.toggle_visibility(&id)?,
        ModulesAction::Move { from, to } => registry.reorder(from, to)?,
        ModulesAction::GroupInfo { group_id } => {
            let id = registry.add_group_info(group_id)?;
            println!("==> Added {}", id);
        }
        ModulesAction::ClearGroupInfo => registry.remove_group_info()?,
    }

    let modules: Vec<&SidebarModule> = if visible_only {
        registry.visible_modules()
    } else {
        registry.modules().iter().collect()
    };
    output::print_modules_output(&modules, &default_render_table());
    Ok(())
}

/// Config overlay for the layout flags that were given.
fn layout_overrides(args: &LayoutArgs) -> Option<toml::Value> {
    let mut layout = toml::Table::new();
    let flags = [
        ("target_ratio", args.target_ratio),
        ("min_item_height", args.min_height),
        ("gap", args.gap),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            layout.insert(key.into(), toml::Value::Float(value));
        }
    }
    (!layout.is_empty()).then(|| overrides_with("layout", layout))
}

/// `{ section = table }` as a TOML value.
fn overrides_with(section: &str, table: toml::Table) -> toml::Value {
    let mut root = toml::Table::new();
    root.insert(section.into(), toml::Value::Table(table));
    toml::Value::Table(root)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
