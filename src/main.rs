use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tome_tracker::book_store::{
    Book, BookId, BookStore, DeliveryStatus, ForSaleStatus, SqliteBookStore,
};
use tome_tracker::collection::{BootstrapOutcome, Collection};
use tome_tracker::config::{AppConfig, CliConfig, FileConfig, DEFAULT_BUSY_TIMEOUT_MS};
use tome_tracker::form::BookForm;
use tome_tracker::notifications::{Notification, NotificationLevel, Notifier};
use tome_tracker::views::{format_date, format_money, sort_books, CollectionStats, SortMode};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "tome-tracker", version, about = "Keep track of pre-ordered books")]
struct CliArgs {
    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the book database.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// How long to wait for another connection's lock, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    pub busy_timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the tomes in the collection.
    List {
        /// default, ordered, delivered or for-sale.
        #[clap(long)]
        sort: Option<SortMode>,

        /// Only tomes by this exact author.
        #[clap(long)]
        author: Option<String>,

        #[clap(long)]
        json: bool,
    },
    /// Show collection totals.
    Stats {
        #[clap(long)]
        json: bool,
    },
    /// Add a new tome.
    Add(AddArgs),
    /// Edit an existing tome.
    Edit(EditArgs),
    /// Remove a tome by id.
    Remove { id: String },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[clap(long)]
    title: String,
    #[clap(long)]
    publisher: String,
    /// YYYY-MM-DD
    #[clap(long)]
    pre_order_start: String,
    /// YYYY-MM-DD
    #[clap(long)]
    estimated_delivery: String,
    #[clap(long)]
    author: Option<String>,
    #[clap(long)]
    ordered: bool,
    /// No, Shipped or Yes.
    #[clap(long)]
    delivered: Option<DeliveryStatus>,
    /// No, Maybe or Yes.
    #[clap(long)]
    for_sale: Option<ForSaleStatus>,
    #[clap(long)]
    total_price: Option<String>,
    #[clap(long)]
    quantity: Option<String>,
    #[clap(long)]
    sold_for: Option<String>,
    #[clap(long = "tag")]
    tags: Vec<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[clap(long)]
    title: Option<String>,
    #[clap(long)]
    publisher: Option<String>,
    #[clap(long)]
    pre_order_start: Option<String>,
    #[clap(long)]
    estimated_delivery: Option<String>,
    #[clap(long)]
    author: Option<String>,
    #[clap(long)]
    ordered: Option<bool>,
    #[clap(long)]
    delivered: Option<DeliveryStatus>,
    #[clap(long)]
    for_sale: Option<ForSaleStatus>,
    #[clap(long)]
    total_price: Option<String>,
    #[clap(long)]
    quantity: Option<String>,
    #[clap(long)]
    sold_for: Option<String>,
    /// Mark the tome as not sold.
    #[clap(long, conflicts_with = "sold_for")]
    clear_sold_for: bool,
    #[clap(long = "add-tag")]
    add_tags: Vec<String>,
    #[clap(long = "remove-tag")]
    remove_tags: Vec<String>,
}

/// Prints notifications to stderr, keeping stdout for command output.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        eprintln!("[{}] {}", marker, notification.title);
        if let Some(description) = notification.description {
            eprintln!("      {}", description);
        }
    }
}

fn print_book(book: &Book) {
    let d = &book.details;
    println!("{} ({})", d.title, book.id);
    if !d.author.is_empty() {
        println!("  Author:     {}", d.author);
    }
    println!("  Publisher:  {}", d.publisher);
    println!("  Quantity:   {}", d.quantity);
    println!("  Pre-order:  {}", format_date(&d.pre_order_start_date));
    println!("  Delivery:   {}", format_date(&d.estimated_delivery_date));
    println!(
        "  Ordered: {}  Delivered: {}  For sale: {}",
        if d.ordered { "Yes" } else { "No" },
        d.delivered.as_str(),
        d.for_sale.as_str()
    );
    print!("  Paid:       {}", format_money(d.total_price));
    match d.sold_for {
        Some(sold_for) => println!("  Sold for: {}", format_money(sold_for)),
        None => println!(),
    }
    if !d.tags.is_empty() {
        println!("  Tags:       {}", d.tags.join(", "));
    }
}

/// The sold total is left out until something has been sold.
fn stats_lines(stats: &CollectionStats) -> Vec<String> {
    let mut lines = vec![
        format!("Total tomes:      {}", stats.total_books),
        format!("Collection value: {}", format_money(stats.total_value)),
    ];
    if stats.total_sold > 0.0 {
        lines.push(format!("Total sold:       {}", format_money(stats.total_sold)));
    }
    lines.push(format!("Ordered:          {}", stats.ordered_count));
    lines.push(format!("Delivered:        {}", stats.delivered_count));
    lines
}

fn apply_add_args(form: &mut BookForm, args: AddArgs) {
    form.title = args.title;
    form.publisher = args.publisher;
    form.pre_order_start_date = args.pre_order_start;
    form.estimated_delivery_date = args.estimated_delivery;
    form.author = args.author.unwrap_or_default();
    form.ordered = args.ordered;
    form.delivered = args.delivered.unwrap_or_default();
    form.for_sale = args.for_sale.unwrap_or_default();
    if let Some(total_price) = args.total_price {
        form.total_price = total_price;
    }
    if let Some(quantity) = args.quantity {
        form.quantity = quantity;
    }
    if let Some(sold_for) = args.sold_for {
        form.sold_for = sold_for;
    }
    for tag in &args.tags {
        form.tags.add_tag(tag);
    }
}

fn apply_edit_args(form: &mut BookForm, args: EditArgs) {
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(publisher) = args.publisher {
        form.publisher = publisher;
    }
    if let Some(date) = args.pre_order_start {
        form.pre_order_start_date = date;
    }
    if let Some(date) = args.estimated_delivery {
        form.estimated_delivery_date = date;
    }
    if let Some(author) = args.author {
        form.author = author;
    }
    if let Some(ordered) = args.ordered {
        form.ordered = ordered;
    }
    if let Some(delivered) = args.delivered {
        form.delivered = delivered;
    }
    if let Some(for_sale) = args.for_sale {
        form.for_sale = for_sale;
    }
    if let Some(total_price) = args.total_price {
        form.total_price = total_price;
    }
    if let Some(quantity) = args.quantity {
        form.quantity = quantity;
    }
    if let Some(sold_for) = args.sold_for {
        form.sold_for = sold_for;
    }
    if args.clear_sold_for {
        form.sold_for.clear();
    }
    for tag in &args.remove_tags {
        form.tags.remove_tag(tag);
    }
    for tag in &args.add_tags {
        form.tags.add_tag(tag);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = CliConfig {
        db_dir: cli_args.db_dir.clone(),
        busy_timeout_ms: cli_args.busy_timeout_ms,
        default_sort: SortMode::default(),
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Using book database at {:?}", config.database_path());
    let store = Arc::new(
        SqliteBookStore::new(config.database_path()).with_busy_timeout(config.busy_timeout()),
    );
    let collection = Collection::new(store.clone(), Arc::new(ConsoleNotifier));

    if let BootstrapOutcome::Degraded(err) = collection.bootstrap().await {
        warn!("Continuing without stored books: {}", err);
    }

    match cli_args.command {
        Command::List { sort, author, json } => {
            let mode = sort.unwrap_or(config.default_sort);
            let books = match author {
                Some(author) => sort_books(&store.load_by_author(&author).await?, mode),
                None => collection.sorted(mode).await,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&books)?);
            } else if books.is_empty() {
                println!("No tomes in your collection yet. Begin your journey by adding one!");
            } else {
                for book in &books {
                    print_book(book);
                    println!();
                }
            }
        }
        Command::Stats { json } => {
            let stats = collection.stats().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                for line in stats_lines(&stats) {
                    println!("{}", line);
                }
            }
        }
        Command::Add(args) => {
            let mut form = BookForm::empty();
            apply_add_args(&mut form, args);
            let book = collection.save(form.submit()?).await?;
            println!("{}", book.id);
        }
        Command::Edit(args) => {
            let id = BookId::from(args.id.as_str());
            let Some(book) = collection.find(&id).await else {
                bail!("No tome with id {}", id);
            };
            let mut form = BookForm::from_book(&book);
            apply_edit_args(&mut form, args);
            collection.save(form.submit()?).await?;
        }
        Command::Remove { id } => {
            collection.remove(&BookId::from(id.as_str())).await?;
        }
    }

    collection.end_session();
    Ok(())
}
