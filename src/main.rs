use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use debtor_history::config::{
    config_dir, init_config_dir, load_config, open_source, resolve_path,
};
use debtor_history::ledger::{record_totals, returned_value, sold_value};
use debtor_history::{
    Balance, Config, CurrencyCode, DebtorStore, ExpandTarget, ExpansionState, HistoryQuery,
    HistorySource, MoneyAmount, PageSize, PaymentRecord, Result, Section, Totals,
};

#[derive(Parser)]
#[command(name = "debtor")]
#[command(version, about = "Debtor payment history viewer", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.debtor-history or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List debtors with their total and remaining debt
    Debtors {
        /// Only show debtors whose name or phone number contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the payment history of a debtor
    History {
        /// Debtor identifier
        debtor: String,

        /// Items per page: 10, 20 or 50 (default: from config.toml)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page to show, starting at 1
        #[arg(short, long)]
        page: Option<usize>,

        /// Expand a payment card, or one of its sections (can be repeated)
        #[arg(short, long, value_name = "PAYMENT[:SECTION]")]
        expand: Vec<String>,

        /// Expand every card and section
        #[arg(long)]
        expand_all: bool,
    },

    /// Export a debtor's statement as a JSON document
    Export {
        /// Debtor identifier
        debtor: String,

        /// Output directory (default: export.output_dir from config.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Debtors { search } => cmd_debtors(&cfg_dir, search.as_deref()),
        Commands::History {
            debtor,
            limit,
            page,
            expand,
            expand_all,
        } => cmd_history(&cfg_dir, &debtor, limit, page, &expand, expand_all),
        Commands::Export { debtor, output } => cmd_export(&cfg_dir, &debtor, output),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized debtor history config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Pick a data source:      $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Add debtor data files:   {}/data/<debtor-id>.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then look at a debtor:");
    println!("  debtor history <debtor-id>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct DebtorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PHONE")]
    phone: String,
    #[tabled(rename = "TOTAL DEBT")]
    total: String,
    #[tabled(rename = "REMAINING")]
    remaining: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "CURRENCY")]
    currency: String,
    #[tabled(rename = "TOTAL DEBT")]
    owed: String,
    #[tabled(rename = "TOTAL PAID")]
    paid: String,
    #[tabled(rename = "REDUCTIONS")]
    reduced: String,
    #[tabled(rename = "REMAINING")]
    remaining: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "PRODUCT")]
    name: String,
    #[tabled(rename = "QUANTITY")]
    quantity: String,
    #[tabled(rename = "UNIT PRICE")]
    unit_price: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct ReturnRow {
    #[tabled(rename = "PRODUCT")]
    name: String,
    #[tabled(rename = "QUANTITY")]
    quantity: String,
    #[tabled(rename = "UNIT PRICE")]
    unit_price: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "RETURNED")]
    date: String,
    #[tabled(rename = "REASON")]
    reason: String,
}

#[derive(Tabled)]
struct ReductionRow {
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "REASON")]
    reason: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "TRANSACTION #")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "PAYMENT METHOD")]
    method: String,
}

fn format_decimal(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let plain = format!("{:.2}", rounded.abs());
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let grouped = format_grouped_digits(whole);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}.{frac}")
    } else {
        format!("{grouped}.{frac}")
    }
}

fn format_grouped_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

fn format_money(amount: Decimal, currency: &CurrencyCode) -> String {
    format!("{} {}", format_decimal(amount), currency)
}

fn format_amounts(amounts: &[MoneyAmount]) -> String {
    if amounts.is_empty() {
        return format_decimal(Decimal::ZERO);
    }
    amounts
        .iter()
        .map(|m| format_money(m.amount, &m.currency))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One figure per currency, zero when there is nothing
fn format_per_currency(totals: &Totals, pick: impl Fn(&Balance) -> Decimal) -> String {
    if totals.is_empty() {
        return format_decimal(Decimal::ZERO);
    }
    totals
        .iter()
        .map(|(currency, balance)| format_money(pick(balance), currency))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_date(date: &DateTime<Utc>, config: &Config) -> String {
    date.format(&config.display.date_format).to_string()
}

/// List debtors with their debt figures
fn cmd_debtors(cfg_dir: &Path, search: Option<&str>) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let source = open_source(&config, cfg_dir);

    let debtors: Vec<_> = source
        .debtors()?
        .into_iter()
        .filter(|d| search.map_or(true, |needle| d.matches(needle)))
        .collect();

    if debtors.is_empty() {
        println!("No debtors found.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(debtors.len());
    for debtor in &debtors {
        let page = source.fetch_history(&HistoryQuery {
            debtor_id: debtor.id.clone(),
            limit: usize::MAX,
            offset: 0,
        })?;
        rows.push(DebtorRow {
            id: debtor.id.clone(),
            name: debtor.full_name(),
            phone: debtor.phone_number.clone(),
            total: format_per_currency(&page.totals, |b| b.owed),
            remaining: format_per_currency(&page.totals, |b| b.remaining()),
        });
    }

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("Total: {} debtors", debtors.len());

    Ok(())
}

/// Show a debtor's payment history
fn cmd_history(
    cfg_dir: &Path,
    debtor_id: &str,
    limit: Option<u32>,
    page: Option<usize>,
    expand: &[String],
    expand_all: bool,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let page_size = match limit {
        Some(n) => PageSize::try_from(n)?,
        None => config.store.page_size,
    };

    let targets = expand
        .iter()
        .map(|s| s.parse::<ExpandTarget>())
        .collect::<Result<Vec<_>>>()?;

    let mut store = DebtorStore::new(open_source(&config, cfg_dir), page_size);
    if let Some(page) = page {
        store.go_to_page(page)?;
    }
    store.load(debtor_id)?;

    let mut expansion = ExpansionState::new();
    if expand_all {
        expansion.expand_all(store.records());
    }
    for target in &targets {
        expansion.open(target);
    }

    let name = store
        .debtor()
        .map(|d| d.full_name())
        .unwrap_or_else(|| "Debtor".to_string());
    println!("{name}'s Debt History");
    if let Some(debtor) = store.debtor() {
        println!("{} | {}", debtor.phone_number, debtor.email);
    }
    println!("{}", "-".repeat(50));

    if store.total_items() == 0 {
        println!("No debts found for this debtor.");
        return Ok(());
    }

    print_summary(store.totals());

    if store.records().is_empty() {
        println!();
        println!(
            "Page {} is out of range: {} items fit on {} page(s) of {}.",
            store.current_page(),
            store.total_items(),
            store.total_pages(),
            store.pagination().page_size
        );
        return Ok(());
    }

    for record in store.records() {
        println!();
        print_record(record, &expansion, &config);
    }

    println!();
    println!(
        "Page {} of {} | {} items | {} items per page",
        store.current_page(),
        store.total_pages().max(1),
        store.total_items(),
        store.pagination().page_size
    );

    Ok(())
}

fn print_summary(totals: &Totals) {
    let rows: Vec<SummaryRow> = totals
        .iter()
        .map(|(currency, balance)| SummaryRow {
            currency: currency.to_string(),
            owed: format_decimal(balance.owed),
            paid: format_decimal(balance.paid),
            reduced: format_decimal(balance.reduced),
            remaining: format_decimal(balance.remaining()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
}

fn print_record(record: &PaymentRecord, expansion: &ExpansionState, config: &Config) {
    let id = record.id();
    let totals = record_totals(record);

    println!("Sale #{} [{}]", record.payment.number, totals.status());
    println!("  Date:       {}", format_date(&record.payment.created_at, config));
    println!("  Amount:     {}", format_amounts(&record.payment.amounts));
    if totals.has_reductions() {
        println!("  Reductions: -{}", format_per_currency(&totals, |b| b.reduced));
    }
    println!("  Remaining:  {}", format_per_currency(&totals, |b| b.remaining()));

    if !expansion.is_visible(id, Section::Details) {
        println!("  (expand with: --expand {id})");
        return;
    }

    // Sold products
    println!();
    println!(
        "  Sold Products ({}) {}",
        record.sold_products.len(),
        format_decimal(sold_value(record))
    );
    if expansion.is_visible(id, Section::Products) {
        if record.sold_products.is_empty() {
            println!("  No products found for this payment.");
        } else {
            let rows: Vec<ProductRow> = record
                .sold_products
                .iter()
                .map(|p| ProductRow {
                    name: p.name.clone(),
                    quantity: format!("{} {}", p.quantity.normalize(), p.unit),
                    unit_price: format_decimal(p.unit_price),
                    total: format_decimal(p.line_total()),
                })
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }

    // Returned products
    if !record.returned_products.is_empty() {
        println!(
            "  Returned Products ({}) -{}",
            record.returned_products.len(),
            format_decimal(returned_value(record))
        );
        if expansion.is_visible(id, Section::Returns) {
            let rows: Vec<ReturnRow> = record
                .returned_products
                .iter()
                .map(|p| ReturnRow {
                    name: p.name.clone(),
                    quantity: format!("{} {}", p.quantity.normalize(), p.unit),
                    unit_price: format_decimal(p.unit_price),
                    total: format_decimal(p.line_total()),
                    date: format_date(&p.returned_at, config),
                    reason: p.reason.clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }

    // Debt reductions
    if !record.debt_reductions.is_empty() {
        println!(
            "  Debt Reductions ({}) -{}",
            record.debt_reductions.len(),
            format_per_currency(&totals, |b| b.reduced)
        );
        if expansion.is_visible(id, Section::Reductions) {
            let rows: Vec<ReductionRow> = record
                .debt_reductions
                .iter()
                .map(|r| ReductionRow {
                    kind: r.kind.to_string(),
                    amount: format_amounts(&r.amounts),
                    date: format_date(&r.created_at, config),
                    reason: r.reason.clone(),
                })
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }

    // Transactions are always listed inside an expanded card
    println!("  Payment Transactions");
    if record.transactions.is_empty() {
        println!("  No payments have been made yet.");
    } else {
        let rows: Vec<TransactionRow> = record
            .transactions
            .iter()
            .map(|t| TransactionRow {
                number: t.number.clone(),
                date: format_date(&t.created_at, config),
                amount: format_amounts(&t.amounts),
                method: t.payment_method.clone().unwrap_or_else(|| "-".to_string()),
            })
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Export a debtor's statement
fn cmd_export(cfg_dir: &Path, debtor_id: &str, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let output_dir = output.unwrap_or_else(|| resolve_path(&config.export.output_dir, cfg_dir));

    let mut store = DebtorStore::new(open_source(&config, cfg_dir), config.store.page_size);
    store.load(debtor_id)?;
    let path = store.export(&output_dir)?;

    let name = store.debtor().map(|d| d.full_name()).unwrap_or_default();
    println!("Exported statement for {name}");
    println!("  Saved: {}", path.display());

    Ok(())
}
