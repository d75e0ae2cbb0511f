use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use trading_dashboard::Dashboard;
use trading_dashboard::catalog::company_info;
use trading_dashboard::chart::RecordingSurface;
use trading_dashboard::config::{AppConfig, SourceKind};
use trading_dashboard::range::RangeWindow;
use trading_dashboard::selection::{ChartType, Timeframe};
use trading_dashboard::source::{MarketDataSource, MockSource, SnapshotSource};
use trading_dashboard::utils::{Timer, fmt_change, fmt_number, fmt_time};

#[derive(Parser)]
#[command(name = "trading-dashboard", about = "Headless mock trading dashboard", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data source override: snapshot or mock
    #[arg(long, global = true, env = "DASHBOARD_SOURCE")]
    source: Option<SourceKind>,

    /// Snapshot file (.json or .csv) override
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Render the chart for a symbol and print the resulting scene
    Chart {
        #[arg(short, long)]
        symbol: Option<String>,

        /// 1D, 5D, 1M, 3M, 5M, 6M, YTD, 1Y, 5Y
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// Line, "Vertex Line", Candles, Bar, "Coloured Bar", Histogram
        #[arg(short, long)]
        chart_type: Option<ChartType>,

        /// Draw high/low overlay lines
        #[arg(short, long)]
        indicators: bool,

        /// Visible window as START END percentages
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        range: Option<Vec<f64>>,
    },

    /// Show the watchlist with latest prices
    Watchlist,

    /// Latest-bar summary for a symbol
    Summary {
        #[arg(short, long)]
        symbol: String,
    },

    /// List symbols the data source can serve
    Symbols,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "trading_dashboard=info,warn",
        1 => "trading_dashboard=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let mut config = AppConfig::load()?;
    if let Some(source) = cli.source {
        config.data.source = source;
    }
    if let Some(path) = cli.snapshot {
        config.data.snapshot_path = path;
    }

    match config.data.source {
        SourceKind::Snapshot => {
            let source = {
                let _t = Timer::start("snapshot load");
                SnapshotSource::open(&config.data.snapshot_path)?
            };
            run(source, &config, cli.command)
        }
        SourceKind::Mock => {
            let source = MockSource::from_config(&config.data);
            run(source, &config, cli.command)
        }
    }
}

fn run<P: MarketDataSource>(source: P, config: &AppConfig, command: Command) -> Result<()> {
    let mut dash: Dashboard<P, RecordingSurface> = Dashboard::new(source, config)?;

    match command {
        Command::Chart {
            symbol,
            timeframe,
            chart_type,
            indicators,
            range,
        } => {
            if let Some(symbol) = symbol {
                dash.select_symbol(&symbol)?;
            }
            if let Some(tf) = timeframe {
                dash.select_timeframe(tf)?;
            }
            if let Some(ct) = chart_type {
                dash.set_chart_type(ct)?;
            }
            if indicators {
                dash.toggle_indicators()?;
            }
            if let Some([start, end]) = range.as_deref() {
                dash.set_range(RangeWindow::new(*start, *end))?;
            }
            print_chart(&dash);
        }

        Command::Watchlist => {
            let entries = dash.watchlist()?;
            println!("─────────────────────────────────────────────────────");
            println!("  Watchlist");
            println!("─────────────────────────────────────────────────────");
            for e in &entries {
                println!(
                    "  {:<6} {:<28} {:>10.2} {:>8}",
                    e.symbol,
                    e.name,
                    e.latest_price,
                    fmt_change(e.change_percent)
                );
            }
            println!("─────────────────────────────────────────────────────");
        }

        Command::Summary { symbol } => match dash.summary(&symbol)? {
            Some(s) => {
                let info = company_info(&s.symbol);
                println!("─────────────────────────────────");
                println!("  {} · {} ({})", s.symbol, info.name, info.sector);
                println!("─────────────────────────────────");
                println!("  Price    : {:.2}", s.latest_price);
                println!(
                    "  Change   : {:+.2} ({})",
                    s.daily_change,
                    fmt_change(s.daily_change_percent)
                );
                println!("  Day range: {:.2} – {:.2}", s.day_low, s.day_high);
                println!("  Volume   : {}", fmt_number(s.volume as i64));
                println!("─────────────────────────────────");
            }
            None => println!("No data found for symbol {}", symbol.trim().to_uppercase()),
        },

        Command::Symbols => {
            let syms = dash.available_symbols();
            if syms.is_empty() {
                println!("No symbols in the data source.");
            } else {
                println!("{} symbols:", syms.len());
                for s in &syms {
                    println!("  {}", s);
                }
            }
        }
    }

    dash.shutdown()?;
    Ok(())
}

fn print_chart<P: MarketDataSource>(dash: &Dashboard<P, RecordingSurface>) {
    let sel = dash.selection();
    let series = dash.series();
    let info = company_info(&sel.symbol);

    println!("─────────────────────────────────");
    println!("  {} · {} ({})", sel.symbol, info.name, info.sector);
    println!("─────────────────────────────────");
    println!(
        "  Timeframe : {} ({} bars, as of {})",
        sel.timeframe,
        series.len(),
        dash.reference_date()
    );
    println!("  Chart     : {}", sel.chart_type);
    println!("  Indicators: {}", if sel.indicators { "on" } else { "off" });

    if let (Some(first), Some(last)) = (series.points.first(), series.last()) {
        println!("  Dates     : {} → {}", fmt_time(first.time), fmt_time(last.time));
    }

    let Some(surface) = dash.main_chart().surface() else {
        return;
    };
    if dash.overview_chart().is_some() {
        let w = dash.range_window();
        match surface.visible_range() {
            Some(r) => println!(
                "  Range     : {:.2}% .. {:.2}% → bars {}..{}",
                w.start(),
                w.end(),
                r.from,
                r.to
            ),
            None => println!("  Range     : {:.2}% .. {:.2}%", w.start(), w.end()),
        }
    }
    for (id, drawn) in surface.all_series() {
        println!(
            "  Series #{} : {:?} {} points ({})",
            id.0,
            drawn.kind,
            drawn.data.len(),
            drawn.style.color
        );
    }
    println!("─────────────────────────────────");
    if series.is_empty() {
        println!("  (no data)");
    } else {
        println!("  {}", surface.sparkline());
    }
    println!("─────────────────────────────────");
    info!("rendered {} at {}px", sel.symbol, surface.width());
}
