use agent_tools::{Outcome, Rows, Toolset};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use insights_sqlite::{HhiRecord, Ipv6Adoption, Ipv6Filter, Store, StoreConfig, TopAsnSnapshot};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, EnvFilter};

mod config;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat { Text, Json }

fn today_utc() -> String {
    let d = OffsetDateTime::now_utc().date();
    format!("{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day())
}

#[derive(Debug, Parser)]
#[command(name = "insights", version, about = "Country routing-security and ISP-market lookups over the insights store")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./insights.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Store file; overrides store.path from the config
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,
    /// Output format (default: json, or the config's format)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Monthly ROA coverage for a country and IP version
    Roa {
        /// ISO 3166-1 alpha-2 country code
        country: String,
        /// IP version: 4 or 6
        #[arg(long = "ip", default_value = "4")]
        ip_family: String,
        /// First date of the window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        start: String,
        /// Last date of the window (YYYY-MM-DD, inclusive). Default: today (UTC)
        #[arg(long)]
        end: Option<String>,
    },
    /// Latest top ASNs by subscriber count
    TopAsns {
        country: String,
    },
    /// Herfindahl-Hirschman Index of ISP market concentration
    Hhi {
        country: String,
    },
    /// IPv6 adoption; latest per source unless a date or range is given
    Ipv6 {
        country: String,
        /// Measurement source (google, facebook, akamai, cisco, cloudflare)
        #[arg(long)]
        source: Option<String>,
        /// Exact date; --start/--end are ignored when set
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// List store tables, or the columns of TABLE
    Tables {
        table: Option<String>,
    },
    /// Print tool definitions for function-calling runtimes
    Tools {
        /// Restrict to one toolset (roa, rpki, asn, market, ipv6)
        #[arg(long)]
        toolset: Option<String>,
    },
    /// Run a tool by name with JSON arguments ("-" reads them from stdin)
    Call {
        tool: String,
        args: Option<String>,
    },
}

fn init_logging(default_directive: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive.unwrap_or("warn")));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".into())
}

fn opt_int(v: Option<i64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".into())
}

/// Print the envelope as JSON, or as one line per row in text mode.
fn emit<T: Serialize>(format: OutputFormat, outcome: &Outcome<T>, lines: impl Fn(&T) -> Vec<String>) -> Result<()> {
    match (format, outcome) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string(outcome)?),
        (OutputFormat::Text, Outcome::Success(v)) => {
            let out = lines(v);
            if out.is_empty() {
                println!("no data");
            }
            for l in out {
                println!("{}", l);
            }
        }
        (OutputFormat::Text, Outcome::Failure { error_message }) => println!("error: {}", error_message),
    }
    Ok(())
}

fn top_asn_lines(s: &TopAsnSnapshot) -> Vec<String> {
    let date = s.date.as_deref().unwrap_or("-");
    s.data
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{} {} #{} AS{} {} subs={} share={}%",
                r.country_code,
                date,
                i + 1,
                r.asn.as_deref().unwrap_or("?"),
                r.asn_name.as_deref().unwrap_or("-"),
                opt_int(r.subs_count),
                opt(r.percentage)
            )
        })
        .collect()
}

fn hhi_lines(rows: &Rows<HhiRecord>) -> Vec<String> {
    rows.data
        .iter()
        .map(|r| format!("{} hhi={} asns={} users={}", r.country_code, opt(r.hhi), opt_int(r.number_of_asns), opt_int(r.total_users)))
        .collect()
}

fn ipv6_lines(rows: &Rows<Ipv6Adoption>) -> Vec<String> {
    rows.data
        .iter()
        .map(|r| format!("{} {} {} {}%", r.country_code, r.date, r.source, opt(r.percentage)))
        .collect()
}

fn read_call_args(raw: Option<String>) -> Result<serde_json::Value> {
    let text = match raw.as_deref() {
        None => return Ok(serde_json::json!({})),
        Some("-") => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
        Some(s) => s.to_string(),
    };
    serde_json::from_str(&text).context("tool arguments must be a JSON object")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded_cfg = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    init_logging(loaded_cfg.log.as_deref());

    let mut store_cfg = loaded_cfg.store.clone().unwrap_or_else(StoreConfig::default);
    if let Some(db) = cli.db.clone() {
        store_cfg.path = db;
    }
    let format = match (cli.format, loaded_cfg.format.as_deref()) {
        (Some(f), _) => f,
        (None, Some("text")) => OutputFormat::Text,
        (None, Some("json")) | (None, None) => OutputFormat::Json,
        (None, Some(other)) => bail!("unknown format in config: {}", other),
    };
    tracing::debug!(store = %store_cfg.path.display(), ?format, "starting");
    let store = Store::new(store_cfg);

    match cli.command {
        Commands::Version => {
            println!("insights {} (core {})", env!("CARGO_PKG_VERSION"), insights_core::version());
        }
        Commands::Roa { country, ip_family, start, end } => {
            let end = end.unwrap_or_else(today_utc);
            let out = agent_tools::monthly_roa_coverage(&store, &country, &ip_family, &start, &end);
            emit(format, &out, |c| {
                c.series
                    .iter()
                    .map(|(date, pct)| format!("{} IPv{} {} {}%", c.country_code, ip_family, date, opt(*pct)))
                    .collect()
            })?;
        }
        Commands::TopAsns { country } => {
            emit(format, &agent_tools::top_four_asns(&store, &country), top_asn_lines)?;
        }
        Commands::Hhi { country } => {
            emit(format, &agent_tools::country_asn_hhi(&store, &country), hhi_lines)?;
        }
        Commands::Ipv6 { country, source, date, start, end } => {
            let filter = Ipv6Filter { source, specific_date: date, start_date: start, end_date: end };
            emit(format, &agent_tools::country_ipv6_adoption_rate(&store, &country, &filter), ipv6_lines)?;
        }
        Commands::Tables { table } => {
            let db = store.connect()?;
            let names = match table {
                Some(t) => db.table_columns(&t)?,
                None => db.list_tables()?,
            };
            match format {
                OutputFormat::Text => names.iter().for_each(|n| println!("{}", n)),
                OutputFormat::Json => println!("{}", serde_json::to_string(&names)?),
            }
        }
        Commands::Tools { toolset } => {
            let set = match toolset {
                Some(label) => Some(Toolset::from_label(&label).ok_or_else(|| anyhow!("unknown toolset: {}", label))?),
                None => None,
            };
            let specs = agent_tools::catalog(set);
            match format {
                OutputFormat::Text => {
                    for s in specs {
                        println!("{}: {}", s.name, s.description);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&specs)?),
            }
        }
        Commands::Call { tool, args } => {
            let args = read_call_args(args)?;
            let out = agent_tools::invoke(&store, &tool, args);
            println!("{}", serde_json::to_string(&out)?);
        }
    }
    Ok(())
}
