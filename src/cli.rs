// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use serde::Serialize;

use crate::alch::{self, AlchQuery};
use crate::catalog::{ItemCatalog, SearchCriteria};
use crate::config::consts::REQUEST_PAUSE_MS;
use crate::config::options::{default_log_path, CatalogOptions, ClientOptions};
use crate::core::sanitize::convert;
use crate::hiscores::{self, HiscoresClient, Layout};
use crate::prices::{Pacing, PriceClient, Timestep};
use crate::progress::Progress;

const HELP: &str = include_str!("cli_help.txt");

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Hiscores { username: String, account_type: String, layout: Option<PathBuf>, raw: bool },
    Latest(Option<u32>),
    FiveMinute(Option<i64>),
    OneHour(Option<i64>),
    TimeSeries { id: u32, step: Timestep },
    Price(u32),
    Ge(u32),
    Refresh,
    Search(SearchCriteria),
    Alch { query: AlchQuery, delay_ms: u64 },
    Convert(String),
    Help,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub command: Command,
    pub catalog: Option<PathBuf>,
    pub log: Option<PathBuf>,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_args(env::args().skip(1))?;
    execute(params)
}

pub fn execute(params: Params) -> Result<(), Box<dyn Error>> {
    if params.command != Command::Help {
        crate::log::init(params.log.clone().unwrap_or_else(default_log_path))?;
    }

    let opts = ClientOptions::default();
    let catalog = ItemCatalog::new(
        params.catalog.clone().map(CatalogOptions::at).unwrap_or_default(),
    );

    match params.command {
        Command::Hiscores { username, account_type, layout, raw } => {
            let mut client = HiscoresClient::new(&opts);
            if let Some(path) = layout {
                client = client.with_layout(Layout::from_json_file(path)?);
            }
            let player = client.lookup(&username, &account_type)?;
            if raw {
                print!("{}", hiscores::encode(player.snapshot(), client.layout()));
            } else {
                print_json(player.snapshot())?;
            }
        }
        Command::Latest(id) => print_json(&PriceClient::new(&opts).try_latest(id)?)?,
        Command::FiveMinute(ts) => print_json(&PriceClient::new(&opts).try_five_minute(ts)?)?,
        Command::OneHour(ts) => print_json(&PriceClient::new(&opts).try_one_hour(ts)?)?,
        Command::TimeSeries { id, step } => {
            print_json(&PriceClient::new(&opts).try_time_series(id, step)?)?
        }
        Command::Price(id) => println!("{}", PriceClient::new(&opts).try_current_price(id)?),
        Command::Ge(id) => print_json(&PriceClient::new(&opts).try_ge_lookup(id)?)?,
        Command::Refresh => {
            let n = catalog.try_refresh(&PriceClient::new(&opts))?;
            eprintln!("Wrote {n} items to {}", catalog.path().display());
        }
        Command::Search(criteria) => print_json(&catalog.search(&criteria))?,
        Command::Alch { query, delay_ms } => {
            let items = catalog.load();
            if items.is_empty() {
                return Err(format!(
                    "Catalog {} is empty; run `osrs refresh` first",
                    catalog.path().display()
                ).into());
            }
            let prices = PriceClient::new(&opts.with_pacing(Pacing::from_millis(delay_ms)));
            let mut progress = StderrProgress::default();
            let found = alch::scan(&items, &query, &prices, Some(&mut progress))?;
            print_json(&found)?;
        }
        Command::Convert(s) => println!("{}", convert(&s)?),
        Command::Help => eprint!("{HELP}"),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Params, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut catalog = None;
    let mut log = None;
    let mut positional: Vec<String> = Vec::new();

    let mut account_type = s!("N");
    let mut layout = None;
    let mut raw = false;
    let mut step = Timestep::OneHour;
    let mut criteria = SearchCriteria::new();
    let mut alch = AlchQuery { name: Some(s!("battlestaff")), min_profit: -10, ..AlchQuery::default() };
    let mut delay_ms = REQUEST_PAUSE_MS;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--log" => log = Some(PathBuf::from(value(&mut args, &a)?)),
            "--catalog" => catalog = Some(PathBuf::from(value(&mut args, &a)?)),
            "-t" | "--type" => account_type = value(&mut args, &a)?,
            "--layout" => layout = Some(PathBuf::from(value(&mut args, &a)?)),
            "--raw" => raw = true,
            "--step" => step = value(&mut args, &a)?.parse()?,
            "--name" => {
                let v = value(&mut args, &a)?;
                criteria.name = Some(v.clone());
                alch.name = Some(v);
            }
            "--all" => alch.name = None,
            "--examine" => criteria.examine = Some(value(&mut args, &a)?),
            "--icon" => criteria.icon = Some(value(&mut args, &a)?),
            "--id" => criteria.id = Some(value(&mut args, &a)?.parse()?),
            "--members" => criteria.members = Some(value(&mut args, &a)?.to_ascii_lowercase().parse()?),
            "--lowalch" => criteria.lowalch = Some(value(&mut args, &a)?.parse()?),
            "--highalch" => criteria.highalch = Some(value(&mut args, &a)?.parse()?),
            "--limit" => criteria.limit = Some(value(&mut args, &a)?.parse()?),
            "--value" => criteria.value = Some(value(&mut args, &a)?.parse()?),
            "--min-profit" => alch.min_profit = value(&mut args, &a)?.parse()?,
            "--delay-ms" => delay_ms = value(&mut args, &a)?.parse()?,
            "-h" | "--help" => {
                return Ok(Params { command: Command::Help, catalog, log });
            }
            flag if flag.starts_with("--") || (flag.starts_with('-') && !looks_numeric(flag)) => {
                return Err(format!("Unknown arg: {}", flag).into());
            }
            _ => positional.push(a),
        }
    }

    let mut pos = positional.into_iter();
    let Some(cmd) = pos.next() else {
        return Ok(Params { command: Command::Help, catalog, log });
    };
    let arg = pos.next();
    if let Some(extra) = pos.next() {
        return Err(format!("Unexpected argument: {}", extra).into());
    }
    let required = |what: &str| -> Result<String, Box<dyn Error>> {
        arg.clone().ok_or_else(|| format!("{cmd} needs {what}").into())
    };

    let command = match cmd.to_ascii_lowercase().as_str() {
        "hiscores" => Command::Hiscores {
            username: required("a username")?,
            account_type,
            layout,
            raw,
        },
        "latest" => Command::Latest(arg.as_deref().map(str::parse).transpose()?),
        "5m" => Command::FiveMinute(arg.as_deref().map(str::parse).transpose()?),
        "1h" => Command::OneHour(arg.as_deref().map(str::parse).transpose()?),
        "timeseries" => Command::TimeSeries { id: required("an item id")?.parse()?, step },
        "price" => Command::Price(required("an item id")?.parse()?),
        "ge" => Command::Ge(required("an item id")?.parse()?),
        "refresh" => Command::Refresh,
        "search" => Command::Search(criteria),
        "alch" => Command::Alch { query: alch, delay_ms },
        "convert" => Command::Convert(required("a value")?),
        other => return Err(format!("Unknown command: {}", other).into()),
    };

    Ok(Params { command, catalog, log })
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, Box<dyn Error>> {
    args.next().ok_or_else(|| format!("Missing value for {}", flag).into())
}

fn looks_numeric(s: &str) -> bool {
    s.trim_start_matches('-').starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Prints one line per priced item to stderr.
#[derive(Default)]
struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Pricing {total} items…");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, id: u32, name: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {} ({})", self.done, self.total, name, id);
    }

    fn item_failed(&mut self, id: u32, name: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {} ({}): no price, skipped", self.done, self.total, name, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Params {
        parse_args(line.split_whitespace().map(String::from)).unwrap()
    }

    fn parse_err(line: &str) -> String {
        parse_args(line.split_whitespace().map(String::from)).unwrap_err().to_string()
    }

    #[test]
    fn no_args_is_help() {
        assert_eq!(parse("").command, Command::Help);
        assert_eq!(parse("search --help").command, Command::Help);
    }

    #[test]
    fn hiscores_with_type_and_layout() {
        let p = parse("hiscores Lynx_Titan -t uim --layout cat.json --raw");
        assert_eq!(p.command, Command::Hiscores {
            username: s!("Lynx_Titan"),
            account_type: s!("uim"),
            layout: Some(PathBuf::from("cat.json")),
            raw: true,
        });
    }

    #[test]
    fn price_commands_take_ids() {
        assert_eq!(parse("latest").command, Command::Latest(None));
        assert_eq!(parse("latest 4151").command, Command::Latest(Some(4151)));
        assert_eq!(parse("5m 1665273600").command, Command::FiveMinute(Some(1_665_273_600)));
        assert_eq!(parse("price 561").command, Command::Price(561));
        assert_eq!(
            parse("timeseries 4151 --step 6h").command,
            Command::TimeSeries { id: 4151, step: Timestep::SixHours }
        );
        assert!(parse_err("price").contains("needs an item id"));
        assert!(parse_args(["price", "abc"].map(String::from)).is_err());
    }

    #[test]
    fn search_collects_criteria_and_globals() {
        let p = parse("--log l.log search --name rune --members TRUE --value 100 --catalog items.json");
        assert_eq!(p.log, Some(PathBuf::from("l.log")));
        assert_eq!(p.catalog, Some(PathBuf::from("items.json")));
        assert_eq!(
            p.command,
            Command::Search(SearchCriteria::new().name("rune").members(true).value(100))
        );
    }

    #[test]
    fn alch_defaults_mirror_the_battlestaff_example() {
        let Command::Alch { query, delay_ms } = parse("alch").command else { panic!("not alch") };
        assert_eq!(query.name.as_deref(), Some("battlestaff"));
        assert_eq!(query.min_profit, -10);
        assert_eq!(delay_ms, REQUEST_PAUSE_MS);

        let Command::Alch { query, delay_ms } = parse("alch --all --min-profit -50 --delay-ms 0").command
        else { panic!("not alch") };
        assert_eq!(query.name, None);
        assert_eq!(query.min_profit, -50);
        assert_eq!(delay_ms, 0);
    }

    #[test]
    fn help_prints_without_opening_the_log() {
        let params = Params { command: Command::Help, catalog: None, log: None };
        assert!(execute(params).is_ok());
        assert!(!crate::log::is_enabled());
    }

    #[test]
    fn negative_numbers_are_values_not_flags() {
        assert_eq!(parse("convert -1.5k").command, Command::Convert(s!("-1.5k")));
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(parse_err("frobnicate").contains("Unknown command"));
        assert!(parse_err("search --colour red").contains("Unknown arg"));
        assert!(parse_err("price 1 2").contains("Unexpected argument"));
        assert!(parse_err("search --name").contains("Missing value"));
    }
}
