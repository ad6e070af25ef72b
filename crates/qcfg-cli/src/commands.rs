use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::{json, Map, Value};
use tracing::debug;

use qcfg_config::{
    get_version, load_config, save_config, BackendConfig, Config, DiffMode, Field,
    StoreBackend, VERSION_FIELD,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        format,
        backend_config,
        ..
    } = cli;
    let config = backend_config.as_deref();

    match command {
        Command::Version(args) => cmd_version(args, open_backend(config)?, format),
        Command::Show(args) => cmd_show(args, open_backend(config)?, format),
        Command::Init(args) => cmd_init(args, open_backend(config)?),
        Command::Set(args) => cmd_set(args, open_backend(config)?),
        Command::Diff(args) => cmd_diff(args, open_backend(config)?, format),
        Command::Port(args) => cmd_port(args, format),
        Command::Certs(args) => cmd_certs(args, format),
    }
}

fn open_backend(path: Option<&Path>) -> anyhow::Result<StoreBackend> {
    let config = match path {
        Some(path) => BackendConfig::from_file(path)
            .with_context(|| format!("reading backend config {}", path.display()))?,
        None => BackendConfig::default(),
    };
    debug!(?config, "opening backend");
    Ok(config.open()?)
}

/// A record with an empty Version that loads merge into.
fn blank_record() -> Value {
    let mut map = Map::new();
    map.insert(VERSION_FIELD.to_string(), Value::String(String::new()));
    Value::Object(map)
}

fn load(name: &str, backend: StoreBackend) -> anyhow::Result<Config<Value>> {
    load_config(name, Some(backend), blank_record()).with_context(|| format!("loading {name}"))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_version(args: VersionArgs, backend: StoreBackend, format: OutputFormat) -> anyhow::Result<()> {
    let version =
        get_version(&args.name, Some(backend)).with_context(|| format!("loading {}", args.name))?;
    match format {
        OutputFormat::Text => println!("{}", version.yellow()),
        OutputFormat::Json => print_json(&json!({ "name": args.name, "version": version }))?,
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, backend: StoreBackend, format: OutputFormat) -> anyhow::Result<()> {
    let config = load(&args.name, backend)?;
    match format {
        OutputFormat::Json => println!("{config}"),
        OutputFormat::Text => {
            let data = config.data()?;
            if let Value::Object(map) = &*data {
                for (key, value) in map {
                    println!("{}: {}", key.bold(), value);
                }
            }
        }
    }
    Ok(())
}

fn cmd_init(args: InitArgs, backend: StoreBackend) -> anyhow::Result<()> {
    if !args.force {
        match get_version(&args.name, Some(backend.clone())) {
            Ok(existing) => bail!(
                "{} already exists at version {existing} (use --force to overwrite)",
                args.name
            ),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e).with_context(|| format!("checking {}", args.name)),
        }
    }

    let mut record = blank_record();
    record[VERSION_FIELD] = Value::String(args.version.clone());
    save_config(record, &args.name, Some(backend))
        .with_context(|| format!("saving {}", args.name))?;
    println!(
        "{} Initialized {} at version {}",
        "✓".green().bold(),
        args.name.bold(),
        args.version.yellow()
    );
    Ok(())
}

fn cmd_set(args: SetArgs, backend: StoreBackend) -> anyhow::Result<()> {
    let config = load(&args.name, backend)?;
    let path: Vec<&str> = args.key.split('.').collect();
    if path.iter().any(|segment| segment.is_empty()) {
        bail!("invalid key {:?}", args.key);
    }

    let value = if args.key == VERSION_FIELD {
        Value::String(args.value.clone())
    } else {
        parse_value(&args.value)
    };
    config.update(|record| set_path(record, &path, value))?;
    debug!(name = %args.name, key = %args.key, "field updated");
    config
        .save(&args.name)
        .with_context(|| format!("saving {}", args.name))?;
    println!("{} Set {} = {}", "✓".green().bold(), args.key.bold(), args.value);
    Ok(())
}

fn cmd_diff(args: DiffArgs, backend: StoreBackend, format: OutputFormat) -> anyhow::Result<()> {
    let a = load(&args.a, backend.clone())?;
    let b = load(&args.b, backend)?;
    let mode = if args.deep {
        DiffMode::Deep
    } else {
        DiffMode::Presence
    };
    let fields = a.diff_with(&b, mode)?;

    match format {
        OutputFormat::Json => print_json(&fields)?,
        OutputFormat::Text if fields.is_empty() => println!("No differences."),
        OutputFormat::Text => {
            for field in &fields {
                print_field(field);
            }
        }
    }
    Ok(())
}

fn print_field(field: &Field) {
    println!(
        "  {} {} = {} {}",
        "-".red(),
        field.name.bold(),
        field.value,
        format!("({})", field.kind).dimmed()
    );
}

fn cmd_port(args: PortArgs, format: OutputFormat) -> anyhow::Result<()> {
    let port = match &args.after {
        Some(start) => qcfg_net::next_free_port(start)?,
        None => qcfg_net::free_port()?,
    };
    match format {
        OutputFormat::Text => println!("{port}"),
        OutputFormat::Json => print_json(&json!({ "port": port }))?,
    }
    Ok(())
}

fn cmd_certs(args: CertsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let platform = qcfg_certs::system_roots().len();
    let roots = qcfg_certs::root_cas(&args.path)?;
    let added = roots.len().saturating_sub(platform);
    match format {
        OutputFormat::Text => println!(
            "{} trust roots ({} platform, {} from {})",
            roots.len().to_string().bold(),
            platform,
            added.to_string().green(),
            args.path.display()
        ),
        OutputFormat::Json => print_json(&json!({
            "total": roots.len(),
            "platform": platform,
            "added": added,
        }))?,
    }
    Ok(())
}

/// Parse a command-line value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Assign `value` at a dotted path, creating or replacing maps on the way.
fn set_path(record: &mut Value, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut node = record;
    for segment in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else { return };
        node = map.entry(segment.to_string()).or_insert(Value::Null);
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        map.insert(last.to_string(), value);
    }
}
