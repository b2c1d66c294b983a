use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nova_beans::{
    init_tracing, BeanInfoFlags, BeanMetadata, BeansConfig, EventSetDescriptor, Introspector,
    PropertyDescriptor,
};
use nova_beans_types::{ClassTable, MethodSignature};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nova-beans", version, about = "Bean metadata from class signature tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the properties, events and methods of one class
    Inspect(InspectArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// JSON class table (`{ "classes": [...] }`)
    table: PathBuf,
    /// Binary name of the class to inspect (e.g. `com.example.Point`)
    class: String,
    /// Leave out this super class and everything above it
    #[arg(long, conflicts_with = "flags")]
    stop_class: Option<String>,
    /// Which explicit bean infos to honour
    #[arg(long, value_enum, default_value_t = Flags::UseAll)]
    flags: Flags,
    /// TOML config file with `[introspection]` and `[logging]` tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Flags {
    UseAll,
    IgnoreImmediate,
    IgnoreAll,
}

impl From<Flags> for BeanInfoFlags {
    fn from(flags: Flags) -> Self {
        match flags {
            Flags::UseAll => BeanInfoFlags::UseAll,
            Flags::IgnoreImmediate => BeanInfoFlags::IgnoreImmediate,
            Flags::IgnoreAll => BeanInfoFlags::IgnoreAll,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Inspect(args) => {
            let config = match &args.config {
                Some(path) => BeansConfig::load_from_path(path)?,
                None => BeansConfig::default(),
            };
            init_tracing(&config.logging);

            let table = ClassTable::load_from_path(&args.table)
                .with_context(|| format!("failed to load class table {}", args.table.display()))?;
            tracing::debug!(classes = table.len(), "class table loaded");

            let mut introspector = Introspector::new(&table, config.introspection);
            let metadata = match &args.stop_class {
                Some(stop_class) => introspector.bean_info_with_stop(&args.class, stop_class)?,
                None => introspector.bean_info_with_flags(&args.class, args.flags.into())?,
            };

            let report = BeanReport::new(&metadata);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(0)
        }
    }
}

#[derive(Serialize)]
struct BeanReport {
    class: String,
    name: String,
    properties: Vec<PropertyRow>,
    events: Vec<EventRow>,
    methods: Vec<String>,
    default_property: Option<String>,
    default_event: Option<String>,
}

#[derive(Serialize)]
struct PropertyRow {
    name: String,
    #[serde(rename = "type")]
    ty: Option<String>,
    read: Option<String>,
    write: Option<String>,
    indexed_type: Option<String>,
    indexed_read: Option<String>,
    indexed_write: Option<String>,
    bound: bool,
    constrained: bool,
}

#[derive(Serialize)]
struct EventRow {
    name: String,
    listener_type: String,
    listener_methods: Vec<String>,
    add: String,
    remove: String,
    get: Option<String>,
    unicast: bool,
}

fn method_name(method: Option<&MethodSignature>) -> Option<String> {
    method.map(|m| m.name.clone())
}

impl BeanReport {
    fn new(metadata: &BeanMetadata) -> Self {
        let bean = metadata.bean();
        Self {
            class: metadata.bean_class().to_string(),
            name: bean.name.clone(),
            properties: metadata
                .property_descriptors()
                .iter()
                .map(PropertyRow::new)
                .collect(),
            events: metadata
                .event_set_descriptors()
                .iter()
                .map(EventRow::new)
                .collect(),
            methods: metadata
                .method_descriptors()
                .iter()
                .map(|m| m.method.to_string())
                .collect(),
            default_property: metadata.default_property().map(|p| p.name.clone()),
            default_event: metadata.default_event().map(|e| e.name.clone()),
        }
    }
}

impl PropertyRow {
    fn new(desc: &PropertyDescriptor) -> Self {
        Self {
            name: desc.name.clone(),
            ty: desc.property_type().map(ToString::to_string),
            read: method_name(desc.read_method.as_ref()),
            write: method_name(desc.write_method.as_ref()),
            indexed_type: desc.indexed_type().map(ToString::to_string),
            indexed_read: method_name(desc.indexed_read_method()),
            indexed_write: method_name(desc.indexed_write_method()),
            bound: desc.bound,
            constrained: desc.constrained,
        }
    }
}

impl EventRow {
    fn new(desc: &EventSetDescriptor) -> Self {
        Self {
            name: desc.name.clone(),
            listener_type: desc.listener_type.clone(),
            listener_methods: desc.listener_methods.iter().map(|m| m.name.clone()).collect(),
            add: desc.add_listener_method.name.clone(),
            remove: desc.remove_listener_method.name.clone(),
            get: method_name(desc.get_listener_method.as_ref()),
            unicast: desc.unicast,
        }
    }
}

fn print_report(report: &BeanReport) {
    println!("bean: {} ({})", report.class, report.name);

    println!("properties:");
    for prop in &report.properties {
        let mut accessors = Vec::new();
        if let Some(read) = &prop.read {
            accessors.push(format!("read: {read}"));
        }
        if let Some(write) = &prop.write {
            accessors.push(format!("write: {write}"));
        }
        if let Some(read) = &prop.indexed_read {
            accessors.push(format!("indexed read: {read}"));
        }
        if let Some(write) = &prop.indexed_write {
            accessors.push(format!("indexed write: {write}"));
        }
        let ty = match (&prop.ty, &prop.indexed_type) {
            (Some(ty), _) => ty.clone(),
            (None, Some(indexed)) => format!("{indexed}[]"),
            (None, None) => "?".to_string(),
        };
        let mut flags = String::new();
        if prop.bound {
            flags.push_str(" bound");
        }
        if prop.constrained {
            flags.push_str(" constrained");
        }
        println!("  {}: {} [{}]{}", prop.name, ty, accessors.join(", "), flags);
    }

    println!("events:");
    for event in &report.events {
        let unicast = if event.unicast { " unicast" } else { "" };
        println!(
            "  {}: {} [add: {}, remove: {}]{}",
            event.name, event.listener_type, event.add, event.remove, unicast
        );
    }

    println!("methods:");
    for method in &report.methods {
        println!("  {method}");
    }

    println!(
        "default property: {}",
        report.default_property.as_deref().unwrap_or("none")
    );
    println!(
        "default event: {}",
        report.default_event.as_deref().unwrap_or("none")
    );
}
