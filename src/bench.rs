// Comparison benchmark for partial-document decoding.
//
// Purpose:
// - Decode the same JSON body with four strategies (plain struct, map, Optional fields,
//   Option fields) and build a `Person` from whichever fields each strategy considers set.
// - Emit machine-readable JSON to stdout and a human-readable table to stderr.
//
// Design notes:
// - Runs in-process on the calling thread; numbers are for trend tracking, not lab-grade profiling.
// - Setters are boxed closures so every strategy pays the same cost for building the record.

use std::fmt;
use std::hint::black_box;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::error::{Error, ErrorKind};
use crate::json;
use crate::optional::Optional;

pub const DEFAULT_BODY: &str = r#"{"Name":"Bob","Age":1}"#;

#[derive(Clone, Debug)]
pub struct BenchArgs {
    pub iterations: u64,
    pub body: String,
    pub format: BenchFormat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BenchFormat {
    Json,
    Table,
    Both,
}

impl BenchFormat {
    pub fn parse(input: &str) -> Result<Self, Error> {
        match input.trim() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "both" => Ok(Self::Both),
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message("invalid --format")
                .with_hint("Use json, table, or both.")),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    Struct,
    Map,
    Optional,
    Option,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Struct,
        Strategy::Map,
        Strategy::Optional,
        Strategy::Option,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Struct => "struct",
            Strategy::Map => "map",
            Strategy::Optional => "optional",
            Strategy::Option => "option",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target record every strategy builds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Person {
    pub name: String,
    pub description: String,
    pub age: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct PlainPerson {
    name: String,
    description: String,
    age: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OptionalPerson {
    name: Optional<String>,
    description: Optional<String>,
    age: Optional<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OptionPerson {
    name: Option<String>,
    description: Option<String>,
    age: Option<i64>,
}

type Setter = Box<dyn FnOnce(&mut Person)>;

fn apply_setters(setters: Vec<Setter>) -> Person {
    let mut person = Person::default();
    for setter in setters {
        setter(&mut person);
    }
    person
}

/// Decodes `body` with `strategy` and builds a `Person` from the fields it treats as set.
pub fn decode_person(strategy: Strategy, body: &str) -> Result<Person, Error> {
    let mut setters: Vec<Setter> = Vec::with_capacity(3);
    match strategy {
        Strategy::Struct => {
            let plain: PlainPerson = decode(strategy, body)?;
            if !plain.name.is_empty() {
                setters.push(Box::new(move |p: &mut Person| p.name = plain.name));
            }
            if !plain.description.is_empty() {
                setters.push(Box::new(move |p: &mut Person| p.description = plain.description));
            }
            if plain.age != 0 {
                setters.push(Box::new(move |p: &mut Person| p.age = plain.age));
            }
        }
        Strategy::Map => {
            let map: Map<String, Value> = decode(strategy, body)?;
            if let Some(value) = map.get("Name") {
                let name = map_str(value, "Name")?;
                setters.push(Box::new(move |p: &mut Person| p.name = name));
            }
            if let Some(value) = map.get("Description") {
                let description = map_str(value, "Description")?;
                setters.push(Box::new(move |p: &mut Person| p.description = description));
            }
            if let Some(value) = map.get("Age") {
                let age = value.as_i64().ok_or_else(|| field_type_error("Age"))?;
                setters.push(Box::new(move |p: &mut Person| p.age = age));
            }
        }
        Strategy::Optional => {
            let optional: OptionalPerson = decode(strategy, body)?;
            if optional.name.is_present() {
                let name = optional.name.unwrap();
                setters.push(Box::new(move |p: &mut Person| p.name = name));
            }
            if optional.description.is_present() {
                let description = optional.description.unwrap();
                setters.push(Box::new(move |p: &mut Person| p.description = description));
            }
            if optional.age.is_present() {
                let age = optional.age.unwrap();
                setters.push(Box::new(move |p: &mut Person| p.age = age));
            }
        }
        Strategy::Option => {
            let option: OptionPerson = decode(strategy, body)?;
            if let Some(name) = option.name {
                setters.push(Box::new(move |p: &mut Person| p.name = name));
            }
            if let Some(description) = option.description {
                setters.push(Box::new(move |p: &mut Person| p.description = description));
            }
            if let Some(age) = option.age {
                setters.push(Box::new(move |p: &mut Person| p.age = age));
            }
        }
    }
    Ok(apply_setters(setters))
}

fn decode<T: serde::de::DeserializeOwned>(strategy: Strategy, body: &str) -> Result<T, Error> {
    json::from_str(body).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("invalid bench body")
            .with_hint(json::hint_for_error(&err, &format!("bench.{strategy}")))
            .with_source(err)
    })
}

fn map_str(value: &Value, field: &str) -> Result<String, Error> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| field_type_error(field))
}

fn field_type_error(field: &str) -> Error {
    Error::new(ErrorKind::Parse).with_message(format!("field {field} has unexpected type"))
}

pub fn run_strategy(strategy: Strategy, args: &BenchArgs) -> Result<Value, Error> {
    debug!(strategy = %strategy, iterations = args.iterations, "running strategy");
    // One untimed pass so a bad body fails before the loop.
    decode_person(strategy, &args.body)?;

    let start = Instant::now();
    for _ in 0..args.iterations {
        black_box(decode_person(strategy, black_box(&args.body))?);
    }
    let dur = start.elapsed();

    let entry = result_entry(strategy.label(), args.iterations, dur);
    info!(
        strategy = %strategy,
        ns_per_op = entry.get("ns_per_op").and_then(|v| v.as_f64()).unwrap_or(0.0),
        "strategy finished"
    );
    Ok(entry)
}

pub fn run_bench(args: BenchArgs, program_version: &str) -> Result<(), Error> {
    if args.iterations == 0 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("iterations must be positive")
            .with_hint("Pass --iterations 1 or more."));
    }

    let started = OffsetDateTime::now_utc();
    let mut results = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        results.push(run_strategy(strategy, &args)?);
    }

    let output = json!({
        "name": "optional-types",
        "version": program_version,
        "ts": timestamp(started)?,
        "system": Host::current(),
        "params": {
            "iterations": args.iterations,
            "body": args.body,
            "debug_build": cfg!(debug_assertions),
        },
        "results": results,
    });

    emit_bench_output(output, args.format)
}

fn emit_bench_output(value: Value, format: BenchFormat) -> Result<(), Error> {
    if matches!(format, BenchFormat::Json | BenchFormat::Both) {
        println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        );
    }
    if matches!(format, BenchFormat::Table | BenchFormat::Both) {
        emit_table(&value)?;
    }
    Ok(())
}

fn emit_table(value: &Value) -> Result<(), Error> {
    let mut stderr = io::stderr().lock();
    write_table(&mut stderr, value)
}

fn write_table(out: &mut impl Write, value: &Value) -> Result<(), Error> {
    let results = value
        .get("results")
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::new(ErrorKind::Internal).with_message("bench results missing"))?;

    writeln!(out, "optional-types bench (table)").map_err(table_io_error)?;
    writeln!(
        out,
        "{:>10}  {:>12}  {:>12}  {:>14}",
        "bench", "iterations", "ns/op", "ops/sec"
    )
    .map_err(table_io_error)?;

    for item in results {
        let bench = item.get("bench").and_then(|v| v.as_str()).unwrap_or("?");
        let iterations = item.get("iterations").and_then(|v| v.as_u64()).unwrap_or(0);
        let ns_per_op = item
            .get("ns_per_op")
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN);
        let ops_per_sec = item
            .get("ops_per_sec")
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN);
        writeln!(
            out,
            "{:>10}  {:>12}  {:>12.1}  {:>14.0}",
            bench, iterations, ns_per_op, ops_per_sec
        )
        .map_err(table_io_error)?;
    }
    Ok(())
}

fn table_io_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write bench table")
        .with_source(err)
}

fn result_entry(bench: &str, iterations: u64, duration: Duration) -> Value {
    let ops = iterations.max(1) as f64;
    let secs = duration.as_secs_f64().max(1e-9);
    json!({
        "bench": bench,
        "iterations": iterations,
        "duration_ms": duration.as_secs_f64() * 1000.0,
        "ns_per_op": duration.as_nanos() as f64 / ops,
        "ops_per_sec": iterations as f64 / secs,
    })
}

/// Machine the numbers were taken on.
#[derive(Debug, Serialize)]
struct Host {
    os: &'static str,
    arch: &'static str,
    cpus: usize,
}

impl Host {
    fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            cpus: std::thread::available_parallelism().map_or(1, usize::from),
        }
    }
}

fn timestamp(at: OffsetDateTime) -> Result<String, Error> {
    at.format(&Rfc3339).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to format bench timestamp")
            .with_source(err)
    })
}
