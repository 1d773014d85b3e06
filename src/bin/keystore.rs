use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use structopt::*;

use keystore::{is_key_not_found, Dialect, Factory, Repository, SqliteConnection, TableConfig, Value};

#[derive(Debug, StructOpt)]
#[structopt(name = "keystore", version = env ! ("CARGO_PKG_VERSION"))]
struct Opt {
    #[structopt(short = "d", long = "database", default_value = "keystore.db", parse(from_os_str))]
    database: PathBuf,
    #[structopt(flatten)]
    table: TableConfig,
    #[structopt(short = "v", long = "verbose", help = "Log the SQL sent to the database.")]
    verbose: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
#[allow(non_camel_case_types)]
enum Command {
    #[structopt(about = "Insert or replace a key-value pair.")]
    set {
        #[structopt(help = "The key to store.")]
        key: String,
        #[structopt(help = "The value to store.")]
        value: String,
    },
    #[structopt(about = "Get the value stored for a key.")]
    get {
        #[structopt(help = "The key to look up.")]
        key: String,
        #[structopt(long = "json", help = "Print the value as JSON.")]
        json: bool,
    },
    #[structopt(about = "Remove an existing record by key.")]
    rm {
        #[structopt(help = "The key to remove.")]
        key: String,
    },
}

fn run(opt: Opt) -> Result<()> {
    let connection = SqliteConnection::open(&opt.database)?;
    connection.create_table(&opt.table)?;
    let adaptor = Factory::with_dialect(Dialect::Sqlite).create_from_config(connection, &opt.table)?;
    match opt.command {
        Command::set { key, value } => adaptor.set(&key, Value::from(value)),
        Command::get { key, json } => {
            match adaptor.get(&key) {
                Ok(value) if json => println!("{}", serde_json::to_string(&value)?),
                Ok(value) => println!("{}", value),
                Err(e) if is_key_not_found(&e) => println!("{}", e),
                Err(e) => return Err(e),
            }
            Ok(())
        }
        Command::rm { key } => adaptor.delete(&key),
    }
}

fn main() {
    let opt = Opt::from_args();
    if opt.verbose {
        if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Trace).init() {
            eprintln!("{}", e);
        }
    }
    if let Err(e) = run(opt) {
        eprintln!("{}", e);
        exit(-1)
    }
}
