//! Command-line shell over `contacts_core`.
//!
//! # Responsibility
//! - Parse arguments and environment into core service calls.
//! - Print records with their standard rendering.
//!
//! # Invariants
//! - No contact rules live here; validation errors come from core.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use contacts_core::{AddressBook, ContactService, JsonFileStore, NewContact, Record};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "Personal contacts book")]
struct Cli {
    /// Address book file.
    #[arg(long, env = "CONTACTS_BOOK", default_value = "address_book.json", global = true)]
    book: PathBuf,

    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct LoggingArgs {
    /// Absolute directory for log files. Logging is off when unset.
    #[arg(long, env = "CONTACTS_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CONTACTS_LOG_LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a contact, replacing one with the same name.
    Add {
        name: String,
        #[arg(long)]
        birthday: Option<String>,
        #[arg(long = "phone")]
        phones: Vec<String>,
    },
    /// Show one contact.
    Show { name: String },
    /// List all contacts.
    List,
    /// Search names and phone numbers.
    Search { query: String },
    /// Delete a contact.
    Delete { name: String },
    /// Manage phone numbers of a contact.
    #[command(subcommand)]
    Phone(PhoneCommand),
    /// Manage the birthday of a contact.
    #[command(subcommand)]
    Birthday(BirthdayCommand),
    /// List birthdays coming up within the given number of days.
    Birthdays {
        #[arg(long, default_value_t = 7)]
        within: i64,
    },
    /// Print the core library version.
    Version,
}

#[derive(Debug, Subcommand)]
enum PhoneCommand {
    Add { name: String, phone: String },
    Edit { name: String, old: String, new: String },
    Remove { name: String, phone: String },
}

#[derive(Debug, Subcommand)]
enum BirthdayCommand {
    Set { name: String, date: String },
    Clear { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.logging)?;

    if let Command::Version = cli.command {
        print_version();
        return Ok(());
    }

    let book = AddressBook::open(&cli.book)
        .with_context(|| format!("failed to open address book `{}`", cli.book.display()))?;
    run(ContactService::new(book), cli.command)
}

fn init_logging(args: &LoggingArgs) -> Result<()> {
    let Some(dir) = &args.log_dir else {
        return Ok(());
    };
    let level = args
        .log_level
        .as_deref()
        .unwrap_or_else(|| contacts_core::default_log_level());
    if let Err(message) = contacts_core::init_logging(level, dir) {
        bail!("failed to initialize logging: {message}");
    }
    Ok(())
}

fn run(mut service: ContactService<JsonFileStore>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            birthday,
            phones,
        } => {
            let contact = NewContact {
                name: name.clone(),
                birthday,
                phones,
            };
            let replaced = service.add_contact(contact)?;
            if replaced.is_some() {
                println!("Replaced existing contact.");
            }
            print_contact(service.get_contact(&name));
        }
        Command::Show { name } => match service.get_contact(&name) {
            Some(record) => print_record(record),
            None => bail!("contact not found: {name}"),
        },
        Command::List => {
            let records = service.list_contacts();
            if records.is_empty() {
                println!("Address book is empty.");
            }
            records.into_iter().for_each(print_record);
        }
        Command::Search { query } => {
            let found = service.search(&query);
            if found.is_empty() {
                println!("No matches.");
            }
            found.into_iter().for_each(print_record);
        }
        Command::Delete { name } => {
            service.delete_contact(&name)?;
            println!("Deleted {name}.");
        }
        Command::Phone(PhoneCommand::Add { name, phone }) => {
            print_record(service.add_phone(&name, &phone)?);
        }
        Command::Phone(PhoneCommand::Edit { name, old, new }) => {
            print_record(service.edit_phone(&name, &old, &new)?);
        }
        Command::Phone(PhoneCommand::Remove { name, phone }) => {
            print_record(service.remove_phone(&name, &phone)?);
        }
        Command::Birthday(BirthdayCommand::Set { name, date }) => {
            print_record(service.set_birthday(&name, &date)?);
        }
        Command::Birthday(BirthdayCommand::Clear { name }) => {
            print_record(service.clear_birthday(&name)?);
        }
        Command::Birthdays { within } => {
            let today = Local::now().date_naive();
            for entry in service.upcoming_birthdays(today, within) {
                println!("in {} day(s): {}", entry.days, entry.record);
            }
        }
        Command::Version => print_version(),
    }
    Ok(())
}

fn print_version() {
    println!("contacts_core {}", contacts_core::core_version());
}

fn print_contact(record: Option<&Record>) {
    if let Some(record) = record {
        print_record(record);
    }
}

fn print_record(record: &Record) {
    println!("{record}");
}
