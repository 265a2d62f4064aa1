//! students - manage student records from the command line

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use student_records::logging::{self, Profile};
use student_records::{
    ConnectionMode, EditForm, Notice, Registry, Settings, StorageManager, Student, StudentForm,
};

#[derive(Debug, Parser)]
#[command(name = "students")]
#[command(about = "Manage student records", long_about = None)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(long, global = true, env = "STUDENT_CONFIG")]
    config: Option<PathBuf>,

    /// Database file (overrides settings)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Use a connection pool of this size instead of one connection per operation
    #[arg(long, global = true, value_name = "N")]
    pooled: Option<u32>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database tables if missing
    Init,
    /// List every student
    List,
    /// Look up one student by roll number
    Show { roll_number: String },
    /// Add a new student
    Add(AddArgs),
    /// Change name, course or GPA of a student
    ///
    /// Omitted fields keep their stored values. The GPA is always checked
    /// against 0-4.0, so a stored out-of-range GPA must be corrected with
    /// --gpa before any other field can be changed.
    Edit(EditArgs),
    /// Delete a student
    Delete { roll_number: String },
}

#[derive(Debug, Args)]
struct AddArgs {
    roll_number: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    course: String,
    #[arg(long)]
    gpa: String,
}

#[derive(Debug, Args)]
struct EditArgs {
    roll_number: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    course: Option<String>,
    #[arg(long)]
    gpa: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn",
        1 => "warn,student_records=info",
        _ => "info,student_records=debug",
    };
    let profile = if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    };
    logging::init_with_filter(profile, filter);
}

fn run(cli: &Cli) -> Result<bool> {
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(db) = &cli.db {
        settings.storage.db_path = db.clone();
    }
    if let Some(max_size) = cli.pooled {
        settings.storage.connection_mode = ConnectionMode::Pooled { max_size };
    }

    let storage = StorageManager::open(settings.storage).context("opening student store")?;
    let schema_ready = storage.ensure_schema();
    let registry = Registry::new(&storage);

    let ok = match &cli.command {
        Commands::Init => {
            if schema_ready {
                println!("Database ready at {}", storage.path().display());
            }
            schema_ready
        }
        Commands::List => {
            print_students(&registry.list(), cli.json)?;
            true
        }
        Commands::Show { roll_number } => match registry.search(roll_number) {
            Ok(student) => {
                print_students(std::slice::from_ref(&student), cli.json)?;
                true
            }
            Err(notice) => report(&notice),
        },
        Commands::Add(args) => report(&registry.add(StudentForm {
            roll_number: args.roll_number.clone(),
            name: args.name.clone(),
            course: args.course.clone(),
            gpa: args.gpa.clone(),
        })),
        Commands::Edit(args) => {
            // Unset flags keep the stored value, like a pre-filled form.
            let current = match registry.search(&args.roll_number) {
                Ok(student) => student,
                Err(_) => return Ok(report(&Notice::danger("Student not found"))),
            };
            let form = EditForm {
                name: args.name.clone().unwrap_or(current.name),
                course: args.course.clone().unwrap_or(current.course),
                gpa: args.gpa.clone().unwrap_or_else(|| current.gpa.to_string()),
            };
            report(&registry.edit(&args.roll_number, form))
        }
        Commands::Delete { roll_number } => report(&registry.delete(roll_number)),
    };

    Ok(ok)
}

fn report(notice: &Notice) -> bool {
    if notice.is_success() {
        println!("{notice}");
    } else {
        eprintln!("{notice}");
    }
    notice.is_success()
}

fn print_students(students: &[Student], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(students)?);
        return Ok(());
    }

    if students.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    println!("{:<12} {:<24} {:<16} {:>5}", "ROLL", "NAME", "COURSE", "GPA");
    for s in students {
        println!(
            "{:<12} {:<24} {:<16} {:>5.2}",
            s.roll_number, s.name, s.course, s.gpa
        );
    }
    Ok(())
}
