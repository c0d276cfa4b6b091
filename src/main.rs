use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use serde_json::json;
use std::process::ExitCode;
use student_roster::config::Config;
use student_roster::db::{StudentId, connect_store};
use student_roster::service::controller::Outcome;
use student_roster::service::{Command, RecordController, roster_actor};
use student_roster::view::{ABOUT_TEXT, COLUMNS, NoticeLevel, TableSnapshot, TableView};
use student_roster::{Course, RosterError, StudentFields};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Manage the student roster")]
struct Cli {
    /// Print the table and outcome as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every student
    List,
    /// Add a student
    Add(FormArgs),
    /// Overwrite name, course and mobile of a student
    Edit {
        id: StudentId,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a student after confirmation
    Delete {
        id: StudentId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Highlight students by exact (title-cased) name
    Search { name: String },
    /// List the courses students can enroll in
    Courses,
    /// About this application
    About,
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long)]
    name: String,
    /// One of: Astronomy, Biology, Math, Physics, Software Engineering
    #[arg(long)]
    course: String,
    #[arg(long)]
    mobile: String,
}

impl From<FormArgs> for StudentFields {
    fn from(f: FormArgs) -> Self {
        StudentFields::new(f.name, f.course, f.mobile)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    match run(cli, &cfg).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, cfg: &Config) -> Result<ExitCode, RosterError> {
    let view = match &cli.command {
        Commands::Delete { yes: false, .. } => TableView::new(confirm_on_terminal),
        _ => TableView::answering(true),
    };
    let mut select = None;
    let command = match cli.command {
        Commands::Courses => {
            for course in Course::ALL {
                println!("{course}");
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::About => {
            println!("{ABOUT_TEXT}");
            return Ok(ExitCode::SUCCESS);
        }
        Commands::List => None,
        Commands::Add(form) => Some(Command::Add(form.into())),
        Commands::Edit { id, form } => Some(Command::Edit {
            id,
            fields: form.into(),
        }),
        Commands::Delete { id, .. } => {
            // Delete through the table so only a displayed row is ever offered.
            select = Some(id);
            Some(Command::DeleteSelected)
        }
        Commands::Search { name } => Some(Command::Search(name)),
    };

    let store = connect_store(&cfg.database).await?;
    let handle = roster_actor::spawn(RecordController::new(store), view).await?;

    let mut result = handle.dispatch(Command::Reload).await;
    if let Some(id) = select
        && result.is_ok()
        && !handle.click(id).await?
    {
        warn!(id, "no displayed student has this id");
    }
    if let Some(command) = command
        && result.is_ok()
    {
        result = handle.dispatch(command).await;
    }
    let snapshot = handle.snapshot().await?;
    handle.stop();

    let outcome = result.as_ref().ok();
    if cli.json {
        let body = json!({
            "outcome": outcome,
            "error": result.as_ref().err().map(|e| json!({ "kind": e.kind(), "message": e.to_string() })),
            "table": &snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        render(&snapshot, outcome);
    }

    match result {
        Ok(outcome) => {
            info!(?outcome, "done");
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Ask on the terminal. Called from the actor while a delete waits on it.
fn confirm_on_terminal(prompt: &str) -> bool {
    let answer = tokio::task::block_in_place(|| {
        inquire::Confirm::new(prompt).with_default(false).prompt()
    });
    answer.unwrap_or_else(|e| {
        warn!(error = %e, "confirmation prompt unavailable; not deleting");
        false
    })
}

fn render(snapshot: &TableSnapshot, outcome: Option<&Outcome>) {
    let cells: Vec<[String; 4]> = snapshot
        .rows
        .iter()
        .map(|s| [s.id.to_string(), s.name.clone(), s.course.clone(), s.mobile.clone()])
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |marker: char, row: [&str; 4]| {
        let padded: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        println!("{marker} {}", padded.join("  ").trim_end());
    };

    line(' ', COLUMNS);
    for (i, row) in cells.iter().enumerate() {
        let marker = if snapshot.is_selected(i) { '*' } else { ' ' };
        line(
            marker,
            [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()],
        );
    }

    match outcome {
        Some(Outcome::Searched(search)) => println!(
            "\nSearch {:?}: {} stored match(es), {} highlighted",
            search.query,
            search.matches.len(),
            search.highlighted.len()
        ),
        Some(Outcome::Cancelled) => println!("\nDelete cancelled."),
        _ => {}
    }

    for notice in &snapshot.notices {
        match notice.level {
            NoticeLevel::Success => println!("\n[{}] {}", notice.title, notice.message),
            NoticeLevel::Error => eprintln!("\n[{}] {}", notice.title, notice.message),
        }
    }
}
