//! Command-line client for the student records API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use student_records::client::{ClientError, DEFAULT_BASE_URL, RecordsClient, StudentPatch};
use tokio::runtime::Builder;

const BASE_URL_ENV: &str = "RECORDS_API_URL";

/// `records` command arguments.
#[derive(Debug, Parser)]
#[command(name = "records", about = "Manage students and their marks", version)]
struct CliArgs {
    /// API base URL. Falls back to `RECORDS_API_URL`, then the local default.
    #[arg(long = "base-url", value_name = "url", global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of students.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a student with their marks.
    Show { id: String },
    /// Create a student.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: i64,
    },
    /// Update some fields of a student.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<i64>,
    },
    /// Delete a student and their marks.
    Delete { id: String },
    /// Record marks for a subject.
    AddMark {
        student_id: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        marks: i64,
    },
    /// List a student's subject entries.
    Marks { student_id: String },
    /// Remove every entry for a subject.
    DeleteSubject {
        student_id: String,
        #[arg(long)]
        subject: String,
    },
}

fn resolve_base_url(flag: Option<String>) -> String {
    flag.or_else(|| env::var(BASE_URL_ENV).ok())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("create Tokio runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            if let Some(details) = error.api_error().and_then(|api| api.details()) {
                eprintln!("{details:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<(), ClientError> {
    let client = RecordsClient::new(&resolve_base_url(args.base_url))?;
    match args.command {
        Command::List { page, limit } => print(&client.list_students(page, limit).await?),
        Command::Show { id } => print(&client.get_student(&id).await?),
        Command::Create { name, email, age } => {
            print(&client.create_student(&name, &email, age).await?)
        }
        Command::Update {
            id,
            name,
            email,
            age,
        } => {
            let patch = StudentPatch { name, email, age };
            print(&client.update_student(&id, &patch).await?)
        }
        Command::Delete { id } => print(&client.delete_student(&id).await?),
        Command::AddMark {
            student_id,
            subject,
            marks,
        } => print(&client.add_mark(&student_id, &subject, marks).await?),
        Command::Marks { student_id } => print(&client.list_marks(&student_id).await?),
        Command::DeleteSubject {
            student_id,
            subject,
        } => print(&client.delete_subject(&student_id, &subject).await?),
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
