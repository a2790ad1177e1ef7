use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use registrar_cli::{admin, seeder};
use registrar_db::postgres::{PgStudentStore, PgUserStore};
use registrar_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for the Registrar API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake students
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "25")]
        students: usize,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = init_db_pool(&database_url, 5)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

fn prompt_or(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

async fn handle_create_admin(
    pool: PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = prompt_or(name, "Name")?;
    let email = prompt_or(email, "Email address")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let users = PgUserStore::new(pool);
    let user = admin::create_admin(&users, &name, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);

    Ok(())
}

async fn handle_seed(pool: PgPool, students: usize) -> anyhow::Result<()> {
    println!("🌱 Seeding {} students...", students);

    let store = PgStudentStore::new(pool);
    let report = seeder::seed_students(&store, students).await?;

    println!("✅ Created {} students", report.created);
    if report.skipped > 0 {
        println!("   Skipped {} duplicates", report.skipped);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = connect().await?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(pool, name, email, password).await,
        Commands::Seed { students } => handle_seed(pool, students).await,
    }
}
