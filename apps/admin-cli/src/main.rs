//! Operator tool: schema migrations, provisioning of schools, users and
//! the game catalog, and the progression repair commands.

use clap::{Parser, Subcommand, ValueEnum};
use migration::{migrate, MigrationCommand};
use sea_orm::TransactionTrait;
use tracing::{error, info};

use backend::adapters::catalog_sea::{GameCreate, StepCreate};
use backend::adapters::users_sea::UserCreate;
use backend::config::db::{DbKind, DbOwner, RuntimeEnv};
use backend::config::server::current_step_policy_from_env;
use backend::entities::users::UserRole;
use backend::errors::domain::{DomainError, ValidationKind};
use backend::infra::db::{bootstrap_db, connect_db};
use backend::repos::{catalog, matchups, schools, users};
use backend::services::progression::ProgressionService;
use backend::AppError;

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for RuntimeEnv {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

/// In-memory databases vanish with the process, so only persistent
/// engines are offered.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MigrateAction {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<MigrateAction> for MigrationCommand {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => MigrationCommand::Up,
            MigrateAction::Down => MigrationCommand::Down,
            MigrateAction::Fresh => MigrationCommand::Fresh,
            MigrateAction::Reset => MigrationCommand::Reset,
            MigrateAction::Refresh => MigrationCommand::Refresh,
            MigrateAction::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Student,
    Teacher,
    Admin,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => UserRole::Student,
            Role::Teacher => UserRole::Teacher,
            Role::Admin => UserRole::Admin,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run a schema migration command
    Migrate {
        #[arg(value_enum)]
        action: MigrateAction,
    },
    /// Create a school
    CreateSchool {
        #[arg(long)]
        name: String,
    },
    /// Create a user, or report the existing one with the same subject
    CreateUser {
        #[arg(long)]
        sub: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_enum, default_value = "student")]
        role: Role,
        #[arg(long)]
        school: Option<i64>,
    },
    /// Create a game
    CreateGame {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Append a step definition to a game
    AddStep {
        #[arg(long)]
        game: i64,
        #[arg(long)]
        number: i32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        url_pattern: Option<String>,
        #[arg(long, default_value_t = 1)]
        duration: i32,
        #[arg(long)]
        requires_validation: bool,
    },
    /// Turn the two-team validation gate of a step on or off
    SetStepValidation {
        #[arg(long)]
        game: i64,
        #[arg(long)]
        step: i32,
        #[arg(long, action = clap::ArgAction::Set)]
        required: bool,
    },
    /// Mark a step of a matchup as not completed
    MarkStepIncomplete {
        #[arg(long)]
        matchup: i64,
        #[arg(long)]
        step: i32,
    },
    /// Clear team validations for a step (both teams unless --team is given)
    ResetTeamValidation {
        #[arg(long)]
        matchup: i64,
        #[arg(long)]
        step: i32,
        #[arg(long)]
        team: Option<i64>,
    },
    /// Complete validation steps whose two teams are already validated
    ReconcileValidations {
        #[arg(long)]
        matchup: i64,
    },
}

#[derive(Parser)]
#[command(name = "classroom-admin")]
#[command(about = "Classroom backend operator tool")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test", global = true)]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres", global = true)]
    db: Db,
}

async fn run_migration(env: RuntimeEnv, kind: DbKind, action: MigrateAction) -> Result<(), AppError> {
    let owner = if kind == DbKind::Postgres {
        DbOwner::Owner
    } else {
        DbOwner::App
    };
    let conn = connect_db(env, kind, owner).await?;
    migrate(&conn, action.into()).await?;
    conn.close().await?;
    Ok(())
}

impl Command {
    fn is_provisioning(&self) -> bool {
        matches!(
            self,
            Command::CreateSchool { .. }
                | Command::CreateUser { .. }
                | Command::CreateGame { .. }
                | Command::AddStep { .. }
                | Command::SetStepValidation { .. }
        )
    }
}

async fn run_provision(env: RuntimeEnv, kind: DbKind, command: Command) -> Result<(), AppError> {
    let conn = bootstrap_db(env, kind).await?;
    let txn = conn.begin().await?;

    match command {
        Command::CreateSchool { name } => {
            let school = schools::create_school(&txn, name.trim()).await?;
            info!(school_id = school.id, name = %school.name, "school created");
        }
        Command::CreateUser {
            sub,
            username,
            email,
            role,
            school,
        } => {
            let mut dto = UserCreate::new(sub, username, role.into());
            if let Some(email) = email {
                dto = dto.with_email(email);
            }
            if let Some(school_id) = school {
                schools::require_school(&txn, school_id).await?;
                dto = dto.with_school(school_id);
            }
            let (user, inserted) = users::ensure_user_by_sub(&txn, dto).await?;
            if inserted {
                info!(user_id = user.id, sub = %user.sub, role = %user.role, "user created");
            } else {
                info!(
                    user_id = user.id,
                    sub = %user.sub,
                    "user already exists; left unchanged"
                );
            }
        }
        Command::CreateGame { name, description } => {
            let mut dto = GameCreate::new(name);
            if let Some(description) = description {
                dto = dto.with_description(description);
            }
            let game = catalog::create_game(&txn, dto).await?;
            info!(game_id = game.id, name = %game.name, "game created");
        }
        Command::AddStep {
            game,
            number,
            title,
            description,
            url_pattern,
            duration,
            requires_validation,
        } => {
            if number < 1 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidStepNumber,
                    format!("Step numbers start at 1, got {number}"),
                )
                .into());
            }
            let game = catalog::require_game(&txn, game).await?;
            let mut dto = StepCreate::new(game.id, number, title).with_duration(duration);
            if let Some(description) = description {
                dto = dto.with_description(description);
            }
            if let Some(url_pattern) = url_pattern {
                dto = dto.with_url_pattern(url_pattern);
            }
            if requires_validation {
                dto = dto.requiring_validation();
            }
            let step = catalog::create_step(&txn, dto).await?;
            info!(
                game_id = game.id,
                step_id = step.id,
                step_number = step.step_number,
                "step added"
            );
        }
        Command::SetStepValidation {
            game,
            step,
            required,
        } => {
            let step = catalog::require_step(&txn, game, step).await?;
            catalog::set_requires_validation(&txn, step.id, required).await?;
            info!(
                game_id = game,
                step_number = step.step_number,
                requires_validation = required,
                "step validation flag set"
            );
        }
        _ => return Err(AppError::internal("not a provisioning command")),
    }

    txn.commit().await?;
    Ok(())
}

async fn run_repair(env: RuntimeEnv, kind: DbKind, command: Command) -> Result<(), AppError> {
    let conn = bootstrap_db(env, kind).await?;
    let service = ProgressionService::new(current_step_policy_from_env()?);
    let txn = conn.begin().await?;

    match command {
        Command::MarkStepIncomplete { matchup, step } => {
            let matchup = matchups::require_matchup(&txn, matchup).await?;
            let existed = service.reset_step_progress(&txn, &matchup, step).await?;
            if existed {
                info!(matchup_id = matchup.id, step, "step marked incomplete");
            } else {
                info!(matchup_id = matchup.id, step, "step had no progress row; nothing to do");
            }
        }
        Command::ResetTeamValidation {
            matchup,
            step,
            team,
        } => {
            let matchup = matchups::require_matchup(&txn, matchup).await?;
            let count = service
                .reset_team_validations(&txn, &matchup, step, team)
                .await?;
            info!(matchup_id = matchup.id, step, team = ?team, count, "team validations reset");
        }
        Command::ReconcileValidations { matchup } => {
            let matchup = matchups::require_matchup(&txn, matchup).await?;
            let steps = service.reconcile_validation_steps(&txn, &matchup).await?;
            info!(matchup_id = matchup.id, steps = ?steps, "reconcile finished");
        }
        _ => return Err(AppError::internal("not a repair command")),
    }

    txn.commit().await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("info,sqlx=warn,sea_orm=warn")
        .init();

    let args = Args::parse();
    let env = RuntimeEnv::from(args.env);
    let kind = DbKind::from(args.db);

    let result = match args.command {
        Command::Migrate { action } => run_migration(env, kind, action).await,
        command if command.is_provisioning() => run_provision(env, kind, command).await,
        command => run_repair(env, kind, command).await,
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}
