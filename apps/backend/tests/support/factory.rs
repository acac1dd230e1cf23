//! Seed data for service and route tests.

use backend::adapters::catalog_sea::{GameCreate, StepCreate};
use backend::adapters::matchups_sea::MatchupCreate;
use backend::adapters::teams_sea::TeamCreate;
use backend::adapters::users_sea::UserCreate;
use backend::entities::team_memberships::MembershipRole;
use backend::entities::users::UserRole;
use backend::repos::catalog::{self, Game, GameStep};
use backend::repos::matchups::{self, Matchup};
use backend::repos::schools;
use backend::repos::teams::{self, Team};
use backend::repos::users::{self, User};
use backend::AppError;
use backend_test_support::unique_helpers::{unique_email, unique_str};
use sea_orm::ConnectionTrait;

/// One team per side, one student per team, a teacher, and a matchup
/// between the two teams on a freshly created game.
#[derive(Debug, Clone)]
pub struct Classroom {
    pub school_id: i64,
    pub teacher: User,
    pub student1: User,
    pub student2: User,
    pub team1: Team,
    pub team2: Team,
    pub game: Game,
    pub steps: Vec<GameStep>,
    pub matchup: Matchup,
}

impl Classroom {
    pub fn step(&self, step_number: i32) -> &GameStep {
        self.steps
            .iter()
            .find(|s| s.step_number == step_number)
            .expect("step should exist in fixture")
    }
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
    role: UserRole,
    school_id: Option<i64>,
) -> Result<User, AppError> {
    let mut dto = UserCreate::new(unique_str(prefix), unique_str(prefix), role)
        .with_email(unique_email(prefix));
    if let Some(school_id) = school_id {
        dto = dto.with_school(school_id);
    }
    Ok(users::create_user(conn, dto).await?)
}

pub async fn create_team_with_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
    member: &User,
) -> Result<Team, AppError> {
    let team = teams::create_team(conn, TeamCreate::new(school_id, unique_str("team"))).await?;
    teams::add_member(conn, team.id, member.id, MembershipRole::Member).await?;
    Ok(team)
}

/// A game whose steps are numbered 1.. in order; `true` marks a step that
/// needs teacher validation.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    validation_flags: &[bool],
) -> Result<(Game, Vec<GameStep>), AppError> {
    let game = catalog::create_game(conn, GameCreate::new(unique_str("game"))).await?;
    let mut steps = Vec::with_capacity(validation_flags.len());
    for (idx, requires_validation) in validation_flags.iter().enumerate() {
        let number = idx as i32 + 1;
        let mut dto = StepCreate::new(game.id, number, format!("Step {number}")).with_duration(10);
        if *requires_validation {
            dto = dto.requiring_validation();
        }
        steps.push(catalog::create_step(conn, dto).await?);
    }
    Ok((game, steps))
}

pub async fn seed_classroom<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    validation_flags: &[bool],
) -> Result<Classroom, AppError> {
    let school = schools::create_school(conn, &unique_str("school")).await?;
    let teacher = create_user(conn, "teacher", UserRole::Teacher, Some(school.id)).await?;
    let student1 = create_user(conn, "student", UserRole::Student, Some(school.id)).await?;
    let student2 = create_user(conn, "student", UserRole::Student, Some(school.id)).await?;
    let team1 = create_team_with_member(conn, school.id, &student1).await?;
    let team2 = create_team_with_member(conn, school.id, &student2).await?;
    let (game, steps) = create_game(conn, validation_flags).await?;

    let matchup = matchups::create_matchup(
        conn,
        MatchupCreate::new(game.id, team1.id, team2.id, school.id).with_created_by(teacher.id),
    )
    .await?;

    Ok(Classroom {
        school_id: school.id,
        teacher,
        student1,
        student2,
        team1,
        team2,
        game,
        steps,
        matchup,
    })
}

/// Steps 1 and 3 plain, step 2 validated by the teacher.
pub async fn seed_three_step_classroom<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Classroom, AppError> {
    seed_classroom(conn, &[false, true, false]).await
}
