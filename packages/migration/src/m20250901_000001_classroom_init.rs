use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Schools {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    Email,
    Role,
    SchoolId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    SchoolId,
    Name,
    Description,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TeamMemberships {
    Table,
    Id,
    TeamId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(Iden)]
enum AiGames {
    Table,
    Id,
    Name,
    Description,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum GameSteps {
    Table,
    Id,
    GameId,
    StepNumber,
    Title,
    Description,
    UrlPattern,
    EstimatedDurationMinutes,
    RequiresValidation,
    IsActive,
}

#[derive(Iden)]
enum InstructionSteps {
    Table,
    Id,
    StepId,
    Role,
    Title,
    Content,
    IsActive,
    NextInstructionId,
}

#[derive(Iden)]
enum GameMatchups {
    Table,
    Id,
    GameId,
    Team1Id,
    Team2Id,
    SchoolId,
    CreatedBy,
    Status,
    ScheduledDate,
    StartedAt,
    CompletedAt,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MatchupStepProgress {
    Table,
    Id,
    MatchupId,
    StepId,
    IsCompleted,
    StartedAt,
    CompletedAt,
    CompletedBy,
    Notes,
}

#[derive(Iden)]
enum TeamStepValidations {
    Table,
    Id,
    MatchupId,
    TeamId,
    StepId,
    IsValidated,
    ValidatedBy,
    ValidatedAt,
    Notes,
    CreatedAt,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn created_at(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // schools
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(pk(Schools::Id))
                    .col(ColumnDef::new(Schools::Name).string().not_null())
                    .col(created_at(Schools::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(16)
                            .not_null()
                            .default("STUDENT"),
                    )
                    .col(ColumnDef::new(Users::SchoolId).big_integer().null())
                    .col(created_at(Users::CreatedAt))
                    .col(created_at(Users::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_school_id")
                            .from(Users::Table, Users::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(pk(Teams::Id))
                    .col(ColumnDef::new(Teams::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Teams::Description).text().null())
                    .col(
                        ColumnDef::new(Teams::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Teams::CreatedBy).big_integer().null())
                    .col(created_at(Teams::CreatedAt))
                    .col(created_at(Teams::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_school_id")
                            .from(Teams::Table, Teams::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_created_by")
                            .from(Teams::Table, Teams::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teams_school_name_unique")
                    .table(Teams::Table)
                    .col(Teams::SchoolId)
                    .col(Teams::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // team_memberships
        manager
            .create_table(
                Table::create()
                    .table(TeamMemberships::Table)
                    .if_not_exists()
                    .col(pk(TeamMemberships::Id))
                    .col(
                        ColumnDef::new(TeamMemberships::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMemberships::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMemberships::Role)
                            .string_len(16)
                            .not_null()
                            .default("MEMBER"),
                    )
                    .col(created_at(TeamMemberships::JoinedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_memberships_team_id")
                            .from(TeamMemberships::Table, TeamMemberships::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_memberships_user_id")
                            .from(TeamMemberships::Table, TeamMemberships::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_memberships_team_user_unique")
                    .table(TeamMemberships::Table)
                    .col(TeamMemberships::TeamId)
                    .col(TeamMemberships::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ai_games
        manager
            .create_table(
                Table::create()
                    .table(AiGames::Table)
                    .if_not_exists()
                    .col(pk(AiGames::Id))
                    .col(ColumnDef::new(AiGames::Name).string_len(200).not_null())
                    .col(ColumnDef::new(AiGames::Description).text().null())
                    .col(
                        ColumnDef::new(AiGames::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(AiGames::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // game_steps
        manager
            .create_table(
                Table::create()
                    .table(GameSteps::Table)
                    .if_not_exists()
                    .col(pk(GameSteps::Id))
                    .col(ColumnDef::new(GameSteps::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GameSteps::StepNumber).integer().not_null())
                    .col(ColumnDef::new(GameSteps::Title).string_len(200).not_null())
                    .col(ColumnDef::new(GameSteps::Description).text().null())
                    .col(ColumnDef::new(GameSteps::UrlPattern).string_len(200).null())
                    .col(
                        ColumnDef::new(GameSteps::EstimatedDurationMinutes)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(GameSteps::RequiresValidation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameSteps::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_steps_game_id")
                            .from(GameSteps::Table, GameSteps::GameId)
                            .to(AiGames::Table, AiGames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_steps_game_number_unique")
                    .table(GameSteps::Table)
                    .col(GameSteps::GameId)
                    .col(GameSteps::StepNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // instruction_steps
        manager
            .create_table(
                Table::create()
                    .table(InstructionSteps::Table)
                    .if_not_exists()
                    .col(pk(InstructionSteps::Id))
                    .col(
                        ColumnDef::new(InstructionSteps::StepId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructionSteps::Role)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructionSteps::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InstructionSteps::Content).text().not_null())
                    .col(
                        ColumnDef::new(InstructionSteps::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(InstructionSteps::NextInstructionId)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instruction_steps_step_id")
                            .from(InstructionSteps::Table, InstructionSteps::StepId)
                            .to(GameSteps::Table, GameSteps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instruction_steps_next")
                            .from(InstructionSteps::Table, InstructionSteps::NextInstructionId)
                            .to(InstructionSteps::Table, InstructionSteps::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_instruction_steps_step_role")
                    .table(InstructionSteps::Table)
                    .col(InstructionSteps::StepId)
                    .col(InstructionSteps::Role)
                    .to_owned(),
            )
            .await?;

        // game_matchups
        manager
            .create_table(
                Table::create()
                    .table(GameMatchups::Table)
                    .if_not_exists()
                    .col(pk(GameMatchups::Id))
                    .col(ColumnDef::new(GameMatchups::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameMatchups::Team1Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameMatchups::Team2Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameMatchups::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameMatchups::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(GameMatchups::Status)
                            .string_len(16)
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(
                        ColumnDef::new(GameMatchups::ScheduledDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GameMatchups::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GameMatchups::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(GameMatchups::Notes).text().null())
                    .col(created_at(GameMatchups::CreatedAt))
                    .col(created_at(GameMatchups::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_matchups_game_id")
                            .from(GameMatchups::Table, GameMatchups::GameId)
                            .to(AiGames::Table, AiGames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_matchups_team1_id")
                            .from(GameMatchups::Table, GameMatchups::Team1Id)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_matchups_team2_id")
                            .from(GameMatchups::Table, GameMatchups::Team2Id)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_matchups_school_id")
                            .from(GameMatchups::Table, GameMatchups::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_matchups_created_by")
                            .from(GameMatchups::Table, GameMatchups::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_matchups_school_status")
                    .table(GameMatchups::Table)
                    .col(GameMatchups::SchoolId)
                    .col(GameMatchups::Status)
                    .to_owned(),
            )
            .await?;

        // matchup_step_progress
        manager
            .create_table(
                Table::create()
                    .table(MatchupStepProgress::Table)
                    .if_not_exists()
                    .col(pk(MatchupStepProgress::Id))
                    .col(
                        ColumnDef::new(MatchupStepProgress::MatchupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchupStepProgress::StepId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchupStepProgress::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MatchupStepProgress::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchupStepProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchupStepProgress::CompletedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(MatchupStepProgress::Notes).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matchup_step_progress_matchup_id")
                            .from(MatchupStepProgress::Table, MatchupStepProgress::MatchupId)
                            .to(GameMatchups::Table, GameMatchups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matchup_step_progress_step_id")
                            .from(MatchupStepProgress::Table, MatchupStepProgress::StepId)
                            .to(GameSteps::Table, GameSteps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matchup_step_progress_completed_by")
                            .from(MatchupStepProgress::Table, MatchupStepProgress::CompletedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matchup_step_progress_unique")
                    .table(MatchupStepProgress::Table)
                    .col(MatchupStepProgress::MatchupId)
                    .col(MatchupStepProgress::StepId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // team_step_validations
        manager
            .create_table(
                Table::create()
                    .table(TeamStepValidations::Table)
                    .if_not_exists()
                    .col(pk(TeamStepValidations::Id))
                    .col(
                        ColumnDef::new(TeamStepValidations::MatchupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamStepValidations::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamStepValidations::StepId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamStepValidations::IsValidated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TeamStepValidations::ValidatedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TeamStepValidations::ValidatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(TeamStepValidations::Notes).text().null())
                    .col(created_at(TeamStepValidations::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_step_validations_matchup_id")
                            .from(TeamStepValidations::Table, TeamStepValidations::MatchupId)
                            .to(GameMatchups::Table, GameMatchups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_step_validations_team_id")
                            .from(TeamStepValidations::Table, TeamStepValidations::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_step_validations_step_id")
                            .from(TeamStepValidations::Table, TeamStepValidations::StepId)
                            .to(GameSteps::Table, GameSteps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_step_validations_validated_by")
                            .from(TeamStepValidations::Table, TeamStepValidations::ValidatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_step_validations_unique")
                    .table(TeamStepValidations::Table)
                    .col(TeamStepValidations::MatchupId)
                    .col(TeamStepValidations::TeamId)
                    .col(TeamStepValidations::StepId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(
                Table::drop()
                    .table(TeamStepValidations::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MatchupStepProgress::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GameMatchups::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(InstructionSteps::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GameSteps::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AiGames::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(TeamMemberships::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
