pub mod ai_games;
pub mod game_matchups;
pub mod game_steps;
pub mod instruction_feedback;
pub mod instruction_steps;
pub mod matchup_step_progress;
pub mod schools;
pub mod team_memberships;
pub mod team_step_validations;
pub mod teams;
pub mod users;

pub use ai_games::Entity as AiGames;
pub use ai_games::Model as AiGame;
pub use game_matchups::Entity as GameMatchups;
pub use game_matchups::Model as GameMatchup;
pub use game_steps::Entity as GameSteps;
pub use game_steps::Model as GameStep;
pub use instruction_feedback::Entity as InstructionFeedback;
pub use instruction_feedback::Model as InstructionFeedbackEntry;
pub use instruction_steps::Entity as InstructionSteps;
pub use instruction_steps::Model as InstructionStep;
pub use matchup_step_progress::Entity as MatchupStepProgress;
pub use schools::Entity as Schools;
pub use schools::Model as School;
pub use team_memberships::Entity as TeamMemberships;
pub use team_memberships::Model as TeamMembership;
pub use team_step_validations::Entity as TeamStepValidations;
pub use team_step_validations::Model as TeamStepValidation;
pub use teams::Entity as Teams;
pub use teams::Model as Team;
pub use users::Entity as Users;
pub use users::Model as User;
