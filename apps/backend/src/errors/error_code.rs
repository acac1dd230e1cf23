//! Error codes for the classroom backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,
    Forbidden,
    ForbiddenUserNotFound,
    /// Actor is not on either team of the matchup
    NotAMember,
    /// Actor's role does not allow the operation
    InsufficientRole,

    // Request Validation
    InvalidMatchupId,
    InvalidGameId,
    InvalidTeamId,
    InvalidUserId,
    InvalidInstructionId,
    InvalidStepNumber,
    InvalidStatus,
    InvalidTeamForMatchup,
    ValidationNotRequired,
    StepLocked,
    SameTeamMatchup,
    CrossSchoolMatchup,
    GameInactive,
    CrossSchoolMember,
    InvalidInstructionLink,
    ValidationError,
    BadRequest,

    // Resource Not Found
    MatchupNotFound,
    StepNotFound,
    GameNotFound,
    TeamNotFound,
    UserNotFound,
    TeamValidationNotFound,
    InstructionNotFound,
    MembershipNotFound,
    SchoolNotFound,
    NotFound,

    // Conflicts
    UniqueViolation,
    Conflict,

    // Infrastructure
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Every code, for exhaustive checks in tests.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::Forbidden,
        Self::ForbiddenUserNotFound,
        Self::NotAMember,
        Self::InsufficientRole,
        Self::InvalidMatchupId,
        Self::InvalidGameId,
        Self::InvalidTeamId,
        Self::InvalidUserId,
        Self::InvalidInstructionId,
        Self::InvalidStepNumber,
        Self::InvalidStatus,
        Self::InvalidTeamForMatchup,
        Self::ValidationNotRequired,
        Self::StepLocked,
        Self::SameTeamMatchup,
        Self::CrossSchoolMatchup,
        Self::GameInactive,
        Self::CrossSchoolMember,
        Self::InvalidInstructionLink,
        Self::ValidationError,
        Self::BadRequest,
        Self::MatchupNotFound,
        Self::StepNotFound,
        Self::GameNotFound,
        Self::TeamNotFound,
        Self::UserNotFound,
        Self::TeamValidationNotFound,
        Self::InstructionNotFound,
        Self::MembershipNotFound,
        Self::SchoolNotFound,
        Self::NotFound,
        Self::UniqueViolation,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::Internal,
        Self::ConfigError,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            Self::InvalidMatchupId => "INVALID_MATCHUP_ID",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidTeamId => "INVALID_TEAM_ID",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidInstructionId => "INVALID_INSTRUCTION_ID",
            Self::InvalidStepNumber => "INVALID_STEP_NUMBER",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidTeamForMatchup => "INVALID_TEAM_FOR_MATCHUP",
            Self::ValidationNotRequired => "VALIDATION_NOT_REQUIRED",
            Self::StepLocked => "STEP_LOCKED",
            Self::SameTeamMatchup => "SAME_TEAM_MATCHUP",
            Self::CrossSchoolMatchup => "CROSS_SCHOOL_MATCHUP",
            Self::GameInactive => "GAME_INACTIVE",
            Self::CrossSchoolMember => "CROSS_SCHOOL_MEMBER",
            Self::InvalidInstructionLink => "INVALID_INSTRUCTION_LINK",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::MatchupNotFound => "MATCHUP_NOT_FOUND",
            Self::StepNotFound => "STEP_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TeamValidationNotFound => "TEAM_VALIDATION_NOT_FOUND",
            Self::InstructionNotFound => "INSTRUCTION_NOT_FOUND",
            Self::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            Self::SchoolNotFound => "SCHOOL_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
