// DomainError -> AppError mapping for the kinds not covered next to AppError.
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

fn mapped(err: DomainError) -> (ErrorCode, u16) {
    let app = AppError::from(err);
    (app.code(), app.status().as_u16())
}

#[test]
fn pairing_rules_are_bad_requests() {
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::SameTeamMatchup, "same")),
        (ErrorCode::SameTeamMatchup, 400)
    );
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::CrossSchoolMatchup, "cross")),
        (ErrorCode::CrossSchoolMatchup, 400)
    );
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::InvalidStepNumber, "0")),
        (ErrorCode::InvalidStepNumber, 400)
    );
}

#[test]
fn roster_and_authoring_rules_are_bad_requests() {
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::CrossSchoolMember, "other school")),
        (ErrorCode::CrossSchoolMember, 400)
    );
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::InvalidInstructionLink, "loop")),
        (ErrorCode::InvalidInstructionLink, 400)
    );
}

#[test]
fn inactive_game_is_unprocessable() {
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::GameInactive, "retired")),
        (ErrorCode::GameInactive, 422)
    );
}

#[test]
fn other_validation_falls_back_to_generic_code() {
    assert_eq!(
        mapped(DomainError::validation_other("Foreign key constraint violation")),
        (ErrorCode::ValidationError, 400)
    );
}

#[test]
fn unique_conflicts_share_one_code() {
    for kind in [
        ConflictKind::UniqueTeamName,
        ConflictKind::UniqueStepNumber,
        ConflictKind::UniqueUserSub,
        ConflictKind::UniqueMembership,
    ] {
        assert_eq!(
            mapped(DomainError::conflict(kind, "taken")),
            (ErrorCode::UniqueViolation, 409)
        );
    }
    assert_eq!(
        mapped(DomainError::conflict(ConflictKind::Other("x".into()), "x")),
        (ErrorCode::Conflict, 409)
    );
}

#[test]
fn not_found_kinds_keep_their_codes() {
    let cases = [
        (NotFoundKind::Game, ErrorCode::GameNotFound),
        (NotFoundKind::Team, ErrorCode::TeamNotFound),
        (NotFoundKind::User, ErrorCode::UserNotFound),
        (NotFoundKind::TeamValidation, ErrorCode::TeamValidationNotFound),
        (NotFoundKind::Instruction, ErrorCode::InstructionNotFound),
        (NotFoundKind::Membership, ErrorCode::MembershipNotFound),
        (NotFoundKind::School, ErrorCode::SchoolNotFound),
        (NotFoundKind::Other("Record".into()), ErrorCode::NotFound),
    ];
    for (kind, code) in cases {
        assert_eq!(mapped(DomainError::not_found(kind, "missing")), (code, 404));
    }
}

#[test]
fn infra_failures() {
    let timeout = AppError::from(DomainError::infra(InfraErrorKind::Timeout, "slow"));
    assert!(matches!(timeout, AppError::Timeout { .. }));
    assert_eq!(timeout.code(), ErrorCode::DbTimeout);
    assert_eq!(timeout.status().as_u16(), 504);

    assert_eq!(
        mapped(DomainError::infra(InfraErrorKind::DataCorruption, "bad row")),
        (ErrorCode::DbError, 500)
    );
    assert_eq!(
        mapped(DomainError::infra(InfraErrorKind::Other("DbErr".into()), "failed")),
        (ErrorCode::DbError, 500)
    );
}
