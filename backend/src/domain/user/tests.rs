//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        id: VALID_ID.to_owned(),
        name: "John Smith".to_owned(),
        email: "john.smith@example.com".to_owned(),
        phone: "5551234567".to_owned(),
        role: Role::Homeowner,
        avatar: None,
    }
}

#[rstest]
fn valid_draft_builds_user(draft: UserDraft) {
    let user = User::try_from_draft(draft).expect("valid user");
    assert_eq!(user.id().as_ref(), VALID_ID);
    assert_eq!(user.name(), "John Smith");
    assert_eq!(user.phone().as_ref(), "5551234567");
    assert_eq!(user.role(), Role::Homeowner);
    assert!(user.avatar().is_none());
}

#[rstest]
#[case::empty_id(|d: &mut UserDraft| d.id = String::new(), UserValidationError::EmptyId)]
#[case::bad_id(|d: &mut UserDraft| d.id = "not-a-uuid".into(), UserValidationError::InvalidId)]
#[case::padded_id(|d: &mut UserDraft| d.id = format!(" {VALID_ID}"), UserValidationError::InvalidId)]
#[case::blank_name(|d: &mut UserDraft| d.name = "  ".into(), UserValidationError::EmptyName)]
#[case::no_at(|d: &mut UserDraft| d.email = "john.example.com".into(), UserValidationError::InvalidEmail)]
#[case::no_domain(|d: &mut UserDraft| d.email = "john@".into(), UserValidationError::InvalidEmail)]
#[case::blank_phone(|d: &mut UserDraft| d.phone = " ".into(), UserValidationError::EmptyPhone)]
fn invalid_drafts_are_rejected(
    mut draft: UserDraft,
    #[case] mutate: fn(&mut UserDraft),
    #[case] expected: UserValidationError,
) {
    mutate(&mut draft);
    assert_eq!(User::try_from_draft(draft), Err(expected));
}

#[rstest]
fn blank_avatar_is_dropped(mut draft: UserDraft) {
    draft.avatar = Some("   ".to_owned());
    let user = User::try_from_draft(draft).expect("valid user");
    assert!(user.avatar().is_none());
}

#[rstest]
fn serialises_camel_case_without_absent_avatar(draft: UserDraft) {
    let user = User::try_from_draft(draft).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "name": "John Smith",
            "email": "john.smith@example.com",
            "phone": "5551234567",
            "role": "homeowner",
        })
    );
}

#[rstest]
fn deserialisation_enforces_invariants() {
    let payload = json!({
        "id": VALID_ID,
        "name": "",
        "email": "x@example.com",
        "phone": "1",
        "role": "agent",
    });
    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn random_ids_parse_back() {
    let id = UserId::random();
    let parsed = UserId::new(id.as_ref()).expect("round trip");
    assert_eq!(parsed, id);
}
