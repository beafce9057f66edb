//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn student_profile() -> UserProfile {
    UserProfile::try_from_strings("Ada Lovelace", "ada@campus.edu", "student", Some("S-1001"))
        .expect("valid profile")
}

#[rstest]
#[case("", UserValidationError::EmptyName)]
#[case("   ", UserValidationError::EmptyName)]
fn full_name_rejects_blank_input(#[case] input: &str, #[case] expected: UserValidationError) {
    assert_eq!(FullName::new(input), Err(expected));
}

#[rstest]
fn full_name_rejects_overlong_input() {
    let name = "a".repeat(NAME_MAX + 1);
    assert_eq!(
        FullName::new(name),
        Err(UserValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
fn full_name_is_trimmed() {
    let name = FullName::new("  Grace Hopper ").expect("valid name");
    assert_eq!(name.as_str(), "Grace Hopper");
}

#[rstest]
#[case("ada@campus.edu")]
#[case("first.last+tag@dining.example.org")]
fn email_accepts_well_formed_addresses(#[case] input: &str) {
    let email = EmailAddress::new(input).expect("valid email");
    assert_eq!(email.as_str(), input);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("two words@campus.edu", UserValidationError::InvalidEmail)]
#[case("ada@localhost", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_addresses(#[case] input: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(input), Err(expected));
}

#[rstest]
fn email_trims_surrounding_whitespace() {
    let email = EmailAddress::new("  ada@campus.edu \n").expect("valid email");
    assert_eq!(email.as_str(), "ada@campus.edu");
}

#[rstest]
#[case("admin", Role::Admin)]
#[case("student", Role::Student)]
fn role_round_trips_through_persisted_text(#[case] raw: &str, #[case] role: Role) {
    assert_eq!(raw.parse::<Role>(), Ok(role));
    assert_eq!(role.as_str(), raw);
}

#[rstest]
fn role_rejects_unknown_values() {
    let err = "chef".parse::<Role>().expect_err("unknown role");
    assert_eq!(
        err,
        UserValidationError::UnknownRole {
            value: "chef".to_owned()
        }
    );
}

#[rstest]
fn blank_student_id_is_treated_as_absent() {
    let profile = UserProfile::try_from_strings("Dana", "dana@campus.edu", "admin", Some("  "))
        .expect("valid profile");
    assert!(profile.student_id().is_none());
}

#[rstest]
fn user_exposes_profile_fields(student_profile: UserProfile) {
    let user = User::new(UserId::new(7), student_profile);

    assert_eq!(user.id().get(), 7);
    assert_eq!(user.name().as_str(), "Ada Lovelace");
    assert_eq!(user.email().as_str(), "ada@campus.edu");
    assert_eq!(user.role(), Role::Student);
    assert_eq!(user.student_id().map(|id| id.as_str()), Some("S-1001"));
}

#[rstest]
fn user_serialises_flat_camel_case(student_profile: UserProfile) {
    let user = User::new(UserId::new(3), student_profile);
    let value = serde_json::to_value(&user).expect("serialise user");

    assert_eq!(
        value,
        json!({
            "id": 3,
            "name": "Ada Lovelace",
            "email": "ada@campus.edu",
            "role": "student",
            "studentId": "S-1001",
        })
    );
}

#[rstest]
#[case("12345", false)]
#[case("123456", true)]
#[case("pâté!", false)]
fn signup_passwords_need_six_characters(
    student_profile: UserProfile,
    #[case] raw: &str,
    #[case] accepted: bool,
) {
    let password = Password::new(raw).expect("non-empty password");
    let result = NewUser::new(student_profile, password);

    if accepted {
        assert!(result.is_ok());
    } else {
        let err = result.expect_err("password too short");
        assert_eq!(err, CredentialError::PasswordTooShort { min: PASSWORD_MIN });
        assert_eq!(err.to_string(), "password must be at least 6 characters long");
    }
}
