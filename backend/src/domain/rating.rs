//! Meal ratings submitted by students.
//!
//! A rating scores one meal on four dimensions. Scores are validated to the
//! 1..=5 range when constructed, so a [`NewRating`] that reaches the store
//! is always in range.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Error;
use super::user::UserId;

/// Lowest accepted score.
pub const SCORE_MIN: u8 = 1;
/// Highest accepted score.
pub const SCORE_MAX: u8 = 5;
/// Maximum length of a meal name.
pub const MEAL_NAME_MAX: usize = 80;
/// Maximum length of a free-text comment.
pub const COMMENT_MAX: usize = 1000;
/// Meal recorded when a student ate food brought from home.
pub const HOME_MEAL: &str = "Brought food from home";

/// Validation errors returned by rating constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingValidationError {
    ScoreOutOfRange { dimension: RatingDimension, value: i64 },
    EmptyMealName,
    MealNameTooLong { max: usize },
    CommentTooLong { max: usize },
}

impl fmt::Display for RatingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScoreOutOfRange { dimension, value } => write!(
                f,
                "{dimension} rating must be between {SCORE_MIN} and {SCORE_MAX}, got {value}"
            ),
            Self::EmptyMealName => write!(f, "meal name must not be empty"),
            Self::MealNameTooLong { max } => {
                write!(f, "meal name must be at most {max} characters")
            }
            Self::CommentTooLong { max } => write!(f, "comment must be at most {max} characters"),
        }
    }
}

impl std::error::Error for RatingValidationError {}

impl From<RatingValidationError> for Error {
    fn from(err: RatingValidationError) -> Self {
        Error::invalid_request(err.to_string())
    }
}

/// Store-generated rating identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingId(i64);

impl RatingId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RatingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four scored aspects of a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingDimension {
    Taste,
    Portion,
    Variety,
    Overall,
}

impl fmt::Display for RatingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Taste => "taste",
            Self::Portion => "portion",
            Self::Variety => "variety",
            Self::Overall => "overall",
        })
    }
}

/// A single 1..=5 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RatingScore(u8);

impl RatingScore {
    /// Validate a raw score for `dimension`.
    pub fn new(dimension: RatingDimension, value: i64) -> Result<Self, RatingValidationError> {
        match u8::try_from(value) {
            Ok(score) if (SCORE_MIN..=SCORE_MAX).contains(&score) => Ok(Self(score)),
            _ => Err(RatingValidationError::ScoreOutOfRange { dimension, value }),
        }
    }

    /// Highest possible score.
    pub const fn max() -> Self {
        Self(SCORE_MAX)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// The four scores of one rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingScores {
    pub taste: RatingScore,
    pub portion: RatingScore,
    pub variety: RatingScore,
    pub overall: RatingScore,
}

impl RatingScores {
    /// Validate four raw scores in taste, portion, variety, overall order.
    pub fn try_new(
        taste: i64,
        portion: i64,
        variety: i64,
        overall: i64,
    ) -> Result<Self, RatingValidationError> {
        Ok(Self {
            taste: RatingScore::new(RatingDimension::Taste, taste)?,
            portion: RatingScore::new(RatingDimension::Portion, portion)?,
            variety: RatingScore::new(RatingDimension::Variety, variety)?,
            overall: RatingScore::new(RatingDimension::Overall, overall)?,
        })
    }

    /// All four dimensions at the maximum score.
    pub const fn perfect() -> Self {
        Self {
            taste: RatingScore::max(),
            portion: RatingScore::max(),
            variety: RatingScore::max(),
            overall: RatingScore::max(),
        }
    }

    /// Mean of the four dimensions.
    pub fn mean(&self) -> f64 {
        let total = u32::from(self.taste.get())
            + u32::from(self.portion.get())
            + u32::from(self.variety.get())
            + u32::from(self.overall.get());
        f64::from(total) / 4.0
    }
}

/// Name of the meal a rating refers to, as picked at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MealName(String);

impl MealName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, RatingValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RatingValidationError::EmptyMealName);
        }
        if trimmed.chars().count() > MEAL_NAME_MAX {
            return Err(RatingValidationError::MealNameTooLong { max: MEAL_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The meal recorded for food brought from home.
    pub fn home_meal() -> Self {
        Self(HOME_MEAL.to_owned())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for MealName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MealName> for String {
    fn from(value: MealName) -> Self {
        value.0
    }
}

impl TryFrom<String> for MealName {
    type Error = RatingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn normalise_comment(comment: Option<String>) -> Result<Option<String>, RatingValidationError> {
    let Some(comment) = comment else {
        return Ok(None);
    };
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > COMMENT_MAX {
        return Err(RatingValidationError::CommentTooLong { max: COMMENT_MAX });
    }
    Ok(Some(trimmed.to_owned()))
}

/// A rating about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    user_id: UserId,
    meal: MealName,
    scores: RatingScores,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewRating {
    /// Build a rating. Blank comments are dropped.
    pub fn new(
        user_id: UserId,
        meal: MealName,
        scores: RatingScores,
        comment: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RatingValidationError> {
        Ok(Self {
            user_id,
            meal,
            scores,
            comment: normalise_comment(comment)?,
            created_at,
        })
    }

    /// Perfect-score rating for food brought from home.
    pub fn home_meal(user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            meal: MealName::home_meal(),
            scores: RatingScores::perfect(),
            comment: None,
            created_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn meal(&self) -> &MealName {
        &self.meal
    }

    pub fn scores(&self) -> RatingScores {
        self.scores
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A stored, immutable rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRating {
    pub id: RatingId,
    pub user_id: UserId,
    pub meal: MealName,
    pub scores: RatingScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for rating value objects.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(300)]
    fn scores_outside_range_are_rejected(#[case] value: i64) {
        let err = RatingScore::new(RatingDimension::Portion, value).expect_err("out of range");
        assert_eq!(
            err,
            RatingValidationError::ScoreOutOfRange {
                dimension: RatingDimension::Portion,
                value,
            }
        );
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn scores_inside_range_are_accepted(#[case] value: i64) {
        let score = RatingScore::new(RatingDimension::Taste, value).expect("in range");
        assert_eq!(i64::from(score.get()), value);
    }

    #[rstest]
    fn first_invalid_dimension_is_reported() {
        let err = RatingScores::try_new(4, 4, 9, 0).expect_err("variety is invalid");
        assert!(matches!(
            err,
            RatingValidationError::ScoreOutOfRange {
                dimension: RatingDimension::Variety,
                ..
            }
        ));
    }

    #[rstest]
    #[case((5, 5, 5, 5), 5.0)]
    #[case((1, 2, 3, 4), 2.5)]
    #[case((4, 3, 3, 3), 3.25)]
    fn mean_averages_all_dimensions(#[case] raw: (i64, i64, i64, i64), #[case] expected: f64) {
        let scores = RatingScores::try_new(raw.0, raw.1, raw.2, raw.3).expect("valid scores");
        assert!((scores.mean() - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn meal_names_are_trimmed_and_required() {
        assert_eq!(
            MealName::new("  Burger ").expect("valid").as_str(),
            "Burger"
        );
        assert_eq!(MealName::new(" "), Err(RatingValidationError::EmptyMealName));
    }

    #[rstest]
    fn blank_comments_are_dropped() {
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let rating = NewRating::new(
            UserId::new(1),
            MealName::new("Salad").expect("valid"),
            RatingScores::perfect(),
            Some("   ".to_owned()),
            created_at,
        )
        .expect("valid rating");

        assert!(rating.comment().is_none());
    }

    #[rstest]
    fn overlong_comments_are_rejected() {
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let err = NewRating::new(
            UserId::new(1),
            MealName::new("Salad").expect("valid"),
            RatingScores::perfect(),
            Some("x".repeat(COMMENT_MAX + 1)),
            created_at,
        )
        .expect_err("comment too long");

        assert_eq!(err, RatingValidationError::CommentTooLong { max: COMMENT_MAX });
    }

    #[rstest]
    fn home_meal_rating_is_perfect() {
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let rating = NewRating::home_meal(UserId::new(2), created_at);

        assert_eq!(rating.meal().as_str(), HOME_MEAL);
        assert_eq!(rating.scores(), RatingScores::perfect());
        assert_eq!(rating.created_at(), created_at);
    }
}
