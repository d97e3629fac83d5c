//! The lost-item query composed during one search session

use super::{LocationPicker, MediaAttachmentSet};
use chrono::NaiveDate;
use finders_core::{Category, Error, LostItemSubmission, Result, ValidationError};

/// Verification questions frozen for one submission attempt, with the
/// user's answers indexed 1:1.
///
/// Answers only change through [`Quiz::set_answer`], so the answer list
/// always has the same length as the question list.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    questions: Vec<String>,
    answers: Vec<String>,
}

impl Quiz {
    pub fn new(questions: Vec<String>) -> Self {
        let answers = vec![String::new(); questions.len()];
        Self { questions, answers }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn set_answer(&mut self, index: usize, answer: impl Into<String>) -> Result<()> {
        let slot = self.answers.get_mut(index).ok_or_else(|| {
            Error::InvalidData(format!("quiz has no question #{}", index + 1))
        })?;
        *slot = answer.into();
        Ok(())
    }

    /// Every answer is non-empty after trimming (vacuously true for no questions)
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(|a| !a.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Structured lost-item query.
///
/// Built fresh per search session and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimQuery {
    category: Category,
    description: String,
    location_notes: String,
    date_lost: NaiveDate,
    locations: LocationPicker,
    attachments: MediaAttachmentSet,
    quiz: Option<Quiz>,
}

impl ClaimQuery {
    /// New query dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            category: Category::default(),
            description: String::new(),
            location_notes: String::new(),
            date_lost: today,
            locations: LocationPicker::new(),
            attachments: MediaAttachmentSet::new(),
            quiz: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Category-specific quizzes are derived from it, so it locks with the quiz
    pub fn set_category(&mut self, category: Category) -> Result<()> {
        if self.quiz.is_some() {
            return Err(ValidationError::QuizFrozen.into());
        }
        self.category = category;
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The quiz is derived from the description, so it is locked once generated
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        if self.quiz.is_some() {
            return Err(ValidationError::QuizFrozen.into());
        }
        self.description = description.into();
        Ok(())
    }

    pub fn location_notes(&self) -> &str {
        &self.location_notes
    }

    pub fn set_location_notes(&mut self, notes: impl Into<String>) {
        self.location_notes = notes.into();
    }

    pub fn date_lost(&self) -> NaiveDate {
        self.date_lost
    }

    pub fn set_date_lost(&mut self, date: NaiveDate, today: NaiveDate) -> Result<()> {
        if date > today {
            return Err(ValidationError::FutureDate { date }.into());
        }
        self.date_lost = date;
        Ok(())
    }

    pub fn locations(&self) -> &LocationPicker {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut LocationPicker {
        &mut self.locations
    }

    pub fn attachments(&self) -> &MediaAttachmentSet {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut MediaAttachmentSet {
        &mut self.attachments
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn set_answer(&mut self, index: usize, answer: impl Into<String>) -> Result<()> {
        match self.quiz.as_mut() {
            Some(quiz) => quiz.set_answer(index, answer),
            None => Err(Error::InvalidData("no quiz has been generated".to_string())),
        }
    }

    pub(crate) fn freeze_quiz(&mut self, questions: Vec<String>) {
        self.quiz = Some(Quiz::new(questions));
    }

    pub(crate) fn discard_quiz(&mut self) {
        self.quiz = None;
    }

    /// A quiz may only be generated once at least one location is marked
    pub fn check_ready_for_quiz(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(ValidationError::MissingLocation.into());
        }
        Ok(())
    }

    /// Submission needs a location, a generated quiz, and every answer filled in
    pub fn check_ready_for_submission(&self) -> Result<()> {
        self.check_ready_for_quiz()?;
        match &self.quiz {
            Some(quiz) if quiz.is_complete() => Ok(()),
            _ => Err(ValidationError::UnansweredQuiz.into()),
        }
    }

    /// Snapshot the query as a wire payload, answers trimmed
    pub fn to_submission(&self) -> Result<LostItemSubmission> {
        self.check_ready_for_submission()?;

        let quiz_answers = self
            .quiz
            .as_ref()
            .map(|q| q.answers().iter().map(|a| a.trim().to_string()).collect())
            .unwrap_or_default();

        Ok(LostItemSubmission {
            category: self.category,
            details: self.description.trim().to_string(),
            location_notes: self.location_notes.trim().to_string(),
            date_from: self.date_lost,
            date_to: self.date_lost,
            locations: self.locations.points().to_vec(),
            images: self.attachments.as_slice().to_vec(),
            quiz_answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finders_core::Coordinate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_answers_track_questions() {
        let mut quiz = Quiz::new(vec!["q1".into(), "q2".into()]);
        assert_eq!(quiz.answers(), &["", ""]);
        quiz.set_answer(1, "x").unwrap();
        assert!(quiz.set_answer(2, "y").is_err());
        assert_eq!(quiz.answers().len(), quiz.questions().len());
        assert!(!quiz.is_complete());
    }

    #[test]
    fn test_whitespace_answer_is_empty() {
        let mut quiz = Quiz::new(vec!["q1".into()]);
        quiz.set_answer(0, "   ").unwrap();
        assert!(!quiz.is_complete());
        quiz.set_answer(0, " red ").unwrap();
        assert!(quiz.is_complete());
    }

    #[test]
    fn test_future_date_rejected() {
        let mut query = ClaimQuery::new(day(16));
        let err = query.set_date_lost(day(17), day(16)).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::FutureDate { .. })));
        assert_eq!(query.date_lost(), day(16));

        query.set_date_lost(day(3), day(16)).unwrap();
        assert_eq!(query.date_lost(), day(3));
    }

    #[test]
    fn test_description_frozen_with_quiz() {
        let mut query = ClaimQuery::new(day(16));
        query.set_description("black wallet").unwrap();
        query.freeze_quiz(vec!["q".into()]);
        assert!(query.set_description("red wallet").is_err());
        assert!(query.set_category(Category::Bag).is_err());
        query.discard_quiz();
        query.set_description("red wallet").unwrap();
        query.set_category(Category::Bag).unwrap();
    }

    #[test]
    fn test_submission_snapshot() {
        let mut query = ClaimQuery::new(day(16));
        query.set_category(Category::Bag).unwrap();
        query.set_description("  tote bag ").unwrap();
        query.locations_mut().add_point(Coordinate::new(35.0, 135.7)).unwrap();
        assert!(query.to_submission().is_err());

        query.freeze_quiz(vec!["q".into()]);
        query.set_answer(0, " canvas ").unwrap();

        let submission = query.to_submission().unwrap();
        assert_eq!(submission.details, "tote bag");
        assert_eq!(submission.quiz_answers, vec!["canvas".to_string()]);
        assert_eq!(submission.date_from, submission.date_to);
        assert_eq!(submission.locations.len(), 1);
    }
}
