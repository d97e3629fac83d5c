//! Verification quiz generation
//!
//! The quiz discourages fraudulent claims: the owner answers questions
//! about their own item before the query reaches the matcher.

use finders_core::Category;
use serde::{Deserialize, Serialize};

/// Questions asked for every non-empty description
const CANNED_QUESTIONS: [&str; 2] = [
    "What color is the item?",
    "Describe a detail only the owner would know (scratches, stickers, contents).",
];

const PHONE_QUESTIONS: [&str; 3] = [
    "What is the lock screen image?",
    "What is the phone's brand and model?",
    "Was there a phone case? If yes, what colour/design?",
];

const WALLET_QUESTIONS: [&str; 3] = [
    "What color is the wallet?",
    "What items were inside the wallet?",
    "Any specific markings or brand on the wallet?",
];

const BAG_QUESTIONS: [&str; 2] = ["What brand is the bag?", "What items were inside?"];

const KEYS_QUESTIONS: [&str; 2] = [
    "How many keys were on the keychain?",
    "Was there a keychain accessory? If so, describe it.",
];

/// Which question set the generator draws from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizPolicy {
    /// The same two questions for every item
    #[default]
    Canned,
    /// Category-specific questions, falling back to the canned set for `other`
    ByCategory,
}

/// Pure description → questions mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizGenerator {
    policy: QuizPolicy,
}

impl QuizGenerator {
    pub fn new(policy: QuizPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> QuizPolicy {
        self.policy
    }

    /// Questions for a description. An empty (or blank) description yields
    /// no questions at all.
    pub fn generate(&self, description: &str, category: Category) -> Vec<String> {
        if description.trim().is_empty() {
            return Vec::new();
        }

        let questions: &[&str] = match (self.policy, category) {
            (QuizPolicy::Canned, _) | (QuizPolicy::ByCategory, Category::Other) => {
                &CANNED_QUESTIONS
            }
            (QuizPolicy::ByCategory, Category::Phone) => &PHONE_QUESTIONS,
            (QuizPolicy::ByCategory, Category::Wallet) => &WALLET_QUESTIONS,
            (QuizPolicy::ByCategory, Category::Bag) => &BAG_QUESTIONS,
            (QuizPolicy::ByCategory, Category::Keys) => &KEYS_QUESTIONS,
        };

        questions.iter().map(|q| q.to_string()).collect()
    }
}
