//! Item categories shared by lost and found reports

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of item being reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Phone,
    Wallet,
    Bag,
    Keys,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Phone,
        Category::Wallet,
        Category::Bag,
        Category::Keys,
        Category::Other,
    ];

    /// Value sent in the `kind` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Phone => "phone",
            Category::Wallet => "wallet",
            Category::Bag => "bag",
            Category::Keys => "keys",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" => Ok(Category::Phone),
            "wallet" => Ok(Category::Wallet),
            "bag" => Ok(Category::Bag),
            "keys" => Ok(Category::Keys),
            "other" => Ok(Category::Other),
            other => Err(crate::Error::InvalidData(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!("Wallet".parse::<Category>().unwrap(), Category::Wallet);
        assert_eq!(" keys ".parse::<Category>().unwrap(), Category::Keys);
        assert!("umbrella".parse::<Category>().is_err());
    }

    #[test]
    fn test_wire_name_matches_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
