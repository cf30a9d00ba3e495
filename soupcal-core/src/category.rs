//! Feed categories and the keyword classifier that fills them.

use std::fmt;
use std::str::FromStr;

use crate::location::LocationRecord;

/// A subscribable feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedCategory {
    SoupKitchen,
    FoodPantry,
    /// Everything in either of the other two feeds
    Both,
}

impl FeedCategory {
    pub const ALL: [FeedCategory; 3] = [
        FeedCategory::SoupKitchen,
        FeedCategory::FoodPantry,
        FeedCategory::Both,
    ];

    /// URL slug, also the feed file stem (`soup_kitchen.ics`)
    pub fn slug(self) -> &'static str {
        match self {
            FeedCategory::SoupKitchen => "soup_kitchen",
            FeedCategory::FoodPantry => "food_pantry",
            FeedCategory::Both => "both",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FeedCategory::SoupKitchen => "Soup Kitchen",
            FeedCategory::FoodPantry => "Food Pantry",
            FeedCategory::Both => "Soup Kitchen & Food Pantry",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        FeedCategory::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Whether `record` belongs in this feed.
    pub fn matches(self, record: &LocationRecord) -> bool {
        let name = record.name.to_lowercase();
        match self {
            FeedCategory::SoupKitchen => name.contains("soup") || name.contains("kitchen"),
            FeedCategory::FoodPantry => {
                name.contains("pantry") || record.notes.to_lowercase().contains("food pantry")
            }
            FeedCategory::Both => {
                FeedCategory::SoupKitchen.matches(record) || FeedCategory::FoodPantry.matches(record)
            }
        }
    }

    /// Records in this feed, in page order.
    pub fn select(self, records: &[LocationRecord]) -> Vec<&LocationRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl fmt::Display for FeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for FeedCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedCategory::from_slug(s).ok_or_else(|| {
            let known: Vec<_> = FeedCategory::ALL.iter().map(|c| c.slug()).collect();
            format!("Unknown feed '{}'. Expected one of: {}", s, known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, notes: &str) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            address: String::new(),
            raw_schedule_lines: Vec::new(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_classify_by_name() {
        let kitchen = record("St. Patrick Center Kitchen", "");
        let soup = record("Downtown SOUP Line", "");
        let pantry = record("Eastside Pantry", "");

        assert!(FeedCategory::SoupKitchen.matches(&kitchen));
        assert!(FeedCategory::SoupKitchen.matches(&soup));
        assert!(!FeedCategory::SoupKitchen.matches(&pantry));
        assert!(FeedCategory::FoodPantry.matches(&pantry));
    }

    #[test]
    fn test_pantry_from_notes() {
        let record = record("Hope Ministries", "Operates a Food Pantry on site");
        assert!(FeedCategory::FoodPantry.matches(&record));
        assert!(!FeedCategory::SoupKitchen.matches(&record));
    }

    #[test]
    fn test_both_is_union_without_duplicates() {
        let records = vec![
            record("Soup Kitchen & Pantry", ""),
            record("Library", "Story time"),
            record("Corner Pantry", ""),
        ];

        let both = FeedCategory::Both.select(&records);
        let names: Vec<_> = both.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Soup Kitchen & Pantry", "Corner Pantry"]);
    }

    #[test]
    fn test_slug_roundtrip() {
        for category in FeedCategory::ALL {
            assert_eq!(category.slug().parse::<FeedCategory>(), Ok(category));
        }
        assert!("pantry".parse::<FeedCategory>().is_err());
    }
}
