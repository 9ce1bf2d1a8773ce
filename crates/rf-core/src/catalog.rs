//! # Restaurant Catalog
//!
//! Static, read-only list of restaurants that can be rated.

use crate::models::Restaurant;

/// Emoji shown next to a restaurant of the given category.
pub fn icon_for_category(category: &str) -> &'static str {
    match category {
        "Kenyan" => "🍽️",
        "Coffee" => "☕",
        "Fast Food" => "🍔",
        "Pizza" => "🍕",
        "Chicken" => "🍗",
        _ => "🏪",
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn all(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn get(&self, id: u32) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    /// Case-insensitive substring match on name, location or category.
    /// A blank term matches everything.
    pub fn search(&self, term: &str) -> Vec<Restaurant> {
        let needle = term.trim().to_lowercase();
        self.restaurants
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.location.to_lowercase().contains(&needle)
                    || r.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let entry = |id, name: &str, location: &str, category: &str, icon: Option<&str>| Restaurant {
            id,
            name: name.to_string(),
            location: location.to_string(),
            category: category.to_string(),
            icon: icon.unwrap_or_else(|| icon_for_category(category)).to_string(),
        };
        // a few listings carry their own icon instead of the category's
        Self::new(vec![
            entry(1, "Java House Westlands", "Westlands, Nairobi", "Coffee", None),
            entry(2, "KFC Westgate", "Westgate Mall", "Fast Food", Some("🍗")),
            entry(3, "Artcaffe Gigiri", "Gigiri, Nairobi", "Coffee", None),
            entry(4, "Dormans Coffee", "CBD, Nairobi", "Coffee", Some("🥤")),
            entry(5, "CJ's Restaurant", "Parklands", "Kenyan", Some("🍔")),
            entry(6, "Big Square", "Karen, Nairobi", "Pizza", None),
        ])
    }
}
