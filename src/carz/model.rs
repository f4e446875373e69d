use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Highest rating a car can be given.
pub const MAX_RATING: i64 = 5;

/// Whether a car is still sealed in its blister pack.
///
/// The two values the entry form offers are modelled explicitly; anything
/// else found in storage is kept verbatim so filtering and grouping still see
/// the exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackStatus {
    #[default]
    Unset,
    Opened,
    InPack,
    Other(String),
}

impl PackStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PackStatus::Unset => "",
            PackStatus::Opened => "Opened",
            PackStatus::InPack => "In-Pack",
            PackStatus::Other(s) => s,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, PackStatus::Unset)
    }
}

impl From<String> for PackStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => PackStatus::Unset,
            "Opened" => PackStatus::Opened,
            "In-Pack" => PackStatus::InPack,
            _ => PackStatus::Other(s),
        }
    }
}

impl From<&str> for PackStatus {
    fn from(s: &str) -> Self {
        PackStatus::from(s.to_string())
    }
}

impl From<PackStatus> for String {
    fn from(status: PackStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One collectible entry.
///
/// `value` and `rating` are signed so that out-of-range values written by older
/// or hand-edited files still load; consumers go through [`Car::stars`] rather
/// than reading `rating` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub value: i64,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub pack_status: PackStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub rating: i64,
    #[serde(default)]
    pub wiki: String,
    #[serde(default)]
    pub marketplace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Car {
    pub fn new(name: impl Into<String>, value: i64, image: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            image: image.into(),
            kind: String::new(),
            pack_status: PackStatus::Unset,
            category: String::new(),
            rating: 0,
            wiki: String::new(),
            marketplace: String::new(),
            added_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn with_pack_status(mut self, status: impl Into<PackStatus>) -> Self {
        self.pack_status = status.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = rating;
        self
    }

    /// Number of stars to draw, clamped to `0..=MAX_RATING`.
    pub fn stars(&self) -> usize {
        self.rating.clamp(0, MAX_RATING) as usize
    }

    pub fn wiki_link(&self) -> Option<&str> {
        non_empty(&self.wiki)
    }

    pub fn marketplace_link(&self) -> Option<&str> {
        non_empty(&self.marketplace)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Accepts integers, floats (truncated), numeric strings and `null` (as 0).
fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Null(Option<()>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) if f.is_finite() => f.trunc() as i64,
        Raw::Float(_) => 0,
        Raw::Text(s) => s.trim().parse().unwrap_or(0),
        Raw::Null(_) => 0,
    })
}

/// The set of favorite cars, referenced by id.
///
/// Kept in insertion order and never holds the same id twice. Ids that no
/// longer match a car are inert until pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Favorites {
    ids: Vec<Uuid>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    /// Adds `id` if absent. Returns `false` when it was already present.
    pub fn insert(&mut self, id: Uuid) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes every occurrence of `id`. Returns `true` if anything was removed.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        let before = self.ids.len();
        self.ids.retain(|fav| fav != id);
        self.ids.len() != before
    }

    pub fn retain<F: FnMut(&Uuid) -> bool>(&mut self, f: F) {
        self.ids.retain(f);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uuid> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for Favorites {
    fn from(raw: Vec<String>) -> Self {
        let mut favorites = Favorites::new();
        for entry in raw {
            match Uuid::parse_str(&entry) {
                Ok(id) => {
                    favorites.insert(id);
                }
                Err(_) => tracing::debug!(entry = %entry, "ignoring non-id favorite entry"),
            }
        }
        favorites
    }
}

impl From<Favorites> for Vec<String> {
    fn from(favorites: Favorites) -> Self {
        favorites.ids.iter().map(Uuid::to_string).collect()
    }
}

impl FromIterator<Uuid> for Favorites {
    fn from_iter<T: IntoIterator<Item = Uuid>>(iter: T) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            favorites.insert(id);
        }
        favorites
    }
}

/// Raw, unvalidated field values as typed into an entry surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarForm {
    pub name: String,
    pub value: String,
    pub image: String,
    pub kind: String,
    pub pack_status: String,
    pub category: String,
    pub rating: String,
    pub wiki: String,
    pub marketplace: String,
}

impl CarForm {
    /// Pre-populates a form from an existing car, as done when editing starts.
    pub fn from_car(car: &Car) -> Self {
        Self {
            name: car.name.clone(),
            value: car.value.to_string(),
            image: car.image.clone(),
            kind: car.kind.clone(),
            pack_status: car.pack_status.as_str().to_string(),
            category: car.category.clone(),
            rating: car.rating.to_string(),
            wiki: car.wiki.clone(),
            marketplace: car.marketplace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_status_round_trips_known_and_unknown_values() {
        assert_eq!(PackStatus::from("In-Pack"), PackStatus::InPack);
        assert_eq!(PackStatus::from(""), PackStatus::Unset);
        let other = PackStatus::from("Loose");
        assert_eq!(other, PackStatus::Other("Loose".into()));
        assert_eq!(other.as_str(), "Loose");
    }

    #[test]
    fn car_uses_camel_case_and_type_key() {
        let car = Car::new("Bone Shaker", 150, "img.png").with_pack_status("In-Pack");
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["packStatus"], "In-Pack");
        assert!(json.get("type").is_some());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn legacy_record_without_id_gets_one() {
        let raw = r#"{"name":"Twin Mill","value":120,"image":"x.png","type":"",
            "packStatus":"Opened","category":"Muscle","rating":4,"wiki":"","marketplace":""}"#;
        let car: Car = serde_json::from_str(raw).unwrap();
        assert_eq!(car.name, "Twin Mill");
        assert_eq!(car.pack_status, PackStatus::Opened);
        assert!(!car.id.is_nil());
        assert!(car.added_at.is_none());
    }

    #[test]
    fn corrupt_numbers_are_tolerated() {
        let raw = r#"{"name":"X","value":"75","image":"","rating":null}"#;
        let car: Car = serde_json::from_str(raw).unwrap();
        assert_eq!(car.value, 75);
        assert_eq!(car.rating, 0);
    }

    #[test]
    fn stars_are_clamped() {
        assert_eq!(Car::new("a", 1, "i").with_rating(-3).stars(), 0);
        assert_eq!(Car::new("a", 1, "i").with_rating(9).stars(), 5);
        assert_eq!(Car::new("a", 1, "i").with_rating(3).stars(), 3);
    }

    #[test]
    fn favorites_dedup_and_skip_non_ids() {
        let id = Uuid::new_v4();
        let raw = serde_json::to_string(&vec![id.to_string(), id.to_string(), "Bone Shaker".into()])
            .unwrap();
        let favorites: Favorites = serde_json::from_str(&raw).unwrap();
        assert_eq!(favorites.len(), 1);
        assert!(favorites.contains(&id));
    }

    #[test]
    fn empty_links_are_absent() {
        let mut car = Car::new("a", 1, "i");
        car.wiki = "  ".into();
        car.marketplace = "https://shop.example/a".into();
        assert_eq!(car.wiki_link(), None);
        assert_eq!(car.marketplace_link(), Some("https://shop.example/a"));
    }
}
