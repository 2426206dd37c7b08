//! Day record model
//!
//! One calendar day's meal log: consumed items grouped by meal section,
//! plus an optional server-computed total that outranks local sums.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::{DailyGoals, DisplayNameCache, Macros};

/// A named slot within a day's log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealSection {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Workout,
}

impl MealSection {
    pub const ALL: [MealSection; 5] = [
        MealSection::Breakfast,
        MealSection::Lunch,
        MealSection::Dinner,
        MealSection::Snack,
        MealSection::Workout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSection::Breakfast => "breakfast",
            MealSection::Lunch => "lunch",
            MealSection::Dinner => "dinner",
            MealSection::Snack => "snack",
            MealSection::Workout => "workout",
        }
    }

    /// Map a section key; anything unrecognized lands in `Snack`
    pub fn from_key(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealSection::Breakfast,
            "lunch" => MealSection::Lunch,
            "dinner" => MealSection::Dinner,
            "workout" | "training" => MealSection::Workout,
            _ => MealSection::Snack,
        }
    }
}

impl From<String> for MealSection {
    fn from(s: String) -> Self {
        MealSection::from_key(&s)
    }
}

impl From<MealSection> for String {
    fn from(section: MealSection) -> Self {
        section.as_str().to_string()
    }
}

/// A logged item whose nutrient fields are already absolute values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumedItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kcal: f64,
    #[serde(default, alias = "p")]
    pub protein: f64,
    #[serde(default, alias = "c")]
    pub carbs: f64,
    #[serde(default, alias = "f")]
    pub fat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

impl ConsumedItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, macros: Macros) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kcal: macros.calories,
            protein: macros.protein,
            carbs: macros.carbs,
            fat: macros.fat,
            quantity: None,
        }
    }

    /// An item loaded from storage whose nutrients were not carried along
    pub fn placeholder(id: impl Into<String>, name: impl Into<String>, quantity: Option<f64>) -> Self {
        Self {
            quantity,
            ..Self::new(id, name, Macros::zero())
        }
    }

    pub fn macros(&self) -> Macros {
        Macros::new(self.kcal, self.protein, self.carbs, self.fat)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Section keys are normalized by `MealSection::from_key`; lists whose keys
/// land on the same section are concatenated, never overwritten.
fn merge_sections<'de, D>(deserializer: D) -> Result<BTreeMap<MealSection, Vec<ConsumedItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Vec<ConsumedItem>>::deserialize(deserializer)?;
    let mut sections: BTreeMap<MealSection, Vec<ConsumedItem>> = BTreeMap::new();
    for (key, items) in raw {
        sections.entry(MealSection::from_key(&key)).or_default().extend(items);
    }
    Ok(sections)
}

/// Where a day's totals come from
#[derive(Debug, Clone, PartialEq)]
pub enum MacroSource<'a> {
    /// Authoritative server-computed total
    Snapshot(Macros),
    /// Items to be summed locally
    Computed(Vec<&'a ConsumedItem>),
}

/// One calendar day's meal log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "merge_sections")]
    pub sections: BTreeMap<MealSection, Vec<ConsumedItem>>,
    #[serde(default, alias = "total_macro", skip_serializing_if = "Option::is_none")]
    pub total_macro_snapshot: Option<Macros>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sections: BTreeMap::new(),
            total_macro_snapshot: None,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Macros) -> Self {
        self.total_macro_snapshot = Some(snapshot);
        self
    }

    pub fn add_item(&mut self, section: MealSection, item: ConsumedItem) {
        self.sections.entry(section).or_default().push(item);
    }

    pub fn section(&self, section: MealSection) -> &[ConsumedItem] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn items(&self) -> impl Iterator<Item = &ConsumedItem> {
        self.sections.values().flatten()
    }

    pub fn item_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// The snapshot when present, otherwise every item across all sections
    pub fn macro_source(&self) -> MacroSource<'_> {
        match self.total_macro_snapshot {
            Some(snapshot) => MacroSource::Snapshot(snapshot),
            None => MacroSource::Computed(self.items().collect()),
        }
    }

    /// Build a day record from a persisted daily meal record.
    ///
    /// Persisted records carry no per-item nutrients, so every entry becomes
    /// a zeroed placeholder labelled through `names`.
    pub fn from_persisted(record: &DayMealRecord, names: &DisplayNameCache) -> Result<Self, RecordError> {
        let date = parse_record_date(&record.created_at)?;
        let mut day = DayRecord::new(date);

        for entry in &record.records {
            let quantity = entry.capacity.as_ref().and_then(serde_json::Value::as_f64);
            day.add_item(
                MealSection::from_key(&entry.time_of_day),
                ConsumedItem::placeholder(entry.recipe_id.clone(), names.label_for(&entry.recipe_id), quantity),
            );
        }

        day.total_macro_snapshot = record.total_macro;
        Ok(day)
    }
}

/// Errors converting persisted records
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Invalid record date '{0}': expected RFC 3339 timestamp or YYYY-MM-DD")]
    InvalidDate(String),
}

/// Accepts RFC 3339, a naive ISO timestamp, or a bare date
fn parse_record_date(s: &str) -> Result<NaiveDate, RecordError> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| RecordError::InvalidDate(s.to_string()))
}

/// A recipe logged against a persisted day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealRecordEntry {
    pub recipe_id: String,
    #[serde(default)]
    pub time_of_day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<serde_json::Value>,
}

/// A persisted daily meal record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMealRecord {
    pub created_at: String,
    #[serde(default)]
    pub records: Vec<MealRecordEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_macro: Option<Macros>,
    #[serde(flatten)]
    pub goals: DailyGoals,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_section_keys() {
        for section in MealSection::ALL {
            assert_eq!(MealSection::from_key(section.as_str()), section);
        }
        assert_eq!(MealSection::from_key("Training"), MealSection::Workout);
        assert_eq!(MealSection::from_key("brunch"), MealSection::Snack);
    }

    #[test]
    fn test_consumed_item_accepts_dashboard_shape() {
        let item: ConsumedItem = serde_json::from_str(
            r#"{"id": 101, "name": "Grilled Chicken Salad", "kcal": 450, "p": 45, "c": 10, "f": 20}"#,
        )
        .unwrap();
        assert_eq!(item.id, "101");
        assert_eq!(item.macros(), Macros::new(450.0, 45.0, 10.0, 20.0));
        assert_eq!(item.quantity, None);
    }

    #[test]
    fn test_day_record_from_json() {
        let day: DayRecord = serde_json::from_str(
            r#"{
                "date": "2026-02-09",
                "sections": {
                    "lunch": [{"id": "a", "name": "Salad", "kcal": 450, "protein": 45, "carbs": 10, "fat": 20}],
                    "snacks": [{"id": "b", "name": "Yogurt", "kcal": 120, "protein": 15, "carbs": 8, "fat": 0}]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(day.date, date("2026-02-09"));
        assert_eq!(day.section(MealSection::Lunch).len(), 1);
        assert_eq!(day.section(MealSection::Snack).len(), 1);
        assert_eq!(day.item_count(), 2);
        assert!(day.total_macro_snapshot.is_none());
    }

    #[test]
    fn test_colliding_section_keys_are_merged() {
        let day: DayRecord = serde_json::from_str(
            r#"{
                "date": "2026-02-09",
                "sections": {
                    "snack": [{"id": "a", "kcal": 100}],
                    "snacks": [{"id": "b", "kcal": 200}],
                    "Lunch": [{"id": "c", "kcal": 300}],
                    "lunch": [{"id": "d", "kcal": 400}],
                    "elevenses": [{"id": "e", "kcal": 50}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(day.item_count(), 5);
        assert_eq!(day.section(MealSection::Snack).len(), 3);
        assert_eq!(day.section(MealSection::Lunch).len(), 2);
        assert_eq!(crate::nutrition::aggregate_day(&day).calories, 1050);
    }

    #[test]
    fn test_macro_source_prefers_snapshot() {
        let mut day = DayRecord::new(date("2026-02-09"));
        day.add_item(MealSection::Lunch, ConsumedItem::new("a", "Salad", Macros::new(450.0, 45.0, 10.0, 20.0)));
        assert!(matches!(day.macro_source(), MacroSource::Computed(ref items) if items.len() == 1));

        let day = day.with_snapshot(Macros::new(1800.0, 120.0, 200.0, 60.0));
        assert_eq!(day.macro_source(), MacroSource::Snapshot(Macros::new(1800.0, 120.0, 200.0, 60.0)));
    }

    #[test]
    fn test_from_persisted_builds_placeholders() {
        let record: DayMealRecord = serde_json::from_str(
            r#"{
                "created_at": "2026-02-09T08:15:00Z",
                "records": [
                    {"recipe_id": "r1", "time_of_day": "breakfast", "capacity": 1.5},
                    {"recipe_id": "r2", "time_of_day": "dinner"}
                ],
                "total_macro": {"calories": 1800, "protein": 120, "carbs": 200, "fat": 60},
                "calorie_goal": 2000
            }"#,
        )
        .unwrap();

        let mut names = DisplayNameCache::new();
        names.insert("r1", "Protein Pancakes");

        let day = DayRecord::from_persisted(&record, &names).unwrap();
        assert_eq!(day.date, date("2026-02-09"));

        let breakfast = day.section(MealSection::Breakfast);
        assert_eq!(breakfast[0].name, "Protein Pancakes");
        assert_eq!(breakfast[0].quantity, Some(1.5));
        assert_eq!(breakfast[0].macros(), Macros::zero());

        assert_eq!(day.section(MealSection::Dinner)[0].name, "r2");
        assert_eq!(day.total_macro_snapshot, Some(Macros::new(1800.0, 120.0, 200.0, 60.0)));
        assert_eq!(record.goals.calorie_goal, Some(2000.0));
    }

    #[test]
    fn test_record_date_formats() {
        assert_eq!(parse_record_date("2026-02-09").unwrap(), date("2026-02-09"));
        assert_eq!(parse_record_date("2026-02-09T23:59:59.123456").unwrap(), date("2026-02-09"));
        assert_eq!(parse_record_date("2026-02-09T10:00:00+02:00").unwrap(), date("2026-02-09"));
        assert!(matches!(parse_record_date("yesterday"), Err(RecordError::InvalidDate(_))));
    }
}
