//! Output formatting utilities

use colored::Colorize;
use recblend::recommend::{Dataset, Recommendation};
use serde::Serialize;

/// JSON body of `recommend --json`
#[derive(Serialize)]
struct RecommendationsResponse<'a> {
    recommendations: &'a [Recommendation],
}

/// Serialize recommendations as `{"recommendations": [...]}`.
pub(crate) fn recommendations_json(recs: &[Recommendation]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RecommendationsResponse {
        recommendations: recs,
    })
}

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// Print a ranked list with titles looked up in `data`.
pub(crate) fn recommendations_table(user: &str, recs: &[Recommendation], data: &Dataset) {
    section(&format!("Recommendations for {user}"));
    if recs.is_empty() {
        println!("  {}", "nothing left to recommend".dimmed());
        return;
    }
    for (position, rec) in recs.iter().enumerate() {
        println!("{}", table_row(position + 1, rec, data));
    }
}

fn table_row(position: usize, rec: &Recommendation, data: &Dataset) -> String {
    let (title, category) = data.item(&rec.item_id).map_or((rec.item_id.as_str(), None), |item| {
        (item.title.as_str(), item.category.as_deref())
    });
    let category = category.map(|c| format!(" [{c}]")).unwrap_or_default();
    format!(
        "  {position:>2}. {title} ({}){category}  {:.3}",
        rec.item_id, rec.score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use recblend::recommend::Item;

    fn rec(item_id: &str, score: f64) -> Recommendation {
        Recommendation {
            item_id: item_id.to_string(),
            score,
        }
    }

    #[test]
    fn test_json_shape() {
        let text = recommendations_json(&[rec("m07", 1.25)]).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["recommendations"][0]["itemId"], "m07");
        assert_eq!(value["recommendations"][0]["score"], 1.25);
    }

    #[test]
    fn test_json_empty_list() {
        let text = recommendations_json(&[]).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_table_row_uses_title_and_category() {
        let data = Dataset::new(
            vec![],
            vec![Item::new("m01", "The Matrix").with_category("Sci-Fi")],
            vec![],
        );
        let row = table_row(1, &rec("m01", 3.14159), &data);
        assert!(row.contains("The Matrix (m01) [Sci-Fi]"));
        assert!(row.ends_with("3.142"));
    }

    #[test]
    fn test_table_row_unknown_item_falls_back_to_id() {
        let row = table_row(2, &rec("ghost", 0.5), &Dataset::default());
        assert!(row.contains("ghost (ghost)"));
    }
}
