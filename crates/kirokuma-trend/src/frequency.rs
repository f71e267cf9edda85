//! Recurring tags and ingredients.
//!
//! Mentions are accumulated across the window, converted to rounded
//! percentages of all mentions, and the top N kept. Ties keep first-seen order.

use std::collections::HashMap;

use kirokuma_core::constants::FREQUENCY_TOP_N;
use kirokuma_core::models::{FrequencyEntry, FrequencyTrend, MealRecord};

/// Tag and ingredient frequencies over `records`.
pub fn frequency_trend(records: &[&MealRecord]) -> FrequencyTrend {
    FrequencyTrend {
        tags: top_mentions(records.iter().flat_map(|r| r.tags.iter()), FREQUENCY_TOP_N),
        ingredients: top_mentions(
            records.iter().flat_map(|r| r.ingredients.iter()),
            FREQUENCY_TOP_N,
        ),
    }
}

/// Count trimmed, non-empty mentions and keep the `top_n` most frequent.
pub fn top_mentions<'a, I>(mentions: I, top_n: usize) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut total = 0u32;

    for mention in mentions {
        let name = mention.trim();
        if name.is_empty() {
            continue;
        }
        let count = counts.entry(name).or_insert_with(|| {
            order.push(name);
            0
        });
        *count += 1;
        total += 1;
    }
    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, &str, u32)> = order
        .iter()
        .enumerate()
        .map(|(first_seen, name)| (first_seen, *name, counts[name]))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(_, name, count)| FrequencyEntry {
            name: name.to_string(),
            percent: ((count as f64 / total as f64) * 100.0).round() as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kirokuma_core::models::NewMealRecord;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_and_normalizes() {
        let mentions = strings(&["japanese", "hearty", "japanese", "light"]);
        let top = top_mentions(&mentions, 5);
        assert_eq!(top[0].name, "japanese");
        assert_eq!(top[0].percent, 50);
        assert_eq!(top[1].name, "hearty");
        assert_eq!(top[1].percent, 25);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn keeps_only_top_n() {
        let mentions = strings(&["a", "b", "c", "d", "e", "f", "a"]);
        let top = top_mentions(&mentions, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "a");
        assert_eq!(top[4].name, "e");
    }

    #[test]
    fn ignores_blank_mentions() {
        let mentions = strings(&["  ", "", "rice "]);
        let top = top_mentions(&mentions, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "rice");
        assert_eq!(top[0].percent, 100);
    }

    #[test]
    fn frequency_covers_tags_and_ingredients() {
        let records: Vec<MealRecord> = ["curry", "curry", "salad"]
            .iter()
            .map(|label| {
                let input = NewMealRecord::new(*label)
                    .with_tags(&["spicy"])
                    .with_ingredients(&["rice", "onion"]);
                MealRecord::new("U1", "E1", input, None)
            })
            .collect();
        let refs: Vec<&MealRecord> = records.iter().collect();
        let trend = frequency_trend(&refs);
        assert_eq!(trend.tags.len(), 1);
        assert_eq!(trend.tags[0].percent, 100);
        assert_eq!(trend.ingredients[0].name, "rice");
        assert_eq!(trend.ingredients[0].percent, 50);
    }
}
