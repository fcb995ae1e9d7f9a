//! Category-balanced series selection for the dense grid view.
//!
//! The grid shows a fixed number of cells, so the catalog has to be cut
//! down in a way that keeps every category represented instead of letting
//! the most popular category fill the screen.

use std::collections::{HashMap, HashSet};

use crate::domain::SeriesMeta;

/// Number of series the terminal grid displays (three 16-row panels).
pub const GRID_SERIES_TARGET: usize = 48;

/// Pick a category-balanced subset of `catalog` for dense display.
///
/// Every category contributes up to `floor(target / k)` of its leading
/// entries (`k` = number of distinct categories); the result is then padded
/// with the remaining entries in catalog order, one at a time, until
/// `target` is reached or the catalog is exhausted. The catalog is expected
/// most-popular-first, so each group's head and the padding are its most
/// popular members.
///
/// The output keeps this grouped-then-padded order rather than global
/// popularity order, which is what the grid historically rendered. Result
/// length is `min(target, catalog.len())` with no duplicate ids.
pub fn sample_evenly(catalog: &[SeriesMeta], target: usize) -> Vec<SeriesMeta> {
    if catalog.is_empty() || target == 0 {
        return Vec::new();
    }

    // One pass builds the category index, in first-appearance order.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&SeriesMeta>> = HashMap::new();
    for meta in catalog {
        let members = groups.entry(meta.category.as_str()).or_insert_with(|| {
            order.push(meta.category.as_str());
            Vec::new()
        });
        members.push(meta);
    }

    let quota = target / order.len();
    let mut picked: Vec<SeriesMeta> = Vec::with_capacity(target);
    let mut picked_ids: HashSet<&str> = HashSet::with_capacity(target);

    for category in &order {
        for meta in groups[*category].iter().take(quota) {
            picked.push((*meta).clone());
            picked_ids.insert(meta.id.as_str());
        }
    }

    // Quota flooring and small groups can leave slots open; fill them with
    // not-yet-selected entries in catalog order.
    if picked.len() < target {
        for meta in catalog {
            if picked.len() >= target {
                break;
            }
            if picked_ids.insert(meta.id.as_str()) {
                picked.push(meta.clone());
            }
        }
    }

    picked.truncate(target);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, category: &str, popularity: i64) -> SeriesMeta {
        SeriesMeta {
            id: id.to_string(),
            title: format!("{id} title"),
            units: "Percent".to_string(),
            frequency: "Monthly".to_string(),
            category: category.to_string(),
            popularity,
            last_updated: None,
        }
    }

    /// Catalog in popularity order: `sizes` entries per category.
    fn catalog(sizes: &[(&str, usize)]) -> Vec<SeriesMeta> {
        let mut out = Vec::new();
        let mut rank = 10_000;
        for &(category, size) in sizes {
            for i in 0..size {
                out.push(meta(&format!("{category}{i}"), category, rank));
                rank -= 1;
            }
        }
        out
    }

    fn count_for<'a>(picked: &'a [SeriesMeta], category: &str) -> usize {
        picked.iter().filter(|m| m.category == category).count()
    }

    #[test]
    fn empty_catalog_and_zero_target() {
        assert!(sample_evenly(&[], 48).is_empty());
        assert!(sample_evenly(&catalog(&[("a", 3)]), 0).is_empty());
    }

    #[test]
    fn length_is_min_of_target_and_catalog() {
        let small = catalog(&[("a", 5), ("b", 7)]);
        assert_eq!(sample_evenly(&small, 48).len(), 12);

        let big = catalog(&[("a", 40), ("b", 40)]);
        assert_eq!(sample_evenly(&big, 48).len(), 48);
    }

    #[test]
    fn no_duplicate_ids() {
        let cat = catalog(&[("a", 10), ("b", 3), ("c", 40)]);
        let picked = sample_evenly(&cat, 48);
        let mut ids: Vec<&str> = picked.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), picked.len());
    }

    #[test]
    fn quota_caps_each_category_before_padding() {
        // 4 categories of 30, target 48: quota 12, no padding needed.
        let cat = catalog(&[("a", 30), ("b", 30), ("c", 30), ("d", 30)]);
        let picked = sample_evenly(&cat, 48);
        assert_eq!(picked.len(), 48);
        for category in ["a", "b", "c", "d"] {
            assert_eq!(count_for(&picked, category), 12);
        }
    }

    #[test]
    fn quota_takes_each_groups_leading_members() {
        let cat = catalog(&[("a", 30), ("b", 30)]);
        let picked = sample_evenly(&cat, 4);
        let ids: Vec<&str> = picked.iter().map(|m| m.id.as_str()).collect();
        // Two most popular from each group, grouped order.
        assert_eq!(ids, ["a0", "a1", "b0", "b1"]);
    }

    #[test]
    fn uneven_categories_pad_from_catalog_order() {
        // Sizes {10, 3, 40}: quota 16 takes 10 + 3 + 16 = 29, padding fills
        // the rest from the only category with leftovers.
        let cat = catalog(&[("a", 10), ("b", 3), ("c", 40)]);
        let picked = sample_evenly(&cat, 48);

        assert_eq!(picked.len(), 48);
        assert_eq!(count_for(&picked, "a"), 10);
        assert_eq!(count_for(&picked, "b"), 3);
        assert_eq!(count_for(&picked, "c"), 35);

        // Padding appended the highest-popularity unselected entries.
        assert_eq!(picked[29].id, "c16");
        assert_eq!(picked[47].id, "c34");
    }

    #[test]
    fn whole_catalog_keeps_grouped_then_padded_order() {
        // Interleaved popularity across categories; the result regroups by
        // category rather than restoring global popularity order.
        let cat = vec![
            meta("a0", "a", 100),
            meta("b0", "b", 99),
            meta("a1", "a", 98),
            meta("b1", "b", 97),
        ];
        let picked = sample_evenly(&cat, 48);
        let ids: Vec<&str> = picked.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a0", "a1", "b0", "b1"]);
    }

    #[test]
    fn more_categories_than_target_fills_by_catalog_order() {
        // Quota floors to zero; everything comes from the padding scan.
        let sizes: Vec<(String, usize)> = (0..6).map(|i| (format!("c{i}"), 2)).collect();
        let sizes_ref: Vec<(&str, usize)> = sizes.iter().map(|(c, n)| (c.as_str(), *n)).collect();
        let cat = catalog(&sizes_ref);
        let picked = sample_evenly(&cat, 4);
        let ids: Vec<&str> = picked.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["c00", "c01", "c10", "c11"]);
    }
}
