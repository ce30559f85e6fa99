use std::collections::{BTreeMap, BTreeSet};

use crate::models::{EpisodeItem, MediaItem, SeriesCount, SeriesKey};

use super::title::normalize_title;

/// Distinct parent series keys, in key order. Lets the caller resolve each series once.
pub fn distinct_series_keys(episodes: &[EpisodeItem]) -> Vec<SeriesKey> {
    episodes
        .iter()
        .map(|ep| ep.series_key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Count new episodes per parent series.
///
/// Output has one entry per distinct series display title, sorted by that title.
/// `resolve_series` returns `None` for a key it cannot resolve; those episodes are
/// dropped with a warning.
pub fn aggregate<F>(episodes: &[EpisodeItem], mut resolve_series: F) -> Vec<SeriesCount>
where
    F: FnMut(&SeriesKey) -> Option<MediaItem>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut titles: BTreeMap<&SeriesKey, Option<String>> = BTreeMap::new();

    for episode in episodes {
        let display = titles.entry(&episode.series_key).or_insert_with(|| {
            resolve_series(&episode.series_key).map(|series| normalize_title(&series.title, series.year))
        });

        match display {
            Some(title) => *counts.entry(title.clone()).or_default() += 1,
            None => tracing::warn!(
                "Could not resolve series {} for episode {:?}",
                episode.series_key,
                episode.item.title
            ),
        }
    }

    counts
        .into_iter()
        .map(|(display_title, episode_count)| SeriesCount {
            display_title,
            episode_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn library() -> HashMap<SeriesKey, MediaItem> {
        let mut map = HashMap::new();
        map.insert(SeriesKey::from("10"), MediaItem::show("Foo", 2019));
        map.insert(SeriesKey::from("20"), MediaItem::show("Bar", 2020));
        map.insert(SeriesKey::from("30"), MediaItem::show("The Flash (2014)", 2014));
        map
    }

    fn episodes(keys: &[&str]) -> Vec<EpisodeItem> {
        keys.iter()
            .enumerate()
            .map(|(i, key)| EpisodeItem::new(format!("Episode {}", i + 1), Some(2021), *key))
            .collect()
    }

    #[test]
    fn counts_and_sorts_by_title() {
        let lib = library();
        let result = aggregate(&episodes(&["10", "20", "10"]), |key| lib.get(key).cloned());
        assert_eq!(
            result,
            vec![
                SeriesCount {
                    display_title: "Bar (2020)".to_string(),
                    episode_count: 1
                },
                SeriesCount {
                    display_title: "Foo (2019)".to_string(),
                    episode_count: 2
                },
            ]
        );
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let lib = library();
        let orders = [
            ["10", "20", "30", "10"],
            ["30", "10", "10", "20"],
            ["10", "10", "20", "30"],
            ["20", "30", "10", "10"],
        ];
        let first = aggregate(&episodes(&orders[0]), |key| lib.get(key).cloned());
        for order in &orders[1..] {
            assert_eq!(aggregate(&episodes(order), |key| lib.get(key).cloned()), first);
        }
    }

    #[test]
    fn resolves_each_series_once() {
        let lib = library();
        let mut calls = 0;
        let result = aggregate(&episodes(&["10", "10", "10", "30"]), |key| {
            calls += 1;
            lib.get(key).cloned()
        });
        assert_eq!(calls, 2);
        assert_eq!(result[1].display_title, "The Flash (2014)");
    }

    #[test]
    fn empty_input_yields_nothing() {
        let result = aggregate(&[], |_| -> Option<MediaItem> { unreachable!() });
        assert!(result.is_empty());
    }

    #[test]
    fn unresolved_series_are_dropped() {
        let lib = library();
        let result = aggregate(&episodes(&["10", "99"]), |key| lib.get(key).cloned());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].episode_count, 1);
    }

    #[test]
    fn distinct_keys_are_deduplicated() {
        let keys = distinct_series_keys(&episodes(&["20", "10", "20"]));
        assert_eq!(keys, vec![SeriesKey::from("10"), SeriesKey::from("20")]);
    }
}
