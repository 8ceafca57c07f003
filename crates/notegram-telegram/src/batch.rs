// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partitioning of media items into Bot API calls.

use notegram_core::types::{DeliveryUnit, MediaItem};

/// Maximum number of items `sendMediaGroup` accepts in one call.
pub const MAX_GROUP_SIZE: usize = 10;

/// Splits `items` into delivery units.
///
/// - no items: no units (the caller sends a text message instead)
/// - one item: a single [`DeliveryUnit::Single`] carrying the caption
/// - more: consecutive [`DeliveryUnit::Group`]s of at most
///   [`MAX_GROUP_SIZE`] items in original order, caption on the first only
pub fn batch(items: Vec<MediaItem>, caption: Option<String>) -> Vec<DeliveryUnit> {
    let mut caption = caption;

    if items.len() == 1 {
        return items
            .into_iter()
            .map(|item| DeliveryUnit::Single {
                item,
                caption: caption.take(),
            })
            .collect();
    }

    let mut units = Vec::with_capacity(items.len().div_ceil(MAX_GROUP_SIZE));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        let group: Vec<MediaItem> = iter.by_ref().take(MAX_GROUP_SIZE).collect();
        units.push(DeliveryUnit::Group {
            items: group,
            caption: caption.take(),
        });
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegram_core::types::MediaKind;

    fn items(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem {
                source: format!("m{i}.png"),
                name: format!("m{i}.png"),
                bytes: vec![i as u8],
                kind: MediaKind::Photo,
            })
            .collect()
    }

    fn sizes(units: &[DeliveryUnit]) -> Vec<usize> {
        units.iter().map(DeliveryUnit::len).collect()
    }

    #[test]
    fn empty_input_yields_no_units() {
        assert!(batch(Vec::new(), Some("cap".into())).is_empty());
    }

    #[test]
    fn single_item_is_a_single_unit() {
        let units = batch(items(1), Some("cap".into()));
        assert_eq!(units.len(), 1);
        assert!(matches!(&units[0], DeliveryUnit::Single { caption: Some(c), .. } if c == "cap"));
    }

    #[test]
    fn five_items_make_one_group() {
        let units = batch(items(5), Some("cap".into()));
        assert_eq!(sizes(&units), [5]);
        assert!(matches!(&units[0], DeliveryUnit::Group { .. }));
        assert_eq!(units[0].caption(), Some("cap"));
    }

    #[test]
    fn fifteen_items_split_ten_and_five() {
        let units = batch(items(15), Some("cap".into()));
        assert_eq!(sizes(&units), [10, 5]);
        assert_eq!(units[0].caption(), Some("cap"));
        assert_eq!(units[1].caption(), None);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        assert_eq!(sizes(&batch(items(20), None)), [10, 10]);
    }

    #[test]
    fn order_and_count_are_preserved() {
        let units = batch(items(23), None);
        let names: Vec<String> = units
            .iter()
            .flat_map(|u| u.items().iter().map(|i| i.name.clone()))
            .collect();
        let expected: Vec<String> = (0..23).map(|i| format!("m{i}.png")).collect();
        assert_eq!(names, expected);
        assert_eq!(sizes(&units), [10, 10, 3]);
    }

    #[test]
    fn no_caption_anywhere_when_none_given() {
        assert!(batch(items(12), None).iter().all(|u| u.caption().is_none()));
    }
}
