//! End-to-end scenarios: each exercises a whole sequence of public
//! operations rather than a single property.

use crate::map::Map;

/// Puts 16..31 inclusive-exclusive (value = key), then updates the
/// first half and `put_no_clobber`s the second half of a wider range.
#[test]
fn update_then_put_no_clobber_over_overlapping_ranges() {
    let mut map: Map<u32, u32> = Map::new();
    for k in 16..32u32 {
        map.put(k, k).unwrap();
    }
    assert_eq!(map.count(), 16);

    for k in 16..48u32 {
        let updated = map.update(k, 2 * k);
        assert_eq!(updated, (16..32).contains(&k), "update result mismatch at k={k}");
    }

    for k in 32..64u32 {
        map.put_no_clobber(k, 3 * k).unwrap();
    }

    for k in 16..32u32 {
        assert_eq!(map.get(&k), Some(&(2 * k)));
    }
    for k in 32..64u32 {
        assert_eq!(map.get(&k), Some(&(3 * k)));
    }
    assert_eq!(map.count(), 48);
}

/// Puts each string key, then immediately removes the key equal to
/// its own value — every put is immediately undone.
#[test]
fn put_then_remove_self_keyed_strings() {
    let mut map: Map<String, String> = Map::new();
    let keys = ["0", "11", "222", "3333", "44444", "555555", "66666", "7777", "888", "99", "0"];

    for k in keys {
        map.put(k.to_string(), k.to_string()).unwrap();
        let value = map.get(&k.to_string()).cloned().unwrap();
        assert!(map.remove(&value));
        assert_eq!(map.get(&k.to_string()), None);
    }
    assert_eq!(map.count(), 0);
}

/// 250,000 distinct u64 keys inserted in one random order, then
/// removed in a different random order; every remove succeeds and the
/// map ends empty.
#[test]
fn large_random_insert_then_random_removal() {
    const N: u64 = 250_000;

    // Deterministic LCG shuffles, no `rand` dependency needed for a unit test.
    let mut state = 0x9E3779B9_7F4A7C15u64;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state
    };

    let mut insert_order: Vec<u64> = (0..N).collect();
    shuffle(&mut insert_order, &mut next);
    let mut remove_order: Vec<u64> = (0..N).collect();
    shuffle(&mut remove_order, &mut next);

    let mut map: Map<u64, u64> = Map::new();
    for &k in &insert_order {
        map.put(k, k).unwrap();
    }
    assert_eq!(map.count(), N as usize);

    for &k in &remove_order {
        assert!(map.remove(&k), "remove failed for key {k}");
    }
    assert_eq!(map.count(), 0);
}

fn shuffle<T>(items: &mut [T], mut next: impl FnMut() -> u64) {
    for i in (1..items.len()).rev() {
        let j = (next() as usize) % (i + 1);
        items.swap(i, j);
    }
}

/// Union/intersection/symmetric-difference/relative-complement over two
/// overlapping alphanumeric key sets: "0123456789AB" and "456789ABCDEFGHIJ".
/// Built via an explicit digit-then-letter range rather than a raw `char`
/// range, which would sweep in ASCII punctuation between `'9'` and `'A'`.
#[test]
fn set_combinators_over_overlapping_char_ranges() {
    fn alphanumeric_range(last: char) -> Vec<char> {
        ('0'..='9').chain('A'..=last).collect()
    }

    let a: Map<char, char> = alphanumeric_range('B').into_iter().map(|c| (c, c)).collect();
    let b: Map<char, char> = alphanumeric_range('J')
        .into_iter()
        .filter(|c| *c >= '4')
        .map(|c| (c, c))
        .collect();

    let union = a.union(&b);
    let mut union_keys: Vec<char> = union.iter().map(|(k, _)| *k).collect();
    union_keys.sort_unstable();
    assert_eq!(union_keys.iter().collect::<String>(), "0123456789ABCDEFGHIJ");
    assert_eq!(union.count(), 20);

    let intersection = a.intersection(&b);
    let mut intersection_keys: Vec<char> = intersection.iter().map(|(k, _)| *k).collect();
    intersection_keys.sort_unstable();
    assert_eq!(intersection_keys.iter().collect::<String>(), "456789AB");
    assert_eq!(intersection.count(), 8);

    let sym_diff = a.symmetric_difference(&b);
    let mut sym_diff_keys: Vec<char> = sym_diff.iter().map(|(k, _)| *k).collect();
    sym_diff_keys.sort_unstable();
    assert_eq!(sym_diff_keys.iter().collect::<String>(), "0123CDEFGHIJ");
    assert_eq!(sym_diff.count(), 12);

    let complement = a.relative_complement(&b);
    let mut complement_keys: Vec<char> = complement.iter().map(|(k, _)| *k).collect();
    complement_keys.sort_unstable();
    assert_eq!(complement_keys.iter().collect::<String>(), "0123");
    assert_eq!(complement.count(), 4);
}

/// Capacity right after the 8th insert, remembered as `c0`, is the
/// capacity the table returns to after most of the entries are removed
/// and `reduce_memory` is called at intermediate points.
#[test]
fn reduce_memory_returns_to_remembered_capacity() {
    let mut map: Map<u16, u16> = Map::new();
    let mut c0 = 0;
    for (i, k) in (0..1000u16).enumerate() {
        map.put(k, k).unwrap();
        if i == 7 {
            c0 = map.capacity();
        }
    }
    assert_eq!(c0, 8);

    let mut removed = 0;
    for (i, k) in (0..1000u16).enumerate() {
        if removed >= 999 {
            break;
        }
        map.remove(&k);
        removed += 1;
        if i == 250 || i == 500 || i == 750 {
            map.reduce_memory().unwrap();
        }
    }
    map.reduce_memory().unwrap();

    assert_eq!(map.count(), 1);
    assert_eq!(map.capacity(), c0);
}

/// Inserts 64 keys, removes them all, inserts 64 different keys — no
/// error at any point and the final count matches.
#[test]
fn full_drain_then_refill_with_disjoint_keys() {
    let mut map: Map<u32, u32> = Map::new();
    for k in 0..64u32 {
        map.put(k, k).unwrap();
    }
    assert_eq!(map.count(), 64);

    for k in 0..64u32 {
        assert!(map.remove(&k));
    }
    assert_eq!(map.count(), 0);

    for k in 1000..1064u32 {
        map.put(k, k).unwrap();
    }
    assert_eq!(map.count(), 64);
    for k in 1000..1064u32 {
        assert_eq!(map.get(&k), Some(&k));
    }
}
