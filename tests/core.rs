use summit_stamp::{DEFAULT_CAPACITY, ParseTokenError, VisitedSet, token};

#[test]
fn test_empty() {
    let visited = VisitedSet::empty(DEFAULT_CAPACITY);
    assert_eq!(visited.count(), 0);
    assert!(visited.is_empty());
    assert_eq!(visited.capacity(), 112);
    assert_eq!(visited.serialize(), "");
    assert_eq!(visited, VisitedSet::default());
}

#[test]
fn test_share_scenario() {
    let mut visited = VisitedSet::empty(112);
    assert_eq!(visited.count(), 0);

    visited.mark(1);
    visited.mark(50);
    visited.mark(112);
    assert_eq!(visited.count(), 3);
    assert!(visited.is_marked(1));
    assert!(!visited.is_marked(2));

    let t = visited.serialize();
    let restored = VisitedSet::parse(Some(&t), 112);
    assert_eq!(restored.count(), 3);
    assert!(restored.is_marked(1));
    assert!(restored.is_marked(50));
    assert!(restored.is_marked(112));

    visited.unmark(50);
    let t2 = visited.serialize();
    assert_ne!(t, t2);
    assert_eq!(VisitedSet::parse(Some(&t2), 112).count(), 2);
}

#[test]
fn test_known_tokens() {
    let mut visited = VisitedSet::empty(112);
    visited.mark(1);
    assert_eq!(visited.serialize(), "1");

    visited.mark(50);
    // id 50 is bit 11 of the second group
    assert_eq!(visited.serialize(), "1.1kw");

    visited.mark(112);
    assert_eq!(visited.serialize(), "1.1kw.fs8wfsw");
}

#[test]
fn test_mark_is_idempotent() {
    let mut visited = VisitedSet::empty(112);
    assert!(visited.mark(30));
    let once = visited.serialize();
    assert!(!visited.mark(30));
    assert_eq!(visited.serialize(), once);
    assert_eq!(visited.count(), 1);

    assert!(visited.unmark(30));
    assert!(!visited.unmark(30));
    assert_eq!(visited.serialize(), "");
}

#[test]
fn test_order_independent_token() {
    let mut a = VisitedSet::empty(112);
    let mut b = VisitedSet::empty(112);
    for id in [5, 90, 38, 39, 76, 77] {
        a.mark(id);
    }
    for id in [77, 76, 39, 38, 90, 5, 64] {
        b.mark(id);
    }
    b.unmark(64);

    assert_eq!(a, b);
    assert_eq!(a.serialize(), b.serialize());
}

#[test]
fn test_out_of_range_ids() {
    let mut visited = VisitedSet::empty(112);
    visited.mark(3);
    let before = visited.serialize();

    assert!(!visited.mark(0));
    assert!(!visited.mark(113));
    assert!(!visited.unmark(0));
    assert!(!visited.is_marked(0));
    assert!(!visited.is_marked(113));

    assert_eq!(visited.count(), 1);
    assert_eq!(visited.serialize(), before);
}

#[test]
fn test_tolerant_parse() {
    for token in [None, Some(""), Some("!!!garbage!!!"), Some("   ")] {
        let visited = VisitedSet::parse(token, 112);
        assert_eq!(visited.count(), 0, "token: {token:?}");
        assert_eq!(visited.capacity(), 112);
    }
}

#[test]
fn test_partially_corrupted_token_is_discarded() {
    // first group is valid, the rest is not
    for token in ["1.zz!", "1..2", "1.2.3.4", ".1", "1.", "1.0.zzzzzzzz"] {
        assert!(
            VisitedSet::try_parse(token, 112).is_err(),
            "token {token:?} should be rejected"
        );
        assert!(VisitedSet::parse(Some(token), 112).is_empty());
    }
}

#[test]
fn test_try_parse_errors() {
    assert_eq!(
        VisitedSet::try_parse("ab-c", 112),
        Err(ParseTokenError::InvalidDigit { ch: '-', pos: 2 })
    );
    assert_eq!(
        VisitedSet::try_parse("1.é", 112),
        Err(ParseTokenError::InvalidDigit { ch: 'é', pos: 2 })
    );
    assert_eq!(
        VisitedSet::try_parse("1.", 112),
        Err(ParseTokenError::EmptyGroup { group: 1 })
    );
    assert_eq!(
        VisitedSet::try_parse("1.2", 38),
        Err(ParseTokenError::TooManyGroups { found: 2, max: 1 })
    );
    assert_eq!(
        VisitedSet::try_parse("3i9z7if4", 112),
        Err(ParseTokenError::GroupOverflow { group: 0 })
    );
}

#[test]
fn test_leading_zeros_accepted() {
    let visited = VisitedSet::try_parse("0001.00", 112).unwrap();
    assert!(visited.is_marked(1));
    assert_eq!(visited.count(), 1);
    // re-serializing normalizes the token
    assert_eq!(visited.serialize(), "1");
}

#[test]
fn test_full_set() {
    let mut visited = VisitedSet::empty(112);
    visited.extend(1..=112);
    assert_eq!(visited.count(), 112);

    let t = visited.serialize();
    assert_eq!(t, "3i9z7if3.3i9z7if3.vkhsvlr");
    assert_eq!(t.len(), 25);
    assert!(
        t.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == token::SEPARATOR)
    );

    let restored = VisitedSet::parse(Some(&t), 112);
    assert_eq!(restored, visited);
}

#[test]
fn test_shorter_than_id_list() {
    let mut visited = VisitedSet::empty(112);
    let ids: Vec<usize> = (1..=112).step_by(3).collect();
    visited.extend(&ids);

    let naive = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    assert!(visited.serialize().len() * 4 < naive.len());
}

#[test]
fn test_iter_and_into_iter() {
    let mut visited = VisitedSet::empty(112);
    visited.extend([112, 1, 64, 65]);

    let ids: Vec<_> = visited.iter().collect();
    assert_eq!(ids, [1, 64, 65, 112]);
    assert_eq!(visited.iter().len(), 4);

    let mut sum = 0;
    for id in &visited {
        sum += id;
    }
    assert_eq!(sum, 242);
}

#[test]
fn test_token_from_other_capacity_is_rejected() {
    let mut big = VisitedSet::empty(200);
    big.mark(150);
    assert!(VisitedSet::parse(Some(&big.serialize()), 112).is_empty());
}

#[test]
fn test_hash_matches_eq() {
    use std::collections::HashSet;

    let mut a = VisitedSet::empty(112);
    a.mark(9);
    let b = VisitedSet::parse(Some(&a.serialize()), 112);

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}
