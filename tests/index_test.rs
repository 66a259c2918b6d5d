use labframe::Index;

#[test]
fn test_index_from_range() {
    let idx = Index::<usize>::from_range(0..5);
    assert_eq!(idx.len(), 5);
    assert_eq!(idx.get_locs(&3), Some(&[3usize][..]));
    assert_eq!(idx.get_value(4), Some(&4));
    assert!(!idx.has_duplicates());
}

#[test]
fn test_index_lookup() {
    let idx = Index::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

    assert!(idx.contains(&"b".to_string()));
    assert!(!idx.contains(&"z".to_string()));
    assert_eq!(idx.get_locs(&"c".to_string()), Some(&[2usize][..]));
    assert_eq!(idx.get_locs(&"z".to_string()), None);
}

#[test]
fn test_index_duplicates() {
    let idx = Index::new(vec![
        "a".to_string(),
        "b".to_string(),
        "a".to_string(),
        "a".to_string(),
    ]);

    assert!(idx.has_duplicates());
    // All positions of a duplicated label, in row order
    assert_eq!(idx.get_locs(&"a".to_string()), Some(&[0usize, 2, 3][..]));
}

#[test]
fn test_index_argsort_is_stable() {
    let idx = Index::new(vec![3, 1, 2, 1]);

    // Equal labels keep their original relative order
    assert_eq!(idx.argsort(), vec![1, 3, 2, 0]);
}

#[test]
fn test_index_name() {
    let mut idx = Index::with_name(vec![1, 2, 3], Some("date".to_string()));
    assert_eq!(idx.name(), Some(&"date".to_string()));

    let renamed = idx.rename(Some("when".to_string()));
    assert_eq!(renamed.name(), Some(&"when".to_string()));
    assert_eq!(idx.name(), Some(&"date".to_string()));

    idx.set_name(None);
    assert_eq!(idx.name(), None);
}

#[test]
fn test_empty_index() {
    let idx: Index<usize> = Index::new(vec![]);
    assert!(idx.is_empty());
    assert_eq!(idx.len(), 0);
    assert_eq!(idx.argsort(), Vec::<usize>::new());
}
