use labframe::{Index, Series};

#[test]
fn test_series_creation() {
    let series = Series::new(vec![1, 2, 3, 4, 5], Some("test".to_string()));
    assert_eq!(series.len(), 5);
    assert_eq!(series.name(), Some(&"test".to_string()));
    assert_eq!(series.get(0), Some(&1));
    assert_eq!(series.get(4), Some(&5));
    assert_eq!(series.get(5), None);
}

#[test]
fn test_series_numeric_operations() {
    let series = Series::new(vec![10, 20, 30, 40, 50], Some("numbers".to_string()));

    assert_eq!(series.sum(), 150);
    assert_eq!(series.mean().unwrap(), 30);
    assert_eq!(series.min().unwrap(), 10);
    assert_eq!(series.max().unwrap(), 50);
}

#[test]
fn test_empty_series() {
    let empty_series: Series<i32> = Series::new(vec![], Some("empty".to_string()));

    assert_eq!(empty_series.len(), 0);
    assert!(empty_series.is_empty());

    // Sum of an empty series is the zero value
    assert_eq!(empty_series.sum(), 0);

    // Statistics over an empty series are errors
    assert!(empty_series.mean().is_err());
    assert!(empty_series.min().is_err());
    assert!(empty_series.max().is_err());
}

fn price_series() -> Series<f64, String> {
    let dates: Vec<String> = [
        "2020-01-02",
        "2020-01-03",
        "2020-01-06",
        "2020-01-07",
        "2020-01-08",
        "2020-01-09",
        "2020-01-10",
        "2020-01-13",
        "2020-01-14",
        "2020-01-15",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let prices = vec![7.16, 7.19, 7.00, 7.10, 6.86, 6.95, 7.00, 7.02, 7.11, 7.04];

    Series::with_index(prices, Index::new(dates), Some("prices".to_string())).unwrap()
}

#[test]
fn test_series_label_lookup() {
    let ser = price_series();

    assert_eq!(ser.get_label(&"2020-01-02".to_string()).unwrap(), vec![&7.16]);
    assert!(ser.get_label(&"1999-01-01".to_string()).is_err());
}

#[test]
fn test_series_slice() {
    let ser = price_series();

    let prcs = ser.slice(0..3);
    assert_eq!(prcs.len(), 3);
    assert_eq!(prcs.values(), &[7.16, 7.19, 7.00]);
    assert_eq!(prcs.index().values()[2], "2020-01-06".to_string());

    // Out-of-bounds ranges clamp instead of panicking
    assert_eq!(ser.slice(8..20).len(), 2);
    assert_eq!(ser.head(3).len(), 3);
}

#[test]
fn test_series_select() {
    let ser = price_series();

    // Query order does not matter; rows come back in source order
    let sub = ser
        .select(&["2020-01-06".to_string(), "2020-01-02".to_string()])
        .unwrap();
    assert_eq!(sub.values(), &[7.16, 7.00]);

    assert!(ser.select(&["2020-02-01".to_string()]).is_err());
}

#[test]
fn test_series_set_index() {
    let ser = price_series();
    let values_before = ser.values().to_vec();

    // Replace the date labels with integers, including odd ones
    let ser = ser.set_index(vec![0, 1, 2, 3, -4, 5, 6, 7, 8, 1000]).unwrap();

    // Values and their order are untouched
    assert_eq!(ser.values(), values_before.as_slice());

    // Lookup resolves against labels, not positions
    assert_eq!(ser.get_label(&1000).unwrap(), vec![&7.04]);
    assert_eq!(ser.get_label(&-4).unwrap(), vec![&6.86]);
    assert!(ser.get_label(&9).is_err());
}

#[test]
fn test_series_set_index_length_mismatch() {
    let ser = Series::new(vec![1, 2, 3], None);
    assert!(ser.set_index(vec!["a".to_string()]).is_err());
}

#[test]
fn test_series_duplicate_labels() {
    let index = Index::new(vec!["x".to_string(), "y".to_string(), "x".to_string()]);
    let ser = Series::with_index(vec![1, 2, 3], index, None).unwrap();

    // A duplicated label yields every matching value, in row order
    assert_eq!(ser.get_label(&"x".to_string()).unwrap(), vec![&1, &3]);

    let sub = ser.select(&["x".to_string()]).unwrap();
    assert_eq!(sub.values(), &[1, 3]);
    assert_eq!(sub.len(), 2);
}

#[test]
fn test_series_with_index_length_mismatch() {
    let index = Index::new(vec!["a".to_string(), "b".to_string()]);
    assert!(Series::with_index(vec![1, 2, 3], index, None).is_err());
}
