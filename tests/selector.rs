mod common;

use common::*;
use skimsel::prelude::*;

fn selector(triggers: &str) -> TriggerSelector<InMemorySource> {
    let params = SelectorParams::new(triggers)
        .with_tolerance(0)
        .with_histogram_prefix("skim/");
    TriggerSelector::new(sample_source(), params)
}

#[test]
fn test_queries_before_init_select_nothing() {
    init();
    let mut selector = selector("fHe");

    assert_eq!(selector.run(), None);
    assert!(selector.fetch(1_005).is_empty());
    assert!(!selector.is_selected(1_005));
    assert!(selector.counts().is_empty());
}

#[test]
fn test_init_run_resolves_offsets() {
    init();
    let mut selector = selector("fDoubleXi, fNotASelection ,fHe");

    let offsets = selector.init_run(RUN, VALID_FROM + 10).unwrap();
    assert_eq!(offsets, vec![2, -1, 0]);
    assert_eq!(selector.run(), Some(RUN));
    assert_eq!(selector.metadata().and_then(|m| m.total_analysed()), Some(10_000.0));
    assert_eq!(selector.metadata().and_then(|m| m.total_selected()), Some(61.0));
}

#[test]
fn test_init_same_run_keeps_counts() {
    init();
    let mut selector = selector("fHe");
    selector.init_run(RUN, VALID_FROM).unwrap();

    assert!(selector.is_selected(1_005));
    let offsets = selector.init_run(RUN, VALID_FROM + 1_000).unwrap();

    assert_eq!(offsets, vec![0]);
    assert_eq!(selector.counts(), &[1]);
}

#[test]
fn test_init_new_run_resets_state() {
    init();
    let mut source = sample_source();
    source.insert(RUN + 1, VALID_FROM, sample_metadata());
    let mut selector = TriggerSelector::new(source, SelectorParams::new("fHe").with_tolerance(0));

    selector.init_run(RUN, VALID_FROM).unwrap();
    assert!(selector.is_selected(1_005));
    assert_eq!(selector.counts(), &[1]);

    selector.init_run(RUN + 1, VALID_FROM).unwrap();
    assert_eq!(selector.run(), Some(RUN + 1));
    assert_eq!(selector.counts(), &[0]);
    assert!(selector.is_selected(1_005));
    assert_eq!(selector.counts(), &[1]);
}

#[test]
fn test_failed_init_leaves_no_run() {
    init();
    let mut selector = selector("fHe");
    selector.init_run(RUN, VALID_FROM).unwrap();

    let err = selector.init_run(RUN + 7, VALID_FROM);
    assert!(matches!(err, Err(SelectionError::RunNotFound(_))));
    assert_eq!(selector.run(), None);
    assert!(!selector.is_selected(1_005));

    let err = selector.init_run(RUN, VALID_FROM - 1);
    assert!(matches!(err, Err(SelectionError::NoValidMetadata { .. })));
}

#[test]
fn test_histograms_are_filled_per_record() {
    init();
    let mut selector = selector("fOmega, fHe");
    selector.init_run(RUN, VALID_FROM).unwrap();

    for bc in [1_005, 1_006, 2_002, 3_005, 3_006, 5_005] {
        selector.is_selected(bc);
    }

    let histograms = selector.histograms().unwrap();
    let analysed = &histograms.analysed_triggers;
    assert_eq!(analysed.labels(), &["fHe", "fOmega", "fDoubleXi"]);
    assert_eq!(analysed.content(0), Some(2.0));
    assert_eq!(analysed.content(1), Some(2.0));
    assert_eq!(analysed.content(2), Some(1.0));

    let toi = histograms.analysed_triggers_of_interest.as_ref().unwrap();
    assert_eq!(toi.content(0), Some(2.0));
    assert_eq!(toi.content(1), Some(1.0));

    let names: Vec<String> = histograms.named().into_iter().map(|(name, _)| name).collect();
    assert!(names.contains(&format!("{}/skim/Scalers", RUN)));
    assert!(!names.iter().any(|n| n.ends_with("InspectedTVX")));
}

#[test]
fn test_configured_tolerance_is_used() {
    init();
    let mut selector = TriggerSelector::new(sample_source(), SelectorParams::new("fDoubleXi").with_tolerance(50));
    selector.init_run(RUN, VALID_FROM).unwrap();

    assert!(selector.is_selected(4_960));
    assert!(!selector.is_selected_with_tolerance(5_100, 50));
    assert!(selector.is_selected_with_tolerance(5_100, 90));
}
