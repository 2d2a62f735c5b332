use foodrepo::{
    BatchReport,
    BinningError,
    CandidateRow,
    DetectionMode,
    FetchError,
    FoodRepoError,
    PeakPoint,
    PeakSource,
    SampleCatalog,
    SessionState,
    WarningKind,
    run_batch,
    run_batch_with,
};
use std::cell::RefCell;
use std::collections::HashMap;

const CATALOG_CSV: &str = "fid,nameJa,catJa\n\
    F001,Soy sauce,Seasoning\n\
    F002,Green tea,Beverage\n\
    F003,Miso,Seasoning\n";

/// Serves canned responses and records every request it receives.
struct ScriptedSource {
    responses: HashMap<String, Result<Vec<PeakPoint>, FetchError>>,
    calls: RefCell<Vec<(String, DetectionMode)>>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn with(mut self, id: &str, response: Result<Vec<PeakPoint>, FetchError>) -> Self {
        self.responses.insert(id.to_string(), response);
        self
    }
}

impl PeakSource for ScriptedSource {
    fn fetch_peaks(
        &self,
        sample_id: &str,
        mode: DetectionMode,
    ) -> Result<Vec<PeakPoint>, FetchError> {
        self.calls.borrow_mut().push((sample_id.to_string(), mode));
        self.responses
            .get(sample_id)
            .cloned()
            .unwrap_or(Err(FetchError::RemoteFetchFailed { status_code: 404 }))
    }
}

fn peaks(pairs: &[(f64, f64)]) -> Vec<PeakPoint> {
    pairs
        .iter()
        .map(|&(rt, i)| PeakPoint::try_new(rt, i).unwrap())
        .collect()
}

fn catalog() -> SampleCatalog {
    SampleCatalog::from_reader(CATALOG_CSV.as_bytes(), "sample_list.csv".into()).unwrap()
}

fn select_all(state: &mut SessionState, catalog: &SampleCatalog) {
    state.commit_selection(
        catalog
            .samples()
            .iter()
            .map(|s| CandidateRow::new(s.id.clone(), true)),
    );
}

#[test]
fn test_one_failed_fetch_does_not_abort_batch() {
    let catalog = catalog();
    let mut state = SessionState::default();
    select_all(&mut state, &catalog);

    let source = ScriptedSource::new()
        .with("F001", Ok(peaks(&[(1.0, 10.0), (25.0, 5.0)])))
        .with(
            "F002",
            Err(FetchError::RemoteFetchFailed { status_code: 500 }),
        )
        .with("F003", Ok(peaks(&[(3.0, 1.0), (85.0, 2.0)])));

    let report = run_batch(&source, &catalog, state.selection(), state.mode(), 0.2).unwrap();

    assert_eq!(report.profiles.len(), 2);
    assert_eq!(report.warnings.len(), 1);
    let warning = &report.warnings[0];
    assert_eq!(warning.sample_id, "F002");
    assert_eq!(
        warning.kind,
        WarningKind::Fetch(FetchError::RemoteFetchFailed { status_code: 500 })
    );
    assert!(warning.to_string().contains("F002"));
    assert!(warning.to_string().contains("500"));
    assert_eq!(source.calls.borrow().len(), 3);
}

#[test]
fn test_profiles_follow_catalog_order_and_labels() {
    let catalog = catalog();
    let mut state = SessionState::default();
    state.commit_selection([
        CandidateRow::new("F003", true),
        CandidateRow::new("F001", true),
    ]);
    let source = ScriptedSource::new()
        .with("F001", Ok(peaks(&[(1.0, 1.0)])))
        .with("F003", Ok(peaks(&[(2.0, 1.0)])));

    let report = run_batch(&source, &catalog, state.selection(), state.mode(), 0.5).unwrap();
    let labels: Vec<&str> = report.profiles.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Soy sauce (ID: F001)", "Miso (ID: F003)"]);
}

#[test]
fn test_callback_sees_every_sample_in_catalog_order() {
    let catalog = catalog();
    let mut state = SessionState::default();
    state.commit_selection([
        CandidateRow::new("F003", true),
        CandidateRow::new("F999", true),
        CandidateRow::new("F001", true),
        CandidateRow::new("F002", true),
    ]);
    let source = ScriptedSource::new()
        .with("F001", Ok(peaks(&[(1.0, 1.0)])))
        .with("F003", Ok(peaks(&[(2.0, 1.0)])));

    let mut seen = Vec::new();
    let report = run_batch_with(
        &source,
        &catalog,
        state.selection(),
        state.mode(),
        0.5,
        |id| seen.push(id.to_string()),
    )
    .unwrap();

    // Failed samples are reported too; unknown ids come last.
    assert_eq!(seen, vec!["F001", "F002", "F003", "F999"]);
    assert_eq!(report.profiles.len(), 2);
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn test_callback_not_called_for_empty_selection() {
    let catalog = catalog();
    let state = SessionState::default();
    let source = ScriptedSource::new();

    let mut count = 0;
    let res = run_batch_with(
        &source,
        &catalog,
        state.selection(),
        state.mode(),
        0.5,
        |_| count += 1,
    );
    assert!(matches!(res, Err(FoodRepoError::EmptySelection)));
    assert_eq!(count, 0);
}

#[test]
fn test_mode_is_forwarded_to_source() {
    let catalog = catalog();
    let mut state = SessionState::new(DetectionMode::Neg);
    state.commit_selection([CandidateRow::new("F002", true)]);
    let source = ScriptedSource::new().with("F002", Ok(peaks(&[(1.0, 1.0)])));

    run_batch(&source, &catalog, state.selection(), state.mode(), 0.2).unwrap();
    assert_eq!(
        source.calls.borrow().as_slice(),
        &[("F002".to_string(), DetectionMode::Neg)]
    );
}

#[test]
fn test_empty_selection_is_rejected_before_fetching() {
    let catalog = catalog();
    let state = SessionState::default();
    let source = ScriptedSource::new();

    let res = run_batch(&source, &catalog, state.selection(), state.mode(), 0.2);
    assert!(matches!(res, Err(FoodRepoError::EmptySelection)));
    assert!(source.calls.borrow().is_empty());
}

#[test]
fn test_malformed_and_empty_responses_become_warnings() {
    let catalog = catalog();
    let mut state = SessionState::default();
    select_all(&mut state, &catalog);
    let source = ScriptedSource::new()
        .with(
            "F001",
            Err(FetchError::MalformedResponse("missing field `rt`".into())),
        )
        .with("F002", Ok(Vec::new()))
        .with("F003", Ok(peaks(&[(10.0, 4.0)])));

    let report = run_batch(&source, &catalog, state.selection(), state.mode(), 0.2).unwrap();
    assert_eq!(report.profiles.len(), 1);
    assert_eq!(report.profiles[0].sample_id, "F003");
    let kinds: Vec<&WarningKind> = report.warnings.iter().map(|w| &w.kind).collect();
    assert!(matches!(
        kinds[0],
        WarningKind::Fetch(FetchError::MalformedResponse(_))
    ));
    assert_eq!(kinds[1], &WarningKind::EmptyPeakList);
    assert!(report.warnings.iter().all(|w| w.is_skip()));
}

#[test]
fn test_unbinnable_range_skips_only_that_sample() {
    let catalog = catalog();
    let mut state = SessionState::default();
    select_all(&mut state, &catalog);
    let source = ScriptedSource::new()
        .with("F001", Ok(peaks(&[(1.0, 10.0), (25.0, 5.0)])))
        .with("F002", Ok(peaks(&[(0.0, 1.0), (1e300, 1.0)])))
        .with("F003", Ok(peaks(&[(3.0, 1.0), (85.0, 2.0)])));

    let report = run_batch(&source, &catalog, state.selection(), state.mode(), 0.05).unwrap();

    let ids: Vec<&str> = report.profiles.iter().map(|p| p.sample_id.as_str()).collect();
    assert_eq!(ids, vec!["F001", "F003"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].sample_id, "F002");
    assert!(matches!(
        report.warnings[0].kind,
        WarningKind::Binning(BinningError::TooManyBins { .. })
    ));
    assert!(report.warnings[0].is_skip());
}

#[test]
fn test_zero_intensity_sample_is_kept_with_warning() {
    let catalog = catalog();
    let mut state = SessionState::default();
    state.commit_selection([CandidateRow::new("F001", true)]);
    let source = ScriptedSource::new().with("F001", Ok(peaks(&[(1.0, 0.0), (2.0, 0.0)])));

    let report = run_batch(&source, &catalog, state.selection(), state.mode(), 0.2).unwrap();
    assert_eq!(report.profiles.len(), 1);
    assert!(report.profiles[0].histogram.is_zero_total());
    assert_eq!(report.warnings[0].kind, WarningKind::ZeroTotalIntensity);
    assert!(!report.warnings[0].is_skip());
}

#[test]
fn test_unknown_id_uses_bare_label() {
    let catalog = catalog();
    let mut report = BatchReport::new();
    let source = ScriptedSource::new().with("X999", Ok(peaks(&[(1.0, 1.0)])));
    report.process_sample(
        &source,
        "X999",
        catalog.label_for("X999"),
        DetectionMode::Pos,
        0.2,
    );
    assert_eq!(report.profiles[0].label, "X999");
}

#[test]
fn test_batch_is_repeatable() {
    let catalog = catalog();
    let mut state = SessionState::default();
    select_all(&mut state, &catalog);
    let source = ScriptedSource::new()
        .with("F001", Ok(peaks(&[(1.0, 10.0), (1.3, 2.0), (50.0, 7.0)])))
        .with("F002", Ok(peaks(&[(0.5, 3.0)])))
        .with("F003", Ok(peaks(&[(99.0, 1.0), (12.0, 1.0)])));

    let first = run_batch(&source, &catalog, state.selection(), state.mode(), 0.25).unwrap();
    let second = run_batch(&source, &catalog, state.selection(), state.mode(), 0.25).unwrap();
    assert_eq!(first, second);
}
