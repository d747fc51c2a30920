mod csv;
#[cfg(feature = "download")]
mod http;

pub use self::csv::CsvSheetSource;
#[cfg(feature = "download")]
pub use self::http::HttpSheetSource;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::dataset::Dataset;
use crate::record::{normalize_sheet, ColumnLayout, RawSheet};

/// Transport boundary: fetches one named sheet from a remote or local
/// tabular source. Implementations are expected to be cheap to share
/// across the per-sheet fetch threads.
pub trait SheetSource {
    fn fetch(&self, name: &str) -> Result<RawSheet>;
}

/// Shared cancellation flag for an in-flight load. Cancelling makes the
/// whole load resolve to [`LoadOutcome::Cancelled`], so a stale response
/// can never replace newer state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a full load cycle.
#[derive(Debug)]
pub enum LoadOutcome {
    /// All fetches settled; the dataset holds whatever sheets succeeded.
    /// `Dataset::has_data()` is false when zero sheets came back.
    Loaded(Dataset),
    /// The token was cancelled while fetches were in flight.
    Cancelled,
}

/// Fetch every named sheet (one request per sheet, dispatched concurrently
/// and awaited together), normalize the ones that succeed, and record the
/// gaps. A failed sheet never fails the batch.
pub fn load_sheets<S: SheetSource + Sync>(
    source: &S,
    sheets: &[&str],
    layout: &ColumnLayout,
    cancel: &CancelToken,
    verbose: u8,
) -> Result<LoadOutcome> {
    if cancel.is_cancelled() {
        return Ok(LoadOutcome::Cancelled);
    }

    let results: Vec<Result<RawSheet>> = std::thread::scope(|scope| {
        let handles: Vec<_> = sheets
            .iter()
            .map(|&name| {
                scope.spawn(move || {
                    if cancel.is_cancelled() {
                        return Err(anyhow!("load cancelled"));
                    }
                    source.fetch(name)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(_) => Err(anyhow!("sheet fetch worker panicked")),
            })
            .collect()
    });

    // Everything settled; a cancel issued meanwhile wins over the results.
    if cancel.is_cancelled() {
        return Ok(LoadOutcome::Cancelled);
    }

    let mut records = Vec::new();
    let mut loaded = Vec::new();
    let mut missing = Vec::new();

    for (&name, result) in sheets.iter().zip(results) {
        match result {
            Ok(sheet) => {
                if verbose > 0 {
                    eprintln!("[load] sheet {name}: {} rows", sheet.len());
                }
                records.extend(normalize_sheet(layout, &sheet));
                loaded.push(name.to_string());
            }
            Err(err) => {
                if verbose > 0 {
                    eprintln!("[load] sheet {name} unavailable: {err}");
                }
                missing.push(name.to_string());
            }
        }
    }

    Ok(LoadOutcome::Loaded(Dataset::new(records, loaded, missing)))
}

#[cfg(test)]
mod tests {
    use super::{load_sheets, CancelToken, LoadOutcome, SheetSource};
    use crate::record::{ColumnLayout, RawSheet};
    use anyhow::{bail, Result};

    /// Source where sheets named "bad*" fail and the rest return one row.
    struct FlakySource;

    impl SheetSource for FlakySource {
        fn fetch(&self, name: &str) -> Result<RawSheet> {
            if name.starts_with("bad") {
                bail!("connection refused");
            }
            Ok(RawSheet::new(
                name,
                Vec::new(),
                vec![vec![
                    "NATAL".into(), "1".into(), "1".into(), "LOCAL".into(),
                    "FEMININO".into(), "SOLTEIRO".into(), "25 A 34".into(),
                    "SUPERIOR".into(), "PARDA".into(), "".into(), "N".into(),
                    "10".into(), "8".into(), "0".into(),
                ]],
            ))
        }
    }

    #[test]
    fn partial_failure_keeps_the_batch() {
        let outcome = load_sheets(
            &FlakySource,
            &["a", "bad_b", "c"],
            &ColumnLayout::default(),
            &CancelToken::new(),
            0,
        )
        .unwrap();

        let LoadOutcome::Loaded(dataset) = outcome else {
            panic!("expected loaded outcome");
        };
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.loaded, vec!["a", "c"]);
        assert_eq!(dataset.missing, vec!["bad_b"]);
        assert!(dataset.has_data());
    }

    #[test]
    fn zero_successful_sheets_is_explicit_no_data() {
        let outcome = load_sheets(
            &FlakySource,
            &["bad_1", "bad_2"],
            &ColumnLayout::default(),
            &CancelToken::new(),
            0,
        )
        .unwrap();

        let LoadOutcome::Loaded(dataset) = outcome else {
            panic!("expected loaded outcome");
        };
        assert!(!dataset.has_data());
        assert_eq!(dataset.missing.len(), 2);
    }

    #[test]
    fn cancelled_load_is_a_no_op() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome =
            load_sheets(&FlakySource, &["a"], &ColumnLayout::default(), &cancel, 0).unwrap();
        assert!(matches!(outcome, LoadOutcome::Cancelled));
    }
}
