//! Testing utilities for topicview
//!
//! Page fixtures shared by the unit tests and a tracing initialiser that
//! routes events to the test harness.
//!
//! Only available when compiled with `cfg(test)`.

use crate::model::{CategoryFile, FoldFile, ItemFile, Page, PageFile};
use tracing_subscriber::EnvFilter;

/// Page description used by most tests
///
/// Layout:
/// - fold `highlights`: "Weekly roundup", "Release radar"
/// - fold `market`: "GPU prices"
/// - category `lang`: 42 "Borrow checker deep dive", 43 "Async runtimes compared",
///   44 "Zig comptime"
/// - category `infra`: 50 "Kubernetes operators", 51 "eBPF tracing"
#[must_use]
pub fn sample_page_file() -> PageFile {
    PageFile {
        top_zone: vec![
            FoldFile {
                id: "highlights".into(),
                title: "Top picks".into(),
                lists: vec![vec![
                    ItemFile::new("Weekly roundup", "rust,news", "2026-10-01", "2"),
                    ItemFile::new("Release radar", "release", "2026-10-03", "5"),
                ]],
            },
            FoldFile {
                id: "market".into(),
                title: "Market".into(),
                lists: vec![vec![ItemFile::new("GPU prices", "hardware", "2026-09-30 08:00", "1")]],
            },
        ],
        categories: vec![
            CategoryFile {
                id: "lang".into(),
                name: "Languages".into(),
                lists: vec![vec![
                    ItemFile::new("Borrow checker deep dive", "rust,compiler", "2026-10-10", "3")
                        .with_id("42")
                        .with_summary("Lifetimes and ownership explained")
                        .with_detail(),
                    ItemFile::new("Async runtimes compared", "rust,async", "2026-10-12", "1")
                        .with_id("43")
                        .with_summary("Tokio versus smol"),
                    ItemFile::new("Zig comptime", "zig,compiler", "not a date", "3")
                        .with_id("44")
                        .with_summary("Compile-time evaluation"),
                ]],
            },
            CategoryFile {
                id: "infra".into(),
                name: "Infrastructure".into(),
                lists: vec![vec![
                    ItemFile::new("Kubernetes operators", "k8s,go", "2026-10-05T09:30:00Z", "2")
                        .with_id("50")
                        .with_summary("Reconcile loops"),
                    ItemFile::new("eBPF tracing", "linux,rust", "2026-10-07", "high")
                        .with_id("51")
                        .with_summary("Kernel observability with Rust"),
                ]],
            },
        ],
        tags: [
            "rust", "compiler", "async", "zig", "k8s", "go", "linux", "news", "release", "hardware",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        controls: crate::model::Controls::default(),
    }
}

/// Built page for [`sample_page_file`]
#[must_use]
pub fn sample_page() -> Page {
    Page::from(sample_page_file())
}

/// Titles of a list in current order
#[must_use]
pub fn list_titles(page: &Page, list: usize) -> Vec<String> {
    page.lists[list]
        .items
        .iter()
        .map(|id| page.item(*id).title.clone())
        .collect()
}

/// Titles of every visible item in document order
#[must_use]
pub fn visible_titles(page: &Page) -> Vec<String> {
    page.lists
        .iter()
        .flat_map(|list| list.items.iter())
        .filter(|id| page.item(**id).visible)
        .map(|id| page.item(*id).title.clone())
        .collect()
}

/// Initialise a tracing subscriber that writes to the test-harness writer
///
/// Safe to call multiple times.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
