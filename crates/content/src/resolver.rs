use core_types::ContentSource;
use database::DbError;
use serde::Serialize;
use std::future::Future;

/// A collection ready to render, tagged with the source that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<T> {
    pub source: ContentSource,
    pub items: Vec<T>,
}

impl<T> Resolved<T> {
    pub fn live(items: Vec<T>) -> Self {
        Self {
            source: ContentSource::Live,
            items,
        }
    }

    pub fn fallback(items: Vec<T>) -> Self {
        Self {
            source: ContentSource::Static,
            items,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == ContentSource::Live
    }
}

/// Resolves a list of content, falling back to the static catalog.
///
/// - A non-empty live result is returned unchanged, in query order.
/// - An empty live result or any error yields `fallback()`.
///
/// Never fails. Exactly one event is logged per call, naming the source used;
/// schema failures are logged at `error` so operators see them even though the
/// visitor still gets a page.
pub async fn resolve<T, F, S>(entity: &str, live_fetch: F, fallback: S) -> Resolved<T>
where
    F: Future<Output = Result<Vec<T>, DbError>>,
    S: FnOnce() -> Vec<T>,
{
    match live_fetch.await {
        Ok(items) if !items.is_empty() => {
            tracing::debug!(entity, source = "live", count = items.len(), "Resolved content");
            Resolved::live(items)
        }
        Ok(_) => {
            let items = fallback();
            tracing::info!(entity, source = "static", reason = "empty", count = items.len(), "Resolved content");
            Resolved::fallback(items)
        }
        Err(e) if e.is_schema_failure() => {
            let items = fallback();
            tracing::error!(entity, source = "static", reason = "schema", error = %e, "Resolved content");
            Resolved::fallback(items)
        }
        Err(e) => {
            let items = fallback();
            tracing::warn!(entity, source = "static", reason = "unavailable", error = %e, "Resolved content");
            Resolved::fallback(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn capture_logs() -> (Captured, tracing::subscriber::DefaultGuard) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (captured, guard)
    }

    fn fallback() -> Vec<&'static str> {
        vec!["static-a", "static-b"]
    }

    #[tokio::test]
    async fn non_empty_live_result_is_returned_unchanged() {
        let resolved = resolve("products", async { Ok(vec!["c", "a", "b"]) }, fallback).await;
        assert_eq!(resolved, Resolved::live(vec!["c", "a", "b"]));
    }

    #[tokio::test]
    async fn empty_live_result_falls_back() {
        let resolved = resolve("products", async { Ok(Vec::new()) }, fallback).await;
        assert_eq!(resolved, Resolved::fallback(fallback()));
    }

    #[tokio::test]
    async fn failed_live_fetch_falls_back_and_logs_once() {
        let (logs, _guard) = capture_logs();

        let resolved = resolve(
            "solutions",
            async { Err(DbError::ConnectionError(sqlx::Error::PoolTimedOut)) },
            fallback,
        )
        .await;

        assert_eq!(resolved.items, fallback());
        assert!(!resolved.is_live());
        let lines = logs.lines();
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("source=\"static\""));
        assert!(lines[0].contains("entity=\"solutions\""));
    }

    #[tokio::test]
    async fn schema_failures_are_logged_as_errors() {
        let (logs, _guard) = capture_logs();

        let resolved = resolve(
            "news",
            async {
                Err(DbError::SchemaEvolution {
                    table: "news".into(),
                    source: sqlx::Error::Protocol("permission denied".into()),
                })
            },
            fallback,
        )
        .await;

        assert_eq!(resolved.source, ContentSource::Static);
        let lines = logs.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("reason=\"schema\""));
    }

    #[tokio::test]
    async fn not_found_on_a_list_read_still_falls_back() {
        let resolved = resolve("navigation", async { Err(DbError::NotFound) }, fallback).await;
        assert_eq!(resolved.items, fallback());
    }
}
