//! The four-source load behind the calendar and agenda pages.

use docket_core::aggregate::SourceSet;

use crate::client::StoreClient;

/// Fetch all four sources concurrently and join them.
///
/// The four reads are independent: one failing leaves the others intact,
/// and the aggregation pass degrades the failed source to an empty
/// collection. Nothing is applied until all four have settled, so a load's
/// result is always all-or-joined, never partial.
pub async fn load_sources(store: &StoreClient) -> SourceSet {
    let (tasks, cases, hearings, causelists) = tokio::join!(
        store.fetch_tasks(),
        store.fetch_cases(),
        store.fetch_hearings(),
        store.fetch_causelists(),
    );

    if let Err(err) = &tasks {
        log::warn!("tasks fetch failed: {}", err);
    }
    if let Err(err) = &cases {
        log::warn!("cases fetch failed: {}", err);
    }
    if let Err(err) = &hearings {
        log::warn!("hearings fetch failed: {}", err);
    }
    if let Err(err) = &causelists {
        log::warn!("causelists fetch failed: {}", err);
    }

    SourceSet {
        tasks,
        cases,
        hearings,
        causelists,
    }
}
