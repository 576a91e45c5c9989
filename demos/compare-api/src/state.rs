/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async SDK instance. Dispatches blocking searches to a thread pool
    /// internally.
    pub sdk: cardcompare::AsyncCardCompareSdk,
}
