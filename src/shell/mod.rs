// Composition root for the cohort hours service.
//
// Responsibilities:
// - Read config from the environment.
// - Instantiate the SQLite record store and the filesystem report store.
// - Wire them into use case handlers behind AppState.

pub mod config;
pub mod http;
pub mod state;
