mod tokio_postgres;

pub use self::in_memory_test::{
    InMemoryTestConnector, InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedOpen,
    RecordedQuery,
};
pub use self::tokio_postgres::{TokioPostgresConnector, TokioPostgresSession};
