pub mod alert;
pub mod cli;
pub mod conf;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod parse;
pub mod pipeline;
pub mod record;
pub mod source;
