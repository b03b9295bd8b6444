
use crate::alert::{AlertManager, RequestsPerSecondAlert};
use crate::ingest::Ingestor;
use crate::metrics::MetricsCollector;
use crate::parse::CsvParser;
use crate::pipeline::Pipeline;
use crate::source::{SourceId, StopSignal, StreamSource};
use std::io::Cursor;
use std::time::Duration;

pub(super) const HEADER: &str = "remotehost,rfc931,authuser,date,request,status,bytes";

pub(super) fn line(host: &str, time: i64, path: &str, status: u16) -> String {
    format!("{host},-,-,{time},\"GET {path} HTTP/1.0\",{status},512")
}

/// Pipeline reading `lines` from memory, with 1s windows and a 1s alert at
/// 10 req/s. Once the lines are exhausted the source idles like stdin does.
pub(super) fn pipeline_over(lines: &[String]) -> Pipeline {
    let mut text = String::from(HEADER);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');

    let stop = StopSignal::new();
    let source = StreamSource::from_reader(Cursor::new(text), 16, stop.clone());
    let ingestor = Ingestor::new(
        SourceId::Stdin,
        Box::new(source),
        Box::new(CsvParser::new()),
        16,
    );

    let mut pipeline = Pipeline::from_parts(
        ingestor,
        MetricsCollector::with_defaults(Duration::from_secs(1)),
        AlertManager::new(vec![Box::new(RequestsPerSecondAlert::new(
            Duration::from_secs(1),
            10.0,
        ))]),
        stop,
    );
    pipeline.init().unwrap();
    pipeline
}
