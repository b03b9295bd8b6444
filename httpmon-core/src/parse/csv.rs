use crate::parse::{ParseError, ParseOutcome, RecordParser};
use crate::record::{CallRecord, HttpMethod, UnixSeconds};
use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '"';

const HEADER: [&str; 7] = [
    "remotehost",
    "rfc931",
    "authuser",
    "date",
    "request",
    "status",
    "bytes",
];

const FIELD_COUNT: usize = HEADER.len();

/// Parses the CSV access-log format.
///
/// The stream must open with the `remotehost,rfc931,authuser,date,request,status,bytes`
/// header (any case, quotes allowed). Until it has been seen every line is
/// validated as a header; afterwards every line is parsed as a record.
#[derive(Debug, Default)]
pub struct CsvParser {
    ready: bool,
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the header has been validated.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn validate_header(&mut self, raw: &str) -> Result<ParseOutcome, ParseError> {
        let fields = split_fields(raw)?;

        for (position, (found, expected)) in fields.iter().zip(HEADER).enumerate() {
            if !found.eq_ignore_ascii_case(expected) {
                return Err(ParseError::HeaderField {
                    position,
                    expected,
                    found: found.to_string(),
                });
            }
        }

        self.ready = true;
        debug!(event = "header_validated");

        Ok(ParseOutcome::Header)
    }

    fn parse_record(&self, raw: &str) -> Result<CallRecord, ParseError> {
        let [remote_host, rfc931, auth_user, date, request, status, bytes] = split_fields(raw)?;

        let time = parse_date(date)?;
        let (method, section, version) = parse_request(request)?;
        let status = parse_status(status)?;
        let bytes = parse_bytes(bytes)?;

        Ok(CallRecord {
            time,
            remote_host: remote_host.to_string(),
            rfc931: parse_rfc931(rfc931),
            auth_user: auth_user.to_string(),
            method,
            section,
            version,
            status,
            bytes,
        })
    }
}

impl RecordParser for CsvParser {
    fn parse(&mut self, raw: &str) -> Result<ParseOutcome, ParseError> {
        if !self.ready {
            return self.validate_header(raw);
        }

        self.parse_record(raw).map(ParseOutcome::Record)
    }
}

//-----------------------------------------------------------------------------
// Fields
//-----------------------------------------------------------------------------

fn split_fields(raw: &str) -> Result<[&str; FIELD_COUNT], ParseError> {
    let fields: Vec<&str> = raw.split(DELIMITER).map(unquote).collect();

    <[&str; FIELD_COUNT]>::try_from(fields).map_err(|fields| ParseError::FieldCount {
        expected: FIELD_COUNT,
        found: fields.len(),
    })
}

fn unquote(field: &str) -> &str {
    field.trim_matches(QUOTE)
}

fn parse_date(field: &str) -> Result<UnixSeconds, ParseError> {
    field.parse().map_err(|_| ParseError::InvalidDate {
        value: field.to_string(),
    })
}

fn parse_rfc931(field: &str) -> String {
    if field == "-" {
        String::new()
    } else {
        field.to_string()
    }
}

/// `"GET /api/user HTTP/1.0"` -> (GET, "/api", "1.0")
fn parse_request(field: &str) -> Result<(HttpMethod, String, String), ParseError> {
    let parts: Vec<&str> = field.split_whitespace().collect();
    let [method, path, version] = parts[..] else {
        return Err(ParseError::MalformedRequest {
            value: field.to_string(),
        });
    };

    let method = method
        .parse::<HttpMethod>()
        .map_err(|_| ParseError::UnknownMethod {
            value: method.to_string(),
        })?;

    Ok((method, parse_section(path)?, parse_version(version)?))
}

pub(super) fn parse_section(path: &str) -> Result<String, ParseError> {
    if path.is_empty() {
        return Err(ParseError::EmptyPath);
    }

    match path.split('/').nth(1) {
        Some(section) => Ok(format!("/{section}")),
        None => Err(ParseError::MissingSection {
            path: path.to_string(),
        }),
    }
}

fn parse_version(field: &str) -> Result<String, ParseError> {
    match field.split('/').collect::<Vec<_>>()[..] {
        [_name, version] => Ok(version.to_string()),
        _ => Err(ParseError::MalformedVersion {
            value: field.to_string(),
        }),
    }
}

fn parse_status(field: &str) -> Result<u16, ParseError> {
    let status: i64 = field.parse().map_err(|_| ParseError::InvalidStatus {
        value: field.to_string(),
    })?;

    match u16::try_from(status) {
        Ok(status @ 100..=599) => Ok(status),
        _ => Err(ParseError::StatusOutOfRange { status }),
    }
}

fn parse_bytes(field: &str) -> Result<u64, ParseError> {
    field.parse().map_err(|_| ParseError::InvalidBytes {
        value: field.to_string(),
    })
}
