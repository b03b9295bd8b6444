use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Number of seconds since the unix epoch.
///
/// Log lines carry integer epoch timestamps and every time computation in the
/// pipeline (windows, alert timers) is done on this scale.
pub type UnixSeconds = i64;

/// Last second still inside a window opened at `start` that lasts `period`.
///
/// Saturates at the end of the timeline instead of overflowing.
pub(crate) fn window_end(start: UnixSeconds, period: Duration) -> UnixSeconds {
    let secs = UnixSeconds::try_from(period.as_secs()).unwrap_or(UnixSeconds::MAX);
    start.saturating_add(secs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Trace,
    Connect,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a verb is not part of the supported method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod;

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "TRACE" => Ok(HttpMethod::Trace),
            "CONNECT" => Ok(HttpMethod::Connect),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnknownMethod),
        }
    }
}

/// One parsed HTTP access-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// When the call was logged.
    pub time: UnixSeconds,
    /// Hostname or IP of the caller.
    pub remote_host: String,
    /// RFC 931 identity; empty when the log has `-`.
    pub rfc931: String,
    pub auth_user: String,
    pub method: HttpMethod,
    /// First path segment, leading `/` included (`/api` for `/api/user`).
    pub section: String,
    /// Protocol version without its name (`1.0` for `HTTP/1.0`).
    pub version: String,
    pub status: u16,
    /// Bytes sent back to the caller.
    pub bytes: u64,
}
