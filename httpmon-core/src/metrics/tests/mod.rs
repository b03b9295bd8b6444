mod per_host_tests;

use crate::record::{CallRecord, HttpMethod, UnixSeconds};

pub(super) fn record(time: UnixSeconds, host: &str, section: &str, status: u16) -> CallRecord {
    CallRecord {
        time,
        remote_host: host.to_string(),
        rfc931: String::new(),
        auth_user: String::new(),
        method: HttpMethod::Get,
        section: section.to_string(),
        version: "1.0".to_string(),
        status,
        bytes: 128,
    }
}
