//! Scripted in-memory source for exercising the job without a network.

use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tzsync_core::{Endpoint, FetchError, ZoneKey, ZoneSource};

pub fn key(zone: &str, country: &str) -> ZoneKey {
    ZoneKey::new(zone, country)
}

#[derive(Default)]
pub struct ScriptedSource {
    zones: Option<Vec<ZoneKey>>,
    details: HashMap<ZoneKey, String>,
    failing: HashSet<ZoneKey>,
    undecodable: HashSet<ZoneKey>,
    list_calls: Cell<usize>,
    detail_calls: RefCell<Vec<ZoneKey>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        ScriptedSource { zones: None, ..Default::default() }
    }

    pub fn zones(mut self, zones: &[(&str, &str)]) -> Self {
        self.zones = Some(zones.iter().map(|(z, c)| key(z, c)).collect());
        self
    }

    pub fn list_fails(mut self) -> Self {
        self.zones = None;
        self
    }

    pub fn detail(mut self, zone: &str, country: &str, country_name: &str) -> Self {
        self.details.insert(key(zone, country), country_name.to_string());
        self
    }

    pub fn fail_detail(mut self, zone: &str, country: &str) -> Self {
        self.failing.insert(key(zone, country));
        self
    }

    /// Answer with a successful body that lacks `countryName`.
    pub fn undecodable_detail(mut self, zone: &str, country: &str) -> Self {
        self.undecodable.insert(key(zone, country));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn detail_calls(&self) -> Vec<ZoneKey> {
        self.detail_calls.borrow().clone()
    }
}

fn param<'p>(params: &[(&str, &'p str)], name: &str) -> &'p str {
    params.iter().find(|(k, _)| *k == name).map(|(_, v)| *v).unwrap_or_default()
}

impl ZoneSource for ScriptedSource {
    fn fetch(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        match endpoint {
            Endpoint::ListTimeZone => {
                self.list_calls.set(self.list_calls.get() + 1);
                let zones = self
                    .zones
                    .as_ref()
                    .ok_or(FetchError::Status { endpoint, status: 503 })?;
                let zones: Vec<Value> = zones
                    .iter()
                    .map(|k| json!({"zoneName": k.zone_name, "countryCode": k.country_code, "gmtOffset": 0}))
                    .collect();
                Ok(json!({"status": "OK", "message": "", "zones": zones}))
            }
            Endpoint::GetTimeZone => {
                let k = key(param(params, "zone"), param(params, "country"));
                self.detail_calls.borrow_mut().push(k.clone());
                if self.failing.contains(&k) {
                    return Err(FetchError::Status { endpoint, status: 500 });
                }
                if self.undecodable.contains(&k) {
                    return Ok(json!({"status": "OK", "zoneName": k.zone_name, "countryCode": k.country_code}));
                }
                match self.details.get(&k) {
                    Some(name) => Ok(json!({
                        "status": "OK",
                        "message": "",
                        "zoneName": k.zone_name,
                        "countryName": name,
                        "countryCode": k.country_code,
                    })),
                    None => Ok(json!({"status": "FAILED", "message": "Record not found."})),
                }
            }
        }
    }
}

/// In-memory log sink usable as a `fmt` layer writer.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
