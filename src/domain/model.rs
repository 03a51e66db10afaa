use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

/// 登錄檔中的一筆服務記錄
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub port: String,
    pub description: String,
    pub tcp: bool,
    pub udp: bool,
    pub status: String,
}

impl Service {
    pub fn protocol(&self) -> &'static str {
        protocol_label(self.tcp, self.udp)
    }

    /// 依 port, description, protocol, status 順序回傳非空的值
    pub fn populated_values(&self) -> Vec<&str> {
        [
            self.port.as_str(),
            self.description.as_str(),
            self.protocol(),
            self.status.as_str(),
        ]
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect()
    }
}

/// Canonical protocol label for a pair of transport flags.
pub fn protocol_label(tcp: bool, udp: bool) -> &'static str {
    match (tcp, udp) {
        (true, true) => "tcp/udp",
        (true, false) => "tcp",
        (false, true) => "udp",
        (false, false) => "",
    }
}

/// Read-only mapping from port-key to the services registered under it.
///
/// Keys are kept in a `BTreeMap` so that iterating the whole registry walks
/// port-keys in sorted order; each bucket keeps the order of the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: BTreeMap<String, Vec<Service>>,
}

impl Registry {
    pub fn new(entries: BTreeMap<String, Vec<Service>>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub fn get(&self, port_key: &str) -> Option<&[Service]> {
        self.entries.get(port_key).map(Vec::as_slice)
    }

    /// 依排序後的 port-key 逐一走訪所有服務
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.entries.values().flatten()
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn service_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where the database file lives and, optionally, the bundled seed copied
/// there on first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocation {
    pub path: PathBuf,
    pub seed: Option<PathBuf>,
}

impl DatabaseLocation {
    pub fn new(path: impl Into<PathBuf>, seed: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed,
        }
    }
}
