use crate::core::projection::FieldSelection;
use crate::core::query::{Query, QueryEngine};
use crate::core::render::{render, OutputMode};
use crate::core::RegistryLoader;
use crate::utils::error::{Result, SvdbError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub query: Query,
    pub selection: Option<FieldSelection>,
    pub mode: OutputMode,
}

impl LookupRequest {
    /// 有選欄位時一律用 Filtered 輸出，`json` 只在沒有選欄位時生效
    pub fn new(query: Query, select: Option<&str>, json: bool) -> Self {
        let selection = select
            .filter(|list| !list.is_empty())
            .map(FieldSelection::parse);

        let mode = match (&selection, json) {
            (Some(selection), _) => OutputMode::Filtered {
                columns: selection.columns(),
            },
            (None, true) => OutputMode::Json,
            (None, false) => OutputMode::Plain,
        };

        Self {
            query,
            selection,
            mode,
        }
    }
}

/// Rendered output plus the port-keys reported as missing along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupReport {
    pub output: String,
    pub missing: Vec<String>,
    pub matched: usize,
}

impl LookupReport {
    /// One non-fatal `KeyNotFound` per missing port-key, in request order.
    pub fn notices(&self) -> impl Iterator<Item = SvdbError> + '_ {
        self.missing
            .iter()
            .map(|port| SvdbError::KeyNotFound { port: port.clone() })
    }
}

pub struct LookupEngine<L: RegistryLoader> {
    loader: L,
}

impl<L: RegistryLoader> LookupEngine<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn run(&self, request: &LookupRequest) -> Result<LookupReport> {
        let registry = self.loader.load()?;
        tracing::debug!(
            "Loaded registry with {} port keys, {} services",
            registry.key_count(),
            registry.service_count()
        );

        let outcome = QueryEngine::new(&registry).run(&request.query)?;
        let matched = outcome.services.len();

        let services = match &request.selection {
            Some(selection) => selection.project_all(&outcome.services),
            None => outcome.services,
        };

        let output = render(&services, request.mode)?;

        Ok(LookupReport {
            output,
            missing: outcome.missing,
            matched,
        })
    }
}
