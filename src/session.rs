// Sat Jan 17 2026 - Alex

use crate::config::Config;
use crate::decl::{DeclId, DumpFrontend, Frontend, TypeModel};
use crate::structure::{layout_json, record_list_json, DeclVisitor, RecordStore};

const EMPTY_LAYOUT: &str = "{}";
const EMPTY_LIST: &str = "[]";

/// One analysis session: configuration, analyzed layouts and the last
/// rendered record listing.
///
/// Nothing here is synchronized. Share a session across threads only
/// behind a lock of the caller's choosing.
pub struct Session<F: Frontend = DumpFrontend> {
    config: Config,
    frontend: F,
    store: RecordStore,
    record_list: String,
}

impl Session<DumpFrontend> {
    pub fn new() -> Self {
        Self::with_frontend(DumpFrontend::new())
    }
}

impl Default for Session<DumpFrontend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Frontend> Session<F> {
    pub fn with_frontend(frontend: F) -> Self {
        Self {
            config: Config::default(),
            frontend,
            store: RecordStore::new(),
            record_list: String::new(),
        }
    }

    /// Replaces the front-end arguments. They are not checked here; a bad
    /// configuration shows up as an empty result from the next
    /// [`Session::analyze`].
    pub fn configure(&mut self, args: &str) {
        self.config.set_args(args);
    }

    /// Runs a fresh analysis pass over `source`, discarding earlier results.
    /// Returns the number of records analyzed.
    pub fn analyze(&mut self, source: &str) -> usize {
        self.reset();

        let args = self.config.split_args();
        let unit = match self.frontend.parse(source, &args) {
            Ok(unit) => unit,
            Err(e) => {
                log::warn!("Analysis produced no declarations: {}", e);
                return 0;
            }
        };

        let target = unit.target();
        if !target.abi.is_itanium_family() {
            log::warn!("Target {} uses the {} C++ ABI, only itanium is supported", target.triple, target.abi);
            return 0;
        }

        let count = DeclVisitor::new(&unit, &mut self.store).visit(unit.decls());
        log::info!("Analyzed {} records for {}", count, target.triple);
        count
    }

    /// Drops all analyzed layouts. Configuration is kept.
    pub fn reset(&mut self) {
        self.store.clear();
        self.record_list.clear();
    }

    /// `[{"id":"<id>","name":"<type>"}, ...]` in ascending id order.
    pub fn list_records(&mut self) -> String {
        self.record_list = match record_list_json(&self.store) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to render record list: {}", e);
                EMPTY_LIST.to_string()
            }
        };
        self.record_list.clone()
    }

    /// The layout of record `id`, or `{}` when no such record was analyzed.
    pub fn layout_of(&self, id: DeclId) -> String {
        let Some(layout) = self.store.get(id) else {
            return EMPTY_LAYOUT.to_string();
        };
        layout_json(layout).unwrap_or_else(|e| {
            log::error!("Failed to render layout #{}: {}", id, e);
            EMPTY_LAYOUT.to_string()
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}
