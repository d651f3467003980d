use bedwars_core::{BuildContext, Namespace, Plugin, PluginError};
use tracing::{debug, info};

use crate::config::EconomyConfig;
use crate::layout::{EconomyConfigError, EconomyLayout};
use crate::load::{load_lines, unload_lines};
use crate::purchase::{PURCHASE_FUNCTION, purchase_function};
use crate::tick::tick_lines;

/// Compiles generators, currencies and shops into lifecycle instructions.
///
/// Construct through
/// [`PackageBuilder::use_plugin`](bedwars_core::PackageBuilder::use_plugin),
/// then call [`configure`](Self::configure) exactly once before the
/// package is built.
#[derive(Debug)]
pub struct EconomyPlugin {
    namespace: Namespace,
    layout: EconomyLayout,
    configured: bool,
}

impl EconomyPlugin {
    pub fn new(namespace: &Namespace) -> Self {
        Self {
            namespace: namespace.clone(),
            layout: EconomyLayout::default(),
            configured: false,
        }
    }

    /// Resolve `config` into this plugin's layout. The configuration is
    /// immutable afterwards.
    pub fn configure(&mut self, config: EconomyConfig) -> Result<(), EconomyConfigError> {
        if self.configured {
            return Err(EconomyConfigError::AlreadyConfigured);
        }
        self.layout = EconomyLayout::resolve(&config)?;
        self.configured = true;
        debug!(
            namespace = %self.namespace,
            generators = self.layout.generators.len(),
            shops = self.layout.shops.len(),
            shopkeepers = self.layout.shopkeepers.len(),
            offers = self.layout.purchasable.len(),
            "configured economy"
        );
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn layout(&self) -> &EconomyLayout {
        &self.layout
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

impl Plugin for EconomyPlugin {
    fn name(&self) -> &str {
        "economy"
    }

    fn on_build(&self, ctx: &mut BuildContext<'_>) -> Result<(), PluginError> {
        if !self.configured {
            return Err(PluginError::Rejected {
                reason: "economy plugin was never configured".to_string(),
            });
        }
        let path = ctx.write_function(PURCHASE_FUNCTION, &purchase_function(&self.namespace))?;
        info!(file = %path.display(), "wrote purchase procedure");
        Ok(())
    }

    fn on_load(&self) -> Vec<String> {
        load_lines(&self.namespace, &self.layout)
    }

    fn on_unload(&self) -> Vec<String> {
        unload_lines(&self.namespace)
    }

    fn on_tick(&self) -> Vec<String> {
        tick_lines(&self.namespace, &self.layout)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
