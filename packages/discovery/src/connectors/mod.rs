//! Source connector implementations.
//!
//! Each connector applies the thesis filter itself (via
//! [`crate::filter::select`]) so fallback-to-unfiltered is evaluated
//! against that source's own candidate pool.

pub mod angellist;
pub mod crunchbase;
pub mod curated;
pub mod registry;
pub mod yc;

pub use angellist::AngelListConnector;
pub use crunchbase::CrunchbaseConnector;
pub use registry::RegistryConnector;
pub use yc::YcConnector;

use std::collections::HashMap;
use std::sync::Arc;

use crate::traits::connector::{SourceConnector, SourceId};

/// The production connector set: live APIs where credentials exist (read
/// from the environment), curated data otherwise.
pub fn default_connectors() -> HashMap<SourceId, Arc<dyn SourceConnector>> {
    connector_map([
        Arc::new(YcConnector::new()) as Arc<dyn SourceConnector>,
        Arc::new(CrunchbaseConnector::from_env()),
        Arc::new(AngelListConnector::new()),
        Arc::new(RegistryConnector::from_env()),
    ])
}

/// A connector set that never touches the network; every source serves its
/// curated dataset. Used in tests and demos.
pub fn offline_connectors() -> HashMap<SourceId, Arc<dyn SourceConnector>> {
    connector_map([
        Arc::new(YcConnector::offline()) as Arc<dyn SourceConnector>,
        Arc::new(CrunchbaseConnector::offline()),
        Arc::new(AngelListConnector::new()),
        Arc::new(RegistryConnector::offline()),
    ])
}

fn connector_map(
    connectors: impl IntoIterator<Item = Arc<dyn SourceConnector>>,
) -> HashMap<SourceId, Arc<dyn SourceConnector>> {
    connectors.into_iter().map(|c| (c.id(), c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_set_covers_every_source() {
        let connectors = offline_connectors();
        for id in [
            SourceId::Yc,
            SourceId::Crunchbase,
            SourceId::AngelList,
            SourceId::Registry,
        ] {
            assert!(connectors.contains_key(&id));
        }
    }
}
