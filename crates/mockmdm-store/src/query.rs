//! Applying a [`DeviceQuery`] to a loaded store.

use mockmdm_core::{DeviceQuery, DeviceRecord};

use crate::store::DeviceStore;

/// Devices selected by `query`, in store order.
pub fn query_devices<'a>(
    store: &'a DeviceStore,
    query: &DeviceQuery,
) -> Vec<(&'a str, &'a DeviceRecord)> {
    store
        .iter()
        .filter(|(id, record)| query.matches(id, record))
        .collect()
}
