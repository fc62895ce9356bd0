//! Resource catalog.
//!
//! Every supported resource is a static [`ResourceDef`] plus a unit type that
//! opts into the operations its endpoints offer.

mod dcs;
mod dms;
mod fgs;
mod modelarts;
mod rds;

pub use dcs::*;
pub use dms::*;
pub use fgs::*;
pub use modelarts::*;
pub use rds::*;

use crate::error::{OtcError, Result};
use crate::resource::ResourceDef;

/// Every resource definition, in display order.
pub static CATALOG: &[&ResourceDef] = &[
    &DCS_INSTANCE,
    &DCS_BACKUP,
    &DCS_PRODUCT,
    &DCS_AVAILABLE_ZONE,
    &DMS_QUEUE,
    &DMS_QUOTA,
    &DMS_GROUP,
    &FGS_FUNCTION,
    &FGS_TRIGGER,
    &FGS_RESERVED_INSTANCE,
    &MODELARTS_MODEL,
    &MODELARTS_SERVICE,
    &RDS_INSTANCE,
    &RDS_BACKUP,
    &RDS_FLAVOR,
];

/// Find a resource definition by kind, e.g. `dcs.instance`.
///
/// # Errors
///
/// Returns [`OtcError::UnknownResource`] if no definition has that kind.
pub fn lookup(kind: &str) -> Result<&'static ResourceDef> {
    CATALOG
        .iter()
        .copied()
        .find(|def| def.kind == kind)
        .ok_or_else(|| OtcError::UnknownResource(kind.to_string()))
}

/// Validate every definition in the catalog.
pub fn validate_catalog() -> Result<()> {
    for (i, def) in CATALOG.iter().enumerate() {
        def.validate()?;
        if CATALOG[i + 1..].iter().any(|other| other.kind == def.kind) {
            return Err(OtcError::InvalidSchema {
                schema: def.kind,
                reason: "kind registered twice".to_string(),
            });
        }
    }
    Ok(())
}
