// Domain layer: pass and listing models plus the ledger port. No IO here.

pub mod model;
pub mod ports;
