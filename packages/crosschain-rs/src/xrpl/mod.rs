//! XRPL support: JSON-RPC client and the MPToken issuance adapter.

pub mod client;
pub mod issuance;

pub use client::{SubmitOutcome, XrplClient};
pub use issuance::{encode_metadata, XrplIssuer, TES_SUCCESS, TF_MPT_CAN_TRANSFER};
