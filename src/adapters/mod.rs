//! External system integrations for coursegraph.
//!
//! - [`modulestore`] - the content store the export reads from
//! - [`storage`] - object storage the generated files can be uploaded to
//!
//! Both sit behind traits ([`modulestore::ContentStore`],
//! [`storage::ObjectStore`]) so the export logic can be exercised with
//! local stand-ins.

pub mod modulestore;
pub mod storage;
