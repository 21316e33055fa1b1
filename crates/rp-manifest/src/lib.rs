//! Release manifest loading and validation for relpack.
//!
//! The manifest (`zip_structure.json` in the project root) is an ordered
//! mapping from group name to a [`FileGroup`]: a source root, a destination
//! root inside the archive, and an ordered list of include entries (literal
//! filenames or glob patterns). Group order in the document determines
//! archive-write order.
//!
//! # Example
//!
//! ```
//! use rp_manifest::Manifest;
//!
//! let manifest: Manifest = serde_json::from_str(r#"{
//!     "src": {
//!         "src_path": "lib",
//!         "dest_path": "out/lib",
//!         "include": ["a.txt", "b.txt"],
//!         "clean": false
//!     }
//! }"#).unwrap();
//! assert_eq!(manifest.len(), 1);
//! assert!(manifest.get("src").is_some());
//! ```

pub mod error;
pub mod load;
pub mod model;

pub use error::{ManifestError, Result};
pub use load::load;
pub use model::{FileGroup, Manifest};

/// Manifest file name, resolved relative to the project root.
pub const MANIFEST_FILE: &str = "zip_structure.json";

/// Name of the group that gates filtering and testing.
pub const CLEAN_GATE_GROUP: &str = "src";
