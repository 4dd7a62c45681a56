//! Validation of rail-domain scene annotations.
//!
//! Two independent rule sets are checked against a [`Scene`]:
//!
//! - a domain **ontology** declaring which object classes exist and which
//!   attributes their annotations must carry ([`Ontology::check`]);
//! - the **rail side** geometry of track polylines
//!   ([`rail_side::validate_rail_side`]).
//!
//! Every finding is an [`Issue`]; checkers never modify the scene.
//!
//! ```text
//! load(text) → Value ─ schema ─ Scene ─┬─ Ontology::check ──┐
//!                                      ├─ rail side ─────────┼→ Vec<Issue> → serialize
//!                                      └─ empty frames, sensors
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use raillabel_validator::{OntologySource, validate};
//! use serde_json::json;
//!
//! let ontology = json!({
//!     "person": {
//!         "attributes": {
//!             "isStanding": "boolean",
//!         }
//!     }
//! });
//! let scene = json!({
//!     "objects": {
//!         "7df959d7-0ec2-4722-8b62-bb2e529de2ec": { "name": "person0000", "type": "person" }
//!     },
//!     "frames": {
//!         "0": {
//!             "annotations": {
//!                 "1f654afe-0a18-497f-9db8-afac360ce94c": {
//!                     "type": "bbox",
//!                     "object_id": "7df959d7-0ec2-4722-8b62-bb2e529de2ec",
//!                     "pos": { "x": 0.0, "y": 0.0 },
//!                     "size": { "x": 1.0, "y": 1.0 },
//!                     "attributes": { "isStanding": "yes" }
//!                 }
//!             }
//!         }
//!     }
//! });
//!
//! let issues = validate(&scene, &OntologySource::Value(ontology)).expect("valid ontology");
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, raillabel_validator::IssueKind::AttributeType);
//! ```

pub mod attribute;
pub mod empty_frames;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod issue;
pub mod load;
pub mod object_class;
pub mod ontology;
pub mod rail_side;
pub mod scene;
pub mod schema;
pub mod scope;
pub mod sensors;
pub mod serialize;
pub mod validate;

pub use error::*;
pub use issue::*;

// Re-export the main types and entry points at the crate root.
pub use attribute::{AttributeDefinition, AttributeKind, AttributeTypeRegistry};
pub use object_class::ObjectClass;
pub use ontology::Ontology;
pub use scene::Scene;
pub use validate::{OntologySource, ValidateOptions, validate, validate_scene, validate_with};
