//! Orphanet disease lookups and dataset label enrichment.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use dxbench_ontology::{Enricher, OntologyConfig, OrphadataClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OrphadataClient::new(OntologyConfig::default())?;
//! let labels = vec!["Marfan syndrome".to_string()];
//! let (map, report) = Enricher::new(Arc::new(client), "labels_with_info.json")
//!     .run(labels)
//!     .await?;
//! println!("{} of {} labels matched", report.matched, map.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `DXBENCH_ORPHADATA_URL` | API base URL (default: `https://api.orphadata.com`) |
//! | `DXBENCH_ORPHADATA_LANG` | Language code (default: `en`) |
//! | `DXBENCH_ORPHADATA_TIMEOUT` | Request timeout in seconds (default: 15) |

pub mod client;
pub mod enrich;
pub mod error;
pub mod types;

pub use client::{DiseaseLookup, OrphadataClient};
pub use enrich::{labels_from_dataset, labels_from_file, EnrichReport, Enricher, LabelMap};
pub use error::{OntologyError, OntologyResult};
pub use types::{OntologyConfig, OrphaDisease};
