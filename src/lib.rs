//! secret-sync - Centralized secret synchronization for service repositories.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── check         # Presence check for the current repository
//! │   ├── sync          # Validate a request and run the dispatcher
//! │   ├── policy        # Inspect the protection table
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .secret-sync.toml management
//!     ├── context       # CI detection and current repository
//!     ├── domain/       # Requests, outcomes and reports
//!     ├── policy        # Provisioning-only / syncable table
//!     ├── catalog       # Source repository secret values
//!     ├── platform/     # Repository secret stores
//!     │   ├── mod       # SecretStore trait
//!     │   ├── github    # GitHub REST implementation
//!     │   └── memory    # In-process implementation
//!     ├── presence      # Presence checking and remediation
//!     └── dispatch      # Per-name classify, resolve, write
//! ```
//!
//! # Guarantees
//!
//! - Provisioning-only secrets are never written anywhere
//! - One outcome per requested name, in request order
//! - Values are copied byte for byte, never decoded or re-encoded
//! - Each secret is its own key in the target store

pub mod cli;
pub mod core;
pub mod error;
