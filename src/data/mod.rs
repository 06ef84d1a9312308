//! Data layer: core types, loading, filtering and summaries.
//!
//! Architecture:
//! ```text
//!  .xlsx / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SurveyDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ SurveyDataset │  named columns, one row per respondent
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  demographic selections → respondent subset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ likert / shares  │  column → percentages
//!   └──────────────────┘
//! ```

pub mod error;
pub mod filter;
pub mod likert;
pub mod loader;
pub mod model;
pub mod shares;
