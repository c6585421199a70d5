/// Data layer: core types, loading, filtering, aggregation, export.
///
/// Architecture:
/// ```text
///  data/*.csv (one per department)
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  load by department → Dataset (never fails)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  department predicate + seeded downsample
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │ aggregate │  │ metrics   │  │  export   │
///   │ sum/mean… │  │ KPI rows  │  │ csv/xlsx  │
///   └──────────┘  └──────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod store;
