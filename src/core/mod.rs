// ─── sfdx-hydrate Core ───
// Builds package.xml descriptors and scratch org definitions from a live org.
//
// Architecture:
//   core/
//     catalog/: Metadata API + REST query client, member model, test mock
//     fetch/  : Describe → folder discovery → list fan-out, flow versions
//     package/: Merge into the type bucket, render package.xml
//     config/ : Layered settings + named quick filters
//     scratch/: Scratch org definition from org settings
//     http.rs : Shared reqwest client

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod package;
pub mod scratch;
