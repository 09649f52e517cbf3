//! Report generation for coursecheck: HTML and CSV for assessments, CSV and
//! SARIF for page-audit results.

pub mod csv;
pub mod html;
pub mod sarif;
