// Mon Aug 24 2026 - Alex

pub mod logging;
