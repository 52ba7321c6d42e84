//! Data source adapter implementations.
//!
//! Each module provides a struct implementing [`crate::source::Source`]
//! that queries one public data source and normalises its output into
//! findings. All sources degrade gracefully: an unreachable upstream
//! shrinks the contribution, it never aborts the analysis.

pub mod breach;
pub mod code_hosting;
pub mod news;
pub mod paste;
pub mod search;
pub mod social;
pub mod whois_dns;

pub use breach::BreachSource;
pub use code_hosting::CodeHostingSource;
pub use news::NewsSource;
pub use paste::PasteSource;
pub use search::SearchSource;
pub use social::SocialSource;
pub use whois_dns::WhoisDnsSource;
